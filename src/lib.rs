//! Zoom REST API client core: JWT-signed requests, a fixed-window throttle that respects the
//! server quota, and one normalized response shape for every HTTP verb.
//!
//! The crate is transport-and-policy only. [`client::Client`] throttles through
//! [`throttle::ThrottleGate`], signs each request with a fresh token from an
//! [`ext::RequestSigner`], and folds both successful and client-error responses into
//! [`client::ApiResponse`]. Resource-specific helpers in [`endpoint`] merely map method names
//! to paths.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod throttle;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::Result;
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
