//! Auth-domain credentials and the JWT bearer token signer.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::*;
