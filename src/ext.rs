//! Public extension contracts (request signing, time source).
//!
//! Both seams are injectable on [`Client`](crate::client::Client) so callers can bring their
//! own token minting or drive the throttle with a deterministic clock.

pub mod clock;
pub mod request_signer;

pub use clock::*;
pub use request_signer::*;
