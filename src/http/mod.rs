//! HTTP boundary helpers.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → identity.rs (resolve client address, attach ClientIp)
//!     → security stages decide
//!     → response.rs (403 construction, body negotiation) on rejection
//! ```

pub mod identity;
pub mod response;

pub use identity::ClientIp;
pub use response::BlockReason;
