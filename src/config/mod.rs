//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AdmissionConfig (validated, immutable)
//!     → shared via Arc to all pipeline stages
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; stages receive it at construction,
//!   never through an ambient settings lookup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdmissionConfig;
pub use schema::IpBlockerConfig;
pub use schema::LogIntegrityConfig;
pub use schema::RateLimitConfig;
pub use schema::RoutePolicy;
