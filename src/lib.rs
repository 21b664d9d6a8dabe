//! Request admission pipeline library.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod oracle;
pub mod pipeline;
pub mod security;
pub mod store;

pub use config::AdmissionConfig;
pub use error::AdmissionError;
pub use pipeline::AdmissionPipeline;
