//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All stages produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, Prometheus exposition)
//! ```
//!
//! # Design Decisions
//! - Structured logging; rejections log at warn, verification faults at error
//! - Metrics are cheap (atomic increments), labeled by stage and reason
//! - The exporter is installed once from the binary, never from the library

pub mod logging;
pub mod metrics;
