//! Security subsystem: the three admission stages.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → ip_blocker.rs (resolve identity, consult reputation oracle)
//!     → rate_limit.rs (per-(route, client) fixed-window quota)
//!     → log_integrity.rs (periodic tamper check, never blocks)
//!     → Pass to application handler
//! ```
//!
//! # Design Decisions
//! - Stages run in this fixed order for every request; the gatekeeper
//!   attaches `ClientIp` and the governor reuses it
//! - Any stage may short-circuit with a rejection, except the sentinel
//! - Fail closed on blocklist and quota violations

pub mod ip_blocker;
pub mod log_integrity;
pub mod rate_limit;

pub use ip_blocker::IpGatekeeper;
pub use log_integrity::IntegritySentinel;
pub use rate_limit::RateGovernor;
