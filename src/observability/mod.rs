//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry + http layers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (operation counters, product gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
