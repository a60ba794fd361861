//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs (fresh, unretried probes)
//!         primary SELECT 1 ──fail──▶ unhealthy (cache never probed)
//!         │ok
//!         cache open? + PING ──fail──▶ degraded
//!         │ok
//!         healthy
//!     → report.rs (tri-state fold + ISO-8601 timestamp)
//! ```
//!
//! # Design Decisions
//! - Every probe recomputes the report; nothing is cached between probes
//! - The overall status is a total function of the two service statuses,
//!   expressed as one `match` so the invariant is checkable at a glance
//! - The cache can only ever degrade the system, never make it unhealthy

pub mod aggregator;
pub mod report;

pub use aggregator::{evaluate, CacheCheck, PrimaryCheck};
pub use report::{HealthReport, ServiceStatus, SystemStatus};
