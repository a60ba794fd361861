//! Health report model.

use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

/// Observed state of one backing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Connected,
    Disconnected,
    /// Not probed; reported for the cache when the primary check already
    /// failed and the probe short-circuited.
    Unknown,
}

/// Overall system status folded from the two service statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl SystemStatus {
    /// Total fold over the two sub-statuses.
    ///
    /// Unhealthy iff the primary store is not connected; a connected primary
    /// with anything less than a connected cache is degraded.
    pub fn from_services(database: ServiceStatus, redis: ServiceStatus) -> Self {
        match (database, redis) {
            (ServiceStatus::Connected, ServiceStatus::Connected) => SystemStatus::Healthy,
            (ServiceStatus::Connected, _) => SystemStatus::Degraded,
            (_, _) => SystemStatus::Unhealthy,
        }
    }

    /// HTTP status the health endpoint responds with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SystemStatus::Healthy => StatusCode::OK,
            SystemStatus::Degraded => StatusCode::PARTIAL_CONTENT,
            SystemStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Per-service statuses. Field names are part of the wire contract.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceStatuses {
    pub database: ServiceStatus,
    pub redis: ServiceStatus,
}

/// One point-in-time health report.
///
/// Serialized as `{status, timestamp, services: {database, redis}}`; the
/// field names are fixed for compatibility with existing monitoring.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: SystemStatus,
    pub timestamp: String,
    pub services: ServiceStatuses,
}

impl HealthReport {
    /// Assemble a report, capturing the timestamp now.
    pub fn new(database: ServiceStatus, redis: ServiceStatus) -> Self {
        Self {
            status: SystemStatus::from_services(database, redis),
            timestamp: Utc::now().to_rfc3339(),
            services: ServiceStatuses { database, redis },
        }
    }
}
