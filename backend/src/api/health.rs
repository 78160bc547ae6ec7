//! Liveness endpoints
//!
//! `GET /api` is a bare "is it up" probe; `GET /api/health` adds uptime and
//! a process memory snapshot.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::SharedState;

/// Service name reported by the liveness endpoints
pub const SERVICE_NAME: &str = "SUS Virtual Chatbot";

#[allow(missing_docs)]
#[derive(Serialize)]
pub struct ApiStatusResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Response of `GET /api/health`
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the handler runs
    pub status: &'static str,
    /// Service name
    pub service: &'static str,
    /// Configured model
    pub model: String,
    /// Crate version
    pub version: &'static str,
    /// Time of the check
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime_secs: f64,
    /// Process memory usage
    pub memory: MemorySnapshot,
}

/// Resident and virtual memory of this process, when the platform exposes it
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Resident set size in bytes
    pub rss_bytes: Option<u64>,
    /// Virtual memory size in bytes
    pub virtual_bytes: Option<u64>,
}

impl MemorySnapshot {
    /// Read the current process's memory usage
    pub fn current() -> Self {
        std::fs::read_to_string("/proc/self/status")
            .map(|status| Self::parse_proc_status(&status))
            .unwrap_or_default()
    }

    /// Parse `VmRSS` / `VmSize` (reported in kB) from `/proc/<pid>/status`
    fn parse_proc_status(status: &str) -> Self {
        let field = |name: &str| {
            status
                .lines()
                .find_map(|line| line.strip_prefix(name))
                .and_then(|rest| rest.trim().trim_end_matches("kB").trim().parse::<u64>().ok())
                .map(|kb| kb * 1024)
        };

        Self {
            rss_bytes: field("VmRSS:"),
            virtual_bytes: field("VmSize:"),
        }
    }
}

/// GET /api - Minimal online check
pub async fn api_status() -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        status: "API online",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/health - Liveness with uptime and memory
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        model: state.chat.model_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        uptime_secs: state.uptime().as_secs_f64(),
        memory: MemorySnapshot::current(),
    })
}
