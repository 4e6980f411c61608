//! Observation and snapshot types.
//!
//! # Verdicts
//! ```text
//! ServerStatus:  ok | not_ready | offline | failing   (one per target)
//! OverallStatus: ok | failing                         (one per snapshot)
//!
//! overall = failing  ⇔  some observation != ok
//! http    = 200 when ok, 503 when failing
//! ```

use std::collections::BTreeMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health verdict for a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// Target is healthy.
    Ok,
    /// Target answered, but not the way an idle healthy server does.
    NotReady,
    /// Target could not be reached.
    Offline,
    /// Target state could not be determined.
    Failing,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Ok => "ok",
            ServerStatus::NotReady => "not_ready",
            ServerStatus::Offline => "offline",
            ServerStatus::Failing => "failing",
        }
    }
}

/// One probed or reported target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerObservation {
    pub address: String,
    pub status: ServerStatus,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ServerObservation {
    pub fn ok(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status: ServerStatus::Ok,
            detail: None,
        }
    }

    pub fn not_ready(address: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::unhealthy(address, ServerStatus::NotReady, detail)
    }

    pub fn offline(address: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::unhealthy(address, ServerStatus::Offline, detail)
    }

    pub fn failing(address: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::unhealthy(address, ServerStatus::Failing, detail)
    }

    fn unhealthy(address: impl Into<String>, status: ServerStatus, detail: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status,
            detail: Some(detail.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ServerStatus::Ok
    }
}

/// Coarse verdict over every observation in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Ok,
    Failing,
}

/// Aggregated result of one probing cycle.
///
/// The overall status is derived from the groups at construction, so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    #[serde(rename = "timestamp")]
    computed_at: DateTime<Utc>,
    #[serde(rename = "services")]
    groups: BTreeMap<String, Vec<ServerObservation>>,
    #[serde(rename = "general_state")]
    overall_status: OverallStatus,
}

impl HealthSnapshot {
    pub fn new(computed_at: DateTime<Utc>, groups: BTreeMap<String, Vec<ServerObservation>>) -> Self {
        let overall_status = if groups.values().flatten().all(ServerObservation::is_ok) {
            OverallStatus::Ok
        } else {
            OverallStatus::Failing
        };
        Self {
            computed_at,
            groups,
            overall_status,
        }
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<ServerObservation>> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&[ServerObservation]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn overall_status(&self) -> OverallStatus {
        self.overall_status
    }

    /// Response code for the status endpoint.
    pub fn http_status(&self) -> StatusCode {
        match self.overall_status {
            OverallStatus::Ok => StatusCode::OK,
            OverallStatus::Failing => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
