//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows and timeouts > 0, status code valid)
//! - Check addresses and URLs parse
//! - Detect duplicate nodes and media servers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("status.media_servers: invalid URL '{0}'")]
    InvalidMediaServer(String),

    #[error("status.media_servers: duplicate entry '{0}'")]
    DuplicateMediaServer(String),

    #[error("nodes: duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("nodes: node '{0}' has an empty address")]
    EmptyNodeAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("status.expected_status: {0} is not a valid HTTP status code")]
    InvalidStatusCode(u16),

    #[error("status: group names must be non-empty and distinct")]
    InvalidGroupNames,

    #[error("status.probe_timeout_ms ({probe_ms}) must be shorter than timeouts.request_secs ({request_secs}s)")]
    ProbeOutlivesRequest { probe_ms: u64, request_secs: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut names = HashSet::new();
    for node in &config.nodes {
        if !names.insert(node.name.as_str()) {
            errors.push(ValidationError::DuplicateNode(node.name.clone()));
        }
        if node.address.trim().is_empty() {
            errors.push(ValidationError::EmptyNodeAddress(node.name.clone()));
        }
    }

    let status = &config.status;
    let mut seen = HashSet::new();
    for server in &status.media_servers {
        match Url::parse(server) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::InvalidMediaServer(server.clone())),
        }
        if !seen.insert(server.as_str()) {
            errors.push(ValidationError::DuplicateMediaServer(server.clone()));
        }
    }

    if status.cache_validity_secs == 0 {
        errors.push(ValidationError::Zero("status.cache_validity_secs"));
    }
    if status.probe_timeout_ms == 0 {
        errors.push(ValidationError::Zero("status.probe_timeout_ms"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    // A probe cycle must finish before the request timeout cuts /status off.
    if config.timeouts.request_secs > 0
        && status.probe_timeout_ms >= config.timeouts.request_secs.saturating_mul(1000)
    {
        errors.push(ValidationError::ProbeOutlivesRequest {
            probe_ms: status.probe_timeout_ms,
            request_secs: config.timeouts.request_secs,
        });
    }
    if reqwest::StatusCode::from_u16(status.expected_status).is_err() {
        errors.push(ValidationError::InvalidStatusCode(status.expected_status));
    }
    if status.node_group.is_empty()
        || status.media_group.is_empty()
        || status.node_group == status.media_group
    {
        errors.push(ValidationError::InvalidGroupNames);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
