//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the status gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend nodes the gateway balances across.
    pub nodes: Vec<NodeConfig>,

    /// Status aggregation settings.
    pub status: StatusConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Backend node definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Unique node identifier.
    pub name: String,

    /// Node address as reported in the status document.
    pub address: String,
}

/// Status aggregation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Media servers probed on every recompute.
    pub media_servers: Vec<String>,

    /// How long a computed snapshot is served before it is recomputed.
    pub cache_validity_secs: u64,

    /// Per-probe timeout in milliseconds.
    pub probe_timeout_ms: u64,

    /// Status code an idle, healthy media server answers with.
    pub expected_status: u16,

    /// Group name for backend nodes in the status document.
    pub node_group: String,

    /// Group name for media servers in the status document.
    pub media_group: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            media_servers: Vec::new(),
            cache_validity_secs: 120,
            probe_timeout_ms: 5_000,
            expected_status: 404,
            node_group: "lbrynet".to_string(),
            media_group: "player".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.status.cache_validity_secs, 120);
        assert_eq!(config.status.expected_status, 404);
        assert!(config.nodes.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [[nodes]]
            name = "n1"
            address = "http://10.0.0.1:5279"

            [status]
            media_servers = ["https://player1.example.com"]
            cache_validity_secs = 30

            [observability]
            log_format = "json"
        "#;
        let config: GatewayConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(config.status.media_servers.len(), 1);
        assert_eq!(config.status.cache_validity_secs, 30);
        assert_eq!(config.status.probe_timeout_ms, 5_000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
