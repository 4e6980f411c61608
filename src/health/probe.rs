//! Media server liveness probing.
//!
//! # Responsibilities
//! - Issue a single GET against a media server with a deadline
//! - Classify the outcome into a `ServerObservation`
//!
//! # Classification
//! ```text
//! transport error / timeout  → offline    (detail = error text)
//! status == expected         → ok
//! any other status           → not_ready  (detail = "http status <code>")
//! ```
//!
//! Media servers answer an idle probe with `404`, so that is the default
//! expected status. No retries: one failed probe is final for the cycle.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time;

use crate::health::snapshot::ServerObservation;

/// Performs one liveness check against one target.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: &str) -> ServerObservation;
}

/// Outcome of a probe request before classification.
#[derive(Debug)]
pub enum ProbeOutcome {
    Response(StatusCode),
    TransportError(String),
    TimedOut(Duration),
}

/// Map a raw outcome to an observation.
pub fn classify(address: &str, outcome: ProbeOutcome, expected: StatusCode) -> ServerObservation {
    match outcome {
        ProbeOutcome::Response(status) if status == expected => ServerObservation::ok(address),
        ProbeOutcome::Response(status) => {
            ServerObservation::not_ready(address, format!("http status {}", status.as_u16()))
        }
        ProbeOutcome::TransportError(error) => ServerObservation::offline(address, error),
        ProbeOutcome::TimedOut(after) => {
            ServerObservation::offline(address, format!("timed out after {}ms", after.as_millis()))
        }
    }
}

/// HTTP prober for media servers.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
    expected: StatusCode,
}

impl HttpProbe {
    pub fn new(timeout: Duration, expected: StatusCode) -> Self {
        let client = Client::builder()
            .user_agent("gateway-status-probe")
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build probe client, using defaults");
                Client::new()
            });

        Self {
            client,
            timeout,
            expected,
        }
    }

    async fn fetch(&self, address: &str) -> ProbeOutcome {
        match time::timeout(self.timeout, self.client.get(address).send()).await {
            Ok(Ok(response)) => ProbeOutcome::Response(response.status()),
            Ok(Err(e)) => ProbeOutcome::TransportError(e.to_string()),
            Err(_) => ProbeOutcome::TimedOut(self.timeout),
        }
    }
}

#[async_trait]
impl Prober for HttpProbe {
    async fn probe(&self, address: &str) -> ServerObservation {
        let observation = classify(address, self.fetch(address).await, self.expected);

        if let Some(detail) = &observation.detail {
            tracing::warn!(
                addr = %address,
                status = observation.status.as_str(),
                error = %detail,
                "Media server probe failed"
            );
        } else {
            tracing::debug!(addr = %address, "Media server probe ok");
        }

        observation
    }
}
