//! Endpoint handlers.
//!
//! - `GET /status`: cached health snapshot, 200 or 503
//! - `GET /whoami`: echo of the caller's address and forwarding headers
//! - fallback: JSON-RPC "method unavailable" envelope, 404

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::rpc::CallError;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Caller details returned by `/whoami`.
#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub ip: String,
    #[serde(rename = "X-Forwarded-For")]
    pub forwarded_for: String,
    #[serde(rename = "X-Real-Ip")]
    pub real_ip: String,
}

pub async fn get_status(State(state): State<AppState>) -> Response {
    let snapshot = state.cache.get_or_recompute().await;

    match serde_json::to_vec_pretty(snapshot.as_ref()) {
        Ok(body) => json_response(snapshot.http_status(), body),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize health snapshot");
            (StatusCode::INTERNAL_SERVER_ERROR, CallError::Internal(e.to_string())).into_response()
        }
    }
}

pub async fn whoami(request: Request<Body>) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let headers = request.headers();

    let details = WhoAmI {
        ip,
        forwarded_for: header_text(headers, "x-forwarded-for"),
        real_ip: header_text(headers, "x-real-ip"),
    };

    match serde_json::to_vec_pretty(&details) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, CallError::Internal(e.to_string())).into_response(),
    }
}

pub async fn not_found(request: Request<Body>) -> Response {
    tracing::debug!(path = %request.uri().path(), "No route matched");
    let err = CallError::MethodUnavailable(format!("no handler for {}", request.uri().path()));
    (StatusCode::NOT_FOUND, err).into_response()
}

fn header_text(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        body,
    )
        .into_response()
}
