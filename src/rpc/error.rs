//! Call errors and their JSON-RPC envelope.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// General server error.
pub const ERR_INTERNAL: i64 = -32603;
/// General error raised while forwarding a call to a node.
pub const ERR_PROXY: i64 = -32080;
/// Supplied auth token or account is unknown.
pub const ERR_AUTH_FAILED: i64 = -32085;
/// Request body is not valid JSON.
pub const ERR_JSON_PARSE: i64 = -32700;
/// Client-supplied params are wrong.
pub const ERR_INVALID_PARAMS: i64 = -32602;
/// General client error.
pub const ERR_INVALID_REQUEST: i64 = -32600;
/// Requested method does not exist.
pub const ERR_METHOD_UNAVAILABLE: i64 = -32601;

/// Errors raised while processing or forwarding a client call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Proxy(String),

    #[error("authentication failed: account not found")]
    AuthFailed,

    #[error("{0}")]
    MalformedInput(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    MethodUnavailable(String),
}

impl CallError {
    /// JSON-RPC error code for this kind.
    pub fn code(&self) -> i64 {
        match self {
            CallError::Internal(_) => ERR_INTERNAL,
            CallError::Proxy(_) => ERR_PROXY,
            CallError::AuthFailed => ERR_AUTH_FAILED,
            CallError::MalformedInput(_) => ERR_JSON_PARSE,
            CallError::InvalidParams(_) => ERR_INVALID_PARAMS,
            CallError::InvalidRequest(_) => ERR_INVALID_REQUEST,
            CallError::MethodUnavailable(_) => ERR_METHOD_UNAVAILABLE,
        }
    }

    pub fn to_rpc_response(&self) -> RpcErrorResponse {
        RpcErrorResponse {
            error: RpcErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
            jsonrpc: "2.0".to_string(),
        }
    }
}

/// `{"error": {...}, "jsonrpc": "2.0"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorResponse {
    pub error: RpcErrorBody,
    pub jsonrpc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC errors travel in a 200 response; callers override the status
/// with a `(StatusCode, CallError)` tuple when the transport needs one.
impl IntoResponse for CallError {
    fn into_response(self) -> Response {
        Json(self.to_rpc_response()).into_response()
    }
}
