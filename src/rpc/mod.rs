//! JSON-RPC error taxonomy shared across the gateway.

pub mod error;

pub use error::{CallError, RpcErrorBody, RpcErrorResponse};
