//! Gateway status aggregation library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod nodes;
pub mod observability;
pub mod rpc;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
