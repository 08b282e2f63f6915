// gatewatch-api: Async Rust client for the Haivision Media Gateway REST API

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod transport;

pub use client::GatewayClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
