// gatewatch-core: polling, flattening, and snapshot logic for Haivision
// gateway monitoring.
//
// The crate's single data-producing entry point is
// [`GatewayMonitor::poll`], which runs one full cycle (authenticate,
// fetch, flatten) and publishes a flat string statistics map.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod monitor;

pub use config::{MonitorConfig, TlsVerification};
pub use error::CoreError;
pub use monitor::{GatewayMonitor, Snapshot};
