// Device info endpoint
//
// The gateway reports the adapter's device record as a single-element
// array; callers take element 0.

use serde_json::Value;
use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;

impl GatewayClient {
    /// List device info records.
    ///
    /// `GET /api/devices` -- expects a JSON array. A non-array body is an
    /// [`Error::Unreachable`]; an empty array is the caller's problem
    /// (the fetcher treats it as unreachable too).
    pub async fn list_devices(&self) -> Result<Vec<Value>, Error> {
        debug!("fetching device info");
        let body = self.get_json("devices").await?;
        match body {
            Value::Array(items) => Ok(items),
            _ => Err(Error::unreachable(
                "device info response was not an array",
            )),
        }
    }
}
