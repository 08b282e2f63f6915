// Route list endpoint
//
// Routes are paginated; the monitoring contract fetches one page sized
// large enough to capture every route, so the page size is a caller
// decision rather than a constant here.

use serde_json::Value;
use tracing::debug;

use crate::client::GatewayClient;
use crate::error::Error;
use crate::models::RoutePage;

impl GatewayClient {
    /// List routes configured on a gateway device.
    ///
    /// `GET /api/gateway/{device_id}/routes?page=1&pageSize={page_size}`
    /// -- expects `{data: [...]}`. A body without a `data` array is an
    /// [`Error::Unreachable`].
    pub async fn list_routes(
        &self,
        device_id: &str,
        page_size: u32,
    ) -> Result<Vec<Value>, Error> {
        debug!(device_id, page_size, "fetching route list");
        let body = self
            .get_json(&format!(
                "gateway/{device_id}/routes?page=1&pageSize={page_size}"
            ))
            .await?;

        let page: RoutePage = serde_json::from_value(body)
            .map_err(|e| Error::unreachable(format!("route list response malformed: {e}")))?;

        page.data
            .ok_or_else(|| Error::unreachable("route list response carried no data array"))
    }
}
