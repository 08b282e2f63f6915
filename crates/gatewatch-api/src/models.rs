// Gateway API response envelopes
//
// The gateway's JSON shapes are thin: login wraps its payload in a
// `response` object, and the route list wraps its items in `data`.
// Monitoring payloads themselves stay as raw `serde_json` values because
// downstream flattening is driven by external field names, not typed
// structs.

use serde::Deserialize;
use serde_json::Value;

/// Login envelope from `POST /api/session`:
/// `{ "response": { "sessionID": "..." } }`
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub response: Option<SessionBody>,
}

#[derive(Debug, Deserialize)]
pub struct SessionBody {
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
}

/// Route list envelope from `GET /api/gateway/{id}/routes`:
/// `{ "data": [ ... ] }`
#[derive(Debug, Deserialize)]
pub struct RoutePage {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}
