// ── Gateway monitor ──
//
// The poll orchestrator plus the value cache and flattener. One poll
// cycle is: authenticate, fetch device info, fetch routes, flatten both
// through the field catalogs, publish the snapshot. The whole cycle runs
// under a single exclusive lock -- ordering (auth before fetch before
// flatten) is a correctness requirement, so there is no finer-grained
// locking. Polling is strictly caller-driven; the core spawns nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use gatewatch_api::{GatewayClient, TlsMode, TransportConfig};

use crate::catalog::{DeviceField, EndpointField, RouteField};
use crate::config::{MonitorConfig, TlsVerification};
use crate::error::CoreError;
use crate::format::{self, NONE};

/// One published statistics snapshot: a flat string map plus the time
/// the cycle that produced it completed.
///
/// Key grammar: `{Field}` for device fields, `{route}#{Field}` for route
/// summaries, `{route}#Source{Field}` and
/// `{route}#Destination{index}{Field}` for endpoint configs (the index is
/// empty when a route has exactly one destination, else 1-based).
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub statistics: BTreeMap<String, String>,
    pub collected_at: DateTime<Utc>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            statistics: BTreeMap::new(),
            collected_at: Utc::now(),
        }
    }
}

/// Route-name filter inputs, mutable between polls.
#[derive(Debug, Default)]
struct RouteFilter {
    include_all: Option<String>,
    names: Option<String>,
}

/// The resolved set of routes to emit this cycle.
enum RouteSelection {
    /// Emit no route fields at all.
    Nothing,
    Names(BTreeSet<String>),
}

impl RouteFilter {
    /// Resolve the two filter inputs against the route names fetched this
    /// cycle. An unset or "false" toggle with an empty explicit list means
    /// no route output; an explicit list REPLACES the fetched set, names
    /// that resolve to nothing and all -- unresolvable names later render
    /// as "None" fields.
    fn resolve(&self, fetched: &BTreeSet<String>) -> RouteSelection {
        let include_all = self.include_all.as_deref().unwrap_or("");
        if include_all.is_empty() || include_all.eq_ignore_ascii_case("false") {
            match self.names.as_deref() {
                None => RouteSelection::Nothing,
                Some(list) if list.trim().is_empty() => RouteSelection::Nothing,
                Some(list) => RouteSelection::Names(
                    list.split(',').map(|s| s.trim().to_string()).collect(),
                ),
            }
        } else {
            RouteSelection::Names(fetched.clone())
        }
    }
}

/// Mutable poll state, guarded by the cycle lock.
struct PollState {
    /// Composite-keyed string cache: device fields under their metric
    /// name, route fields under `{route}#{Field}`. Deliberately NOT
    /// cleared between cycles -- absent fields keep their prior values,
    /// and entries for routes that disappear from the gateway linger
    /// (reachable only through an explicit name filter).
    cache: HashMap<String, String>,
    /// Route names seen in the current cycle's fetch.
    route_names: BTreeSet<String>,
    /// Device id from the last device fetch, scoping the route fetch.
    device_id: Option<String>,
    /// Last successfully published snapshot.
    last_snapshot: Option<Arc<Snapshot>>,
}

/// Polls a Haivision Media Gateway and republishes selected fields as a
/// flat statistics map.
///
/// [`poll`](Self::poll) is the sole data-producing entry point. A second
/// concurrent caller blocks until the running cycle finishes; a failed
/// cycle propagates its error and leaves the previous snapshot untouched.
pub struct GatewayMonitor {
    client: GatewayClient,
    route_page_size: u32,
    filter: RwLock<RouteFilter>,
    /// When set, the next poll returns the previous snapshot without
    /// contacting the gateway, then clears the flag.
    skip_next: AtomicBool,
    state: Mutex<PollState>,
}

impl GatewayMonitor {
    /// Create a monitor from configuration. Does not contact the gateway;
    /// the first [`poll`](Self::poll) logs in.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match &config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
        };
        let client = GatewayClient::new(
            config.url,
            config.username,
            config.password,
            &transport,
        )?;

        Ok(Self {
            client,
            route_page_size: config.route_page_size,
            filter: RwLock::new(RouteFilter {
                include_all: config.include_all_routes,
                names: config.route_name_filter,
            }),
            skip_next: AtomicBool::new(false),
            state: Mutex::new(PollState {
                cache: HashMap::new(),
                route_names: BTreeSet::new(),
                device_id: None,
                last_snapshot: None,
            }),
        })
    }

    // ── Filter inputs ────────────────────────────────────────────────

    /// Set the "report every route" toggle.
    ///
    /// Boolean-as-string: unset or "false" (any case) means off; any
    /// other non-empty value means on, matching the adapter this
    /// replaces.
    pub fn set_include_all_routes(&self, value: Option<String>) {
        self.filter.write().expect("filter lock poisoned").include_all = value;
    }

    /// Set the explicit comma-separated route-name filter, used when the
    /// include-all toggle is off.
    pub fn set_route_name_filter(&self, value: Option<String>) {
        self.filter.write().expect("filter lock poisoned").names = value;
    }

    /// Make the next poll return the previous snapshot without touching
    /// the gateway. One-shot; the flag clears when that poll runs.
    pub fn skip_next_cycle(&self) {
        self.skip_next.store(true, Ordering::SeqCst);
    }

    /// The last successfully published snapshot, if any.
    pub async fn last_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.lock().await.last_snapshot.clone()
    }

    // ── Poll cycle ───────────────────────────────────────────────────

    /// Run one full poll cycle and return the resulting snapshot.
    ///
    /// Auth and fetch errors propagate as [`CoreError`]; the previous
    /// snapshot stays published. Per-field formatting defects never fail
    /// the cycle -- those fields render as "None".
    pub async fn poll(&self) -> Result<Arc<Snapshot>, CoreError> {
        let mut state = self.state.lock().await;

        if self.skip_next.swap(false, Ordering::SeqCst) {
            debug!("skip flag set, returning previous snapshot");
            return Ok(state
                .last_snapshot
                .clone()
                .unwrap_or_else(|| Arc::new(Snapshot::empty())));
        }

        self.client.ensure_authenticated().await?;
        self.fetch_device(&mut state).await?;
        self.fetch_routes(&mut state).await?;

        let mut stats = BTreeMap::new();
        flatten_device(&state.cache, &mut stats);

        let selection = self
            .filter
            .read()
            .expect("filter lock poisoned")
            .resolve(&state.route_names);
        flatten_routes(&state.cache, &selection, &mut stats);

        let snapshot = Arc::new(Snapshot {
            statistics: stats,
            collected_at: Utc::now(),
        });
        state.last_snapshot = Some(Arc::clone(&snapshot));

        debug!(
            entries = snapshot.statistics.len(),
            routes = state.route_names.len(),
            "poll cycle complete"
        );
        Ok(snapshot)
    }

    /// Shut the monitor down: best-effort logout, then clear the cache
    /// and published snapshot.
    pub async fn shutdown(&self) {
        if self.client.has_session() {
            self.client.logout().await;
        }
        let mut state = self.state.lock().await;
        state.cache.clear();
        state.route_names.clear();
        state.device_id = None;
        state.last_snapshot = None;
        debug!("monitor shut down");
    }

    // ── Fetch passes ─────────────────────────────────────────────────

    /// Fetch device info and fold catalog fields into the cache.
    ///
    /// Only fields present in the response are written; absent fields
    /// keep whatever the cache already held.
    async fn fetch_device(&self, state: &mut PollState) -> Result<(), CoreError> {
        let devices = self.client.list_devices().await?;
        let info = devices.first().ok_or_else(|| CoreError::Unreachable {
            message: "device list is empty".into(),
        })?;

        let id = info
            .get("_id")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Unreachable {
                message: "device record carries no _id".into(),
            })?;
        state.device_id = Some(id.to_string());

        for field in DeviceField::ALL {
            if let Some(value) = info.get(field.field()) {
                state
                    .cache
                    .insert(field.name().to_string(), json_value_text(value));
            }
        }
        Ok(())
    }

    /// Fetch the route list and fold catalog fields into the cache under
    /// `{route}#{Field}` keys. Source/Destinations are stored as raw JSON
    /// text; parsing is deferred to the flattener.
    async fn fetch_routes(&self, state: &mut PollState) -> Result<(), CoreError> {
        let device_id = state
            .device_id
            .clone()
            .ok_or_else(|| CoreError::Unreachable {
                message: "device id not resolved".into(),
            })?;

        let routes = self
            .client
            .list_routes(&device_id, self.route_page_size)
            .await?;

        state.route_names.clear();
        for route in &routes {
            let name = route
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| CoreError::Unreachable {
                    message: "route record carries no name".into(),
                })?;
            state.route_names.insert(name.to_string());

            for field in RouteField::ALL {
                if let Some(value) = route.get(field.field()) {
                    let text = if field.is_raw_json() {
                        value.to_string()
                    } else {
                        json_value_text(value)
                    };
                    state.cache.insert(
                        cache_key(name, field.name()),
                        format::normalize_value(Some(&text)),
                    );
                }
            }
        }
        Ok(())
    }
}

// ── Flatten passes ───────────────────────────────────────────────────

fn cache_key(route: &str, field: &str) -> String {
    format!("{route}#{field}")
}

/// Emit every device catalog field, defaulting absent values to "None".
fn flatten_device(cache: &HashMap<String, String>, stats: &mut BTreeMap<String, String>) {
    for field in DeviceField::ALL {
        let value = format::normalize_value(cache.get(field.name()).map(String::as_str));
        let rendered = match field {
            DeviceField::LastConnected => format::format_epoch_millis(&value),
            DeviceField::SerialNumber => value.replace(' ', ""),
            _ => value,
        };
        stats.insert(field.name().to_string(), rendered);
    }
}

/// Emit route catalog fields for every selected route name.
fn flatten_routes(
    cache: &HashMap<String, String>,
    selection: &RouteSelection,
    stats: &mut BTreeMap<String, String>,
) {
    let RouteSelection::Names(names) = selection else {
        return;
    };
    for name in names {
        for field in RouteField::ALL {
            let key = cache_key(name, field.name());
            let value = format::normalize_value(cache.get(&key).map(String::as_str));
            match field {
                RouteField::Source => flatten_source(stats, &value, name),
                RouteField::Destinations => flatten_destinations(stats, &value, name),
                RouteField::Uptime => {
                    stats.insert(key, format::format_uptime(&value));
                }
                _ => {
                    stats.insert(key, value);
                }
            }
        }
    }
}

/// Emit `{route}#Source{Field}` entries from the raw source JSON object.
fn flatten_source(stats: &mut BTreeMap<String, String>, raw: &str, route: &str) {
    if raw.eq_ignore_ascii_case(NONE) {
        return;
    }
    let node: Value = match serde_json::from_str(raw) {
        Ok(node) => node,
        Err(e) => {
            warn!(route, error = %e, "route source config is not valid JSON");
            return;
        }
    };
    write_endpoint_fields(stats, &node, route, "Source", "");
}

/// Emit `{route}#Destination{index}{Field}` entries from the raw
/// destinations JSON array. A single-element array carries no index
/// suffix; otherwise entries are numbered from 1. A non-array is skipped
/// silently.
fn flatten_destinations(stats: &mut BTreeMap<String, String>, raw: &str, route: &str) {
    if raw.eq_ignore_ascii_case(NONE) {
        return;
    }
    let node: Value = match serde_json::from_str(raw) {
        Ok(node) => node,
        Err(e) => {
            warn!(route, error = %e, "route destinations config is not valid JSON");
            return;
        }
    };
    let Some(items) = node.as_array() else {
        return;
    };
    for (i, destination) in items.iter().enumerate() {
        let suffix = if items.len() == 1 {
            String::new()
        } else {
            (i + 1).to_string()
        };
        if !write_endpoint_fields(stats, destination, route, "Destination", &suffix) {
            // A defective endpoint aborts the remaining destinations,
            // matching the adapter this replaces.
            return;
        }
    }
}

/// Emit endpoint catalog fields present on `node` under
/// `{route}#{kind}{suffix}{Field}` keys. `Address` is concatenated with
/// the sibling `port` field; a missing port aborts this endpoint (fields
/// already written stay) and returns `false`.
fn write_endpoint_fields(
    stats: &mut BTreeMap<String, String>,
    node: &Value,
    route: &str,
    kind: &str,
    suffix: &str,
) -> bool {
    for field in EndpointField::ALL {
        let Some(value) = node.get(field.field()) else {
            continue;
        };
        let rendered = format::normalize_value(Some(&json_value_text(value)));
        let key = format!("{route}#{kind}{suffix}{}", field.name());
        match field {
            EndpointField::Address => {
                let Some(port) = node.get("port") else {
                    warn!(route, kind, "endpoint config has an address but no port");
                    return false;
                };
                stats.insert(key, format!("{rendered}:{}", json_value_text(port)));
            }
            _ => {
                stats.insert(key, rendered);
            }
        }
    }
    true
}

/// Scalar text of a JSON value: strings verbatim, numbers and booleans
/// as literals, null as "null" (so the normalizer maps it to "None"),
/// containers as the empty string.
fn json_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_off_and_empty_list_selects_nothing() {
        let filter = RouteFilter::default();
        assert!(matches!(
            filter.resolve(&fetched(&["A", "B"])),
            RouteSelection::Nothing
        ));

        let filter = RouteFilter {
            include_all: Some("false".into()),
            names: Some("  ".into()),
        };
        assert!(matches!(
            filter.resolve(&fetched(&["A"])),
            RouteSelection::Nothing
        ));
    }

    #[test]
    fn filter_include_all_uses_fetched_names() {
        let filter = RouteFilter {
            include_all: Some("true".into()),
            names: Some("ignored".into()),
        };
        match filter.resolve(&fetched(&["A", "B"])) {
            RouteSelection::Names(names) => assert_eq!(names, fetched(&["A", "B"])),
            RouteSelection::Nothing => panic!("expected names"),
        }
    }

    #[test]
    fn filter_explicit_list_replaces_fetched_names() {
        let filter = RouteFilter {
            include_all: Some("false".into()),
            names: Some(" Main , Backup ,Ghost".into()),
        };
        match filter.resolve(&fetched(&["A"])) {
            RouteSelection::Names(names) => {
                assert_eq!(names, fetched(&["Main", "Backup", "Ghost"]));
            }
            RouteSelection::Nothing => panic!("expected names"),
        }
    }

    #[test]
    fn filter_unrecognized_toggle_behaves_like_true() {
        let filter = RouteFilter {
            include_all: Some("yes".into()),
            names: None,
        };
        assert!(matches!(
            filter.resolve(&fetched(&["A"])),
            RouteSelection::Names(_)
        ));
    }

    #[test]
    fn json_text_matches_scalar_rendering() {
        assert_eq!(json_value_text(&serde_json::json!("abc")), "abc");
        assert_eq!(json_value_text(&serde_json::json!(false)), "false");
        assert_eq!(json_value_text(&serde_json::json!(42)), "42");
        assert_eq!(json_value_text(&Value::Null), "null");
        assert_eq!(json_value_text(&serde_json::json!({"a": 1})), "");
    }
}
