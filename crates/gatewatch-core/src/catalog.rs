// Field catalogs
//
// Static ordered tables mapping the gateway's external JSON field names
// to the metric key names published in the statistics map. Three
// independent record kinds: device info, route summary, and endpoint
// config (shared by route sources and destinations). Iteration order is
// the declaration order of each `ALL` array and is deliberately stable.

/// Device info metrics, keyed off `GET /api/devices` element 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceField {
    DeviceId,
    Type,
    IpAddress,
    DeviceName,
    LastConnected,
    StatusCode,
    Status,
    StatusDetails,
    SerialNumber,
    FirmwareVersion,
    HasAdminError,
    PendingSync,
    LastConnection,
}

impl DeviceField {
    pub const ALL: [Self; 13] = [
        Self::DeviceId,
        Self::Type,
        Self::IpAddress,
        Self::DeviceName,
        Self::LastConnected,
        Self::StatusCode,
        Self::Status,
        Self::StatusDetails,
        Self::SerialNumber,
        Self::FirmwareVersion,
        Self::HasAdminError,
        Self::PendingSync,
        Self::LastConnection,
    ];

    /// The published metric key.
    pub fn name(self) -> &'static str {
        match self {
            Self::DeviceId => "DeviceID",
            Self::Type => "Type",
            Self::IpAddress => "IPAddress",
            Self::DeviceName => "DeviceName",
            Self::LastConnected => "LastConnected",
            Self::StatusCode => "StatusCode",
            Self::Status => "Status",
            Self::StatusDetails => "StatusDetails",
            Self::SerialNumber => "SerialNumber",
            Self::FirmwareVersion => "FirmwareVersion",
            Self::HasAdminError => "HasAdminError",
            Self::PendingSync => "PendingSync",
            Self::LastConnection => "LastConnection",
        }
    }

    /// The external JSON field on the device record.
    pub fn field(self) -> &'static str {
        match self {
            Self::DeviceId => "_id",
            Self::Type => "type",
            Self::IpAddress => "ip",
            Self::DeviceName => "name",
            Self::LastConnected => "lastConnectedAt",
            Self::StatusCode => "statusCode",
            Self::Status => "status",
            Self::StatusDetails => "statusDetails",
            Self::SerialNumber => "serialNumber",
            Self::FirmwareVersion => "firmware",
            Self::HasAdminError => "hasAdminError",
            Self::PendingSync => "pendingSync",
            Self::LastConnection => "lastConnection",
        }
    }
}

/// Route summary metrics, keyed off each route list element.
///
/// `Source` and `Destinations` hold raw JSON text in the cache; the
/// flattener defers parsing them until the endpoint sub-passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteField {
    Uptime,
    Id,
    Status,
    Source,
    Destinations,
}

impl RouteField {
    pub const ALL: [Self; 5] = [
        Self::Uptime,
        Self::Id,
        Self::Status,
        Self::Source,
        Self::Destinations,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Uptime => "RouteUptime",
            Self::Id => "RouteID",
            Self::Status => "RouteStatus",
            Self::Source => "Source",
            Self::Destinations => "Destinations",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::Uptime => "elapsedTime",
            Self::Id => "id",
            Self::Status => "summaryStatusDetails",
            Self::Source => "source",
            Self::Destinations => "destinations",
        }
    }

    /// Whether the cache stores this field as raw JSON text.
    pub fn is_raw_json(self) -> bool {
        matches!(self, Self::Source | Self::Destinations)
    }
}

/// Endpoint config metrics, applied to a route's source object and to
/// each element of its destinations array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointField {
    Name,
    Type,
    Protocol,
    Address,
    Status,
}

impl EndpointField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Type,
        Self::Protocol,
        Self::Address,
        Self::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Protocol => "Protocol",
            Self::Address => "Address",
            Self::Status => "Status",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "mode",
            Self::Protocol => "protocol",
            Self::Address => "address",
            Self::Status => "summaryStatusDetails",
        }
    }
}
