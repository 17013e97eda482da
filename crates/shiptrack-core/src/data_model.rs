//! Data Model: raw carrier records, normalized records, timeline items
//!
//! The raw types mirror the carrier wire format (`strAction`, `sTrRemarks`,
//! ...). The serde renames on those types are the field-name lookup table;
//! the normalized types use stable camelCase names and never hold `null`.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TrackError;

/// One tracking event as the carrier sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrackEvent {
    #[serde(rename = "strCode", default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    /// Free-text status label ("Picked Up", "In Transit", "Delivered", ...)
    #[serde(rename = "strAction", default, deserialize_with = "lenient_string")]
    pub action: Option<String>,
    #[serde(rename = "strOrigin", default, deserialize_with = "lenient_string")]
    pub origin: Option<String>,
    #[serde(rename = "strDestination", default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,
    /// `DDMMYYYY`
    #[serde(rename = "strActionDate", default, deserialize_with = "lenient_string")]
    pub action_date: Option<String>,
    /// `HHMM`, sometimes without the leading zero
    #[serde(rename = "strActionTime", default, deserialize_with = "lenient_string")]
    pub action_time: Option<String>,
    #[serde(rename = "sTrRemarks", default, deserialize_with = "lenient_string")]
    pub remarks: Option<String>,
    #[serde(rename = "strManifestNo", default, deserialize_with = "lenient_string")]
    pub manifest_no: Option<String>,
}

/// Shipment header as the carrier sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrackHeader {
    #[serde(rename = "strShipmentNo", default, deserialize_with = "lenient_string")]
    pub shipment_no: Option<String>,
    #[serde(rename = "strRefNo", default, deserialize_with = "lenient_string")]
    pub ref_no: Option<String>,
    #[serde(rename = "strOrigin", default, deserialize_with = "lenient_string")]
    pub origin: Option<String>,
    #[serde(rename = "strDestination", default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,
    #[serde(rename = "strStatus", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "strStatusTransOn", default, deserialize_with = "lenient_string")]
    pub status_trans_on: Option<String>,
    #[serde(rename = "strStatusTransTime", default, deserialize_with = "lenient_string")]
    pub status_trans_time: Option<String>,
    #[serde(rename = "strRemarks", default, deserialize_with = "lenient_string")]
    pub remarks: Option<String>,
    #[serde(rename = "strBookedDate", default, deserialize_with = "lenient_string")]
    pub booked_date: Option<String>,
    #[serde(rename = "strBookedTime", default, deserialize_with = "lenient_string")]
    pub booked_time: Option<String>,
    /// `DDMMYYYY` or empty
    #[serde(rename = "strExpectedDeliveryDate", default, deserialize_with = "lenient_string")]
    pub expected_delivery_date: Option<String>,
}

/// Keys, with aliases, that only mean something on a successful lookup.
const PAYLOAD_KEYS: [&str; 4] = ["trackHeader", "header", "trackDetails", "events"];

/// Parsed body of a carrier tracking response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApiResponse {
    /// Truthiness of the carrier's `statusFlag`, whatever JSON type it used.
    #[serde(rename = "statusFlag", default, deserialize_with = "truthy")]
    pub status_flag: bool,
    #[serde(rename = "trackHeader", alias = "header", default)]
    pub header: Option<RawTrackHeader>,
    #[serde(rename = "trackDetails", alias = "events", default)]
    pub events: Option<Vec<RawTrackEvent>>,
    #[serde(
        rename = "errorDetails",
        alias = "errorDetail",
        default,
        deserialize_with = "lenient_string"
    )]
    pub error_details: Option<String>,
}

impl RawApiResponse {
    /// Decode an already-parsed JSON body.
    ///
    /// With a falsy `statusFlag` the header and events are dropped unread,
    /// so a "not found" answer stays one whatever else the carrier sent.
    /// A successful body whose shape cannot be decoded (e.g. `trackDetails`
    /// is a string) is reported as a malformed response.
    pub fn from_value(mut value: Value) -> Result<Self, TrackError> {
        if !value.get("statusFlag").is_some_and(is_truthy) {
            if let Value::Object(map) = &mut value {
                for key in PAYLOAD_KEYS {
                    map.remove(key);
                }
            }
        }
        serde_json::from_value(value).map_err(|e| TrackError::MalformedResponse(e.to_string()))
    }
}

/// A tracking event with every field present; absent values are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub code: String,
    pub action: String,
    pub origin: String,
    pub destination: String,
    pub action_date: String,
    pub action_time: String,
    pub remarks: String,
    pub manifest_no: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedHeader {
    pub shipment_no: String,
    pub ref_no: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub status_trans_on: String,
    pub status_trans_time: String,
    pub remarks: String,
    pub booked_date: String,
    pub booked_time: String,
    pub expected_delivery_date: String,
}

/// Outcome of normalizing one carrier response.
///
/// `success == true` always comes with a non-empty `events` list; a failed
/// lookup has no events, an all-empty header and an `error_detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrackingResult {
    pub success: bool,
    pub header: NormalizedHeader,
    pub events: Vec<NormalizedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl NormalizedTrackingResult {
    /// Whether there is enough here to draw a timeline: a successful lookup,
    /// some identifier on the header, and at least one event.
    pub fn is_displayable(&self) -> bool {
        self.success
            && (!self.header.shipment_no.is_empty() || !self.header.ref_no.is_empty())
            && !self.events.is_empty()
    }

    /// Turn a failed lookup into `TrackError::NotFound` so callers can use `?`.
    pub fn into_outcome(self) -> Result<(NormalizedHeader, Vec<NormalizedEvent>), TrackError> {
        if self.success {
            Ok((self.header, self.events))
        } else {
            Err(TrackError::NotFound(self.error_detail.unwrap_or_default()))
        }
    }
}

/// One slot in the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineItem {
    /// A single milestone event.
    Event(NormalizedEvent),
    /// All "in transit" events collapsed into one expandable slot.
    TransitGroup { events: Vec<NormalizedEvent> },
}

impl TimelineItem {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::TransitGroup { .. })
    }

    /// Events carried by this slot: one for a leaf, all members for a group.
    pub fn events(&self) -> &[NormalizedEvent] {
        match self {
            Self::Event(event) => std::slice::from_ref(event),
            Self::TransitGroup { events } => events,
        }
    }
}

/// Display-ready tracking data: header plus ordered timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracking {
    pub header: NormalizedHeader,
    pub items: Vec<TimelineItem>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        // null, objects and arrays carry no usable text
        _ => None,
    })
}

/// Truthiness of a loosely typed flag: `false`, `0`, `""` and `null` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}
