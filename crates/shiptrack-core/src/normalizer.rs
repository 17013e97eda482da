//! Carrier response normalization.
//!
//! Maps a [`RawApiResponse`] onto [`NormalizedTrackingResult`]:
//! - `statusFlag` falsy: a failed lookup carrying the carrier's message
//! - `statusFlag` truthy: header and events copied field by field, with
//!   every absent value turned into `""`
//!
//! A truthy flag without a header, without an event list, or with an empty
//! event list is an upstream contract violation and comes back as
//! [`TrackError::MalformedResponse`].

use crate::data_model::{
    NormalizedEvent, NormalizedHeader, NormalizedTrackingResult, RawApiResponse, RawTrackEvent,
    RawTrackHeader,
};
use crate::error::TrackError;

/// Message used when the carrier reports failure without saying why.
pub const DEFAULT_ERROR_DETAIL: &str = "No tracking data found";

/// Normalize one carrier response. Pure: same input, same output.
pub fn normalize(raw: &RawApiResponse) -> Result<NormalizedTrackingResult, TrackError> {
    if !raw.status_flag {
        let detail = raw
            .error_details
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_ERROR_DETAIL);

        return Ok(NormalizedTrackingResult {
            success: false,
            header: NormalizedHeader::default(),
            events: Vec::new(),
            error_detail: Some(detail.to_string()),
        });
    }

    let (header, events) = match (&raw.header, &raw.events) {
        (Some(header), Some(events)) => (header, events),
        (None, _) => {
            return Err(TrackError::MalformedResponse(
                "successful response without trackHeader".to_string(),
            ))
        }
        (_, None) => {
            return Err(TrackError::MalformedResponse(
                "successful response without trackDetails".to_string(),
            ))
        }
    };

    if events.is_empty() {
        return Err(TrackError::MalformedResponse(
            "successful response with no tracking events".to_string(),
        ));
    }

    tracing::debug!(events = events.len(), "normalized carrier response");
    Ok(NormalizedTrackingResult {
        success: true,
        header: normalize_header(header),
        events: events.iter().map(normalize_event).collect(),
        error_detail: None,
    })
}

pub fn normalize_header(raw: &RawTrackHeader) -> NormalizedHeader {
    NormalizedHeader {
        shipment_no: or_empty(&raw.shipment_no),
        ref_no: or_empty(&raw.ref_no),
        origin: or_empty(&raw.origin),
        destination: or_empty(&raw.destination),
        status: or_empty(&raw.status),
        status_trans_on: or_empty(&raw.status_trans_on),
        status_trans_time: or_empty(&raw.status_trans_time),
        remarks: or_empty(&raw.remarks),
        booked_date: or_empty(&raw.booked_date),
        booked_time: or_empty(&raw.booked_time),
        expected_delivery_date: or_empty(&raw.expected_delivery_date),
    }
}

pub fn normalize_event(raw: &RawTrackEvent) -> NormalizedEvent {
    NormalizedEvent {
        code: or_empty(&raw.code),
        action: or_empty(&raw.action),
        origin: or_empty(&raw.origin),
        destination: or_empty(&raw.destination),
        action_date: or_empty(&raw.action_date),
        action_time: or_empty(&raw.action_time),
        remarks: or_empty(&raw.remarks),
        manifest_no: or_empty(&raw.manifest_no),
    }
}

fn or_empty(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}
