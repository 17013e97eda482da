//! shiptrack core: carrier response normalization and timeline ordering
//!
//! Everything here is pure. The proxy hands in an already-parsed carrier
//! body and gets back either display-ready data or a [`TrackError`].
//!
//! ```text
//! RawApiResponse ─ normalize ─► NormalizedTrackingResult ─ order ─► Vec<TimelineItem>
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use shiptrack_core::{track_timeline, RawApiResponse, TimelineItem};
//!
//! let raw = RawApiResponse::from_value(json!({
//!     "statusFlag": true,
//!     "trackHeader": { "strShipmentNo": "D1001", "strStatus": "Delivered" },
//!     "trackDetails": [
//!         { "strAction": "Booked", "strActionDate": "01012024", "strActionTime": "0900" },
//!         { "strAction": "In Transit", "strActionDate": "02012024", "strActionTime": "0800" },
//!         { "strAction": "Delivered", "strActionDate": "03012024", "strActionTime": "1500" }
//!     ]
//! })).unwrap();
//!
//! let tracking = track_timeline(&raw).unwrap();
//! assert_eq!(tracking.items.len(), 3);
//! assert!(tracking.items[1].is_group());
//! ```

pub mod classify;
pub mod data_model;
pub mod error;
pub mod normalizer;
pub mod timeline;

pub use classify::ActionCategory;
pub use data_model::{
    is_truthy, NormalizedEvent, NormalizedHeader, NormalizedTrackingResult, RawApiResponse, RawTrackEvent,
    RawTrackHeader, TimelineItem, Tracking,
};
pub use error::TrackError;
pub use normalizer::{normalize, DEFAULT_ERROR_DETAIL};
pub use timeline::{flatten, order, sort_key};

/// Normalize and order in one step.
///
/// A carrier "not found" answer becomes [`TrackError::NotFound`] here, so the
/// `Ok` side is always a non-empty timeline.
pub fn track_timeline(raw: &RawApiResponse) -> Result<Tracking, TrackError> {
    let (header, events) = normalize(raw)?.into_outcome()?;
    let items = order(events)?;
    Ok(Tracking { header, items })
}
