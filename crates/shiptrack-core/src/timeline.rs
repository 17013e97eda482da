//! Timeline ordering.
//!
//! ```text
//! events ─ sort by date+time desc ─┬─ transit ──► one TransitGroup ─┐
//!                                  └─ others ───► leaf items ───────┴─► items
//! ```
//!
//! The group lands just before the first "booked" event. Without one it
//! follows the first "delivered" event, and without either it leads the
//! timeline.

use crate::classify::{is_booked, is_delivered, is_transit};
use crate::data_model::{NormalizedEvent, TimelineItem};
use crate::error::TrackError;

/// `actionDate` followed by `actionTime` zero-padded to four digits.
///
/// Both parts are fixed-width digit strings for well-formed input, so
/// comparing keys as strings compares them chronologically.
pub fn sort_key(event: &NormalizedEvent) -> String {
    format!("{}{:0>4}", event.action_date, event.action_time)
}

/// Produce the display order for a non-empty event list.
pub fn order(events: Vec<NormalizedEvent>) -> Result<Vec<TimelineItem>, TrackError> {
    if events.is_empty() {
        return Err(TrackError::InvalidInput(
            "cannot order an empty event list".to_string(),
        ));
    }

    let mut keyed: Vec<(String, NormalizedEvent)> =
        events.into_iter().map(|e| (sort_key(&e), e)).collect();
    // stable: equal keys keep their input order
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    let (transit, others): (Vec<_>, Vec<_>) = keyed
        .into_iter()
        .map(|(_, event)| event)
        .partition(|event| is_transit(&event.action));

    tracing::trace!(transit = transit.len(), others = others.len(), "partitioned events");
    if transit.is_empty() {
        return Ok(others.into_iter().map(TimelineItem::Event).collect());
    }

    let position = group_position(&others);
    let mut group = Some(TimelineItem::TransitGroup { events: transit });
    let mut items = Vec::with_capacity(others.len() + 1);

    for (idx, event) in others.into_iter().enumerate() {
        if idx == position {
            items.extend(group.take());
        }
        items.push(TimelineItem::Event(event));
    }
    // position == others.len(): group goes last
    items.extend(group.take());

    Ok(items)
}

/// Index in `others` the transit group is inserted in front of.
fn group_position(others: &[NormalizedEvent]) -> usize {
    if let Some(idx) = others.iter().position(|e| is_booked(&e.action)) {
        return idx;
    }
    if let Some(idx) = others.iter().position(|e| is_delivered(&e.action)) {
        return idx + 1;
    }
    0
}

/// Every event in display order, group members inline.
pub fn flatten(items: &[TimelineItem]) -> impl Iterator<Item = &NormalizedEvent> {
    items.iter().flat_map(|item| item.events())
}
