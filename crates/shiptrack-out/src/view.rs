//! Timeline view model.
//!
//! Built from a [`Tracking`], holds everything a template needs already
//! formatted, plus the one piece of UI state the page has: whether the
//! transit group is expanded.

use serde::Serialize;
use shiptrack_core::{ActionCategory, NormalizedEvent, NormalizedHeader, TimelineItem, Tracking};

use crate::format::{format_date, format_time, non_empty, visible_remarks};
use crate::style::{color_class, icon};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub order_number: String,
    pub tracking_number: String,
    pub status: String,
    pub status_class: &'static str,
    pub origin: String,
    pub destination: String,
    pub expected_delivery: String,
    /// Receiver name, shown only when the carrier supplied one.
    pub delivered_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub action: String,
    pub category: ActionCategory,
    pub icon: &'static str,
    pub color_class: &'static str,
    pub date: String,
    pub time: String,
    pub location: Option<String>,
    pub destination: Option<String>,
    pub manifest: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryView {
    Event {
        #[serde(flatten)]
        event: EventView,
        /// Most recent entry on the page.
        latest: bool,
    },
    TransitGroup {
        expanded: bool,
        count: usize,
        icon: &'static str,
        color_class: &'static str,
        /// Newest and oldest hop, for the collapsed summary line.
        newest: EventView,
        oldest: EventView,
        events: Vec<EventView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub header: HeaderView,
    pub entries: Vec<EntryView>,
}

impl TimelineView {
    /// Build the view with the transit group collapsed.
    pub fn new(tracking: &Tracking) -> Self {
        let entries = tracking
            .items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| entry_view(item, idx == 0))
            .collect();

        Self {
            header: header_view(&tracking.header),
            entries,
        }
    }

    pub fn group_expanded(&self) -> Option<bool> {
        self.entries.iter().find_map(|entry| match entry {
            EntryView::TransitGroup { expanded, .. } => Some(*expanded),
            EntryView::Event { .. } => None,
        })
    }

    pub fn set_group_expanded(&mut self, value: bool) {
        for entry in &mut self.entries {
            if let EntryView::TransitGroup { expanded, .. } = entry {
                *expanded = value;
            }
        }
    }

    /// Flip the transit group. Returns the new state, `None` without a group.
    pub fn toggle_group(&mut self) -> Option<bool> {
        let next = !self.group_expanded()?;
        self.set_group_expanded(next);
        Some(next)
    }
}

fn header_view(header: &NormalizedHeader) -> HeaderView {
    HeaderView {
        order_number: header.ref_no.clone(),
        tracking_number: header.shipment_no.clone(),
        status: header.status.to_uppercase(),
        status_class: color_class(ActionCategory::classify(&header.status)),
        origin: header.origin.clone(),
        destination: header.destination.clone(),
        expected_delivery: format_date(&header.expected_delivery_date),
        delivered_to: non_empty(&header.remarks),
    }
}

fn event_view(event: &NormalizedEvent) -> EventView {
    let category = ActionCategory::classify(&event.action);
    EventView {
        action: event.action.to_uppercase(),
        category,
        icon: icon(category),
        color_class: color_class(category),
        date: format_date(&event.action_date),
        time: format_time(&event.action_time),
        location: non_empty(&event.origin),
        destination: non_empty(&event.destination),
        manifest: non_empty(&event.manifest_no),
        remarks: visible_remarks(&event.remarks).map(str::to_string),
    }
}

fn entry_view(item: &TimelineItem, latest: bool) -> Option<EntryView> {
    match item {
        TimelineItem::Event(event) => Some(EntryView::Event {
            event: event_view(event),
            latest,
        }),
        TimelineItem::TransitGroup { events } => {
            let views: Vec<EventView> = events.iter().map(event_view).collect();
            let newest = views.first()?.clone();
            let oldest = views.last()?.clone();
            Some(EntryView::TransitGroup {
                expanded: false,
                count: views.len(),
                icon: icon(ActionCategory::InTransit),
                color_class: color_class(ActionCategory::InTransit),
                newest,
                oldest,
                events: views,
            })
        }
    }
}
