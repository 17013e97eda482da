//! Action classification.
//!
//! Carrier actions are free text, so every decision made on them (transit
//! grouping, milestone anchoring, icon and colour choice) goes through the
//! keyword predicates here. `RULES` is evaluated top-down and the first hit
//! wins; its order is what resolves overlapping labels.

use serde::{Deserialize, Serialize};

pub const DELIVERED: &str = "delivered";
pub const OUT_FOR_DELIVERY: &str = "out for delivery";
pub const TRANSIT: &str = "transit";
pub const PICKED: &str = "picked";
pub const BOOKED: &str = "booked";

/// Display category of a tracking action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Delivered,
    OutForDelivery,
    InTransit,
    PickedUp,
    Booked,
    Other,
}

type Predicate = fn(&str) -> bool;

/// Ordered `(predicate, category)` table. Inputs are already lowercased.
const RULES: &[(Predicate, ActionCategory)] = &[
    (|a: &str| a.contains(DELIVERED), ActionCategory::Delivered),
    (|a: &str| a.contains(OUT_FOR_DELIVERY), ActionCategory::OutForDelivery),
    (|a: &str| a.contains(TRANSIT), ActionCategory::InTransit),
    (|a: &str| a.contains(PICKED), ActionCategory::PickedUp),
    (|a: &str| a.contains(BOOKED), ActionCategory::Booked),
];

/// Case-insensitive substring match of `keyword` (lowercase) in `action`.
pub fn mentions(action: &str, keyword: &str) -> bool {
    action.to_lowercase().contains(keyword)
}

pub fn is_transit(action: &str) -> bool {
    mentions(action, TRANSIT)
}

pub fn is_booked(action: &str) -> bool {
    mentions(action, BOOKED)
}

pub fn is_delivered(action: &str) -> bool {
    mentions(action, DELIVERED)
}

impl ActionCategory {
    pub fn classify(action: &str) -> Self {
        let lowered = action.to_lowercase();
        RULES
            .iter()
            .find(|(predicate, _)| predicate(&lowered))
            .map(|(_, category)| *category)
            .unwrap_or(ActionCategory::Other)
    }

    /// Milestones are everything that is not an in-transit hop.
    pub fn is_milestone(self) -> bool {
        !matches!(self, ActionCategory::InTransit | ActionCategory::Other)
    }
}
