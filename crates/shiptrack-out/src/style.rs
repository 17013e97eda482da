//! Icon and colour class per action category.

use shiptrack_core::ActionCategory;

pub fn icon(category: ActionCategory) -> &'static str {
    match category {
        ActionCategory::Delivered => "✅",
        ActionCategory::OutForDelivery => "🚚",
        ActionCategory::InTransit => "📦",
        ActionCategory::PickedUp => "📋",
        ActionCategory::Booked => "📝",
        ActionCategory::Other => "📍",
    }
}

/// CSS background class. Transit and pickup share the blue badge.
pub fn color_class(category: ActionCategory) -> &'static str {
    match category {
        ActionCategory::Delivered => "bg-secondary",
        ActionCategory::OutForDelivery => "bg-neubrutalism-yellow",
        ActionCategory::InTransit | ActionCategory::PickedUp => "bg-neubrutalism-blue",
        ActionCategory::Booked => "bg-neubrutalism-purple",
        ActionCategory::Other => "bg-gray-400",
    }
}
