//! shiptrack-out: presentation layer for tracking timelines
//!
//! Turns a [`Tracking`] into a [`TimelineView`] (formatted dates and times,
//! icons, colour classes, expand/collapse state) and renders that view
//! through Handlebars templates.
//!
//! # Example
//!
//! ```
//! use shiptrack_core::{NormalizedEvent, NormalizedHeader, TimelineItem, Tracking};
//! use shiptrack_out::{render_view, TimelineView, PAGE_TEMPLATE};
//!
//! let tracking = Tracking {
//!     header: NormalizedHeader { shipment_no: "D1001".to_string(), ..Default::default() },
//!     items: vec![TimelineItem::Event(NormalizedEvent {
//!         action: "Delivered".to_string(),
//!         action_date: "05012024".to_string(),
//!         action_time: "1532".to_string(),
//!         ..Default::default()
//!     })],
//! };
//!
//! let view = TimelineView::new(&tracking);
//! let html = render_view(PAGE_TEMPLATE, &view).unwrap();
//! assert!(html.contains("05/01/2024 at 15:32"));
//! ```

pub mod format;
pub mod renderer;
pub mod style;
pub mod templates;
pub mod view;

use once_cell::sync::Lazy;
use renderer::TemplateRenderer;
use shiptrack_core::Tracking;
use templates::TemplatesFile;
use thiserror::Error;

pub use format::{format_date, format_time, visible_remarks};
pub use view::{EntryView, EventView, HeaderView, TimelineView};

/// Full HTML page
pub const PAGE_TEMPLATE: &str = "page";
/// Plain-text listing
pub const SUMMARY_TEMPLATE: &str = "summary";

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
}

static BUILTIN: Lazy<Result<TemplateRenderer<'static>, String>> =
    Lazy::new(|| TemplatesFile::builtin().and_then(TemplateRenderer::new));

/// Render a view with the built-in templates.
pub fn render_view(template_name: &str, view: &TimelineView) -> Result<String, RenderError> {
    let renderer = BUILTIN
        .as_ref()
        .map_err(|e| RenderError::Template(e.clone()))?;
    renderer
        .render(template_name, view)
        .map_err(RenderError::Render)
}

/// Render the HTML page for a tracking result, transit group collapsed
/// unless `expanded` is set.
pub fn render_page(tracking: &Tracking, expanded: bool) -> Result<String, RenderError> {
    let mut view = TimelineView::new(tracking);
    view.set_group_expanded(expanded);
    render_view(PAGE_TEMPLATE, &view)
}

/// Render the plain-text summary for a tracking result.
pub fn render_summary(tracking: &Tracking, expanded: bool) -> Result<String, RenderError> {
    let mut view = TimelineView::new(tracking);
    view.set_group_expanded(expanded);
    render_view(SUMMARY_TEMPLATE, &view)
}
