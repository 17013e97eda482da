//! API error model and its HTTP mapping.
//!
//! Every failure leaves the proxy as `{ "statusFlag": false, "errorDetails": ... }`
//! so the page can treat proxy errors and carrier "not found" the same way.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shiptrack_core::TrackError;
use shiptrack_out::RenderError;
use thiserror::Error;

use crate::carrier::CarrierError;

pub const MSG_GENERIC: &str = "Unable to process tracking request. Please try again later.";
pub const MSG_INCOMPLETE: &str =
    "The carrier returned incomplete tracking data. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("INPUT/{0}")]
    InvalidTrackingNumber(String),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("UPSTREAM/{0}")]
    Upstream(#[from] CarrierError),

    #[error("RENDER/{0}")]
    Render(#[from] RenderError),

    #[error("INTERNAL/{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTrackingNumber(_) => StatusCode::BAD_REQUEST,
            Self::Track(TrackError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Track(TrackError::MalformedResponse(_)) => StatusCode::BAD_GATEWAY,
            Self::Track(TrackError::InvalidInput(_))
            | Self::Upstream(_)
            | Self::Render(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the caller. Upstream detail stays in the logs.
    pub fn public_message(&self) -> &str {
        match self {
            Self::InvalidTrackingNumber(msg) => msg,
            Self::Track(TrackError::NotFound(detail)) => detail,
            Self::Track(TrackError::MalformedResponse(_)) => MSG_INCOMPLETE,
            _ => MSG_GENERIC,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::InvalidTrackingNumber(_) => "rejected",
            Self::Track(e) => e.kind(),
            Self::Upstream(_) => "upstream_error",
            Self::Render(_) => "render_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, outcome = self.outcome(), "tracking request failed");
        } else {
            tracing::info!(error = %self, outcome = self.outcome(), "tracking request declined");
        }

        let body = Json(json!({
            "statusFlag": false,
            "errorDetails": self.public_message(),
        }));
        (status, body).into_response()
    }
}
