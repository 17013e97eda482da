//! API Handlers
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shiptrack_core::{is_truthy, track_timeline, NormalizedHeader, RawApiResponse, TimelineItem};
use tracing::Instrument;

use crate::error::ApiError;
use crate::sanitize::{mask, sanitize_tracking_number, tracking_number_from_body, MSG_INVALID_FORMAT};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub status_flag: bool,
    pub header: NormalizedHeader,
    pub items: Vec<TimelineItem>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub expanded: bool,
}

/// `POST /v1/track`: carrier body verbatim.
pub async fn track(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let result: Result<_, ApiError> = async {
        let number = tracking_number(payload)?;
        fetch(&state, &number).await
    }
    .await;

    let outcome = match &result {
        Ok(body) if body.get("statusFlag").is_some_and(is_truthy) => "found",
        Ok(_) => "not_found",
        Err(e) => e.outcome(),
    };
    state.metrics.record("track", outcome);

    result.map(Json)
}

/// `POST /v1/timeline`: normalized and ordered timeline.
pub async fn timeline(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let result: Result<_, ApiError> = async {
        let number = tracking_number(payload)?;
        let body = fetch(&state, &number).await?;
        let tracking = track_timeline(&RawApiResponse::from_value(body)?)?;
        Ok(TimelineResponse {
            status_flag: true,
            header: tracking.header,
            items: tracking.items,
            fetched_at: Utc::now(),
        })
    }
    .await;

    state.metrics.record("timeline", outcome_of(&result));
    result.map(Json)
}

/// `GET /track/{tracking_number}`: server-rendered timeline page.
pub async fn page(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let result: Result<_, ApiError> = async {
        let number = sanitize_tracking_number(&raw_number)?;
        let body = fetch(&state, &number).await?;
        let tracking = track_timeline(&RawApiResponse::from_value(body)?)?;
        Ok(shiptrack_out::render_page(&tracking, query.expanded)?)
    }
    .await;

    state.metrics.record("page", outcome_of(&result));
    result.map(Html)
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let text = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(CONTENT_TYPE, "text/plain; version=0.0.4")], text))
}

fn tracking_number(payload: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
    match payload {
        Ok(Json(body)) => tracking_number_from_body(&body),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable request body");
            Err(ApiError::InvalidTrackingNumber(MSG_INVALID_FORMAT.to_string()))
        }
    }
}

fn outcome_of<T>(result: &Result<T, ApiError>) -> &'static str {
    match result {
        Ok(_) => "found",
        Err(e) => e.outcome(),
    }
}

/// One carrier round trip, logged under the masked tracking number.
async fn fetch(state: &AppState, number: &str) -> Result<Value, ApiError> {
    let span = tracing::info_span!("lookup", tracking = %mask(number));
    async {
        tracing::info!("forwarding tracking request");
        let body = state.carrier.track(number).await?;
        tracing::info!(
            status_flag = body.get("statusFlag").is_some_and(is_truthy),
            "carrier response parsed"
        );
        Ok::<_, ApiError>(body)
    }
    .instrument(span)
    .await
}
