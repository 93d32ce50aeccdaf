//! JSON endpoints: the fixed demo payload and a stand-in for the
//! recommendation service that the client can talk to locally.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Deserialize;
use shared::{
    domain::{LightSettings, UserId},
    error::{ApiError, ErrorCode},
    protocol::{
        DemoRecommendation, DemoRecommendationsResponse, PredictedItem, PutEventsRequest,
        RecommendationsRequest, RecommendationsResponse,
    },
    token::{decode, encode},
};
use tracing::info;

use crate::app_state::AppState;

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(error: impl Into<ApiError>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(error.into()))
}

/// Catalog id in the demo payload, e.g. `brightness_75_cct_3500_dimmer_60`.
pub fn demo_id(settings: &LightSettings) -> String {
    format!(
        "brightness_{}_cct_{}_dimmer_{}",
        settings.brightness(),
        settings.color_temperature(),
        settings.dimmer_rate()
    )
}

/// The three fixed records served by the mock API, best first.
pub fn demo_catalog() -> anyhow::Result<Vec<DemoRecommendation>> {
    [(75, 3500, 60, 0.89), (80, 4000, 50, 0.76), (65, 3000, 70, 0.65)]
        .into_iter()
        .map(|(brightness, cct, dimmer, confidence)| -> anyhow::Result<_> {
            let settings = LightSettings::new(brightness, cct, dimmer)?;
            Ok(DemoRecommendation {
                id: demo_id(&settings),
                settings,
                confidence,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct DemoRecommendationsQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

pub(crate) async fn demo_recommendations(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DemoRecommendationsQuery>,
) -> ApiResult<Json<DemoRecommendationsResponse>> {
    // `?userId=` with a blank value means the same as leaving it out.
    let user_id = match q.user_id.as_deref() {
        Some(raw) if !raw.trim().is_empty() => UserId::parse(raw).map_err(bad_request)?,
        _ => state.default_user_id.clone(),
    };

    Ok(Json(DemoRecommendationsResponse {
        user_id,
        recommendations: state.catalog.as_ref().clone(),
    }))
}

pub(crate) async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("no route for {}", uri.path()),
        )),
    )
}

pub(crate) async fn personalize_recommendations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendationsRequest>,
) -> Json<RecommendationsResponse> {
    let item_list: Vec<PredictedItem> = state
        .catalog
        .iter()
        .take(req.num_results as usize)
        .map(|record| PredictedItem {
            item_id: encode(&record.settings),
            score: Some(record.confidence),
        })
        .collect();
    info!(
        user_id = %req.user_id,
        campaign = %req.campaign_arn,
        items = item_list.len(),
        "served mock recommendations"
    );
    Json(RecommendationsResponse { item_list })
}

pub(crate) async fn personalize_events(
    Json(req): Json<PutEventsRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if req.event_list.is_empty() {
        return Err(bad_request(ApiError::new(
            ErrorCode::Validation,
            "eventList must not be empty",
        )));
    }

    for event in &req.event_list {
        let settings = decode(&event.item_id).map_err(bad_request)?;
        info!(
            user_id = %req.user_id,
            session_id = %req.session_id,
            event_type = %event.event_type,
            brightness = settings.brightness(),
            cct = settings.color_temperature(),
            dimmer = settings.dimmer_rate(),
            "received feedback event"
        );
    }

    Ok(Json(serde_json::json!({})))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
