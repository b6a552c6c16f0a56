use axum::Json;
use axum::extract::State;
use bp_core::errors::CoreError;
use bp_core::requests::NewAnnouncement;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::ApiJson;

pub async fn add_announcement(
    State(state): State<AppState>,
    ApiJson(announcement): ApiJson<NewAnnouncement>,
) -> ApiResult {
    if announcement.message.trim().is_empty() {
        return Err(CoreError::Validation("Announcement message is empty".into()).into());
    }
    let announcement = state.service.post_announcement(&announcement).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Announcement posted successfully!",
        "data": announcement,
    })))
}

/// Newest first.
pub async fn get_announcements(State(state): State<AppState>) -> ApiResult {
    let announcements = state.service.list_announcements().await?;
    Ok(Json(json!({ "success": true, "announcements": announcements })))
}
