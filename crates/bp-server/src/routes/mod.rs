pub mod accounts;
pub mod announcements;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod tutor;

use axum::Json;
use serde_json::{Value, json};

use crate::error::ApiError;

pub type ApiResult = Result<Json<Value>, ApiError>;

pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "BrightPath backend running",
    }))
}
