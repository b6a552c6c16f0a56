//! Result upload, compilation, the release gate, and admin reports.

use axum::Json;
use axum::extract::State;
use bp_core::requests::{BulkResults, NewResult, ReleaseParams, TermFilter, TermParams};
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

pub async fn add_result(
    State(state): State<AppState>,
    ApiJson(result): ApiJson<NewResult>,
) -> ApiResult {
    let input = result.validate()?;
    let result = state.service.add_result(&input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Result added successfully",
        "data": result,
    })))
}

/// One subject and exam for many students. Incomplete entries are skipped.
pub async fn add_results_bulk(
    State(state): State<AppState>,
    ApiJson(bulk): ApiJson<BulkResults>,
) -> ApiResult {
    let subject_id = bulk.subject_id.unwrap_or_default();
    let term = bulk.term.clone().unwrap_or_default();
    let inputs = bulk.validate()?;
    let inserted = state.service.add_results(&inputs).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("{} results added for subject {subject_id} ({term}).", inserted.len()),
        "data": inserted,
    })))
}

pub async fn compile_results(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TermParams>,
) -> ApiResult {
    let compiled = state.service.compile_results(&params.term).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Results compiled for {} students for {}.",
            compiled.len(),
            params.term
        ),
        "data": compiled,
    })))
}

pub async fn release_results(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ReleaseParams>,
) -> ApiResult {
    let release = state
        .service
        .set_release(&params.term, params.released, params.admin_id)
        .await?;
    let status = if release.released { "released" } else { "withheld" };
    Ok(Json(json!({
        "success": true,
        "message": format!("Results for {} have been {status}.", release.term),
        "data": release,
    })))
}

pub async fn results_summary(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TermParams>,
) -> ApiResult {
    let summary = state.service.results_summary(&params.term).await?;
    Ok(Json(json!({ "success": true, "summary": summary })))
}

pub async fn class_results(
    State(state): State<AppState>,
    ApiPath(grade): ApiPath<String>,
) -> ApiResult {
    let subjects = state.service.class_results(&grade).await?;
    Ok(Json(json!({
        "success": true,
        "class": grade,
        "subjects": subjects,
    })))
}

pub async fn view_results(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TermFilter>,
) -> ApiResult {
    let term = filter.term.as_deref().filter(|t| !t.is_empty());
    let results = state.service.view_results(term).await?;
    if results.is_empty() {
        return Ok(Json(json!({
            "success": true,
            "results": results,
            "message": "No results found.",
        })));
    }
    Ok(Json(json!({ "success": true, "results": results })))
}
