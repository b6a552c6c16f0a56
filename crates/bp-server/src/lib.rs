//! # bp-server
//!
//! axum HTTP surface for BrightPath. Every handler is a thin translation
//! between JSON and a `SchoolService` or study-helper call; failures converge
//! on [`ApiError`].

pub mod cli;
pub mod error;
mod extract;
mod middleware;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use bp_config::ServerConfig;
use bp_db::SchoolService;
use bp_llm::Completer;

pub use error::ApiError;

use middleware::{cors_middleware, request_tracing_middleware};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SchoolService>,
    pub completer: Arc<dyn Completer>,
    pub cors_allowed_origins: Arc<[String]>,
}

impl AppState {
    #[must_use]
    pub fn new(
        service: SchoolService,
        completer: Arc<dyn Completer>,
        server: &ServerConfig,
    ) -> Self {
        Self {
            service: Arc::new(service),
            completer,
            cors_allowed_origins: server.cors_allowed_origins.clone().into(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/login", post(routes::accounts::login))
        // Admins
        .route("/add-admin", post(routes::accounts::add_admin))
        .route("/get-admins", get(routes::accounts::get_admins))
        .route("/update-admin/{id}", put(routes::accounts::update_admin))
        .route("/delete-admin/{id}", delete(routes::accounts::delete_admin))
        // Teachers
        .route("/add-teacher", post(routes::accounts::add_teacher))
        .route("/signup-teacher", post(routes::accounts::signup_teacher))
        .route("/get-teachers", get(routes::accounts::get_teachers))
        .route("/update-teacher/{id}", put(routes::accounts::update_teacher))
        .route("/delete-teacher/{id}", delete(routes::accounts::delete_teacher))
        // Students
        .route("/add-student", post(routes::students::add_student))
        .route("/get-students", get(routes::students::get_students))
        .route("/update-student/{id}", put(routes::students::update_student))
        .route("/delete-student/{id}", delete(routes::students::delete_student))
        .route("/enroll-student", post(routes::students::enroll_student))
        .route(
            "/students/{id}/performance",
            get(routes::students::student_performance),
        )
        // Parents
        .route("/add-parent", post(routes::parents::add_parent))
        .route("/parent/signup", post(routes::parents::parent_signup))
        .route("/get-parents", get(routes::parents::get_parents))
        .route("/parents/{id}/students", get(routes::parents::parent_students))
        .route("/update-parent/{id}", put(routes::parents::update_parent))
        .route("/delete-parent/{id}", delete(routes::parents::delete_parent))
        // Subjects
        .route("/add-subject", post(routes::subjects::add_subject))
        .route("/get-subjects", get(routes::subjects::get_subjects))
        .route("/update-subject/{id}", put(routes::subjects::update_subject))
        .route("/delete-subject/{id}", delete(routes::subjects::delete_subject))
        .route("/assign-subject", post(routes::subjects::assign_subject))
        .route("/get-assignments", get(routes::subjects::get_assignments))
        // Results
        .route("/add-result", post(routes::results::add_result))
        .route("/add-results-bulk", post(routes::results::add_results_bulk))
        .route("/admin/compile-results", post(routes::results::compile_results))
        .route("/admin/release-results", post(routes::results::release_results))
        .route("/admin/results-summary", get(routes::results::results_summary))
        .route(
            "/admin/class-results/{grade}",
            get(routes::results::class_results),
        )
        .route("/admin/view-results", get(routes::results::view_results))
        // Announcements
        .route("/add-announcement", post(routes::announcements::add_announcement))
        .route("/get-announcements", get(routes::announcements::get_announcements))
        // Study helpers
        .route("/summarize", post(routes::tutor::summarize))
        .route("/explain", post(routes::tutor::explain))
        .route("/generate-questions", post(routes::tutor::generate_questions))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}
