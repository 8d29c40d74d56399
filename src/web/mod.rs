//! HTML pages
//!
//! Server-rendered form page (askama) with htmx-enhanced edits. Every edit
//! also works as a plain form post followed by a redirect back to the page.

pub mod handlers;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api_server::AppState;
use handlers::{edits, pages};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::start_session))
        .route("/sessions/:id", get(pages::report_form))
        .route("/sessions/:id/preview", get(pages::preview))
        .route("/sessions/:id/report.docx", get(pages::download))
        .route("/sessions/:id/details", post(edits::save_details))
        .route("/sessions/:id/images", post(edits::upload_images))
        .route("/sessions/:id/tables/:section/rows", post(edits::add_row))
        .route("/sessions/:id/tables/:section/rows/:index", post(edits::save_row))
        .route(
            "/sessions/:id/tables/:section/rows/:index/delete",
            post(edits::delete_row),
        )
}
