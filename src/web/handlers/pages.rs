// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::api_server::{docx_response, AppError, AppState};
use crate::form::ReportMonth;
use crate::report::{render, HtmlFormatter};
use crate::web::views::{PreviewTemplate, ReportFormTemplate, PAGE_TITLE};

pub(crate) fn page_url(session_id: &str) -> String {
    format!("/sessions/{}", session_id)
}

pub(crate) fn render_page<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template error: {}", e)))
}

// ============================================================================
// Session start
// ============================================================================

/// New visit: start an empty form for the current month.
pub async fn start_session(State(state): State<AppState>) -> Redirect {
    let id = state.sessions.create(ReportMonth::current()).await;
    Redirect::to(&page_url(&id))
}

// ============================================================================
// Form page
// ============================================================================

pub async fn report_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    // Expired or unknown sessions start over instead of showing an error page
    let Some(form) = state.sessions.get(&id).await else {
        tracing::info!("Session {} not found, starting a new one", id);
        return Ok(Redirect::to("/").into_response());
    };

    let template = ReportFormTemplate::new(&id, &*form.lock().await);
    Ok(render_page(&template)?.into_response())
}

// ============================================================================
// Preview and download
// ============================================================================

pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let form = state.form(&id).await?;
    let document = state.generator.build(&*form.lock().await);

    let template = PreviewTemplate {
        title: PAGE_TITLE,
        session_id: id,
        body_html: HtmlFormatter::format_fragment(&document),
    };
    render_page(&template)
}

pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;
    let bytes = render(&*form.lock().await)?;
    Ok(docx_response(bytes))
}
