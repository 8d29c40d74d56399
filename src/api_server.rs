// Axum API Server Module
//
// Purpose: JSON API over the session form, report downloads, and the HTML
// page routes from `web`. Everything lives in memory; see `session`.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::{FormError, ReportError};
use crate::form::{
    ImageAttachment, ReportForm, ReportMonth, RowCells, TableSection, TableView, TextField,
};
use crate::report::{
    render, JsonFormatter, MarkdownFormatter, ReportGenerator, DOCX_MIME, REPORT_FILE_NAME,
};
use crate::session::{SessionStore, SharedForm};
use crate::web;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub generator: ReportGenerator,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        tracing::info!(
            "Initializing session store (capacity {}, idle timeout {:?})...",
            config.session_capacity,
            config.session_ttl
        );
        let sessions = SessionStore::new(config.session_capacity, config.session_ttl);

        Self {
            sessions,
            generator: ReportGenerator::new(),
            config: Arc::new(config),
        }
    }

    /// Look up a live session or fail with 404.
    pub async fn form(&self, id: &str) -> Result<SharedForm, AppError> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Session lifecycle (JSON API)
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/metadata", put(update_metadata))
        .route("/api/sessions/:id/text/:field", put(update_text))

        // Tables
        .route(
            "/api/sessions/:id/tables/:section",
            get(get_table).put(replace_table),
        )
        .route("/api/sessions/:id/tables/:section/rows", post(append_row))
        .route(
            "/api/sessions/:id/tables/:section/rows/:index",
            put(update_row).delete(delete_row),
        )

        // Image uploads (recorded only)
        .route("/api/sessions/:id/images", post(upload_images))

        // Report output
        .route("/api/sessions/:id/report", get(download_report))
        .route("/api/sessions/:id/report.json", get(report_json))
        .route("/api/sessions/:id/report.md", get(report_markdown))
        .route("/api/report", post(render_stateless))

        // HTML pages
        .merge(web::routes())

        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let month = ReportMonth::current();
    let id = state.sessions.create(month).await;

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": id,
            "report_month": month,
        })),
    )
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportForm>, AppError> {
    let form = state.form(&id).await?;
    let snapshot = form.lock().await.clone();
    Ok(Json(snapshot))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.discard(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {} not found", id)))
    }
}

#[derive(Debug, Deserialize)]
struct MetadataUpdate {
    officer_name: Option<String>,
    report_month: Option<String>,
}

async fn update_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<MetadataUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Parse before locking so a bad month leaves the form untouched
    let month = update
        .report_month
        .as_deref()
        .map(ReportMonth::parse)
        .transpose()?;

    let form = state.form(&id).await?;
    let mut form = form.lock().await;
    if let Some(name) = update.officer_name {
        form.set_officer_name(name);
    }
    if let Some(month) = month {
        form.set_report_month(month);
    }

    Ok(Json(serde_json::json!({
        "officer_name": form.officer_name,
        "report_month": form.report_month,
    })))
}

#[derive(Debug, Deserialize)]
struct TextUpdate {
    #[serde(default)]
    value: String,
}

async fn update_text(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
    Json(update): Json<TextUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let field = TextField::from_slug(&field)?;
    let form = state.form(&id).await?;
    form.lock().await.set_text(field, update.value.clone());

    Ok(Json(serde_json::json!({
        "field": field,
        "value": update.value,
    })))
}

async fn get_table(
    State(state): State<AppState>,
    Path((id, section)): Path<(String, String)>,
) -> Result<Json<TableView>, AppError> {
    let section = TableSection::from_slug(&section)?;
    let form = state.form(&id).await?;
    let view = form.lock().await.table(section);
    Ok(Json(view))
}

async fn replace_table(
    State(state): State<AppState>,
    Path((id, section)): Path<(String, String)>,
    Json(rows): Json<Vec<RowCells>>,
) -> Result<Json<TableView>, AppError> {
    let section = TableSection::from_slug(&section)?;
    let form = state.form(&id).await?;
    let mut form = form.lock().await;
    form.replace_table(section, rows);
    Ok(Json(form.table(section)))
}

async fn append_row(
    State(state): State<AppState>,
    Path((id, section)): Path<(String, String)>,
    Json(cells): Json<RowCells>,
) -> Result<impl IntoResponse, AppError> {
    let section = TableSection::from_slug(&section)?;
    let form = state.form(&id).await?;
    let index = form.lock().await.append_row(section, cells);

    tracing::debug!("Session {}: appended {} row {}", id, section, index);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "index": index })),
    ))
}

async fn update_row(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(String, String, usize)>,
    Json(cells): Json<RowCells>,
) -> Result<Json<TableView>, AppError> {
    let section = TableSection::from_slug(&section)?;
    let form = state.form(&id).await?;
    let mut form = form.lock().await;
    form.update_row(section, index, cells)?;
    Ok(Json(form.table(section)))
}

async fn delete_row(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(String, String, usize)>,
) -> Result<Json<TableView>, AppError> {
    let section = TableSection::from_slug(&section)?;
    let form = state.form(&id).await?;
    let mut form = form.lock().await;
    form.remove_row(section, index)?;
    Ok(Json(form.table(section)))
}

async fn upload_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let form = state.form(&id).await?;
    let images = read_images(multipart).await?;

    let mut form = form.lock().await;
    for image in &images {
        form.attach_image(image.clone());
    }

    Ok(Json(serde_json::json!({
        "accepted": images,
        "total": form.images().len(),
    })))
}

async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;
    let bytes = render(&*form.lock().await)?;
    Ok(docx_response(bytes))
}

async fn report_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;
    let document = state.generator.build(&*form.lock().await);
    let body = JsonFormatter::format(&document).map_err(ReportError::from)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn report_markdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;
    let document = state.generator.build(&*form.lock().await);
    let body = MarkdownFormatter::format(&document);

    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body).into_response())
}

/// Render a complete form posted as JSON, without creating a session.
async fn render_stateless(Json(form): Json<ReportForm>) -> Result<Response, AppError> {
    let bytes = render(&form)?;
    Ok(docx_response(bytes))
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Attachment response carrying the fixed report file name.
pub(crate) fn docx_response(bytes: Vec<u8>) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        REPORT_FILE_NAME,
        urlencoding::encode(REPORT_FILE_NAME)
    );

    (
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Collect image parts from a multipart body. File inputs left empty are
/// skipped; any non-image file rejects the whole upload.
pub(crate) async fn read_images(mut multipart: Multipart) -> Result<Vec<ImageAttachment>, AppError> {
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        images.push(ImageAttachment::new(file_name, content_type, data.len())?);
    }

    tracing::debug!("Received {} image(s)", images.len());
    Ok(images)
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Form(
                FormError::UnknownSection(_)
                | FormError::UnknownField(_)
                | FormError::RowOutOfRange { .. },
            ) => StatusCode::NOT_FOUND,
            AppError::Form(FormError::InvalidMonth(_) | FormError::UnsupportedImage(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Report(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FormError::UnknownSection("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FormError::InvalidMonth("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ReportError::Package("zip".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_docx_response_headers() {
        let response = docx_response(vec![1, 2, 3]);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap();
        assert!(disposition.starts_with("attachment;"));
        assert!(disposition.contains("filename=\"Mwanza_Monthly_Report.docx\""));
    }
}
