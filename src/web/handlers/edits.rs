// Form-post handlers for the report page.
//
// htmx requests get the re-rendered fragment back; plain browser posts are
// redirected to the page (post/redirect/get).

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::api_server::{read_images, AppError, AppState};
use crate::error::FormError;
use crate::form::{cells_from_pairs, ReportForm, ReportMonth, TableSection, TextField};
use crate::web::handlers::pages::{page_url, render_page};
use crate::web::views::{
    DetailsSavedTemplate, ReportFormTemplate, SectionView, TableSectionTemplate,
};

#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    officer_name: String,
    #[serde(default)]
    report_month: String,
    #[serde(default)]
    challenges: String,
    #[serde(default)]
    recommendations: String,
    /// `generate` when the officer pressed the report button.
    action: Option<String>,
}

pub async fn save_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HxRequest(is_htmx): HxRequest,
    Form(details): Form<DetailsForm>,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;

    // An empty month input keeps the current month
    let month = match details.report_month.trim() {
        "" => None,
        raw => Some(ReportMonth::parse(raw)?),
    };

    let saved = {
        let mut form = form.lock().await;
        form.set_officer_name(details.officer_name.trim());
        if let Some(month) = month {
            form.set_report_month(month);
        }
        form.set_text(TextField::Challenges, details.challenges);
        form.set_text(TextField::Recommendations, details.recommendations);
        DetailsSavedTemplate {
            officer_name: form.officer_name.clone(),
            report_month_label: form.report_month.label(),
        }
    };

    if details.action.as_deref() == Some("generate") {
        let download = format!("{}/report.docx", page_url(&id));
        if is_htmx {
            return Ok([("HX-Redirect", download)].into_response());
        }
        return Ok(Redirect::to(&download).into_response());
    }

    if is_htmx {
        Ok(saved.into_response())
    } else {
        Ok(Redirect::to(&page_url(&id)).into_response())
    }
}

pub async fn add_row(
    State(state): State<AppState>,
    Path((id, section)): Path<(String, String)>,
    HxRequest(is_htmx): HxRequest,
    Form(cells): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let section = TableSection::from_slug(&section)?;
    edit_table(&state, &id, section, is_htmx, |form| {
        form.append_row(section, cells_from_pairs(cells));
        Ok(())
    })
    .await
}

pub async fn save_row(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(String, String, usize)>,
    HxRequest(is_htmx): HxRequest,
    Form(cells): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let section = TableSection::from_slug(&section)?;
    edit_table(&state, &id, section, is_htmx, |form| {
        form.update_row(section, index, cells_from_pairs(cells))
    })
    .await
}

pub async fn delete_row(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(String, String, usize)>,
    HxRequest(is_htmx): HxRequest,
) -> Result<Response, AppError> {
    let section = TableSection::from_slug(&section)?;
    edit_table(&state, &id, section, is_htmx, |form| {
        form.remove_row(section, index)
    })
    .await
}

/// Plain browser upload. A rejected file re-renders the page with the
/// error instead of answering with the JSON error body.
pub async fn upload_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = state.form(&id).await?;

    let images = match read_images(multipart).await {
        Ok(images) => images,
        Err(e) if e.status().is_client_error() => {
            tracing::info!("Session {}: upload rejected: {}", id, e);
            let template =
                ReportFormTemplate::new(&id, &*form.lock().await).with_upload_error(e.to_string());
            return Ok((StatusCode::BAD_REQUEST, render_page(&template)?).into_response());
        }
        Err(e) => return Err(e),
    };

    let mut form = form.lock().await;
    for image in images {
        form.attach_image(image);
    }

    Ok(Redirect::to(&page_url(&id)).into_response())
}

/// Apply one table edit, then answer with the table fragment or a redirect.
async fn edit_table<F>(
    state: &AppState,
    id: &str,
    section: TableSection,
    is_htmx: bool,
    edit: F,
) -> Result<Response, AppError>
where
    F: FnOnce(&mut ReportForm) -> Result<(), FormError>,
{
    let form = state.form(id).await?;
    let view = {
        let mut form = form.lock().await;
        edit(&mut *form)?;
        form.table(section)
    };

    tracing::debug!("Session {}: edited {} ({} rows)", id, section, view.rows.len());

    if is_htmx {
        let template = TableSectionTemplate {
            section: SectionView::new(id, view),
        };
        Ok(template.into_response())
    } else {
        Ok(Redirect::to(&page_url(id)).into_response())
    }
}
