//! Document renderer
//!
//! Two stages:
//! - `generator`: lays out the fixed report sequence as a `ReportDocument`
//! - `formatters`: serialize that document (docx download, markdown/HTML
//!   preview, JSON)
//!
//! `render` is the one-shot entry point used for downloads. It is a pure
//! function of the form: no disk or network access.

pub mod document;
pub mod formatters;
pub mod generator;

pub use document::{Block, ReportDocument, TableBlock};
pub use formatters::{DocxFormatter, HtmlFormatter, JsonFormatter, MarkdownFormatter};
pub use generator::{ReportGenerator, SECTION_TITLES};

use crate::error::ReportError;
use crate::form::ReportForm;

/// File name offered for the downloaded report.
pub const REPORT_FILE_NAME: &str = "Mwanza_Monthly_Report.docx";

/// MIME type of the downloaded report.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Render the form as a .docx document.
#[tracing::instrument(
    skip(form),
    fields(officer = %form.officer_name, month = %form.report_month)
)]
pub fn render(form: &ReportForm) -> Result<Vec<u8>, ReportError> {
    let document = ReportGenerator::new().build(form);
    let bytes = DocxFormatter::format(&document)?;

    tracing::info!(
        "Rendered report: {} blocks, {} bytes, {} image(s) not embedded",
        document.blocks.len(),
        bytes.len(),
        form.images().len()
    );

    Ok(bytes)
}
