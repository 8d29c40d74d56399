//! Mwanza District Irrigation Monthly Report
//!
//! Data-entry tool for the district irrigation office's monthly progress
//! review report:
//! - `form/`: the session's editable tables, free text and report metadata
//! - `report/`: fixed report layout and its .docx / markdown / HTML / JSON output
//! - `session`: in-memory session store (feature `api`)
//! - `api_server`, `web/`: axum JSON API and HTML pages (feature `api`)

pub mod config;
pub mod error;
pub mod form;
pub mod report;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod session;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{FormError, ReportError};
pub use form::{ReportForm, ReportMonth, TableSection, TextField};
pub use report::{render, ReportDocument, ReportGenerator, DOCX_MIME, REPORT_FILE_NAME};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppError, AppState};
