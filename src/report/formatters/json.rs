use crate::report::document::ReportDocument;

/// Document model as JSON, served next to the .docx for tooling.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(document: &ReportDocument) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(document)
    }
}
