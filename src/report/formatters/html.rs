use pulldown_cmark::{html, Event, Options, Parser};

use crate::report::document::ReportDocument;
use crate::report::formatters::markdown::MarkdownFormatter;

/// HTML formatter for report previews
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Render the report body as an HTML fragment (no `<html>` wrapper).
    pub fn format_fragment(document: &ReportDocument) -> String {
        let markdown = MarkdownFormatter::format(document);

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);

        // Officer-typed text is never trusted as markup
        let parser = Parser::new_ext(&markdown, options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}
