use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};

use crate::error::ReportError;
use crate::report::document::{Block, ReportDocument, TableBlock};

/// Usable text width of an A4 page with 1" margins, in twips.
const TEXT_WIDTH_TWIPS: usize = 9026;

/// Custom document property holding the responsible officer.
pub const OFFICER_PROPERTY: &str = "Officer Responsible";

/// Word (.docx) formatter for reports
pub struct DocxFormatter;

impl DocxFormatter {
    /// Serialize the document into a complete .docx container.
    pub fn format(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut docx = Self::with_styles(Docx::new());

        if !document.prepared_by.is_empty() {
            docx = docx.custom_property(OFFICER_PROPERTY, document.prepared_by.as_str());
        }

        for block in &document.blocks {
            docx = match block {
                Block::Heading { level, text } => docx.add_paragraph(Self::heading(*level, text)),
                Block::Paragraph { text } => docx.add_paragraph(Self::paragraph(text)),
                Block::Table(table) => docx.add_table(Self::table(table)),
            };
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| ReportError::Package(e.to_string()))?;

        Ok(buffer.into_inner())
    }

    fn style_id(level: u8) -> &'static str {
        match level {
            0 => "Title",
            1 => "Heading1",
            2 => "Heading2",
            _ => "Heading3",
        }
    }

    // Sizes are half-points, matching Word's default template.
    fn with_styles(docx: Docx) -> Docx {
        docx.add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(52)
                .color("17365D"),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(28)
                .bold()
                .color("365F91"),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold()
                .color("4F81BD"),
        )
        .add_style(
            Style::new("Heading3", StyleType::Paragraph)
                .name("Heading 3")
                .size(22)
                .bold()
                .color("4F81BD"),
        )
    }

    fn heading(level: u8, text: &str) -> Paragraph {
        Paragraph::new()
            .add_run(Self::text_run(text))
            .style(Self::style_id(level))
    }

    fn paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Self::text_run(text))
    }

    /// One run per paragraph; embedded newlines become line breaks.
    fn text_run(text: &str) -> Run {
        let mut run = Run::new();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                run = run.add_break(BreakType::TextWrapping);
            }
            run = run.add_text(xml_safe(line.trim_end_matches('\r')));
        }
        run
    }

    fn table(table: &TableBlock) -> Table {
        let columns = table.header.len().max(1);

        let mut rows = Vec::with_capacity(table.rows.len() + 1);
        rows.push(Self::row(&table.header, true));
        rows.extend(table.rows.iter().map(|cells| Self::row(cells, false)));

        Table::new(rows).set_grid(vec![TEXT_WIDTH_TWIPS / columns; columns])
    }

    fn row(cells: &[String], header: bool) -> TableRow {
        let cells = cells
            .iter()
            .map(|text| {
                let run = if header {
                    Self::text_run(text).bold()
                } else {
                    Self::text_run(text)
                };
                TableCell::new().add_paragraph(Paragraph::new().add_run(run))
            })
            .collect();
        TableRow::new(cells)
    }
}

/// Drop characters XML 1.0 cannot carry. Word refuses the whole package
/// if one of them (vertical tab, form feed, ...) reaches `document.xml`.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
            _ => true,
        })
        .collect()
}
