use crate::report::document::{Block, ReportDocument, TableBlock};

const MARKDOWN_SYNTAX: &str = "\\`*_{}[]()<>#+-=.!|~&";

/// Markdown formatter for reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format the report as markdown. The title is `#`; report levels 1 and
    /// 2 become `##` and `###`.
    pub fn format(document: &ReportDocument) -> String {
        let mut md = String::with_capacity(2048);

        for block in &document.blocks {
            match block {
                Block::Heading { level, text } => {
                    let hashes = "#".repeat(usize::from(*level) + 1);
                    md.push_str(&format!("{} {}\n\n", hashes, Self::escape_line(text)));
                }
                Block::Paragraph { text } => {
                    if !text.trim().is_empty() {
                        md.push_str(&format!("{}\n\n", Self::escape_text(text.trim_end())));
                    }
                }
                Block::Table(table) => Self::format_table(&mut md, table),
            }
        }

        md
    }

    fn format_table(md: &mut String, table: &TableBlock) {
        md.push_str(&Self::table_row(&table.header));
        md.push_str(&format!(
            "|{}\n",
            table.header.iter().map(|_| "---|").collect::<String>()
        ));
        for row in &table.rows {
            md.push_str(&Self::table_row(row));
        }
        md.push('\n');
    }

    fn table_row(cells: &[String]) -> String {
        let escaped: Vec<String> = cells.iter().map(|cell| Self::escape_cell(cell)).collect();
        format!("| {} |\n", escaped.join(" | "))
    }

    /// Newlines would end the row; pipes are escaped with the rest.
    fn escape_cell(cell: &str) -> String {
        Self::escape_line(&cell.replace("\r\n", " ").replace('\n', " "))
    }

    /// Multi-line officer text: each line escaped, line breaks kept as
    /// hard breaks so the paragraph reads as it does in the document.
    fn escape_text(text: &str) -> String {
        text.lines()
            .map(|line| Self::escape_line(line.trim()))
            .collect::<Vec<_>>()
            .join("\\\n")
    }

    /// Backslash-escape everything markdown could read as syntax: emphasis,
    /// links, headings, lists, raw HTML and entities.
    fn escape_line(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if MARKDOWN_SYNTAX.contains(c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }
}
