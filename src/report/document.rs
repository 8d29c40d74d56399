use serde::Serialize;

/// Ordered content of a generated report, independent of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    /// Officer responsible. Not part of the body; formatters may carry it
    /// as metadata.
    pub prepared_by: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Level 0 is the document title; 1 and 2 are ordinary headings.
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Table(TableBlock),
}

/// Table block: `header` is the first emitted row, `rows` follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportDocument {
    pub fn new(prepared_by: impl Into<String>) -> Self {
        Self {
            prepared_by: prepared_by.into(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph { text: text.into() });
    }

    pub fn table(&mut self, header: Vec<String>, rows: Vec<Vec<String>>) {
        self.blocks.push(Block::Table(TableBlock { header, rows }));
    }

    /// Heading texts at the given level, in document order.
    pub fn headings(&self, level: u8) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The block that immediately follows the heading with this text.
    pub fn content_under(&self, heading: &str) -> Option<&Block> {
        let position = self.blocks.iter().position(|block| {
            matches!(block, Block::Heading { text, .. } if text == heading)
        })?;
        self.blocks.get(position + 1)
    }

    /// Every visible string in reading order (headings, paragraphs, cells).
    pub fn visible_text(&self) -> Vec<&str> {
        let mut text = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Heading { text: t, .. } | Block::Paragraph { text: t } => text.push(t.as_str()),
                Block::Table(table) => {
                    text.extend(table.header.iter().map(String::as_str));
                    for row in &table.rows {
                        text.extend(row.iter().map(String::as_str));
                    }
                }
            }
        }
        text
    }
}
