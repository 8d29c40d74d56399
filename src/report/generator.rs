//! Report Generator
//!
//! Lays out the monthly progress review report from a session's form.
//! The sequence is fixed:
//! - title block (ministry, department, office, report name, month)
//! - Executive Summary and Contents placeholders
//! - nine level-2 sections, each a table or a paragraph
//!
//! Public API (consumed by `report::render` and the HTTP layer):
//! - ReportGenerator::new() -> Self
//! - ReportGenerator::build(&ReportForm) -> ReportDocument

use crate::form::{ReportForm, TableSection, TableView, TextField};
use crate::report::document::ReportDocument;

/// Title block, as (heading level, text).
pub const TITLE_HEADINGS: [(u8, &str); 4] = [
    (0, "MINISTRY OF AGRICULTURE"),
    (1, "DEPARTMENT OF IRRIGATION"),
    (1, "MWANZA DISTRICT IRRIGATION OFFICE"),
    (2, "MONTHLY PROGRESS REVIEW REPORT"),
];

pub const EXECUTIVE_SUMMARY: &str = "Executive Summary";
pub const EXECUTIVE_SUMMARY_TEXT: &str =
    "Summary of the activities and progress for the reporting month.";
pub const CONTENTS: &str = "Contents";
pub const CONTENTS_TEXT: &str = "Auto-generated during final editing.";
pub const INTRODUCTION_TEXT: &str =
    "This report provides an overview of irrigation activities...";

/// The nine section titles, in the order they appear.
pub const SECTION_TITLES: [&str; 9] = [
    "Introduction",
    "Human, Financial and Motor Vehicle Resources",
    "Vehicles Status",
    "ORT Budget Performance",
    "Physical Implementation Progress",
    "Scheme Utilisation",
    "Collaboration with Other Stakeholders",
    "Challenges",
    "Recommendations",
];

/// What goes under one section heading.
enum SectionContent<'a> {
    Table(TableView),
    Text(&'a str),
}

/// Report generator - stateless layout of the fixed report sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the document for a form. Never fails: empty tables become
    /// header-only tables and empty text becomes an empty paragraph.
    pub fn build(&self, form: &ReportForm) -> ReportDocument {
        let mut doc = ReportDocument::new(form.officer_name.clone());

        for (level, text) in TITLE_HEADINGS {
            doc.heading(level, text);
        }
        doc.paragraph(format!("({})", form.report_month.label()));

        doc.heading(1, EXECUTIVE_SUMMARY);
        doc.paragraph(EXECUTIVE_SUMMARY_TEXT);

        doc.heading(1, CONTENTS);
        doc.paragraph(CONTENTS_TEXT);

        for (title, content) in SECTION_TITLES.into_iter().zip(Self::sections(form)) {
            doc.heading(2, title);
            match content {
                SectionContent::Table(view) => doc.table(view.columns, view.rows),
                SectionContent::Text(text) => doc.paragraph(text),
            }
        }

        doc
    }

    fn sections(form: &ReportForm) -> [SectionContent<'_>; 9] {
        [
            SectionContent::Text(INTRODUCTION_TEXT),
            SectionContent::Table(form.table(TableSection::Staffing)),
            SectionContent::Table(form.table(TableSection::Vehicles)),
            SectionContent::Table(form.table(TableSection::Budget)),
            SectionContent::Table(form.table(TableSection::Development)),
            SectionContent::Table(form.table(TableSection::Utilisation)),
            SectionContent::Table(form.table(TableSection::Stakeholders)),
            SectionContent::Text(form.text(TextField::Challenges)),
            SectionContent::Text(form.text(TextField::Recommendations)),
        ]
    }
}
