// Askama templates and the view models they render.

use askama::Template;

use crate::form::{ImageAttachment, ReportForm, TableSection, TableView, TextField};

pub const PAGE_TITLE: &str = "Mwanza Irrigation Monthly Report";

/// Page groups, as (heading, tables). Challenges and recommendations form
/// the fourth group and live in the details form.
const FORM_GROUPS: [(&str, &[TableSection]); 3] = [
    (
        "1. Human, Financial and Motor Vehicle Resources",
        &[
            TableSection::Staffing,
            TableSection::Vehicles,
            TableSection::Budget,
        ],
    ),
    (
        "2. Physical Implementation Progress",
        &[TableSection::Development, TableSection::Utilisation],
    ),
    (
        "3. Collaboration with Other Stakeholders",
        &[TableSection::Stakeholders],
    ),
];

// ============================================================================
// View Models
// ============================================================================

pub struct CellView {
    pub column: String,
    pub value: String,
}

pub struct RowView {
    pub index: usize,
    pub cells: Vec<CellView>,
}

pub struct SectionView {
    pub session_id: String,
    pub slug: &'static str,
    pub label: &'static str,
    pub columns: Vec<String>,
    pub rows: Vec<RowView>,
}

impl SectionView {
    pub fn new(session_id: &str, view: TableView) -> Self {
        let rows = view
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, cells)| RowView {
                index,
                cells: view
                    .columns
                    .iter()
                    .cloned()
                    .zip(cells)
                    .map(|(column, value)| CellView { column, value })
                    .collect(),
            })
            .collect();

        Self {
            session_id: session_id.to_string(),
            slug: view.section.slug(),
            label: view.section.label(),
            columns: view.columns,
            rows,
        }
    }
}

pub struct GroupView {
    pub heading: &'static str,
    pub sections: Vec<SectionView>,
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "pages/report_form.html")]
pub struct ReportFormTemplate {
    pub title: &'static str,
    pub session_id: String,
    pub officer_name: String,
    pub report_month: String,
    pub report_month_label: String,
    pub groups: Vec<GroupView>,
    pub challenges: String,
    pub recommendations: String,
    pub challenges_placeholder: &'static str,
    pub recommendations_placeholder: &'static str,
    pub images: Vec<ImageAttachment>,
    pub upload_error: Option<String>,
}

impl ReportFormTemplate {
    pub fn new(session_id: &str, form: &ReportForm) -> Self {
        let groups = FORM_GROUPS
            .iter()
            .map(|&(heading, sections)| GroupView {
                heading,
                sections: sections
                    .iter()
                    .map(|section| SectionView::new(session_id, form.table(*section)))
                    .collect(),
            })
            .collect();

        Self {
            title: PAGE_TITLE,
            session_id: session_id.to_string(),
            officer_name: form.officer_name.clone(),
            report_month: form.report_month.iso(),
            report_month_label: form.report_month.label(),
            groups,
            challenges: form.challenges.clone(),
            recommendations: form.recommendations.clone(),
            challenges_placeholder: TextField::Challenges.placeholder(),
            recommendations_placeholder: TextField::Recommendations.placeholder(),
            images: form.images().to_vec(),
            upload_error: None,
        }
    }

    /// Show a rejected upload next to the upload field.
    pub fn with_upload_error(mut self, message: impl Into<String>) -> Self {
        self.upload_error = Some(message.into());
        self
    }
}

/// One editable table; swapped in place after htmx edits.
#[derive(Template)]
#[template(path = "partials/table_section.html")]
pub struct TableSectionTemplate {
    pub section: SectionView,
}

#[derive(Template)]
#[template(path = "partials/details_saved.html")]
pub struct DetailsSavedTemplate {
    pub officer_name: String,
    pub report_month_label: String,
}

#[derive(Template)]
#[template(path = "pages/preview.html")]
pub struct PreviewTemplate {
    pub title: &'static str,
    pub session_id: String,
    pub body_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{cells_from_pairs, ReportMonth};

    fn form() -> ReportForm {
        let mut form = ReportForm::new(ReportMonth::new(2026, 10).unwrap());
        form.append_row(
            TableSection::Vehicles,
            cells_from_pairs(vec![("Vehicle Type", "Pickup"), ("Reg. No.", "MZ <1>")]),
        );
        form
    }

    #[test]
    fn test_section_view_pairs_cells_with_columns() {
        let view = SectionView::new("abc", form().table(TableSection::Vehicles));

        assert_eq!(view.slug, "vehicles");
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].cells[1].column, "Reg. No.");
        assert_eq!(view.rows[0].cells[1].value, "MZ <1>");
    }

    #[test]
    fn test_form_page_lists_every_table() {
        let html = ReportFormTemplate::new("abc", &form()).render().unwrap();

        for section in TableSection::ALL {
            assert!(html.contains(&format!("id=\"section-{}\"", section.slug())));
        }
        assert!(html.contains("2. Physical Implementation Progress"));
        assert!(html.contains("value=\"2026-10\""));
        assert!(html.contains("Generate Word Report"));
    }

    #[test]
    fn test_upload_error_shown_in_sidebar() {
        let html = ReportFormTemplate::new("abc", &form())
            .with_upload_error("unsupported image `notes.txt`")
            .render()
            .unwrap();

        assert!(html.contains("class=\"upload-error\""));
        assert!(html.contains("notes.txt"));
    }

    #[test]
    fn test_cell_values_are_escaped() {
        let section = SectionView::new("abc", form().table(TableSection::Vehicles));
        let html = TableSectionTemplate { section }.render().unwrap();

        assert!(html.contains("MZ &lt;1&gt;"));
        assert!(!html.contains("MZ <1>"));
    }
}
