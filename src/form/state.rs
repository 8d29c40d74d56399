//! Session form state
//!
//! `ReportForm` is everything one session has collected. Rows are kept as
//! typed records per section; `TableView` is the uniform text snapshot the
//! page and the renderer read from.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::form::cell::RowCells;
use crate::form::month::ReportMonth;
use crate::form::rows::{
    BudgetRow, DevelopmentRow, SectionRow, StaffingRow, StakeholderRow, UtilisationRow, VehicleRow,
};
use crate::form::sections::{TableSection, TextField};

const ACCEPTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Text snapshot of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub section: TableSection,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// An uploaded report image. Recorded, never embedded in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: usize,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        size_bytes: usize,
    ) -> Result<Self, FormError> {
        let file_name = file_name.into();
        let accepted = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_IMAGE_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false);

        if !accepted {
            return Err(FormError::UnsupportedImage(file_name));
        }

        Ok(Self {
            file_name,
            content_type,
            size_bytes,
        })
    }
}

/// All values collected during one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub officer_name: String,
    #[serde(default)]
    pub report_month: ReportMonth,
    #[serde(default)]
    pub staffing: Vec<StaffingRow>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRow>,
    #[serde(default)]
    pub budget: Vec<BudgetRow>,
    #[serde(default)]
    pub development: Vec<DevelopmentRow>,
    #[serde(default)]
    pub utilisation: Vec<UtilisationRow>,
    #[serde(default)]
    pub stakeholders: Vec<StakeholderRow>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
}

impl ReportForm {
    /// Empty form for the given reporting month.
    pub fn new(report_month: ReportMonth) -> Self {
        Self {
            report_month,
            ..Self::default()
        }
    }

    pub fn set_officer_name(&mut self, name: impl Into<String>) {
        self.officer_name = name.into();
    }

    pub fn set_report_month(&mut self, month: ReportMonth) {
        self.report_month = month;
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Challenges => &self.challenges,
            TextField::Recommendations => &self.recommendations,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::Challenges => self.challenges = value,
            TextField::Recommendations => self.recommendations = value,
        }
    }

    pub fn table(&self, section: TableSection) -> TableView {
        let table = self.rows(section);
        TableView {
            section,
            columns: section.columns().iter().map(|c| c.to_string()).collect(),
            rows: table.cell_rows(),
        }
    }

    /// All tables, in section order.
    pub fn tables(&self) -> Vec<TableView> {
        TableSection::ALL
            .into_iter()
            .map(|section| self.table(section))
            .collect()
    }

    pub fn row_count(&self, section: TableSection) -> usize {
        self.rows(section).len()
    }

    /// Append a row and return its index.
    pub fn append_row(&mut self, section: TableSection, cells: RowCells) -> usize {
        let table = self.rows_mut(section);
        table.push_cells(cells);
        table.len() - 1
    }

    pub fn update_row(
        &mut self,
        section: TableSection,
        index: usize,
        cells: RowCells,
    ) -> Result<(), FormError> {
        let table = self.rows_mut(section);
        check_index(section, index, table.len())?;
        table.set_cells(index, cells);
        Ok(())
    }

    pub fn remove_row(&mut self, section: TableSection, index: usize) -> Result<(), FormError> {
        let table = self.rows_mut(section);
        check_index(section, index, table.len())?;
        table.remove_at(index);
        Ok(())
    }

    pub fn replace_table(&mut self, section: TableSection, rows: Vec<RowCells>) {
        self.rows_mut(section).replace_all(rows);
    }

    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.images.push(image);
    }

    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    fn rows(&self, section: TableSection) -> &dyn RowTable {
        match section {
            TableSection::Staffing => &self.staffing,
            TableSection::Vehicles => &self.vehicles,
            TableSection::Budget => &self.budget,
            TableSection::Development => &self.development,
            TableSection::Utilisation => &self.utilisation,
            TableSection::Stakeholders => &self.stakeholders,
        }
    }

    fn rows_mut(&mut self, section: TableSection) -> &mut dyn RowTable {
        match section {
            TableSection::Staffing => &mut self.staffing,
            TableSection::Vehicles => &mut self.vehicles,
            TableSection::Budget => &mut self.budget,
            TableSection::Development => &mut self.development,
            TableSection::Utilisation => &mut self.utilisation,
            TableSection::Stakeholders => &mut self.stakeholders,
        }
    }
}

fn check_index(section: TableSection, index: usize, len: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(FormError::RowOutOfRange {
            section: section.slug(),
            index,
            len,
        })
    }
}

/// Section-agnostic access to a `Vec` of typed rows.
trait RowTable {
    fn len(&self) -> usize;
    fn cell_rows(&self) -> Vec<Vec<String>>;
    fn push_cells(&mut self, cells: RowCells);
    fn set_cells(&mut self, index: usize, cells: RowCells);
    fn remove_at(&mut self, index: usize);
    fn replace_all(&mut self, rows: Vec<RowCells>);
}

impl<R: SectionRow> RowTable for Vec<R> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn cell_rows(&self) -> Vec<Vec<String>> {
        self.iter().map(R::cells).collect()
    }

    fn push_cells(&mut self, cells: RowCells) {
        self.push(R::from_cells(cells));
    }

    fn set_cells(&mut self, index: usize, cells: RowCells) {
        self[index] = R::from_cells(cells);
    }

    fn remove_at(&mut self, index: usize) {
        self.remove(index);
    }

    fn replace_all(&mut self, rows: Vec<RowCells>) {
        *self = rows.into_iter().map(R::from_cells).collect();
    }
}
