//! Form collector
//!
//! Holds everything the officer types in during one session:
//! - `rows`: one typed row struct per tabular section
//! - `sections`: section/field identifiers used to address them
//! - `month`: the reporting month
//! - `state`: the session's `ReportForm` and its edit operations
//!
//! Nothing here validates cell contents. Empty tables and blank strings are
//! valid states.

pub mod cell;
pub mod month;
pub mod rows;
pub mod sections;
pub mod state;

pub use cell::{cell_text, cells_from_pairs, RowCells};
pub use month::ReportMonth;
pub use rows::{
    BudgetRow, DevelopmentRow, SectionRow, StaffingRow, StakeholderRow, UtilisationRow, VehicleRow,
};
pub use sections::{TableSection, TextField};
pub use state::{ImageAttachment, ReportForm, TableView};
