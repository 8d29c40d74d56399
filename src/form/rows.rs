//! Row records for each tabular section.
//!
//! Field names follow Rust conventions; the serialized keys are the exact
//! column labels shown to the officer and printed in the report.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::cell::{deserialize_cell, RowCells};

/// A row in one of the report's tables.
pub trait SectionRow: Clone + Default + Serialize + DeserializeOwned {
    /// Column labels, in display order.
    const COLUMNS: &'static [&'static str];

    /// Cell texts in `COLUMNS` order.
    fn cells(&self) -> Vec<String>;

    /// Build a row from a loose payload. Missing columns are empty, unknown
    /// keys are ignored and non-string values are coerced to text.
    fn from_cells(cells: RowCells) -> Self {
        match serde_json::from_value(Value::Object(cells)) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Row payload could not be coerced, keeping an empty row: {}", e);
                Self::default()
            }
        }
    }
}

// ============================================================================
// Human, Financial and Motor Vehicle Resources
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRow {
    #[serde(rename = "Post Description", default, deserialize_with = "deserialize_cell")]
    pub post_description: String,
    #[serde(rename = "Grade", default, deserialize_with = "deserialize_cell")]
    pub grade: String,
    #[serde(rename = "Established", default, deserialize_with = "deserialize_cell")]
    pub established: String,
    #[serde(rename = "Filled", default, deserialize_with = "deserialize_cell")]
    pub filled: String,
    #[serde(rename = "Remarks", default, deserialize_with = "deserialize_cell")]
    pub remarks: String,
}

impl SectionRow for StaffingRow {
    const COLUMNS: &'static [&'static str] =
        &["Post Description", "Grade", "Established", "Filled", "Remarks"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.post_description.clone(),
            self.grade.clone(),
            self.established.clone(),
            self.filled.clone(),
            self.remarks.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRow {
    #[serde(rename = "Vehicle Type", default, deserialize_with = "deserialize_cell")]
    pub vehicle_type: String,
    #[serde(rename = "Reg. No.", default, deserialize_with = "deserialize_cell")]
    pub registration: String,
    #[serde(rename = "Station", default, deserialize_with = "deserialize_cell")]
    pub station: String,
    #[serde(rename = "Remarks", default, deserialize_with = "deserialize_cell")]
    pub remarks: String,
}

impl SectionRow for VehicleRow {
    const COLUMNS: &'static [&'static str] = &["Vehicle Type", "Reg. No.", "Station", "Remarks"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone(),
            self.registration.clone(),
            self.station.clone(),
            self.remarks.clone(),
        ]
    }
}

/// ORT budget line. Amounts are free text; nothing is summed or checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRow {
    #[serde(rename = "Cost Centre", default, deserialize_with = "deserialize_cell")]
    pub cost_centre: String,
    #[serde(rename = "Approved", default, deserialize_with = "deserialize_cell")]
    pub approved: String,
    #[serde(rename = "Disbursed", default, deserialize_with = "deserialize_cell")]
    pub disbursed: String,
    #[serde(rename = "Expenditure", default, deserialize_with = "deserialize_cell")]
    pub expenditure: String,
    #[serde(rename = "Percentage", default, deserialize_with = "deserialize_cell")]
    pub percentage: String,
    #[serde(rename = "Remarks", default, deserialize_with = "deserialize_cell")]
    pub remarks: String,
}

impl SectionRow for BudgetRow {
    const COLUMNS: &'static [&'static str] = &[
        "Cost Centre",
        "Approved",
        "Disbursed",
        "Expenditure",
        "Percentage",
        "Remarks",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.cost_centre.clone(),
            self.approved.clone(),
            self.disbursed.clone(),
            self.expenditure.clone(),
            self.percentage.clone(),
            self.remarks.clone(),
        ]
    }
}

// ============================================================================
// Physical Implementation Progress
// ============================================================================

/// Development progress per irrigation technology. `M`/`F` are male and
/// female beneficiaries; the total is typed in, not computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentRow {
    #[serde(rename = "ID", default, deserialize_with = "deserialize_cell")]
    pub id: String,
    #[serde(rename = "Irrigation Technology", default, deserialize_with = "deserialize_cell")]
    pub technology: String,
    #[serde(rename = "Number of Sites", default, deserialize_with = "deserialize_cell")]
    pub sites: String,
    #[serde(rename = "Pumps/Canes", default, deserialize_with = "deserialize_cell")]
    pub pumps_canes: String,
    #[serde(rename = "Target Area (ha)", default, deserialize_with = "deserialize_cell")]
    pub target_area: String,
    #[serde(rename = "Actual Cultivated (ha)", default, deserialize_with = "deserialize_cell")]
    pub actual_area: String,
    #[serde(rename = "M", default, deserialize_with = "deserialize_cell")]
    pub male: String,
    #[serde(rename = "F", default, deserialize_with = "deserialize_cell")]
    pub female: String,
    #[serde(rename = "Total Beneficiaries", default, deserialize_with = "deserialize_cell")]
    pub total_beneficiaries: String,
}

impl SectionRow for DevelopmentRow {
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Irrigation Technology",
        "Number of Sites",
        "Pumps/Canes",
        "Target Area (ha)",
        "Actual Cultivated (ha)",
        "M",
        "F",
        "Total Beneficiaries",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.technology.clone(),
            self.sites.clone(),
            self.pumps_canes.clone(),
            self.target_area.clone(),
            self.actual_area.clone(),
            self.male.clone(),
            self.female.clone(),
            self.total_beneficiaries.clone(),
        ]
    }
}

/// Scheme utilisation per EPA (Extension Planning Area).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilisationRow {
    #[serde(rename = "EPA", default, deserialize_with = "deserialize_cell")]
    pub epa: String,
    #[serde(rename = "Area Developed (Ha)", default, deserialize_with = "deserialize_cell")]
    pub area_developed: String,
    #[serde(rename = "Target Area (Ha)", default, deserialize_with = "deserialize_cell")]
    pub target_area: String,
    #[serde(rename = "Actual Utilized Area (Ha)", default, deserialize_with = "deserialize_cell")]
    pub utilized_area: String,
    #[serde(rename = "Beneficiaries", default, deserialize_with = "deserialize_cell")]
    pub beneficiaries: String,
}

impl SectionRow for UtilisationRow {
    const COLUMNS: &'static [&'static str] = &[
        "EPA",
        "Area Developed (Ha)",
        "Target Area (Ha)",
        "Actual Utilized Area (Ha)",
        "Beneficiaries",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.epa.clone(),
            self.area_developed.clone(),
            self.target_area.clone(),
            self.utilized_area.clone(),
            self.beneficiaries.clone(),
        ]
    }
}

// ============================================================================
// Collaboration with Other Stakeholders
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeholderRow {
    #[serde(rename = "Stakeholder", default, deserialize_with = "deserialize_cell")]
    pub stakeholder: String,
    #[serde(rename = "Activity", default, deserialize_with = "deserialize_cell")]
    pub activity: String,
}

impl SectionRow for StakeholderRow {
    const COLUMNS: &'static [&'static str] = &["Stakeholder", "Activity"];

    fn cells(&self) -> Vec<String> {
        vec![self.stakeholder.clone(), self.activity.clone()]
    }
}
