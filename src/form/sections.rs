//! Section and field identifiers.
//!
//! Slugs are what the HTTP layer puts in URLs (`/tables/staffing/rows`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::form::rows::{
    BudgetRow, DevelopmentRow, SectionRow, StaffingRow, StakeholderRow, UtilisationRow, VehicleRow,
};

/// The six editable tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSection {
    Staffing,
    Vehicles,
    Budget,
    Development,
    Utilisation,
    Stakeholders,
}

impl TableSection {
    pub const ALL: [TableSection; 6] = [
        TableSection::Staffing,
        TableSection::Vehicles,
        TableSection::Budget,
        TableSection::Development,
        TableSection::Utilisation,
        TableSection::Stakeholders,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            TableSection::Staffing => "staffing",
            TableSection::Vehicles => "vehicles",
            TableSection::Budget => "budget",
            TableSection::Development => "development",
            TableSection::Utilisation => "utilisation",
            TableSection::Stakeholders => "stakeholders",
        }
    }

    /// Caption shown above the editable grid.
    pub fn label(self) -> &'static str {
        match self {
            TableSection::Staffing => "Staffing",
            TableSection::Vehicles => "Motor Vehicles",
            TableSection::Budget => "ORT Budget",
            TableSection::Development => "Irrigation Development",
            TableSection::Utilisation => "Scheme Utilisation",
            TableSection::Stakeholders => "Stakeholders",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableSection::Staffing => StaffingRow::COLUMNS,
            TableSection::Vehicles => VehicleRow::COLUMNS,
            TableSection::Budget => BudgetRow::COLUMNS,
            TableSection::Development => DevelopmentRow::COLUMNS,
            TableSection::Utilisation => UtilisationRow::COLUMNS,
            TableSection::Stakeholders => StakeholderRow::COLUMNS,
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|section| section.slug() == slug)
            .ok_or_else(|| FormError::UnknownSection(slug.to_string()))
    }
}

impl FromStr for TableSection {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
    }
}

impl fmt::Display for TableSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// The two free-text areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Challenges,
    Recommendations,
}

impl TextField {
    pub const ALL: [TextField; 2] = [TextField::Challenges, TextField::Recommendations];

    pub fn slug(self) -> &'static str {
        match self {
            TextField::Challenges => "challenges",
            TextField::Recommendations => "recommendations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextField::Challenges => "Challenges",
            TextField::Recommendations => "Recommendations",
        }
    }

    /// Hint shown in the empty text area.
    pub fn placeholder(self) -> &'static str {
        match self {
            TextField::Challenges => "List main challenges faced...",
            TextField::Recommendations => "List recommendations...",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, FormError> {
        Self::ALL
            .into_iter()
            .find(|field| field.slug() == slug)
            .ok_or_else(|| FormError::UnknownField(slug.to_string()))
    }
}

impl FromStr for TextField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
    }
}
