//! Region and specialty selections applied to the dashboard views.

use serde::Serialize;

/// A selection over one categorical column: everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

pub type RegionFilter = CategoryFilter;
pub type SpecialtyFilter = CategoryFilter;

impl CategoryFilter {
    /// Restrict to exactly `value`.
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    /// Interpret a request parameter; absent, blank or the "all" label select everything.
    pub fn from_param(value: Option<&str>, all_label: &str) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v == all_label => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }

    /// Whether `value` passes this filter. Comparison is exact.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    /// The selected value, if restricted.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(selected) => Some(selected),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Labels shown for the unrestricted choice in each drop-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLabels {
    pub all_regions: String,
    pub all_specialties: String,
}

impl Default for FilterLabels {
    fn default() -> Self {
        Self {
            all_regions: "All Regions".to_string(),
            all_specialties: "All Specialties".to_string(),
        }
    }
}

/// The active region and specialty selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Filters {
    pub region: RegionFilter,
    pub specialty: SpecialtyFilter,
}

impl Filters {
    /// No restriction on either column.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(region: RegionFilter, specialty: SpecialtyFilter) -> Self {
        Self { region, specialty }
    }

    /// Build filters from raw query parameters.
    pub fn from_query(region: Option<&str>, specialty: Option<&str>, labels: &FilterLabels) -> Self {
        Self {
            region: CategoryFilter::from_param(region, &labels.all_regions),
            specialty: CategoryFilter::from_param(specialty, &labels.all_specialties),
        }
    }
}
