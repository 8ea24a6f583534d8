//! # Adoption Analytics
//!
//! Loads medical-device procedure records and derives the dashboard views:
//! monthly new-adopter trends, regional procedure volume, specialty
//! breakdowns and the narrative insight panel.
//!
//! Everything downstream of [`loader`] is a pure function of an immutable
//! [`ProcedureTable`] and the active [`Filters`], so the whole dashboard can
//! be exercised without a browser.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod filters;
pub mod insight;
pub mod loader;
pub mod record;
pub mod views;

pub use aggregator::{
    adoption_series, first_adoptions, month_over_month, monthly_adoption, region_breakdown,
    specialty_breakdown, AdoptionPoint, AdoptionSeriesAggregator, Adopter, DataAggregator,
    MonthlyAdoption, MonthlyAdoptionAggregator, RegionBreakdownAggregator, RegionVolume,
    SpecialtyBreakdownAggregator, SpecialtyVolume,
};
pub use filters::{CategoryFilter, FilterLabels, Filters, RegionFilter, SpecialtyFilter};
pub use insight::{generate_insight, Insight, InsightInputs, InsightSection};
pub use loader::{load_procedures, parse_procedure_date, parse_procedures, LoadError, LoaderOptions};
pub use record::{ProcedureRecord, ProcedureTable, YearMonth};
pub use views::{compute_views, DashboardViews};
