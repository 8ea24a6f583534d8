//! Everything the dashboard shows for one filter selection

use crate::aggregator::{
    AdoptionPoint, AdoptionSeriesAggregator, DataAggregator, RegionBreakdownAggregator,
    RegionVolume, SpecialtyBreakdownAggregator, SpecialtyVolume,
};
use crate::filters::{CategoryFilter, Filters};
use crate::insight::{generate_insight, Insight, InsightInputs};
use crate::record::ProcedureTable;
use serde::Serialize;
use tracing::{debug, instrument};

/// Derived views for the current filters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViews {
    pub filters: Filters,
    pub adoption_title: String,
    /// New adopters per month under the region filter
    pub adoption: Vec<AdoptionPoint>,
    /// Procedure volume per region, never filtered
    pub regions: Vec<RegionVolume>,
    pub specialty_title: String,
    /// Specialty volume under the region filter
    pub specialties: Vec<SpecialtyVolume>,
    pub insight: Insight,
    pub available_regions: Vec<String>,
    pub available_specialties: Vec<String>,
}

/// Compute every view for `filters`.
///
/// The specialty filter only affects the insight and chart highlighting,
/// never the aggregated numbers.
#[instrument(skip(table), fields(records = table.len()))]
pub fn compute_views(table: &ProcedureTable, filters: &Filters) -> DashboardViews {
    let adoption = AdoptionSeriesAggregator::new(filters.region.clone()).aggregate(table);
    let market = if filters.region.is_all() {
        adoption.clone()
    } else {
        AdoptionSeriesAggregator::total_market().aggregate(table)
    };
    let regions = RegionBreakdownAggregator.aggregate(table);
    let specialties = SpecialtyBreakdownAggregator::new(filters.region.clone()).aggregate(table);

    let insight = generate_insight(&InsightInputs {
        market: &market,
        regions: &regions,
        specialties: &specialties,
        filters,
    });

    let (adoption_title, specialty_title) = match &filters.region {
        CategoryFilter::All => (
            "Monthly New Adopting Physicians (Total Market)".to_string(),
            "Overall Specialty Breakdown".to_string(),
        ),
        CategoryFilter::Only(region) => (
            format!("Monthly New Adopting Physicians in {region}"),
            format!("Specialty Breakdown in {region}"),
        ),
    };

    debug!(
        months = adoption.len(),
        regions = regions.len(),
        specialties = specialties.len(),
        "Computed dashboard views"
    );

    DashboardViews {
        filters: filters.clone(),
        adoption_title,
        adoption,
        regions,
        specialty_title,
        specialties,
        insight,
        available_regions: table.regions(),
        available_specialties: table.specialties(),
    }
}
