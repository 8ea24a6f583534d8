//! Aggregations over the procedure table that feed the dashboard charts

use crate::filters::RegionFilter;
use crate::record::{ProcedureTable, YearMonth};
use adoption_common::PhysicianId;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// A physician's first recorded procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adopter {
    pub physician_id: PhysicianId,
    pub adoption_date: NaiveDate,
    /// Region of the physician's first record in file order
    pub region: String,
}

/// New adopters in one month and region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAdoption {
    pub month: YearMonth,
    pub region: String,
    pub new_adopters: u32,
}

/// One point of the new-adopter trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdoptionPoint {
    pub month: YearMonth,
    pub new_adopters: u32,
}

/// Procedure volume of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionVolume {
    pub region: String,
    pub total_procedures: u32,
    /// Percentage of all procedures, 0 to 100
    pub share: f64,
}

/// Procedure count and mean revenue of one specialty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyVolume {
    pub specialty: String,
    pub procedure_count: u32,
    /// Mean over procedures with a recorded revenue; `None` if there are none
    pub avg_revenue: Option<f64>,
}

/// Trait for aggregating the procedure table into chart data
pub trait DataAggregator<T> {
    /// Produce data points from the table
    fn aggregate(&self, table: &ProcedureTable) -> Vec<T>;
}

/// Earliest procedure per physician, sorted by physician id.
///
/// The adoption region comes from the physician's first record in file
/// order, which is not necessarily the record with the earliest date.
#[instrument(skip(table), fields(records = table.len()))]
pub fn first_adoptions(table: &ProcedureTable) -> Vec<Adopter> {
    let mut earliest: BTreeMap<&PhysicianId, (NaiveDate, &str)> = BTreeMap::new();

    for record in table.records() {
        earliest
            .entry(&record.physician_id)
            .and_modify(|(date, _)| {
                if record.procedure_date < *date {
                    *date = record.procedure_date;
                }
            })
            .or_insert((record.procedure_date, record.region.as_str()));
    }

    let adopters: Vec<Adopter> = earliest
        .into_iter()
        .map(|(id, (adoption_date, region))| Adopter {
            physician_id: id.clone(),
            adoption_date,
            region: region.to_string(),
        })
        .collect();

    debug!("Found {} adopting physicians", adopters.len());
    adopters
}

/// Counts new adopters per month and region
#[derive(Debug, Default)]
pub struct MonthlyAdoptionAggregator;

impl DataAggregator<MonthlyAdoption> for MonthlyAdoptionAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &ProcedureTable) -> Vec<MonthlyAdoption> {
        let mut counts: BTreeMap<(YearMonth, String), u32> = BTreeMap::new();

        for adopter in first_adoptions(table) {
            *counts
                .entry((YearMonth::from_date(adopter.adoption_date), adopter.region))
                .or_insert(0) += 1;
        }

        let rows: Vec<MonthlyAdoption> = counts
            .into_iter()
            .map(|((month, region), new_adopters)| MonthlyAdoption {
                month,
                region,
                new_adopters,
            })
            .collect();

        debug!("Aggregated {} month/region adoption rows", rows.len());
        rows
    }
}

/// Monthly new-adopter series for one region or the total market.
///
/// Months run over the full procedure span of the table; months without
/// new adopters are reported as zero.
#[derive(Debug, Default)]
pub struct AdoptionSeriesAggregator {
    pub region: RegionFilter,
}

impl AdoptionSeriesAggregator {
    pub fn new(region: RegionFilter) -> Self {
        Self { region }
    }

    /// Series over all regions
    pub fn total_market() -> Self {
        Self::default()
    }
}

impl DataAggregator<AdoptionPoint> for AdoptionSeriesAggregator {
    #[instrument(skip(self, table), fields(region = ?self.region.selected()))]
    fn aggregate(&self, table: &ProcedureTable) -> Vec<AdoptionPoint> {
        let Some((first, last)) = table.month_span() else {
            return Vec::new();
        };

        let mut counts: HashMap<YearMonth, u32> = HashMap::new();
        for adopter in first_adoptions(table)
            .into_iter()
            .filter(|a| self.region.matches(&a.region))
        {
            *counts
                .entry(YearMonth::from_date(adopter.adoption_date))
                .or_insert(0) += 1;
        }

        let series: Vec<AdoptionPoint> = YearMonth::range_inclusive(first, last)
            .into_iter()
            .map(|month| AdoptionPoint {
                month,
                new_adopters: counts.get(&month).copied().unwrap_or(0),
            })
            .collect();

        debug!("Built adoption series with {} months", series.len());
        series
    }
}

/// Procedure volume per region, largest first. Ignores any filter.
#[derive(Debug, Default)]
pub struct RegionBreakdownAggregator;

impl DataAggregator<RegionVolume> for RegionBreakdownAggregator {
    #[instrument(skip(self, table))]
    fn aggregate(&self, table: &ProcedureTable) -> Vec<RegionVolume> {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for record in table.records() {
            *counts.entry(record.region.as_str()).or_insert(0) += 1;
        }

        let total = table.len();
        let mut volumes: Vec<RegionVolume> = counts
            .into_iter()
            .map(|(region, total_procedures)| RegionVolume {
                region: region.to_string(),
                total_procedures,
                share: percentage(total_procedures, total),
            })
            .collect();

        volumes.sort_by(|a, b| {
            b.total_procedures
                .cmp(&a.total_procedures)
                .then_with(|| a.region.cmp(&b.region))
        });

        debug!("Aggregated procedure volume for {} regions", volumes.len());
        volumes
    }
}

/// Procedure count and mean revenue per specialty, honouring the region filter only.
#[derive(Debug, Default)]
pub struct SpecialtyBreakdownAggregator {
    pub region: RegionFilter,
}

impl SpecialtyBreakdownAggregator {
    pub fn new(region: RegionFilter) -> Self {
        Self { region }
    }
}

impl DataAggregator<SpecialtyVolume> for SpecialtyBreakdownAggregator {
    #[instrument(skip(self, table), fields(region = ?self.region.selected()))]
    fn aggregate(&self, table: &ProcedureTable) -> Vec<SpecialtyVolume> {
        let mut totals: HashMap<&str, (u32, u32, f64)> = HashMap::new();
        for record in table
            .records()
            .iter()
            .filter(|r| self.region.matches(&r.region))
        {
            let entry = totals.entry(record.specialty.as_str()).or_insert((0, 0, 0.0));
            entry.0 += 1;
            if let Some(revenue) = record.revenue_impact {
                entry.1 += 1;
                entry.2 += revenue;
            }
        }

        let mut volumes: Vec<SpecialtyVolume> = totals
            .into_iter()
            .map(|(specialty, (procedure_count, priced, revenue))| SpecialtyVolume {
                specialty: specialty.to_string(),
                procedure_count,
                avg_revenue: (priced > 0).then(|| revenue / f64::from(priced)),
            })
            .collect();

        volumes.sort_by(|a, b| {
            b.procedure_count
                .cmp(&a.procedure_count)
                .then_with(|| a.specialty.cmp(&b.specialty))
        });

        debug!("Aggregated {} specialties", volumes.len());
        volumes
    }
}

/// New adopters grouped by (adoption month, region).
pub fn monthly_adoption(table: &ProcedureTable) -> Vec<MonthlyAdoption> {
    MonthlyAdoptionAggregator.aggregate(table)
}

/// Zero-filled monthly new-adopter series for `region`.
pub fn adoption_series(table: &ProcedureTable, region: &RegionFilter) -> Vec<AdoptionPoint> {
    AdoptionSeriesAggregator::new(region.clone()).aggregate(table)
}

/// Procedure volume per region over the whole table.
pub fn region_breakdown(table: &ProcedureTable) -> Vec<RegionVolume> {
    RegionBreakdownAggregator.aggregate(table)
}

/// Specialty counts and mean revenue over rows in `region`.
pub fn specialty_breakdown(table: &ProcedureTable, region: &RegionFilter) -> Vec<SpecialtyVolume> {
    SpecialtyBreakdownAggregator::new(region.clone()).aggregate(table)
}

/// Percentage change of the last point over the one before it.
///
/// A series shorter than two months has no measurable change and yields
/// `Some(0.0)`; a previous month with zero adopters yields `None`.
pub fn month_over_month(series: &[AdoptionPoint]) -> Option<f64> {
    match series {
        [.., previous, latest] => {
            if previous.new_adopters == 0 {
                None
            } else {
                let previous = f64::from(previous.new_adopters);
                Some((f64::from(latest.new_adopters) - previous) / previous * 100.0)
            }
        }
        _ => Some(0.0),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u32, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / total as f64 * 100.0
    }
}
