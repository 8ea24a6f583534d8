//! Narrative insight panel built from templated sentences

use crate::aggregator::{month_over_month, AdoptionPoint, RegionVolume, SpecialtyVolume};
use crate::filters::Filters;
use adoption_common::{format_currency, format_percentage};
use serde::Serialize;
use std::cmp::Ordering;

const REGIONAL_STRATEGY: &str = "The growth rate here is critical, but volume may be limited \
compared to other regions. Ensure sales efforts focus on quality account penetration over \
pure volume acquisition.";

const SPECIALTY_TARGETING: &str =
    "Consider targeting the highest revenue specialties for future high-value accounts.";

/// One headed paragraph of the insight panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightSection {
    pub heading: String,
    pub body: String,
}

/// Ordered insight paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Insight {
    pub sections: Vec<InsightSection>,
}

impl Insight {
    /// Render as markdown paragraphs with bold headings.
    pub fn to_markdown(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("**{}:** {}", s.heading, s.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The views an insight is derived from.
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    /// Total-market adoption series, regardless of the region filter
    pub market: &'a [AdoptionPoint],
    /// Unfiltered region breakdown
    pub regions: &'a [RegionVolume],
    /// Specialty breakdown under the active region filter
    pub specialties: &'a [SpecialtyVolume],
    pub filters: &'a Filters,
}

/// Assemble the insight panel for the current selection.
pub fn generate_insight(inputs: &InsightInputs<'_>) -> Insight {
    let mut sections = vec![market_velocity(inputs.market)];

    if let Some(region) = inputs.filters.region.selected() {
        sections.push(regional_strategy(region, inputs.regions));
    }

    if let Some(specialty) = inputs.filters.specialty.selected() {
        if let Some(section) = specialty_focus(specialty, inputs.specialties) {
            sections.push(section);
        }
    }

    Insight { sections }
}

/// Latest month with new adopters, compared with the previous such month.
///
/// Months without adopters are zero-filled for the chart but skipped here.
fn market_velocity(market: &[AdoptionPoint]) -> InsightSection {
    let adopting: Vec<AdoptionPoint> = market
        .iter()
        .filter(|point| point.new_adopters > 0)
        .copied()
        .collect();

    let body = match adopting.last() {
        Some(latest) => {
            let change = month_over_month(&adopting)
                .map_or_else(|| "n/a".to_string(), format_percentage);
            format!(
                "Last month ({}) saw {} new physician adopters, representing a {} \
                 Month-over-Month change in market penetration.",
                latest.month, latest.new_adopters, change
            )
        }
        None => "Data is unavailable for analysis.".to_string(),
    };

    InsightSection {
        heading: "Market Velocity".to_string(),
        body,
    }
}

fn regional_strategy(region: &str, regions: &[RegionVolume]) -> InsightSection {
    let body = match regions.iter().find(|r| r.region == region) {
        Some(volume) => format!(
            "This region accounts for {} of total market volume. {REGIONAL_STRATEGY}",
            format_percentage(volume.share)
        ),
        None => "No procedures are recorded for this region.".to_string(),
    };

    InsightSection {
        heading: format!("Regional Strategy ({region})"),
        body,
    }
}

fn specialty_focus(specialty: &str, specialties: &[SpecialtyVolume]) -> Option<InsightSection> {
    let selected = specialties.iter().find(|s| s.specialty == specialty)?;

    let comparison = match highest_average_revenue(specialties) {
        Some((top, _)) if top.specialty == selected.specialty => format!(
            "This is the highest average revenue impact of any specialty. {SPECIALTY_TARGETING}"
        ),
        Some((top, revenue)) => format!(
            "The {} specialty, however, shows the highest average revenue impact ({}). \
             {SPECIALTY_TARGETING}",
            top.specialty,
            format_currency(revenue)
        ),
        None => SPECIALTY_TARGETING.to_string(),
    };

    Some(InsightSection {
        heading: format!("Specialty Focus ({specialty})"),
        body: format!(
            "This segment has generated {} procedures with an average revenue impact of {} \
             per procedure. {comparison}",
            selected.procedure_count,
            selected.avg_revenue.map_or_else(|| "n/a".to_string(), format_currency)
        ),
    })
}

/// Highest known mean revenue; equal means resolve to the alphabetically first name.
fn highest_average_revenue(specialties: &[SpecialtyVolume]) -> Option<(&SpecialtyVolume, f64)> {
    specialties
        .iter()
        .filter_map(|s| s.avg_revenue.map(|revenue| (s, revenue)))
        .max_by(|(a, a_revenue), (b, b_revenue)| {
            a_revenue
                .partial_cmp(b_revenue)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.specialty.cmp(&a.specialty))
        })
}
