//! Renders the three dashboard charts from computed views

use crate::{
    AdoptionTrendGraph, ColorScheme, GraphConfig, GraphRenderer, RegionVolumeGraph,
    SpecialtyBreakdownGraph, Typography,
};
use adoption_analytics::DashboardViews;
use serde::Serialize;
use tracing::{instrument, warn};

/// Sizing, fonts and palettes shared by all dashboard charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub title_font_size: u32,
    pub adoption_colors: Vec<String>,
    pub region_colors: Vec<String>,
    pub specialty_colors: Vec<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 450,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 13,
            title_font_size: 18,
            adoption_colors: Vec::new(),
            region_colors: Vec::new(),
            specialty_colors: Vec::new(),
        }
    }
}

impl ChartSettings {
    /// Apply size, fonts, background and palette to a chart's base config
    pub fn apply(&self, mut config: GraphConfig, palette: &[String]) -> GraphConfig {
        config.width = self.width;
        config.height = self.height;
        config.style.background = self.background_color.clone();
        config.style.palette = ColorScheme::from_hex_list(palette);
        config.style.typography =
            Typography::from_base(&self.font_family, self.font_size, self.title_font_size);
        config
    }
}

/// Outcome of rendering one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderedChart {
    Svg { svg: String },
    Unavailable { reason: String },
}

impl RenderedChart {
    pub fn svg(&self) -> Option<&str> {
        match self {
            Self::Svg { svg } => Some(svg),
            Self::Unavailable { .. } => None,
        }
    }
}

/// The three dashboard charts
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCharts {
    pub adoption: RenderedChart,
    pub regions: RenderedChart,
    pub specialties: RenderedChart,
}

/// Render every chart; a chart that cannot be drawn is reported as unavailable.
#[instrument(skip_all)]
pub fn render_dashboard_charts(views: &DashboardViews, settings: &ChartSettings) -> DashboardCharts {
    let adoption = AdoptionTrendGraph::new(views.adoption.clone());
    let adoption_config = settings.apply(
        AdoptionTrendGraph::default_config(&views.adoption_title),
        &settings.adoption_colors,
    );

    let regions = RegionVolumeGraph::new(views.regions.clone());
    let regions_config = settings.apply(RegionVolumeGraph::default_config(), &settings.region_colors);

    let specialties = SpecialtyBreakdownGraph::new(views.specialties.clone())
        .with_highlight(views.filters.specialty.selected());
    let specialties_config = settings.apply(
        SpecialtyBreakdownGraph::default_config(&views.specialty_title),
        &settings.specialty_colors,
    );

    DashboardCharts {
        adoption: render_or_explain(&adoption, &adoption_config),
        regions: render_or_explain(&regions, &regions_config),
        specialties: render_or_explain(&specialties, &specialties_config),
    }
}

fn render_or_explain<R: GraphRenderer>(renderer: &R, config: &GraphConfig) -> RenderedChart {
    match renderer.render_svg(config) {
        Ok(svg) => RenderedChart::Svg { svg },
        Err(e) => {
            warn!(chart = renderer.name(), error = %e, "Chart unavailable");
            RenderedChart::Unavailable {
                reason: "No data".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoption_analytics::{compute_views, parse_procedures, CategoryFilter, Filters, LoaderOptions, ProcedureTable};
    use adoption_common::test_utils::SAMPLE_PROCEDURES_CSV;

    fn sample() -> ProcedureTable {
        parse_procedures(SAMPLE_PROCEDURES_CSV.as_bytes(), &LoaderOptions::default()).unwrap()
    }

    #[test]
    fn test_settings_apply() {
        let settings = ChartSettings {
            width: 640,
            font_family: "Helvetica".to_string(),
            ..ChartSettings::default()
        };
        let config = settings.apply(GraphConfig::default(), &["#11A579".to_string()]);

        assert_eq!(config.width, 640);
        assert_eq!(config.style.typography.family, "Helvetica");
        assert_eq!(config.style.typography.value_size, 11);
        assert_eq!(
            config.style.palette,
            ColorScheme::Custom(vec!["#11A579".to_string()])
        );
    }

    #[test]
    fn test_render_all_charts() {
        let views = compute_views(&sample(), &Filters::all());
        let charts = render_dashboard_charts(&views, &ChartSettings::default());

        for chart in [&charts.adoption, &charts.regions, &charts.specialties] {
            assert!(chart.svg().is_some_and(|svg| svg.contains("<svg")));
        }
        assert!(charts
            .adoption
            .svg()
            .is_some_and(|svg| svg.contains("Monthly New Adopting Physicians (Total Market)")));
    }

    #[test]
    fn test_unknown_region_leaves_specialty_chart_unavailable() {
        let views = compute_views(
            &sample(),
            &Filters::new(CategoryFilter::only("Mars"), CategoryFilter::All),
        );
        let charts = render_dashboard_charts(&views, &ChartSettings::default());

        // The zero-filled trend and the unfiltered regions still draw.
        assert!(charts.adoption.svg().is_some());
        assert!(charts.regions.svg().is_some());
        assert_eq!(
            charts.specialties,
            RenderedChart::Unavailable {
                reason: "No data".to_string()
            }
        );
    }
}
