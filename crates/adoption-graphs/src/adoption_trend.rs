//! Monthly new-adopter line chart

use crate::renderer::{category_label, category_range, value_axis_max};
use crate::{GraphConfig, GraphRenderer};
use adoption_analytics::AdoptionPoint;
use adoption_common::{AdoptionError, Result};
use plotters::prelude::*;
use tracing::debug;

/// Line chart with markers: months on x, new unique physicians on y
#[derive(Debug, Default)]
pub struct AdoptionTrendGraph {
    pub points: Vec<AdoptionPoint>,
}

impl AdoptionTrendGraph {
    pub fn new(points: Vec<AdoptionPoint>) -> Self {
        Self { points }
    }

    /// Graph configuration with the axis labels this chart uses
    pub fn default_config(title: &str) -> GraphConfig {
        GraphConfig::titled(title, "Month", "New Unique Physicians")
    }

    fn month_labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.month.to_string()).collect()
    }
}

impl GraphRenderer for AdoptionTrendGraph {
    fn name(&self) -> &'static str {
        "adoption_trend"
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        if self.points.is_empty() {
            return Err(AdoptionError::graph("No data available for adoption trend chart"));
        }

        let labels = self.month_labels();
        let max_value = self
            .points
            .iter()
            .map(|p| f64::from(p.new_adopters))
            .fold(0.0, f64::max);
        let series: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, f64::from(p.new_adopters)))
            .collect();

        let line_color = self.get_colors(&config.style.palette)[0];
        let typography = &config.style.typography;
        let areas = config.style.areas;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            root.fill(&self.get_background_color(config))?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, typography.title())
                .margin(areas.margin)
                .x_label_area_size(areas.x_axis)
                .y_label_area_size(areas.y_axis)
                .build_cartesian_2d(category_range(labels.len()), 0.0..value_axis_max(max_value))?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len().min(12))
                .x_label_formatter(&|x| category_label(&labels, *x))
                .y_label_formatter(&|y| format!("{y:.0}"))
                .x_desc(config.x_desc.as_str())
                .y_desc(config.y_desc.as_str())
                .label_style(typography.axis())
                .axis_desc_style(typography.axis())
                .draw()?;

            chart.draw_series(LineSeries::new(series.clone(), line_color.stroke_width(2)))?;
            chart.draw_series(
                series
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, line_color.filled())),
            )?;

            root.present()?;
        }

        debug!(months = self.points.len(), bytes = svg.len(), "Rendered adoption trend chart");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoption_analytics::YearMonth;

    fn point(month: u32, new_adopters: u32) -> AdoptionPoint {
        AdoptionPoint {
            month: YearMonth::new(2024, month).unwrap(),
            new_adopters,
        }
    }

    #[test]
    fn test_default_config_labels() {
        let config = AdoptionTrendGraph::default_config("Monthly New Adopting Physicians (Total Market)");
        assert_eq!(config.x_desc, "Month");
        assert_eq!(config.y_desc, "New Unique Physicians");
    }

    #[test]
    fn test_render_produces_svg() {
        let graph = AdoptionTrendGraph::new(vec![point(1, 2), point(2, 0), point(3, 5)]);
        let config = AdoptionTrendGraph::default_config("Trend");
        let svg = graph.render_svg(&config).expect("render must succeed");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Trend"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_single_month() {
        let graph = AdoptionTrendGraph::new(vec![point(1, 0)]);
        let svg = graph
            .render_svg(&AdoptionTrendGraph::default_config("One month"))
            .expect("single month must render");
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_empty_series_is_graph_error() {
        let graph = AdoptionTrendGraph::default();
        let err = graph
            .render_svg(&AdoptionTrendGraph::default_config("Empty"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Graph error"));
    }
}
