//! Specialty procedure count bar chart with revenue labels

use crate::renderer::{render_bar_chart, Bar};
use crate::{GraphConfig, GraphRenderer};
use adoption_analytics::SpecialtyVolume;
use adoption_common::{format_currency, truncate_label, AdoptionError, Result};
use plotters::prelude::*;
use tracing::debug;

/// Opacity of bars that are not the selected specialty
const DIMMED_ALPHA: f64 = 0.35;

/// Vertical bar per specialty labelled with its average revenue impact
#[derive(Debug, Default)]
pub struct SpecialtyBreakdownGraph {
    pub volumes: Vec<SpecialtyVolume>,
    /// Specialty drawn at full strength while the others are dimmed
    pub highlighted: Option<String>,
}

impl SpecialtyBreakdownGraph {
    pub fn new(volumes: Vec<SpecialtyVolume>) -> Self {
        Self {
            volumes,
            highlighted: None,
        }
    }

    pub fn with_highlight(mut self, specialty: Option<&str>) -> Self {
        self.highlighted = specialty.map(str::to_string);
        self
    }

    pub fn default_config(title: &str) -> GraphConfig {
        GraphConfig::titled(title, "Specialty", "Procedure Count")
    }

    fn is_dimmed(&self, specialty: &str) -> bool {
        self.highlighted
            .as_deref()
            .is_some_and(|selected| selected != specialty)
    }
}

impl GraphRenderer for SpecialtyBreakdownGraph {
    fn name(&self) -> &'static str {
        "specialty_breakdown"
    }

    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        if self.volumes.is_empty() {
            return Err(AdoptionError::graph(
                "No data available for specialty breakdown chart",
            ));
        }

        let colors = self.get_colors(&config.style.palette);
        let bars: Vec<Bar> = self
            .volumes
            .iter()
            .zip(colors.iter().cycle())
            .map(|(volume, color)| Bar {
                label: truncate_label(&volume.specialty, 16),
                value: f64::from(volume.procedure_count),
                annotation: volume
                    .avg_revenue
                    .map_or_else(|| "n/a".to_string(), format_currency),
                fill: if self.is_dimmed(&volume.specialty) {
                    color.mix(DIMMED_ALPHA).filled()
                } else {
                    color.filled()
                },
            })
            .collect();

        let svg = render_bar_chart(config, self.get_background_color(config), &bars)?;

        debug!(
            specialties = bars.len(),
            highlighted = ?self.highlighted,
            "Rendered specialty breakdown chart"
        );
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volumes() -> Vec<SpecialtyVolume> {
        vec![
            SpecialtyVolume {
                specialty: "Cardiology".to_string(),
                procedure_count: 2,
                avg_revenue: Some(1100.0),
            },
            SpecialtyVolume {
                specialty: "Ortho".to_string(),
                procedure_count: 1,
                avg_revenue: Some(800.0),
            },
        ]
    }

    #[test]
    fn test_render_labels_average_revenue() {
        let graph = SpecialtyBreakdownGraph::new(volumes());
        let svg = graph
            .render_svg(&SpecialtyBreakdownGraph::default_config("Overall Specialty Breakdown"))
            .expect("render must succeed");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("$1,100"));
        assert!(svg.contains("$800"));
    }

    #[test]
    fn test_highlight_dims_other_specialties() {
        let graph = SpecialtyBreakdownGraph::new(volumes()).with_highlight(Some("Ortho"));

        assert!(graph.is_dimmed("Cardiology"));
        assert!(!graph.is_dimmed("Ortho"));

        let svg = graph
            .render_svg(&SpecialtyBreakdownGraph::default_config("Breakdown"))
            .expect("render must succeed");
        assert!(svg.contains("opacity=\"0.35\""));
    }

    #[test]
    fn test_no_highlight_dims_nothing() {
        let graph = SpecialtyBreakdownGraph::new(volumes()).with_highlight(None);
        assert!(!graph.is_dimmed("Cardiology"));
        assert!(!graph.is_dimmed("Ortho"));

        let svg = graph
            .render_svg(&SpecialtyBreakdownGraph::default_config("Breakdown"))
            .expect("render must succeed");
        assert!(!svg.contains("opacity=\"0.35\""));
    }

    #[test]
    fn test_empty_is_graph_error() {
        let result = SpecialtyBreakdownGraph::default()
            .render_svg(&SpecialtyBreakdownGraph::default_config("Empty"));
        assert!(result.is_err());
    }
}
