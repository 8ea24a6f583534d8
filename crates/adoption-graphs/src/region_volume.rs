//! Procedure volume per region bar chart

use crate::renderer::{render_bar_chart, Bar};
use crate::{GraphConfig, GraphRenderer};
use adoption_analytics::RegionVolume;
use adoption_common::{format_thousands, truncate_label, AdoptionError, Result};
use plotters::prelude::*;
use tracing::debug;

/// Vertical bar per region, one palette color per bar
#[derive(Debug, Default)]
pub struct RegionVolumeGraph {
    pub volumes: Vec<RegionVolume>,
}

impl RegionVolumeGraph {
    pub fn new(volumes: Vec<RegionVolume>) -> Self {
        Self { volumes }
    }

    pub fn default_config() -> GraphConfig {
        GraphConfig::titled(
            "Total Procedure Volume by Geographic Region",
            "Region",
            "Total Procedures",
        )
    }
}

impl GraphRenderer for RegionVolumeGraph {
    fn name(&self) -> &'static str {
        "region_volume"
    }

    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        if self.volumes.is_empty() {
            return Err(AdoptionError::graph("No data available for region volume chart"));
        }

        let colors = self.get_colors(&config.style.palette);
        let bars: Vec<Bar> = self
            .volumes
            .iter()
            .zip(colors.iter().cycle())
            .map(|(volume, color)| Bar {
                label: truncate_label(&volume.region, 18),
                value: f64::from(volume.total_procedures),
                annotation: format_thousands(i64::from(volume.total_procedures)),
                fill: color.filled(),
            })
            .collect();

        let svg = render_bar_chart(config, self.get_background_color(config), &bars)?;

        debug!(regions = bars.len(), bytes = svg.len(), "Rendered region volume chart");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorScheme;

    fn volumes() -> Vec<RegionVolume> {
        vec![
            RegionVolume {
                region: "West".to_string(),
                total_procedures: 1200,
                share: 60.0,
            },
            RegionVolume {
                region: "East".to_string(),
                total_procedures: 800,
                share: 40.0,
            },
        ]
    }

    #[test]
    fn test_render_bars_and_labels() {
        let graph = RegionVolumeGraph::new(volumes());
        let svg = graph
            .render_svg(&RegionVolumeGraph::default_config())
            .expect("render must succeed");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("1,200"));
        assert!(svg.contains("West"));
    }

    #[test]
    fn test_palette_cycles_over_regions() {
        let graph = RegionVolumeGraph::new(volumes());
        let mut config = RegionVolumeGraph::default_config();
        config.style.palette = ColorScheme::Custom(vec!["#4B2991".to_string()]);

        let svg = graph.render_svg(&config).expect("render must succeed");
        assert!(svg.contains("#4B2991") || svg.contains("rgb(75,41,145)") || svg.contains("#4b2991"));
    }

    #[test]
    fn test_empty_is_graph_error() {
        let err = RegionVolumeGraph::default()
            .render_svg(&RegionVolumeGraph::default_config())
            .unwrap_err();
        assert!(err.to_string().contains("region volume"));
    }
}
