//! Graph rendering trait and shared chart helpers

use crate::{ColorScheme, GraphConfig};
use adoption_common::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Plotly's qualitative palette
const PLOTLY: [RGBColor; 10] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
];

/// Half the width of a bar in category units
const BAR_HALF_WIDTH: f64 = 0.35;

/// Trait for rendering a chart to an SVG document
pub trait GraphRenderer {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Render the chart as a standalone SVG string
    fn render_svg(&self, config: &GraphConfig) -> Result<String>;

    /// Resolve a palette to concrete colors; never empty
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Custom(colors) if !colors.is_empty() => {
                colors.iter().map(|c| self.parse_color(c)).collect()
            }
            _ => PLOTLY.to_vec(),
        }
    }

    /// Parse a `#RRGGBB` string, falling back to black
    fn parse_color(&self, color_str: &str) -> RGBColor {
        hex_color(color_str).unwrap_or(BLACK)
    }

    /// Chart background, white when unset or unparseable
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        hex_color(&config.style.background).unwrap_or(WHITE)
    }
}

fn hex_color(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// One bar of a category bar chart
pub(crate) struct Bar {
    pub label: String,
    pub value: f64,
    /// Text drawn centred above the bar
    pub annotation: String,
    pub fill: ShapeStyle,
}

/// Draw `bars` left to right on a category axis with annotations on top.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn render_bar_chart(
    config: &GraphConfig,
    background: RGBColor,
    bars: &[Bar],
) -> Result<String> {
    let labels: Vec<String> = bars.iter().map(|bar| bar.label.clone()).collect();
    let max_value = bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
    let typography = &config.style.typography;
    let areas = config.style.areas;
    let annotation_font = typography
        .value()
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&background)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, typography.title())
            .margin(areas.margin)
            .x_label_area_size(areas.x_axis)
            .y_label_area_size(areas.y_axis)
            .build_cartesian_2d(category_range(bars.len()), 0.0..value_axis_max(max_value))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| category_label(&labels, *x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .x_desc(config.x_desc.as_str())
            .y_desc(config.y_desc.as_str())
            .label_style(typography.axis())
            .axis_desc_style(typography.axis())
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, bar.value)],
                bar.fill,
            )
        }))?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                bar.annotation.clone(),
                (i as f64, bar.value),
                annotation_font.clone(),
            )
        }))?;

        root.present()?;
    }

    Ok(svg)
}

/// Label for a category axis position; blank between categories.
///
/// Categories sit at integer x positions `0..labels.len()`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Upper bound of the value axis with headroom for labels; never below 1.
pub(crate) fn value_axis_max(max_value: f64) -> f64 {
    if max_value <= 0.0 {
        1.0
    } else {
        max_value * 1.15
    }
}

/// Horizontal extent of `count` categories centred on integer positions.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn category_range(count: usize) -> std::ops::Range<f64> {
    -0.5..(count as f64 - 0.5)
}
