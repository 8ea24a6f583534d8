//! Chart description and styling shared by the renderers

/// Everything a renderer needs besides its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Category axis description
    pub x_desc: String,
    /// Value axis description
    pub y_desc: String,
    pub style: StyleConfig,
}

impl GraphConfig {
    /// Default-sized chart with a title and both axis descriptions
    pub fn titled(title: impl Into<String>, x_desc: &str, y_desc: &str) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
            ..Self::default()
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 1000,
            height: 450,
            x_desc: String::new(),
            y_desc: String::new(),
            style: StyleConfig::default(),
        }
    }
}

/// Palette source for series and bars
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Plotly's qualitative palette
    #[default]
    Default,
    /// Hex colors (`#RRGGBB`); an empty list falls back to `Default`
    Custom(Vec<String>),
}

impl ColorScheme {
    /// Custom scheme from configured colors, or the default palette if none are set.
    pub fn from_hex_list(colors: &[String]) -> Self {
        if colors.is_empty() {
            Self::Default
        } else {
            Self::Custom(colors.to_vec())
        }
    }
}

/// One font family at three sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typography {
    pub family: String,
    pub title_size: u32,
    /// Tick labels and axis descriptions
    pub axis_size: u32,
    /// Annotations drawn above bars
    pub value_size: u32,
}

impl Typography {
    /// Value annotations run two points below the axis size, never under 8.
    pub fn from_base(family: &str, axis_size: u32, title_size: u32) -> Self {
        Self {
            family: family.to_string(),
            title_size,
            axis_size,
            value_size: axis_size.saturating_sub(2).max(8),
        }
    }

    pub fn title(&self) -> (&str, u32) {
        (&self.family, self.title_size)
    }

    pub fn axis(&self) -> (&str, u32) {
        (&self.family, self.axis_size)
    }

    pub fn value(&self) -> (&str, u32) {
        (&self.family, self.value_size)
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self::from_base("sans-serif", 13, 18)
    }
}

/// Pixel space reserved around the plotting area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotAreas {
    /// Gap between the drawing edge and the chart
    pub margin: u32,
    /// Height of the category axis label area
    pub x_axis: u32,
    /// Width of the value axis label area
    pub y_axis: u32,
}

impl Default for PlotAreas {
    fn default() -> Self {
        Self {
            margin: 20,
            x_axis: 50,
            y_axis: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    pub palette: ColorScheme,
    /// `#RRGGBB`; unparseable values render white
    pub background: String,
    pub typography: Typography,
    pub areas: PlotAreas,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: ColorScheme::Default,
            background: "#FFFFFF".to_string(),
            typography: Typography::default(),
            areas: PlotAreas::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_from_hex_list() {
        assert_eq!(ColorScheme::from_hex_list(&[]), ColorScheme::Default);
        assert_eq!(
            ColorScheme::from_hex_list(&["#636EFA".to_string()]),
            ColorScheme::Custom(vec!["#636EFA".to_string()])
        );
    }

    #[test]
    fn test_typography_from_base() {
        let typography = Typography::from_base("Helvetica", 13, 20);
        assert_eq!(typography.title(), ("Helvetica", 20));
        assert_eq!(typography.axis(), ("Helvetica", 13));
        assert_eq!(typography.value(), ("Helvetica", 11));

        assert_eq!(Typography::from_base("serif", 9, 14).value_size, 8);
    }

    #[test]
    fn test_titled_config() {
        let config = GraphConfig::titled("Volume", "Region", "Procedures");
        assert_eq!(config.title, "Volume");
        assert_eq!(config.x_desc, "Region");
        assert_eq!((config.width, config.height), (1000, 450));
        assert_eq!(config.style.background, "#FFFFFF");
    }
}
