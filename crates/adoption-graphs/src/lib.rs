//! SVG chart rendering for the adoption dashboard

pub mod adoption_trend;
pub mod dashboard;
pub mod region_volume;
pub mod renderer;
pub mod specialty_breakdown;
pub mod types;

pub use adoption_trend::AdoptionTrendGraph;
pub use dashboard::{render_dashboard_charts, ChartSettings, DashboardCharts, RenderedChart};
pub use region_volume::RegionVolumeGraph;
pub use renderer::GraphRenderer;
pub use specialty_breakdown::SpecialtyBreakdownGraph;
pub use types::*;
