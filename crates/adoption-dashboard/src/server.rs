//! HTTP routes for the dashboard page and its JSON views
//!
//! Every request recomputes the views from the cached, immutable procedure
//! table; the cache is the only shared state.

use crate::cache::DatasetCache;
use crate::page;
use adoption_analytics::{compute_views, DashboardViews, FilterLabels, Filters, LoaderOptions};
use adoption_common::AdoptionError;
use adoption_config::{ChartsConfig, Config, DashboardConfig};
use adoption_graphs::{render_dashboard_charts, ChartSettings};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared application state for the dashboard routes
#[derive(Clone)]
pub struct AppState {
    /// Lazily loaded procedure table
    pub cache: Arc<DatasetCache>,
    /// Page text and drop-down labels
    pub dashboard: Arc<DashboardConfig>,
    /// Chart sizing and palettes
    pub charts: Arc<ChartSettings>,
}

impl AppState {
    /// Build state from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        let cache = DatasetCache::new(
            &config.data.path,
            LoaderOptions {
                delimiter: config.data.delimiter_byte(),
            },
        );
        Self {
            cache: Arc::new(cache),
            dashboard: Arc::new(config.dashboard.clone()),
            charts: Arc::new(chart_settings(&config.charts)),
        }
    }

    fn labels(&self) -> FilterLabels {
        FilterLabels {
            all_regions: self.dashboard.all_regions_label.clone(),
            all_specialties: self.dashboard.all_specialties_label.clone(),
        }
    }
}

/// Chart settings from the `charts` configuration section
pub fn chart_settings(charts: &ChartsConfig) -> ChartSettings {
    ChartSettings {
        width: charts.width,
        height: charts.height,
        background_color: charts.background_color.clone(),
        font_family: charts.font_family.clone(),
        font_size: charts.font_size,
        title_font_size: charts.title_font_size,
        adoption_colors: charts.adoption_colors.clone(),
        region_colors: charts.region_colors.clone(),
        specialty_colors: charts.specialty_colors.clone(),
    }
}

/// Query parameters selecting the active filters
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Region name, or the all-regions label
    pub region: Option<String>,
    /// Specialty name, or the all-specialties label
    pub specialty: Option<String>,
}

impl FilterQuery {
    fn filters(&self, labels: &FilterLabels) -> Filters {
        Filters::from_query(self.region.as_deref(), self.specialty.as_deref(), labels)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// JSON error body for the API routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Dataset failure mapped onto an HTTP status for the JSON API
#[derive(Debug)]
pub struct ApiError(pub AdoptionError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdoptionError::DataNotFound { .. } => StatusCode::NOT_FOUND,
            AdoptionError::DataLoad { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: page::load_error_message(&self.0),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the dashboard router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/views", get(dashboard_views))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Render the dashboard page for the requested filters
async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Html<String> {
    let table = match state.cache.get().await {
        Ok(table) => table,
        Err(e) => {
            error!(error = %e, "Dataset unavailable");
            return Html(page::render_error(
                &state.dashboard,
                &page::load_error_message(&e),
            ));
        }
    };

    let views = compute_views(&table, &query.filters(&state.labels()));
    let charts = render_dashboard_charts(&views, &state.charts);
    Html(page::render_dashboard(
        &state.dashboard,
        &views,
        &charts,
        table.dropped_rows(),
    ))
}

/// Computed views as JSON
async fn dashboard_views(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardViews>, ApiError> {
    let table = state.cache.get().await.map_err(|e| {
        warn!(error = %e, "Dataset unavailable for API request");
        ApiError(e)
    })?;

    Ok(Json(compute_views(&table, &query.filters(&state.labels()))))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Bind the listener and serve until Ctrl-C
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}
