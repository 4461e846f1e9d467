//! Request handlers for the JSON API and dashboard pages.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::Html,
    routing::{delete, get, post, put},
};
use binwatch_core::{Alert, AlertId, Bin, BinId, Coordinate, DemoCity};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::pages::Page;
use crate::state::AppState;

/// Body of `POST /api/alerts`.
#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Category; `waste` when absent.
    #[serde(rename = "type", default)]
    pub category: Option<String>,
}

/// Body of `POST /api/bins`.
#[derive(Debug, Deserialize)]
pub struct CreateBinRequest {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Body of `PUT /api/bins/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateBinRequest {
    /// New status; any string is accepted.
    pub status: String,
}

/// Body of `POST /api/demo/initialize`.
#[derive(Debug, Default, Deserialize)]
pub struct InitializeDemoRequest {
    /// City key; unknown or missing keys seed Delhi.
    #[serde(default)]
    pub city: Option<String>,
}

/// Body of `POST /api/gemini`.
#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    /// Prompt forwarded upstream.
    #[serde(default)]
    pub prompt: String,
}

/// `{"success": true}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Response of `POST /api/demo/initialize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoInitializedResponse {
    /// Always `true`.
    pub success: bool,
    /// Bins installed.
    pub bins: usize,
    /// Alerts installed.
    pub alerts: usize,
    /// City the request resolved to.
    pub city: DemoCity,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Live alert count.
    pub alerts: usize,
    /// Live bin count.
    pub bins: usize,
}

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts).post(create_alert))
        .route("/alerts/:id", delete(delete_alert))
        .route("/bins", get(list_bins).post(create_bin))
        .route("/bins/:id", put(update_bin))
        .route("/demo/initialize", post(initialize_demo))
        .route("/demo/clear", post(clear_demo))
        .route("/gemini", post(generate_insight))
}

async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.service.alerts())
}

async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>,
) -> Json<Alert> {
    let position = Coordinate::new(request.lat, request.lng);
    Json(state.service.report_alert(position, request.category))
}

/// Always succeeds; ids that do not parse simply match nothing.
async fn delete_alert(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Json<SuccessResponse> {
    match raw_id.parse::<AlertId>() {
        Ok(id) => {
            state.service.dismiss_alert(id);
        }
        Err(_) => debug!(%raw_id, "ignoring delete for non-numeric alert id"),
    }
    SuccessResponse::ok()
}

async fn list_bins(State(state): State<AppState>) -> Json<Vec<Bin>> {
    Json(state.service.bins())
}

async fn create_bin(
    State(state): State<AppState>,
    Json(request): Json<CreateBinRequest>,
) -> Json<Bin> {
    Json(state.service.register_bin(Coordinate::new(request.lat, request.lng)))
}

async fn update_bin(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<UpdateBinRequest>,
) -> Result<Json<Bin>, ApiError> {
    let id = raw_id
        .parse::<BinId>()
        .map_err(|_err| ApiError::BinNotFound)?;
    let bin = state.service.set_bin_status(id, request.status)?;
    Ok(Json(bin))
}

/// A request without a JSON body seeds the fallback city. A body that is
/// not valid JSON, or has the wrong shape, is rejected before any data changes.
async fn initialize_demo(
    State(state): State<AppState>,
    body: Result<Json<InitializeDemoRequest>, JsonRejection>,
) -> Result<Json<DemoInitializedResponse>, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => InitializeDemoRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let summary = state
        .service
        .initialize_demo(&request.city.unwrap_or_default());
    Ok(Json(DemoInitializedResponse {
        success: true,
        bins: summary.bins,
        alerts: summary.alerts,
        city: summary.city,
    }))
}

async fn clear_demo(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.service.clear_demo();
    SuccessResponse::ok()
}

async fn generate_insight(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Result<Json<Value>, ApiError> {
    let response = state.insight.generate(&request.prompt).await?;
    Ok(Json(response))
}

/// `GET /`.
pub async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    state.pages.render(Page::Dashboard).await.map(Html)
}

/// `GET /control`.
pub async fn control_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    state.pages.render(Page::Control).await.map(Html)
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        alerts: state.service.alert_count(),
        bins: state.service.bin_count(),
    })
}
