// Axum API server over the recommendation engine.
//
// Thin request/response marshaling only: defaults, JSON shapes, and caching
// live here; all decision logic stays in the core modules.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use moka::future::Cache;

use std::sync::Arc;
use std::time::Duration;

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::disease::DiseaseAdvisor;
use crate::market::{PriceEstimator, DEFAULT_CROP};
use crate::scorer::{Recommendation, SuitabilityScorer};

/// Note attached to fallback recommendations so clients can render
/// different messaging.
const FALLBACK_NOTE: &str = "Soil-based recommendation (climate parameters suboptimal)";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<SuitabilityScorer>,
    pub estimator: Arc<PriceEstimator>,
    pub diseases: Arc<DiseaseAdvisor>,
    /// Response cache for deterministic recommendation queries. Price and
    /// disease responses are never cached: their noise is drawn per call.
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        tracing::info!("Initializing suitability scorer...");
        let scorer = Arc::new(SuitabilityScorer::new()?);

        tracing::info!("Initializing price estimator...");
        let estimator = Arc::new(PriceEstimator::new()?);

        tracing::info!("Initializing disease advisor...");
        let diseases = Arc::new(DiseaseAdvisor::new());

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Ok(Self {
            scorer,
            estimator,
            diseases,
            cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Engine endpoints (JSON API)
        .route("/api/crops/recommend", post(recommend_crops))
        .route("/api/market/price", post(estimate_price))
        .route("/api/disease/diagnose", post(diagnose_disease))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Crop recommendation. Missing climate fields take the documented
/// defaults (25 °C, 100 mm, 60 %).
async fn recommend_crops(
    State(state): State<AppState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = format!(
        "recommend:{}:{}:{}:{}",
        payload.soil, payload.temperature, payload.rainfall, payload.humidity
    );

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for recommendation query");
        return Ok(Json(cached));
    }

    let scorer = state.scorer.clone();
    let RecommendRequest {
        soil,
        temperature,
        rainfall,
        humidity,
    } = payload;

    tracing::debug!("Scoring crops for soil '{}'", soil);
    let recommendation = tokio::task::spawn_blocking(move || {
        scorer.score(&soil, temperature, rainfall, humidity)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let result = match recommendation {
        Recommendation::Ranked(crops) => {
            let names: Vec<&str> = crops.iter().map(|c| c.name.as_str()).collect();
            serde_json::json!({ "crops": names })
        }
        Recommendation::SoilFallback(names) => serde_json::json!({
            "crops": names,
            "note": FALLBACK_NOTE,
        }),
    };

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

/// Price estimate. Defaults: crop "rice", month 1 (January).
async fn estimate_price(
    State(state): State<AppState>,
    Json(payload): Json<PriceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let estimator = state.estimator.clone();

    tracing::debug!("Estimating price for '{}' month {}", payload.crop, payload.month);
    let estimate = tokio::task::spawn_blocking(move || {
        estimator.estimate(&payload.crop, payload.month)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let result = serde_json::to_value(&estimate)
        .map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))?;

    Ok(Json(result))
}

/// Mock disease advisory: a random remedy table entry.
async fn diagnose_disease(State(state): State<AppState>) -> Json<serde_json::Value> {
    let report = state.diseases.diagnose();
    tracing::debug!("Disease advisory: {}", report.name);
    Json(serde_json::json!({
        "name": report.name,
        "confidence": report.confidence,
        "solution": report.solution,
        "prevention": report.prevention,
    }))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, serde::Deserialize)]
struct RecommendRequest {
    soil: String,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_rainfall")]
    rainfall: f64,
    #[serde(default = "default_humidity")]
    humidity: f64,
}

fn default_temperature() -> f64 {
    25.0
}

fn default_rainfall() -> f64 {
    100.0
}

fn default_humidity() -> f64 {
    60.0
}

#[derive(Debug, serde::Deserialize)]
struct PriceRequest {
    #[serde(default = "default_crop")]
    crop: String,
    #[serde(default = "default_month")]
    month: i32,
}

fn default_crop() -> String {
    DEFAULT_CROP.to_string()
}

fn default_month() -> i32 {
    1
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
