//! Crop Advisor Rust Implementation
//!
//! Agronomic recommendation engine for farmers:
//! - `catalog`: static crop, price, fallback, and disease tables
//! - `scorer`: crop suitability ranking against soil and climate readings
//! - `market`: seasonal commodity price estimation with bounded noise
//! - `disease`: randomized disease advisory picker
//!
//! The optional `api` feature adds an Axum HTTP server over the engine.

pub mod catalog;
pub mod disease;
pub mod market;
pub mod scorer;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{CatalogError, CropProfile, PriceProfile};
pub use disease::{DiseaseAdvisor, DiseaseReport};
pub use market::{PriceEstimate, PriceEstimator};
pub use scorer::{Recommendation, ScoredCrop, SuitabilityScorer};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
