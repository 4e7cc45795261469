//! Suitability Scorer - ranks the crop catalog against soil and climate
//!
//! Scoring is a pure function of the inputs: no randomness, no I/O, no
//! mutable state. Concurrent calls share the read-only catalog without
//! coordination.

use crate::catalog::{self, CatalogError, CropProfile, DEFAULT_FALLBACK};
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Points awarded per satisfied climate band.
const TEMPERATURE_POINTS: u32 = 40;
const RAINFALL_POINTS: u32 = 30;
const HUMIDITY_POINTS: u32 = 30;

/// Maximum number of crops in a ranked shortlist.
const MAX_RANKED: usize = 5;

/// One crop with its suitability score (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCrop {
    pub name: String,
    pub score: u32,
}

/// Outcome of a scoring request. Never empty: unknown soils and hopeless
/// climates still produce a fallback shortlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// At least one crop matched soil and scored above zero. At most five
    /// entries, highest score first; catalog order breaks ties.
    Ranked(Vec<ScoredCrop>),
    /// Soil-keyed static shortlist; climate parameters were suboptimal.
    SoilFallback(Vec<String>),
}

impl Recommendation {
    /// Crop names in recommendation order, regardless of variant.
    pub fn crop_names(&self) -> Vec<&str> {
        match self {
            Recommendation::Ranked(crops) => crops.iter().map(|c| c.name.as_str()).collect(),
            Recommendation::SoilFallback(names) => names.iter().map(|n| n.as_str()).collect(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendation::SoilFallback(_))
    }
}

/// Main suitability scorer
pub struct SuitabilityScorer {
    profiles: Vec<CropProfile>,
    fallbacks: FxHashMap<&'static str, &'static [&'static str]>,
}

impl SuitabilityScorer {
    /// Build the scorer over the validated builtin catalogs.
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            profiles: catalog::crop_profiles()?,
            fallbacks: catalog::soil_fallbacks(),
        })
    }

    /// Score the catalog against one set of readings.
    ///
    /// Soil matching is exact and case-sensitive; an unknown soil simply
    /// matches zero profiles and lands on the default fallback list.
    /// Out-of-range readings (negative rainfall, etc.) are accepted and
    /// fail every band check.
    pub fn score(
        &self,
        soil: &str,
        temperature_c: f64,
        rainfall_mm: f64,
        humidity_pct: f64,
    ) -> Recommendation {
        let mut scored: SmallVec<[ScoredCrop; 12]> = SmallVec::new();

        for profile in &self.profiles {
            if !profile.soils.contains(&soil) {
                continue;
            }
            let score = band_points(profile.temp_c, temperature_c, TEMPERATURE_POINTS)
                + band_points(profile.rainfall_mm, rainfall_mm, RAINFALL_POINTS)
                + band_points(profile.humidity_pct, humidity_pct, HUMIDITY_POINTS);
            if score > 0 {
                scored.push(ScoredCrop {
                    name: profile.name.to_string(),
                    score,
                });
            }
        }

        if scored.is_empty() {
            let names = self
                .fallbacks
                .get(soil)
                .copied()
                .unwrap_or(DEFAULT_FALLBACK);
            return Recommendation::SoilFallback(
                names.iter().map(|n| n.to_string()).collect(),
            );
        }

        // Stable sort: equal scores keep catalog insertion order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(MAX_RANKED);
        Recommendation::Ranked(scored.into_vec())
    }
}

/// Award `points` when `value` lies inside the inclusive band.
fn band_points((min, max): (f64, f64), value: f64, points: u32) -> u32 {
    if value >= min && value <= max {
        points
    } else {
        0
    }
}
