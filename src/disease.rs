//! Disease Advisor - randomized pick from the mock remedy table
//!
//! Stand-in for a real classifier: draws a uniform entry from the remedy
//! table and attaches a cosmetic confidence figure. Shares the seedable
//! RNG-behind-a-mutex pattern with the price estimator.

use crate::catalog::{self, DiseaseRemedy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Mutex;

/// Cosmetic confidence range, one decimal place.
const CONFIDENCE_MIN: f64 = 85.0;
const CONFIDENCE_MAX: f64 = 99.9;

/// One advisory, computed per request.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseReport {
    pub name: String,
    /// Rendered percentage, e.g. "92.3%".
    pub confidence: String,
    pub solution: String,
    pub prevention: String,
}

pub struct DiseaseAdvisor {
    remedies: Vec<DiseaseRemedy>,
    rng: Mutex<StdRng>,
}

impl DiseaseAdvisor {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Fixed-seed constructor for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            remedies: catalog::disease_remedies(),
            rng: Mutex::new(rng),
        }
    }

    /// Draw one advisory from the remedy table.
    pub fn diagnose(&self) -> DiseaseReport {
        let (index, confidence) = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            (
                rng.gen_range(0..self.remedies.len()),
                rng.gen_range(CONFIDENCE_MIN..=CONFIDENCE_MAX),
            )
        };
        let remedy = &self.remedies[index];

        DiseaseReport {
            name: remedy.name.to_string(),
            confidence: format!("{:.1}%", confidence),
            solution: remedy.solution.to_string(),
            prevention: remedy.prevention.to_string(),
        }
    }
}

impl Default for DiseaseAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
