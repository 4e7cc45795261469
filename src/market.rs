//! Seasonal Price Estimator - base price x seasonality x bounded noise
//!
//! Unknown crops resolve to the default profile and out-of-range months are
//! clamped; every call answers. The only mutable state is the seedable RNG
//! behind a mutex, so concurrent calls stay statistically well-behaved.

use crate::catalog::{self, CatalogError, PriceProfile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Mutex;

/// Profile used when the requested crop is absent from the catalog.
pub const DEFAULT_CROP: &str = "rice";

/// Uniform noise band applied to the seasonal price (±5%).
const NOISE_MIN: f64 = 0.95;
const NOISE_MAX: f64 = 1.05;

/// Cosmetic confidence range, inclusive.
const CONFIDENCE_MIN: i32 = 85;
const CONFIDENCE_MAX: i32 = 95;

/// Provenance label attached to every estimate.
const SOURCE_LABEL: &str = "Seasonal market analysis";

/// One price estimate, computed per request and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct PriceEstimate {
    /// Requested crop id, lower-cased (even when it fell back to rice).
    pub crop: String,
    /// base x seasonal[month] x noise, rounded to 2 decimals.
    pub predicted_price: f64,
    pub unit: String,
    /// Rendered percentage, e.g. "91%". Not a statistical interval.
    pub confidence: String,
    pub trend: String,
    pub advice: String,
    pub source: String,
}

/// Seasonal price estimator over the builtin commodity catalog.
pub struct PriceEstimator {
    profiles: FxHashMap<String, PriceProfile>,
    rng: Mutex<StdRng>,
}

impl PriceEstimator {
    /// Build the estimator with an entropy-seeded RNG.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Build the estimator with a fixed seed. Deterministic; test use.
    pub fn with_seed(seed: u64) -> Result<Self, CatalogError> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Result<Self, CatalogError> {
        Ok(Self {
            profiles: catalog::price_profiles()?,
            rng: Mutex::new(rng),
        })
    }

    /// Estimate the market price for `crop` in calendar `month` (1-12).
    ///
    /// Crop lookup is case-insensitive; unknown crops use the rice profile.
    /// Months outside 1-12 clamp to January / December.
    pub fn estimate(&self, crop: &str, month: i32) -> PriceEstimate {
        let crop = crop.to_lowercase();
        let profile = self
            .profiles
            .get(&crop)
            .unwrap_or_else(|| &self.profiles[DEFAULT_CROP]);

        let month_idx = month.saturating_sub(1).clamp(0, 11) as usize;
        let seasonal = profile.seasonal[month_idx];

        let (noise, confidence) = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            (
                rng.gen_range(NOISE_MIN..=NOISE_MAX),
                rng.gen_range(CONFIDENCE_MIN..=CONFIDENCE_MAX),
            )
        };

        PriceEstimate {
            crop,
            predicted_price: round2(profile.base * seasonal * noise),
            unit: profile.unit.to_string(),
            confidence: format!("{}%", confidence),
            trend: profile.trend.to_string(),
            advice: profile.advice.to_string(),
            source: SOURCE_LABEL.to_string(),
        }
    }
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn estimator() -> PriceEstimator {
        PriceEstimator::new().expect("builtin price catalog must validate")
    }

    #[test]
    fn rice_january_stays_inside_noise_band() {
        let estimate = estimator().estimate("rice", 1);
        // 35 x 1.0 x [0.95, 1.05]
        assert!(estimate.predicted_price >= 33.25);
        assert!(estimate.predicted_price <= 36.75);
        assert_eq!(estimate.unit, "₹/kg");
        assert_eq!(estimate.trend, "stable");
        assert_eq!(estimate.source, "Seasonal market analysis");
    }

    #[test]
    fn unknown_crop_falls_back_to_rice_profile() {
        let estimate = estimator().estimate("durian", 6);
        // Rice June: 35 x 1.08 x [0.95, 1.05]
        assert!(estimate.predicted_price >= 35.91);
        assert!(estimate.predicted_price <= 39.69);
        assert_eq!(estimate.crop, "durian");
        assert_eq!(estimate.unit, "₹/kg");
    }

    #[test]
    fn crop_lookup_is_case_insensitive() {
        let estimate = estimator().estimate("PEPPER", 1);
        assert_eq!(estimate.crop, "pepper");
        assert_eq!(estimate.trend, "volatile");
        // 450 x 1.15 x [0.95, 1.05]
        assert!(estimate.predicted_price >= 491.62);
        assert!(estimate.predicted_price <= 543.38);
    }

    #[test]
    fn out_of_range_months_clamp_to_calendar_edges() {
        // Same seed twice: the only input difference is the clamped month,
        // so clamped pairs must produce identical estimates.
        let low_a = PriceEstimator::with_seed(7).unwrap().estimate("tomato", 0);
        let low_b = PriceEstimator::with_seed(7).unwrap().estimate("tomato", 1);
        assert_relative_eq!(low_a.predicted_price, low_b.predicted_price);

        let high_a = PriceEstimator::with_seed(7).unwrap().estimate("tomato", 13);
        let high_b = PriceEstimator::with_seed(7).unwrap().estimate("tomato", 12);
        assert_relative_eq!(high_a.predicted_price, high_b.predicted_price);
    }

    #[test]
    fn extreme_month_values_do_not_panic() {
        let january = PriceEstimator::with_seed(3).unwrap().estimate("rice", i32::MIN);
        let december = PriceEstimator::with_seed(3).unwrap().estimate("rice", i32::MAX);
        assert!(january.predicted_price >= 33.25 && january.predicted_price <= 36.75);
        // Rice December: 35 x 0.95 x [0.95, 1.05]
        assert!(december.predicted_price >= 31.58 && december.predicted_price <= 34.92);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let a = PriceEstimator::with_seed(42).unwrap().estimate("wheat", 3);
        let b = PriceEstimator::with_seed(42).unwrap().estimate("wheat", 3);
        assert_eq!(a.predicted_price, b.predicted_price);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn confidence_renders_as_bounded_percentage() {
        let estimate = estimator().estimate("maize", 5);
        let digits = estimate.confidence.strip_suffix('%').expect("percent suffix");
        let value: i32 = digits.parse().expect("integer percentage");
        assert!((85..=95).contains(&value));
    }

    #[test]
    fn price_is_rounded_to_two_decimals() {
        let estimate = estimator().estimate("arecanut", 2);
        let scaled = estimate.predicted_price * 100.0;
        assert_relative_eq!(scaled, scaled.round(), epsilon = 1e-6);
    }
}
