//! Static catalogs backing crop recommendation and price estimation.
//!
//! Holds the crop suitability profiles, the soil-keyed fallback lists, the
//! seasonal price profiles, and the disease remedy table. All tables are
//! built once at startup and never mutated; range invariants are checked
//! during construction so request handling never sees a malformed entry.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Catalog construction failures. These can only surface at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("crop '{crop}': {band} range is inverted ({min} > {max})")]
    InvertedRange {
        crop: String,
        band: &'static str,
        min: f64,
        max: f64,
    },

    #[error("price profile '{crop}': seasonal multiplier {value} at month index {index} is not positive")]
    NonPositiveMultiplier {
        crop: String,
        index: usize,
        value: f64,
    },
}

/// One entry of the crop suitability catalog.
///
/// Climate bands are inclusive at both ends. Catalog order is significant:
/// it is the tie-break for equal suitability scores.
#[derive(Debug, Clone)]
pub struct CropProfile {
    pub name: &'static str,
    /// Soil types this crop grows in (exact, case-sensitive match).
    pub soils: &'static [&'static str],
    /// Temperature band in degrees Celsius.
    pub temp_c: (f64, f64),
    /// Annual rainfall band in millimetres.
    pub rainfall_mm: (f64, f64),
    /// Relative humidity band in percent.
    pub humidity_pct: (f64, f64),
}

impl CropProfile {
    /// Check the min <= max invariant on every climate band.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (band, (min, max)) in [
            ("temperature", self.temp_c),
            ("rainfall", self.rainfall_mm),
            ("humidity", self.humidity_pct),
        ] {
            if min > max {
                return Err(CatalogError::InvertedRange {
                    crop: self.name.to_string(),
                    band,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Build the crop suitability catalog.
///
/// Returns profiles in ranking tie-break order.
pub fn crop_profiles() -> Result<Vec<CropProfile>, CatalogError> {
    let profiles = vec![
        CropProfile { name: "Rice",       soils: &["Clay", "Loamy"],  temp_c: (20.0, 35.0), rainfall_mm: (100.0, 200.0), humidity_pct: (60.0, 90.0) },
        CropProfile { name: "Wheat",      soils: &["Loamy", "Clay"],  temp_c: (10.0, 25.0), rainfall_mm: (50.0, 100.0),  humidity_pct: (40.0, 70.0) },
        CropProfile { name: "Maize",      soils: &["Loamy", "Sandy"], temp_c: (18.0, 32.0), rainfall_mm: (60.0, 120.0),  humidity_pct: (50.0, 80.0) },
        CropProfile { name: "Cotton",     soils: &["Black", "Loamy"], temp_c: (21.0, 35.0), rainfall_mm: (50.0, 100.0),  humidity_pct: (40.0, 70.0) },
        CropProfile { name: "Sugarcane",  soils: &["Clay", "Loamy"],  temp_c: (20.0, 35.0), rainfall_mm: (100.0, 180.0), humidity_pct: (60.0, 85.0) },
        CropProfile { name: "Groundnut",  soils: &["Sandy", "Red"],   temp_c: (20.0, 30.0), rainfall_mm: (50.0, 80.0),   humidity_pct: (50.0, 75.0) },
        CropProfile { name: "Millet",     soils: &["Sandy", "Red"],   temp_c: (25.0, 40.0), rainfall_mm: (30.0, 70.0),   humidity_pct: (30.0, 60.0) },
        CropProfile { name: "Vegetables", soils: &["Loamy"],          temp_c: (15.0, 30.0), rainfall_mm: (60.0, 120.0),  humidity_pct: (50.0, 80.0) },
        CropProfile { name: "Pulses",     soils: &["Red", "Loamy"],   temp_c: (20.0, 30.0), rainfall_mm: (40.0, 80.0),   humidity_pct: (40.0, 70.0) },
        CropProfile { name: "Potato",     soils: &["Sandy", "Loamy"], temp_c: (15.0, 25.0), rainfall_mm: (50.0, 100.0),  humidity_pct: (50.0, 80.0) },
        CropProfile { name: "Banana",     soils: &["Loamy", "Clay"],  temp_c: (20.0, 35.0), rainfall_mm: (100.0, 200.0), humidity_pct: (60.0, 90.0) },
        CropProfile { name: "Coconut",    soils: &["Sandy", "Red"],   temp_c: (25.0, 35.0), rainfall_mm: (100.0, 250.0), humidity_pct: (60.0, 90.0) },
    ];

    for profile in &profiles {
        profile.validate()?;
    }

    Ok(profiles)
}

/// Default shortlist for soils absent from the fallback table.
pub const DEFAULT_FALLBACK: &[&str] = &["Rice", "Wheat", "Maize"];

/// Soil type -> ordered crop names, consulted when no crop scores above zero.
pub fn soil_fallbacks() -> FxHashMap<&'static str, &'static [&'static str]> {
    let mut table: FxHashMap<&'static str, &'static [&'static str]> = FxHashMap::default();
    table.insert("Clay", &["Rice", "Sugarcane", "Wheat"] as &[_]);
    table.insert("Loamy", &["Wheat", "Maize", "Vegetables", "Cotton"] as &[_]);
    table.insert("Sandy", &["Groundnut", "Millet", "Potato"] as &[_]);
    table.insert("Black", &["Cotton", "Sugarcane", "Millets"] as &[_]);
    table.insert("Red", &["Groundnut", "Pulses", "Millets"] as &[_]);
    table
}

/// Seasonal price profile for one commodity.
#[derive(Debug, Clone)]
pub struct PriceProfile {
    /// Base price in the profile's unit.
    pub base: f64,
    /// Per-month multipliers, index 0 = January.
    pub seasonal: [f64; 12],
    pub trend: &'static str,
    pub unit: &'static str,
    pub advice: &'static str,
}

impl PriceProfile {
    /// Check that every seasonal multiplier is positive.
    pub fn validate(&self, crop: &str) -> Result<(), CatalogError> {
        for (index, &value) in self.seasonal.iter().enumerate() {
            if value <= 0.0 {
                return Err(CatalogError::NonPositiveMultiplier {
                    crop: crop.to_string(),
                    index,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Build the commodity price catalog, keyed by lower-case crop id.
pub fn price_profiles() -> Result<FxHashMap<String, PriceProfile>, CatalogError> {
    let entries: [(&str, PriceProfile); 11] = [
        ("rice",     PriceProfile { base: 35.0,  seasonal: [1.0, 0.95, 0.98, 1.02, 1.05, 1.08, 1.10, 1.07, 1.03, 1.0, 0.97, 0.95],  trend: "stable",          unit: "₹/kg",    advice: "Market stable." }),
        ("wheat",    PriceProfile { base: 28.0,  seasonal: [1.02, 1.0, 0.97, 0.95, 0.98, 1.02, 1.05, 1.07, 1.05, 1.02, 1.0, 0.98],  trend: "stable",          unit: "₹/kg",    advice: "Stable market." }),
        ("tomato",   PriceProfile { base: 25.0,  seasonal: [0.8, 0.85, 0.9, 1.1, 1.3, 1.5, 1.4, 1.2, 1.0, 0.9, 0.85, 0.8],          trend: "highly volatile", unit: "₹/kg",    advice: "Sell May-July." }),
        ("potato",   PriceProfile { base: 22.0,  seasonal: [0.9, 0.92, 0.95, 1.05, 1.15, 1.2, 1.18, 1.1, 1.02, 0.95, 0.9, 0.88],    trend: "slightly up",     unit: "₹/kg",    advice: "Wait a month." }),
        ("onion",    PriceProfile { base: 30.0,  seasonal: [0.7, 0.75, 0.85, 1.1, 1.4, 1.6, 1.5, 1.3, 1.1, 0.9, 0.8, 0.75],         trend: "highly volatile", unit: "₹/kg",    advice: "Check local mandi." }),
        ("maize",    PriceProfile { base: 20.0,  seasonal: [1.0, 0.98, 0.97, 0.99, 1.02, 1.05, 1.07, 1.06, 1.03, 1.01, 1.0, 0.99],  trend: "stable",          unit: "₹/kg",    advice: "Sell anytime." }),
        ("arecanut", PriceProfile { base: 370.0, seasonal: [1.12, 1.10, 1.08, 1.05, 1.00, 0.95, 0.90, 0.92, 0.95, 1.00, 1.05, 1.10], trend: "strong uptrend",  unit: "₹/kg",    advice: "Sell Jan-Mar." }),
        ("cocoa",    PriceProfile { base: 120.0, seasonal: [1.05, 1.02, 0.98, 0.95, 0.92, 0.90, 0.92, 0.98, 1.05, 1.10, 1.12, 1.08], trend: "rising",          unit: "₹/kg",    advice: "Sell to cooperatives." }),
        ("pepper",   PriceProfile { base: 450.0, seasonal: [1.15, 1.12, 1.08, 1.02, 0.98, 0.95, 0.90, 0.92, 0.98, 1.05, 1.10, 1.12], trend: "volatile",        unit: "₹/kg",    advice: "Monitor international markets." }),
        ("banana",   PriceProfile { base: 35.0,  seasonal: [0.95, 0.98, 1.05, 1.20, 1.15, 1.10, 0.95, 0.88, 0.85, 0.90, 0.95, 0.98], trend: "seasonal",        unit: "₹/dozen", advice: "Festival demand." }),
        ("coconut",  PriceProfile { base: 25.0,  seasonal: [0.95, 0.98, 1.05, 1.10, 1.08, 1.02, 0.98, 0.95, 0.98, 1.02, 0.98, 0.92], trend: "stable",          unit: "₹/nut",   advice: "Copra influences price." }),
    ];

    let mut table = FxHashMap::default();
    for (crop, profile) in entries {
        profile.validate(crop)?;
        table.insert(crop.to_string(), profile);
    }

    Ok(table)
}

/// One entry of the disease remedy table.
#[derive(Debug, Clone)]
pub struct DiseaseRemedy {
    pub name: &'static str,
    pub solution: &'static str,
    pub prevention: &'static str,
}

/// The mock disease advisory database.
pub fn disease_remedies() -> Vec<DiseaseRemedy> {
    vec![
        DiseaseRemedy { name: "Tomato Early Blight", solution: "Apply copper fungicide",      prevention: "Avoid overhead watering" },
        DiseaseRemedy { name: "Tomato Late Blight",  solution: "Use copper-based fungicides", prevention: "Good air circulation" },
        DiseaseRemedy { name: "Potato Early Blight", solution: "Spray chlorothalonil",        prevention: "Remove infected debris" },
        DiseaseRemedy { name: "Corn Common Rust",    solution: "Apply sulfur fungicide",      prevention: "Use resistant hybrids" },
        DiseaseRemedy { name: "Rice Blast",          solution: "Use tricyclazole",            prevention: "Avoid excess nitrogen" },
        DiseaseRemedy { name: "Healthy Plant",       solution: "No treatment",                prevention: "Continue good practices" },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_crop_catalog_is_valid() {
        let profiles = crop_profiles().expect("builtin catalog must validate");
        assert_eq!(profiles.len(), 12);
        assert_eq!(profiles[0].name, "Rice");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let profile = CropProfile {
            name: "Backwards",
            soils: &["Loamy"],
            temp_c: (30.0, 10.0),
            rainfall_mm: (0.0, 100.0),
            humidity_pct: (0.0, 100.0),
        };
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvertedRange { band: "temperature", .. }));
    }

    #[test]
    fn builtin_price_catalog_is_valid() {
        let table = price_profiles().expect("builtin price table must validate");
        assert_eq!(table.len(), 11);
        assert_eq!(table["rice"].base, 35.0);
        assert_eq!(table["rice"].seasonal[0], 1.0);
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let profile = PriceProfile {
            base: 10.0,
            seasonal: [1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            trend: "stable",
            unit: "₹/kg",
            advice: "n/a",
        };
        let err = profile.validate("broken").unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveMultiplier { index: 2, .. }));
    }

    #[test]
    fn fallback_table_covers_catalog_soils() {
        let table = soil_fallbacks();
        for soil in ["Clay", "Loamy", "Sandy", "Black", "Red"] {
            assert!(!table[soil].is_empty());
        }
    }
}
