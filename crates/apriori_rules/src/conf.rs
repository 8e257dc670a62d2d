use crate::counting::CountingStrategy;
use crate::metrics::KulczynskiMode;
use miner_api::api::MineError;
use serde::{Deserialize, Serialize};

pub const SUPPORT_VOLUME_CUTOFF: usize = 500;
pub const SMALL_DATASET_MIN_SUPPORT: f64 = 0.3;
pub const LARGE_DATASET_MIN_SUPPORT: f64 = 0.1;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_MIN_LIFT: f64 = 1.2;
pub const DEFAULT_MIN_CONFIDENCE_SECONDARY: f64 = 0.6;
pub const DEFAULT_TOP_K: usize = 10;

/// Recognized options of a mining run.
///
/// Missing fields fall back to the defaults above when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Overrides the threshold policy when set.
    pub min_support: Option<f64>,
    pub min_confidence: f64,
    pub min_lift: f64,
    pub min_confidence_secondary: f64,
    pub top_k: usize,
    pub max_len: Option<usize>,
    pub counting: CountingStrategy,
    pub kulczynski: KulczynskiMode,
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            min_support: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_lift: DEFAULT_MIN_LIFT,
            min_confidence_secondary: DEFAULT_MIN_CONFIDENCE_SECONDARY,
            top_k: DEFAULT_TOP_K,
            max_len: None,
            counting: CountingStrategy::default(),
            kulczynski: KulczynskiMode::default(),
        }
    }
}

impl MiningConfig {
    pub fn from_json(json: &str) -> Result<Self, MineError> {
        let config: MiningConfig = serde_json::from_str(json)
            .map_err(|e| MineError::invalid_input(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MineError> {
        if let Some(min_support) = self.min_support {
            check_min_support(min_support)?;
        }
        check_unit_interval("min_confidence", self.min_confidence)?;
        check_unit_interval("min_confidence_secondary", self.min_confidence_secondary)?;
        if self.min_lift.is_nan() || self.min_lift < 0.0 {
            return Err(MineError::invalid_input(format!(
                "min_lift must be a non-negative number, got {}",
                self.min_lift
            )));
        }
        if self.max_len == Some(0) {
            return Err(MineError::invalid_input("max_len must be at least 1"));
        }
        Ok(())
    }
}

/// Values above 1 are accepted and simply mine nothing.
pub fn check_min_support(min_support: f64) -> Result<(), MineError> {
    if min_support.is_nan() || min_support <= 0.0 {
        return Err(MineError::invalid_input(format!(
            "min_support must be > 0, got {}",
            min_support
        )));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), MineError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MineError::invalid_input(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
