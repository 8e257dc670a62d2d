use crate::conf::{LARGE_DATASET_MIN_SUPPORT, SMALL_DATASET_MIN_SUPPORT, SUPPORT_VOLUME_CUTOFF};
use serde::{Deserialize, Serialize};

/// Maps the number of transactions to a minimum support fraction.
pub trait ThresholdPolicy: Send + Sync {
    fn min_support(&self, n_transactions: usize) -> f64;
}

// Any plain function of the transaction count is a policy
impl<F> ThresholdPolicy for F
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    fn min_support(&self, n_transactions: usize) -> f64 {
        self(n_transactions)
    }
}

/// Coarse two-step heuristic: a higher floor for small collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeThreshold {
    pub cutoff: usize,
    pub below_cutoff: f64,
    pub at_or_above_cutoff: f64,
}

impl Default for VolumeThreshold {
    fn default() -> Self {
        VolumeThreshold {
            cutoff: SUPPORT_VOLUME_CUTOFF,
            below_cutoff: SMALL_DATASET_MIN_SUPPORT,
            at_or_above_cutoff: LARGE_DATASET_MIN_SUPPORT,
        }
    }
}

impl ThresholdPolicy for VolumeThreshold {
    fn min_support(&self, n_transactions: usize) -> f64 {
        if n_transactions < self.cutoff {
            self.below_cutoff
        } else {
            self.at_or_above_cutoff
        }
    }
}

/// Same support regardless of volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedThreshold(pub f64);

impl ThresholdPolicy for FixedThreshold {
    fn min_support(&self, _n_transactions: usize) -> f64 {
        self.0
    }
}

/// Default volume policy applied to a transaction count.
pub fn min_support(n_transactions: usize) -> f64 {
    VolumeThreshold::default().min_support(n_transactions)
}
