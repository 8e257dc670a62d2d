use polars::prelude::*;
use thiserror::Error;

/// Errors surfaced by a mining run.
///
/// An empty result (no frequent itemsets, no surviving rules) is not an
/// error and is never reported through this type.
#[derive(Debug, Error)]
pub enum MineError {
    /// No transactions were supplied, so no universe can be formed.
    #[error("Empty dataset: at least one transaction is required")]
    EmptyDataset,

    /// Input or parameter rejected before mining started.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A downward-closure invariant was violated during mining or rule generation.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// A metric denominator was zero or non-finite.
    #[error("Degenerate metric: {0}")]
    DegenerateMetric(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl MineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn internal_inconsistency(message: impl Into<String>) -> Self {
        Self::InternalInconsistency(message.into())
    }

    pub fn degenerate_metric(message: impl Into<String>) -> Self {
        Self::DegenerateMetric(message.into())
    }
}

pub trait Miner<Input: ?Sized>: Sized {
    type Output;

    fn mine(&self, input: &Input) -> Result<Self::Output, MineError> {
        self._mine_impl(input)
    }

    fn _mine_impl(&self, _input: &Input) -> Result<Self::Output, MineError> {
        // Default implementation can be overridden by specific miners
        Err(MineError::invalid_input(
            "Default mine implementation not provided",
        ))
    }
}
