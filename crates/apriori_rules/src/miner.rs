use crate::candidate::CandidateSet;
use crate::conf::check_min_support;
use crate::counting::{CountingStrategy, SupportCounter};
use crate::encoder::TransactionMatrix;
use crate::itemset::{FrequentItemsets, FrequentLevel};
use miner_api::api::{MineError, Miner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Level-wise frequent itemset miner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Apriori {
    pub min_support: f64,
    /// Largest itemset size to mine; unbounded when None.
    pub max_len: Option<usize>,
    pub counting: CountingStrategy,
}

impl Apriori {
    pub fn new(min_support: f64) -> Self {
        Apriori {
            min_support,
            max_len: None,
            counting: CountingStrategy::default(),
        }
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_counting(mut self, counting: CountingStrategy) -> Self {
        self.counting = counting;
        self
    }

    /// Mines with a caller-supplied counter instead of the configured strategy.
    ///
    /// `universe` must be strictly increasing, as produced by the encoder;
    /// lookups by item token binary-search it.
    pub fn mine_with_counter(
        &self,
        universe: Arc<Vec<String>>,
        counter: &dyn SupportCounter,
    ) -> Result<FrequentItemsets, MineError> {
        check_min_support(self.min_support)?;
        if self.max_len == Some(0) {
            return Err(MineError::invalid_input("max_len must be at least 1"));
        }
        if !universe.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(MineError::invalid_input(
                "universe must be sorted and free of duplicates",
            ));
        }
        let n_transactions = counter.n_transactions();
        if n_transactions == 0 {
            return Err(MineError::EmptyDataset);
        }

        let mut frequent = FrequentItemsets::new(
            Arc::clone(&universe),
            n_transactions,
            self.min_support,
        );
        let mut candidates = CandidateSet::singletons(universe.len());

        while !candidates.is_empty() {
            let k = candidates.level();
            if self.max_len.is_some_and(|max_len| k > max_len) {
                break;
            }

            let counts = counter.count_all(&candidates);
            let n_candidates = candidates.len();
            let mut level = FrequentLevel {
                level: k,
                ..Default::default()
            };
            for (itemset, count) in candidates.into_itemsets().into_iter().zip(counts) {
                if frequent.support_from_count(count) >= self.min_support {
                    level.itemsets.push(itemset);
                    level.counts.push(count);
                }
            }
            debug!(
                level = k,
                candidates = n_candidates,
                frequent = level.len(),
                "Counted Apriori level"
            );

            if level.is_empty() {
                break;
            }
            candidates = CandidateSet::generate(&level);
            frequent.push_level(level);
        }

        Ok(frequent)
    }
}

impl Miner<TransactionMatrix> for Apriori {
    type Output = FrequentItemsets;

    fn _mine_impl(&self, matrix: &TransactionMatrix) -> Result<FrequentItemsets, MineError> {
        let counter = self.counting.build(matrix)?;
        self.mine_with_counter(Arc::clone(matrix.universe()), counter.as_ref())
    }
}
