use crate::conf::MiningConfig;
use crate::encoder::{TransactionEncoder, TransactionMatrix};
use crate::export::{RuleEdge, RulePoint, SupportBar, rule_edges, rule_scatter, support_bars};
use crate::itemset::FrequentItemsets;
use crate::metrics::MetricCalculator;
use crate::miner::Apriori;
use crate::rules::{RankedRuleList, RuleGenerator};
use crate::threshold::{ThresholdPolicy, VolumeThreshold};
use miner_api::api::{MineError, Miner};
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

/// Everything a mining run produces.
#[derive(Clone, Debug, Serialize)]
pub struct MiningReport {
    pub min_support: f64,
    #[serde(serialize_with = "serialize_frequent")]
    pub frequent_itemsets: FrequentItemsets,
    pub rules: RankedRuleList,
}

fn serialize_frequent<S>(frequent: &FrequentItemsets, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(frequent.iter())
}

impl MiningReport {
    pub fn support_bars(&self) -> Vec<SupportBar> {
        support_bars(&self.frequent_itemsets)
    }

    pub fn rule_scatter(&self) -> Vec<RulePoint> {
        rule_scatter(&self.rules)
    }

    pub fn rule_edges(&self) -> Vec<RuleEdge> {
        rule_edges(&self.rules)
    }
}

/// Encoder, threshold policy, Apriori, rule generation and scoring in one run.
pub struct AssociationMiner {
    pub config: MiningConfig,
    policy: Box<dyn ThresholdPolicy>,
}

impl Default for AssociationMiner {
    fn default() -> Self {
        AssociationMiner::new(MiningConfig::default())
    }
}

impl AssociationMiner {
    pub fn new(config: MiningConfig) -> Self {
        AssociationMiner {
            config,
            policy: Box::new(VolumeThreshold::default()),
        }
    }

    /// Replaces the volume policy. Ignored when `config.min_support` is set.
    pub fn with_policy(mut self, policy: impl ThresholdPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn resolve_min_support(&self, n_transactions: usize) -> f64 {
        self.config
            .min_support
            .unwrap_or_else(|| self.policy.min_support(n_transactions))
    }

    pub fn mine_transactions<S: AsRef<str>>(
        &self,
        transactions: &[Vec<S>],
    ) -> Result<MiningReport, MineError> {
        self.config.validate()?;
        let matrix = TransactionEncoder::encode(transactions)?;
        Miner::<TransactionMatrix>::mine(self, &matrix)
    }

    fn apriori(&self, min_support: f64) -> Apriori {
        Apriori::new(min_support)
            .with_max_len(self.config.max_len)
            .with_counting(self.config.counting)
    }

    fn rule_generator(&self) -> RuleGenerator {
        RuleGenerator {
            min_confidence: self.config.min_confidence,
            min_lift: self.config.min_lift,
            min_confidence_secondary: self.config.min_confidence_secondary,
            top_k: self.config.top_k,
        }
    }
}

impl Miner<TransactionMatrix> for AssociationMiner {
    type Output = MiningReport;

    fn _mine_impl(&self, matrix: &TransactionMatrix) -> Result<MiningReport, MineError> {
        self.config.validate()?;
        let min_support = self.resolve_min_support(matrix.n_transactions());
        info!(
            transactions = matrix.n_transactions(),
            items = matrix.n_items(),
            min_support = min_support,
            "Mining association rules"
        );

        let frequent_itemsets = self.apriori(min_support).mine(matrix)?;
        let ranked = self.rule_generator().generate(&frequent_itemsets)?;
        let rules = MetricCalculator::new(self.config.kulczynski).apply(ranked);

        Ok(MiningReport {
            min_support: frequent_itemsets.min_support(),
            frequent_itemsets,
            rules,
        })
    }
}

impl Miner<DataFrame> for AssociationMiner {
    type Output = MiningReport;

    fn _mine_impl(&self, df: &DataFrame) -> Result<MiningReport, MineError> {
        let matrix = TransactionMatrix::from_dataframe(df)?;
        Miner::<TransactionMatrix>::mine(self, &matrix)
    }
}
