use crate::conf::{
    DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_CONFIDENCE_SECONDARY, DEFAULT_MIN_LIFT, DEFAULT_TOP_K,
};
use crate::itemset::{FrequentItemsets, ItemCode, Itemset};
use crate::metrics::{conviction, jaccard, leverage};
use crate::serde::itemset as itemset_serde;
use core::fmt;
use itertools::Itertools;
use miner_api::api::MineError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// An implication `antecedent -> consequent` between two disjoint itemsets.
///
/// Both sides are held by value; the rule outlives the mining run.
#[derive(Clone, Debug, Serialize)]
pub struct AssociationRule {
    #[serde(serialize_with = "itemset_serde::serialize")]
    antecedent: Itemset,
    #[serde(serialize_with = "itemset_serde::serialize")]
    consequent: Itemset,
    antecedent_support: f64,
    consequent_support: f64,
    support: f64,
    confidence: f64,
    lift: f64,
    leverage: f64,
    conviction: f64,
    jaccard: f64,
    kulczynski: Option<f64>,
}

impl AssociationRule {
    /// Derives every measure from the three supports.
    pub fn from_supports(
        antecedent: Itemset,
        consequent: Itemset,
        antecedent_support: f64,
        consequent_support: f64,
        support: f64,
    ) -> Self {
        let confidence = support / antecedent_support;
        let lift = confidence / consequent_support;
        Self::with_measures(
            antecedent,
            consequent,
            [antecedent_support, consequent_support, support],
            confidence,
            lift,
        )
    }

    /// Derives every measure from transaction counts.
    ///
    /// Confidence and lift take one division each over exact integers;
    /// equal fractions give bit-identical floats.
    pub fn from_counts(
        antecedent: Itemset,
        consequent: Itemset,
        antecedent_count: usize,
        consequent_count: usize,
        count: usize,
        n_transactions: usize,
    ) -> Self {
        let n = n_transactions as f64;
        Self::with_measures(
            antecedent,
            consequent,
            [
                antecedent_count as f64 / n,
                consequent_count as f64 / n,
                count as f64 / n,
            ],
            count_confidence(count, antecedent_count),
            count_lift(count, antecedent_count, consequent_count, n_transactions),
        )
    }

    fn with_measures(
        antecedent: Itemset,
        consequent: Itemset,
        [antecedent_support, consequent_support, support]: [f64; 3],
        confidence: f64,
        lift: f64,
    ) -> Self {
        AssociationRule {
            antecedent,
            consequent,
            antecedent_support,
            consequent_support,
            support,
            confidence,
            lift,
            leverage: leverage(support, antecedent_support, consequent_support),
            conviction: conviction(confidence, consequent_support),
            jaccard: jaccard(support, antecedent_support, consequent_support),
            kulczynski: None,
        }
    }

    pub(crate) fn with_kulczynski(mut self, score: f64) -> Self {
        self.kulczynski = Some(score);
        self
    }

    pub fn antecedent(&self) -> &Itemset {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Itemset {
        &self.consequent
    }

    pub fn antecedent_support(&self) -> f64 {
        self.antecedent_support
    }

    pub fn consequent_support(&self) -> f64 {
        self.consequent_support
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn leverage(&self) -> f64 {
        self.leverage
    }

    pub fn conviction(&self) -> f64 {
        self.conviction
    }

    pub fn jaccard(&self) -> f64 {
        self.jaccard
    }

    /// Set once the rule has gone through the metric calculator.
    pub fn kulczynski(&self) -> Option<f64> {
        self.kulczynski
    }
}

impl fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.antecedent, self.consequent)
    }
}

fn count_confidence(count: usize, antecedent_count: usize) -> f64 {
    count as f64 / antecedent_count as f64
}

// count * n / (count_A * count_C), with products taken in u128
fn count_lift(count: usize, antecedent_count: usize, consequent_count: usize, n: usize) -> f64 {
    let numerator = count as u128 * n as u128;
    let denominator = antecedent_count as u128 * consequent_count as u128;
    numerator as f64 / denominator as f64
}

/// Descending lift, then descending confidence, then antecedent and
/// consequent tokens in lexicographic order.
pub fn rank_order(a: &AssociationRule, b: &AssociationRule) -> Ordering {
    b.lift
        .total_cmp(&a.lift)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.antecedent.cmp(&b.antecedent))
        .then_with(|| a.consequent.cmp(&b.consequent))
}

/// Rules sorted by [`rank_order`] and truncated to a top-k.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RankedRuleList {
    rules: Vec<AssociationRule>,
}

impl RankedRuleList {
    pub fn rank(mut rules: Vec<AssociationRule>, top_k: usize) -> Self {
        rules.sort_by(rank_order);
        rules.truncate(top_k);
        RankedRuleList { rules }
    }

    // Caller guarantees the order is already ranked
    pub(crate) fn from_ranked(rules: Vec<AssociationRule>) -> Self {
        RankedRuleList { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssociationRule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[AssociationRule] {
        &self.rules
    }

    pub fn into_vec(self) -> Vec<AssociationRule> {
        self.rules
    }
}

impl<'a> IntoIterator for &'a RankedRuleList {
    type Item = &'a AssociationRule;
    type IntoIter = std::slice::Iter<'a, AssociationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Every split of `items` into a non-empty proper subset and its complement.
///
/// Antecedents come out by increasing size, lexicographically within a size.
pub fn antecedent_splits(
    items: &[ItemCode],
) -> impl Iterator<Item = (Vec<ItemCode>, Vec<ItemCode>)> + '_ {
    (1..items.len())
        .flat_map(move |size| items.iter().copied().combinations(size))
        .map(move |antecedent| {
            let consequent = items
                .iter()
                .copied()
                .filter(|c| !antecedent.contains(c))
                .collect();
            (antecedent, consequent)
        })
}

/// Enumerates, filters and ranks rules from frequent itemsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleGenerator {
    /// Floor for a rule to be valid at all.
    pub min_confidence: f64,
    /// Interesting rules need a lift strictly above this.
    pub min_lift: f64,
    /// Interesting rules need a confidence strictly above this.
    pub min_confidence_secondary: f64,
    pub top_k: usize,
}

impl Default for RuleGenerator {
    fn default() -> Self {
        RuleGenerator {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_lift: DEFAULT_MIN_LIFT,
            min_confidence_secondary: DEFAULT_MIN_CONFIDENCE_SECONDARY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl RuleGenerator {
    pub fn new(min_confidence: f64) -> Self {
        RuleGenerator {
            min_confidence,
            ..Default::default()
        }
    }

    pub fn generate(&self, frequent: &FrequentItemsets) -> Result<RankedRuleList, MineError> {
        let sources: Vec<(&[ItemCode], usize)> = frequent
            .levels()
            .iter()
            .filter(|level| level.level >= 2)
            .flat_map(|level| level.iter())
            .collect();

        let per_itemset = sources
            .par_iter()
            .map(|&(codes, count)| self.rules_for(frequent, codes, count))
            .collect::<Result<Vec<_>, MineError>>()?;

        let n_valid: usize = per_itemset.iter().map(|(valid, _)| valid).sum();
        let rules: Vec<AssociationRule> = per_itemset
            .into_iter()
            .flat_map(|(_, rules)| rules)
            .collect();
        let n_interesting = rules.len();
        let ranked = RankedRuleList::rank(rules, self.top_k);
        debug!(
            itemsets = sources.len(),
            valid = n_valid,
            interesting = n_interesting,
            kept = ranked.len(),
            "Generated association rules"
        );
        Ok(ranked)
    }

    /// Valid-rule count and the interesting rules derived from one itemset.
    fn rules_for(
        &self,
        frequent: &FrequentItemsets,
        codes: &[ItemCode],
        count: usize,
    ) -> Result<(usize, Vec<AssociationRule>), MineError> {
        let n_transactions = frequent.n_transactions();
        let mut n_valid = 0;
        let mut rules = Vec::new();

        for (antecedent, consequent) in antecedent_splits(codes) {
            let count_a = Self::subset_count(frequent, &antecedent, codes)?;
            let count_c = Self::subset_count(frequent, &consequent, codes)?;

            let confidence = count_confidence(count, count_a);
            if confidence < self.min_confidence {
                continue;
            }
            n_valid += 1;

            let lift = count_lift(count, count_a, count_c, n_transactions);
            if !(lift > self.min_lift && confidence > self.min_confidence_secondary) {
                continue;
            }
            rules.push(AssociationRule::from_counts(
                frequent.itemset(&antecedent),
                frequent.itemset(&consequent),
                count_a,
                count_c,
                count,
                n_transactions,
            ));
        }
        Ok((n_valid, rules))
    }

    fn subset_count(
        frequent: &FrequentItemsets,
        subset: &[ItemCode],
        parent: &[ItemCode],
    ) -> Result<usize, MineError> {
        frequent.count_of(subset).ok_or_else(|| {
            MineError::internal_inconsistency(format!(
                "subset {} of frequent itemset {} has no recorded support",
                frequent.itemset(subset),
                frequent.itemset(parent)
            ))
        })
    }
}
