use crate::rules::{AssociationRule, RankedRuleList};
use miner_api::api::MineError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which Kulczynski expression to compute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KulczynskiMode {
    /// `0.5 * (conf(A->C) / s(C) + conf(A->C) / s(A))`, using the rule's own
    /// confidence in both halves.
    #[default]
    Literal,
    /// Textbook form `0.5 * (conf(A->C) + conf(C->A))`.
    Symmetric,
}

/// Adds the Kulczynski score to ranked rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCalculator {
    pub mode: KulczynskiMode,
}

impl MetricCalculator {
    pub fn new(mode: KulczynskiMode) -> Self {
        MetricCalculator { mode }
    }

    pub fn kulczynski(&self, rule: &AssociationRule) -> Result<f64, MineError> {
        let s_a = rule.antecedent_support();
        let s_c = rule.consequent_support();
        if !(s_a > 0.0 && s_a.is_finite()) {
            return Err(MineError::degenerate_metric(format!(
                "antecedent support of {} is {}",
                rule, s_a
            )));
        }
        if !(s_c > 0.0 && s_c.is_finite()) {
            return Err(MineError::degenerate_metric(format!(
                "consequent support of {} is {}",
                rule, s_c
            )));
        }

        let score = match self.mode {
            KulczynskiMode::Literal => {
                let conf = rule.confidence();
                0.5 * (conf / s_c + conf / s_a)
            }
            KulczynskiMode::Symmetric => {
                let s = rule.support();
                0.5 * (s / s_a + s / s_c)
            }
        };
        if !score.is_finite() {
            return Err(MineError::degenerate_metric(format!(
                "kulczynski of {} is {}",
                rule, score
            )));
        }
        Ok(score)
    }

    /// Scores every rule, keeping rank order. Rules with a degenerate
    /// denominator are logged and dropped.
    pub fn apply(&self, ranked: RankedRuleList) -> RankedRuleList {
        let scored = ranked
            .into_vec()
            .into_iter()
            .filter_map(|rule| match self.kulczynski(&rule) {
                Ok(score) => Some(rule.with_kulczynski(score)),
                Err(err) => {
                    warn!(rule = %rule, error = %err, "Dropping rule with degenerate metric");
                    None
                }
            })
            .collect();
        RankedRuleList::from_ranked(scored)
    }
}

/// `s(A∪C) - s(A) * s(C)`
pub fn leverage(support: f64, antecedent_support: f64, consequent_support: f64) -> f64 {
    support - antecedent_support * consequent_support
}

/// `(1 - s(C)) / (1 - confidence)`, infinite for exact implications.
pub fn conviction(confidence: f64, consequent_support: f64) -> f64 {
    if confidence >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 - consequent_support) / (1.0 - confidence)
    }
}

/// `s(A∪C) / (s(A) + s(C) - s(A∪C))`
pub fn jaccard(support: f64, antecedent_support: f64, consequent_support: f64) -> f64 {
    let union = antecedent_support + consequent_support - support;
    if union <= 0.0 { 0.0 } else { support / union }
}
