//! Plain data handed to chart and graph renderers. Nothing here draws.

use crate::itemset::FrequentItemsets;
use crate::rules::RankedRuleList;
use serde::Serialize;
use std::collections::HashMap;

/// One bar of the support chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupportBar {
    pub label: String,
    pub support: f64,
}

/// One point of the confidence/lift scatter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RulePoint {
    pub confidence: f64,
    pub lift: f64,
}

/// Directed item-to-item edge weighted by rule lift.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

pub fn support_bars(frequent: &FrequentItemsets) -> Vec<SupportBar> {
    frequent
        .iter()
        .map(|fi| SupportBar {
            label: fi.itemset.label(),
            support: fi.support,
        })
        .collect()
}

pub fn rule_scatter(rules: &RankedRuleList) -> Vec<RulePoint> {
    rules
        .iter()
        .map(|r| RulePoint {
            confidence: r.confidence(),
            lift: r.lift(),
        })
        .collect()
}

/// One edge per (antecedent item, consequent item) pair spanned by a rule.
///
/// A pair spanned by several rules keeps its first position and the weight
/// of the last rule in rank order.
pub fn rule_edges(rules: &RankedRuleList) -> Vec<RuleEdge> {
    let mut edges: Vec<RuleEdge> = Vec::new();
    let mut position: HashMap<(String, String), usize> = HashMap::new();

    for rule in rules {
        for source in rule.antecedent().items() {
            for target in rule.consequent().items() {
                let key = (source.to_string(), target.to_string());
                match position.get(&key) {
                    Some(&idx) => edges[idx].weight = rule.lift(),
                    None => {
                        position.insert(key, edges.len());
                        edges.push(RuleEdge {
                            source: source.to_string(),
                            target: target.to_string(),
                            weight: rule.lift(),
                        });
                    }
                }
            }
        }
    }
    edges
}
