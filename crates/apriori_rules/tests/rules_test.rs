//! Integration tests for apriori_rules::rules
//!
//! Antecedent/consequent enumeration, the two-stage confidence and lift
//! filters, deterministic ranking and top-k truncation.

use apriori_rules::encoder::TransactionEncoder;
use apriori_rules::itemset::{FrequentItemsets, FrequentLevel, Itemset};
use apriori_rules::miner::Apriori;
use apriori_rules::rules::{AssociationRule, RuleGenerator, antecedent_splits};
use apriori_rules::{MineError, Miner};
use std::sync::Arc;

const TOL: f64 = 1e-12;

fn market_basket_itemsets() -> FrequentItemsets {
    let matrix = TransactionEncoder::encode(&[
        vec!["milk", "bread", "butter"],
        vec!["bread", "diapers", "beer"],
        vec!["milk", "diapers", "beer", "bread"],
        vec!["bread", "butter"],
        vec!["milk", "bread", "diapers", "beer"],
        vec!["milk", "butter"],
        vec!["beer", "diapers"],
        vec!["milk", "bread", "beer"],
    ])
    .unwrap();
    Apriori::new(0.3).mine(&matrix).unwrap()
}

fn sides(rule: &AssociationRule) -> (Vec<String>, Vec<String>) {
    (rule.antecedent().items_vec(), rule.consequent().items_vec())
}

#[test]
fn splits_enumerate_every_proper_subset() {
    let splits: Vec<(Vec<u32>, Vec<u32>)> = antecedent_splits(&[1, 4, 7]).collect();
    assert_eq!(
        splits,
        vec![
            (vec![1], vec![4, 7]),
            (vec![4], vec![1, 7]),
            (vec![7], vec![1, 4]),
            (vec![1, 4], vec![7]),
            (vec![1, 7], vec![4]),
            (vec![4, 7], vec![1]),
        ]
    );
    assert_eq!(antecedent_splits(&[3]).count(), 0);
    assert_eq!(antecedent_splits(&[0, 1, 2, 3]).count(), 14);
}

#[test]
fn market_basket_rules_are_ranked_by_lift() {
    let rules = RuleGenerator::default()
        .generate(&market_basket_itemsets())
        .unwrap();

    let got: Vec<(Vec<String>, Vec<String>)> = rules.iter().map(sides).collect();
    let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    assert_eq!(
        got,
        vec![
            (s(&["bread", "diapers"]), s(&["beer"])),
            (s(&["diapers"]), s(&["beer"])),
            (s(&["beer"]), s(&["diapers"])),
            (s(&["beer", "bread"]), s(&["diapers"])),
            (s(&["diapers"]), s(&["beer", "bread"])),
            (s(&["beer", "milk"]), s(&["bread"])),
        ]
    );

    let first = &rules.as_slice()[0];
    assert!((first.support() - 0.375).abs() < TOL);
    assert!((first.confidence() - 1.0).abs() < TOL);
    assert!((first.lift() - 1.6).abs() < TOL);
    assert!((first.antecedent_support() - 0.375).abs() < TOL);
    assert!((first.consequent_support() - 0.625).abs() < TOL);
    assert!(first.conviction().is_infinite());
    assert_eq!(first.kulczynski(), None);

    let third = &rules.as_slice()[2];
    assert!((third.confidence() - 0.8).abs() < TOL);
    assert!((third.leverage() - (0.5 - 0.625 * 0.5)).abs() < TOL);
    assert!((third.conviction() - 2.5).abs() < TOL);
    assert!((third.jaccard() - 0.8).abs() < TOL);
}

#[test]
fn milk_bread_supports_are_consistent() {
    // {milk, bread} yields valid rules (confidence 0.8 / 0.667) but lift 1.067 fails the filter
    let frequent = market_basket_itemsets();
    let permissive = RuleGenerator {
        min_confidence: 0.5,
        min_lift: 0.0,
        min_confidence_secondary: 0.0,
        top_k: 100,
    };
    let rules = permissive.generate(&frequent).unwrap();
    let milk_to_bread = rules
        .iter()
        .find(|r| r.antecedent().items_vec() == vec!["milk"] && r.consequent().items_vec() == vec!["bread"])
        .expect("milk -> bread");
    assert!((milk_to_bread.support() - 0.5).abs() < TOL);
    assert!((milk_to_bread.antecedent_support() - 0.625).abs() < TOL);
    assert!((milk_to_bread.consequent_support() - 0.75).abs() < TOL);
    assert!((milk_to_bread.confidence() - 0.8).abs() < TOL);

    let strict = RuleGenerator::default().generate(&frequent).unwrap();
    assert!(strict.iter().all(|r| r.to_string() != "{milk} -> {bread}"));
}

#[test]
fn filters_are_enforced() {
    let frequent = market_basket_itemsets();
    let rules = RuleGenerator::default().generate(&frequent).unwrap();
    assert!(!rules.is_empty());
    for rule in &rules {
        assert!(rule.lift() > 1.2, "{} lift {}", rule, rule.lift());
        assert!(rule.confidence() > 0.6, "{} confidence {}", rule, rule.confidence());
        assert!(rule.confidence() > 0.0 && rule.confidence() <= 1.0);
        assert!(rule.antecedent().codes().iter().all(|c| !rule.consequent().codes().contains(c)));
    }
}

#[test]
fn top_k_truncates_after_ranking() {
    let frequent = market_basket_itemsets();
    let all = RuleGenerator::default().generate(&frequent).unwrap();
    let top2 = RuleGenerator {
        top_k: 2,
        ..Default::default()
    }
    .generate(&frequent)
    .unwrap();
    assert_eq!(top2.len(), 2);
    assert_eq!(top2.as_slice()[0].to_string(), all.as_slice()[0].to_string());
    assert_eq!(top2.as_slice()[1].to_string(), all.as_slice()[1].to_string());

    let none = RuleGenerator {
        top_k: 0,
        ..Default::default()
    }
    .generate(&frequent)
    .unwrap();
    assert!(none.is_empty());
}

#[test]
fn ranking_is_non_increasing_in_lift() {
    let frequent = market_basket_itemsets();
    let rules = RuleGenerator {
        min_confidence: 0.0,
        min_lift: 0.0,
        min_confidence_secondary: 0.0,
        top_k: usize::MAX,
    }
    .generate(&frequent)
    .unwrap();
    for pair in rules.as_slice().windows(2) {
        assert!(pair[0].lift() >= pair[1].lift());
    }
}

#[test]
fn empty_collection_yields_no_rules() {
    let empty = FrequentItemsets::new(Arc::new(vec!["a".to_string()]), 4, 0.3);
    let rules = RuleGenerator::default().generate(&empty).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn missing_subset_is_an_internal_inconsistency() {
    let universe = Arc::new(vec!["a".to_string(), "b".to_string()]);
    // {a, b} recorded without {b}
    let broken = FrequentItemsets::from_levels(
        universe,
        4,
        0.25,
        vec![
            FrequentLevel {
                level: 1,
                itemsets: vec![vec![0]],
                counts: vec![3],
            },
            FrequentLevel {
                level: 2,
                itemsets: vec![vec![0, 1]],
                counts: vec![2],
            },
        ],
    );
    match RuleGenerator::default().generate(&broken) {
        Err(MineError::InternalInconsistency(msg)) => assert!(msg.contains("{b}"), "{}", msg),
        other => panic!("expected InternalInconsistency, got {:?}", other.map(|r| r.len())),
    }
}

fn mine_groups(groups: &[(&[&str], usize)], min_support: f64) -> FrequentItemsets {
    let transactions: Vec<Vec<&str>> = groups
        .iter()
        .flat_map(|&(items, times)| (0..times).map(move |_| items.to_vec()))
        .collect();
    let matrix = TransactionEncoder::encode(&transactions).unwrap();
    Apriori::new(min_support).mine(&matrix).unwrap()
}

#[test]
fn mirrored_rules_share_lift_and_break_ties_on_confidence() {
    let frequent = mine_groups(
        &[(&["x", "y"][..], 5), (&["y"][..], 1), (&["z"][..], 2)],
        0.2,
    );
    let rules = RuleGenerator::default().generate(&frequent).unwrap();

    let names: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
    assert_eq!(names, vec!["{x} -> {y}", "{y} -> {x}"]);

    let (forward, backward) = (&rules.as_slice()[0], &rules.as_slice()[1]);
    assert_eq!(forward.lift().to_bits(), backward.lift().to_bits());
    assert_eq!(forward.confidence(), 1.0);
    assert!((backward.confidence() - 5.0 / 6.0).abs() < TOL);

    let top1 = RuleGenerator {
        top_k: 1,
        ..Default::default()
    }
    .generate(&frequent)
    .unwrap();
    assert_eq!(top1.as_slice()[0].to_string(), "{x} -> {y}");
}

#[test]
fn confidence_of_exactly_three_fifths_fails_the_strict_filter() {
    let frequent = mine_groups(
        &[
            (&["a", "c"][..], 3),
            (&["a"][..], 2),
            (&["c"][..], 2),
            (&["z"][..], 8),
        ],
        0.1,
    );

    let strict = RuleGenerator::default().generate(&frequent).unwrap();
    assert!(strict.is_empty(), "{:?}", strict.iter().map(|r| r.to_string()).collect::<Vec<_>>());

    let relaxed = RuleGenerator {
        min_confidence_secondary: 0.59,
        ..Default::default()
    }
    .generate(&frequent)
    .unwrap();
    assert_eq!(relaxed.len(), 2);
    for rule in &relaxed {
        assert_eq!(rule.confidence(), 0.6);
        assert_eq!(rule.lift(), 1.8);
    }
}

#[test]
fn measures_from_counts_are_exact_fractions() {
    let universe = Arc::new(vec!["a".to_string(), "c".to_string()]);
    let rule = AssociationRule::from_counts(
        Itemset::new([0], Arc::clone(&universe)),
        Itemset::new([1], universe),
        5,
        5,
        3,
        15,
    );
    assert_eq!(rule.confidence(), 0.6);
    assert_eq!(rule.lift(), 1.8);
    assert_eq!(rule.support(), 0.2);
    assert!((rule.antecedent_support() - 1.0 / 3.0).abs() < TOL);
}
