//! Reproducibility and randomized property checks.
//!
//! Random datasets come from a seeded StdRng so failures replay exactly.

use apriori_rules::conf::MiningConfig;
use apriori_rules::counting::CountingStrategy;
use apriori_rules::encoder::TransactionEncoder;
use apriori_rules::estimator::{AssociationMiner, MiningReport};
use apriori_rules::miner::Apriori;
use apriori_rules::rules::RuleGenerator;
use apriori_rules::Miner;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITEMS: [&str; 8] = ["apple", "bread", "cheese", "dates", "eggs", "flour", "grapes", "honey"];

/// Transactions where each item appears with its own fixed probability.
fn random_transactions(n: usize, seed: u64) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            ITEMS
                .iter()
                .enumerate()
                .filter(|(i, _)| rng.random_bool(0.15 + 0.08 * *i as f64))
                .map(|(_, item)| item.to_string())
                .collect()
        })
        .collect()
}

fn summary(report: &MiningReport) -> (Vec<(String, usize)>, Vec<(String, u64, u64)>) {
    let itemsets = report
        .frequent_itemsets
        .iter()
        .map(|f| (f.itemset.label(), f.count))
        .collect();
    let rules = report
        .rules
        .iter()
        .map(|r| (r.to_string(), r.lift().to_bits(), r.confidence().to_bits()))
        .collect();
    (itemsets, rules)
}

#[test]
fn mining_twice_gives_identical_results() {
    let transactions = random_transactions(300, 7);
    let config = MiningConfig {
        min_support: Some(0.1),
        min_lift: 1.0,
        ..Default::default()
    };
    let first = AssociationMiner::new(config.clone())
        .mine_transactions(&transactions)
        .unwrap();
    let second = AssociationMiner::new(config)
        .mine_transactions(&transactions)
        .unwrap();
    assert_eq!(summary(&first), summary(&second));
}

#[test]
fn transaction_order_does_not_change_supports() {
    let transactions = random_transactions(200, 11);
    let mut reversed = transactions.clone();
    reversed.reverse();

    let a = Apriori::new(0.1)
        .mine(&TransactionEncoder::encode(&transactions).unwrap())
        .unwrap();
    let b = Apriori::new(0.1)
        .mine(&TransactionEncoder::encode(&reversed).unwrap())
        .unwrap();
    let la: Vec<(String, usize)> = a.iter().map(|f| (f.itemset.label(), f.count)).collect();
    let lb: Vec<(String, usize)> = b.iter().map(|f| (f.itemset.label(), f.count)).collect();
    assert_eq!(la, lb);
}

#[test]
fn random_datasets_match_direct_support_counts() {
    for seed in 0..5 {
        let transactions = random_transactions(120, seed);
        let matrix = TransactionEncoder::encode(&transactions).unwrap();
        let columns = matrix.membership_columns().unwrap();
        let n = matrix.n_transactions();
        let min_support = 0.08;

        let frequent = Apriori::new(min_support)
            .with_counting(CountingStrategy::Scan)
            .mine(&matrix)
            .unwrap();

        let mut expected = 0;
        for k in 1..=matrix.n_items() {
            for items in (0..matrix.n_items() as u32).combinations(k) {
                let count = (0..n)
                    .filter(|&r| items.iter().all(|&c| columns[c as usize][r]))
                    .count();
                let support = count as f64 / n as f64;
                if support >= min_support {
                    expected += 1;
                    assert_eq!(frequent.count_of(&items), Some(count), "seed {} {:?}", seed, items);
                } else {
                    assert_eq!(frequent.count_of(&items), None, "seed {} {:?}", seed, items);
                }
            }
        }
        assert_eq!(frequent.len(), expected);
    }
}

#[test]
fn supports_shrink_along_supersets() {
    let matrix = TransactionEncoder::encode(&random_transactions(250, 3)).unwrap();
    let frequent = Apriori::new(0.05).mine(&matrix).unwrap();
    let all = frequent.to_vec();
    for small in &all {
        for big in &all {
            if small.itemset.len() < big.itemset.len() && small.itemset.is_subset_of(&big.itemset) {
                assert!(small.support >= big.support, "{} vs {}", small.itemset, big.itemset);
            }
        }
    }
}

#[test]
fn random_rules_respect_bounds_and_order() {
    for seed in 20..24 {
        let matrix = TransactionEncoder::encode(&random_transactions(400, seed)).unwrap();
        let frequent = Apriori::new(0.05).mine(&matrix).unwrap();
        let generator = RuleGenerator {
            min_lift: 1.0,
            top_k: 25,
            ..Default::default()
        };
        let rules = generator.generate(&frequent).unwrap();
        assert!(rules.len() <= 25);
        for rule in &rules {
            assert!(rule.confidence() > 0.6 && rule.confidence() <= 1.0);
            assert!(rule.lift() > 1.0);
        }
        for pair in rules.as_slice().windows(2) {
            assert!(pair[0].lift() >= pair[1].lift());
        }
    }
}
