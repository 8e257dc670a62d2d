use crate::itemset::{FrequentLevel, ItemCode};
use std::collections::HashSet;

/// Generation-k candidates awaiting support counting.
///
/// Each candidate is a sorted code vector of length `level`; the collection
/// itself is sorted lexicographically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    level: usize,
    itemsets: Vec<Vec<ItemCode>>,
}

impl CandidateSet {
    /// Level 1: every item of the universe.
    pub fn singletons(n_items: usize) -> Self {
        CandidateSet {
            level: 1,
            itemsets: (0..n_items).map(|c| vec![c as ItemCode]).collect(),
        }
    }

    /// Joins frequent k-itemsets sharing their first k-1 items, then drops
    /// every candidate with an infrequent k-subset.
    pub fn generate(frequent: &FrequentLevel) -> Self {
        let k = frequent.level;
        if k == 0 || frequent.is_empty() {
            return CandidateSet {
                level: k + 1,
                itemsets: Vec::new(),
            };
        }
        let known: HashSet<&[ItemCode]> = frequent.itemsets.iter().map(Vec::as_slice).collect();

        let mut itemsets = Vec::new();
        let sets = &frequent.itemsets;
        let mut group_start = 0;
        while group_start < sets.len() {
            // Sorted input keeps every prefix group contiguous
            let prefix = &sets[group_start][..k - 1];
            let mut group_end = group_start + 1;
            while group_end < sets.len() && &sets[group_end][..k - 1] == prefix {
                group_end += 1;
            }

            for i in group_start..group_end {
                for j in (i + 1)..group_end {
                    let mut candidate = sets[i].clone();
                    candidate.push(sets[j][k - 1]);
                    if Self::all_subsets_frequent(&candidate, &known) {
                        itemsets.push(candidate);
                    }
                }
            }
            group_start = group_end;
        }

        CandidateSet {
            level: k + 1,
            itemsets,
        }
    }

    // Dropping either of the last two items yields a join parent, which is known frequent
    fn all_subsets_frequent(candidate: &[ItemCode], known: &HashSet<&[ItemCode]>) -> bool {
        if candidate.len() <= 2 {
            return true;
        }
        let mut subset = Vec::with_capacity(candidate.len() - 1);
        (0..candidate.len() - 2).all(|skip| {
            subset.clear();
            subset.extend(
                candidate
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &c)| c),
            );
            known.contains(subset.as_slice())
        })
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn itemsets(&self) -> &[Vec<ItemCode>] {
        &self.itemsets
    }

    pub fn into_itemsets(self) -> Vec<Vec<ItemCode>> {
        self.itemsets
    }
}
