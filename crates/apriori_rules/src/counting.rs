use crate::candidate::CandidateSet;
use crate::encoder::TransactionMatrix;
use crate::itemset::ItemCode;
use miner_api::api::MineError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Counts the transactions containing a candidate itemset.
///
/// Implementations own an index built once per mining run; counting a
/// level only reads it, so candidates can be counted in parallel.
pub trait SupportCounter: Send + Sync {
    fn n_transactions(&self) -> usize;

    /// Number of transactions containing every code in `items`.
    fn count(&self, items: &[ItemCode]) -> usize;

    /// Counts for every candidate, in candidate order.
    fn count_all(&self, candidates: &CandidateSet) -> Vec<usize> {
        candidates
            .itemsets()
            .par_iter()
            .map(|items| self.count(items))
            .collect()
    }
}

/// Naive row scan over the membership matrix.
pub struct MatrixScan {
    rows: Vec<Vec<bool>>,
}

impl MatrixScan {
    pub fn from_matrix(matrix: &TransactionMatrix) -> Result<Self, MineError> {
        let columns = matrix.membership_columns()?;
        let rows = (0..matrix.n_transactions())
            .map(|r| columns.iter().map(|col| col[r]).collect())
            .collect();
        Ok(MatrixScan { rows })
    }
}

impl SupportCounter for MatrixScan {
    fn n_transactions(&self) -> usize {
        self.rows.len()
    }

    fn count(&self, items: &[ItemCode]) -> usize {
        self.rows
            .iter()
            .filter(|row| items.iter().all(|&c| row.get(c as usize).copied().unwrap_or(false)))
            .count()
    }
}

/// Per-item sorted transaction-id lists, intersected per candidate.
pub struct TidListIndex {
    tids: Vec<Vec<u32>>,
    n_transactions: usize,
}

impl TidListIndex {
    pub fn from_matrix(matrix: &TransactionMatrix) -> Result<Self, MineError> {
        let tids = matrix
            .membership_columns()?
            .iter()
            .map(|col| {
                col.iter()
                    .enumerate()
                    .filter(|&(_, &present)| present)
                    .map(|(row, _)| row as u32)
                    .collect()
            })
            .collect();
        Ok(TidListIndex {
            tids,
            n_transactions: matrix.n_transactions(),
        })
    }

    pub fn tids(&self, item: ItemCode) -> &[u32] {
        self.tids.get(item as usize).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn intersect_sorted(left: &[u32], right: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

impl SupportCounter for TidListIndex {
    fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    fn count(&self, items: &[ItemCode]) -> usize {
        let mut lists: Vec<&[u32]> = items.iter().map(|&c| self.tids(c)).collect();
        // Shortest first keeps the running intersection small
        lists.sort_by_key(|l| l.len());
        let Some((first, rest)) = lists.split_first() else {
            return self.n_transactions;
        };
        let mut acc = first.to_vec();
        for list in rest {
            if acc.is_empty() {
                break;
            }
            acc = intersect_sorted(&acc, list);
        }
        acc.len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingStrategy {
    Scan,
    #[default]
    TidList,
}

impl CountingStrategy {
    pub fn build(&self, matrix: &TransactionMatrix) -> Result<Box<dyn SupportCounter>, MineError> {
        Ok(match self {
            CountingStrategy::Scan => Box::new(MatrixScan::from_matrix(matrix)?),
            CountingStrategy::TidList => Box::new(TidListIndex::from_matrix(matrix)?),
        })
    }
}
