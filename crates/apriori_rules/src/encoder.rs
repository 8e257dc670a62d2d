use crate::dataframe::{MembershipFrameExt, boolean_frame};
use crate::itemset::ItemCode;
use miner_api::api::MineError;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Trims and lowercases a raw token. Tokens that end up empty are not items.
pub fn normalize_item(raw: &str) -> Option<String> {
    let item = raw.trim().to_lowercase();
    if item.is_empty() { None } else { Some(item) }
}

fn normalize_transaction<S: AsRef<str>>(transaction: &[S]) -> BTreeSet<String> {
    transaction
        .iter()
        .filter_map(|raw| normalize_item(raw.as_ref()))
        .collect()
}

/// One-hot encoder for raw transactions.
pub struct TransactionEncoder;

impl TransactionEncoder {
    /// Distinct normalized items across all transactions, in lexicographic order.
    pub fn fit<S: AsRef<str>>(transactions: &[Vec<S>]) -> Result<Arc<Vec<String>>, MineError> {
        if transactions.is_empty() {
            return Err(MineError::EmptyDataset);
        }
        let universe: BTreeSet<String> = transactions
            .iter()
            .flat_map(|t| normalize_transaction(t))
            .collect();
        Ok(Arc::new(universe.into_iter().collect()))
    }

    pub fn encode<S: AsRef<str>>(transactions: &[Vec<S>]) -> Result<TransactionMatrix, MineError> {
        let universe = Self::fit(transactions)?;
        let position: HashMap<&str, usize> = universe
            .iter()
            .enumerate()
            .map(|(i, item)| (item.as_str(), i))
            .collect();

        let n_transactions = transactions.len();
        let mut columns = vec![vec![false; n_transactions]; universe.len()];
        for (row, transaction) in transactions.iter().enumerate() {
            for item in normalize_transaction(transaction) {
                if let Some(&col) = position.get(item.as_str()) {
                    columns[col][row] = true;
                }
            }
        }

        let frame = boolean_frame(&universe, columns)?;
        debug!(
            transactions = n_transactions,
            items = universe.len(),
            "Encoded transactions"
        );
        Ok(TransactionMatrix {
            universe,
            frame,
            n_transactions,
        })
    }
}

/// Boolean membership matrix: one row per transaction, one column per universe item.
#[derive(Clone, Debug)]
pub struct TransactionMatrix {
    universe: Arc<Vec<String>>,
    frame: DataFrame,
    n_transactions: usize,
}

impl TransactionMatrix {
    /// Adopts an already one-hot encoded frame.
    ///
    /// Column names are normalized like raw items; columns that collide after
    /// normalization are OR-merged. Nulls count as absent.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, MineError> {
        if df.height() == 0 {
            return Err(MineError::EmptyDataset);
        }
        let bad = df.non_boolean_columns();
        if !bad.is_empty() {
            return Err(MineError::invalid_input(format!(
                "membership columns must be Boolean: {}",
                bad.join(", ")
            )));
        }

        let n_transactions = df.height();
        let mut merged: BTreeMap<String, Vec<bool>> = BTreeMap::new();
        for (name, flags) in df.column_names_vec().into_iter().zip(df.membership_columns()?) {
            let Some(item) = normalize_item(&name) else {
                continue;
            };
            match merged.get_mut(&item) {
                Some(existing) => {
                    for (e, f) in existing.iter_mut().zip(flags) {
                        *e |= f;
                    }
                }
                None => {
                    merged.insert(item, flags);
                }
            }
        }

        let (names, columns): (Vec<String>, Vec<Vec<bool>>) = merged.into_iter().unzip();
        let frame = boolean_frame(&names, columns)?;
        Ok(TransactionMatrix {
            universe: Arc::new(names),
            frame,
            n_transactions,
        })
    }

    pub fn universe(&self) -> &Arc<Vec<String>> {
        &self.universe
    }

    pub fn n_items(&self) -> usize {
        self.universe.len()
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    pub fn as_dataframe(&self) -> &DataFrame {
        &self.frame
    }

    /// Column code of an item, after normalizing the query.
    pub fn code_of(&self, item: &str) -> Option<ItemCode> {
        let item = normalize_item(item)?;
        self.universe
            .binary_search(&item)
            .ok()
            .map(|idx| idx as ItemCode)
    }

    /// Column-major membership flags, in universe order.
    pub fn membership_columns(&self) -> Result<Vec<Vec<bool>>, MineError> {
        if self.universe.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.frame.membership_columns()?)
    }

    /// Items present in a row, in universe order. Rows of an item-less
    /// universe decode to an empty set.
    pub fn decode_row(&self, row_idx: usize) -> Result<Option<Vec<String>>, MineError> {
        if row_idx >= self.n_transactions {
            return Ok(None);
        }
        if self.universe.is_empty() {
            return Ok(Some(Vec::new()));
        }
        Ok(self.frame.row_members(row_idx)?)
    }
}
