use crate::serde::itemset as itemset_serde;
use core::fmt;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Column code of an item inside a universe.
pub type ItemCode = u32;

/// A non-empty set of items, stored as sorted codes into a shared universe.
///
/// Equality and hashing look at the codes only; ordering compares item
/// tokens lexicographically.
#[derive(Clone, Debug)]
pub struct Itemset {
    codes: Vec<ItemCode>,
    universe: Arc<Vec<String>>,
}

impl Itemset {
    pub fn new(codes: impl IntoIterator<Item = ItemCode>, universe: Arc<Vec<String>>) -> Self {
        let mut codes: Vec<ItemCode> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self { codes, universe }
    }

    pub fn codes(&self) -> &[ItemCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn universe(&self) -> &Arc<Vec<String>> {
        &self.universe
    }

    pub fn items(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.iter().map(|&c| {
            self.universe
                .get(c as usize)
                .map(String::as_str)
                .unwrap_or("?")
        })
    }

    pub fn items_vec(&self) -> Vec<String> {
        self.items().map(str::to_string).collect()
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        self.codes.iter().all(|c| other.codes.binary_search(c).is_ok())
    }

    /// Label used by charts and tables, e.g. `{bread, milk}`.
    pub fn label(&self) -> String {
        format!("{{{}}}", self.items().collect::<Vec<_>>().join(", "))
    }
}

impl PartialEq for Itemset {
    fn eq(&self, other: &Self) -> bool {
        self.codes == other.codes
    }
}
impl Eq for Itemset {}

impl Hash for Itemset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codes.hash(state);
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Itemset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.items().cmp(other.items())
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A frequent itemset together with its transaction count and support.
#[derive(Clone, Debug, Serialize)]
pub struct FrequentItemset {
    #[serde(serialize_with = "itemset_serde::serialize")]
    pub itemset: Itemset,
    pub count: usize,
    pub support: f64,
}

/// All frequent k-itemsets of one level, sorted by codes.
#[derive(Clone, Debug, Default)]
pub struct FrequentLevel {
    pub level: usize,
    pub itemsets: Vec<Vec<ItemCode>>,
    pub counts: Vec<usize>,
}

impl FrequentLevel {
    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[ItemCode], usize)> + '_ {
        self.itemsets
            .iter()
            .map(Vec::as_slice)
            .zip(self.counts.iter().copied())
    }
}

/// Result of a mining run: every frequent itemset, grouped by level.
///
/// Supports are derived from counts on demand.
#[derive(Clone, Debug)]
pub struct FrequentItemsets {
    universe: Arc<Vec<String>>,
    n_transactions: usize,
    min_support: f64,
    levels: Vec<FrequentLevel>,
    counts: HashMap<Vec<ItemCode>, usize>,
}

impl FrequentItemsets {
    pub fn new(universe: Arc<Vec<String>>, n_transactions: usize, min_support: f64) -> Self {
        Self {
            universe,
            n_transactions,
            min_support,
            levels: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Assembles a collection mined elsewhere. Levels are taken as given.
    pub fn from_levels(
        universe: Arc<Vec<String>>,
        n_transactions: usize,
        min_support: f64,
        levels: Vec<FrequentLevel>,
    ) -> Self {
        let mut frequent = Self::new(universe, n_transactions, min_support);
        for level in levels {
            frequent.push_level(level);
        }
        frequent
    }

    pub(crate) fn push_level(&mut self, level: FrequentLevel) {
        for (codes, count) in level.iter() {
            self.counts.insert(codes.to_vec(), count);
        }
        self.levels.push(level);
    }

    pub fn universe(&self) -> &Arc<Vec<String>> {
        &self.universe
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    /// Size of the largest frequent itemset, 0 when nothing is frequent.
    pub fn max_len(&self) -> usize {
        self.levels.last().map(|l| l.level).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count_of(&self, codes: &[ItemCode]) -> Option<usize> {
        self.counts.get(codes).copied()
    }

    pub fn support_of(&self, codes: &[ItemCode]) -> Option<f64> {
        self.count_of(codes).map(|c| self.support_from_count(c))
    }

    /// Lookup by item tokens, in any order. Tokens are normalized first.
    pub fn support_of_items(&self, items: &[&str]) -> Option<f64> {
        let mut codes = Vec::with_capacity(items.len());
        for item in items {
            let item = crate::encoder::normalize_item(item)?;
            let idx = self.universe.binary_search(&item).ok()?;
            codes.push(idx as ItemCode);
        }
        codes.sort_unstable();
        codes.dedup();
        self.support_of(&codes)
    }

    pub fn support_from_count(&self, count: usize) -> f64 {
        if self.n_transactions == 0 {
            0.0
        } else {
            count as f64 / self.n_transactions as f64
        }
    }

    pub fn itemset(&self, codes: &[ItemCode]) -> Itemset {
        Itemset::new(codes.iter().copied(), Arc::clone(&self.universe))
    }

    /// Frequent itemsets in mining order: by level, then lexicographically.
    pub fn iter(&self) -> impl Iterator<Item = FrequentItemset> + '_ {
        self.levels.iter().flat_map(move |level| {
            level.iter().map(move |(codes, count)| FrequentItemset {
                itemset: self.itemset(codes),
                count,
                support: self.support_from_count(count),
            })
        })
    }

    pub fn to_vec(&self) -> Vec<FrequentItemset> {
        self.iter().collect()
    }
}
