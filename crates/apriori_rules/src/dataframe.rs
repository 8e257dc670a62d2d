use crate::itemset::FrequentItemsets;
use crate::rules::{AssociationRule, RankedRuleList};
use polars::error::ErrString;
use polars::prelude::*;

/// Builds a frame with one Boolean column per name, in the given order.
pub fn boolean_frame(names: &[String], columns: Vec<Vec<bool>>) -> PolarsResult<DataFrame> {
    if names.len() != columns.len() {
        return Err(PolarsError::ShapeMismatch(ErrString::from(format!(
            "{} column names for {} columns",
            names.len(),
            columns.len()
        ))));
    }
    let cols: Vec<Column> = names
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(PlSmallStr::from_str(name), values).into())
        .collect();
    DataFrame::new(cols)
}

/// Extension methods for one-hot membership frames
pub trait MembershipFrameExt {
    /// All column names as owned Strings
    fn column_names_vec(&self) -> Vec<String>;

    /// Names of the columns whose dtype is not Boolean
    fn non_boolean_columns(&self) -> Vec<String>;

    /// Column-major membership flags; nulls read as false
    fn membership_columns(&self) -> PolarsResult<Vec<Vec<bool>>>;

    /// Names of the columns set in a given row
    fn row_members(&self, row_idx: usize) -> PolarsResult<Option<Vec<String>>>;
}

impl MembershipFrameExt for DataFrame {
    fn column_names_vec(&self) -> Vec<String> {
        self.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn non_boolean_columns(&self) -> Vec<String> {
        self.get_columns()
            .iter()
            .filter(|c| !matches!(c.dtype(), DataType::Boolean))
            .map(|c| c.name().to_string())
            .collect()
    }

    fn membership_columns(&self) -> PolarsResult<Vec<Vec<bool>>> {
        self.get_columns()
            .iter()
            .map(|c| {
                let flags = c.as_materialized_series().bool()?;
                Ok(flags.into_iter().map(|v| v.unwrap_or(false)).collect())
            })
            .collect()
    }

    fn row_members(&self, row_idx: usize) -> PolarsResult<Option<Vec<String>>> {
        if row_idx >= self.height() {
            return Ok(None);
        }
        let mut members = Vec::new();
        for c in self.get_columns() {
            let flags = c.as_materialized_series().bool()?;
            if flags.get(row_idx).unwrap_or(false) {
                members.push(c.name().to_string());
            }
        }
        Ok(Some(members))
    }
}

impl FrequentItemsets {
    /// Columns `itemsets` (label), `length` and `support`, in mining order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = self.to_vec();
        let labels: Vec<String> = rows.iter().map(|fi| fi.itemset.label()).collect();
        let lengths: Vec<u32> = rows.iter().map(|fi| fi.itemset.len() as u32).collect();
        let supports: Vec<f64> = rows.iter().map(|fi| fi.support).collect();
        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("itemsets"), labels).into(),
            Series::new(PlSmallStr::from_static("length"), lengths).into(),
            Series::new(PlSmallStr::from_static("support"), supports).into(),
        ])
    }
}

fn text_column(
    name: &'static str,
    rules: &[AssociationRule],
    f: impl Fn(&AssociationRule) -> String,
) -> Column {
    let values: Vec<String> = rules.iter().map(f).collect();
    Series::new(PlSmallStr::from_static(name), values).into()
}

fn float_column(
    name: &'static str,
    rules: &[AssociationRule],
    f: impl Fn(&AssociationRule) -> f64,
) -> Column {
    let values: Vec<f64> = rules.iter().map(f).collect();
    Series::new(PlSmallStr::from_static(name), values).into()
}

impl RankedRuleList {
    /// One row per rule in rank order; `kulczynski` is null for unscored rules.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rules = self.as_slice();
        let kulczynski: Vec<Option<f64>> = rules.iter().map(|r| r.kulczynski()).collect();

        DataFrame::new(vec![
            text_column("antecedents", rules, |r| r.antecedent().label()),
            text_column("consequents", rules, |r| r.consequent().label()),
            float_column("antecedent_support", rules, |r| r.antecedent_support()),
            float_column("consequent_support", rules, |r| r.consequent_support()),
            float_column("support", rules, |r| r.support()),
            float_column("confidence", rules, |r| r.confidence()),
            float_column("lift", rules, |r| r.lift()),
            float_column("leverage", rules, |r| r.leverage()),
            float_column("conviction", rules, |r| r.conviction()),
            float_column("jaccard", rules, |r| r.jaccard()),
            Series::new(PlSmallStr::from_static("kulczynski"), kulczynski).into(),
        ])
    }
}
