//! # Apriori Rules
//!
//! Level-wise frequent itemset mining over transaction data and ranked
//! association rules between itemset fragments.
//!
//! ## Pipeline
//!
//! - **Encoder** (`encoder`): normalizes raw transactions into a Boolean
//!   membership matrix over a lexicographically ordered universe of items
//! - **ThresholdPolicy** (`threshold`): picks a minimum support from the
//!   number of transactions
//! - **Apriori** (`miner`, `candidate`, `counting`): discovers every itemset
//!   whose support meets the threshold, one level at a time
//! - **RuleGenerator** (`rules`): splits frequent itemsets into
//!   antecedent/consequent pairs, filters and ranks them by lift
//! - **MetricCalculator** (`metrics`): adds the Kulczynski score to ranked rules
//!
//! ## Example
//!
//! ```rust,ignore
//! use apriori_rules::estimator::AssociationMiner;
//!
//! let transactions = vec![
//!     vec!["milk", "bread", "butter"],
//!     vec!["bread", "diapers", "beer"],
//!     vec!["milk", "bread"],
//! ];
//! let report = AssociationMiner::default().mine_transactions(&transactions)?;
//! for rule in report.rules.iter() {
//!     println!("{rule}");
//! }
//! ```

// Module declarations
pub mod candidate;
pub mod conf;
pub mod counting;
pub mod dataframe;
pub mod encoder;
pub mod estimator;
pub mod export;
pub mod itemset;
pub mod metrics;
pub mod miner;
pub mod rules;
pub mod serde;
pub mod threshold;

pub use miner_api::api::{MineError, Miner};
