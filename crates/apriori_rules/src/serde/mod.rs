//! Custom serde modules for types that don't implement Serialize natively.

pub mod itemset;
