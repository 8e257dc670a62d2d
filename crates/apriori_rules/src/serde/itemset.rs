//! Custom serde for Itemset - the shared universe is not serialized, only the item tokens
//! We serialize as Vec<String> so consumers never need the code table

use crate::itemset::Itemset;
use serde::ser::SerializeSeq;
use serde::Serializer;

pub fn serialize<S>(itemset: &Itemset, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(itemset.len()))?;
    for item in itemset.items() {
        seq.serialize_element(item)?;
    }
    seq.end()
}
