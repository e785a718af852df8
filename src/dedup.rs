use std::collections::HashSet;

use crate::record::PostRecord;

/// Keep the first record for each (Title, Post Date, Category), in crawl order.
pub fn remove_duplicates(mut records: Vec<PostRecord>) -> Vec<PostRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|r| seen.insert(r.key()));
    records
}
