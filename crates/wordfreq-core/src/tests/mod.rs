mod end_to_end;

use crate::store::WordStore;

/// Every stored word as (word, frequency), sorted by word.
pub(crate) fn snapshot(store: &dyn WordStore) -> Vec<(String, u32)> {
    let mut all: Vec<(String, u32)> = store
        .query("", usize::MAX)
        .unwrap()
        .into_iter()
        .map(|r| (r.word, r.frequency))
        .collect();
    all.sort();
    all
}
