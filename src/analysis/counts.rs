use std::collections::BTreeMap;

/// Generic counting fold.
///
/// Counts the items selected by `predicate`, bucketed by `key_fn`, over
/// the union of keys seeded from `reference_keys` and keys observed in
/// `items` themselves. A reference key that matches nothing is reported
/// as zero, never omitted, so a group that is present in one data set but
/// empty in another still appears in the comparison.
pub fn count_by<T, K, I, F, P>(
    items: &[T],
    reference_keys: I,
    key_fn: F,
    predicate: P,
) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
    F: Fn(&T) -> K,
    P: Fn(&T) -> bool,
{
    let mut counts: BTreeMap<K, usize> = reference_keys.into_iter().map(|k| (k, 0)).collect();
    for item in items.iter().filter(|item| predicate(item)) {
        *counts.entry(key_fn(item)).or_insert(0) += 1;
    }
    counts
}
