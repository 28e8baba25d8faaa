use std::collections::BTreeSet;

/// Collects the distinct keys referenced by `rows`, in ascending order.
pub fn id_set<T, K, F>(rows: &[T], key: F) -> BTreeSet<K>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    rows.iter().map(key).collect()
}
