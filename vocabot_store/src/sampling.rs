use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::BTreeSet;

/// Pick one element uniformly.
pub fn pick_one<T: Clone>(items: &[T]) -> Option<T> {
    items.choose(&mut rand::rng()).cloned()
}

/// Sample up to `limit` distinct values uniformly without replacement.
///
/// The returned order is itself random.
pub fn pick_distinct<I>(candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = candidates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    unique.shuffle(&mut rand::rng());
    unique.truncate(limit);
    unique
}
