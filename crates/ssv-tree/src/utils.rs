//! Utility functions for the crate.

use std::{cmp::Ordering, collections::HashSet, hash::Hash};

/// Return the index and value of the maximum value in the given slice of values.
///
/// Of equal maxima, the first is returned. NAN values are ordered as smaller
/// than all other values.
///
/// This will return `None` if the given slice is empty.
pub fn arg_max<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    let is_nan = |x: &T| x.partial_cmp(x).is_none();
    values.iter().copied().enumerate().fold(None, |best, (i, v)| match best {
        Some((_, b)) if is_nan(&b) && !is_nan(&v) => Some((i, v)),
        Some((_, b)) if v.partial_cmp(&b) != Some(Ordering::Greater) => best,
        _ => Some((i, v)),
    })
}

/// Return the indices in `left` followed by those in `right` that are not in
/// `left`.
#[must_use]
pub fn union(left: &[usize], right: &[usize]) -> Vec<usize> {
    let seen = left.iter().copied().collect::<HashSet<_>>();
    left.iter()
        .copied()
        .chain(right.iter().copied().filter(|i| !seen.contains(i)))
        .collect()
}

/// Return the distinct values in the order in which they are first seen.
pub fn distinct<T: Eq + Hash + Clone>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

/// Return the cumulative sum of the values.
///
/// The `i`-th element is the sum of the first `i` values, so the result has one
/// more element than the input.
#[must_use]
pub fn prefix_sums(values: &[i64]) -> Vec<i64> {
    let mut sums = Vec::with_capacity(values.len() + 1);
    sums.push(0);
    for &v in values {
        sums.push(sums[sums.len() - 1] + v);
    }
    sums
}
