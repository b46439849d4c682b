//! The Separation Score (SSV) of two sets of records.
//!
//! For a set of records `D` with clusters `Dc(D)`, and two subsets `ls` and
//! `rs` of `D`, the separation score is:
//!
//! ```text
//! SSV(D, ls, rs) = 2 * Σ_c |ls ∩ c| * |rs \ c| - Σ_c min(|ls ∩ c|, |rs ∩ c|)
//! ```
//!
//! Higher values mean that `ls` and `rs` split the clusters more cleanly.
//!
//! Records are referred to by their index in the full slice of records, and
//! all set operations are performed on those indices.

use std::collections::HashSet;

use super::Clusterer;

/// The clusters of a set of records, with each cluster stored as a sorted set
/// of record indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clusters(Vec<Vec<usize>>);

impl Clusters {
    /// Clusters the records at the given `indices`.
    ///
    /// The `clusterer` sees the records in the order of `indices`. Positions
    /// it returns that are out of range are ignored, and repeated positions
    /// within a cluster are counted once.
    ///
    /// # Arguments
    ///
    /// * `records`: all records.
    /// * `clusterer`: the cluster function.
    /// * `indices`: the indices of the records to cluster.
    pub fn new<X, C: Clusterer<X> + ?Sized>(records: &[X], clusterer: &C, indices: &[usize]) -> Self {
        let subset = indices.iter().map(|&i| &records[i]).collect::<Vec<_>>();
        let clusters = clusterer
            .clusters(&subset)
            .into_iter()
            .map(|positions| {
                let mut members = positions
                    .into_iter()
                    .filter_map(|p| indices.get(p).copied())
                    .collect::<Vec<_>>();
                members.sort_unstable();
                members.dedup();
                members
            })
            .collect();
        Self(clusters)
    }

    /// The number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The separation score of `ls` and `rs` over these clusters.
    ///
    /// An empty list of clusters scores `0`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn ssv(&self, ls: &[usize], rs: &[usize]) -> i64 {
        let ls = ls.iter().copied().collect::<HashSet<_>>();
        let rs = rs.iter().copied().collect::<HashSet<_>>();

        let (separated, mixed) = self.0.iter().fold((0, 0), |(separated, mixed), c| {
            let in_ls = c.iter().filter(|&i| ls.contains(i)).count();
            let in_rs = c.iter().filter(|&i| rs.contains(i)).count();
            (separated + in_ls * (rs.len() - in_rs), mixed + in_ls.min(in_rs))
        });

        2 * (separated as i64) - (mixed as i64)
    }
}

/// The separation score of `ls` and `rs`, using the clusters of the records
/// at `indices`.
///
/// # Arguments
///
/// * `records`: all records.
/// * `clusterer`: the cluster function.
/// * `indices`: the records, `D`, whose clusters are used for scoring.
/// * `ls`: the indices of the records on the left side.
/// * `rs`: the indices of the records on the right side.
pub fn ssv<X, C: Clusterer<X> + ?Sized>(
    records: &[X],
    clusterer: &C,
    indices: &[usize],
    ls: &[usize],
    rs: &[usize],
) -> i64 {
    Clusters::new(records, clusterer, indices).ssv(ls, rs)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::cluster::{ByKey, Singletons, Whole};

    use super::{ssv, Clusters};

    #[test_case(&[0, 1], &[2, 3], 8 ; "two and two")]
    #[test_case(&[2, 3, 4], &[0], 6 ; "three and one")]
    #[test_case(&[], &[0, 1, 2], 0 ; "empty left")]
    fn singletons(ls: &[usize], rs: &[usize], expected: i64) {
        let records = ["a", "a", "b", "c", "d"];
        let indices = ls.iter().chain(rs.iter()).copied().collect::<Vec<_>>();
        assert_eq!(ssv(&records, &Singletons, &indices, ls, rs), expected);
    }

    #[test]
    fn whole() {
        let records = [0, 1, 2, 3];
        let indices = [0, 1, 2, 3];

        // Nothing is separated, and the smaller side counts against the score.
        assert_eq!(ssv(&records, &Whole, &indices, &[0, 1], &[2, 3]), -2);
        assert_eq!(ssv(&records, &Whole, &indices, &[0, 1, 2], &[3]), -1);
    }

    #[test]
    fn by_key() {
        let records = ["x", "x", "y", "y"];
        let indices = [0, 1, 2, 3];
        let by_value = ByKey(|r: &&str| r.to_string());

        // A perfect split.
        assert_eq!(ssv(&records, &by_value, &indices, &[2, 3], &[0, 1]), 8);
        // Each side holds one of each cluster.
        assert_eq!(ssv(&records, &by_value, &indices, &[0, 2], &[1, 3]), 2);
    }

    #[test]
    fn degenerate_clusters() {
        let records = [0, 1, 2];
        let indices = [2, 0];

        let none = |_: &[&i32]| -> Vec<Vec<usize>> { Vec::new() };
        let clusters = Clusters::new(&records, &none, &indices);
        assert!(clusters.is_empty());
        assert_eq!(clusters.ssv(&[0], &[2]), 0);

        // Positions refer to the subset, and are de-duplicated and bounded.
        let messy = |_: &[&i32]| -> Vec<Vec<usize>> { vec![vec![1, 1, 7], vec![0]] };
        let clusters = Clusters::new(&records, &messy, &indices);
        assert_eq!(clusters, Clusters(vec![vec![0], vec![2]]));
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.ssv(&[0], &[2]), 2);
    }
}
