//! Cluster functions used to judge the quality of a split.
//!
//! A `Clusterer` groups a set of records into clusters. The clusters are only
//! used to score candidate splits; the tree itself is always split on feature
//! values.

use std::{collections::HashMap, hash::Hash};

/// Groups records into clusters.
///
/// The clusters are returned as lists of positions into the given slice of
/// records. Clusters should be disjoint. This is not checked: overlapping or
/// empty clusters only degrade the separation scores.
pub trait Clusterer<X> {
    /// Returns the clusters of the given `records`.
    fn clusters(&self, records: &[&X]) -> Vec<Vec<usize>>;
}

impl<X, F: Fn(&[&X]) -> Vec<Vec<usize>>> Clusterer<X> for F {
    fn clusters(&self, records: &[&X]) -> Vec<Vec<usize>> {
        self(records)
    }
}

/// Every record is its own cluster.
///
/// With singleton clusters, the separation score of two disjoint sets `ls`
/// and `rs` is `2 * |ls| * |rs|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Singletons;

impl<X> Clusterer<X> for Singletons {
    fn clusters(&self, records: &[&X]) -> Vec<Vec<usize>> {
        (0..records.len()).map(|i| vec![i]).collect()
    }
}

/// All records belong to a single cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whole;

impl<X> Clusterer<X> for Whole {
    fn clusters(&self, records: &[&X]) -> Vec<Vec<usize>> {
        vec![(0..records.len()).collect()]
    }
}

/// Records with equal keys belong to the same cluster.
///
/// Clusters are returned in the order in which their keys are first seen.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<G>(pub G);

impl<X, K: Eq + Hash, G: Fn(&X) -> K> Clusterer<X> for ByKey<G> {
    fn clusters(&self, records: &[&X]) -> Vec<Vec<usize>> {
        let mut positions = HashMap::new();
        let mut clusters: Vec<Vec<usize>> = Vec::new();
        for (i, &record) in records.iter().enumerate() {
            let c = *positions.entry((self.0)(record)).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[c].push(i);
        }
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::{ByKey, Clusterer, Singletons, Whole};

    #[test]
    fn stock_clusterers() {
        let records = [1, 2, 1, 3];
        let refs = records.iter().collect::<Vec<_>>();

        assert_eq!(Singletons.clusters(&refs), vec![vec![0], vec![1], vec![2], vec![3]]);
        assert_eq!(Whole.clusters(&refs), vec![vec![0, 1, 2, 3]]);
        assert_eq!(
            ByKey(|&x: &i32| x).clusters(&refs),
            vec![vec![0, 2], vec![1], vec![3]]
        );
        assert_eq!(ByKey(|&x: &i32| x % 2).clusters(&refs), vec![vec![0, 2, 3], vec![1]]);
    }

    #[test]
    fn closures() {
        let halves = |records: &[&u8]| -> Vec<Vec<usize>> {
            let mid = records.len() / 2;
            vec![(0..mid).collect(), (mid..records.len()).collect()]
        };
        let records = [7_u8, 8, 9];
        let refs = records.iter().collect::<Vec<_>>();
        assert_eq!(halves.clusters(&refs), vec![vec![0], vec![1, 2]]);

        let empty: Vec<&u8> = Vec::new();
        assert_eq!(Whole.clusters(&empty), vec![Vec::<usize>::new()]);
        assert!(Singletons.clusters(&empty).is_empty());
    }
}
