//! Turning an `SsvTree` into a lookup table of feature values to positions on
//! `[0, 1]`.

use std::{collections::HashMap, hash::Hash, io::Write, path::Path};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{score, Clusterer, SsvError, SsvTree};
use crate::utils;

/// One leaf of the tree in a `Lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<F> {
    /// The feature value of the leaf.
    pub feature: F,
    /// The separation score of the leaf against its neighbour.
    pub weight: i64,
    /// The number of records with this feature value.
    pub cardinality: usize,
    /// The position of the feature value on `[0, 1]`.
    pub position: f64,
}

/// Positions of feature values on `[0, 1]`, in the order of the leaves of the
/// tree they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup<F> {
    /// The entries, in leaf order.
    entries: Vec<Entry<F>>,
}

impl<F> Lookup<F> {
    /// The entries, in leaf order.
    #[must_use]
    pub fn entries(&self) -> &[Entry<F>] {
        &self.entries
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The feature values, in leaf order.
    pub fn features(&self) -> impl Iterator<Item = &F> + '_ {
        self.entries.iter().map(|e| &e.feature)
    }

    /// The positions, in leaf order.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.position)
    }

    /// The position of the given feature value, if it has one.
    pub fn get(&self, feature: &F) -> Option<f64>
    where
        F: PartialEq,
    {
        self.entries.iter().find(|e| e.feature == *feature).map(|e| e.position)
    }

    /// A map from feature values to their positions.
    #[must_use]
    pub fn to_map(&self) -> HashMap<F, f64>
    where
        F: Eq + Hash + Clone,
    {
        self.entries.iter().map(|e| (e.feature.clone(), e.position)).collect()
    }

    /// Writes the entries as CSV, with a header, to the given writer.
    ///
    /// # Errors
    ///
    /// * If an entry cannot be serialized.
    /// * If the writer fails.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), String>
    where
        F: Serialize,
    {
        let mut writer = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            writer.serialize(entry).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())
    }

    /// Writes the entries to a `.csv` file at the given path.
    ///
    /// # Errors
    ///
    /// * If the file cannot be created.
    /// * If an entry cannot be serialized or written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), String>
    where
        F: Serialize,
    {
        let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
        self.to_csv_writer(file)
    }

    /// Reads entries from a `.csv` file written by `write_csv`.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read.
    /// * If a row cannot be deserialized into an `Entry`.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, String>
    where
        F: for<'de> Deserialize<'de>,
    {
        let mut reader = csv::Reader::from_path(path).map_err(|e| e.to_string())?;
        let entries = reader
            .deserialize()
            .map(|row| row.map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

impl<F: Clone> Lookup<F> {
    /// Collects the leaves of a reordered tree into a `Lookup`.
    ///
    /// # Arguments
    ///
    /// * `tree`: the tree.
    /// * `leaves`: the indices of the leaves of the tree, in order.
    /// * `weights`: the neighbour weights of the leaves.
    fn from_leaves(tree: &SsvTree<F>, leaves: &[usize], weights: Vec<i64>) -> Self
    where
        F: Eq + Hash,
    {
        let positions = positions(&weights);
        let entries = leaves
            .iter()
            .zip(weights)
            .zip(positions)
            .filter_map(|((&i, weight), position)| {
                tree.get(i).and_then(|leaf| {
                    leaf.feature().map(|feature| Entry {
                        feature: feature.clone(),
                        weight,
                        cardinality: leaf.cardinality(),
                        position,
                    })
                })
            })
            .collect();
        Self { entries }
    }
}

/// Builds a lookup table from each candidate feature value to a position on
/// `[0, 1]`.
///
/// The records are split into an `SsvTree`, whose nodes are reordered by
/// weight. The leaves are then re-weighed against their right-hand neighbours
/// and each is given the sum of the weights before it, skipping the one
/// immediately before it, divided by the sum of all but the last weight.
///
/// If that denominator is zero, e.g. with a single candidate, the positions
/// are `NaN`.
///
/// # Arguments
///
/// * `records`: the records.
/// * `clusterer`: the cluster function used to score splits.
/// * `feature`: extracts the feature value of a record.
/// * `candidates`: the feature values to split on.
///
/// # Errors
///
/// * If `records` is empty.
/// * If `candidates` is empty.
pub fn build_lookup<X, F, C, G>(records: &[X], clusterer: &C, feature: G, candidates: &[F]) -> Result<Lookup<F>, SsvError>
where
    F: Eq + Hash + Clone,
    C: Clusterer<X> + ?Sized,
    G: Fn(&X) -> F,
{
    let mut tree = SsvTree::new(records, clusterer, feature, candidates)?;
    tree.reorder();

    let leaves = tree.leaves();
    let data = leaf_data(&tree, &leaves);
    let weights = neighbour_weights(records, clusterer, &data);

    ftlog::debug!("Built a lookup of {} features over {} records", leaves.len(), records.len());
    Ok(Lookup::from_leaves(&tree, &leaves, weights))
}

/// Parallelized version of `build_lookup`.
///
/// # Errors
///
/// * If `records` is empty.
/// * If `candidates` is empty.
pub fn par_build_lookup<X, F, C, G>(
    records: &[X],
    clusterer: &C,
    feature: G,
    candidates: &[F],
) -> Result<Lookup<F>, SsvError>
where
    X: Send + Sync,
    F: Eq + Hash + Clone + Send + Sync,
    C: Clusterer<X> + Send + Sync + ?Sized,
    G: Fn(&X) -> F,
{
    let mut tree = SsvTree::par_new(records, clusterer, feature, candidates)?;
    tree.reorder();

    let leaves = tree.leaves();
    let data = leaf_data(&tree, &leaves);
    let weights = par_neighbour_weights(records, clusterer, &data);

    ftlog::debug!("Built a lookup of {} features over {} records", leaves.len(), records.len());
    Ok(Lookup::from_leaves(&tree, &leaves, weights))
}

/// The records of each of the given nodes.
fn leaf_data<'a, F: Eq + Hash + Clone>(tree: &'a SsvTree<F>, leaves: &[usize]) -> Vec<&'a [usize]> {
    leaves
        .iter()
        .filter_map(|&i| tree.get(i).map(super::tree::Node::data))
        .collect()
}

/// The separation score of each set of records against the next.
///
/// Each pair of neighbours is scored over the clusters of their combined
/// records. The last set has no right-hand neighbour and reuses the score of
/// the final pair. A single set is given a score of `0`.
///
/// # Arguments
///
/// * `records`: all records.
/// * `clusterer`: the cluster function.
/// * `data`: the indices of the records in each set, in order.
pub fn neighbour_weights<X, C: Clusterer<X> + ?Sized>(records: &[X], clusterer: &C, data: &[&[usize]]) -> Vec<i64> {
    let pairs = data
        .windows(2)
        .map(|pair| score::ssv(records, clusterer, &utils::union(pair[0], pair[1]), pair[0], pair[1]))
        .collect();
    with_last_repeated(pairs, data.len())
}

/// Parallelized version of `neighbour_weights`.
pub fn par_neighbour_weights<X: Send + Sync, C: Clusterer<X> + Send + Sync + ?Sized>(
    records: &[X],
    clusterer: &C,
    data: &[&[usize]],
) -> Vec<i64> {
    let pairs = data
        .par_windows(2)
        .map(|pair| score::ssv(records, clusterer, &utils::union(pair[0], pair[1]), pair[0], pair[1]))
        .collect();
    with_last_repeated(pairs, data.len())
}

/// Appends a copy of the last pair score, or pads to `n` with zeros when there
/// are no pairs.
fn with_last_repeated(mut pairs: Vec<i64>, n: usize) -> Vec<i64> {
    match pairs.last() {
        Some(&last) => pairs.push(last),
        None => pairs.resize(n, 0),
    }
    pairs
}

/// The position of each leaf given the weights of all leaves, in order.
///
/// For `n` weights, the denominator is the sum of the first `n - 1` weights.
/// The numerator of the `i`-th position is the sum of the first `i - 1`
/// weights, so the first two positions are always `0` (or `NaN`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn positions(weights: &[i64]) -> Vec<f64> {
    let sums = utils::prefix_sums(weights);
    let den = sums[weights.len().saturating_sub(1)] as f64;
    (0..weights.len())
        .map(|i| sums[i.saturating_sub(1)] as f64 / den)
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use crate::cluster::{Singletons, Whole};

    use super::{build_lookup, neighbour_weights, par_build_lookup, positions, SsvError};

    #[test_case(&[2, 4, 4], &[0.0, 0.0, 1.0 / 3.0] ; "three leaves")]
    #[test_case(&[6, 2, 8, 8], &[0.0, 0.0, 0.375, 0.5] ; "four leaves")]
    #[test_case(&[8, 8], &[0.0, 0.0] ; "two leaves")]
    #[test_case(&[-1, -1, -1], &[0.0, 0.0, 0.5] ; "negative weights")]
    fn assigned_positions(weights: &[i64], expected: &[f64]) {
        let actual = positions(weights);
        assert_eq!(actual.len(), expected.len());
        for (&a, &e) in actual.iter().zip(expected) {
            assert!(approx_eq!(f64, a, e, ulps = 2), "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn degenerate_positions() {
        assert!(positions(&[0]).iter().all(|p| p.is_nan()));
        assert!(positions(&[0, 0]).iter().all(|p| p.is_nan()));
    }

    #[test]
    fn neighbours() {
        let records = ["b", "b", "b", "d", "c", "a"];
        let data: [&[usize]; 4] = [&[0, 1, 2], &[3], &[4], &[5]];
        assert_eq!(neighbour_weights(&records, &Singletons, &data), vec![6, 2, 2, 2]);
        assert_eq!(neighbour_weights(&records, &Singletons, &data[..1]), vec![0]);
    }

    #[test]
    fn colors() {
        let records = ["red", "red", "blue", "green"];
        let lookup = build_lookup(&records, &Singletons, |r| *r, &["red", "blue", "green"]).unwrap();

        assert_eq!(lookup.features().copied().collect::<Vec<_>>(), vec!["green", "blue", "red"]);
        let weights = lookup.entries().iter().map(|e| e.weight).collect::<Vec<_>>();
        assert_eq!(weights, vec![2, 4, 4]);
        let cardinalities = lookup.entries().iter().map(|e| e.cardinality).collect::<Vec<_>>();
        assert_eq!(cardinalities, vec![1, 1, 2]);

        assert!(approx_eq!(f64, lookup.get(&"green").unwrap(), 0.0));
        assert!(approx_eq!(f64, lookup.get(&"blue").unwrap(), 0.0));
        assert!(approx_eq!(f64, lookup.get(&"red").unwrap(), 1.0 / 3.0, ulps = 2));
        assert!(lookup.get(&"purple").is_none());
    }

    #[test]
    fn colors_in_one_cluster() {
        let records = ["red", "red", "blue", "green"];
        let lookup = build_lookup(&records, &Whole, |r| *r, &["red", "blue", "green"]).unwrap();

        assert_eq!(lookup.features().copied().collect::<Vec<_>>(), vec!["green", "red", "blue"]);
        let weights = lookup.entries().iter().map(|e| e.weight).collect::<Vec<_>>();
        assert_eq!(weights, vec![-1, -1, -1]);
        assert!(approx_eq!(f64, lookup.get(&"blue").unwrap(), 0.5, ulps = 2));
    }

    #[test]
    fn parallel_agrees() {
        let records = (0..300).map(|i| (i * 13) % 17 + i % 5).collect::<Vec<_>>();
        let candidates = (0..21).collect::<Vec<_>>();
        let lookup = build_lookup(&records, &Singletons, |&r| r, &candidates).unwrap();
        let par_lookup = par_build_lookup(&records, &Singletons, |&r| r, &candidates).unwrap();
        assert_eq!(lookup.len(), 21);
        assert_eq!(
            lookup.features().collect::<Vec<_>>(),
            par_lookup.features().collect::<Vec<_>>()
        );
        assert_eq!(
            lookup.entries().iter().map(|e| e.weight).collect::<Vec<_>>(),
            par_lookup.entries().iter().map(|e| e.weight).collect::<Vec<_>>()
        );
    }

    #[test]
    fn invalid_input() {
        let records: Vec<String> = Vec::new();
        assert_eq!(
            build_lookup(&records, &Singletons, Clone::clone, &["a".to_string()]).unwrap_err(),
            SsvError::EmptyRecords
        );
        assert_eq!(
            par_build_lookup(&[1, 2], &Singletons, |&r| r, &[]).unwrap_err(),
            SsvError::EmptyFeatures
        );
    }
}
