//! An `SsvTree` recursively splits records on feature values.
//!
//! At each level, the feature value whose records best separate from the rest
//! (by `SSV`) is split off into a right leaf, and the remaining records are
//! split further on the remaining features. The last remaining feature takes
//! all remaining records into a leaf of its own.
//!
//! The nodes live in an arena and refer to each other by index.

mod node;

use std::hash::Hash;

use rayon::prelude::*;

use super::{
    score::{self, Clusters},
    Clusterer, SsvError,
};
use crate::utils;

pub use node::{Kind, Node};

/// A binary tree of `Node`s, grown by splitting records on feature values.
///
/// # Type Parameters
///
/// - `F`: The type of the feature values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsvTree<F> {
    /// All nodes of the tree.
    nodes: Vec<Node<F>>,
    /// The index of the root in `nodes`.
    root: usize,
}

impl<F: Eq + Hash + Clone> SsvTree<F> {
    /// Grows a new tree and weighs its nodes.
    ///
    /// # Arguments
    ///
    /// * `records`: the records to partition.
    /// * `clusterer`: the cluster function used to score splits.
    /// * `feature`: extracts the feature value of a record.
    /// * `candidates`: the feature values to split on. Repeated values are
    ///   only used once, at their first position.
    ///
    /// # Errors
    ///
    /// * If `records` is empty.
    /// * If `candidates` is empty.
    pub fn new<X, C, G>(records: &[X], clusterer: &C, feature: G, candidates: &[F]) -> Result<Self, SsvError>
    where
        C: Clusterer<X> + ?Sized,
        G: Fn(&X) -> F,
    {
        let (values, candidates) = Self::prepare(records, feature, candidates)?;
        let mut tree = Self::grow(records, clusterer, &values, candidates, |clusters, indices, features| {
            features
                .iter()
                .map(|s| {
                    let (ls, rs) = split(&values, indices, s);
                    clusters.ssv(&ls, &rs)
                })
                .collect()
        });
        tree.weigh(records, clusterer);
        Ok(tree)
    }

    /// Checks the inputs and extracts the feature value of every record.
    fn prepare<X, G: Fn(&X) -> F>(records: &[X], feature: G, candidates: &[F]) -> Result<(Vec<F>, Vec<F>), SsvError> {
        if records.is_empty() {
            return Err(SsvError::EmptyRecords);
        }
        if candidates.is_empty() {
            return Err(SsvError::EmptyFeatures);
        }
        let values = records.iter().map(feature).collect();
        let candidates = utils::distinct(candidates.iter().cloned());
        Ok((values, candidates))
    }

    /// Grows the tree.
    ///
    /// Every split removes one candidate, so the tree is a spine of interior
    /// nodes running down the left, each with a leaf on its right. The spine
    /// is collected top-down and linked bottom-up.
    ///
    /// # Arguments
    ///
    /// * `records`: the records to partition.
    /// * `clusterer`: the cluster function used to score splits.
    /// * `values`: the feature value of each record.
    /// * `candidates`: the distinct feature values to split on.
    /// * `score_all`: scores every remaining candidate against the records at
    ///   the given indices.
    fn grow<X, C, S>(records: &[X], clusterer: &C, values: &[F], mut candidates: Vec<F>, score_all: S) -> Self
    where
        C: Clusterer<X> + ?Sized,
        S: Fn(&Clusters, &[usize], &[F]) -> Vec<i64>,
    {
        let mut indices = (0..records.len()).collect::<Vec<_>>();
        let mut spine = Vec::with_capacity(candidates.len());
        while candidates.len() > 1 {
            let clusters = Clusters::new(records, clusterer, &indices);
            let scores = score_all(&clusters, &indices, &candidates);
            let (arg_best, best) =
                utils::arg_max(&scores).unwrap_or_else(|| unreachable!("At least two candidates remain."));
            let selected = candidates.remove(arg_best);
            let (ls, rs) = split(values, &indices, &selected);
            ftlog::trace!(
                "Split {} records into {} and {} with SSV {best} at depth {}",
                indices.len(),
                ls.len(),
                rs.len(),
                spine.len()
            );
            spine.push((indices, selected, rs));
            indices = ls;
        }

        let last = candidates
            .pop()
            .unwrap_or_else(|| unreachable!("Candidates are never empty."));
        let mut nodes = Vec::with_capacity(2 * spine.len() + 1);
        nodes.push(Node::leaf(last, indices));
        let mut left = 0;

        for (indices, feature, rs) in spine.into_iter().rev() {
            let right = nodes.len();
            nodes.push(Node::leaf(feature, rs));
            let parent = nodes.len();
            nodes.push(Node::interior(left, right, indices));

            nodes[left].sibling = Some(right);
            nodes[right].sibling = Some(left);
            nodes[left].parent = Some(parent);
            nodes[right].parent = Some(parent);

            left = parent;
        }

        ftlog::debug!(
            "Grew a tree with {} nodes over {} records",
            nodes.len(),
            records.len()
        );

        Self { nodes, root: left }
    }

    /// The pairs of nodes that can be weighed, i.e. every node whose parent
    /// has a sibling, along with that sibling.
    fn weighable(&self) -> Vec<(usize, usize)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                node.parent
                    .and_then(|p| self.nodes[p].sibling)
                    .map(|ps| (i, ps))
            })
            .collect()
    }

    /// Sets the `ssvw` of every node whose parent has a sibling, scoring the
    /// node's records against those of its parent's sibling.
    fn weigh<X, C: Clusterer<X> + ?Sized>(&mut self, records: &[X], clusterer: &C) {
        let weights = self
            .weighable()
            .into_iter()
            .map(|(i, ps)| (i, self.pair_ssv(records, clusterer, i, ps)))
            .collect::<Vec<_>>();
        self.set_weights(weights);
    }

    /// The separation score of the records of two nodes.
    fn pair_ssv<X, C: Clusterer<X> + ?Sized>(&self, records: &[X], clusterer: &C, a: usize, b: usize) -> i64 {
        let (a, b) = (&self.nodes[a].data, &self.nodes[b].data);
        score::ssv(records, clusterer, &utils::union(a, b), a, b)
    }

    /// Assigns the given weights to their nodes.
    fn set_weights(&mut self, weights: Vec<(usize, i64)>) {
        for (i, w) in weights {
            self.nodes[i].ssvw = w;
        }
    }

    /// Swaps the children of interior nodes so that leaves run in order of
    /// their weights.
    ///
    /// Interior nodes are visited top-down. A non-root interior node that is
    /// the left child of its parent has its children swapped if the left
    /// weighs less than the right. One that is the right child of its parent
    /// has them swapped if the left weighs more than the right.
    ///
    /// Each swap only looks at a pair of siblings, so this does not fully sort
    /// the leaves in every tree.
    pub fn reorder(&mut self) {
        let mut stack = vec![self.root];
        while let Some(i) = stack.pop() {
            let Some((mut left, mut right)) = self.nodes[i].children() else {
                continue;
            };

            if let Some(p) = self.nodes[i].parent {
                let is_left = self.nodes[p].children().is_some_and(|(l, _)| l == i);
                let (l, r) = (self.nodes[left].ssvw, self.nodes[right].ssvw);
                if (is_left && l < r) || (!is_left && l > r) {
                    std::mem::swap(&mut left, &mut right);
                    self.nodes[i].kind = Kind::Interior { left, right };
                }
            }

            stack.push(right);
            stack.push(left);
        }
    }

    /// Returns the indices of the leaves, from left to right.
    pub fn leaves(&self) -> Vec<usize> {
        let mut leaves = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = vec![self.root];
        while let Some(i) = stack.pop() {
            match self.nodes[i].kind {
                Kind::Leaf(_) => leaves.push(i),
                Kind::Interior { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }

    /// Returns the feature values of the leaves, from left to right.
    pub fn features(&self) -> Vec<&F> {
        self.leaves()
            .into_iter()
            .filter_map(|i| self.nodes[i].feature())
            .collect()
    }

    /// The index of the root.
    pub const fn root(&self) -> usize {
        self.root
    }

    /// Returns the node at the given index.
    pub fn get(&self, index: usize) -> Option<&Node<F>> {
        self.nodes.get(index)
    }

    /// All nodes in the tree, in arena order.
    pub fn nodes(&self) -> &[Node<F>] {
        &self.nodes
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. A grown tree always has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of edges from the root to the node at the given index.
    pub fn depth_of(&self, index: usize) -> usize {
        std::iter::successors(self.nodes[index].parent, |&p| self.nodes[p].parent).count()
    }
}

impl<F: Eq + Hash + Clone + Send + Sync> SsvTree<F> {
    /// Parallelized version of the `new` method.
    ///
    /// The candidates at each level are scored in parallel, as are the node
    /// weights. The result is identical to that of `new`.
    ///
    /// # Errors
    ///
    /// * If `records` is empty.
    /// * If `candidates` is empty.
    pub fn par_new<X, C, G>(records: &[X], clusterer: &C, feature: G, candidates: &[F]) -> Result<Self, SsvError>
    where
        X: Send + Sync,
        C: Clusterer<X> + Send + Sync + ?Sized,
        G: Fn(&X) -> F,
    {
        let (values, candidates) = Self::prepare(records, feature, candidates)?;
        let mut tree = Self::grow(records, clusterer, &values, candidates, |clusters, indices, features| {
            features
                .par_iter()
                .map(|s| {
                    let (ls, rs) = split(&values, indices, s);
                    clusters.ssv(&ls, &rs)
                })
                .collect()
        });
        tree.par_weigh(records, clusterer);
        Ok(tree)
    }

    /// Parallelized version of the `weigh` method.
    fn par_weigh<X: Send + Sync, C: Clusterer<X> + Send + Sync + ?Sized>(&mut self, records: &[X], clusterer: &C) {
        let weights = self
            .weighable()
            .into_par_iter()
            .map(|(i, ps)| (i, self.pair_ssv(records, clusterer, i, ps)))
            .collect::<Vec<_>>();
        self.set_weights(weights);
    }
}

/// Splits the records at `indices` into those whose feature value is not `s`
/// (`LS`) and those whose feature value is `s` (`RS`).
fn split<F: Eq>(values: &[F], indices: &[usize], s: &F) -> (Vec<usize>, Vec<usize>) {
    let (rs, ls) = indices.iter().copied().partition::<Vec<_>, _>(|&i| values[i] == *s);
    (ls, rs)
}
