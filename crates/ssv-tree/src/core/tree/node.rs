//! The `Node`s of an `SsvTree`.

/// What a `Node` holds, depending on whether it is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind<F> {
    /// A leaf holding the feature value shared by all its records.
    Leaf(F),
    /// An interior node with the indices of its two children in the arena.
    Interior {
        /// The left child.
        left: usize,
        /// The right child.
        right: usize,
    },
}

/// A node in the arena of an `SsvTree`.
///
/// Parent, sibling and child links are indices into the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<F> {
    /// Leaf or interior.
    pub(crate) kind: Kind<F>,
    /// The indices of the records assigned to this node.
    pub(crate) data: Vec<usize>,
    /// The interior node owning this node. `None` for the root.
    pub(crate) parent: Option<usize>,
    /// The other child of the parent. `None` for the root.
    pub(crate) sibling: Option<usize>,
    /// The separation score against the sibling of the parent.
    pub(crate) ssvw: i64,
}

impl<F> Node<F> {
    /// A new leaf with no links.
    pub(crate) const fn leaf(feature: F, data: Vec<usize>) -> Self {
        Self {
            kind: Kind::Leaf(feature),
            data,
            parent: None,
            sibling: None,
            ssvw: 0,
        }
    }

    /// A new interior node with no parent or sibling.
    pub(crate) const fn interior(left: usize, right: usize, data: Vec<usize>) -> Self {
        Self {
            kind: Kind::Interior { left, right },
            data,
            parent: None,
            sibling: None,
            ssvw: 0,
        }
    }

    /// Leaf or interior.
    pub const fn kind(&self) -> &Kind<F> {
        &self.kind
    }

    /// Whether the node is a leaf.
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }

    /// The feature value of a leaf.
    pub const fn feature(&self) -> Option<&F> {
        match &self.kind {
            Kind::Leaf(feature) => Some(feature),
            Kind::Interior { .. } => None,
        }
    }

    /// The left and right children of an interior node.
    pub const fn children(&self) -> Option<(usize, usize)> {
        match self.kind {
            Kind::Leaf(_) => None,
            Kind::Interior { left, right } => Some((left, right)),
        }
    }

    /// The indices of the records assigned to this node.
    pub fn data(&self) -> &[usize] {
        &self.data
    }

    /// The number of records assigned to this node.
    pub fn cardinality(&self) -> usize {
        self.data.len()
    }

    /// The index of the parent.
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// The index of the sibling.
    pub const fn sibling(&self) -> Option<usize> {
        self.sibling
    }

    /// The separation score against the sibling of the parent.
    pub const fn ssvw(&self) -> i64 {
        self.ssvw
    }
}
