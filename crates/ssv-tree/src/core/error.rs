//! Errors raised while building a lookup.

/// Invalid inputs to the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsvError {
    /// There were no records to partition.
    EmptyRecords,
    /// There were no candidate features to split on.
    EmptyFeatures,
}

impl std::fmt::Display for SsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRecords => write!(f, "invalid input: cannot partition an empty set of records"),
            Self::EmptyFeatures => write!(f, "invalid input: no candidate features to split on"),
        }
    }
}

impl std::error::Error for SsvError {}
