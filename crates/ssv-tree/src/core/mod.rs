//! The core traits and structs for growing separation-score trees.

pub mod cluster;
mod error;
pub mod lookup;
pub mod score;
pub mod tree;

pub use cluster::Clusterer;
pub use error::SsvError;
pub use lookup::{build_lookup, par_build_lookup, Entry, Lookup};
pub use tree::SsvTree;
