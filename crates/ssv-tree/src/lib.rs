#![doc = include_str!("../README.md")]

mod core;
pub mod data;
pub mod utils;

pub use crate::core::{
    build_lookup, cluster, lookup, par_build_lookup, score, tree, Clusterer, Entry, Lookup, SsvError, SsvTree,
};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
