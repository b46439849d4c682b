//! Reading tables from comma-separated files and encoding their columns as
//! numbers.

mod column;
mod source;

pub use column::{continuous_lookup, par_continuous_lookup, transform, ColumnKind, Table, Transformation};
pub use source::DataSource;
