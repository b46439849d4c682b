//! Subcommands for the CLI.

pub mod data;
pub mod encode;
pub mod transform;

use std::path::PathBuf;

use clap::Subcommand;

/// The subcommands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the data sets in the directory.
    List,
    /// Print the column names of a data set.
    Columns {
        /// The name of the data set.
        #[arg(short('n'), long)]
        name: String,
    },
    /// Build the SSV lookup of one column and write it as CSV.
    Encode {
        /// The name of the data set.
        #[arg(short('n'), long)]
        name: String,

        /// The name or index of the column to encode.
        #[arg(short('c'), long)]
        column: String,

        /// The path of the output CSV file. Printed to stdout if omitted.
        #[arg(short('o'), long("out"))]
        out_path: Option<PathBuf>,

        /// Score the candidate splits in parallel.
        #[arg(short('p'), long, default_value_t = false)]
        parallel: bool,
    },
    /// Turn a data set into a table of numbers.
    ///
    /// With no column lists, numeric columns are kept and textual columns
    /// are encoded as ordinals.
    Transform {
        /// The name of the data set.
        #[arg(short('n'), long)]
        name: String,

        /// Columns kept as numbers.
        #[arg(long, value_delimiter = ',')]
        keep: Vec<String>,

        /// Columns replaced by their SSV positions.
        #[arg(long, value_delimiter = ',')]
        ordinal: Vec<String>,

        /// Columns replaced by one indicator column per distinct value.
        #[arg(long, value_delimiter = ',')]
        one_hot: Vec<String>,

        /// The path of the output CSV file.
        #[arg(short('o'), long("out"))]
        out_path: PathBuf,
    },
}

/// Finds a column by its name, or else by its index.
///
/// # Errors
///
/// * If no column has the name and it is not an index in range.
pub fn column_index(header: &[String], column: &str) -> Result<usize, String> {
    header
        .iter()
        .position(|name| name == column)
        .or_else(|| column.parse::<usize>().ok().filter(|&c| c < header.len()))
        .ok_or_else(|| format!("No column {column:?} in {header:?}"))
}

#[cfg(test)]
mod tests {
    use super::column_index;

    #[test]
    fn columns_by_name_or_index() {
        let header = ["size", "color", "0"].map(ToString::to_string).to_vec();
        assert_eq!(column_index(&header, "color"), Ok(1));
        assert_eq!(column_index(&header, "1"), Ok(1));
        assert_eq!(column_index(&header, "0"), Ok(2));
        assert!(column_index(&header, "3").is_err());
        assert!(column_index(&header, "weight").is_err());
    }
}
