//! Encoding one column of a data set.

use std::path::PathBuf;

use ssv_tree::data::{continuous_lookup, par_continuous_lookup, DataSource};

/// Builds the SSV lookup of a column and writes it as CSV.
///
/// # Arguments
///
/// * `source`: the directory of data sets.
/// * `name`: the name of the data set.
/// * `column`: the name or index of the column.
/// * `out_path`: where to write the lookup. Stdout if `None`.
/// * `parallel`: whether to score candidate splits in parallel.
///
/// # Errors
///
/// * If the data set cannot be read.
/// * If the column does not exist.
/// * If the data set has no records.
/// * If the output cannot be written.
pub fn encode(
    source: &DataSource,
    name: &str,
    column: &str,
    out_path: Option<PathBuf>,
    parallel: bool,
) -> Result<(), String> {
    let header = source.columns(name)?;
    let c = super::column_index(&header, column)?;
    let records = source.load_records(name)?;
    ftlog::info!("Encoding column {} of {name} with {} records", header[c], records.len());

    let start = std::time::Instant::now();
    let lookup = if parallel {
        par_continuous_lookup(&records, c)?
    } else {
        continuous_lookup(&records, c)?
    };
    ftlog::info!(
        "Built lookup of {} features in {:.2e} seconds",
        lookup.len(),
        start.elapsed().as_secs_f64()
    );

    match out_path {
        Some(path) => {
            lookup.write_csv(&path)?;
            ftlog::info!("Wrote lookup to {path:?}");
            Ok(())
        }
        None => lookup.to_csv_writer(std::io::stdout().lock()),
    }
}
