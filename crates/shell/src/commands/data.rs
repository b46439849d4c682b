//! Inspecting the data sets in a directory.

use ssv_tree::data::DataSource;

/// Prints the names of the data sets, one per line.
///
/// # Errors
///
/// * If the directory cannot be read.
pub fn list(source: &DataSource) -> Result<(), String> {
    let names = source.dataset_names()?;
    ftlog::info!("Found {} data sets in {:?}", names.len(), source.root());
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Prints the column names of a data set, with their kinds, one per line.
///
/// # Errors
///
/// * If the data set cannot be read.
pub fn columns(source: &DataSource, name: &str) -> Result<(), String> {
    let header = source.columns(name)?;
    let records = source.load_records(name)?;
    let kinds = ssv_tree::data::ColumnKind::infer_all(&records, header.len());
    for (column, kind) in header.iter().zip(kinds) {
        println!("{column}\t{kind:?}");
    }
    Ok(())
}
