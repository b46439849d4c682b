//! Turning a whole data set into numbers.

use std::path::PathBuf;

use ssv_tree::data::{ColumnKind, DataSource, Transformation};

/// Transforms the columns of a data set and writes the table as CSV.
///
/// Columns are emitted in header order. A column named in several lists is
/// emitted once per list. Columns named in no list are dropped, unless all
/// lists are empty, in which case each column is transformed by its kind.
///
/// # Errors
///
/// * If the data set cannot be read.
/// * If a named column does not exist.
/// * If a kept column is not numeric.
/// * If the output cannot be written.
pub fn transform(
    source: &DataSource,
    name: &str,
    keep: &[String],
    ordinal: &[String],
    one_hot: &[String],
    out_path: PathBuf,
) -> Result<(), String> {
    let header = source.columns(name)?;
    let records = source.load_records(name)?;

    let plan = if keep.is_empty() && ordinal.is_empty() && one_hot.is_empty() {
        default_plan(&records, header.len())
    } else {
        named_plan(&header, keep, ordinal, one_hot)?
    };
    ftlog::info!("Transforming {name} with plan {plan:?}");

    let table = ssv_tree::data::transform(&header, &records, &plan)?;
    table.write_csv(&out_path)?;
    ftlog::info!(
        "Wrote {} rows of {} columns to {out_path:?}",
        table.rows.len(),
        table.header.len()
    );

    Ok(())
}

/// Keeps numeric columns and encodes textual ones as ordinals.
fn default_plan(records: &[Vec<String>], n: usize) -> Vec<(usize, Transformation)> {
    ColumnKind::infer_all(records, n)
        .into_iter()
        .enumerate()
        .map(|(c, kind)| match kind {
            ColumnKind::Numeric => (c, Transformation::None),
            ColumnKind::Textual => (c, Transformation::Ordinal),
        })
        .collect()
}

/// Pairs each column, given by name or index, with its transformation, in
/// header order.
///
/// # Errors
///
/// * If a column does not exist.
fn named_plan(
    header: &[String],
    keep: &[String],
    ordinal: &[String],
    one_hot: &[String],
) -> Result<Vec<(usize, Transformation)>, String> {
    let lists = [
        (keep, Transformation::None),
        (ordinal, Transformation::Ordinal),
        (one_hot, Transformation::IdentityVector),
    ]
    .into_iter()
    .map(|(columns, t)| {
        columns
            .iter()
            .map(|column| super::column_index(header, column))
            .collect::<Result<Vec<_>, _>>()
            .map(|indices| (indices, t))
    })
    .collect::<Result<Vec<_>, _>>()?;

    Ok((0..header.len())
        .flat_map(|c| {
            lists
                .iter()
                .filter(move |(indices, _)| indices.contains(&c))
                .map(move |&(_, t)| (c, t))
        })
        .collect())
}
