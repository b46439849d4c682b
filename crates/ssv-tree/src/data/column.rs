//! Turning the columns of a table of strings into numbers.

use std::{io::Write, path::Path, str::FromStr};

use crate::{build_lookup, cluster::Singletons, par_build_lookup, utils, Lookup};

/// The kind of values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every value parses as a number.
    Numeric,
    /// Some value does not parse as a number.
    Textual,
}

impl ColumnKind {
    /// Infers the kind of a column from its values.
    ///
    /// A column without values is `Numeric`.
    pub fn infer<S: AsRef<str>, I: IntoIterator<Item = S>>(values: I) -> Self {
        if values.into_iter().all(|v| v.as_ref().trim().parse::<f64>().is_ok()) {
            Self::Numeric
        } else {
            Self::Textual
        }
    }

    /// Infers the kind of each of the first `n` columns of the records.
    ///
    /// Missing fields are ignored.
    #[must_use]
    pub fn infer_all(records: &[Vec<String>], n: usize) -> Vec<Self> {
        (0..n)
            .map(|c| Self::infer(records.iter().filter_map(|r| r.get(c))))
            .collect()
    }
}

/// How a column is turned into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transformation {
    /// Keep a numeric column as it is.
    None,
    /// Replace each value by its position in the SSV lookup of the column.
    #[default]
    Ordinal,
    /// One column per distinct value, set to `1` where the record has that
    /// value and `0` elsewhere.
    IdentityVector,
}

impl FromStr for Transformation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "ordinal" => Ok(Self::Ordinal),
            "identity-vector" | "one-hot" => Ok(Self::IdentityVector),
            _ => Err(format!("Unknown transformation: {s}")),
        }
    }
}

/// A table of numbers with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The column names.
    pub header: Vec<String>,
    /// The rows.
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Writes the table as CSV, with its header, to the given writer.
    ///
    /// # Errors
    ///
    /// * If the writer fails.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), String> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.header).map_err(|e| e.to_string())?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(ToString::to_string))
                .map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())
    }

    /// Writes the table to a `.csv` file at the given path.
    ///
    /// # Errors
    ///
    /// * If the file cannot be created or written to.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
        self.to_csv_writer(file)
    }
}

/// The values of a column, one per record.
///
/// # Errors
///
/// * If any record has no field at `column`.
fn column_values(records: &[Vec<String>], column: usize) -> Result<Vec<&str>, String> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            r.get(column)
                .map(String::as_str)
                .ok_or_else(|| format!("Record {i} has no column {column}"))
        })
        .collect()
}

/// Builds the SSV lookup of a column, with every record in its own cluster and
/// the distinct values of the column, in first-seen order, as candidates.
///
/// # Errors
///
/// * If there are no records.
/// * If any record has no field at `column`.
pub fn continuous_lookup(records: &[Vec<String>], column: usize) -> Result<Lookup<String>, String> {
    let values = column_values(records, column)?;
    let features = utils::distinct(values.iter().map(ToString::to_string));
    build_lookup(&values, &Singletons, ToString::to_string, &features).map_err(|e| e.to_string())
}

/// Parallelized version of `continuous_lookup`.
///
/// # Errors
///
/// * If there are no records.
/// * If any record has no field at `column`.
pub fn par_continuous_lookup(records: &[Vec<String>], column: usize) -> Result<Lookup<String>, String> {
    let values = column_values(records, column)?;
    let features = utils::distinct(values.iter().map(ToString::to_string));
    par_build_lookup(&values, &Singletons, ToString::to_string, &features).map_err(|e| e.to_string())
}

/// Applies a transformation to each selected column of a table of strings.
///
/// Columns are emitted in the order of `plan`. Columns not in `plan` are
/// dropped.
///
/// # Arguments
///
/// * `header`: the column names.
/// * `records`: the rows of the table.
/// * `plan`: pairs of column index and transformation.
///
/// # Errors
///
/// * If a column index is out of range.
/// * If a column transformed with `None` is not numeric.
/// * If an `Ordinal` lookup cannot be built, e.g. with no records.
pub fn transform(header: &[String], records: &[Vec<String>], plan: &[(usize, Transformation)]) -> Result<Table, String> {
    let mut names = Vec::new();
    let mut columns = Vec::new();

    for &(c, transformation) in plan {
        let name = header
            .get(c)
            .ok_or_else(|| format!("Column {c} is out of range for {} columns", header.len()))?;
        let values = column_values(records, c)?;

        match transformation {
            Transformation::None => {
                let column = values
                    .iter()
                    .map(|v| {
                        v.trim()
                            .parse::<f64>()
                            .map_err(|_| format!("Column {name} is not numeric: {v:?}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                names.push(name.clone());
                columns.push(column);
            }
            Transformation::Ordinal => {
                let lookup = continuous_lookup(records, c)?.to_map();
                let column = values
                    .iter()
                    .map(|&v| lookup.get(v).copied().unwrap_or(f64::NAN))
                    .collect();
                names.push(name.clone());
                columns.push(column);
            }
            Transformation::IdentityVector => {
                for value in utils::distinct(values.iter().copied()) {
                    names.push(format!("{name}={value}"));
                    columns.push(values.iter().map(|&v| if v == value { 1.0 } else { 0.0 }).collect());
                }
            }
        }
        ftlog::debug!("Transformed column {name} with {transformation:?}");
    }

    let rows = (0..records.len())
        .map(|r| columns.iter().map(|column| column[r]).collect())
        .collect();

    Ok(Table { header: names, rows })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::{continuous_lookup, transform, ColumnKind, Transformation};

    fn table() -> (Vec<String>, Vec<Vec<String>>) {
        let header = ["size", "color"].map(ToString::to_string).to_vec();
        let records = [["1.5", "red"], ["2", "red"], ["-3", "blue"], ["4e2", "green"]]
            .into_iter()
            .map(|r| r.map(ToString::to_string).to_vec())
            .collect();
        (header, records)
    }

    #[test]
    fn kinds() {
        let (_, records) = table();
        assert_eq!(
            ColumnKind::infer_all(&records, 2),
            vec![ColumnKind::Numeric, ColumnKind::Textual]
        );
        assert_eq!(ColumnKind::infer(Vec::<String>::new()), ColumnKind::Numeric);
    }

    #[test]
    fn parse_transformations() {
        assert_eq!("None".parse::<Transformation>(), Ok(Transformation::None));
        assert_eq!("ordinal".parse::<Transformation>(), Ok(Transformation::Ordinal));
        assert_eq!("one-hot".parse::<Transformation>(), Ok(Transformation::IdentityVector));
        assert!("bag-of-words".parse::<Transformation>().is_err());
        assert_eq!(Transformation::default(), Transformation::Ordinal);
    }

    #[test]
    fn lookup_of_a_column() {
        let (_, records) = table();
        let lookup = continuous_lookup(&records, 1).unwrap();
        assert_eq!(lookup.features().collect::<Vec<_>>(), vec!["green", "blue", "red"]);
        assert!(continuous_lookup(&records, 2).is_err());
        assert!(continuous_lookup(&[], 0).is_err());
    }

    #[test]
    fn transform_columns() {
        let (header, records) = table();
        let plan = [
            (1, Transformation::Ordinal),
            (0, Transformation::None),
            (1, Transformation::IdentityVector),
        ];
        let table = transform(&header, &records, &plan).unwrap();

        assert_eq!(
            table.header,
            vec!["color", "size", "color=red", "color=blue", "color=green"]
        );
        assert_eq!(table.rows.len(), 4);
        assert!(approx_eq!(f64, table.rows[0][0], 1.0 / 3.0, ulps = 2));
        assert!(approx_eq!(f64, table.rows[2][0], 0.0));
        assert_eq!(table.rows[3][1..], [400.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn transform_errors() {
        let (header, records) = table();
        assert!(transform(&header, &records, &[(1, Transformation::None)]).is_err());
        assert!(transform(&header, &records, &[(5, Transformation::Ordinal)]).is_err());
    }
}
