//! Tests for reading data sets and transforming their columns.

use std::path::Path;

use float_cmp::approx_eq;
use ssv_tree::data::{continuous_lookup, transform, ColumnKind, DataSource, Transformation};
use tempdir::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new("ssv-data").unwrap();
    write(dir.path(), "points.csv", "x,y\n1.0,2.5\n-3,4e1\n");
    write(dir.path(), "colors.csv", "id,color\n1,red\n2,red\n3,blue\n4,green\n");
    write(dir.path(), "empty.csv", "");
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    dir
}

#[test]
fn names() {
    let dir = fixture();
    let source = DataSource::new(dir.path());
    assert_eq!(source.root(), dir.path());
    assert_eq!(
        source.dataset_names().unwrap(),
        vec!["colors.csv", "empty.csv", "points.csv"]
    );
    assert!(DataSource::new(dir.path().join("missing")).dataset_names().is_err());
}

#[cfg(unix)]
#[test]
fn names_that_are_not_utf8() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = fixture();
    let name = OsStr::from_bytes(b"bad-\xFF.csv");
    if std::fs::write(dir.path().join(name), "a\n1\n").is_err() {
        // Some file systems reject such names.
        return;
    }

    let names = DataSource::new(dir.path()).dataset_names().unwrap();
    assert_eq!(names.len(), 4);
    assert!(names.contains(&"bad-\u{FFFD}.csv".to_string()));
}

#[test]
fn columns_and_records() {
    let dir = fixture();
    let source = DataSource::new(dir.path());

    assert_eq!(source.columns("points.csv").unwrap(), vec!["x", "y"]);
    assert!(source.columns("empty.csv").unwrap().is_empty());
    assert!(source.columns("missing.csv").is_err());

    assert_eq!(source.load("points.csv").unwrap(), vec![vec![1.0, 2.5], vec![-3.0, 40.0]]);
    assert!(source.load("colors.csv").is_err());

    let records = source.load_records("colors.csv").unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[2], vec!["3", "blue"]);
    assert_eq!(
        ColumnKind::infer_all(&records, 2),
        vec![ColumnKind::Numeric, ColumnKind::Textual]
    );
}

#[test]
fn encode_a_data_set() {
    let dir = fixture();
    let source = DataSource::new(dir.path());
    let header = source.columns("colors.csv").unwrap();
    let records = source.load_records("colors.csv").unwrap();

    let lookup = continuous_lookup(&records, 1).unwrap();
    assert!(approx_eq!(f64, lookup.get(&"red".to_string()).unwrap(), 1.0 / 3.0, ulps = 2));

    let table = transform(
        &header,
        &records,
        &[(0, Transformation::None), (1, Transformation::Ordinal)],
    )
    .unwrap();
    let out = dir.path().join("nested").join("colors-encoded.csv");
    table.write_csv(&out).unwrap();

    let encoded = DataSource::new(dir.path().join("nested"));
    assert_eq!(encoded.columns("colors-encoded.csv").unwrap(), vec!["id", "color"]);
    let rows = encoded.load("colors-encoded.csv").unwrap();
    assert_eq!(rows.len(), 4);
    assert!(approx_eq!(f64, rows[0][1], 1.0 / 3.0, ulps = 2));
    assert!(approx_eq!(f64, rows[3][0], 4.0));
}
