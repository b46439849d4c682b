//! Comma-separated data sets in a directory.

use std::path::{Path, PathBuf};

/// A directory of comma-separated data sets.
///
/// Every file in the directory is a data set. Its first line is a header of
/// column names and every following line is a record.
#[derive(Debug, Clone)]
pub struct DataSource {
    /// The directory holding the data sets.
    root: PathBuf,
}

impl DataSource {
    /// Creates a new `DataSource` over the given directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The directory holding the data sets.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path to the named data set.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// The names of the data sets, in sorted order.
    ///
    /// Names that are not valid UTF-8 are converted lossily.
    ///
    /// # Errors
    ///
    /// * If the directory cannot be read.
    pub fn dataset_names(&self) -> Result<Vec<String>, String> {
        let mut names = std::fs::read_dir(&self.root)
            .map_err(|e| e.to_string())?
            .map(|entry| entry.map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }

    /// The column names of the named data set.
    ///
    /// An empty file has no columns.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read.
    pub fn columns(&self, name: &str) -> Result<Vec<String>, String> {
        let mut reader = self.reader(name)?;
        let header = reader.headers().map_err(|e| e.to_string())?;
        Ok(header.iter().map(ToString::to_string).collect())
    }

    /// The records of the named data set, as strings.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read.
    /// * If any record has a different number of fields than the header.
    pub fn load_records(&self, name: &str) -> Result<Vec<Vec<String>>, String> {
        let mut reader = self.reader(name)?;
        reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(ToString::to_string).collect())
                    .map_err(|e| e.to_string())
            })
            .collect()
    }

    /// The records of the named data set, parsed as numbers.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read.
    /// * If any field cannot be parsed as a number.
    pub fn load(&self, name: &str) -> Result<Vec<Vec<f64>>, String> {
        let records = self.load_records(name)?;
        ftlog::debug!("Parsing {} records of {name}", records.len());
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .iter()
                    .map(|field| {
                        field
                            .trim()
                            .parse::<f64>()
                            .map_err(|_| format!("Could not parse {field:?} as a number in record {i} of {name}"))
                    })
                    .collect()
            })
            .collect()
    }

    /// A CSV reader over the named data set.
    fn reader(&self, name: &str) -> Result<csv::Reader<std::fs::File>, String> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(self.path_of(name))
            .map_err(|e| e.to_string())
    }
}
