use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::TrainingData;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("target column {0} not found in header")]
    MissingTarget(String),

    #[error("non-numeric value {value:?} in column {column} at line {line}")]
    NonNumeric {
        column: String,
        value: String,
        line: u64,
    },

    #[error("dataset has no usable rows")]
    Empty,
}

/// How to treat a row with a missing or non-numeric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Reject the whole dataset. Used where the source data is expected
    /// to be fully clean.
    Fail,
    /// Skip the row and keep loading. The heart-disease source data has
    /// unrecorded measurements, so incomplete rows are dropped before
    /// fitting, matching how the models were originally trained.
    DropRow,
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || matches!(cell.to_ascii_lowercase().as_str(), "na" | "nan" | "null")
}

/// Load a feature matrix and binary target column from a headered CSV.
/// Every non-target column becomes a feature, in header order. The target
/// is positive when the cell parses to a nonzero number.
pub fn load_csv(
    path: &Path,
    target_column: &str,
    missing: MissingPolicy,
) -> Result<TrainingData, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let header = reader.headers()?.clone();
    let target_idx = header
        .iter()
        .position(|name| name == target_column)
        .ok_or_else(|| DatasetError::MissingTarget(target_column.to_string()))?;

    let feature_names: Vec<String> = header
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_idx)
        .map(|(_, name)| name.to_string())
        .collect();

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut dropped = 0usize;

    'rows: for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let mut row = Vec::with_capacity(feature_names.len());
        let mut target = None;
        for (i, cell) in record.iter().enumerate() {
            if is_missing(cell) {
                match missing {
                    MissingPolicy::DropRow => {
                        dropped += 1;
                        continue 'rows;
                    }
                    MissingPolicy::Fail => {
                        return Err(DatasetError::NonNumeric {
                            column: header.get(i).unwrap_or("?").to_string(),
                            value: cell.to_string(),
                            line,
                        });
                    }
                }
            }
            let value: f64 = match cell.trim().parse() {
                Ok(v) => v,
                Err(_) => match missing {
                    MissingPolicy::DropRow => {
                        dropped += 1;
                        continue 'rows;
                    }
                    MissingPolicy::Fail => {
                        return Err(DatasetError::NonNumeric {
                            column: header.get(i).unwrap_or("?").to_string(),
                            value: cell.to_string(),
                            line,
                        });
                    }
                },
            };
            if i == target_idx {
                target = Some(value != 0.0);
            } else {
                row.push(value);
            }
        }

        features.push(row);
        // Header guarantees the target column exists in every full record.
        targets.push(target.ok_or(DatasetError::Empty)?);
    }

    if features.is_empty() {
        return Err(DatasetError::Empty);
    }

    info!(
        path = %path.display(),
        rows = features.len(),
        dropped,
        features = feature_names.len(),
        "loaded training dataset"
    );

    Ok(TrainingData {
        feature_names,
        features,
        targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_features_and_target_in_header_order() {
        let file = write_csv("a,b,Outcome\n1,2,0\n3,4,1\n");
        let data = load_csv(file.path(), "Outcome", MissingPolicy::Fail).unwrap();
        assert_eq!(data.feature_names, vec!["a", "b"]);
        assert_eq!(data.features, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(data.targets, vec![false, true]);
    }

    #[test]
    fn drop_row_policy_skips_incomplete_rows() {
        let file = write_csv("a,b,TenYearCHD\n1,2,0\nNA,4,1\n5,,1\n7,8,1\n");
        let data = load_csv(file.path(), "TenYearCHD", MissingPolicy::DropRow).unwrap();
        assert_eq!(data.n_rows(), 2);
        assert_eq!(data.features, vec![vec![1.0, 2.0], vec![7.0, 8.0]]);
    }

    #[test]
    fn fail_policy_rejects_missing_cells() {
        let file = write_csv("a,b,Outcome\n1,na,0\n");
        let err = load_csv(file.path(), "Outcome", MissingPolicy::Fail).unwrap_err();
        assert!(matches!(err, DatasetError::NonNumeric { .. }));
    }

    #[test]
    fn missing_target_column_is_reported() {
        let file = write_csv("a,b\n1,2\n");
        let err = load_csv(file.path(), "Outcome", MissingPolicy::Fail).unwrap_err();
        assert!(matches!(err, DatasetError::MissingTarget(ref c) if c == "Outcome"));
    }

    #[test]
    fn all_rows_dropped_is_empty() {
        let file = write_csv("a,b,TenYearCHD\nNA,2,0\n");
        let err = load_csv(file.path(), "TenYearCHD", MissingPolicy::DropRow).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }
}
