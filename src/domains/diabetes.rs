use std::path::Path;

use tracing::info;

use super::{fit_standard_ensemble, InputPolicy, ServingContext};
use crate::config::Settings;
use crate::dataset::{load_csv, MissingPolicy, TrainingData};
use crate::error::InitError;
use crate::risk::{RiskBand, RiskBands};

/// Request field names, in the exact order the scaler and models were
/// fitted (the dataset's column order).
pub const FIELDS: [&str; 8] = [
    "pregnancies",
    "glucose",
    "bloodPressure",
    "skinThickness",
    "insulin",
    "bmi",
    "dpf",
    "age",
];

pub const BANDS: RiskBands = RiskBands::new(
    &[
        RiskBand {
            upper: 30.0,
            label: "Healthy",
        },
        RiskBand {
            upper: 50.0,
            label: "Mild Risk",
        },
        RiskBand {
            upper: 70.0,
            label: "Unhealthy",
        },
    ],
    "Diabetic",
);

const TARGET_COLUMN: &str = "Outcome";
const LOGREG_EPOCHS: usize = 200;

/// Fit the diabetes serving context from already-loaded training data.
pub fn context_from_data(data: &TrainingData) -> Result<ServingContext, InitError> {
    if data.n_features() != FIELDS.len() {
        return Err(InitError::SchemaMismatch {
            domain: "diabetes",
            expected: FIELDS.len(),
            actual: data.n_features(),
        });
    }
    let (scaler, ensemble) = fit_standard_ensemble(data, LOGREG_EPOCHS);
    Ok(ServingContext::new(
        "diabetes",
        &FIELDS,
        scaler,
        ensemble,
        BANDS,
        InputPolicy::Strict,
    ))
}

/// Load the configured dataset and fit the ensemble. The source data is
/// expected to be fully clean, so any missing cell fails startup.
pub fn build(settings: &Settings) -> Result<ServingContext, InitError> {
    let data = load_csv(
        Path::new(&settings.datasets.diabetes),
        TARGET_COLUMN,
        MissingPolicy::Fail,
    )?;
    let context = context_from_data(&data)?;
    info!(
        rows = data.n_rows(),
        models = context.model_count(),
        "diabetes ensemble fitted"
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_match_the_reference_ladder() {
        assert_eq!(BANDS.classify(0.0), "Healthy");
        assert_eq!(BANDS.classify(30.0), "Mild Risk");
        assert_eq!(BANDS.classify(49.99), "Mild Risk");
        assert_eq!(BANDS.classify(50.0), "Unhealthy");
        assert_eq!(BANDS.classify(70.0), "Diabetic");
    }

    #[test]
    fn wrong_column_count_is_a_schema_mismatch() {
        let data = TrainingData {
            feature_names: vec!["a".to_string(), "b".to_string()],
            features: vec![vec![1.0, 2.0]],
            targets: vec![true],
        };
        let err = context_from_data(&data).unwrap_err();
        assert!(matches!(
            err,
            InitError::SchemaMismatch {
                domain: "diabetes",
                expected: 8,
                actual: 2,
            }
        ));
    }
}
