use std::path::Path;

use tracing::info;

use super::{fit_standard_ensemble, InputPolicy, ServingContext};
use crate::config::Settings;
use crate::dataset::{load_csv, MissingPolicy, TrainingData};
use crate::error::InitError;
use crate::preprocess::ImputationTable;
use crate::risk::{RiskBand, RiskBands};

/// Request field names, identical to the dataset's column names and
/// order so imputation means line up positionally.
pub const FIELDS: [&str; 15] = [
    "male",
    "age",
    "education",
    "currentSmoker",
    "cigsPerDay",
    "BPMeds",
    "prevalentStroke",
    "prevalentHyp",
    "diabetes",
    "totChol",
    "sysBP",
    "diaBP",
    "BMI",
    "heartRate",
    "glucose",
];

pub const BANDS: RiskBands = RiskBands::new(
    &[
        RiskBand {
            upper: 20.0,
            label: "Healthy",
        },
        RiskBand {
            upper: 40.0,
            label: "Mild Risk",
        },
        RiskBand {
            upper: 70.0,
            label: "Unhealthy",
        },
    ],
    "High Heart Disease Risk",
);

const TARGET_COLUMN: &str = "TenYearCHD";
const LOGREG_EPOCHS: usize = 300;

/// Fit the heart-disease serving context from already-loaded training
/// data. The imputation table is the raw column means of the data the
/// models were fitted on.
pub fn context_from_data(data: &TrainingData) -> Result<ServingContext, InitError> {
    if data.n_features() != FIELDS.len() {
        return Err(InitError::SchemaMismatch {
            domain: "heart",
            expected: FIELDS.len(),
            actual: data.n_features(),
        });
    }
    let table = ImputationTable::new(data.column_means());
    let (scaler, ensemble) = fit_standard_ensemble(data, LOGREG_EPOCHS);
    Ok(ServingContext::new(
        "heart",
        &FIELDS,
        scaler,
        ensemble,
        BANDS,
        InputPolicy::Impute(table),
    ))
}

/// Load the configured dataset and fit the ensemble. The source data has
/// unrecorded measurements, so incomplete rows are dropped before
/// fitting.
pub fn build(settings: &Settings) -> Result<ServingContext, InitError> {
    let data = load_csv(
        Path::new(&settings.datasets.heart),
        TARGET_COLUMN,
        MissingPolicy::DropRow,
    )?;
    let context = context_from_data(&data)?;
    info!(
        rows = data.n_rows(),
        models = context.model_count(),
        "heart-disease ensemble fitted"
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_match_the_reference_ladder() {
        assert_eq!(BANDS.classify(19.99), "Healthy");
        assert_eq!(BANDS.classify(20.0), "Mild Risk");
        assert_eq!(BANDS.classify(40.0), "Unhealthy");
        assert_eq!(BANDS.classify(70.0), "High Heart Disease Risk");
    }
}
