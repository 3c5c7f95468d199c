pub mod breast;
pub mod diabetes;
pub mod heart;

use serde_json::{Map, Value};

use crate::dataset::TrainingData;
use crate::error::ApiError;
use crate::models::{
    forest::ForestParams, svm::SvcParams, tree::TreeParams, GaussianNaiveBayes,
    KNearestNeighbors, LinearSvc, LogisticRegression, ModelHandle, RandomForest, DecisionTree,
};
use crate::preprocess::{extract_lenient, extract_strict, ImputationTable, StandardScaler};
use crate::risk::{aggregate, ModelEnsemble, RiskBands};

/// Field presence policy of a domain. Strict domains treat a missing or
/// non-numeric field as a terminal input error; the imputing domain
/// falls back to training-set means and never fails on missing input.
pub enum InputPolicy {
    Strict,
    Impute(ImputationTable),
}

/// Everything one ensemble domain needs to serve requests: the fitted
/// scaler, the named model set, the threshold ladder, and the input
/// policy. Built once at startup, immutable afterwards, shared across
/// requests behind an `Arc`.
pub struct ServingContext {
    pub domain: &'static str,
    pub fields: &'static [&'static str],
    scaler: StandardScaler,
    ensemble: ModelEnsemble,
    bands: RiskBands,
    policy: InputPolicy,
}

impl std::fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServingContext")
            .field("domain", &self.domain)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Per-request scoring result. Produced fresh per request, never stored.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub risks: Vec<(String, f64)>,
    pub average_risk: f64,
    pub final_status: &'static str,
}

impl ServingContext {
    pub fn new(
        domain: &'static str,
        fields: &'static [&'static str],
        scaler: StandardScaler,
        ensemble: ModelEnsemble,
        bands: RiskBands,
        policy: InputPolicy,
    ) -> Self {
        ServingContext {
            domain,
            fields,
            scaler,
            ensemble,
            bands,
            policy,
        }
    }

    /// The linear per-request pipeline: extract (validate or impute),
    /// normalize, score once per model, aggregate.
    pub fn score_request(&self, payload: &Map<String, Value>) -> Result<RiskReport, ApiError> {
        let raw = match &self.policy {
            InputPolicy::Strict => extract_strict(payload, self.fields)?,
            InputPolicy::Impute(table) => extract_lenient(payload, self.fields, table),
        };
        let standardized = self.scaler.transform(&raw);
        let risks = self.ensemble.score(&standardized);
        let percentages: Vec<f64> = risks.iter().map(|(_, pct)| *pct).collect();
        let (average_risk, final_status) = aggregate(&percentages, &self.bands);
        Ok(RiskReport {
            risks,
            average_risk,
            final_status,
        })
    }

    pub fn model_count(&self) -> usize {
        self.ensemble.len()
    }

    /// Raw training-set means backing the lenient policy, if this domain
    /// imputes.
    pub fn imputation_means(&self) -> Option<&[f64]> {
        match &self.policy {
            InputPolicy::Impute(table) => Some(table.means()),
            InputPolicy::Strict => None,
        }
    }
}

/// Fit the six-classifier ensemble both multi-model domains use, on
/// standardized features. `logreg_epochs` is the per-domain iteration
/// cap for the gradient-descent logistic model.
pub(crate) fn fit_standard_ensemble(
    data: &TrainingData,
    logreg_epochs: usize,
) -> (StandardScaler, ModelEnsemble) {
    let scaler = StandardScaler::fit(&data.features);
    let standardized = scaler.transform_matrix(&data.features);
    let targets = &data.targets;

    let models = vec![
        ModelHandle::probabilistic(
            "Logistic Regression",
            LogisticRegression::fit(&standardized, targets, logreg_epochs, 0.1),
        ),
        ModelHandle::probabilistic("KNN", KNearestNeighbors::fit(&standardized, targets, 23)),
        ModelHandle::decision_only(
            "SVC",
            LinearSvc::fit(&standardized, targets, SvcParams::default()),
        ),
        ModelHandle::probabilistic("Naive Bayes", GaussianNaiveBayes::fit(&standardized, targets)),
        ModelHandle::probabilistic(
            "Decision Tree",
            DecisionTree::fit(&standardized, targets, TreeParams::default()),
        ),
        ModelHandle::probabilistic(
            "Random Forest",
            RandomForest::fit(&standardized, targets, ForestParams::default()),
        ),
    ];

    (scaler, ModelEnsemble::new(models))
}
