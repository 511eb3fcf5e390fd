//! Multinomial logistic-regression wrapper with manual k-fold
//! cross-validation and JSON persistence.

use std::path::Path;

use linfa::prelude::*;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use refmatch_core::errors::{RefMatchResult, TrainingError};

const MAX_ITERATIONS: u64 = 200;

/// A fitted multinomial logistic-regression model over string labels.
pub struct Classifier {
    model: MultiFittedLogisticRegression<f64, String>,
}

impl Classifier {
    /// Fit on the full training set.
    pub fn fit(records: &Array2<f64>, labels: &[String]) -> RefMatchResult<Self> {
        let dataset = Dataset::new(records.clone(), Array1::from(labels.to_vec()));
        let model = MultiLogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)
            .map_err(|e| TrainingError::FitFailed {
                reason: e.to_string(),
            })?;
        Ok(Self { model })
    }

    /// Predicted label for one feature row.
    pub fn predict_one(&self, features: &[f64]) -> Option<String> {
        let row = Array2::from_shape_vec((1, features.len()), features.to_vec()).ok()?;
        let predictions = self.model.predict(&row);
        predictions.first().cloned()
    }

    /// Persist the model as JSON.
    pub fn save(&self, path: &Path) -> RefMatchResult<()> {
        let json = serde_json::to_string(&self.model).map_err(|e| {
            TrainingError::Serialization {
                reason: e.to_string(),
            }
        })?;
        std::fs::write(path, json).map_err(|e| {
            TrainingError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Restore a previously saved model.
    pub fn load(path: &Path) -> RefMatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TrainingError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let model = serde_json::from_str(&content).map_err(|e| {
            TrainingError::Serialization {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { model })
    }
}

/// Mean k-fold cross-validated accuracy.
///
/// Folds are contiguous index chunks (deterministic for a fixed input
/// order). A fold whose training split lacks a class fails to fit and is
/// skipped; `None` when no fold could be evaluated.
pub fn cross_validate(records: &Array2<f64>, labels: &[String], folds: usize) -> Option<f64> {
    let n = labels.len();
    if folds < 2 || n < folds {
        return None;
    }

    let mut accuracies = Vec::with_capacity(folds);
    let fold_size = n.div_ceil(folds);

    for fold in 0..folds {
        let test_start = fold * fold_size;
        let test_end = (test_start + fold_size).min(n);
        if test_start >= test_end {
            continue;
        }

        let test_idx: Vec<usize> = (test_start..test_end).collect();
        let train_idx: Vec<usize> = (0..n).filter(|i| !(test_start..test_end).contains(i)).collect();

        let train_records = records.select(Axis(0), &train_idx);
        let train_labels: Vec<String> = train_idx.iter().map(|&i| labels[i].clone()).collect();

        let classifier = match Classifier::fit(&train_records, &train_labels) {
            Ok(c) => c,
            Err(e) => {
                debug!(fold, error = %e, "fold failed to fit, skipping");
                continue;
            }
        };

        let test_records = records.select(Axis(0), &test_idx);
        let predictions = classifier.model.predict(&test_records);
        let correct = test_idx
            .iter()
            .zip(predictions.iter())
            .filter(|(&i, pred)| labels[i] == **pred)
            .count();
        accuracies.push(correct as f64 / test_idx.len() as f64);
    }

    if accuracies.is_empty() {
        None
    } else {
        Some(accuracies.iter().sum::<f64>() / accuracies.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linearly separable two-class set: label follows the first feature.
    fn separable(n: usize) -> (Array2<f64>, Vec<String>) {
        let mut rows = Vec::with_capacity(n * 2);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let positive = i % 2 == 0;
            rows.push(if positive { 10.0 + i as f64 } else { -10.0 - i as f64 });
            rows.push(1.0);
            labels.push(if positive { "yes".to_string() } else { "no".to_string() });
        }
        (Array2::from_shape_vec((n, 2), rows).unwrap(), labels)
    }

    #[test]
    fn fit_and_predict_separable_data() {
        let (records, labels) = separable(20);
        let classifier = Classifier::fit(&records, &labels).unwrap();
        assert_eq!(classifier.predict_one(&[15.0, 1.0]).as_deref(), Some("yes"));
        assert_eq!(classifier.predict_one(&[-15.0, 1.0]).as_deref(), Some("no"));
    }

    #[test]
    fn cross_validation_scores_separable_data_highly() {
        let (records, labels) = separable(20);
        let accuracy = cross_validate(&records, &labels, 5).unwrap();
        assert!(accuracy > 0.8, "expected high accuracy, got {accuracy}");
    }

    #[test]
    fn cross_validation_refuses_degenerate_folds() {
        let (records, labels) = separable(4);
        assert!(cross_validate(&records, &labels, 1).is_none());
        assert!(cross_validate(&records, &labels, 5).is_none());
    }

    #[test]
    fn model_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let (records, labels) = separable(20);
        let classifier = Classifier::fit(&records, &labels).unwrap();
        classifier.save(&path).unwrap();

        let restored = Classifier::load(&path).unwrap();
        assert_eq!(
            restored.predict_one(&[15.0, 1.0]),
            classifier.predict_one(&[15.0, 1.0])
        );
    }
}
