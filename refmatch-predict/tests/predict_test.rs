//! Integration tests for predictor training over the fixture corpus.

use refmatch_core::config::MatchConfig;
use refmatch_core::models::TrainStatus;
use refmatch_predict::features::FEATURE_DIM;
use refmatch_predict::{OutcomePredictor, ResponsePredictor};

fn fixture_config(models_dir: std::path::PathBuf) -> MatchConfig {
    MatchConfig {
        snapshot_root: test_fixtures::snapshots_root(),
        models_dir,
        ..Default::default()
    }
}

#[test]
fn response_predictor_trains_on_fixture_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().into());

    let mut predictor = ResponsePredictor::new(&config);
    // MOR holds 12 labeled responses across accepted/declined/agreed;
    // AOP referees are pending (unlabeled) and contribute nothing.
    let report = predictor.train(None).unwrap();

    assert_eq!(report.status, TrainStatus::Trained);
    assert_eq!(report.n_samples, 12);
    assert_eq!(report.classes, vec!["accepted", "agreed", "declined"]);
    assert!(report.cv_accuracy.is_some());
    let accuracy = report.cv_accuracy.unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    // A trained model predicts some known class for any feature row.
    let label = predictor.predict(&[10.0, 1.0, 1.0, 2.0, 5.0, 20.0, 1.0]).unwrap();
    assert!(report.classes.contains(&label));
}

#[test]
fn outcome_predictor_trains_with_three_decision_classes() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().into());

    let mut predictor = OutcomePredictor::new(&config);
    let report = predictor.train(None).unwrap();

    assert_eq!(report.status, TrainStatus::Trained);
    // One outcome sample per (decided manuscript, referee) pair.
    assert_eq!(report.n_samples, 12);
    assert_eq!(report.classes, vec!["accept", "reject", "revise"]);
}

#[test]
fn save_writes_only_trained_models_and_load_restores() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().join("models"));

    let mut predictor = ResponsePredictor::new(&config);
    predictor.train(None).unwrap();
    assert!(predictor.save().unwrap());

    let mut restored = ResponsePredictor::new(&config);
    assert!(!restored.is_trained());
    assert!(restored.load().unwrap());
    assert!(restored.is_trained());

    let row = [10.0, 1.0, 1.0, 2.0, 5.0, 20.0, 1.0];
    assert_eq!(restored.predict(&row), predictor.predict(&row));
}

#[test]
fn save_surfaces_unwritable_models_dir() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the models directory should go.
    let blocker = dir.path().join("models");
    std::fs::write(&blocker, b"in the way").unwrap();
    let config = fixture_config(blocker.clone());

    let mut predictor = ResponsePredictor::new(&config);
    predictor.train(None).unwrap();

    let err = predictor.save().expect_err("save into a file path must fail");
    assert!(err.to_string().contains(&blocker.display().to_string()));
}

#[test]
fn single_journal_with_one_class_is_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path().into());

    // AOP alone has only pending (unlabeled) referee statuses.
    let mut predictor = ResponsePredictor::new(&config);
    let report = predictor.train(Some(&["AOP".to_string()])).unwrap();
    assert_eq!(report.status, TrainStatus::Empty);
    assert_eq!(report.n_samples, 0);
    assert!(!predictor.save().unwrap());
}

#[test]
fn feature_dim_matches_extraction() {
    assert_eq!(FEATURE_DIM, 7);
}
