//! Built-in model selection and custom decision models.

mod common;

use std::fs;

use rstest::rstest;

use common::{read_text, sum_engine, SCENARIO};
use zscore_svm::library::{DecisionSource, DECISION_MODEL_FILE};
use zscore_svm::{
    decision_model, regression_models, DecisionScorer, DecisionVariant, Error, ModelIoError,
    RegressionVariant, ScorerConfig, SelectionError, SvmType,
};

#[test]
fn generic_pair_is_two_distinct_regression_models() {
    let pair = regression_models(-1).unwrap();
    assert_eq!(pair.variant, RegressionVariant::Generic);
    assert_eq!(pair.mean.svm_type(), SvmType::EpsilonSvr);
    assert_eq!(pair.stdev.svm_type(), SvmType::EpsilonSvr);
    assert_ne!(pair.mean, pair.stdev);
}

#[rstest]
#[case(0, 25.0)]
#[case(3, 42.0)]
#[case(5, 50.0)]
#[case(9, 79.9)]
fn bucket_discriminant_matches_gc_lookup(#[case] discriminant: i32, #[case] gc_percent: f64) {
    let pair = regression_models(discriminant).unwrap();
    assert_eq!(RegressionVariant::for_gc_content(gc_percent), Some(pair.variant));
    assert_eq!(pair.variant.discriminant(), discriminant);
}

#[test]
fn embedded_blobs_match_files_on_disk() {
    let dir = common::models_dir().join("regression");
    let pair = regression_models(RegressionVariant::Gc36To40.discriminant()).unwrap();
    assert_eq!(
        zscore_svm::serialize_model(&pair.mean),
        read_text(&dir.join("gc36_40_mean.model"))
    );
    assert_eq!(
        zscore_svm::serialize_model(&pair.stdev),
        read_text(&dir.join("gc36_40_stdev.model"))
    );
}

#[rstest]
#[case(-2)]
#[case(10)]
#[case(i32::MAX)]
fn unknown_regression_discriminant(#[case] discriminant: i32) {
    assert!(matches!(
        regression_models(discriminant),
        Err(Error::Selection(SelectionError::UnknownDiscriminant { value, .. })) if value == discriminant
    ));
}

#[test]
fn custom_decision_model_ignores_discriminant() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DECISION_MODEL_FILE), SCENARIO).unwrap();

    // 99 is not a built-in discriminant; it must not matter.
    let model = decision_model(Some(dir.path()), 99).unwrap();
    assert_eq!(model, zscore_svm::parse_model(SCENARIO).unwrap());
    assert_eq!(
        DecisionSource::Custom(dir.path()).load().unwrap(),
        model
    );
}

#[test]
fn missing_custom_decision_model() {
    let dir = tempfile::tempdir().unwrap();
    let err = decision_model(Some(dir.path()), 1).unwrap_err();
    match err {
        Error::Io(ModelIoError::FileNotFound { path }) => {
            assert_eq!(path, dir.path().join(DECISION_MODEL_FILE));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn unparsable_custom_decision_model() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DECISION_MODEL_FILE), "svm_type foo_svc\nSV\n").unwrap();
    let err = decision_model(Some(dir.path()), 1).unwrap_err();
    assert!(matches!(err, Error::Io(ModelIoError::Parse { .. })), "{err:?}");
}

#[test]
fn decision_scorer_from_config_uses_model_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DECISION_MODEL_FILE), SCENARIO).unwrap();

    let config = ScorerConfig::builder()
        .decision_variant(DecisionVariant::Dinucleotide)
        .model_dir(dir.path())
        .build()
        .unwrap();
    let scorer = DecisionScorer::from_config(&config).unwrap();
    assert_eq!(scorer.variant(), DecisionVariant::Dinucleotide);
    assert_eq!(scorer.model().svm_type(), SvmType::EpsilonSvr);

    // Inputs are still scaled with the variant's table: all maxima map to 1.
    let value = scorer
        .decision_value(&sum_engine, &[2.01, 1.29, 1.28718])
        .unwrap();
    assert_eq!(value, 3.0);
}

#[test]
fn builtin_decision_models_for_every_variant() {
    for variant in DecisionVariant::ALL {
        let scorer = DecisionScorer::new(None, variant).unwrap();
        assert_eq!(scorer.model(), &decision_model(None, variant.discriminant()).unwrap());
        assert_eq!(scorer.model().labels(), Some(&[1, -1][..]));
    }
}
