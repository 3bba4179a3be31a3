//! Parsing and writing of the libsvm text format.

mod common;

use rstest::rstest;

use common::{blob_paths, read_text, SCENARIO};
use zscore_svm::{parse_model, serialize_model, Kernel, ParseError, SvmType};

#[test]
fn every_blob_parses_and_writes_back_verbatim() {
    let paths = blob_paths();
    assert_eq!(paths.len(), 26, "11 regression pairs and 4 decision models");

    for path in paths {
        let text = read_text(&path);
        let model = parse_model(&text)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
        assert_eq!(serialize_model(&model), text, "{}", path.display());
    }
}

#[test]
fn scenario_model_structure() {
    let model = parse_model(SCENARIO).unwrap();
    assert_eq!(model.svm_type(), SvmType::EpsilonSvr);
    assert_eq!(*model.kernel(), Kernel::Linear);
    assert_eq!(model.class_count(), 2);
    assert_eq!(model.rho(), &[0.5]);
    assert_eq!(model.support_vector_count(), 2);
    assert_eq!(model.coefficients(), &[vec![1.0, -1.0]]);

    for sv in model.support_vectors() {
        assert_eq!(sv.len(), 2);
        assert_eq!(sv.nodes().len(), 3);
        assert!(sv.nodes()[2].is_sentinel());
    }
    assert_eq!(model.support_vectors()[1].get(2), Some(0.6));
}

#[test]
fn write_model_to_file_and_reload() {
    let model = parse_model(SCENARIO).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.model");

    let file = std::fs::File::create(&path).unwrap();
    zscore_svm::write_model(&model, std::io::BufWriter::new(file)).unwrap();

    let reloaded = zscore_svm::load_model_file(&path).unwrap();
    assert_eq!(reloaded, model);
}

#[rstest]
#[case::unknown_svm_type(
    "svm_type foo_svc\nkernel_type linear\nnr_class 2\ntotal_sv 0\nrho 0\nSV\n",
    ParseError::UnknownModelType("foo_svc".into())
)]
#[case::unknown_kernel(
    "svm_type c_svc\nkernel_type laplace\nnr_class 2\ntotal_sv 0\nrho 0\nSV\n",
    ParseError::UnknownKernelType("laplace".into())
)]
#[case::missing_svm_type(
    "kernel_type linear\nnr_class 2\ntotal_sv 0\nrho 0\nSV\n",
    ParseError::MissingField("svm_type")
)]
#[case::rho_length(
    "svm_type c_svc\nkernel_type linear\nnr_class 3\ntotal_sv 0\nrho 0 1\nSV\n",
    ParseError::DimensionMismatch { field: "rho", expected: 3, actual: 2 }
)]
fn rejects_bad_header(#[case] text: &str, #[case] expected: ParseError) {
    assert_eq!(parse_model(text).unwrap_err(), expected);
}

#[rstest]
#[case::too_few_lines("svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 3\nrho 0\nSV\n1 1:0.5\n")]
#[case::too_many_lines("svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 1\nrho 0\nSV\n1 1:0.5\n2 1:0.5\n")]
#[case::no_marker("svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 1\nrho 0\n")]
fn truncated_input(#[case] text: &str) {
    assert!(matches!(
        parse_model(text),
        Err(ParseError::TruncatedInput { .. })
    ));
}

#[rstest]
#[case::bad_coefficient("abc 1:0.5")]
#[case::bad_index("1 x:0.5")]
#[case::bad_value("1 1:zz")]
fn malformed_numbers_report_line(#[case] data_line: &str) {
    let text = format!(
        "svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 1\nrho 0\nSV\n{data_line}\n"
    );
    match parse_model(&text) {
        Err(ParseError::MalformedNumeric { line, .. }) => assert_eq!(line, 7),
        other => panic!("expected MalformedNumeric, got {other:?}"),
    }
}
