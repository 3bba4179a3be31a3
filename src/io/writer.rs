//! libsvm text model writer.
//!
//! The inverse of [`super::text::parse_model`]. Output layout:
//!
//! ```text
//! svm_type <token>
//! kernel_type <token>
//! degree <d>          polynomial only
//! gamma <g>           polynomial, rbf, sigmoid
//! coef0 <c>           polynomial, sigmoid
//! nr_class <k>
//! total_sv <l>
//! rho <r>...
//! label <n>...        when present
//! probA <a>...        when present
//! probB <b>...        when present
//! nr_sv <n>...        when present
//! SV
//! <coef>... <index>:<value>...
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use super::format::{format_shortest, format_significant, COEFFICIENT_DIGITS, FEATURE_DIGITS};
use super::text::SV_MARKER;
use crate::model::Model;

/// Write `model` in the text format.
pub fn write_model<W: Write>(model: &Model, mut writer: W) -> io::Result<()> {
    writeln!(writer, "svm_type {}", model.svm_type())?;
    writeln!(writer, "kernel_type {}", model.kernel_type())?;

    let kernel = model.kernel();
    if let Some(degree) = kernel.degree() {
        writeln!(writer, "degree {}", format_shortest(degree))?;
    }
    if let Some(gamma) = kernel.gamma() {
        writeln!(writer, "gamma {}", format_shortest(gamma))?;
    }
    if let Some(coef0) = kernel.coef0() {
        writeln!(writer, "coef0 {}", format_shortest(coef0))?;
    }

    writeln!(writer, "nr_class {}", model.class_count())?;
    writeln!(writer, "total_sv {}", model.support_vector_count())?;

    write_reals(&mut writer, "rho", model.rho())?;
    if let Some(labels) = model.labels() {
        write_array(&mut writer, "label", labels)?;
    }
    if let Some(prob_a) = model.prob_a() {
        write_reals(&mut writer, "probA", prob_a)?;
    }
    if let Some(prob_b) = model.prob_b() {
        write_reals(&mut writer, "probB", prob_b)?;
    }
    if let Some(n_sv) = model.n_sv() {
        write_array(&mut writer, "nr_sv", n_sv)?;
    }

    writeln!(writer, "{SV_MARKER}")?;

    for (i, sv) in model.support_vectors().iter().enumerate() {
        let mut sep = "";
        for coef in model.coefficients_of(i) {
            write!(writer, "{sep}{}", format_significant(coef, COEFFICIENT_DIGITS))?;
            sep = " ";
        }
        for (index, value) in sv.iter() {
            write!(
                writer,
                "{sep}{index}:{}",
                format_significant(value, FEATURE_DIGITS)
            )?;
            sep = " ";
        }
        writeln!(writer)?;
    }

    writer.flush()
}

/// Render `model` in the text format.
pub fn serialize_model(model: &Model) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_model(model, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_reals<W: Write>(writer: &mut W, key: &str, values: &[f64]) -> io::Result<()> {
    write!(writer, "{key}")?;
    for v in values {
        write!(writer, " {}", format_shortest(*v))?;
    }
    writeln!(writer)
}

fn write_array<W: Write, T: Display>(writer: &mut W, key: &str, values: &[T]) -> io::Result<()> {
    write!(writer, "{key}")?;
    for v in values {
        write!(writer, " {v}")?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_model;
    use crate::model::{Kernel, ModelParts, SparseFeatureVector, SvmType};

    const SCENARIO: &str = "svm_type epsilon_svr
kernel_type linear
nr_class 2
total_sv 2
rho 0.5
SV
1 1:0.2 2:0.8
-1 1:0.4 2:0.6
";

    #[test]
    fn writes_canonical_text() {
        let model = parse_model(SCENARIO).unwrap();
        assert_eq!(serialize_model(&model), SCENARIO);
    }

    #[test]
    fn kernel_parameters_follow_kernel_type() {
        let cases = [
            (Kernel::Linear, vec![]),
            (
                Kernel::Polynomial {
                    degree: 3.0,
                    gamma: 0.5,
                    coef0: 1.0,
                },
                vec!["degree 3", "gamma 0.5", "coef0 1"],
            ),
            (Kernel::Rbf { gamma: 0.25 }, vec!["gamma 0.25"]),
            (
                Kernel::Sigmoid {
                    gamma: 2.0,
                    coef0: -1.0,
                },
                vec!["gamma 2", "coef0 -1"],
            ),
        ];

        for (kernel, expected) in cases {
            let model = Model::from_parts(ModelParts {
                svm_type: SvmType::NuSvr,
                kernel,
                class_count: 2,
                rho: vec![0.0],
                prob_a: None,
                prob_b: None,
                labels: None,
                n_sv: None,
                support_vectors: vec![],
                coefficients: vec![vec![]],
            })
            .unwrap();
            let text = serialize_model(&model);
            let params: Vec<&str> = text
                .lines()
                .filter(|l| {
                    l.starts_with("degree") || l.starts_with("gamma") || l.starts_with("coef0")
                })
                .collect();
            assert_eq!(params, expected, "{kernel:?}");
        }
    }

    #[test]
    fn optional_arrays_in_fixed_order() {
        let model = Model::from_parts(ModelParts {
            svm_type: SvmType::CSvc,
            kernel: Kernel::Rbf { gamma: 1.0 },
            class_count: 2,
            rho: vec![-0.25],
            prob_a: Some(vec![-3.5]),
            prob_b: Some(vec![0.125]),
            labels: Some(vec![1, -1]),
            n_sv: Some(vec![1, 0]),
            support_vectors: vec![SparseFeatureVector::from_dense(&[1.0 / 3.0])],
            coefficients: vec![vec![0.1]],
        })
        .unwrap();

        let text = serialize_model(&model);
        let keys: Vec<&str> = text
            .lines()
            .map(|l| l.split_whitespace().next().unwrap_or(""))
            .take_while(|k| *k != "SV")
            .collect();
        assert_eq!(
            keys,
            vec![
                "svm_type",
                "kernel_type",
                "gamma",
                "nr_class",
                "total_sv",
                "rho",
                "label",
                "probA",
                "probB",
                "nr_sv"
            ]
        );
        assert!(text.ends_with("SV\n0.10000000000000001 1:0.333333333\n"));
    }

    #[test]
    fn single_class_featureless_vector_round_trips() {
        let model = Model::from_parts(ModelParts {
            svm_type: SvmType::OneClass,
            kernel: Kernel::Linear,
            class_count: 1,
            rho: vec![],
            prob_a: None,
            prob_b: None,
            labels: None,
            n_sv: None,
            support_vectors: vec![
                SparseFeatureVector::new(),
                SparseFeatureVector::from_dense(&[0.5]),
            ],
            coefficients: vec![],
        })
        .unwrap();

        let text = serialize_model(&model);
        assert!(text.ends_with("rho\nSV\n\n1:0.5\n"), "{text}");
        assert_eq!(parse_model(&text).unwrap(), model);
    }
}
