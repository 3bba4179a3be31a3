//! libsvm text model format parser.
//!
//! Parses the text format written by `svm_save_model()`: a whitespace
//! delimited header of `key value...` lines, the literal marker line `SV`,
//! then one support vector per line.
//!
//! ```text
//! svm_type epsilon_svr
//! kernel_type rbf
//! gamma 0.25
//! nr_class 2
//! total_sv 2
//! rho 0.5
//! SV
//! 1.0 1:0.2 2:0.8
//! -1.0 1:0.4 2:0.6
//! ```
//!
//! Parsing works from a string only; reading the text is up to the caller.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;

use crate::model::{
    class_dimensions, Kernel, KernelType, Model, ModelParts, SparseFeatureVector, SvmType,
};

/// Marker line separating the header from the support vectors.
pub const SV_MARKER: &str = "SV";

// =============================================================================
// Error types
// =============================================================================

/// Error type for libsvm text model parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown svm type: {0}")]
    UnknownModelType(String),
    #[error("unknown kernel type: {0}")]
    UnknownKernelType(String),
    #[error("line {line}: invalid {expected} for {field}: {token:?}")]
    MalformedNumeric {
        field: &'static str,
        expected: &'static str,
        token: String,
        line: usize,
    },
    #[error("truncated input: expected {expected}, found {found}")]
    TruncatedInput { expected: String, found: String },
    #[error("array size mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

// =============================================================================
// Header
// =============================================================================

/// Header key/value lines, keyed by their first field.
///
/// Values keep their 1-based line number for error reporting.
struct Header<'a> {
    fields: HashMap<&'a str, (usize, Vec<&'a str>)>,
}

impl<'a> Header<'a> {
    fn get(&self, key: &str) -> Option<&(usize, Vec<&'a str>)> {
        self.fields.get(key)
    }

    /// First value of a key that must be present.
    fn required(&self, key: &'static str) -> Result<(usize, &'a str), ParseError> {
        match self.fields.get(key) {
            Some((line, values)) => match values.first() {
                Some(v) => Ok((*line, *v)),
                None => Err(ParseError::MissingField(key)),
            },
            None => Err(ParseError::MissingField(key)),
        }
    }

    /// First value of an optional scalar key, parsed as `T`.
    fn scalar<T: FromStr>(
        &self,
        key: &'static str,
        expected: &'static str,
    ) -> Result<Option<T>, ParseError> {
        match self.fields.get(key) {
            Some((line, values)) => {
                let token = values.first().copied().unwrap_or("");
                parse_token(token, key, expected, *line).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Optional array key that must hold exactly `len` values.
    fn array<T: FromStr>(
        &self,
        key: &'static str,
        expected: &'static str,
        len: usize,
    ) -> Result<Option<Vec<T>>, ParseError> {
        let Some((line, values)) = self.get(key) else {
            return Ok(None);
        };
        if values.len() != len {
            return Err(ParseError::DimensionMismatch {
                field: key,
                expected: len,
                actual: values.len(),
            });
        }
        values
            .iter()
            .map(|v| parse_token(v, key, expected, *line))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }
}

const KNOWN_KEYS: [&str; 12] = [
    "svm_type",
    "kernel_type",
    "gamma",
    "degree",
    "coef0",
    "nr_class",
    "total_sv",
    "rho",
    "nr_sv",
    "label",
    "probA",
    "probB",
];

// =============================================================================
// Parser
// =============================================================================

/// Parse a libsvm text model.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found. No partially
/// built model is ever returned.
pub fn parse_model(text: &str) -> Result<Model, ParseError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let header = parse_header(&mut lines)?;

    let (line, token) = header.required("svm_type")?;
    let svm_type: SvmType = token.parse()?;
    debug!(line, svm_type = %svm_type, "parsed svm type");

    let (_, token) = header.required("kernel_type")?;
    let kernel_type: KernelType = token.parse()?;

    let degree = header.scalar::<f64>("degree", "double")?.unwrap_or(0.0);
    let gamma = header.scalar::<f64>("gamma", "double")?.unwrap_or(0.0);
    let coef0 = header.scalar::<f64>("coef0", "double")?.unwrap_or(0.0);
    let kernel = Kernel::from_params(kernel_type, degree, gamma, coef0);

    let (line, token) = header.required("nr_class")?;
    let class_count: usize = parse_token(token, "nr_class", "integer", line)?;
    let (class_count, pairs) = class_dimensions(class_count)?;

    let (line, token) = header.required("total_sv")?;
    let total_sv: usize = parse_token(token, "total_sv", "integer", line)?;

    let rho = match header.array::<f64>("rho", "double", pairs)? {
        Some(rho) => rho,
        None if pairs == 0 => Vec::new(),
        None => return Err(ParseError::MissingField("rho")),
    };
    let prob_a = header.array::<f64>("probA", "double", pairs)?;
    let prob_b = header.array::<f64>("probB", "double", pairs)?;
    let labels = header.array::<i32>("label", "integer", class_count)?;
    let n_sv = header.array::<u32>("nr_sv", "integer", class_count)?;

    // `total_sv` is untrusted; the vectors grow with the lines actually read.
    let coef_rows = class_count - 1;
    let mut coefficients = vec![Vec::new(); coef_rows];
    let mut support_vectors = Vec::new();

    for (line, raw) in lines {
        // Without coefficient columns a featureless support vector is an
        // empty line. Blank lines are skipped otherwise.
        if raw.trim().is_empty() && (coef_rows > 0 || support_vectors.len() == total_sv) {
            continue;
        }
        if support_vectors.len() == total_sv {
            return Err(ParseError::TruncatedInput {
                expected: format!("{total_sv} support vectors"),
                found: format!("extra data at line {line}"),
            });
        }
        let sv = parse_support_vector(raw, line, &mut coefficients)?;
        support_vectors.push(sv);
    }

    if support_vectors.len() != total_sv {
        return Err(ParseError::TruncatedInput {
            expected: format!("{total_sv} support vectors"),
            found: format!("{}", support_vectors.len()),
        });
    }

    debug!(
        svm_type = %svm_type,
        kernel = %kernel_type,
        class_count,
        total_sv,
        "parsed svm model"
    );

    Model::from_parts(ModelParts {
        svm_type,
        kernel,
        class_count,
        rho,
        prob_a,
        prob_b,
        labels,
        n_sv,
        support_vectors,
        coefficients,
    })
}

/// Collect header lines up to and including the `SV` marker.
fn parse_header<'a, I>(lines: &mut I) -> Result<Header<'a>, ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut fields = HashMap::new();

    for (line, raw) in lines.by_ref() {
        let trimmed = raw.trim();
        if trimmed == SV_MARKER {
            return Ok(Header { fields });
        }

        let mut parts = trimmed.split_whitespace();
        let Some(key) = parts.next() else {
            continue;
        };
        if !KNOWN_KEYS.contains(&key) {
            debug!(line, key, "ignoring unknown header key");
            continue;
        }
        fields.insert(key, (line, parts.collect()));
    }

    Err(ParseError::TruncatedInput {
        expected: format!("{SV_MARKER:?} marker"),
        found: "end of input".to_string(),
    })
}

/// Parse one data line, pushing its dual coefficients into `coefficients`.
fn parse_support_vector(
    raw: &str,
    line: usize,
    coefficients: &mut [Vec<f64>],
) -> Result<SparseFeatureVector, ParseError> {
    let mut fields = raw.split_whitespace();

    let rows = coefficients.len();
    for (row, coefs) in coefficients.iter_mut().enumerate() {
        let Some(token) = fields.next() else {
            return Err(ParseError::DimensionMismatch {
                field: "sv_coef",
                expected: rows,
                actual: row,
            });
        };
        coefs.push(parse_token(token, "sv_coef", "double", line)?);
    }

    let mut sv = SparseFeatureVector::new();
    for token in fields {
        let (index, value) = parse_node(token, line)?;
        sv.try_push(index, value).map_err(|_| ParseError::MalformedNumeric {
            field: "node index",
            expected: "positive integer",
            token: token.to_string(),
            line,
        })?;
    }
    Ok(sv)
}

/// Parse an `index:value` token.
fn parse_node(token: &str, line: usize) -> Result<(i32, f64), ParseError> {
    let Some((index, value)) = token.split_once(':') else {
        return Err(ParseError::MalformedNumeric {
            field: "node",
            expected: "index:value pair",
            token: token.to_string(),
            line,
        });
    };
    let index: i32 = parse_token(index, "node index", "integer", line)?;
    let value: f64 = parse_token(value, "node value", "double", line)?;
    Ok((index, value))
}

fn parse_token<T: FromStr>(
    token: &str,
    field: &'static str,
    expected: &'static str,
    line: usize,
) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::MalformedNumeric {
        field,
        expected,
        token: token.to_string(),
        line,
    })
}

// =============================================================================
// Tests
// =============================================================================
