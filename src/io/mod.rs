//! Reading and writing the libsvm text model format.
//!
//! - [`text`]: parser ([`parse_model`])
//! - [`writer`]: serializer ([`write_model`], [`serialize_model`])
//! - [`format`]: number formatting shared by the writer
//!
//! Loading from disk is limited to [`load_model_file`], used for custom
//! decision models.

pub mod format;
pub mod text;
pub mod writer;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::Model;

pub use text::{parse_model, ParseError};
pub use writer::{serialize_model, write_model};

/// Error type for reading a model file.
#[derive(Debug, thiserror::Error)]
pub enum ModelIoError {
    #[error("model file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to read model file {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Read and parse a model file.
///
/// A single blocking read with no retries.
pub fn load_model_file(path: impl AsRef<Path>) -> Result<Model, ModelIoError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading svm model file");

    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ModelIoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ModelIoError::ReadFailure {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_model(&content).map_err(|source| ModelIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
