//! Crate-level error type.

use crate::io::{ModelIoError, ParseError};
use crate::library::SelectionError;
use crate::scale::ScaleError;
use crate::zscore::ZScoreError;

/// Any error produced while loading, selecting or applying a model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Io(#[from] ModelIoError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
    #[error(transparent)]
    ZScore(#[from] ZScoreError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
