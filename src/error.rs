
use crate::parsing::ParseError;
use crate::quantity::{ArithmeticError, ConvertError, DimensionMismatchError, ShapeMismatchError};
use crate::units::table::UnknownUnitError;

use thiserror::Error;

/// Any error the quantity engine can produce. The individual
/// operations return the narrowest error type that applies; this enum
/// is the aggregate for callers that funnel several operations through
/// one error path.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  UnknownUnit(#[from] UnknownUnitError),
  #[error("{0}")]
  Arithmetic(#[from] ArithmeticError),
  #[error("{0}")]
  Convert(#[from] ConvertError),
}

impl From<DimensionMismatchError> for Error {
  fn from(err: DimensionMismatchError) -> Self {
    Self::Arithmetic(err.into())
  }
}

impl From<ShapeMismatchError> for Error {
  fn from(err: ShapeMismatchError) -> Self {
    Self::Arithmetic(err.into())
  }
}
