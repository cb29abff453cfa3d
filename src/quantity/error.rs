
use crate::units::expr::UnitExpr;
use crate::units::table::UnknownUnitError;

use thiserror::Error;

/// Error applying an operation to dimensionally incompatible operands.
///
/// Carries the operands' unit expressions so problem authors can see
/// which two quantities were combined, e.g.
/// `cannot apply addition to incompatible units 'kg^1' and 'm^1'`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DimensionMismatchError {
  #[error("cannot apply {operation} to incompatible units '{left}' and '{right}'")]
  Binary {
    operation: &'static str,
    left: UnitExpr,
    right: UnitExpr,
  },
  #[error("{operation} requires a dimensionless operand, got units '{units}'")]
  Unary {
    operation: &'static str,
    units: UnitExpr,
  },
}

/// Error combining numeric payloads whose lengths neither match nor
/// broadcast (a length-1 payload broadcasts against any length).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("array lengths {left} and {right} do not broadcast")]
pub struct ShapeMismatchError {
  pub left: usize,
  pub right: usize,
}

/// Error performing quantity arithmetic.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ArithmeticError {
  #[error(transparent)]
  Dimension(#[from] DimensionMismatchError),
  #[error(transparent)]
  Shape(#[from] ShapeMismatchError),
}

/// Error converting a quantity to a target unit.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ConvertError {
  #[error(transparent)]
  UnknownUnit(#[from] UnknownUnitError),
  #[error(transparent)]
  Dimension(#[from] DimensionMismatchError),
}

impl DimensionMismatchError {
  pub fn binary(operation: &'static str, left: UnitExpr, right: UnitExpr) -> Self {
    Self::Binary { operation, left, right }
  }

  pub fn unary(operation: &'static str, units: UnitExpr) -> Self {
    Self::Unary { operation, units }
  }
}
