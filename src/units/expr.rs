
use super::dimension::Dimension;

use itertools::Itertools;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::collections::BTreeMap;
use std::fmt::{self, Formatter, Display};
use std::str::FromStr;

/// A compound unit, stored as a mapping from unit symbol to signed
/// exponent, e.g. `kg^1 * m^-1`.
///
/// An absent symbol is equivalent to a symbol with exponent zero, and
/// zero-valued entries are dropped eagerly, so two expressions compare
/// equal exactly when they denote the same formal product. Exponents
/// are real-valued; fractional powers such as `(kg*m)^1.5` are
/// permitted.
///
/// A `UnitExpr` is immutable once produced. The algebra operations
/// below all return new values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitExpr {
  exponents: BTreeMap<String, f64>,
}

/// An operand of the unit algebra: either a bare number or a unit
/// expression.
///
/// The original engine dispatched on the runtime type of its operands;
/// here the distinction is an explicit tagged variant, checked at every
/// algebra entry point. Bare numbers only legitimately appear as
/// exponents.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
  Number(f64),
  Units(UnitExpr),
}

/// An operand combination that the unit algebra rejects.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum AlgebraError {
  #[error("numeric literal {value} cannot be multiplied or divided with units")]
  NumberInTerm { value: f64 },
  #[error("exponent must be a number, got unit expression '{units}'")]
  UnitExponent { units: UnitExpr },
}

impl UnitExpr {
  /// The empty, dimensionless unit expression.
  pub fn empty() -> Self {
    Self::default()
  }

  /// The unit expression consisting of a single symbol at exponent 1.
  pub fn symbol(symbol: impl Into<String>) -> Self {
    Self::new([(symbol.into(), 1.0)])
  }

  /// Builds a unit expression from `(symbol, exponent)` pairs.
  /// Repeated symbols accumulate; zero exponents are dropped.
  pub fn new(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
    let mut exponents: BTreeMap<String, f64> = BTreeMap::new();
    for (symbol, exponent) in entries {
      *exponents.entry(symbol).or_insert(0.0) += exponent;
    }
    exponents.retain(|_, exponent| *exponent != 0.0);
    Self { exponents }
  }

  /// The canonical SI unit expression for a dimension: each base
  /// symbol raised to the corresponding power.
  pub fn si(dimension: &Dimension) -> Self {
    Self::new(
      dimension.components()
        .map(|(base, power)| (base.si_symbol().to_owned(), power)),
    )
  }

  pub fn is_empty(&self) -> bool {
    self.exponents.is_empty()
  }

  /// The exponent of `symbol`, with absent symbols reading as zero.
  pub fn exponent(&self, symbol: &str) -> f64 {
    self.exponents.get(symbol).copied().unwrap_or(0.0)
  }

  /// The `(symbol, exponent)` pairs of this expression, in symbol
  /// order. All yielded exponents are nonzero.
  pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
    self.exponents.iter().map(|(symbol, exponent)| (symbol.as_str(), *exponent))
  }

  /// Formal product: per-symbol sum of exponents.
  pub fn mul(&self, other: &UnitExpr) -> UnitExpr {
    Self::new(
      self.iter()
        .chain(other.iter())
        .map(|(symbol, exponent)| (symbol.to_owned(), exponent)),
    )
  }

  /// Formal quotient: per-symbol difference of exponents.
  pub fn div(&self, other: &UnitExpr) -> UnitExpr {
    Self::new(
      self.iter()
        .chain(other.iter().map(|(symbol, exponent)| (symbol, -exponent)))
        .map(|(symbol, exponent)| (symbol.to_owned(), exponent)),
    )
  }

  /// Formal power: every exponent scaled by `power`.
  pub fn pow(&self, power: f64) -> UnitExpr {
    Self::new(
      self.iter().map(|(symbol, exponent)| (symbol.to_owned(), exponent * power)),
    )
  }
}

/// Multiplies two operands. Both must be unit expressions.
pub fn multiply(left: Operand, right: Operand) -> Result<Operand, AlgebraError> {
  match (left, right) {
    (Operand::Units(a), Operand::Units(b)) => Ok(Operand::Units(a.mul(&b))),
    (Operand::Number(value), _) | (_, Operand::Number(value)) =>
      Err(AlgebraError::NumberInTerm { value }),
  }
}

/// Divides two operands. Both must be unit expressions.
pub fn divide(left: Operand, right: Operand) -> Result<Operand, AlgebraError> {
  match (left, right) {
    (Operand::Units(a), Operand::Units(b)) => Ok(Operand::Units(a.div(&b))),
    (Operand::Number(value), _) | (_, Operand::Number(value)) =>
      Err(AlgebraError::NumberInTerm { value }),
  }
}

/// Raises `base` to `exponent`. The exponent must be a bare number; a
/// numeric base undergoes ordinary exponentiation, which is what makes
/// stacked exponents like `u^2^3` collapse to `u^8`.
pub fn pow(base: Operand, exponent: Operand) -> Result<Operand, AlgebraError> {
  match (base, exponent) {
    (_, Operand::Units(units)) => Err(AlgebraError::UnitExponent { units }),
    (Operand::Number(base), Operand::Number(exponent)) =>
      Ok(Operand::Number(base.powf(exponent))),
    (Operand::Units(base), Operand::Number(exponent)) =>
      Ok(Operand::Units(base.pow(exponent))),
  }
}

impl FromStr for UnitExpr {
  type Err = crate::parsing::ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    crate::parsing::parse_units(s)
  }
}

impl Display for UnitExpr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.exponents.is_empty() {
      write!(f, "1")
    } else {
      let product = self.iter()
        .map(|(symbol, exponent)| format!("{symbol}^{exponent}"))
        .join("*");
      write!(f, "{}", product)
    }
  }
}
