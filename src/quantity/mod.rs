
//! Numeric values tagged with units, with dimension-checked arithmetic.

mod error;

pub use error::{DimensionMismatchError, ShapeMismatchError, ArithmeticError, ConvertError};

use crate::error::Error;
use crate::parsing::parse_units;
use crate::units::dimension::Dimension;
use crate::units::expr::UnitExpr;
use crate::units::table::{self, Resolution, UnknownUnitError};
use crate::util::round_to_sig_figs;

use itertools::Itertools;
use num::One;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};
use std::ops::Neg;

/// A numeric payload tagged with a [`UnitExpr`].
///
/// The payload is a vector of reals; a length-1 payload acts as a
/// scalar and broadcasts against any other length in element-wise
/// arithmetic. Additive and comparative operations require both
/// operands to resolve to the same dimension vector; multiplicative
/// operations never do, and instead combine the operands' units
/// formally. A quantity never silently reinterprets its units: wherever
/// magnitudes of two compatible quantities are combined additively or
/// compared, the right operand is first rescaled into the left
/// operand's units.
///
/// Every constructor validates the units against the global unit
/// table, so a constructed quantity can always resolve its dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
  values: Vec<f64>,
  units: UnitExpr,
}

impl Quantity {
  /// Constructs a quantity from a payload and a pre-parsed unit
  /// expression. Fails if any symbol is missing from the unit table.
  pub fn new(values: impl Into<Vec<f64>>, units: UnitExpr) -> Result<Self, UnknownUnitError> {
    table::global().resolve(&units)?;
    Ok(Self { values: values.into(), units })
  }

  /// Constructs a quantity, parsing `units` as a unit-expression
  /// string.
  pub fn parse(values: impl Into<Vec<f64>>, units: &str) -> Result<Self, Error> {
    let units = parse_units(units)?;
    Ok(Self::new(values, units)?)
  }

  /// Convenience constructor for a scalar quantity.
  pub fn scalar(value: f64, units: &str) -> Result<Self, Error> {
    Self::parse(vec![value], units)
  }

  /// A quantity with no units.
  pub fn dimensionless(values: impl Into<Vec<f64>>) -> Self {
    Self { values: values.into(), units: UnitExpr::empty() }
  }

  pub fn values(&self) -> &[f64] {
    &self.values
  }

  pub fn units(&self) -> &UnitExpr {
    &self.units
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The quantity's dimension vector, resolved against the global
  /// table on each call.
  pub fn dimension(&self) -> Dimension {
    self.resolution().dimension
  }

  /// The multiplicative factor expressing this quantity's magnitude in
  /// SI base units, resolved against the global table on each call.
  pub fn conversion_factor(&self) -> f64 {
    self.resolution().factor
  }

  pub fn is_dimensionless(&self) -> bool {
    self.dimension().is_one()
  }

  fn resolution(&self) -> Resolution {
    // expect: every constructor and conversion validated the units,
    // and the global table never changes once initialized.
    table::global().resolve(&self.units)
      .expect("constructed quantity no longer resolves against the unit table")
  }

  /// A literal zero with no units is treated as dimensionally
  /// universal, so sum-reduction seeds like `0 + q` work for any `q`.
  fn is_universal_zero(&self) -> bool {
    self.is_dimensionless() && self.values.iter().all(|v| *v == 0.0)
  }

  /// Element-wise addition. Operand dimensions must match exactly; the
  /// universal-zero exception applies on either side.
  pub fn try_add(&self, other: &Quantity) -> Result<Quantity, ArithmeticError> {
    self.additive("addition", other, |a, b| a + b)
  }

  /// Element-wise subtraction, with the same dimension rules as
  /// [`Quantity::try_add`]. `0 - q` yields `-q` in `q`'s units.
  pub fn try_sub(&self, other: &Quantity) -> Result<Quantity, ArithmeticError> {
    self.additive("subtraction", other, |a, b| a - b)
  }

  pub fn try_add_assign(&mut self, other: &Quantity) -> Result<(), ArithmeticError> {
    *self = self.try_add(other)?;
    Ok(())
  }

  pub fn try_sub_assign(&mut self, other: &Quantity) -> Result<(), ArithmeticError> {
    *self = self.try_sub(other)?;
    Ok(())
  }

  fn additive(
    &self,
    operation: &'static str,
    other: &Quantity,
    f: impl Fn(f64, f64) -> f64,
  ) -> Result<Quantity, ArithmeticError> {
    let left = self.resolution();
    let right = other.resolution();
    if left.dimension == right.dimension {
      // Rescale the right operand into the left operand's units, so
      // e.g. 1 kg + 1 lb accumulates in kg.
      let scale = right.factor / left.factor;
      let values = zip_values(&self.values, &other.values, |a, b| f(a, b * scale))?;
      Ok(Quantity { values, units: self.units.clone() })
    } else if self.is_universal_zero() {
      let values = zip_values(&self.values, &other.values, f)?;
      Ok(Quantity { values, units: other.units.clone() })
    } else if other.is_universal_zero() {
      let values = zip_values(&self.values, &other.values, f)?;
      Ok(Quantity { values, units: self.units.clone() })
    } else {
      Err(DimensionMismatchError::binary(operation, self.units.clone(), other.units.clone()).into())
    }
  }

  /// Element-wise multiplication. Never dimension-checked: the result's
  /// units are the formal product of the operands' units.
  pub fn try_mul(&self, other: &Quantity) -> Result<Quantity, ShapeMismatchError> {
    let values = zip_values(&self.values, &other.values, |a, b| a * b)?;
    Ok(Quantity { values, units: self.units.mul(&other.units) })
  }

  /// Element-wise division; the result's units are the formal
  /// quotient.
  pub fn try_div(&self, other: &Quantity) -> Result<Quantity, ShapeMismatchError> {
    let values = zip_values(&self.values, &other.values, |a, b| a / b)?;
    Ok(Quantity { values, units: self.units.div(&other.units) })
  }

  pub fn try_mul_assign(&mut self, other: &Quantity) -> Result<(), ShapeMismatchError> {
    *self = self.try_mul(other)?;
    Ok(())
  }

  pub fn try_div_assign(&mut self, other: &Quantity) -> Result<(), ShapeMismatchError> {
    *self = self.try_div(other)?;
    Ok(())
  }

  /// Multiplies by a bare number, which is treated as dimensionless.
  pub fn mul_scalar(&self, scalar: f64) -> Quantity {
    Quantity {
      values: self.values.iter().map(|v| v * scalar).collect(),
      units: self.units.clone(),
    }
  }

  pub fn div_scalar(&self, scalar: f64) -> Quantity {
    Quantity {
      values: self.values.iter().map(|v| v / scalar).collect(),
      units: self.units.clone(),
    }
  }

  /// Raises the quantity to a bare numeric power. The units' exponents
  /// scale by the same power.
  pub fn pow_scalar(&self, exponent: f64) -> Quantity {
    Quantity {
      values: self.values.iter().map(|v| v.powf(exponent)).collect(),
      units: self.units.pow(exponent),
    }
  }

  /// Raises the quantity to a quantity-valued power. The exponent must
  /// be a scalar and must resolve to the zero dimension vector.
  pub fn try_pow(&self, exponent: &Quantity) -> Result<Quantity, ArithmeticError> {
    if !exponent.is_dimensionless() {
      return Err(DimensionMismatchError::unary("exponent", exponent.units.clone()).into());
    }
    if exponent.len() != 1 {
      return Err(ShapeMismatchError { left: 1, right: exponent.len() }.into());
    }
    Ok(self.pow_scalar(exponent.values[0]))
  }

  pub fn try_pow_assign(&mut self, exponent: &Quantity) -> Result<(), ArithmeticError> {
    *self = self.try_pow(exponent)?;
    Ok(())
  }

  /// Dimension-checked equality. Compatible operands compare their
  /// SI-normalized magnitudes, so `1 kg == 1000 g`. Comparing a
  /// quantity against a unitless zero answers `false` rather than
  /// failing, which keeps `q == 0` usable as an emptiness test.
  pub fn try_eq(&self, other: &Quantity) -> Result<bool, ArithmeticError> {
    let left = self.resolution();
    let right = other.resolution();
    if left.dimension == right.dimension {
      all_pairs(&self.values, &other.values, |a, b| a * left.factor == b * right.factor)
        .map_err(ArithmeticError::from)
    } else if self.is_universal_zero() || other.is_universal_zero() {
      Ok(self.values.iter().all(|v| *v == 0.0) && other.values.iter().all(|v| *v == 0.0))
    } else {
      Err(DimensionMismatchError::binary("comparison", self.units.clone(), other.units.clone()).into())
    }
  }

  /// Relabels this quantity in `target` units, rescaling the magnitude
  /// so the physical value is preserved. The target must resolve to
  /// the same dimension vector.
  pub fn convert_to_unit(&mut self, target: UnitExpr) -> Result<(), ConvertError> {
    let target_resolution = table::global().resolve(&target)?;
    let current = self.resolution();
    if current.dimension != target_resolution.dimension {
      return Err(
        DimensionMismatchError::binary("unit conversion", self.units.clone(), target).into(),
      );
    }
    let scale = current.factor / target_resolution.factor;
    for value in &mut self.values {
      *value *= scale;
    }
    self.units = target;
    Ok(())
  }

  /// By-value form of [`Quantity::convert_to_unit`].
  pub fn converted_to_unit(mut self, target: UnitExpr) -> Result<Quantity, ConvertError> {
    self.convert_to_unit(target)?;
    Ok(self)
  }

  /// Converts to the canonical SI unit expression for this quantity's
  /// dimension: each base symbol raised to the corresponding dimension
  /// component.
  pub fn convert_to_si(&mut self) {
    let Resolution { dimension, factor } = self.resolution();
    for value in &mut self.values {
      *value *= factor;
    }
    self.units = UnitExpr::si(&dimension);
  }

  /// Element-wise absolute value, keeping the units.
  pub fn abs(&self) -> Quantity {
    Quantity {
      values: self.values.iter().map(|v| v.abs()).collect(),
      units: self.units.clone(),
    }
  }

  /// Rounds every element to the given number of significant figures.
  /// Applied to randomized values before display so a sampled float
  /// never implies false precision.
  pub fn round_significant(&mut self, figures: u32) {
    for value in &mut self.values {
      *value = round_to_sig_figs(*value, figures);
    }
  }
}

/// Combines two payloads element-wise, broadcasting a length-1 payload
/// on either side.
fn zip_values(
  a: &[f64],
  b: &[f64],
  f: impl Fn(f64, f64) -> f64,
) -> Result<Vec<f64>, ShapeMismatchError> {
  if a.len() == b.len() {
    Ok(a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect())
  } else if a.len() == 1 {
    Ok(b.iter().map(|y| f(a[0], *y)).collect())
  } else if b.len() == 1 {
    Ok(a.iter().map(|x| f(*x, b[0])).collect())
  } else {
    Err(ShapeMismatchError { left: a.len(), right: b.len() })
  }
}

fn all_pairs(
  a: &[f64],
  b: &[f64],
  f: impl Fn(f64, f64) -> bool,
) -> Result<bool, ShapeMismatchError> {
  let pairs = zip_values(a, b, |x, y| if f(x, y) { 1.0 } else { 0.0 })?;
  Ok(pairs.into_iter().all(|v| v == 1.0))
}

impl Neg for &Quantity {
  type Output = Quantity;

  fn neg(self) -> Quantity {
    Quantity {
      values: self.values.iter().map(|v| -v).collect(),
      units: self.units.clone(),
    }
  }
}

impl Neg for Quantity {
  type Output = Quantity;

  fn neg(mut self) -> Quantity {
    for value in &mut self.values {
      *value = -*value;
    }
    self
  }
}

impl Display for Quantity {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let values = self.values.iter().map(|v| v.to_string()).join(",");
    if self.units.is_empty() {
      write!(f, "({values})")
    } else {
      write!(f, "({values}) {}", self.units)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  fn quantity(values: &[f64], units: &str) -> Quantity {
    Quantity::parse(values.to_vec(), units).unwrap()
  }

  fn zero() -> Quantity {
    Quantity::dimensionless(vec![0.0])
  }

  #[test]
  fn test_construction_validates_units() {
    assert!(Quantity::scalar(1.0, "kg*m/s^2").is_ok());
    let err = Quantity::scalar(1.0, "kg*wumbo").unwrap_err();
    assert!(matches!(err, Error::UnknownUnit(UnknownUnitError { .. })));
    let err = Quantity::scalar(1.0, "kg*(").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
  }

  #[test]
  fn test_dimension_and_factor() {
    use crate::units::dimension::BaseDimension::*;
    use num::pow::Pow;
    let q = quantity(&[2.0], "kN");
    assert_eq!(q.dimension(), Mass * Length / Time.pow(2.0));
    assert_abs_diff_eq!(q.conversion_factor(), 1_000.0);
  }

  #[test]
  fn test_add_same_units() {
    let a = quantity(&[1.0, 2.0], "kg");
    let b = quantity(&[10.0, 20.0], "kg");
    let sum = a.try_add(&b).unwrap();
    assert_eq!(sum.values(), &[11.0, 22.0]);
    assert_eq!(sum.units(), &UnitExpr::symbol("kg"));
  }

  #[test]
  fn test_add_compatible_units_rescales_right_operand() {
    let a = quantity(&[1.0], "kg");
    let b = quantity(&[1_000.0], "g");
    let sum = a.try_add(&b).unwrap();
    assert_eq!(sum.units(), &UnitExpr::symbol("kg"));
    assert_abs_diff_eq!(sum.values()[0], 2.0);
  }

  #[test]
  fn test_add_mismatched_dimensions_fails() {
    let a = quantity(&[1.0], "kg");
    let b = quantity(&[1.0], "m");
    let err = a.try_add(&b).unwrap_err();
    assert_eq!(
      err,
      ArithmeticError::Dimension(DimensionMismatchError::binary(
        "addition",
        UnitExpr::symbol("kg"),
        UnitExpr::symbol("m"),
      )),
    );
  }

  #[test]
  fn test_add_zero_is_universal() {
    let q = quantity(&[1.0], "kg");
    let sum = q.try_add(&zero()).unwrap();
    assert_eq!(sum, q);
    let sum = zero().try_add(&q).unwrap();
    assert_eq!(sum, q);
  }

  #[test]
  fn test_zero_minus_quantity_negates() {
    let q = quantity(&[1.0], "kg");
    let diff = zero().try_sub(&q).unwrap();
    assert_eq!(diff, -&q);
    assert_eq!(diff.units(), &UnitExpr::symbol("kg"));
  }

  #[test]
  fn test_nonzero_dimensionless_is_not_universal() {
    let q = quantity(&[1.0], "kg");
    let err = q.try_add(&Quantity::dimensionless(vec![1.0])).unwrap_err();
    assert!(matches!(err, ArithmeticError::Dimension(_)));
  }

  #[test]
  fn test_in_place_additive() {
    let mut q = quantity(&[1.0], "kg");
    q.try_add_assign(&quantity(&[2.0], "kg")).unwrap();
    assert_eq!(q.values(), &[3.0]);
    q.try_sub_assign(&quantity(&[1.0], "kg")).unwrap();
    assert_eq!(q.values(), &[2.0]);
    let err = q.try_add_assign(&quantity(&[1.0], "s")).unwrap_err();
    assert!(matches!(err, ArithmeticError::Dimension(_)));
    // A failed in-place operation leaves the receiver untouched.
    assert_eq!(q, quantity(&[2.0], "kg"));
  }

  #[test]
  fn test_mul_never_checks_dimensions() {
    let a = quantity(&[2.0], "kg");
    let b = quantity(&[3.0], "m");
    let product = a.try_mul(&b).unwrap();
    assert_eq!(product.values(), &[6.0]);
    assert_eq!(product.units(), &"kg*m".parse().unwrap());
  }

  #[test]
  fn test_mul_units_cancel() {
    let a = quantity(&[6.0], "kg/s");
    let b = quantity(&[2.0], "s");
    let product = a.try_mul(&b).unwrap();
    assert_eq!(product.units(), &UnitExpr::symbol("kg"));
    assert_eq!(product.values(), &[12.0]);
  }

  #[test]
  fn test_div_subtracts_exponents() {
    let a = quantity(&[6.0], "kg");
    let b = quantity(&[2.0], "s^2");
    let quotient = a.try_div(&b).unwrap();
    assert_eq!(quotient.values(), &[3.0]);
    assert_eq!(quotient.units(), &"kg/s^2".parse().unwrap());
  }

  #[test]
  fn test_broadcasting() {
    let a = quantity(&[1.0, 2.0, 3.0], "m");
    let b = quantity(&[2.0], "s^-1");
    let product = a.try_mul(&b).unwrap();
    assert_eq!(product.values(), &[2.0, 4.0, 6.0]);
    let err = a.try_mul(&quantity(&[1.0, 2.0], "m")).unwrap_err();
    assert_eq!(err, ShapeMismatchError { left: 3, right: 2 });
  }

  #[test]
  fn test_scalar_helpers() {
    let q = quantity(&[2.0], "m");
    assert_eq!(q.mul_scalar(3.0).values(), &[6.0]);
    assert_eq!(q.div_scalar(2.0).values(), &[1.0]);
    assert_eq!(q.mul_scalar(3.0).units(), q.units());
  }

  #[test]
  fn test_pow_scales_unit_exponents() {
    let q = quantity(&[3.0], "kg/m");
    let squared = q.pow_scalar(2.0);
    assert_eq!(squared.values(), &[9.0]);
    assert_eq!(squared.units(), &"kg^2/m^2".parse().unwrap());
  }

  #[test]
  fn test_pow_by_dimensionless_quantity() {
    let q = quantity(&[3.0], "m");
    let result = q.try_pow(&Quantity::dimensionless(vec![2.0])).unwrap();
    assert_eq!(result.values(), &[9.0]);
    assert_eq!(result.units(), &"m^2".parse().unwrap());
  }

  #[test]
  fn test_pow_by_dimensioned_quantity_fails() {
    let q = quantity(&[3.0], "m");
    let err = q.try_pow(&quantity(&[2.0], "s")).unwrap_err();
    assert_eq!(
      err,
      ArithmeticError::Dimension(DimensionMismatchError::unary(
        "exponent",
        UnitExpr::symbol("s"),
      )),
    );
  }

  #[test]
  fn test_pow_by_array_exponent_fails() {
    let q = quantity(&[3.0], "m");
    let err = q.try_pow(&Quantity::dimensionless(vec![1.0, 2.0])).unwrap_err();
    assert!(matches!(err, ArithmeticError::Shape(_)));
  }

  #[test]
  fn test_eq_normalizes_to_si() {
    let a = quantity(&[1.0], "kg");
    let b = quantity(&[1_000.0], "g");
    assert!(a.try_eq(&b).unwrap());
    let c = quantity(&[999.0], "g");
    assert!(!a.try_eq(&c).unwrap());
  }

  #[test]
  fn test_eq_against_zero() {
    let q = quantity(&[3.0], "kg");
    assert!(!q.try_eq(&zero()).unwrap());
    let q = quantity(&[0.0], "kg");
    assert!(q.try_eq(&zero()).unwrap());
  }

  #[test]
  fn test_eq_incompatible_dimensions_fails() {
    let a = quantity(&[1.0], "kg");
    let b = quantity(&[1.0], "m");
    assert!(a.try_eq(&b).is_err());
  }

  #[test]
  fn test_convert_to_unit() {
    let mut q = quantity(&[1_000.0], "m");
    q.convert_to_unit("km".parse().unwrap()).unwrap();
    assert_eq!(q.units(), &UnitExpr::symbol("km"));
    assert_abs_diff_eq!(q.values()[0], 1.0);
  }

  #[test]
  fn test_convert_to_unit_compound() {
    let mut q = quantity(&[1.0], "BTU");
    q.convert_to_unit("kg*m^2/s^2".parse().unwrap()).unwrap();
    assert_abs_diff_eq!(q.values()[0], 1_055.055_852_62);
  }

  #[test]
  fn test_converted_to_unit_by_value() {
    let q = quantity(&[2.0], "hr")
      .converted_to_unit(UnitExpr::symbol("min"))
      .unwrap();
    assert_eq!(q.units(), &UnitExpr::symbol("min"));
    assert_abs_diff_eq!(q.values()[0], 120.0, epsilon = 1e-9);
  }

  #[test]
  fn test_pow_assign() {
    let mut q = quantity(&[2.0], "m");
    q.try_pow_assign(&Quantity::dimensionless(vec![3.0])).unwrap();
    assert_eq!(q.values(), &[8.0]);
    assert_eq!(q.units(), &"m^3".parse().unwrap());
  }

  #[test]
  fn test_convert_to_unit_wrong_dimension_fails() {
    let mut q = quantity(&[1_000.0], "m");
    let err = q.convert_to_unit(UnitExpr::symbol("kg")).unwrap_err();
    assert_eq!(
      err,
      ConvertError::Dimension(DimensionMismatchError::binary(
        "unit conversion",
        UnitExpr::symbol("m"),
        UnitExpr::symbol("kg"),
      )),
    );
    // The receiver is untouched after a failed conversion.
    assert_eq!(q, quantity(&[1_000.0], "m"));
  }

  #[test]
  fn test_convert_to_unknown_unit_fails() {
    let mut q = quantity(&[1.0], "m");
    let err = q.convert_to_unit(UnitExpr::symbol("wumbo")).unwrap_err();
    assert_eq!(err, ConvertError::UnknownUnit(UnknownUnitError::new("wumbo")));
  }

  #[test]
  fn test_convert_to_si_is_identity_on_base_units() {
    let mut q = quantity(&[1.0], "kg");
    q.convert_to_si();
    assert_eq!(q.values(), &[1.0]);
    assert_eq!(q.units(), &UnitExpr::symbol("kg"));
  }

  #[test]
  fn test_convert_to_si_compound() {
    let mut q = quantity(&[1.0], "BTU/hr");
    q.convert_to_si();
    assert_eq!(q.units(), &"kg*m^2/s^3".parse().unwrap());
    assert_abs_diff_eq!(q.values()[0], 1_055.055_852_62 / 3_600.0);
  }

  #[test]
  fn test_convert_to_si_dimensionless() {
    let mut q = Quantity::dimensionless(vec![2.0]);
    q.convert_to_si();
    assert_eq!(q, Quantity::dimensionless(vec![2.0]));
  }

  #[test]
  fn test_round_trip_through_conversion() {
    let original = quantity(&[123.456], "psi");
    let mut converted = original.clone();
    converted.convert_to_unit(UnitExpr::symbol("GPa")).unwrap();
    converted.convert_to_unit(UnitExpr::symbol("psi")).unwrap();
    assert_abs_diff_eq!(converted.values()[0], 123.456, epsilon = 1e-9);
  }

  #[test]
  fn test_neg_and_abs() {
    let q = quantity(&[1.5, -2.5], "m/s");
    let negated = -&q;
    assert_eq!(negated.values(), &[-1.5, 2.5]);
    assert_eq!(negated.units(), q.units());
    assert_eq!(q.abs().values(), &[1.5, 2.5]);
  }

  #[test]
  fn test_round_significant() {
    let mut q = quantity(&[1234.5678, 0.0], "m");
    q.round_significant(3);
    assert_eq!(q.values(), &[1230.0, 0.0]);
  }

  #[test]
  fn test_display() {
    let q = quantity(&[1.0, 2.5], "kg/m");
    assert_eq!(q.to_string(), "(1,2.5) kg^1*m^-1");
    let q = Quantity::dimensionless(vec![3.0]);
    assert_eq!(q.to_string(), "(3)");
  }

  #[test]
  fn test_serde_round_trip() {
    let q = quantity(&[1.0, 2.0], "kg*m/s^2");
    let encoded = serde_json::to_string(&q).unwrap();
    let decoded: Quantity = serde_json::from_str(&encoded).unwrap();
    assert_eq!(q, decoded);
  }

  #[test]
  fn test_squared_self_product_in_si() {
    // A quantity multiplied by itself and normalized, mirroring the
    // stock mass-per-length drill.
    let mut q = quantity(&[1.0, 2.0, 3.0], "kg/m/ft");
    let copy = q.clone();
    q.try_mul_assign(&copy).unwrap();
    assert_eq!(q.units(), &"kg^2/m^2/ft^2".parse().unwrap());
    q.convert_to_si();
    assert_eq!(q.units(), &"kg^2*m^-4".parse().unwrap());
    let expected_factor = (1.0 / 0.3048) * (1.0 / 0.3048);
    assert_abs_diff_eq!(q.values()[0], expected_factor, epsilon = 1e-9);
    assert_abs_diff_eq!(q.values()[2], 9.0 * expected_factor, epsilon = 1e-6);
  }
}
