
use crate::util::zip_with;

use approx::AbsDiffEq;
use num::One;
use num::pow::Pow;
use serde::{Serialize, Deserialize};

use std::ops::{Mul, Div};
use std::fmt::{self, Formatter, Display};

/// A dimension is a formal product and quotient of powers of
/// [`BaseDimension`] values.
///
/// Powers are stored as `f64`, since unit expressions permit
/// real-valued exponents (e.g. `(kg*m)^1.5`). Integer-valued powers are
/// by far the common case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
  dims: [f64; NDIMS],
}

/// The seven base quantities of the SI system. Every unit's dimension
/// is a formal product or quotient of zero or more of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseDimension {
  Mass,
  Length,
  Time,
  Current,
  Temperature,
  LuminousIntensity,
  AmountOfSubstance,
}

pub const NDIMS: usize = 7;

impl Dimension {
  pub fn singleton(base: BaseDimension) -> Self {
    let mut dims = [0.0; NDIMS];
    dims[base.dimension_index()] = 1.0;
    Self { dims }
  }

  /// The power of the given base quantity in this dimension.
  pub fn get(&self, base: BaseDimension) -> f64 {
    self.dims[base.dimension_index()]
  }

  /// The base quantities appearing in this dimension with nonzero
  /// power, in canonical order, tagged with their power.
  pub fn components(&self) -> impl Iterator<Item = (BaseDimension, f64)> + '_ {
    BaseDimension::ALL.iter()
      .copied()
      .zip(self.dims.iter().copied())
      .filter(|(_, power)| *power != 0.0)
  }
}

impl BaseDimension {
  /// All base quantities, in the order of their vector index. This
  /// matches the layout of the original units database: mass, length,
  /// time, current, temperature, luminous intensity, substance.
  pub const ALL: [BaseDimension; NDIMS] = [
    BaseDimension::Mass,
    BaseDimension::Length,
    BaseDimension::Time,
    BaseDimension::Current,
    BaseDimension::Temperature,
    BaseDimension::LuminousIntensity,
    BaseDimension::AmountOfSubstance,
  ];

  fn dimension_index(self) -> usize {
    match self {
      BaseDimension::Mass => 0,
      BaseDimension::Length => 1,
      BaseDimension::Time => 2,
      BaseDimension::Current => 3,
      BaseDimension::Temperature => 4,
      BaseDimension::LuminousIntensity => 5,
      BaseDimension::AmountOfSubstance => 6,
    }
  }

  /// The symbol of the SI base unit measuring this quantity.
  pub fn si_symbol(self) -> &'static str {
    match self {
      BaseDimension::Mass => "kg",
      BaseDimension::Length => "m",
      BaseDimension::Time => "s",
      BaseDimension::Current => "A",
      BaseDimension::Temperature => "K",
      BaseDimension::LuminousIntensity => "cd",
      BaseDimension::AmountOfSubstance => "mol",
    }
  }
}

impl From<BaseDimension> for Dimension {
  fn from(base: BaseDimension) -> Self {
    Dimension::singleton(base)
  }
}

impl Pow<f64> for &Dimension {
  type Output = Dimension;

  fn pow(self, power: f64) -> Dimension {
    Dimension {
      dims: self.dims.map(|x| x * power),
    }
  }
}

impl Pow<f64> for BaseDimension {
  type Output = Dimension;

  fn pow(self, power: f64) -> Dimension {
    Dimension::singleton(self).pow(power)
  }
}

impl Pow<f64> for Dimension {
  type Output = Dimension;

  fn pow(self, power: f64) -> Dimension {
    (&self).pow(power)
  }
}

impl Mul for Dimension {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a + b),
    }
  }
}

impl Mul<BaseDimension> for Dimension {
  type Output = Self;

  fn mul(self, rhs: BaseDimension) -> Self {
    self * Dimension::singleton(rhs)
  }
}

impl Div for Dimension {
  type Output = Self;

  fn div(self, rhs: Self) -> Self {
    Dimension {
      dims: zip_with(self.dims, rhs.dims, |a, b| a - b),
    }
  }
}

impl Div<BaseDimension> for Dimension {
  type Output = Self;

  fn div(self, rhs: BaseDimension) -> Self {
    self / Dimension::singleton(rhs)
  }
}

impl Mul for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: Self) -> Dimension {
    Dimension::singleton(self) * Dimension::singleton(rhs)
  }
}

impl Mul<Dimension> for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: Dimension) -> Dimension {
    Dimension::singleton(self) * rhs
  }
}

impl Div for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: Self) -> Dimension {
    Dimension::singleton(self) / Dimension::singleton(rhs)
  }
}

impl Div<Dimension> for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: Dimension) -> Dimension {
    Dimension::singleton(self) / rhs
  }
}

impl One for Dimension {
  fn one() -> Self {
    Self { dims: [0.0; NDIMS] }
  }

  fn is_one(&self) -> bool {
    self.dims.iter().all(|x| *x == 0.0)
  }
}

impl AbsDiffEq for Dimension {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    f64::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
    self.dims.iter()
      .zip(other.dims.iter())
      .all(|(a, b)| a.abs_diff_eq(b, epsilon))
  }
}

impl Display for BaseDimension {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      BaseDimension::Mass => write!(f, "mass"),
      BaseDimension::Length => write!(f, "length"),
      BaseDimension::Time => write!(f, "time"),
      BaseDimension::Current => write!(f, "current"),
      BaseDimension::Temperature => write!(f, "temperature"),
      BaseDimension::LuminousIntensity => write!(f, "intensity"),
      BaseDimension::AmountOfSubstance => write!(f, "amount"),
    }
  }
}

impl Display for Dimension {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    for (dim, power) in self.components() {
      if power == 1.0 {
        numerator.push(dim.to_string());
      } else if power == -1.0 {
        denominator.push(dim.to_string());
      } else if power > 0.0 {
        numerator.push(format!("{}^{}", dim, power));
      } else {
        denominator.push(format!("{}^{}", dim, -power));
      }
    }
    if numerator.is_empty() {
      write!(f, "1")?;
    } else {
      write!(f, "{}", numerator.join(" "))?;
    }
    if !denominator.is_empty() {
      write!(f, " / {}", denominator.join(" "))?;
    }
    Ok(())
  }
}
