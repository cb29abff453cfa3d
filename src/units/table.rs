
use super::dimension::{Dimension, BaseDimension};
use super::expr::UnitExpr;

use itertools::Itertools;
use num::One;
use num::pow::Pow;
use once_cell::sync::OnceCell;
use thiserror::Error;

use std::collections::HashMap;
use std::f64::consts::PI;

/// A single unit's table data: its dimension and the multiplicative
/// factor that expresses one of the unit in SI base units.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
  dimension: Dimension,
  factor: f64,
}

/// The table of known units, mapping each symbol to its [`UnitEntry`].
///
/// The table is loaded once at process start and read-only thereafter;
/// see [`install`] and [`global`]. Problem sets that need nonstandard
/// units build their own table and install it before constructing any
/// quantities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
  entries: HashMap<String, UnitEntry>,
}

/// The result of resolving a [`UnitExpr`] against a table: the
/// expression's overall dimension and its aggregate conversion factor
/// to SI base units.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
  pub dimension: Dimension,
  pub factor: f64,
}

/// Candidate ordering for [`UnitTable::interchangeable_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrdering {
  /// The requested symbol first, then the rest in symbol order. This is
  /// the ordering random-unit display expects: the first candidate is
  /// the unit the problem was authored in.
  TargetFirst,
  /// Units with conversion factor exactly 1 (the SI-canonical units for
  /// the dimension) first, then the rest in symbol order.
  SiFirst,
}

/// Error looking up a unit symbol with no table entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown unit '{symbol}'")]
pub struct UnknownUnitError {
  pub symbol: String,
}

/// Error installing a global table after one was already installed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("a global unit table is already installed")]
pub struct TableAlreadyInstalledError;

impl UnitEntry {
  pub fn new(dimension: impl Into<Dimension>, factor: f64) -> Self {
    Self { dimension: dimension.into(), factor }
  }

  pub fn dimension(&self) -> &Dimension {
    &self.dimension
  }

  /// The amount of the SI base unit product equal to one of this unit.
  pub fn factor(&self) -> f64 {
    self.factor
  }
}

impl UnknownUnitError {
  pub fn new(symbol: impl Into<String>) -> Self {
    Self { symbol: symbol.into() }
  }
}

impl UnitTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, symbol: impl Into<String>, entry: UnitEntry) {
    self.entries.insert(symbol.into(), entry);
  }

  pub fn get(&self, symbol: &str) -> Result<&UnitEntry, UnknownUnitError> {
    self.entries.get(symbol).ok_or_else(|| UnknownUnitError::new(symbol))
  }

  pub fn contains(&self, symbol: &str) -> bool {
    self.entries.contains_key(symbol)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// All known symbols, in symbol order.
  pub fn symbols(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str).sorted_unstable()
  }

  /// Expands a unit expression into its overall dimension and
  /// aggregate SI conversion factor.
  ///
  /// The empty expression resolves to the dimensionless zero vector
  /// with factor 1. Fails if any symbol in the expression has no table
  /// entry.
  pub fn resolve(&self, expr: &UnitExpr) -> Result<Resolution, UnknownUnitError> {
    let mut dimension = Dimension::one();
    let mut factor = 1.0;
    for (symbol, exponent) in expr.iter() {
      let entry = self.get(symbol)?;
      dimension = dimension * entry.dimension.clone().pow(exponent);
      factor *= entry.factor.powf(exponent);
    }
    Ok(Resolution { dimension, factor })
  }

  /// Every table symbol whose dimension equals `dimension`, in symbol
  /// order.
  pub fn units_for_dimension(&self, dimension: &Dimension) -> Vec<&str> {
    self.entries.iter()
      .filter(|(_, entry)| entry.dimension == *dimension)
      .map(|(symbol, _)| symbol.as_str())
      .sorted_unstable()
      .collect()
  }

  /// The candidate set for randomized-unit display: every symbol
  /// sharing `symbol`'s dimension, ordered per `ordering`. The
  /// requested symbol is always a member of the result.
  pub fn interchangeable_units(
    &self,
    symbol: &str,
    ordering: CandidateOrdering,
  ) -> Result<Vec<&str>, UnknownUnitError> {
    let entry = self.get(symbol)?;
    let mut candidates = self.units_for_dimension(&entry.dimension);
    match ordering {
      CandidateOrdering::TargetFirst => {
        candidates.sort_by_key(|candidate| *candidate != symbol);
      }
      CandidateOrdering::SiFirst => {
        candidates.sort_by_key(|candidate| self.get(candidate).map_or(true, |e| e.factor != 1.0));
      }
    }
    Ok(candidates)
  }

  /// The built-in table: the seven SI base units plus the derived and
  /// non-SI units that the stock assignment sets reference.
  pub fn standard() -> Self {
    use BaseDimension::*;
    let units = vec![
      // SI base units
      ("kg", UnitEntry::new(Mass, 1.0)),
      ("m", UnitEntry::new(Length, 1.0)),
      ("s", UnitEntry::new(Time, 1.0)),
      ("A", UnitEntry::new(Current, 1.0)),
      ("K", UnitEntry::new(Temperature, 1.0)),
      ("cd", UnitEntry::new(LuminousIntensity, 1.0)),
      ("mol", UnitEntry::new(AmountOfSubstance, 1.0)),
      // Mass units
      ("g", UnitEntry::new(Mass, 1e-3)),
      ("mg", UnitEntry::new(Mass, 1e-6)),
      ("lb", UnitEntry::new(Mass, 0.453_592_37)),
      ("oz", UnitEntry::new(Mass, 0.028_349_523_125)),
      ("ton", UnitEntry::new(Mass, 907.184_74)),
      ("tonne", UnitEntry::new(Mass, 1_000.0)),
      // Length units
      ("km", UnitEntry::new(Length, 1_000.0)),
      ("cm", UnitEntry::new(Length, 0.01)),
      ("mm", UnitEntry::new(Length, 1e-3)),
      ("in", UnitEntry::new(Length, 0.0254)),
      ("ft", UnitEntry::new(Length, 0.3048)),
      ("yd", UnitEntry::new(Length, 0.9144)),
      ("mi", UnitEntry::new(Length, 1_609.344)),
      ("nmi", UnitEntry::new(Length, 1_852.0)),
      // Time units
      ("ms", UnitEntry::new(Time, 1e-3)),
      ("min", UnitEntry::new(Time, 60.0)),
      ("hr", UnitEntry::new(Time, 3_600.0)),
      ("day", UnitEntry::new(Time, 86_400.0)),
      // Current units
      ("mA", UnitEntry::new(Current, 1e-3)),
      // Temperature units (relative scale only)
      ("degC", UnitEntry::new(Temperature, 1.0)),
      ("degF", UnitEntry::new(Temperature, 5.0 / 9.0)),
      // Angular units (dimensionless)
      ("rad", UnitEntry::new(Dimension::one(), 1.0)),
      ("deg", UnitEntry::new(Dimension::one(), PI / 180.0)),
      // Frequency units
      ("Hz", UnitEntry::new(Dimension::one() / Time, 1.0)),
      // Velocity units
      ("mph", UnitEntry::new(Length / Time, 0.447_04)),
      ("kph", UnitEntry::new(Length / Time, 1_000.0 / 3_600.0)),
      // Acceleration units
      ("ga", UnitEntry::new(Length / Time.pow(2.0), 9.806_65)),
      // Force units
      ("N", UnitEntry::new(Mass * Length / Time.pow(2.0), 1.0)),
      ("kN", UnitEntry::new(Mass * Length / Time.pow(2.0), 1_000.0)),
      ("lbf", UnitEntry::new(Mass * Length / Time.pow(2.0), 4.448_221_615_260_5)),
      ("dyn", UnitEntry::new(Mass * Length / Time.pow(2.0), 1e-5)),
      // Energy units
      ("J", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 1.0)),
      ("kJ", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 1_000.0)),
      ("BTU", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 1_055.055_852_62)),
      ("cal", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 4.1868)),
      ("kWh", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 3.6e6)),
      ("eV", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(2.0), 1.602_176_634e-19)),
      // Power units
      ("W", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(3.0), 1.0)),
      ("kW", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(3.0), 1_000.0)),
      ("hp", UnitEntry::new(Mass * Length.pow(2.0) / Time.pow(3.0), 745.699_871_582_270_2)),
      // Pressure units
      ("Pa", UnitEntry::new(Mass / Length / Time.pow(2.0), 1.0)),
      ("kPa", UnitEntry::new(Mass / Length / Time.pow(2.0), 1e3)),
      ("MPa", UnitEntry::new(Mass / Length / Time.pow(2.0), 1e6)),
      ("GPa", UnitEntry::new(Mass / Length / Time.pow(2.0), 1e9)),
      ("bar", UnitEntry::new(Mass / Length / Time.pow(2.0), 1e5)),
      ("atm", UnitEntry::new(Mass / Length / Time.pow(2.0), 101_325.0)),
      ("psi", UnitEntry::new(Mass / Length / Time.pow(2.0), 6_894.757_293_168_361)),
      // Volume units
      ("L", UnitEntry::new(Length.pow(3.0), 1e-3)),
      ("mL", UnitEntry::new(Length.pow(3.0), 1e-6)),
      ("gal", UnitEntry::new(Length.pow(3.0), 0.003_785_411_784)),
      // Area units
      ("ha", UnitEntry::new(Length.pow(2.0), 1e4)),
    ];
    units.into_iter()
      .map(|(symbol, entry)| (symbol.to_owned(), entry))
      .collect()
  }
}

impl FromIterator<(String, UnitEntry)> for UnitTable {
  fn from_iter<I: IntoIterator<Item = (String, UnitEntry)>>(iter: I) -> Self {
    Self { entries: iter.into_iter().collect() }
  }
}

static GLOBAL_TABLE: OnceCell<UnitTable> = OnceCell::new();

/// Installs the process-wide unit table. May be called at most once,
/// before any quantity is constructed; afterward the table is read-only
/// and shared freely across threads.
pub fn install(table: UnitTable) -> Result<(), TableAlreadyInstalledError> {
  GLOBAL_TABLE.set(table).map_err(|_| TableAlreadyInstalledError)
}

/// The process-wide unit table. Falls back to [`UnitTable::standard`]
/// if no table was installed.
pub fn global() -> &'static UnitTable {
  GLOBAL_TABLE.get_or_init(UnitTable::standard)
}
