
//! Unit-aware quantity engine for randomized physics and engineering
//! homework problems.
//!
//! The crate parses multiplicative unit-expression strings such as
//! `kg*m/s^2` or `(kg/m/ft)*BTU^2^3` into symbol-to-exponent mappings
//! ([`UnitExpr`]), resolves those against a table of known units into
//! 7-dimensional SI dimension vectors and aggregate conversion factors,
//! and offers a [`Quantity`] type pairing a numeric payload with a unit
//! expression, with dimension-checked arithmetic, unit conversion, SI
//! normalization, and significant-figure rounding for display of
//! randomized values.
//!
//! Problem generation, document templating, and random sampling live
//! outside this crate; they consume the API re-exported at the crate
//! root.

pub mod error;
pub mod parsing;
pub mod quantity;
pub mod units;
pub mod util;

pub use error::Error;
pub use parsing::{parse_units, ParseError};
pub use quantity::{Quantity, ArithmeticError, ConvertError,
                   DimensionMismatchError, ShapeMismatchError};
pub use units::{BaseDimension, Dimension, UnitExpr, UnitTable, UnitEntry,
                Resolution, CandidateOrdering, UnknownUnitError,
                TableAlreadyInstalledError, install, global};
pub use util::round_to_sig_figs;
