
//! Parsing facilities for textual unit expressions.
//!
//! The grammar treats `*` and `/` as its lowest-precedence infix
//! operators and `^` as a higher-precedence, right-associative
//! exponentiation operator, with parenthesized subexpressions and
//! signed numeric literals as exponents.

mod parser;
mod tokenizer;

pub use parser::{parse_units, ParseError};
pub use tokenizer::{SourceOffset, Span};
