
use super::tokenizer::{tokenize, Token, TokenData, SourceOffset, Span};
use crate::units::expr::{self, UnitExpr, Operand, AlgebraError};

use thiserror::Error;

/// Error parsing a unit-expression string. Every variant carries the
/// offending character, token, or substring together with its position
/// in the input.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("unexpected character '{ch}' at {position}")]
  UnexpectedChar { ch: char, position: SourceOffset },
  #[error("unexpected token '{token}' at {span}")]
  UnexpectedToken { token: String, span: Span },
  #[error("unexpected end of input at {position}")]
  UnexpectedEof { position: SourceOffset },
  #[error("unmatched '(' at {span}")]
  UnmatchedParen { span: Span },
  #[error("unary minus applied to unit expression '{units}' at {span}")]
  NegatedUnits { units: UnitExpr, span: Span },
  #[error("expression is a bare number, not a unit")]
  BareNumber { span: Span },
  #[error("invalid operands at {span}: {error}")]
  Algebra {
    #[source]
    error: AlgebraError,
    span: Span,
  },
}

/// One entry of the parser's flat evaluation record.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
  data: EntryData,
  span: Span,
}

#[derive(Debug, Clone, PartialEq)]
enum EntryData {
  Number(f64),
  Symbol(String),
  Mul,
  Div,
  Pow,
  Negate,
}

/// Parses a unit-expression string into a [`UnitExpr`].
///
/// The grammar has `*` and `/` as the lowest-precedence infix
/// operators, `^` as a higher-precedence right-associative operator,
/// and supports parenthesized subexpressions and signed numeric
/// literals. `a^b^c` parses as `a^(b^c)`, so `u^2^3` is `u^8`. The
/// empty (or all-whitespace) string parses to the empty, dimensionless
/// expression.
pub fn parse_units(input: &str) -> Result<UnitExpr, ParseError> {
  let tokens = tokenize(input)?;
  if tokens.is_empty() {
    return Ok(UnitExpr::empty());
  }
  let mut parser = Parser::new(&tokens, SourceOffset(input.len()));
  parser.parse_expr()?;
  if let Some(token) = parser.peek() {
    return Err(ParseError::UnexpectedToken {
      token: token.data.to_string(),
      span: token.span,
    });
  }
  let mut record = parser.record;
  let result = evaluate(&mut record)?;
  match result {
    Operand::Units(units) => Ok(units),
    Operand::Number(_) => Err(ParseError::BareNumber {
      span: Span::new(SourceOffset(0), SourceOffset(input.len())),
    }),
  }
}

/// Recursive-descent parser which flattens the expression onto a
/// call-local postfix record. Each call to [`parse_units`] owns its own
/// record, so reentrant parses cannot interfere with each other.
struct Parser<'a> {
  tokens: &'a [Token],
  position: usize,
  end: SourceOffset,
  record: Vec<Entry>,
}

impl<'a> Parser<'a> {
  fn new(tokens: &'a [Token], end: SourceOffset) -> Self {
    Self { tokens, position: 0, end, record: Vec::new() }
  }

  fn peek(&self) -> Option<&'a Token> {
    self.tokens.get(self.position)
  }

  fn advance(&mut self) -> Option<&'a Token> {
    let token = self.tokens.get(self.position)?;
    self.position += 1;
    Some(token)
  }

  fn push(&mut self, data: EntryData, span: Span) {
    self.record.push(Entry { data, span });
  }

  /// `expr := factor (("*" | "/") factor)*`
  fn parse_expr(&mut self) -> Result<(), ParseError> {
    self.parse_factor()?;
    while let Some(token) = self.peek() {
      let data = match token.data {
        TokenData::Star => EntryData::Mul,
        TokenData::Slash => EntryData::Div,
        _ => break,
      };
      let span = token.span;
      self.position += 1;
      self.parse_factor()?;
      self.push(data, span);
    }
    Ok(())
  }

  /// `factor := atom ("^" factor)?`, with the recursion on the right
  /// side making `^` right-associative.
  fn parse_factor(&mut self) -> Result<(), ParseError> {
    self.parse_atom()?;
    if let Some(token) = self.peek() {
      if token.data == TokenData::Caret {
        let span = token.span;
        self.position += 1;
        self.parse_factor()?;
        self.push(EntryData::Pow, span);
      }
    }
    Ok(())
  }

  /// `atom := ("-" | "+")* (number | ident | "(" expr ")")`
  fn parse_atom(&mut self) -> Result<(), ParseError> {
    let mut negations = Vec::new();
    while let Some(token) = self.peek() {
      match token.data {
        TokenData::Minus => negations.push(token.span),
        TokenData::Plus => {}
        _ => break,
      }
      self.position += 1;
    }
    let Some(token) = self.advance() else {
      return Err(ParseError::UnexpectedEof { position: self.end });
    };
    match &token.data {
      TokenData::Number(value) => {
        self.push(EntryData::Number(*value), token.span);
      }
      TokenData::Ident(name) => {
        self.push(EntryData::Symbol(name.clone()), token.span);
      }
      TokenData::LeftParen => {
        self.parse_expr()?;
        match self.advance() {
          Some(close) if close.data == TokenData::RightParen => {}
          _ => return Err(ParseError::UnmatchedParen { span: token.span }),
        }
      }
      _ => {
        return Err(ParseError::UnexpectedToken {
          token: token.data.to_string(),
          span: token.span,
        });
      }
    }
    // Negation markers sit above their operand in the record, so the
    // evaluator pops them first.
    for span in negations {
      self.push(EntryData::Negate, span);
    }
    Ok(())
  }
}

/// Evaluates the postfix record as a stack machine: operators pop their
/// operands (right operand first, since operands were pushed in source
/// order) and combine them through the unit algebra.
fn evaluate(record: &mut Vec<Entry>) -> Result<Operand, ParseError> {
  let Some(entry) = record.pop() else {
    // The descent pass only emits well-formed records, so an underflow
    // here means a truncated record from a caller bug. Report it as a
    // truncated input rather than panicking.
    return Err(ParseError::UnexpectedEof { position: SourceOffset(0) });
  };
  match entry.data {
    EntryData::Number(value) => Ok(Operand::Number(value)),
    EntryData::Symbol(symbol) => Ok(Operand::Units(UnitExpr::symbol(symbol))),
    EntryData::Negate => {
      match evaluate(record)? {
        Operand::Number(value) => Ok(Operand::Number(-value)),
        Operand::Units(units) => Err(ParseError::NegatedUnits { units, span: entry.span }),
      }
    }
    EntryData::Mul => apply(expr::multiply, record, entry.span),
    EntryData::Div => apply(expr::divide, record, entry.span),
    EntryData::Pow => apply(expr::pow, record, entry.span),
  }
}

fn apply(
  op: fn(Operand, Operand) -> Result<Operand, AlgebraError>,
  record: &mut Vec<Entry>,
  span: Span,
) -> Result<Operand, ParseError> {
  let right = evaluate(record)?;
  let left = evaluate(record)?;
  op(left, right).map_err(|error| ParseError::Algebra { error, span })
}
