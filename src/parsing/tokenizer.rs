
use super::parser::ParseError;

use once_cell::sync::Lazy;
use regex::Regex;

use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Thin wrapper around `usize` that represents a position in a parsed
/// string. Usually used for error reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceOffset(pub usize);

/// A span of source offsets. Spans are half-open intervals: `start` is
/// included and `end` is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub start: SourceOffset,
  pub end: SourceOffset,
}

/// Cursor over the input string, tracking the current offset for error
/// reporting. All reads either match at the current position and
/// advance, or leave the state untouched.
#[derive(Debug, Clone)]
pub(crate) struct TokenizerState<'a> {
  input: &'a str,
  position: SourceOffset,
}

#[derive(Debug, Clone)]
pub(crate) struct TokenizerMatch<'a> {
  matched_str: &'a str,
  start: SourceOffset,
  end: SourceOffset,
}

/// A lexical token of the unit-expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
  pub(crate) data: TokenData,
  pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenData {
  /// A (possibly signed) numeric literal.
  Number(f64),
  /// A unit symbol.
  Ident(String),
  Star,
  Slash,
  Caret,
  Plus,
  Minus,
  LeftParen,
  RightParen,
}

impl Span {
  pub fn new(start: SourceOffset, end: SourceOffset) -> Self {
    Self { start, end }
  }
}

impl Display for SourceOffset {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

impl Add<usize> for SourceOffset {
  type Output = Self;

  fn add(self, rhs: usize) -> Self::Output {
    Self(self.0 + rhs)
  }
}

impl<'a> TokenizerState<'a> {
  pub(crate) fn new(input: &'a str) -> Self {
    Self { input, position: SourceOffset(0) }
  }

  pub(crate) fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub(crate) fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  pub(crate) fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Advances by `amount` bytes, up to the end of the input, and
  /// returns the skipped substring with its span.
  pub(crate) fn advance(&mut self, amount: usize) -> TokenizerMatch<'a> {
    let amount = amount.min(self.input.len());
    let start = self.position;
    let (prefix, suffix) = self.input.split_at(amount);
    self.position = start + amount;
    self.input = suffix;
    TokenizerMatch {
      matched_str: prefix,
      start,
      end: start + amount,
    }
  }

  pub(crate) fn read_literal(&mut self, literal: &str) -> Option<TokenizerMatch<'a>> {
    self.input.starts_with(literal).then(|| self.advance(literal.len()))
  }

  /// If the input at the current position matches the given regex,
  /// returns the match and advances past it.
  ///
  /// The regex MUST be anchored at the start of the input.
  pub(crate) fn read_regex(&mut self, regex: &Regex) -> Option<TokenizerMatch<'a>> {
    let m = regex.find(self.input)?;
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");
    Some(self.advance(m.len()))
  }

  pub(crate) fn consume_spaces(&mut self) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());
    self.read_regex(&RE).expect("regex should not fail");
  }
}

impl<'a> TokenizerMatch<'a> {
  pub(crate) fn as_str(&self) -> &'a str {
    self.matched_str
  }

  pub(crate) fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
}

impl Token {
  fn new(data: TokenData, span: Span) -> Self {
    Self { data, span }
  }
}

impl Display for TokenData {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Number(n) => write!(f, "{n}"),
      TokenData::Ident(name) => write!(f, "{name}"),
      TokenData::Star => write!(f, "*"),
      TokenData::Slash => write!(f, "/"),
      TokenData::Caret => write!(f, "^"),
      TokenData::Plus => write!(f, "+"),
      TokenData::Minus => write!(f, "-"),
      TokenData::LeftParen => write!(f, "("),
      TokenData::RightParen => write!(f, ")"),
    }
  }
}

/// Splits the input into tokens, skipping whitespace. Numeric literals
/// absorb a leading sign, so `^-2` lexes as a caret followed by the
/// number -2.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
  let mut state = TokenizerState::new(input);
  let mut tokens = Vec::new();
  loop {
    state.consume_spaces();
    if state.is_eof() {
      return Ok(tokens);
    }
    tokens.push(read_one_token(&mut state)?);
  }
}

fn read_one_token(state: &mut TokenizerState<'_>) -> Result<Token, ParseError> {
  static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?").unwrap()
  });
  static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_$]*").unwrap()
  });

  if let Some(m) = state.read_regex(&NUMBER_RE) {
    // unwrap: the regex only matches valid float syntax.
    let value: f64 = m.as_str().parse().unwrap();
    return Ok(Token::new(TokenData::Number(value), m.span()));
  }
  if let Some(m) = state.read_regex(&IDENT_RE) {
    return Ok(Token::new(TokenData::Ident(m.as_str().to_owned()), m.span()));
  }
  for (literal, data) in [
    ("*", TokenData::Star),
    ("/", TokenData::Slash),
    ("^", TokenData::Caret),
    ("+", TokenData::Plus),
    ("-", TokenData::Minus),
    ("(", TokenData::LeftParen),
    (")", TokenData::RightParen),
  ] {
    if let Some(m) = state.read_literal(literal) {
      return Ok(Token::new(data, m.span()));
    }
  }
  // unwrap: EOF was ruled out by the caller.
  let ch = state.peek().unwrap();
  Err(ParseError::UnexpectedChar { ch, position: state.current_pos() })
}
