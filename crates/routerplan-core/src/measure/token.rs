//! Tokenizer for measurement and angle text.
//!
//! # Token production rules
//!
//! | Input                 | Token produced                                 |
//! |-----------------------|------------------------------------------------|
//! | `12`, `3.5`, `.5`, `5.` | `Number`                                       |
//! | `-2` at operand start | `Number` with the sign folded in               |
//! | `5/16`                | `Fraction` (no whitespace around the slash)    |
//! | `in`, `mm`, `"`, `°`  | `Unit`, only after a number, fraction or `)`   |
//! | `(`, `)`              | `Parenthesis`                                  |
//! | `+ - * / × ÷ −`       | `Symbol`                                       |

use tracing::trace;

use crate::error::ParseError;
use crate::units::{Unit, UnitTable};

/// Parenthesis direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// Arithmetic operator glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Plus,
    Minus,
    Multiply,
    Divide,
}

/// Classified token payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// A numeric literal. `integer` is set when the text has no decimal point.
    Number { value: f64, integer: bool },
    /// `numerator/denominator` written without spaces
    Fraction { numerator: i64, denominator: u64 },
    Unit(Unit),
    Parenthesis(Paren),
    Symbol(Symbol),
}

/// A token borrowing its text from the source string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character
    pub position: usize,
}

impl Token<'_> {
    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    /// Whether a value can end with this token (so a unit or a binary
    /// operator may follow it)
    fn ends_value(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number { .. }
                | TokenKind::Fraction { .. }
                | TokenKind::Parenthesis(Paren::Close)
        )
    }
}

/// Split `text` into tokens in source order.
pub fn tokenize<'a>(text: &'a str, table: &UnitTable) -> Result<Vec<Token<'a>>, ParseError> {
    let mut lexer = Lexer {
        src: text,
        pos: 0,
        tokens: Vec::new(),
        table,
    };
    lexer.run()?;
    trace!("tokenized {:?} into {} tokens", text, lexer.tokens.len());
    Ok(lexer.tokens)
}

struct Lexer<'a, 't> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token<'a>>,
    table: &'t UnitTable,
}

impl<'a> Lexer<'a, '_> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            text: &self.src[start..end],
            position: start,
        });
        self.pos = end;
    }

    fn expects_operand(&self) -> bool {
        self.tokens.last().is_none_or(|t| {
            matches!(
                t.kind,
                TokenKind::Symbol(_) | TokenKind::Parenthesis(Paren::Open)
            )
        })
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
                continue;
            }

            let start = self.pos;
            match c {
                '0'..='9' => self.number(start, start, false)?,
                '.' if starts_number(&self.rest()[1..]) => self.number(start, start, false)?,
                '+' | '-' | '\u{2212}' => {
                    let after = start + c.len_utf8();
                    if self.expects_operand() && starts_number(&self.src[after..]) {
                        self.number(start, after, c != '+')?;
                    } else {
                        let symbol = if c == '+' { Symbol::Plus } else { Symbol::Minus };
                        self.push(TokenKind::Symbol(symbol), start, after);
                    }
                }
                '*' | '\u{d7}' => {
                    self.push(TokenKind::Symbol(Symbol::Multiply), start, start + c.len_utf8())
                }
                '\u{f7}' => {
                    self.push(TokenKind::Symbol(Symbol::Divide), start, start + c.len_utf8())
                }
                '/' => {
                    if !self.fold_fraction(start) {
                        self.push(TokenKind::Symbol(Symbol::Divide), start, start + 1);
                    }
                }
                '(' => self.push(TokenKind::Parenthesis(Paren::Open), start, start + 1),
                ')' => self.push(TokenKind::Parenthesis(Paren::Close), start, start + 1),
                _ => self.unit(start, c)?,
            }
        }
        Ok(())
    }

    /// Scan a number whose digits begin at `digits_start`; `start` includes
    /// any sign already consumed.
    fn number(&mut self, start: usize, digits_start: usize, negative: bool) -> Result<(), ParseError> {
        let digits = scan_number(&self.src[digits_start..]);
        let end = digits_start + digits.len();
        let magnitude: f64 = digits
            .parse()
            .map_err(|_| ParseError::malformed(start, format!("invalid number '{}'", digits)))?;
        let value = if negative { -magnitude } else { magnitude };
        let integer = !digits.contains('.');
        self.push(TokenKind::Number { value, integer }, start, end);
        Ok(())
    }

    /// Fold `int/int` into a single fraction token. Returns false when the
    /// slash is a plain division.
    fn fold_fraction(&mut self, slash: usize) -> bool {
        let Some(prev) = self.tokens.last().copied() else {
            return false;
        };
        if prev.end() != slash || !matches!(prev.kind, TokenKind::Number { integer: true, .. }) {
            return false;
        }

        let after = &self.src[slash + 1..];
        let denominator_text = scan_digits(after);
        if denominator_text.is_empty() || after[denominator_text.len()..].starts_with('.') {
            return false;
        }

        let numerator = parse_signed_integer(prev.text);
        let denominator = denominator_text.parse::<u64>().ok();
        let (Some(numerator), Some(denominator)) = (numerator, denominator) else {
            return false;
        };

        self.tokens.pop();
        let end = slash + 1 + denominator_text.len();
        self.push(
            TokenKind::Fraction {
                numerator,
                denominator,
            },
            prev.position,
            end,
        );
        true
    }

    fn unit(&mut self, start: usize, c: char) -> Result<(), ParseError> {
        let Some((unit, len)) = self.table.lookup_longest(self.rest()) else {
            return Err(ParseError::UnrecognizedCharacter {
                character: c,
                position: start,
            });
        };
        if !self.tokens.last().is_some_and(Token::ends_value) {
            return Err(ParseError::malformed(
                start,
                format!("unit '{}' must follow a value", &self.src[start..start + len]),
            ));
        }
        self.push(TokenKind::Unit(unit), start, start + len);
        Ok(())
    }
}

fn starts_number(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn scan_digits(s: &str) -> &str {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    &s[..len]
}

/// Digits with at most one decimal point.
fn scan_number(s: &str) -> &str {
    let int_len = scan_digits(s).len();
    if s[int_len..].starts_with('.') {
        let frac_len = scan_digits(&s[int_len + 1..]).len();
        &s[..int_len + 1 + frac_len]
    } else {
        &s[..int_len]
    }
}

fn parse_signed_integer(text: &str) -> Option<i64> {
    let (negative, digits) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('\u{2212}') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    };
    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
