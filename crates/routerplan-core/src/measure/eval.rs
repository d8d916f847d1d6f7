//! Recursive-descent evaluator over measurement tokens.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | postfix
//! postfix := primary unit?
//! primary := number fraction? | fraction | '(' expr ')'
//! ```
//!
//! A number immediately followed by a fraction is a mixed number (`1 1/2`).

use tracing::trace;

use super::token::{Paren, Symbol, Token, TokenKind};
use super::{CanonicalValue, Dimension};
use crate::error::{MeasureError, ParseError, UnitError};
use crate::units::UnitTable;

/// Intermediate value. `dimension` is `None` until an explicit unit tags it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quantity {
    pub value: f64,
    pub dimension: Option<Dimension>,
}

impl Quantity {
    fn bare(value: f64) -> Self {
        Self {
            value,
            dimension: None,
        }
    }

    fn combine(self, other: Quantity, value: f64) -> Result<Quantity, UnitError> {
        let dimension = match (self.dimension, other.dimension) {
            (Some(left), Some(right)) if left != right => {
                return Err(UnitError::DimensionMismatch { left, right })
            }
            (left, right) => left.or(right),
        };
        Ok(Quantity {
            value: finite(value)?,
            dimension,
        })
    }
}

/// Literals and intermediates must stay finite, not just the final result.
fn finite(value: f64) -> Result<f64, UnitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UnitError::NonFinite)
    }
}

/// Evaluate tokens into a quantity that still remembers whether any unit was
/// present.
pub(crate) fn evaluate_quantity(
    tokens: &[Token<'_>],
    table: &UnitTable,
) -> Result<Quantity, MeasureError> {
    let end = tokens.last().map_or(0, Token::end);
    if tokens.is_empty() {
        return Err(ParseError::malformed(0, "empty expression").into());
    }

    let mut parser = Parser {
        tokens,
        index: 0,
        end,
        table,
    };
    let quantity = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::malformed(
            extra.position,
            format!("unexpected '{}'", extra.text),
        )
        .into());
    }
    if !quantity.value.is_finite() {
        return Err(UnitError::NonFinite.into());
    }
    trace!(value = quantity.value, "evaluated {} tokens", tokens.len());
    Ok(quantity)
}

/// Evaluate a token sequence into a canonical value.
///
/// Expressions without any unit are lengths already in the table's canonical
/// unit. Signed results are returned as-is.
pub fn evaluate(tokens: &[Token<'_>], table: &UnitTable) -> Result<CanonicalValue, MeasureError> {
    let quantity = evaluate_quantity(tokens, table)?;
    Ok(CanonicalValue {
        magnitude: quantity.value,
        dimension: quantity.dimension.unwrap_or(Dimension::Length),
    })
}

struct Parser<'a, 't> {
    tokens: &'a [Token<'a>],
    index: usize,
    end: usize,
    table: &'t UnitTable,
}

impl<'a> Parser<'a, '_> {
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn peek_symbol(&self) -> Option<(Symbol, usize)> {
        match self.peek()?.kind {
            TokenKind::Symbol(symbol) => Some((symbol, self.peek()?.position)),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<Quantity, MeasureError> {
        let mut left = self.term()?;
        while let Some((symbol @ (Symbol::Plus | Symbol::Minus), _)) = self.peek_symbol() {
            self.index += 1;
            let right = self.term()?;
            let value = if symbol == Symbol::Plus {
                left.value + right.value
            } else {
                left.value - right.value
            };
            left = left.combine(right, value)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Quantity, MeasureError> {
        let mut left = self.unary()?;
        while let Some((symbol @ (Symbol::Multiply | Symbol::Divide), position)) = self.peek_symbol()
        {
            self.index += 1;
            let right = self.unary()?;
            let value = if symbol == Symbol::Multiply {
                left.value * right.value
            } else {
                if right.value == 0.0 {
                    return Err(UnitError::DivisionByZero { position }.into());
                }
                left.value / right.value
            };
            left = left.combine(right, value)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Quantity, MeasureError> {
        match self.peek_symbol() {
            Some((Symbol::Minus, _)) => {
                self.index += 1;
                let inner = self.unary()?;
                Ok(Quantity {
                    value: -inner.value,
                    ..inner
                })
            }
            Some((Symbol::Plus, _)) => {
                self.index += 1;
                self.unary()
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Quantity, MeasureError> {
        let quantity = self.primary()?;
        let Some(token) = self.peek() else {
            return Ok(quantity);
        };
        let TokenKind::Unit(unit) = token.kind else {
            return Ok(quantity);
        };
        self.index += 1;

        if quantity.dimension.is_some() {
            return Err(ParseError::malformed(
                token.position,
                format!("unit '{}' applied to a value that already has a unit", token.text),
            )
            .into());
        }
        let dimension = if unit.is_angular() {
            Dimension::Angle
        } else {
            Dimension::Length
        };
        Ok(Quantity {
            value: finite(quantity.value * self.table.factor(unit))?,
            dimension: Some(dimension),
        })
    }

    fn primary(&mut self) -> Result<Quantity, MeasureError> {
        let Some(token) = self.next() else {
            return Err(ParseError::malformed(self.end, "expected a value").into());
        };

        match token.kind {
            TokenKind::Number { value, integer } => {
                let value = finite(value)?;
                if let Some(next) = self.peek() {
                    if let TokenKind::Fraction { .. } = next.kind {
                        return self.mixed_number(value, integer, token);
                    }
                }
                Ok(Quantity::bare(value))
            }
            TokenKind::Fraction {
                numerator,
                denominator,
            } => Ok(Quantity::bare(fraction_value(
                numerator,
                denominator,
                token.position,
            )?)),
            TokenKind::Parenthesis(Paren::Open) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::Parenthesis(Paren::Close),
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::malformed(
                        other.position,
                        format!("expected ')' but found '{}'", other.text),
                    )
                    .into()),
                    None => Err(ParseError::malformed(token.position, "unclosed '('").into()),
                }
            }
            TokenKind::Parenthesis(Paren::Close) => {
                Err(ParseError::malformed(token.position, "unmatched ')'").into())
            }
            TokenKind::Symbol(_) | TokenKind::Unit(_) => Err(ParseError::malformed(
                token.position,
                format!("expected a value but found '{}'", token.text),
            )
            .into()),
        }
    }

    fn mixed_number(
        &mut self,
        whole: f64,
        integer: bool,
        whole_token: &Token<'_>,
    ) -> Result<Quantity, MeasureError> {
        let fraction_token = self.next().copied();
        let Some(fraction_token) = fraction_token else {
            return Ok(Quantity::bare(whole));
        };
        let TokenKind::Fraction {
            numerator,
            denominator,
        } = fraction_token.kind
        else {
            return Ok(Quantity::bare(whole));
        };
        if !integer || numerator < 0 {
            return Err(ParseError::malformed(
                fraction_token.position,
                format!(
                    "'{} {}' is not a mixed number",
                    whole_token.text, fraction_token.text
                ),
            )
            .into());
        }

        let part = fraction_value(numerator, denominator, fraction_token.position)?;
        let negative = whole < 0.0 || whole_token.text.starts_with(['-', '\u{2212}']);
        Ok(Quantity::bare(if negative {
            whole - part
        } else {
            whole + part
        }))
    }
}

fn fraction_value(numerator: i64, denominator: u64, position: usize) -> Result<f64, UnitError> {
    if denominator == 0 {
        return Err(UnitError::DivisionByZero { position });
    }
    Ok(numerator as f64 / denominator as f64)
}
