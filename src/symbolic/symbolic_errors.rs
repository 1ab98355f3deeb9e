//! The single error kind of the calculator: text that the engine refuses to parse.
use thiserror::Error;

/// What exactly was wrong with the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// nothing but whitespace
    Empty,
    /// a character that is not part of any token
    UnexpectedChar(char),
    /// `(` without its `)` or the other way round
    UnbalancedParen,
    /// a token in a place where the grammar does not allow it
    UnexpectedToken,
    /// the text stopped in the middle of an expression, e.g. `x +`
    UnexpectedEnd,
    /// function name not followed by `(`
    MissingFunctionArgs,
    /// nesting or operator chains deeper than the parser accepts
    TooDeep,
}

/// Raised when the parser rejects the input text.
///
/// `position` is a character offset into the text when the failure has a location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expression: {}{}", describe(.kind), location(.position))]
pub struct InvalidExpression {
    pub kind: InvalidKind,
    pub position: Option<usize>,
}

impl InvalidExpression {
    pub fn new(kind: InvalidKind, position: Option<usize>) -> Self {
        InvalidExpression { kind, position }
    }

    pub fn at(kind: InvalidKind, position: usize) -> Self {
        InvalidExpression::new(kind, Some(position))
    }
}

fn describe(kind: &InvalidKind) -> String {
    match kind {
        InvalidKind::Empty => "empty input".to_string(),
        InvalidKind::UnexpectedChar(c) => format!("unexpected character '{}'", c),
        InvalidKind::UnbalancedParen => "unbalanced parentheses".to_string(),
        InvalidKind::UnexpectedToken => "unexpected token".to_string(),
        InvalidKind::UnexpectedEnd => "unexpected end of input".to_string(),
        InvalidKind::MissingFunctionArgs => "function name without '('".to_string(),
        InvalidKind::TooDeep => "expression nested too deeply".to_string(),
    }
}

fn location(position: &Option<usize>) -> String {
    match position {
        Some(pos) => format!(" at position {}", pos + 1),
        None => String::new(),
    }
}
