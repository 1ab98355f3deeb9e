// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// The calculator only ever talks to a math engine through `SymbolicEngine`.
// `NativeEngine` is the engine of this crate; add other engines here as needed.

use crate::symbolic::parse_expr::parse_expression;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::InvalidExpression;

pub trait SymbolicEngine {
    /// Parse the text, failing observably on malformed input.
    fn parse(&self, text: &str) -> Result<Expr, InvalidExpression>;
    /// Partial derivative of the expression in `text` with respect to `variable`.
    /// The returned tree is rendered with `to_string()`.
    fn derivative(&self, text: &str, variable: &str) -> Result<Expr, InvalidExpression>;
}

///////////////// IMPLEMENTATION OF THE TRAIT FOR THE NATIVE ENGINE /////////////////////////
/// Tokenizer + recursive descent parser + analytical `diff` + `simplify`.
///
/// Stateless: every `derivative` call parses the text again.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl SymbolicEngine for NativeEngine {
    fn parse(&self, text: &str) -> Result<Expr, InvalidExpression> {
        parse_expression(text)
    }

    fn derivative(&self, text: &str, variable: &str) -> Result<Expr, InvalidExpression> {
        let parsed = parse_expression(text)?;
        Ok(parsed.diff_simplified(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_errors::InvalidKind;

    #[test]
    fn test_native_engine_derivative() {
        let engine = NativeEngine;
        let df_dx = engine.derivative("x^2 + y", "x").unwrap();
        assert_eq!(df_dx.to_string(), "2 * x");
    }

    #[test]
    fn test_native_engine_rejects_malformed_text() {
        let engine = NativeEngine;
        assert_eq!(
            engine.parse("sin(x").unwrap_err().kind,
            InvalidKind::UnbalancedParen
        );
        assert!(engine.derivative("x +", "x").is_err());
    }
}
