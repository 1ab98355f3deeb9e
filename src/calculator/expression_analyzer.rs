//! Validation of the expression field and extraction of its free variables.
//!
//! Both use the identifier rule of `symbolic::tokenizer`, so a name the parser
//! sees as one identifier is also one variable candidate here.
use itertools::Itertools;
use log::debug;

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::InvalidExpression;
use crate::symbolic::symbolic_traits::SymbolicEngine;
use crate::symbolic::tokenizer::identifiers;

/// Function names and named constants. They are never variables.
pub const RECOGNIZED_SYMBOLS: [&str; 12] = [
    "sin", "cos", "tan", "log", "sqrt", "ln", "e", "E", "i", "phi", "pi", "PI",
];

pub fn is_recognized_symbol(name: &str) -> bool {
    RECOGNIZED_SYMBOLS.contains(&name)
}

/// Text that parsed, together with its tree. A blank field has no tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    pub text: String,
    pub expr: Option<Expr>,
}

/// Distinct free variables in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet(Vec<String>);

impl VariableSet {
    pub fn new(names: Vec<String>) -> Self {
        VariableSet(names.into_iter().unique().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|v| v == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Ask `engine` to parse `text`. Nothing else happens on failure; the caller
/// decides how to show it.
///
/// A blank field is a valid expression without variables and never reaches the engine.
pub fn validate<E: SymbolicEngine + ?Sized>(
    engine: &E,
    text: &str,
) -> Result<ParsedExpression, InvalidExpression> {
    let expr = if text.trim().is_empty() {
        None
    } else {
        Some(engine.parse(text)?)
    };
    Ok(ParsedExpression {
        text: text.to_string(),
        expr,
    })
}

/// Every maximal run of ASCII letters that is not a recognized symbol.
///
/// Symbols are removed as whole tokens only: `sinx` stays a variable.
pub fn extract_variables(text: &str) -> VariableSet {
    let variables = VariableSet::new(
        identifiers(text)
            .into_iter()
            .filter(|name| !is_recognized_symbol(name))
            .collect(),
    );
    debug!("variables of {:?}: {:?}", text, variables.as_slice());
    variables
}
