//! Turns a String expression into a symbolic expression.
//!
//! Recursive descent over the token stream of `tokenizer`:
//!
//! ```text
//!   expr    := term (('+' | '-') term)*
//!   term    := unary (('*' | '/') unary | power)*      second branch = implicit '*'
//!   unary   := ('-' | '+') unary | power
//!   power   := primary ('^' unary)?                   right associative
//!   primary := Number | Constant | Function '(' expr ')' | Ident | '(' expr ')'
//! ```
//!
//! Two numbers never multiply implicitly (`2 3`, `1.2.3`). Trees deeper than
//! `MAX_DEPTH`, through nesting or long operator chains, are rejected.
//!
//! # Example
//! ```
//! use RustedPartials::symbolic::parse_expr::parse_expression;
//! let parsed = parse_expression("2x^2 + sin(y)").unwrap();
//! assert_eq!(parsed.to_string(), "2 * x ^ 2 + sin(y)");
//! ```
use crate::symbolic::symbolic_engine::{Expr, MathConst};
use crate::symbolic::symbolic_errors::{InvalidExpression, InvalidKind};
use crate::symbolic::tokenizer::{Token, TokenKind, tokenize};

/// Function names the parser understands. `log` and `ln` are both the natural logarithm.
pub const FUNCTION_NAMES: [&str; 6] = ["sin", "cos", "tan", "log", "sqrt", "ln"];

/// Deepest expression tree the parser builds.
pub const MAX_DEPTH: usize = 256;

fn apply_function(name: &str, arg: Expr) -> Option<Expr> {
    let arg = Box::new(arg);
    match name {
        "sin" => Some(Expr::sin(arg)),
        "cos" => Some(Expr::cos(arg)),
        "tan" => Some(Expr::tg(arg)),
        "log" | "ln" => Some(Expr::Ln(arg)),
        "sqrt" => Some(Expr::sqrt(arg)),
        _ => None,
    }
}

struct ExprParser {
    tokens: Vec<Token>,
    idx: usize,
    /// depth of the tree node being parsed
    depth: usize,
    /// char length of the source, reported for errors at the end of input
    end_pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.idx).map(|t| &t.kind)
    }

    fn pos(&self) -> usize {
        self.tokens.get(self.idx).map_or(self.end_pos, |t| t.pos)
    }

    fn previous(&self) -> Option<&TokenKind> {
        self.idx
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| &t.kind)
    }

    /// One level further down the tree. Errors never backtrack, so only the
    /// success paths restore the depth.
    fn descend(&mut self) -> Result<(), InvalidExpression> {
        if self.depth >= MAX_DEPTH {
            return Err(InvalidExpression::at(InvalidKind::TooDeep, self.pos()));
        }
        self.depth += 1;
        Ok(())
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.idx).cloned();
        if token.is_some() {
            self.idx += 1;
        }
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(TokenKind::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.idx += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn starts_primary(&self) -> bool {
        matches!(
            self.peek(),
            Some(TokenKind::Number(_)) | Some(TokenKind::Ident(_)) | Some(TokenKind::LParen)
        )
    }

    fn parse_expr(&mut self) -> Result<Expr, InvalidExpression> {
        let depth = self.depth;
        let mut lhs = self.parse_term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            // every link of a left-leaning chain is one more level
            self.descend()?;
            let rhs = self.parse_term()?;
            lhs = if op == '+' { lhs + rhs } else { lhs - rhs };
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, InvalidExpression> {
        let depth = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            if let Some(op) = self.eat_op(&['*', '/']) {
                self.descend()?;
                let rhs = self.parse_unary()?;
                lhs = if op == '*' { lhs * rhs } else { lhs / rhs };
            } else if self.starts_primary() {
                if matches!(self.previous(), Some(TokenKind::Number(_)))
                    && matches!(self.peek(), Some(TokenKind::Number(_)))
                {
                    return Err(InvalidExpression::at(InvalidKind::UnexpectedToken, self.pos()));
                }
                self.descend()?;
                let rhs = self.parse_power()?;
                lhs = lhs * rhs;
            } else {
                self.depth = depth;
                return Ok(lhs);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, InvalidExpression> {
        self.descend()?;
        let parsed = match self.eat_op(&['-', '+']) {
            Some('-') => match self.parse_unary()? {
                Expr::Const(val) => Expr::Const(-val),
                inner => -inner,
            },
            Some(_) => self.parse_unary()?,
            None => self.parse_power()?,
        };
        self.depth -= 1;
        Ok(parsed)
    }

    fn parse_power(&mut self) -> Result<Expr, InvalidExpression> {
        let base = self.parse_primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.parse_unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    /// parses `expr ')'`; `open_pos` is where the matching `(` was
    fn parse_parenthesized(&mut self, open_pos: usize) -> Result<Expr, InvalidExpression> {
        let inner = self.parse_expr()?;
        match self.next() {
            Some(Token { kind: TokenKind::RParen, .. }) => Ok(inner),
            None => Err(InvalidExpression::at(InvalidKind::UnbalancedParen, open_pos)),
            Some(token) => Err(InvalidExpression::at(InvalidKind::UnexpectedToken, token.pos)),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, InvalidExpression> {
        let pos = self.pos();
        let Some(token) = self.next() else {
            return Err(InvalidExpression::at(InvalidKind::UnexpectedEnd, pos));
        };
        match token.kind {
            TokenKind::Number(val) => Ok(Expr::Const(val)),
            TokenKind::LParen => self.parse_parenthesized(pos),
            TokenKind::RParen => Err(InvalidExpression::at(InvalidKind::UnexpectedToken, pos)),
            TokenKind::Op(_) => Err(InvalidExpression::at(InvalidKind::UnexpectedToken, pos)),
            TokenKind::Ident(name) => {
                if FUNCTION_NAMES.contains(&name.as_str()) {
                    let open_pos = self.pos();
                    if self.peek() != Some(&TokenKind::LParen) {
                        return Err(InvalidExpression::at(InvalidKind::MissingFunctionArgs, pos));
                    }
                    self.idx += 1;
                    let arg = self.parse_parenthesized(open_pos)?;
                    apply_function(&name, arg)
                        .ok_or(InvalidExpression::at(InvalidKind::UnexpectedToken, pos))
                } else if let Some(constant) = MathConst::from_name(&name) {
                    Ok(Expr::Constant(constant))
                } else {
                    Ok(Expr::Var(name))
                }
            }
        }
    }
}

/// Parse `text` into an expression tree, or report why it is not an expression.
pub fn parse_expression(text: &str) -> Result<Expr, InvalidExpression> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(InvalidExpression::new(InvalidKind::Empty, None));
    }
    let mut parser = ExprParser {
        tokens,
        idx: 0,
        depth: 0,
        end_pos: text.chars().count(),
    };
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.next() {
        let kind = match token.kind {
            TokenKind::RParen => InvalidKind::UnbalancedParen,
            _ => InvalidKind::UnexpectedToken,
        };
        return Err(InvalidExpression::at(kind, token.pos));
    }
    Ok(expr)
}

impl Expr {
    /// Parse a string into a symbolic expression.
    pub fn parse_expression(input: &str) -> Result<Expr, InvalidExpression> {
        parse_expression(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression("x").unwrap();
        assert_eq!(expr, var("x"));
    }

    #[test]
    fn test_parse_multi_letter_variable() {
        let expr = parse_expression("speed * t").unwrap();
        assert_eq!(expr, var("speed") * var("t"));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression("x + 2").unwrap();
        assert_eq!(expr, var("x") + Expr::Const(2.0));
    }

    #[test]
    fn test_multiple_subtraction_is_left_associative() {
        let expr = parse_expression("x^2 - x - 1").unwrap();
        let expected = var("x").pow(Expr::Const(2.0)) - var("x") - Expr::Const(1.0);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression("x + y * z ^ 2").unwrap();
        let expected = var("x") + var("y") * var("z").pow(Expr::Const(2.0));
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression("x^y^2").unwrap();
        assert_eq!(expr, var("x").pow(var("y").pow(Expr::Const(2.0))));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse_expression("-2").unwrap(), Expr::Const(-2.0));
        assert_eq!(parse_expression("-x^2").unwrap(), -(var("x").pow(Expr::Const(2.0))));
        assert_eq!(parse_expression("x^-1").unwrap(), var("x").pow(Expr::Const(-1.0)));
        assert_eq!(parse_expression("+x").unwrap(), var("x"));
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(parse_expression("sin(x)").unwrap(), Expr::sin(var("x").boxed()));
        assert_eq!(parse_expression("tan(x)").unwrap(), Expr::tg(var("x").boxed()));
        assert_eq!(parse_expression("ln(x)").unwrap(), Expr::Ln(var("x").boxed()));
        assert_eq!(parse_expression("log(x)").unwrap(), Expr::Ln(var("x").boxed()));
        assert_eq!(parse_expression("sqrt(x)").unwrap(), Expr::sqrt(var("x").boxed()));
        assert_eq!(
            parse_expression("sin(cos(x))").unwrap(),
            Expr::sin(Expr::cos(var("x").boxed()).boxed())
        );
    }

    #[test]
    fn test_parse_named_constants() {
        assert_eq!(parse_expression("pi").unwrap(), Expr::Constant(MathConst::Pi));
        assert_eq!(parse_expression("PI").unwrap(), Expr::Constant(MathConst::Pi));
        assert_eq!(
            parse_expression("E * i").unwrap(),
            Expr::Constant(MathConst::E) * Expr::Constant(MathConst::I)
        );
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse_expression("2x").unwrap(), Expr::Const(2.0) * var("x"));
        assert_eq!(
            parse_expression("2(x + 1)").unwrap(),
            Expr::Const(2.0) * (var("x") + Expr::Const(1.0))
        );
        assert_eq!(
            parse_expression("2x^2").unwrap(),
            Expr::Const(2.0) * var("x").pow(Expr::Const(2.0))
        );
        // a name that is not a function followed by '(' is a product
        assert_eq!(
            parse_expression("exp(x)").unwrap(),
            var("exp") * var("x")
        );
    }

    #[test]
    fn test_parse_with_brackets() {
        let expr = parse_expression("(x + y) * (z - 2) / w").unwrap();
        let expected =
            (var("x") + var("y")) * (var("z") - Expr::Const(2.0)) / var("w");
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_unmatched_brackets() {
        let err = parse_expression("sin(x").unwrap_err();
        assert_eq!(err, InvalidExpression::at(InvalidKind::UnbalancedParen, 3));
        let err = parse_expression("(x + y").unwrap_err();
        assert_eq!(err.kind, InvalidKind::UnbalancedParen);
        let err = parse_expression("x + y)").unwrap_err();
        assert_eq!(err, InvalidExpression::at(InvalidKind::UnbalancedParen, 5));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(
            parse_expression("   ").unwrap_err().kind,
            InvalidKind::Empty
        );
        assert_eq!(
            parse_expression("x +").unwrap_err(),
            InvalidExpression::at(InvalidKind::UnexpectedEnd, 3)
        );
        assert_eq!(
            parse_expression("x + * y").unwrap_err().kind,
            InvalidKind::UnexpectedToken
        );
        assert_eq!(
            parse_expression("()").unwrap_err().kind,
            InvalidKind::UnexpectedToken
        );
        assert_eq!(
            parse_expression("sin x").unwrap_err().kind,
            InvalidKind::MissingFunctionArgs
        );
        assert_eq!(
            parse_expression("x $ y").unwrap_err().kind,
            InvalidKind::UnexpectedChar('$')
        );
    }

    #[test]
    fn test_adjacent_numbers_are_rejected() {
        assert_eq!(
            parse_expression("2 3 x").unwrap_err(),
            InvalidExpression::at(InvalidKind::UnexpectedToken, 2)
        );
        assert_eq!(
            parse_expression("1.2.3x").unwrap_err(),
            InvalidExpression::at(InvalidKind::UnexpectedToken, 3)
        );
        assert_eq!(parse_expression("2x").unwrap(), Expr::Const(2.0) * var("x"));
        assert_eq!(parse_expression("x2").unwrap(), var("x") * Expr::Const(2.0));
        assert_eq!(
            parse_expression("(2)3").unwrap(),
            Expr::Const(2.0) * Expr::Const(3.0)
        );
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}x{}", "(".repeat(20000), ")".repeat(20000));
        assert_eq!(
            parse_expression(&nested).unwrap_err().kind,
            InvalidKind::TooDeep
        );
        let negations = format!("{}x", "-".repeat(20000));
        assert_eq!(
            parse_expression(&negations).unwrap_err().kind,
            InvalidKind::TooDeep
        );
        let towers = format!("x{}", "^x".repeat(20000));
        assert_eq!(
            parse_expression(&towers).unwrap_err().kind,
            InvalidKind::TooDeep
        );
    }

    #[test]
    fn test_long_chains_are_rejected() {
        let sum = vec!["x"; 5000].join("+");
        assert_eq!(parse_expression(&sum).unwrap_err().kind, InvalidKind::TooDeep);
        let product = "x".repeat(5000);
        // one identifier, not a chain
        assert!(parse_expression(&product).is_ok());
        let implicit = vec!["x"; 5000].join(" ");
        assert_eq!(
            parse_expression(&implicit).unwrap_err().kind,
            InvalidKind::TooDeep
        );
    }

    #[test]
    fn test_moderate_nesting_still_parses() {
        let nested = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse_expression(&nested).unwrap(), var("x"));
        let sum = vec!["x"; 100].join(" + ");
        assert!(parse_expression(&sum).is_ok());
    }
}
