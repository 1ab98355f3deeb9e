#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// The error raised when text is not an expression
pub mod symbolic_errors;
///____________________________________________________________________________________________________________________________
/// a module splits a String expression into tokens; it also owns the one rule for what an identifier is
pub mod tokenizer;
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedPartials::symbolic::symbolic_engine::Expr;
/// let input = "x^2 * sin(y) + 3";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!(parsed_expression.contains_variable("y"));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// 1) holds the expression tree
/// 2) differentiates it
/// 3) turns it back into a string for the output display
///# Example
/// ```
/// use RustedPartials::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2 + y").unwrap();
/// let df_dx = parsed_expression.diff("x").simplify();
/// let df_dy = parsed_expression.diff("y").simplify();
/// assert_eq!(df_dx.to_string(), "2 * x");
/// assert_eq!(df_dy.to_string(), "1");
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
pub mod symbolic_simplify;
/// the seam between the calculator and the math engine
pub mod symbolic_traits;
