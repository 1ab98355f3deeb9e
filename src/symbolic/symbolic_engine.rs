//! # Symbolic Engine Module
//!
//! Core expression tree of the calculator. Every expression typed into the calculator
//! ends up as an `Expr`: the parser builds it, `diff` differentiates it, `simplify`
//! cleans the result up and `Display` turns it back into the text shown next to
//! `∂/∂x:` in the output.
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - free variables like "x", "y", "speed"
//! - **Constants**: `Const(f64)` - numbers typed by the user or produced by folding
//! - **Named constants**: `Constant(MathConst)` - e, pi, phi, i (never evaluated)
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Ln`, `sqrt`, `sin`, `cos`, `tg`
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: Box<Expr> children, so any nesting depth works
//! 2. **Operator Overloading**: std::ops traits give `x.clone() * y + Expr::Const(1.0)`
//! 3. **Minimal Parentheses Printing**: `Display` only brackets a child when its
//!    precedence requires it, so `2 * x` prints as `2 * x`, not `((2) * (x))`
//! 4. **Non-standard Variant Names**: tangent is `tg`, as in the mathematical
//!    tradition; it is still printed as `tan`

#![allow(non_camel_case_types)]

use std::fmt;

use strum_macros::IntoStaticStr;

/// Named mathematical constants accepted by the parser.
///
/// They are kept symbolic: the calculator never evaluates expressions numerically,
/// so `sin(pi)` stays `sin(pi)` and only differentiates to `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum MathConst {
    /// Euler's number, typed as `e` or `E`
    #[strum(serialize = "e")]
    E,
    /// typed as `pi` or `PI`
    #[strum(serialize = "pi")]
    Pi,
    /// golden ratio
    #[strum(serialize = "phi")]
    Phi,
    /// imaginary unit
    #[strum(serialize = "i")]
    I,
}

impl MathConst {
    /// Every spelling of a named constant the parser accepts.
    pub const SPELLINGS: [(&'static str, MathConst); 6] = [
        ("e", MathConst::E),
        ("E", MathConst::E),
        ("pi", MathConst::Pi),
        ("PI", MathConst::Pi),
        ("phi", MathConst::Phi),
        ("i", MathConst::I),
    ];

    pub fn from_name(name: &str) -> Option<MathConst> {
        Self::SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, constant)| *constant)
    }

    /// canonical printed name
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedPartials::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y", "velocity")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Named constant (e, pi, phi, i)
    Constant(MathConst),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Natural logarithm, typed as `log(x)` or `ln(x)`
    Ln(Box<Expr>),
    /// Square root
    sqrt(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function, typed as `tan(x)`
    tg(Box<Expr>),
}

// binding strength used by Display; a child is bracketed when it binds looser than its slot
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => PREC_ADD,
            Expr::Mul(lhs, _) if lhs.is_minus_one() => PREC_NEG,
            Expr::Mul(..) | Expr::Div(..) => PREC_MUL,
            Expr::Const(val) if *val < 0.0 => PREC_NEG,
            Expr::Pow(..) => PREC_POW,
            _ => PREC_ATOM,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_binary(
        f: &mut fmt::Formatter,
        lhs: &Expr,
        op: &str,
        rhs: &Expr,
        prec: u8,
        rhs_prec: u8,
    ) -> fmt::Result {
        lhs.fmt_child(f, prec)?;
        write!(f, " {} ", op)?;
        rhs.fmt_child(f, rhs_prec)
    }
}

/// Pretty printing of symbolic expressions.
///
/// Left-associative operators bracket an equal-precedence right child (`a - (b - c)`),
/// `^` is right-associative and brackets an equal-precedence left child (`(a ^ b) ^ c`).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Constant(c) => write!(f, "{}", c.name()),
            Expr::Add(lhs, rhs) => Expr::fmt_binary(f, lhs, "+", rhs, PREC_ADD, PREC_ADD),
            Expr::Sub(lhs, rhs) => Expr::fmt_binary(f, lhs, "-", rhs, PREC_ADD, PREC_ADD + 1),
            Expr::Mul(lhs, rhs) if lhs.is_minus_one() => {
                write!(f, "-")?;
                rhs.fmt_child(f, PREC_NEG + 1)
            }
            Expr::Mul(lhs, rhs) => Expr::fmt_binary(f, lhs, "*", rhs, PREC_MUL, PREC_MUL),
            Expr::Div(lhs, rhs) => Expr::fmt_binary(f, lhs, "/", rhs, PREC_MUL, PREC_MUL + 1),
            Expr::Pow(base, exp) => Expr::fmt_binary(f, base, "^", exp, PREC_POW + 1, PREC_POW),
            Expr::Ln(expr) => write!(f, "log({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tan({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    pub fn is_minus_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == -1.0)
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) | Expr::Constant(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Ln(expr)
            | Expr::sqrt(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr) => expr.contains_variable(var_name),
        }
    }
}
