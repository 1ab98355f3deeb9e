//! # Symbolic Expression Simplification Module
//!
//! Raw derivatives are full of `* 1`, `+ 0` and `(2 - 1)` leftovers. `simplify`
//! removes them so the calculator can show `2 * x` instead of
//! `2 * x ^ (2 - 1) * 1 + 0`.
//!
//! ## Simplification Strategy
//!
//! 1. **Bottom-up**: children are simplified before their parent
//! 2. **Constant Folding**: arithmetic between numbers is evaluated; division and
//!    powers are only folded when the result is a whole number, so `1 / 3` stays exact
//! 3. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `x - x = 0`, `x ^ 1 = x`, ...
//! 4. **Constant Collection**: numbers in a product move to the front and merge,
//!    `(2 * x) * 3 = 6 * x`
//! 5. **Power Rules**: `x * x = x ^ 2`, `x^a * x^b = x^(a+b)`, and `(x^a)^b = x^(a*b)`
//!    for a whole number `b` only (`(x^2)^0.5` is `|x|`, not `x`)
//! 6. **Sign Normalization**: `a + (-1) * b` becomes `a - b`
//!
//! Named constants (`pi`, `e`, ...) are never replaced by numbers.

use crate::symbolic::symbolic_engine::{Expr, MathConst};

fn is_whole(val: f64) -> bool {
    val.is_finite() && val.fract() == 0.0
}

/// `Some((c, t))` when the expression is `c * t` with a negative number `c`
fn negative_factor(expr: &Expr) -> Option<(f64, &Expr)> {
    match expr {
        Expr::Mul(lhs, rhs) => match lhs.as_ref() {
            Expr::Const(c) if *c < 0.0 => Some((*c, rhs.as_ref())),
            _ => None,
        },
        _ => None,
    }
}

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplify the expression using the rules listed in the module documentation.
    ///
    /// # Examples
    /// ```
    /// use RustedPartials::symbolic::symbolic_engine::Expr;
    /// let x = Expr::Var("x".to_string());
    /// let raw = (Expr::Const(2.0) * x.clone()) * Expr::Const(1.0) + Expr::Const(0.0);
    /// assert_eq!(raw.simplify(), Expr::Const(2.0) * x);
    /// ```
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) | Expr::Constant(_) => self.clone(),
            Expr::Add(lhs, rhs) => Self::simplify_add(lhs.simplify(), rhs.simplify()),
            Expr::Sub(lhs, rhs) => Self::simplify_sub(lhs.simplify(), rhs.simplify()),
            Expr::Mul(lhs, rhs) => Self::simplify_mul(lhs.simplify(), rhs.simplify()),
            Expr::Div(lhs, rhs) => Self::simplify_div(lhs.simplify(), rhs.simplify()),
            Expr::Pow(base, exp) => Self::simplify_pow(base.simplify(), exp.simplify()),
            Expr::Ln(expr) => match expr.simplify() {
                Expr::Const(val) if val == 1.0 => Expr::Const(0.0),
                Expr::Constant(MathConst::E) => Expr::Const(1.0),
                inner => Expr::Ln(Box::new(inner)),
            },
            Expr::sqrt(expr) => match expr.simplify() {
                Expr::Const(val) if val == 0.0 || val == 1.0 => Expr::Const(val),
                inner => Expr::sqrt(Box::new(inner)),
            },
            Expr::sin(expr) => match expr.simplify() {
                Expr::Const(val) if val == 0.0 => Expr::Const(0.0),
                inner => Expr::sin(Box::new(inner)),
            },
            Expr::cos(expr) => match expr.simplify() {
                Expr::Const(val) if val == 0.0 => Expr::Const(1.0),
                inner => Expr::cos(Box::new(inner)),
            },
            Expr::tg(expr) => match expr.simplify() {
                Expr::Const(val) if val == 0.0 => Expr::Const(0.0),
                inner => Expr::tg(Box::new(inner)),
            },
        }
    }

    fn simplify_add(lhs: Expr, rhs: Expr) -> Expr {
        // a + (-c) * t = a - c * t
        if let Some((c, t)) = negative_factor(&rhs) {
            let positive = Self::simplify_mul(Expr::Const(-c), t.clone());
            return Self::simplify_sub(lhs, positive);
        }
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
            _ if lhs.is_zero() => rhs,
            _ if rhs.is_zero() => lhs,
            // a + (-c) = a - c
            (_, Expr::Const(c)) if *c < 0.0 => Self::simplify_sub(lhs, Expr::Const(-c)),
            _ if lhs == rhs => Self::simplify_mul(Expr::Const(2.0), lhs),
            _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_sub(lhs: Expr, rhs: Expr) -> Expr {
        if let (Expr::Const(a), Expr::Const(b)) = (&lhs, &rhs) {
            return Expr::Const(a - b);
        }
        if rhs.is_zero() {
            return lhs;
        }
        if lhs.is_zero() {
            return Self::simplify_mul(Expr::Const(-1.0), rhs);
        }
        if lhs == rhs {
            return Expr::Const(0.0);
        }
        // a - (-c) * t = a + c * t
        if let Some((c, t)) = negative_factor(&rhs) {
            let positive = Self::simplify_mul(Expr::Const(-c), t.clone());
            return Expr::Add(Box::new(lhs), Box::new(positive));
        }
        match rhs {
            Expr::Const(c) if c < 0.0 => Expr::Add(Box::new(lhs), Box::new(Expr::Const(-c))),
            _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_mul(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
            _ if lhs.is_zero() || rhs.is_zero() => Expr::Const(0.0),
            _ if lhs.is_one() => rhs,
            _ if rhs.is_one() => lhs,
            // numbers go first: x * 2 = 2 * x
            (_, Expr::Const(_)) => Self::simplify_mul(rhs, lhs),
            // c * (c1 * e) = (c * c1) * e
            (Expr::Const(c), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
                Expr::Const(c1) => Self::simplify_mul(Expr::Const(c * c1), *inner_rhs.clone()),
                _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            },
            // e * (n / d) = (e * n) / d
            (_, Expr::Div(num, den)) => {
                Self::simplify_div(Self::simplify_mul(lhs.clone(), *num.clone()), *den.clone())
            }
            // (c * e1) * e2 = c * (e1 * e2)
            (Expr::Mul(inner_lhs, inner_rhs), _) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                let collected = Self::simplify_mul(*inner_rhs.clone(), rhs);
                Self::simplify_mul(*inner_lhs.clone(), collected)
            }
            // e1 * (c * e2) = c * (e1 * e2)
            (_, Expr::Mul(inner_lhs, inner_rhs)) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                let collected = Self::simplify_mul(lhs, *inner_rhs.clone());
                Self::simplify_mul(*inner_lhs.clone(), collected)
            }
            // x^a * x^b = x^(a+b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                let new_exp = Self::simplify_add(*exp1.clone(), *exp2.clone());
                Self::simplify_pow(*base1.clone(), new_exp)
            }
            (Expr::Pow(base, exp), _) if base.as_ref() == &rhs => {
                let new_exp = Self::simplify_add(*exp.clone(), Expr::Const(1.0));
                Self::simplify_pow(rhs, new_exp)
            }
            (_, Expr::Pow(base, exp)) if base.as_ref() == &lhs => {
                let new_exp = Self::simplify_add(Expr::Const(1.0), *exp.clone());
                Self::simplify_pow(lhs, new_exp)
            }
            _ if lhs == rhs => Expr::Pow(Box::new(lhs), Box::new(Expr::Const(2.0))),
            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_div(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) if *b != 0.0 && is_whole(a / b) => Expr::Const(a / b),
            _ if lhs.is_zero() && !rhs.is_zero() => Expr::Const(0.0),
            _ if rhs.is_one() => lhs,
            _ if lhs == rhs && !lhs.is_zero() => Expr::Const(1.0),
            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_pow(base: Expr, exp: Expr) -> Expr {
        match (&base, &exp) {
            (Expr::Const(a), Expr::Const(b)) if is_whole(a.powf(*b)) => Expr::Const(a.powf(*b)),
            _ if exp.is_zero() => Expr::Const(1.0),
            _ if exp.is_one() => base,
            _ if base.is_one() => Expr::Const(1.0),
            // (x^a)^b = x^(a*b), b whole
            (Expr::Pow(inner_base, inner_exp), Expr::Const(b)) if is_whole(*b) => {
                let new_exp = Self::simplify_mul(*inner_exp.clone(), exp.clone());
                Self::simplify_pow(*inner_base.clone(), new_exp)
            }
            _ => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }
    fn y() -> Expr {
        Expr::Var("y".to_string())
    }

    #[test]
    fn test_constant_folding() {
        let expr = Expr::Const(2.0) * Expr::Const(3.0) + Expr::Const(1.5);
        match expr.simplify() {
            Expr::Const(val) => assert_relative_eq!(val, 7.5),
            other => panic!("expected a number, got {}", other),
        }
    }

    #[test]
    fn test_inexact_division_is_kept() {
        let expr = Expr::Const(1.0) / Expr::Const(3.0);
        assert_eq!(expr.simplify(), expr);
        let expr = Expr::Const(6.0) / Expr::Const(3.0);
        assert_eq!(expr.simplify(), Expr::Const(2.0));
    }

    #[test]
    fn test_identities() {
        assert_eq!((x() + Expr::Const(0.0)).simplify(), x());
        assert_eq!((Expr::Const(0.0) + x()).simplify(), x());
        assert_eq!((x() - x()).simplify(), Expr::Const(0.0));
        assert_eq!((x() * Expr::Const(1.0)).simplify(), x());
        assert_eq!((Expr::Const(0.0) * x()).simplify(), Expr::Const(0.0));
        assert_eq!((x() / Expr::Const(1.0)).simplify(), x());
        assert_eq!((x() / x()).simplify(), Expr::Const(1.0));
        assert_eq!(x().pow(Expr::Const(0.0)).simplify(), Expr::Const(1.0));
        assert_eq!(x().pow(Expr::Const(1.0)).simplify(), x());
    }

    #[test]
    fn test_constants_are_collected_in_front() {
        let expr = (Expr::Const(2.0) * x()) * Expr::Const(3.0);
        assert_eq!(expr.simplify(), Expr::Const(6.0) * x());
        let expr = x() * (Expr::Const(2.0) * y());
        assert_eq!(expr.simplify(), Expr::Const(2.0) * (x() * y()));
    }

    #[test]
    fn test_factor_moves_into_numerator() {
        let expr = Expr::Const(3.0) * (x() * (Expr::Const(1.0) / y()));
        assert_eq!(expr.simplify(), (Expr::Const(3.0) * x()) / y());
        assert_eq!(expr.simplify().to_string(), "3 * x / y");
    }

    #[test]
    fn test_double_negation() {
        assert_eq!((-(-x())).simplify(), x());
    }

    #[test]
    fn test_sign_normalization() {
        assert_eq!((x() + -y()).simplify(), x() - y());
        assert_eq!((x() - -y()).simplify(), x() + y());
        assert_eq!((x() + Expr::Const(-2.0)).simplify(), x() - Expr::Const(2.0));
        assert_eq!((Expr::Const(0.0) - x()).simplify(), -x());
    }

    #[test]
    fn test_power_rules() {
        assert_eq!((x() * x()).simplify(), x().pow(Expr::Const(2.0)));
        assert_eq!(
            (x().pow(Expr::Const(2.0)) * x().pow(Expr::Const(3.0))).simplify(),
            x().pow(Expr::Const(5.0))
        );
        assert_eq!(
            (x() * x().pow(Expr::Const(2.0))).simplify(),
            x().pow(Expr::Const(3.0))
        );
        assert_eq!(
            x().pow(Expr::Const(2.0)).pow(Expr::Const(3.0)).simplify(),
            x().pow(Expr::Const(6.0))
        );
    }

    #[test]
    fn test_nested_powers_merge_only_for_whole_outer_exponent() {
        let root_of_square = x().pow(Expr::Const(2.0)).pow(Expr::Const(0.5));
        assert_eq!(root_of_square.simplify(), root_of_square);
        let symbolic_outer = x().pow(Expr::Const(2.0)).pow(y());
        assert_eq!(symbolic_outer.simplify(), symbolic_outer);
        assert_eq!(
            x().pow(Expr::Const(0.5)).pow(Expr::Const(2.0)).simplify(),
            x()
        );
    }

    #[test]
    fn test_named_constants_are_not_evaluated() {
        let expr = Expr::sin(Expr::Constant(MathConst::Pi).boxed());
        assert_eq!(expr.simplify(), expr);
        assert_eq!(
            Expr::Ln(Expr::Constant(MathConst::E).boxed()).simplify(),
            Expr::Const(1.0)
        );
    }

    #[test]
    fn test_function_values_at_zero() {
        assert_eq!(Expr::sin(Expr::Const(0.0).boxed()).simplify(), Expr::Const(0.0));
        assert_eq!(Expr::cos(Expr::Const(0.0).boxed()).simplify(), Expr::Const(1.0));
        assert_eq!(Expr::sqrt(Expr::Const(1.0).boxed()).simplify(), Expr::Const(1.0));
        assert_eq!(Expr::Ln(Expr::Const(1.0).boxed()).simplify(), Expr::Const(0.0));
    }
}
