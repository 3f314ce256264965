//! Numeric evaluation of symbolic expressions.
//!
//! A closed expression (no free variables) folds to a single f64. A free variable is
//! an evaluation error, mirroring engines that throw on undefined symbols; the answer
//! checker treats that error as "cannot compare numerically" and falls back to
//! symbolic comparison.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    /// Evaluates a closed expression to a number.
    ///
    /// # Returns
    /// The numeric value, or an error naming the first free variable encountered.
    /// Domain violations (ln of a negative number, division by zero) surface as
    /// non-finite values; callers that need a finite result check `is_finite()`
    /// on the output.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("2^3 + 1");
    /// assert_eq!(expr.eval_constant().unwrap(), 9.0);
    /// ```
    pub fn eval_constant(&self) -> Result<f64, String> {
        match self {
            Expr::Var(name) => Err(format!("undefined variable: {}", name)),
            Expr::Const(val) => Ok(*val),
            Expr::Add(lhs, rhs) => Ok(lhs.eval_constant()? + rhs.eval_constant()?),
            Expr::Sub(lhs, rhs) => Ok(lhs.eval_constant()? - rhs.eval_constant()?),
            Expr::Mul(lhs, rhs) => Ok(lhs.eval_constant()? * rhs.eval_constant()?),
            Expr::Div(lhs, rhs) => Ok(lhs.eval_constant()? / rhs.eval_constant()?),
            Expr::Pow(base, exp) => Ok(base.eval_constant()?.powf(exp.eval_constant()?)),
            Expr::Exp(expr) => Ok(expr.eval_constant()?.exp()),
            Expr::Ln(expr) => Ok(expr.eval_constant()?.ln()),
            Expr::sin(expr) => Ok(expr.eval_constant()?.sin()),
            Expr::cos(expr) => Ok(expr.eval_constant()?.cos()),
            Expr::tg(expr) => Ok(expr.eval_constant()?.tan()),
            Expr::ctg(expr) => Ok(1.0 / expr.eval_constant()?.tan()),
            Expr::arcsin(expr) => Ok(expr.eval_constant()?.asin()),
            Expr::arccos(expr) => Ok(expr.eval_constant()?.acos()),
            Expr::arctg(expr) => Ok(expr.eval_constant()?.atan()),
            Expr::arcctg(expr) => Ok(PI / 2.0 - expr.eval_constant()?.atan()),
        }
    }

    /// Evaluates a single-variable expression at the given value.
    ///
    /// Convenience for spot-checking simplifications in tests and demos.
    pub fn eval_at(&self, var: &str, value: f64) -> Result<f64, String> {
        self.set_variable(var, value).eval_constant()
    }
}
