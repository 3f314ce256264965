//! # Symbolic Expression Simplification Module
//!
//! This module provides algebraic simplification of symbolic expressions into a
//! canonical form. The answer checker compares the printed canonical forms of two
//! normalized expressions, so simplification here is what makes notational variants
//! of the same answer collapse onto one string.
//!
//! ## Simplification Strategy
//!
//! The module employs several complementary simplification techniques:
//!
//! 1. **Constant Folding**: Evaluates arithmetic operations on numerical constants
//! 2. **Algebraic Identities**: Applies mathematical rules like x + 0 = x, x * 1 = x
//! 3. **Like Term Collection**: Combines terms such as 3x + 2x = 5x
//! 4. **Canonical Ordering**: Operands of sums and products are rebuilt in a
//!    deterministic order, so commutative variants like x + 1 and 1 + x produce the
//!    same tree
//! 5. **Power Rules**: Simplifies expressions involving exponents
//!
//! ## Canonical Ordering
//!
//! Sums and products are flattened into term/factor lists, constants are folded into
//! a single coefficient, and the remaining parts are keyed by their printed form and
//! rebuilt in sorted order. Collection happens even when no terms merge - reordering
//! alone is a simplification for comparison purposes, which is the main departure
//! from collectors that bail out when nothing combines.

use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use std::collections::BTreeMap;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Algebraic simplification into canonical form.
    ///
    /// Applies, bottom-up:
    /// - constant folding for every arithmetic operation on two constants
    /// - additive identities: `x + 0 = x`, `x - 0 = x`, `x - x = 0`
    /// - multiplicative identities: `x * 1 = x`, `x * 0 = 0`, `x / 1 = x`, `x / x = 1`
    /// - power rules: `x^0 = 1`, `x^1 = x`, `0^x = 0`, `1^x = 1`, `(x^a)^b = x^(a*b)`,
    ///   `x^a / x^b = x^(a-b)`
    /// - function values at known points: `exp(0) = 1`, `ln(1) = 0`, `sin(0) = 0`,
    ///   `cos(0) = 1`, `tg(0) = 0`, `arcsin(0) = 0`, `arccos(1) = 0`, `arctg(0) = 0`
    /// - collection of like terms and canonical reordering of sums and products
    ///
    /// The result is a projection: simplifying an already simplified expression
    /// returns it unchanged.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) => self.clone(),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b), // (a) + (b) = (a + b)
                    (Expr::Const(c), _) if *c == 0.0 => rhs,                // 0 + x = x
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,                // x + 0 = x
                    _ => Self::canonical_sum(&Expr::Add(Box::new(lhs), Box::new(rhs))),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b), // (a) - (b) = (a - b)
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,                // x - 0 = x
                    _ if lhs == rhs => Expr::Const(0.0),                    // x - x = 0
                    _ => {
                        // a - b = a + (-1)*b, so one collector serves both operations
                        let neg_rhs = Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(rhs));
                        Self::canonical_sum(&Expr::Add(Box::new(lhs), Box::new(neg_rhs)))
                    }
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b), // (a) * (b) = (a * b)
                    (Expr::Const(c), _) | (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(0.0), // 0 * x = 0
                    (Expr::Const(c), _) if *c == 1.0 => rhs,                // 1 * x = x
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,                // x * 1 = x
                    _ => Self::canonical_product(&Expr::Mul(Box::new(lhs), Box::new(rhs))),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b), // (a) / (b) = (a / b)
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0), // 0 / x = 0
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,              // x / 1 = x
                    // Power rules: x^a / x^b = x^(a-b)
                    (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                        let new_exp =
                            Expr::Sub(exp1.clone(), exp2.clone()).simplify_();
                        match &new_exp {
                            Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                            _ => Expr::Pow(base1.clone(), Box::new(new_exp)),
                        }
                    }
                    (Expr::Var(v1), Expr::Pow(base, exp)) if **base == Expr::Var(v1.clone()) => {
                        let new_exp =
                            Expr::Sub(Box::new(Expr::Const(1.0)), exp.clone()).simplify_();
                        match &new_exp {
                            Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                            _ => Expr::Pow(Box::new(Expr::Var(v1.clone())), Box::new(new_exp)),
                        }
                    }
                    (Expr::Pow(base, exp), Expr::Var(v2)) if **base == Expr::Var(v2.clone()) => {
                        let new_exp =
                            Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0))).simplify_();
                        match &new_exp {
                            Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                            _ => Expr::Pow(Box::new(Expr::Var(v2.clone())), Box::new(new_exp)),
                        }
                    }
                    (Expr::Var(v1), Expr::Var(v2)) if v1 == v2 => Expr::Const(1.0), // x / x = 1
                    // (c1 * expr) / c2 = (c1 / c2) * expr
                    (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) if *c != 0.0 => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), _) => {
                                Expr::Mul(Box::new(Expr::Const(c1 / c)), inner_rhs.clone())
                                    .simplify_()
                            }
                            (_, Expr::Const(c1)) => {
                                Expr::Mul(Box::new(Expr::Const(c1 / c)), inner_lhs.clone())
                                    .simplify_()
                            }
                            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                        }
                    }
                    // expr / (c1 * c2) = expr / (c1*c2)
                    (_, Expr::Mul(inner_lhs, inner_rhs)) => {
                        match (inner_lhs.as_ref(), inner_rhs.as_ref()) {
                            (Expr::Const(c1), Expr::Const(c2)) => {
                                Expr::Div(Box::new(lhs.clone()), Box::new(Expr::Const(c1 * c2)))
                                    .simplify_()
                            }
                            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                        }
                    }
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)), // (a) ^ (b) = (a ^ b)
                    (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(1.0),        // x ^ 0 = 1
                    (_, Expr::Const(c)) if *c == 1.0 => base,                    // x ^ 1 = x
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),        // 0 ^ x = 0
                    (Expr::Const(c), _) if *c == 1.0 => Expr::Const(1.0),        // 1 ^ x = 1
                    // (x^a)^b = x^(a*b)
                    (Expr::Pow(inner_base, inner_exp), _) => {
                        let new_exp =
                            Expr::Mul(inner_exp.clone(), Box::new(exp)).simplify_();
                        Expr::Pow(inner_base.clone(), Box::new(new_exp))
                    }
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                    // Only evaluate exp(0), preserve symbolic form otherwise
                    _ => Expr::Exp(Box::new(expr)),
                }
            }
            Expr::Ln(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 1.0 => Expr::Const(0.0),
                    // Only evaluate ln for simple cases, preserve symbolic form otherwise
                    _ => Expr::Ln(Box::new(expr)),
                }
            }
            Expr::sin(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::sin(Box::new(expr)),
                }
            }
            Expr::cos(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(1.0),
                    _ => Expr::cos(Box::new(expr)),
                }
            }
            Expr::tg(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::tg(Box::new(expr)),
                }
            }
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_())),
            Expr::arcsin(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::arcsin(Box::new(expr)),
                }
            }
            Expr::arccos(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 1.0 => Expr::Const(0.0),
                    _ => Expr::arccos(Box::new(expr)),
                }
            }
            Expr::arctg(expr) => {
                let expr = expr.simplify_();
                match &expr {
                    Expr::Const(c) if *c == 0.0 => Expr::Const(0.0),
                    _ => Expr::arctg(Box::new(expr)),
                }
            }
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_())),
        }
    }

    /// Collect a sum into canonical form.
    ///
    /// Flattens nested Add/Sub into a term list, splits each term into a numeric
    /// coefficient and its remaining part, merges coefficients of terms whose
    /// remaining parts print identically, and rebuilds the sum with the constant
    /// term first and the rest in sorted order. Terms that cancel to coefficient
    /// zero are dropped.
    fn canonical_sum(expr: &Expr) -> Expr {
        let mut terms = Vec::new();
        flatten_add(expr, &mut terms);

        // keyed by the printed form of the non-constant part; "" collects constants
        let mut collected: BTreeMap<String, (Option<Expr>, f64)> = BTreeMap::new();
        for term in &terms {
            let (coeff, rest) = split_coefficient(term);
            let key = rest.as_ref().map(|e| e.to_string()).unwrap_or_default();
            let entry = collected.entry(key).or_insert((rest, 0.0));
            entry.1 += coeff;
        }

        let mut result_terms = Vec::new();
        for (_, (rest, coeff)) in collected {
            if coeff == 0.0 {
                continue;
            }
            let term = match rest {
                None => Expr::Const(coeff),
                Some(r) if coeff == 1.0 => r,
                Some(r) => Expr::Mul(Box::new(Expr::Const(coeff)), Box::new(r)),
            };
            result_terms.push(term);
        }

        if result_terms.is_empty() {
            Expr::Const(0.0)
        } else if result_terms.len() == 1 {
            result_terms.into_iter().next().unwrap()
        } else {
            result_terms
                .into_iter()
                .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
                .unwrap()
        }
    }

    /// Collect a product into canonical form.
    ///
    /// Flattens nested Mul into a factor list, folds all constant factors into one
    /// coefficient, merges powers of the same variable, counts repeats of other
    /// factors, and rebuilds with the coefficient first, variables in name order and
    /// the remaining factors in printed order.
    fn canonical_product(expr: &Expr) -> Expr {
        let mut factors = Vec::new();
        flatten_mul(expr, &mut factors);

        let mut coeff = 1.0;
        let mut var_powers: BTreeMap<String, f64> = BTreeMap::new();
        let mut others: BTreeMap<String, (Expr, f64)> = BTreeMap::new();
        for f in factors {
            match &f {
                Expr::Const(c) => coeff *= c,
                Expr::Var(v) => *var_powers.entry(v.clone()).or_insert(0.0) += 1.0,
                Expr::Pow(base, exp) => {
                    if let (Expr::Var(v), Expr::Const(n)) = (base.as_ref(), exp.as_ref()) {
                        *var_powers.entry(v.clone()).or_insert(0.0) += n;
                    } else {
                        let entry = others.entry(f.to_string()).or_insert((f.clone(), 0.0));
                        entry.1 += 1.0;
                    }
                }
                _ => {
                    let entry = others.entry(f.to_string()).or_insert((f.clone(), 0.0));
                    entry.1 += 1.0;
                }
            }
        }

        if coeff == 0.0 {
            return Expr::Const(0.0);
        }

        let var_factors = var_powers
            .into_iter()
            .filter(|(_, p)| *p != 0.0)
            .map(|(v, p)| {
                if p == 1.0 {
                    Expr::Var(v)
                } else {
                    Expr::Pow(Box::new(Expr::Var(v)), Box::new(Expr::Const(p)))
                }
            });
        let other_factors = others.into_values().map(|(e, count)| {
            if count == 1.0 {
                e
            } else {
                Expr::Pow(Box::new(e), Box::new(Expr::Const(count)))
            }
        });
        let mut result_factors: Vec<Expr> = var_factors.chain(other_factors).collect_vec();

        if result_factors.is_empty() {
            return Expr::Const(coeff);
        }
        if coeff != 1.0 {
            result_factors.insert(0, Expr::Const(coeff));
        }
        if result_factors.len() == 1 {
            result_factors.into_iter().next().unwrap()
        } else {
            result_factors
                .into_iter()
                .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
                .unwrap()
        }
    }

    /// Public interface for expression simplification.
    ///
    /// Currently delegates to simplify_() but provides a stable API for future
    /// enhancements. This is the recommended method for users to simplify expressions.
    ///
    /// # Returns
    /// Simplified expression using all available simplification rules
    pub fn simplify(&self) -> Expr {
        self.simplify_()
    }
}

/// Flatten nested Add/Sub expressions into a list of terms.
///
/// Subtraction becomes addition of a (-1)-scaled term, and a (-1) factor in front of
/// a sum is distributed over it, so `(a + b) - (a + b)` flattens to terms that cancel
/// pairwise.
fn flatten_add(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Add(a, b) => {
            flatten_add(a, out);
            flatten_add(b, out);
        }
        Expr::Sub(a, b) => {
            flatten_add(a, out);
            // Convert subtraction to addition of negated term
            let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
            flatten_add(&neg_b, out);
        }
        Expr::Mul(lhs, rhs) => {
            let lhs_is_neg_one = matches!(lhs.as_ref(), Expr::Const(c) if *c == -1.0);
            let rhs_is_neg_one = matches!(rhs.as_ref(), Expr::Const(c) if *c == -1.0);
            if lhs_is_neg_one {
                match rhs.as_ref() {
                    // Distribute: -1 * (a + b) = (-1 * a) + (-1 * b)
                    Expr::Add(a, b) => {
                        let neg_a = Expr::Mul(Box::new(Expr::Const(-1.0)), a.clone());
                        let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
                        flatten_add(&neg_a, out);
                        flatten_add(&neg_b, out);
                    }
                    Expr::Sub(a, b) => {
                        // -1 * (a - b) = (-1 * a) + b
                        let neg_a = Expr::Mul(Box::new(Expr::Const(-1.0)), a.clone());
                        flatten_add(&neg_a, out);
                        flatten_add(b, out);
                    }
                    _ => out.push(expr.clone()),
                }
            } else if rhs_is_neg_one {
                match lhs.as_ref() {
                    Expr::Add(a, b) => {
                        let neg_a = Expr::Mul(Box::new(Expr::Const(-1.0)), a.clone());
                        let neg_b = Expr::Mul(Box::new(Expr::Const(-1.0)), b.clone());
                        flatten_add(&neg_a, out);
                        flatten_add(&neg_b, out);
                    }
                    _ => out.push(expr.clone()),
                }
            } else {
                out.push(expr.clone());
            }
        }
        _ => out.push(expr.clone()),
    }
}

/// Flatten nested multiplication expressions into a list of factors.
fn flatten_mul(expr: &Expr, out: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            flatten_mul(a, out);
            flatten_mul(b, out);
        }
        _ => out.push(expr.clone()),
    }
}

/// Split a term into its numeric coefficient and the remaining non-constant part.
///
/// `3*x` gives `(3.0, Some(x))`, a bare constant gives `(c, None)`, anything else
/// gives `(1.0, Some(term))`. For products the non-constant factors keep their
/// order, which is already canonical for terms produced by the simplifier.
fn split_coefficient(term: &Expr) -> (f64, Option<Expr>) {
    match term {
        Expr::Const(c) => (*c, None),
        Expr::Mul(_, _) => {
            let mut factors = Vec::new();
            flatten_mul(term, &mut factors);
            let mut coeff = 1.0;
            let mut rest = Vec::new();
            for f in factors {
                match f {
                    Expr::Const(c) => coeff *= c,
                    other => rest.push(other),
                }
            }
            if rest.is_empty() {
                (coeff, None)
            } else {
                let rest_expr = rest
                    .into_iter()
                    .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
                    .unwrap();
                (coeff, Some(rest_expr))
            }
        }
        _ => (1.0, Some(term.clone())),
    }
}
