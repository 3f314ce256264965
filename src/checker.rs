#![allow(non_snake_case)]
/// # Answer checker
/// the crate's public entry point for grading free-text math answers: cleanup of
/// LaTeX/plain notation, normalization into a canonical symbolic form and
/// equivalence comparison with numeric tolerance
///# Example
/// ```
/// use MathCheck::checker::compare::check_answer_equivalence;
/// assert!(check_answer_equivalence("3/4", "\\frac{3}{4}"));
/// assert!(check_answer_equivalence("x+1", "1+x"));
/// assert!(!check_answer_equivalence("2", "3"));
/// ```
/// ________________________________________________________________________________________________________________________________
/// text cleanup of raw answers: dollar delimiters, LaTeX macros, whitespace
pub mod latex;
/// normalization and equivalence comparison of two answers
pub mod compare;

#[cfg(test)]
mod checker_tests;
