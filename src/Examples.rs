//! examples of usage of MathCheck
/// Answer checking examples
pub mod checker_examples;
