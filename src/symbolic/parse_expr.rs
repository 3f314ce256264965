use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{brackets_balanced, find_char_positions_outside_brackets, find_pair_to_this_bracket};
use log::debug;
use std::f64::consts::{E, PI};
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use MathCheck::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + 3*(x - 1)";
/// let parsed_expression = Expr::parse_expression(input);
/// println!(" parsed_expression {}", parsed_expression);
/// ```
//                  search recursion diagram
//                "y^2+exp(x)+ln(x)/y-x^2.3"        |
//                |       left  | right             |
//                |_________________________________|
//                |           div by last -         |
//                |_________________________________|
//                | y^2+exp(x)+ln(x)/y  |  x^2.3    |
//                |       |             |    |      |
//                |_____ \|/            |    |      |
//                |     div by last +   |    |      |
//                |_____________________|____|______|
//                | y^2+exp(x) | ln(x)/y  |  x^2.3  |
//                |    ...     |   ...    |   ...   |
//                  etc...

/// finds the rightmost + or - outside brackets that acts as a binary operator:
/// a leading sign, a sign directly after another operator or an opening bracket,
/// and the exponent sign of scientific notation (1e-6) are all skipped
fn find_rightmost_additive_operator(chars: &[char]) -> Option<(usize, char)> {
    let mut bracket_depth = 0i32;
    let mut last_op = None;
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            '+' | '-' if bracket_depth == 0 => {
                if i == 0 {
                    continue; // leading sign is unary
                }
                // walk back over whitespace to the previous significant char
                let mut j = i;
                let mut prev = None;
                while j > 0 {
                    j -= 1;
                    if !chars[j].is_whitespace() {
                        prev = Some(chars[j]);
                        break;
                    }
                }
                match prev {
                    // sign right after an operator or '(' is unary, not a split point
                    Some('+') | Some('-') | Some('*') | Some('/') | Some('^') | Some('(') => continue,
                    // exponent sign of scientific notation: digit, then e/E, then sign
                    Some('e') | Some('E')
                        if j > 0 && (chars[j - 1].is_ascii_digit() || chars[j - 1] == '.') =>
                    {
                        continue;
                    }
                    _ => last_op = Some((i, c)),
                }
            }
            _ => {}
        }
    }
    last_op
}

/// finds the rightmost * or / outside brackets, so that chains like a/b/c
/// split left-associatively into (a/b)/c
fn find_rightmost_multiplicative_operator(chars: &[char]) -> Option<(usize, char)> {
    let mut bracket_depth = 0i32;
    let mut last_op = None;
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            '*' | '/' if bracket_depth == 0 => last_op = Some((i, c)),
            _ => {}
        }
    }
    last_op
}

fn substring(chars: &[char]) -> String {
    chars.iter().collect()
}

/// dispatch table for function-call atoms like sin(..), sqrt(..)
fn function_call(name: &str, inner: Expr) -> Result<Expr, String> {
    let expr = match name {
        "exp" => Expr::Exp(Box::new(inner)),
        "ln" | "log" => Expr::Ln(Box::new(inner)),
        "sqrt" => Expr::Pow(Box::new(inner), Box::new(Expr::Const(0.5))),
        "sin" => Expr::sin(Box::new(inner)),
        "cos" => Expr::cos(Box::new(inner)),
        "tg" | "tan" => Expr::tg(Box::new(inner)),
        "ctg" | "cot" => Expr::ctg(Box::new(inner)),
        "arcsin" | "asin" => Expr::arcsin(Box::new(inner)),
        "arccos" | "acos" => Expr::arccos(Box::new(inner)),
        "arctg" | "arctan" | "atan" => Expr::arctg(Box::new(inner)),
        "arcctg" | "acot" => Expr::arcctg(Box::new(inner)),
        _ => return Err(format!("unknown function: {}", name)),
    };
    Ok(expr)
}

pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }
    if !brackets_balanced(input) {
        return Err(format!("unmatched brackets in expression: {}", input));
    }
    debug!("parsing input: {}", input);

    // a whole numeric token: covers negative constants and scientific notation (1e-6)
    if let Ok(value) = input.parse::<f64>() {
        debug!("found constant: {}", value);
        return Ok(Expr::Const(value));
    }

    let chars: Vec<char> = input.chars().collect();

    // Handling addition and subtraction
    if let Some((pos, op)) = find_rightmost_additive_operator(&chars) {
        let left = substring(&chars[..pos]);
        let right = substring(&chars[pos + 1..]);
        debug!("SIGN '{}' found at position {}: left: {}, right: {}", op, pos, left, right);
        let lhs = parse_expression_func(&left)?;
        let rhs = parse_expression_func(&right)?;
        return match op {
            '+' => Ok(Expr::Add(Box::new(lhs), Box::new(rhs))),
            '-' => Ok(Expr::Sub(Box::new(lhs), Box::new(rhs))),
            _ => unreachable!(),
        };
    }

    // Handling unary sign
    if chars[0] == '-' {
        debug!("negative values found");
        let rest = substring(&chars[1..]);
        return Ok(Expr::Mul(
            Box::new(Expr::Const(-1.0)),
            Box::new(parse_expression_func(&rest)?),
        ));
    }
    if chars[0] == '+' {
        let rest = substring(&chars[1..]);
        return Ok(parse_expression_func(&rest)?);
    }

    // Handling multiplication and division
    if let Some((pos, op)) = find_rightmost_multiplicative_operator(&chars) {
        let left = substring(&chars[..pos]);
        let right = substring(&chars[pos + 1..]);
        debug!("SIGN '{}' found at position {}: left: {}, right: {}", op, pos, left, right);
        let lhs = parse_expression_func(&left)?;
        let rhs = parse_expression_func(&right)?;
        return match op {
            '*' => Ok(Expr::Mul(Box::new(lhs), Box::new(rhs))),
            '/' => Ok(Expr::Div(Box::new(lhs), Box::new(rhs))),
            _ => unreachable!(),
        };
    }

    // Handling exponentiation: the first ^ outside brackets makes power towers
    // right-associative, 2^3^2 = 2^(3^2)
    if let Some(pos) = find_char_positions_outside_brackets(&chars, '^') {
        let base = substring(&chars[..pos]);
        let exponent = substring(&chars[pos + 1..]);
        debug!("SIGN '^' found at position {}: base: {}, exponent: {}", pos, base, exponent);
        let base_expr = parse_expression_func(&base)?;
        let exponent_expr = parse_expression_func(&exponent)?;
        return Ok(Expr::Pow(Box::new(base_expr), Box::new(exponent_expr)));
    }

    // Handling function calls: name(...) spanning the whole input
    if chars[chars.len() - 1] == ')' {
        if let Some(open) = chars.iter().position(|&c| c == '(') {
            let name = substring(&chars[..open]);
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
                if let Some(close) = find_pair_to_this_bracket(&chars, open) {
                    if close == chars.len() - 1 {
                        let inner = substring(&chars[open + 1..close]);
                        debug!("found function call: {}({})", name, inner);
                        let inner_expr = parse_expression_func(&inner)?;
                        return function_call(&name, inner_expr);
                    }
                }
            }
        }
    }

    // Handling expression that is all in brackets
    if chars[0] == '(' && chars[chars.len() - 1] == ')' {
        if let Some(close) = find_pair_to_this_bracket(&chars, 0) {
            if close == chars.len() - 1 {
                let inner = substring(&chars[1..close]);
                debug!("found expression that is all in brackets: {}", inner);
                return parse_expression_func(&inner);
            }
        }
    }

    // Handling named constants and variables
    if input == "pi" {
        return Ok(Expr::Const(PI));
    }
    if input == "e" {
        return Ok(Expr::Const(E));
    }
    if chars[0].is_ascii_alphabetic()
        && chars.iter().all(|&c| c.is_ascii_alphanumeric() || c == '_')
    {
        debug!("found variable: {}", input);
        return Ok(Expr::Var(input.to_string()));
    }

    // Implicit multiplication with a numeric prefix: 2x, 3pi
    let digits_end = chars
        .iter()
        .position(|&c| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(chars.len());
    if digits_end > 0 && digits_end < chars.len() {
        let prefix = substring(&chars[..digits_end]);
        let rest = substring(&chars[digits_end..]);
        if let Ok(value) = prefix.parse::<f64>() {
            if rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                debug!("implicit multiplication: {} * {}", value, rest);
                return Ok(Expr::Mul(
                    Box::new(Expr::Const(value)),
                    Box::new(parse_expression_func(&rest)?),
                ));
            }
        }
    }

    Err(format!("Invalid expression format: {}", input))
}

impl Expr {
    /// Parses a mathematical expression string into a symbolic expression.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, -2.5, 1e-6, pi, e
    /// - Operators: +, -, *, /, ^
    /// - Functions: sin, cos, exp, ln, sqrt, etc.
    /// - Parentheses for grouping
    ///
    /// # Panics
    /// Panics if the expression cannot be parsed; the answer checker uses
    /// [`parse_expression_func`] directly and degrades instead of panicking
    pub fn parse_expression(input: &str) -> Expr {
        let expr = match parse_expression_func(input) {
            Ok(expr) => {
                debug!("found expression: {:?}", expr);
                Ok(expr)
            }
            Err(err) => {
                debug!("Error: {}", err);
                Err(err)
            }
        };
        expr.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_negative_constant() {
        let expr = parse_expression_func("-2.5").unwrap();
        assert_eq!(expr, Expr::Const(-2.5));
    }

    #[test]
    fn test_parse_scientific_notation() {
        let expr = parse_expression_func("1e-6").unwrap();
        assert_eq!(expr, Expr::Const(1e-6));
        let expr = parse_expression_func("2.5e3 + 1").unwrap();
        assert_eq!(
            expr,
            Expr::Add(Box::new(Expr::Const(2500.0)), Box::new(Expr::Const(1.0)))
        );
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_subtraction() {
        let expr = parse_expression_func("x - 2").unwrap();
        assert_eq!(
            expr,
            Expr::Sub(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_multiplication() {
        let expr = parse_expression_func("x * 2").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_division() {
        let expr = parse_expression_func("x / 2").unwrap();
        assert_eq!(
            expr,
            Expr::Div(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_division_left_associative() {
        let expr = parse_expression_func("8 / 4 / 2").unwrap();
        assert_eq!(
            expr,
            Expr::Div(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(8.0)),
                    Box::new(Expr::Const(4.0))
                )),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_func("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power_right_associative() {
        let expr = parse_expression_func("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Const(3.0)),
                    Box::new(Expr::Const(2.0))
                ))
            )
        );
    }

    #[test]
    fn test_parse_logarithm() {
        let expr = parse_expression_func("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_sqrt() {
        let expr = parse_expression_func("sqrt(x)").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(0.5))
            )
        );
    }

    #[test]
    fn test_parse_pi() {
        let expr = parse_expression_func("pi").unwrap();
        assert_eq!(expr, Expr::Const(std::f64::consts::PI));
    }

    #[test]
    fn test_parse_implicit_multiplication() {
        let expr = parse_expression_func("2x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_variable() {
        let expr = parse_expression_func("-x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_after_operator() {
        let expr = parse_expression_func("x * -2").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(-2.0))
            )
        );
    }

    #[test]
    fn test_parse_expression_func_with_brackets() {
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = parse_expression_func("(x + y) * (z - 2) / exp(w)").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let y = Box::new(Expr::Var("y".to_string()));
        let z = Box::new(Expr::Var("z".to_string()));
        let w = Box::new(Expr::Var("w".to_string()));
        let C = Box::new(Expr::Const(2.0));
        let x_plus_y = Box::new(Expr::Add(x, y));
        let z_minus_C = Box::new(Expr::Sub(z, C));
        let e = Box::new(Expr::Exp(w));
        let product = Box::new(Expr::Mul(x_plus_y, z_minus_C));
        let Res = Expr::Div(product, e);
        assert_eq!(expr, Res);
    }

    #[test]
    fn test_invalid_expression() {
        let result = parse_expression_func("(x +");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_unmatched_brackets() {
        let result = parse_expression_func("(x + y");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_expression() {
        let result = parse_expression_func("  ");
        assert!(result.is_err());
    }

    #[test]
    fn test_multiple_addition() {
        let result = parse_expression_func("x^2 - x - 1");
        let x = Box::new(Expr::Var("x".to_string()));
        let x_sq_minus_x = Expr::Pow(x.clone(), Box::new(Expr::Const(2.0))) - *x;
        let to_check = x_sq_minus_x - Expr::Const(1.0);
        assert_eq!(result.unwrap(), to_check);
    }

    #[test]
    fn test_parse_sin() {
        let expr = parse_expression_func("sin(x)").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_cos() {
        let expr = parse_expression_func("cos(x)").unwrap();
        assert_eq!(expr, Expr::cos(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_tan() {
        let expr = parse_expression_func("tan(x)").unwrap();
        assert_eq!(expr, Expr::tg(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_arcsin() {
        let expr = parse_expression_func("arcsin(x)").unwrap();
        assert_eq!(expr, Expr::arcsin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_unknown_function() {
        let result = parse_expression_func("sinh(x)");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_complex_trig() {
        let expr = parse_expression_func("sin(x) + cos(y)").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::sin(Box::new(Expr::Var("x".to_string())))),
                Box::new(Expr::cos(Box::new(Expr::Var("y".to_string()))))
            )
        );
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }
}
