#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use MathCheck::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + 3*x + 1";
/// let parsed_expression = Expr::parse_expression(input);
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression into a canonical string expression for printing and comparison
/// 3) evaluates a closed symbolic expression to a number
///# Example#
/// ```
/// use MathCheck::symbolic::symbolic_engine::Expr;
/// let input = "(x + 1)*(x + 1)";
/// let parsed_expression = Expr::parse_expression(input);
/// // turn symbolic expression to a pretty human-readable string
/// println!("{}, sym to string: {}  \n", input, parsed_expression);
/// // return vec of all arguments
/// let all = parsed_expression.all_arguments_are_variables();
/// println!("all arguments are variables {:?}", all);
/// ```
/// Example2#
/// ```
/// use MathCheck::symbolic::symbolic_engine::Expr;
/// let input = "2^3 + sqrt(16)";
/// let parsed_expression = Expr::parse_expression(input);
/// // evaluate a closed expression to a number
/// let res = parsed_expression.eval_constant().unwrap();
/// assert!((res - 12.0).abs() < 1e-12);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
/// algebraic simplification of symbolic expressions into a canonical form: constant
/// folding, additive and multiplicative identities, power rules, collection of like
/// terms and deterministic ordering of commutative operands
pub mod symbolic_simplify;
/// numeric evaluation of closed symbolic expressions
pub mod symbolic_eval;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
