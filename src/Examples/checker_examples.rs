// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::checker::compare::AnswerChecker;
use crate::symbolic::symbolic_engine::Expr;

#[allow(dead_code)]
pub fn checker_examples(example: usize) {
    match example {
        0 => {
            // GRADING A FREE-TEXT ANSWER
            let checker = AnswerChecker::new();
            checker.init_logging();
            // LaTeX and plain notation of the same fraction
            let user_answer = "\\frac{3}{4}";
            let correct_answer = "3/4";
            let verdict = checker.check_answer_equivalence(user_answer, correct_answer);
            println!("{} vs {} -> {}", user_answer, correct_answer, verdict);
            // commutative variants of the same polynomial
            let verdict = checker.check_answer_equivalence("x + 1", "1 + x");
            println!("x + 1 vs 1 + x -> {}", verdict);
            // floating point drift is absorbed by the tolerance
            let verdict = checker.check_answer_equivalence("0.1 + 0.2", "0.3");
            println!("0.1 + 0.2 vs 0.3 -> {}", verdict);
        }
        1 => {
            // NORMALIZATION PIPELINE, STEP BY STEP
            let checker = AnswerChecker::new();
            let raw = "$ \\frac{x + 1}{2} $";
            // here you've got the canonical form of the raw answer
            let normalized = checker.normalize(raw);
            println!("raw: {}, normalized: {}", raw, normalized);
            // parse the cleaned text yourself to inspect the symbolic expression
            let parsed_expression = Expr::parse_expression("(x+1)/(2)");
            println!(" parsed_expression {}", parsed_expression);
            let simplified = parsed_expression.simplify();
            println!(" simplified {}", simplified);
            // return vec of all arguments
            let all = simplified.all_arguments_are_variables();
            println!("all arguments are variables {:?}", all);
        }
        2 => {
            // CUSTOM TOLERANCE FOR ROUNDED ANSWERS
            let mut checker = AnswerChecker::new();
            checker.set_tolerance(0.01);
            let verdict = checker.check_answer_equivalence("pi", "3.14");
            println!("pi vs 3.14 with tolerance 0.01 -> {}", verdict);
            let strict = AnswerChecker::new();
            let verdict = strict.check_answer_equivalence("pi", "3.14");
            println!("pi vs 3.14 with default tolerance -> {}", verdict);
        }
        _ => {
            println!("there is no example with number {}", example);
        }
    }
}
