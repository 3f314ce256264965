//! Normalization and equivalence comparison of free-text math answers.
//!
//! The comparison is total: every failure mode (malformed LaTeX, parse error,
//! undefined variable, non-finite evaluation) degrades to "not equivalent" or to the
//! cleaned input text, never to a panic or an error the caller must handle. When the
//! comparator is uncertain it answers false, so an uncertain grade shows up as a
//! wrong answer rather than a silently accepted one.

use crate::checker::latex::clean_expression;
use crate::symbolic::parse_expr::parse_expression_func;
use log::{debug, info};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

/// Outcome of evaluating a normalized expression: a plain number for closed
/// expressions, or the canonical printed form when free variables remain.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluated {
    Number(f64),
    Symbolic(String),
}

/// Answer equivalence checker with comparison settings.
///
/// Each call is a pure function of its string inputs and the settings; the struct
/// holds no other state and is safe to share across request-handling threads.
#[derive(Clone, Debug)]
pub struct AnswerChecker {
    /// absolute tolerance for numeric comparison
    pub tolerance: f64,
    /// verbosity of the terminal logger set up by `init_logging`
    pub loglevel: Option<String>,
}

impl AnswerChecker {
    pub fn new() -> AnswerChecker {
        AnswerChecker {
            tolerance: 1e-4,
            loglevel: Some("info".to_string()),
        }
    }

    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    pub fn set_tolerance(&mut self, tolerance: f64) {
        assert!(tolerance > 0.0, "tolerance must be positive");
        self.tolerance = tolerance;
    }

    pub fn set_loglevel(&mut self, loglevel: Option<String>) {
        self.loglevel = loglevel;
    }

    /// Sets up the terminal logger according to the loglevel field.
    ///
    /// Safe to call more than once; a second initialization is ignored.
    pub fn init_logging(&self) {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);
        if is_logging_disabled {
            return;
        }
        let log_option = if let Some(level) = self.loglevel.clone() {
            match level.as_str() {
                "debug" => LevelFilter::Debug,
                "info" => LevelFilter::Info,
                "warn" => LevelFilter::Warn,
                "error" => LevelFilter::Error,
                _ => LevelFilter::Info,
            }
        } else {
            LevelFilter::Info
        };
        let logger_instance = CombinedLogger::init(vec![TermLogger::new(
            log_option,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )]);
        match logger_instance {
            Ok(()) => {
                info!("answer checker logging started with level {}", log_option);
            }
            Err(_) => {} // already initialized by the host application
        }
    }

    ////////////////////////////NORMALIZATION/////////////////////////////////////////////////////////////

    /// Normalizes a raw answer into a canonical comparable string.
    ///
    /// Cleans the text (LaTeX rewrites, delimiter and whitespace stripping), then
    /// parses and simplifies it with the symbolic engine and returns the canonical
    /// printed form. If the cleaned text does not parse, the cleaned text itself is
    /// returned; this method never fails.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean_expression(raw);
        if cleaned.is_empty() {
            return cleaned;
        }
        match parse_expression_func(&cleaned) {
            Ok(expr) => expr.simplify().to_string(),
            Err(err) => {
                debug!("normalize falls back to cleaned text: {}", err);
                cleaned
            }
        }
    }

    /// Normalizes a plain-text short answer: trim, lowercase, strip all whitespace.
    ///
    /// No LaTeX handling; used for the cheap exact-match strategy.
    pub fn normalize_text(&self, raw: &str) -> String {
        raw.to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Evaluates a normalized expression string.
    ///
    /// A closed expression must come out as a finite number; an expression with
    /// free variables evaluates to its canonical symbolic form.
    fn evaluate_normalized(&self, normalized: &str) -> Result<Evaluated, String> {
        let expr = parse_expression_func(normalized)?;
        if expr.all_arguments_are_variables().is_empty() {
            let value = expr.eval_constant()?;
            if !value.is_finite() {
                return Err(format!(
                    "expression does not evaluate to a finite number: {}",
                    normalized
                ));
            }
            Ok(Evaluated::Number(value))
        } else {
            Ok(Evaluated::Symbolic(expr.simplify().to_string()))
        }
    }

    ////////////////////////////COMPARISON////////////////////////////////////////////////////////////////

    /// Decides whether two answers are mathematically equivalent.
    ///
    /// Empty input on either side is never equivalent. Otherwise both answers are
    /// normalized; identical canonical strings decide immediately, and the numeric
    /// route compares values within the absolute tolerance. Any evaluation failure
    /// on either side answers false.
    pub fn are_expressions_equivalent(&self, a: &str, b: &str) -> bool {
        if a.trim().is_empty() || b.trim().is_empty() {
            return false;
        }
        let normalized_a = self.normalize(a);
        let normalized_b = self.normalize(b);
        if normalized_a == normalized_b {
            debug!("normalized forms match: {}", normalized_a);
            return true;
        }
        match (
            self.evaluate_normalized(&normalized_a),
            self.evaluate_normalized(&normalized_b),
        ) {
            (Ok(Evaluated::Number(va)), Ok(Evaluated::Number(vb))) => {
                debug!("numeric comparison: {} vs {}", va, vb);
                (va - vb).abs() < self.tolerance
            }
            (Ok(Evaluated::Symbolic(sa)), Ok(Evaluated::Symbolic(sb))) => sa == sb,
            _ => {
                debug!(
                    "evaluation failed for {} or {}, answers treated as not equivalent",
                    normalized_a, normalized_b
                );
                false
            }
        }
    }

    /// Top-level grading entry point.
    ///
    /// Cheap exact text match first, expensive symbolic comparison second.
    pub fn check_answer_equivalence(&self, user_answer: &str, correct_answer: &str) -> bool {
        if user_answer.trim().is_empty() || correct_answer.trim().is_empty() {
            return false;
        }
        if self.normalize_text(user_answer) == self.normalize_text(correct_answer) {
            return true;
        }
        self.are_expressions_equivalent(user_answer, correct_answer)
    }
}

impl Default for AnswerChecker {
    fn default() -> Self {
        AnswerChecker::new()
    }
}

//___________________________________FREE FUNCTIONS____________________________________
// the stateless function contract over strings and booleans, for callers that do not
// need custom settings

/// see [`AnswerChecker::normalize`]
pub fn normalize_expression(raw: &str) -> String {
    AnswerChecker::new().normalize(raw)
}

/// see [`AnswerChecker::normalize_text`]
pub fn normalize_text(raw: &str) -> String {
    AnswerChecker::new().normalize_text(raw)
}

/// see [`AnswerChecker::are_expressions_equivalent`]
pub fn are_expressions_equivalent(a: &str, b: &str) -> bool {
    AnswerChecker::new().are_expressions_equivalent(a, b)
}

/// see [`AnswerChecker::check_answer_equivalence`]
pub fn check_answer_equivalence(user_answer: &str, correct_answer: &str) -> bool {
    AnswerChecker::new().check_answer_equivalence(user_answer, correct_answer)
}
