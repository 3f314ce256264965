//! Cleanup of raw answer text into plain algebraic notation the parser understands.
//!
//! Handles the LaTeX subset that shows up in practice answers: `$` delimiters,
//! `\frac`, `\sqrt`, `\cdot`, brace grouping. Anything it does not recognize is left
//! in place; the caller degrades to comparing the cleaned text when parsing fails.

use regex::Regex;

/// Rewrites a raw answer into cleaned algebraic text.
///
/// The pipeline: drop zero-width characters, strip `$` delimiters, erase
/// `\left`/`\right`, map `\cdot`/`\times`/`\div`/`\pi` to plain operators, rewrite
/// `\frac{X}{Y}` into `(X)/(Y)` and `\sqrt{X}` into `sqrt(X)`, turn `^{X}` and any
/// remaining braces into parentheses, fold `**` into `^` and remove all whitespace.
///
/// Case is preserved: variable names may be case-significant.
///
/// The `\frac` and `\sqrt` rewrites run as a single pass with a single-level brace
/// pattern, so nested fractions are rewritten only partially and generally fail to
/// parse downstream. Known limitation.
pub fn clean_expression(raw: &str) -> String {
    let mut s = String::from(raw);
    // zero-width characters that often sneak into math text copied from web pages
    s.retain(|c| {
        !matches!(
            c,
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
        )
    });
    s = s.replace('$', "");
    s = s.replace("\\left", "").replace("\\right", "");
    s = s
        .replace("\\cdot", "*")
        .replace("\\times", "*")
        .replace("\\div", "/")
        .replace("\\pi", "pi");
    let frac_re = Regex::new(r"\\frac\{([^{}]*)\}\{([^{}]*)\}").unwrap();
    s = frac_re.replace_all(&s, "($1)/($2)").to_string();
    let sqrt_re = Regex::new(r"\\sqrt\{([^{}]*)\}").unwrap();
    s = sqrt_re.replace_all(&s, "sqrt($1)").to_string();
    let pow_re = Regex::new(r"\^\{([^{}]*)\}").unwrap();
    s = pow_re.replace_all(&s, "^($1)").to_string();
    // remaining braces act as plain grouping
    s = s.replace('{', "(").replace('}', ")");
    s = s.replace("**", "^");
    s.retain(|c| !c.is_whitespace());
    s
}
