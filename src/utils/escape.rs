//! Escaping of user-supplied text for the two output markups

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Characters with a special meaning in LaTeX text mode
    static ref LATEX_SPECIAL: Regex = Regex::new(r"[\\&%$#_{}~^]").unwrap();
}

/// Escape special LaTeX characters in text
pub fn escape_latex(text: &str) -> String {
    LATEX_SPECIAL
        .replace_all(text, |caps: &Captures| match &caps[0] {
            "\\" => "\\textbackslash{}".to_string(),
            "~" => "\\textasciitilde{}".to_string(),
            "^" => "\\textasciicircum{}".to_string(),
            other => format!("\\{}", other),
        })
        .into_owned()
}

/// Escape the HTML metacharacters `&`, `<`, `>` and `"`
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("x_1"), "x\\_1");
        assert_eq!(escape_latex("50% & more"), "50\\% \\& more");
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex("x^2"), "x\\textasciicircum{}2");
        assert_eq!(escape_latex("{g}"), "\\{g\\}");
    }

    #[test]
    fn test_escape_latex_plain_text_untouched() {
        assert_eq!(escape_latex("Intercept"), "Intercept");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
