use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Plain decimal: optional sign, optional integer part, optional point, at least one digit.
/// Exponents, `inf` and `NaN` are not accepted.
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d*\.?\d+$").expect("decimal pattern is valid"));

/// How an edit is applied: live while typing or dragging, or confirmed.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    #[serde(rename = "preview")]
    Preview,
    #[default]
    #[serde(rename = "commit")]
    Commit,
}

/// Parses user text as a decimal number, ignoring surrounding whitespace.
///
/// Returns `None` for anything that does not match the decimal pattern,
/// including partial input such as `""`, `"-"`, `"."` or `"-."`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if !DECIMAL.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
