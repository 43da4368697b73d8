use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Score used when the grader's reply contains no digits at all.
pub const DEFAULT_SCORE: u32 = 1;

lazy_static! {
    static ref STANDALONE_SCORE: Regex = Regex::new(r"\b(?:10|[1-9])\b").expect("valid regex");
    static ref ANY_DIGITS: Regex = Regex::new(r"[0-9]+").expect("valid regex");
}

/// Which parse stage produced the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeSource {
    /// A standalone 1..=10 token.
    Standalone,
    /// First run of digits anywhere in the text. Not range checked.
    DigitFallback,
    /// Nothing usable; the reply was malformed.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGrade {
    pub score: u32,
    pub source: GradeSource,
}

pub(crate) fn parse_standalone(text: &str) -> Option<u32> {
    STANDALONE_SCORE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Unclamped: "87 out of 100" yields 87.
///
/// ASCII digits only; `\d` would also match other scripts' digits, which
/// `u32::from_str` rejects.
pub(crate) fn parse_digit_fallback(text: &str) -> Option<u32> {
    ANY_DIGITS
        .find(text)
        // A run too long for u32 yields None, so the caller falls back to DEFAULT_SCORE.
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract a score from free-form grader output.
///
/// Stages run in order and the first hit wins: standalone 1..=10 token, then
/// any digit run, then `DEFAULT_SCORE`. Never fails.
pub fn parse_grade(text: &str) -> ParsedGrade {
    let text = text.trim();
    if let Some(score) = parse_standalone(text) {
        return ParsedGrade {
            score,
            source: GradeSource::Standalone,
        };
    }
    if let Some(score) = parse_digit_fallback(text) {
        return ParsedGrade {
            score,
            source: GradeSource::DigitFallback,
        };
    }
    ParsedGrade {
        score: DEFAULT_SCORE,
        source: GradeSource::Default,
    }
}
