//! Judgment-score extraction
//!
//! The judge prompt instructs the model to emit `PRO: X/10` and `CON: X/10`
//! lines, but model output drifts. Parsing never fails: a side whose score
//! token is absent gets [`DEFAULT_SCORE`], and the full text is passed
//! through as feedback either way.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Neutral midpoint used when a score token cannot be found
pub const DEFAULT_SCORE: u32 = 5;

/// Parsed (or defaulted) round judgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Judgment {
    pub pro_score: u32,
    pub con_score: u32,
    /// The unmodified judgment text
    pub feedback: String,
}

fn pro_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)PRO[:\s]+(\d+)").expect("valid regex"))
}

fn con_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)CON[:\s]+(\d+)").expect("valid regex"))
}

fn extract_score(re: &Regex, text: &str, side: &str) -> u32 {
    match re.captures(text) {
        Some(caps) => match caps[1].parse() {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!(side, digits = &caps[1], "score out of range, using default");
                DEFAULT_SCORE
            }
        },
        None => {
            tracing::warn!(side, "no score token in judgment, using default");
            DEFAULT_SCORE
        }
    }
}

/// Extract PRO and CON scores from free-text judge output.
///
/// Takes the first case-insensitive `PRO[:\s]+digits` / `CON[:\s]+digits`
/// match of each; restated scores later in the text are ignored. Scores are
/// taken verbatim with no range clamping even though the prompt asks for
/// 1-10.
pub fn parse_judgment(text: &str) -> Judgment {
    Judgment {
        pro_score: extract_score(pro_re(), text, "pro"),
        con_score: extract_score(con_re(), text, "con"),
        feedback: text.to_string(),
    }
}
