//! Reading time estimate for document bodies.

use serde::Serialize;

/// Default reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading time for a body of text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReadingTime {
    /// Number of counted words.
    pub words: usize,
    /// Fractional minutes at the configured speed.
    pub minutes: f64,
    /// Same estimate in milliseconds.
    pub time_ms: u64,
    /// Human-readable label, e.g. `"3 min read"`.
    pub text: String,
}

/// Estimate reading time at `words_per_minute`.
///
/// A word is any whitespace-separated token containing at least one
/// alphanumeric character, so markdown punctuation like `#` or `---` is not
/// counted. The label rounds up and never goes below one minute. A zero
/// speed is treated as [`DEFAULT_WORDS_PER_MINUTE`].
#[must_use]
pub fn estimate(body: &str, words_per_minute: u32) -> ReadingTime {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };

    let words = body
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let minutes = words as f64 / f64::from(wpm);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let time_ms = (minutes * 60_000.0).round() as u64;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let label_minutes = (minutes.ceil() as u64).max(1);

    ReadingTime {
        words,
        minutes,
        time_ms,
        text: format!("{label_minutes} min read"),
    }
}
