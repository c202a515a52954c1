//! Rule-based compound sentiment scorer.
//!
//! Each sentiment word contributes its lexicon valence, adjusted by the
//! words around it:
//!
//! - intensity boosters up to three words before it (scaled 1.0 / 0.95 / 0.9
//!   by distance),
//! - negations up to three words before it (each flips and damps by 0.74),
//! - ALL-CAPS emphasis, only when the text mixes caps and non-caps words,
//! - a contrast word ("but", "но") halves everything before it and weights
//!   everything after it by 1.5.
//!
//! Exclamation marks (up to four) and repeated question marks then push the
//! sum further from zero, and the sum is normalized into `[-1.0, 1.0]` with
//! `s / sqrt(s² + 15)` and rounded to four decimals.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::{booster, is_contrast, is_negation, valence};

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;
const BOOSTER_DISTANCE_SCALE: [f64; 3] = [1.0, 0.95, 0.9];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:'\p{L}+)*").expect("valid word regex"));

/// Scores `text` and returns a compound sentiment in `[-1.0, 1.0]`,
/// rounded to four decimals.
///
/// Pure: identical input always produces an identical score. Empty text,
/// text without any lexicon word and text in an uncovered language all
/// score `0.0`.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let normalized = text.replace(['\u{2019}', '`'], "'");
    let tokens: Vec<&str> = WORD.find_iter(&normalized).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let caps_differential = has_caps_differential(&tokens);

    let mut valences: Vec<f64> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| word_valence(i, token, &tokens, &lowered, caps_differential))
        .collect();

    if let Some(pivot) = lowered.iter().position(|w| is_contrast(w)) {
        for (i, v) in valences.iter_mut().enumerate() {
            if i < pivot {
                *v *= 0.5;
            } else if i > pivot {
                *v *= 1.5;
            }
        }
    }

    let mut sum: f64 = valences.iter().sum();
    if sum != 0.0 {
        sum += sum.signum() * punctuation_emphasis(text);
    }

    normalize(sum)
}

fn word_valence(
    i: usize,
    token: &str,
    tokens: &[&str],
    lowered: &[String],
    caps_differential: bool,
) -> f64 {
    let word = lowered[i].as_str();
    // Boosters carry no sentiment of their own.
    if booster(word).is_some() {
        return 0.0;
    }
    let Some(mut v) = valence(word) else {
        return 0.0;
    };

    let sign = v.signum();
    if caps_differential && is_all_caps(token) {
        v += sign * CAPS_INCREMENT;
    }

    for (distance, scale) in (1..=3).zip(BOOSTER_DISTANCE_SCALE) {
        let Some(j) = i.checked_sub(distance) else {
            break;
        };
        let prev = lowered[j].as_str();
        if let Some(b) = booster(prev) {
            let mut b = b * sign;
            if caps_differential && is_all_caps(tokens[j]) {
                b += sign * CAPS_INCREMENT;
            }
            v += b * scale;
        }
        if is_negation(prev) {
            v *= NEGATION_SCALAR;
        }
    }

    v
}

fn is_all_caps(token: &str) -> bool {
    token.chars().count() > 1
        && token.chars().any(char::is_alphabetic)
        && !token.chars().any(char::is_lowercase)
}

/// True when some, but not all, words are written in caps.
fn has_caps_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

#[allow(clippy::cast_precision_loss)]
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4);
    let questions = text.matches('?').count();
    let question_emphasis = if questions > 1 {
        questions.min(3) as f64 * QUESTION_INCREMENT
    } else {
        0.0
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

/// Maps the raw sum into `[-1.0, 1.0]`, rounded to four decimals.
fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    (score.clamp(-1.0, 1.0) * 10_000.0).round() / 10_000.0
}
