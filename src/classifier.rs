//! classifier.rs — lexical fake news heuristic.
//!
//! Counts which fixed suspicious / reliable phrases occur in the text (substring
//! containment, case-insensitive) and turns the counts into a verdict, a
//! confidence percentage and a short list of human-readable reasons.
//!
//! The weights (0.15 / 0.2 / 0.3 / 0.2 / 0.4) and the 0.3 verdict threshold are
//! fixed constants, not tunables.

use std::time::Duration;

use metrics::counter;
use serde::{Deserialize, Serialize};

/// Phrases that commonly show up in sensational or fabricated content.
pub const SUSPICIOUS_PHRASES: [&str; 17] = [
    "exclusive",
    "breaking",
    "shocking",
    "revealed",
    "secret",
    "hidden truth",
    "they don't want you to know",
    "mainstream media",
    "cover-up",
    "exposed",
    "unbelievable",
    "miraculous",
    "instant cure",
    "doctors hate this",
    "government conspiracy",
    "wake up",
    "sheeple",
];

/// Phrases typical for sourced, credible journalism.
pub const RELIABLE_PHRASES: [&str; 12] = [
    "according to",
    "research shows",
    "study published",
    "expert says",
    "data indicates",
    "statistics show",
    "peer-reviewed",
    "university",
    "institute",
    "journal",
    "analysis",
    "evidence suggests",
];

const SUSPICIOUS_WEIGHT: f64 = 0.15;
const RELIABLE_WEIGHT: f64 = 0.2;
const SHORT_TEXT_PENALTY: f64 = 0.3;
const PUNCTUATION_PENALTY: f64 = 0.2;
const ALL_CAPS_PENALTY: f64 = 0.4;
const FAKE_THRESHOLD: f64 = 0.3;

const SHORT_TEXT_WORDS: usize = 20;
const ALL_CAPS_MIN_CHARS: usize = 50;

/// Artificial processing delay used by the analyzer view.
pub const DEFAULT_ANALYZE_DELAY: Duration = Duration::from_millis(2000);

/// Example articles offered by the analyzer view.
pub const SAMPLE_TEXTS: [&str; 3] = [
    "Breaking: Scientists at MIT have discovered a revolutionary method to detect fake news using advanced machine learning algorithms. The study, published in the Journal of Information Science, shows 94% accuracy in identifying misinformation across social media platforms.",
    "SHOCKING! Doctors Don't Want You to Know This ONE Weird Trick That Cures Everything! Mainstream media is covering up this secret that big pharma doesn't want revealed!",
    "According to a peer-reviewed study published by Stanford University researchers, climate change continues to accelerate. The research, which analyzed temperature data from over 1,000 weather stations globally, indicates a consistent warming trend over the past decade.",
];

/// Tone of the text as seen by the keyword counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Sensationalized,
    Neutral,
}

/// Outcome of one classification. Serialized with the camelCase names the UI reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_real: bool,
    /// Percentage in <55, 95>.
    pub confidence: u8,
    pub explanation: Vec<String>,
    /// Matched suspicious phrases first, then matched reliable ones.
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    /// 1..=10, higher reads more like sourced reporting.
    pub readability_score: u8,
}

impl AnalysisResult {
    pub fn verdict_label(&self) -> &'static str {
        if self.is_real {
            "Likely REAL"
        } else {
            "Likely FAKE"
        }
    }

    pub fn recommendation(&self) -> &'static str {
        if self.is_real {
            "This content appears credible, but always verify with multiple trusted sources before sharing important information."
        } else {
            "This content shows signs of misinformation. Cross-check with reputable news sources and fact-checking websites before believing or sharing."
        }
    }
}

/// Number of words as the analyzer counts them: split on single spaces.
///
/// Consecutive spaces produce empty "words"; an empty string counts as one.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

fn has_excessive_punctuation(text: &str) -> bool {
    text.contains("!!!") || text.contains("???")
}

fn is_shouting(text: &str) -> bool {
    text.to_uppercase() == text && text.chars().count() > ALL_CAPS_MIN_CHARS
}

fn matched<'a>(haystack: &str, phrases: &[&'a str]) -> Vec<&'a str> {
    phrases
        .iter()
        .copied()
        .filter(|p| haystack.contains(p))
        .collect()
}

/// Classify `text`. Never fails; callers reject blank input beforehand.
pub fn classify(text: &str) -> AnalysisResult {
    let lower = text.to_lowercase();
    let found_suspicious = matched(&lower, &SUSPICIOUS_PHRASES);
    let found_reliable = matched(&lower, &RELIABLE_PHRASES);
    let suspicious = found_suspicious.len();
    let reliable = found_reliable.len();

    let mut fake_score = suspicious as f64 * SUSPICIOUS_WEIGHT;
    let real_score = reliable as f64 * RELIABLE_WEIGHT;

    let short = word_count(text) < SHORT_TEXT_WORDS;
    let loud = has_excessive_punctuation(text);
    if short {
        fake_score += SHORT_TEXT_PENALTY;
    }
    if loud {
        fake_score += PUNCTUATION_PENALTY;
    }
    if is_shouting(text) {
        fake_score += ALL_CAPS_PENALTY;
    }

    let net = fake_score - real_score;
    let is_real = net < FAKE_THRESHOLD;
    let confidence = (net.abs() * 100.0 + 50.0).clamp(55.0, 95.0).round() as u8;

    let mut explanation = Vec::new();
    if suspicious > 0 {
        explanation.push(format!(
            "Contains {suspicious} suspicious keyword(s) commonly found in misinformation"
        ));
    }
    if reliable > 0 {
        explanation.push(format!(
            "Contains {reliable} indicator(s) of credible journalism"
        ));
    }
    if short {
        explanation.push("Very short content length raises credibility concerns".to_string());
    }
    if loud {
        explanation
            .push("Excessive punctuation often indicates sensationalized content".to_string());
    }
    if explanation.is_empty() {
        explanation
            .push("Analysis based on content structure and linguistic patterns".to_string());
    }

    let sentiment = if suspicious > reliable {
        Sentiment::Sensationalized
    } else {
        Sentiment::Neutral
    };

    let readability = (10 + reliable as i64 - suspicious as i64).clamp(1, 10) as u8;

    let keywords = found_suspicious
        .into_iter()
        .chain(found_reliable)
        .map(str::to_string)
        .collect();

    counter!("classifier_verdicts_total", "verdict" => if is_real { "real" } else { "fake" })
        .increment(1);

    AnalysisResult {
        is_real,
        confidence,
        explanation,
        keywords,
        sentiment,
        readability_score: readability,
    }
}

/// Classify after the analyzer's artificial processing delay.
pub async fn classify_with_delay(text: &str, delay: Duration) -> AnalysisResult {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    classify(text)
}
