//! Demo that walks the analyzer view through the built-in sample texts
//! (stdout/log only, no network).

use fake_news_detector::classifier::{classify_with_delay, SAMPLE_TEXTS};
use fake_news_detector::view::{DetectionAction, DetectionState};
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let mut state = DetectionState::default();
    for idx in 0..SAMPLE_TEXTS.len() {
        state = state
            .reduce(DetectionAction::LoadSample(idx))
            .reduce(DetectionAction::AnalyzeRequested);

        let result = classify_with_delay(&state.text, Duration::from_millis(300)).await;
        state = state.reduce(DetectionAction::AnalysisCompleted(result));

        if let Some(r) = &state.result {
            tracing::info!(
                sample = idx,
                words = state.word_count(),
                verdict = r.verdict_label(),
                confidence = r.confidence,
                sentiment = ?r.sentiment,
                keywords = ?r.keywords,
                "analyzed"
            );
            for line in &r.explanation {
                println!("  - {line}");
            }
            println!("  => {}", r.recommendation());
        }
    }

    println!("detect-demo done");
}
