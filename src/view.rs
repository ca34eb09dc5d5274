//! view.rs — view state for the analyzer and the live headline feed.
//!
//! State is an immutable value; every user or network event is an action and
//! `reduce` returns the next state. Nothing is mutated in place, so a render
//! layer only ever sees complete snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier::{self, AnalysisResult, SAMPLE_TEXTS};
use crate::headlines::NewsArticle;

pub const FEED_ERROR_MESSAGE: &str = "Failed to fetch news. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionState {
    pub text: String,
    pub analyzing: bool,
    pub result: Option<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionAction {
    Edit(String),
    /// Replace the text with one of [`SAMPLE_TEXTS`]; out-of-range indexes are ignored.
    LoadSample(usize),
    AnalyzeRequested,
    AnalysisCompleted(AnalysisResult),
    AnalysisFailed,
    Clear,
}

impl DetectionState {
    /// Analyze button guard: some non-blank text and no analysis in flight.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() && !self.analyzing
    }

    /// Clear button guard; same condition as submit.
    pub fn can_clear(&self) -> bool {
        self.can_submit()
    }

    pub fn word_count(&self) -> usize {
        classifier::word_count(&self.text)
    }

    pub fn reduce(&self, action: DetectionAction) -> Self {
        match action {
            DetectionAction::Edit(text) => Self {
                text,
                ..self.clone()
            },
            DetectionAction::LoadSample(i) => match SAMPLE_TEXTS.get(i) {
                Some(sample) => Self {
                    text: (*sample).to_string(),
                    ..self.clone()
                },
                None => self.clone(),
            },
            DetectionAction::AnalyzeRequested if self.can_submit() => Self {
                analyzing: true,
                ..self.clone()
            },
            DetectionAction::AnalyzeRequested => self.clone(),
            // A late completion after Clear/Edit still lands; there is no cancellation.
            DetectionAction::AnalysisCompleted(result) => Self {
                analyzing: false,
                result: Some(result),
                ..self.clone()
            },
            DetectionAction::AnalysisFailed => Self {
                analyzing: false,
                ..self.clone()
            },
            DetectionAction::Clear if self.can_clear() => Self {
                text: String::new(),
                result: None,
                ..self.clone()
            },
            DetectionAction::Clear => self.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedState {
    pub articles: Vec<NewsArticle>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    FetchStarted,
    FetchSucceeded {
        articles: Vec<NewsArticle>,
        at: DateTime<Utc>,
    },
    FetchFailed,
}

impl FeedState {
    pub fn reduce(&self, action: FeedAction) -> Self {
        match action {
            FeedAction::FetchStarted => Self {
                loading: true,
                error: None,
                ..self.clone()
            },
            FeedAction::FetchSucceeded { articles, at } => Self {
                articles,
                loading: false,
                last_updated: Some(at),
                error: None,
            },
            FeedAction::FetchFailed => Self {
                articles: Vec::new(),
                loading: false,
                last_updated: self.last_updated,
                error: Some(FEED_ERROR_MESSAGE.to_string()),
            },
        }
    }

    /// Articles are shown only when not loading.
    pub fn visible_articles(&self) -> &[NewsArticle] {
        if self.loading {
            &[]
        } else {
            self.articles.as_slice()
        }
    }
}
