// src/gateway/pages.rs
//! Page selection for the headlines endpoint.
//!
//! Each call draws a fresh page in `1..=max_page`; there is no session affinity.
//! The source is a trait object so tests can pin or seed it.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;

pub trait PagePicker: Send + Sync {
    /// Returns a page number in `1..=max_page` (`max_page` of 0 is treated as 1).
    fn pick(&self, max_page: u32) -> u32;
}

/// Thread-local RNG, reseeded by the OS. Used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPages;

impl PagePicker for RandomPages {
    fn pick(&self, max_page: u32) -> u32 {
        rand::rng().random_range(1..=max_page.max(1))
    }
}

/// Always the same page (clamped into range).
#[derive(Debug, Clone, Copy)]
pub struct FixedPage(pub u32);

impl PagePicker for FixedPage {
    fn pick(&self, max_page: u32) -> u32 {
        self.0.clamp(1, max_page.max(1))
    }
}

/// Reproducible sequence from a seed.
#[derive(Debug)]
pub struct SeededPages {
    rng: Mutex<StdRng>,
}

impl SeededPages {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl PagePicker for SeededPages {
    fn pick(&self, max_page: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(1..=max_page.max(1))
    }
}
