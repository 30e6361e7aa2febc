//! Star rating display.

use serde::Serialize;
use std::fmt;

/// A 0-5 rating broken into stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Out-of-range ratings are clamped to 0-5; a fractional part of at
    /// least one half earns a half star.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, 5.0) };
        let full = rating.floor() as u8;
        let half = full < 5 && rating.fract() >= 0.5;
        Self {
            full,
            half,
            empty: 5 - full - u8::from(half),
        }
    }

    /// Render as glyphs, e.g. "★★★★½".
    pub fn render(&self) -> String {
        let mut stars = String::with_capacity(15);
        stars.extend(std::iter::repeat('★').take(self.full.into()));
        if self.half {
            stars.push('½');
        }
        stars.extend(std::iter::repeat('☆').take(self.empty.into()));
        stars
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
