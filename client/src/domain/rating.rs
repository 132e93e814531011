//! Seller and buyer ratings.
//!
//! The backend reports an average on a 0–10 scale, or the sentinel string
//! `"No Ratings"` when nobody has rated the user yet. Five stars are shown,
//! each worth two points, with half-star granularity.

use std::fmt;

/// Highest score the backend reports.
pub const MAX_SCORE: f64 = 10.0;
/// Number of stars a rating is drawn with.
pub const STAR_COUNT: u8 = 5;
/// Label shown in place of stars when a user has no ratings.
pub const NO_RATINGS_LABEL: &str = "No Ratings";

/// A user's average rating.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Rating {
    /// Average score, clamped to `0.0..=10.0`.
    Score(f64),
    #[default]
    NoRatings,
}

impl Rating {
    /// Build a score, clamping out-of-range and non-finite input.
    ///
    /// # Examples
    /// ```
    /// use mycollegebook::domain::Rating;
    ///
    /// assert_eq!(Rating::score(12.0), Rating::Score(10.0));
    /// assert_eq!(Rating::score(-1.0), Rating::Score(0.0));
    /// ```
    pub fn score(value: f64) -> Self {
        if value.is_nan() {
            return Self::Score(0.0);
        }
        Self::Score(value.clamp(0.0, MAX_SCORE))
    }

    /// Star breakdown; `None` when there are no ratings to draw.
    pub fn stars(&self) -> Option<StarBreakdown> {
        match self {
            Self::Score(value) => Some(StarBreakdown::for_score(*value)),
            Self::NoRatings => None,
        }
    }

    /// Text shown next to the stars: the score out of five with two
    /// decimals, or `"No Ratings"`.
    pub fn label(&self) -> String {
        match self {
            Self::Score(value) => format!("{:.2}", value / 2.0),
            Self::NoRatings => NO_RATINGS_LABEL.to_owned(),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Full, half and empty star counts for a score. Always sums to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarBreakdown {
    fn for_score(value: f64) -> Self {
        let value = value.clamp(0.0, MAX_SCORE);
        let full = (value / 2.0).floor();
        // Any remainder below a full star, however small, draws as a half.
        let half = if value % 2.0 != 0.0 { 1 } else { 0 };
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is clamped to 0..=10 so full is within 0..=5"
        )]
        let full = full as u8;
        let half = half.min(STAR_COUNT - full);
        Self {
            full,
            half,
            empty: STAR_COUNT - full - half,
        }
    }
}
