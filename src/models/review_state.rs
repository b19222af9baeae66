//! Per-card scheduling record for the SM-2 scheduler.

use chrono::{Duration, NaiveDate};

pub const DEFAULT_EASE: f64 = 2.5;
pub const DEFAULT_INTERVAL_DAYS: i32 = 1;
pub const DEFAULT_REPS: i32 = 0;

/// Scheduling state of a single card after a review.
///
/// `reviewed_on` holds the date the card was last reviewed, not a future due
/// date. Whether a card is due again is decided by the store by comparing
/// `reviewed_on + interval_days` against today (see [`ReviewState::next_due`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewState {
    /// Recall-difficulty multiplier, never below 1.3.
    pub ease: f64,
    /// Days until the next review, always at least 1.
    pub interval_days: i32,
    /// Consecutive successful reviews since the last lapse.
    pub reps: i32,
    /// Date of this review (UTC, day granularity).
    pub reviewed_on: NaiveDate,
}

impl ReviewState {
    /// The date on which the card becomes eligible for review again.
    pub fn next_due(&self) -> NaiveDate {
        self.reviewed_on + Duration::days(self.interval_days as i64)
    }
}

/// Scheduling fields as read from storage, before normalization.
///
/// Each field is optional because a stored record may be missing or partially
/// populated (e.g. a card created before its first review). Normalization is
/// all-or-nothing: if any field is absent the whole tuple falls back to the
/// new-card defaults, so a half-broken record is treated as "never studied".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StoredReview {
    pub ease: Option<f64>,
    pub interval_days: Option<i32>,
    pub reps: Option<i32>,
}

impl StoredReview {
    pub fn new(ease: f64, interval_days: i32, reps: i32) -> Self {
        Self {
            ease: Some(ease),
            interval_days: Some(interval_days),
            reps: Some(reps),
        }
    }

    /// Resolves the stored fields to `(ease, interval_days, reps)`,
    /// substituting the defaults `(2.5, 1, 0)` unless all three are present.
    pub fn normalized(&self) -> (f64, i32, i32) {
        match (self.ease, self.interval_days, self.reps) {
            (Some(ease), Some(interval), Some(reps)) => (ease, interval, reps),
            _ => (DEFAULT_EASE, DEFAULT_INTERVAL_DAYS, DEFAULT_REPS),
        }
    }
}

impl From<&ReviewState> for StoredReview {
    fn from(state: &ReviewState) -> Self {
        Self::new(state.ease, state.interval_days, state.reps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_complete_record() {
        let stored = StoredReview::new(2.1, 14, 4);
        assert_eq!(stored.normalized(), (2.1, 14, 4));
    }

    #[test]
    fn test_normalized_empty_record_uses_defaults() {
        let stored = StoredReview::default();
        assert_eq!(stored.normalized(), (2.5, 1, 0));
    }

    #[test]
    fn test_normalized_partial_record_uses_defaults() {
        // A record missing even one field is treated as never studied.
        let stored = StoredReview {
            ease: Some(3.0),
            interval_days: Some(20),
            reps: None,
        };
        assert_eq!(stored.normalized(), (2.5, 1, 0));
    }

    #[test]
    fn test_next_due_adds_interval() {
        let state = ReviewState {
            ease: 2.5,
            interval_days: 6,
            reps: 2,
            reviewed_on: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        };
        assert_eq!(
            state.next_due(),
            NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
        );
    }
}
