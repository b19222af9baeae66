//! SM-2 (SuperMemo 2) spaced repetition scheduler.
//!
//! Computes a card's next scheduling state from its current state and a
//! recall-quality grade:
//! - Grades below 3 are a lapse: repetitions and interval reset, ease keeps
//!   its value.
//! - Grades 3-5 are a success: the interval progresses 1 day → 6 days →
//!   previous interval × ease, and ease is adjusted by the standard SM-2
//!   formula with a floor of 1.3.
//!
//! The grade is not range-checked. The study loop only produces {0, 3, 4, 5},
//! but any integer is accepted: anything below 3 is a lapse, anything above 5
//! extrapolates the ease formula past its intended range.

use chrono::NaiveDate;

use super::review_state::{ReviewState, StoredReview};

/// Ease never drops below this value.
pub const MIN_EASE: f64 = 1.3;

/// Grades at or above this count as a successful recall.
pub const SUCCESS_THRESHOLD: i32 = 3;

/// Computes the next scheduling state for a card.
///
/// Pure and infallible: malformed stored fields are normalized to the
/// new-card defaults rather than rejected, and no grade is out of contract.
/// `today` is the review date and becomes the result's `reviewed_on`.
pub fn next_review(stored: &StoredReview, quality: i32, today: NaiveDate) -> ReviewState {
    let (ease, interval_days, reps) = stored.normalized();

    if quality < SUCCESS_THRESHOLD {
        // Lapse: progress resets, ease is left alone.
        return ReviewState {
            ease,
            interval_days: 1,
            reps: 0,
            reviewed_on: today,
        };
    }

    let reps = reps + 1;
    let q = quality as f64;
    let ease = (ease + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)).max(MIN_EASE);

    let interval_days = match reps {
        1 => 1,
        2 => 6,
        // Truncated toward zero, not rounded; clamped so the interval stays
        // positive even if storage held a non-positive value.
        _ => ((interval_days as f64 * ease) as i32).max(1),
    };

    ReviewState {
        ease,
        interval_days,
        reps,
        reviewed_on: today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn new_card() -> StoredReview {
        StoredReview::new(2.5, 1, 0)
    }

    #[test]
    fn test_missing_fields_behave_like_new_card() {
        let malformed = StoredReview::default();
        assert_eq!(
            next_review(&malformed, 4, day()),
            next_review(&new_card(), 4, day())
        );

        let partial = StoredReview {
            ease: Some(1.9),
            interval_days: None,
            reps: Some(7),
        };
        assert_eq!(
            next_review(&partial, 4, day()),
            next_review(&new_card(), 4, day())
        );
    }

    #[test]
    fn test_lapse_resets_progress_and_keeps_ease() {
        let stored = StoredReview::new(2.2, 40, 6);
        for quality in [-3, 0, 1, 2] {
            let next = next_review(&stored, quality, day());
            assert!((next.ease - 2.2).abs() < EPS);
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.reps, 0);
        }
    }

    #[test]
    fn test_first_review() {
        let next = next_review(&new_card(), 4, day());
        assert_eq!(next.reps, 1);
        assert_eq!(next.interval_days, 1);
        assert!((next.ease - 2.5).abs() < EPS); // q=4 leaves ease unchanged
    }

    #[test]
    fn test_second_review() {
        let stored = StoredReview::new(2.5, 1, 1);
        let next = next_review(&stored, 4, day());
        assert_eq!(next.reps, 2);
        assert_eq!(next.interval_days, 6);
    }

    #[test]
    fn test_third_review_multiplies_and_truncates() {
        let stored = StoredReview::new(2.5, 6, 2);
        let next = next_review(&stored, 5, day());
        assert_eq!(next.reps, 3);
        assert!((next.ease - 2.6).abs() < EPS);
        // 6 * 2.6 = 15.6, truncated to 15
        assert_eq!(next.interval_days, 15);
    }

    #[test]
    fn test_perfect_grade_raises_ease_from_default() {
        let next = next_review(&new_card(), 5, day());
        assert!((next.ease - 2.6).abs() < EPS);
    }

    #[test]
    fn test_ease_floor_under_repeated_hard_passes() {
        let mut stored = StoredReview::new(1.5, 1, 0);
        for _ in 0..10 {
            let next = next_review(&stored, 3, day());
            assert!(next.ease >= MIN_EASE - EPS);
            stored = StoredReview::from(&next);
        }
        // q=3 drags ease down by 0.14 per review until the floor holds.
        let (ease, _, _) = stored.normalized();
        assert!((ease - MIN_EASE).abs() < EPS);
    }

    #[test]
    fn test_grade_above_five_extrapolates() {
        let next = next_review(&new_card(), 6, day());
        assert_eq!(next.reps, 1);
        // 2.5 + 0.1 - (-1) * (0.08 - 0.02) = 2.66
        assert!((next.ease - 2.66).abs() < EPS);
    }

    #[test]
    fn test_reviewed_on_is_the_given_date() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        let next = next_review(&new_card(), 0, today);
        assert_eq!(next.reviewed_on, today);
        assert_eq!(next.reviewed_on.to_string(), "2025-11-30");
    }

    #[test]
    fn test_interval_stays_positive_for_degenerate_input() {
        let stored = StoredReview::new(1.3, 0, 5);
        let next = next_review(&stored, 4, day());
        assert!(next.interval_days >= 1);
    }

    #[test]
    fn test_good_good_good_again_trajectory() {
        let mut stored = new_card();
        let mut history = Vec::new();
        for quality in [4, 4, 4, 0] {
            let next = next_review(&stored, quality, day());
            stored = StoredReview::from(&next);
            history.push(next);
        }

        let reps: Vec<i32> = history.iter().map(|s| s.reps).collect();
        let intervals: Vec<i32> = history.iter().map(|s| s.interval_days).collect();
        assert_eq!(reps, vec![1, 2, 3, 0]);
        assert_eq!(intervals, vec![1, 6, 15, 1]);

        // Ease never drops on a success, and the final lapse leaves it as-is.
        assert!(history[0].ease >= 2.5 - EPS);
        assert!(history[1].ease >= history[0].ease - EPS);
        assert!(history[2].ease >= history[1].ease - EPS);
        assert!((history[3].ease - history[2].ease).abs() < EPS);
    }
}
