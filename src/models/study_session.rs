//! Study session: multi-round review driver over a deck's due cards.
//!
//! Cards judged below the success threshold come back in a later round of the
//! same session. Each grading runs the SM-2 scheduler and writes the new
//! scheduling record back through the [`ReviewStore`] capability; the session
//! owns that read-modify-write, never the scheduler.

use chrono::NaiveDate;
use log::debug;

use super::sm2;
use crate::database::ReviewStore;
use crate::error::Result;
use crate::models::{Card, Quality, ReviewState, StoredReview};

struct SessionCard {
    id: i64,
    card: Card,
    stored: StoredReview,
    passed: bool,
}

/// Manages a study session with multiple review rounds.
pub struct StudySession<'a, S: ReviewStore> {
    pub deck_name: String,
    cards: Vec<SessionCard>,
    current_round: Vec<usize>,
    current_index: usize,
    pub show_back: bool,
    store: &'a S,
    pub round_number: usize,
}

impl<'a, S: ReviewStore> StudySession<'a, S> {
    /// Creates a session from the cards that are due for review.
    pub fn new(deck_name: String, due: Vec<(i64, Card, StoredReview)>, store: &'a S) -> Self {
        let cards: Vec<SessionCard> = due
            .into_iter()
            .map(|(id, card, stored)| SessionCard {
                id,
                card,
                stored,
                passed: false,
            })
            .collect();
        let indices: Vec<usize> = (0..cards.len()).collect();

        Self {
            deck_name,
            cards,
            current_round: indices,
            current_index: 0,
            show_back: false,
            store,
            round_number: 1,
        }
    }

    /// The card currently being shown, as (card id, card).
    pub fn current_card(&self) -> Option<(i64, &Card)> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
            .map(|sc| (sc.id, &sc.card))
    }

    pub fn toggle_back(&mut self) {
        self.show_back = !self.show_back;
    }

    /// Grades the current card: runs the scheduler on its stored record and
    /// persists the result. Cards graded below `Hard` repeat next round.
    /// Returns `None` when the session has no current card.
    pub fn grade_current(
        &mut self,
        quality: Quality,
        today: NaiveDate,
    ) -> Result<Option<ReviewState>> {
        let Some(&idx) = self.current_round.get(self.current_index) else {
            return Ok(None);
        };
        let sc = &mut self.cards[idx];

        let next = sm2::next_review(&sc.stored, quality.grade(), today);
        self.store.put_review_state(sc.id, &next)?;

        sc.stored = StoredReview::from(&next);
        sc.passed = quality.is_success();
        debug!(
            "graded card {} as {quality}: interval {} day(s), reps {}",
            sc.id, next.interval_days, next.reps
        );
        Ok(Some(next))
    }

    /// Moves on to the next card, rolling over into a new round at the end.
    pub fn advance(&mut self) {
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
            self.show_back = false;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the cards that failed this one.
    /// If every card passed, the session is complete.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| !self.cards[idx].passed)
            .collect();

        if failed.is_empty() {
            self.current_round.clear();
            return;
        }

        self.current_round = failed;
        self.current_index = 0;
        self.show_back = false;
        self.round_number += 1;

        for &idx in &self.current_round {
            self.cards[idx].passed = false;
        }
    }

    pub fn passed_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.cards[idx].passed)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.passed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.current_round.is_empty()
    }

    pub fn round_summary(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (retry): {} cards",
                self.round_number,
                self.total_count()
            )
        }
    }
}
