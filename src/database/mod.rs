//! Persistence layer: the review-store capability and its SQLite implementation.

pub mod db;

pub use db::{CardStore, DeckStats};

use crate::error::Result;
use crate::models::{ReviewState, StoredReview};

/// Read/write access to one card's scheduling record.
///
/// The study session holds this capability and performs the read-modify-write
/// around each grading; the scheduler itself never touches storage.
pub trait ReviewStore {
    fn get_review_state(&self, card_id: i64) -> Result<StoredReview>;
    fn put_review_state(&self, card_id: i64, state: &ReviewState) -> Result<()>;
}
