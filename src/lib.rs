pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use database::{CardStore, DeckStats, ReviewStore};
pub use error::{ExportError, Result, StoreError};
pub use models::{Card, Deck, Quality, ReviewState, StoredReview, StudySession};
