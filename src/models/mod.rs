pub mod card;
pub mod deck;
pub mod quality;
pub mod review_state;
pub mod sm2;
pub mod study_session;

pub use card::Card;
pub use deck::Deck;
pub use quality::Quality;
pub use review_state::{ReviewState, StoredReview};
pub use study_session::StudySession;
