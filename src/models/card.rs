//! Card is a front/back pair with optional notes and an optional image path.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            notes: String::new(),
            image_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("serendipity", "a fortunate accident");
        assert_eq!(card.front, "serendipity");
        assert_eq!(card.back, "a fortunate accident");
        assert!(card.notes.is_empty());
        assert!(card.image_path.is_none());
    }

    #[test]
    fn test_card_json_defaults_optional_fields() {
        let json = r#"{"front": "hola", "back": "hello"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.front, "hola");
        assert!(card.notes.is_empty());
        assert!(card.image_path.is_none());
    }
}
