//! JSON import/export for decks.
//! Saves and loads a [`Deck`] with its cards; scheduling records stay behind
//! in the store, so an imported deck starts fresh.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::models::Deck;

/// Writes a deck to a JSON file at the given path.
pub fn export_deck(deck: &Deck, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(deck)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    info!("exported deck '{}' ({} cards)", deck.name, deck.cards.len());
    Ok(())
}

/// Reads a deck from a JSON file.
pub fn import_deck(path: impl AsRef<Path>) -> Result<Deck, ExportError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let deck: Deck = serde_json::from_str(&contents)?;
    info!("imported deck '{}' ({} cards)", deck.name, deck.cards.len());
    Ok(deck)
}
