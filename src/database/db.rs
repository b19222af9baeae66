//! SQLite card store.
//!
//! Holds decks and cards, with each card's SM-2 scheduling fields folded into
//! the cards table. The store decides which cards are due by comparing
//! `reviewed_on + interval_days` against today; the scheduler only records
//! the review date.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};

use super::ReviewStore;
use crate::error::{Result, StoreError};
use crate::models::{Card, Deck, ReviewState, StoredReview};

/// Aggregate review statistics for one deck.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeckStats {
    /// Sum of `reps` across the deck's cards.
    pub total_reviews: i64,
    pub average_ease: f64,
    /// Cards with `reps >= 5` and `ease >= 3.0`.
    pub mastered: i64,
}

pub struct CardStore {
    conn: Connection,
}

impl CardStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    /// Ephemeral store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    fn init(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS decks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )",
            (),
        )?;

        // Scheduling fields live beside the card content. `reviewed_on` stays
        // NULL until the first review, which makes the card immediately due.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                deck_id INTEGER NOT NULL,
                front TEXT NOT NULL,
                back TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                image_path TEXT,
                created_at TEXT NOT NULL,
                ease REAL DEFAULT 2.5,
                interval_days INTEGER DEFAULT 1,
                reps INTEGER DEFAULT 0,
                reviewed_on TEXT,
                FOREIGN KEY (deck_id) REFERENCES decks(id)
            )",
            (),
        )?;

        Ok(())
    }

    pub fn create_deck(&self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO decks (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now().to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("created deck '{name}' (id {id})");
        Ok(id)
    }

    pub fn list_decks(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM decks ORDER BY name")?;
        let decks = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(decks)
    }

    /// Looks up a deck id by name.
    pub fn deck_id(&self, name: &str) -> Result<i64> {
        self.conn
            .query_row("SELECT id FROM decks WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| StoreError::DeckNotFound(name.to_string()))
    }

    /// Deletes a deck and all of its cards.
    pub fn delete_deck(&self, deck_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM cards WHERE deck_id = ?1", params![deck_id])?;
        self.conn
            .execute("DELETE FROM decks WHERE id = ?1", params![deck_id])?;
        Ok(())
    }

    /// Adds a card with default scheduling fields and returns its id.
    pub fn add_card(&self, deck_id: i64, card: &Card) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO cards (deck_id, front, back, notes, image_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                deck_id,
                card.front,
                card.back,
                card.notes,
                card.image_path,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_card(&self, card_id: i64) -> Result<Card> {
        self.conn
            .query_row(
                "SELECT front, back, notes, image_path FROM cards WHERE id = ?1",
                params![card_id],
                |row| {
                    Ok(Card {
                        front: row.get(0)?,
                        back: row.get(1)?,
                        notes: row.get(2)?,
                        image_path: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or(StoreError::CardNotFound(card_id))
    }

    pub fn update_card(&self, card_id: i64, card: &Card) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET front = ?1, back = ?2, notes = ?3, image_path = ?4 WHERE id = ?5",
            params![card.front, card.back, card.notes, card.image_path, card_id],
        )?;
        if changed == 0 {
            return Err(StoreError::CardNotFound(card_id));
        }
        Ok(())
    }

    pub fn delete_card(&self, card_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
        Ok(())
    }

    /// All cards in a deck, as (id, card) pairs.
    pub fn cards_in_deck(&self, deck_id: i64) -> Result<Vec<(i64, Card)>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, notes, image_path FROM cards WHERE deck_id = ?1 ORDER BY id",
        )?;
        let cards = stmt
            .query_map(params![deck_id], |row| {
                Ok((
                    row.get(0)?,
                    Card {
                        front: row.get(1)?,
                        back: row.get(2)?,
                        notes: row.get(3)?,
                        image_path: row.get(4)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// Cards in a deck that are due for review on `today`.
    ///
    /// A card is due when it has never been reviewed, or when
    /// `reviewed_on + interval_days` has arrived. Never-reviewed cards sort
    /// first, then oldest review dates.
    pub fn due_cards(&self, deck_id: i64, today: NaiveDate) -> Result<Vec<(i64, Card, StoredReview)>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, notes, image_path, ease, interval_days, reps
             FROM cards
             WHERE deck_id = ?1
               AND (reviewed_on IS NULL
                    OR date(reviewed_on, '+' || interval_days || ' days') <= ?2)
             ORDER BY reviewed_on ASC",
        )?;
        let cards = stmt
            .query_map(params![deck_id, today.to_string()], |row| {
                Ok((
                    row.get(0)?,
                    Card {
                        front: row.get(1)?,
                        back: row.get(2)?,
                        notes: row.get(3)?,
                        image_path: row.get(4)?,
                    },
                    StoredReview {
                        ease: row.get(5)?,
                        interval_days: row.get(6)?,
                        reps: row.get(7)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("{} cards due in deck {deck_id} on {today}", cards.len());
        Ok(cards)
    }

    pub fn deck_stats(&self, deck_id: i64) -> Result<DeckStats> {
        let stats = self.conn.query_row(
            "SELECT COALESCE(SUM(reps), 0),
                    COALESCE(AVG(ease), 0.0),
                    COALESCE(SUM(CASE WHEN reps >= 5 AND ease >= 3.0 THEN 1 ELSE 0 END), 0)
             FROM cards WHERE deck_id = ?1",
            params![deck_id],
            |row| {
                Ok(DeckStats {
                    total_reviews: row.get(0)?,
                    average_ease: row.get(1)?,
                    mastered: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Loads one deck with its cards into memory.
    pub fn load_deck(&self, deck_id: i64) -> Result<Deck> {
        let name: String = self
            .conn
            .query_row("SELECT name FROM decks WHERE id = ?1", params![deck_id], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.to_string()))?;

        let cards = self
            .cards_in_deck(deck_id)?
            .into_iter()
            .map(|(_, card)| card)
            .collect();

        Ok(Deck { name, cards })
    }

    /// Inserts a deck and its cards, e.g. after a JSON import.
    /// Imported cards start with fresh scheduling fields.
    pub fn import_deck(&self, deck: &Deck) -> Result<i64> {
        let deck_id = self.create_deck(&deck.name)?;
        for card in &deck.cards {
            self.add_card(deck_id, card)?;
        }
        info!("imported deck '{}' with {} cards", deck.name, deck.cards.len());
        Ok(deck_id)
    }
}

impl ReviewStore for CardStore {
    fn get_review_state(&self, card_id: i64) -> Result<StoredReview> {
        self.conn
            .query_row(
                "SELECT ease, interval_days, reps FROM cards WHERE id = ?1",
                params![card_id],
                |row| {
                    Ok(StoredReview {
                        ease: row.get(0)?,
                        interval_days: row.get(1)?,
                        reps: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or(StoreError::CardNotFound(card_id))
    }

    fn put_review_state(&self, card_id: i64, state: &ReviewState) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET ease = ?1, interval_days = ?2, reps = ?3, reviewed_on = ?4
             WHERE id = ?5",
            params![
                state.ease,
                state.interval_days,
                state.reps,
                state.reviewed_on.to_string(),
                card_id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::CardNotFound(card_id));
        }
        Ok(())
    }
}
