use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

use memodeck::export::json;
use memodeck::{Card, CardStore, Quality, StudySession};

#[derive(Parser)]
#[command(name = "memodeck", about = "Spaced-repetition flashcards", version)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, default_value = "memodeck.sqlite3")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deck management
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Card management
    #[command(subcommand)]
    Card(CardCommand),

    /// Review the cards of a deck that are due today
    Study {
        /// Deck name
        deck: String,
    },

    /// Show review statistics for a deck
    Stats {
        /// Deck name
        deck: String,
    },

    /// Export a deck to a JSON file
    Export {
        /// Deck name
        deck: String,
        /// Output file
        path: PathBuf,
    },

    /// Import a deck from a JSON file
    Import {
        /// Input file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a new deck
    New { name: String },
    /// List all decks
    List,
    /// Delete a deck and all of its cards
    Delete { name: String },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a card to a deck
    Add {
        /// Deck name
        deck: String,
        front: String,
        back: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Path to an image illustrating the card
        #[arg(long)]
        image: Option<String>,
    },
    /// List the cards of a deck
    List {
        /// Deck name
        deck: String,
    },
    /// Delete a card by id
    Delete { id: i64 },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let store = CardStore::open(&cli.db)?;

    match cli.command {
        Command::Deck(cmd) => run_deck(&store, cmd)?,
        Command::Card(cmd) => run_card(&store, cmd)?,
        Command::Study { deck } => run_study(&store, &deck)?,
        Command::Stats { deck } => {
            let stats = store.deck_stats(store.deck_id(&deck)?)?;
            println!("Deck '{deck}'");
            println!("  total reviews: {}", stats.total_reviews);
            println!("  average ease:  {:.2}", stats.average_ease);
            println!("  mastered:      {}", stats.mastered);
        }
        Command::Export { deck, path } => {
            let loaded = store.load_deck(store.deck_id(&deck)?)?;
            json::export_deck(&loaded, &path)?;
            println!("Exported '{}' to {}", loaded.name, path.display());
        }
        Command::Import { path } => {
            let deck = json::import_deck(&path)?;
            store.import_deck(&deck)?;
            println!("Imported '{}' ({} cards)", deck.name, deck.cards.len());
        }
    }

    Ok(())
}

fn run_deck(store: &CardStore, cmd: DeckCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        DeckCommand::New { name } => {
            store.create_deck(&name)?;
            println!("Created deck '{name}'");
        }
        DeckCommand::List => {
            for (id, name) in store.list_decks()? {
                let count = store.cards_in_deck(id)?.len();
                println!("{name} ({count} cards)");
            }
        }
        DeckCommand::Delete { name } => {
            store.delete_deck(store.deck_id(&name)?)?;
            println!("Deleted deck '{name}'");
        }
    }
    Ok(())
}

fn run_card(store: &CardStore, cmd: CardCommand) -> Result<(), Box<dyn Error>> {
    match cmd {
        CardCommand::Add {
            deck,
            front,
            back,
            notes,
            image,
        } => {
            let deck_id = store.deck_id(&deck)?;
            let card = Card {
                front,
                back,
                notes,
                image_path: image,
            };
            let id = store.add_card(deck_id, &card)?;
            println!("Added card {id} to '{deck}'");
        }
        CardCommand::List { deck } => {
            for (id, card) in store.cards_in_deck(store.deck_id(&deck)?)? {
                println!("{id}: {} — {}", card.front, card.back);
            }
        }
        CardCommand::Delete { id } => {
            store.delete_card(id)?;
            println!("Deleted card {id}");
        }
    }
    Ok(())
}

fn run_study(store: &CardStore, deck_name: &str) -> Result<(), Box<dyn Error>> {
    let deck_id = store.deck_id(deck_name)?;
    let today = Utc::now().date_naive();
    let due = store.due_cards(deck_id, today)?;
    if due.is_empty() {
        println!("No cards due in '{deck_name}' today.");
        return Ok(());
    }

    let mut session = StudySession::new(deck_name.to_string(), due, store);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", session.round_summary());
    while !session.is_complete() {
        let Some((_, card)) = session.current_card() else {
            break;
        };
        let front = card.front.clone();
        let back = card.back.clone();
        let notes = card.notes.clone();

        println!("\nFront: {front}");
        print!("[Enter = reveal, q = quit] ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        if line?.trim().eq_ignore_ascii_case("q") {
            break;
        }

        session.toggle_back();
        if session.show_back {
            println!("Back:  {back}");
            if !notes.is_empty() {
                println!("Notes: {notes}");
            }
        }

        let quality = loop {
            print!("Grade [1=Again 2=Hard 3=Good 4=Easy, q=quit]: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if line.trim().eq_ignore_ascii_case("q") {
                return Ok(());
            }
            match Quality::parse(&line) {
                Some(quality) => break quality,
                None => println!("Unrecognized grade '{}'", line.trim()),
            }
        };

        let round_before = session.round_number;
        if let Some(next) = session.grade_current(quality, today)? {
            println!("Next review in {} day(s).", next.interval_days);
        }
        session.advance();
        if !session.is_complete() && session.round_number != round_before {
            println!("\n{}", session.round_summary());
        }
    }

    println!("\nSession complete.");
    Ok(())
}
