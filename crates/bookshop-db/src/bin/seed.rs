//! # Seed Data Generator
//!
//! Fills an empty catalog with a starter set of books.
//!
//! ## Usage
//! ```bash
//! # Seed ./bookshop_dev.db
//! cargo run -p bookshop-db --bin seed
//!
//! # Specify database path
//! cargo run -p bookshop-db --bin seed -- --db ./data/bookshop.db
//! ```
//!
//! Every book gets a description; some get a review so the
//! "No review available." fallback shows up too.

use std::env;

use bookshop_core::{Book, CatalogStore, Money};
use bookshop_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (category, name, price in cents, stock, review)
const BOOKS: &[(&str, &str, i64, i64, Option<&str>)] = &[
    ("Programming", "Clean Code", 4000, 5, Some("Changes how you name things.")),
    ("Programming", "The Pragmatic Programmer", 4500, 3, Some("Short chapters, lasting habits.")),
    ("Programming", "The Rust Programming Language", 3999, 8, None),
    ("Programming", "Refactoring", 4799, 2, None),
    ("Algorithms", "Introduction to Algorithms", 9500, 4, Some("Dense, complete, worth it.")),
    ("Algorithms", "The Algorithm Design Manual", 6000, 2, None),
    ("Algorithms", "Algorithms Unlocked", 2500, 0, None),
    ("Data Structures", "Purely Functional Data Structures", 5200, 3, Some("Persistence made practical.")),
    ("Data Structures", "Open Data Structures", 1999, 6, None),
    ("Artificial Intelligence", "Artificial Intelligence: A Modern Approach", 12000, 2, Some("The standard survey.")),
    ("Artificial Intelligence", "Deep Learning", 7200, 1, None),
    ("Operating Systems", "Operating System Concepts", 8999, 5, None),
    ("Operating Systems", "Operating Systems: Three Easy Pieces", 3000, 7, Some("Clear and free to read online.")),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./bookshop_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookshop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bookshop_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding catalog");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let catalog = db.catalog();

    let existing = catalog.count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has books, skipping seed");
        return Ok(());
    }

    let mut inserted = 0;
    for (category, name, cents, stock, review) in BOOKS {
        let mut book = Book::new(*name, Money::from_cents(*cents), *category, *stock)
            .with_description(format!("{name}, from our {category} shelf."));
        if let Some(review) = review {
            book = book.with_review(*review);
        }

        if let Err(e) = catalog.insert(&book).await {
            warn!(name = %name, error = %e, "Failed to insert book");
            continue;
        }
        inserted += 1;
    }

    info!(inserted, "Books inserted");

    let found = catalog.search("algorithm").await?;
    info!(count = found.len(), "Search 'algorithm'");
    info!(categories = ?catalog.categories().await?, "Categories");

    db.close().await;
    Ok(())
}
