//! Domain model shared by the catalog store and the TUI. `Book` stays a plain
//! data holder so persistence and presentation can each decide how to show or
//! store it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names of the catalog file, in the order fields are written.
pub const BOOK_FIELDS: [&str; 5] = ["title", "author", "year", "genre", "copies"];

/// One catalog entry. Field declaration order matches [`BOOK_FIELDS`], which
/// is also the order serde emits them in when a row is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifies the book for deletion. Not unique: duplicates are allowed.
    pub title: String,
    pub author: String,
    /// Publication year. Stored, displayed and tallied as the same integer.
    pub year: i32,
    pub genre: String,
    /// Number of copies on the shelf.
    pub copies: u32,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        copies: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            copies,
        }
    }

    /// Cell values in column order, ready for a table row.
    pub fn cells(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.author.clone(),
            self.year.to_string(),
            self.genre.clone(),
            self.copies.to_string(),
        ]
    }
}

impl fmt::Display for Book {
    /// `Title (Author, Year)`, omitting the author when blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.author.trim().is_empty() {
            write!(f, "{} ({})", self.title, self.year)
        } else {
            write!(f, "{} ({}, {})", self.title, self.author, self.year)
        }
    }
}
