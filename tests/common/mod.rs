//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use book_catalog_manager::{Book, CatalogStorage, Result};

/// Catalog storage kept in memory, counting how often it was written.
#[derive(Default)]
pub struct MemoryStorage {
    rows: RefCell<Option<Vec<Book>>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            rows: RefCell::new(Some(books)),
            saves: Cell::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    /// What a fresh `load` would return right now.
    pub fn stored(&self) -> Vec<Book> {
        self.rows.borrow().clone().unwrap_or_default()
    }
}

impl CatalogStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Book>> {
        Ok(self.stored())
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        *self.rows.borrow_mut() = Some(books.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

pub fn book(title: &str, year: i32, genre: &str) -> Book {
    Book::new(title, "Anonymous", year, genre, 1)
}
