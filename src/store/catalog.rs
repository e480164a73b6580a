use tracing::info;

use crate::error::Result;
use crate::models::Book;

use super::tally::{count_by_genre, count_by_year, Tally};
use super::CatalogStorage;

/// In-memory list of books mirrored to a [`CatalogStorage`] after every
/// mutation. A failed write leaves the list as it was before the call.
pub struct Catalog<S> {
    storage: S,
    books: Vec<Book>,
}

impl<S: CatalogStorage> Catalog<S> {
    /// Load the stored books and wrap them with their storage.
    pub fn open(storage: S) -> Result<Self> {
        let books = storage.load()?;
        info!(records = books.len(), "catalog loaded");
        Ok(Self { storage, books })
    }

    /// Every book in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append `book` and persist the whole catalog. Year and copies arrive
    /// already typed; nothing else is checked.
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        self.books.push(book);
        if let Err(err) = self.storage.save(&self.books) {
            self.books.pop();
            return Err(err);
        }

        if let Some(added) = self.books.last() {
            info!(book = %added, records = self.books.len(), "book added");
        }
        Ok(())
    }

    /// Remove every book whose title equals `title` exactly and persist the
    /// result, returning how many were removed. Persists even when nothing
    /// matched.
    pub fn delete_book(&mut self, title: &str) -> Result<usize> {
        let kept: Vec<Book> = self
            .books
            .iter()
            .filter(|book| book.title != title)
            .cloned()
            .collect();
        let removed = self.books.len() - kept.len();

        self.storage.save(&kept)?;
        self.books = kept;

        info!(title, removed, records = self.books.len(), "delete by title");
        Ok(removed)
    }

    pub fn genre_counts(&self) -> Tally<String> {
        count_by_genre(&self.books)
    }

    pub fn year_counts(&self) -> Tally<i32> {
        count_by_year(&self.books)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;

    use super::*;
    use crate::error::CatalogError;

    /// Storage double that records every save and can be told to fail.
    #[derive(Default)]
    struct RecordingStorage {
        saved: RefCell<Vec<Vec<Book>>>,
        fail_saves: Cell<bool>,
    }

    impl CatalogStorage for RecordingStorage {
        fn load(&self) -> Result<Vec<Book>> {
            Ok(self.saved.borrow().last().cloned().unwrap_or_default())
        }

        fn save(&self, books: &[Book]) -> Result<()> {
            if self.fail_saves.get() {
                return Err(CatalogError::Io {
                    path: "memory".into(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.saved.borrow_mut().push(books.to_vec());
            Ok(())
        }
    }

    fn dune() -> Book {
        Book::new("Dune", "Herbert", 1965, "Sci-Fi", 3)
    }

    #[test]
    fn every_add_is_saved() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();

        catalog.add_book(dune()).unwrap();
        catalog
            .add_book(Book::new("Emma", "Austen", 1815, "Romance", 1))
            .unwrap();

        let saved = catalog.storage().saved.borrow();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], vec![dune()]);
        assert_eq!(saved[1].as_slice(), catalog.books());
    }

    #[test]
    fn delete_without_match_still_saves() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();
        catalog.add_book(dune()).unwrap();

        let removed = catalog.delete_book("Missing").unwrap();

        assert_eq!(removed, 0);
        assert_eq!(catalog.books(), &[dune()]);
        assert_eq!(catalog.storage().saved.borrow().len(), 2);
    }

    #[test]
    fn delete_is_exact_match() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();
        catalog.add_book(dune()).unwrap();

        assert_eq!(catalog.delete_book("dune").unwrap(), 0);
        assert_eq!(catalog.delete_book("Dune ").unwrap(), 0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn failed_add_leaves_catalog_unchanged() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();
        catalog.add_book(dune()).unwrap();
        catalog.storage().fail_saves.set(true);

        let err = catalog
            .add_book(Book::new("Emma", "Austen", 1815, "Romance", 1))
            .unwrap_err();

        assert!(matches!(err, CatalogError::Io { .. }));
        assert_eq!(catalog.books(), &[dune()]);
    }

    #[test]
    fn failed_delete_leaves_catalog_unchanged() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();
        catalog.add_book(dune()).unwrap();
        catalog.storage().fail_saves.set(true);

        assert!(catalog.delete_book("Dune").is_err());
        assert_eq!(catalog.books(), &[dune()]);
    }

    #[test]
    fn counts_follow_current_books() {
        let mut catalog = Catalog::open(RecordingStorage::default()).unwrap();
        catalog.add_book(dune()).unwrap();
        catalog
            .add_book(Book::new("Children of Dune", "Herbert", 1976, "Sci-Fi", 1))
            .unwrap();

        assert_eq!(catalog.genre_counts().get(&"Sci-Fi".to_string()), 2);
        assert_eq!(catalog.year_counts().len(), 2);
    }
}
