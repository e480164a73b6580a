//! Catalog persistence split across logical submodules.

mod catalog;
mod csv_file;
mod tally;

pub use catalog::Catalog;
pub use csv_file::CsvStorage;
pub use tally::{count_by_genre, count_by_year, Tally};

use crate::error::Result;
use crate::models::Book;

/// Where a [`Catalog`] reads its records from and writes them back to.
///
/// `save` always receives the complete catalog and must replace whatever was
/// stored before; there is no incremental write.
pub trait CatalogStorage {
    /// Return every stored record in stored order. A store that has never been
    /// written yields an empty list.
    fn load(&self) -> Result<Vec<Book>>;

    /// Overwrite the stored records with `books`.
    fn save(&self, books: &[Book]) -> Result<()>;
}
