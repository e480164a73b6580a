//! Core library surface for the Book Catalog Manager TUI application.
//!
//! The store can be used on its own; the `ui` module layers the terminal
//! front-end on top of it.
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

pub use config::{Args, Config};
pub use error::{CatalogError, Result};
pub use models::Book;
pub use store::{count_by_genre, count_by_year, Catalog, CatalogStorage, CsvStorage, Tally};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
