//! Ratatui front-end: a table of the catalog, add/delete forms, and chart
//! overlays. Key presses go through the binding table in `commands`; every
//! change to the catalog is delegated to [`crate::store::Catalog`].

mod app;
mod charts;
mod commands;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
