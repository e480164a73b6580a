use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::models::{Book, BOOK_FIELDS};

use super::CatalogStorage;

/// Catalog stored as a CSV file with a `title,author,year,genre,copies`
/// header row.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the catalog is written to before it replaces `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write the header and every row to `staging`.
    fn write_staging(&self, staging: &Path, books: &[Book]) -> Result<()> {
        // Headers are written by hand so an empty catalog still gets one.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(staging)
            .map_err(|err| self.write_error(err))?;
        writer
            .write_record(BOOK_FIELDS)
            .map_err(|err| self.write_error(err))?;
        for book in books {
            writer.serialize(book).map_err(|err| self.write_error(err))?;
        }
        writer.flush().map_err(|err| CatalogError::io(staging, err))
    }

    fn read_error(&self, source: csv::Error) -> CatalogError {
        CatalogError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> CatalogError {
        CatalogError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogStorage for CsvStorage {
    fn load(&self) -> Result<Vec<Book>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(CatalogError::io(&self.path, err)),
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let books = reader
            .deserialize::<Book>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| self.read_error(err))?;

        debug!(path = %self.path.display(), records = books.len(), "read catalog file");
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| CatalogError::io(parent, err))?;
            }
        }

        let staging = self.staging_path();
        let written = self
            .write_staging(&staging, books)
            .and_then(|()| {
                fs::rename(&staging, &self.path).map_err(|err| CatalogError::io(&self.path, err))
            });
        if let Err(err) = written {
            match fs::remove_file(&staging) {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {}
                Err(cleanup) => {
                    warn!(path = %staging.display(), error = %cleanup, "could not remove staging file");
                }
            }
            return Err(err);
        }

        debug!(path = %self.path.display(), records = books.len(), "wrote catalog file");
        Ok(())
    }
}
