// src/app/catalog.rs
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::{fs, io};

use serde::Deserialize;
use tracing::info;

use super::data::Movie;
use super::types::CatalogMsg;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("catalog loader stopped before delivering a result")]
    Disconnected,
}

/// Supplies the full movie list. `request_catalog` runs `fetch` off the
/// caller's thread and reports through the channel exactly once.
pub trait CatalogSource: Send + 'static {
    fn fetch(&self) -> Result<Vec<Movie>, CatalogError>;

    fn describe(&self) -> String {
        "catalog".into()
    }

    fn request_catalog(self: Box<Self>, tx: Sender<CatalogMsg>) {
        std::thread::spawn(move || {
            let _ = tx.send(CatalogMsg::Info(format!("Loading {}", self.describe())));
            let msg = match self.fetch() {
                Ok(movies) => CatalogMsg::Done(movies),
                Err(err) => CatalogMsg::Error(err),
            };
            let _ = tx.send(msg);
        });
    }
}

/// A JSON file holding either an array of movies or a TMDB-style page
/// (`{"results": [...]}`).
pub struct JsonCatalog {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Movie>),
    Page { results: Vec<Movie> },
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalog {
    fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let parsed: CatalogFile =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let movies = match parsed {
            CatalogFile::List(v) => v,
            CatalogFile::Page { results } => results,
        };
        info!("Read {} movies from {}", movies.len(), self.path.display());
        Ok(movies)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory catalog, handy for hosts that already hold the list.
pub struct StaticCatalog(pub Vec<Movie>);

impl CatalogSource for StaticCatalog {
    fn fetch(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} movies)", self.0.len())
    }
}
