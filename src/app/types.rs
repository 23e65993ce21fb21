// src/app/types.rs
use super::catalog::CatalogError;
use super::data::Movie;

// ---- cross-thread messages ----
pub enum CatalogMsg {
    Info(String),
    Done(Vec<Movie>),
    Error(CatalogError),
}

// ---- facet kinds ----
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetKind {
    Genre,
    Decade,
}

impl FacetKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Decade => "decade",
        }
    }
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Genre => "Genres",
            Self::Decade => "Decades",
        }
    }
}

