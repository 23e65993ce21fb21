// src/app/data.rs
use std::num::ParseIntError;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Pseudo-genre for movies without any named genre.
pub const NA_GENRE: &str = "NA";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Genre {
    pub fn named(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }

    /// Name as given, `None` when absent or blank. Names are join keys, so
    /// `" Action"` and `"Action"` are different genres.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// One catalog record (TMDB field names).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: i64,
    #[serde(default, rename = "original_title")]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "runtime_or_unknown")]
    pub runtime: i32,
    #[serde(default = "unknown_vote_average", deserialize_with = "vote_average_or_unknown")]
    pub vote_average: f64,
    #[serde(default = "unknown_vote_count", deserialize_with = "vote_count_or_unknown")]
    pub vote_count: i32,
    #[serde(default)]
    pub poster_path: Option<String>,
}

const fn unknown_vote_average() -> f64 {
    -1.0
}

const fn unknown_vote_count() -> i32 {
    -1
}

// TMDB sends `null` for numbers it does not know.
fn runtime_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(d)?.unwrap_or(0))
}

fn vote_average_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or_else(unknown_vote_average))
}

fn vote_count_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(d)?.unwrap_or_else(unknown_vote_count))
}

impl Movie {
    pub fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: Some(title.to_string()),
            vote_average: unknown_vote_average(),
            vote_count: unknown_vote_count(),
            ..Default::default()
        }
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }

    pub fn with_release_date(mut self, date: &str) -> Self {
        self.release_date = Some(date.to_string());
        self
    }

    pub fn title_or_blank(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Named genres in catalog order; nameless entries are skipped.
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().flatten().filter_map(Genre::label)
    }

    /// Member of the `NA` bucket.
    pub fn has_no_genre(&self) -> bool {
        self.genre_names().next().is_none()
    }

    pub fn year(&self) -> Option<i32> {
        crate::app::utils::leading_year(self.release_date.as_deref()?)
    }

    pub fn decade(&self) -> Option<Decade> {
        self.year().map(Decade::of_year)
    }
}

/// Decade keyed by its starting year; shown as `2020's`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decade(pub i32);

impl Decade {
    pub const fn of_year(year: i32) -> Self {
        Self((year / 10) * 10)
    }

    pub const fn start_year(self) -> i32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 10)
    }
}

impl std::fmt::Display for Decade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'s", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDecadeError {
    #[error("not a decade: {0}")]
    Number(#[from] ParseIntError),
    #[error("{0} does not start a decade")]
    NotDecadeStart(i32),
}

impl std::str::FromStr for Decade {
    type Err = ParseDecadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_suffix("'s").unwrap_or(s);
        let year = digits.trim().parse::<i32>()?;
        if year % 10 != 0 {
            return Err(ParseDecadeError::NotDecadeStart(year));
        }
        Ok(Self(year))
    }
}
