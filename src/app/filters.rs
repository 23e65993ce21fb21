use std::collections::BTreeSet;

use super::data::{Decade, Movie, NA_GENRE};
use super::types::FacetKind;

/// Bare facet values currently chosen. An empty set means "no filter" for
/// that facet type, unless the facet is listed in `unmatched`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub genres: BTreeSet<String>,
    pub decades: BTreeSet<Decade>,
    /// Facets submitted with labels that named no value of that facet.
    /// Such a facet is active and matches nothing.
    pub unmatched: BTreeSet<FacetKind>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.decades.is_empty() && self.unmatched.is_empty()
    }

    pub fn genres_only(&self) -> Self {
        Self {
            genres: self.genres.clone(),
            decades: BTreeSet::new(),
            unmatched: self.unmatched.iter().copied().filter(|&k| k == FacetKind::Genre).collect(),
        }
    }

    pub fn decades_only(&self) -> Self {
        Self {
            genres: BTreeSet::new(),
            decades: self.decades.clone(),
            unmatched: self.unmatched.iter().copied().filter(|&k| k == FacetKind::Decade).collect(),
        }
    }
}

/// OR across the movie's genres; genre-less movies match only via `NA`.
pub fn matches_genres(movie: &Movie, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    if movie.has_no_genre() {
        return selected.contains(NA_GENRE);
    }
    movie.genre_names().any(|g| selected.contains(g))
}

/// Movies without a parsable year never match an active decade filter.
pub fn matches_decades(movie: &Movie, selected: &BTreeSet<Decade>) -> bool {
    if selected.is_empty() {
        return true;
    }
    movie.decade().is_some_and(|d| selected.contains(&d))
}

pub fn matches(movie: &Movie, selection: &Selection) -> bool {
    selection.unmatched.is_empty()
        && matches_genres(movie, &selection.genres)
        && matches_decades(movie, &selection.decades)
}

/// Catalog positions passing both facet predicates, in catalog order.
pub fn filtered_indices(films: &[Movie], selection: &Selection) -> Vec<usize> {
    films
        .iter()
        .enumerate()
        .filter(|(_, m)| matches(m, selection))
        .map(|(i, _)| i)
        .collect()
}

pub fn filtered<'a>(films: &'a [Movie], selection: &Selection) -> Vec<&'a Movie> {
    filtered_indices(films, selection)
        .into_iter()
        .map(|i| &films[i])
        .collect()
}

/// Scope for the genre dialog: the catalog narrowed by the decades only.
pub fn genre_dialog_scope<'a>(films: &'a [Movie], selection: &Selection) -> Vec<&'a Movie> {
    filtered(films, &selection.decades_only())
}

/// Scope for the decade dialog: the catalog narrowed by the genres only.
pub fn decade_dialog_scope<'a>(films: &'a [Movie], selection: &Selection) -> Vec<&'a Movie> {
    filtered(films, &selection.genres_only())
}
