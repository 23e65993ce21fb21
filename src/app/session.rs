// src/app/session.rs
use std::collections::BTreeSet;

use super::data::{Decade, Movie};
use super::filters::{filtered_indices, Selection};
use super::rank::rank_sort;
use super::types::FacetKind;

/// A whole-selection change, applied atomically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionUpdate {
    Genres(BTreeSet<String>),
    Decades(BTreeSet<Decade>),
    /// The facet was submitted, but none of its labels named a value.
    Unmatched(FacetKind),
    Clear,
}

/// Selection being edited in a dialog. Nothing reaches the session until
/// one of the `submit_*` calls turns it into a [`SelectionUpdate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingSelection<K: Ord> {
    values: BTreeSet<K>,
}

impl<K: Ord> PendingSelection<K> {
    pub fn new() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }

    pub fn from_current(values: impl IntoIterator<Item = K>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn toggle(mut self, value: K) -> Self {
        if !self.values.remove(&value) {
            self.values.insert(value);
        }
        self
    }

    pub fn set(mut self, value: K, checked: bool) -> Self {
        if checked {
            self.values.insert(value);
        } else {
            self.values.remove(&value);
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.values.clear();
        self
    }

    pub fn is_checked(&self, value: &K) -> bool {
        self.values.contains(value)
    }

    pub fn values(&self) -> &BTreeSet<K> {
        &self.values
    }
}

impl PendingSelection<String> {
    pub fn submit_genres(self) -> SelectionUpdate {
        SelectionUpdate::Genres(self.values)
    }
}

impl PendingSelection<Decade> {
    pub fn submit_decades(self) -> SelectionUpdate {
        SelectionUpdate::Decades(self.values)
    }
}

/// Selection plus the displayed result derived from it. Never patched:
/// every change builds a fresh value through [`SessionState::recompute`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    selection: Selection,
    displayed: Vec<usize>,
}

impl SessionState {
    /// Filter then rank `films` under `selection`.
    pub fn recompute(films: &[Movie], selection: Selection) -> Self {
        let indices = filtered_indices(films, &selection);
        let displayed = rank_sort(films, &indices, &selection.genres);
        Self {
            selection,
            displayed,
        }
    }

    pub fn unfiltered(films: &[Movie]) -> Self {
        Self::recompute(films, Selection::default())
    }

    /// State after `update`, leaving `self` untouched.
    pub fn with_update(&self, films: &[Movie], update: SelectionUpdate) -> Self {
        let mut selection = self.selection.clone();
        match update {
            SelectionUpdate::Genres(genres) => {
                selection.genres = genres;
                selection.unmatched.remove(&FacetKind::Genre);
            }
            SelectionUpdate::Decades(decades) => {
                selection.decades = decades;
                selection.unmatched.remove(&FacetKind::Decade);
            }
            SelectionUpdate::Unmatched(kind) => {
                match kind {
                    FacetKind::Genre => selection.genres.clear(),
                    FacetKind::Decade => selection.decades.clear(),
                }
                selection.unmatched.insert(kind);
            }
            SelectionUpdate::Clear => selection = Selection::default(),
        }
        Self::recompute(films, selection)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Catalog positions in display order.
    pub fn displayed(&self) -> &[usize] {
        &self.displayed
    }

    pub fn match_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn movies<'a>(&self, films: &'a [Movie]) -> Vec<&'a Movie> {
        self.displayed.iter().filter_map(|&i| films.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Genre;

    fn films() -> Vec<Movie> {
        vec![
            Movie::new(1, "a")
                .with_genres(vec![Genre::named(1, "Action")])
                .with_release_date("2022"),
            Movie::new(2, "b")
                .with_genres(vec![Genre::named(1, "Action")])
                .with_release_date("1995"),
            Movie::new(3, "c")
                .with_genres(vec![Genre::named(2, "Comedy")])
                .with_release_date("2021"),
        ]
    }

    #[test]
    fn pending_selection_toggles() {
        let pending = PendingSelection::new()
            .toggle("Action".to_string())
            .toggle("Comedy".to_string())
            .toggle("Action".to_string());
        assert!(!pending.is_checked(&"Action".to_string()));
        assert_eq!(
            pending.submit_genres(),
            SelectionUpdate::Genres(["Comedy".to_string()].into_iter().collect())
        );
    }

    #[test]
    fn updates_keep_the_other_facet() {
        let films = films();
        let s0 = SessionState::unfiltered(&films);
        let s1 = s0.with_update(
            &films,
            PendingSelection::new().set(Decade(2020), true).submit_decades(),
        );
        let s2 = s1.with_update(
            &films,
            PendingSelection::new().set("Action".to_string(), true).submit_genres(),
        );
        assert_eq!(s0.match_count(), 3);
        assert_eq!(s1.displayed(), &[0, 2]);
        assert_eq!(s2.displayed(), &[0]);
        assert_eq!(s2.selection().decades.len(), 1);
    }

    #[test]
    fn clear_restores_full_catalog() {
        let films = films();
        let filtered = SessionState::unfiltered(&films)
            .with_update(&films, SelectionUpdate::Genres(["Comedy".to_string()].into()))
            .with_update(&films, SelectionUpdate::Decades([Decade(1990)].into()));
        assert_eq!(filtered.match_count(), 0);
        let cleared = filtered.with_update(&films, SelectionUpdate::Clear);
        assert_eq!(cleared, SessionState::unfiltered(&films));
        assert_eq!(cleared.movies(&films).len(), films.len());
    }

    #[test]
    fn unmatched_facet_stays_active_until_resubmitted() {
        let films = films();
        let s1 = SessionState::unfiltered(&films)
            .with_update(&films, SelectionUpdate::Decades([Decade(2020)].into()))
            .with_update(&films, SelectionUpdate::Unmatched(FacetKind::Decade));
        assert!(s1.selection().decades.is_empty());
        assert_eq!(s1.match_count(), 0);

        let s2 = s1.with_update(&films, SelectionUpdate::Genres(["Action".to_string()].into()));
        assert_eq!(s2.match_count(), 0);

        let s3 = s2.with_update(&films, SelectionUpdate::Decades(BTreeSet::new()));
        assert_eq!(s3.displayed(), &[0, 1]);
        assert!(s3.selection().unmatched.is_empty());
    }
}
