// src/app/facets.rs
use std::collections::BTreeMap;

use chrono::Datelike;
use itertools::Itertools;

use super::data::{Decade, Movie, NA_GENRE};

pub const FIRST_DECADE: Decade = Decade(1900);

/// One facet option with its population in the considered scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FacetEntry<K> {
    pub value: K,
    pub count: usize,
}

/// Facet value -> number of movies carrying it. Every value of the universe
/// is present, zero counts included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetCounts<K: Ord>(BTreeMap<K, usize>);

impl<K: Ord + Clone> FacetCounts<K> {
    fn with_keys(keys: impl IntoIterator<Item = K>) -> Self {
        Self(keys.into_iter().map(|k| (k, 0)).collect())
    }

    /// Increment an existing bucket; unknown values are ignored.
    fn bump(&mut self, key: &K) {
        if let Some(n) = self.0.get_mut(key) {
            *n += 1;
        }
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all buckets (multi-genre movies count once per genre).
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.0.iter().map(|(k, n)| (k, *n))
    }

    /// Entries in key order.
    pub fn entries(&self) -> Vec<FacetEntry<K>> {
        self.iter()
            .map(|(k, n)| FacetEntry {
                value: k.clone(),
                count: n,
            })
            .collect()
    }
}

impl FacetCounts<String> {
    /// Dialog order: most populated first, then by name.
    pub fn ranked_entries(&self) -> Vec<FacetEntry<String>> {
        self.entries()
            .into_iter()
            .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)))
            .collect()
    }
}

/// Genre populations of `scope`, keyed by every genre name found in `universe`
/// plus `NA`.
pub fn count_genres<'a, U, S>(universe: U, scope: S) -> FacetCounts<String>
where
    U: IntoIterator<Item = &'a Movie>,
    S: IntoIterator<Item = &'a Movie>,
{
    let keys = universe
        .into_iter()
        .flat_map(|m| m.genre_names())
        .map(str::to_string)
        .chain(std::iter::once(NA_GENRE.to_string()));
    let mut counts = FacetCounts::with_keys(keys);

    for movie in scope {
        if movie.has_no_genre() {
            counts.bump(&NA_GENRE.to_string());
            continue;
        }
        for name in movie.genre_names() {
            counts.bump(&name.to_string());
        }
    }
    counts
}

/// Decade populations of `scope`, one bucket per decade in `first..=last`.
/// Movies without a parsable year, or outside the range, count nowhere.
pub fn count_decades<'a, S>(scope: S, first: Decade, last: Decade) -> FacetCounts<Decade>
where
    S: IntoIterator<Item = &'a Movie>,
{
    let keys = std::iter::successors(Some(first), |d| Some(d.next())).take_while(|d| *d <= last);
    let mut counts = FacetCounts::with_keys(keys);
    for decade in scope.into_iter().filter_map(Movie::decade) {
        counts.bump(&decade);
    }
    counts
}

pub fn current_decade() -> Decade {
    Decade::of_year(chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Genre;

    fn movie(id: i64, genres: &[&str], date: Option<&str>) -> Movie {
        let mut m = Movie::new(id, &format!("Movie {id}"));
        if !genres.is_empty() {
            m = m.with_genres(
                genres
                    .iter()
                    .enumerate()
                    .map(|(i, g)| Genre::named(i as i64, g))
                    .collect(),
            );
        }
        m.release_date = date.map(str::to_string);
        m
    }

    #[test]
    fn genre_counts_include_na_bucket() {
        let catalog = vec![
            movie(1, &["Action"], None),
            movie(2, &["Action"], None),
            movie(3, &["Comedy"], None),
            movie(4, &[], None),
            movie(5, &[], None),
        ];
        let counts = count_genres(&catalog, &catalog);
        assert_eq!(counts.get(&"Action".to_string()), Some(2));
        assert_eq!(counts.get(&"Comedy".to_string()), Some(1));
        assert_eq!(counts.get(&NA_GENRE.to_string()), Some(2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn multi_genre_movies_count_in_every_bucket() {
        let catalog = vec![movie(1, &["Action", "Adventure"], None), movie(2, &[], None)];
        let counts = count_genres(&catalog, &catalog);
        assert_eq!(counts.get(&"Action".to_string()), Some(1));
        assert_eq!(counts.get(&"Adventure".to_string()), Some(1));
        assert!(counts.total() >= catalog.len());
    }

    #[test]
    fn universe_values_stay_with_zero_count() {
        let catalog = vec![movie(1, &["Action"], None), movie(2, &["Drama"], None)];
        let counts = count_genres(&catalog, &catalog[..1]);
        assert_eq!(counts.get(&"Drama".to_string()), Some(0));
        assert_eq!(counts.get(&NA_GENRE.to_string()), Some(0));
    }

    #[test]
    fn ranked_entries_order_by_count_then_name() {
        let catalog = vec![
            movie(1, &["Drama"], None),
            movie(2, &["Action", "Drama"], None),
            movie(3, &["Comedy"], None),
        ];
        let ranked = count_genres(&catalog, &catalog).ranked_entries();
        let order: Vec<&str> = ranked.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(order, vec!["Drama", "Action", "Comedy", "NA"]);
    }

    #[test]
    fn decade_counts_skip_malformed_years() {
        let catalog = vec![
            movie(1, &[], Some("2022")),
            movie(2, &[], Some("1995")),
            movie(3, &[], Some("2021")),
            movie(4, &[], None),
            movie(5, &[], Some("")),
        ];
        let counts = count_decades(&catalog, FIRST_DECADE, Decade(2020));
        assert_eq!(counts.get(&Decade(2020)), Some(2));
        assert_eq!(counts.get(&Decade(1990)), Some(1));
        assert_eq!(counts.get(&Decade(1900)), Some(0));
        assert_eq!(counts.len(), 13);
        assert!(counts.total() <= catalog.len());
    }

    #[test]
    fn decades_outside_range_are_not_counted() {
        let catalog = vec![movie(1, &[], Some("1895")), movie(2, &[], Some("2150"))];
        let counts = count_decades(&catalog, FIRST_DECADE, Decade(2020));
        assert_eq!(counts.total(), 0);
        assert!(!counts.contains(&Decade(1890)));
    }

    #[test]
    fn empty_catalog_counts_are_zero() {
        let catalog: Vec<Movie> = Vec::new();
        let genres = count_genres(&catalog, &catalog);
        assert_eq!(genres.get(&NA_GENRE.to_string()), Some(0));
        assert_eq!(count_decades(&catalog, FIRST_DECADE, current_decade()).total(), 0);
    }

    #[test]
    fn counting_is_deterministic() {
        let catalog = vec![movie(1, &["B", "A"], Some("2001")), movie(2, &["A"], Some("1980"))];
        assert_eq!(count_genres(&catalog, &catalog), count_genres(&catalog, &catalog));
        assert_eq!(
            count_decades(&catalog, FIRST_DECADE, Decade(2020)),
            count_decades(&catalog, FIRST_DECADE, Decade(2020))
        );
    }
}
