use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::data::{Movie, NA_GENRE};
use super::facets::{count_genres, FacetCounts};

/// Highest count among the movie's selected genres.
pub fn movie_rank(movie: &Movie, selected: &BTreeSet<String>, counts: &FacetCounts<String>) -> usize {
    let count_of = |name: &str| counts.get(&name.to_string()).unwrap_or(0);
    if movie.has_no_genre() {
        return if selected.contains(NA_GENRE) {
            count_of(NA_GENRE)
        } else {
            0
        };
    }
    movie
        .genre_names()
        .filter(|g| selected.contains(*g))
        .map(count_of)
        .max()
        .unwrap_or(0)
}

/// Order filtered catalog positions by genre popularity, descending.
///
/// Popularity is counted over the filtered movies themselves. Equal ranks
/// keep catalog order, so `indices` must come in catalog order (as
/// `filtered_indices` produces them). With no genre selected the input order
/// is returned unchanged. Positions outside `films` are dropped.
pub fn rank_sort(films: &[Movie], indices: &[usize], selected: &BTreeSet<String>) -> Vec<usize> {
    let mut out: Vec<usize> = indices.iter().copied().filter(|&i| i < films.len()).collect();
    if selected.is_empty() {
        return out;
    }
    let scope: Vec<&Movie> = out.iter().filter_map(|&i| films.get(i)).collect();
    let counts = count_genres(scope.iter().copied(), scope.iter().copied());
    // sort_by_cached_key is stable
    out.sort_by_cached_key(|&i| {
        Reverse(films.get(i).map_or(0, |m| movie_rank(m, selected, &counts)))
    });
    out
}
