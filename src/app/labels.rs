// src/app/labels.rs
use std::collections::BTreeSet;
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::data::Decade;
use super::facets::{FacetCounts, FacetEntry};

static COUNT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d+\)$").expect("count suffix regex is valid"));

/// A facet value that can travel through a display label.
pub trait FacetKey: Clone + Ord + Display {
    /// Parse a bare value (count suffix already removed).
    fn parse_bare(s: &str) -> Option<Self>;
}

impl FacetKey for String {
    fn parse_bare(s: &str) -> Option<Self> {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    }
}

impl FacetKey for Decade {
    fn parse_bare(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

/// `"Action (6)"`, `"2020's (6)"`.
pub fn format_label<K: Display>(entry: &FacetEntry<K>) -> String {
    format!("{} ({})", entry.value, entry.count)
}

pub fn format_labels<K: Display>(entries: &[FacetEntry<K>]) -> Vec<String> {
    entries.iter().map(format_label).collect()
}

/// Drop a trailing `" (<digits>)"`; labels without one pass through trimmed.
pub fn strip_count(label: &str) -> &str {
    let label = label.trim();
    match COUNT_SUFFIX.find(label) {
        Some(m) => label[..m.start()].trim(),
        None => label,
    }
}

pub fn parse_label<K: FacetKey>(label: &str) -> Option<K> {
    K::parse_bare(strip_count(label))
}

/// Bare values of the selected labels. Labels that are not a `K` are dropped.
pub fn decode_labels<K, S>(labels: &[S]) -> BTreeSet<K>
where
    K: FacetKey,
    S: AsRef<str>,
{
    labels
        .iter()
        .filter_map(|l| {
            let parsed = parse_label::<K>(l.as_ref());
            if parsed.is_none() {
                debug!("ignoring unparsable facet label {:?}", l.as_ref());
            }
            parsed
        })
        .collect()
}

/// Re-attach fresh counts to a stored selection. Values missing from
/// `counts` are silently discarded.
pub fn reconcile<K: FacetKey>(selected: &BTreeSet<K>, counts: &FacetCounts<K>) -> Vec<FacetEntry<K>> {
    selected
        .iter()
        .filter_map(|value| match counts.get(value) {
            Some(count) => Some(FacetEntry {
                value: value.clone(),
                count,
            }),
            None => {
                debug!("dropping stale selection {value}");
                None
            }
        })
        .collect()
}

/// String form of [`reconcile`].
pub fn reconcile_labels<K, S>(labels: &[S], counts: &FacetCounts<K>) -> Vec<String>
where
    K: FacetKey,
    S: AsRef<str>,
{
    format_labels(&reconcile(&decode_labels::<K, S>(labels), counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::{Genre, Movie};
    use crate::app::facets::{count_decades, count_genres, FIRST_DECADE};

    fn catalog() -> Vec<Movie> {
        vec![
            Movie::new(1, "a")
                .with_genres(vec![Genre::named(28, "Action")])
                .with_release_date("2022"),
            Movie::new(2, "b")
                .with_genres(vec![Genre::named(28, "Action"), Genre::named(12, "Adventure")])
                .with_release_date("1995"),
            Movie::new(3, "c").with_release_date("2021"),
        ]
    }

    #[test]
    fn strips_genre_and_decade_suffixes() {
        assert_eq!(strip_count("Action (6)"), "Action");
        assert_eq!(strip_count("Science Fiction  (12)"), "Science Fiction");
        assert_eq!(strip_count("2020's (3)"), "2020's");
        assert_eq!(strip_count("Action"), "Action");
        assert_eq!(strip_count("Movie (Part 2)"), "Movie (Part 2)");
    }

    #[test]
    fn decade_and_genre_labels_do_not_mix() {
        assert_eq!(parse_label::<Decade>("2020's (3)"), Some(Decade(2020)));
        assert_eq!(parse_label::<Decade>("Action (2)"), None);
        assert_eq!(parse_label::<Decade>("NA (2)"), None);
        assert_eq!(parse_label::<String>("2020's (3)").as_deref(), Some("2020's"));
    }

    #[test]
    fn formats_labels() {
        let entry = FacetEntry {
            value: Decade(2020),
            count: 6,
        };
        assert_eq!(format_label(&entry), "2020's (6)");
        let entry = FacetEntry {
            value: "Action".to_string(),
            count: 6,
        };
        assert_eq!(format_label(&entry), "Action (6)");
    }

    #[test]
    fn reconcile_refreshes_counts_and_drops_stale() {
        let movies = catalog();
        let counts = count_genres(&movies, &movies);
        let labels = vec!["Action (9)", "Western (4)", "NA (0)"];
        let out = reconcile_labels::<String, _>(&labels, &counts);
        assert_eq!(out, vec!["Action (2)".to_string(), "NA (1)".to_string()]);
    }

    #[test]
    fn reconcile_decades_uses_decade_form() {
        let movies = catalog();
        let counts = count_decades(&movies, FIRST_DECADE, Decade(2020));
        let out = reconcile_labels::<Decade, _>(&["2020's (7)", "1890's (1)", "Action (2)"], &counts);
        assert_eq!(out, vec!["2020's (2)".to_string()]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let movies = catalog();
        let counts = count_genres(&movies, &movies);
        let once = reconcile_labels::<String, _>(&["Adventure (0)", "Action"], &counts);
        let twice = reconcile_labels::<String, _>(&once, &counts);
        assert_eq!(once, twice);
    }

    #[test]
    fn decode_accepts_bare_and_counted_labels() {
        let set = decode_labels::<String, _>(&["Action (2)", "Action", " Comedy "]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Comedy"));
    }
}
