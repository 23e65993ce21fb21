// src/app/ui.rs
use std::io::{self, Write};

use tracing::warn;

use super::data::{Decade, Movie};
use super::facets::FacetEntry;
use super::labels::format_labels;
use super::types::FacetKind;

/// What the presenter pushes out. Facet options arrive as structured
/// entries; formatting them into labels is the view's business.
pub trait CatalogView {
    fn show_results(&mut self, movies: &[&Movie], match_count: usize);
    fn show_load_error(&mut self);
    fn show_genre_facets(&mut self, options: &[FacetEntry<String>], selected: &[FacetEntry<String>]);
    fn show_decade_facets(&mut self, options: &[FacetEntry<Decade>], selected: &[FacetEntry<Decade>]);
}

/// Plain-text view over any writer (stdout for the binary).
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_facets(&mut self, kind: FacetKind, options: Vec<String>, selected: Vec<String>) {
        if let Err(err) = self.try_write_facets(kind, &options, &selected) {
            warn!("Failed to write {} facets: {err}", kind.as_str());
        }
    }

    fn try_write_facets(&mut self, kind: FacetKind, options: &[String], selected: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}:", kind.heading())?;
        for label in options {
            let mark = if selected.contains(label) { 'x' } else { ' ' };
            writeln!(self.out, "  [{mark}] {label}")?;
        }
        Ok(())
    }

    fn try_write_results(&mut self, movies: &[&Movie], match_count: usize) -> io::Result<()> {
        writeln!(self.out, "{match_count} movies")?;
        for m in movies {
            let year = m
                .year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "----".into());
            let genres: Vec<&str> = m.genre_names().collect();
            let genres = if genres.is_empty() {
                "-".to_string()
            } else {
                genres.join(", ")
            };
            writeln!(self.out, "  {year}  {}  [{genres}]", m.title_or_blank())?;
        }
        Ok(())
    }
}

impl<W: Write> CatalogView for ConsoleView<W> {
    fn show_results(&mut self, movies: &[&Movie], match_count: usize) {
        if let Err(err) = self.try_write_results(movies, match_count) {
            warn!("Failed to write results: {err}");
        }
    }

    fn show_load_error(&mut self) {
        if let Err(err) = writeln!(self.out, "Could not load the movie catalog.") {
            warn!("Failed to write load error: {err}");
        }
    }

    fn show_genre_facets(&mut self, options: &[FacetEntry<String>], selected: &[FacetEntry<String>]) {
        self.write_facets(FacetKind::Genre, format_labels(options), format_labels(selected));
    }

    fn show_decade_facets(&mut self, options: &[FacetEntry<Decade>], selected: &[FacetEntry<Decade>]) {
        self.write_facets(FacetKind::Decade, format_labels(options), format_labels(selected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Genre;

    #[test]
    fn renders_results_and_facets() {
        let mut view = ConsoleView::new(Vec::new());
        let m = Movie::new(1, "Heat")
            .with_genres(vec![Genre::named(80, "Crime")])
            .with_release_date("1995-12-15");
        view.show_results(&[&m], 1);
        let opts = vec![
            FacetEntry {
                value: "Crime".to_string(),
                count: 1,
            },
            FacetEntry {
                value: "NA".to_string(),
                count: 0,
            },
        ];
        view.show_genre_facets(&opts, &opts[..1]);
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("1 movies"));
        assert!(text.contains("1995  Heat  [Crime]"));
        assert!(text.contains("[x] Crime (1)"));
        assert!(text.contains("[ ] NA (0)"));
    }
}
