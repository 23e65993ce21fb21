// src/app/mod.rs — catalog presenter: load once, then facet counts + filtered/ranked results
use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use tracing::{debug, error, info};

pub mod catalog;
pub mod data;
pub mod facets;
pub mod filters;
pub mod labels;
pub mod rank;
pub mod session;
pub mod types;
pub mod ui;
mod utils;

pub use catalog::{CatalogError, CatalogSource, JsonCatalog, StaticCatalog};
pub use data::{Decade, Genre, Movie, NA_GENRE};
pub use facets::{FacetCounts, FacetEntry};
pub use filters::Selection;
pub use session::{PendingSelection, SelectionUpdate, SessionState};
pub use types::{CatalogMsg, FacetKind};
pub use ui::{CatalogView, ConsoleView};

use facets::{count_decades, count_genres, current_decade, FIRST_DECADE};
use filters::{decade_dialog_scope, genre_dialog_scope};
use labels::{decode_labels, reconcile, FacetKey};

pub struct CatalogApp<V: CatalogView> {
    view: V,
    films: Option<Vec<Movie>>,
    state: SessionState,
    catalog_rx: Option<Receiver<CatalogMsg>>,
    load_failed: bool,
    first_decade: Decade,
    last_decade: Option<Decade>,
    status: String,
}

impl<V: CatalogView> CatalogApp<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            films: None,
            state: SessionState::default(),
            catalog_rx: None,
            load_failed: false,
            first_decade: FIRST_DECADE,
            last_decade: None,
            status: String::new(),
        }
    }

    /// Oldest decade offered in the decade dialog.
    pub fn with_first_decade(mut self, first: Decade) -> Self {
        self.first_decade = first;
        self
    }

    /// Pin the newest decade instead of following the clock.
    pub fn with_last_decade(mut self, last: Decade) -> Self {
        self.last_decade = Some(last);
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.films.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.catalog_rx.is_some()
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn catalog(&self) -> &[Movie] {
        self.films.as_deref().unwrap_or(&[])
    }

    /// Movies currently displayed, in display order.
    pub fn displayed_movies(&self) -> Vec<&Movie> {
        self.state.movies(self.catalog())
    }

    fn set_status<S: Into<String>>(&mut self, s: S) {
        self.status = s.into();
        debug!("status: {}", self.status);
    }

    // ---- catalog loading ----

    /// Kick off a non-blocking catalog load. Ignored if one already ran.
    pub fn start_load(&mut self, source: Box<dyn CatalogSource>) {
        if self.catalog_rx.is_some() || self.films.is_some() || self.load_failed {
            return;
        }
        let (tx, rx) = mpsc::channel::<CatalogMsg>();
        self.catalog_rx = Some(rx);
        self.set_status(format!("Loading {}", source.describe()));
        source.request_catalog(tx);
    }

    /// Drain loader messages without blocking. Returns true once the load
    /// has finished, successfully or not.
    pub fn poll_catalog(&mut self) -> bool {
        loop {
            let msg = {
                let Some(rx) = self.catalog_rx.as_ref() else {
                    return self.films.is_some() || self.load_failed;
                };
                match rx.try_recv() {
                    Ok(m) => m,
                    Err(TryRecvError::Empty) => return false,
                    Err(TryRecvError::Disconnected) => CatalogMsg::Error(CatalogError::Disconnected),
                }
            };
            if self.handle_catalog_msg(msg) {
                return true;
            }
        }
    }

    /// Block until the source reports. For hosts without an event loop.
    pub fn load_blocking(&mut self, source: Box<dyn CatalogSource>) {
        self.start_load(source);
        while let Some(rx) = self.catalog_rx.as_ref() {
            let msg = rx
                .recv()
                .unwrap_or_else(|_| CatalogMsg::Error(CatalogError::Disconnected));
            self.handle_catalog_msg(msg);
        }
    }

    fn handle_catalog_msg(&mut self, msg: CatalogMsg) -> bool {
        match msg {
            CatalogMsg::Info(s) => {
                self.set_status(s);
                false
            }
            CatalogMsg::Done(movies) => {
                self.catalog_rx = None;
                self.on_catalog_loaded(Ok(movies));
                true
            }
            CatalogMsg::Error(err) => {
                self.catalog_rx = None;
                self.on_catalog_loaded(Err(err));
                true
            }
        }
    }

    /// Outcome of the single per-session catalog request.
    pub fn on_catalog_loaded(&mut self, result: Result<Vec<Movie>, CatalogError>) {
        match result {
            Ok(movies) => {
                info!("Catalog loaded ({} movies)", movies.len());
                self.set_status(format!("Catalog loaded ({} movies)", movies.len()));
                self.state = SessionState::unfiltered(&movies);
                self.films = Some(movies);
                self.push_results();
            }
            Err(err) => {
                error!("Catalog load failed: {err}");
                self.set_status("Catalog load failed");
                self.load_failed = true;
                self.view.show_load_error();
            }
        }
    }

    // ---- facet dialogs ----

    fn decade_range(&self) -> (Decade, Decade) {
        (self.first_decade, self.last_decade.unwrap_or_else(current_decade))
    }

    /// Genre counts over the catalog narrowed by the selected decades.
    pub fn genre_counts(&self) -> FacetCounts<String> {
        let films = self.catalog();
        count_genres(films, genre_dialog_scope(films, self.state.selection()))
    }

    /// Decade counts over the catalog narrowed by the selected genres.
    pub fn decade_counts(&self) -> FacetCounts<Decade> {
        let films = self.catalog();
        let (first, last) = self.decade_range();
        count_decades(decade_dialog_scope(films, self.state.selection()), first, last)
    }

    pub fn on_genre_menu_clicked(&mut self) {
        if !self.is_loaded() {
            debug!("genre menu ignored: catalog not loaded");
            return;
        }
        let counts = self.genre_counts();
        let selected = reconcile(&self.state.selection().genres, &counts);
        self.drop_stale(SelectionUpdate::Genres(
            selected.iter().map(|e| e.value.clone()).collect(),
        ));
        self.view.show_genre_facets(&counts.ranked_entries(), &selected);
    }

    pub fn on_decade_menu_clicked(&mut self) {
        if !self.is_loaded() {
            debug!("decade menu ignored: catalog not loaded");
            return;
        }
        let counts = self.decade_counts();
        let selected = reconcile(&self.state.selection().decades, &counts);
        self.drop_stale(SelectionUpdate::Decades(
            selected.iter().map(|e| e.value).collect(),
        ));
        self.view.show_decade_facets(&counts.entries(), &selected);
    }

    // Stored selection loses values that vanished from the facet universe.
    // The result is pushed again only if dropping them changed it.
    fn drop_stale(&mut self, update: SelectionUpdate) {
        let sel = self.state.selection();
        let changed = match &update {
            SelectionUpdate::Genres(g) => *g != sel.genres,
            SelectionUpdate::Decades(d) => *d != sel.decades,
            SelectionUpdate::Unmatched(kind) => !sel.unmatched.contains(kind),
            SelectionUpdate::Clear => !sel.is_empty(),
        };
        if !changed {
            return;
        }
        info!("Dropping stale facet selections");
        let next = self.state.with_update(self.catalog(), update);
        let result_changed = next.displayed() != self.state.displayed();
        self.state = next;
        if result_changed {
            self.push_results();
        }
    }

    // ---- selection changes ----

    pub fn on_genres_filtered<S: AsRef<str>>(&mut self, labels: &[S]) {
        self.apply(label_update(FacetKind::Genre, labels, SelectionUpdate::Genres));
    }

    /// Labels that are not decades (`"NA"`, `"Action (2)"`) select nothing.
    pub fn on_decades_filtered<S: AsRef<str>>(&mut self, labels: &[S]) {
        self.apply(label_update(FacetKind::Decade, labels, SelectionUpdate::Decades));
    }

    /// Replace the session state and push the new result.
    pub fn apply(&mut self, update: SelectionUpdate) {
        if !self.is_loaded() {
            debug!("selection ignored: catalog not loaded");
            return;
        }
        self.state = self.state.with_update(self.catalog(), update);
        self.push_results();
    }

    /// Reset both facets. Nothing is pushed when no filter was active.
    pub fn on_clear_filters(&mut self) {
        if self.state.selection().is_empty() {
            debug!("clear ignored: no active filters");
            return;
        }
        self.apply(SelectionUpdate::Clear);
    }

    fn push_results(&mut self) {
        let films = self.films.as_deref().unwrap_or(&[]);
        let movies = self.state.movies(films);
        debug!(
            "showing {} of {} movies ({} genres, {} decades selected)",
            movies.len(),
            films.len(),
            self.state.selection().genres.len(),
            self.state.selection().decades.len()
        );
        self.view.show_results(&movies, self.state.match_count());
    }
}

// A non-empty submission never turns into "no filter": when none of the
// labels decodes, the facet stays active and matches nothing.
fn label_update<K, S>(
    kind: FacetKind,
    labels: &[S],
    update: fn(BTreeSet<K>) -> SelectionUpdate,
) -> SelectionUpdate
where
    K: FacetKey,
    S: AsRef<str>,
{
    let values = decode_labels::<K, S>(labels);
    if values.is_empty() && !labels.is_empty() {
        info!("None of {} {} labels matched a value", labels.len(), kind.as_str());
        return SelectionUpdate::Unmatched(kind);
    }
    update(values)
}
