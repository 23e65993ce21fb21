// src/main.rs
use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use movie_facets::app::{CatalogApp, ConsoleView, JsonCatalog};
use movie_facets::config::load_config;

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let cfg = load_config();
    let Some(catalog_path) = cfg.catalog_path.clone() else {
        error!("No catalog_path in config.json; nothing to show.");
        return ExitCode::FAILURE;
    };

    let mut app = CatalogApp::new(ConsoleView::new(io::stdout().lock()))
        .with_first_decade(cfg.first_decade);
    app.load_blocking(Box::new(JsonCatalog::new(catalog_path)));
    if !app.is_loaded() {
        return ExitCode::FAILURE;
    }

    if !cfg.genres.is_empty() {
        app.on_genres_filtered(cfg.genres.as_slice());
    }
    if !cfg.decades.is_empty() {
        app.on_decades_filtered(cfg.decades.as_slice());
    }
    app.on_genre_menu_clicked();
    app.on_decade_menu_clicked();
    info!("{}", app.status());

    ExitCode::SUCCESS
}
