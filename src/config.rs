use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::app::facets::FIRST_DECADE;
use crate::app::Decade;

pub const CONFIG_FILE: &str = "config.json";
pub const CONFIG_ENV: &str = "MOVIE_FACETS_CONFIG";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub catalog_path: Option<String>,
    pub first_decade: Decade,
    /// Initial selections, as labels (`"Action"`, `"1990's (3)"`).
    pub genres: Vec<String>,
    pub decades: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            first_decade: FIRST_DECADE,
            genres: Vec::new(),
            decades: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "catalog")]
    catalog_path: Option<String>,
    first_decade: Option<i32>,
    genres: Option<Vec<String>>,
    decades: Option<Vec<String>>,
}

pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if parsed.catalog_path.is_some() {
                    cfg.catalog_path = parsed.catalog_path;
                }
                if let Some(first) = parsed.first_decade {
                    let decade = Decade::of_year(first);
                    if decade.start_year() != first {
                        warn!("first_decade {first} is not a decade start; using {decade}");
                    }
                    cfg.first_decade = decade;
                }
                if let Some(list) = parsed.genres {
                    cfg.genres = list;
                }
                if let Some(list) = parsed.decades {
                    cfg.decades = list;
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}
