use crate::domain::{DEFAULT_PAGE_SIZE, TypeMatch};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    /// Overrides the platform data directory location of the SQLite file.
    pub db_path: Option<PathBuf>,
    /// Fetch more raw pages when an active filter leaves the list empty.
    pub fill_filtered_results: bool,
    pub type_match: TypeMatch,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 10,
            db_path: None,
            fill_filtered_results: false,
            type_match: TypeMatch::Any,
        }
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &std::path::Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid config at {}: {}", path.display(), err);
        AppConfig::default()
    })
}

pub fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("serialize config")
}

pub fn save_config(config: &AppConfig) -> anyhow::Result<PathBuf> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &AppConfig, path: &std::path::Path) -> anyhow::Result<()> {
    let contents = render_config(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("POKEDECK_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

pub fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("POKEDECK_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("pokedeck");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("pokedeck");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("pokedeck");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("pokedeck");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".pokedeck")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("config.toml");
        let config = AppConfig {
            page_size: 50,
            fill_filtered_results: true,
            type_match: TypeMatch::All,
            db_path: Some(dir.path().join("db.sqlite")),
            ..AppConfig::default()
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_save_config_uses_config_path_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        // Only this test touches the variable.
        unsafe { std::env::set_var("POKEDECK_CONFIG_PATH", &path) };

        let config = AppConfig {
            page_size: 7,
            ..AppConfig::default()
        };
        let written = save_config(&config).unwrap();
        unsafe { std::env::remove_var("POKEDECK_CONFIG_PATH") };

        assert_eq!(written, path);
        assert_eq!(load_config_from(&path), config);
        assert!(render_config(&config).unwrap().contains("page_size = 7"));
    }

    #[test]
    fn test_save_config_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = save_config_to(&AppConfig::default(), &blocker.join("config.toml")).unwrap_err();
        assert!(err.to_string().starts_with("create "));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 5\ntype_match = \"all\"\n").unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.type_match, TypeMatch::All);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = \"lots\"").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());
    }
}
