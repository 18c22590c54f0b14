use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::core::{City, CityFiles};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Directory holding the city CSV files
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// Per-city file name overrides, keyed by city name
    #[serde(default)]
    pub(crate) files: BTreeMap<String, String>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    pub(crate) fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    /// Build the immutable city → file mapping, `data_dir` taking precedence
    pub(crate) fn city_files(&self, data_dir: Option<PathBuf>) -> CityFiles {
        let dir = data_dir
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut files = CityFiles::new(dir);
        for (name, file) in &self.files {
            match City::parse(name) {
                Ok(city) => files = files.with_file(city, file.clone()),
                Err(e) => eprintln!("Warning: ignoring [files] entry: {e}"),
            }
        }
        files
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/bikeshare/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("bikeshare").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, etc.)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("bikeshare").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.bikeshare.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bikeshare.toml"));
        }

        paths
    }
}
