// Import necessary libraries and modules for file I/O and serialization.
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

// Directory holding the settings file and the log, under the user's home when there is one.
pub fn get_data_dir() -> PathBuf {
    match dir::home_dir() {
        Some(home) => home.join("tavern_ledger").join("data"),
        None => PathBuf::from("./data"),
    }
}

pub fn default_settings_path() -> PathBuf {
    get_data_dir().join(SETTINGS_FILE)
}

// Where the roster file lives on the repository host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryConfig {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: Option<String>, // Default branch of the repository when unset.
    pub commit_message: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            api_base: "https://api.github.com".to_string(),
            owner: "Axowobble".to_string(),
            repo: "DNDSYS".to_string(),
            path: "players.json".to_string(),
            branch: None,
            commit_message: "Update player data via DnD Dashboard".to_string(),
        }
    }
}

impl RepositoryConfig {
    // Full contents API url of the roster file.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path.trim_start_matches('/')
        )
    }
}

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub github_token: Option<String>, // Personal access token, stored as plain text.
    pub repository: RepositoryConfig,
    pub debug_mode: bool, // Raises the log level to debug.
}

impl Settings {
    // Load settings from a specified file path.
    pub fn load_settings_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    // Save current settings to a specified file path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}
