use std::path::PathBuf;

use crate::{error::Result, settings::Settings};

/// Owns the settings file and the access token slot inside it.
///
/// Reading never prompts: when [`CredentialStore::token`] is `None` the UI asks
/// the user and hands the answer back through [`CredentialStore::supply`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    settings: Settings,
    path: PathBuf,
}

impl CredentialStore {
    // Read the settings at `path`, falling back to defaults when the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::load(&path).unwrap_or_else(|e| {
            log::info!("No usable settings at {}: {e}", path.display());
            Self::with_settings(Settings::default(), path)
        })
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Settings::load_settings_from_file(&path)?;
        Ok(Self { settings, path })
    }

    pub fn with_settings(settings: Settings, path: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            path: path.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn token(&self) -> Option<String> {
        self.settings
            .github_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
    }

    // Persist a token typed by the user and return it for immediate use.
    pub fn supply(&mut self, token: &str) -> Result<String> {
        let token = token.trim().to_string();
        self.settings.github_token = Some(token.clone());
        self.settings.save_to_file(&self.path)?;
        log::info!("Stored a new access token in {}", self.path.display());
        Ok(token)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.settings.github_token = None;
        self.settings.save_to_file(&self.path)?;
        log::info!("Access token reset");
        Ok(())
    }
}
