use crate::{
    catalog::{self, Catalog},
    config::{self, AppConfig, CONFIG_FILE_NAME},
};
use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Owns the settings and the mod catalog for one mods installation.
///
/// Construction resolves the settings directory (explicit or the platform
/// default) and creates it; that is the only fatal filesystem side effect.
/// Everything after that is a synchronous single pass, no retries.
pub struct ModManager {
    config_dir: PathBuf,
    config_file: PathBuf,
    config: Option<AppConfig>,
    mods_directory: Option<PathBuf>,
    mods: Catalog,
}

impl ModManager {
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => config::default_config_dir()?,
        };
        config::ensure_config_dir(&config_dir)?;
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        Ok(ModManager {
            config_dir,
            config_file,
            config: None,
            mods_directory: None,
            mods: Catalog::new(),
        })
    }

    /// Loads the settings file, generating it with defaults on first use,
    /// and derives the effective mods directory from it.
    pub fn read_config(&mut self) -> Result<()> {
        let config = AppConfig::load_or_create(&self.config_file)?;
        debug!("settings loaded from {}", self.config_file.display());
        self.mods_directory = Some(config.mods_directory());
        self.config = Some(config);
        Ok(())
    }

    /// Rescans the mods directory, replacing the catalog wholesale. Passing
    /// a path overrides the directory derived from the settings, and the
    /// override sticks for later calls.
    pub fn read_mods(&mut self, mods_directory: Option<&Path>) -> Result<()> {
        if let Some(dir) = mods_directory {
            self.mods_directory = Some(dir.to_path_buf());
        }
        let mods_dir = self
            .mods_directory
            .as_ref()
            .context("no mods directory set; call read_config or pass a path")?;

        self.mods = catalog::scan_mods_dir(mods_dir)?;

        if let Ok(dump) = serde_json::to_string_pretty(&self.mods) {
            debug!("catalog after scan of {}:\n{dump}", mods_dir.display());
        }
        Ok(())
    }

    pub fn mods(&self) -> &Catalog {
        &self.mods
    }

    /// Replaces the whole catalog with externally manipulated data. No
    /// validation is performed.
    pub fn replace_mods(&mut self, mods: Catalog) {
        self.mods = mods;
    }

    pub fn config(&self) -> Option<&AppConfig> {
        self.config.as_ref()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn mods_directory(&self) -> Option<&Path> {
        self.mods_directory.as_deref()
    }
}
