use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use ini::Ini;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE_NAME: &str = "isaacsmith.ini";

const DEFAULT_BACKUPS_TO_KEEP: u32 = 1;
const DEFAULT_BACKUP_DIR: &str = "./backup ;resolved relative to the base game directory";

/// Marker in the game root that identifies a pre-Repentance install, where
/// DLC-era mods live directly under the root instead of a `mods` subfolder.
const LEGACY_DLC_MARKER: &str = "afterbirth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backups_to_keep: u32,
    pub backup_dir: String,
    pub root_dir: PathBuf,
    pub mods_dir: PathBuf,
}

impl AppConfig {
    pub fn load_or_create(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            let conf = Ini::load_from_file(config_file).context("parse settings file")?;
            return Self::from_ini(&conf);
        }
        Self::write_defaults(config_file)
    }

    fn from_ini(conf: &Ini) -> Result<Self> {
        let Some(paths) = conf.section(Some("PATHS")) else {
            bail!("settings file has no [PATHS] section");
        };
        let backup_dir = paths
            .get("backup_dir")
            .context("settings file is missing PATHS.backup_dir")?;
        let root_dir = paths
            .get("root_dir")
            .context("settings file is missing PATHS.root_dir")?;
        let mods_dir = paths
            .get("mods_dir")
            .context("settings file is missing PATHS.mods_dir")?;
        let backups_to_keep = conf
            .get_from(Some("DEFAULT"), "backups_to_keep")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_BACKUPS_TO_KEEP);

        Ok(AppConfig {
            backups_to_keep,
            backup_dir: backup_dir.to_string(),
            root_dir: PathBuf::from(root_dir),
            mods_dir: PathBuf::from(mods_dir),
        })
    }

    /// Writes a fresh settings file with default values and returns them.
    /// `root_dir` is deliberately left empty; it must come from the caller
    /// or the user's environment, never from auto-detection.
    fn write_defaults(config_file: &Path) -> Result<Self> {
        let mut conf = Ini::new();
        conf.with_section(Some("DEFAULT"))
            .set("backups_to_keep", DEFAULT_BACKUPS_TO_KEEP.to_string());
        conf.with_section(Some("PATHS"))
            .set("backup_dir", DEFAULT_BACKUP_DIR)
            .set("root_dir", "")
            .set("mods_dir", "");
        conf.write_to_file(config_file)
            .context("write settings file")?;

        Ok(AppConfig {
            backups_to_keep: DEFAULT_BACKUPS_TO_KEEP,
            backup_dir: DEFAULT_BACKUP_DIR.to_string(),
            root_dir: PathBuf::new(),
            mods_dir: PathBuf::new(),
        })
    }

    /// Resolves the effective mods directory. An explicit `mods_dir` wins;
    /// otherwise it is derived from `root_dir`, which for legacy DLC
    /// installs is itself the mods directory.
    pub fn mods_directory(&self) -> PathBuf {
        if self.mods_dir.as_os_str().is_empty() {
            if is_legacy_dlc_root(&self.root_dir) {
                self.root_dir.clone()
            } else {
                self.root_dir.join("mods")
            }
        } else {
            self.mods_dir.clone()
        }
    }
}

fn is_legacy_dlc_root(root_dir: &Path) -> bool {
    root_dir
        .to_string_lossy()
        .to_lowercase()
        .contains(LEGACY_DLC_MARKER)
}

/// Platform config base joined with the app subfolder. The directory is not
/// created here; `ModManager::new` owns that side effect.
pub fn default_config_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("resolve home dir")?;
    Ok(base.config_dir().join("isaacsmith"))
}

pub fn ensure_config_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).context("create settings dir")
}
