use crate::metadata;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

pub const DISABLE_SENTINEL: &str = "disable.it";

/// Value used for both `id` and `index` when nothing could be derived.
pub const UNKNOWN: &str = "-1";

/// One installed mod, keyed in the catalog by its folder name minus the
/// trailing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    /// Trailing segment of the folder name after the last underscore,
    /// usually a Steam Workshop id. Kept as the raw split string; never
    /// validated as numeric. `"-1"` when the name has no underscore.
    pub id: String,
    /// Absolute path to the mod folder.
    pub path: std::path::PathBuf,
    /// Sort index declared in `metadata.xml`, `"-1"` when absent.
    pub index: String,
    /// True iff a `disable.it` sentinel file exists inside the folder.
    pub disabled: bool,
}

pub type Catalog = HashMap<String, ModRecord>;

/// Scans the immediate entries of a mods directory into a fresh catalog.
///
/// Dotfiles (`.DS_Store`, `.git`, `.directory` and friends) are skipped.
/// Everything else is treated as a mod folder without checking that it is
/// actually a directory; within one scan, entries that derive the same key
/// overwrite earlier ones.
pub fn scan_mods_dir(mods_dir: &Path) -> Result<Catalog> {
    let entries = fs::read_dir(mods_dir)
        .with_context(|| format!("read mods directory {}", mods_dir.display()))?;

    let mut catalog = Catalog::new();
    for entry in entries {
        let entry = entry.context("read mods directory entry")?;
        let folder_name = entry.file_name().to_string_lossy().into_owned();
        if folder_name.starts_with('.') {
            continue;
        }

        let mod_path = mods_dir.join(&folder_name);
        let index = metadata::read_sort_index(&mod_path).unwrap_or_else(|| UNKNOWN.to_string());
        let (key, id) = split_mod_folder_name(&folder_name);
        let disabled = mod_path.join(DISABLE_SENTINEL).exists();

        catalog.insert(
            key.to_string(),
            ModRecord {
                id: id.unwrap_or(UNKNOWN).to_string(),
                path: mod_path,
                index,
                disabled,
            },
        );
    }

    Ok(catalog)
}

/// Splits a mod folder name on its LAST underscore into catalog key and raw
/// identifier. Names with no underscore are their own key.
pub fn split_mod_folder_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('_') {
        Some((key, id)) => (key, Some(id)),
        None => (name, None),
    }
}
