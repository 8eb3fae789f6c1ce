//! Mod catalog and settings library for The Binding of Isaac: Rebirth.
//!
//! Reads the game's mods directory into an in-memory [`catalog::Catalog`]
//! and manages the INI settings file that locates it.

pub mod catalog;
pub mod config;
pub mod manager;
pub mod metadata;

pub use catalog::{Catalog, ModRecord};
pub use config::AppConfig;
pub use manager::ModManager;
