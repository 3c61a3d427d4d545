//! Config Command
//!
//! Inspect the effective merged configuration and its file paths.

use crate::config::ConfigLoader;
use crate::types::Result;

pub fn show(format: &str) -> Result<()> {
    ConfigLoader::show_config(format == "json")
}

pub fn path() {
    ConfigLoader::show_path();
}
