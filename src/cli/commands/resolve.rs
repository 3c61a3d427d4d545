//! Resolve Command
//!
//! Run just the path-resolution cascade for one or more requested paths,
//! without building the graph. Useful for checking what an inexact path
//! would map to.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::output::render_resolved;
use crate::config::ConfigLoader;
use crate::resolver::FuzzyPathResolver;
use crate::types::{AppId, Result};
use crate::workspace::LocalFileStore;

pub async fn run(app: String, root: PathBuf, files: Vec<String>, format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let store = LocalFileStore::single(app.as_str(), &root);
    let resolver = FuzzyPathResolver::new(Arc::new(store), config.cache.file_list_ttl());

    let app = AppId::new(&app);
    let mut resolved = Vec::with_capacity(files.len());
    for file in &files {
        resolved.push(resolver.resolve(&app, file).await?);
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&resolved)?),
        _ => {
            for file in &resolved {
                render_resolved(file);
            }
        }
    }

    Ok(())
}
