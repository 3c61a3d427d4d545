//! Analyze Command
//!
//! Run one blast-radius analysis over a local application root and
//! render the report as styled text or JSON.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::output::render_report;
use crate::config::ConfigLoader;
use crate::engine::BlastRadiusEngine;
use crate::types::{AnalyzeRequest, Result};
use crate::workspace::LocalFileStore;

pub async fn run(
    app: String,
    root: PathBuf,
    files: Vec<String>,
    depth: Option<usize>,
    format: &str,
) -> Result<()> {
    let config = ConfigLoader::load()?;
    let store = LocalFileStore::single(app.as_str(), &root)
        .with_max_file_size(config.analysis.max_file_size);
    let engine = BlastRadiusEngine::new(Arc::new(store), &config);

    let request = AnalyzeRequest {
        application_id: app,
        changed_files: files,
        depth,
    };
    let report = engine.analyze(&request).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => render_report(&report),
    }

    Ok(())
}
