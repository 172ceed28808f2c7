//! Writes catchment features to `{TAG}_{name}.geojson` files.

use std::path::{Path, PathBuf};

use catchments_core::Provider;
use geojson::Feature;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SinkError {
    #[error("failed to write {}: {source}", path.display())]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize feature: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `{TAG}_{name}.geojson`, with path separators in `name` replaced by `_`.
pub(crate) fn file_name(provider: Provider, name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_{safe}.geojson", provider.tag())
}

/// Pretty-prints `feature` into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`SinkError::FileWriteFailure`] when the directory or file cannot
/// be written.
pub(crate) fn save_feature(
    feature: &Feature,
    provider: Provider,
    dir: &Path,
) -> Result<PathBuf, SinkError> {
    let name = feature
        .property("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("catchment");
    let path = dir.join(file_name(provider, name));
    let body = serde_json::to_string_pretty(feature)?;

    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, body))
        .map_err(|source| SinkError::FileWriteFailure {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
