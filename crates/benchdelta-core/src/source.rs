//! Reading report documents from disk.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::LoadError;
use crate::model::Report;

/// File name of a raw benchmark report inside a run directory.
pub const RAW_REPORT_FILE: &str = "raw.json";

pub fn load_report(path: &Path) -> Result<Report, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    parse_report(&text, path)
}

/// Parse report JSON that was read from `path`. `path` is only used for errors.
pub fn parse_report(text: &str, path: &Path) -> Result<Report, LoadError> {
    let doc: serde_json::Value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let report = Report::from_value(doc).map_err(|source| LoadError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), run_id = %report.run_id(), "loaded report");
    Ok(report)
}

/// `<bench_root>/latest/raw.json`, if it exists.
pub fn latest_report_path(bench_root: &Path) -> Result<PathBuf, LoadError> {
    let path = bench_root.join("latest").join(RAW_REPORT_FILE);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LoadError::NotFound { path })
    }
}
