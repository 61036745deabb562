//! Master resume loading. The file is an opaque JSON content bank; only the model reads it.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;

pub async fn load_master_resume(path: &Path) -> Result<Value, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::MasterResume(format!("could not read {}: {e}", path.display())))?;

    let master: Value = serde_json::from_str(&raw)
        .map_err(|e| AppError::MasterResume(format!("{} is not valid JSON: {e}", path.display())))?;

    info!("Loaded master resume from {}", path.display());
    Ok(master)
}
