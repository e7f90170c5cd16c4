use crate::core::sanitizer::sanitize_file_name;
use crate::domain::constants::OUTPUT_DIR;
use crate::domain::errors::{ContextError, Result};
use crate::infra::file_system::FileSystemOps;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Structured prompt description written alongside the repo context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptContext {
    pub intent: String,
    pub target: String,
    pub output_format: String,
    pub instructions: Vec<String>,
    pub style: String,
}

/// Writes `context` as pretty JSON to `<project_root>/.promptpilot/<file_name>`.
///
/// `file_name` is sanitized the same way as source file names.
pub fn write_prompt_context<F: FileSystemOps>(
    fs: &F,
    project_root: &Path,
    context: &PromptContext,
    file_name: &str,
) -> Result<PathBuf> {
    if file_name.trim().is_empty() {
        return Err(ContextError::InvalidName {
            name: file_name.to_string(),
        });
    }

    let output_dir = project_root.join(OUTPUT_DIR);
    if !fs.exists(&output_dir) {
        fs.create_directories(&output_dir)
            .map_err(|source| ContextError::DirectoryCreation {
                path: output_dir.clone(),
                source,
            })?;
    }

    let prompt_file = output_dir.join(sanitize_file_name(file_name));
    let json = serde_json::to_string_pretty(context)?;
    debug!("Serialized prompt context ({} bytes)", json.len());

    fs.write_text(&prompt_file, &json)
        .map_err(|source| ContextError::FileCreation {
            path: prompt_file.clone(),
            source,
        })?;

    info!("Prompt context written to {}", prompt_file.display());
    Ok(prompt_file)
}
