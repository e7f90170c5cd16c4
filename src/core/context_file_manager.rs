use crate::core::context_assembler::{assemble_repo_context, empty_selection_message};
use crate::core::sanitizer::sanitize_file_name;
use crate::core::templates::load_template;
use crate::domain::constants::{
    DEFAULT_DEBUG_LAYOUT, DEFAULT_FILE_EXTENSION, DEFAULT_PATCH_MODE, OUTPUT_DIR,
    REPO_CONTEXT_FILENAME, SOURCE_CONTEXT_DIR, keys,
};
use crate::domain::errors::{ContextError, Result};
use crate::domain::models::{ContextContents, OutputLocation};
use crate::infra::file_system::FileSystemOps;
use crate::infra::preferences::PreferenceStore;
use log::{debug, info, warn};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// True when `name` is exactly one plain path component, so joining it onto
/// the source directory cannot escape it.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', MAIN_SEPARATOR])
}

/// Manages the source-context directory and the generated repo context file.
///
/// Output paths are resolved from preferences on every call, so a changed
/// preference takes effect immediately.
pub struct ContextFileManager<F: FileSystemOps, P: PreferenceStore> {
    project_root: PathBuf,
    source_dir: PathBuf,
    fs: F,
    preferences: P,
}

impl<F: FileSystemOps, P: PreferenceStore> ContextFileManager<F, P> {
    pub fn new(project_root: impl Into<PathBuf>, fs: F, preferences: P) -> Self {
        let project_root = project_root.into();
        let source_dir = project_root.join(SOURCE_CONTEXT_DIR);
        Self {
            project_root,
            source_dir,
            fs,
            preferences,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn output_dir(&self) -> PathBuf {
        match self.preferences.get(keys::CUSTOM_OUTPUT_DIR) {
            Some(dir) => self.project_root.join(dir.trim()),
            None => self.project_root.join(OUTPUT_DIR),
        }
    }

    fn output_filename(&self) -> String {
        self.preferences
            .get(keys::CUSTOM_OUTPUT_FILENAME)
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| REPO_CONTEXT_FILENAME.to_string())
    }

    pub fn output_location(&self) -> OutputLocation {
        OutputLocation {
            directory: self.output_dir(),
            filename: self.output_filename(),
        }
    }

    pub fn get_output_file(&self) -> PathBuf {
        self.output_location().path()
    }

    pub fn patch_mode_enabled(&self) -> bool {
        self.preferences
            .get_bool(keys::PATCH_MODE_ENABLED, DEFAULT_PATCH_MODE)
    }

    pub fn debug_layout_enabled(&self) -> bool {
        self.preferences
            .get_bool(keys::DEBUG_LAYOUT_ENABLED, DEFAULT_DEBUG_LAYOUT)
    }

    /// Creates the source and output directories when missing. Safe to call repeatedly.
    pub fn ensure_directories_exist(&self) -> Result<()> {
        for dir in [self.source_dir.clone(), self.output_dir()] {
            if self.fs.exists(&dir) {
                continue;
            }
            info!("Creating directory: {}", dir.display());
            self.fs
                .create_directories(&dir)
                .map_err(|source| ContextError::DirectoryCreation {
                    path: dir.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Regular files directly under the source directory, sorted by name.
    pub fn list_source_files(&self) -> Result<Vec<PathBuf>> {
        let entries = self
            .fs
            .list_files(&self.source_dir)
            .map_err(|source| ContextError::List {
                path: self.source_dir.clone(),
                source,
            })?;

        let mut files: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| entry.is_file)
            .map(|entry| entry.path)
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!("Listed {} source context files", files.len());
        Ok(files)
    }

    /// Creates a new source file from a bundled template. Never overwrites.
    pub fn create_sample_file_from_template(
        &self,
        requested_name: &str,
        template_id: &str,
    ) -> Result<PathBuf> {
        if requested_name.trim().chars().all(|c| c == '.') {
            return Err(ContextError::InvalidName {
                name: requested_name.to_string(),
            });
        }
        let sanitized = sanitize_file_name(requested_name);
        let final_name = if sanitized.ends_with(DEFAULT_FILE_EXTENSION) {
            sanitized
        } else {
            format!("{}{}", sanitized, DEFAULT_FILE_EXTENSION)
        };
        debug!("Sanitized '{}' to '{}'", requested_name, final_name);

        let new_file = self.source_dir.join(&final_name);
        if self.fs.exists(&new_file) {
            return Err(ContextError::AlreadyExists { name: final_name });
        }

        let content = load_template(template_id).ok_or_else(|| ContextError::TemplateNotFound {
            template: template_id.to_string(),
        })?;

        self.fs
            .write_text(&new_file, content)
            .map_err(|source| ContextError::FileCreation {
                path: new_file.clone(),
                source,
            })?;

        info!("Created source context file: {}", new_file.display());
        Ok(new_file)
    }

    /// Reads each named source file. Missing or unreadable files get a
    /// placeholder instead of failing the batch.
    pub fn read_selected_files_with_content(&self, names: &[String]) -> Result<ContextContents> {
        let mut contents = ContextContents::new();

        for name in names {
            if contents.contains(name) {
                continue;
            }
            if !is_plain_file_name(name) {
                warn!("Refusing to read '{}' outside the source context directory", name);
                contents.insert(name.as_str(), format!("Error: File not found: {}", name));
                continue;
            }
            let file = self.source_dir.join(name);
            let content = if self.fs.exists(&file) {
                match self.fs.read_text(&file) {
                    Ok(text) => text,
                    Err(source) => {
                        let err = ContextError::Read { path: file, source };
                        warn!("{}", err);
                        format!("Error: {}", err)
                    }
                }
            } else {
                let err = ContextError::NotFound { path: file };
                warn!("{}", err);
                format!("Error: File not found: {}", name)
            };
            contents.insert(name.as_str(), content);
        }

        Ok(contents)
    }

    /// Assembles `contents` and overwrites the output file with the result.
    pub fn create_repo_context_file_from_content(
        &self,
        contents: &ContextContents,
        patch_mode_enabled: bool,
    ) -> Result<PathBuf> {
        let location = self.output_location();
        let repo_file = location.path();

        let placeholder = empty_selection_message(SOURCE_CONTEXT_DIR, &location.filename);
        let content = assemble_repo_context(contents, patch_mode_enabled, &placeholder);

        self.fs
            .write_text(&repo_file, &content)
            .map_err(|source| ContextError::FileCreation {
                path: repo_file.clone(),
                source,
            })?;

        info!(
            "Generated {} from {} files (patch mode: {})",
            repo_file.display(),
            contents.len(),
            patch_mode_enabled
        );
        Ok(repo_file)
    }

    pub fn delete_repo_context_file(&self) -> Result<()> {
        let file = self.get_output_file();
        if !self.fs.exists(&file) {
            return Err(ContextError::NotFound { path: file });
        }
        if !self.fs.delete(&file) {
            return Err(ContextError::Delete { path: file });
        }
        info!("Deleted repo context file: {}", file.display());
        Ok(())
    }
}
