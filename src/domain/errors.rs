use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures returned by the context engine.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Error creating directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not list files in {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Template '{template}' not found")]
    TemplateNotFound { template: String },

    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing {}: {source}", .path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not delete {}", .path.display())]
    Delete { path: PathBuf },

    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid file name: '{name}'")]
    InvalidName { name: String },

    #[error("Failed to serialize prompt context: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContextError>;
