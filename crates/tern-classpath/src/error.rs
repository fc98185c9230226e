//! Error types for tern-classpath.

use thiserror::Error;

/// Errors raised while walking a module graph.
///
/// Missing files, missing output directories and cycles are not errors.
/// These variants only fire when the graph contradicts itself.
#[derive(Debug, Clone, Error)]
pub enum ClasspathError {
    #[error("module '{0}' not found in project graph")]
    StartModuleNotFound(String),

    #[error("module '{module}' depends on module '{name}', which is not in the project graph")]
    UnknownModule { module: String, name: String },

    #[error("module '{module}' depends on library '{name}', which is not in the project graph")]
    UnknownLibrary { module: String, name: String },
}

/// Result type for classpath operations.
pub type Result<T> = std::result::Result<T, ClasspathError>;
