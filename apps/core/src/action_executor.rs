use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("empty path")]
    EmptyPath,
    #[error("failed to open '{path}': {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PartialEq for LaunchError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyPath, Self::EmptyPath) => true,
            (Self::OpenFailed { path: a, .. }, Self::OpenFailed { path: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Hands `path` to the platform's default handler (the file manager for a
/// directory). Existence is left to the handler.
pub fn open_path(path: &str) -> Result<(), LaunchError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    open::that_detached(trimmed).map_err(|source| LaunchError::OpenFailed {
        path: trimmed.to_string(),
        source,
    })
}
