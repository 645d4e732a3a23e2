use std::io;
use std::path::PathBuf;

/// Errors that can occur while bridging a Bazel target into the host model
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to launch `{command}`: {source}")]
    ToolLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed for {target} ({status}): {stderr}")]
    ExternalTool {
        command: String,
        target: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse {script} for {target}: {message}")]
    Parse {
        target: String,
        script: String,
        message: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(
        target: impl ToString,
        script: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Error::Parse {
            target: target.to_string(),
            script: script.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for bazel-leaf operations
pub type Result<T> = std::result::Result<T, Error>;
