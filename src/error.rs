use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the environment registry and package operations
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced environment does not exist under the root
    #[error("environment '{0}' not found")]
    NotFound(String),

    /// Building a new environment failed
    #[error("failed to create environment '{name}': {reason}")]
    Creation { name: String, reason: String },

    /// The package manager exited unsuccessfully or could not be launched
    #[error("{}", describe_operation(.tool, .code, .stderr))]
    Operation {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("invalid argument '{0}'")]
    InvalidArgument(String),

    #[error("{context} {path:?}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Exit code reported by the external tool, if it ran to completion
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::Operation { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_operation(tool: &str, code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("{tool} exited with status {code}"),
        None => format!("{tool} did not complete"),
    };

    let stderr = stderr.trim();
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}
