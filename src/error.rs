use miette::Diagnostic;
use thiserror::Error;

/// Main error type for token builds
#[derive(Error, Diagnostic, Debug)]
pub enum TokenError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tokens::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tokens::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(tokens::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tokens::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid source pattern '{pattern}': {message}")]
    #[diagnostic(code(tokens::pattern))]
    Pattern { pattern: String, message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(tokens::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl TokenError {
    /// Whether this error should stop the whole process rather than one theme.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TokenError::Config { .. })
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
