use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconsyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("iconsync.toml not found (searched upward from {search_start})")]
    ConfigNotFound { search_start: PathBuf },

    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Invalid regex pattern: {0}")]
    Regex(String),

    #[error("Failed to run formatter `{command}`: {source}")]
    FormatterSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Formatter `{command}` failed with {status}: {stderr}")]
    FormatterFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<regex::Error> for IconsyncError {
    fn from(err: regex::Error) -> Self {
        IconsyncError::Regex(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IconsyncError>;

impl IconsyncError {
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconsyncError::IoAt {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        IconsyncError::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        IconsyncError::Validation(message.into())
    }
}

/// Why one icon was left out of the output. Never fatal to a run.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("failed to read SVG file: {0}")]
    Read(#[from] std::io::Error),

    #[error("error optimizing SVG file: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("invalid SVG content: no <svg> root element found")]
    NoSvgElement,
}

/// Failure of a single optimizer invocation.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: unclosed element <{0}>")]
    UnclosedElement(String),

    #[error("optimized output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("optimizer command `{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl From<quick_xml::events::attributes::AttrError> for OptimizeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OptimizeError::Xml(err.into())
    }
}
