use std::path::PathBuf;

use thiserror::Error;

/// Error type for flag collection, classification, and rendering.
///
/// Every variant is fatal to a generator invocation; callers surface the
/// message and exit non-zero.
#[derive(Debug, Error)]
pub enum GenError {
    /// A flag required by the active policy was not supplied.
    #[error("param --{flag} is required")]
    MissingRequired { flag: String },

    /// A `key=value` flag value did not contain the separator.
    #[error("malformed value for --{flag}: expected KEY=VALUE, got '{value}'")]
    MalformedPair { flag: String, value: String },

    /// A flag value was present but not one we accept.
    #[error("invalid value for --{flag}: '{value}' ({reason})")]
    InvalidValue { flag: String, value: String, reason: String },

    /// A source entry reached the classifier without a file name.
    #[error("no file name in source entry '{entry}'")]
    EmptyFileName { entry: String },

    /// A built-in or user template failed to parse.
    #[error("could not parse template '{name}': {source}")]
    TemplateParse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template parsed but failed while rendering against its binding.
    #[error("could not render template '{name}': {source}")]
    TemplateRender {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Reading a template or creating/writing an output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generator config file could not be decoded.
    #[error("could not parse config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Convenience result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io { path: path.into(), source }
    }
}
