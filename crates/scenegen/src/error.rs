use std::path::PathBuf;

use derive_more::Display;

/// Errors that abort the composition or the rendering of a scene.
///
/// Recoverable situations (empty asset catalog, exhausted placement retries)
/// are not errors: they are logged and the scene goes on.
#[derive(Debug, Display)]
pub enum Error {
    /// A material file was loaded but does not define the expected material.
    #[display("material {name:?} not found in {}", file.display())]
    MissingExpectedMaterial { file: PathBuf, name: String },

    #[display("failed to load asset {}: {reason}", path.display())]
    AssetLoad { path: PathBuf, reason: String },

    #[display("rendering backend failed: {_0}")]
    RenderingBackend(String),

    #[display("render output has no {_0:?} channel")]
    MissingChannel(String),

    #[display("failed to write image {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    #[display("invalid configuration: {_0}")]
    Config(String),

    #[display("io error: {_0}")]
    Io(std::io::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ImageWrite { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
