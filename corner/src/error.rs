use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the measurement run.
///
/// Per-frame detection failures are not errors; the locator and segmenter
/// report them as `None` and the pipeline carries on with the next frame.
#[derive(Debug, Error)]
pub enum CornerError {
    #[error("image marker {0} not found")]
    MarkerNotFound(PathBuf),
    #[error("image marker {path} isn't supported: {source}")]
    MarkerImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("marker physical size must be positive, got height {height} and width {width}")]
    InvalidPhysicalSize { height: f64, width: f64 },
    #[error("file {0} as video source not found")]
    SourceNotFound(PathBuf),
    #[error("unsupported frame source: {0}")]
    UnsupportedSource(String),
    #[error("unable to read frame {path}: {source}")]
    FrameImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unable to write frame {path}: {source}")]
    SinkImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("font {0} is not a valid TrueType font")]
    Font(PathBuf),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CornerError>;
