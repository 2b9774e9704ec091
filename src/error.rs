use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hand2voc operations.
#[derive(Debug, Error)]
pub enum Hand2VocError {
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Output directory {path} does not exist")]
    OutputDirMissing { path: PathBuf },

    #[error("Annotations path {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read MAT file {path}: {source}")]
    MatRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse MAT file {path}: {message}")]
    MatParse { path: PathBuf, message: String },

    #[error("Unsupported MAT content in {path}: {message}")]
    UnsupportedMat { path: PathBuf, message: String },

    #[error("Malformed annotation record {path}: {message}")]
    MalformedRecord { path: PathBuf, message: String },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write VOC XML to {path}: {source}")]
    XmlWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    ReportWrite(#[from] serde_json::Error),
}
