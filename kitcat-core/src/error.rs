// ABOUTME: Error types for the kitcat image pipeline with user-facing messages
// ABOUTME: One variant per pipeline stage; every error aborts the run

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitcatError {
    #[error("open {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image: {0}")]
    Decode(String),

    #[error("terminal: {0}")]
    Terminal(String),

    #[error("resize: {0}")]
    Resize(String),

    #[error("encode: {0}")]
    Encode(String),

    #[error("failed to write to terminal")]
    Write(#[from] std::io::Error),
}

impl KitcatError {
    /// Short name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            KitcatError::Read { .. } => "read",
            KitcatError::Decode(_) => "decode",
            KitcatError::Terminal(_) => "terminal",
            KitcatError::Resize(_) => "resize",
            KitcatError::Encode(_) => "encode",
            KitcatError::Write(_) => "write",
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            KitcatError::Decode(_) => Some("Supported formats: PNG, JPEG, GIF, WebP, BMP, TIFF"),
            KitcatError::Terminal(_) => Some(
                "Run inside a terminal that reports its pixel size, or set KITCAT_WINDOW_PIXELS=<width>x<height>",
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KitcatError>;
