use std::path::PathBuf;

pub const GENERIC_FAILURE: &str = "An error occurred while processing the image.";

/// Failures of one upload-and-detect round trip.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("no image selected")]
    NoImageSelected,

    #[error("failed to read {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status and an `{error}` body.
    #[error("detection service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("failed to decode annotated image: {0}")]
    DecodeImage(#[from] image::ImageError),
}

impl DetectError {
    /// Text for the status line. Service messages are shown verbatim.
    pub fn status_message(&self) -> String {
        match self {
            Self::NoImageSelected => "Please select an image file.".to_string(),
            Self::Service { message, .. } => format!("Error: {message}"),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
