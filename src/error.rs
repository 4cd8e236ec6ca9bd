use thiserror::Error;

/// Errors that can occur while collecting a restaurant's menu
#[derive(Error, Debug)]
pub enum MenuError {
    /// Transport level failure talking to a restaurant website
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The website answered with a non-success status code
    #[error("Unexpected status {status} from {url}")]
    StatusError {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Expected markup, JSON path or text pattern was not found
    #[error("Failed to parse menu: {0}")]
    ParseError(String),

    /// Embedded or API JSON could not be decoded
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The OCR engine failed or produced unreadable output
    #[error("OCR failed: {0}")]
    OcrError(String),

    /// Filesystem or subprocess failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The restaurant needs a fetched page but has no URL registered
    #[error("Restaurant '{0}' has no URL to fetch")]
    MissingUrl(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl MenuError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        MenuError::ParseError(message.into())
    }
}

/// Renders an error together with its chain of causes.
pub fn describe(error: &(dyn std::error::Error + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str("\n\nCaused by:\n    ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
