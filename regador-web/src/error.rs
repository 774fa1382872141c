#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Invalid timestamp format: {0}")]
    TimestampFormat(#[from] time::error::InvalidFormatDescription),

    #[error("Invalid timestamp: {0}")]
    TimestampParse(#[from] time::error::Parse),

    #[error("Timestamp formatting failed: {0}")]
    Format(#[from] time::error::Format),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    pub fn missing_element<S: Into<String>>(id: S) -> Self {
        Self::MissingElement(id.into())
    }
}
