use thiserror::Error;

/// Errors returned by the recipe search API client
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, timeout, connection refused)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("Unexpected HTTP status: {code}")]
    HttpStatus { code: u16 },

    /// The response body does not match the expected schema
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, when the failure came from the API itself
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { code } => Some(*code),
            _ => None,
        }
    }
}

/// Errors raised by the local favorites store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Stored favorites could not be read
    #[error("Failed to read favorites: {0}")]
    Read(String),

    /// Favorites could not be committed
    #[error("Failed to write favorites: {0}")]
    Write(String),
}

/// Top-level error for setup and orchestration
#[derive(Error, Debug)]
pub enum RecipleaseError {
    /// Remote recipe API failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Local favorites store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration values are present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
