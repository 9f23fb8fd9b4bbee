use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PexelsError>;

#[derive(Error, Debug)]
pub enum PexelsError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[source] Box<ureq::Transport>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The body was not JSON of the expected shape, or the status was not 2xx.
    #[error("unexpected response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },

    #[error("no photos returned")]
    NoResults,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("no API token: pass --token, set PEXELS_TOKEN or add `token` to {}", config.display())]
    MissingToken { config: PathBuf },
}

impl From<ureq::Transport> for PexelsError {
    fn from(err: ureq::Transport) -> Self {
        PexelsError::Network(Box::new(err))
    }
}
