use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::client::ClientConfig;
use crate::error::{PexelsError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "pexels.toml";

/// Contents of `pexels.toml`. Every key is optional so the token can come
/// from the command line instead.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: Option<String>,
    pub photo_api: Option<String>,
    pub video_api: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PexelsError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Like [`Config::load`], but a missing file yields the empty config.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder();
        if let Some(base) = &self.photo_api {
            builder = builder.photo_api(base);
        }
        if let Some(base) = &self.video_api {
            builder = builder.video_api(base);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}
