//! Blocking client for the [Pexels](https://www.pexels.com/api/) photo and video API.
//!
//! ```rust,no_run
//! use pexels::Client;
//!
//! let client = Client::new(std::env::var("PEXELS_TOKEN").unwrap_or_default());
//! let photo = client.get_photo(2014422)?;
//! println!("{} by {}", photo.url, photo.photographer);
//! # Ok::<(), pexels::PexelsError>(())
//! ```

pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod models;

pub use client::{Client, ClientConfig, ClientConfigBuilder};
pub use config::Config;
pub use error::{PexelsError, Result};
pub use models::{
    CuratedResult, Photo, PhotoSource, SearchResult, SourceSize, Video, VideoFile, VideoPicture,
    VideoSearchResult, VideoUser,
};
