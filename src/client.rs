use std::io::Read;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{PexelsError, Result};
use crate::models::{CuratedResult, Photo, SearchResult, Video, VideoSearchResult};

pub const PHOTO_API: &str = "https://api.pexels.com/v1";
pub const VIDEO_API: &str = "https://api.pexels.com/videos";

pub const RATE_LIMIT_HEADER: &str = "x-ratelimit-remaining";

/// Highest page picked by [`Client::random_photo`].
pub const RANDOM_PAGE_MAX: u32 = 1000;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// error bodies can be whole HTML pages, keep the message readable
const ERROR_BODY_SNIPPET: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub photo_api: String,
    pub video_api: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            photo_api: PHOTO_API.to_string(),
            video_api: VIDEO_API.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("pexels-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn photo_api<S: Into<String>>(mut self, base: S) -> Self {
        self.config.photo_api = base.into();
        self
    }

    pub fn video_api<S: Into<String>>(mut self, base: S) -> Self {
        self.config.video_api = base.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Blocking client for the Pexels photo and video API.
///
/// Every call is one authenticated GET followed by a JSON decode. The
/// remaining-request quota reported by the server is kept behind a mutex, so a
/// `Client` can be shared between threads; with concurrent calls the stored
/// value is whichever response was processed last.
///
/// ```rust,no_run
/// let client = pexels::Client::new("your-api-key");
/// let result = client.search_photos("waves", 15, 5)?;
/// println!("{} photos, {:?} requests left", result.photos.len(), client.remaining_requests());
/// # Ok::<(), pexels::PexelsError>(())
/// ```
#[derive(Debug)]
pub struct Client {
    token: String,
    agent: ureq::Agent,
    config: ClientConfig,
    remaining: Mutex<Option<i64>>,
}

impl Client {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self::with_config(token, ClientConfig::default())
    }

    pub fn with_config<S: Into<String>>(token: S, config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Self {
            token: token.into(),
            agent,
            config,
            remaining: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Last `X-Ratelimit-Remaining` value seen, `None` before the first one.
    pub fn remaining_requests(&self) -> Option<i64> {
        *self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn search_photos(&self, query: &str, per_page: u32, page: u32) -> Result<SearchResult> {
        let url = self.search_url(&self.config.photo_api, query, per_page, page)?;
        self.get_json(&url)
    }

    pub fn curated_photos(&self, per_page: u32, page: u32) -> Result<CuratedResult> {
        let url = build_url(
            &self.config.photo_api,
            "/curated",
            &[("per_page", per_page.to_string()), ("page", page.to_string())],
        )?;
        self.get_json(&url)
    }

    pub fn get_photo(&self, id: u64) -> Result<Photo> {
        let url = build_url(&self.config.photo_api, &format!("/photos/{id}"), &[])?;
        self.get_json(&url)
    }

    /// One photo from a random curated page in `0..=RANDOM_PAGE_MAX`.
    pub fn random_photo(&self) -> Result<Photo> {
        self.random_photo_with(&mut rand::thread_rng())
    }

    pub fn random_photo_with<R: Rng>(&self, rng: &mut R) -> Result<Photo> {
        let page = random_page(rng);
        let result = self.curated_photos(1, page)?;
        result.photos.into_iter().next().ok_or(PexelsError::NoResults)
    }

    pub fn search_videos(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<VideoSearchResult> {
        let url = self.search_url(&self.config.video_api, query, per_page, page)?;
        self.get_json(&url)
    }

    pub fn get_video(&self, id: u64) -> Result<Video> {
        let url = build_url(&self.config.video_api, &format!("/videos/{id}"), &[])?;
        self.get_json(&url)
    }

    /// Plain GET without the API token, for image CDN links from [`PhotoSource`].
    ///
    /// [`PhotoSource`]: crate::models::PhotoSource
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching");
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(status_error(status, response));
            }
            Err(ureq::Error::Transport(err)) => return Err(err.into()),
        };

        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok(body)
    }

    fn search_url(&self, base: &str, query: &str, per_page: u32, page: u32) -> Result<Url> {
        build_url(
            base,
            "/search",
            &[
                ("query", query.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ],
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.request_with_auth("GET", url)?;
        decode(response)
    }

    /// Sends one authenticated request and records the rate-limit header.
    ///
    /// Non-2xx responses are handed back like any other so the caller can
    /// read their body; only transport failures are errors here.
    fn request_with_auth(&self, method: &str, url: &Url) -> Result<ureq::Response> {
        debug!(method, %url, "sending request");
        let response = match self
            .agent
            .request_url(method, url)
            .set("Authorization", &self.token)
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => return Err(err.into()),
        };

        if let Some(remaining) = parse_rate_limit(response.header(RATE_LIMIT_HEADER)) {
            debug!(remaining, "rate limit updated");
            *self.remaining.lock().unwrap_or_else(PoisonError::into_inner) = Some(remaining);
        }

        Ok(response)
    }
}

/// Joins `path` onto `base` and appends percent-encoded query pairs.
pub fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

pub fn random_page<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(0..=RANDOM_PAGE_MAX)
}

fn parse_rate_limit(value: Option<&str>) -> Option<i64> {
    let value = value?;
    match value.trim().parse() {
        Ok(remaining) => Some(remaining),
        Err(_) => {
            warn!(value, "ignoring non-numeric rate limit header");
            None
        }
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T> {
    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(status_error(status, response));
    }

    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;

    serde_json::from_slice(&body).map_err(|err| PexelsError::Decode {
        status,
        reason: err.to_string(),
    })
}

fn status_error(status: u16, response: ureq::Response) -> PexelsError {
    let mut body = Vec::new();
    let reason = match response.into_reader().read_to_end(&mut body) {
        Err(err) => format!("unreadable body: {err}"),
        Ok(_) => {
            let text = String::from_utf8_lossy(&body);
            if text.trim().is_empty() {
                "empty body".to_string()
            } else {
                snippet(text.trim())
            }
        }
    };
    PexelsError::Decode { status, reason }
}

fn snippet(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_SNIPPET) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
