use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One page of `/search` results.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub page: u32,
    pub per_page: u32,
    pub total_results: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    pub photos: Vec<Photo>,
}

/// One page of `/curated` results. Carries no total count.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CuratedResult {
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    pub photos: Vec<Photo>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub photographer: String,
    pub photographer_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub src: PhotoSource,
}

/// Size variants of a photo. Variants the API leaves out decode as empty strings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PhotoSource {
    pub original: String,
    pub large: String,
    pub large2x: String,
    pub medium: String,
    pub small: String,
    pub portrait: String,
    pub square: String,
    pub landscape: String,
    pub tiny: String,
}

impl PhotoSource {
    pub fn get(&self, size: SourceSize) -> &str {
        match size {
            SourceSize::Original => &self.original,
            SourceSize::Large => &self.large,
            SourceSize::Large2x => &self.large2x,
            SourceSize::Medium => &self.medium,
            SourceSize::Small => &self.small,
            SourceSize::Portrait => &self.portrait,
            SourceSize::Square => &self.square,
            SourceSize::Landscape => &self.landscape,
            SourceSize::Tiny => &self.tiny,
        }
    }
}

/// Names one field of [`PhotoSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSize {
    #[default]
    Original,
    Large,
    Large2x,
    Medium,
    Small,
    Portrait,
    Square,
    Landscape,
    Tiny,
}

impl SourceSize {
    pub const ALL: [SourceSize; 9] = [
        SourceSize::Original,
        SourceSize::Large,
        SourceSize::Large2x,
        SourceSize::Medium,
        SourceSize::Small,
        SourceSize::Portrait,
        SourceSize::Square,
        SourceSize::Landscape,
        SourceSize::Tiny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSize::Original => "original",
            SourceSize::Large => "large",
            SourceSize::Large2x => "large2x",
            SourceSize::Medium => "medium",
            SourceSize::Small => "small",
            SourceSize::Portrait => "portrait",
            SourceSize::Square => "square",
            SourceSize::Landscape => "landscape",
            SourceSize::Tiny => "tiny",
        }
    }
}

impl fmt::Display for SourceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        SourceSize::ALL
            .into_iter()
            .find(|size| size.as_str() == lower)
            .ok_or_else(|| format!("unknown photo size '{s}'"))
    }
}

/// One page of video search results.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoSearchResult {
    pub page: u32,
    pub per_page: u32,
    pub total_results: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub videos: Vec<Video>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub image: String,
    pub duration: u32,
    pub user: VideoUser,
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
    #[serde(default)]
    pub video_pictures: Vec<VideoPicture>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoUser {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub id: u64,
    // null for some renditions, e.g. HLS playlists
    #[serde(default)]
    pub quality: Option<String>,
    pub file_type: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub link: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoPicture {
    pub id: u64,
    pub picture: String,
    pub nr: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_sample() {
        let body = r#"{"page":5,"per_page":15,"total_results":100,"next_page":"https://api.pexels.com/v1/search/?page=6&per_page=15&query=waves","photos":[{"id":1,"width":100,"height":200,"url":"http://x","photographer":"Y","photographer_url":"http://y","src":{"original":"o"}}]}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.page, 5);
        assert_eq!(result.per_page, 15);
        assert_eq!(result.total_results, 100);
        assert_eq!(
            result.next_page.as_deref(),
            Some("https://api.pexels.com/v1/search/?page=6&per_page=15&query=waves")
        );
        assert_eq!(result.photos.len(), 1);

        let photo = &result.photos[0];
        assert_eq!(photo.id, 1);
        assert_eq!(photo.width, 100);
        assert_eq!(photo.height, 200);
        assert_eq!(photo.url, "http://x");
        assert_eq!(photo.photographer, "Y");
        assert_eq!(photo.photographer_url, "http://y");
        assert_eq!(photo.src.original, "o");
        assert_eq!(photo.src.tiny, "");
    }

    #[test]
    fn decodes_curated_without_next_page() {
        let body = r#"{"page":1,"per_page":1,"photos":[]}"#;
        let result: CuratedResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.page, 1);
        assert_eq!(result.next_page, None);
        assert!(result.photos.is_empty());
    }

    #[test]
    fn decodes_every_source_variant() {
        let body = r#"{"original":"a","large":"b","large2x":"c","medium":"d","small":"e","portrait":"f","square":"g","landscape":"h","tiny":"i"}"#;
        let src: PhotoSource = serde_json::from_str(body).unwrap();

        let got: Vec<&str> = SourceSize::ALL.iter().map(|size| src.get(*size)).collect();
        assert_eq!(got, ["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
    }

    #[test]
    fn photo_without_src_is_rejected() {
        let body = r#"{"id":1,"width":1,"height":1,"url":"u","photographer":"p","photographer_url":"pu"}"#;
        assert!(serde_json::from_str::<Photo>(body).is_err());
    }

    #[test]
    fn decodes_video_result() {
        let body = r#"{
            "page": 1,
            "per_page": 1,
            "total_results": 20475,
            "url": "https://www.pexels.com/videos/",
            "videos": [{
                "id": 1448735,
                "width": 4096,
                "height": 2160,
                "url": "https://www.pexels.com/video/video-of-forest-1448735/",
                "image": "https://images.pexels.com/videos/1448735/free-video-1448735.jpg",
                "duration": 32,
                "user": {"id": 574687, "name": "Ruvim Miksanskiy", "url": "https://www.pexels.com/@digitech"},
                "video_files": [
                    {"id": 58649, "quality": "sd", "file_type": "video/mp4", "width": 640, "height": 338, "link": "https://player.vimeo.com/external/291648067.sd.mp4"},
                    {"id": 58650, "quality": null, "file_type": "video/mp4", "width": null, "height": null, "link": "https://player.vimeo.com/external/291648067.m3u8"}
                ],
                "video_pictures": [{"id": 133236, "picture": "https://static-videos.pexels.com/videos/1448735/pictures/preview-0.jpg", "nr": 0}]
            }]
        }"#;
        let result: VideoSearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.total_results, 20475);
        assert_eq!(result.next_page, None);
        let video = &result.videos[0];
        assert_eq!(video.duration, 32);
        assert_eq!(video.user.name, "Ruvim Miksanskiy");
        assert_eq!(video.video_files[0].quality.as_deref(), Some("sd"));
        assert_eq!(video.video_files[1].width, None);
        assert_eq!(video.video_pictures[0].nr, 0);
    }

    #[test]
    fn parses_source_size() {
        assert_eq!("large2x".parse::<SourceSize>(), Ok(SourceSize::Large2x));
        assert_eq!("Tiny".parse::<SourceSize>(), Ok(SourceSize::Tiny));
        assert!("huge".parse::<SourceSize>().is_err());
    }
}
