use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ClientError, Result};
use crate::utils::serde_helpers::{flexible_id, lenient_number, null_as_default};

// ============ Pagination ============

/// Page size used when a caller passes a zero limit.
pub const DEFAULT_PAGE_SIZE: usize = 5000;

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed. The implied offset of a page is
/// `(page - 1) * per_page`.
///
/// # Default
///
/// The default is `page = 1, per_page = 5000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Map a 0-based item offset and a page size onto a 1-based page.
    ///
    /// `page = offset / limit + 1`, so an offset that is an exact multiple of
    /// `limit` lands on the *next* page and never re-requests loaded data.
    /// A zero `limit` falls back to [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn from_offset(offset: usize, limit: usize) -> Self {
        let per_page = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
        Self {
            page: offset / per_page + 1,
            per_page,
        }
    }

    /// Offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Parameters for the page after this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            per_page: self.per_page,
        }
    }

    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `per_page` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: usize) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_page_size.max(1)),
        }
    }

    /// Query string pairs understood by the API.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

/// Number of pages needed to hold `total` items with `per_page` items each.
#[must_use]
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// A page of results as returned by every list endpoint.
///
/// `total` is the server-side count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: usize,
    /// Items in the current page.
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(results: Vec<T>, total: usize) -> Self {
        Self { total, results }
    }

    /// A page holding fewer items than requested marks the end of the data.
    pub fn is_short(&self, params: &PaginationParams) -> bool {
        self.results.len() < params.per_page
    }
}

// ============ Content ============

/// A tag attached to a content item.
///
/// The API sends tags either as bare strings or as `{ "id": .., "tag_type": .. }`
/// objects; both deserialize into this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: String,
    pub tag_type: String,
    pub description: String,
}

impl Tag {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Tag ids are single tokens; one containing whitespace was mis-entered.
    pub fn is_problem(&self) -> bool {
        self.id.split_whitespace().count() > 1
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTag {
            Name(String),
            Full {
                #[serde(default, deserialize_with = "null_as_default")]
                id: String,
                #[serde(default, deserialize_with = "null_as_default")]
                tag_type: String,
                #[serde(default, deserialize_with = "null_as_default")]
                description: String,
            },
        }

        Ok(match RawTag::deserialize(deserializer)? {
            RawTag::Name(id) => Tag::new(id),
            RawTag::Full {
                id,
                tag_type,
                description,
            } => Tag {
                id,
                tag_type,
                description,
            },
        })
    }
}

/// Tag listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagQuery {
    /// Only tags of this type; empty lists every type.
    pub tag_type: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl TagQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_offset(self.offset, self.limit.unwrap_or(DEFAULT_TAG_PAGE_SIZE))
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.pagination().to_query();
        query.push((
            "tag_type".to_string(),
            self.tag_type.clone().unwrap_or_default(),
        ));
        query
    }
}

/// Tags are few; one page of this size normally holds all of them.
pub const DEFAULT_TAG_PAGE_SIZE: usize = 1000;

/// A preview frame captured from a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screen {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(deserialize_with = "flexible_id")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub src: String,
    /// Position of the frame among the item's screens.
    #[serde(deserialize_with = "null_as_default")]
    pub idx: u64,
    /// Size in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
}

/// One media or text record belonging to a container.
///
/// Every field defaults when it is missing or `null` in the payload, so a
/// sparse record (just `id` and `idx`) is always accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub src: String,
    /// Name of the generated preview; empty when there is none.
    #[serde(deserialize_with = "null_as_default")]
    pub preview: String,
    /// Ordering key within the owning container.
    #[serde(deserialize_with = "null_as_default")]
    pub idx: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content_type: String,
    /// Back-reference to the owning container.
    #[serde(deserialize_with = "flexible_id")]
    pub container_id: String,
    /// Size in bytes.
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    /// Only set on video.
    pub encoding: Option<String>,
    /// ffprobe output for video, free text otherwise.
    #[serde(deserialize_with = "null_as_default")]
    pub meta: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(deserialize_with = "null_as_default")]
    pub duplicate: bool,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated", with = "crate::utils::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Content {
    /// Minimal record, mostly useful for tests and placeholders.
    pub fn new(id: impl Into<String>, idx: u64) -> Self {
        Self {
            id: id.into(),
            idx,
            ..Self::default()
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.contains("image")
    }

    pub fn is_video(&self) -> bool {
        self.content_type.contains("video")
    }

    pub fn is_text(&self) -> bool {
        self.content_type.contains("text")
    }

    /// Icon name to show instead of a preview image.
    ///
    /// Images render themselves, so only video and text without a generated
    /// preview get an icon. `None` means "use the preview (or the image)".
    pub fn typed_preview_icon(&self) -> Option<&'static str> {
        if !self.preview.is_empty() || self.is_image() {
            return None;
        }
        if self.is_video() {
            Some("videocam")
        } else if self.is_text() {
            Some("article")
        } else {
            None
        }
    }

    /// Parsed ffprobe information for video content.
    ///
    /// Returns `None` for non-video content, empty meta, or meta that is not
    /// valid probe JSON.
    pub fn video_info(&self) -> Option<VideoCodecInfo> {
        if !self.is_video() || self.meta.is_empty() {
            return None;
        }
        match serde_json::from_str::<VideoCodecInfo>(&self.meta) {
            Ok(info) => Some(info),
            Err(e) => {
                log::warn!("Failed to parse video meta for content {}: {e}", self.id);
                None
            }
        }
    }
}

// ============ Video probe ============

/// The `format` section of an ffprobe report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFormat {
    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format_long_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub bit_rate: Option<u64>,
    #[serde(deserialize_with = "lenient_number")]
    pub size: Option<u64>,
    #[serde(deserialize_with = "lenient_number")]
    pub nb_streams: Option<u32>,
}

/// One entry of the `streams` section of an ffprobe report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStream {
    #[serde(deserialize_with = "null_as_default")]
    pub codec_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub codec_long_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub codec_type: String,
    #[serde(deserialize_with = "lenient_number")]
    pub coded_width: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub coded_height: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub bit_rate: Option<u64>,
    pub avg_frame_rate: Option<String>,
}

/// Subset of an ffprobe report stored in a video's `meta` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoCodecInfo {
    pub format: VideoFormat,
    #[serde(deserialize_with = "null_as_default")]
    pub streams: Vec<VideoStream>,
}

impl VideoCodecInfo {
    pub fn video_stream(&self) -> Option<&VideoStream> {
        self.streams.iter().find(|s| s.codec_type == "video")
    }

    /// `WIDTHxHEIGHT` of the first video stream, empty when unknown.
    pub fn resolution(&self) -> String {
        match self.video_stream() {
            Some(VideoStream {
                coded_width: Some(w),
                coded_height: Some(h),
                ..
            }) => format!("{w}x{h}"),
            _ => String::new(),
        }
    }

    pub fn video_codec_name(&self) -> &str {
        self.video_stream().map_or("", |s| s.codec_name.as_str())
    }

    /// HEVC sources are already in the target codec.
    pub fn can_encode(&self) -> bool {
        self.video_codec_name() != "hevc"
    }

    /// Whole seconds of playback.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_secs(&self) -> Option<u64> {
        self.format
            .duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.floor() as u64)
    }
}

// ============ Containers ============

/// Server summary of one container, as returned by the listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSummary {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(alias = "previewUrl", deserialize_with = "null_as_default")]
    pub preview_url: String,
    /// Authoritative number of content items on the server.
    #[serde(deserialize_with = "null_as_default")]
    pub total: usize,
    /// Optional first batch of contents embedded in the summary.
    #[serde(deserialize_with = "null_as_default")]
    pub contents: Vec<Content>,
}

// ============ Search ============

/// Content search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSearch {
    /// Free text matched against description and file name.
    pub text: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
    pub tags: Vec<String>,
    /// Restrict to one container.
    pub container_id: Option<String>,
    pub content_type: Option<String>,
    /// Only items flagged as duplicates.
    pub duplicate: bool,
}

impl ContentSearch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_offset(self.offset, self.limit.unwrap_or(0))
    }

    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut query = self.pagination().to_query();
        query.push((
            "search".to_string(),
            self.text.clone().unwrap_or_default(),
        ));
        if let Some(content_type) = self.content_type.as_ref().filter(|s| !s.is_empty()) {
            query.push(("contentType".to_string(), content_type.clone()));
        }
        if let Some(container_id) = self.container_id.as_ref().filter(|s| !s.is_empty()) {
            query.push(("cId".to_string(), container_id.clone()));
        }
        if !self.tags.is_empty() {
            query.push(("tags".to_string(), tags_param(&self.tags)?));
        }
        if self.duplicate {
            query.push(("duplicate".to_string(), "true".to_string()));
        }
        Ok(query)
    }
}

/// Container search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerSearch {
    /// Exact match on the container name.
    pub name: Option<String>,
    /// Free text matched against the description.
    pub search: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
    pub tags: Vec<String>,
}

impl ContainerSearch {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_offset(self.offset, self.limit.unwrap_or(0))
    }

    pub fn to_query(&self) -> Result<Vec<(String, String)>> {
        let mut query = self.pagination().to_query();
        if let Some(name) = self.name.as_ref().filter(|s| !s.is_empty()) {
            query.push(("text".to_string(), name.clone()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            query.push(("search".to_string(), search.clone()));
        }
        if !self.tags.is_empty() {
            query.push(("tags".to_string(), tags_param(&self.tags)?));
        }
        Ok(query)
    }
}

/// The backend only reads the first value of a repeated `tags[]` parameter,
/// so tags travel as one JSON array string.
fn tags_param(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).map_err(|e| ClientError::SerializationError {
        detail: e.to_string(),
    })
}
