//! Native tag values.
//!
//! Every value a format parser emits is one variant of [`TagValue`]. The set
//! is closed so that each consumer matches it exhaustively.

use bytes::Bytes;
use serde::Serialize;

/// One tag as found in the file, before mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeTag {
    pub id: String,
    pub value: TagValue,
}

impl NativeTag {
    pub fn new(id: impl Into<String>, value: TagValue) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Ratio(Ratio),
    Binary(Bytes),
    Picture(Picture),
    Comment(Comment),
    Lyrics(LyricsTag),
    Popularimeter(Popularimeter),
    Rating(Rating),
    Identifier(Identifier),
    Url(UrlLink),
    Object(EncapsulatedObject),
    Chapter(Chapter),
    TableOfContents(TableOfContents),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            TagValue::Text(_) => "text",
            TagValue::Int(_) => "integer",
            TagValue::Float(_) => "float",
            TagValue::Bool(_) => "boolean",
            TagValue::Ratio(_) => "ratio",
            TagValue::Binary(_) => "binary",
            TagValue::Picture(_) => "picture",
            TagValue::Comment(_) => "comment",
            TagValue::Lyrics(_) => "lyrics",
            TagValue::Popularimeter(_) => "popularimeter",
            TagValue::Rating(_) => "rating",
            TagValue::Identifier(_) => "identifier",
            TagValue::Url(_) => "url",
            TagValue::Object(_) => "object",
            TagValue::Chapter(_) => "chapter",
            TagValue::TableOfContents(_) => "table-of-contents",
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

/// A gain or peak value, expressed both as a linear ratio and in decibels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio {
    pub ratio: f64,
    #[serde(rename = "dB")]
    pub db: f64,
}

impl Ratio {
    pub fn from_db(db: f64) -> Self {
        Self {
            ratio: 10f64.powf(db / 10.0),
            db,
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            db: 10.0 * ratio.log10(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Picture {
    /// MIME type, e.g. `image/jpeg`. Empty until resolved.
    pub format: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub picture_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LyricsContentType {
    Other,
    #[default]
    Lyrics,
    Text,
    Movement,
    Events,
    Chord,
    Trivia,
    WebpageUrls,
    ImageUrls,
}

impl LyricsContentType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => LyricsContentType::Lyrics,
            2 => LyricsContentType::Text,
            3 => LyricsContentType::Movement,
            4 => LyricsContentType::Events,
            5 => LyricsContentType::Chord,
            6 => LyricsContentType::Trivia,
            7 => LyricsContentType::WebpageUrls,
            8 => LyricsContentType::ImageUrls,
            _ => LyricsContentType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampFormat {
    #[default]
    NotSynchronized,
    MpegFrames,
    Milliseconds,
}

impl TimestampFormat {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TimestampFormat::MpegFrames,
            2 => TimestampFormat::Milliseconds,
            _ => TimestampFormat::NotSynchronized,
        }
    }
}

/// One timed line or syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricsText {
    pub text: String,
    pub timestamp: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    pub content_type: LyricsContentType,
    pub time_stamp_format: TimestampFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub sync_text: Vec<LyricsText>,
}

/// ID3v2 `POPM` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popularimeter {
    pub email: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,
}

/// Normalised rating in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Owner string plus opaque payload (`UFID`, `PRIV`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub owner: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlLink {
    pub description: String,
    pub url: String,
}

/// ID3v2 `GEOB` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncapsulatedObject {
    pub mime_type: String,
    pub filename: String,
    pub description: String,
    pub data: Bytes,
}

/// ID3v2 `CHAP` frame with its embedded sub-frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub element_id: String,
    /// Milliseconds.
    pub start_time: u32,
    pub end_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<u32>,
    pub frames: Vec<NativeTag>,
}

/// ID3v2 `CTOC` frame with its embedded sub-frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOfContents {
    pub element_id: String,
    pub top_level: bool,
    pub ordered: bool,
    pub child_element_ids: Vec<String>,
    pub frames: Vec<NativeTag>,
}
