//! ID3v1 / ID3v1.1 trailer: the last 128 bytes of the file.

use async_trait::async_trait;
use pmometadata::{FormatParser, ParseError, ParseStatus, TagSink, TagType, TagValue};
use pmoreader::{
    TextEncoding, Tokenizer,
    text::{decode_string, find_zero},
};
use tracing::debug;

use crate::genres::genre_name;

pub const ID3V1_LEN: u64 = 128;

/// Reads the trailer through random access; the sequential cursor is not moved.
///
/// Answers [`ParseStatus::NotThisFormat`] when the source cannot seek, its size
/// is unknown or the last 128 bytes do not start with `"TAG"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3v1Parser;

impl Id3v1Parser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FormatParser for Id3v1Parser {
    async fn parse(
        &mut self,
        tokenizer: &mut dyn Tokenizer,
        sink: &mut dyn TagSink,
    ) -> Result<ParseStatus, ParseError> {
        if !tokenizer.supports_random_access() {
            return Ok(ParseStatus::NotThisFormat);
        }
        let size = tokenizer.file_info().size.or(sink.options().file_size);
        let Some(offset) = size.and_then(|size| size.checked_sub(ID3V1_LEN)) else {
            return Ok(ParseStatus::NotThisFormat);
        };

        let mut raw = [0u8; ID3V1_LEN as usize];
        let read = tokenizer
            .random_read(&mut raw, offset)
            .await
            .map_err(|e| ParseError::from_reader(e, offset))?;
        if read < raw.len() || &raw[..3] != b"TAG" {
            return Ok(ParseStatus::NotThisFormat);
        }
        debug!(offset, "ID3v1 trailer");

        for (id, range) in [("title", 3..33), ("artist", 33..63), ("album", 63..93)] {
            if let Some(text) = field(&raw[range]) {
                sink.add_tag(TagType::Id3v1, id, TagValue::Text(text));
            }
        }
        if let Some(year) = field(&raw[93..97]) {
            sink.add_tag(TagType::Id3v1, "year", TagValue::Text(year));
        }
        // ID3v1.1 steals the last two comment bytes for a zero and the track number.
        let (comment, track) = if raw[125] == 0 && raw[126] != 0 {
            (&raw[97..125], Some(raw[126]))
        } else {
            (&raw[97..127], None)
        };
        if let Some(comment) = field(comment) {
            sink.add_tag(TagType::Id3v1, "comment", TagValue::Text(comment));
        }
        if let Some(track) = track {
            sink.add_tag(TagType::Id3v1, "track", TagValue::Int(i64::from(track)));
        }
        if let Some(genre) = genre_name(usize::from(raw[127])) {
            sink.add_tag(TagType::Id3v1, "genre", TagValue::Text(genre.to_string()));
        }
        Ok(ParseStatus::Parsed)
    }
}

/// Fixed-width field, cut at the first NUL.
fn field(bytes: &[u8]) -> Option<String> {
    let end = find_zero(bytes, TextEncoding::Latin1);
    let text = decode_string(&bytes[..end], TextEncoding::Latin1);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
