//! ID3v2.2, ID3v2.3 and ID3v2.4 tags.
//!
//! One [`Id3v2Parser::parse`] call consumes one tag: the 10-byte header, the
//! optional extended header, the frames and the ID3v2.4 footer. Files edited by
//! several tools sometimes carry chained tags; calling the parser again right
//! after the previous tag reads the next one, until it answers
//! [`ParseStatus::NotThisFormat`].

mod frame;
pub mod header;
pub mod unsync;

use async_trait::async_trait;
use pmometadata::{FormatParser, ParseError, ParseStatus, TagSink, TagType};
use pmoreader::{Tokenizer, TokenizerExt};
use tracing::debug;

pub use header::{FrameFlags, FrameHeader, TagFlags, TagHeader};

use frame::FrameDecoder;
use header::extended_header_len;
use unsync::remove_unsync_bytes;

#[derive(Debug, Default, Clone, Copy)]
pub struct Id3v2Parser;

impl Id3v2Parser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FormatParser for Id3v2Parser {
    async fn parse(
        &mut self,
        tokenizer: &mut dyn Tokenizer,
        sink: &mut dyn TagSink,
    ) -> Result<ParseStatus, ParseError> {
        let offset = tokenizer.position();
        let mut raw = [0u8; TagHeader::LEN];
        let peeked = tokenizer
            .peek(&mut raw)
            .await
            .map_err(|e| ParseError::from_reader(e, offset))?;
        if peeked < TagHeader::LEN {
            return Ok(ParseStatus::NotThisFormat);
        }
        let Some(header) = TagHeader::parse(&raw, offset)? else {
            return Ok(ParseStatus::NotThisFormat);
        };
        tokenizer
            .ignore_exact(TagHeader::LEN as u64)
            .await
            .map_err(|e| ParseError::from_reader(e, offset))?;
        debug!(
            offset,
            version = %format!("2.{}.{}", header.major, header.revision),
            size = header.size,
            flags = ?header.flags,
            "ID3v2 header"
        );

        let body_offset = offset + TagHeader::LEN as u64;
        let remaining = tokenizer
            .file_info()
            .size
            .or(sink.options().file_size)
            .map(|size| size.saturating_sub(body_offset));
        let mut body = vec![0u8; body_capacity(header.size, remaining)];
        let read = tokenizer
            .read(&mut body)
            .await
            .map_err(|e| ParseError::from_reader(e, body_offset))?;
        if read < header.size as usize {
            sink.add_warning(format!(
                "ID3v2 tag at offset {offset} is truncated: {} bytes declared, {read} available",
                header.size
            ));
            body.truncate(read);
        } else if header.major >= 4 && header.flags.footer {
            tokenizer
                .ignore(TagHeader::FOOTER_LEN as u64)
                .await
                .map_err(|e| ParseError::from_reader(e, tokenizer.position()))?;
        }

        decode_tag(&header, body, body_offset, sink)?;
        Ok(ParseStatus::Parsed)
    }
}

/// Declared body size, bounded by what the source still holds when its size is known.
fn body_capacity(declared: u32, remaining: Option<u64>) -> usize {
    let declared = u64::from(declared);
    let len = remaining.map_or(declared, |remaining| declared.min(remaining));
    usize::try_from(len).unwrap_or(usize::MAX)
}

fn decode_tag(
    header: &TagHeader,
    mut body: Vec<u8>,
    body_offset: u64,
    sink: &mut dyn TagSink,
) -> Result<(), ParseError> {
    let tag_type = TagType::id3v2(header.major).ok_or_else(|| ParseError::UnsupportedVersion {
        offset: body_offset,
        version: format!("ID3v2.{}", header.major),
    })?;

    if header.major < 4 && header.flags.unsynchronisation {
        body = remove_unsync_bytes(&body);
    }

    let mut start = 0;
    if header.flags.extended_header {
        if header.major == 2 {
            sink.add_warning("ID3v2.2 compression is not supported".to_string());
            return Ok(());
        }
        start = extended_header_len(&body, header.major, body_offset)?;
        debug!(len = start, "Skipping ID3v2 extended header");
    }

    let mut decoder = FrameDecoder::new(header.major, !sink.options().skip_covers)
        .with_unsync_frames(header.major >= 4 && header.flags.unsynchronisation);
    let tags = decoder.parse_frames(&body[start..], 0);
    for warning in decoder.take_warnings() {
        sink.add_warning(warning);
    }
    for tag in tags {
        sink.add_tag(tag_type, &tag.id, tag.value);
    }
    Ok(())
}
