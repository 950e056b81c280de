//! # pmoid3
//!
//! ID3 tag reader for MPEG audio files.
//!
//! A parse runs three decoders over one [`Tokenizer`] and merges what they
//! find in a [`MetadataCollector`]:
//!
//! 1. [`Id3v1Parser`] looks for the 128-byte trailer through random access,
//! 2. [`Id3v2Parser`] reads the ID3v2 tags at the start of the file, as many
//!    times as tags are chained,
//! 3. [`MpegProbe`] decodes the first MPEG audio frame for the stream
//!    properties and the duration.
//!
//! ## Example
//!
//! ```rust
//! use pmoid3::parse_buffer;
//! use pmometadata::{ParseOptions, TagType};
//!
//! # tokio_test::block_on(async {
//! // ID3v2.3 header followed by a single TIT2 frame.
//! let mut file = b"ID3\x03\x00\x00\x00\x00\x00\x0F".to_vec();
//! file.extend_from_slice(b"TIT2\x00\x00\x00\x05\x00\x00\x00Test");
//!
//! let metadata = parse_buffer(file, ParseOptions::default()).await.unwrap();
//! assert_eq!(metadata.common.title.as_deref(), Some("Test"));
//! assert_eq!(metadata.format.tag_types, vec![TagType::Id3v23]);
//! # });
//! ```

pub mod genres;
pub mod id3v1;
pub mod id3v2;
pub mod mpeg;

use std::path::Path;

use bytes::Bytes;
use pmometadata::{FormatParser, Metadata, MetadataCollector, ParseError, ParseOptions, ParseStatus};
use pmoreader::{FileInfo, Tokenizer, from_buffer, from_file, from_stream};
use tokio::io::AsyncRead;
use tracing::debug;

pub use id3v1::Id3v1Parser;
pub use id3v2::Id3v2Parser;
pub use mpeg::MpegProbe;

/// Parses a file held in memory.
pub async fn parse_buffer(
    data: impl Into<Bytes>,
    options: ParseOptions,
) -> Result<Metadata, ParseError> {
    let mut tokenizer = from_buffer(data);
    parse_tokenizer(&mut tokenizer, options).await
}

pub async fn parse_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<Metadata, ParseError> {
    let mut tokenizer = from_file(path).await?;
    parse_tokenizer(&mut tokenizer, options).await
}

/// Parses a forward-only stream. Size and MIME type come from `options`,
/// there is no ID3v1 lookup.
pub async fn parse_stream<R>(reader: R, options: ParseOptions) -> Result<Metadata, ParseError>
where
    R: AsyncRead + Unpin + Send,
{
    let info = FileInfo {
        size: options.file_size,
        mime_type: options.mime_type.clone(),
        path: None,
    };
    let mut tokenizer = from_stream(reader, info);
    parse_tokenizer(&mut tokenizer, options).await
}

pub async fn parse_tokenizer(
    tokenizer: &mut dyn Tokenizer,
    options: ParseOptions,
) -> Result<Metadata, ParseError> {
    let mut collector = MetadataCollector::new(options);

    let trailer_len = match Id3v1Parser.parse(tokenizer, &mut collector).await? {
        ParseStatus::Parsed => id3v1::ID3V1_LEN,
        ParseStatus::NotThisFormat => 0,
    };

    let mut id3v2 = Id3v2Parser::new();
    let mut tags = 0;
    while id3v2.parse(tokenizer, &mut collector).await? == ParseStatus::Parsed {
        tags += 1;
    }
    debug!(tags, position = tokenizer.position(), "ID3v2 tags read");

    MpegProbe::new()
        .with_trailer_len(trailer_len)
        .parse(tokenizer, &mut collector)
        .await?;
    Ok(collector.into_metadata())
}
