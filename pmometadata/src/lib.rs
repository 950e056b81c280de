//! # pmometadata
//!
//! Common metadata schema and tag merge engine for audio tag parsers.
//!
//! Format parsers decode native tags (ID3v2 frames, Vorbis comments, APE
//! items, ...) and hand them to a [`TagSink`]. The [`MetadataCollector`] sink
//! keeps the native record, maps each tag to the format-independent
//! vocabulary of [`CommonTagId`] and merges values coming from several
//! dialects according to a fixed priority order (see [`Origin::rank`]).
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use pmometadata::{
//!     FormatParser, MetadataCollector, ParseError, ParseOptions, ParseStatus, TagSink, TagType,
//! };
//! use pmoreader::{from_buffer, Tokenizer, TokenizerExt};
//!
//! /// A toy format: `"TT"` followed by a title.
//! struct TitleOnly;
//!
//! #[async_trait]
//! impl FormatParser for TitleOnly {
//!     async fn parse(
//!         &mut self,
//!         tokenizer: &mut dyn Tokenizer,
//!         sink: &mut dyn TagSink,
//!     ) -> Result<ParseStatus, ParseError> {
//!         let mut magic = [0u8; 2];
//!         tokenizer.peek_exact(&mut magic).await?;
//!         if &magic != b"TT" {
//!             return Ok(ParseStatus::NotThisFormat);
//!         }
//!         tokenizer.ignore_exact(2).await?;
//!         let title = tokenizer.read_vec(5).await?;
//!         sink.add_tag(TagType::Id3v24, "TIT2", String::from_utf8_lossy(&title).into_owned().into());
//!         Ok(ParseStatus::Parsed)
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let mut tokenizer = from_buffer(&b"TTHello"[..]);
//! let mut collector = MetadataCollector::new(ParseOptions::default());
//! let status = TitleOnly.parse(&mut tokenizer, &mut collector).await.unwrap();
//! assert_eq!(status, ParseStatus::Parsed);
//!
//! let metadata = collector.into_metadata();
//! assert_eq!(metadata.common.title.as_deref(), Some("Hello"));
//! assert_eq!(metadata.format.tag_types, vec![TagType::Id3v24]);
//! # });
//! ```

pub mod collector;
pub mod common;
pub mod error;
pub mod format;
pub mod mapping;
pub mod options;
pub mod parser;
pub mod tag_type;
pub mod util;
pub mod value;

pub use collector::{Metadata, MetadataCollector, MetadataEvent, PostMapRule, Quality, Warning};
pub use common::{CommonTagId, CommonTags, CommonValue, ReplayGainUndo, TrackNo};
pub use error::ParseError;
pub use format::{Format, FormatField, TrackInfo};
pub use mapping::{CombinedTagMapper, GenericTag, TagMapper};
pub use options::{Observer, ParseOptions};
pub use parser::{FormatParser, ParseStatus, TagSink};
pub use tag_type::{Origin, TagType};
pub use value::{
    Chapter, Comment, EncapsulatedObject, Identifier, LyricsContentType, LyricsTag, LyricsText,
    NativeTag, Picture, Popularimeter, Rating, Ratio, TableOfContents, TagValue, TimestampFormat,
    UrlLink,
};
