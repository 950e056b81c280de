//! # pmoreader
//!
//! Asynchronous byte readers for binary tag parsers.
//!
//! Every format parser pulls its bytes through the [`Tokenizer`] trait, which
//! unifies streams, in-memory buffers, files and push-based sources behind the
//! same peek / read / ignore contract. Buffers and files additionally support
//! random access, used to look for trailers at the end of a file without
//! disturbing the sequential cursor.
//!
//! ## Example
//!
//! ```rust
//! use pmoreader::{from_buffer, token::SyncSafeU32, Tokenizer, TokenizerExt};
//!
//! # tokio_test::block_on(async {
//! let mut tokenizer = from_buffer(vec![0x00, 0x00, 0x02, 0x01]);
//! let size = tokenizer.read_token::<SyncSafeU32>().await.unwrap();
//! assert_eq!(size, 257);
//! assert_eq!(tokenizer.position(), 4);
//! # });
//! ```

pub mod buffer;
pub mod channel;
pub mod error;
pub mod file;
pub mod stream;
pub mod text;
pub mod token;
pub mod tokenizer;

use std::path::Path;

use bytes::Bytes;
use tokio::io::AsyncRead;

pub use buffer::BufferTokenizer;
pub use channel::{channel, ChannelSource, SourceSender};
pub use error::ReaderError;
pub use file::FileTokenizer;
pub use stream::StreamTokenizer;
pub use text::TextEncoding;
pub use tokenizer::{FileInfo, Tokenizer, TokenizerExt};

/// Wraps an in-memory buffer.
pub fn from_buffer(data: impl Into<Bytes>) -> BufferTokenizer {
    BufferTokenizer::new(data)
}

/// Wraps a forward-only stream; `info` carries optional size and MIME hints.
pub fn from_stream<R>(reader: R, info: FileInfo) -> StreamTokenizer<R>
where
    R: AsyncRead + Unpin + Send,
{
    StreamTokenizer::with_info(reader, info)
}

/// Opens a file for sequential and random access.
pub async fn from_file(path: impl AsRef<Path>) -> Result<FileTokenizer, ReaderError> {
    FileTokenizer::open(path).await
}
