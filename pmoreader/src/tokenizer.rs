//! The reader contract shared by every format parser.
//!
//! A [`Tokenizer`] exposes three sequential operations over a byte source:
//!
//! - `peek` copies bytes at the cursor without moving it,
//! - `read` consumes bytes, first from previously peeked data, then from the source,
//! - `ignore` moves the cursor without materialising the skipped bytes.
//!
//! Sources that can seek (memory buffers, files) additionally implement
//! `random_read`, which reads at an absolute offset and leaves the sequential
//! cursor untouched. It is used to look for trailers at the end of a file.
//!
//! `peek` and `read` only return fewer bytes than requested when the source is
//! exhausted. A return value of `0` is a clean end of stream; the `_exact`
//! helpers of [`TokenizerExt`] turn a short count into
//! [`ReaderError::EndOfStream`].

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{error::ReaderError, token::Token};

/// What is known about the source before parsing starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// Total size in bytes, `None` for unbounded streams.
    pub size: Option<u64>,
    /// Declared MIME type, if the caller knows it.
    pub mime_type: Option<String>,
    pub path: Option<PathBuf>,
}

#[async_trait]
pub trait Tokenizer: Send {
    fn file_info(&self) -> &FileInfo;

    /// Offset of the sequential cursor from the start of the source.
    fn position(&self) -> u64;

    async fn peek(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError>;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError>;

    /// Advances the cursor by up to `length` bytes and returns how many were skipped.
    async fn ignore(&mut self, length: u64) -> Result<u64, ReaderError>;

    fn supports_random_access(&self) -> bool {
        false
    }

    /// Reads at an absolute `position` without moving the sequential cursor.
    async fn random_read(&mut self, _buf: &mut [u8], _position: u64) -> Result<usize, ReaderError> {
        Err(ReaderError::RandomAccessUnsupported)
    }
}

/// Convenience helpers available on every [`Tokenizer`].
#[async_trait]
pub trait TokenizerExt: Tokenizer {
    async fn peek_exact(&mut self, buf: &mut [u8]) -> Result<(), ReaderError> {
        let peeked = self.peek(buf).await?;
        if peeked < buf.len() {
            return Err(ReaderError::EndOfStream);
        }
        Ok(())
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReaderError> {
        let read = self.read(buf).await?;
        if read < buf.len() {
            return Err(ReaderError::EndOfStream);
        }
        Ok(())
    }

    async fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, ReaderError> {
        let mut out = vec![0u8; len];
        self.read_exact(&mut out).await?;
        Ok(out)
    }

    async fn ignore_exact(&mut self, length: u64) -> Result<(), ReaderError> {
        let skipped = self.ignore(length).await?;
        if skipped < length {
            return Err(ReaderError::EndOfStream);
        }
        Ok(())
    }

    async fn read_token<T: Token>(&mut self) -> Result<T::Value, ReaderError> {
        let mut buf = vec![0u8; T::LEN];
        self.read_exact(&mut buf).await?;
        Ok(T::get(&buf))
    }

    async fn peek_token<T: Token>(&mut self) -> Result<T::Value, ReaderError> {
        let mut buf = vec![0u8; T::LEN];
        self.peek_exact(&mut buf).await?;
        Ok(T::get(&buf))
    }
}

impl<T: Tokenizer + ?Sized> TokenizerExt for T {}
