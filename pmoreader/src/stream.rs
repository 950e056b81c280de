//! Tokenizer over a forward-only async stream.
//!
//! Peeked bytes are kept in a prefix buffer and replayed before the underlying
//! reader is consulted again, the same way a format sniffer hands its probe
//! bytes back to the decoder.

use async_trait::async_trait;
use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    error::ReaderError,
    tokenizer::{FileInfo, Tokenizer},
};

const READ_CHUNK: usize = 4096;
const IGNORE_CHUNK: usize = 16 * 1024;

pub struct StreamTokenizer<R> {
    reader: R,
    prefix: BytesMut,
    position: u64,
    finished: bool,
    info: FileInfo,
}

impl<R> StreamTokenizer<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self::with_info(reader, FileInfo::default())
    }

    /// Creates a tokenizer with a size or MIME hint supplied by the caller.
    pub fn with_info(reader: R, info: FileInfo) -> Self {
        Self {
            reader,
            prefix: BytesMut::new(),
            position: 0,
            finished: false,
            info,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Pulls from the reader until `len` bytes are buffered or the source ends.
    async fn fill_prefix(&mut self, len: usize) -> Result<(), ReaderError> {
        let mut chunk = [0u8; READ_CHUNK];
        while self.prefix.len() < len && !self.finished {
            let read = self.reader.read(&mut chunk).await?;
            if read == 0 {
                self.finished = true;
            } else {
                self.prefix.extend_from_slice(&chunk[..read]);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> Tokenizer for StreamTokenizer<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn file_info(&self) -> &FileInfo {
        &self.info
    }

    fn position(&self) -> u64 {
        self.position
    }

    async fn peek(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        self.fill_prefix(buf.len()).await?;
        let n = buf.len().min(self.prefix.len());
        buf[..n].copy_from_slice(&self.prefix[..n]);
        Ok(n)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        let mut filled = 0;
        if !self.prefix.is_empty() {
            filled = buf.len().min(self.prefix.len());
            buf[..filled].copy_from_slice(&self.prefix[..filled]);
            self.prefix.advance(filled);
        }
        while filled < buf.len() && !self.finished {
            let read = self.reader.read(&mut buf[filled..]).await?;
            if read == 0 {
                self.finished = true;
            } else {
                filled += read;
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }

    async fn ignore(&mut self, length: u64) -> Result<u64, ReaderError> {
        let mut remaining = length;
        let from_prefix = remaining.min(self.prefix.len() as u64);
        self.prefix.advance(from_prefix as usize);
        remaining -= from_prefix;

        let mut scratch = vec![0u8; IGNORE_CHUNK];
        while remaining > 0 && !self.finished {
            let want = remaining.min(IGNORE_CHUNK as u64) as usize;
            let read = self.reader.read(&mut scratch[..want]).await?;
            if read == 0 {
                self.finished = true;
            } else {
                remaining -= read as u64;
            }
        }
        let skipped = length - remaining;
        self.position += skipped;
        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::ReadBuf;

    use super::*;
    use crate::{token::Uint32Be, tokenizer::TokenizerExt};

    /// Hands out at most `step` bytes per poll to exercise partial reads.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl AsyncRead for TrickleReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let remaining = &self.data[self.pos..];
            let n = remaining.len().min(buf.remaining()).min(self.step);
            buf.put_slice(&remaining[..n]);
            self.pos += n;
            Poll::Ready(Ok(()))
        }
    }

    fn trickle(data: &[u8], step: usize) -> StreamTokenizer<TrickleReader> {
        StreamTokenizer::new(TrickleReader {
            data: data.to_vec(),
            pos: 0,
            step,
        })
    }

    #[tokio::test]
    async fn overlapping_peeks_are_consistent() -> Result<(), ReaderError> {
        let mut tokenizer = trickle(b"0123456789", 3);
        let mut a = [0u8; 4];
        let mut b = [0u8; 7];
        tokenizer.peek_exact(&mut a).await?;
        tokenizer.peek_exact(&mut b).await?;
        assert_eq!(&a, b"0123");
        assert_eq!(&b, b"0123456");
        assert_eq!(tokenizer.position(), 0);

        let mut all = [0u8; 10];
        tokenizer.read_exact(&mut all).await?;
        assert_eq!(&all, b"0123456789");
        assert_eq!(tokenizer.position(), 10);
        Ok(())
    }

    #[tokio::test]
    async fn ignore_spans_prefix_and_source() -> Result<(), ReaderError> {
        let mut tokenizer = trickle(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xCA, 0xFE, 0xBA, 0xBE], 2);
        let mut probe = [0u8; 3];
        tokenizer.peek(&mut probe).await?;
        assert_eq!(tokenizer.ignore(10).await?, 10);
        assert_eq!(tokenizer.read_token::<Uint32Be>().await?, 0xCAFE_BABE);
        assert_eq!(tokenizer.ignore(5).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn truncated_read_is_end_of_stream() {
        let mut tokenizer = trickle(b"abc", 1);
        let mut buf = [0u8; 4];
        assert_eq!(
            tokenizer.read_exact(&mut buf).await,
            Err(ReaderError::EndOfStream)
        );
    }
}
