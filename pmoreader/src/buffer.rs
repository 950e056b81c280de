use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    error::ReaderError,
    tokenizer::{FileInfo, Tokenizer},
};

/// Tokenizer over an in-memory buffer. Never suspends.
pub struct BufferTokenizer {
    data: Bytes,
    position: usize,
    info: FileInfo,
}

impl BufferTokenizer {
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let info = FileInfo {
            size: Some(data.len() as u64),
            ..FileInfo::default()
        };
        Self {
            data,
            position: 0,
            info,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.info.mime_type = Some(mime_type.into());
        self
    }

    fn copy_at(&self, buf: &mut [u8], position: usize) -> usize {
        if position >= self.data.len() {
            return 0;
        }
        let available = &self.data[position..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        n
    }
}

#[async_trait]
impl Tokenizer for BufferTokenizer {
    fn file_info(&self) -> &FileInfo {
        &self.info
    }

    fn position(&self) -> u64 {
        self.position as u64
    }

    async fn peek(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        Ok(self.copy_at(buf, self.position))
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        let n = self.copy_at(buf, self.position);
        self.position += n;
        Ok(n)
    }

    async fn ignore(&mut self, length: u64) -> Result<u64, ReaderError> {
        let remaining = self.data.len().saturating_sub(self.position) as u64;
        let skipped = length.min(remaining);
        self.position += skipped as usize;
        Ok(skipped)
    }

    fn supports_random_access(&self) -> bool {
        true
    }

    async fn random_read(&mut self, buf: &mut [u8], position: u64) -> Result<usize, ReaderError> {
        let position = usize::try_from(position).unwrap_or(usize::MAX);
        Ok(self.copy_at(buf, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        token::{Uint16Be, Uint8},
        tokenizer::TokenizerExt,
    };

    #[tokio::test]
    async fn peek_does_not_consume() -> Result<(), ReaderError> {
        let mut tokenizer = BufferTokenizer::new(vec![1u8, 2, 3, 4]);
        let mut first = [0u8; 2];
        let mut second = [0u8; 3];
        tokenizer.peek(&mut first).await?;
        tokenizer.peek(&mut second).await?;
        assert_eq!(first, [1, 2]);
        assert_eq!(second, [1, 2, 3]);
        assert_eq!(tokenizer.position(), 0);

        assert_eq!(tokenizer.read_token::<Uint16Be>().await?, 0x0102);
        assert_eq!(tokenizer.position(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn short_read_only_at_end() -> Result<(), ReaderError> {
        let mut tokenizer = BufferTokenizer::new(vec![9u8; 3]);
        let mut buf = [0u8; 5];
        assert_eq!(tokenizer.read(&mut buf).await?, 3);
        assert_eq!(tokenizer.read(&mut buf).await?, 0);
        assert_eq!(
            tokenizer.read_token::<Uint8>().await,
            Err(ReaderError::EndOfStream)
        );
        Ok(())
    }

    #[tokio::test]
    async fn random_read_leaves_cursor() -> Result<(), ReaderError> {
        let mut tokenizer = BufferTokenizer::new(b"head....TAIL".to_vec());
        tokenizer.ignore(2).await?;
        let mut tail = [0u8; 4];
        assert_eq!(tokenizer.random_read(&mut tail, 8).await?, 4);
        assert_eq!(&tail, b"TAIL");
        assert_eq!(tokenizer.position(), 2);
        assert_eq!(tokenizer.random_read(&mut tail, 100).await?, 0);
        Ok(())
    }
}
