use std::{
    io::SeekFrom,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt},
};

use crate::{
    error::ReaderError,
    tokenizer::{FileInfo, Tokenizer},
};

/// Tokenizer over an open file. Every read seeks to an absolute offset, so the
/// sequential cursor and `random_read` never disturb each other.
pub struct FileTokenizer {
    file: File,
    position: u64,
    info: FileInfo,
}

impl FileTokenizer {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        let size = file.metadata().await?.len();
        tracing::debug!(path = %path.display(), size, "Opened file tokenizer");
        Ok(Self {
            file,
            position: 0,
            info: FileInfo {
                size: Some(size),
                mime_type: None,
                path: Some(PathBuf::from(path)),
            },
        })
    }

    async fn read_at(&mut self, buf: &mut [u8], position: u64) -> Result<usize, ReaderError> {
        self.file.seek(SeekFrom::Start(position)).await?;
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.file.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}

#[async_trait]
impl Tokenizer for FileTokenizer {
    fn file_info(&self) -> &FileInfo {
        &self.info
    }

    fn position(&self) -> u64 {
        self.position
    }

    async fn peek(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        self.read_at(buf, self.position).await
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReaderError> {
        let n = self.read_at(buf, self.position).await?;
        self.position += n as u64;
        Ok(n)
    }

    async fn ignore(&mut self, length: u64) -> Result<u64, ReaderError> {
        let size = self.info.size.unwrap_or(u64::MAX);
        let skipped = length.min(size.saturating_sub(self.position));
        self.position += skipped;
        Ok(skipped)
    }

    fn supports_random_access(&self) -> bool {
        true
    }

    async fn random_read(&mut self, buf: &mut [u8], position: u64) -> Result<usize, ReaderError> {
        self.read_at(buf, position).await
    }
}
