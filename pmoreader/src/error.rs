use std::io;

/// Errors raised by the readers.
///
/// The enum is `Clone` so that a failed push source can hand the same failure
/// to every read that was waiting on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("end of stream")]
    EndOfStream,
    #[error("I/O error ({kind:?}): {message}")]
    Io {
        kind: io::ErrorKind,
        message: String,
    },
    #[error("random access is not supported by this source")]
    RandomAccessUnsupported,
    #[error("source closed")]
    Closed,
}

impl ReaderError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReaderError::EndOfStream)
    }

    /// Rebuilds an `io::Error` carrying the same kind and message.
    pub fn to_io(&self) -> io::Error {
        match self {
            ReaderError::EndOfStream => io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream"),
            ReaderError::Io { kind, message } => io::Error::new(*kind, message.clone()),
            ReaderError::RandomAccessUnsupported => {
                io::Error::new(io::ErrorKind::Unsupported, self.to_string())
            }
            ReaderError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, "source closed"),
        }
    }
}

impl From<io::Error> for ReaderError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => ReaderError::EndOfStream,
            kind => ReaderError::Io {
                kind,
                message: err.to_string(),
            },
        }
    }
}
