use std::io;

use pmoreader::ReaderError;

/// Hard failures of a parse.
///
/// Recoverable anomalies are not errors: parsers record them as warnings on
/// the sink and carry on. A signature mismatch is reported through
/// [`ParseStatus::NotThisFormat`](crate::ParseStatus::NotThisFormat).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of stream at offset {offset}")]
    EndOfStream { offset: u64 },

    #[error("malformed structure at offset {offset}: expected {expected}, found {found}")]
    Malformed {
        offset: u64,
        expected: String,
        found: String,
    },

    #[error("unsupported version {version} at offset {offset}")]
    UnsupportedVersion { offset: u64, version: String },

    #[error("I/O error ({kind:?}): {message}")]
    Io {
        kind: io::ErrorKind,
        message: String,
    },
}

impl ParseError {
    pub fn malformed(offset: u64, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError::Malformed {
            offset,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Attaches the cursor position to a reader failure.
    pub fn from_reader(err: ReaderError, offset: u64) -> Self {
        match err {
            ReaderError::EndOfStream => ParseError::EndOfStream { offset },
            ReaderError::Io { kind, message } => ParseError::Io { kind, message },
            other => ParseError::Io {
                kind: other.to_io().kind(),
                message: other.to_string(),
            },
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ParseError::EndOfStream { .. })
    }
}

/// Offsetless conversion, for `?` where the position is not at hand.
impl From<ReaderError> for ParseError {
    fn from(err: ReaderError) -> Self {
        ParseError::from_reader(err, 0)
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::from_reader(ReaderError::from(err), 0)
    }
}
