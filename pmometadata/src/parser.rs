//! The contract between format parsers and the collector.

use async_trait::async_trait;
use pmoreader::Tokenizer;

use crate::{
    error::ParseError, format::FormatField, options::ParseOptions, tag_type::TagType,
    value::TagValue,
};

/// Outcome of a parse that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Parsed,
    /// The signature did not match; the tokenizer was left where it was.
    NotThisFormat,
}

/// Receives what a parser decodes.
pub trait TagSink: Send {
    /// Records a native tag. Never fails.
    fn add_tag(&mut self, tag_type: TagType, id: &str, value: TagValue);

    fn set_format(&mut self, field: FormatField);

    /// Records a non-fatal anomaly.
    fn add_warning(&mut self, message: String);

    fn options(&self) -> &ParseOptions;
}

/// A decoder for one binary format.
#[async_trait]
pub trait FormatParser: Send {
    async fn parse(
        &mut self,
        tokenizer: &mut dyn Tokenizer,
        sink: &mut dyn TagSink,
    ) -> Result<ParseStatus, ParseError>;
}
