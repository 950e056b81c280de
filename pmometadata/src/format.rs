//! Container and codec properties.

use serde::Serialize;

use crate::tag_type::TagType;

/// Audio or video track description, for containers that carry several.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lossless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_sample: Option<u32>,
    /// Bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<f64>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_samples: Option<u64>,
    /// Dialects found, in the order they were first seen.
    pub tag_types: Vec<TagType>,
    pub track_info: Vec<TrackInfo>,
}

/// One assignment to a [`Format`] property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "id", content = "value", rename_all = "camelCase")]
pub enum FormatField {
    Container(String),
    Codec(String),
    CodecProfile(String),
    Tool(String),
    Lossless(bool),
    SampleRate(u32),
    NumberOfChannels(u32),
    BitsPerSample(u32),
    Bitrate(f64),
    Duration(f64),
    NumberOfSamples(u64),
    TrackInfo(TrackInfo),
}

impl Format {
    pub fn apply(&mut self, field: FormatField) {
        match field {
            FormatField::Container(v) => self.container = Some(v),
            FormatField::Codec(v) => self.codec = Some(v),
            FormatField::CodecProfile(v) => self.codec_profile = Some(v),
            FormatField::Tool(v) => self.tool = Some(v),
            FormatField::Lossless(v) => self.lossless = Some(v),
            FormatField::SampleRate(v) => self.sample_rate = Some(v),
            FormatField::NumberOfChannels(v) => self.number_of_channels = Some(v),
            FormatField::BitsPerSample(v) => self.bits_per_sample = Some(v),
            FormatField::Bitrate(v) => self.bitrate = Some(v),
            FormatField::Duration(v) => self.duration = Some(v),
            FormatField::NumberOfSamples(v) => self.number_of_samples = Some(v),
            FormatField::TrackInfo(v) => self.track_info.push(v),
        }
    }

    pub(crate) fn add_tag_type(&mut self, tag_type: TagType) -> bool {
        if self.tag_types.contains(&tag_type) {
            return false;
        }
        self.tag_types.push(tag_type);
        true
    }
}
