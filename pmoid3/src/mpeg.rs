//! MPEG audio frame probe.
//!
//! Locates the first frame header after the tags and derives the stream
//! properties from it. Duration comes from a Xing/Info or VBRI header when the
//! encoder wrote one, from a full frame scan when the caller asks for it, and
//! otherwise from a constant-bitrate estimate over the file size.

use async_trait::async_trait;
use pmometadata::{FormatField, FormatParser, ParseError, ParseStatus, TagSink};
use pmoreader::{Tokenizer, TokenizerExt};
use tracing::{debug, trace};

/// How far past the tags the first frame header is searched for.
pub const SYNC_WINDOW: usize = 64 * 1024;

const BITRATES_V1: [[u32; 15]; 3] = [
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448],
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384],
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320],
];
const BITRATES_V2: [[u32; 15]; 2] = [
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

impl MpegVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            MpegVersion::Mpeg1 => "1",
            MpegVersion::Mpeg2 => "2",
            MpegVersion::Mpeg25 => "2.5",
        }
    }
}

/// A decoded 4-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpegFrameHeader {
    pub version: MpegVersion,
    pub layer: u8,
    /// Bits per second.
    pub bitrate: u32,
    pub sample_rate: u32,
    pub padding: bool,
    pub mono: bool,
}

impl MpegFrameHeader {
    /// `None` unless `raw` is a valid header; free-format bitrates are not accepted.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        if raw.len() < 4 || raw[0] != 0xFF || raw[1] & 0xE0 != 0xE0 {
            return None;
        }
        let version = match (raw[1] >> 3) & 0x03 {
            0 => MpegVersion::Mpeg25,
            2 => MpegVersion::Mpeg2,
            3 => MpegVersion::Mpeg1,
            _ => return None,
        };
        let layer = match (raw[1] >> 1) & 0x03 {
            1 => 3,
            2 => 2,
            3 => 1,
            _ => return None,
        };
        let bitrate_index = usize::from(raw[2] >> 4);
        if bitrate_index == 0 || bitrate_index == 15 {
            return None;
        }
        let kbps = match version {
            MpegVersion::Mpeg1 => BITRATES_V1[usize::from(layer - 1)][bitrate_index],
            _ => BITRATES_V2[usize::from(layer > 1)][bitrate_index],
        };
        let base_rate = match (raw[2] >> 2) & 0x03 {
            0 => 44_100,
            1 => 48_000,
            2 => 32_000,
            _ => return None,
        };
        let sample_rate = match version {
            MpegVersion::Mpeg1 => base_rate,
            MpegVersion::Mpeg2 => base_rate / 2,
            MpegVersion::Mpeg25 => base_rate / 4,
        };
        Some(Self {
            version,
            layer,
            bitrate: kbps * 1000,
            sample_rate,
            padding: raw[2] & 0x02 != 0,
            mono: raw[3] >> 6 == 0x03,
        })
    }

    pub fn samples_per_frame(&self) -> u32 {
        match (self.layer, self.version) {
            (1, _) => 384,
            (3, MpegVersion::Mpeg2 | MpegVersion::Mpeg25) => 576,
            _ => 1152,
        }
    }

    /// Frame size in bytes, header included.
    pub fn frame_len(&self) -> usize {
        let slot = if self.layer == 1 { 4 } else { 1 };
        let bytes_per_slot_unit = u64::from(self.samples_per_frame()) / 8 / slot;
        let len = bytes_per_slot_unit * u64::from(self.bitrate) / u64::from(self.sample_rate);
        ((len + u64::from(self.padding)) * slot) as usize
    }

    pub fn channels(&self) -> u32 {
        if self.mono { 1 } else { 2 }
    }

    pub fn codec(&self) -> String {
        format!("MPEG {} Layer {}", self.version.as_str(), self.layer)
    }

    /// Offset of a Xing/Info header from the start of the frame.
    fn xing_offset(&self) -> usize {
        let side_info = match (self.version, self.mono) {
            (MpegVersion::Mpeg1, false) => 32,
            (MpegVersion::Mpeg1, true) => 17,
            (_, false) => 17,
            (_, true) => 9,
        };
        4 + side_info
    }

    fn same_stream(&self, other: &Self) -> bool {
        self.version == other.version
            && self.layer == other.layer
            && self.sample_rate == other.sample_rate
    }
}

/// Frame and byte counts written by the encoder in the first frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VbrInfo {
    pub vbr: bool,
    pub frames: Option<u32>,
    pub bytes: Option<u32>,
    pub tool: Option<String>,
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    let b = data.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Reads a Xing/Info or VBRI header from the bytes of the first frame.
pub fn parse_vbr_header(header: &MpegFrameHeader, frame: &[u8]) -> Option<VbrInfo> {
    let at = header.xing_offset();
    if let Some(tag @ (b"Xing" | b"Info")) = frame.get(at..at + 4) {
        let flags = be_u32(frame, at + 4)?;
        let mut pos = at + 8;
        let mut info = VbrInfo {
            vbr: tag == b"Xing",
            ..VbrInfo::default()
        };
        if flags & 0x01 != 0 {
            info.frames = be_u32(frame, pos);
            pos += 4;
        }
        if flags & 0x02 != 0 {
            info.bytes = be_u32(frame, pos);
            pos += 4;
        }
        if flags & 0x04 != 0 {
            pos += 100;
        }
        if flags & 0x08 != 0 {
            pos += 4;
        }
        info.tool = frame
            .get(pos..pos + 9)
            .filter(|tool| tool.starts_with(b"LAME") || tool.starts_with(b"Lav"))
            .map(|tool| {
                String::from_utf8_lossy(tool)
                    .trim_end_matches(['\0', ' '])
                    .to_string()
            });
        return Some(info);
    }
    if frame.get(36..40) == Some(&b"VBRI"[..]) {
        return Some(VbrInfo {
            vbr: true,
            bytes: be_u32(frame, 46),
            frames: be_u32(frame, 50),
            tool: None,
        });
    }
    None
}

/// Offset of the first frame header in `window`, confirmed by the following
/// header when it lies inside the window.
pub fn find_frame(window: &[u8]) -> Option<(usize, MpegFrameHeader)> {
    (0..window.len().saturating_sub(3)).find_map(|i| {
        let header = MpegFrameHeader::parse(&window[i..])?;
        let next = i + header.frame_len();
        if next + 4 <= window.len() {
            let following = MpegFrameHeader::parse(&window[next..])?;
            if !header.same_stream(&following) {
                return None;
            }
        }
        Some((i, header))
    })
}

/// Runs after the ID3v2 tags. `trailer_len` is the size of the trailing tags
/// (ID3v1) excluded from the audio payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct MpegProbe {
    trailer_len: u64,
}

impl MpegProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailer_len(mut self, len: u64) -> Self {
        self.trailer_len = len;
        self
    }

    async fn scan_samples(
        &self,
        tokenizer: &mut dyn Tokenizer,
        first: &MpegFrameHeader,
    ) -> Result<u64, ParseError> {
        let mut samples = 0u64;
        let mut raw = [0u8; 4];
        loop {
            let position = tokenizer.position();
            let peeked = tokenizer
                .peek(&mut raw)
                .await
                .map_err(|e| ParseError::from_reader(e, position))?;
            if peeked < raw.len() {
                break;
            }
            let Some(header) = MpegFrameHeader::parse(&raw).filter(|h| h.same_stream(first)) else {
                trace!(position, "End of MPEG frames");
                break;
            };
            let len = header.frame_len() as u64;
            let skipped = tokenizer
                .ignore(len)
                .await
                .map_err(|e| ParseError::from_reader(e, position))?;
            if skipped < len {
                break;
            }
            samples += u64::from(header.samples_per_frame());
        }
        Ok(samples)
    }
}

#[async_trait]
impl FormatParser for MpegProbe {
    async fn parse(
        &mut self,
        tokenizer: &mut dyn Tokenizer,
        sink: &mut dyn TagSink,
    ) -> Result<ParseStatus, ParseError> {
        let start = tokenizer.position();
        let mut window = vec![0u8; SYNC_WINDOW];
        let peeked = tokenizer
            .peek(&mut window)
            .await
            .map_err(|e| ParseError::from_reader(e, start))?;
        window.truncate(peeked);

        let Some((offset, header)) = find_frame(&window) else {
            debug!(start, "No MPEG frame header found");
            return Ok(ParseStatus::NotThisFormat);
        };
        let audio_start = start + offset as u64;
        debug!(audio_start, codec = %header.codec(), bitrate = header.bitrate, "MPEG audio");

        sink.set_format(FormatField::Container("MPEG".to_string()));
        sink.set_format(FormatField::Codec(header.codec()));
        sink.set_format(FormatField::Lossless(false));
        sink.set_format(FormatField::SampleRate(header.sample_rate));
        sink.set_format(FormatField::NumberOfChannels(header.channels()));

        let frame_end = (offset + header.frame_len()).min(window.len());
        let vbr = parse_vbr_header(&header, &window[offset..frame_end]);
        let sample_rate = f64::from(header.sample_rate);
        let spf = u64::from(header.samples_per_frame());

        if let Some(info) = vbr.as_ref() {
            sink.set_format(FormatField::CodecProfile(
                if info.vbr { "VBR" } else { "CBR" }.to_string(),
            ));
            if let Some(tool) = info.tool.clone() {
                sink.set_format(FormatField::Tool(tool));
            }
        } else {
            sink.set_format(FormatField::CodecProfile("CBR".to_string()));
        }

        if let Some(frames) = vbr.as_ref().and_then(|info| info.frames) {
            let samples = u64::from(frames) * spf;
            let duration = samples as f64 / sample_rate;
            sink.set_format(FormatField::NumberOfSamples(samples));
            sink.set_format(FormatField::Duration(duration));
            let bitrate = match vbr.as_ref().and_then(|info| info.bytes) {
                Some(bytes) if duration > 0.0 => f64::from(bytes) * 8.0 / duration,
                _ => f64::from(header.bitrate),
            };
            sink.set_format(FormatField::Bitrate(bitrate));
            return Ok(ParseStatus::Parsed);
        }

        sink.set_format(FormatField::Bitrate(f64::from(header.bitrate)));
        if sink.options().duration {
            tokenizer
                .ignore_exact(offset as u64)
                .await
                .map_err(|e| ParseError::from_reader(e, start))?;
            let samples = self.scan_samples(tokenizer, &header).await?;
            sink.set_format(FormatField::NumberOfSamples(samples));
            sink.set_format(FormatField::Duration(samples as f64 / sample_rate));
        } else if let Some(size) = tokenizer.file_info().size.or(sink.options().file_size) {
            let audio_len = size.saturating_sub(audio_start + self.trailer_len);
            let duration = audio_len as f64 * 8.0 / f64::from(header.bitrate);
            sink.set_format(FormatField::Duration(duration));
        }
        Ok(ParseStatus::Parsed)
    }
}
