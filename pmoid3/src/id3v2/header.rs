//! Tag header, extended header and frame headers.

use pmometadata::ParseError;
use pmoreader::token::{SyncSafeU32, Token, Uint24Be, Uint32Be, get_bit};

pub(crate) const MAGIC: &[u8; 3] = b"ID3";

/// Flags of the 10-byte tag header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagFlags {
    pub unsynchronisation: bool,
    /// ID3v2.3/2.4 only. In ID3v2.2 the same bit flags compression.
    pub extended_header: bool,
    pub experimental: bool,
    /// ID3v2.4 only.
    pub footer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub major: u8,
    pub revision: u8,
    pub flags: TagFlags,
    /// Size of the tag without header and footer.
    pub size: u32,
}

impl TagHeader {
    pub const LEN: usize = 10;
    pub const FOOTER_LEN: usize = 10;

    /// `Ok(None)` when the magic is not `"ID3"`.
    pub fn parse(raw: &[u8; Self::LEN], offset: u64) -> Result<Option<Self>, ParseError> {
        if &raw[..3] != MAGIC {
            return Ok(None);
        }
        let major = raw[3];
        if !(2..=4).contains(&major) {
            return Err(ParseError::UnsupportedVersion {
                offset: offset + 3,
                version: format!("ID3v2.{major}.{}", raw[4]),
            });
        }
        Ok(Some(Self {
            major,
            revision: raw[4],
            flags: TagFlags {
                unsynchronisation: get_bit(raw, 5, 7),
                extended_header: get_bit(raw, 5, 6),
                experimental: get_bit(raw, 5, 5),
                footer: get_bit(raw, 5, 4),
            },
            size: SyncSafeU32::get(&raw[6..10]),
        }))
    }

    /// Bytes from the start of this header to the next possible tag.
    pub fn total_len(&self) -> u64 {
        let footer = if self.major >= 4 && self.flags.footer {
            Self::FOOTER_LEN as u64
        } else {
            0
        };
        Self::LEN as u64 + u64::from(self.size) + footer
    }
}

/// Length of the extended header at the start of `data`, size field included.
///
/// ID3v2.3 stores the size without its own four bytes, ID3v2.4 stores it syncsafe
/// and inclusive.
pub fn extended_header_len(data: &[u8], major: u8, offset: u64) -> Result<usize, ParseError> {
    if data.len() < 4 {
        return Err(ParseError::malformed(
            offset,
            "extended header size",
            format!("{} bytes", data.len()),
        ));
    }
    let len = match major {
        3 => Uint32Be::get(data) as usize + 4,
        _ => SyncSafeU32::get(data) as usize,
    };
    if len < 4 || len > data.len() {
        return Err(ParseError::malformed(
            offset,
            format!("extended header within {} bytes of tag data", data.len()),
            format!("{len} bytes"),
        ));
    }
    Ok(len)
}

/// Format flags of a frame, normalised across versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFlags {
    pub grouping: bool,
    pub compression: bool,
    pub encryption: bool,
    pub unsynchronisation: bool,
    pub data_length_indicator: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub id: String,
    pub length: usize,
    pub flags: FrameFlags,
}

impl FrameHeader {
    /// 6 bytes for ID3v2.2, 10 bytes after.
    pub fn len(major: u8) -> usize {
        if major == 2 { 6 } else { 10 }
    }

    /// Decodes a frame header. `raw` holds at least [`FrameHeader::len`] bytes.
    pub fn parse(raw: &[u8], major: u8) -> Self {
        match major {
            2 => Self {
                id: raw[..3].iter().map(|&b| b as char).collect(),
                length: Uint24Be::get(&raw[3..6]) as usize,
                flags: FrameFlags::default(),
            },
            3 => Self {
                id: raw[..4].iter().map(|&b| b as char).collect(),
                length: Uint32Be::get(&raw[4..8]) as usize,
                flags: FrameFlags {
                    compression: get_bit(raw, 9, 7),
                    encryption: get_bit(raw, 9, 6),
                    grouping: get_bit(raw, 9, 5),
                    ..FrameFlags::default()
                },
            },
            _ => Self {
                id: raw[..4].iter().map(|&b| b as char).collect(),
                length: SyncSafeU32::get(&raw[4..8]) as usize,
                flags: FrameFlags {
                    grouping: get_bit(raw, 9, 6),
                    compression: get_bit(raw, 9, 3),
                    encryption: get_bit(raw, 9, 2),
                    unsynchronisation: get_bit(raw, 9, 1),
                    data_length_indicator: get_bit(raw, 9, 0),
                },
            },
        }
    }
}

/// Frame ids are three (ID3v2.2) or four upper-case letters or digits.
pub fn is_valid_frame_id(id: &str, major: u8) -> bool {
    let expected = if major == 2 { 3 } else { 4 };
    id.len() == expected && id.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
