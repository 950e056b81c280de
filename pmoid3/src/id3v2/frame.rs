//! Frame iteration and payload grammar.
//!
//! [`FrameDecoder::parse_frames`] walks a window of frame bytes and returns the
//! native tags they carry. `CHAP` and `CTOC` payloads embed further frames;
//! they are decoded by calling `parse_frames` again one level deeper.

use std::borrow::Cow;

use bytes::Bytes;
use pmometadata::{
    Chapter, Comment, EncapsulatedObject, Identifier, LyricsContentType, LyricsTag, LyricsText,
    NativeTag, Picture, Popularimeter, TableOfContents, TagValue, TimestampFormat, UrlLink,
};
use pmoreader::{
    TextEncoding,
    text::{decode_string, decode_strings, read_null_terminated, trim_nul},
};
use tracing::{debug, trace};

use super::{
    header::{FrameHeader, is_valid_frame_id},
    unsync::remove_unsync_bytes,
};
use crate::genres::parse_genre;

/// Nesting limit for frames embedded in `CHAP`/`CTOC`.
pub(crate) const MAX_DEPTH: usize = 4;

/// ID3v2.2/2.3 frames whose values are separated by `/`.
const SLASH_SEPARATED: &[&str] = &[
    "TCOM", "TEXT", "TOLY", "TOPE", "TPE1", "TSRC", "TCM", "TXT", "TOL", "TOA", "TP1",
];

const PICTURE_TYPES: [&str; 21] = [
    "Other",
    "32x32 pixels 'file icon' (PNG only)",
    "Other file icon",
    "Cover (front)",
    "Cover (back)",
    "Leaflet page",
    "Media (e.g. label side of CD)",
    "Lead artist/lead performer/soloist",
    "Artist/performer",
    "Conductor",
    "Band/Orchestra",
    "Composer",
    "Lyricist/text writer",
    "Recording Location",
    "During recording",
    "During performance",
    "Movie/video screen capture",
    "A bright coloured fish",
    "Illustration",
    "Band/artist logotype",
    "Publisher/Studio logotype",
];

/// Decodes the frames of one tag.
pub(crate) struct FrameDecoder {
    major: u8,
    /// ID3v2.4 tag-level unsynchronisation, applied to every frame.
    unsync_frames: bool,
    include_covers: bool,
    warnings: Vec<String>,
}

impl FrameDecoder {
    pub fn new(major: u8, include_covers: bool) -> Self {
        Self {
            major,
            unsync_frames: false,
            include_covers,
            warnings: Vec::new(),
        }
    }

    pub fn with_unsync_frames(mut self, unsync: bool) -> Self {
        self.unsync_frames = unsync;
        self
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn parse_frames(&mut self, data: &[u8], depth: usize) -> Vec<NativeTag> {
        let mut tags = Vec::new();
        if depth > MAX_DEPTH {
            self.warn(format!("ID3v2.{} sub-frames nested deeper than {MAX_DEPTH} levels", self.major));
            return tags;
        }

        let header_len = FrameHeader::len(self.major);
        let mut offset = 0;
        while offset < data.len() {
            let rest = &data[offset..];
            if rest[0] == 0 {
                // Padding.
                break;
            }
            if rest.len() < header_len {
                self.warn(format!(
                    "ID3v2.{}: {} bytes left, too short for a frame header",
                    self.major,
                    rest.len()
                ));
                break;
            }
            let header = FrameHeader::parse(rest, self.major);
            if !is_valid_frame_id(&header.id, self.major) {
                self.warn(format!("Invalid ID3v2.{} frame-header-ID: {:?}", self.major, header.id));
                break;
            }
            let available = rest.len() - header_len;
            if header.length > available {
                self.warn(format!(
                    "ID3v2.{} frame {} is {} bytes long but only {available} bytes remain",
                    self.major, header.id, header.length
                ));
                break;
            }
            offset += header_len + header.length;

            let raw = &rest[header_len..header_len + header.length];
            let Some(payload) = self.frame_payload(&header, raw) else {
                continue;
            };
            trace!(id = %header.id, len = payload.len(), "ID3v2 frame");
            tags.extend(self.decode(&header.id, &payload, depth));
        }
        tags
    }

    /// Undoes the per-frame transformations announced by the format flags.
    fn frame_payload<'a>(&mut self, header: &FrameHeader, raw: &'a [u8]) -> Option<Cow<'a, [u8]>> {
        let flags = header.flags;
        if flags.compression || flags.encryption {
            let what = if flags.compression { "compressed" } else { "encrypted" };
            self.warn(format!("ID3v2.{} frame {} is {what}, skipping", self.major, header.id));
            return None;
        }

        let mut payload = Cow::Borrowed(raw);
        if self.major >= 4 && (flags.unsynchronisation || self.unsync_frames) {
            payload = Cow::Owned(remove_unsync_bytes(&payload));
        }
        let mut skip = 0;
        if flags.grouping {
            skip += 1;
        }
        if flags.data_length_indicator {
            skip += 4;
        }
        if payload.len() < skip {
            self.warn(format!("ID3v2.{} frame {} is truncated", self.major, header.id));
            return None;
        }
        Some(match payload {
            Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[skip..]),
            Cow::Owned(mut bytes) => {
                bytes.drain(..skip);
                Cow::Owned(bytes)
            }
        })
    }

    fn decode(&mut self, id: &str, payload: &[u8], depth: usize) -> Vec<NativeTag> {
        if payload.is_empty() {
            debug!(id, "Empty ID3v2 frame");
            return Vec::new();
        }
        let decoded = match id {
            "TXXX" | "TXX" => self.user_text(id, payload),
            "TIPL" | "TMCL" | "IPLS" | "IPL" => Some(self.involved_people(id, payload)),
            "PCST" | "PCS" => Some(vec![NativeTag::new(
                id,
                TagValue::Int(i64::from(payload.iter().all(|&b| b == 0))),
            )]),
            "WFED" | "WFD" | "MVNM" | "MVIN" | "GRP1" => {
                let text = self.text(id, payload);
                Some(single(id, TagValue::Text(text.trim().to_string())))
            }
            "APIC" | "PIC" => {
                if !self.include_covers {
                    return Vec::new();
                }
                self.picture(payload).map(|pic| single(id, TagValue::Picture(pic)))
            }
            "COMM" | "COM" => self
                .comment(id, payload)
                .map(|comment| single(id, TagValue::Comment(comment))),
            "USLT" | "ULT" => self.comment(id, payload).map(|comment| {
                let lyrics = LyricsTag {
                    language: comment.language,
                    descriptor: comment.descriptor,
                    text: comment.text,
                    ..LyricsTag::default()
                };
                single(id, TagValue::Lyrics(lyrics))
            }),
            "SYLT" | "SLT" => self
                .synchronised_lyrics(id, payload)
                .map(|lyrics| single(id, TagValue::Lyrics(lyrics))),
            "UFID" | "UFI" | "PRIV" => identifier(payload).map(|ident| single(id, TagValue::Identifier(ident))),
            "POPM" | "POP" => popularimeter(payload).map(|popm| single(id, TagValue::Popularimeter(popm))),
            "PCNT" | "CNT" => Some(single(id, TagValue::Int(be_uint(payload) as i64))),
            "GEOB" | "GEO" => self.object(id, payload).map(|obj| single(id, TagValue::Object(obj))),
            "WXXX" | "WXX" => self.user_url(id, payload).map(|url| single(id, TagValue::Url(url))),
            "MCDI" | "MCI" => Some(single(id, TagValue::Binary(Bytes::copy_from_slice(payload)))),
            "CHAP" => self
                .chapter(payload, depth)
                .map(|chapter| single(id, TagValue::Chapter(chapter))),
            "CTOC" => self
                .table_of_contents(payload, depth)
                .map(|toc| single(id, TagValue::TableOfContents(toc))),
            _ if id.starts_with('T') => Some(self.text_frame(id, payload)),
            _ if id.starts_with('W') => {
                let url = decode_string(payload, TextEncoding::Latin1);
                Some(single(id, TagValue::Text(trim_nul(&url).trim().to_string())))
            }
            _ => {
                debug!(id, len = payload.len(), "Ignoring unsupported ID3v2 frame");
                Some(Vec::new())
            }
        };
        decoded.unwrap_or_else(|| {
            self.warn(format!("ID3v2.{} frame {id} is truncated", self.major));
            Vec::new()
        })
    }

    fn encoding(&mut self, id: &str, byte: u8) -> TextEncoding {
        TextEncoding::from_id3(byte).unwrap_or_else(|| {
            self.warn(format!(
                "ID3v2.{} frame {id} has invalid text encoding {byte}, using latin1",
                self.major
            ));
            TextEncoding::Latin1
        })
    }

    /// Encoding byte followed by text. Values are decoded one by one and
    /// joined back with NUL, so a BOM in front of each value is consumed.
    fn text(&mut self, id: &str, payload: &[u8]) -> String {
        let encoding = self.encoding(id, payload[0]);
        decode_strings(&payload[1..], encoding).join("\0")
    }

    fn text_frame(&mut self, id: &str, payload: &[u8]) -> Vec<NativeTag> {
        let text = self.text(id, payload);
        let mut values = self.split_values(id, &text);
        if matches!(id, "TCON" | "TCO") {
            values = values.iter().flat_map(|value| parse_genre(value)).collect();
        }
        values
            .into_iter()
            .map(|value| NativeTag::new(id, TagValue::Text(value)))
            .collect()
    }

    fn split_values(&mut self, id: &str, text: &str) -> Vec<String> {
        let has_separator = trim_nul(text).contains('\0');
        let values: Vec<&str> = if self.major >= 4 {
            if matches!(id, "TRCK" | "TPOS") {
                vec![text]
            } else {
                text.split('\0').collect()
            }
        } else if SLASH_SEPARATED.contains(&id) {
            if has_separator {
                self.warn_null_separator(id);
                text.split('\0').collect()
            } else {
                text.split('/').collect()
            }
        } else if matches!(id, "TCON" | "TCO" | "TXXX" | "TXX") && has_separator {
            self.warn_null_separator(id);
            text.split('\0').collect()
        } else {
            vec![text]
        };
        values
            .into_iter()
            .map(|value| trim_nul(value).trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    fn warn_null_separator(&mut self, id: &str) {
        self.warn(format!("ID3v2.{} {id} uses non standard null-separator.", self.major));
    }

    fn user_text(&mut self, id: &str, payload: &[u8]) -> Option<Vec<NativeTag>> {
        let encoding = self.encoding(id, payload[0]);
        let (description, consumed) = read_null_terminated(&payload[1..], encoding);
        let text = decode_strings(payload.get(1 + consumed..)?, encoding).join("\0");
        let key = format!("{id}:{description}");
        Some(
            self.split_values(id, &text)
                .into_iter()
                .map(|value| NativeTag::new(key.as_str(), TagValue::Text(value)))
                .collect(),
        )
    }

    /// `TIPL`/`TMCL`/`IPLS`: alternating function and names, emitted as `<id>:<function>`.
    fn involved_people(&mut self, id: &str, payload: &[u8]) -> Vec<NativeTag> {
        let text = self.text(id, payload);
        let fields: Vec<&str> = trim_nul(&text).split('\0').collect();
        let mut tags = Vec::new();
        for pair in fields.chunks_exact(2) {
            let function = pair[0].trim();
            let key = format!("{id}:{function}");
            tags.extend(
                pair[1]
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| NativeTag::new(key.as_str(), TagValue::Text(name.to_string()))),
            );
        }
        tags
    }

    fn picture(&mut self, payload: &[u8]) -> Option<Picture> {
        let mut cursor = Cursor::new(payload);
        let encoding = self.encoding("APIC", cursor.byte()?);
        let format = if self.major == 2 {
            decode_string(cursor.take(3)?, TextEncoding::Latin1)
        } else {
            cursor.text(TextEncoding::Latin1)
        };
        let picture_type = PICTURE_TYPES.get(usize::from(cursor.byte()?)).copied();
        let description = cursor.text(encoding);
        Some(Picture {
            format: trim_nul(&format).to_string(),
            picture_type: picture_type.map(str::to_string),
            description: Some(description).filter(|d| !d.is_empty()),
            name: None,
            data: Bytes::copy_from_slice(cursor.rest()),
        })
    }

    /// `COMM`/`USLT`: encoding, language, descriptor, text.
    fn comment(&mut self, id: &str, payload: &[u8]) -> Option<Comment> {
        let mut cursor = Cursor::new(payload);
        let encoding = self.encoding(id, cursor.byte()?);
        let language = decode_string(cursor.take(3)?, TextEncoding::Latin1);
        let descriptor = cursor.text(encoding);
        let text = decode_string(cursor.rest(), encoding);
        Some(Comment {
            language: Some(language).filter(|l| !l.trim_matches('\0').is_empty()),
            descriptor: Some(descriptor).filter(|d| !d.is_empty()),
            text: Some(trim_nul(&text).to_string()),
        })
    }

    fn synchronised_lyrics(&mut self, id: &str, payload: &[u8]) -> Option<LyricsTag> {
        let mut cursor = Cursor::new(payload);
        let encoding = self.encoding(id, cursor.byte()?);
        let language = decode_string(cursor.take(3)?, TextEncoding::Latin1);
        let time_stamp_format = TimestampFormat::from_byte(cursor.byte()?);
        let content_type = LyricsContentType::from_byte(cursor.byte()?);
        let descriptor = cursor.text(encoding);

        let mut sync_text = Vec::new();
        while !cursor.is_empty() {
            let text = cursor.text(encoding);
            let timestamp = cursor.take(4).map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]));
            sync_text.push(LyricsText { text, timestamp });
        }
        Some(LyricsTag {
            language: Some(language),
            descriptor: Some(descriptor).filter(|d| !d.is_empty()),
            content_type,
            time_stamp_format,
            text: None,
            sync_text,
        })
    }

    fn object(&mut self, id: &str, payload: &[u8]) -> Option<EncapsulatedObject> {
        let mut cursor = Cursor::new(payload);
        let encoding = self.encoding(id, cursor.byte()?);
        let mime_type = cursor.text(TextEncoding::Latin1);
        let filename = cursor.text(encoding);
        let description = cursor.text(encoding);
        Some(EncapsulatedObject {
            mime_type,
            filename,
            description,
            data: Bytes::copy_from_slice(cursor.rest()),
        })
    }

    fn user_url(&mut self, id: &str, payload: &[u8]) -> Option<UrlLink> {
        let mut cursor = Cursor::new(payload);
        let encoding = self.encoding(id, cursor.byte()?);
        let description = cursor.text(encoding);
        let url = decode_string(cursor.rest(), TextEncoding::Latin1);
        Some(UrlLink {
            description,
            url: trim_nul(&url).trim().to_string(),
        })
    }

    fn chapter(&mut self, payload: &[u8], depth: usize) -> Option<Chapter> {
        let mut cursor = Cursor::new(payload);
        let element_id = cursor.text(TextEncoding::Latin1);
        let start_time = cursor.u32()?;
        let end_time = cursor.u32()?;
        let start_offset = cursor.u32()?;
        let end_offset = cursor.u32()?;
        let unset = |offset: u32| (offset != u32::MAX).then_some(offset);
        Some(Chapter {
            element_id,
            start_time,
            end_time,
            start_offset: unset(start_offset),
            end_offset: unset(end_offset),
            frames: self.parse_frames(cursor.rest(), depth + 1),
        })
    }

    fn table_of_contents(&mut self, payload: &[u8], depth: usize) -> Option<TableOfContents> {
        let mut cursor = Cursor::new(payload);
        let element_id = cursor.text(TextEncoding::Latin1);
        let flags = cursor.byte()?;
        let entry_count = cursor.byte()?;
        let mut child_element_ids = Vec::with_capacity(usize::from(entry_count));
        for _ in 0..entry_count {
            if cursor.is_empty() {
                return None;
            }
            child_element_ids.push(cursor.text(TextEncoding::Latin1));
        }
        Some(TableOfContents {
            element_id,
            top_level: flags & 0x02 != 0,
            ordered: flags & 0x01 != 0,
            child_element_ids,
            frames: self.parse_frames(cursor.rest(), depth + 1),
        })
    }
}

fn single(id: &str, value: TagValue) -> Vec<NativeTag> {
    vec![NativeTag::new(id, value)]
}

/// `UFID`/`PRIV`: latin1 owner then opaque data.
fn identifier(payload: &[u8]) -> Option<Identifier> {
    let mut cursor = Cursor::new(payload);
    let owner = cursor.text(TextEncoding::Latin1);
    Some(Identifier {
        owner,
        data: Bytes::copy_from_slice(cursor.rest()),
    })
}

fn popularimeter(payload: &[u8]) -> Option<Popularimeter> {
    let mut cursor = Cursor::new(payload);
    let email = cursor.text(TextEncoding::Latin1);
    let rating = cursor.byte()?;
    let counter = (!cursor.is_empty()).then(|| be_uint(cursor.rest()));
    Some(Popularimeter {
        email,
        rating,
        counter,
    })
}

/// Big-endian unsigned integer of any width up to eight bytes.
fn be_uint(bytes: &[u8]) -> u64 {
    let start = bytes.len().saturating_sub(8);
    bytes[start..].iter().fold(0, |acc, &b| acc << 8 | u64::from(b))
}

/// Forward-only view over a frame payload.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let bytes = self.data.get(self.pos..self.pos + len)?;
        self.pos += len;
        Some(bytes)
    }

    fn u32(&mut self) -> Option<u32> {
        self.take(4).map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// NUL-terminated string; the terminator may be missing at the end of the payload.
    fn text(&mut self, encoding: TextEncoding) -> String {
        let (text, consumed) = read_null_terminated(self.rest(), encoding);
        self.pos += consumed;
        text
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: &str, payload: &[u8], major: u8) -> Vec<u8> {
        let mut out = id.as_bytes().to_vec();
        let len = payload.len() as u32;
        match major {
            2 => out.extend_from_slice(&len.to_be_bytes()[1..]),
            3 => out.extend_from_slice(&len.to_be_bytes()),
            _ => out.extend_from_slice(&pmoreader::token::encode_syncsafe(len)),
        }
        if major > 2 {
            out.extend_from_slice(&[0, 0]);
        }
        out.extend_from_slice(payload);
        out
    }

    fn texts(tags: &[NativeTag]) -> Vec<&str> {
        tags.iter().filter_map(|t| t.value.as_text()).collect()
    }

    #[test]
    fn v4_splits_on_nul() {
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("TPE1", b"\x03A\0B\0", 4), 0);
        assert_eq!(texts(&tags), vec!["A", "B"]);
        assert!(decoder.take_warnings().is_empty());
    }

    #[test]
    fn v4_utf16_values_carry_their_own_bom() {
        let payload = [
            0x01, 0xFF, 0xFE, b'A', 0, 0, 0, 0xFF, 0xFE, b'B', 0,
        ];
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("TPE1", &payload, 4), 0);
        assert_eq!(texts(&tags), vec!["A", "B"]);

        let tipl = [
            0x01, 0xFF, 0xFE, b'm', 0, b'i', 0, b'x', 0, 0, 0, 0xFF, 0xFE, b'C', 0, b'y', 0, 0, 0,
            0xFF, 0xFE, b'p', 0, 0, 0, 0xFF, 0xFE, b'D', 0,
        ];
        let tags = decoder.parse_frames(&frame("TIPL", &tipl, 4), 0);
        let ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["TIPL:mix", "TIPL:p"]);
        assert_eq!(texts(&tags), vec!["Cy", "D"]);
    }

    #[test]
    fn v4_keeps_track_position_whole() {
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("TRCK", b"\x003/12", 4), 0);
        assert_eq!(texts(&tags), vec!["3/12"]);
    }

    #[test]
    fn v3_slash_split_is_limited_to_allowlist() {
        let mut decoder = FrameDecoder::new(3, true);
        let mut data = frame("TPE1", b"\x00A/B", 3);
        data.extend(frame("TIT2", b"\x00AC/DC live", 3));
        let tags = decoder.parse_frames(&data, 0);
        assert_eq!(texts(&tags), vec!["A", "B", "AC/DC live"]);
    }

    #[test]
    fn v3_null_separator_is_tolerated_with_warning() {
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("TPE1", b"\x00A\0B", 3), 0);
        assert_eq!(texts(&tags), vec!["A", "B"]);
        assert_eq!(
            decoder.take_warnings(),
            vec!["ID3v2.3 TPE1 uses non standard null-separator.".to_string()]
        );
    }

    #[test]
    fn user_text_is_keyed_by_description() {
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("TXXX", b"\x00REPLAYGAIN_TRACK_GAIN\0-6.5 dB", 4), 0);
        assert_eq!(tags, vec![NativeTag::new("TXXX:REPLAYGAIN_TRACK_GAIN", "-6.5 dB".into())]);
    }

    #[test]
    fn utf16_user_text_uses_wide_terminator() {
        let payload = [
            0x01, 0xFF, 0xFE, b'k', 0, 0, 0, 0xFF, 0xFE, b'v', 0,
        ];
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("TXXX", &payload, 3), 0);
        assert_eq!(tags, vec![NativeTag::new("TXXX:k", "v".into())]);
    }

    #[test]
    fn genre_references_are_resolved() {
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("TCON", b"\x00(17)(RX)", 3), 0);
        assert_eq!(texts(&tags), vec!["Rock", "Remix"]);
    }

    #[test]
    fn involved_people_pairs() {
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("TIPL", b"\x00producer\0Ann, Bob\0mix\0Cy", 4), 0);
        let ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["TIPL:producer", "TIPL:producer", "TIPL:mix"]);
        assert_eq!(texts(&tags), vec!["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn picture_frame() {
        let mut payload = b"\x00image/png\0\x03cover\0".to_vec();
        payload.extend_from_slice(&[0x89, b'P', b'N', b'G']);
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("APIC", &payload, 3), 0);
        let TagValue::Picture(picture) = &tags[0].value else {
            panic!("expected a picture, got {:?}", tags[0].value);
        };
        assert_eq!(picture.format, "image/png");
        assert_eq!(picture.picture_type.as_deref(), Some("Cover (front)"));
        assert_eq!(picture.description.as_deref(), Some("cover"));
        assert_eq!(picture.data.len(), 4);

        let mut no_covers = FrameDecoder::new(3, false);
        assert!(no_covers.parse_frames(&frame("APIC", &payload, 3), 0).is_empty());
    }

    #[test]
    fn v22_picture_has_fixed_format() {
        let payload = b"\x00JPG\x00\0\xFF\xD8";
        let mut decoder = FrameDecoder::new(2, true);
        let tags = decoder.parse_frames(&frame("PIC", payload, 2), 0);
        let TagValue::Picture(picture) = &tags[0].value else {
            panic!("expected a picture");
        };
        assert_eq!(picture.format, "JPG");
        assert_eq!(picture.picture_type.as_deref(), Some("Other"));
        assert_eq!(picture.data.as_ref(), &[0xFF, 0xD8]);
    }

    #[test]
    fn comment_frame() {
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("COMM", b"\x00engiTunPGAP\x001", 3), 0);
        assert_eq!(
            tags[0].value,
            TagValue::Comment(Comment {
                language: Some("eng".into()),
                descriptor: Some("iTunPGAP".into()),
                text: Some("1".into()),
            })
        );
    }

    #[test]
    fn synchronised_lyrics() {
        let mut payload = b"\x00eng\x02\x01\0".to_vec();
        payload.extend_from_slice(b"Hel\0\x00\x00\x00\x10lo\0\x00\x00\x01\x00");
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&frame("SYLT", &payload, 4), 0);
        let TagValue::Lyrics(lyrics) = &tags[0].value else {
            panic!("expected lyrics");
        };
        assert_eq!(lyrics.time_stamp_format, TimestampFormat::Milliseconds);
        assert_eq!(lyrics.content_type, LyricsContentType::Lyrics);
        assert_eq!(
            lyrics.sync_text,
            vec![
                LyricsText { text: "Hel".into(), timestamp: Some(16) },
                LyricsText { text: "lo".into(), timestamp: Some(256) },
            ]
        );
    }

    #[test]
    fn popularimeter_with_counter() {
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&frame("POPM", b"me@x\0\xFF\x00\x00\x01\x00", 3), 0);
        assert_eq!(
            tags[0].value,
            TagValue::Popularimeter(Popularimeter {
                email: "me@x".into(),
                rating: 255,
                counter: Some(256),
            })
        );
    }

    #[test]
    fn chapters_embed_frames() {
        let sub = frame("TIT2", b"\x00Intro", 4);
        let mut chap = b"ch1\0".to_vec();
        chap.extend_from_slice(&0u32.to_be_bytes());
        chap.extend_from_slice(&5000u32.to_be_bytes());
        chap.extend_from_slice(&[0xFF; 4]);
        chap.extend_from_slice(&[0xFF; 4]);
        chap.extend_from_slice(&sub);

        let mut toc = b"toc\0\x03\x01ch1\0".to_vec();
        toc.extend_from_slice(&sub);

        let mut data = frame("CHAP", &chap, 4);
        data.extend(frame("CTOC", &toc, 4));
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&data, 0);

        let TagValue::Chapter(chapter) = &tags[0].value else {
            panic!("expected a chapter");
        };
        assert_eq!(chapter.element_id, "ch1");
        assert_eq!((chapter.start_time, chapter.end_time), (0, 5000));
        assert_eq!(chapter.start_offset, None);
        assert_eq!(chapter.frames, vec![NativeTag::new("TIT2", "Intro".into())]);

        let TagValue::TableOfContents(toc) = &tags[1].value else {
            panic!("expected a table of contents");
        };
        assert!(toc.top_level && toc.ordered);
        assert_eq!(toc.child_element_ids, vec!["ch1"]);
        assert_eq!(toc.frames.len(), 1);
    }

    #[test]
    fn nesting_is_bounded() {
        let mut decoder = FrameDecoder::new(4, true);
        assert!(decoder.parse_frames(&frame("TIT2", b"\x00x", 4), MAX_DEPTH + 1).is_empty());
        assert_eq!(decoder.take_warnings().len(), 1);
    }

    #[test]
    fn oversized_frame_stops_with_one_warning() {
        let mut data = frame("TIT2", b"\x00ok", 3);
        let mut bad = frame("TALB", b"\x00xx", 3);
        bad[7] = 0x40;
        data.extend(bad);
        let mut decoder = FrameDecoder::new(3, true);
        let tags = decoder.parse_frames(&data, 0);
        assert_eq!(texts(&tags), vec!["ok"]);
        assert_eq!(decoder.take_warnings().len(), 1);
    }

    #[test]
    fn padding_and_bad_ids() {
        let mut data = frame("TIT2", b"\x00ok", 4);
        data.extend_from_slice(&[0; 16]);
        let mut decoder = FrameDecoder::new(4, true);
        assert_eq!(decoder.parse_frames(&data, 0).len(), 1);
        assert!(decoder.take_warnings().is_empty());

        let mut data = frame("TIT2", b"\x00ok", 4);
        data.extend_from_slice(b"ab!?\0\0\0\x01\0\0x");
        assert_eq!(decoder.parse_frames(&data, 0).len(), 1);
        assert_eq!(decoder.take_warnings().len(), 1);
    }

    #[test]
    fn v4_frame_unsync_and_data_length_indicator() {
        // DLI (4 bytes) then "\x00" encoding, then 0xFF 0x00 stuffed inside the text.
        let payload = [0, 0, 0, 4, 0x00, b'a', 0xFF, 0x00, b'b'];
        let mut raw = frame("TIT2", &payload, 4);
        raw[9] = 0x03;
        let mut decoder = FrameDecoder::new(4, true);
        let tags = decoder.parse_frames(&raw, 0);
        assert_eq!(texts(&tags), vec!["a\u{FF}b"]);
    }

    #[test]
    fn compressed_frames_are_skipped() {
        let mut raw = frame("TIT2", b"\x00zz", 4);
        raw[9] = 0x08;
        let mut decoder = FrameDecoder::new(4, true);
        assert!(decoder.parse_frames(&raw, 0).is_empty());
        assert_eq!(decoder.take_warnings().len(), 1);
    }

    #[test]
    fn unknown_frames_are_silent() {
        let mut decoder = FrameDecoder::new(4, true);
        assert!(decoder.parse_frames(&frame("XYZW", b"data", 4), 0).is_empty());
        assert!(decoder.take_warnings().is_empty());
    }
}
