//! Encoded string decoding and NUL-terminator scanning.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE};

/// Character encodings found in binary tag formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1, one byte per code point.
    Latin1,
    /// UTF-16 with a byte order mark, little-endian when the BOM is missing.
    Utf16,
    Utf16Be,
    Utf16Le,
    Utf8,
}

impl TextEncoding {
    /// Maps the ID3v2 text-encoding byte.
    pub fn from_id3(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TextEncoding::Latin1),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf16Be),
            3 => Some(TextEncoding::Utf8),
            _ => None,
        }
    }

    /// Width of the NUL terminator in this encoding.
    pub fn null_terminator_len(self) -> usize {
        match self {
            TextEncoding::Utf16 | TextEncoding::Utf16Be | TextEncoding::Utf16Le => 2,
            TextEncoding::Latin1 | TextEncoding::Utf8 => 1,
        }
    }
}

pub fn decode_string(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        TextEncoding::Utf8 => UTF_8.decode(bytes).0.into_owned(),
        // `decode` sniffs the BOM and switches to big-endian when it says so.
        TextEncoding::Utf16 => UTF_16LE.decode(bytes).0.into_owned(),
        TextEncoding::Utf16Le => UTF_16LE.decode_without_bom_handling(bytes).0.into_owned(),
        TextEncoding::Utf16Be => UTF_16BE.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

/// Decodes a run of NUL-separated strings.
///
/// Every UTF-16 segment may start with its own BOM; a segment without one keeps
/// the byte order of the previous segment. A trailing terminator does not yield
/// an empty string, empty strings between separators are kept.
pub fn decode_strings(bytes: &[u8], encoding: TextEncoding) -> Vec<String> {
    let mut order = TextEncoding::Utf16Le;
    let mut values = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let end = find_zero(rest, encoding);
        let segment = &rest[..end];
        let value = match encoding {
            TextEncoding::Utf16 => {
                let body = match segment {
                    [0xFF, 0xFE, body @ ..] => {
                        order = TextEncoding::Utf16Le;
                        body
                    }
                    [0xFE, 0xFF, body @ ..] => {
                        order = TextEncoding::Utf16Be;
                        body
                    }
                    _ => segment,
                };
                decode_string(body, order)
            }
            _ => decode_string(segment, encoding),
        };
        values.push(value);
        rest = rest.get(end + encoding.null_terminator_len()..).unwrap_or_default();
    }
    values
}

/// Returns the offset of the first NUL terminator, or `bytes.len()` when there is none.
///
/// For UTF-16 encodings the terminator is a pair of zero bytes on an even offset.
pub fn find_zero(bytes: &[u8], encoding: TextEncoding) -> usize {
    if encoding.null_terminator_len() == 2 {
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == 0 && bytes[i + 1] == 0 {
                return i;
            }
            i += 2;
        }
        bytes.len()
    } else {
        bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
    }
}

/// Decodes a NUL-terminated string and returns it with the number of bytes
/// consumed, terminator included.
pub fn read_null_terminated(bytes: &[u8], encoding: TextEncoding) -> (String, usize) {
    let end = find_zero(bytes, encoding);
    let text = decode_string(&bytes[..end], encoding);
    let consumed = (end + encoding.null_terminator_len()).min(bytes.len());
    (text, consumed)
}

/// Removes trailing NUL characters.
pub fn trim_nul(text: &str) -> &str {
    text.trim_end_matches('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(decode_string(&[0x43, 0x61, 0x66, 0xE9], TextEncoding::Latin1), "Café");
    }

    #[test]
    fn utf16_honours_bom() {
        let le = [0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let be = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_string(&le, TextEncoding::Utf16), "Hi");
        assert_eq!(decode_string(&be, TextEncoding::Utf16), "Hi");
        assert_eq!(decode_string(&[0x00, b'A'], TextEncoding::Utf16Be), "A");
    }

    #[test]
    fn decode_strings_reads_a_bom_per_value() {
        let mixed = [
            0xFF, 0xFE, b'A', 0x00, 0x00, 0x00, 0xFE, 0xFF, 0x00, b'B', 0x00, 0x00, 0x00, b'C',
        ];
        assert_eq!(decode_strings(&mixed, TextEncoding::Utf16), vec!["A", "B", "C"]);
        assert_eq!(decode_strings(b"a\0\0b\0", TextEncoding::Latin1), vec!["a", "", "b"]);
        assert!(decode_strings(&[], TextEncoding::Utf8).is_empty());
    }

    #[test]
    fn find_zero_per_encoding() {
        assert_eq!(find_zero(b"abc\0def", TextEncoding::Latin1), 3);
        assert_eq!(find_zero(b"abc", TextEncoding::Utf8), 3);
        // 'A' 0x00 is a character, not a terminator; the pair must be aligned.
        let utf16 = [b'A', 0x00, 0x00, 0x00, b'B', 0x00];
        assert_eq!(find_zero(&utf16, TextEncoding::Utf16Le), 2);
        let misaligned = [0x00, b'A', 0x00, b'B'];
        assert_eq!(find_zero(&misaligned, TextEncoding::Utf16Be), 4);
    }

    #[test]
    fn null_terminated_reports_consumed_length() {
        assert_eq!(
            read_null_terminated(b"desc\0rest", TextEncoding::Latin1),
            ("desc".to_string(), 5)
        );
        let utf16 = [0xFF, 0xFE, b'x', 0x00, 0x00, 0x00, b'y', 0x00];
        assert_eq!(
            read_null_terminated(&utf16, TextEncoding::Utf16),
            ("x".to_string(), 6)
        );
        assert_eq!(
            read_null_terminated(b"open", TextEncoding::Latin1),
            ("open".to_string(), 4)
        );
    }
}
