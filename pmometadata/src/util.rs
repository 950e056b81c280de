//! Value normalisation helpers used by the merge rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    common::TrackNo,
    value::{LyricsContentType, LyricsTag, LyricsText, Ratio, TimestampFormat},
};

static LRC_LINE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2,3})\](.*)$").ok());

/// Parses the leading decimal integer of `text`, ignoring surrounding spaces.
///
/// `"12abc"` gives 12, `"abc"` gives `None`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

/// Parses the leading decimal number of `text`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0) || c == 'e' || c == 'E')
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse::<f64>().ok()
}

/// Parses `"-3.26 dB"` as decibels and a bare number as a linear ratio.
pub fn to_ratio(text: &str) -> Option<Ratio> {
    let mut parts = text.split_whitespace();
    let value = parse_float_prefix(parts.next()?)?;
    match parts.next() {
        Some(unit) if unit.eq_ignore_ascii_case("db") => Some(Ratio::from_db(value)),
        _ => Some(Ratio::from_ratio(value)),
    }
}

/// Splits `"3/12"` or `"3"` into a position pair. Zero counts as absent.
pub fn normalize_track(text: &str) -> TrackNo {
    let mut split = text.split('/');
    let parse = |part: Option<&str>| {
        part.and_then(parse_int_prefix)
            .filter(|&v| v != 0)
            .and_then(|v| i32::try_from(v).ok())
    };
    let no = parse(split.next());
    let of = parse(split.next());
    TrackNo { no, of }
}

/// The year at the start of a date string, if it has four leading digits.
pub fn leading_year(date: &str) -> Option<i64> {
    let head = date.get(..4)?;
    if head.chars().all(|c| c.is_ascii_digit()) {
        head.parse().ok()
    } else {
        None
    }
}

/// `"A"`, `"A & B"`, `"A, B & C"`.
pub fn join_artists(artists: &[String]) -> String {
    match artists {
        [] => String::new(),
        [single] => single.clone(),
        [init @ .., last] => format!("{} & {}", init.join(", "), last),
    }
}

/// Parses LRC (`[mm:ss.xx] text`) lyrics. Plain text yields an empty `sync_text`.
pub fn parse_lrc(text: &str) -> LyricsTag {
    let sync_text: Vec<LyricsText> = text
        .lines()
        .filter_map(|line| {
            let caps = LRC_LINE.as_ref()?.captures(line.trim_end())?;
            let minutes: u32 = caps[1].parse().ok()?;
            let seconds: u32 = caps[2].parse().ok()?;
            let fraction = &caps[3];
            let ms: u32 = fraction.parse().ok()?;
            let ms = if fraction.len() == 3 { ms } else { ms * 10 };
            Some(LyricsText {
                text: caps[4].trim().to_string(),
                timestamp: Some((minutes * 60 + seconds) * 1000 + ms),
            })
        })
        .collect();

    let time_stamp_format = if sync_text.is_empty() {
        TimestampFormat::NotSynchronized
    } else {
        TimestampFormat::Milliseconds
    };

    LyricsTag {
        content_type: LyricsContentType::Lyrics,
        time_stamp_format,
        text: Some(text.to_string()),
        sync_text,
        ..LyricsTag::default()
    }
}

/// Lower-cases a picture MIME type and expands the short forms some taggers write.
pub fn fix_picture_mime(format: &str) -> String {
    let format = format.trim().to_lowercase();
    match format.as_str() {
        "jpg" | "jpeg" | "image/jpg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        _ => format,
    }
}

/// Guesses an image MIME type from magic bytes.
pub fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data).ok().map(|f| f.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix() {
        assert_eq!(parse_int_prefix("2024-05-01"), Some(2024));
        assert_eq!(parse_int_prefix(" 120 "), Some(120));
        assert_eq!(parse_int_prefix("-7dB"), Some(-7));
        assert_eq!(parse_int_prefix("x1"), None);
    }

    #[test]
    fn ratio_with_and_without_unit() {
        let gain = to_ratio("-3.26 dB").unwrap();
        assert!((gain.db + 3.26).abs() < 1e-9);
        let peak = to_ratio("0.988").unwrap();
        assert!((peak.ratio - 0.988).abs() < 1e-9);
        assert!(to_ratio("loud").is_none());
    }

    #[test]
    fn track_pairs() {
        assert_eq!(normalize_track("3/12"), TrackNo { no: Some(3), of: Some(12) });
        assert_eq!(normalize_track("5"), TrackNo { no: Some(5), of: None });
        assert_eq!(normalize_track("/9"), TrackNo { no: None, of: Some(9) });
        assert_eq!(normalize_track("0"), TrackNo { no: None, of: None });
    }

    #[test]
    fn artists_are_joined() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_artists(&names(&["A"])), "A");
        assert_eq!(join_artists(&names(&["A", "B"])), "A & B");
        assert_eq!(join_artists(&names(&["A", "B", "C"])), "A, B & C");
    }

    #[test]
    fn lrc_lines() {
        let lyrics = parse_lrc("[00:01.50] Hello\n[01:02.345]World\nno stamp");
        assert_eq!(lyrics.time_stamp_format, TimestampFormat::Milliseconds);
        assert_eq!(lyrics.sync_text.len(), 2);
        assert_eq!(lyrics.sync_text[0].timestamp, Some(1500));
        assert_eq!(lyrics.sync_text[1].text, "World");
        assert_eq!(lyrics.sync_text[1].timestamp, Some(62_345));

        let plain = parse_lrc("just words");
        assert!(plain.sync_text.is_empty());
        assert_eq!(plain.text.as_deref(), Some("just words"));
    }

    #[test]
    fn picture_mime() {
        assert_eq!(fix_picture_mime("JPG"), "image/jpeg");
        assert_eq!(fix_picture_mime("image/jpg"), "image/jpeg");
        assert_eq!(fix_picture_mime("image/PNG"), "image/png");
        assert_eq!(
            sniff_image_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Some("image/png")
        );
        assert_eq!(sniff_image_mime(b"not an image"), None);
    }

    #[test]
    fn years() {
        assert_eq!(leading_year("1999-12-31"), Some(1999));
        assert_eq!(leading_year("99"), None);
        assert_eq!(leading_year("c. 1999"), None);
    }
}
