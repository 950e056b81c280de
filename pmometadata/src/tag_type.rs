use std::fmt;

use serde::Serialize;

/// Native tagging dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TagType {
    #[serde(rename = "ID3v1")]
    Id3v1,
    #[serde(rename = "ID3v2.2")]
    Id3v22,
    #[serde(rename = "ID3v2.3")]
    Id3v23,
    #[serde(rename = "ID3v2.4")]
    Id3v24,
    #[serde(rename = "APEv2")]
    Ape,
    #[serde(rename = "vorbis")]
    Vorbis,
    #[serde(rename = "asf")]
    Asf,
    #[serde(rename = "iTunes")]
    ITunes,
    #[serde(rename = "exif")]
    Exif,
    #[serde(rename = "matroska")]
    Matroska,
    #[serde(rename = "AIFF")]
    Aiff,
}

impl TagType {
    pub const ALL: [TagType; 11] = [
        TagType::Id3v1,
        TagType::Id3v22,
        TagType::Id3v23,
        TagType::Id3v24,
        TagType::Ape,
        TagType::Vorbis,
        TagType::Asf,
        TagType::ITunes,
        TagType::Exif,
        TagType::Matroska,
        TagType::Aiff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TagType::Id3v1 => "ID3v1",
            TagType::Id3v22 => "ID3v2.2",
            TagType::Id3v23 => "ID3v2.3",
            TagType::Id3v24 => "ID3v2.4",
            TagType::Ape => "APEv2",
            TagType::Vorbis => "vorbis",
            TagType::Asf => "asf",
            TagType::ITunes => "iTunes",
            TagType::Exif => "exif",
            TagType::Matroska => "matroska",
            TagType::Aiff => "AIFF",
        }
    }

    /// The ID3v2 dialect for a major version, `None` for anything but 2, 3 or 4.
    pub fn id3v2(major: u8) -> Option<Self> {
        match major {
            2 => Some(TagType::Id3v22),
            3 => Some(TagType::Id3v23),
            4 => Some(TagType::Id3v24),
            _ => None,
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who supplied a common value. Lower rank wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Tag(TagType),
    /// Derived from another common value (artist from artists and back).
    Artificial,
}

impl Origin {
    /// Rank that never wins against a real value.
    pub const UNSET: u32 = 1000;

    pub fn rank(self) -> u32 {
        match self {
            Origin::Tag(TagType::Matroska) => 1,
            Origin::Tag(TagType::Ape) => 2,
            Origin::Tag(TagType::Vorbis) => 3,
            Origin::Tag(TagType::Id3v24) => 4,
            Origin::Tag(TagType::Id3v23) => 5,
            Origin::Tag(TagType::Id3v22) => 6,
            Origin::Tag(TagType::Exif) => 7,
            Origin::Tag(TagType::Asf) => 8,
            Origin::Tag(TagType::ITunes) => 9,
            Origin::Tag(TagType::Aiff) => 10,
            Origin::Artificial => 500,
            // Field lengths are capped at 30 bytes, so ID3v1 loses to everything.
            Origin::Tag(TagType::Id3v1) => 600,
        }
    }
}

impl From<TagType> for Origin {
    fn from(tag_type: TagType) -> Self {
        Origin::Tag(tag_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        let ranks: Vec<u32> = [
            TagType::Matroska,
            TagType::Ape,
            TagType::Vorbis,
            TagType::Id3v24,
            TagType::Id3v23,
            TagType::Id3v22,
            TagType::Exif,
            TagType::Asf,
            TagType::ITunes,
            TagType::Aiff,
        ]
        .into_iter()
        .map(|t| Origin::Tag(t).rank())
        .collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert!(Origin::Artificial.rank() < Origin::Tag(TagType::Id3v1).rank());
        assert!(Origin::Tag(TagType::Aiff).rank() < Origin::Artificial.rank());
    }

    #[test]
    fn display_names() {
        assert_eq!(TagType::Id3v23.to_string(), "ID3v2.3");
        assert_eq!(TagType::id3v2(4), Some(TagType::Id3v24));
        assert_eq!(TagType::id3v2(5), None);
    }
}
