use super::TableMapper;
use crate::{
    common::CommonTagId as C,
    tag_type::TagType,
    util,
    value::{NativeTag, Rating, TagValue},
};

const TABLE: &[(&str, C)] = &[
    ("Title", C::Title),
    ("Author", C::Artist),
    ("WM/AlbumArtist", C::AlbumArtist),
    ("WM/AlbumTitle", C::Album),
    ("WM/Year", C::Date),
    ("WM/OriginalReleaseTime", C::OriginalDate),
    ("WM/OriginalReleaseYear", C::OriginalYear),
    ("Description", C::Comment),
    ("WM/TrackNumber", C::Track),
    ("WM/PartOfSet", C::Disk),
    ("WM/Genre", C::Genre),
    ("WM/Composer", C::Composer),
    ("WM/Lyrics", C::Lyrics),
    ("WM/AlbumSortOrder", C::AlbumSort),
    ("WM/TitleSortOrder", C::TitleSort),
    ("WM/ArtistSortOrder", C::ArtistSort),
    ("WM/AlbumArtistSortOrder", C::AlbumArtistSort),
    ("WM/ComposerSortOrder", C::ComposerSort),
    ("WM/Writer", C::Lyricist),
    ("WM/Conductor", C::Conductor),
    ("WM/ModifiedBy", C::Remixer),
    ("WM/Engineer", C::Engineer),
    ("WM/Producer", C::Producer),
    ("WM/DJMixer", C::DjMixer),
    ("WM/Mixer", C::Mixer),
    ("WM/Publisher", C::Label),
    ("WM/ContentGroupDescription", C::Grouping),
    ("WM/SubTitle", C::Subtitle),
    ("WM/SetSubTitle", C::DiscSubtitle),
    ("WM/IsCompilation", C::Compilation),
    ("WM/SharedUserRating", C::Rating),
    ("WM/BeatsPerMinute", C::Bpm),
    ("WM/Mood", C::Mood),
    ("WM/Media", C::Media),
    ("WM/CatalogNo", C::CatalogNumber),
    ("MusicBrainz/Album Status", C::ReleaseStatus),
    ("MusicBrainz/Album Type", C::ReleaseType),
    ("MusicBrainz/Album Release Country", C::ReleaseCountry),
    ("WM/Script", C::Script),
    ("WM/Language", C::Language),
    ("Copyright", C::Copyright),
    ("LICENSE", C::License),
    ("WM/EncodedBy", C::EncodedBy),
    ("WM/EncodingSettings", C::EncoderSettings),
    ("WM/Barcode", C::Barcode),
    ("WM/ISRC", C::Isrc),
    ("MusicBrainz/Track Id", C::MusicBrainzRecordingId),
    ("MusicBrainz/Release Track Id", C::MusicBrainzTrackId),
    ("MusicBrainz/Album Id", C::MusicBrainzAlbumId),
    ("MusicBrainz/Artist Id", C::MusicBrainzArtistId),
    ("MusicBrainz/Album Artist Id", C::MusicBrainzAlbumArtistId),
    ("MusicBrainz/Release Group Id", C::MusicBrainzReleaseGroupId),
    ("MusicBrainz/Work Id", C::MusicBrainzWorkId),
    ("MusicBrainz/TRM Id", C::MusicBrainzTrmId),
    ("MusicBrainz/Disc Id", C::MusicBrainzDiscId),
    ("Acoustid/Id", C::AcoustIdId),
    ("Acoustid/Fingerprint", C::AcoustIdFingerprint),
    ("MusicIP/PUID", C::MusicIpPuid),
    ("WM/ARTISTS", C::Artists),
    ("WM/InitialKey", C::Key),
    ("ASIN", C::Asin),
    ("WM/Work", C::Work),
    ("WM/AuthorURL", C::Website),
    ("WM/Picture", C::Picture),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Asf], TABLE).with_post_map(post_map)
}

/// `WM/SharedUserRating` runs from 0 to 99.
fn post_map(tag: NativeTag, _warnings: &mut Vec<String>) -> Option<NativeTag> {
    if tag.id != "WM/SharedUserRating" {
        return Some(tag);
    }
    let score = match &tag.value {
        TagValue::Int(v) => Some(*v as f64),
        TagValue::Text(text) => util::parse_float_prefix(text),
        _ => None,
    };
    let rating = Rating {
        source: None,
        rating: score.map(|s| (s / 99.0).clamp(0.0, 1.0)),
    };
    Some(NativeTag::new(tag.id, TagValue::Rating(rating)))
}
