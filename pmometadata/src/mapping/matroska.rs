//! Matroska `SimpleTag` names, prefixed with the target level (`track:`, `album:`, ...).

use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("segment:TITLE", C::Title),
    ("album:ARTIST", C::AlbumArtist),
    ("album:ARTISTSORT", C::AlbumArtistSort),
    ("album:TITLE", C::Album),
    ("album:DATE_RECORDED", C::OriginalDate),
    ("album:DATE_RELEASED", C::ReleaseDate),
    ("album:PART_NUMBER", C::Disk),
    ("album:TOTAL_PARTS", C::TotalTracks),
    ("track:ARTIST", C::Artist),
    ("track:ARTISTSORT", C::ArtistSort),
    ("track:TITLE", C::Title),
    ("track:PART_NUMBER", C::Track),
    ("track:MUSICBRAINZ_TRACKID", C::MusicBrainzRecordingId),
    ("track:MUSICBRAINZ_ALBUMID", C::MusicBrainzAlbumId),
    ("track:MUSICBRAINZ_ARTISTID", C::MusicBrainzArtistId),
    ("track:PUBLISHER", C::Label),
    ("track:GENRE", C::Genre),
    ("track:ENCODER", C::EncodedBy),
    ("track:ENCODER_OPTIONS", C::EncoderSettings),
    ("edition:TOTAL_PARTS", C::TotalDiscs),
    ("picture", C::Picture),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Matroska], TABLE).case_insensitive()
}
