use super::TableMapper;
use crate::{
    common::CommonTagId as C,
    tag_type::TagType,
    util,
    value::{NativeTag, Rating, TagValue},
};

const TABLE: &[(&str, C)] = &[
    ("TITLE", C::Title),
    ("ARTIST", C::Artist),
    ("ARTISTS", C::Artists),
    ("ALBUMARTIST", C::AlbumArtist),
    ("ALBUM", C::Album),
    ("DATE", C::Date),
    ("ORIGINALDATE", C::OriginalDate),
    ("ORIGINALYEAR", C::OriginalYear),
    ("RELEASEDATE", C::ReleaseDate),
    ("COMMENT", C::Comment),
    ("TRACKNUMBER", C::Track),
    ("DISCNUMBER", C::Disk),
    ("GENRE", C::Genre),
    ("METADATA_BLOCK_PICTURE", C::Picture),
    ("COMPOSER", C::Composer),
    ("LYRICS", C::Lyrics),
    ("ALBUMSORT", C::AlbumSort),
    ("TITLESORT", C::TitleSort),
    ("WORK", C::Work),
    ("ARTISTSORT", C::ArtistSort),
    ("ALBUMARTISTSORT", C::AlbumArtistSort),
    ("COMPOSERSORT", C::ComposerSort),
    ("LYRICIST", C::Lyricist),
    ("WRITER", C::Writer),
    ("CONDUCTOR", C::Conductor),
    ("REMIXER", C::Remixer),
    ("ARRANGER", C::Arranger),
    ("ENGINEER", C::Engineer),
    ("PRODUCER", C::Producer),
    ("DJMIXER", C::DjMixer),
    ("MIXER", C::Mixer),
    ("LABEL", C::Label),
    ("GROUPING", C::Grouping),
    ("SUBTITLE", C::Subtitle),
    ("DISCSUBTITLE", C::DiscSubtitle),
    ("TRACKTOTAL", C::TotalTracks),
    ("DISCTOTAL", C::TotalDiscs),
    ("TOTALTRACKS", C::TotalTracks),
    ("TOTALDISCS", C::TotalDiscs),
    ("COMPILATION", C::Compilation),
    ("RATING", C::Rating),
    ("BPM", C::Bpm),
    ("KEY", C::Key),
    ("MOOD", C::Mood),
    ("MEDIA", C::Media),
    ("CATALOGNUMBER", C::CatalogNumber),
    ("RELEASESTATUS", C::ReleaseStatus),
    ("RELEASETYPE", C::ReleaseType),
    ("RELEASECOUNTRY", C::ReleaseCountry),
    ("SCRIPT", C::Script),
    ("LANGUAGE", C::Language),
    ("COPYRIGHT", C::Copyright),
    ("LICENSE", C::License),
    ("ENCODEDBY", C::EncodedBy),
    ("ENCODERSETTINGS", C::EncoderSettings),
    ("BARCODE", C::Barcode),
    ("ISRC", C::Isrc),
    ("ASIN", C::Asin),
    ("MUSICBRAINZ_TRACKID", C::MusicBrainzRecordingId),
    ("MUSICBRAINZ_RELEASETRACKID", C::MusicBrainzTrackId),
    ("MUSICBRAINZ_ALBUMID", C::MusicBrainzAlbumId),
    ("MUSICBRAINZ_ARTISTID", C::MusicBrainzArtistId),
    ("MUSICBRAINZ_ALBUMARTISTID", C::MusicBrainzAlbumArtistId),
    ("MUSICBRAINZ_RELEASEGROUPID", C::MusicBrainzReleaseGroupId),
    ("MUSICBRAINZ_WORKID", C::MusicBrainzWorkId),
    ("MUSICBRAINZ_TRMID", C::MusicBrainzTrmId),
    ("MUSICBRAINZ_DISCID", C::MusicBrainzDiscId),
    ("ACOUSTID_ID", C::AcoustIdId),
    ("ACOUSTID_ID_FINGERPRINT", C::AcoustIdFingerprint),
    ("MUSICIP_PUID", C::MusicIpPuid),
    ("WEBSITE", C::Website),
    ("NOTES", C::Notes),
    ("DISCOGS_ARTIST_ID", C::DiscogsArtistId),
    ("DISCOGS_ARTISTS", C::Artists),
    ("DISCOGS_ARTIST_NAME", C::Artists),
    ("DISCOGS_ALBUM_ARTISTS", C::AlbumArtist),
    ("DISCOGS_CATALOG", C::CatalogNumber),
    ("DISCOGS_COUNTRY", C::ReleaseCountry),
    ("DISCOGS_DATE", C::OriginalDate),
    ("DISCOGS_LABEL", C::Label),
    ("DISCOGS_LABEL_ID", C::DiscogsLabelId),
    ("DISCOGS_MASTER_RELEASE_ID", C::DiscogsMasterReleaseId),
    ("DISCOGS_RATING", C::DiscogsRating),
    ("DISCOGS_RELEASED", C::Date),
    ("DISCOGS_RELEASE_ID", C::DiscogsReleaseId),
    ("DISCOGS_VOTES", C::DiscogsVotes),
    ("CATALOGID", C::CatalogNumber),
    ("STYLE", C::Genre),
    ("REPLAYGAIN_TRACK_GAIN", C::ReplayGainTrackGain),
    ("REPLAYGAIN_TRACK_PEAK", C::ReplayGainTrackPeak),
    ("REPLAYGAIN_ALBUM_GAIN", C::ReplayGainAlbumGain),
    ("REPLAYGAIN_ALBUM_PEAK", C::ReplayGainAlbumPeak),
    ("REPLAYGAIN_TRACK_MINMAX", C::ReplayGainTrackMinMax),
    ("REPLAYGAIN_ALBUM_MINMAX", C::ReplayGainAlbumMinMax),
    ("REPLAYGAIN_UNDO", C::ReplayGainUndoValue),
    ("DESCRIPTION", C::Description),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Vorbis], TABLE).with_post_map(post_map)
}

/// `RATING` and `RATING:<email>` hold a score out of 100.
fn post_map(tag: NativeTag, _warnings: &mut Vec<String>) -> Option<NativeTag> {
    let source = match tag.id.split_once(':') {
        Some(("RATING", email)) => Some(email.to_lowercase()),
        None if tag.id == "RATING" => None,
        _ => return Some(tag),
    };
    let rating = Rating {
        source,
        rating: tag
            .value
            .as_text()
            .and_then(util::parse_float_prefix)
            .map(|score| score / 100.0),
    };
    Some(NativeTag::new("RATING", TagValue::Rating(rating)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::TagMapper;

    #[test]
    fn rating_with_email() {
        let mut warnings = Vec::new();
        let tag = NativeTag::new("RATING:User@Example.org", "80".into());
        let generic = mapper().map_tag(&tag, &mut warnings).unwrap();
        assert_eq!(generic.id, C::Rating);
        assert_eq!(
            generic.value,
            TagValue::Rating(Rating {
                source: Some("user@example.org".into()),
                rating: Some(0.8),
            })
        );
    }
}
