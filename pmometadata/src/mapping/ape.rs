use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("Title", C::Title),
    ("Artist", C::Artist),
    ("Artists", C::Artists),
    ("Album Artist", C::AlbumArtist),
    ("Album", C::Album),
    ("Year", C::Date),
    ("Originalyear", C::OriginalYear),
    ("Originaldate", C::OriginalDate),
    ("Releasedate", C::ReleaseDate),
    ("Comment", C::Comment),
    ("Track", C::Track),
    ("Disc", C::Disk),
    ("DISCNUMBER", C::Disk),
    ("Genre", C::Genre),
    ("Cover Art (Front)", C::Picture),
    ("Cover Art (Back)", C::Picture),
    ("Composer", C::Composer),
    ("Lyrics", C::Lyrics),
    ("ALBUMSORT", C::AlbumSort),
    ("TITLESORT", C::TitleSort),
    ("WORK", C::Work),
    ("ARTISTSORT", C::ArtistSort),
    ("ALBUMARTISTSORT", C::AlbumArtistSort),
    ("COMPOSERSORT", C::ComposerSort),
    ("Lyricist", C::Lyricist),
    ("Writer", C::Writer),
    ("Conductor", C::Conductor),
    ("MixArtist", C::Remixer),
    ("Arranger", C::Arranger),
    ("Engineer", C::Engineer),
    ("Producer", C::Producer),
    ("DJMixer", C::DjMixer),
    ("Mixer", C::Mixer),
    ("Label", C::Label),
    ("Grouping", C::Grouping),
    ("Subtitle", C::Subtitle),
    ("DiscSubtitle", C::DiscSubtitle),
    ("Compilation", C::Compilation),
    ("BPM", C::Bpm),
    ("Mood", C::Mood),
    ("Media", C::Media),
    ("CatalogNumber", C::CatalogNumber),
    ("MUSICBRAINZ_ALBUMSTATUS", C::ReleaseStatus),
    ("MUSICBRAINZ_ALBUMTYPE", C::ReleaseType),
    ("RELEASECOUNTRY", C::ReleaseCountry),
    ("Script", C::Script),
    ("Language", C::Language),
    ("Copyright", C::Copyright),
    ("LICENSE", C::License),
    ("EncodedBy", C::EncodedBy),
    ("EncoderSettings", C::EncoderSettings),
    ("Barcode", C::Barcode),
    ("ISRC", C::Isrc),
    ("ASIN", C::Asin),
    ("musicbrainz_trackid", C::MusicBrainzRecordingId),
    ("musicbrainz_releasetrackid", C::MusicBrainzTrackId),
    ("MUSICBRAINZ_ALBUMID", C::MusicBrainzAlbumId),
    ("MUSICBRAINZ_ARTISTID", C::MusicBrainzArtistId),
    ("MUSICBRAINZ_ALBUMARTISTID", C::MusicBrainzAlbumArtistId),
    ("MUSICBRAINZ_RELEASEGROUPID", C::MusicBrainzReleaseGroupId),
    ("MUSICBRAINZ_WORKID", C::MusicBrainzWorkId),
    ("MUSICBRAINZ_TRMID", C::MusicBrainzTrmId),
    ("MUSICBRAINZ_DISCID", C::MusicBrainzDiscId),
    ("ACOUSTID_ID", C::AcoustIdId),
    ("ACOUSTID_FINGERPRINT", C::AcoustIdFingerprint),
    ("MUSICIP_PUID", C::MusicIpPuid),
    ("Weblink", C::Website),
    ("REPLAYGAIN_TRACK_GAIN", C::ReplayGainTrackGain),
    ("REPLAYGAIN_TRACK_PEAK", C::ReplayGainTrackPeak),
    ("REPLAYGAIN_ALBUM_GAIN", C::ReplayGainAlbumGain),
    ("REPLAYGAIN_ALBUM_PEAK", C::ReplayGainAlbumPeak),
    ("MP3GAIN_MINMAX", C::ReplayGainTrackMinMax),
    ("MP3GAIN_ALBUM_MINMAX", C::ReplayGainAlbumMinMax),
    ("MP3GAIN_UNDO", C::ReplayGainUndoValue),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Ape], TABLE).case_insensitive()
}
