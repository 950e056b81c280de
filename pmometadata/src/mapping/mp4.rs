//! iTunes atom names. Freeform `----` atoms carry their mean and name.

use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("©nam", C::Title),
    ("©ART", C::Artist),
    ("aART", C::AlbumArtist),
    ("----:com.apple.iTunes:Band", C::AlbumArtist),
    ("©alb", C::Album),
    ("©day", C::Date),
    ("©cmt", C::Comment),
    ("©com", C::Comment),
    ("trkn", C::Track),
    ("disk", C::Disk),
    ("©gen", C::Genre),
    ("covr", C::Picture),
    ("©wrt", C::Composer),
    ("©lyr", C::Lyrics),
    ("soal", C::AlbumSort),
    ("sonm", C::TitleSort),
    ("soar", C::ArtistSort),
    ("soaa", C::AlbumArtistSort),
    ("soco", C::ComposerSort),
    ("----:com.apple.iTunes:LYRICIST", C::Lyricist),
    ("----:com.apple.iTunes:CONDUCTOR", C::Conductor),
    ("----:com.apple.iTunes:REMIXER", C::Remixer),
    ("----:com.apple.iTunes:ENGINEER", C::Engineer),
    ("----:com.apple.iTunes:PRODUCER", C::Producer),
    ("----:com.apple.iTunes:DJMIXER", C::DjMixer),
    ("----:com.apple.iTunes:MIXER", C::Mixer),
    ("----:com.apple.iTunes:LABEL", C::Label),
    ("©grp", C::Grouping),
    ("----:com.apple.iTunes:SUBTITLE", C::Subtitle),
    ("----:com.apple.iTunes:DISCSUBTITLE", C::DiscSubtitle),
    ("cpil", C::Compilation),
    ("tmpo", C::Bpm),
    ("----:com.apple.iTunes:MOOD", C::Mood),
    ("----:com.apple.iTunes:MEDIA", C::Media),
    ("----:com.apple.iTunes:CATALOGNUMBER", C::CatalogNumber),
    ("tvsh", C::TvShow),
    ("tvsn", C::TvSeason),
    ("tves", C::TvEpisode),
    ("sosn", C::TvShowSort),
    ("tven", C::TvEpisodeId),
    ("tvnn", C::TvNetwork),
    ("pcst", C::Podcast),
    ("purl", C::PodcastUrl),
    ("----:com.apple.iTunes:MusicBrainz Album Status", C::ReleaseStatus),
    ("----:com.apple.iTunes:MusicBrainz Album Type", C::ReleaseType),
    ("----:com.apple.iTunes:MusicBrainz Album Release Country", C::ReleaseCountry),
    ("----:com.apple.iTunes:SCRIPT", C::Script),
    ("----:com.apple.iTunes:LANGUAGE", C::Language),
    ("cprt", C::Copyright),
    ("©cpy", C::Copyright),
    ("----:com.apple.iTunes:LICENSE", C::License),
    ("©too", C::EncodedBy),
    ("pgap", C::Gapless),
    ("----:com.apple.iTunes:BARCODE", C::Barcode),
    ("----:com.apple.iTunes:ISRC", C::Isrc),
    ("----:com.apple.iTunes:ASIN", C::Asin),
    ("----:com.apple.iTunes:NOTES", C::Notes),
    ("----:com.apple.iTunes:MusicBrainz Track Id", C::MusicBrainzRecordingId),
    ("----:com.apple.iTunes:MusicBrainz Release Track Id", C::MusicBrainzTrackId),
    ("----:com.apple.iTunes:MusicBrainz Album Id", C::MusicBrainzAlbumId),
    ("----:com.apple.iTunes:MusicBrainz Artist Id", C::MusicBrainzArtistId),
    ("----:com.apple.iTunes:MusicBrainz Album Artist Id", C::MusicBrainzAlbumArtistId),
    ("----:com.apple.iTunes:MusicBrainz Release Group Id", C::MusicBrainzReleaseGroupId),
    ("----:com.apple.iTunes:MusicBrainz Work Id", C::MusicBrainzWorkId),
    ("----:com.apple.iTunes:MusicBrainz TRM Id", C::MusicBrainzTrmId),
    ("----:com.apple.iTunes:MusicBrainz Disc Id", C::MusicBrainzDiscId),
    ("----:com.apple.iTunes:Acoustid Id", C::AcoustIdId),
    ("----:com.apple.iTunes:Acoustid Fingerprint", C::AcoustIdFingerprint),
    ("----:com.apple.iTunes:MusicIP PUID", C::MusicIpPuid),
    ("----:com.apple.iTunes:fingerprint", C::MusicIpFingerprint),
    ("----:com.apple.iTunes:replaygain_track_gain", C::ReplayGainTrackGain),
    ("----:com.apple.iTunes:replaygain_track_peak", C::ReplayGainTrackPeak),
    ("----:com.apple.iTunes:replaygain_album_gain", C::ReplayGainAlbumGain),
    ("----:com.apple.iTunes:replaygain_album_peak", C::ReplayGainAlbumPeak),
    ("----:com.apple.iTunes:replaygain_track_minmax", C::ReplayGainTrackMinMax),
    ("----:com.apple.iTunes:replaygain_album_minmax", C::ReplayGainAlbumMinMax),
    ("----:com.apple.iTunes:replaygain_undo", C::ReplayGainUndoValue),
    ("----:com.apple.iTunes:initialkey", C::Key),
    ("ldes", C::LongDescription),
    ("©mvn", C::Movement),
    ("©mvi", C::MovementIndex),
    ("©mvc", C::MovementTotal),
    ("©wrk", C::Work),
    ("catg", C::Category),
    ("egid", C::PodcastId),
    ("desc", C::Description),
    ("keyw", C::Keywords),
    ("hdvd", C::HdVideo),
    ("shwm", C::ShowMovement),
    ("stik", C::Stik),
    ("rate", C::Rating),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::ITunes], TABLE).case_insensitive()
}
