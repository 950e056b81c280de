use pmoreader::text::{TextEncoding, decode_string};
use tracing::debug;

use super::TableMapper;
use crate::{
    common::CommonTagId as C,
    tag_type::TagType,
    value::{NativeTag, Popularimeter, Rating, TagValue},
};

const MUSICBRAINZ_OWNER: &str = "http://musicbrainz.org";

const V22: &[(&str, C)] = &[
    ("TT2", C::Title),
    ("TP1", C::Artist),
    ("TP2", C::AlbumArtist),
    ("TAL", C::Album),
    ("TYE", C::Year),
    ("COM", C::Comment),
    ("TRK", C::Track),
    ("TPA", C::Disk),
    ("TCO", C::Genre),
    ("PIC", C::Picture),
    ("TCM", C::Composer),
    ("TOR", C::OriginalDate),
    ("TOT", C::OriginalAlbum),
    ("TXT", C::Lyricist),
    ("TP3", C::Conductor),
    ("TPB", C::Label),
    ("TT1", C::Grouping),
    ("TT3", C::Subtitle),
    ("TLA", C::Language),
    ("TCR", C::Copyright),
    ("WCP", C::License),
    ("TEN", C::EncodedBy),
    ("TSS", C::EncoderSettings),
    ("WAR", C::Website),
    ("PCS", C::Podcast),
    ("TCP", C::Compilation),
    ("TDR", C::Date),
    ("TS2", C::AlbumArtistSort),
    ("TSA", C::AlbumSort),
    ("TSC", C::ComposerSort),
    ("TSP", C::ArtistSort),
    ("TST", C::TitleSort),
    ("WFD", C::PodcastUrl),
    ("TBP", C::Bpm),
    ("ULT", C::Lyrics),
    ("TOA", C::OriginalArtist),
    ("TRC", C::Isrc),
    ("TKE", C::Key),
    ("TMT", C::Media),
];

const V24: &[(&str, C)] = &[
    // ID3v2.3
    ("TIT2", C::Title),
    ("TPE1", C::Artist),
    ("TXXX:Artists", C::Artists),
    ("TPE2", C::AlbumArtist),
    ("TALB", C::Album),
    ("TDRV", C::Date),
    ("TYER", C::Year),
    ("TORY", C::OriginalYear),
    ("TPOS", C::Disk),
    ("TCON", C::Genre),
    ("APIC", C::Picture),
    ("TCOM", C::Composer),
    ("USLT", C::Lyrics),
    ("TSOA", C::AlbumSort),
    ("TSOT", C::TitleSort),
    ("TOAL", C::OriginalAlbum),
    ("TSOP", C::ArtistSort),
    ("TSO2", C::AlbumArtistSort),
    ("TSOC", C::ComposerSort),
    ("TEXT", C::Lyricist),
    ("TXXX:Writer", C::Writer),
    ("TPE3", C::Conductor),
    ("TPE4", C::Remixer),
    ("IPLS:arranger", C::Arranger),
    ("IPLS:engineer", C::Engineer),
    ("IPLS:producer", C::Producer),
    ("IPLS:DJ-mix", C::DjMixer),
    ("IPLS:mix", C::Mixer),
    ("TPUB", C::Label),
    ("TIT1", C::Grouping),
    ("TIT3", C::Subtitle),
    ("TRCK", C::Track),
    ("TCMP", C::Compilation),
    ("POPM", C::Rating),
    ("TBPM", C::Bpm),
    ("TMED", C::Media),
    ("TXXX:CATALOGNUMBER", C::CatalogNumber),
    ("TXXX:MusicBrainz Album Status", C::ReleaseStatus),
    ("TXXX:MusicBrainz Album Type", C::ReleaseType),
    ("TXXX:MusicMagic Fingerprint", C::MusicIpFingerprint),
    ("TXXX:MusicBrainz Album Release Country", C::ReleaseCountry),
    ("TXXX:RELEASECOUNTRY", C::ReleaseCountry),
    ("TXXX:SCRIPT", C::Script),
    ("TLAN", C::Language),
    ("TCOP", C::Copyright),
    ("WCOP", C::License),
    ("TENC", C::EncodedBy),
    ("TSSE", C::EncoderSettings),
    ("TXXX:BARCODE", C::Barcode),
    ("TXXX:ISRC", C::Isrc),
    ("TSRC", C::Isrc),
    ("TXXX:ASIN", C::Asin),
    ("TXXX:originalyear", C::OriginalYear),
    ("UFID:http://musicbrainz.org", C::MusicBrainzRecordingId),
    ("TXXX:MusicBrainz Release Track Id", C::MusicBrainzTrackId),
    ("TXXX:MusicBrainz Album Id", C::MusicBrainzAlbumId),
    ("TXXX:MusicBrainz Artist Id", C::MusicBrainzArtistId),
    ("TXXX:MusicBrainz Album Artist Id", C::MusicBrainzAlbumArtistId),
    ("TXXX:MusicBrainz Release Group Id", C::MusicBrainzReleaseGroupId),
    ("TXXX:MusicBrainz Work Id", C::MusicBrainzWorkId),
    ("TXXX:MusicBrainz TRM Id", C::MusicBrainzTrmId),
    ("TXXX:MusicBrainz Disc Id", C::MusicBrainzDiscId),
    ("TXXX:ACOUSTID_ID", C::AcoustIdId),
    ("TXXX:Acoustid Id", C::AcoustIdId),
    ("TXXX:Acoustid Fingerprint", C::AcoustIdFingerprint),
    ("TXXX:MusicIP PUID", C::MusicIpPuid),
    ("WOAR", C::Website),
    // ID3v2.4
    ("TDRC", C::Date),
    ("TDOR", C::OriginalDate),
    ("TMCL:instrument", C::PerformerInstrument),
    ("TIPL:arranger", C::Arranger),
    ("TIPL:engineer", C::Engineer),
    ("TIPL:producer", C::Producer),
    ("TIPL:DJ-mix", C::DjMixer),
    ("TIPL:mix", C::Mixer),
    ("TMOO", C::Mood),
    ("SYLT", C::Lyrics),
    ("TSST", C::DiscSubtitle),
    ("TKEY", C::Key),
    ("COMM", C::Comment),
    ("TOPE", C::OriginalArtist),
    // Windows Media Player
    ("PRIV:AverageLevel", C::AverageLevel),
    ("PRIV:PeakValue", C::PeakLevel),
    // Discogs
    ("TXXX:DISCOGS_ARTIST_ID", C::DiscogsArtistId),
    ("TXXX:DISCOGS_ARTISTS", C::Artists),
    ("TXXX:DISCOGS_ARTIST_NAME", C::Artists),
    ("TXXX:DISCOGS_ALBUM_ARTISTS", C::AlbumArtist),
    ("TXXX:DISCOGS_CATALOG", C::CatalogNumber),
    ("TXXX:DISCOGS_COUNTRY", C::ReleaseCountry),
    ("TXXX:DISCOGS_DATE", C::OriginalDate),
    ("TXXX:DISCOGS_LABEL", C::Label),
    ("TXXX:DISCOGS_LABEL_ID", C::DiscogsLabelId),
    ("TXXX:DISCOGS_MASTER_RELEASE_ID", C::DiscogsMasterReleaseId),
    ("TXXX:DISCOGS_RATING", C::DiscogsRating),
    ("TXXX:DISCOGS_RELEASED", C::Date),
    ("TXXX:DISCOGS_RELEASE_ID", C::DiscogsReleaseId),
    ("TXXX:DISCOGS_VOTES", C::DiscogsVotes),
    ("TXXX:CATALOGID", C::CatalogNumber),
    ("TXXX:STYLE", C::Genre),
    // ReplayGain
    ("TXXX:REPLAYGAIN_TRACK_PEAK", C::ReplayGainTrackPeak),
    ("TXXX:REPLAYGAIN_TRACK_GAIN", C::ReplayGainTrackGain),
    ("TXXX:REPLAYGAIN_ALBUM_PEAK", C::ReplayGainAlbumPeak),
    ("TXXX:REPLAYGAIN_ALBUM_GAIN", C::ReplayGainAlbumGain),
    ("TXXX:MP3GAIN_MINMAX", C::ReplayGainTrackMinMax),
    ("TXXX:MP3GAIN_ALBUM_MINMAX", C::ReplayGainAlbumMinMax),
    ("TXXX:MP3GAIN_UNDO", C::ReplayGainUndoValue),
    // Apple extensions
    ("MVNM", C::Movement),
    ("MVIN", C::MovementIndex),
    ("PCST", C::Podcast),
    ("TCAT", C::Category),
    ("TDES", C::Description),
    ("TDRL", C::ReleaseDate),
    ("TGID", C::PodcastId),
    ("TKWD", C::Keywords),
    ("WFED", C::PodcastUrl),
    ("GRP1", C::Grouping),
];

pub(super) fn v22_mapper() -> TableMapper {
    TableMapper::new(&[TagType::Id3v22], V22)
        .case_insensitive()
        .with_post_map(post_map)
}

pub(super) fn v24_mapper() -> TableMapper {
    TableMapper::new(&[TagType::Id3v23, TagType::Id3v24], V24)
        .case_insensitive()
        .with_post_map(post_map)
}

/// `POPM` ratings run from 1 to 255; 0 means unrated.
pub fn popularimeter_to_rating(popm: &Popularimeter) -> Rating {
    Rating {
        source: Some(popm.email.clone()),
        rating: (popm.rating > 0).then(|| f64::from(popm.rating - 1) / 254.0),
    }
}

fn post_map(tag: NativeTag, warnings: &mut Vec<String>) -> Option<NativeTag> {
    match (tag.id.as_str(), &tag.value) {
        ("UFID", TagValue::Identifier(ident)) if ident.owner == MUSICBRAINZ_OWNER => Some(NativeTag::new(
            format!("UFID:{}", ident.owner),
            TagValue::Text(decode_string(&ident.data, TextEncoding::Latin1)),
        )),
        ("PRIV", TagValue::Identifier(ident)) => match ident.owner.as_str() {
            "AverageLevel" | "PeakValue" => {
                let id = format!("PRIV:{}", ident.owner);
                match <[u8; 4]>::try_from(ident.data.as_ref()) {
                    Ok(raw) => Some(NativeTag::new(id, TagValue::Int(i64::from(u32::from_le_bytes(raw))))),
                    Err(_) => {
                        warnings.push(format!("Failed to parse {id}"));
                        None
                    }
                }
            }
            owner => {
                debug!(owner, "Unknown PRIV owner identifier");
                Some(tag)
            }
        },
        ("POPM" | "POP", TagValue::Popularimeter(popm)) => {
            let rating = popularimeter_to_rating(popm);
            Some(NativeTag::new(tag.id, TagValue::Rating(rating)))
        }
        _ => Some(tag),
    }
}
