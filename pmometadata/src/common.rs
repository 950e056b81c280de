//! The format-independent tag vocabulary and the typed record it fills.
//!
//! [`common_tags!`] declares every common id once: its public name, the
//! `CommonTags` field that stores it, the field type, and whether it holds a
//! single value or a list. From that table it derives the [`CommonTagId`]
//! enum, the singleton/list/unique classification and the typed setters used
//! by the collector.

use serde::Serialize;

use crate::{
    util,
    value::{Comment, LyricsTag, Picture, Ratio, Rating, TagValue},
};

/// A `{no, of}` pair (track 3 of 12).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackNo {
    pub no: Option<i32>,
    pub of: Option<i32>,
}

/// Values of `MP3GAIN_UNDO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayGainUndo {
    pub left_channel: i64,
    pub right_channel: i64,
}

/// A normalised common value, as stored in [`CommonTags`] and reported to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommonValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Ratio(Ratio),
    IntList(Vec<i64>),
    GainUndo(ReplayGainUndo),
    Picture(Picture),
    Comment(Comment),
    Lyrics(LyricsTag),
    Rating(Rating),
    Position(TrackNo),
}

/// Conversion between a field type and [`CommonValue`].
pub trait CommonField: Sized {
    /// Coerces a mapped native value. `None` means the value does not fit.
    fn from_tag(value: TagValue) -> Option<Self>;
    fn from_common(value: CommonValue) -> Option<Self>;
    fn into_common(self) -> CommonValue;
}

impl CommonField for String {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => Some(text),
            TagValue::Int(v) => Some(v.to_string()),
            TagValue::Float(v) => Some(v.to_string()),
            TagValue::Url(link) => Some(link.url),
            TagValue::Comment(comment) => comment.text,
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Text(self)
    }
}

impl CommonField for i64 {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => util::parse_int_prefix(&text),
            TagValue::Int(v) => Some(v),
            TagValue::Float(v) => Some(v as i64),
            TagValue::Bool(b) => Some(b as i64),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Int(self)
    }
}

impl CommonField for f64 {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => util::parse_float_prefix(&text),
            TagValue::Int(v) => Some(v as f64),
            TagValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Float(v) => Some(v),
            CommonValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Float(self)
    }
}

impl CommonField for bool {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => Some(text.trim() == "1"),
            TagValue::Int(v) => Some(v == 1),
            TagValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Bool(self)
    }
}

impl CommonField for Ratio {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => util::to_ratio(&text),
            TagValue::Float(v) => Some(Ratio::from_ratio(v)),
            TagValue::Ratio(ratio) => Some(ratio),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Ratio(ratio) => Some(ratio),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Ratio(self)
    }
}

impl CommonField for Vec<i64> {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => {
                let list: Vec<i64> = text.split(',').filter_map(util::parse_int_prefix).collect();
                (!list.is_empty()).then_some(list)
            }
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::IntList(list) => Some(list),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::IntList(self)
    }
}

impl CommonField for ReplayGainUndo {
    fn from_tag(value: TagValue) -> Option<Self> {
        // `left,right,clip-flag`: only the two gain steps are numbers.
        let TagValue::Text(text) = value else {
            return None;
        };
        let mut fields = text.split(',');
        let left_channel = util::parse_int_prefix(fields.next()?)?;
        let right_channel = util::parse_int_prefix(fields.next()?)?;
        Some(ReplayGainUndo {
            left_channel,
            right_channel,
        })
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::GainUndo(undo) => Some(undo),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::GainUndo(self)
    }
}

impl CommonField for Picture {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Picture(self)
    }
}

impl CommonField for Comment {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => Some(Comment {
                text: Some(text),
                ..Comment::default()
            }),
            TagValue::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Comment(self)
    }
}

impl CommonField for LyricsTag {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Text(text) => Some(util::parse_lrc(&text)),
            TagValue::Lyrics(lyrics) => Some(lyrics),
            TagValue::Comment(comment) => {
                let mut lyrics = util::parse_lrc(comment.text.as_deref().unwrap_or_default());
                lyrics.language = comment.language;
                lyrics.descriptor = comment.descriptor;
                Some(lyrics)
            }
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Lyrics(lyrics) => Some(lyrics),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Lyrics(self)
    }
}

impl CommonField for Rating {
    fn from_tag(value: TagValue) -> Option<Self> {
        match value {
            TagValue::Rating(rating) => Some(rating),
            TagValue::Float(v) => Some(Rating {
                source: None,
                rating: Some(v),
            }),
            TagValue::Text(text) => Some(Rating {
                source: None,
                rating: util::parse_float_prefix(&text),
            }),
            _ => None,
        }
    }

    fn from_common(value: CommonValue) -> Option<Self> {
        match value {
            CommonValue::Rating(rating) => Some(rating),
            _ => None,
        }
    }

    fn into_common(self) -> CommonValue {
        CommonValue::Rating(self)
    }
}

macro_rules! common_tags {
    (
        singles {
            $( $s_variant:ident => $s_name:literal, $s_field:ident: $s_ty:ty; )*
        }
        lists {
            $( $l_variant:ident => $l_name:literal, $l_field:ident: $l_ty:ty, unique = $l_unique:literal; )*
        }
        positions {
            $( $p_variant:ident => $p_name:literal, $p_field:ident, total $t_variant:ident => $t_name:literal; )*
        }
    ) => {
        /// Identifier of a common tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum CommonTagId {
            $( #[serde(rename = $s_name)] $s_variant, )*
            $( #[serde(rename = $l_name)] $l_variant, )*
            $(
                #[serde(rename = $p_name)] $p_variant,
                #[serde(rename = $t_name)] $t_variant,
            )*
        }

        impl CommonTagId {
            pub const ALL: &'static [CommonTagId] = &[
                $( CommonTagId::$s_variant, )*
                $( CommonTagId::$l_variant, )*
                $( CommonTagId::$p_variant, CommonTagId::$t_variant, )*
            ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( CommonTagId::$s_variant => $s_name, )*
                    $( CommonTagId::$l_variant => $l_name, )*
                    $(
                        CommonTagId::$p_variant => $p_name,
                        CommonTagId::$t_variant => $t_name,
                    )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $s_name => Some(CommonTagId::$s_variant), )*
                    $( $l_name => Some(CommonTagId::$l_variant), )*
                    $(
                        $p_name => Some(CommonTagId::$p_variant),
                        $t_name => Some(CommonTagId::$t_variant),
                    )*
                    _ => None,
                }
            }

            /// `true` for ids holding one value, `false` for ordered lists.
            pub fn is_singleton(self) -> bool {
                !matches!(self, $( CommonTagId::$l_variant )|*)
            }

            /// List ids that reject a value already present.
            pub fn is_unique(self) -> bool {
                match self {
                    $( CommonTagId::$l_variant => $l_unique, )*
                    _ => false,
                }
            }

            /// For a total id (`totaltracks`), the position id whose `of` it sets.
            pub fn position_of_total(self) -> Option<CommonTagId> {
                match self {
                    $( CommonTagId::$t_variant => Some(CommonTagId::$p_variant), )*
                    _ => None,
                }
            }

            pub fn is_position(self) -> bool {
                matches!(self, $( CommonTagId::$p_variant )|*)
            }

            /// Coerces a mapped native value into the type this id stores.
            ///
            /// Positions and totals are parsed by the collector and return `None` here.
            pub fn coerce(self, value: TagValue) -> Option<CommonValue> {
                match self {
                    $( CommonTagId::$s_variant => <$s_ty as CommonField>::from_tag(value).map(CommonField::into_common), )*
                    $( CommonTagId::$l_variant => <$l_ty as CommonField>::from_tag(value).map(CommonField::into_common), )*
                    _ => None,
                }
            }
        }

        /// The merged, format-independent view of all tags in a file.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct CommonTags {
            $(
                #[serde(rename = $s_name, skip_serializing_if = "Option::is_none")]
                pub $s_field: Option<$s_ty>,
            )*
            $(
                #[serde(rename = $l_name, skip_serializing_if = "Vec::is_empty")]
                pub $l_field: Vec<$l_ty>,
            )*
            $(
                #[serde(rename = $p_name)]
                pub $p_field: TrackNo,
            )*
        }

        impl CommonTags {
            /// Stores a singleton, or replaces a list with `[value]`.
            ///
            /// Returns the value back when it does not fit the field type.
            pub(crate) fn replace(&mut self, id: CommonTagId, value: CommonValue) -> Result<(), CommonValue> {
                match id {
                    $(
                        CommonTagId::$s_variant => {
                            self.$s_field = Some(
                                <$s_ty as CommonField>::from_common(value.clone()).ok_or(value)?,
                            );
                        }
                    )*
                    $(
                        CommonTagId::$l_variant => {
                            self.$l_field = vec![
                                <$l_ty as CommonField>::from_common(value.clone()).ok_or(value)?,
                            ];
                        }
                    )*
                    _ => return Err(value),
                }
                Ok(())
            }

            /// Appends to a list. `Ok(false)` when a unique list already holds the value.
            pub(crate) fn append(&mut self, id: CommonTagId, value: CommonValue) -> Result<bool, CommonValue> {
                match id {
                    $(
                        CommonTagId::$l_variant => {
                            let item = <$l_ty as CommonField>::from_common(value.clone()).ok_or(value)?;
                            if $l_unique && self.$l_field.contains(&item) {
                                return Ok(false);
                            }
                            self.$l_field.push(item);
                            Ok(true)
                        }
                    )*
                    _ => Err(value),
                }
            }

            pub(crate) fn position_mut(&mut self, id: CommonTagId) -> Option<&mut TrackNo> {
                match id {
                    $( CommonTagId::$p_variant => Some(&mut self.$p_field), )*
                    _ => None,
                }
            }

            /// Number of values stored under `id` (0 or 1 for singletons).
            pub fn count(&self, id: CommonTagId) -> usize {
                match id {
                    $( CommonTagId::$s_variant => self.$s_field.is_some() as usize, )*
                    $( CommonTagId::$l_variant => self.$l_field.len(), )*
                    $(
                        CommonTagId::$p_variant => self.$p_field.no.is_some() as usize,
                        CommonTagId::$t_variant => self.$p_field.of.is_some() as usize,
                    )*
                }
            }
        }
    };
}

common_tags! {
    singles {
        Year => "year", year: i64;
        Title => "title", title: String;
        Artist => "artist", artist: String;
        AlbumArtist => "albumartist", album_artist: String;
        Album => "album", album: String;
        Date => "date", date: String;
        OriginalDate => "originaldate", original_date: String;
        OriginalYear => "originalyear", original_year: i64;
        ReleaseDate => "releasedate", release_date: String;
        AlbumSort => "albumsort", album_sort: String;
        TitleSort => "titlesort", title_sort: String;
        Work => "work", work: String;
        ArtistSort => "artistsort", artist_sort: String;
        AlbumArtistSort => "albumartistsort", album_artist_sort: String;
        ComposerSort => "composersort", composer_sort: String;
        Grouping => "grouping", grouping: String;
        DiscSubtitle => "discsubtitle", disc_subtitle: String;
        Compilation => "compilation", compilation: bool;
        Bpm => "bpm", bpm: i64;
        Mood => "mood", mood: String;
        Media => "media", media: String;
        TvShow => "tvShow", tv_show: String;
        TvShowSort => "tvShowSort", tv_show_sort: String;
        TvSeason => "tvSeason", tv_season: i64;
        TvEpisode => "tvEpisode", tv_episode: i64;
        TvEpisodeId => "tvEpisodeId", tv_episode_id: String;
        TvNetwork => "tvNetwork", tv_network: String;
        Podcast => "podcast", podcast: bool;
        PodcastUrl => "podcasturl", podcast_url: String;
        PodcastId => "podcastId", podcast_id: String;
        ReleaseStatus => "releasestatus", release_status: String;
        ReleaseCountry => "releasecountry", release_country: String;
        Script => "script", script: String;
        Language => "language", language: String;
        Copyright => "copyright", copyright: String;
        License => "license", license: String;
        EncodedBy => "encodedby", encoded_by: String;
        EncoderSettings => "encodersettings", encoder_settings: String;
        Gapless => "gapless", gapless: bool;
        Barcode => "barcode", barcode: String;
        Asin => "asin", asin: String;
        MusicBrainzRecordingId => "musicbrainz_recordingid", musicbrainz_recording_id: String;
        MusicBrainzTrackId => "musicbrainz_trackid", musicbrainz_track_id: String;
        MusicBrainzAlbumId => "musicbrainz_albumid", musicbrainz_album_id: String;
        MusicBrainzReleaseGroupId => "musicbrainz_releasegroupid", musicbrainz_release_group_id: String;
        MusicBrainzWorkId => "musicbrainz_workid", musicbrainz_work_id: String;
        MusicBrainzTrmId => "musicbrainz_trmid", musicbrainz_trm_id: String;
        MusicBrainzDiscId => "musicbrainz_discid", musicbrainz_disc_id: String;
        AcoustIdId => "acoustid_id", acoustid_id: String;
        AcoustIdFingerprint => "acoustid_fingerprint", acoustid_fingerprint: String;
        MusicIpPuid => "musicip_puid", musicip_puid: String;
        MusicIpFingerprint => "musicip_fingerprint", musicip_fingerprint: String;
        Website => "website", website: String;
        AverageLevel => "averageLevel", average_level: i64;
        PeakLevel => "peakLevel", peak_level: i64;
        Key => "key", key: String;
        OriginalAlbum => "originalalbum", original_album: String;
        OriginalArtist => "originalartist", original_artist: String;
        DiscogsReleaseId => "discogs_release_id", discogs_release_id: i64;
        DiscogsLabelId => "discogs_label_id", discogs_label_id: i64;
        DiscogsMasterReleaseId => "discogs_master_release_id", discogs_master_release_id: i64;
        DiscogsVotes => "discogs_votes", discogs_votes: i64;
        DiscogsRating => "discogs_rating", discogs_rating: f64;
        ReplayGainTrackPeak => "replaygain_track_peak", replaygain_track_peak: Ratio;
        ReplayGainTrackGain => "replaygain_track_gain", replaygain_track_gain: Ratio;
        ReplayGainAlbumPeak => "replaygain_album_peak", replaygain_album_peak: Ratio;
        ReplayGainAlbumGain => "replaygain_album_gain", replaygain_album_gain: Ratio;
        ReplayGainTrackMinMax => "replaygain_track_minmax", replaygain_track_minmax: Vec<i64>;
        ReplayGainAlbumMinMax => "replaygain_album_minmax", replaygain_album_minmax: Vec<i64>;
        ReplayGainUndoValue => "replaygain_undo", replaygain_undo: ReplayGainUndo;
        LongDescription => "longDescription", long_description: String;
        HdVideo => "hdVideo", hd_video: i64;
        Movement => "movement", movement: String;
        ShowMovement => "showMovement", show_movement: bool;
        Stik => "stik", stik: i64;
    }
    lists {
        Artists => "artists", artists: String, unique = true;
        Comment => "comment", comment: Comment, unique = false;
        Genre => "genre", genre: String, unique = true;
        Picture => "picture", picture: Picture, unique = true;
        Composer => "composer", composer: String, unique = true;
        Lyrics => "lyrics", lyrics: LyricsTag, unique = false;
        Lyricist => "lyricist", lyricist: String, unique = true;
        Writer => "writer", writer: String, unique = true;
        Conductor => "conductor", conductor: String, unique = true;
        Remixer => "remixer", remixer: String, unique = true;
        Arranger => "arranger", arranger: String, unique = true;
        Engineer => "engineer", engineer: String, unique = true;
        Producer => "producer", producer: String, unique = true;
        Technician => "technician", technician: String, unique = true;
        DjMixer => "djmixer", djmixer: String, unique = true;
        Mixer => "mixer", mixer: String, unique = true;
        Label => "label", label: String, unique = true;
        Subtitle => "subtitle", subtitle: String, unique = false;
        Rating => "rating", rating: Rating, unique = false;
        CatalogNumber => "catalognumber", catalog_number: String, unique = true;
        ReleaseType => "releasetype", release_type: String, unique = false;
        Isrc => "isrc", isrc: String, unique = true;
        MusicBrainzArtistId => "musicbrainz_artistid", musicbrainz_artist_id: String, unique = false;
        MusicBrainzAlbumArtistId => "musicbrainz_albumartistid", musicbrainz_album_artist_id: String, unique = false;
        PerformerInstrument => "performer:instrument", performer_instrument: String, unique = true;
        Notes => "notes", notes: String, unique = false;
        DiscogsArtistId => "discogs_artist_id", discogs_artist_id: i64, unique = true;
        Description => "description", description: String, unique = false;
        Category => "category", category: String, unique = false;
        Keywords => "keywords", keywords: String, unique = false;
    }
    positions {
        Track => "track", track, total TotalTracks => "totaltracks";
        Disk => "disk", disk, total TotalDiscs => "totaldiscs";
        MovementIndex => "movementIndex", movement_index, total MovementTotal => "movementTotal";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(CommonTagId::Title.is_singleton());
        assert!(CommonTagId::Track.is_singleton());
        assert!(!CommonTagId::Artists.is_singleton());
        assert!(CommonTagId::Isrc.is_unique());
        assert!(!CommonTagId::Comment.is_unique());
        assert_eq!(
            CommonTagId::TotalDiscs.position_of_total(),
            Some(CommonTagId::Disk)
        );
        assert!(CommonTagId::MovementIndex.is_position());
    }

    #[test]
    fn names_roundtrip() {
        for id in CommonTagId::ALL {
            assert_eq!(CommonTagId::from_name(id.as_str()), Some(*id));
        }
        assert_eq!(
            CommonTagId::from_name("performer:instrument"),
            Some(CommonTagId::PerformerInstrument)
        );
    }

    #[test]
    fn coerce_by_field_type() {
        assert_eq!(
            CommonTagId::Bpm.coerce(TagValue::Text("128".into())),
            Some(CommonValue::Int(128))
        );
        assert_eq!(
            CommonTagId::Compilation.coerce(TagValue::Text("1".into())),
            Some(CommonValue::Bool(true))
        );
        assert_eq!(
            CommonTagId::ReplayGainUndoValue.coerce(TagValue::Text("-3,+2,N".into())),
            Some(CommonValue::GainUndo(ReplayGainUndo {
                left_channel: -3,
                right_channel: 2
            }))
        );
        assert_eq!(CommonTagId::Track.coerce(TagValue::Text("1".into())), None);
    }

    #[test]
    fn gain_undo_ignores_the_clip_flag() {
        assert_eq!(
            CommonTagId::ReplayGainUndoValue.coerce(TagValue::Text("-003,-003,N".into())),
            Some(CommonValue::GainUndo(ReplayGainUndo {
                left_channel: -3,
                right_channel: -3
            }))
        );
        assert_eq!(
            CommonTagId::ReplayGainUndoValue.coerce(TagValue::Text("N".into())),
            None
        );
        assert_eq!(
            CommonTagId::ReplayGainTrackMinMax.coerce(TagValue::Text("120,183,N".into())),
            Some(CommonValue::IntList(vec![120, 183]))
        );
        assert_eq!(
            CommonTagId::ReplayGainTrackMinMax.coerce(TagValue::Text("none".into())),
            None
        );
    }

    #[test]
    fn unique_lists_reject_duplicates() {
        let mut tags = CommonTags::default();
        let isrc = || CommonValue::Text("USRC17607839".into());
        assert_eq!(tags.append(CommonTagId::Isrc, isrc()), Ok(true));
        assert_eq!(tags.append(CommonTagId::Isrc, isrc()), Ok(false));
        assert_eq!(tags.isrc.len(), 1);

        let note = || CommonValue::Text("n".into());
        tags.append(CommonTagId::Notes, note()).unwrap();
        tags.append(CommonTagId::Notes, note()).unwrap();
        assert_eq!(tags.count(CommonTagId::Notes), 2);
    }

    #[test]
    fn type_mismatch_is_returned() {
        let mut tags = CommonTags::default();
        let value = CommonValue::Bool(true);
        assert_eq!(tags.replace(CommonTagId::Title, value.clone()), Err(value));
        assert!(tags.title.is_none());
    }
}
