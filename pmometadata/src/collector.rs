//! The merge engine.
//!
//! A [`MetadataCollector`] receives native tags from any number of dialects,
//! keeps every one of them in the native record and folds the mappable ones
//! into a single [`CommonTags`] record. When two dialects supply the same
//! common id the one with the lower [`Origin::rank`] wins:
//!
//! - singletons are overwritten by a value of equal or better rank,
//! - lists accumulate values of the rank that currently holds them, are
//!   replaced by a strictly better rank and ignore worse ones.
//!
//! Some ids need more than a plain assignment; [`post_map_rule`] names the
//! rule applied to each of them.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    common::{CommonField, CommonTagId, CommonTags, CommonValue, TrackNo},
    format::{Format, FormatField},
    mapping::{CombinedTagMapper, GenericTag},
    options::ParseOptions,
    parser::TagSink,
    tag_type::{Origin, TagType},
    util,
    value::{NativeTag, Picture, TagValue},
};

const ITUNES_GAPLESS_DESCRIPTOR: &str = "iTunPGAP";

/// Notification sent to the observer for every accepted write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MetadataEvent {
    Format(FormatField),
    Common { id: CommonTagId, value: CommonValue },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Quality {
    pub warnings: Vec<Warning>,
}

/// The result of a parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub format: Format,
    pub native: BTreeMap<TagType, Vec<NativeTag>>,
    pub common: CommonTags,
    pub quality: Quality,
}

impl Metadata {
    pub fn native_tags(&self, tag_type: TagType) -> &[NativeTag] {
        self.native.get(&tag_type).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// How a mapped tag is folded into the common record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostMapRule {
    /// `artist`, which may also feed `artists`.
    Artist,
    /// `artists`, which may also rebuild `artist`.
    Artists,
    /// `track`, `disk`, `movementIndex` from `"n/m"`.
    Position,
    /// `totaltracks`, `totaldiscs`, `movementTotal`: the `of` half of a position.
    Total,
    /// `date`, which also yields `year`.
    Date,
    Picture,
    /// `comment`; the iTunes gapless marker also yields `gapless`.
    Comment,
    /// Coerced to the field type and merged by priority.
    Plain,
}

pub fn post_map_rule(id: CommonTagId) -> PostMapRule {
    match id {
        CommonTagId::Artist => PostMapRule::Artist,
        CommonTagId::Artists => PostMapRule::Artists,
        CommonTagId::Track | CommonTagId::Disk | CommonTagId::MovementIndex => PostMapRule::Position,
        CommonTagId::TotalTracks | CommonTagId::TotalDiscs | CommonTagId::MovementTotal => {
            PostMapRule::Total
        }
        CommonTagId::Date => PostMapRule::Date,
        CommonTagId::Picture => PostMapRule::Picture,
        CommonTagId::Comment => PostMapRule::Comment,
        _ => PostMapRule::Plain,
    }
}

pub struct MetadataCollector {
    options: ParseOptions,
    mapper: Arc<CombinedTagMapper>,
    format: Format,
    native: BTreeMap<TagType, Vec<NativeTag>>,
    common: CommonTags,
    origins: HashMap<CommonTagId, Origin>,
    warnings: Vec<Warning>,
}

impl MetadataCollector {
    pub fn new(options: ParseOptions) -> Self {
        Self::with_mapper(options, CombinedTagMapper::shared())
    }

    pub fn with_mapper(options: ParseOptions, mapper: Arc<CombinedTagMapper>) -> Self {
        Self {
            options,
            mapper,
            format: Format::default(),
            native: BTreeMap::new(),
            common: CommonTags::default(),
            origins: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// `true` once any native tag has been recorded.
    pub fn has_any(&self) -> bool {
        !self.native.is_empty()
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn common(&self) -> &CommonTags {
        &self.common
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The dialect currently holding `id`, if any.
    pub fn origin(&self, id: CommonTagId) -> Option<Origin> {
        self.origins.get(&id).copied()
    }

    pub fn into_metadata(self) -> Metadata {
        Metadata {
            format: self.format,
            native: self.native,
            common: self.common,
            quality: Quality {
                warnings: self.warnings,
            },
        }
    }

    fn rank_of(&self, id: CommonTagId) -> u32 {
        self.origins
            .get(&id)
            .map(|origin| origin.rank())
            .unwrap_or(Origin::UNSET)
    }

    fn notify(&self, event: MetadataEvent) {
        if let Some(observer) = &self.options.observer {
            observer(&event);
        }
    }

    fn post_map(&mut self, origin: Origin, tag: GenericTag) {
        let GenericTag { id, value } = tag;
        match post_map_rule(id) {
            PostMapRule::Artist => {
                if self.rank_of(CommonTagId::Artist) == origin.rank() {
                    // A second artist from the same dialect lists co-artists.
                    self.post_map(
                        Origin::Artificial,
                        GenericTag {
                            id: CommonTagId::Artists,
                            value,
                        },
                    );
                    return;
                }
                if self.common.artists.is_empty() {
                    self.coerce_and_set(Origin::Artificial, CommonTagId::Artists, value.clone());
                }
                self.coerce_and_set(origin, CommonTagId::Artist, value);
            }
            PostMapRule::Artists => {
                let artist_derived = self.common.artist.is_none()
                    || self.origin(CommonTagId::Artist) == Some(Origin::Artificial);
                if artist_derived {
                    if let Some(name) = String::from_tag(value.clone()) {
                        if !self.common.artists.contains(&name) {
                            let mut artists = self.common.artists.clone();
                            artists.push(name);
                            self.set_common(
                                Origin::Artificial,
                                CommonTagId::Artist,
                                CommonValue::Text(util::join_artists(&artists)),
                            );
                        }
                    }
                }
                self.coerce_and_set(origin, CommonTagId::Artists, value);
            }
            PostMapRule::Position => self.set_position(origin, id, value),
            PostMapRule::Total => self.set_total(origin, id, value),
            PostMapRule::Date => {
                let year = value.as_text().and_then(util::leading_year);
                self.coerce_and_set(origin, CommonTagId::Date, value);
                if let Some(year) = year {
                    self.set_common(origin, CommonTagId::Year, CommonValue::Int(year));
                }
            }
            PostMapRule::Picture => {
                let picture = match value {
                    TagValue::Picture(picture) => picture,
                    other => {
                        debug!(kind = other.kind(), "Ignoring non-picture value mapped to picture");
                        return;
                    }
                };
                if let Some(picture) = self.fix_picture(picture) {
                    self.set_common(origin, CommonTagId::Picture, CommonValue::Picture(picture));
                }
            }
            PostMapRule::Comment => {
                let Some(comment) = crate::value::Comment::from_tag(value) else {
                    return;
                };
                if comment.descriptor.as_deref() == Some(ITUNES_GAPLESS_DESCRIPTOR) {
                    let gapless = comment.text.as_deref().map(str::trim) == Some("1");
                    self.set_common(origin, CommonTagId::Gapless, CommonValue::Bool(gapless));
                }
                self.set_common(origin, CommonTagId::Comment, CommonValue::Comment(comment));
            }
            PostMapRule::Plain => self.coerce_and_set(origin, id, value),
        }
    }

    fn fix_picture(&mut self, mut picture: Picture) -> Option<Picture> {
        if picture.data.is_empty() {
            self.add_warning("Empty picture tag found".to_string());
            return None;
        }
        if picture.format.trim().is_empty() {
            match util::sniff_image_mime(&picture.data) {
                Some(mime) => picture.format = mime.to_string(),
                None => {
                    self.add_warning("Unable to determine picture format".to_string());
                    return None;
                }
            }
        }
        picture.format = util::fix_picture_mime(&picture.format);
        Some(picture)
    }

    fn set_position(&mut self, origin: Origin, id: CommonTagId, value: TagValue) {
        let parsed = match &value {
            TagValue::Text(text) => util::normalize_track(text),
            TagValue::Int(n) => TrackNo {
                no: i32::try_from(*n).ok().filter(|&n| n != 0),
                of: None,
            },
            other => {
                debug!(id = id.as_str(), kind = other.kind(), "Ignoring position value");
                return;
            }
        };
        let rank = origin.rank();
        if rank > self.rank_of(id) {
            debug!(id = id.as_str(), origin = ?origin, "Ignoring position from lower priority dialect");
            return;
        }
        let total_id = total_of(id);
        let total_rank = self.rank_of(total_id);

        let Some(position) = self.common.position_mut(id) else {
            return;
        };
        position.no = parsed.no;
        let takes_total = parsed.of.is_some() && (position.of.is_none() || rank <= total_rank);
        if takes_total {
            position.of = parsed.of;
        }
        let position = *position;

        self.origins.insert(id, origin);
        if takes_total {
            self.origins.insert(total_id, origin);
        }
        self.notify(MetadataEvent::Common {
            id,
            value: CommonValue::Position(position),
        });
    }

    fn set_total(&mut self, origin: Origin, id: CommonTagId, value: TagValue) {
        let Some(position_id) = id.position_of_total() else {
            return;
        };
        let Some(total) = i64::from_tag(value)
            .and_then(|v| i32::try_from(v).ok())
            .filter(|&v| v != 0)
        else {
            return;
        };
        let rank = origin.rank();
        let current_rank = self.rank_of(id);
        let Some(position) = self.common.position_mut(position_id) else {
            return;
        };
        if position.of.is_some() && rank >= current_rank {
            debug!(id = id.as_str(), origin = ?origin, "Keeping total from equal or higher priority dialect");
            return;
        }
        position.of = Some(total);
        let position = *position;
        self.origins.insert(id, origin);
        self.notify(MetadataEvent::Common {
            id: position_id,
            value: CommonValue::Position(position),
        });
    }

    fn coerce_and_set(&mut self, origin: Origin, id: CommonTagId, value: TagValue) {
        match id.coerce(value) {
            Some(value) => self.set_common(origin, id, value),
            None => debug!(id = id.as_str(), "Value does not fit common tag"),
        }
    }

    /// Merges one value under the priority rules.
    fn set_common(&mut self, origin: Origin, id: CommonTagId, value: CommonValue) {
        let rank = origin.rank();
        let current = self.rank_of(id);

        let accepted = if id.is_singleton() {
            if rank <= current {
                self.common.replace(id, value.clone()).is_ok()
            } else {
                debug!(id = id.as_str(), origin = ?origin, "Ignoring singleton from lower priority dialect");
                false
            }
        } else if rank == current {
            match self.common.append(id, value.clone()) {
                Ok(true) => true,
                Ok(false) => {
                    debug!(id = id.as_str(), "Ignoring duplicate value");
                    false
                }
                Err(_) => false,
            }
        } else if rank < current {
            self.common.replace(id, value.clone()).is_ok()
        } else {
            debug!(id = id.as_str(), origin = ?origin, "Ignoring list value from lower priority dialect");
            false
        };

        if accepted {
            self.origins.insert(id, origin);
            self.notify(MetadataEvent::Common { id, value });
        }
    }
}

fn total_of(position: CommonTagId) -> CommonTagId {
    match position {
        CommonTagId::Disk => CommonTagId::TotalDiscs,
        CommonTagId::MovementIndex => CommonTagId::MovementTotal,
        _ => CommonTagId::TotalTracks,
    }
}

impl TagSink for MetadataCollector {
    fn add_tag(&mut self, tag_type: TagType, id: &str, value: TagValue) {
        let tag = NativeTag::new(id, value);
        if self.format.add_tag_type(tag_type) {
            debug!(tag_type = %tag_type, "New tag type");
        }

        let mut warnings = Vec::new();
        let generic = self.mapper.map_tag(tag_type, &tag, &mut warnings);
        self.native.entry(tag_type).or_default().push(tag);
        for message in warnings {
            self.add_warning(message);
        }
        if let Some(generic) = generic {
            self.post_map(Origin::Tag(tag_type), generic);
        }
    }

    fn set_format(&mut self, field: FormatField) {
        self.format.apply(field.clone());
        self.notify(MetadataEvent::Format(field));
    }

    fn add_warning(&mut self, message: String) {
        warn!(message = %message, "Metadata warning");
        self.warnings.push(Warning { message });
    }

    fn options(&self) -> &ParseOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;

    use super::*;
    use crate::value::Comment;

    fn collector() -> MetadataCollector {
        MetadataCollector::new(ParseOptions::default())
    }

    fn picture(format: &str, data: &'static [u8]) -> TagValue {
        TagValue::Picture(Picture {
            format: format.to_string(),
            picture_type: Some("Cover (front)".to_string()),
            description: None,
            name: None,
            data: Bytes::from_static(data),
        })
    }

    #[test]
    fn better_dialect_wins_singletons() {
        let mut c = collector();
        c.add_tag(TagType::Id3v1, "title", "short".into());
        c.add_tag(TagType::Id3v24, "TIT2", "long title".into());
        c.add_tag(TagType::Id3v23, "TIT2", "worse".into());
        assert_eq!(c.common().title.as_deref(), Some("long title"));
        assert_eq!(c.origin(CommonTagId::Title), Some(Origin::Tag(TagType::Id3v24)));
    }

    #[test]
    fn equal_rank_overwrites_singletons() {
        let mut c = collector();
        c.add_tag(TagType::Vorbis, "ALBUM", "first".into());
        c.add_tag(TagType::Vorbis, "ALBUM", "second".into());
        assert_eq!(c.common().album.as_deref(), Some("second"));
    }

    #[test]
    fn lists_follow_the_winning_rank() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "TCON", "Rock".into());
        c.add_tag(TagType::Id3v23, "TCON", "Pop".into());
        c.add_tag(TagType::Id3v23, "TCON", "Rock".into());
        assert_eq!(c.common().genre, vec!["Rock".to_string(), "Pop".to_string()]);

        c.add_tag(TagType::Id3v1, "genre", "Blues".into());
        assert_eq!(c.common().genre.len(), 2);

        c.add_tag(TagType::Ape, "Genre", "Jazz".into());
        assert_eq!(c.common().genre, vec!["Jazz".to_string()]);
    }

    #[test]
    fn artists_synthesised_from_artist() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "TPE1", "A".into());
        assert_eq!(c.common().artist.as_deref(), Some("A"));
        assert_eq!(c.common().artists, vec!["A".to_string()]);

        c.add_tag(TagType::Id3v23, "TPE1", "B".into());
        assert_eq!(c.common().artist.as_deref(), Some("A"));
        assert_eq!(c.common().artists, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn artist_synthesised_from_artists() {
        let mut c = collector();
        for name in ["A", "B", "C"] {
            c.add_tag(TagType::Vorbis, "ARTISTS", name.into());
        }
        assert_eq!(c.common().artist.as_deref(), Some("A, B & C"));
        assert_eq!(c.origin(CommonTagId::Artist), Some(Origin::Artificial));
        assert_eq!(c.common().artists.len(), 3);

        c.add_tag(TagType::Vorbis, "ARTIST", "The Band".into());
        assert_eq!(c.common().artist.as_deref(), Some("The Band"));
    }

    #[test]
    fn track_then_total() {
        let mut c = collector();
        c.add_tag(TagType::Vorbis, "TRACKNUMBER", "3".into());
        c.add_tag(TagType::Vorbis, "TRACKTOTAL", "12".into());
        assert_eq!(c.common().track, TrackNo { no: Some(3), of: Some(12) });

        c.add_tag(TagType::Vorbis, "DISCTOTAL", "2".into());
        c.add_tag(TagType::Vorbis, "DISCNUMBER", "1".into());
        assert_eq!(c.common().disk, TrackNo { no: Some(1), of: Some(2) });
    }

    #[test]
    fn date_yields_year() {
        let mut c = collector();
        c.add_tag(TagType::Id3v24, "TDRC", "2019-04-12".into());
        assert_eq!(c.common().date.as_deref(), Some("2019-04-12"));
        assert_eq!(c.common().year, Some(2019));
    }

    #[test]
    fn numeric_and_boolean_coercion() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "TBPM", "128".into());
        c.add_tag(TagType::Id3v23, "TCMP", "1".into());
        c.add_tag(TagType::Vorbis, "DISCOGS_RELEASE_ID", "4242".into());
        c.add_tag(TagType::Vorbis, "REPLAYGAIN_TRACK_GAIN", "-3.26 dB".into());
        c.add_tag(TagType::Vorbis, "REPLAYGAIN_TRACK_MINMAX", "120,183".into());
        assert_eq!(c.common().bpm, Some(128));
        assert_eq!(c.common().compilation, Some(true));
        assert_eq!(c.common().discogs_release_id, Some(4242));
        let gain = c.common().replaygain_track_gain.unwrap();
        assert!((gain.db + 3.26).abs() < 1e-9);
        assert_eq!(c.common().replaygain_track_minmax, Some(vec![120, 183]));
    }

    #[test]
    fn isrc_is_deduplicated() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "TSRC", "USRC17607839".into());
        c.add_tag(TagType::Id3v23, "TXXX:ISRC", "USRC17607839".into());
        assert_eq!(c.common().isrc, vec!["USRC17607839".to_string()]);
        assert_eq!(c.native_count(TagType::Id3v23), 2);
    }

    #[test]
    fn itunes_gapless_comment() {
        let mut c = collector();
        let comment = Comment {
            language: Some("eng".into()),
            descriptor: Some(ITUNES_GAPLESS_DESCRIPTOR.into()),
            text: Some("1".into()),
        };
        c.add_tag(TagType::Id3v23, "COMM", TagValue::Comment(comment));
        assert_eq!(c.common().gapless, Some(true));
        assert_eq!(c.common().comment.len(), 1);
    }

    #[test]
    fn plain_comment_is_wrapped() {
        let mut c = collector();
        c.add_tag(TagType::Vorbis, "COMMENT", "nice".into());
        assert_eq!(c.common().comment[0].text.as_deref(), Some("nice"));
    }

    #[test]
    fn pictures_are_fixed_up() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "APIC", picture("image/JPG", b"\xFF\xD8\xFF\xE0"));
        c.add_tag(TagType::Id3v23, "APIC", picture("", b"\x89PNG\r\n\x1a\n0000"));
        c.add_tag(TagType::Id3v23, "APIC", picture("image/png", b""));
        c.add_tag(TagType::Id3v23, "APIC", picture("", b"????"));

        let formats: Vec<&str> = c.common().picture.iter().map(|p| p.format.as_str()).collect();
        assert_eq!(formats, vec!["image/jpeg", "image/png"]);
        let messages: Vec<&str> = c.warnings().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Empty picture tag found", "Unable to determine picture format"]
        );
    }

    #[test]
    fn observer_sees_accepted_writes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let options = ParseOptions::default().observer(move |event| {
            sink.lock().unwrap().push(event.clone());
        });
        let mut c = MetadataCollector::new(options);
        c.set_format(FormatField::SampleRate(44_100));
        c.add_tag(TagType::Id3v24, "TIT2", "kept".into());
        c.add_tag(TagType::Id3v1, "title", "ignored".into());

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                MetadataEvent::Format(FormatField::SampleRate(44_100)),
                MetadataEvent::Common {
                    id: CommonTagId::Title,
                    value: CommonValue::Text("kept".into()),
                },
            ]
        );
    }

    #[test]
    fn metadata_serializes_to_the_output_shape() {
        let mut c = collector();
        c.add_tag(TagType::Id3v23, "TIT2", "Test".into());
        c.add_warning("odd".to_string());
        let json: serde_json::Value = serde_json::from_str(&c.into_metadata().to_json().unwrap()).unwrap();
        assert_eq!(json["common"]["title"], "Test");
        assert_eq!(json["common"]["track"], serde_json::json!({"no": null, "of": null}));
        assert_eq!(json["native"]["ID3v2.3"][0]["id"], "TIT2");
        assert_eq!(json["format"]["tagTypes"], serde_json::json!(["ID3v2.3"]));
        assert_eq!(json["quality"]["warnings"][0]["message"], "odd");
    }

    impl MetadataCollector {
        fn native_count(&self, tag_type: TagType) -> usize {
            self.native.get(&tag_type).map_or(0, Vec::len)
        }
    }
}
