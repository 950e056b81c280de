//! Native tag key to [`CommonTagId`] tables, one per dialect.
//!
//! Each dialect module exposes a `mapper()` building a [`TableMapper`] from a
//! static `(native key, common id)` table plus an optional rewrite hook run
//! before the lookup. [`CombinedTagMapper::shared`] holds all of them in an
//! immutable registry built on first use.

mod aiff;
mod ape;
mod asf;
mod id3v1;
mod id3v2;
mod matroska;
mod mp4;
mod riff;
mod vorbis;

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::{common::CommonTagId, tag_type::TagType, value::NativeTag};

pub use id3v2::popularimeter_to_rating;

/// A native tag translated to the common vocabulary, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericTag {
    pub id: CommonTagId,
    pub value: crate::value::TagValue,
}

/// Rewrites a native tag before the table lookup; `None` keeps it native only.
pub type PostMapFn = fn(NativeTag, &mut Vec<String>) -> Option<NativeTag>;

pub trait TagMapper: Send + Sync {
    /// Dialects handled by this mapper.
    fn tag_types(&self) -> &'static [TagType];

    fn common_id(&self, native_id: &str) -> Option<CommonTagId>;

    fn post_map(&self, tag: NativeTag, _warnings: &mut Vec<String>) -> Option<NativeTag> {
        Some(tag)
    }

    fn map_tag(&self, tag: &NativeTag, warnings: &mut Vec<String>) -> Option<GenericTag> {
        let tag = self.post_map(tag.clone(), warnings)?;
        let id = self.common_id(&tag.id)?;
        Some(GenericTag {
            id,
            value: tag.value,
        })
    }
}

/// A mapper backed by a static table.
pub struct TableMapper {
    tag_types: &'static [TagType],
    table: HashMap<String, CommonTagId>,
    case_insensitive: bool,
    post_map: Option<PostMapFn>,
}

impl TableMapper {
    pub fn new(tag_types: &'static [TagType], table: &[(&str, CommonTagId)]) -> Self {
        Self {
            tag_types,
            table: table
                .iter()
                .map(|(key, id)| (key.to_string(), *id))
                .collect(),
            case_insensitive: false,
            post_map: None,
        }
    }

    /// Matches native keys regardless of case.
    pub fn case_insensitive(mut self) -> Self {
        self.table = self
            .table
            .into_iter()
            .map(|(key, id)| (key.to_uppercase(), id))
            .collect();
        self.case_insensitive = true;
        self
    }

    pub fn with_post_map(mut self, hook: PostMapFn) -> Self {
        self.post_map = Some(hook);
        self
    }
}

impl TagMapper for TableMapper {
    fn tag_types(&self) -> &'static [TagType] {
        self.tag_types
    }

    fn common_id(&self, native_id: &str) -> Option<CommonTagId> {
        if self.case_insensitive {
            self.table.get(&native_id.to_uppercase()).copied()
        } else {
            self.table.get(native_id).copied()
        }
    }

    fn post_map(&self, tag: NativeTag, warnings: &mut Vec<String>) -> Option<NativeTag> {
        match self.post_map {
            Some(hook) => hook(tag, warnings),
            None => Some(tag),
        }
    }
}

/// Registry of every dialect mapper.
pub struct CombinedTagMapper {
    mappers: Vec<Box<dyn TagMapper>>,
    by_type: HashMap<TagType, usize>,
}

static SHARED: Lazy<Arc<CombinedTagMapper>> = Lazy::new(|| Arc::new(CombinedTagMapper::new()));

impl CombinedTagMapper {
    /// A registry holding the built-in mapper of every dialect.
    pub fn new() -> Self {
        let mut combined = Self {
            mappers: Vec::new(),
            by_type: HashMap::new(),
        };
        combined.register(Box::new(id3v1::mapper()));
        combined.register(Box::new(id3v2::v22_mapper()));
        combined.register(Box::new(id3v2::v24_mapper()));
        combined.register(Box::new(ape::mapper()));
        combined.register(Box::new(vorbis::mapper()));
        combined.register(Box::new(mp4::mapper()));
        combined.register(Box::new(asf::mapper()));
        combined.register(Box::new(riff::mapper()));
        combined.register(Box::new(matroska::mapper()));
        combined.register(Box::new(aiff::mapper()));
        combined
    }

    /// The process-wide read-only registry.
    pub fn shared() -> Arc<CombinedTagMapper> {
        Arc::clone(&SHARED)
    }

    /// Adds a mapper; it replaces earlier mappers for the same dialects.
    pub fn register(&mut self, mapper: Box<dyn TagMapper>) {
        let index = self.mappers.len();
        for tag_type in mapper.tag_types() {
            self.by_type.insert(*tag_type, index);
        }
        self.mappers.push(mapper);
    }

    pub fn mapper(&self, tag_type: TagType) -> Option<&dyn TagMapper> {
        self.by_type
            .get(&tag_type)
            .map(|&index| self.mappers[index].as_ref())
    }

    pub fn map_tag(
        &self,
        tag_type: TagType,
        tag: &NativeTag,
        warnings: &mut Vec<String>,
    ) -> Option<GenericTag> {
        let Some(mapper) = self.mapper(tag_type) else {
            debug!(tag_type = %tag_type, id = %tag.id, "No tag mapper for dialect");
            return None;
        };
        mapper.map_tag(tag, warnings)
    }
}

impl Default for CombinedTagMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TagValue;

    fn map(tag_type: TagType, id: &str, value: TagValue) -> Option<GenericTag> {
        let mut warnings = Vec::new();
        CombinedTagMapper::shared().map_tag(tag_type, &NativeTag::new(id, value), &mut warnings)
    }

    #[test]
    fn every_dialect_has_a_mapper() {
        let combined = CombinedTagMapper::shared();
        for tag_type in TagType::ALL {
            assert!(combined.mapper(tag_type).is_some(), "{tag_type}");
        }
    }

    #[test]
    fn title_maps_in_each_dialect() {
        let keys = [
            (TagType::Id3v1, "title"),
            (TagType::Id3v22, "TT2"),
            (TagType::Id3v23, "TIT2"),
            (TagType::Id3v24, "TIT2"),
            (TagType::Ape, "Title"),
            (TagType::Vorbis, "TITLE"),
            (TagType::ITunes, "©nam"),
            (TagType::Asf, "Title"),
            (TagType::Exif, "INAM"),
            (TagType::Matroska, "track:TITLE"),
            (TagType::Aiff, "NAME"),
        ];
        for (tag_type, key) in keys {
            let generic = map(tag_type, key, "x".into());
            assert_eq!(generic.map(|g| g.id), Some(CommonTagId::Title), "{tag_type} {key}");
        }
    }

    #[test]
    fn case_insensitive_dialects() {
        assert_eq!(
            map(TagType::Id3v24, "TXXX:replaygain_track_gain", "-1 dB".into()).map(|g| g.id),
            Some(CommonTagId::ReplayGainTrackGain)
        );
        assert_eq!(
            map(TagType::Ape, "ALBUM ARTIST", "x".into()).map(|g| g.id),
            Some(CommonTagId::AlbumArtist)
        );
        assert_eq!(map(TagType::Vorbis, "title", "x".into()), None);
    }

    #[test]
    fn unmapped_keys_stay_native() {
        assert_eq!(map(TagType::Id3v23, "XXXX", "x".into()), None);
    }
}
