use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("title", C::Title),
    ("artist", C::Artist),
    ("album", C::Album),
    ("year", C::Year),
    ("comment", C::Comment),
    ("track", C::Track),
    ("genre", C::Genre),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Id3v1], TABLE)
}
