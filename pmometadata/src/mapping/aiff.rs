use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("NAME", C::Title),
    ("AUTH", C::Artist),
    ("(c) ", C::Copyright),
    ("ANNO", C::Comment),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Aiff], TABLE)
}
