//! RIFF `LIST/INFO` chunk ids.

use super::TableMapper;
use crate::{common::CommonTagId as C, tag_type::TagType};

const TABLE: &[(&str, C)] = &[
    ("IART", C::Artist),
    ("ICRD", C::Date),
    ("INAM", C::Title),
    ("TITL", C::Title),
    ("IPRD", C::Album),
    ("ITRK", C::Track),
    ("IPRT", C::Track),
    ("COMM", C::Comment),
    ("ICMT", C::Comment),
    ("ICNT", C::ReleaseCountry),
    ("GNRE", C::Genre),
    ("IGNR", C::Genre),
    ("IWRI", C::Writer),
    ("RATE", C::Rating),
    ("YEAR", C::Year),
    ("ISFT", C::EncodedBy),
    ("CODE", C::EncodedBy),
    ("TURL", C::Website),
    ("IENG", C::Engineer),
    ("ITCH", C::Technician),
    ("IMED", C::Media),
    ("IRPD", C::Album),
];

pub(super) fn mapper() -> TableMapper {
    TableMapper::new(&[TagType::Exif], TABLE)
}
