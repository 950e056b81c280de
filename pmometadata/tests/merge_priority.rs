use pmometadata::{
    MetadataCollector, Origin, ParseOptions, TagSink, TagType, TagValue, TrackNo,
};

/// Every ordering of `items`.
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

fn collect(tags: &[(TagType, &str, &str)]) -> MetadataCollector {
    let mut collector = MetadataCollector::new(ParseOptions::default());
    for (tag_type, id, value) in tags {
        collector.add_tag(*tag_type, id, TagValue::from(*value));
    }
    collector
}

#[test]
fn best_ranked_dialect_wins_in_any_order() {
    let album_tags = [
        (TagType::Id3v1, "album", "from id3v1"),
        (TagType::Id3v23, "TALB", "from id3v2.3"),
        (TagType::Ape, "Album", "from ape"),
        (TagType::ITunes, "©alb", "from itunes"),
        (TagType::Vorbis, "ALBUM", "from vorbis"),
    ];
    for order in permutations(&album_tags) {
        let collector = collect(&order);
        assert_eq!(
            collector.common().album.as_deref(),
            Some("from ape"),
            "order: {order:?}"
        );
        assert_eq!(
            collector.origin(pmometadata::CommonTagId::Album),
            Some(Origin::Tag(TagType::Ape))
        );
    }
}

#[test]
fn best_ranked_list_wins_in_any_order() {
    let genre_tags = [
        (TagType::Id3v1, "genre", "Blues"),
        (TagType::Id3v24, "TCON", "Rock"),
        (TagType::Id3v24, "TCON", "Pop"),
        (TagType::Asf, "WM/Genre", "Jazz"),
    ];
    for order in permutations(&genre_tags) {
        let collector = collect(&order);
        let mut genre = collector.common().genre.clone();
        genre.sort();
        assert_eq!(genre, vec!["Pop".to_string(), "Rock".to_string()], "order: {order:?}");
    }
}

#[test]
fn total_from_equal_or_worse_dialect_keeps_track_total() {
    let collector = collect(&[
        (TagType::Id3v23, "TRCK", "3/12"),
        (TagType::Matroska, "album:TOTAL_PARTS", "10"),
    ]);
    // Matroska ranks first, so its total replaces the one from TRCK.
    assert_eq!(collector.common().track, TrackNo { no: Some(3), of: Some(10) });

    let collector = collect(&[
        (TagType::Vorbis, "TRACKNUMBER", "3/12"),
        (TagType::Vorbis, "TRACKTOTAL", "10"),
    ]);
    assert_eq!(collector.common().track, TrackNo { no: Some(3), of: Some(12) });

    let collector = collect(&[
        (TagType::Vorbis, "TRACKNUMBER", "3/12"),
        (TagType::Exif, "ITRK", "4"),
    ]);
    assert_eq!(collector.common().track, TrackNo { no: Some(3), of: Some(12) });
}

#[test]
fn new_position_keeps_previous_total() {
    let collector = collect(&[
        (TagType::Id3v24, "TPOS", "1/2"),
        (TagType::Vorbis, "DISCNUMBER", "2"),
    ]);
    assert_eq!(collector.common().disk, TrackNo { no: Some(2), of: Some(2) });
}

#[test]
fn native_record_keeps_everything() {
    let collector = collect(&[
        (TagType::Id3v1, "title", "a"),
        (TagType::Id3v24, "TIT2", "b"),
        (TagType::Id3v24, "XYZW", "unmapped"),
    ]);
    let metadata = collector.into_metadata();
    assert_eq!(metadata.native_tags(TagType::Id3v24).len(), 2);
    assert_eq!(metadata.native_tags(TagType::Id3v1).len(), 1);
    assert!(metadata.native_tags(TagType::Ape).is_empty());
    assert_eq!(metadata.format.tag_types, vec![TagType::Id3v1, TagType::Id3v24]);
    assert!(metadata.quality.warnings.is_empty());
}
