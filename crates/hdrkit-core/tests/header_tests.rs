//! Integration tests for the header store, its codecs and the dump.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use hdrkit_core::dump::dump;
use hdrkit_core::encoding::{
    blob, read_header, write_header, Preamble, HEADER_MAGIC, MAX_INDEX_ENTRIES,
};
use hdrkit_core::{Data, DumpOptions, Entry, Header, HeaderConfig, HeaderError, Tag, TagType};

/// Build a header resembling a small package description, in unsorted order.
fn package_header() -> Header {
    let mut header = Header::new();
    header.add(1004, "A shell").expect("summary");
    header.add(1000, "bash").expect("name");
    header.add(1001, "5.2.15").expect("version");
    header.add(1009, 1_048_576i32).expect("size");
    header.add(1028, vec![4096i32, 512, 1024]).expect("file sizes");
    header.add(1030, vec![0o755i16, 0o644]).expect("file modes");
    header.add(1027, vec!["/bin/bash", "/bin/sh"]).expect("file names");
    header.add(1012, Data::Bin(&[0xde, 0xad, 0xbe, 0xef])).expect("signature");
    header.add(1005, 1_700_000_000_000i64).expect("build time");
    header
}

/// Collect `(tag, type, count, data)` for comparison across headers.
fn entries(header: &Header) -> Vec<Entry<'_>> {
    header.iter().collect::<Result<_, _>>().expect("all entries decode")
}

// ============================================================================
// Store Tests
// ============================================================================

#[test]
fn test_add_then_find() {
    let mut header = Header::new();
    header.add_entry(7, TagType::Int32, Data::Int32(vec![42]), 1).expect("add");

    let entry = header.get_entry(7).expect("decode").expect("present");
    assert_eq!(entry.tag, Tag::new(7));
    assert_eq!(entry.tag_type, TagType::Int32);
    assert_eq!(entry.data, Data::Int32(vec![42]));
    assert_eq!(entry.count, 1);
}

#[test]
fn test_string_normalization() {
    let mut header = Header::new();
    header.add_entry(9, TagType::String, Data::String("hi"), 1).expect("add");

    let entry = header.get_entry(9).expect("decode").expect("present");
    assert_eq!(entry.tag_type, TagType::StringArray);
    assert_eq!(entry.data, Data::StringArray(vec!["hi"]));
    assert_eq!(header.find_entry(9).expect("record").tag_type(), TagType::String);
}

#[test]
fn test_string_count_rejection() {
    let mut header = Header::new();

    let err = header
        .add_entry(1, TagType::String, Data::StringArray(vec!["a", "b"]), 2)
        .expect_err("STRING requires count 1");
    assert!(matches!(err, HeaderError::InvalidCount { count: 2, .. }));
    assert!(err.is_contract_violation());
    assert!(header.is_empty());

    header
        .add_entry(1, TagType::StringArray, Data::StringArray(vec!["a", "b"]), 2)
        .expect("STRING_ARRAY takes any count");
    let entry = header.get_entry(1).expect("decode").expect("present");
    assert_eq!(entry.data, Data::StringArray(vec!["a", "b"]));
}

#[test]
fn test_scalar_update_keeps_offsets() {
    let mut header = package_header();
    let before: Vec<u32> = header.index().iter().map(|r| r.offset()).collect();

    header.modify_entry(1009, TagType::Int32, Data::Int32(vec![2_097_152])).expect("modify");
    header
        .modify_entry(1005, TagType::Int64, Data::Int64(vec![0]))
        .expect("modify wide integer");

    let after: Vec<u32> = header.index().iter().map(|r| r.offset()).collect();
    assert_eq!(before, after);
    assert_eq!(header.get_entry(1009).expect("decode").expect("present").data, Data::Int32(vec![2_097_152]));
    assert_eq!(header.get_entry(1005).expect("decode").expect("present").data, Data::Int64(vec![0]));
    assert_eq!(header.get_string(1000).expect("decode"), Some("bash"));
}

#[test]
fn test_modify_missing_tag() {
    let mut header = package_header();
    let err = header.modify_entry(4242, TagType::Int32, Data::Int32(vec![1])).expect_err("absent");
    assert!(matches!(err, HeaderError::NotFound(tag) if tag == Tag::new(4242)));
}

#[test]
fn test_alignment_of_wide_integers() {
    let header = package_header();
    for header in [header.clone(), header.canonicalize().expect("canonicalize")] {
        for record in header.index() {
            let align = record.tag_type().alignment();
            assert_eq!(record.offset() as usize % align, 0, "{record:?}");
        }
    }
}

#[test]
fn test_small_growth_blocks() {
    let config = HeaderConfig::default().with_index_block(1).with_data_block(1);
    let mut header = Header::with_config(config);
    let names: Vec<String> = (0..200).map(|i| format!("entry-{i}")).collect();
    for (i, name) in names.iter().enumerate() {
        header.add(i32::try_from(i).expect("small"), name.as_str()).expect("add");
    }
    for (i, name) in names.iter().enumerate() {
        let tag = i32::try_from(i).expect("small");
        assert_eq!(header.get_string(tag).expect("decode"), Some(name.as_str()));
    }
    assert_eq!(header.config(), &config);
}

// ============================================================================
// Canonicalization Tests
// ============================================================================

#[test]
fn test_canonicalize_sorts_and_is_idempotent() {
    let header = package_header();
    let once = header.canonicalize().expect("first");
    let twice = once.canonicalize().expect("second");

    assert_eq!(once, twice);
    assert!(once.is_sorted());
    assert!(!header.is_sorted());

    let tags: Vec<Tag> = once.index().iter().map(|r| r.tag()).collect();
    let mut sorted = tags.clone();
    sorted.sort();
    assert_eq!(tags, sorted);
}

#[test]
fn test_canonicalize_preserves_every_entry() {
    let header = package_header();
    let canonical = header.canonicalize().expect("canonicalize");

    let mut original = entries(&header);
    original.sort_by_key(|e| e.tag);
    assert_eq!(original, entries(&canonical));
}

// ============================================================================
// Wire Format Tests
// ============================================================================

#[test]
fn test_wire_round_trip_with_magic() {
    let header = package_header();
    let mut bytes = Vec::new();
    write_header(&header, &mut bytes, Preamble::WithMagic).expect("write");

    assert_eq!(&bytes[..4], &HEADER_MAGIC);
    assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
    assert_eq!(bytes.len(), header.wire_size(Preamble::WithMagic).expect("size"));

    let loaded = read_header(&mut bytes.as_slice(), Preamble::WithMagic).expect("read");
    let canonical = header.canonicalize().expect("canonicalize");
    assert_eq!(entries(&loaded), entries(&canonical));
    assert!(loaded.is_sorted());
}

#[test]
fn test_wire_round_trip_through_file() {
    let header = package_header();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("package.hdr");

    {
        let mut file = File::create(&path).expect("create");
        write_header(&header, &mut file, Preamble::Bare).expect("write");
    }
    let mut file = BufReader::new(File::open(&path).expect("open"));
    let loaded = read_header(&mut file, Preamble::Bare).expect("read");

    assert_eq!(loaded, header.canonicalize().expect("canonicalize"));
}

#[test]
fn test_flipped_magic_byte() {
    let header = package_header();
    let mut bytes = header.to_wire_bytes(Preamble::WithMagic).expect("encode");
    bytes[0] ^= 0xff;

    let err = Header::from_wire_bytes(&bytes, Preamble::WithMagic).expect_err("bad magic");
    assert!(matches!(err, HeaderError::BadMagic { .. }));
    assert!(err.is_corruption());
}

#[test]
fn test_unsupported_type_on_load() {
    let mut bytes = package_header().to_wire_bytes(Preamble::Bare).expect("encode");
    // type field of the first index record
    bytes[8 + 4..8 + 8].copy_from_slice(&99u32.to_be_bytes());

    let err = Header::from_wire_bytes(&bytes, Preamble::Bare).expect_err("bad type");
    assert!(matches!(err, HeaderError::UnsupportedType(99)));
    assert!(err.is_contract_violation());
}

#[test]
fn test_truncated_wire_stream() {
    let bytes = package_header().to_wire_bytes(Preamble::WithMagic).expect("encode");
    let err = Header::from_wire_bytes(&bytes[..bytes.len() / 2], Preamble::WithMagic)
        .expect_err("short");
    assert!(matches!(err, HeaderError::Truncated { .. }));
}

#[test]
fn test_too_many_entries_are_rejected_on_write() {
    let mut header = Header::new();
    for tag in 0..=MAX_INDEX_ENTRIES as i32 {
        header.add_entry(tag, TagType::Null, Data::Null, 1).expect("add");
    }
    assert_eq!(header.len(), 65_537);

    let err = header.to_wire_bytes(Preamble::WithMagic).expect_err("too many entries");
    assert!(matches!(err, HeaderError::Encoding(_)));
    assert!(matches!(blob::pack(&header), Err(HeaderError::Encoding(_))));

    let mut out = Vec::new();
    assert!(write_header(&header, &mut out, Preamble::WithMagic).is_err());
    assert!(out.is_empty());

    // one entry fewer is still loadable
    let mut smaller = Header::new();
    for tag in 0..MAX_INDEX_ENTRIES as i32 {
        smaller.add_entry(tag, TagType::Null, Data::Null, 1).expect("add");
    }
    let bytes = smaller.to_wire_bytes(Preamble::WithMagic).expect("encode");
    let loaded = Header::from_wire_bytes(&bytes, Preamble::WithMagic).expect("decode");
    assert_eq!(loaded.len(), MAX_INDEX_ENTRIES as usize);
    assert_eq!(blob::unpack(&blob::pack(&smaller).expect("pack")).expect("unpack"), loaded);
}

// ============================================================================
// Blob Format Tests
// ============================================================================

#[test]
fn test_blob_round_trip() {
    let header = package_header();
    let packed = blob::pack(&header).expect("pack");
    let unpacked = blob::unpack(&packed).expect("unpack");

    assert_eq!(unpacked, header.canonicalize().expect("canonicalize"));
    assert_eq!(packed.len() + Preamble::WithMagic.size(), header.wire_size(Preamble::WithMagic).expect("size"));
}

#[test]
fn test_blob_and_wire_agree_on_content() {
    let header = package_header();
    let from_blob = blob::unpack(&blob::pack(&header).expect("pack")).expect("unpack");
    let from_wire =
        Header::from_wire_bytes(&header.to_wire_bytes(Preamble::Bare).expect("encode"), Preamble::Bare)
            .expect("decode");
    assert_eq!(from_blob, from_wire);
}

// ============================================================================
// Dump Tests
// ============================================================================

#[test]
fn test_dump_lists_every_record() {
    let header = package_header().canonicalize().expect("canonicalize");
    let names = HashMap::from([(Tag::new(1000), "NAME".to_owned()), (Tag::new(1001), "VERSION".to_owned())]);
    let options = DumpOptions::default().with_inline(true).with_tag_names(names);

    let mut out = Vec::new();
    dump(&header, &mut out, &options).expect("dump");
    let text = String::from_utf8(out).expect("utf8");

    assert!(text.starts_with(&format!("Entry count: {}\n", header.len())));
    assert_eq!(text.matches("Entry      : ").count(), header.len());
    assert!(text.contains("(1000)NAME"));
    assert!(text.contains("(1001)VERSION"));
    assert!(text.contains("       Data: 000 /bin/bash\n       Data: 001 /bin/sh\n"));
    assert!(text.contains("       Data: 000 de ad be ef \n"));
}
