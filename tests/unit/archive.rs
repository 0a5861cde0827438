use std::io::Read as _;

use super::*;

fn read_back(archive: &FinishedArchive) -> Vec<(String, Vec<u8>)> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive.as_bytes())).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut f = zip.by_index(i).unwrap();
            let mut buf = Vec::new();
            f.read_to_end(&mut buf).unwrap();
            (f.name().to_owned(), buf)
        })
        .collect()
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(frame_entry_name(FrameIndex(0)), "000000.png");
    assert_eq!(frame_entry_name(FrameIndex(7)), "000007.png");
    assert_eq!(frame_entry_name(FrameIndex(123_456)), "123456.png");
    assert_eq!(frame_entry_name(FrameIndex(1_234_567)), "1234567.png");
}

#[test]
fn finalize_preserves_insertion_order() {
    let mut b = ArchiveBuilder::new();
    b.put_frame(FrameIndex(0), b"zero").unwrap();
    b.put_frame(FrameIndex(1), b"one").unwrap();
    b.put("notes.txt", b"two").unwrap();
    assert_eq!(b.len(), 3);

    let done = b.finalize().unwrap();
    assert_eq!(done.mime_type(), "application/zip");
    assert_eq!(done.entries(), ["000000.png", "000001.png", "notes.txt"]);

    let entries = read_back(&done);
    assert_eq!(
        entries,
        vec![
            ("000000.png".to_owned(), b"zero".to_vec()),
            ("000001.png".to_owned(), b"one".to_vec()),
            ("notes.txt".to_owned(), b"two".to_vec()),
        ]
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let mut b = ArchiveBuilder::new();
    b.put("000000.png", b"a").unwrap();
    let err = b.put("000000.png", b"b").unwrap_err();
    assert!(matches!(err, ReelError::DuplicateName(ref n) if n == "000000.png"));
    assert_eq!(b.len(), 1);
}

#[test]
fn empty_archive_cannot_be_finalized() {
    let mut b = ArchiveBuilder::new();
    assert!(matches!(b.finalize(), Err(ReelError::EmptyArchive)));
    assert!(!b.is_finalized());
}

#[test]
fn finalize_is_one_shot_until_reset() {
    let mut b = ArchiveBuilder::new();
    b.put("a", b"1").unwrap();
    b.finalize().unwrap();
    assert!(b.is_finalized());
    assert!(matches!(b.put("b", b"2"), Err(ReelError::ArchiveFinalized)));
    assert!(matches!(b.finalize(), Err(ReelError::ArchiveFinalized)));

    b.reset();
    assert!(!b.is_finalized());
    assert!(b.is_empty());
    b.put("a", b"again").unwrap();
    let done = b.finalize().unwrap();
    assert_eq!(read_back(&done), vec![("a".to_owned(), b"again".to_vec())]);
}

#[test]
fn reset_discards_entries() {
    let mut b = ArchiveBuilder::new();
    b.put("a", b"1").unwrap();
    b.reset();
    assert!(b.is_empty());
    b.put("a", b"2").unwrap();
    assert_eq!(b.names(), ["a"]);
}
