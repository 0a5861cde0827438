use super::*;
use crate::archive::ArchiveBuilder;

fn tiny_archive() -> FinishedArchive {
    let mut b = ArchiveBuilder::new();
    b.put("000000.png", b"x").unwrap();
    b.finalize().unwrap()
}

#[test]
fn save_archive_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/frames.zip");
    let archive = tiny_archive();
    save_archive(&archive, &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), archive.as_bytes());
}

#[test]
fn save_to_handler_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_ARCHIVE_NAME);
    let handler = save_to(&path);
    handler(tiny_archive());
    assert!(path.exists());
}

#[test]
fn closures_are_present_targets() {
    let mut attached = 0;
    let mut target = |_s: &u8| -> ReelResult<()> {
        attached += 1;
        Ok(())
    };
    target.attach(&7).unwrap();
    target.attach(&7).unwrap();
    drop(target);
    assert_eq!(attached, 2);
}
