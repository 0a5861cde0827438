use super::*;

#[test]
fn size_validation_rejects_zero_area() {
    assert!(Size::new(0, 10).validate().is_err());
    assert!(Size::new(10, 0).validate().is_err());
    assert_eq!(Size::new(3, 5).validate().unwrap(), Size::new(3, 5));
}

#[test]
fn size_serializes_as_pair() {
    let s: Size = serde_json::from_str("[300, 500]").unwrap();
    assert_eq!(s, Size::new(300, 500));
    assert_eq!(serde_json::to_string(&s).unwrap(), "[300,500]");
    assert_eq!(s.rgba_len(), Some(300 * 500 * 4));
}

#[test]
fn rgba_len_reports_overflow() {
    assert_eq!(Size::new(1, 1).rgba_len(), Some(4));
    assert_eq!(Size::new(u32::MAX, u32::MAX).rgba_len(), None);
}

#[test]
fn unpremultiply_restores_opaque_and_zeroes_transparent() {
    let mut px = vec![255, 0, 0, 255, 9, 9, 9, 0, 64, 32, 0, 128];
    unpremultiply_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 0, 0, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[128, 64, 0, 128]);
}

#[test]
fn frame_index_next_increments() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}
