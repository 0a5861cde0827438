use super::*;

#[test]
fn clear_replaces_every_pixel() {
    let mut s = FramebufferSurface::new(Size::new(3, 2)).unwrap();
    s.fill_rect(0, 0, 1, 1, Rgba8::rgb(9, 9, 9));
    s.set_clear_color(Rgba8::new(0, 0, 255, 128));
    s.clear();
    assert!(s.pixels().pixels().all(|p| p.0 == [0, 0, 255, 128]));
    assert_eq!(s.clear_color(), Rgba8::new(0, 0, 255, 128));
}

#[test]
fn fill_rect_is_clipped() {
    let mut s = FramebufferSurface::new(Size::new(4, 4)).unwrap();
    s.fill_rect(2, 2, 10, 10, Rgba8::rgb(255, 0, 0));
    assert_eq!(s.pixel(3, 3), Some(Rgba8::rgb(255, 0, 0)));
    assert_eq!(s.pixel(1, 1), Some(Rgba8::TRANSPARENT));
    assert_eq!(s.pixel(4, 4), None);
}

#[test]
fn resize_and_snapshot() {
    let mut s = FramebufferSurface::new(Size::new(1, 1)).unwrap();
    s.resize(Size::new(3, 5)).unwrap();
    let frame = s.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (3, 5));
    assert_eq!(frame.data.len(), 3 * 5 * 4);
    assert!(s.resize(Size::new(0, 5)).is_err());
}

#[test]
fn oversize_buffers_are_rejected_without_allocating() {
    let mut s = FramebufferSurface::new(Size::new(2, 2)).unwrap();
    for size in [Size::new(u32::MAX, u32::MAX), Size::new(100_000, 100_000)] {
        assert!(matches!(s.check_size(size), Err(ReelError::Validation(_))));
        assert!(matches!(s.resize(size), Err(ReelError::Validation(_))));
        assert!(matches!(
            FramebufferSurface::new(size),
            Err(ReelError::Validation(_))
        ));
    }
    assert_eq!(s.size(), Size::new(2, 2));
    // 16384 x 16384 x 4 is exactly the cap.
    assert!(s.check_size(Size::new(16_384, 16_384)).is_ok());
    assert!(s.check_size(Size::new(16_385, 16_384)).is_err());
}
