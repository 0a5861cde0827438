use super::*;

#[test]
fn new_surface_is_transparent() {
    let mut s = RasterSurface::new(Size::new(4, 4)).unwrap();
    assert_eq!(s.size(), Size::new(4, 4));
    assert_eq!(s.pixel(0, 0).unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn clear_fills_with_clear_color() {
    let mut s = RasterSurface::new(Size::new(8, 6)).unwrap();
    s.set_clear_color(Rgba8::BLACK);
    s.clear();
    let frame = s.snapshot().unwrap();
    assert_eq!(frame.data.len(), 8 * 6 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn drawing_persists_between_commits() {
    let mut s = RasterSurface::new(Size::new(4, 1)).unwrap();
    s.set_clear_color(Rgba8::WHITE);
    s.clear();
    s.fill_rect(0.0, 0.0, 1.0, 1.0, Rgba8::rgb(0, 255, 0));
    assert_eq!(s.pixel(0, 0).unwrap(), Rgba8::rgb(0, 255, 0));

    s.fill_rect(3.0, 0.0, 1.0, 1.0, Rgba8::rgb(255, 0, 0));
    assert_eq!(s.pixel(0, 0).unwrap(), Rgba8::rgb(0, 255, 0));
    assert_eq!(s.pixel(3, 0).unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(s.pixel(1, 0).unwrap(), Rgba8::WHITE);
}

#[test]
fn resize_discards_contents() {
    let mut s = RasterSurface::new(Size::new(2, 2)).unwrap();
    s.set_clear_color(Rgba8::BLACK);
    s.clear();
    s.resize(Size::new(30, 40)).unwrap();
    assert_eq!(s.size(), Size::new(30, 40));
    assert_eq!(s.pixel(0, 0).unwrap(), Rgba8::TRANSPARENT);
}

#[test]
fn rejects_sizes_beyond_raster_limits() {
    let s = RasterSurface::new(Size::new(1, 1)).unwrap();
    assert!(s.check_size(Size::new(70_000, 1)).is_err());
    assert!(s.check_size(Size::new(0, 1)).is_err());
    assert!(s.check_size(Size::new(1024, 1024)).is_ok());
    assert!(RasterSurface::new(Size::new(1, 70_000)).is_err());
}

#[test]
fn snapshot_is_isolated_from_later_drawing() {
    let mut s = RasterSurface::new(Size::new(2, 2)).unwrap();
    s.fill_rect(0.0, 0.0, 2.0, 2.0, Rgba8::rgb(255, 0, 0));
    let pending = s.serialize_frame().unwrap();
    s.fill_rect(0.0, 0.0, 2.0, 2.0, Rgba8::rgb(0, 0, 255));

    let png = pending.resolve().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn pixel_outside_surface_is_an_error() {
    let mut s = RasterSurface::new(Size::new(2, 2)).unwrap();
    assert!(s.pixel(2, 0).is_err());
}
