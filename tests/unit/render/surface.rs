use super::*;

fn size(width: u32, height: u32) -> BufferSize {
    BufferSize { width, height }
}

fn display(width: f64, height: f64) -> LogicalSize {
    LogicalSize { width, height }
}

#[test]
fn present_before_resize_is_rejected() {
    let mut s = SoftwareSurface::default();
    let buf = PixelBuffer::new(size(2, 2)).unwrap();
    assert!(s.present(&buf).is_err());
    assert_eq!(s.present_count(), 0);
}

#[test]
fn present_keeps_last_frame() {
    let mut s = SoftwareSurface::new(PresentFilter::none());
    s.resize(size(2, 1), display(5.0, 2.5)).unwrap();
    let buf = PixelBuffer::new(size(2, 1)).unwrap();
    s.present(&buf).unwrap();
    s.present(&buf).unwrap();
    assert_eq!(s.present_count(), 2);
    assert_eq!(s.last_frame(), Some(&buf));
    assert_eq!(s.display_size(), display(5.0, 2.5));
}

#[test]
fn resize_drops_stale_frame() {
    let mut s = SoftwareSurface::default();
    s.resize(size(2, 2), display(5.0, 5.0)).unwrap();
    s.present(&PixelBuffer::new(size(2, 2)).unwrap()).unwrap();
    s.resize(size(3, 3), display(7.5, 7.5)).unwrap();
    assert!(s.last_frame().is_none());
    assert_eq!(s.resize_count(), 2);
    assert!(s.present(&PixelBuffer::new(size(2, 2)).unwrap()).is_err());
}

#[test]
fn zero_sized_resize_is_rejected() {
    let mut s = SoftwareSurface::default();
    assert!(s.resize(size(0, 4), display(0.0, 10.0)).is_err());
}

#[test]
fn snapshot_is_display_sized() {
    let mut s = SoftwareSurface::default();
    assert!(s.snapshot().unwrap().is_none());

    s.resize(size(4, 2), display(10.0, 5.0)).unwrap();
    s.present(&PixelBuffer::new(size(4, 2)).unwrap()).unwrap();
    let snap = s.snapshot().unwrap().unwrap();
    assert_eq!((snap.width, snap.height), (10, 5));
    assert_eq!(snap.data.len(), 10 * 5 * 4);
    // Black stays black under blur and dimming; alpha stays opaque.
    assert!(snap.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
