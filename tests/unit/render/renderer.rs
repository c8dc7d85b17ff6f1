use super::*;
use crate::render::filter::PresentFilter;
use crate::render::surface::SoftwareSurface;
use crate::render::viewport::ViewportMetrics;

fn renderer_for(width: f64, height: f64) -> (Renderer<SoftwareSurface>, Viewport) {
    let mut vp = Viewport::new();
    let _ = vp.recompute(ViewportMetrics::new(width, height, 1.0));
    let mut r = Renderer::with_field(
        NoiseField::with_seed(17),
        SoftwareSurface::new(PresentFilter::none()),
    );
    r.resize(&vp).unwrap();
    (r, vp)
}

#[test]
fn render_before_resize_fails() {
    let mut r = Renderer::with_field(NoiseField::with_seed(1), SoftwareSurface::default());
    assert!(r.render_frame(0.016, Timestamp(16.0)).is_err());
    assert_eq!(r.stats().frames_rendered, 0);
}

#[test]
fn frame_fills_every_pixel_opaque_and_presents() {
    let (mut r, _) = renderer_for(50.0, 25.0);
    r.render_frame(0.05, Timestamp(1000.0)).unwrap();

    let buf = r.buffer().unwrap();
    assert_eq!((buf.width(), buf.height()), (20, 10));
    assert!(buf.data().chunks_exact(4).all(|px| px[3] == 255));
    // Nothing is left at the allocation color: green never drops below its 30 offset.
    assert!(buf.data().chunks_exact(4).all(|px| px[1] >= 30));
    assert_eq!(r.surface().present_count(), 1);
    assert_eq!(r.surface().last_frame(), Some(buf));
    assert_eq!(r.stats().frames_rendered, 1);
}

#[test]
fn pixels_follow_field_and_palette() {
    let (mut r, _) = renderer_for(50.0, 25.0);
    let now = Timestamp(2500.0);
    r.render_frame(0.1, now).unwrap();

    let z = r.field().depth();
    let palette = ColorMapper.palette(now.as_secs());
    for (x, y) in [(0u32, 0u32), (7, 3), (19, 9)] {
        let v = r
            .field()
            .sample(f64::from(x) / NOISE_DIVISOR, f64::from(y) / NOISE_DIVISOR, z);
        let [cr, cg, cb] = palette.map(normalize(v));
        assert_eq!(r.buffer().unwrap().pixel(x, y), Some([cr, cg, cb, 255]));
    }
}

#[test]
fn depth_advances_with_dt() {
    let (mut r, _) = renderer_for(10.0, 10.0);
    let z0 = r.field().depth();
    r.render_frame(1.0, Timestamp(1000.0)).unwrap();
    assert!((r.field().depth() - (z0 + 0.2)).abs() < 1e-9);
}

#[test]
fn same_seed_renders_identical_frames() {
    let (mut a, _) = renderer_for(40.0, 30.0);
    let (mut b, _) = renderer_for(40.0, 30.0);
    a.render_frame(0.033, Timestamp(33.0)).unwrap();
    b.render_frame(0.033, Timestamp(33.0)).unwrap();
    assert_eq!(a.buffer(), b.buffer());
}

#[test]
fn resize_reallocates_and_counts() {
    let (mut r, mut vp) = renderer_for(10.0, 10.0);
    assert_eq!(r.stats().reallocations, 1);
    let _ = vp.recompute(ViewportMetrics::new(20.0, 10.0, 1.0));
    r.resize(&vp).unwrap();
    assert_eq!(r.stats().reallocations, 2);
    assert_eq!(r.buffer().unwrap().width(), 8);
    assert_eq!(r.surface().resize_count(), 2);
}
