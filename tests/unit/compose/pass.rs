use std::sync::Arc;

use super::*;
use crate::foundation::core::{Canvas, Rect};
use crate::render::recording::{DrawOp, RecordingSurface};

fn design(canvas: Canvas) -> OverlayDesign {
    OverlayDesign {
        region: OverlayRegion::bottom_strip(canvas, 20.0, 4.0),
        background_start: Rgba8::new(0, 19, 69, 192),
        background_end: Rgba8::new(0, 89, 254, 192),
        text: "breaking".into(),
        text_style: TextStyle {
            font_data: Arc::new(Vec::new()),
            size_px: 10.0,
            color: Rgba8::white(),
        },
    }
}

fn buffer(canvas: Canvas) -> FrameBuffer<RecordingSurface> {
    FrameBuffer::new(RecordingSurface::new(canvas).with_advance_per_char(5.0)).unwrap()
}

#[test]
fn draws_clear_then_background_then_text() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let pass = CompositionPass::new(fb.surface_mut(), &design(canvas)).unwrap();

    pass.render(&mut fb, 37.0);
    let ops = fb.surface().ops();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0], DrawOp::Clear);
    let DrawOp::FillRoundedRect { shape, paint } = &ops[1] else {
        panic!("expected background fill, got {:?}", ops[1]);
    };
    assert_eq!(shape.rect(), Rect::new(0.0, 40.0, 100.0, 60.0));
    assert_eq!(paint.start, Point::new(0.0, 40.0));
    assert_eq!(paint.end, Point::new(100.0, 60.0));
    let DrawOp::DrawText { text, origin } = &ops[2] else {
        panic!("expected text, got {:?}", ops[2]);
    };
    assert_eq!(text, "breaking");
    assert_eq!(origin.x, 37.0);
    assert_eq!(origin.y, pass.baseline_y());
}

#[test]
fn baseline_centers_text_box_in_region() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let pass = CompositionPass::new(fb.surface_mut(), &design(canvas)).unwrap();
    let m = pass.text_metrics();
    // Recording metrics: ascent 8, descent 2 for a 10px font.
    assert_eq!(pass.baseline_y(), 40.0 + (20.0 + 8.0 - 2.0) / 2.0);
    let top = pass.baseline_y() - m.ascent;
    let bottom = pass.baseline_y() + m.descent;
    assert_eq!(top - 40.0, 60.0 - bottom);
}

#[test]
fn text_width_is_measured_once_from_surface() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let pass = CompositionPass::new(fb.surface_mut(), &design(canvas)).unwrap();
    assert_eq!(pass.text_width(), 40.0);
}

#[test]
fn region_outside_canvas_fails_construction() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let mut d = design(canvas);
    d.region.rect = Rect::new(0.0, 50.0, 100.0, 70.0);
    assert!(CompositionPass::new(fb.surface_mut(), &d).is_err());
}

#[test]
fn same_scroll_gives_identical_pixels() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let pass = CompositionPass::new(fb.surface_mut(), &design(canvas)).unwrap();
    let mut a = vec![0u8; fb.byte_len()];
    let mut b = vec![0u8; fb.byte_len()];
    pass.render(&mut fb, 12.0);
    fb.read_into(&mut a).unwrap();
    pass.render(&mut fb, 12.0);
    fb.read_into(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn nothing_outside_region_is_painted() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut fb = buffer(canvas);
    let pass = CompositionPass::new(fb.surface_mut(), &design(canvas)).unwrap();
    pass.render(&mut fb, 0.0);
    let mut out = vec![0u8; fb.byte_len()];
    fb.read_into(&mut out).unwrap();
    let stride = fb.info().stride();
    assert!(out[..40 * stride].iter().all(|b| *b == 0));
    assert!(out[40 * stride..].chunks_exact(4).any(|px| px[3] == 192));
}
