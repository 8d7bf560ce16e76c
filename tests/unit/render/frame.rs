use super::*;
use crate::foundation::core::{Canvas, Point, RoundedRect, Rgba8};
use crate::render::recording::RecordingSurface;
use crate::render::surface::LinearGradient;

fn painted_buffer() -> FrameBuffer<RecordingSurface> {
    let mut fb = FrameBuffer::new(RecordingSurface::new(Canvas::new(16, 8).unwrap())).unwrap();
    let paint = LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(16.0, 8.0),
        start_color: Rgba8::new(0, 19, 69, 192),
        end_color: Rgba8::new(0, 89, 254, 192),
    };
    fb.surface_mut()
        .fill_rounded_rect(RoundedRect::new(0.0, 0.0, 16.0, 8.0, 2.0), &paint);
    fb
}

#[test]
fn clear_is_idempotent_and_fully_transparent() {
    let mut fb = painted_buffer();
    let mut dst = vec![0xFFu8; fb.byte_len()];

    fb.clear();
    fb.read_into(&mut dst).unwrap();
    assert!(dst.iter().all(|b| *b == 0));

    dst.fill(0xFF);
    fb.clear();
    fb.read_into(&mut dst).unwrap();
    assert!(dst.chunks_exact(4).all(|px| px[3] == 0));
    assert!(dst.iter().all(|b| *b == 0));
}

#[test]
fn read_into_rejects_wrong_length_as_render_read() {
    let mut fb = painted_buffer();
    let mut short = vec![0u8; fb.byte_len() - 4];
    let err = fb.read_into(&mut short).unwrap_err();
    assert!(err.is_render_read());
}

#[test]
fn read_into_maps_surface_failure_to_render_read() {
    let surface = RecordingSurface::new(Canvas::new(4, 4).unwrap()).fail_from_read(0);
    let mut fb = FrameBuffer::new(surface).unwrap();
    let mut dst = vec![0u8; fb.byte_len()];
    assert!(fb.read_into(&mut dst).unwrap_err().is_render_read());
}

#[test]
fn read_into_is_bgra_with_straight_alpha() {
    let mut fb = painted_buffer();
    let mut dst = vec![0u8; fb.byte_len()];
    fb.read_into(&mut dst).unwrap();
    let stride = fb.info().stride();
    let center = &dst[4 * stride + 8 * 4..4 * stride + 8 * 4 + 4];
    assert_eq!(center[3], 192);
    assert_eq!(center[2], 0, "red lands in byte 2");
    assert!(center[0] > center[1], "blue dominates green");
}
