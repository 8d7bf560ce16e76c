use super::*;

fn style() -> TextStyle {
    TextStyle {
        font_data: std::sync::Arc::new(Vec::new()),
        size_px: 10.0,
        color: Rgba8::white(),
    }
}

fn px(s: &RecordingSurface, x: usize, y: usize) -> [u8; 4] {
    let i = y * s.info().stride() + x * 4;
    s.pixels()[i..i + 4].try_into().unwrap()
}

#[test]
fn fill_respects_rounded_corners() {
    let mut s = RecordingSurface::new(Canvas::new(40, 20).unwrap());
    let paint = LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(40.0, 20.0),
        start_color: Rgba8::new(10, 20, 30, 192),
        end_color: Rgba8::new(10, 20, 30, 192),
    };
    s.fill_rounded_rect(RoundedRect::new(0.0, 0.0, 40.0, 20.0, 8.0), &paint);
    assert_eq!(px(&s, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&s, 20, 10), [30, 20, 10, 192]);
}

#[test]
fn text_metrics_scale_with_length() {
    let mut s = RecordingSurface::new(Canvas::new(8, 8).unwrap()).with_advance_per_char(3.0);
    let t = s.prepare_text("abcd", &style()).unwrap();
    assert_eq!(s.text_metrics(&t).width, 12.0);
    assert_eq!(s.text_metrics(&t).ascent, 8.0);
}

#[test]
fn reads_fail_from_requested_index() {
    let mut s = RecordingSurface::new(Canvas::new(2, 2).unwrap()).fail_from_read(1);
    let mut dst = vec![0u8; 16];
    assert!(s.read_pixels(&mut dst, 8).is_ok());
    assert!(s.read_pixels(&mut dst, 8).unwrap_err().is_render_read());
    assert!(s.read_pixels(&mut dst, 8).is_err());
    assert_eq!(s.reads(), 3);
}

#[test]
fn read_honors_padded_stride() {
    let mut s = RecordingSurface::new(Canvas::new(1, 2).unwrap());
    s.draw_text(
        &RecordedText {
            text: "x".into(),
            metrics: TextMetrics {
                width: 1.0,
                ascent: 2.0,
                descent: 0.0,
            },
            color: Rgba8::new(1, 2, 3, 4),
        },
        Point::new(0.0, 2.0),
    );
    let mut dst = vec![0xAAu8; 12];
    s.read_pixels(&mut dst, 8).unwrap();
    assert_eq!(&dst[0..4], &[3, 2, 1, 4]);
    assert_eq!(&dst[4..8], &[0xAA; 4]);
    assert_eq!(&dst[8..12], &[3, 2, 1, 4]);
}
