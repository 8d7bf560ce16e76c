use super::*;
use crate::foundation::core::Canvas;

fn ticker_gradient() -> LinearGradient {
    LinearGradient {
        start: Point::new(0.0, 960.0),
        end: Point::new(1920.0, 1080.0),
        start_color: Rgba8::new(0, 19, 69, 192),
        end_color: Rgba8::new(0, 89, 254, 192),
    }
}

#[test]
fn gradient_hits_stop_colors_at_endpoints() {
    let g = ticker_gradient();
    assert_eq!(g.color_at(g.start), g.start_color);
    assert_eq!(g.color_at(g.end), g.end_color);
}

#[test]
fn gradient_clamps_outside_span_and_keeps_constant_alpha() {
    let g = ticker_gradient();
    assert_eq!(g.color_at(Point::new(-100.0, 900.0)), g.start_color);
    assert_eq!(g.color_at(Point::new(5000.0, 2000.0)), g.end_color);
    for x in [0.0, 480.0, 960.0, 1440.0] {
        assert_eq!(g.color_at(Point::new(x, 1000.0)).a, 192);
    }
}

#[test]
fn gradient_midpoint_is_between_stops() {
    let g = ticker_gradient();
    let mid = g.color_at(g.start.midpoint(g.end));
    assert_eq!(mid.g, 54);
    assert!(mid.b > 69 && mid.b < 254);
}

#[test]
fn degenerate_gradient_uses_start_color() {
    let mut g = ticker_gradient();
    g.end = g.start;
    assert_eq!(g.color_at(Point::new(300.0, 300.0)), g.start_color);
}

#[test]
fn image_info_stride_is_four_bytes_per_pixel() {
    let info = ImageInfo::bgra_unpremul(Canvas::new(1920, 1080).unwrap());
    assert_eq!(info.stride(), 1920 * 4);
    assert_eq!(info.byte_len(), 1920 * 4 * 1080);
}
