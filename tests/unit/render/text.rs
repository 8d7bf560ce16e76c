use super::*;

fn local_font() -> Option<Vec<u8>> {
    let candidates = [
        std::env::var("TICKERCAST_TEST_FONT").ok(),
        Some("assets/DejaVuSans-Bold.ttf".to_string()),
        Some("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".to_string()),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|p| std::fs::read(p).ok())
}

#[test]
fn rejects_bad_size_and_empty_font() {
    let mut engine = TextLayoutEngine::new();
    assert!(
        engine
            .shape_line("x", &[], 48.0, Rgba8::white())
            .is_err()
    );
    assert!(
        engine
            .shape_line("x", &[0u8; 4], f32::NAN, Rgba8::white())
            .is_err()
    );
}

#[test]
fn garbage_font_bytes_are_a_text_error() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .shape_line("x", b"definitely not a font", 48.0, Rgba8::white())
        .unwrap_err();
    assert!(matches!(err, TickerError::Text(_)));
}

#[test]
fn shaped_width_grows_with_text_if_font_present() {
    let Some(font) = local_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let short = engine
        .shape_line("ticker", &font, 48.0, Rgba8::white())
        .unwrap();
    let long = engine
        .shape_line("ticker ticker ticker", &font, 48.0, Rgba8::white())
        .unwrap();
    assert!(short.metrics().width > 0.0);
    assert!(long.metrics().width > short.metrics().width * 2.0);
    assert!(short.metrics().ascent > 0.0);
    assert!(short.metrics().descent > 0.0);
    assert_eq!(long.layout.lines().count(), 1);
}
