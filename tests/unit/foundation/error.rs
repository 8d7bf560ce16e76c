use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TickerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TickerError::text("x").to_string().contains("text error:"));
    assert!(
        TickerError::render_read("x")
            .to_string()
            .contains("render read failure:")
    );
    assert!(
        TickerError::transport("x")
            .to_string()
            .contains("transport error:")
    );
    assert!(
        TickerError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_render_read_is_loop_fatal() {
    assert!(TickerError::render_read("gone").is_render_read());
    assert!(!TickerError::validation("bad").is_render_read());
    assert!(!TickerError::transport("down").is_render_read());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TickerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert() {
    let err: TickerError = std::io::Error::other("disk").into();
    assert!(matches!(err, TickerError::Io(_)));
}
