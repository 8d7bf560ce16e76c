use super::*;
use crate::foundation::core::Canvas;
use crate::render::surface::ImageInfo;
use crate::transport::frame::{ColorSpace, VideoFlags};

fn frame() -> MediaFrame {
    MediaFrame::video(
        ImageInfo::bgra_unpremul(Canvas::new(4, 2).unwrap()),
        Fps::new(50, 1).unwrap(),
        ColorSpace::Bt709,
        VideoFlags::ALPHA,
    )
    .unwrap()
}

#[test]
fn in_memory_sender_copies_frames_and_counts() {
    let mut s = InMemorySender::new("Graphics");
    assert_eq!(s.address(), "memory://Graphics");
    let mut f = frame();
    f.data_mut()[0] = 7;
    assert_eq!(s.send(&f), 32);
    f.data_mut()[0] = 9;
    s.send(&f);

    assert_eq!(s.frames().len(), 2);
    assert_eq!(s.frames()[0].data[0], 7);
    assert_eq!(s.frames()[1].data[0], 9);
    assert_eq!(
        s.stats(),
        SenderStats {
            frames: 2,
            bytes: 64,
            dropped: 0
        }
    );
}

#[test]
fn sender_info_is_kept() {
    let mut s = InMemorySender::new("x");
    assert!(s.sender_info().is_none());
    s.set_sender_info(SenderInfo::this_crate());
    assert_eq!(s.sender_info().unwrap().product_name, "tickercast");
}

#[test]
fn mutable_reference_forwards_to_sender() {
    fn push_one<S: FrameSender>(mut sender: S, f: &MediaFrame) -> SenderStats {
        sender.send(f);
        sender.stats()
    }

    let mut inner = InMemorySender::new("x");
    let stats = push_one(&mut inner, &frame());
    assert_eq!(stats.frames, 1);
    assert_eq!(inner.frames().len(), 1);
}

#[test]
fn explicit_pacing_makes_discard_sender_non_blocking() {
    let mut s = DiscardSender::new("dry", Fps::new(1, 1).unwrap());
    let mut f = frame();
    let started = std::time::Instant::now();
    for i in 0..5 {
        f.set_pacing(Pacing::Explicit(i));
        s.send(&f);
    }
    assert!(started.elapsed() < std::time::Duration::from_millis(500));
    assert_eq!(s.stats().frames, 5);
    assert!(s.address().starts_with("discard://"));
}

#[test]
fn display_name_wraps_stream_name_in_parentheses() {
    let n = stream_display_name("Graphics");
    assert!(n.ends_with(" (Graphics)"), "{n}");
}
