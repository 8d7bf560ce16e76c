use super::*;
use crate::foundation::core::Canvas;

fn frame(w: u32, h: u32) -> MediaFrame {
    MediaFrame::video(
        ImageInfo::bgra_unpremul(Canvas::new(w, h).unwrap()),
        Fps::NTSC_59_94,
        ColorSpace::Bt709,
        VideoFlags::ALPHA,
    )
    .unwrap()
}

#[test]
fn header_matches_image_info() {
    let f = frame(1920, 1080);
    let h = f.header();
    assert_eq!(h.frame_type, FrameType::Video);
    assert_eq!(h.codec, Codec::Bgra);
    assert_eq!(h.stride, 1920 * 4);
    assert_eq!(f.data_len(), 1920 * 4 * 1080);
    assert_eq!(h.data_len(), f.data_len());
    assert!((h.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(f.pacing(), Pacing::Auto);
}

#[test]
fn premultiplied_flag_is_rejected() {
    let err = MediaFrame::video(
        ImageInfo::bgra_unpremul(Canvas::new(4, 4).unwrap()),
        Fps::NTSC_59_94,
        ColorSpace::Bt709,
        VideoFlags::ALPHA | VideoFlags::PREMULTIPLIED,
    );
    assert!(err.is_err());
}

#[test]
fn fourcc_spells_bgra() {
    assert_eq!(Codec::Bgra.fourcc().to_le_bytes(), *b"BGRA");
}

#[test]
fn color_space_follows_resolution() {
    assert_eq!(ColorSpace::for_height(1080), ColorSpace::Bt709);
    assert_eq!(ColorSpace::for_height(720), ColorSpace::Bt709);
    assert_eq!(ColorSpace::for_height(576), ColorSpace::Bt601);
}

#[test]
fn explicit_timestamp_uses_frame_rate() {
    let mut f = frame(2, 2);
    f.set_explicit_timestamp(FrameIndex(60_000));
    assert_eq!(f.pacing(), Pacing::Explicit(1001 * 10_000_000));
    f.set_pacing(Pacing::Auto);
    assert_eq!(f.pacing(), Pacing::Auto);
}

#[test]
fn rgba_export_swaps_channels() {
    let mut f = frame(1, 1);
    f.data_mut().copy_from_slice(&[3, 2, 1, 4]);
    assert_eq!(f.to_rgba8(), vec![1, 2, 3, 4]);
}
