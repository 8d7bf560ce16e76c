use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 128), 64);
}

#[test]
fn unpremul_inverts_premul_for_opaque_and_transparent() {
    assert_eq!(unpremul_rgba8(premul_rgba8([10, 20, 30, 255])), [10, 20, 30, 255]);
    assert_eq!(unpremul_rgba8([7, 7, 7, 0]), [0, 0, 0, 0]);
}

#[test]
fn unpremul_recovers_translucent_colors_within_rounding() {
    let straight = [0, 89, 254, 192];
    let back = unpremul_rgba8(premul_rgba8(straight));
    for (a, b) in straight.iter().zip(back.iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1, "{straight:?} vs {back:?}");
    }
}

#[test]
fn row_conversion_swizzles_to_bgra() {
    let src = [255, 0, 0, 255, 0, 0, 0, 0];
    let mut dst = [9u8; 8];
    premul_rgba_to_straight_bgra(&src, &mut dst);
    assert_eq!(dst, [0, 0, 255, 255, 0, 0, 0, 0]);
}
