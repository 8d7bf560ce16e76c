pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Premultiply straight RGBA8 (`c * a / 255`, rounded).
pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { mul_div255_u8(u16::from(c), a16) };
    [premul(r), premul(g), premul(b), a]
}

/// Undo premultiplication of one RGBA8 pixel (`c * 255 / a`, rounded, clamped).
///
/// Fully transparent pixels map to all zeros.
pub(crate) fn unpremul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    match a {
        0 => [0, 0, 0, 0],
        255 => rgba,
        _ => {
            let a32 = u32::from(a);
            let un = |c: u8| -> u8 {
                let v = (u32::from(c) * 255 + a32 / 2) / a32;
                v.min(255) as u8
            };
            [un(r), un(g), un(b), a]
        }
    }
}

/// Convert a row of premultiplied RGBA8 pixels into unpremultiplied BGRA8.
///
/// `src` and `dst` must have the same length, a multiple of 4.
pub(crate) fn premul_rgba_to_straight_bgra(src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let [r, g, b, a] = unpremul_rgba8([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&[b, g, r, a]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
