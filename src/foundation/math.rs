use crate::foundation::error::{EtherError, EtherResult};

/// Linear interpolation from `a` to `b` by `t` (unclamped).
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Re-map `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]` (unclamped).
///
/// A degenerate input range maps everything to the middle of the output range.
#[inline]
pub fn map_range(v: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return lerp(out_lo, out_hi, 0.5);
    }
    lerp(out_lo, out_hi, (v - in_lo) / span)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Composite RGBA8 `src` over the opaque color `bg_rgba` into `dst`, leaving every pixel at
/// alpha 255.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> EtherResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(EtherError::encode(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = bg_rgba.map(u16::from);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255_u16(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(-75.0, 75.0, 0.0), -75.0);
        assert_eq!(lerp(-75.0, 75.0, 1.0), 75.0);
        assert_eq!(lerp(212.0, 50.0, 0.5), 131.0);
    }

    #[test]
    fn map_range_matches_unit_interval() {
        assert_eq!(map_range(0.0, -1.0, 1.0, 0.6, 0.8), 0.7);
        assert_eq!(map_range(1.0, -1.0, 1.0, 0.0, 0.075), 0.075);
        assert_eq!(map_range(3.0, 2.0, 2.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn mul_div255_rounds() {
        assert_eq!(mul_div255_u16(255, 255), 255);
        assert_eq!(mul_div255_u16(255, 128), 128);
        assert_eq!(mul_div255_u16(0, 200), 0);
    }

    #[test]
    fn flatten_premul_over_black_produces_expected_rgb() {
        // Premultiplied red @ 50% alpha => rgb is 128,0,0 when premul.
        let src = vec![128u8, 0u8, 0u8, 128u8];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
        assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
    }

    #[test]
    fn flatten_straight_over_white_blends() {
        // Straight black @ 50% alpha over white => mid grey.
        let src = vec![0u8, 0u8, 0u8, 128u8];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, false, [255, 255, 255, 255]).unwrap();
        assert_eq!(dst, vec![127u8, 127u8, 127u8, 255u8]);
    }

    #[test]
    fn flatten_nearly_opaque_premul_stays_in_range() {
        // alpha 254 under an anti-aliased edge over white
        let src = vec![250u8, 251, 254, 254];
        let mut dst = vec![0u8; 4];
        flatten_to_opaque_rgba8(&mut dst, &src, true, [255; 4]).unwrap();
        assert_eq!(dst, vec![251u8, 252, 255, 255]);
    }

    #[test]
    fn flatten_rejects_mismatched_buffers() {
        let mut dst = vec![0u8; 8];
        assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0; 4]).is_err());
    }
}
