//! CPU mipmap generation.
//!
//! Each level is a 2×2 box-filtered reduction of the previous one, clamping
//! at edges so odd dimensions stay well defined. Dimensions halve per level
//! (floor, minimum 1) until both reach 1.

/// Number of mip levels for a base image of the given size.
///
/// Halving continues while either dimension is above 1, so the count is
/// `1 + floor(log2(max(width, height)))` for non-zero inputs.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let mut levels = 1u32;
    let mut w = width;
    let mut h = height;
    while w > 1 || h > 1 {
        w = (w >> 1).max(1);
        h = (h >> 1).max(1);
        levels += 1;
    }
    levels
}

/// Produces the next mip level from an RGBA8 image.
///
/// Returns the reduced pixel buffer and its dimensions. Each output pixel
/// averages the 2×2 source block under it; source coordinates are clamped
/// to the last row/column when a dimension is odd or already 1.
pub fn downsample_rgba(bytes: &[u8], width: u32, height: u32) -> (Vec<u8>, u32, u32) {
    debug_assert_eq!(bytes.len(), (width * height * 4) as usize);

    let out_w = (width >> 1).max(1);
    let out_h = (height >> 1).max(1);

    let mut out = Vec::with_capacity((out_w * out_h * 4) as usize);

    let pixel = |x: u32, y: u32| -> [u32; 4] {
        let x = x.min(width - 1);
        let y = y.min(height - 1);
        let i = ((y * width + x) * 4) as usize;
        [
            bytes[i] as u32,
            bytes[i + 1] as u32,
            bytes[i + 2] as u32,
            bytes[i + 3] as u32,
        ]
    };

    for y in 0..out_h {
        for x in 0..out_w {
            let (sx, sy) = (x * 2, y * 2);
            let a = pixel(sx, sy);
            let b = pixel(sx + 1, sy);
            let c = pixel(sx, sy + 1);
            let d = pixel(sx + 1, sy + 1);

            for ch in 0..4 {
                out.push(((a[ch] + b[ch] + c[ch] + d[ch]) / 4) as u8);
            }
        }
    }

    (out, out_w, out_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── level count ───────────────────────────────────────────────────────

    #[test]
    fn level_count_1x1() {
        assert_eq!(mip_level_count(1, 1), 1);
    }

    #[test]
    fn level_count_power_of_two() {
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(4, 4), 3);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(1024, 1024), 11);
    }

    #[test]
    fn level_count_non_square() {
        // The longer axis decides: 1024 → 10 halvings.
        assert_eq!(mip_level_count(1024, 768), 11);
        assert_eq!(mip_level_count(1, 8), 4);
    }

    // ── downsampling ──────────────────────────────────────────────────────

    #[test]
    fn downsample_2x2_averages_the_block() {
        #[rustfmt::skip]
        let bytes = vec![
            0, 0, 0, 255,     100, 0, 0, 255,
            0, 200, 0, 255,   0, 0, 40, 255,
        ];
        let (out, w, h) = downsample_rgba(&bytes, 2, 2);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out, vec![25, 50, 10, 255]);
    }

    #[test]
    fn downsample_halves_both_dimensions() {
        let bytes = vec![128u8; 8 * 4 * 4];
        let (out, w, h) = downsample_rgba(&bytes, 8, 4);
        assert_eq!((w, h), (4, 2));
        assert_eq!(out.len(), 4 * 2 * 4);
        assert!(out.iter().all(|&b| b == 128));
    }

    #[test]
    fn downsample_clamps_odd_width() {
        // 3x1 → 1x1; the sample block clamps to existing pixels.
        #[rustfmt::skip]
        let bytes = vec![
            10, 10, 10, 255,   30, 30, 30, 255,   90, 90, 90, 255,
        ];
        let (out, w, h) = downsample_rgba(&bytes, 3, 1);
        assert_eq!((w, h), (1, 1));
        // Block is pixels (0,0),(1,0),(0,0),(1,0): (10+30+10+30)/4 = 20.
        assert_eq!(&out[0..3], &[20, 20, 20]);
    }

    #[test]
    fn downsample_1x1_is_identity_sized() {
        let bytes = vec![7, 8, 9, 255];
        let (out, w, h) = downsample_rgba(&bytes, 1, 1);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out, bytes);
    }

    #[test]
    fn chain_terminates_at_the_level_count() {
        let mut bytes = vec![255u8; 16 * 16 * 4];
        let (mut w, mut h) = (16u32, 16u32);
        let mut produced = 1;
        while w > 1 || h > 1 {
            let (next, nw, nh) = downsample_rgba(&bytes, w, h);
            bytes = next;
            w = nw;
            h = nh;
            produced += 1;
        }
        assert_eq!(produced, mip_level_count(16, 16));
    }
}
