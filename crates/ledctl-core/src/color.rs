//! HSV/RGB conversion, RGB→RGBW white extraction, and color-order permutation.

use crate::gamma::apply_gamma_pixel;

/// The closed set of channel orderings a chipset can be wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Grb,
    Rgb,
    Brg,
    Rbg,
    Gbr,
    Bgr,
    Grbw,
    Rgbw,
    Brgw,
    Rbgw,
    Gbrw,
    Bgrw,
    Wrgb,
    Wgrb,
}

impl ColorOrder {
    /// Parses a color order name, case-insensitively.
    ///
    /// Unknown names fall back to [`ColorOrder::Grb`] for 3-channel pixels
    /// and [`ColorOrder::Grbw`] for 4-channel pixels — callers pick which
    /// default applies based on `bytes_per_pixel`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "grb" => Some(Self::Grb),
            "rgb" => Some(Self::Rgb),
            "brg" => Some(Self::Brg),
            "rbg" => Some(Self::Rbg),
            "gbr" => Some(Self::Gbr),
            "bgr" => Some(Self::Bgr),
            "grbw" => Some(Self::Grbw),
            "rgbw" => Some(Self::Rgbw),
            "brgw" => Some(Self::Brgw),
            "rbgw" => Some(Self::Rbgw),
            "gbrw" => Some(Self::Gbrw),
            "bgrw" => Some(Self::Bgrw),
            "wrgb" => Some(Self::Wrgb),
            "wgrb" => Some(Self::Wgrb),
            _ => None,
        }
    }

    /// Parses a color order name, falling back to GRB/GRBW for unknown names.
    pub fn parse_or_default(name: &str, bytes_per_pixel: u8) -> Self {
        Self::parse(name).unwrap_or(if bytes_per_pixel == 4 {
            Self::Grbw
        } else {
            Self::Grb
        })
    }

    /// Number of channels this order addresses (3 for RGB orders, 4 for RGBW ones).
    pub fn bytes_per_pixel(&self) -> u8 {
        match self {
            Self::Grb | Self::Rgb | Self::Brg | Self::Rbg | Self::Gbr | Self::Bgr => 3,
            _ => 4,
        }
    }
}

/// Permutes a source pixel (always stored R, G, B[, W]) into `dst` according to `order`.
///
/// `src` and `dst` must each have length `order.bytes_per_pixel()`.
pub fn permute_color_order(src: &[u8], dst: &mut [u8], order: ColorOrder) {
    match order {
        ColorOrder::Grb => {
            dst[0] = src[1];
            dst[1] = src[0];
            dst[2] = src[2];
        }
        ColorOrder::Rgb => dst[..3].copy_from_slice(&src[..3]),
        ColorOrder::Brg => {
            dst[0] = src[2];
            dst[1] = src[0];
            dst[2] = src[1];
        }
        ColorOrder::Rbg => {
            dst[0] = src[0];
            dst[1] = src[2];
            dst[2] = src[1];
        }
        ColorOrder::Gbr => {
            dst[0] = src[1];
            dst[1] = src[2];
            dst[2] = src[0];
        }
        ColorOrder::Bgr => {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }
        ColorOrder::Grbw => {
            dst[0] = src[1];
            dst[1] = src[0];
            dst[2] = src[2];
            dst[3] = src[3];
        }
        ColorOrder::Rgbw => dst[..4].copy_from_slice(&src[..4]),
        ColorOrder::Brgw => {
            dst[0] = src[2];
            dst[1] = src[0];
            dst[2] = src[1];
            dst[3] = src[3];
        }
        ColorOrder::Rbgw => {
            dst[0] = src[0];
            dst[1] = src[2];
            dst[2] = src[1];
            dst[3] = src[3];
        }
        ColorOrder::Gbrw => {
            dst[0] = src[1];
            dst[1] = src[2];
            dst[2] = src[0];
            dst[3] = src[3];
        }
        ColorOrder::Bgrw => {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
        ColorOrder::Wrgb => {
            dst[0] = src[3];
            dst[1] = src[0];
            dst[2] = src[1];
            dst[3] = src[2];
        }
        ColorOrder::Wgrb => {
            dst[0] = src[3];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[2];
        }
    }
}

/// Inverts [`permute_color_order`]: recovers the original R, G, B[, W] layout from
/// a pixel already written in `order`.
pub fn unpermute_color_order(src: &[u8], dst: &mut [u8], order: ColorOrder) {
    let n = order.bytes_per_pixel() as usize;
    let positions = forward_positions(order);
    for (dst_idx, &src_idx) in positions.iter().enumerate().take(n) {
        dst[src_idx] = src[dst_idx];
    }
}

/// Returns, for each destination index, which source index the forward
/// permutation reads from. Used to build the inverse mapping.
fn forward_positions(order: ColorOrder) -> [usize; 4] {
    match order {
        ColorOrder::Grb => [1, 0, 2, 3],
        ColorOrder::Rgb => [0, 1, 2, 3],
        ColorOrder::Brg => [2, 0, 1, 3],
        ColorOrder::Rbg => [0, 2, 1, 3],
        ColorOrder::Gbr => [1, 2, 0, 3],
        ColorOrder::Bgr => [2, 1, 0, 3],
        ColorOrder::Grbw => [1, 0, 2, 3],
        ColorOrder::Rgbw => [0, 1, 2, 3],
        ColorOrder::Brgw => [2, 0, 1, 3],
        ColorOrder::Rbgw => [0, 2, 1, 3],
        ColorOrder::Gbrw => [1, 2, 0, 3],
        ColorOrder::Bgrw => [2, 1, 0, 3],
        ColorOrder::Wrgb => [3, 0, 1, 2],
        ColorOrder::Wgrb => [3, 1, 0, 2],
    }
}

/// Extracts a white channel as `min(r, g, b)` and subtracts it from each color
/// channel with saturation at zero. Returns `(r', g', b', w)`.
pub fn rgb_to_rgbw(r: u8, g: u8, b: u8) -> (u8, u8, u8, u8) {
    let w = r.min(g).min(b);
    (r - w, g - w, b - w, w)
}

/// Converts HSV (hue in degrees, wrapped to `[0, 360)`; saturation/value in `[0, 1]`)
/// to 8-bit RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

/// Converts 8-bit RGB to HSV (hue in degrees `[0, 360)`, saturation/value in `[0, 1]`).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let (rf, gf, bf) = (f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    if delta == 0.0 {
        return (0.0, 0.0, v);
    }
    let s = delta / max;

    let mut h = if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }
    (h, s, v)
}

/// Scales one color channel by a `0..=255` brightness level: `round(v * level / 255)`.
#[must_use]
pub fn scale_channel(v: u8, level: u8) -> u8 {
    ((u16::from(v) * u16::from(level) + 127) / 255) as u8
}

/// Scales an RGB triple by the product of two `0..=255` brightness levels
/// (typically global brightness and a per-binding effective brightness),
/// each channel independently: `round(v * a / 255 * b / 255)`.
#[must_use]
pub fn scale_rgb(rgb: (u8, u8, u8), a: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, bl) = rgb;
    (scale_channel(scale_channel(r, a), b), scale_channel(scale_channel(g, a), b), scale_channel(scale_channel(bl, a), b))
}

/// Applies [`scale_rgb`] in place to every pixel of a tightly packed `3*N`-byte
/// RGB buffer.
pub fn scale_rgb_buffer(buf: &mut [u8], a: u8, b: u8) {
    for px in buf.chunks_exact_mut(3) {
        let (r, g, bl) = scale_rgb((px[0], px[1], px[2]), a, b);
        px[0] = r;
        px[1] = g;
        px[2] = bl;
    }
}

/// Runs the full per-pixel color pipeline: RGB→RGBW extraction (if 4-channel),
/// gamma correction, then color-order permutation.
pub fn process_pixel(
    src_rgb: [u8; 3],
    dst: &mut [u8],
    order: ColorOrder,
    gamma_color: f32,
    gamma_brightness: f32,
    apply_gamma: bool,
) {
    let bytes_per_pixel = order.bytes_per_pixel();
    let mut temp = [src_rgb[0], src_rgb[1], src_rgb[2], 0];

    if bytes_per_pixel == 4 {
        let (r, g, b, w) = rgb_to_rgbw(temp[0], temp[1], temp[2]);
        temp = [r, g, b, w];
    }

    if apply_gamma {
        apply_gamma_pixel(&mut temp[..bytes_per_pixel as usize], gamma_color, gamma_brightness);
    }

    permute_color_order(&temp[..bytes_per_pixel as usize], &mut dst[..bytes_per_pixel as usize], order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_orders() -> Vec<ColorOrder> {
        vec![
            ColorOrder::Grb,
            ColorOrder::Rgb,
            ColorOrder::Brg,
            ColorOrder::Rbg,
            ColorOrder::Gbr,
            ColorOrder::Bgr,
            ColorOrder::Grbw,
            ColorOrder::Rgbw,
            ColorOrder::Brgw,
            ColorOrder::Rbgw,
            ColorOrder::Gbrw,
            ColorOrder::Bgrw,
            ColorOrder::Wrgb,
            ColorOrder::Wgrb,
        ]
    }

    proptest! {
        #[test]
        fn permutation_is_involutive(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, w in 0u8..=255) {
            for order in all_orders() {
                let n = order.bytes_per_pixel() as usize;
                let src = [r, g, b, w];
                let mut permuted = [0u8; 4];
                permute_color_order(&src[..n], &mut permuted[..n], order);
                let mut restored = [0u8; 4];
                unpermute_color_order(&permuted[..n], &mut restored[..n], order);
                prop_assert_eq!(&restored[..n], &src[..n]);
            }
        }

        #[test]
        fn rgb_to_rgbw_sum_property(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let (rp, gp, bp, w) = rgb_to_rgbw(r, g, b);
            prop_assert_eq!(w, r.min(g).min(b));
            prop_assert_eq!(rp + w, r);
            prop_assert_eq!(gp + w, g);
            prop_assert_eq!(bp + w, b);
        }

        #[test]
        fn scale_channel_never_exceeds_the_input(v in 0u8..=255, level in 0u8..=255) {
            prop_assert!(scale_channel(v, level) <= v);
        }
    }

    #[test]
    fn full_brightness_is_a_no_op() {
        assert_eq!(scale_channel(200, 255), 200);
        assert_eq!(scale_rgb((10, 20, 30), 255, 255), (10, 20, 30));
    }

    #[test]
    fn zero_brightness_blanks_the_channel() {
        assert_eq!(scale_channel(200, 0), 0);
        assert_eq!(scale_rgb((10, 20, 30), 0, 255), (0, 0, 0));
    }

    #[test]
    fn half_brightness_halves_the_channel() {
        assert_eq!(scale_channel(254, 128), 127);
    }

    #[test]
    fn unknown_order_falls_back_to_grb_family() {
        assert_eq!(ColorOrder::parse_or_default("nonsense", 3), ColorOrder::Grb);
        assert_eq!(ColorOrder::parse_or_default("nonsense", 4), ColorOrder::Grbw);
    }
}
