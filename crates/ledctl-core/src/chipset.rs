//! Closed table of supported LED chipsets and their one-wire timing.

use crate::color::ColorOrder;

/// One-wire bit timing for a chipset, in 100 ns ticks at a 10 MHz symbol clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    /// High time for a `0` bit.
    pub t0h: u16,
    /// Low time for a `0` bit.
    pub t0l: u16,
    /// High time for a `1` bit.
    pub t1h: u16,
    /// Low time for a `1` bit.
    pub t1l: u16,
    /// Frame reset (latch) pulse duration.
    pub reset: u16,
}

/// The closed set of chipsets ledctl knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chipset {
    Ws2811,
    Ws2812B,
    Ws2813,
    Ws2815,
    Sk6812,
    Sk6812Rgbw,
    Sk9822,
    Apa102,
    Tm1814,
    Tm1829,
    Tm1914,
}

/// Static metadata for one chipset row.
#[derive(Debug, Clone, Copy)]
pub struct ChipsetInfo {
    /// Whether this chipset has a fourth (white) channel.
    pub supports_rgbw: bool,
    /// Whether this chipset is driven over SPI (two-wire clock+data) rather
    /// than a single-wire timed pulse train.
    pub spi_based: bool,
    /// One-wire bit timing; all zero for SPI-based chipsets.
    pub timing: BitTiming,
    /// Default wiring color order.
    pub default_order: ColorOrder,
}

impl Chipset {
    /// Parses a chipset name, case-insensitively. Falls back to [`Chipset::Ws2812B`]
    /// for unknown names, matching the most common strip in the field.
    pub fn parse_or_default(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ws2811" => Self::Ws2811,
            "ws2813" => Self::Ws2813,
            "ws2815" => Self::Ws2815,
            "sk6812" => Self::Sk6812,
            "sk6812_rgbw" | "sk6812-rgbw" => Self::Sk6812Rgbw,
            "sk9822" => Self::Sk9822,
            "apa102" => Self::Apa102,
            "tm1814" => Self::Tm1814,
            "tm1829" => Self::Tm1829,
            "tm1914" => Self::Tm1914,
            _ => Self::Ws2812B,
        }
    }

    /// Returns the static timing/order table row for this chipset.
    pub fn info(&self) -> ChipsetInfo {
        match self {
            Self::Ws2811 | Self::Ws2812B | Self::Ws2813 | Self::Ws2815 => ChipsetInfo {
                supports_rgbw: false,
                spi_based: false,
                timing: BitTiming { t0h: 3, t0l: 9, t1h: 9, t1l: 3, reset: 500 },
                default_order: ColorOrder::Grb,
            },
            Self::Sk6812 => ChipsetInfo {
                supports_rgbw: false,
                spi_based: false,
                timing: BitTiming { t0h: 3, t0l: 9, t1h: 6, t1l: 6, reset: 800 },
                default_order: ColorOrder::Grb,
            },
            Self::Sk6812Rgbw => ChipsetInfo {
                supports_rgbw: true,
                spi_based: false,
                timing: BitTiming { t0h: 3, t0l: 9, t1h: 6, t1l: 6, reset: 800 },
                default_order: ColorOrder::Grbw,
            },
            Self::Sk9822 | Self::Apa102 => ChipsetInfo {
                supports_rgbw: false,
                spi_based: true,
                timing: BitTiming { t0h: 0, t0l: 0, t1h: 0, t1l: 0, reset: 0 },
                default_order: ColorOrder::Rgb,
            },
            Self::Tm1814 | Self::Tm1829 | Self::Tm1914 => ChipsetInfo {
                supports_rgbw: true,
                spi_based: false,
                timing: BitTiming { t0h: 3, t0l: 9, t1h: 9, t1l: 3, reset: 500 },
                default_order: ColorOrder::Grbw,
            },
        }
    }

    /// `3` for RGB chipsets, `4` for RGBW ones.
    pub fn bytes_per_pixel(&self) -> u8 {
        if self.info().supports_rgbw { 4 } else { 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_chipset_defaults_to_ws2812b() {
        assert_eq!(Chipset::parse_or_default("bogus"), Chipset::Ws2812B);
    }

    #[test]
    fn rgbw_chipsets_report_four_bytes() {
        assert_eq!(Chipset::Sk6812Rgbw.bytes_per_pixel(), 4);
        assert_eq!(Chipset::Tm1814.bytes_per_pixel(), 4);
        assert_eq!(Chipset::Ws2812B.bytes_per_pixel(), 3);
    }

    #[test]
    fn spi_chipsets_carry_zeroed_timing() {
        let info = Chipset::Apa102.info();
        assert!(info.spi_based);
        assert_eq!(info.timing, BitTiming { t0h: 0, t0l: 0, t1h: 0, t1l: 0, reset: 0 });
    }
}
