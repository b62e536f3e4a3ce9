//! Linear and serpentine index mapping for matrix-shaped LED strips.

/// Describes how a 1-D LED strip is folded into a 2-D matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatrixGeometry {
    /// Matrix width in pixels.
    pub width: u16,
    /// Matrix height in pixels.
    pub height: u16,
    /// Whether alternating rows (or columns, if [`vertical`](Self::vertical)) run backwards.
    pub serpentine: bool,
    /// Whether the strip is wired column-major instead of row-major.
    pub vertical: bool,
}

impl MatrixGeometry {
    /// A geometry is valid when both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Total number of addressable LEDs, or `0` for an invalid geometry.
    pub fn total_leds(&self) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        u32::from(self.width) * u32::from(self.height)
    }

    /// Maps `(x, y)` coordinates to a linear strip index.
    ///
    /// Returns `0` for an invalid geometry.
    pub fn index(&self, x: u16, y: u16) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        let (w, h) = (u32::from(self.width), u32::from(self.height));
        let (x, y) = (u32::from(x), u32::from(y));

        if self.vertical {
            if self.serpentine && x % 2 == 1 {
                x * h + (h - 1 - y)
            } else {
                x * h + y
            }
        } else if self.serpentine && y % 2 == 1 {
            y * w + (w - 1 - x)
        } else {
            y * w + x
        }
    }

    /// Maps a linear strip index back to `(x, y)` coordinates.
    ///
    /// Returns `(0, 0)` for an invalid geometry.
    pub fn coords(&self, index: u32) -> (u16, u16) {
        if !self.is_valid() {
            return (0, 0);
        }
        let (w, h) = (u32::from(self.width), u32::from(self.height));

        if self.vertical {
            let x = index / h;
            let y_in_col = index % h;
            let y = if self.serpentine && x % 2 == 1 {
                h - 1 - y_in_col
            } else {
                y_in_col
            };
            (x as u16, y as u16)
        } else {
            let y = index / w;
            let x_in_row = index % w;
            let x = if self.serpentine && y % 2 == 1 {
                w - 1 - x_in_row
            } else {
                x_in_row
            };
            (x as u16, y as u16)
        }
    }
}
