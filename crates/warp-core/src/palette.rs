//! Theme colors shared by every element of the scene.

/// Named theme colors, synced with the page stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeColor {
    Primary,
    Secondary,
    Accent1,
    Accent2,
    Cyan,
    Pink,
    Background,
}

impl ThemeColor {
    pub const fn hex(self) -> u32 {
        match self {
            ThemeColor::Primary => 0x6366f1,
            ThemeColor::Secondary => 0x8b5cf6,
            ThemeColor::Accent1 => 0xa855f7,
            ThemeColor::Accent2 => 0xc084fc,
            ThemeColor::Cyan => 0x06b6d4,
            ThemeColor::Pink => 0xec4899,
            ThemeColor::Background => 0x030014,
        }
    }

    #[inline]
    pub fn rgb(self) -> [f32; 3] {
        rgb_from_hex(self.hex())
    }
}

/// Split a `0xRRGGBB` value into unit-range channels.
#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Colors a star particle may be born with.
pub const STAR_PALETTE: [[f32; 3]; 6] = [
    [0.39, 0.4, 0.95],  // indigo
    [0.55, 0.36, 0.96], // violet
    [0.66, 0.33, 0.97], // purple
    [0.02, 0.71, 0.83], // cyan
    [0.93, 0.29, 0.6],  // pink
    [1.0, 1.0, 1.0],    // white
];

/// Blend a color toward its luminance; `saturation` 1 keeps it, 0 makes it grey.
pub fn desaturate(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    let luma = 0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2];
    let s = saturation.clamp(0.0, 1.0);
    [
        luma + (rgb[0] - luma) * s,
        luma + (rgb[1] - luma) * s,
        luma + (rgb[2] - luma) * s,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_into_channels() {
        assert_eq!(rgb_from_hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb_from_hex(0x00ff00), [0.0, 1.0, 0.0]);
        let bg = ThemeColor::Background.rgb();
        assert!((bg[0] - 3.0 / 255.0).abs() < 1e-6);
        assert_eq!(bg[1], 0.0);
        assert!((bg[2] - 20.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn desaturate_extremes() {
        let c = [0.93, 0.29, 0.6];
        assert_eq!(desaturate(c, 1.0), c);
        let grey = desaturate(c, 0.0);
        assert!((grey[0] - grey[1]).abs() < 1e-6 && (grey[1] - grey[2]).abs() < 1e-6);
    }
}
