//! Representative tile color computed from an icon bitmap

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Alpha must exceed this for a pixel to count toward the average
pub const ALPHA_THRESHOLD: u8 = 128;

/// Icons are downscaled to at most this many pixels per side before
/// averaging; a performance bound, not precision-critical
const MAX_SAMPLE_DIM: u32 = 64;

/// An opaque RGB tile color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TileColor {
    /// Dark neutral gray used when no icon resolves or nothing is opaque
    pub const FALLBACK: TileColor = TileColor {
        r: 64,
        g: 64,
        b: 64,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(...)` string
    pub fn css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string with the given alpha (0.0-1.0)
    pub fn css_rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Compute the muted background color for an icon bitmap.
///
/// `None` (no icon resolved) and fully transparent bitmaps both yield
/// [`TileColor::FALLBACK`].
pub fn derive_tile_color(icon: Option<&RgbaImage>) -> TileColor {
    let Some(icon) = icon else {
        return TileColor::FALLBACK;
    };

    match average_color(icon) {
        Some(avg) => darken(avg),
        None => TileColor::FALLBACK,
    }
}

/// Average the R/G/B channels over pixels whose alpha exceeds
/// [`ALPHA_THRESHOLD`]. Returns `None` if no pixel qualifies.
pub fn average_color(icon: &RgbaImage) -> Option<TileColor> {
    let scaled;
    let image = if icon.width() > MAX_SAMPLE_DIM || icon.height() > MAX_SAMPLE_DIM {
        let (w, h) = fit_within(icon.width(), icon.height(), MAX_SAMPLE_DIM);
        scaled = imageops::resize(icon, w, h, FilterType::Triangle);
        &scaled
    } else {
        icon
    };

    let mut total_r: u64 = 0;
    let mut total_g: u64 = 0;
    let mut total_b: u64 = 0;
    let mut count: u64 = 0;

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        if a > ALPHA_THRESHOLD {
            total_r += u64::from(r);
            total_g += u64::from(g);
            total_b += u64::from(b);
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    Some(TileColor::new(
        (total_r / count) as u8,
        (total_g / count) as u8,
        (total_b / count) as u8,
    ))
}

/// Darken and desaturate a color for use as a tile background:
/// `channel = channel * 0.5 + 32`.
pub fn darken(color: TileColor) -> TileColor {
    let adjust = |c: u8| (f32::from(c) * 0.5 + 32.0) as u8;
    TileColor::new(adjust(color.r), adjust(color.g), adjust(color.b))
}

/// Scale (width, height) down to fit within `max` per side, preserving
/// aspect ratio. Dimensions already within bounds are returned unchanged.
fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    if width >= height {
        let h = (u64::from(height) * u64::from(max) / u64::from(width)) as u32;
        (max, h.max(1))
    } else {
        let w = (u64::from(width) * u64::from(max) / u64::from(height)) as u32;
        (w.max(1), max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn no_icon_yields_fallback() {
        assert_eq!(derive_tile_color(None), TileColor::FALLBACK);
    }

    #[test]
    fn fully_transparent_yields_fallback() {
        let icon = solid(16, 16, [200, 100, 50, 0]);
        assert_eq!(derive_tile_color(Some(&icon)), TileColor::FALLBACK);
    }

    #[test]
    fn threshold_is_exclusive() {
        // alpha == 128 does not qualify
        let icon = solid(4, 4, [200, 100, 50, ALPHA_THRESHOLD]);
        assert_eq!(derive_tile_color(Some(&icon)), TileColor::FALLBACK);
    }

    #[test]
    fn solid_color_averages_to_itself() {
        let icon = solid(8, 8, [200, 100, 50, 255]);
        let avg = average_color(&icon).unwrap();
        assert_eq!(avg, TileColor::new(200, 100, 50));
    }

    #[test]
    fn transparent_pixels_excluded_from_average() {
        let mut icon = solid(2, 1, [100, 100, 100, 255]);
        icon.put_pixel(1, 0, Rgba([0, 0, 0, 10]));
        let avg = average_color(&icon).unwrap();
        assert_eq!(avg, TileColor::new(100, 100, 100));
    }

    #[test]
    fn darken_formula_and_bounds() {
        assert_eq!(darken(TileColor::new(0, 0, 0)), TileColor::new(32, 32, 32));
        assert_eq!(
            darken(TileColor::new(255, 255, 255)),
            TileColor::new(159, 159, 159)
        );

        // Monotonic and within [0, 255] over the full channel range
        for c in 0..=255u16 {
            let out = darken(TileColor::new(c as u8, 0, 0)).r;
            let bound = (c as f32) * 0.5 + 32.0;
            assert!(f32::from(out) <= bound);
        }
    }

    #[test]
    fn large_icons_are_downscaled() {
        // 256x128 solid color: downscale must not change the average
        let icon = solid(256, 128, [60, 120, 180, 255]);
        let avg = average_color(&icon).unwrap();
        assert_eq!(avg, TileColor::new(60, 120, 180));
    }

    #[test]
    fn fit_within_preserves_aspect() {
        assert_eq!(fit_within(256, 128, 64), (64, 32));
        assert_eq!(fit_within(128, 256, 64), (32, 64));
        assert_eq!(fit_within(32, 32, 64), (32, 32));
        assert_eq!(fit_within(4096, 1, 64), (64, 1));
    }
}
