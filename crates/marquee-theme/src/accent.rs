//! Status-bar accent color picked from the pool of tile colors

use std::time::{SystemTime, UNIX_EPOCH};

use crate::TileColor;

const SATURATION_BOOST: f32 = 1.25;
const VALUE_BOOST: f32 = 1.10;

/// Pool of derived tile colors collected at startup
#[derive(Debug, Default)]
pub struct AccentPool {
    colors: Vec<TileColor>,
}

impl AccentPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: TileColor) {
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Pick one pool member at random and boost it into an accent.
    /// Returns `None` for an empty pool.
    pub fn pick_accent(&self) -> Option<TileColor> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as usize)
            .unwrap_or(0);
        self.pick_accent_seeded(seed)
    }

    /// Deterministic variant of [`AccentPool::pick_accent`]
    pub fn pick_accent_seeded(&self, seed: usize) -> Option<TileColor> {
        if self.colors.is_empty() {
            return None;
        }
        let color = self.colors[seed % self.colors.len()];
        Some(boost(color))
    }
}

/// Boost saturation x1.25 and brightness x1.10 in HSV, clamped
pub fn boost(color: TileColor) -> TileColor {
    let (h, s, v) = rgb_to_hsv(color);
    let s = (s * SATURATION_BOOST).min(1.0);
    let v = (v * VALUE_BOOST).min(1.0);
    hsv_to_rgb(h, s, v)
}

fn rgb_to_hsv(color: TileColor) -> (f32, f32, f32) {
    let r = f32::from(color.r) / 255.0;
    let g = f32::from(color.g) / 255.0;
    let b = f32::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> TileColor {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    TileColor::new(to_u8(r), to_u8(g), to_u8(b))
}
