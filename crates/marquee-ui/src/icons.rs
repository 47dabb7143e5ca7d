//! Icon resolution glue
//!
//! Icon references resolve through the icon theme first, then as a direct
//! file path. Absence of both is a valid outcome; the tile keeps its
//! fallback glyph and the fallback background gray.

use gtk4::gdk::gdk_pixbuf::{Colorspace, Pixbuf};
use gtk4::prelude::*;
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

const ICON_SIZE: i32 = 80;

/// Resolve an icon reference to a bitmap, or `None` if neither the theme
/// nor the filesystem has it
pub fn resolve_icon(icon_ref: &str) -> Option<Pixbuf> {
    if icon_ref.is_empty() {
        return None;
    }

    if let Some(pixbuf) = lookup_theme_icon(icon_ref) {
        return Some(pixbuf);
    }

    let path = Path::new(icon_ref);
    if path.exists() {
        match Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true) {
            Ok(pixbuf) => return Some(pixbuf),
            Err(e) => debug!(icon_ref, error = %e, "Failed to load icon file"),
        }
    }

    None
}

fn lookup_theme_icon(name: &str) -> Option<Pixbuf> {
    let display = gtk4::gdk::Display::default()?;
    let theme = gtk4::IconTheme::for_display(&display);
    if !theme.has_icon(name) {
        return None;
    }

    let paintable = theme.lookup_icon(
        name,
        &[],
        ICON_SIZE,
        1,
        gtk4::TextDirection::None,
        gtk4::IconLookupFlags::empty(),
    );

    let path = paintable.file()?.path()?;
    Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true).ok()
}

/// Copy a pixbuf into an owned RGBA bitmap for color derivation
pub fn pixbuf_to_rgba(pixbuf: &Pixbuf) -> Option<RgbaImage> {
    if pixbuf.colorspace() != Colorspace::Rgb || pixbuf.bits_per_sample() != 8 {
        return None;
    }

    let width = pixbuf.width() as u32;
    let height = pixbuf.height() as u32;
    let rowstride = pixbuf.rowstride() as usize;
    let channels = pixbuf.n_channels() as usize;
    if channels != 3 && channels != 4 {
        return None;
    }

    let bytes = pixbuf.read_pixel_bytes();
    let data = bytes.as_ref();

    let mut out = RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let offset = y as usize * rowstride + x as usize * channels;
            let pixel = &data[offset..offset + channels];
            let alpha = if channels == 4 { pixel[3] } else { 255 };
            out.put_pixel(x, y, image::Rgba([pixel[0], pixel[1], pixel[2], alpha]));
        }
    }

    Some(out)
}
