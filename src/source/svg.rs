//! Rasterizing vector sources into RGBA buffers.

use image::RgbaImage;
use resvg::{tiny_skia, usvg};

use super::error::AcquisitionError;

/// Check whether `bytes` look like an SVG document.
///
/// Skips a UTF-8 BOM and leading whitespace, then looks for an XML
/// declaration, a doctype or an `<svg` root.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..];

    head.starts_with(b"<svg") || head.starts_with(b"<?xml") || head.starts_with(b"<!DOCTYPE svg")
}

/// Render an SVG document at its viewBox size.
///
/// The canvas takes the root `viewBox` width and height, rounded up to whole
/// pixels, and the drawing is scaled to fill it. Documents without a usable
/// viewBox fall back to their width/height. The result is straight
/// (non-premultiplied) RGBA.
pub fn rasterize_svg(data: &[u8]) -> Result<RgbaImage, AcquisitionError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &options)?;

    let size = tree.size();
    let (canvas_w, canvas_h) = view_box_size(data).unwrap_or((size.width(), size.height()));
    let (width, height) = (canvas_w.ceil() as u32, canvas_h.ceil() as u32);
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(AcquisitionError::EmptyImage { width, height })?;

    let transform =
        tiny_skia::Transform::from_scale(canvas_w / size.width(), canvas_h / size.height());
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    log::debug!("Rasterized SVG at {}x{}", width, height);

    RgbaImage::from_raw(width, height, rgba).ok_or(AcquisitionError::EmptyImage { width, height })
}

/// Width and height of the root element's `viewBox`, if it has a valid one.
fn view_box_size(data: &[u8]) -> Option<(f32, f32)> {
    let text = std::str::from_utf8(data).ok()?;
    let document = roxmltree::Document::parse(text.trim_start_matches('\u{feff}')).ok()?;
    let view_box = document.root_element().attribute("viewBox")?;

    let numbers: Vec<f32> = view_box
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;

    match numbers[..] {
        [_, _, w, h] if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() => Some((w, h)),
        _ => None,
    }
}
