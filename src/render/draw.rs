//! Minimal CPU raster primitives over straight-alpha RGBA8 images.
//!
//! Shapes are described with `kurbo` and rasterized by sampling pixel centers, without
//! anti-aliasing. That matches the hard-edged look of the palette-limited GIF output.

use image::RgbaImage;
use kurbo::{BezPath, Circle, Rect, Shape};

use crate::foundation::core::{Point, Rgb8};

/// Fill every pixel whose center lies inside `shape`.
pub fn fill_shape(img: &mut RgbaImage, shape: &impl Shape, color: Rgb8) {
    let (w, h) = img.dimensions();
    let bbox = shape.bounding_box();
    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = (bbox.x1.ceil().min(f64::from(w))).max(0.0) as u32;
    let y1 = (bbox.y1.ceil().min(f64::from(h))).max(0.0) as u32;

    let px = color.to_rgba();
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if shape.contains(center) {
                img.put_pixel(x, y, px);
            }
        }
    }
}

/// Fill an axis-aligned rectangle covering pixel columns `[x0, x1)` and rows `[y0, y1)`.
pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Rgb8) {
    fill_shape(img, &rect, color);
}

/// Outline a rectangle whose corner pixels are `(x0, y0)` and `(x1, y1)` inclusive, with the
/// border drawn `width` pixels inwards.
pub fn stroke_rect(img: &mut RgbaImage, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, color: Rgb8) {
    let (x0, x1) = (x0.floor(), x1.floor() + 1.0);
    let (y0, y1) = (y0.floor(), y1.floor() + 1.0);
    fill_rect(img, Rect::new(x0, y0, x1, y0 + width), color);
    fill_rect(img, Rect::new(x0, y1 - width, x1, y1), color);
    fill_rect(img, Rect::new(x0, y0, x0 + width, y1), color);
    fill_rect(img, Rect::new(x1 - width, y0, x1, y1), color);
}

/// Fill the triangle `a, b, c`.
pub fn fill_triangle(img: &mut RgbaImage, a: Point, b: Point, c: Point, color: Rgb8) {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path.line_to(c);
    path.close_path();
    fill_shape(img, &path, color);
}

/// Fill a disc of `radius` around `center`.
pub fn fill_circle(img: &mut RgbaImage, center: Point, radius: f64, color: Rgb8) {
    fill_shape(img, &Circle::new(center, radius), color);
}

/// Alpha-composite `top` onto `dst` with its top-left corner at `(x, y)`, clipping at the
/// destination edges.
pub fn paste(dst: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    image::imageops::overlay(dst, top, x, y);
}

/// Convert premultiplied RGBA8 bytes to a straight-alpha image.
pub fn rgba_from_premul(width: u32, height: u32, premul: &[u8]) -> Option<RgbaImage> {
    let mut straight = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            straight.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let unpremul = |c: u8| (((u16::from(c) * 255) + a / 2) / a).min(255) as u8;
        straight.extend_from_slice(&[unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), px[3]]);
    }
    RgbaImage::from_raw(width, height, straight)
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
