use std::collections::HashSet;
use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_resizes_to_exact_thumbnail_size() {
    let cfg = AcquireConfig {
        palette_colors: None,
        ..AcquireConfig::default()
    };
    let thumb = thumbnail_from_bytes(&png_bytes(37, 211), &cfg).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (100, 100));
}

#[test]
fn decode_rejects_garbage() {
    let err = thumbnail_from_bytes(b"definitely not an image", &AcquireConfig::default())
        .unwrap_err();
    assert!(matches!(err, UnboxError::Other(_)));
}

#[test]
fn quantize_bounds_distinct_colors() {
    let mut img = RgbaImage::from_fn(64, 64, |x, y| {
        image::Rgba([(x * 4) as u8, (y * 4) as u8, ((x * y) % 256) as u8, 255])
    });
    quantize_palette(&mut img, 16).unwrap();
    let distinct: HashSet<[u8; 4]> = img.pixels().map(|p| p.0).collect();
    assert!(distinct.len() <= 16, "got {} colors", distinct.len());
}

#[test]
fn quantize_rejects_out_of_range_palette() {
    let mut img = RgbaImage::new(2, 2);
    assert!(quantize_palette(&mut img, 1).is_err());
    assert!(quantize_palette(&mut img, 257).is_err());
}

#[test]
fn clones_share_pixels() {
    let thumb = ThumbnailImage::from_rgba(RgbaImage::new(3, 3));
    let copy = thumb.clone();
    assert!(std::ptr::eq(thumb.image(), copy.image()));
}
