use super::*;

const RED: Rgb8 = Rgb8::new(255, 0, 0);

fn blank(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 0, 255]))
}

fn is(img: &RgbaImage, x: u32, y: u32, c: Rgb8) -> bool {
    img.get_pixel(x, y).0 == [c.r, c.g, c.b, 255]
}

#[test]
fn fill_rect_covers_half_open_extent() {
    let mut img = blank(10, 10);
    fill_rect(&mut img, Rect::new(2.0, 3.0, 5.0, 6.0), RED);
    let filled = img.pixels().filter(|p| p.0[0] == 255).count();
    assert_eq!(filled, 9);
    assert!(is(&img, 2, 3, RED));
    assert!(is(&img, 4, 5, RED));
    assert!(!is(&img, 5, 5, RED));
}

#[test]
fn shapes_outside_the_image_are_clipped() {
    let mut img = blank(4, 4);
    fill_rect(&mut img, Rect::new(-10.0, -10.0, 2.0, 100.0), RED);
    fill_circle(&mut img, Point::new(-50.0, -50.0), 3.0, RED);
    let filled = img.pixels().filter(|p| p.0[0] == 255).count();
    assert_eq!(filled, 8);
}

#[test]
fn stroke_rect_draws_border_only() {
    let mut img = blank(20, 20);
    stroke_rect(&mut img, 2.0, 2.0, 12.0, 12.0, 3.0, RED);
    assert!(is(&img, 2, 2, RED));
    assert!(is(&img, 12, 12, RED));
    assert!(is(&img, 4, 7, RED));
    assert!(!is(&img, 5, 5, RED));
    assert!(!is(&img, 13, 13, RED));
}

#[test]
fn triangle_apex_points_down() {
    let mut img = blank(20, 60);
    fill_triangle(
        &mut img,
        Point::new(5.0, 10.0),
        Point::new(15.0, 10.0),
        Point::new(10.0, 50.0),
        RED,
    );
    assert!(is(&img, 10, 11, RED));
    assert!(is(&img, 10, 45, RED));
    assert!(!is(&img, 6, 45, RED));
    assert!(!is(&img, 10, 5, RED));
}

#[test]
fn circle_radius_two_is_small_disc() {
    let mut img = blank(10, 10);
    fill_circle(&mut img, Point::new(5.0, 5.0), 2.0, RED);
    let filled = img.pixels().filter(|p| p.0[0] == 255).count();
    assert!((8..=16).contains(&filled), "filled {filled}");
    assert!(is(&img, 4, 4, RED));
}

#[test]
fn paste_clips_negative_offsets() {
    let mut dst = blank(4, 4);
    let top = RgbaImage::from_pixel(3, 3, image::Rgba([0, 255, 0, 255]));
    paste(&mut dst, &top, -2, -2);
    assert_eq!(dst.get_pixel(0, 0).0, [0, 255, 0, 255]);
    assert_eq!(dst.get_pixel(1, 1).0, [0, 0, 0, 255]);
}

#[test]
fn premul_round_trips_opaque_and_half_alpha() {
    let img = rgba_from_premul(2, 1, &[10, 20, 30, 255, 64, 0, 0, 128]).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [128, 0, 0, 128]);
    assert!(rgba_from_premul(3, 1, &[0; 8]).is_none());
}
