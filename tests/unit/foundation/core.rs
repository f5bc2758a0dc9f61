use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(400, 200).unwrap();
    assert_eq!(c.rgba_len(), 400 * 200 * 4);
}

#[test]
fn canvas_center_uses_integer_halves() {
    let c = Canvas::new(401, 201).unwrap();
    assert_eq!(c.center_x(), 200.0);
    assert_eq!(c.center_y(), 100.0);
}

#[test]
fn offset_clamped_saturates_each_channel() {
    let c = Rgb8::new(10, 128, 250);
    assert_eq!(c.offset_clamped(-150, 0, 150), Rgb8::new(0, 128, 255));
    assert_eq!(c.offset_clamped(5, -28, -50), Rgb8::new(15, 100, 200));
}

#[test]
fn hex_is_lowercase_rrggbb() {
    assert_eq!(Rgb8::new(255, 215, 0).to_hex(), "#ffd700");
}
