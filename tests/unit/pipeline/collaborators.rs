use super::*;

#[test]
fn landscape_footage_is_scaled_to_height_and_center_cropped() {
    let crop = cover_crop(1920, 1080, Canvas::default()).unwrap();
    assert!((crop.scale - 1920.0 / 1080.0).abs() < 1e-12);
    // Scaled width 3413.33, window 1080 wide in the middle.
    assert!((crop.x - (1920.0 * crop.scale / 2.0 - 540.0)).abs() < 1e-9);
    assert_eq!((crop.width, crop.height), (1080.0, 1920.0));
}

#[test]
fn degenerate_sources_have_no_crop() {
    assert_eq!(cover_crop(0, 1080, Canvas::default()), None);
}
