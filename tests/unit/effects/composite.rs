use super::*;

#[test]
fn over_with_zero_opacity_keeps_destination() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(
        over([10, 20, 30, 255], [200, 100, 0, 255], 1.0),
        [200, 100, 0, 255]
    );
}

#[test]
fn half_opacity_blends_toward_source() {
    let out = over([0, 0, 0, 0], [255, 255, 255, 255], 0.5);
    assert_eq!(out, [128, 128, 128, 128]);
}

#[test]
fn draw_over_clips_to_destination_bounds() {
    let mut dst = Bitmap::transparent(3, 3).unwrap();
    let src = Bitmap::from_premul(2, 2, [0u8, 0, 255, 255].repeat(4)).unwrap();
    draw_over(&mut dst, &src, 2, -1, 1.0);

    assert_eq!(dst.pixel(2, 0), [0, 0, 255, 255]);
    assert_eq!(dst.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(dst.pixel(2, 1), [0, 0, 0, 0]);
}

#[test]
fn draw_over_fully_outside_is_noop() {
    let mut dst = Bitmap::transparent(2, 2).unwrap();
    let src = Bitmap::from_premul(1, 1, vec![1, 1, 1, 255]).unwrap();
    draw_over(&mut dst, &src, 5, 5, 1.0);
    assert!(dst.rgba8_premul.iter().all(|&b| b == 0));
}

#[test]
fn scale_opacity_halves_premultiplied_channels() {
    let mut bm = Bitmap::from_premul(1, 1, vec![0, 0, 0, 255]).unwrap();
    scale_opacity(&mut bm, 0.5);
    assert_eq!(bm.pixel(0, 0), [0, 0, 0, 128]);
}
