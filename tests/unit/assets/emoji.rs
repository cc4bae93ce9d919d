use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "captionforge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 200, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn file_stem_uses_first_code_point() {
    assert_eq!(emoji_file_stem("😀").unwrap(), "U1F600");
    assert_eq!(emoji_file_stem("👍🏽").unwrap(), "U1F44D");
    assert!(emoji_file_stem("  ").is_err());
}

#[test]
fn resolves_png_with_intrinsic_size() {
    let dir = temp_dir("emoji_png");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("U1F600.png"), 8, 4);

    let mut emojis = EmojiDirectory::new(&dir);
    let asset = emojis.resolve("😀").unwrap();
    assert_eq!(asset.format, EmojiFormat::Png);
    assert_eq!((asset.width, asset.height), (8, 4));
    assert_eq!(asset.aspect_ratio(), 2.0);

    std::fs::remove_dir_all(&dir).ok();
    // Served from the resolved table once looked up.
    assert_eq!(emojis.resolve("😀").unwrap(), asset);
}

#[test]
fn resolves_svg_when_no_png_exists() {
    let dir = temp_dir("emoji_svg");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("U1F389.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="36" height="36"><rect width="36" height="36" fill="red"/></svg>"#,
    )
    .unwrap();

    let mut emojis = EmojiDirectory::new(&dir);
    let asset = emojis.resolve("🎉").unwrap();
    assert_eq!(asset.format, EmojiFormat::Svg);
    assert_eq!((asset.width, asset.height), (36, 36));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_emoji_is_an_asset_error() {
    let mut emojis = EmojiDirectory::new(temp_dir("emoji_missing"));
    let err = emojis.resolve("😮").unwrap_err();
    assert!(matches!(err, CaptionError::Asset(_)));
    assert!(err.to_string().contains("U1F62E"));
}
