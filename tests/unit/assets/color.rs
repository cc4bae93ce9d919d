use super::*;
use serde_json::json;

#[test]
fn parses_names_used_by_caption_styles() {
    let c: Color = serde_json::from_value(json!("red")).unwrap();
    assert_eq!(c, Color::RED);
    let c: Color = serde_json::from_value(json!("Black")).unwrap();
    assert_eq!(c, Color::BLACK);
    assert!(Color::parse("not-a-color").is_err());
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::RED);

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c.to_array(), [0, 0, 255, 128]);
}

#[test]
fn parses_rgba_object_array_and_hsla() {
    let c: Color = serde_json::from_value(json!({"r": 1.0, "g": 0.5, "b": 0.0})).unwrap();
    assert_eq!(c.to_array(), [255, 128, 0, 255]);

    let c: Color = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.0])).unwrap();
    assert_eq!(c.to_array(), [0, 0, 255, 0]);

    let c: Color = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert_eq!(c, Color::RED);
}

#[test]
fn serializes_as_hex() {
    let v = serde_json::to_value(Color::WHITE).unwrap();
    assert_eq!(v, json!("#ffffffff"));
    let back: Color = serde_json::from_value(v).unwrap();
    assert_eq!(back, Color::WHITE);
}
