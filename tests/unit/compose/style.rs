use super::*;
use serde_json::json;

#[test]
fn defaults_match_short_video_preset() {
    let style = CaptionStyle::default();
    assert_eq!(style.font_size, 130.0);
    assert_eq!(style.highlight_font_size(), 143.0);
    assert_eq!(style.highlight_color, Color::RED);
    assert!(style.validate().is_ok());
    assert!(EmojiStyle::default().validate().is_ok());
    assert_eq!(CacheConfig::default().layout_capacity, 256);
}

#[test]
fn legacy_field_names_are_accepted() {
    let style: CaptionStyle = serde_json::from_value(json!({
        "font_color": "yellow",
        "word_highlight_color": "#00ff00",
        "highlight_current_word": false,
        "shadow_blur": 0.2
    }))
    .unwrap();
    assert_eq!(style.color, Color::rgb(255, 255, 0));
    assert_eq!(style.highlight_color, Color::rgb(0, 255, 0));
    assert!(!style.highlight_enabled);
    assert_eq!(style.shadow_blur_ratio, 0.2);
    assert_eq!(style.stroke_width, 8.0);

    let emoji: EmojiStyle =
        serde_json::from_value(json!({"min_duration_for_animation": 2.0})).unwrap();
    assert_eq!(emoji.min_animation_duration, 2.0);
    assert_eq!(emoji.vertical_position, 700.0);
}

#[test]
fn out_of_range_values_are_rejected() {
    let style = CaptionStyle {
        shadow_intensity: 9.0,
        ..CaptionStyle::default()
    };
    assert!(style.validate().is_err());

    let style = CaptionStyle {
        font_size: 0.0,
        ..CaptionStyle::default()
    };
    assert!(style.validate().is_err());

    let emoji = EmojiStyle {
        relative_size: 0.0,
        ..EmojiStyle::default()
    };
    assert!(emoji.validate().is_err());
}
