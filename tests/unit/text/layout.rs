use super::*;
use crate::text::testing::FixedAdvanceFont;

fn texts(layout: &LineLayout) -> Vec<&str> {
    layout.lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn wraps_greedily_under_strict_width() {
    // 10px per char at size 20 with the fixed-advance font.
    let mut font = FixedAdvanceFont::new();
    let layout = wrap_lines(&mut font, "aa bb cc dd", 20.0, 0.0, 60.0).unwrap();
    // "aa bb" = 50 < 60 fits, "aa bb cc" = 80 does not.
    assert_eq!(texts(&layout), vec!["aa bb", "cc dd"]);
    assert_eq!(layout.lines[0].height, 25.0);
    assert_eq!(layout.total_height, 50.0);
    assert_eq!(layout.word_count(), 4);
}

#[test]
fn width_equal_to_limit_does_not_fit() {
    let mut font = FixedAdvanceFont::new();
    let layout = wrap_lines(&mut font, "aaa bb", 20.0, 0.0, 60.0).unwrap();
    // "aaa bb" measures exactly 60.
    assert_eq!(texts(&layout), vec!["aaa", "bb"]);
}

#[test]
fn stroke_counts_toward_width() {
    let mut font = FixedAdvanceFont::new();
    let layout = wrap_lines(&mut font, "aa bb", 20.0, 6.0, 60.0).unwrap();
    assert_eq!(texts(&layout), vec!["aa", "bb"]);
    assert_eq!(layout.lines[0].height, 37.0);
}

#[test]
fn oversized_word_gets_its_own_line() {
    let mut font = FixedAdvanceFont::new();
    let layout = wrap_lines(&mut font, "a supercalifragilistic b", 20.0, 0.0, 60.0).unwrap();
    assert_eq!(texts(&layout), vec!["a", "supercalifragilistic", "b"]);
    assert_eq!(layout.total_height, 75.0);
}

#[test]
fn blank_text_has_no_lines() {
    let mut font = FixedAdvanceFont::new();
    let layout = wrap_lines(&mut font, "   \n ", 20.0, 0.0, 60.0).unwrap();
    assert!(layout.lines.is_empty());
    assert_eq!(layout.total_height, 0.0);
}

#[test]
fn invalid_dimensions_are_layout_errors() {
    let mut font = FixedAdvanceFont::new();
    assert!(matches!(
        wrap_lines(&mut font, "x", 0.0, 0.0, 60.0),
        Err(CaptionError::Layout(_))
    ));
    assert!(matches!(
        wrap_lines(&mut font, "x", 10.0, 0.0, f32::NAN),
        Err(CaptionError::Layout(_))
    ));
}

#[test]
fn cached_layout_matches_uncached_and_skips_measuring() {
    let mut font = FixedAdvanceFont::new();
    let mut engine = LineLayoutEngine::new(8);

    let first = engine.layout(&mut font, "one two three four", 20.0, 2.0, 100.0).unwrap();
    let calls = font.measure_calls;
    let second = engine.layout(&mut font, "one two three four", 20.0, 2.0, 100.0).unwrap();

    assert_eq!(first, second);
    assert_eq!(font.measure_calls, calls);
    assert_eq!(engine.stats().hits, 1);

    let uncached = wrap_lines(&mut font, "one two three four", 20.0, 2.0, 100.0).unwrap();
    assert_eq!(*first, uncached);
}

#[test]
fn cache_key_includes_font_identity() {
    let mut a = FixedAdvanceFont::new();
    let mut b = FixedAdvanceFont::new();
    b.identity = "wide".to_owned();
    b.em_advance = 1.0;

    let mut engine = LineLayoutEngine::new(8);
    let la = engine.layout(&mut a, "aa bb", 20.0, 0.0, 60.0).unwrap();
    let lb = engine.layout(&mut b, "aa bb", 20.0, 0.0, 60.0).unwrap();
    assert_eq!(la.lines.len(), 1);
    assert_eq!(lb.lines.len(), 2);
    assert_eq!(engine.stats().misses, 2);
}
