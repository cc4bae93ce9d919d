use super::*;
use serde_json::json;

#[test]
fn words_accept_recognizer_field_names() {
    let w: Word = serde_json::from_value(json!({"word": "hi", "start": 0.1, "end": 0.4})).unwrap();
    assert_eq!(w, Word::new("hi", 0.1, 0.4));

    let w: Word =
        serde_json::from_value(json!({"text": "yo", "start_time": 1.0, "end_time": 1.5})).unwrap();
    assert_eq!(w, Word::new("yo", 1.0, 1.5));
}

#[test]
fn validation_rejects_bad_timings() {
    let ok = Transcription {
        text: "a b".into(),
        words: vec![Word::new("a", 0.0, 0.5), Word::new("b", 0.5, 0.9)],
    };
    assert!(ok.validate().is_ok());
    assert_eq!(ok.duration(), 0.9);

    let inverted = Transcription {
        text: "a".into(),
        words: vec![Word::new("a", 1.0, 0.5)],
    };
    assert!(matches!(inverted.validate(), Err(CaptionError::Alignment(_))));

    let unordered = Transcription {
        text: "a b".into(),
        words: vec![Word::new("a", 1.0, 1.5), Word::new("b", 0.2, 0.4)],
    };
    assert!(unordered.validate().is_err());

    let nan = Transcription {
        text: "a".into(),
        words: vec![Word::new("a", f64::NAN, 1.0)],
    };
    assert!(nan.validate().is_err());
}

#[test]
fn segment_smiley_is_optional() {
    let s: SegmentSpec = serde_json::from_value(json!({"text": "Hello"})).unwrap();
    assert_eq!(s, SegmentSpec::new("Hello"));
    let s: SegmentSpec = serde_json::from_value(json!({"text": "Hi", "smiley": "😀"})).unwrap();
    assert_eq!(s.smiley.as_deref(), Some("😀"));
}
