use std::path::Path;

use super::*;
use crate::{
    assets::emoji::{EmojiAsset, EmojiFormat},
    compose::layer::LayerContent,
    foundation::core::Canvas,
    pipeline::collaborators::{CoverCrop, Footage, Voiceover},
    text::testing::FixedAdvanceFont,
    transcript::model::Word,
};

struct Script;
impl ContentGenerator for Script {
    fn generate(&mut self, topic: &str) -> CaptionResult<String> {
        assert!(!topic.is_empty());
        Ok("Hello world. This is fun!".into())
    }
}

struct Tts;
impl SpeechSynthesizer for Tts {
    fn synthesize(&mut self, _script: &str, voice: &str) -> CaptionResult<Voiceover> {
        assert_eq!(voice, "echo");
        Ok(Voiceover {
            path: PathBuf::from("tts.mp3"),
            duration_secs: 2.5,
        })
    }
}

struct Asr;
impl SpeechRecognizer for Asr {
    fn transcribe(&mut self, audio: &Path) -> CaptionResult<Transcription> {
        assert_eq!(audio, Path::new("tts.mp3"));
        Ok(hello_transcript())
    }
}

struct Proposer;
impl SegmentProposer for Proposer {
    fn propose(&mut self, _text: &str) -> CaptionResult<Vec<SegmentSpec>> {
        Ok(vec![
            SegmentSpec::with_smiley("Hello world.", "😀"),
            SegmentSpec::with_smiley("Nope nope", "🙈"),
            SegmentSpec::with_smiley("This is fun!", "🎉"),
        ])
    }
}

struct StockClips;
impl VideoSource for StockClips {
    fn fetch(&mut self, min_duration_secs: f64) -> CaptionResult<Footage> {
        assert_eq!(min_duration_secs, 2.5);
        Ok(Footage {
            path: PathBuf::from("gameplay.mp4"),
            width: 1600,
            height: 900,
        })
    }
}

#[derive(Default)]
struct Recorder {
    layers: usize,
    base_video: Option<PathBuf>,
    crop: Option<CoverCrop>,
    footage_blur_px: u32,
}
impl OverlayRenderer for Recorder {
    fn render(&mut self, request: &RenderRequest<'_>) -> CaptionResult<PathBuf> {
        self.layers = request.timeline.layers.len();
        self.base_video = Some(request.base_video.path.clone());
        self.crop = request.crop;
        self.footage_blur_px = request.footage_blur_px;
        Ok(PathBuf::from("final.mp4"))
    }
}

struct FailingFootage;
impl VideoSource for FailingFootage {
    fn fetch(&mut self, _min_duration_secs: f64) -> CaptionResult<Footage> {
        Err(CaptionError::asset("no footage available"))
    }
}

struct Emojis;
impl EmojiAssetSource for Emojis {
    fn resolve(&mut self, glyph: &str) -> CaptionResult<EmojiAsset> {
        Ok(EmojiAsset {
            glyph: glyph.into(),
            path: PathBuf::from("emoji.png"),
            format: EmojiFormat::Png,
            width: 64,
            height: 64,
        })
    }
}

fn hello_transcript() -> Transcription {
    Transcription {
        text: "Hello world this is fun".into(),
        words: vec![
            Word::new("Hello", 0.0, 0.5),
            Word::new("world", 0.5, 1.0),
            Word::new("this", 1.0, 1.3),
            Word::new("is", 1.3, 1.5),
            Word::new("fun", 1.5, 2.0),
        ],
    }
}

fn small_config() -> JobConfig {
    let mut cfg = JobConfig {
        canvas: Canvas::new(400, 800).unwrap(),
        seed: 7,
        ..JobConfig::default()
    };
    cfg.captions.font_size = 20.0;
    cfg.captions.stroke_width = 2.0;
    cfg
}

#[test]
fn emoji_timestamps_follow_matched_captions() {
    let captions = vec![
        CaptionSegment {
            text: "a".into(),
            start: 0.0,
            end: 1.0,
            words: vec![],
            smiley: Some("😀".into()),
        },
        CaptionSegment {
            text: "b".into(),
            start: 1.0,
            end: 2.0,
            words: vec![],
            smiley: None,
        },
        CaptionSegment {
            text: "c".into(),
            start: 5.0,
            end: 6.0,
            words: vec![],
            smiley: Some("🎉".into()),
        },
    ];
    let stamps = caption_emoji_timestamps(&captions, 4.0);
    assert_eq!(stamps, vec![EmojiTimestamp::new("😀", 0.0)]);
}

#[test]
fn timeline_pairs_each_caption_with_its_own_smiley() {
    let mut font = FixedAdvanceFont::new();
    let out = build_timeline(
        &small_config(),
        &hello_transcript(),
        &Proposer.propose("").unwrap(),
        2.5,
        None,
        &mut font,
        &mut Emojis,
    )
    .unwrap();

    assert_eq!(out.alignment.matched_count(), 2);
    let glyphs: Vec<_> = out.emojis.events.iter().map(|e| e.glyph.as_str()).collect();
    // The unmatched middle segment's emoji is not shifted onto the next caption.
    assert_eq!(glyphs, vec!["😀", "🎉"]);
    assert_eq!(out.emojis.events[1].span.start, 1.0);
    assert_eq!(out.emojis.events[1].span.end, 2.5);

    // 5 word intervals, one line each: base + 5 shadows + 5 texts + 2 emojis.
    assert_eq!(out.timeline.counts(), (1, 5, 5, 2));
    assert!(matches!(
        out.timeline.layers[0].content,
        LayerContent::BaseVideo { path: None }
    ));
}

#[test]
fn same_seed_gives_same_timeline() {
    let run = || {
        let mut font = FixedAdvanceFont::new();
        build_timeline(
            &small_config(),
            &hello_transcript(),
            &Proposer.propose("").unwrap(),
            2.5,
            None,
            &mut font,
            &mut Emojis,
        )
        .unwrap()
        .timeline
    };
    assert_eq!(run(), run());
}

#[test]
fn full_job_runs_every_stage_and_renders() {
    let mut font = FixedAdvanceFont::new();
    let mut recorder = Recorder::default();
    let job = ShortVideoJob::new(small_config()).unwrap();

    let out = job
        .run(
            Collaborators {
                content: &mut Script,
                speech: &mut Tts,
                recognizer: &mut Asr,
                proposer: &mut Proposer,
                video: &mut StockClips,
                renderer: &mut recorder,
            },
            &mut font,
            &mut Emojis,
        )
        .unwrap();

    assert_eq!(out.video, PathBuf::from("final.mp4"));
    assert_eq!(out.script, "Hello world. This is fun!");
    assert_eq!(recorder.layers, out.captions.timeline.layers.len());
    assert_eq!(recorder.base_video, Some(PathBuf::from("gameplay.mp4")));
    assert_eq!(out.captions.timeline.duration, 2.5);
}

#[test]
fn render_request_carries_crop_and_footage_blur() {
    let mut font = FixedAdvanceFont::new();
    let mut recorder = Recorder::default();
    let mut cfg = small_config();
    cfg.audio.global_blur = 0.5;
    let job = ShortVideoJob::new(cfg).unwrap();

    job.run(
        Collaborators {
            content: &mut Script,
            speech: &mut Tts,
            recognizer: &mut Asr,
            proposer: &mut Proposer,
            video: &mut StockClips,
            renderer: &mut recorder,
        },
        &mut font,
        &mut Emojis,
    )
    .unwrap();

    // 1600x900 scaled to the 800px canvas height is 1422.2 wide; a 400px window is centered.
    let crop = recorder.crop.unwrap();
    assert!((crop.scale - 800.0 / 900.0).abs() < 1e-12);
    assert!((crop.x - (1600.0 * crop.scale / 2.0 - 200.0)).abs() < 1e-9);
    assert_eq!((crop.width, crop.height), (400.0, 800.0));
    // global_blur 0.5 -> 1 + 0.5 * 19 = 10 px.
    assert_eq!(recorder.footage_blur_px, 10);
}

#[test]
fn collaborator_failure_is_fatal_and_names_the_stage() {
    let mut font = FixedAdvanceFont::new();
    let mut recorder = Recorder::default();
    let job = ShortVideoJob::new(small_config()).unwrap();

    let err = job
        .run(
            Collaborators {
                content: &mut Script,
                speech: &mut Tts,
                recognizer: &mut Asr,
                proposer: &mut Proposer,
                video: &mut FailingFootage,
                renderer: &mut recorder,
            },
            &mut font,
            &mut Emojis,
        )
        .unwrap_err();
    assert!(matches!(err, CaptionError::Collaborator(_)));
    assert!(err.to_string().contains("video source"));
    assert_eq!(recorder.layers, 0);
}

#[test]
fn zero_length_caption_is_kept_visible_by_default_floor() {
    let transcript = Transcription {
        text: "Boom".into(),
        words: vec![Word::new("Boom", 1.0, 1.0)],
    };
    let segments = [SegmentSpec::new("Boom!")];
    let build = |cfg: &JobConfig| {
        let mut font = FixedAdvanceFont::new();
        build_timeline(cfg, &transcript, &segments, 2.0, None, &mut font, &mut Emojis).unwrap()
    };

    let shown = build(&small_config());
    let caption = shown.alignment.captions().next().unwrap();
    assert!((caption.end - 1.1).abs() < 1e-9);
    let (_, _, texts, _) = shown.timeline.counts();
    assert_eq!(texts, 1);
    assert!(shown.timeline.active_at(1.05).count() > 1);

    let mut no_floor = small_config();
    no_floor.captions.min_caption_duration = 0.0;
    let dropped = build(&no_floor);
    assert_eq!(dropped.alignment.matched_count(), 1);
    assert_eq!(dropped.timeline.counts(), (1, 0, 0, 0));
}
