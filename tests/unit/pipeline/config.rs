use super::*;
use serde_json::json;

#[test]
fn empty_config_uses_production_defaults() {
    let cfg: JobConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(cfg, JobConfig::default());
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (1080, 1920));
    assert_eq!(cfg.voice, "echo");
    assert_eq!(cfg.audio.music_volume, 0.1);
    assert!(cfg.validate().is_ok());
}

#[test]
fn blur_strength_maps_to_pixel_radius() {
    let mut mix = AudioMix::default();
    assert_eq!(mix.blur_radius_px(), 0);
    mix.global_blur = 0.5;
    assert_eq!(mix.blur_radius_px(), 10);
    mix.global_blur = 1.0;
    assert_eq!(mix.blur_radius_px(), 20);
    mix.global_blur = 1.5;
    assert!(mix.validate().is_err());
}

#[test]
fn job_reader_rejects_invalid_config() {
    let doc = json!({
        "config": {"canvas": {"width": 0, "height": 10}},
        "transcription": {"text": "", "words": []},
        "segments": []
    });
    let err = JobSpec::from_reader(doc.to_string().as_bytes()).unwrap_err();
    assert!(matches!(err, CaptionError::Validation(_)), "{err}");

    let err = JobSpec::from_reader("{not json".as_bytes()).unwrap_err();
    assert!(matches!(err, CaptionError::Serde(_)));
}

#[test]
fn job_duration_falls_back_to_transcript_end() {
    let doc = json!({
        "transcription": {
            "text": "hi there",
            "words": [
                {"word": "hi", "start": 0.0, "end": 0.4},
                {"word": "there", "start": 0.4, "end": 1.2}
            ]
        },
        "segments": [{"text": "Hi there!", "smiley": "👋"}]
    });
    let spec = JobSpec::from_reader(doc.to_string().as_bytes()).unwrap();
    assert_eq!(spec.duration(), 1.2);
    assert_eq!(spec.segments[0].smiley.as_deref(), Some("👋"));
}

#[test]
fn relative_paths_resolve_against_job_file() {
    let dir = std::env::temp_dir().join(format!("captionforge_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("job.json");
    let doc = json!({
        "config": {"font_path": "fonts/Bangers.ttf", "emoji_dir": "/abs/emojis"},
        "transcription": {"text": "", "words": []},
        "segments": [],
        "base_video": "clip.mp4",
        "video_duration": 3.0
    });
    std::fs::write(&path, doc.to_string()).unwrap();

    let spec = JobSpec::from_path(&path).unwrap();
    assert_eq!(spec.config.font_path, Some(dir.join("fonts/Bangers.ttf")));
    assert_eq!(spec.config.emoji_dir, PathBuf::from("/abs/emojis"));
    assert_eq!(spec.base_video, Some(dir.join("clip.mp4")));
    assert_eq!(spec.duration(), 3.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_job_file_keeps_io_cause_and_path() {
    let missing = std::env::temp_dir().join("captionforge_missing_job_dir/job.json");
    let err = JobSpec::from_path(&missing).unwrap_err();
    assert!(matches!(err, CaptionError::Other(_)), "{err:?}");
    let CaptionError::Other(inner) = &err else {
        unreachable!()
    };
    assert!(inner.to_string().contains("job.json"));
    assert!(inner.root_cause().downcast_ref::<std::io::Error>().is_some());
}
