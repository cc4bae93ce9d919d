use super::*;
use crate::{animation::motion::AnimationParams, animation::motion::MotionKind};

fn text_layer(start: f64, end: f64) -> OverlayLayer {
    OverlayLayer {
        span: TimeSpan::new(start, end).unwrap(),
        placement: Placement::CenteredX { y: 10.0 },
        content: LayerContent::Text {
            runs: vec![],
            stroke: None,
        },
    }
}

#[test]
fn active_at_filters_by_half_open_span_in_paint_order() {
    let timeline = OverlayTimeline {
        canvas: Canvas::default(),
        duration: 3.0,
        layers: vec![
            OverlayLayer {
                span: TimeSpan::new(0.0, 3.0).unwrap(),
                placement: Placement::FullFrame,
                content: LayerContent::BaseVideo { path: None },
            },
            text_layer(0.0, 1.0),
            text_layer(1.0, 2.0),
        ],
    };

    let at_one: Vec<_> = timeline.active_at(1.0).collect();
    assert_eq!(at_one.len(), 2);
    assert!(matches!(at_one[0].content, LayerContent::BaseVideo { .. }));
    assert_eq!(at_one[1].span.start, 1.0);
    assert_eq!(timeline.counts(), (1, 0, 2, 0));
}

#[test]
fn centered_placement_uses_item_width() {
    let canvas = Canvas::new(100, 50).unwrap();
    let span = TimeSpan::new(0.0, 1.0).unwrap();
    let s = Placement::CenteredX { y: 7.0 }.resolve(canvas, span, Vec2::new(41.0, 5.0), 0.5);
    assert_eq!(s.position, Vec2::new(29.0, 7.0));
}

#[test]
fn animated_placement_uses_layer_local_time() {
    let motion = Motion {
        kind: MotionKind::Bounce,
        anchor: Vec2::new(10.0, 20.0),
        size: Vec2::new(5.0, 5.0),
        params: AnimationParams::default(),
    };
    let span = TimeSpan::new(4.0, 6.0).unwrap();
    let s = Placement::Animated { motion }.resolve(Canvas::default(), span, motion.size, 4.25);
    assert!((s.position.y - 40.0).abs() < 1e-9);
}

#[test]
fn serialized_layers_are_tagged() {
    let v = serde_json::to_value(text_layer(0.0, 1.0)).unwrap();
    assert_eq!(v["content"]["type"], "text");
    assert_eq!(v["placement"]["kind"], "centered_x");
    assert_eq!(v["placement"]["y"], 10.0);
}
