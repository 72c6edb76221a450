use super::*;
use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, PropertyTween, TimelineDefaults, TweenOpts};
use crate::animation::value::{Property, Value};
use crate::foundation::core::Rect;
use crate::scene::tree::ElementId;

/// 1000 px viewport over a 5000 px page; the region spans offsets [1000, 1800].
fn runtime() -> (AnimationRuntime, ElementId, RegionId) {
    let mut rt = AnimationRuntime::new(
        Viewport::new(1440.0, 1000.0).unwrap(),
        5000.0,
        SmoothScrollConfig::default(),
    )
    .unwrap();
    let trigger = rt.tree_mut().insert(Rect::new(0.0, 1800.0, 1440.0, 2000.0));
    let region = rt.register_region(ObservedRegion::new(
        trigger,
        "top 80%".parse().unwrap(),
        "bottom 20%".parse().unwrap(),
    ));
    (rt, trigger, region)
}

fn fade(rt: &mut AnimationRuntime, target: ElementId, mut timeline: Timeline) -> TimelineId {
    timeline
        .tween(
            rt.tree(),
            &[target],
            &[PropertyTween::from_to(
                Property::Opacity,
                Value::Scalar(0.0),
                Value::Scalar(1.0),
            )],
            Position::At(0.0),
            TweenOpts {
                duration: Some(1.0),
                ease: Some(Ease::Linear),
                stagger: None,
            },
        )
        .unwrap();
    rt.add_timeline(timeline)
}

fn opacity(rt: &AnimationRuntime, id: ElementId) -> f64 {
    rt.tree().style(id).unwrap().opacity
}

#[test]
fn scrubbed_timeline_follows_region_within_the_same_frame() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(tl, region, ScrubOpts::default()).unwrap();

    rt.frame(0.0);
    assert_eq!(opacity(&rt, trigger), 0.0);

    rt.scroll_to(1400.0, true);
    let report = rt.frame(1.0 / 60.0);
    assert_eq!(report.offset, 1400.0);
    assert_eq!(opacity(&rt, trigger), 0.5);

    rt.scroll_to(1800.0, true);
    rt.frame(2.0 / 60.0);
    assert_eq!(opacity(&rt, trigger), 1.0);
}

#[test]
fn unchanged_progress_is_not_reseeked() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(tl, region, ScrubOpts::default()).unwrap();
    rt.frame(0.0);
    let writes = rt.tree().writes();
    rt.frame(0.1);
    rt.frame(0.2);
    assert_eq!(rt.tree().writes(), writes);
}

#[test]
fn deferred_render_waits_for_progress() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(
        tl,
        region,
        ScrubOpts {
            immediate_render: false,
            ..ScrubOpts::default()
        },
    )
    .unwrap();
    rt.frame(0.0);
    assert_eq!(rt.tree().writes(), 0);
    assert_eq!(opacity(&rt, trigger), 1.0);

    rt.scroll_to(1200.0, true);
    rt.frame(0.1);
    assert_eq!(opacity(&rt, trigger), 0.25);
}

#[test]
fn smoothed_scrub_lags_behind_region_progress() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(
        tl,
        region,
        ScrubOpts {
            mode: ScrubMode::Smoothed { lag: 1.2 },
            ..ScrubOpts::default()
        },
    )
    .unwrap();
    rt.frame(0.0);
    rt.scroll_to(1800.0, true);
    rt.frame(0.1);
    let first = opacity(&rt, trigger);
    assert!(first > 0.0 && first < 0.2);

    let mut now = 0.1;
    for _ in 0..200 {
        now += 0.1;
        rt.frame(now);
    }
    assert_eq!(opacity(&rt, trigger), 1.0);
}

#[test]
fn wall_clock_completion_is_reported_once() {
    let (mut rt, trigger, _) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::wall_clock(TimelineDefaults::default()));
    assert!(rt.play_timeline(tl));
    rt.frame(0.0);
    assert!(rt.frame(0.5).completed.is_empty());
    assert_eq!(opacity(&rt, trigger), 0.5);
    assert_eq!(rt.frame(1.0).completed, vec![tl]);
    assert!(rt.frame(1.5).completed.is_empty());
    assert_eq!(rt.timeline_state(tl), Some(PlaybackState::Completed));
}

#[test]
fn reduced_motion_jumps_to_the_end() {
    let (mut rt, trigger, _) = runtime();
    rt.set_reduced_motion(true);
    let tl = fade(&mut rt, trigger, Timeline::wall_clock(TimelineDefaults::default()));
    assert!(rt.play_timeline(tl));
    assert_eq!(opacity(&rt, trigger), 1.0);
    assert_eq!(rt.frame(0.0).completed, vec![tl]);
    assert!(rt.frame(0.1).completed.is_empty());
}

#[test]
fn reduced_motion_holds_scrubbed_reveals_at_rest() {
    let (mut rt, trigger, region) = runtime();
    rt.set_reduced_motion(true);
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(tl, region, ScrubOpts::default()).unwrap();

    rt.frame(0.0);
    assert_eq!(opacity(&rt, trigger), 1.0);
    let writes = rt.tree().writes();

    let mut seen = Vec::new();
    for (i, offset) in [1200.0, 1400.0, 1600.0, 0.0].into_iter().enumerate() {
        rt.scroll_to(offset, true);
        rt.frame(0.1 * (i + 1) as f64);
        seen.push(opacity(&rt, trigger));
    }
    assert_eq!(seen, vec![1.0; 4]);
    assert_eq!(rt.tree().writes(), writes);
    assert_eq!(rt.observer().progress(region), Some(0.0));
}

#[test]
fn reduced_motion_leaves_deferred_exits_untouched() {
    let (mut rt, trigger, region) = runtime();
    rt.set_reduced_motion(true);
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(
        tl,
        region,
        ScrubOpts {
            immediate_render: false,
            rest: 0.0,
            ..ScrubOpts::default()
        },
    )
    .unwrap();
    for (i, offset) in [0.0, 1400.0, 1800.0].into_iter().enumerate() {
        rt.scroll_to(offset, true);
        rt.frame(0.1 * i as f64);
    }
    assert_eq!(rt.tree().writes(), 0);
}

#[test]
fn cancelled_slots_are_reused_with_fresh_handles() {
    let (mut rt, trigger, _) = runtime();
    let first = fade(&mut rt, trigger, Timeline::scrubbed());
    assert!(rt.cancel_timeline(first));

    let mut last = first;
    for _ in 0..50 {
        last = fade(&mut rt, trigger, Timeline::wall_clock(TimelineDefaults::default()));
        assert!(rt.play_timeline(last));
        assert!(rt.cancel_timeline(last));
    }
    assert_eq!(rt.timeline_slots(), 1);
    assert_eq!(rt.timeline_count(), 0);

    let live = fade(&mut rt, trigger, Timeline::scrubbed());
    assert_ne!(live, first);
    assert!(rt.timeline(first).is_none());
    assert!(!rt.cancel_timeline(last));
    assert!(rt.timeline(live).is_some());
    assert_eq!(rt.timeline_slots(), 1);
}

#[test]
fn scrubbed_timelines_cannot_be_played() {
    let (mut rt, trigger, region) = runtime();
    let scrubbed = fade(&mut rt, trigger, Timeline::scrubbed());
    assert!(!rt.play_timeline(scrubbed));

    let wall = fade(&mut rt, trigger, Timeline::wall_clock(TimelineDefaults::default()));
    assert!(rt.bind_scrub(wall, region, ScrubOpts::default()).is_err());
    let unknown = TimelineId {
        index: 99,
        generation: 0,
    };
    assert!(rt.bind_scrub(unknown, region, ScrubOpts::default()).is_err());
}

#[test]
fn cancelled_timeline_stops_writing() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(tl, region, ScrubOpts::default()).unwrap();
    rt.frame(0.0);
    assert!(rt.cancel_timeline(tl));
    assert!(!rt.cancel_timeline(tl));

    let writes = rt.tree().writes();
    rt.scroll_to(1500.0, true);
    rt.frame(0.1);
    assert_eq!(rt.tree().writes(), writes);
    assert!(rt.timeline(tl).is_none());
}

#[test]
fn resize_remeasures_regions() {
    let (mut rt, _, region) = runtime();
    assert_eq!(rt.observer().bounds(region), Some((1000.0, 1800.0)));
    rt.resize(Viewport::new(1440.0, 500.0).unwrap(), 5000.0);
    assert_eq!(rt.observer().bounds(region), Some((1400.0, 1900.0)));
}

#[test]
fn dispose_freezes_everything() {
    let (mut rt, trigger, region) = runtime();
    let tl = fade(&mut rt, trigger, Timeline::scrubbed());
    rt.bind_scrub(tl, region, ScrubOpts::default()).unwrap();
    rt.frame(0.0);
    rt.dispose();
    rt.dispose();

    let writes = rt.tree().writes();
    rt.push_input(ScrollInput::Wheel(500.0));
    let report = rt.frame(0.5);
    assert!(report.events.is_empty());
    assert_eq!(report.offset, 0.0);
    assert_eq!(rt.tree().writes(), writes);
    assert!(rt.observer().is_empty());
}
