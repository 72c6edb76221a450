use super::*;
use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::PlaybackState;
use crate::animation::value::{Property, Value};
use crate::foundation::core::{Length, Rect};
use crate::runtime::session::ScrubMode;
use crate::scroll::driver::SmoothScrollConfig;
use crate::scroll::observer::{Anchor, Threshold};

fn runtime() -> AnimationRuntime {
    AnimationRuntime::new(
        Viewport::new(1440.0, 1000.0).unwrap(),
        5000.0,
        SmoothScrollConfig::default(),
    )
    .unwrap()
}

/// Section at y = 1800..2600 with three "cards" of increasing height.
fn layout(rt: &mut AnimationRuntime) -> SectionLayout {
    let tree = rt.tree_mut();
    let root = tree.insert(Rect::new(0.0, 1800.0, 1440.0, 2600.0));
    let cards = (0..3)
        .map(|i| {
            let h = 100.0 * f64::from(i + 1);
            tree.insert(Rect::new(0.0, 1900.0, 400.0, 1900.0 + h))
        })
        .collect();
    SectionLayout::new(root).with_group("cards", cards)
}

fn recipe() -> RevealRecipe {
    RevealRecipe::new(
        Threshold::new(Anchor::TOP, Anchor::Percent(80.0)),
        Threshold::new(Anchor::TOP, Anchor::Percent(30.0)),
    )
    .step(
        RevealStep::new("cards")
            .tween(Property::Opacity, 0.0, 1.0)
            .tween(Property::Y, Length::Percent(50.0), 0.0)
            .tween(Property::RotateY, -15.0, 0.0)
            .from_odd(Property::RotateY, 15.0)
            .stagger(Stagger::new(0.1))
            .ease(Ease::Linear)
            .at(0.0),
    )
}

fn segment_from(rt: &AnimationRuntime, tl: TimelineId, target: ElementId, prop: Property) -> Value {
    rt.timeline(tl)
        .unwrap()
        .segments()
        .iter()
        .find(|s| s.target == target && s.property == prop)
        .unwrap()
        .from
}

#[test]
fn mount_registers_region_and_binds_timeline() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    let ctl = RevealController::mount(&mut rt, "services", &recipe(), &layout).unwrap();

    let region = ctl.region().unwrap();
    assert_eq!(rt.observer().bounds(region), Some((1000.0, 1500.0)));
    let tl = ctl.scrubbed_timeline().unwrap();
    assert_eq!(rt.timeline(tl).unwrap().kind(), TimelineKind::Scrubbed);
    assert!(ctl.entrance_timeline().is_none());
    assert_eq!(ctl.name(), "services");

    rt.frame(0.0);
    let cards = layout.group("cards").unwrap();
    assert!(cards.iter().all(|c| rt.tree().style(*c).unwrap().opacity == 0.0));

    rt.scroll_to(1500.0, true);
    rt.frame(0.1);
    assert!(cards.iter().all(|c| rt.tree().style(*c).unwrap().opacity == 1.0));
}

#[test]
fn per_target_lengths_and_odd_overrides() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    let ctl = RevealController::mount(&mut rt, "services", &recipe(), &layout).unwrap();
    let tl = ctl.scrubbed_timeline().unwrap();
    let cards = layout.group("cards").unwrap();

    let ys: Vec<Value> = cards
        .iter()
        .map(|c| segment_from(&rt, tl, *c, Property::Y))
        .collect();
    assert_eq!(
        ys,
        vec![Value::Scalar(50.0), Value::Scalar(100.0), Value::Scalar(150.0)]
    );

    let rot: Vec<Value> = cards
        .iter()
        .map(|c| segment_from(&rt, tl, *c, Property::RotateY))
        .collect();
    assert_eq!(
        rot,
        vec![Value::Scalar(-15.0), Value::Scalar(15.0), Value::Scalar(-15.0)]
    );

    let starts: Vec<f64> = cards
        .iter()
        .map(|c| {
            rt.timeline(tl)
                .unwrap()
                .segments()
                .iter()
                .find(|s| s.target == *c)
                .unwrap()
                .start
        })
        .collect();
    assert_eq!(starts, vec![0.0, 0.1, 0.2]);
}

#[test]
fn unknown_group_fails_without_registering_anything() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    let bad = recipe().step(RevealStep::new("missing").tween(Property::Opacity, 0.0, 1.0));
    let err = RevealController::mount(&mut rt, "services", &bad, &layout).unwrap_err();
    assert!(err.to_string().contains("unknown target group 'missing'"));
    assert!(rt.observer().is_empty());
    assert_eq!(rt.timeline_count(), 0);
}

#[test]
fn trigger_group_replaces_the_section_root() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    let mut r = recipe();
    r.trigger = Some("cards".to_owned());
    let ctl = RevealController::mount(&mut rt, "services", &r, &layout).unwrap();
    // First card top is 1900.
    assert_eq!(
        rt.observer().bounds(ctl.region().unwrap()),
        Some((1100.0, 1600.0))
    );
}

#[test]
fn entrance_plays_on_mount_and_unmount_cancels_everything() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    let r = recipe()
        .scrub(ScrubMode::Smoothed { lag: 1.2 })
        .entrance(
            TimelineDefaults::default(),
            vec![
                RevealStep::new("cards")
                    .tween(Property::Scale, 0.5, 1.0)
                    .at(0.0),
            ],
        );
    let mut ctl = RevealController::mount(&mut rt, "services", &r, &layout).unwrap();
    let entrance = ctl.entrance_timeline().unwrap();
    assert_eq!(rt.timeline_state(entrance), Some(PlaybackState::Playing));

    ctl.unmount(&mut rt);
    ctl.unmount(&mut rt);
    assert!(!ctl.is_mounted());
    assert!(rt.timeline(entrance).is_none());
    assert!(rt.observer().is_empty());

    let writes = rt.tree().writes();
    rt.scroll_to(1400.0, true);
    rt.frame(0.0);
    rt.frame(0.5);
    assert_eq!(rt.tree().writes(), writes);
}

#[test]
fn layout_removal_drops_every_element() {
    let mut rt = runtime();
    let layout = layout(&mut rt);
    assert_eq!(layout.elements().count(), 4);
    layout.remove_from(rt.tree_mut());
    assert!(rt.tree().is_empty());
}
