use super::*;
use crate::scene::tree::RenderTree;

fn seg(start: f64, duration: f64) -> AnimationSegment {
    let mut tree = RenderTree::new();
    AnimationSegment {
        target: tree.insert(crate::foundation::core::Rect::ZERO),
        property: Property::Opacity,
        from: Value::Scalar(0.0),
        to: Value::Scalar(1.0),
        ease: Ease::Linear,
        start,
        duration,
    }
}

#[test]
fn holds_outside_active_range() {
    let s = seg(0.25, 0.5);
    assert_eq!(s.sample(0.0), Value::Scalar(0.0));
    assert_eq!(s.sample(0.25), Value::Scalar(0.0));
    assert_eq!(s.sample(0.5), Value::Scalar(0.5));
    assert_eq!(s.sample(0.75), Value::Scalar(1.0));
    assert_eq!(s.sample(3.0), Value::Scalar(1.0));
}

#[test]
fn zero_duration_is_a_step() {
    let s = seg(0.3, 0.0);
    assert_eq!(s.sample(0.29), Value::Scalar(0.0));
    assert_eq!(s.sample(0.3), Value::Scalar(1.0));
}

#[test]
fn validate_rejects_bad_ranges_and_kinds() {
    assert!(seg(0.0, 0.5).validate().is_ok());
    assert!(seg(-0.1, 0.5).validate().is_err());
    assert!(seg(0.0, f64::INFINITY).validate().is_err());

    let mut s = seg(0.0, 0.5);
    s.to = Value::Color(crate::foundation::core::Rgba8::white());
    assert!(s.validate().is_err());
}

#[test]
fn conflicts_require_same_pair_and_overlap() {
    let a = seg(0.0, 0.5);
    let mut b = a;
    b.start = 0.4;
    assert!(a.conflicts_with(&b));
    b.start = 0.5;
    assert!(!a.conflicts_with(&b));
    b.start = 0.4;
    b.property = Property::Y;
    assert!(!a.conflicts_with(&b));
}
