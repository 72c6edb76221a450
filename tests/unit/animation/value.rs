use super::*;

#[test]
fn scalar_lerp_is_linear() {
    let v = Value::lerp(&Value::Scalar(0.0), &Value::Scalar(40.0), 0.25);
    assert_eq!(v, Value::Scalar(10.0));
}

#[test]
fn color_lerp_is_component_wise() {
    let a = Value::Color(Rgba8::new(0x61, 0xdc, 0xa3, 255));
    let b = Value::Color(Rgba8::new(0xf4, 0xf4, 0xf5, 255));
    let Value::Color(mid) = Value::lerp(&a, &b, 0.5) else {
        panic!("expected color");
    };
    assert_eq!(mid, Rgba8::new(171, 232, 204, 255));
}

#[test]
fn vec2_lerp_is_per_channel() {
    let v = Value::lerp(
        &Value::Vec2(Vec2::new(0.0, 100.0)),
        &Value::Vec2(Vec2::new(10.0, 0.0)),
        0.5,
    );
    assert_eq!(v, Value::Vec2(Vec2::new(5.0, 50.0)));
}

#[test]
fn mismatched_kinds_step_at_the_end() {
    let a = Value::Scalar(1.0);
    let b = Value::Color(Rgba8::white());
    assert_eq!(Value::lerp(&a, &b, 0.99), a);
    assert_eq!(Value::lerp(&a, &b, 1.0), b);
}

#[test]
fn property_kinds() {
    assert_eq!(Property::Opacity.kind(), ValueKind::Scalar);
    assert_eq!(Property::BorderColor.kind(), ValueKind::Color);
    assert_eq!(Property::Translate.kind(), ValueKind::Vec2);
    assert!(Property::Y.is_length());
    assert!(!Property::Scale.is_length());
}
