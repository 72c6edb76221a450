use super::*;

fn damped(k: f64) -> SmoothScroll {
    SmoothScroll::new(
        SmoothScrollConfig {
            integration: Integration::Damped { k },
            ..SmoothScrollConfig::default()
        },
        4000.0,
    )
}

#[test]
fn damped_integration_is_frame_rate_independent() {
    let mut a = damped(8.0);
    let mut b = damped(8.0);

    a.tick(1000.0, 1.0 / 60.0);
    b.tick(1000.0, 1.0 / 120.0);
    b.tick(0.0, 1.0 / 120.0);

    assert!((a.offset() - b.offset()).abs() < 1e-9);
    let expected = 1000.0 * (1.0 - (-8.0f64 / 60.0).exp());
    assert!((a.offset() - expected).abs() < 1e-9);
}

#[test]
fn damped_integration_settles_on_target() {
    let mut s = damped(12.0);
    s.tick(500.0, 1.0 / 60.0);
    for _ in 0..600 {
        s.tick(0.0, 1.0 / 60.0);
    }
    assert_eq!(s.offset(), 500.0);
    assert!(s.is_settled());
}

#[test]
fn eased_glide_reaches_target_after_duration() {
    let mut s = SmoothScroll::new(SmoothScrollConfig::default(), 4000.0);
    s.push(ScrollInput::Wheel(600.0));
    let delta = s.take_pending();
    let first = s.tick(delta, 0.1);
    assert!(first > 0.0 && first < 600.0);

    let mut last = first;
    for _ in 0..13 {
        let v = s.tick(0.0, 0.1);
        assert!(v >= last);
        last = v;
    }
    assert_eq!(s.offset(), 600.0);
    assert!(s.is_settled());
    assert_eq!(s.state().velocity, 0.0);
}

#[test]
fn input_outside_extent_is_clamped_silently() {
    let mut s = damped(1000.0);
    s.tick(-250.0, 1.0);
    assert_eq!(s.offset(), 0.0);
    s.tick(1e9, 1.0);
    assert_eq!(s.state().raw_offset, 4000.0);
    assert!(s.offset() <= 4000.0);

    s.push(ScrollInput::Scrollbar(9000.0));
    let d = s.take_pending();
    s.tick(d, 1.0);
    assert_eq!(s.state().raw_offset, 4000.0);
}

#[test]
fn touch_input_uses_its_multiplier() {
    let mut s = damped(10.0);
    s.push(ScrollInput::Touch(10.0));
    s.push(ScrollInput::Wheel(5.0));
    assert_eq!(s.take_pending(), 25.0);
    assert_eq!(s.take_pending(), 0.0);
}

#[test]
fn bad_dt_counts_as_zero() {
    let mut s = damped(10.0);
    s.tick(100.0, f64::NAN);
    assert_eq!(s.offset(), 0.0);
    s.tick(0.0, -1.0);
    assert_eq!(s.offset(), 0.0);
    assert_eq!(s.state().raw_offset, 100.0);
}

#[test]
fn raf_derives_dt_from_the_frame_clock() {
    let mut s = damped(8.0);
    s.push(ScrollInput::Wheel(1000.0));
    assert_eq!(s.raf(10.0), 0.0);
    let v = s.raf(10.0 + 1.0 / 60.0);
    let expected = 1000.0 * (1.0 - (-8.0f64 * (1.0 / 60.0)).exp());
    assert!((v - expected).abs() < 1e-6);
}

#[test]
fn scroll_to_immediate_jumps() {
    let mut s = SmoothScroll::new(SmoothScrollConfig::default(), 2000.0);
    s.scroll_to(1500.0, true);
    assert_eq!(s.offset(), 1500.0);
    assert!(s.is_settled());
}

#[test]
fn disposed_driver_ignores_input_and_stops_integrating() {
    let mut s = damped(8.0);
    s.tick(300.0, 1.0 / 60.0);
    let frozen = s.offset();
    s.dispose();
    s.push(ScrollInput::Wheel(100.0));
    assert_eq!(s.take_pending(), 0.0);
    assert_eq!(s.tick(500.0, 1.0), frozen);
    s.scroll_to(0.0, true);
    assert_eq!(s.offset(), frozen);
}

#[test]
fn shrinking_extent_reclamps_offsets() {
    let mut s = damped(8.0);
    s.scroll_to(3000.0, true);
    s.set_extent(1000.0);
    assert_eq!(s.offset(), 1000.0);
    assert_eq!(s.state().raw_offset, 1000.0);
}

#[test]
fn config_validation() {
    assert!(SmoothScrollConfig::default().validate().is_ok());
    let bad = SmoothScrollConfig {
        integration: Integration::Damped { k: 0.0 },
        ..SmoothScrollConfig::default()
    };
    assert!(bad.validate().is_err());
}
