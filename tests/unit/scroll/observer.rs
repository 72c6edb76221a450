use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::Rect;

fn viewport() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

fn threshold(s: &str) -> Threshold {
    s.parse().unwrap()
}

/// Trigger at y = 1800..2000; "top 80%" starts at 1000, "top 30%" ends at 1500.
fn setup() -> (RenderTree, ScrollObserver, RegionId) {
    let mut tree = RenderTree::new();
    let trigger = tree.insert(Rect::new(0.0, 1800.0, 1440.0, 2000.0));
    let mut observer = ScrollObserver::new();
    let id = observer.register(ObservedRegion::new(
        trigger,
        threshold("top 80%"),
        threshold("top 30%"),
    ));
    observer.refresh(&tree, viewport());
    (tree, observer, id)
}

fn edges(events: &[RegionEvent]) -> Vec<RegionEventKind> {
    events
        .iter()
        .map(|e| e.kind)
        .filter(|k| !matches!(k, RegionEventKind::Progress(_)))
        .collect()
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl RegionListener for Recorder {
    fn on_progress(&mut self, progress: f64) {
        self.0.borrow_mut().push(format!("progress {progress}"));
    }
    fn on_enter(&mut self) {
        self.0.borrow_mut().push("enter".to_owned());
    }
    fn on_leave_back(&mut self) {
        self.0.borrow_mut().push("leave_back".to_owned());
    }
}

#[test]
fn threshold_grammar_round_trips_through_display() {
    let t = threshold("top 80%");
    assert_eq!(t.element, Anchor::Percent(0.0));
    assert_eq!(t.viewport, Anchor::Percent(80.0));
    assert_eq!(t.to_string(), "top 80%");
    assert_eq!(threshold("center 120px").to_string(), "center 120px");
    assert_eq!(threshold("  bottom   bottom ").to_string(), "bottom bottom");

    assert!("top".parse::<Threshold>().is_err());
    assert!("top 80% extra".parse::<Threshold>().is_err());
    assert!("middle 80%".parse::<Threshold>().is_err());
    assert!("top NaN%".parse::<Threshold>().is_err());
}

#[test]
fn threshold_deserializes_from_a_string() {
    let t: Threshold = serde_json::from_str("\"top 25%\"").unwrap();
    assert_eq!(t.viewport, Anchor::Percent(25.0));
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"top 25%\"");
    assert!(serde_json::from_str::<Threshold>("\"sideways\"").is_err());
}

#[test]
fn bounds_resolve_against_trigger_and_viewport() {
    let (_, observer, id) = setup();
    assert_eq!(observer.bounds(id), Some((1000.0, 1500.0)));
}

#[test]
fn scrolling_down_through_the_region_fires_enter_once() {
    let (_, mut observer, id) = setup();
    observer.update(0.0);

    let mut enters = 0;
    let mut last = 0.0;
    let mut offset = 0.0;
    while offset <= 1400.0 {
        for e in observer.update(offset) {
            match e.kind {
                RegionEventKind::Enter => enters += 1,
                RegionEventKind::Progress(p) => {
                    assert!(p >= last);
                    assert!((0.0..=1.0).contains(&p));
                    last = p;
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        offset += 50.0;
    }
    assert_eq!(enters, 1);
    assert_eq!(observer.phase(id), Some(Phase::Active));
    assert_eq!(observer.progress(id), Some(0.8));
}

#[test]
fn scrolling_back_up_fires_leave_back_once() {
    let (_, mut observer, id) = setup();
    observer.update(1250.0);
    assert_eq!(observer.progress(id), Some(0.5));

    let mut leave_backs = 0;
    let mut offset = 1250.0;
    while offset >= 0.0 {
        leave_backs += edges(&observer.update(offset))
            .iter()
            .filter(|k| **k == RegionEventKind::LeaveBack)
            .count();
        offset -= 50.0;
    }
    assert_eq!(leave_backs, 1);
    assert_eq!(observer.progress(id), Some(0.0));
}

#[test]
fn update_is_idempotent_for_an_unchanged_offset() {
    let (_, mut observer, _) = setup();
    assert!(!observer.update(1200.0).is_empty());
    assert!(observer.update(1200.0).is_empty());
    assert!(observer.update(1200.0).is_empty());
}

#[test]
fn jumping_over_the_region_fires_both_edges_in_order() {
    let (_, mut observer, _) = setup();
    observer.update(0.0);
    let events = observer.update(3000.0);
    assert_eq!(
        edges(&events),
        vec![RegionEventKind::Enter, RegionEventKind::Leave]
    );
    assert!(events.contains(&RegionEvent {
        region: RegionId(0),
        kind: RegionEventKind::Progress(1.0),
    }));

    let back = observer.update(0.0);
    assert_eq!(
        edges(&back),
        vec![RegionEventKind::EnterBack, RegionEventKind::LeaveBack]
    );
}

#[test]
fn enter_back_and_leave_follow_direction() {
    let (_, mut observer, _) = setup();
    observer.update(1200.0);
    assert_eq!(edges(&observer.update(1600.0)), vec![RegionEventKind::Leave]);
    assert_eq!(
        edges(&observer.update(1400.0)),
        vec![RegionEventKind::EnterBack]
    );
}

#[test]
fn region_starts_exactly_at_the_start_offset() {
    let (_, mut observer, id) = setup();
    observer.update(999.0);
    assert_eq!(edges(&observer.update(1000.0)), vec![RegionEventKind::Enter]);
    assert_eq!(observer.progress(id), Some(0.0));
}

#[test]
fn unmeasurable_trigger_reports_zero_progress_and_no_edges() {
    let mut tree = RenderTree::new();
    let trigger = tree.insert(Rect::new(0.0, 500.0, 100.0, 500.0));
    let mut observer = ScrollObserver::new();
    let id = observer.register(ObservedRegion::new(
        trigger,
        threshold("top bottom"),
        threshold("bottom top"),
    ));
    observer.refresh(&tree, viewport());
    assert_eq!(observer.bounds(id), None);

    let events = observer.update(800.0);
    assert_eq!(
        events,
        vec![RegionEvent {
            region: id,
            kind: RegionEventKind::Progress(0.0),
        }]
    );
    assert!(observer.update(5000.0).is_empty());

    tree.remove(trigger);
    observer.refresh(&tree, viewport());
    assert!(observer.update(100.0).is_empty());
}

#[test]
fn zero_extent_region_is_a_step() {
    let mut tree = RenderTree::new();
    let trigger = tree.insert(Rect::new(0.0, 1000.0, 100.0, 1100.0));
    let mut observer = ScrollObserver::new();
    let id = observer.register(ObservedRegion::new(
        trigger,
        threshold("top top"),
        threshold("top top"),
    ));
    observer.refresh(&tree, viewport());
    observer.update(999.0);
    assert_eq!(observer.progress(id), Some(0.0));
    observer.update(1000.0);
    assert_eq!(observer.progress(id), Some(1.0));
}

#[test]
fn listeners_run_in_event_order() {
    let mut tree = RenderTree::new();
    let trigger = tree.insert(Rect::new(0.0, 1800.0, 1440.0, 2000.0));
    let log = Recorder::default();
    let mut observer = ScrollObserver::new();
    observer.register(
        ObservedRegion::new(trigger, threshold("top 80%"), threshold("top 30%"))
            .with_listener(log.clone()),
    );
    observer.refresh(&tree, viewport());

    observer.update(0.0);
    observer.update(1250.0);
    observer.update(0.0);
    assert_eq!(
        *log.0.borrow(),
        vec!["progress 0", "enter", "progress 0.5", "progress 0", "leave_back"]
    );
}

#[test]
fn unregistered_regions_stop_reporting() {
    let (_, mut observer, id) = setup();
    assert!(observer.unregister(id));
    assert!(!observer.unregister(id));
    assert!(observer.is_empty());
    assert!(observer.update(1200.0).is_empty());
    assert_eq!(observer.progress(id), None);
}
