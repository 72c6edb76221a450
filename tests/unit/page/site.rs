use super::*;
use crate::animation::timeline::PlaybackState;
use crate::contact::form::Field;

fn studio() -> Page {
    Page::mount(PageConfig::studio()).unwrap()
}

fn run(page: &mut Page, times: &[f64]) -> PageFrame {
    let mut last = None;
    for &t in times {
        last = Some(page.frame(t));
    }
    last.unwrap()
}

#[test]
fn mount_stacks_sections_and_registers_regions() {
    let page = studio();
    assert_eq!(
        page.section_ids().collect::<Vec<_>>(),
        vec![
            "hero",
            "about",
            "work",
            "services",
            "process",
            "testimonials",
            "partners",
            "contact"
        ]
    );
    assert_eq!(page.section_top("work"), Some(1800.0));
    assert_eq!(page.section_top("contact"), Some(7800.0));
    assert_eq!(page.section_top("footer"), None);
    // one reveal region and one tracking region per section
    assert_eq!(page.runtime().observer().len(), 16);
    assert_eq!(page.active_section(), Some("hero"));
    assert_eq!(page.runtime().document_height(), 9200.0);

    let brand = page.section_layout("hero").unwrap().group("brand_chars").unwrap();
    assert_eq!(brand.len(), "Code De Luxe".len());
}

#[test]
fn first_frame_reports_initial_state() {
    let mut page = studio();
    let frame = page.frame(0.0);
    assert_eq!(frame.offset, 0.0);
    assert_eq!(frame.active.as_deref(), Some("hero"));
    assert!(!frame.scrolled);
    assert_eq!(frame.overlay, OverlayState::Closed);
    assert_eq!(frame.submit, SubmitState::Idle);
    assert_eq!(frame.progress["about"], 0.0);
    assert_eq!(frame.progress.len(), 8);
}

#[test]
fn navigating_scrolls_and_updates_active_section() {
    let mut page = studio();
    page.frame(0.0);
    page.navigate("services").unwrap();
    let frame = run(&mut page, &[0.1, 0.6, 2.0]);
    assert_eq!(frame.offset, 3200.0);
    assert_eq!(frame.active.as_deref(), Some("services"));
    assert!(frame.scrolled);
    assert_eq!(frame.progress["about"], 1.0);
    assert!(page.navigate("footer").is_err());
}

#[test]
fn menu_link_closes_before_scrolling() {
    let mut page = studio();
    page.frame(0.0);
    assert!(page.open_menu().unwrap());
    let frame = run(&mut page, &[1.0, 1.5]);
    assert_eq!(frame.overlay, OverlayState::Open);

    page.navigate("contact").unwrap();
    assert_eq!(page.overlay_state(), OverlayState::Closing);
    assert_eq!(page.runtime().scroll_state().raw_offset, 0.0);

    let frame = run(&mut page, &[1.6, 2.0]);
    assert_eq!(frame.overlay, OverlayState::Closed);
    assert_eq!(page.runtime().scroll_state().raw_offset, 7800.0);
    let frame = run(&mut page, &[2.5, 4.0]);
    assert_eq!(frame.offset, 7800.0);
    assert_eq!(frame.active.as_deref(), Some("contact"));
}

#[test]
fn contact_submit_settles() {
    let mut page = studio();
    let mut form = ContactForm::default();
    form.set(Field::Name, "Grace").unwrap();
    form.set(Field::Email, "grace@navy.mil").unwrap();
    form.set(Field::Message, "Hello").unwrap();

    page.frame(0.0);
    assert!(page.submit_contact(&form).unwrap());
    assert!(!page.submit_contact(&form).unwrap());
    let frame = run(&mut page, &[0.5, 1.0, 1.5, 2.0]);
    assert_eq!(frame.submit, SubmitState::Submitted);
}

#[test]
fn reduced_motion_completes_the_hero_entrance() {
    let mut config = PageConfig::studio();
    config.reduced_motion = true;
    let page = Page::mount(config).unwrap();
    let entrance = page.sections[0].controller.entrance_timeline().unwrap();
    assert_eq!(
        page.runtime().timeline_state(entrance),
        Some(PlaybackState::Completed)
    );
}

#[test]
fn resize_relayouts_vh_sections() {
    let mut page = studio();
    page.resize(Viewport::new(1000.0, 800.0).unwrap()).unwrap();
    assert_eq!(page.section_top("about"), Some(800.0));
    assert_eq!(page.section_top("work"), Some(1600.0));
    assert_eq!(page.runtime().document_height(), 8900.0);

    let tree = page.runtime().tree();
    let work = page.section_layout("work").unwrap();
    assert_eq!(tree.rect(work.root()).unwrap().y0, 1600.0);
    let first_char = work.group("title").unwrap()[0];
    assert_eq!(tree.rect(first_char).unwrap().y0, 1720.0);
    assert!(page.resize(Viewport { width: 0.0, height: 1.0 }).is_err());
}

#[test]
fn unmount_releases_everything() {
    let mut page = studio();
    page.frame(0.0);
    page.open_menu().unwrap();
    page.unmount();
    page.unmount();
    assert!(page.runtime().tree().is_empty());
    assert!(page.runtime().observer().is_empty());
    assert!(page.runtime().is_disposed());
    assert_eq!(page.overlay_state(), OverlayState::Closed);
}
