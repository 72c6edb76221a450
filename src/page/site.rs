use std::collections::BTreeMap;

use crate::contact::form::{ContactForm, SubmitFlow, SubmitState};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::nav::header::{Header, SectionTracker};
use crate::nav::overlay::{NavigationOverlay, OverlayState};
use crate::page::config::{GroupDef, PageConfig, SEND_ICON_GROUP, SectionDef};
use crate::reveal::controller::{RevealController, SectionLayout};
use crate::runtime::session::AnimationRuntime;
use crate::scene::tree::{ElementId, RenderTree};
use crate::scroll::driver::ScrollInput;

/// What the page looked like after one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageFrame {
    pub now: f64,
    pub offset: f64,
    pub active: Option<String>,
    pub scrolled: bool,
    pub overlay: OverlayState,
    pub submit: SubmitState,
    /// Scroll progress of every section reveal.
    pub progress: BTreeMap<String, f64>,
}

#[derive(Debug)]
struct MountedSection {
    id: String,
    top: f64,
    layout: SectionLayout,
    controller: RevealController,
}

/// Page-space area of a group inside a section spanning `[top, top + height)`.
fn group_area(def: &GroupDef, width: f64, top: f64, height: f64) -> Rect {
    let local = def.rect.unwrap_or(Rect::new(0.0, 0.0, width, height));
    Rect::new(local.x0, top + local.y0, local.x1, top + local.y1)
}

/// `n` equal columns across `area`, left to right.
fn columns(area: Rect, n: usize) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let advance = area.width() / n as f64;
    (0..n)
        .map(|i| {
            let x0 = area.x0 + advance * i as f64;
            Rect::new(x0, area.y0, x0 + advance, area.y1)
        })
        .collect()
}

fn insert_section(
    tree: &mut RenderTree,
    def: &SectionDef,
    width: f64,
    top: f64,
    height: f64,
) -> SectionLayout {
    let root = tree.insert(Rect::new(0.0, top, width, top + height));
    let mut layout = SectionLayout::new(root);
    for (name, group) in &def.groups {
        let area = group_area(group, width, top, height);
        let ids = match (&group.label, group.count) {
            (Some(label), _) => tree.insert_label(label, area),
            (None, count) => columns(area, count.unwrap_or(0))
                .into_iter()
                .map(|r| tree.insert(r))
                .collect(),
        };
        layout.insert_group(name.clone(), ids);
    }
    layout
}

/// A mounted page: one runtime, every section reveal, the header, the menu and the contact form.
pub struct Page {
    config: PageConfig,
    runtime: AnimationRuntime,
    sections: Vec<MountedSection>,
    tracker: SectionTracker,
    header: Header,
    overlay: NavigationOverlay,
    submit: SubmitFlow,
    mounted: bool,
}

impl Page {
    #[tracing::instrument(skip(config), fields(sections = config.sections.len()))]
    pub fn mount(config: PageConfig) -> ScrollworkResult<Self> {
        config.validate()?;
        let viewport = config.viewport;
        let mut runtime = AnimationRuntime::new(
            viewport,
            config.document_height(),
            config.smooth_scroll,
        )?;
        runtime.set_reduced_motion(config.reduced_motion);

        let links: Vec<ElementId> = config
            .header_links
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let x = viewport.width - 120.0 * (config.header_links.len() - i) as f64;
                runtime.tree_mut().insert(Rect::new(x, 24.0, x + 100.0, 48.0))
            })
            .collect();
        let header = Header::mount(&mut runtime, links)?;

        let mut sections = Vec::with_capacity(config.sections.len());
        let mut tracker = SectionTracker::new();
        let mut send_icon = None;
        let mut top = 0.0;
        for def in &config.sections {
            let height = def.height_px(viewport);
            let layout = insert_section(runtime.tree_mut(), def, viewport.width, top, height);
            let recipe = def.recipe.resolve()?;
            let controller = RevealController::mount(&mut runtime, &def.id, &recipe, &layout)?;
            tracker.track(&mut runtime, def.id.clone(), layout.root());
            if send_icon.is_none() {
                send_icon = layout.group(SEND_ICON_GROUP).and_then(|ids| ids.first().copied());
            }
            sections.push(MountedSection {
                id: def.id.clone(),
                top,
                layout,
                controller,
            });
            top += height;
        }

        let overlay = NavigationOverlay::new(config.overlay.clone());
        tracing::info!(
            document_height = runtime.document_height(),
            elements = runtime.tree().len(),
            "page mounted"
        );
        Ok(Self {
            config,
            runtime,
            sections,
            tracker,
            header,
            overlay,
            submit: SubmitFlow::new(send_icon),
            mounted: true,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn runtime(&self) -> &AnimationRuntime {
        &self.runtime
    }

    pub fn active_section(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit.state()
    }

    pub fn is_scrolled(&self) -> bool {
        self.header.is_scrolled()
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.iter().map(|s| s.id.as_str())
    }

    /// Document offset of a section's top edge.
    pub fn section_top(&self, id: &str) -> Option<f64> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.top)
    }

    pub fn section_layout(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id).map(|s| &s.layout)
    }

    pub fn push_input(&mut self, input: ScrollInput) {
        self.runtime.push_input(input);
    }

    pub fn frame(&mut self, now: f64) -> PageFrame {
        let report = self.runtime.frame(now);
        self.tracker.observe(&report.events);
        self.header.update(report.offset);
        self.overlay.on_frame(&mut self.runtime, &report);
        self.submit.on_frame(&mut self.runtime, &report);

        let progress = self
            .sections
            .iter()
            .filter_map(|s| {
                let region = s.controller.region()?;
                Some((s.id.clone(), self.runtime.observer().progress(region)?))
            })
            .collect();
        PageFrame {
            now,
            offset: report.offset,
            active: self.tracker.active().map(str::to_owned),
            scrolled: self.header.is_scrolled(),
            overlay: self.overlay.state(),
            submit: self.submit.state(),
            progress,
        }
    }

    pub fn open_menu(&mut self) -> ScrollworkResult<bool> {
        self.overlay.open(&mut self.runtime)
    }

    pub fn close_menu(&mut self) -> ScrollworkResult<bool> {
        self.overlay.close(&mut self.runtime)
    }

    /// Scroll to a section, closing the menu first when it is showing.
    pub fn navigate(&mut self, id: &str) -> ScrollworkResult<()> {
        let top = self
            .section_top(id)
            .ok_or_else(|| ScrollworkError::validation(format!("unknown section '{id}'")))?;
        self.overlay.navigate(&mut self.runtime, top)
    }

    pub fn submit_contact(&mut self, form: &ContactForm) -> ScrollworkResult<bool> {
        self.submit.submit(&mut self.runtime, form)
    }

    /// Re-layout every section for a new viewport and re-measure every region.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) -> ScrollworkResult<()> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        self.config.viewport = viewport;
        let mut top = 0.0;
        for (def, mounted) in self.config.sections.iter().zip(&mut self.sections) {
            let height = def.height_px(viewport);
            mounted.top = top;
            let tree = self.runtime.tree_mut();
            tree.set_rect(
                mounted.layout.root(),
                Rect::new(0.0, top, viewport.width, top + height),
            );
            for (name, group) in &def.groups {
                let Some(ids) = mounted.layout.group(name) else {
                    continue;
                };
                let rects = columns(group_area(group, viewport.width, top, height), ids.len());
                for (id, rect) in ids.iter().zip(rects) {
                    tree.set_rect(*id, rect);
                }
            }
            top += height;
        }
        self.runtime.resize(viewport, top);
        Ok(())
    }

    /// Tear everything down. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.overlay.unmount(&mut self.runtime);
        self.submit.cancel(&mut self.runtime);
        self.header.unmount(&mut self.runtime);
        for id in self.header.links() {
            self.runtime.tree_mut().remove(*id);
        }
        self.tracker.clear(&mut self.runtime);
        for section in &mut self.sections {
            section.controller.unmount(&mut self.runtime);
            section.layout.remove_from(self.runtime.tree_mut());
        }
        self.runtime.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/site.rs"]
mod tests;
