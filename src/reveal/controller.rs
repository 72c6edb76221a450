use std::collections::BTreeMap;

use crate::animation::timeline::{
    Position, PropertyTween, Timeline, TimelineDefaults, TimelineKind, TweenOpts,
};
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::reveal::recipe::{RevealRecipe, RevealStep, TimedSteps};
use crate::runtime::session::{AnimationRuntime, ScrubOpts, TimelineId};
use crate::scene::tree::{ElementId, RenderTree};
use crate::scroll::observer::{ObservedRegion, RegionId};

/// The elements one section put into the render tree, grouped by name.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    root: ElementId,
    groups: BTreeMap<String, Vec<ElementId>>,
}

impl SectionLayout {
    pub fn new(root: ElementId) -> Self {
        Self {
            root,
            groups: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, name: impl Into<String>, ids: Vec<ElementId>) -> Self {
        self.groups.insert(name.into(), ids);
        self
    }

    pub fn insert_group(&mut self, name: impl Into<String>, ids: Vec<ElementId>) {
        self.groups.insert(name.into(), ids);
    }

    /// The section element itself.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn group(&self, name: &str) -> Option<&[ElementId]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Root first, then every group member.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::once(self.root).chain(self.groups.values().flatten().copied())
    }

    /// Remove every element of the section from `tree`.
    pub fn remove_from(&self, tree: &mut RenderTree) {
        for id in self.elements() {
            tree.remove(id);
        }
    }
}

fn build_timeline(
    kind: TimelineKind,
    steps: &[RevealStep],
    defaults: TimelineDefaults,
    tree: &RenderTree,
    viewport: Viewport,
    layout: &SectionLayout,
) -> ScrollworkResult<Timeline> {
    let mut timeline = Timeline::new(kind, defaults);
    for step in steps {
        let targets = layout.group(&step.group).ok_or_else(|| {
            ScrollworkError::validation(format!("unknown target group '{}'", step.group))
        })?;
        let base = timeline.time_of(step.position);
        let count = targets.len();

        for (index, &target) in targets.iter().enumerate() {
            let Some(rect) = tree.rect(target) else {
                tracing::debug!(?target, group = %step.group, "reveal target missing; skipped");
                continue;
            };
            let props = step
                .to
                .iter()
                .map(|(&property, to)| {
                    let from = match step.from_odd.get(&property) {
                        Some(odd) if index % 2 == 1 => Some(odd),
                        _ => step.from.get(&property),
                    };
                    Ok(PropertyTween {
                        property,
                        from: from
                            .map(|v| v.resolve(property, viewport, rect.height()))
                            .transpose()?,
                        to: to.resolve(property, viewport, rect.height())?,
                    })
                })
                .collect::<ScrollworkResult<Vec<_>>>()?;

            let start = base + step.stagger.map_or(0.0, |s| s.offset(index, count));
            timeline.tween(
                tree,
                &[target],
                &props,
                Position::At(start),
                TweenOpts {
                    duration: step.duration,
                    ease: step.ease,
                    stagger: None,
                },
            )?;
        }
    }
    Ok(timeline)
}

fn build_timed(
    timed: Option<&TimedSteps>,
    tree: &RenderTree,
    viewport: Viewport,
    layout: &SectionLayout,
) -> ScrollworkResult<Option<Timeline>> {
    timed
        .map(|t| {
            build_timeline(
                TimelineKind::WallClock,
                &t.steps,
                t.defaults,
                tree,
                viewport,
                layout,
            )
        })
        .transpose()
}

/// A mounted [`RevealRecipe`]: its region, its scrubbed timeline and any wall-clock timelines.
#[derive(Debug)]
pub struct RevealController {
    name: String,
    region: Option<RegionId>,
    scrubbed: Option<TimelineId>,
    entrance: Option<TimelineId>,
    idle: Option<TimelineId>,
    mounted: bool,
}

impl RevealController {
    /// Build every timeline of `recipe` against `layout`, register the trigger region and bind
    /// the scrubbed timeline to it, then start the entrance and idle timelines.
    ///
    /// Nothing is registered when the recipe or layout is invalid.
    #[tracing::instrument(skip(runtime, recipe, layout))]
    pub fn mount(
        runtime: &mut AnimationRuntime,
        name: &str,
        recipe: &RevealRecipe,
        layout: &SectionLayout,
    ) -> ScrollworkResult<Self> {
        recipe.validate()?;
        let trigger = match &recipe.trigger {
            Some(group) => layout
                .group(group)
                .and_then(|ids| ids.first().copied())
                .ok_or_else(|| {
                    ScrollworkError::validation(format!(
                        "trigger group '{group}' of section '{name}' is empty or unknown"
                    ))
                })?,
            None => layout.root(),
        };

        let viewport = runtime.viewport();
        let tree = runtime.tree();
        let scrubbed = if recipe.steps.is_empty() {
            None
        } else {
            Some(build_timeline(
                TimelineKind::Scrubbed,
                &recipe.steps,
                recipe.defaults,
                tree,
                viewport,
                layout,
            )?)
        };
        let entrance = build_timed(recipe.entrance.as_ref(), tree, viewport, layout)?;
        let idle = build_timed(recipe.idle.as_ref(), tree, viewport, layout)?;

        let mut controller = Self {
            name: name.to_owned(),
            region: None,
            scrubbed: None,
            entrance: None,
            idle: None,
            mounted: true,
        };

        if let Some(timeline) = scrubbed {
            let tl = runtime.add_timeline(timeline);
            let region =
                runtime.register_region(ObservedRegion::new(trigger, recipe.start, recipe.end));
            controller.scrubbed = Some(tl);
            controller.region = Some(region);
            runtime.bind_scrub(
                tl,
                region,
                ScrubOpts {
                    mode: recipe.scrub,
                    immediate_render: recipe.immediate_render,
                    rest: recipe.rest_progress(),
                },
            )?;
        }
        if let Some(timeline) = entrance {
            let tl = runtime.add_timeline(timeline);
            runtime.play_timeline(tl);
            controller.entrance = Some(tl);
        }
        if let Some(timeline) = idle {
            let tl = runtime.add_timeline(timeline);
            runtime.play_timeline(tl);
            controller.idle = Some(tl);
        }

        tracing::debug!(
            section = name,
            region = ?controller.region,
            "reveal mounted"
        );
        Ok(controller)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    pub fn scrubbed_timeline(&self) -> Option<TimelineId> {
        self.scrubbed
    }

    pub fn entrance_timeline(&self) -> Option<TimelineId> {
        self.entrance
    }

    pub fn idle_timeline(&self) -> Option<TimelineId> {
        self.idle
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Unregister the region and cancel every timeline. Idempotent.
    pub fn unmount(&mut self, runtime: &mut AnimationRuntime) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        for tl in [self.scrubbed, self.entrance, self.idle].into_iter().flatten() {
            runtime.cancel_timeline(tl);
        }
        if let Some(region) = self.region {
            runtime.unregister_region(region);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/controller.rs"]
mod tests;
