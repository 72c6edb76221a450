use crate::animation::value::{Property, Value};
use crate::foundation::core::Rect;
use crate::scene::style::Style;

/// Generational handle to an element in a [`RenderTree`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

/// One render target.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Element {
    /// Page-space geometry (y grows downwards from the top of the document).
    pub rect: Rect,
    /// Current visual state.
    pub style: Style,
    /// Source character when the element was produced by splitting a label.
    pub glyph: Option<char>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena of render targets owned by the page.
#[derive(Clone, Debug, Default)]
pub struct RenderTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    writes: u64,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rect: Rect) -> ElementId {
        self.insert_element(Element {
            rect,
            style: Style::default(),
            glyph: None,
        })
    }

    /// Split `label` into one element per character, laid out left to right across `rect`.
    pub fn insert_label(&mut self, label: &str, rect: Rect) -> Vec<ElementId> {
        let count = label.chars().count();
        if count == 0 {
            return Vec::new();
        }
        let advance = rect.width() / count as f64;
        label
            .chars()
            .enumerate()
            .map(|(i, glyph)| {
                let x0 = rect.x0 + advance * i as f64;
                self.insert_element(Element {
                    rect: Rect::new(x0, rect.y0, x0 + advance, rect.y1),
                    style: Style::default(),
                    glyph: Some(glyph),
                })
            })
            .collect()
    }

    fn insert_element(&mut self, element: Element) -> ElementId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.element = Some(element);
            return ElementId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementId {
            index,
            generation: 0,
        }
    }

    /// Remove an element. Returns `false` if the handle was already stale.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation || slot.element.is_none() {
            return false;
        }
        slot.element = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        true
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.get(id).map(|e| &e.style)
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|e| e.rect)
    }

    /// Move an element, e.g. after a layout change. Returns `false` for stale handles.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.get_mut(id) {
            Some(e) => {
                e.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Write one property. Returns `false` (and writes nothing) for stale handles.
    pub fn write(&mut self, id: ElementId, prop: Property, value: Value) -> bool {
        let Some(e) = self.get_mut(id) else {
            return false;
        };
        e.style.set(prop, value);
        self.writes += 1;
        true
    }

    /// Total number of successful property writes since creation.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.element.as_ref().map(|e| {
                (
                    ElementId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    e,
                )
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tree.rs"]
mod tests;
