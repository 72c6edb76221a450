use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::foundation::core::{Length, Rect, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::nav::header::HEADER_LINKS;
use crate::nav::overlay::OverlayConfig;
use crate::reveal::builtin;
use crate::reveal::recipe::RevealRecipe;
use crate::scroll::driver::SmoothScrollConfig;

/// Group that receives the contact form's send-icon launch.
pub const SEND_ICON_GROUP: &str = "send_icon";

/// A full page: viewport, scroll physics and the sections stacked top to bottom.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub smooth_scroll: SmoothScrollConfig,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default = "default_header_links")]
    pub header_links: Vec<String>,
    pub sections: Vec<SectionDef>,
}

fn default_header_links() -> Vec<String> {
    HEADER_LINKS.iter().map(|s| (*s).to_owned()).collect()
}

/// Either the name of a built-in recipe or a recipe spelled out inline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RecipeSource {
    Builtin(String),
    Inline(Box<RevealRecipe>),
}

impl RecipeSource {
    pub fn resolve(&self) -> ScrollworkResult<RevealRecipe> {
        match self {
            Self::Builtin(name) => builtin::recipe(name).ok_or_else(|| {
                ScrollworkError::config(format!("unknown built-in recipe '{name}'"))
            }),
            Self::Inline(recipe) => Ok((**recipe).clone()),
        }
    }
}

/// One section of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionDef {
    /// Anchor name used by navigation and the active-section tracker.
    pub id: String,
    pub recipe: RecipeSource,
    /// `px` or `vh`.
    #[serde(with = "length_str")]
    pub height: Length,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupDef>,
}

/// Elements of one target group. Exactly one of `count` and `label` is set.
///
/// `rect` is relative to the section's top-left corner and defaults to the whole section.
/// Members are laid out left to right across it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Split into one element per character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
}

impl GroupDef {
    pub fn count(n: usize) -> Self {
        Self {
            count: Some(n),
            ..Self::default()
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            label: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    fn validate(&self, section: &str, name: &str) -> ScrollworkResult<()> {
        let err = |msg: &str| {
            Err(ScrollworkError::config(format!(
                "group '{name}' of section '{section}' {msg}"
            )))
        };
        match (self.count, self.label.as_deref()) {
            (Some(0), None) => return err("has count 0"),
            (Some(_), None) => {}
            (None, Some(label)) if label.is_empty() => return err("has an empty label"),
            (None, Some(_)) => {}
            _ => return err("must set exactly one of count and label"),
        }
        if let Some(r) = self.rect
            && !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite())
        {
            return err("has a non-finite rect");
        }
        Ok(())
    }
}

impl SectionDef {
    pub fn new(id: impl Into<String>, recipe: RecipeSource, height: Length) -> Self {
        Self {
            id: id.into(),
            recipe,
            height,
            groups: BTreeMap::new(),
        }
    }

    pub fn group(mut self, name: impl Into<String>, def: GroupDef) -> Self {
        self.groups.insert(name.into(), def);
        self
    }

    /// Section height in pixels for `viewport`.
    pub fn height_px(&self, viewport: Viewport) -> f64 {
        self.height.resolve(viewport, 0.0)
    }

    fn validate(&self, viewport: Viewport) -> ScrollworkResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrollworkError::config("section id must be non-empty"));
        }
        if matches!(self.height, Length::Percent(_)) {
            return Err(ScrollworkError::config(format!(
                "section '{}' height must be px or vh",
                self.id
            )));
        }
        let h = self.height_px(viewport);
        if !(h.is_finite() && h > 0.0) {
            return Err(ScrollworkError::config(format!(
                "section '{}' height must be > 0",
                self.id
            )));
        }
        for (name, group) in &self.groups {
            group.validate(&self.id, name)?;
        }

        let recipe = self.recipe.resolve()?;
        recipe
            .validate()
            .map_err(|e| {
                ScrollworkError::config(format!("section '{}' recipe: {e}", self.id))
            })?;
        for group in recipe.groups() {
            if !self.groups.contains_key(group) {
                return Err(ScrollworkError::config(format!(
                    "section '{}' recipe animates group '{group}' which the section does not define",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

impl PageConfig {
    pub fn validate(&self) -> ScrollworkResult<()> {
        let viewport = Viewport::new(self.viewport.width, self.viewport.height)
            .map_err(|e| ScrollworkError::config(format!("page viewport: {e}")))?;
        self.smooth_scroll.validate()?;
        if self.sections.is_empty() {
            return Err(ScrollworkError::config("page must have at least one section"));
        }
        let mut seen = BTreeSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(ScrollworkError::config(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            section.validate(viewport)?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> ScrollworkResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScrollworkResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ScrollworkError::config(format!("read page config '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Sum of every section height.
    pub fn document_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.height_px(self.viewport))
            .sum()
    }

    /// The eight-section studio site at a 1440x900 viewport.
    pub fn studio() -> Self {
        let builtin = |name: &str| RecipeSource::Builtin(name.to_owned());
        let title = |text: &str| GroupDef::label(text).at(Rect::new(80.0, 120.0, 1000.0, 240.0));
        let subtitle = || GroupDef::count(1).at(Rect::new(80.0, 260.0, 700.0, 300.0));

        let sections = vec![
            SectionDef::new("hero", builtin("hero"), Length::Vh(100.0))
                .group("grid", GroupDef::count(1))
                .group(
                    "brand",
                    GroupDef::count(1).at(Rect::new(0.0, 198.0, 1440.0, 351.0)),
                )
                .group(
                    "brand_chars",
                    GroupDef::label("Code De Luxe").at(Rect::new(250.0, 198.0, 1190.0, 351.0)),
                )
                .group(
                    "terminal",
                    GroupDef::count(1).at(Rect::new(370.0, 420.0, 1070.0, 780.0)),
                )
                .group("cta", GroupDef::count(1).at(Rect::new(80.0, 800.0, 320.0, 850.0)))
                .group("float", GroupDef::count(1).at(Rect::new(370.0, 420.0, 1070.0, 780.0))),
            SectionDef::new("about", builtin("about"), Length::Vh(100.0))
                .group(
                    "heading_lines",
                    GroupDef::count(3).at(Rect::new(72.0, 160.0, 640.0, 400.0)),
                )
                .group(
                    "paragraphs",
                    GroupDef::count(2).at(Rect::new(72.0, 420.0, 640.0, 560.0)),
                )
                .group("stats", GroupDef::count(4).at(Rect::new(72.0, 600.0, 640.0, 680.0)))
                .group(
                    "geometric",
                    GroupDef::count(1).at(Rect::new(648.0, 0.0, 1440.0, 900.0)),
                )
                .group("ctas", GroupDef::count(2).at(Rect::new(72.0, 720.0, 500.0, 770.0))),
            SectionDef::new("work", builtin("portfolio"), Length::Px(1400.0))
                .group("title", title("Selected Work"))
                .group("subtitle", subtitle())
                .group("items", GroupDef::count(5).at(Rect::new(80.0, 360.0, 1360.0, 1300.0))),
            SectionDef::new("services", builtin("services"), Length::Px(1200.0))
                .group("title", title("Services"))
                .group("subtitle", subtitle())
                .group("cards", GroupDef::count(4).at(Rect::new(80.0, 360.0, 1360.0, 1000.0))),
            SectionDef::new("process", builtin("process"), Length::Px(1300.0))
                .group("title", title("Process"))
                .group("subtitle", subtitle())
                .group("steps", GroupDef::count(5).at(Rect::new(80.0, 500.0, 1360.0, 900.0)))
                .group(
                    "connectors",
                    GroupDef::count(4).at(Rect::new(200.0, 690.0, 1240.0, 710.0)),
                )
                .group("return", GroupDef::count(1).at(Rect::new(80.0, 1000.0, 400.0, 1060.0))),
            SectionDef::new("testimonials", builtin("testimonials"), Length::Px(1200.0))
                .group("title", title("The Log"))
                .group("subtitle", subtitle())
                .group(
                    "terminal",
                    GroupDef::count(1).at(Rect::new(80.0, 360.0, 1360.0, 1100.0)),
                )
                .group(
                    "log_entries",
                    GroupDef::count(5).at(Rect::new(120.0, 420.0, 1320.0, 1000.0)),
                )
                .group(
                    "footer_line",
                    GroupDef::count(1).at(Rect::new(120.0, 1040.0, 1320.0, 1060.0)),
                ),
            SectionDef::new("partners", builtin("partners"), Length::Vh(100.0))
                .group("title", title("Partners"))
                .group("subtitle", subtitle())
                .group("logos", GroupDef::count(6).at(Rect::new(80.0, 360.0, 1360.0, 560.0)))
                .group("metrics", GroupDef::count(3).at(Rect::new(80.0, 620.0, 1360.0, 720.0)))
                .group(
                    "background_text",
                    GroupDef::count(1).at(Rect::new(0.0, 300.0, 1440.0, 700.0)),
                ),
            SectionDef::new("contact", builtin("contact"), Length::Px(1400.0))
                .group(
                    "title",
                    GroupDef::label("Let's build something great.")
                        .at(Rect::new(80.0, 120.0, 1200.0, 240.0)),
                )
                .group("subtitle", subtitle())
                .group("items", GroupDef::count(3).at(Rect::new(80.0, 360.0, 560.0, 640.0)))
                .group(
                    "form_fields",
                    GroupDef::count(5).at(Rect::new(640.0, 360.0, 1360.0, 1000.0)),
                )
                .group("submit", GroupDef::count(1).at(Rect::new(640.0, 1040.0, 960.0, 1100.0)))
                .group(
                    SEND_ICON_GROUP,
                    GroupDef::count(1).at(Rect::new(900.0, 1062.0, 916.0, 1078.0)),
                )
                .group(
                    "footer_items",
                    GroupDef::count(3).at(Rect::new(80.0, 1300.0, 1360.0, 1340.0)),
                ),
        ];

        Self {
            viewport: Viewport {
                width: 1440.0,
                height: 900.0,
            },
            smooth_scroll: SmoothScrollConfig::default(),
            reduced_motion: false,
            overlay: OverlayConfig::default(),
            header_links: default_header_links(),
            sections,
        }
    }
}

mod length_str {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::foundation::core::Length;

    pub fn serialize<S: Serializer>(length: &Length, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(length)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Length, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
