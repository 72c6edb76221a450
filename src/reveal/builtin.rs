//! Reveal recipes of the studio page sections.

use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::{Repeat, TimelineDefaults};
use crate::animation::value::Property::{
    Blur, BorderColor, Color, Opacity, RotateX, RotateY, Scale, ScaleX, ScaleY, SkewX, X, Y, Z,
};
use crate::foundation::core::{Length, Rgba8};
use crate::reveal::recipe::{RevealRecipe, RevealStep};
use crate::runtime::session::ScrubMode;
use crate::scroll::observer::{Anchor, Threshold};

/// Section names in page order.
pub const SECTIONS: [&str; 8] = [
    "hero",
    "about",
    "portfolio",
    "services",
    "process",
    "testimonials",
    "partners",
    "contact",
];

const SECTION_LAG: f64 = 1.2;
const HERO_LAG: f64 = 1.5;

/// Look up a built-in recipe by section name.
pub fn recipe(name: &str) -> Option<RevealRecipe> {
    Some(match name {
        "hero" => hero(),
        "about" => about(),
        "portfolio" => portfolio(),
        "services" => services(),
        "process" => process(),
        "testimonials" => testimonials(),
        "partners" => partners(),
        "contact" => contact(),
        _ => return None,
    })
}

/// Scrubbed from "top 80%" to "top {end}%" with the site-wide scrub lag.
fn section(end_percent: f64) -> RevealRecipe {
    RevealRecipe::new(
        Threshold::new(Anchor::TOP, Anchor::Percent(80.0)),
        Threshold::new(Anchor::TOP, Anchor::Percent(end_percent)),
    )
    .scrub(ScrubMode::Smoothed { lag: SECTION_LAG })
}

fn rise(group: &str, y: f64, at: f64) -> RevealStep {
    RevealStep::new(group)
        .tween(Opacity, 0.0, 1.0)
        .tween(Y, y, 0.0)
        .ease(Ease::OutCubic)
        .at(at)
}

fn slide(group: &str, x: f64, at: f64) -> RevealStep {
    RevealStep::new(group)
        .tween(Opacity, 0.0, 1.0)
        .tween(X, x, 0.0)
        .ease(Ease::OutCubic)
        .at(at)
}

/// Per-character title flip: rise, unfold around X and unblur.
fn title_chars(y: f64, blur: f64, each: f64) -> RevealStep {
    RevealStep::new("title")
        .tween(Opacity, 0.0, 1.0)
        .tween(Y, y, 0.0)
        .tween(RotateX, -90.0, 0.0)
        .tween(Blur, blur, 0.0)
        .stagger(Stagger::new(each))
        .ease(Ease::OutQuart)
        .at(0.0)
}

pub fn hero() -> RevealRecipe {
    let entrance = vec![
        RevealStep::new("grid")
            .tween(Opacity, 0.0, 0.4)
            .duration(1.5)
            .ease(Ease::InOutCubic)
            .at(0.0),
        RevealStep::new("terminal")
            .tween(Opacity, 0.0, 1.0)
            .tween(Y, 60.0, 0.0)
            .tween(Scale, 0.95, 1.0)
            .tween(RotateX, 15.0, 0.0)
            .at(0.2),
        RevealStep::new("brand_chars")
            .tween(Opacity, 0.0, 1.0)
            .tween(Y, 100.0, 0.0)
            .tween(RotateX, -90.0, 0.0)
            .tween(Blur, 15.0, 0.0)
            .tween(Scale, 1.2, 1.0)
            .duration(1.5)
            .stagger(Stagger::from_center(0.05))
            .ease(Ease::OutExpo)
            .at(0.4),
        RevealStep::new("cta")
            .tween(Opacity, 0.0, 1.0)
            .tween(X, -30.0, 0.0)
            .duration(1.0)
            .ease(Ease::OutQuart)
            .at(1.5),
    ];
    let idle = vec![RevealStep::new("float").tween(Y, 0.0, 10.0).at(0.0)];

    RevealRecipe::new(
        Threshold::new(Anchor::TOP, Anchor::TOP),
        Threshold::new(Anchor::BOTTOM, Anchor::TOP),
    )
    .scrub(ScrubMode::Smoothed { lag: HERO_LAG })
    .deferred()
    .step(
        RevealStep::new("grid")
            .tween(Opacity, 0.4, 0.0)
            .ease(Ease::InQuad)
            .at(0.0),
    )
    .step(
        RevealStep::new("brand")
            .to(Y, Length::Vh(30.0))
            .to(Scale, 0.85)
            .to(Opacity, 0.0)
            .to(Blur, 10.0)
            .ease(Ease::Linear)
            .at(0.0),
    )
    .step(
        RevealStep::new("terminal")
            .to(Y, Length::Vh(-40.0))
            .to(Scale, 1.15)
            .to(RotateX, -15.0)
            .to(RotateY, 5.0)
            .to(Opacity, 0.0)
            .ease(Ease::InCubic)
            .at(0.0),
    )
    .step(
        RevealStep::new("cta")
            .to(Opacity, 0.0)
            .to(X, -100.0)
            .ease(Ease::InCubic)
            .at(0.0),
    )
    .entrance(
        TimelineDefaults {
            ease: Ease::OutQuint,
            duration: 1.4,
            repeat: None,
        },
        entrance,
    )
    .idle(
        TimelineDefaults {
            ease: Ease::InOutQuad,
            duration: 4.0,
            repeat: Some(Repeat {
                count: None,
                yoyo: true,
            }),
        },
        idle,
    )
}

pub fn about() -> RevealRecipe {
    section(30.0)
        .step(
            RevealStep::new("heading_lines")
                .tween(Opacity, 0.0, 1.0)
                .tween(Y, 40.0, 0.0)
                .tween(Blur, 10.0, 0.0)
                .stagger(Stagger::new(0.1))
                .ease(Ease::OutQuart)
                .at(0.0),
        )
        .step(rise("paragraphs", 20.0, 0.3).stagger(Stagger::new(0.1)))
        .step(slide("stats", -20.0, 0.4).stagger(Stagger::new(0.05)))
        .step(
            RevealStep::new("geometric")
                .to(Y, Length::Percent(-15.0))
                .to(Scale, 1.1)
                .ease(Ease::OutCubic)
                .at(0.0),
        )
        .step(rise("ctas", 20.0, 0.6).stagger(Stagger::new(0.1)))
}

pub fn portfolio() -> RevealRecipe {
    section(20.0)
        .step(
            RevealStep::new("title")
                .tween(Opacity, 0.0, 1.0)
                .tween(Y, 60.0, 0.0)
                .tween(RotateX, -45.0, 0.0)
                .tween(Blur, 15.0, 0.0)
                .stagger(Stagger::new(0.02))
                .ease(Ease::OutExpo)
                .at(0.0),
        )
        .step(rise("subtitle", 15.0, 0.1))
        .step(
            RevealStep::new("items")
                .tween(Opacity, 0.0, 1.0)
                .tween(X, -40.0, 0.0)
                .tween(SkewX, 10.0, 0.0)
                .tween(RotateX, 10.0, 0.0)
                .stagger(Stagger::new(0.08))
                .ease(Ease::OutQuart)
                .at(0.2),
        )
        .step(
            RevealStep::new("items")
                .tween(
                    BorderColor,
                    Rgba8::transparent(),
                    Rgba8::white().with_alpha_f64(0.08),
                )
                .stagger(Stagger::new(0.05))
                .ease(Ease::Linear)
                .at(0.2),
        )
}

pub fn services() -> RevealRecipe {
    section(15.0)
        .step(title_chars(40.0, 10.0, 0.02))
        .step(rise("subtitle", 20.0, 0.2))
        .step(
            RevealStep::new("cards")
                .tween(Opacity, 0.0, 1.0)
                .tween(Y, 100.0, 0.0)
                .tween(RotateY, -15.0, 0.0)
                .from_odd(RotateY, 15.0)
                .tween(RotateX, 10.0, 0.0)
                .tween(Scale, 0.9, 1.0)
                .stagger(Stagger::new(0.05))
                .ease(Ease::OutCubic)
                .at(0.1),
        )
}

pub fn process() -> RevealRecipe {
    let glitch_green = Rgba8::new(0x61, 0xdc, 0xa3, 255);
    let text = Rgba8::new(0xf4, 0xf4, 0xf5, 255);
    section(20.0)
        .step(
            RevealStep::new("title")
                .tween(Opacity, 0.0, 1.0)
                .tween(RotateX, -90.0, 0.0)
                .tween(Y, 50.0, 0.0)
                .tween(Z, -200.0, 0.0)
                .tween(Color, glitch_green, text)
                .tween(Blur, 12.0, 0.0)
                .stagger(Stagger::from_center(0.1))
                .duration(1.2)
                .ease(Ease::OutCirc)
                .at(0.0),
        )
        .step(slide("subtitle", -20.0, 0.1))
        .step(
            RevealStep::new("steps")
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.9, 1.0)
                .tween(RotateX, 20.0, 0.0)
                .tween(Y, 40.0, 0.0)
                .stagger(Stagger::new(0.1))
                .ease(Ease::OutQuart)
                .at(0.2),
        )
        .step(
            RevealStep::new("connectors")
                .tween(ScaleX, 0.0, 1.0)
                .stagger(Stagger::new(0.1))
                .ease(Ease::Linear)
                .at(0.3),
        )
        .step(rise("return", 20.0, 0.8).ease(Ease::BACK_OUT))
}

pub fn testimonials() -> RevealRecipe {
    section(20.0)
        .step(title_chars(40.0, 10.0, 0.03))
        .step(slide("subtitle", -20.0, 0.1))
        .step(
            RevealStep::new("terminal")
                .tween(Opacity, 0.0, 1.0)
                .tween(Y, 60.0, 0.0)
                .tween(Scale, 0.95, 1.0)
                .tween(RotateX, 10.0, 0.0)
                .ease(Ease::OutQuint)
                .at(0.2),
        )
        .step(
            RevealStep::new("log_entries")
                .tween(Opacity, 0.0, 1.0)
                .tween(X, -15.0, 0.0)
                .tween(Blur, 4.0, 0.0)
                .stagger(Stagger::new(0.1))
                .ease(Ease::OutCubic)
                .at(0.3),
        )
        .step(
            RevealStep::new("footer_line")
                .tween(Opacity, 0.0, 1.0)
                .ease(Ease::Linear)
                .at(0.9),
        )
}

pub fn partners() -> RevealRecipe {
    section(25.0)
        .step(title_chars(40.0, 10.0, 0.03))
        .step(slide("subtitle", -20.0, 0.1))
        .step(
            RevealStep::new("logos")
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.8, 1.0)
                .tween(RotateY, 45.0, 0.0)
                .tween(RotateX, 10.0, 0.0)
                .stagger(Stagger::new(0.05))
                .ease(Ease::OutCubic)
                .at(0.2),
        )
        .step(rise("metrics", 20.0, 0.5).stagger(Stagger::new(0.1)))
        .step(
            RevealStep::new("background_text")
                .tween(Y, Length::Percent(50.0), Length::Percent(-10.0))
                .tween(Opacity, 0.0, 0.03)
                .ease(Ease::Linear)
                .at(0.0),
        )
}

pub fn contact() -> RevealRecipe {
    section(20.0)
        .step(title_chars(40.0, 10.0, 0.015))
        .step(slide("subtitle", -15.0, 0.2))
        .step(slide("items", -20.0, 0.3).stagger(Stagger::new(0.1)))
        .step(
            RevealStep::new("form_fields")
                .tween(Opacity, 0.0, 1.0)
                .tween(ScaleY, 0.0, 1.0)
                .tween(RotateX, -10.0, 0.0)
                .stagger(Stagger::new(0.08))
                .ease(Ease::OutCubic)
                .at(0.4),
        )
        .step(
            RevealStep::new("submit")
                .tween(Opacity, 0.0, 1.0)
                .tween(Scale, 0.95, 1.0)
                .ease(Ease::BACK_OUT)
                .at(0.8),
        )
        .step(rise("footer_items", 10.0, 0.9).stagger(Stagger::new(0.1)))
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/builtin.rs"]
mod tests;
