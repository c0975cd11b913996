//! # Style Composition
//!
//! Pure functions turning a block's common style fields into a
//! [`StyleDescriptor`]. Three independent layers are composed, never
//! overwritten:
//!
//! - [`wrapper_style`]: custom background, border, shadow, padding, opacity
//! - [`animation_style`]: the continuous animation (`animation` field)
//! - [`entrance_style`]: the one-shot entrance animation
//!
//! Animation declarations are kept as a list and rendered as a single
//! comma-separated `animation` property, so a looping animation and an
//! entrance animation can both be active on the same block.

use portyo_model::{AnimationTrigger, Block, ShadowPreset};
use std::collections::BTreeMap;

const DEFAULT_BORDER_COLOR: &str = "#E5E7EB";
const DEFAULT_BORDER_RADIUS: f64 = 12.0;
const DEFAULT_ANIMATION_SPEED: &str = "1s";
const ENTRANCE_DURATION: &str = "0.6s";

/// Which layer an animation declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Continuous,
    Entrance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDecl {
    pub kind: AnimationKind,
    pub value: String,
}

/// Renderable style: CSS properties plus animation declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub properties: BTreeMap<String, String>,
    pub animations: Vec<AnimationDecl>,
}

impl StyleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.animations.is_empty()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Compose `other` into `self`: its properties win on conflict, its
    /// animations are appended.
    pub fn merge(&mut self, other: StyleDescriptor) {
        self.properties.extend(other.properties);
        self.animations.extend(other.animations);
    }

    /// Remove and return the continuous animation value, if any.
    pub fn take_continuous(&mut self) -> Option<String> {
        let index = self
            .animations
            .iter()
            .position(|a| a.kind == AnimationKind::Continuous)?;
        Some(self.animations.remove(index).value)
    }

    /// The `animation` shorthand for every declaration, comma-separated.
    pub fn animation_value(&self) -> Option<String> {
        if self.animations.is_empty() {
            return None;
        }
        Some(
            self.animations
                .iter()
                .map(|a| a.value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Flatten into CSS properties.
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        let mut properties = self.properties.clone();
        if let Some(animation) = self.animation_value() {
            properties.insert("animation".to_string(), animation);
        }
        properties
    }
}

/// Custom wrapper styles. Empty unless at least one of `blockBackground`,
/// `blockBorderWidth`, `blockShadow`, `blockPadding` or `blockOpacity` is set.
pub fn wrapper_style(block: &Block) -> StyleDescriptor {
    let style = block.style();
    let mut descriptor = StyleDescriptor::new();

    if !style.has_custom_wrapper() {
        return descriptor;
    }

    descriptor.set(
        "background-color",
        style.block_background.as_deref().unwrap_or("transparent"),
    );
    descriptor.set("color", style.text_color.as_deref().unwrap_or("inherit"));
    descriptor.set(
        "border-radius",
        px(style.block_border_radius.unwrap_or(DEFAULT_BORDER_RADIUS)),
    );
    descriptor.set("padding", px(style.block_padding.unwrap_or(0.0)));
    descriptor.set("opacity", opacity_fraction(style.block_opacity));
    descriptor.set("transition", "all 0.2s ease");

    if let Some(width) = style.block_border_width.filter(|w| *w > 0.0) {
        descriptor.set(
            "border",
            format!(
                "{} solid {}",
                px(width),
                style.block_border_color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR)
            ),
        );
    }

    if let Some(shadow) = style.block_shadow.and_then(shadow_value) {
        descriptor.set("box-shadow", shadow);
    }

    descriptor
}

/// Continuous animation declaration. Repeats forever for the `loop` trigger
/// (the default) and once otherwise. Hover gating is left to the caller.
pub fn animation_style(block: &Block) -> StyleDescriptor {
    let style = block.style();
    let mut descriptor = StyleDescriptor::new();

    let Some(name) = style.active_animation() else {
        return descriptor;
    };

    let speed = style
        .animation_speed
        .as_deref()
        .unwrap_or(DEFAULT_ANIMATION_SPEED);
    let iterations = match style.trigger() {
        AnimationTrigger::Loop => "infinite",
        AnimationTrigger::Once | AnimationTrigger::Hover => "1",
    };

    descriptor.animations.push(AnimationDecl {
        kind: AnimationKind::Continuous,
        value: format!("{} {} ease-in-out {}", name, speed, iterations),
    });
    descriptor
}

/// One-shot entrance animation with the block's start delay.
pub fn entrance_style(block: &Block) -> StyleDescriptor {
    let style = block.style();
    let mut descriptor = StyleDescriptor::new();

    let Some(name) = style.active_entrance() else {
        return descriptor;
    };

    let delay = style.entrance_delay.unwrap_or(0.0).max(0.0);
    descriptor.animations.push(AnimationDecl {
        kind: AnimationKind::Entrance,
        value: format!("{} {} ease-out {}ms both", name, ENTRANCE_DURATION, number(delay)),
    });
    descriptor
}

/// Wrapper, animation and entrance layers composed into one descriptor.
pub fn composed_style(block: &Block) -> StyleDescriptor {
    let mut descriptor = wrapper_style(block);
    descriptor.merge(animation_style(block));
    descriptor.merge(entrance_style(block));
    descriptor
}

/// Box-shadow for a preset; `None` for [`ShadowPreset::None`].
pub fn shadow_value(preset: ShadowPreset) -> Option<&'static str> {
    match preset {
        ShadowPreset::None => None,
        ShadowPreset::Sm => Some("0 1px 2px 0 rgb(0 0 0 / 0.05)"),
        ShadowPreset::Md => {
            Some("0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)")
        }
        ShadowPreset::Lg => {
            Some("0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)")
        }
        ShadowPreset::Xl => {
            Some("0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)")
        }
        ShadowPreset::Xxl => Some("0 25px 50px -12px rgb(0 0 0 / 0.25)"),
        ShadowPreset::Glow => {
            Some("0 0 20px rgba(99, 102, 241, 0.4), 0 0 40px rgba(99, 102, 241, 0.2)")
        }
    }
}

/// Stored opacity is an integer percentage; CSS wants a fraction.
fn opacity_fraction(percent: Option<f64>) -> String {
    let fraction = percent.unwrap_or(100.0).clamp(0.0, 100.0) / 100.0;
    number(fraction)
}

pub(crate) fn px(value: f64) -> String {
    format!("{}px", number(value))
}

/// Format without a trailing `.0` for whole numbers.
pub(crate) fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
