use portyo_model::Bio;

pub const DEFAULT_TEXT_COLOR: &str = "#111827";
pub const DEFAULT_FONT: &str = "Inter";
pub const DEFAULT_BUTTON_STYLE: &str = "solid";
pub const DEFAULT_BUTTON_COLOR: &str = "#111827";
pub const DEFAULT_BUTTON_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_BUTTON_RADIUS: &str = "rounder";
pub const DEFAULT_BUTTON_SHADOW: &str = "none";

/// Where the rendered tree will be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Editor preview: interactive affordances are inert.
    Preview,
    #[default]
    Public,
}

/// Page-level defaults every renderer may fall back to.
///
/// Derived once per render pass from the [`Bio`] and handed to each
/// renderer explicitly. Two contexts compare equal when every resolved
/// default matches, which is what the render cache keys on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContext {
    pub mode: RenderMode,
    pub text_color: String,
    pub font: String,
    pub button_style: String,
    pub button_color: String,
    pub button_text_color: String,
    pub button_radius: String,
    pub button_shadow: String,
}

impl BlockContext {
    pub fn from_bio(bio: &Bio, mode: RenderMode) -> Self {
        let design = bio.design();
        let pick = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };

        Self {
            mode,
            text_color: pick(&design.username_color, DEFAULT_TEXT_COLOR),
            font: pick(&design.font, DEFAULT_FONT),
            button_style: pick(&design.button_style, DEFAULT_BUTTON_STYLE),
            button_color: pick(&design.button_color, DEFAULT_BUTTON_COLOR),
            button_text_color: pick(&design.button_text_color, DEFAULT_BUTTON_TEXT_COLOR),
            button_radius: pick(&design.button_radius, DEFAULT_BUTTON_RADIUS),
            button_shadow: pick(&design.button_shadow, DEFAULT_BUTTON_SHADOW),
        }
    }
}

impl Default for BlockContext {
    fn default() -> Self {
        Self::from_bio(&Bio::new(""), RenderMode::default())
    }
}
