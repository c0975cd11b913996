use crate::lenient;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a block's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }

    /// Flexbox equivalent, for renderers that lay out children in a row.
    pub fn as_flex(&self) -> &'static str {
        match self {
            Align::Left => "flex-start",
            Align::Center => "center",
            Align::Right => "flex-end",
        }
    }
}

/// Named box-shadow presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowPreset {
    None,
    Sm,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
    Glow,
}

/// When a continuous animation plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationTrigger {
    #[default]
    Loop,
    Once,
    Hover,
}

/// Style fields shared by every block regardless of type.
///
/// Every field is optional; consumers apply their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    #[serde(deserialize_with = "lenient::choice")]
    pub align: Option<Align>,
    #[serde(deserialize_with = "lenient::string")]
    pub block_background: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub block_border_width: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub block_border_color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub block_border_radius: Option<f64>,
    #[serde(deserialize_with = "lenient::choice")]
    pub block_shadow: Option<ShadowPreset>,
    #[serde(deserialize_with = "lenient::number")]
    pub block_padding: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub block_opacity: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub animation: Option<String>,
    #[serde(deserialize_with = "lenient::choice")]
    pub animation_trigger: Option<AnimationTrigger>,
    #[serde(deserialize_with = "lenient::string")]
    pub animation_speed: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub entrance_animation: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub entrance_delay: Option<f64>,
    /// Block-level text color, also used by the custom wrapper.
    #[serde(deserialize_with = "lenient::string")]
    pub text_color: Option<String>,
}

impl BlockStyle {
    pub fn align(&self) -> Align {
        self.align.unwrap_or_default()
    }

    pub fn trigger(&self) -> AnimationTrigger {
        self.animation_trigger.unwrap_or_default()
    }

    /// Continuous animation name, `None` when absent or `"none"`.
    pub fn active_animation(&self) -> Option<&str> {
        active(self.animation.as_deref())
    }

    /// Entrance animation name, `None` when absent or `"none"`.
    pub fn active_entrance(&self) -> Option<&str> {
        active(self.entrance_animation.as_deref())
    }

    /// Whether any field that turns on the custom wrapper is set.
    ///
    /// A zero border width does not count. Any shadow does, `none` included,
    /// as do a zero padding or opacity.
    pub fn has_custom_wrapper(&self) -> bool {
        self.block_background.is_some()
            || self.block_border_width.map_or(false, |w| w > 0.0)
            || self.block_shadow.is_some()
            || self.block_padding.is_some()
            || self.block_opacity.is_some()
    }
}

fn active(name: Option<&str>) -> Option<&str> {
    name.filter(|n| *n != "none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_common_fields() {
        let style: BlockStyle = serde_json::from_value(json!({
            "align": "center",
            "blockBackground": "#fff",
            "blockShadow": "2xl",
            "blockOpacity": "80",
            "animation": "pulse",
            "animationTrigger": "hover",
            "entranceDelay": 200
        }))
        .unwrap();

        assert_eq!(style.align(), Align::Center);
        assert_eq!(style.block_shadow, Some(ShadowPreset::Xxl));
        assert_eq!(style.block_opacity, Some(80.0));
        assert_eq!(style.active_animation(), Some("pulse"));
        assert_eq!(style.trigger(), AnimationTrigger::Hover);
        assert_eq!(style.entrance_delay, Some(200.0));
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let style: BlockStyle = serde_json::from_value(json!({
            "align": "justify",
            "blockShadow": "huge",
            "animationTrigger": 3
        }))
        .unwrap();

        assert_eq!(style.align(), Align::Left);
        assert!(style.block_shadow.is_none());
        assert_eq!(style.trigger(), AnimationTrigger::Loop);
    }

    #[test]
    fn test_none_animation_is_inactive() {
        let style: BlockStyle = serde_json::from_value(json!({
            "animation": "none",
            "entranceAnimation": "none"
        }))
        .unwrap();

        assert!(style.active_animation().is_none());
        assert!(style.active_entrance().is_none());
    }

    #[test]
    fn test_custom_wrapper_detection() {
        assert!(!BlockStyle::default().has_custom_wrapper());

        let zero_border: BlockStyle = serde_json::from_value(json!({ "blockBorderWidth": 0 })).unwrap();
        assert!(!zero_border.has_custom_wrapper());

        let no_shadow: BlockStyle = serde_json::from_value(json!({ "blockShadow": "none" })).unwrap();
        assert!(no_shadow.has_custom_wrapper());

        let zero_padding: BlockStyle = serde_json::from_value(json!({ "blockPadding": 0 })).unwrap();
        assert!(zero_padding.has_custom_wrapper());
    }
}
