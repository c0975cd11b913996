use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 350;
pub const DEFAULT_RANGE_DELAY_MS: u64 = 650;

/// Debounce window class of an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebounceClass {
    /// Colors, toggles, text.
    #[default]
    Short,
    /// Sliders: blur, opacity, intensity.
    Long,
}

/// Synchronizer settings, read from the `editor` section of
/// `portyo.config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    pub delay_ms: u64,
    pub range_delay_ms: u64,
    /// Attach a freshly rendered HTML snapshot to every commit.
    pub regenerate_html: bool,
    /// Put the fields of a failed commit back into the pending payload.
    pub requeue_failed: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            range_delay_ms: DEFAULT_RANGE_DELAY_MS,
            regenerate_html: true,
            requeue_failed: false,
        }
    }
}

impl SyncConfig {
    pub fn delay(&self, class: DebounceClass) -> Duration {
        match class {
            DebounceClass::Short => Duration::from_millis(self.delay_ms),
            DebounceClass::Long => Duration::from_millis(self.range_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SyncConfig = serde_json::from_str(r#"{ "delayMs": 100 }"#).unwrap();
        assert_eq!(config.delay(DebounceClass::Short), Duration::from_millis(100));
        assert_eq!(config.delay(DebounceClass::Long), Duration::from_millis(650));
        assert!(config.regenerate_html);
        assert!(!config.requeue_failed);
    }
}
