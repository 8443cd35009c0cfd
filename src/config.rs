/// User settings stored next to the block list
use serde::{Deserialize, Serialize};

/// Storage key holding the settings object
pub const SETTINGS_KEY: &str = "Settings";

pub const DEFAULT_THROTTLE_MS: u32 = 500;
const MIN_THROTTLE_MS: u32 = 50;
const MAX_THROTTLE_MS: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minimum interval between rescans triggered by page mutations
    pub throttle_ms: u32,
    /// Hide end-of-video recommendation screens outright
    pub hide_endscreen: bool,
    /// Log every hidden element
    pub log_blocks: bool,
    /// Add a "block channel" button to videos that are not blocked
    pub instrument: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            throttle_ms: DEFAULT_THROTTLE_MS,
            hide_endscreen: true,
            log_blocks: true,
            instrument: true,
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.throttle_ms = self.throttle_ms.clamp(MIN_THROTTLE_MS, MAX_THROTTLE_MS);
        self
    }

    /// Parse settings from a loosely typed JSON value, keeping defaults
    /// for every field that is missing or has the wrong type
    pub fn from_json(value: &serde_json::Value) -> Self {
        let defaults = Settings::default();
        let bool_field = |key: &str, fallback: bool| value.get(key).and_then(|v| v.as_bool()).unwrap_or(fallback);

        Settings {
            throttle_ms: value
                .get("throttleMs")
                .and_then(|v| v.as_u64())
                .map(|ms| ms.min(u32::MAX as u64) as u32)
                .unwrap_or(defaults.throttle_ms),
            hide_endscreen: bool_field("hideEndscreen", defaults.hide_endscreen),
            log_blocks: bool_field("logBlocks", defaults.log_blocks),
            instrument: bool_field("instrument", defaults.instrument),
        }
        .sanitized()
    }
}
