//! User configuration — animation options and persistence.
//!
//! Options are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/card-rain/config.toml` (default
//! `~/.config/card-rain/config.toml`).  Missing files, unknown keys, and
//! malformed values all fall back to defaults; a broken config never stops
//! the program.

use std::path::PathBuf;

use crate::core::progress::DEFAULT_LERP_FACTOR;
use crate::core::visual::FallMode;

/// Default total scrollable height of the animated region, in vh.
pub const DEFAULT_HEIGHT_MULTIPLIER: f64 = 300.0;

/// Default width threshold for the mobile trigger layout, in px.
pub const DEFAULT_BREAKPOINT_PX: f64 = 768.0;

/// Default number of cards on the stage.
pub const DEFAULT_CARD_COUNT: usize = 5;

/// Application configuration — everything the engine and the stage need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    /// Total scrollable height of the animated region in viewport-heights
    /// (300 ⇒ the region is three screens tall).
    pub scroll_height_multiplier: f64,
    /// Viewport widths at or below this switch to the mobile layout.
    pub mobile_breakpoint_px: f64,
    /// Drop vs zoom card entrance.
    pub fall_mode: FallMode,
    /// Number of cards on the stage.
    pub card_count: usize,
    /// Skip all animation and show everything at rest.
    pub reduced_motion: bool,
    /// Smoother approach factor; kept strictly inside (0,1).
    pub lerp_factor: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scroll_height_multiplier: DEFAULT_HEIGHT_MULTIPLIER,
            mobile_breakpoint_px: DEFAULT_BREAKPOINT_PX,
            fall_mode: FallMode::default(),
            card_count: DEFAULT_CARD_COUNT,
            reduced_motion: false,
            lerp_factor: DEFAULT_LERP_FACTOR,
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "scroll_height_multiplier" => {
                    if let Ok(v) = value.parse::<f64>() {
                        // Anything below one screen has nothing to scroll.
                        config.scroll_height_multiplier = v.max(100.0);
                    }
                }
                "mobile_breakpoint_px" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.mobile_breakpoint_px = v.max(0.0);
                    }
                }
                "fall_mode" => {
                    if let Ok(v) = value.parse::<FallMode>() {
                        config.fall_mode = v;
                    }
                }
                "card_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.card_count = v.min(64);
                    }
                }
                "reduced_motion" => {
                    config.reduced_motion = value == "true";
                }
                "lerp_factor" => {
                    if let Ok(v) = value.parse::<f64>() {
                        // Must stay strictly inside (0,1) for stability.
                        config.lerp_factor = v.clamp(0.01, 0.99);
                    }
                }
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let lines = vec![
            "# card-rain configuration".to_string(),
            String::new(),
            "# Stage".to_string(),
            format!("scroll_height_multiplier = {}", self.scroll_height_multiplier),
            format!("mobile_breakpoint_px = {}", self.mobile_breakpoint_px),
            format!("card_count = {}", self.card_count),
            String::new(),
            "# Animation".to_string(),
            "# fall_mode: drop | zoom".to_string(),
            format!("fall_mode = {}", self.fall_mode),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("lerp_factor = {}", self.lerp_factor),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/card-rain/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("card-rain").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = AppConfig::default();
        assert_eq!(c.scroll_height_multiplier, 300.0);
        assert_eq!(c.mobile_breakpoint_px, 768.0);
        assert_eq!(c.fall_mode, FallMode::Drop);
        assert_eq!(c.card_count, 5);
        assert!(!c.reduced_motion);
        assert_eq!(c.lerp_factor, 0.08);
    }

    #[test]
    fn serialise_parse_round_trips() {
        let c = AppConfig {
            scroll_height_multiplier: 450.0,
            mobile_breakpoint_px: 600.0,
            fall_mode: FallMode::Zoom,
            card_count: 8,
            reduced_motion: true,
            lerp_factor: 0.12,
        };
        assert_eq!(AppConfig::parse_config(&c.serialise()), c);
    }

    #[test]
    fn unknown_keys_and_garbage_lines_are_ignored() {
        let parsed = AppConfig::parse_config(
            "# comment\n\nwhat even is this\nnot_a_key = 7\nfall_mode = zoom\n",
        );
        assert_eq!(parsed.fall_mode, FallMode::Zoom);
        assert_eq!(parsed.card_count, DEFAULT_CARD_COUNT);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let parsed = AppConfig::parse_config(
            "card_count = many\nfall_mode = sideways\nlerp_factor = fast\n",
        );
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn lerp_factor_is_clamped_into_open_interval() {
        let parsed = AppConfig::parse_config("lerp_factor = 1.5");
        assert!(parsed.lerp_factor < 1.0);
        let parsed = AppConfig::parse_config("lerp_factor = 0");
        assert!(parsed.lerp_factor > 0.0);
    }

    #[test]
    fn degenerate_multiplier_is_raised_to_one_screen() {
        let parsed = AppConfig::parse_config("scroll_height_multiplier = 40");
        assert_eq!(parsed.scroll_height_multiplier, 100.0);
    }
}
