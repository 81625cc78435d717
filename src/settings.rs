//! Game settings
//!
//! Persisted in LocalStorage on the web; read from the environment natively.
//! Gameplay constants are fixed in `consts` and are not configurable.

use serde::{Deserialize, Serialize};

/// Default length of a native headless run (about a minute at 60 Hz)
pub const DEFAULT_DEMO_FRAMES: u32 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible runs; time-derived when unset
    pub seed: Option<u64>,
    /// Show FPS counter
    pub show_fps: bool,
    /// Frames to simulate in the native headless demo
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            show_fps: false,
            demo_frames: DEFAULT_DEMO_FRAMES,
        }
    }
}

impl Settings {
    /// Seed for a new run: the configured one, or `fallback`
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Parse a JSON settings blob, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply overrides from `(name, value)` pairs such as environment variables
    pub fn apply_overrides<'a>(&mut self, vars: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in vars {
            match name {
                "ARENA_SEED" => match value.parse::<u64>() {
                    Ok(seed) => self.seed = Some(seed),
                    Err(_) => log::warn!("Invalid ARENA_SEED '{}', using a random seed", value),
                },
                "ARENA_DEMO_FRAMES" => match value.parse::<u32>() {
                    Ok(frames) if frames > 0 => self.demo_frames = frames,
                    _ => log::warn!("Invalid ARENA_DEMO_FRAMES '{}', using default", value),
                },
                "ARENA_SHOW_FPS" => self.show_fps = matches!(value, "1" | "true" | "yes"),
                _ => {}
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "invisible_arena_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from ARENA_* environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let vars: Vec<(String, String)> = std::env::vars()
            .filter(|(name, _)| name.starts_with("ARENA_"))
            .collect();
        let mut settings = Self::default();
        settings.apply_overrides(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 42}"#);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.demo_frames, DEFAULT_DEMO_FRAMES);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides([
            ("ARENA_SEED", "7"),
            ("ARENA_DEMO_FRAMES", "0"),
            ("ARENA_SHOW_FPS", "true"),
            ("UNRELATED", "x"),
        ]);
        assert_eq!(settings.seed_or(1), 7);
        assert_eq!(settings.demo_frames, DEFAULT_DEMO_FRAMES);
        assert!(settings.show_fps);
    }

    #[test]
    fn test_bad_seed_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides([("ARENA_SEED", "abc")]);
        assert_eq!(settings.seed_or(99), 99);
    }
}
