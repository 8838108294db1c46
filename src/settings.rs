//! Player preferences
//!
//! Persisted in LocalStorage on the web; native builds always use defaults.

use serde::{Deserialize, Serialize};

use crate::sim::{Level, LevelId, Theme};

/// Volume change per key press
const VOLUME_STEP: f32 = 0.1;

/// Preference edits bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    ToggleHighContrast,
    ToggleLevelTitle,
    ToggleMuteOnBlur,
    VolumeDown,
    VolumeUp,
}

impl SettingsChange {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "c" | "C" => Some(SettingsChange::ToggleHighContrast),
            "t" | "T" => Some(SettingsChange::ToggleLevelTitle),
            "m" | "M" => Some(SettingsChange::ToggleMuteOnBlur),
            "-" | "_" => Some(SettingsChange::VolumeDown),
            "+" | "=" => Some(SettingsChange::VolumeUp),
            _ => None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show the level title above the board
    pub show_level_title: bool,

    // === Accessibility ===
    /// Replace level palettes with a black and white one
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            show_level_title: true,

            high_contrast: false,
        }
    }
}

impl Settings {
    /// Gain applied to every sound effect
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Palette to draw `level` with
    pub fn theme_for(&self, level: &Level) -> Theme {
        if self.high_contrast {
            Theme::HIGH_CONTRAST
        } else {
            level.theme
        }
    }

    /// Title the HUD should show for `level`, if any. The win screen is
    /// always announced.
    pub fn hud_title(&self, level: &Level) -> Option<&'static str> {
        (self.show_level_title || level.id == LevelId::Win).then(|| level.title())
    }

    /// Apply one edit
    pub fn apply(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::ToggleHighContrast => self.high_contrast = !self.high_contrast,
            SettingsChange::ToggleLevelTitle => self.show_level_title = !self.show_level_title,
            SettingsChange::ToggleMuteOnBlur => self.mute_on_blur = !self.mute_on_blur,
            SettingsChange::VolumeDown => {
                self.master_volume = (self.master_volume - VOLUME_STEP).clamp(0.0, 1.0)
            }
            SettingsChange::VolumeUp => {
                self.master_volume = (self.master_volume + VOLUME_STEP).clamp(0.0, 1.0)
            }
        }
        log::info!("Settings changed: {:?}", change);
    }

    /// Pull volumes back into range after loading untrusted data
    fn sanitized(mut self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        self.master_volume = fix(self.master_volume);
        self.sfx_volume = fix(self.sfx_volume);
        self
    }

    /// Parse a stored JSON blob, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "superposition_settings";

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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings storage on native; key {}", Self::STORAGE_KEY);
        Self::default()
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
    fn test_json_roundtrip() {
        let settings = Settings {
            master_volume: 0.25,
            high_contrast: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{"mute_on_blur": false}"#);
        assert!(!settings.mute_on_blur);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
        assert!(settings.show_level_title);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_volumes_are_clamped() {
        let settings = Settings::from_json(r#"{"master_volume": 4.0, "sfx_volume": -1.0}"#);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.sfx_gain(), 0.0);
    }

    #[test]
    fn test_high_contrast_overrides_theme() {
        let level = Level::load(LevelId::Two);
        let mut settings = Settings::default();
        assert_eq!(settings.theme_for(&level), level.theme);
        settings.high_contrast = true;
        assert_eq!(settings.theme_for(&level), Theme::HIGH_CONTRAST);
    }

    #[test]
    fn test_key_toggles_theme() {
        let level = Level::load(LevelId::One);
        let mut settings = Settings::default();
        let change = SettingsChange::from_key("c").expect("mapped");
        settings.apply(change);
        assert_eq!(settings.theme_for(&level), Theme::HIGH_CONTRAST);
        settings.apply(change);
        assert_eq!(settings.theme_for(&level), level.theme);

        assert_eq!(SettingsChange::from_key("a"), None);
    }

    #[test]
    fn test_volume_steps_stay_in_range() {
        let mut settings = Settings::default();
        for _ in 0..20 {
            settings.apply(SettingsChange::VolumeUp);
        }
        assert_eq!(settings.master_volume, 1.0);
        for _ in 0..20 {
            settings.apply(SettingsChange::VolumeDown);
        }
        assert_eq!(settings.master_volume, 0.0);
        assert_eq!(settings.sfx_gain(), 0.0);
    }

    #[test]
    fn test_changed_settings_survive_storage() {
        let mut settings = Settings::default();
        settings.apply(SettingsChange::ToggleLevelTitle);
        settings.apply(SettingsChange::ToggleMuteOnBlur);
        let json = serde_json::to_string(&settings).expect("serialize");
        let restored = Settings::from_json(&json);
        assert!(!restored.show_level_title);
        assert!(!restored.mute_on_blur);
    }

    #[test]
    fn test_win_title_shows_with_titles_off() {
        let mut settings = Settings::default();
        settings.apply(SettingsChange::ToggleLevelTitle);
        assert_eq!(settings.hud_title(&Level::load(LevelId::Two)), None);
        assert_eq!(
            settings.hud_title(&Level::load(LevelId::Win)),
            Some("You Win!")
        );

        settings.apply(SettingsChange::ToggleLevelTitle);
        assert_eq!(
            settings.hud_title(&Level::load(LevelId::Two)),
            Some(LevelId::Two.title())
        );
    }
}
