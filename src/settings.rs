//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute while the page is hidden (tab switch, headset removed)
    pub mute_on_blur: bool,

    // === Haptics ===
    /// Controller rumble on fire
    pub haptics: bool,
    /// Rumble strength multiplier (0.0 - 1.0)
    pub haptic_intensity: f32,

    // === Accessibility ===
    /// Reduced motion (no blaster/liquid tilt)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            haptics: true,
            haptic_intensity: 1.0,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective SFX gain
    pub fn effective_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Whether audio should be silent given the player's mute toggle and
    /// page visibility
    pub fn audio_muted(&self, user_muted: bool, page_hidden: bool) -> bool {
        user_muted || (self.mute_on_blur && page_hidden)
    }

    /// Scale a requested pulse strength; `None` when haptics are off
    pub fn effective_haptic_intensity(&self, requested: f32) -> Option<f32> {
        if !self.haptics || self.haptic_intensity <= 0.0 {
            return None;
        }
        Some((requested * self.haptic_intensity).clamp(0.0, 1.0))
    }

    /// Whether cosmetic tilt is shown (respects reduced_motion)
    pub fn motion_effects(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "blaster_gallery_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
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
    fn test_haptics_scaling() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_haptic_intensity(0.6), Some(0.6));

        settings.haptic_intensity = 0.5;
        assert_eq!(settings.effective_haptic_intensity(0.6), Some(0.3));

        settings.haptics = false;
        assert_eq!(settings.effective_haptic_intensity(0.6), None);
    }

    #[test]
    fn test_mute_on_blur() {
        let mut settings = Settings::default();
        assert!(!settings.audio_muted(false, false));
        assert!(settings.audio_muted(false, true));
        assert!(settings.audio_muted(true, false));

        settings.mute_on_blur = false;
        assert!(!settings.audio_muted(false, true));
        assert!(settings.audio_muted(true, true));
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.motion_effects());
        assert!(Settings::default().motion_effects());
    }

    #[test]
    fn test_old_saves_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "master_volume": 0.5 }"#).unwrap();
        assert_eq!(settings.master_volume, 0.5);
        assert!(settings.haptics);
        assert_eq!(settings.effective_volume(), 0.5);
    }
}
