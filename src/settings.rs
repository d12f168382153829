//! Player preferences
//!
//! Kept in memory for the current page session only. These only gate
//! feedback output; round logic never reads them.

/// Which toggle to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Sounds,
    Haptics,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Sounds => "sounds",
            SettingKey::Haptics => "haptics",
        }
    }
}

/// Feedback toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Play cue tones
    pub sounds: bool,
    /// Vibrate on cues (mobile)
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sounds: true,
            haptics: true,
        }
    }
}

impl Settings {
    /// Flip one toggle, returning its new value
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let flag = match key {
            SettingKey::Sounds => &mut self.sounds,
            SettingKey::Haptics => &mut self.haptics,
        };
        *flag = !*flag;
        *flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on() {
        let settings = Settings::default();
        assert!(settings.sounds);
        assert!(settings.haptics);
    }

    #[test]
    fn test_toggle() {
        let mut settings = Settings::default();
        assert!(!settings.toggle(SettingKey::Sounds));
        assert!(!settings.sounds);
        assert!(settings.haptics);
        assert!(settings.toggle(SettingKey::Sounds));
        assert!(!settings.toggle(SettingKey::Haptics));
        assert_eq!(
            settings,
            Settings {
                sounds: true,
                haptics: false,
            }
        );
    }

    #[test]
    fn test_key_names_match_toggle_ids() {
        assert_eq!(SettingKey::Sounds.as_str(), "sounds");
        assert_eq!(SettingKey::Haptics.as_str(), "haptics");
    }
}
