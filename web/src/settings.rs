use serde::{Deserialize, Serialize};

use crate::utils::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Double clicking a number chords it.
    pub double_click_chord: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            double_click_chord: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "mineshop:settings";
}

impl Settings {
    pub(crate) fn toggle_double_click_chord(&mut self) {
        self.double_click_chord = !self.double_click_chord;
        log::debug!("double click chord: {}", self.double_click_chord);
        self.local_save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.double_click_chord);
    }
}
