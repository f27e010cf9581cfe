use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// How selection events reach the detail panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsInteraction {
    /// Hover previews are pushed to the detail panel too, replacing a locked
    /// node until the next click.
    pub hover_updates_panel: bool,

    /// Pointer leaving a node clears the detail panel.
    pub clear_panel_on_hover_end: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            hover_updates_panel: true,
            clear_panel_on_hover_end: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsNavigation {
    /// Margin kept around the visible nodes when fitting the view, in graph units
    pub fit_padding: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self { fit_padding: 50. }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialVisibility {
    /// Every node visible.
    #[default]
    Expanded,
    /// Only the root visible.
    Collapsed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsMount {
    pub initial_visibility: InitialVisibility,
}

/// Orientation of the tree layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Levels grow downward.
    #[default]
    TopDown,
    /// Levels grow to the right.
    LeftRight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsLayout {
    /// Distance between levels.
    pub row_dist: f32,
    /// Distance between siblings.
    pub col_dist: f32,
    /// Center a parent over the span of its children.
    pub center_parent: bool,
    pub orientation: Orientation,
}

impl Default for SettingsLayout {
    fn default() -> Self {
        Self {
            row_dist: 110.,
            col_dist: 60.,
            center_parent: true,
            orientation: Orientation::TopDown,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub interaction: SettingsInteraction,
    pub navigation: SettingsNavigation,
    pub mount: SettingsMount,
    pub layout: SettingsLayout,
}

impl Settings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Json`] when `text` is not valid settings JSON.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.navigation.fit_padding, 50.);
        assert!(s.interaction.hover_updates_panel);
        assert!(!s.interaction.clear_panel_on_hover_end);
        assert_eq!(s.mount.initial_visibility, InitialVisibility::Expanded);
        assert_eq!(s.layout.row_dist, 110.);
        assert_eq!(s.layout.col_dist, 60.);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(
            r#"{"navigation":{"fit_padding":10.0},"mount":{"initial_visibility":"collapsed"}}"#,
        )
        .unwrap();
        assert_eq!(s.navigation.fit_padding, 10.);
        assert_eq!(s.mount.initial_visibility, InitialVisibility::Collapsed);
        assert_eq!(s.layout, SettingsLayout::default());
        assert_eq!(s.interaction, SettingsInteraction::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = Settings::from_json("{").unwrap_err();
        assert!(err.to_string().contains("invalid settings json"));
    }
}
