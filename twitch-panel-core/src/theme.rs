//! Light/dark color scheme handed to the embed at creation time.

use serde::{Deserialize, Serialize};

/// Color scheme understood by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    /// Follow the host's `prefers-color-scheme` signal
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    /// Resolve the preference against the host signal.
    #[must_use]
    pub const fn resolve(self, system_prefers_dark: bool) -> ColorScheme {
        match self {
            Self::System if system_prefers_dark => ColorScheme::Dark,
            Self::System | Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
        }
    }

    /// Whether the resolved scheme depends on the host signal
    #[must_use]
    pub const fn follows_system(self) -> bool {
        matches!(self, Self::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ColorScheme::Dark).unwrap(), "\"dark\"");
        assert_eq!(ColorScheme::Light.to_string(), "light");
    }

    #[test]
    fn test_resolve_system() {
        assert_eq!(ThemePreference::System.resolve(true), ColorScheme::Dark);
        assert_eq!(ThemePreference::System.resolve(false), ColorScheme::Light);
    }

    #[test]
    fn test_resolve_fixed_ignores_host() {
        assert_eq!(ThemePreference::Light.resolve(true), ColorScheme::Light);
        assert_eq!(ThemePreference::Dark.resolve(false), ColorScheme::Dark);
        assert!(!ThemePreference::Dark.follows_system());
    }
}
