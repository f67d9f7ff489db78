use crate::document::ScriptRequest;
use crate::error::{PanelError, Result};
use crate::theme::{ColorScheme, ThemePreference};
use crate::widget::{EmbedLayout, EmbedOptions};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub embed: EmbedConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(default = "default_script_src")]
    pub script_src: String,
    /// Element id of the injected script; doubles as the load marker
    #[serde(default = "default_marker_id")]
    pub marker_id: String,
    /// Element id the embed mounts into
    #[serde(default = "default_anchor_id")]
    pub anchor_id: String,
    #[serde(default = "default_dimension")]
    pub width: String,
    #[serde(default = "default_dimension")]
    pub height: String,
    #[serde(default)]
    pub layout: EmbedLayout,
    /// Creation-time autoplay; playback normally starts on readiness instead
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default = "default_true")]
    pub muted: bool,
}

fn default_script_src() -> String {
    "https://player.twitch.tv/js/embed/v1.js".to_string()
}

fn default_marker_id() -> String {
    "twitch-script".to_string()
}

fn default_anchor_id() -> String {
    "twitch-embed".to_string()
}

fn default_dimension() -> String {
    "100%".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            script_src: default_script_src(),
            marker_id: default_marker_id(),
            anchor_id: default_anchor_id(),
            width: default_dimension(),
            height: default_dimension(),
            layout: EmbedLayout::default(),
            autoplay: false,
            muted: default_true(),
        }
    }
}

impl EmbedConfig {
    #[must_use]
    pub fn script_request(&self) -> ScriptRequest {
        ScriptRequest::new(&self.marker_id, &self.script_src)
    }

    /// Creation options for an embed starting on `channel` with `theme`
    #[must_use]
    pub fn embed_options(&self, channel: &str, theme: ColorScheme) -> EmbedOptions {
        EmbedOptions {
            width: self.width.clone(),
            height: self.height.clone(),
            channel: channel.to_string(),
            layout: self.layout,
            autoplay: self.autoplay,
            theme,
            muted: self.muted,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub preference: ThemePreference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PanelConfig {
    /// Parse and validate a TOML config
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate values serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::ConfigInvalid`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let embed = &self.embed;

        if embed.marker_id.trim().is_empty() {
            return Err(invalid("embed.marker_id must not be empty"));
        }
        if embed.anchor_id.trim().is_empty() {
            return Err(invalid("embed.anchor_id must not be empty"));
        }
        if embed.marker_id == embed.anchor_id {
            return Err(invalid("embed.marker_id and embed.anchor_id must differ"));
        }
        if !embed.script_src.starts_with("https://") {
            return Err(invalid("embed.script_src must be an https:// URL"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> PanelError {
    PanelError::ConfigInvalid {
        message: message.to_string(),
    }
}

pub const CONFIG_TEMPLATE: &str = r##"# Twitch panel configuration

[embed]
script_src = "https://player.twitch.tv/js/embed/v1.js"
# Id of the injected script element; used to avoid loading it twice
marker_id = "twitch-script"
# Id of the element the player mounts into
anchor_id = "twitch-embed"
width = "100%"
height = "100%"
layout = "video"  # "video", "video-with-chat"
# The player starts muted and begins playback once ready (except on mobile)
autoplay = false
muted = true

[theme]
preference = "system"  # "system", "light", "dark"

[logging]
# tracing EnvFilter directive, e.g. "debug" or "info,twitch_panel::controller=debug"
level = "info"
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let config = PanelConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PanelConfig::from_toml_str("").unwrap();

        assert_eq!(config.embed.marker_id, "twitch-script");
        assert_eq!(config.embed.anchor_id, "twitch-embed");
        assert!(config.embed.muted);
        assert!(!config.embed.autoplay);
        assert_eq!(config.theme.preference, ThemePreference::System);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = PanelConfig::from_toml_str(
            r#"
            [embed]
            layout = "video-with-chat"

            [theme]
            preference = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.embed.layout, EmbedLayout::VideoWithChat);
        assert_eq!(config.embed.width, "100%");
        assert_eq!(config.theme.preference, ThemePreference::Dark);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "[embed]\nmarker_id = \"\"",
            "[embed]\nanchor_id = \" \"",
            "[embed]\nmarker_id = \"same\"\nanchor_id = \"same\"",
            "[embed]\nscript_src = \"http://player.twitch.tv/js/embed/v1.js\"",
        ];

        for case in cases {
            let result = PanelConfig::from_toml_str(case);
            assert!(
                matches!(result, Err(PanelError::ConfigInvalid { .. })),
                "expected rejection for {case:?}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        let result = PanelConfig::from_toml_str("[embed\nlayout = ");
        assert!(matches!(result, Err(PanelError::ConfigParseError(_))));
    }

    #[test]
    fn test_embed_options_from_config() {
        let options = EmbedConfig::default().embed_options("afro", ColorScheme::Dark);

        assert_eq!(options.channel, "afro");
        assert_eq!(options.width, "100%");
        assert_eq!(options.height, "100%");
        assert_eq!(options.layout, EmbedLayout::Video);
        assert!(!options.autoplay);
        assert!(options.muted);
        assert_eq!(options.theme, ColorScheme::Dark);
    }
}
