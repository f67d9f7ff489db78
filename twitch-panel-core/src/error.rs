use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    // Configuration errors
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Channel feed errors
    #[error("Failed to parse channel feed: {0}")]
    ChannelFeedParse(#[from] serde_json::Error),

    #[error("No channels available")]
    NoChannels,

    #[error("Channel index {index} out of range for {len} channel(s)")]
    ChannelOutOfRange { index: usize, len: usize },

    // Host errors
    #[error("Failed to inject embed script: {reason}")]
    ScriptInjection { reason: String },

    #[error("Embed API is not available in this document")]
    EmbedUnavailable,

    #[error("Failed to create embedded player: {reason}")]
    EmbedCreation { reason: String },
}

pub type Result<T> = std::result::Result<T, PanelError>;
