pub mod channel;
pub mod config;
pub mod controller;
pub mod device;
pub mod document;
pub mod error;
pub mod loader;
pub mod theme;
pub mod widget;

#[cfg(test)]
mod testing;

pub use channel::{parse_stream_feed, ChannelDescriptor, ChannelList, PanelInput};
pub use config::{EmbedConfig, LoggingConfig, PanelConfig, ThemeConfig, CONFIG_TEMPLATE};
pub use controller::{EmbedController, LifecycleState, PanelEnv, PanelSnapshot, SnapshotObserver};
pub use device::{is_mobile_user_agent, DeviceProbe, UserAgentProbe};
pub use document::{Document, LoadCallback, ScriptRequest};
pub use error::{PanelError, Result};
pub use loader::{LoadOutcome, ResourceLoader};
pub use theme::{ColorScheme, ThemePreference};
pub use widget::{
    EmbedApi, EmbedInstance, EmbedLayout, EmbedOptions, ListenerId, PlayerHandle, ReadyCallback,
    VIDEO_READY_EVENT,
};
