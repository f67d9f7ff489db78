//! Contract for the third-party embedded player.
//!
//! The embed is created against a mount anchor, signals readiness once, and
//! only then hands out a [`PlayerHandle`] that accepts playback commands.

use crate::error::Result;
use crate::theme::ColorScheme;
use serde::{Deserialize, Serialize};

/// Name of the embed's readiness event
pub const VIDEO_READY_EVENT: &str = "video.ready";

/// One-shot readiness notification.
pub type ReadyCallback = Box<dyn FnOnce()>;

/// Identifies a registered readiness listener so it can be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Embed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedLayout {
    /// Video only
    #[default]
    Video,
    /// Video with the chat panel
    VideoWithChat,
}

/// Creation-time options. Theme and channel cannot be changed afterwards
/// except through [`PlayerHandle::set_channel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedOptions {
    pub width: String,
    pub height: String,
    /// Login of the channel to start on
    pub channel: String,
    pub layout: EmbedLayout,
    pub autoplay: bool,
    pub theme: ColorScheme,
    pub muted: bool,
}

/// Factory for embed instances (the widget's global creation API).
pub trait EmbedApi {
    /// Create an embed inside the element with id `anchor_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the creation API is missing or rejects the options.
    fn create(&self, anchor_id: &str, options: &EmbedOptions) -> Result<Box<dyn EmbedInstance>>;
}

/// A created, possibly not yet ready, embed.
pub trait EmbedInstance {
    /// Register a one-shot readiness listener.
    ///
    /// The callback must be delivered asynchronously, never from inside this call.
    fn on_ready(&mut self, callback: ReadyCallback) -> ListenerId;

    /// Unregister a readiness listener. A removed listener is never called.
    fn remove_ready_listener(&mut self, id: ListenerId);

    /// Control handle. Only valid after readiness has fired.
    fn player(&self) -> Box<dyn PlayerHandle>;
}

/// Playback commands accepted by a ready embed.
pub trait PlayerHandle {
    fn set_muted(&self, muted: bool);
    fn play(&self);
    fn set_channel(&self, login_id: &str);
}
