//! Channel descriptors and the panel's input shape.

use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// One live broadcast the panel can switch to.
///
/// Field names follow the Twitch Helix "get streams" item so a feed
/// snapshot deserializes directly; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Stable login used by the embed to select a stream
    #[serde(rename = "user_login")]
    pub login_id: String,
    /// Human readable channel name
    #[serde(rename = "user_name")]
    pub display_name: String,
    /// Current stream title
    #[serde(default)]
    pub title: String,
    /// Live viewer count
    #[serde(default)]
    pub viewer_count: u64,
}

impl ChannelDescriptor {
    pub fn new(
        login_id: impl Into<String>,
        display_name: impl Into<String>,
        title: impl Into<String>,
        viewer_count: u64,
    ) -> Self {
        Self {
            login_id: login_id.into(),
            display_name: display_name.into(),
            title: title.into(),
            viewer_count,
        }
    }

    /// Label shown next to the live indicator, e.g. "1234 viewers"
    #[must_use]
    pub fn viewers_label(&self) -> String {
        format!("{} viewers", self.viewer_count)
    }
}

/// Ordered, immutable channel sequence shared between the controller and the UI.
///
/// Pointer identity is meaningful: a new `ChannelList` (even with equal
/// contents) counts as a changed channel set and restarts the embed.
pub type ChannelList = Rc<[ChannelDescriptor]>;

#[derive(Debug, Deserialize)]
struct StreamFeed {
    #[serde(default)]
    data: Vec<ChannelDescriptor>,
}

/// Parse a Helix `{ "data": [...] }` stream payload into ordered descriptors.
///
/// # Errors
///
/// Returns [`PanelError::ChannelFeedParse`] if the payload is not valid JSON
/// or an entry is missing its login or display name.
pub fn parse_stream_feed(json: &str) -> Result<Vec<ChannelDescriptor>> {
    let feed: StreamFeed = serde_json::from_str(json)?;
    Ok(feed.data)
}

/// Data supplied to the panel by its upstream collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelInput {
    /// Channels to offer; `None` when the upstream fetch failed or is absent
    pub channels: Option<ChannelList>,
    /// Upstream error description, if any
    pub error: Option<String>,
}

impl PanelInput {
    #[must_use]
    pub fn new(channels: Vec<ChannelDescriptor>) -> Self {
        Self {
            channels: Some(channels.into()),
            error: None,
        }
    }

    /// Build input from a feed parse, mapping failures to an absent channel list.
    #[must_use]
    pub fn from_feed_result(result: Result<Vec<ChannelDescriptor>>) -> Self {
        match result {
            Ok(channels) => Self::new(channels),
            Err(e) => Self {
                channels: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Channels if present and non-empty
    #[must_use]
    pub fn available_channels(&self) -> Option<&ChannelList> {
        self.channels.as_ref().filter(|channels| !channels.is_empty())
    }
}

impl From<PanelError> for PanelInput {
    fn from(error: PanelError) -> Self {
        Self::from_feed_result(Err(error))
    }
}
