use tracing::{info, warn};
use twitch_panel_core::{parse_stream_feed, PanelInput};

const LOG_TARGET: &str = "twitch_panel::feed";

/// Helix `streams` payload bundled with the app
const STREAM_FEED: &str = include_str!("../assets/streams.json");

/// Parse the bundled stream feed into panel input.
/// A malformed feed yields input without channels, which renders an empty panel.
#[must_use]
pub fn load_channel_feed() -> PanelInput {
    let input = PanelInput::from_feed_result(parse_stream_feed(STREAM_FEED));

    match (&input.channels, &input.error) {
        (Some(channels), _) => {
            info!(target: LOG_TARGET, "Loaded {} live channel(s)", channels.len());
        }
        (None, Some(error)) => warn!(target: LOG_TARGET, "Stream feed unavailable: {error}"),
        (None, None) => {}
    }

    input
}
