use dioxus::prelude::*;
use twitch_panel_core::ChannelDescriptor;

/// Name, audience and title of the channel currently playing.
#[component]
pub fn StreamInfo(channel: ChannelDescriptor) -> Element {
    let viewers = channel.viewers_label();

    rsx! {
        div {
            class: "stream-info",

            div {
                class: "stream-info-header",
                span { class: "live-dot" }
                span { class: "stream-name", "{channel.display_name}" }
                span { class: "stream-viewers", "{viewers}" }
            }
            p { class: "stream-title", "{channel.title}" }
        }
    }
}
