use dioxus::prelude::*;
use twitch_panel_core::ChannelList;

/// Clickable list of live channels. The entry at `selected` is highlighted.
#[component]
pub fn ChannelPicker(
    channels: ChannelList,
    selected: usize,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        div {
            class: "channel-list",

            for (index, channel) in channels.iter().enumerate() {
                {
                    let class = if index == selected {
                        "channel-item selected"
                    } else {
                        "channel-item"
                    };
                    let viewers = channel.viewers_label();

                    rsx! {
                        button {
                            key: "{channel.login_id}",
                            class: "{class}",
                            onclick: move |_| on_select.call(index),

                            span { class: "channel-name", "{channel.display_name}" }
                            span { class: "channel-viewers", "{viewers}" }
                        }
                    }
                }
            }
        }
    }
}
