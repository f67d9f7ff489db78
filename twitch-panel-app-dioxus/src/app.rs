use crate::components::TwitchPanel;
use crate::feed::load_channel_feed;
use dioxus::prelude::*;

/// Root application component.
/// Loads the stream feed once and hands it to the panel.
#[component]
pub fn App() -> Element {
    let input = use_signal(load_channel_feed);

    rsx! {
        div {
            class: "container",

            TwitchPanel { input }
        }
    }
}
