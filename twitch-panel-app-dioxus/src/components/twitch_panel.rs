use crate::bridge::use_embed_controller;
use crate::components::{ChannelPicker, StreamInfo};
use crate::theme_watcher::use_color_scheme;
use dioxus::prelude::*;
use twitch_panel_core::{PanelConfig, PanelInput};

/// Live streams panel: embedded player, channel list and metadata band.
///
/// Without channels the panel renders its frame only.
#[component]
pub fn TwitchPanel(input: Signal<PanelInput>) -> Element {
    let config: PanelConfig = use_context();
    let scheme = use_color_scheme(config.theme.preference);
    let panel = use_embed_controller(input, scheme, &config.embed);

    let channels = input.read().available_channels().cloned();
    let selected = *panel.state.selected_index.read();
    let metadata = panel.state.metadata();
    let anchor_id = config.embed.anchor_id;
    let scheme_class = scheme().as_str();

    let picker = channels.map(|channels| {
        let panel = panel.clone();
        rsx! {
            ChannelPicker {
                channels,
                selected,
                on_select: move |index: usize| panel.select(index),
            }
        }
    });
    let info = metadata.map(|channel| rsx! { StreamInfo { channel } });

    rsx! {
        div {
            class: "twitch-panel {scheme_class}",

            div {
                class: "panel-header",
                span { class: "live-icon" }
                h2 { "Watch Live Streams" }
            }
            div {
                class: "panel-grid",
                div {
                    class: "embed-column",
                    div { id: "{anchor_id}", class: "embed-anchor" }
                }
                div {
                    class: "list-column",
                    {picker}
                }
            }
            {info}
        }
    }
}
