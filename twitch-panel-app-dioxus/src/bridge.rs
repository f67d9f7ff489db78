use crate::host;
use crate::state::PanelState;
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::{info, warn};
use twitch_panel_core::{ColorScheme, EmbedConfig, EmbedController, PanelInput};

const LOG_TARGET: &str = "twitch_panel::bridge";

/// Controller plus the signals it keeps current.
#[derive(Clone)]
pub struct PanelHandle {
    controller: Option<Rc<EmbedController>>,
    pub state: PanelState,
}

impl PanelHandle {
    /// Switch the player to the channel at `index`.
    pub fn select(&self, index: usize) {
        match &self.controller {
            Some(controller) => {
                if let Err(e) = controller.select_channel(index) {
                    warn!(target: LOG_TARGET, "Ignoring selection: {e}");
                }
            }
            None => {
                // No embed available: only the list highlight follows the click
                let mut state = self.state;
                state.selected_index.set(index);
            }
        }
    }
}

/// Bind an [`EmbedController`] to the component's lifetime.
///
/// The controller is rebuilt from `input` and `scheme` whenever either changes,
/// and torn down when the component unmounts.
pub fn use_embed_controller(
    input: Signal<PanelInput>,
    scheme: Signal<ColorScheme>,
    config: &EmbedConfig,
) -> PanelHandle {
    let state = use_hook(PanelState::new);

    let controller = use_hook(|| {
        let env = host::browser_env()?;
        let controller = Rc::new(EmbedController::new(env, config.clone()));
        controller.set_observer(Box::new(move |snapshot| {
            let mut state = state;
            state.apply(snapshot);
        }));
        info!(target: LOG_TARGET, "Embed controller attached");
        Some(controller)
    });

    use_effect({
        let controller = controller.clone();
        move || {
            let input = input.read().clone();
            let scheme = scheme();
            if let Some(controller) = &controller {
                controller.update(&input, scheme);
            }
        }
    });

    use_drop({
        let controller = controller.clone();
        move || {
            if let Some(controller) = controller {
                controller.teardown();
            }
        }
    });

    PanelHandle { controller, state }
}
