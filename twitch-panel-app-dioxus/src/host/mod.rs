//! Browser implementations of the controller's host services.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod twitch;

use twitch_panel_core::PanelEnv;

const LOG_TARGET: &str = "twitch_panel::host";

/// Host services backed by the current page, or `None` outside a browser.
#[cfg(target_arch = "wasm32")]
pub fn browser_env() -> Option<PanelEnv> {
    use std::rc::Rc;
    use tracing::{debug, warn};
    use twitch_panel_core::UserAgentProbe;

    let Some(window) = web_sys::window() else {
        warn!(target: LOG_TARGET, "No window, panel renders without video");
        return None;
    };
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    debug!(target: LOG_TARGET, "User agent: {user_agent}");

    let document = dom::WebDocument::new(&window)?;

    Some(PanelEnv {
        document: Rc::new(document),
        embed_api: Rc::new(twitch::TwitchEmbedApi),
        device: Rc::new(UserAgentProbe::new(user_agent)),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn browser_env() -> Option<PanelEnv> {
    tracing::warn!(target: LOG_TARGET, "No browser document, panel renders without video");
    None
}
