//! Tracks the system color scheme and resolves it against the configured preference.

use dioxus::prelude::*;
use twitch_panel_core::{ColorScheme, ThemePreference};

#[cfg(target_arch = "wasm32")]
const LOG_TARGET: &str = "twitch_panel::theme";

#[cfg(target_arch = "wasm32")]
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Dioxus hook that provides the effective color scheme.
///
/// With the `system` preference, the signal follows `prefers-color-scheme`
/// changes for as long as the component is mounted.
#[must_use]
pub fn use_color_scheme(preference: ThemePreference) -> Signal<ColorScheme> {
    let scheme = use_signal(|| preference.resolve(system_prefers_dark()));

    #[cfg(target_arch = "wasm32")]
    {
        let _watcher = use_hook(move || {
            if !preference.follows_system() {
                return None;
            }
            watch::SchemeWatcher::attach(move |prefers_dark| {
                let mut scheme = scheme;
                let resolved = preference.resolve(prefers_dark);
                if *scheme.peek() != resolved {
                    tracing::info!(target: LOG_TARGET, "System color scheme changed to {resolved}");
                    scheme.set(resolved);
                }
            })
            .map(std::rc::Rc::new)
        });
    }

    scheme
}

#[cfg(target_arch = "wasm32")]
fn system_prefers_dark() -> bool {
    watch::dark_query().is_some_and(|query| query.matches())
}

#[cfg(not(target_arch = "wasm32"))]
const fn system_prefers_dark() -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
mod watch {
    use super::{DARK_QUERY, LOG_TARGET};
    use tracing::warn;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::MediaQueryList;

    pub fn dark_query() -> Option<MediaQueryList> {
        web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
    }

    /// `change` listener on the dark-scheme media query, removed on drop.
    pub struct SchemeWatcher {
        query: MediaQueryList,
        listener: Closure<dyn FnMut()>,
    }

    impl SchemeWatcher {
        pub fn attach(mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
            let query = dark_query()?;
            let observed = query.clone();
            let listener = Closure::wrap(
                Box::new(move || on_change(observed.matches())) as Box<dyn FnMut()>
            );

            if let Err(e) = query
                .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            {
                warn!(target: LOG_TARGET, "Cannot watch color scheme: {e:?}");
                return None;
            }

            Some(Self { query, listener })
        }
    }

    impl Drop for SchemeWatcher {
        fn drop(&mut self) {
            let _ = self
                .query
                .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref());
        }
    }
}
