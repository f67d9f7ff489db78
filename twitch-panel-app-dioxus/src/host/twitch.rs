//! Bindings to the `Twitch.Embed` global installed by the embed script.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use twitch_panel_core::{
    EmbedApi, EmbedInstance, EmbedOptions, ListenerId, PanelError, PlayerHandle, ReadyCallback,
    Result, VIDEO_READY_EVENT,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::LOG_TARGET;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Twitch)]
    type Embed;

    #[wasm_bindgen(constructor, js_namespace = Twitch, catch)]
    fn new(anchor_id: &str, options: &JsValue) -> std::result::Result<Embed, JsValue>;

    #[wasm_bindgen(method, js_name = addEventListener)]
    fn add_event_listener(this: &Embed, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getPlayer)]
    fn get_player(this: &Embed) -> Player;

    type Player;

    #[wasm_bindgen(method, js_name = setMuted)]
    fn set_muted(this: &Player, muted: bool);

    #[wasm_bindgen(method)]
    fn play(this: &Player);

    #[wasm_bindgen(method, js_name = setChannel)]
    fn set_channel(this: &Player, channel: &str);
}

fn creation_error(reason: impl std::fmt::Debug) -> PanelError {
    PanelError::EmbedCreation {
        reason: format!("{reason:?}"),
    }
}

/// [`EmbedApi`] over the page's `Twitch.Embed` constructor.
pub struct TwitchEmbedApi;

impl EmbedApi for TwitchEmbedApi {
    fn create(&self, anchor_id: &str, options: &EmbedOptions) -> Result<Box<dyn EmbedInstance>> {
        let global_present = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Twitch"))
            .unwrap_or(false);
        if !global_present {
            return Err(PanelError::EmbedUnavailable);
        }

        let json = serde_json::to_string(options).map_err(creation_error)?;
        let options = js_sys::JSON::parse(&json).map_err(creation_error)?;
        let embed = Embed::new(anchor_id, &options).map_err(creation_error)?;
        debug!(target: LOG_TARGET, "Created Twitch.Embed in #{anchor_id}");

        Ok(Box::new(TwitchEmbed {
            embed,
            ready: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
            next_listener: 0,
        }))
    }
}

type ReadySlot = Rc<RefCell<Option<(ListenerId, ReadyCallback)>>>;

struct TwitchEmbed {
    embed: Embed,
    ready: ReadySlot,
    /// JS-side listeners; `Twitch.Embed` offers no way to unregister them
    listeners: Vec<Closure<dyn FnMut()>>,
    next_listener: u64,
}

impl EmbedInstance for TwitchEmbed {
    fn on_ready(&mut self, callback: ReadyCallback) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        *self.ready.borrow_mut() = Some((id, callback));

        let slot = Rc::clone(&self.ready);
        let listener = Closure::wrap(Box::new(move || {
            let pending = slot.borrow_mut().take();
            if let Some((_, callback)) = pending {
                callback();
            }
        }) as Box<dyn FnMut()>);
        self.embed
            .add_event_listener(VIDEO_READY_EVENT, listener.as_ref().unchecked_ref());
        self.listeners.push(listener);
        id
    }

    fn remove_ready_listener(&mut self, id: ListenerId) {
        let mut pending = self.ready.borrow_mut();
        if pending.as_ref().is_some_and(|(listener, _)| *listener == id) {
            *pending = None;
        }
    }

    fn player(&self) -> Box<dyn PlayerHandle> {
        Box::new(TwitchPlayer(self.embed.get_player()))
    }
}

struct TwitchPlayer(Player);

impl PlayerHandle for TwitchPlayer {
    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn play(&self) {
        self.0.play();
    }

    fn set_channel(&self, login_id: &str) {
        self.0.set_channel(login_id);
    }
}
