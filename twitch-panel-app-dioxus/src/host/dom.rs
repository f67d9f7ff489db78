use std::cell::RefCell;
use std::collections::HashMap;
use tracing::warn;
use twitch_panel_core::{Document, LoadCallback, PanelError, Result, ScriptRequest};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::LOG_TARGET;

/// [`Document`] over the page's DOM.
pub struct WebDocument {
    document: web_sys::Document,
    /// `load` listeners of injected scripts, keyed by element id
    load_listeners: RefCell<HashMap<String, Closure<dyn FnMut()>>>,
}

impl WebDocument {
    pub fn new(window: &web_sys::Window) -> Option<Self> {
        let Some(document) = window.document() else {
            warn!(target: LOG_TARGET, "Window has no document");
            return None;
        };
        Some(Self {
            document,
            load_listeners: RefCell::new(HashMap::new()),
        })
    }
}

fn injection_error(value: &JsValue) -> PanelError {
    PanelError::ScriptInjection {
        reason: format!("{value:?}"),
    }
}

impl Document for WebDocument {
    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn append_script(&self, request: &ScriptRequest, on_load: LoadCallback) -> Result<()> {
        let body = self.document.body().ok_or_else(|| PanelError::ScriptInjection {
            reason: "document has no body".to_string(),
        })?;

        let script = self
            .document
            .create_element("script")
            .map_err(|e| injection_error(&e))?;
        script.set_id(&request.marker_id);
        script
            .set_attribute("src", &request.src)
            .map_err(|e| injection_error(&e))?;

        let mut pending = Some(on_load);
        let listener = Closure::wrap(Box::new(move || {
            if let Some(on_load) = pending.take() {
                on_load();
            }
        }) as Box<dyn FnMut()>);
        script
            .add_event_listener_with_callback("load", listener.as_ref().unchecked_ref())
            .map_err(|e| injection_error(&e))?;

        body.append_child(&script).map_err(|e| injection_error(&e))?;
        self.load_listeners
            .borrow_mut()
            .insert(request.marker_id.clone(), listener);
        Ok(())
    }

    fn remove(&self, id: &str) -> bool {
        let listener = self.load_listeners.borrow_mut().remove(id);
        let Some(element) = self.document.get_element_by_id(id) else {
            return false;
        };
        if let Some(listener) = &listener {
            let _ = element
                .remove_event_listener_with_callback("load", listener.as_ref().unchecked_ref());
        }
        element.remove();
        true
    }

    fn child_count(&self, id: &str) -> usize {
        self.document
            .get_element_by_id(id)
            .map_or(0, |element| {
                usize::try_from(element.child_element_count()).unwrap_or(usize::MAX)
            })
    }

    fn clear_children(&self, id: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_inner_html("");
        }
    }
}
