//! Recording test doubles for the host document and embed surface.

use crate::channel::{ChannelDescriptor, PanelInput};
use crate::config::EmbedConfig;
use crate::controller::{EmbedController, PanelEnv};
use crate::document::{Document, LoadCallback, ScriptRequest};
use crate::error::{PanelError, Result};
use crate::widget::{
    EmbedApi, EmbedInstance, EmbedOptions, ListenerId, PlayerHandle, ReadyCallback,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

pub const MARKER_ID: &str = "twitch-script";

/// Every observable side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AppendScript(String),
    RemoveElement(String),
    ClearChildren(String),
    CreateEmbed { anchor: String, options: EmbedOptions },
    RemoveReadyListener,
    SetMuted(bool),
    Play,
    SetChannel(String),
}

impl Call {
    pub const fn is_player_command(&self) -> bool {
        matches!(self, Self::SetMuted(_) | Self::Play | Self::SetChannel(_))
    }
}

#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn player_commands(&self) -> Vec<Call> {
        self.0
            .borrow()
            .iter()
            .filter(|c| c.is_player_command())
            .cloned()
            .collect()
    }

    pub fn created_embeds(&self) -> Vec<(String, EmbedOptions)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::CreateEmbed { anchor, options } => Some((anchor.clone(), options.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| predicate(*c)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// In-memory document: scripts keyed by marker id, child counts keyed by element id.
pub struct FakeDocument {
    log: CallLog,
    scripts: RefCell<HashMap<String, Option<LoadCallback>>>,
    children: RefCell<HashMap<String, usize>>,
    insertions: Cell<usize>,
    reject: Cell<bool>,
}

impl FakeDocument {
    pub fn new(log: &CallLog) -> Rc<Self> {
        Rc::new(Self {
            log: log.clone(),
            scripts: RefCell::new(HashMap::new()),
            children: RefCell::new(HashMap::new()),
            insertions: Cell::new(0),
            reject: Cell::new(false),
        })
    }

    pub fn insertions(&self) -> usize {
        self.insertions.get()
    }

    pub fn reject_scripts(&self) {
        self.reject.set(true);
    }

    pub fn add_child(&self, id: &str) {
        *self.children.borrow_mut().entry(id.to_string()).or_default() += 1;
    }

    /// Fire the pending load callback of a script. Returns `false` if none is pending.
    pub fn finish_loading(&self, id: &str) -> bool {
        let callback = self
            .scripts
            .borrow_mut()
            .get_mut(id)
            .and_then(Option::take);
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl Document for FakeDocument {
    fn contains(&self, id: &str) -> bool {
        self.scripts.borrow().contains_key(id)
    }

    fn append_script(&self, request: &ScriptRequest, on_load: LoadCallback) -> Result<()> {
        if self.reject.get() {
            return Err(PanelError::ScriptInjection {
                reason: "document rejected script".into(),
            });
        }
        self.log.push(Call::AppendScript(request.marker_id.clone()));
        self.insertions.set(self.insertions.get() + 1);
        self.scripts
            .borrow_mut()
            .insert(request.marker_id.clone(), Some(on_load));
        Ok(())
    }

    fn remove(&self, id: &str) -> bool {
        let removed = self.scripts.borrow_mut().remove(id).is_some();
        if removed {
            self.log.push(Call::RemoveElement(id.to_string()));
        }
        removed
    }

    fn child_count(&self, id: &str) -> usize {
        self.children.borrow().get(id).copied().unwrap_or(0)
    }

    fn clear_children(&self, id: &str) {
        self.log.push(Call::ClearChildren(id.to_string()));
        self.children.borrow_mut().remove(id);
    }
}

#[derive(Default)]
struct ReadySlot {
    pending: RefCell<Option<(ListenerId, ReadyCallback)>>,
}

/// Embed factory that mounts into a [`FakeDocument`] anchor.
pub struct FakeEmbedApi {
    log: CallLog,
    document: Rc<FakeDocument>,
    embeds: RefCell<Vec<Rc<ReadySlot>>>,
    fail: Cell<bool>,
}

impl FakeEmbedApi {
    pub fn new(log: &CallLog, document: &Rc<FakeDocument>) -> Rc<Self> {
        Rc::new(Self {
            log: log.clone(),
            document: document.clone(),
            embeds: RefCell::new(Vec::new()),
            fail: Cell::new(false),
        })
    }

    pub fn fail_creation(&self) {
        self.fail.set(true);
    }

    /// Number of embeds created so far
    pub fn created(&self) -> usize {
        self.embeds.borrow().len()
    }

    /// Deliver readiness for the most recent embed. Returns `false` if no
    /// listener is registered.
    pub fn fire_ready(&self) -> bool {
        let Some(slot) = self.embeds.borrow().last().cloned() else {
            return false;
        };
        let pending = slot.pending.borrow_mut().take();
        match pending {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl EmbedApi for FakeEmbedApi {
    fn create(&self, anchor_id: &str, options: &EmbedOptions) -> Result<Box<dyn EmbedInstance>> {
        if self.fail.get() {
            return Err(PanelError::EmbedUnavailable);
        }
        self.log.push(Call::CreateEmbed {
            anchor: anchor_id.to_string(),
            options: options.clone(),
        });
        self.document.add_child(anchor_id);

        let slot = Rc::new(ReadySlot::default());
        self.embeds.borrow_mut().push(slot.clone());
        Ok(Box::new(FakeEmbed {
            log: self.log.clone(),
            slot,
            next_listener: 0,
        }))
    }
}

struct FakeEmbed {
    log: CallLog,
    slot: Rc<ReadySlot>,
    next_listener: u64,
}

impl EmbedInstance for FakeEmbed {
    fn on_ready(&mut self, callback: ReadyCallback) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        *self.slot.pending.borrow_mut() = Some((id, callback));
        id
    }

    fn remove_ready_listener(&mut self, id: ListenerId) {
        self.log.push(Call::RemoveReadyListener);
        let mut pending = self.slot.pending.borrow_mut();
        if pending.as_ref().is_some_and(|(listener, _)| *listener == id) {
            *pending = None;
        }
    }

    fn player(&self) -> Box<dyn PlayerHandle> {
        Box::new(FakePlayer {
            log: self.log.clone(),
        })
    }
}

struct FakePlayer {
    log: CallLog,
}

impl PlayerHandle for FakePlayer {
    fn set_muted(&self, muted: bool) {
        self.log.push(Call::SetMuted(muted));
    }

    fn play(&self) {
        self.log.push(Call::Play);
    }

    fn set_channel(&self, login_id: &str) {
        self.log.push(Call::SetChannel(login_id.to_string()));
    }
}

pub fn sample_channels() -> Vec<ChannelDescriptor> {
    vec![
        ChannelDescriptor::new("alpha", "Alpha", "Ranked 1v1", 1200),
        ChannelDescriptor::new("bravo", "Bravo", "Team games", 340),
        ChannelDescriptor::new("charlie", "Charlie", "Tournament cast", 56),
    ]
}

/// Shared fakes plus a switchable device classification.
pub struct Harness {
    pub log: CallLog,
    pub document: Rc<FakeDocument>,
    pub embed_api: Rc<FakeEmbedApi>,
    pub mobile: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new() -> Self {
        let log = CallLog::default();
        let document = FakeDocument::new(&log);
        let embed_api = FakeEmbedApi::new(&log, &document);
        Self {
            log,
            document,
            embed_api,
            mobile: Rc::new(Cell::new(false)),
        }
    }

    pub fn env(&self) -> PanelEnv {
        let mobile = self.mobile.clone();
        PanelEnv {
            document: self.document.clone(),
            embed_api: self.embed_api.clone(),
            device: Rc::new(move || mobile.get()),
        }
    }

    pub fn controller(&self) -> EmbedController {
        EmbedController::new(self.env(), EmbedConfig::default())
    }

    /// A fresh channel list (new identity on every call)
    pub fn input(&self) -> PanelInput {
        PanelInput::new(sample_channels())
    }

    pub fn finish_loading(&self) -> bool {
        self.document.finish_loading(MARKER_ID)
    }
}
