//! Embedded player lifecycle.
//!
//! Sequences `script loaded -> widget created -> widget ready` and routes
//! channel switches through the live player instead of recreating it.
//!
//! ```text
//! Uninitialized --update(channels)--> ScriptLoading --script load--> WidgetCreated --ready--> Ready
//!       ^                                                                                   |
//!       +----------------------- teardown / changed theme or channel set -------------------+
//! ```
//!
//! Host notifications hold only a weak reference to the controller and are
//! unregistered on teardown, so nothing fires into a torn-down lifecycle.

use crate::channel::{ChannelDescriptor, ChannelList, PanelInput};
use crate::config::EmbedConfig;
use crate::device::DeviceProbe;
use crate::document::Document;
use crate::error::{PanelError, Result};
use crate::loader::{LoadOutcome, ResourceLoader};
use crate::theme::ColorScheme;
use crate::widget::{EmbedApi, EmbedInstance, ListenerId, PlayerHandle};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "twitch_panel::controller";

/// Host services the controller depends on.
#[derive(Clone)]
pub struct PanelEnv {
    pub document: Rc<dyn Document>,
    pub embed_api: Rc<dyn EmbedApi>,
    pub device: Rc<dyn DeviceProbe>,
}

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    ScriptLoading,
    WidgetCreated,
    /// The only state in which playback commands are issued
    Ready,
}

enum Stage {
    Uninitialized,
    ScriptLoading,
    WidgetCreated {
        embed: Box<dyn EmbedInstance>,
        ready_listener: ListenerId,
    },
    Ready {
        // Kept alive for the player's lifetime
        _embed: Box<dyn EmbedInstance>,
        player: Box<dyn PlayerHandle>,
    },
}

impl Stage {
    const fn state(&self) -> LifecycleState {
        match self {
            Self::Uninitialized => LifecycleState::Uninitialized,
            Self::ScriptLoading => LifecycleState::ScriptLoading,
            Self::WidgetCreated { .. } => LifecycleState::WidgetCreated,
            Self::Ready { .. } => LifecycleState::Ready,
        }
    }
}

/// What the panel should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSnapshot {
    pub state: LifecycleState,
    pub selected_index: usize,
    /// Metadata of the selected channel
    pub channel: Option<ChannelDescriptor>,
    /// Whether a live player handle exists
    pub ready: bool,
}

/// Callback invoked after every transition or selection.
pub type SnapshotObserver = Box<dyn Fn(&PanelSnapshot)>;

struct Lifecycle {
    env: PanelEnv,
    config: EmbedConfig,
    loader: ResourceLoader,
    stage: Stage,
    channels: Option<ChannelList>,
    theme: ColorScheme,
    selected_index: usize,
    /// Inputs have been applied since construction or the last teardown
    started: bool,
}

impl Lifecycle {
    fn current_channel(&self) -> Option<&ChannelDescriptor> {
        self.channels.as_ref()?.get(self.selected_index)
    }

    fn snapshot(&self) -> PanelSnapshot {
        let state = self.stage.state();
        PanelSnapshot {
            state,
            selected_index: self.selected_index,
            channel: self.current_channel().cloned(),
            ready: state == LifecycleState::Ready,
        }
    }

    fn teardown(&mut self) {
        let previous = std::mem::replace(&mut self.stage, Stage::Uninitialized);
        debug!(target: LOG_TARGET, "Tearing down from {:?}", previous.state());

        match previous {
            Stage::WidgetCreated {
                mut embed,
                ready_listener,
            } => {
                embed.remove_ready_listener(ready_listener);
                self.env.document.clear_children(&self.config.anchor_id);
            }
            Stage::Ready { .. } => {
                self.env.document.clear_children(&self.config.anchor_id);
            }
            Stage::Uninitialized | Stage::ScriptLoading => {}
        }

        self.loader.release();
    }
}

struct Shared {
    lifecycle: RefCell<Lifecycle>,
    observer: RefCell<Option<SnapshotObserver>>,
}

impl Shared {
    fn notify(&self) {
        let snapshot = self.lifecycle.borrow().snapshot();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&snapshot);
        }
    }

    /// `Uninitialized -> ScriptLoading`
    fn start(shared: &Rc<Self>) {
        let mut guard = shared.lifecycle.borrow_mut();
        let lifecycle = &mut *guard;

        let Some(channels) = lifecycle.channels.clone().filter(|c| !c.is_empty()) else {
            debug!(target: LOG_TARGET, "No channels, embed not loaded");
            return;
        };

        lifecycle.stage = Stage::ScriptLoading;

        let weak = Rc::downgrade(shared);
        let on_load = Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                Self::handle_script_loaded(&shared);
            }
        });

        match lifecycle.loader.ensure_loaded(Some(&*channels), on_load) {
            Ok(LoadOutcome::Requested) => {
                debug!(target: LOG_TARGET, "Waiting for embed script");
            }
            Ok(LoadOutcome::AlreadyPresent) => {
                debug!(
                    target: LOG_TARGET,
                    "Embed script already requested by another mount"
                );
            }
            Ok(LoadOutcome::NoChannels) => {
                lifecycle.stage = Stage::Uninitialized;
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "{e}; panel will render without video");
            }
        }
    }

    /// `ScriptLoading -> WidgetCreated`
    fn handle_script_loaded(shared: &Rc<Self>) {
        {
            let mut guard = shared.lifecycle.borrow_mut();
            let lifecycle = &mut *guard;

            if !matches!(lifecycle.stage, Stage::ScriptLoading) {
                debug!(
                    target: LOG_TARGET,
                    "Ignoring script load in {:?}",
                    lifecycle.stage.state()
                );
                return;
            }

            let anchor_id = lifecycle.config.anchor_id.as_str();
            if lifecycle.env.document.child_count(anchor_id) != 0 {
                warn!(
                    target: LOG_TARGET,
                    "#{anchor_id} already has content, skipping embed creation"
                );
                return;
            }

            let Some(first) = lifecycle.channels.as_ref().and_then(|c| c.first()) else {
                return;
            };
            let options = lifecycle.config.embed_options(&first.login_id, lifecycle.theme);

            let mut embed = match lifecycle.env.embed_api.create(anchor_id, &options) {
                Ok(embed) => embed,
                Err(e) => {
                    warn!(target: LOG_TARGET, "{e}; panel will render without video");
                    return;
                }
            };

            let weak = Rc::downgrade(shared);
            let ready_listener = embed.on_ready(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::handle_widget_ready(&shared);
                }
            }));

            info!(
                target: LOG_TARGET,
                "Created embed for {} ({} theme)", options.channel, options.theme
            );
            lifecycle.stage = Stage::WidgetCreated {
                embed,
                ready_listener,
            };
        }
        shared.notify();
    }

    /// `WidgetCreated -> Ready`
    fn handle_widget_ready(shared: &Rc<Self>) {
        {
            let mut guard = shared.lifecycle.borrow_mut();
            let lifecycle = &mut *guard;

            let (mut embed, ready_listener) =
                match std::mem::replace(&mut lifecycle.stage, Stage::Uninitialized) {
                    Stage::WidgetCreated {
                        embed,
                        ready_listener,
                    } => (embed, ready_listener),
                    other => {
                        debug!(
                            target: LOG_TARGET,
                            "Ignoring readiness in {:?}",
                            other.state()
                        );
                        lifecycle.stage = other;
                        return;
                    }
                };
            embed.remove_ready_listener(ready_listener);

            let player = embed.player();
            // Creation-time mute is not always honored
            player.set_muted(true);

            // A selection made before readiness is applied now
            if lifecycle.selected_index != 0 {
                if let Some(channel) = lifecycle.current_channel() {
                    info!(
                        target: LOG_TARGET,
                        "Applying pending selection {}", channel.login_id
                    );
                    player.set_channel(&channel.login_id);
                }
            }

            if lifecycle.env.device.is_touch_device() {
                info!(target: LOG_TARGET, "Touch device, leaving playback paused");
            } else {
                player.play();
            }

            info!(target: LOG_TARGET, "Embedded player ready");
            lifecycle.stage = Stage::Ready {
                _embed: embed,
                player,
            };
        }
        shared.notify();
    }
}

/// Owns the embedded player for one mount of the panel.
///
/// Dropping the controller tears the lifecycle down.
pub struct EmbedController {
    shared: Rc<Shared>,
}

impl EmbedController {
    #[must_use]
    pub fn new(env: PanelEnv, config: EmbedConfig) -> Self {
        let loader = ResourceLoader::new(env.document.clone(), config.script_request());
        Self {
            shared: Rc::new(Shared {
                lifecycle: RefCell::new(Lifecycle {
                    env,
                    config,
                    loader,
                    stage: Stage::Uninitialized,
                    channels: None,
                    theme: ColorScheme::default(),
                    selected_index: 0,
                    started: false,
                }),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Register the observer, replacing any previous one.
    pub fn set_observer(&self, observer: SnapshotObserver) {
        *self.shared.observer.borrow_mut() = Some(observer);
    }

    /// Apply the panel's inputs.
    ///
    /// The first call starts the lifecycle. Later calls with the same channel
    /// list (by identity) and theme do nothing; otherwise the current embed
    /// is torn down and a fresh one is created, since theme and channel set
    /// are only configurable at creation time.
    pub fn update(&self, input: &PanelInput, theme: ColorScheme) {
        {
            let mut guard = self.shared.lifecycle.borrow_mut();
            let lifecycle = &mut *guard;

            let same_channels = match (&lifecycle.channels, &input.channels) {
                (Some(current), Some(next)) => Rc::ptr_eq(current, next),
                (None, None) => true,
                _ => false,
            };
            if lifecycle.started && same_channels && lifecycle.theme == theme {
                return;
            }

            if let Some(error) = &input.error {
                warn!(target: LOG_TARGET, "Channel data unavailable: {error}");
            }

            if lifecycle.stage.state() != LifecycleState::Uninitialized {
                info!(target: LOG_TARGET, "Inputs changed, restarting embed");
                lifecycle.teardown();
            }

            lifecycle.channels = input.channels.clone();
            lifecycle.theme = theme;
            lifecycle.selected_index = 0;
            lifecycle.started = true;
        }

        Shared::start(&self.shared);
        self.shared.notify();
    }

    /// Select the channel at `index`.
    ///
    /// Always updates the displayed channel. With a live player, also switches
    /// its stream and resumes playback; before readiness no widget call is made.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NoChannels`] without a channel list, or
    /// [`PanelError::ChannelOutOfRange`] for an invalid index. State is left
    /// unchanged in both cases.
    pub fn select_channel(&self, index: usize) -> Result<()> {
        {
            let mut guard = self.shared.lifecycle.borrow_mut();
            let lifecycle = &mut *guard;

            let Some(channels) = lifecycle.channels.as_ref() else {
                return Err(PanelError::NoChannels);
            };
            let Some(channel) = channels.get(index) else {
                warn!(
                    target: LOG_TARGET,
                    "Rejecting channel index {index} ({} available)",
                    channels.len()
                );
                return Err(PanelError::ChannelOutOfRange {
                    index,
                    len: channels.len(),
                });
            };

            lifecycle.selected_index = index;

            if let Stage::Ready { player, .. } = &lifecycle.stage {
                info!(target: LOG_TARGET, "Switching to {}", channel.login_id);
                player.set_channel(&channel.login_id);
                player.play();
            } else {
                debug!(
                    target: LOG_TARGET,
                    "Selected {} before player is ready", channel.login_id
                );
            }
        }
        self.shared.notify();
        Ok(())
    }

    /// Release everything this lifecycle holds and return to `Uninitialized`.
    ///
    /// Safe from any state. The next [`update`](Self::update) starts afresh.
    pub fn teardown(&self) {
        {
            let mut lifecycle = self.shared.lifecycle.borrow_mut();
            lifecycle.teardown();
            lifecycle.started = false;
        }
        self.shared.notify();
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.shared.lifecycle.borrow().stage.state()
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.shared.lifecycle.borrow().selected_index
    }

    #[must_use]
    pub fn current_channel(&self) -> Option<ChannelDescriptor> {
        self.shared.lifecycle.borrow().current_channel().cloned()
    }

    /// Whether a live, ready player handle is held
    #[must_use]
    pub fn has_player(&self) -> bool {
        self.state() == LifecycleState::Ready
    }

    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        self.shared.lifecycle.borrow().snapshot()
    }
}

impl Drop for EmbedController {
    fn drop(&mut self) {
        if let Ok(mut lifecycle) = self.shared.lifecycle.try_borrow_mut() {
            lifecycle.teardown();
        }
    }
}
