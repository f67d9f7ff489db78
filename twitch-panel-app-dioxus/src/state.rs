use dioxus::prelude::*;
use twitch_panel_core::{ChannelDescriptor, LifecycleState, PanelSnapshot};

/// Reactive mirror of the embed controller, written by its observer.
#[derive(Clone, Copy)]
pub struct PanelState {
    pub lifecycle: Signal<LifecycleState>,
    /// Highlighted entry in the channel list
    pub selected_index: Signal<usize>,
    /// Descriptor of the selected channel
    pub channel: Signal<Option<ChannelDescriptor>>,
    /// The player handle exists
    pub ready: Signal<bool>,
}

impl PanelState {
    /// Must be called from inside a hook.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: Signal::new(LifecycleState::Uninitialized),
            selected_index: Signal::new(0),
            channel: Signal::new(None),
            ready: Signal::new(false),
        }
    }

    /// Copy a controller snapshot into the signals, touching only what changed.
    pub fn apply(&mut self, snapshot: &PanelSnapshot) {
        if *self.lifecycle.peek() != snapshot.state {
            self.lifecycle.set(snapshot.state);
        }
        if *self.selected_index.peek() != snapshot.selected_index {
            self.selected_index.set(snapshot.selected_index);
        }
        if *self.channel.peek() != snapshot.channel {
            self.channel.set(snapshot.channel.clone());
        }
        if *self.ready.peek() != snapshot.ready {
            self.ready.set(snapshot.ready);
        }
    }

    /// Metadata to show under the player. Only present once the player is ready.
    #[must_use]
    pub fn metadata(&self) -> Option<ChannelDescriptor> {
        if *self.ready.read() {
            self.channel.read().clone()
        } else {
            None
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
