use crate::channel::ChannelDescriptor;
use crate::document::{Document, LoadCallback, ScriptRequest};
use crate::error::Result;
use std::rc::Rc;
use tracing::{debug, info};

const LOG_TARGET: &str = "twitch_panel::loader";

/// Result of an [`ResourceLoader::ensure_loaded`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new script element was inserted and its load callback registered
    Requested,
    /// The marker is already present; nothing was inserted
    AlreadyPresent,
    /// No channels to show; nothing was inserted
    NoChannels,
}

/// Keeps the external embed script in the document at most once.
///
/// Idempotency is checked against the marker element itself rather than a
/// flag, since controller state may be discarded and recreated while the
/// document keeps the marker.
pub struct ResourceLoader {
    document: Rc<dyn Document>,
    request: ScriptRequest,
}

impl ResourceLoader {
    pub fn new(document: Rc<dyn Document>, request: ScriptRequest) -> Self {
        Self { document, request }
    }

    #[must_use]
    pub const fn request(&self) -> &ScriptRequest {
        &self.request
    }

    /// Whether the marker element is present in the document
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.document.contains(&self.request.marker_id)
    }

    /// Insert the script unless it is already present or there is nothing to show.
    ///
    /// `on_load` is only registered when a new element is inserted; otherwise it
    /// is dropped without being called.
    ///
    /// # Errors
    ///
    /// Returns an error if the host document refuses the insertion.
    pub fn ensure_loaded(
        &self,
        channels: Option<&[ChannelDescriptor]>,
        on_load: LoadCallback,
    ) -> Result<LoadOutcome> {
        if channels.is_none_or(<[ChannelDescriptor]>::is_empty) {
            debug!(target: LOG_TARGET, "No channels, skipping script load");
            return Ok(LoadOutcome::NoChannels);
        }

        if self.is_present() {
            debug!(
                target: LOG_TARGET,
                "Script marker #{} already present", self.request.marker_id
            );
            return Ok(LoadOutcome::AlreadyPresent);
        }

        self.document.append_script(&self.request, on_load)?;
        info!(
            target: LOG_TARGET,
            "Requested embed script {} (#{})", self.request.src, self.request.marker_id
        );
        Ok(LoadOutcome::Requested)
    }

    /// Remove the marker-tagged script, dropping any pending load callback.
    /// Returns `true` if an element was removed.
    pub fn release(&self) -> bool {
        let removed = self.document.remove(&self.request.marker_id);
        if removed {
            debug!(
                target: LOG_TARGET,
                "Released embed script #{}", self.request.marker_id
            );
        }
        removed
    }
}
