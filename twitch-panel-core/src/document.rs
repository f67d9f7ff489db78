//! Contract for the host document the panel mutates.
//!
//! Only two pieces of shared document state matter to the panel: the
//! marker-tagged script element and the mount anchor for the embed. Both are
//! reached through this trait so the lifecycle can run against a test double.

use crate::error::Result;

/// One-time notification fired when an injected script finishes executing.
pub type LoadCallback = Box<dyn FnOnce()>;

/// A script insertion tagged with a marker id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// Element id doubling as the document-wide resource marker
    pub marker_id: String,
    /// Script URL
    pub src: String,
}

impl ScriptRequest {
    pub fn new(marker_id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            marker_id: marker_id.into(),
            src: src.into(),
        }
    }
}

/// Host document operations used by the resource loader and embed controller.
///
/// Implementations must deliver load callbacks asynchronously (never from
/// inside [`Document::append_script`]) and must drop a script's pending load
/// callback when that script element is removed.
pub trait Document {
    /// Whether an element with this id is present
    fn contains(&self, id: &str) -> bool;

    /// Append a script element tagged with `request.marker_id` and register `on_load`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be created or attached.
    fn append_script(&self, request: &ScriptRequest, on_load: LoadCallback) -> Result<()>;

    /// Remove the element with this id (and any listener it owns).
    /// Returns `true` if an element was removed.
    fn remove(&self, id: &str) -> bool;

    /// Number of child elements under the element with this id (0 if absent)
    fn child_count(&self, id: &str) -> usize;

    /// Remove all children of the element with this id
    fn clear_children(&self, id: &str);
}
