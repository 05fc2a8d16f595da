#![forbid(unsafe_code)]

//! Dialog lifecycle: memoized one-shot load of the personalization dialog.
//!
//! The dialog's visual definition is loaded asynchronously by the host
//! environment. [`DialogSlot`] requests it once and caches the handle for
//! the lifetime of the controller, so every later `open()` reuses the same
//! dialog instance. The engine is single-threaded and cooperative: loading
//! is a one-shot future the open path awaits, never a background thread.

use async_trait::async_trait;
use tracing::debug;

use tabvar_core::PersonalizationSnapshot;

use crate::Result;

/// A loaded dialog instance.
///
/// The visual layout stays on the host's side; the engine only binds a
/// model to it and toggles it open/closed.
pub trait DialogHandle {
    /// Bind (or re-bind) the dialog's model. Called on every draft change
    /// so the list reorders and the reset affordance follows
    /// `dirty_flag_visible`.
    fn bind(&mut self, model: &PersonalizationSnapshot);

    fn open(&mut self);

    fn close(&mut self);
}

/// Host collaborator that loads dialog definitions.
#[async_trait(?Send)]
pub trait DialogHost {
    type Dialog: DialogHandle;

    /// Load the dialog definition. Invoked at most once per [`DialogSlot`];
    /// failures are propagated and the slot stays empty so a later open can
    /// retry.
    async fn load(&mut self, definition_id: &str) -> Result<Self::Dialog>;
}

/// Lazily loaded, memoized dialog handle.
///
/// The slot owns exclusive access to the controller's dialog, so a second
/// `open()` during the first load cannot start a duplicate load: callers
/// serialize on `&mut self`, and once the handle is cached every subsequent
/// call resolves against the same instance.
#[derive(Debug)]
pub struct DialogSlot<D> {
    definition_id: String,
    dialog: Option<D>,
}

impl<D: DialogHandle> DialogSlot<D> {
    #[must_use]
    pub fn new(definition_id: impl Into<String>) -> Self {
        Self {
            definition_id: definition_id.into(),
            dialog: None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dialog.is_some()
    }

    /// The cached handle, if the definition has been loaded.
    #[must_use]
    pub fn loaded_mut(&mut self) -> Option<&mut D> {
        self.dialog.as_mut()
    }

    /// Return the cached dialog, loading the definition on first use.
    pub async fn get_or_load<H>(&mut self, host: &mut H) -> Result<&mut D>
    where
        H: DialogHost<Dialog = D>,
    {
        let dialog = match self.dialog.take() {
            Some(dialog) => dialog,
            None => {
                debug!(definition_id = %self.definition_id, "loading dialog definition");
                host.load(&self.definition_id).await?
            }
        };
        Ok(self.dialog.insert(dialog))
    }
}
