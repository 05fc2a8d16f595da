#![forbid(unsafe_code)]

//! Controller facade: wires table, dialog host, and variant manager to one
//! [`P13nStore`] and drives the personalization cycle end to end.
//!
//! The controller is the piece a host embeds next to its table widget. It
//! builds the initial snapshot, registers the table with the variant
//! manager, and translates dialog button presses into store transitions
//! plus the matching collaborator side effects (modified signal, table
//! projection, dialog open/close).

use tracing::debug;

use tabvar_core::VariantBlob;

use crate::Result;
use crate::dialog::{DialogHandle, DialogHost, DialogSlot};
use crate::projector::{self, TableSurface};
use crate::registry::{self, IdScope, LabelResolver};
use crate::store::{CommitOutcome, DraftEdit, P13nStore};
use crate::variant::{PersonalizableInfo, PersonalizableTarget, VariantManager};

/// Dialog definition loaded when the config does not name another one.
pub const DEFAULT_DIALOG_DEFINITION: &str = "tabvar.p13n.ColumnsDialog";

/// Controller construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P13nConfig {
    /// Key under which the variant store files this table's data.
    pub persistency_key: String,
    /// Id of the dialog definition the host loads on first open.
    pub dialog_definition_id: String,
}

impl P13nConfig {
    #[must_use]
    pub fn new(persistency_key: impl Into<String>) -> Self {
        Self {
            persistency_key: persistency_key.into(),
            dialog_definition_id: DEFAULT_DIALOG_DEFINITION.to_owned(),
        }
    }

    #[must_use]
    pub fn dialog_definition_id(mut self, definition_id: impl Into<String>) -> Self {
        self.dialog_definition_id = definition_id.into();
        self
    }
}

/// Personalization controller for one table.
pub struct P13nController<T, H, V>
where
    T: TableSurface,
    H: DialogHost,
    V: VariantManager,
{
    table: T,
    host: H,
    variants: V,
    scope: IdScope,
    store: P13nStore,
    dialog: DialogSlot<H::Dialog>,
    persistency_key: String,
}

impl<T, H, V> P13nController<T, H, V>
where
    T: TableSurface,
    H: DialogHost,
    V: VariantManager,
{
    /// Build the initial snapshot from the table, seed the store, and
    /// register with the variant manager.
    ///
    /// Initialization finishes by clearing the modified flag: the freshly
    /// derived standard layout *is* the current variant. A column that
    /// cannot be resolved aborts the whole setup.
    pub fn initialize<R: LabelResolver>(
        table: T,
        scope: IdScope,
        resolver: &R,
        host: H,
        mut variants: V,
        config: P13nConfig,
    ) -> Result<Self> {
        let initial = registry::build_initial_snapshot(&table, &scope, resolver)?;
        let store = P13nStore::new(initial)?;
        variants.register(PersonalizableInfo::table(config.persistency_key.clone()));
        variants.mark_modified(false);
        debug!(key = %config.persistency_key, "personalization initialized");
        Ok(Self {
            table,
            host,
            variants,
            scope,
            store,
            dialog: DialogSlot::new(config.dialog_definition_id),
            persistency_key: config.persistency_key,
        })
    }

    /// Open the personalization dialog (Idle → Editing).
    ///
    /// Loads the dialog definition on first use and reuses the cached
    /// instance afterwards; an open while already editing re-binds the
    /// existing draft instead of clobbering it. The load is awaited before
    /// the draft is created: a failed load leaves the store idle, so there
    /// is never an Editing session without a live dialog behind it.
    pub async fn open(&mut self) -> Result<()> {
        let dialog = self.dialog.get_or_load(&mut self.host).await?;
        let model = self.store.open_draft().clone();
        dialog.bind(&model);
        dialog.open();
        Ok(())
    }

    /// Forward one dialog edit to the draft. Returns the recomputed dirty
    /// state (draft vs. variant baseline) and re-binds the dialog model so
    /// the item list reorders and the reset affordance updates.
    pub fn edit(&mut self, change: DraftEdit) -> Result<bool> {
        let dirty = self.store.edit(change)?;
        self.rebind_dialog();
        Ok(dirty)
    }

    /// Commit the dialog session (Editing → Idle).
    ///
    /// Signals the variant manager, projects the committed snapshot onto
    /// the table, and closes the dialog. A commit with no open session is a
    /// no-op returning `None`.
    pub fn commit(&mut self) -> Result<Option<CommitOutcome>> {
        let Some(outcome) = self.store.commit()? else {
            return Ok(None);
        };
        self.variants.mark_modified(outcome.modified);
        projector::apply(&mut self.table, &self.scope, &outcome.snapshot);
        if let Some(dialog) = self.dialog.loaded_mut() {
            dialog.close();
        }
        Ok(Some(outcome))
    }

    /// Cancel the dialog session (Editing → Idle): discard the draft, close
    /// the dialog, touch nothing else. No modified signal is sent.
    pub fn cancel(&mut self) -> bool {
        let had_draft = self.store.cancel();
        if had_draft {
            if let Some(dialog) = self.dialog.loaded_mut() {
                dialog.close();
            }
        }
        had_draft
    }

    /// The host closed the dialog through some path the engine did not
    /// drive (backdrop click, escape). Same semantics as [`cancel`], minus
    /// the close call: the dialog is already gone, and the store must not
    /// stay in Editing against a stale reference.
    ///
    /// [`cancel`]: Self::cancel
    pub fn dialog_dismissed(&mut self) -> bool {
        self.store.cancel()
    }

    /// Replace the draft with the variant baseline (the dialog's reset
    /// button). The dirty flag is clear afterwards.
    pub fn reset_to_undo_baseline(&mut self) -> Result<bool> {
        let did_reset = self.store.reset_to_undo_baseline()?;
        self.rebind_dialog();
        Ok(did_reset)
    }

    /// Tell the store a variant save was acknowledged: from now on,
    /// "modified" means "differs from what was just saved".
    pub fn variant_saved(&mut self) -> Result<()> {
        self.store.acknowledge_saved()
    }

    #[must_use]
    pub fn store(&self) -> &P13nStore {
        &self.store
    }

    #[must_use]
    pub fn table(&self) -> &T {
        &self.table
    }

    #[must_use]
    pub fn variants(&self) -> &V {
        &self.variants
    }

    fn rebind_dialog(&mut self) {
        if let Some(dialog) = self.dialog.loaded_mut() {
            if let Some(draft) = self.store.draft() {
                dialog.bind(draft);
            }
        }
    }
}

impl<T, H, V> PersonalizableTarget for P13nController<T, H, V>
where
    T: TableSurface,
    H: DialogHost,
    V: VariantManager,
{
    fn persistency_key(&self) -> &str {
        &self.persistency_key
    }

    fn fetch_variant(&self) -> Result<serde_json::Value> {
        Ok(self.store.fetch_variant().to_value()?)
    }

    fn apply_variant(&mut self, blob: &serde_json::Value) -> Result<()> {
        // Validate fully before touching anything: a malformed blob must
        // leave store, table, and dialog exactly as they were.
        let blob = VariantBlob::from_value(blob)?;
        let was_editing = self.store.is_editing();
        let snapshot = self.store.apply_variant(&blob)?.clone();
        projector::apply(&mut self.table, &self.scope, &snapshot);
        if was_editing {
            if let Some(dialog) = self.dialog.loaded_mut() {
                dialog.close();
            }
        }
        Ok(())
    }
}
