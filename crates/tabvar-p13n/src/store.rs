#![forbid(unsafe_code)]

//! Personalization state store: the dirty-tracking/undo state machine.
//!
//! The store keeps two comparison points apart, because "did the user
//! touch anything in this dialog session" and "does the result differ from
//! the saved variant" are different questions:
//!
//! - `committed` — authoritative state, matches what is applied to the
//!   table and/or the last-loaded variant;
//! - `undo_baseline` — canonical form of `committed` at the last variant
//!   load/save acknowledgment; the comparison point for the
//!   variant-modified flag and for the dialog's reset affordance.
//!
//! Collapsing these two causes false dirty flags after cancel-then-reopen
//! cycles, so the store never does. There is no separate dialog-open
//! baseline: the draft is copied from `committed` at open and `committed`
//! never changes while a session is active, so discarding the draft on
//! cancel restores exactly the state captured at open.
//!
//! # State machine
//!
//! ```text
//!            open_draft()                    commit() / cancel()
//!   Idle ────────────────────▶ Editing ──────────────────────────▶ Idle
//!    ▲                           │  ▲
//!    │                           └──┘ edit(), reset_to_undo_baseline()
//!    └── apply_variant() / acknowledge_saved() advance undo_baseline
//! ```
//!
//! Plain `commit()` deliberately does **not** advance `undo_baseline`:
//! repeated edit/commit cycles within one variant keep comparing against
//! the variant as it was saved, so the modified flag can switch back off
//! when the user undoes their changes by hand.

use tracing::{debug, warn};

use tabvar_core::{PersonalizationSnapshot, VariantBlob};

use crate::Result;

/// One visibility/order change applied to the draft from the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    SetVisible { key: String, visible: bool },
    MoveTo { key: String, position: usize },
}

/// Result of a successful (non-guarded) commit.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// Whether the committed state differs from the variant baseline; the
    /// value to forward to the variant manager's modified flag.
    pub modified: bool,
    /// The newly committed snapshot, for projection onto the table.
    pub snapshot: PersonalizationSnapshot,
}

/// The single owner of draft, committed state, and the variant baseline.
#[derive(Debug, Clone)]
pub struct P13nStore {
    committed: PersonalizationSnapshot,
    draft: Option<PersonalizationSnapshot>,
    undo_baseline: String,
}

impl P13nStore {
    /// Seed the store with the initial snapshot (the "standard" variant).
    pub fn new(initial: PersonalizationSnapshot) -> Result<Self> {
        let undo_baseline = initial.canonical()?;
        Ok(Self {
            committed: initial,
            draft: None,
            undo_baseline,
        })
    }

    #[must_use]
    pub fn committed(&self) -> &PersonalizationSnapshot {
        &self.committed
    }

    #[must_use]
    pub fn draft(&self) -> Option<&PersonalizationSnapshot> {
        self.draft.as_ref()
    }

    /// Whether a dialog session is in progress (a draft exists).
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    #[must_use]
    pub fn undo_baseline(&self) -> &str {
        &self.undo_baseline
    }

    /// Idle → Editing. Copies `committed` into a structurally independent
    /// draft.
    ///
    /// Re-entrant: if a draft already exists (double-press, dialog already
    /// open) it is reused untouched, so an in-progress session is never
    /// clobbered.
    pub fn open_draft(&mut self) -> &PersonalizationSnapshot {
        let draft = match self.draft.take() {
            Some(draft) => {
                debug!("open while editing; reusing existing draft");
                draft
            }
            None => {
                debug!("opened personalization draft");
                self.committed.clone()
            }
        };
        self.draft.insert(draft)
    }

    /// Apply one change to the draft and recompute the dirty flag against
    /// the *variant* baseline (not the dialog-open baseline).
    ///
    /// The returned value is also recorded on the draft as
    /// `dirty_flag_visible` so a bound dialog model can drive its reset
    /// affordance directly. A no-op without a draft.
    pub fn edit(&mut self, change: DraftEdit) -> Result<bool> {
        let Some(draft) = self.draft.as_mut() else {
            warn!(?change, "edit without an open draft ignored");
            return Ok(false);
        };
        match &change {
            DraftEdit::SetVisible { key, visible } => {
                draft.set_visible(key, *visible);
            }
            DraftEdit::MoveTo { key, position } => {
                draft.move_to(key, *position);
            }
        }
        let dirty = draft.canonical()? != self.undo_baseline;
        draft.dirty_flag_visible = dirty;
        debug!(?change, dirty, "applied draft edit");
        Ok(dirty)
    }

    /// Whether the draft currently differs from the variant baseline.
    /// `false` when no draft is open.
    pub fn is_dirty(&self) -> Result<bool> {
        match &self.draft {
            Some(draft) => Ok(draft.canonical()? != self.undo_baseline),
            None => Ok(false),
        }
    }

    /// Editing → Idle. Promotes the draft to `committed` and reports
    /// whether the result differs from the variant baseline.
    ///
    /// `undo_baseline` is *not* advanced here; only
    /// [`apply_variant`](Self::apply_variant) and
    /// [`acknowledge_saved`](Self::acknowledge_saved) move it. Returns
    /// `None` without a draft (double-click race): nothing changes, no
    /// modified signal should be sent.
    pub fn commit(&mut self) -> Result<Option<CommitOutcome>> {
        let Some(draft) = self.draft.take() else {
            warn!("commit without an open draft ignored");
            return Ok(None);
        };
        let modified = draft.canonical()? != self.undo_baseline;
        self.committed = draft;
        debug!(modified, "committed personalization draft");
        Ok(Some(CommitOutcome {
            modified,
            snapshot: self.committed.clone(),
        }))
    }

    /// Editing → Idle. Discards the draft and every edit made during this
    /// dialog session; `committed` and `undo_baseline` are untouched and no
    /// modified signal is due.
    ///
    /// Returns whether a session was actually open. Closing the dialog via
    /// any path other than commit (backdrop click, escape) must funnel
    /// here.
    pub fn cancel(&mut self) -> bool {
        let had_draft = self.draft.take().is_some();
        if had_draft {
            debug!("cancelled personalization draft");
        } else {
            warn!("cancel without an open draft ignored");
        }
        had_draft
    }

    /// Replace the draft's layout with a fresh deserialization of the
    /// variant baseline. Idempotent; the dirty flag is always clear
    /// afterwards. A no-op without a draft.
    pub fn reset_to_undo_baseline(&mut self) -> Result<bool> {
        let Some(draft) = self.draft.as_mut() else {
            warn!("reset without an open draft ignored");
            return Ok(false);
        };
        draft.restore_canonical(&self.undo_baseline)?;
        draft.dirty_flag_visible = false;
        debug!("reset draft to variant baseline");
        Ok(true)
    }

    /// The persisted representation of the committed state
    /// (`fetchVariant` side of the variant-store contract).
    #[must_use]
    pub fn fetch_variant(&self) -> VariantBlob {
        VariantBlob::from_snapshot(&self.committed)
    }

    /// Merge a validated variant blob into `committed` and advance the
    /// variant baseline (`applyVariant` side of the contract).
    ///
    /// An in-progress draft is superseded: the dialog session it belonged
    /// to is discarded, as its baselines no longer describe anything.
    /// Returns the new committed snapshot for projection onto the table.
    pub fn apply_variant(&mut self, blob: &VariantBlob) -> Result<&PersonalizationSnapshot> {
        if self.draft.take().is_some() {
            warn!("variant applied while a draft was open; draft discarded");
        }
        self.committed.merge_column_items(&blob.column_items);
        self.undo_baseline = self.committed.canonical()?;
        debug!(
            columns = blob.column_items.len(),
            "applied variant and advanced baseline"
        );
        Ok(&self.committed)
    }

    /// Advance the variant baseline to the current committed state after
    /// the variant store acknowledges a save. From here on, "modified"
    /// means "differs from what was just saved".
    pub fn acknowledge_saved(&mut self) -> Result<()> {
        self.undo_baseline = self.committed.canonical()?;
        debug!("variant save acknowledged; baseline advanced");
        Ok(())
    }
}
