#![forbid(unsafe_code)]

//! Personalization snapshot: column descriptors, column layout state, and
//! canonical-form identity.
//!
//! A snapshot carries three things:
//!
//! 1. `items` — key/label pairs, in table order, for listing columns in the
//!    personalization dialog. Labels are locale-dependent and are *never*
//!    part of snapshot identity or persistence.
//! 2. `column_items` — the actual layout: per-column visibility and order.
//!    This is the identity-bearing part and the persisted part.
//! 3. `dirty_flag_visible` — a UI hint (the dialog's reset affordance).
//!    Excluded from identity by construction: the canonical form only
//!    covers `column_items`.
//!
//! Two snapshots are equivalent iff their `column_items` serialize to the
//! same canonical JSON text. Whole-structure serialization equality is a
//! deliberate simplification over field-level diffing; it is cheap at the
//! column counts tables actually have (tens, not thousands).

use serde::{Deserialize, Serialize};

/// Stable identity and display label for one column.
///
/// The key is a structural local id (unique per table, reproducible across
/// reloads of the same view structure), never a volatile runtime handle.
/// Immutable once computed for a table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Layout state for one column: visibility plus display order.
///
/// `order` values are pairwise distinct within a snapshot and kept dense
/// (`0..N-1`) for determinism; the `column_items` sequence always mirrors
/// ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    pub key: String,
    pub visible: bool,
    pub order: usize,
}

impl ColumnState {
    #[must_use]
    pub fn new(key: impl Into<String>, visible: bool, order: usize) -> Self {
        Self {
            key: key.into(),
            visible,
            order,
        }
    }
}

/// One complete personalization state: dialog listing plus column layout.
///
/// # Invariants
///
/// 1. `items` and `column_items` cover the same key set (one entry per live
///    column, bijectively).
/// 2. `column_items` is sorted by `order`, and orders are dense `0..N-1`.
/// 3. Copies handed out as drafts are structurally independent: mutating a
///    draft never retroactively alters the snapshot it was cloned from
///    (`Clone` is deep, nothing here is shared).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalizationSnapshot {
    /// Key/label pairs for dialog display, in table order.
    pub items: Vec<ColumnDescriptor>,
    /// The layout itself, sorted by `order`.
    pub column_items: Vec<ColumnState>,
    /// Whether the dialog's reset affordance should show. UI hint only;
    /// never part of identity or persistence.
    pub dirty_flag_visible: bool,
}

impl PersonalizationSnapshot {
    #[must_use]
    pub fn new(items: Vec<ColumnDescriptor>, column_items: Vec<ColumnState>) -> Self {
        Self {
            items,
            column_items,
            dirty_flag_visible: false,
        }
    }

    /// Canonical serialized form: the JSON text of `column_items` alone.
    ///
    /// This is the comparison point for every dirty/equivalence decision in
    /// the engine, and doubles as the baseline string the store keeps.
    pub fn canonical(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.column_items)
    }

    /// Structural equivalence: equal canonical forms.
    ///
    /// `items` (labels) and `dirty_flag_visible` are intentionally ignored.
    pub fn equivalent(&self, other: &Self) -> Result<bool, serde_json::Error> {
        Ok(self.canonical()? == other.canonical()?)
    }

    /// Set one column's visibility. Returns `true` if a column with the
    /// given key exists and its value actually changed.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> bool {
        match self.column_items.iter_mut().find(|c| c.key == key) {
            Some(state) if state.visible != visible => {
                state.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Move one column to a new display position, shifting the others.
    ///
    /// `position` is clamped to the valid range. Orders are re-densified
    /// afterwards so invariant 2 holds. Returns `true` if the key exists
    /// and the sequence changed.
    pub fn move_to(&mut self, key: &str, position: usize) -> bool {
        let Some(from) = self.column_items.iter().position(|c| c.key == key) else {
            return false;
        };
        let to = position.min(self.column_items.len().saturating_sub(1));
        if from == to {
            return false;
        }
        let state = self.column_items.remove(from);
        self.column_items.insert(to, state);
        self.renumber();
        true
    }

    /// Replace the layout with a previously captured canonical form.
    ///
    /// Labels are not part of the canonical form; they are immutable for
    /// the session and stay as they are.
    pub fn restore_canonical(&mut self, canonical: &str) -> Result<(), serde_json::Error> {
        self.column_items = serde_json::from_str(canonical)?;
        Ok(())
    }

    /// Merge persisted column states into this snapshot.
    ///
    /// Entries whose key matches a live column overwrite that column's
    /// visibility and order; unknown keys are ignored and live columns not
    /// named keep their current values (forward compatibility in both
    /// directions of column-set skew). The sequence is then re-sorted by
    /// (merged order, previous position) and orders re-densified, so the
    /// distinct-order invariant survives partial variants.
    pub fn merge_column_items(&mut self, incoming: &[ColumnState]) {
        for state in &mut self.column_items {
            if let Some(saved) = incoming.iter().find(|s| s.key == state.key) {
                state.visible = saved.visible;
                state.order = saved.order;
            }
        }
        // Stable sort keeps previous relative position as the tiebreak for
        // columns the variant did not name.
        self.column_items.sort_by_key(|c| c.order);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (index, state) in self.column_items.iter_mut().enumerate() {
            state.order = index;
        }
    }
}
