#![forbid(unsafe_code)]

//! Personalization engine for tabular widgets.
//!
//! Users reorder and hide columns, save the arrangement as a named variant,
//! and reload it later. This crate owns the state machine that makes that
//! reliable: the dirty-tracking/undo model reconciling the three coexisting
//! representations of column layout:
//!
//! 1. the live table (what is rendered right now),
//! 2. the working draft edited inside the personalization dialog, and
//! 3. the persisted variant baseline the "modified" flag is measured
//!    against.
//!
//! # How it fits in the system
//! The visual table, the dialog, and the variant store stay external: they
//! are reached through the collaborator traits in [`projector`],
//! [`dialog`], and [`variant`]. The [`controller`] facade wires a table to
//! a store and drives the open/edit/commit/cancel cycle; hosts that need
//! finer control can use [`store::P13nStore`] directly.
//!
//! Control flow: [`registry`] builds the initial snapshot once at
//! initialization, the store is seeded with it, dialog cycles mutate only
//! the store's draft, and on commit the [`projector`] pushes the result
//! onto the live table. Variant save/load round-trips through the wire blob
//! in `tabvar-core` with the store as source and sink.

pub mod controller;
pub mod dialog;
pub mod projector;
pub mod registry;
pub mod store;
pub mod variant;

pub use controller::{P13nConfig, P13nController};
pub use dialog::{DialogHandle, DialogHost, DialogSlot};
pub use projector::{TableColumn, TableSurface};
pub use registry::{IdScope, LabelResolver, build_initial_snapshot};
pub use store::{CommitOutcome, DraftEdit, P13nStore};
pub use variant::{PersonalizableInfo, PersonalizableTarget, TargetKind, VariantManager};

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, tabvar_core::P13nError>;

#[cfg(test)]
pub(crate) mod test_fixtures;
