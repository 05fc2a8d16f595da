#![forbid(unsafe_code)]

//! Variant-management contract.
//!
//! The variant store (save/load/list of named variants) is an external
//! collaborator. The engine's side of the bargain is small: register the
//! table as a personalizable target under a persistency key, flip the
//! store's modified flag after commits, and answer `fetch`/`apply` calls
//! with the opaque wire blob.

use crate::Result;

/// What kind of control a persistency key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Table,
}

/// Registration record for one personalizable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalizableInfo {
    /// Key under which the variant store files this control's data.
    pub key_name: String,
    pub kind: TargetKind,
}

impl PersonalizableInfo {
    #[must_use]
    pub fn table(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            kind: TargetKind::Table,
        }
    }
}

/// External variant-management collaborator.
pub trait VariantManager {
    /// Announce a personalizable control. Called once during
    /// initialization, before any modified signal.
    fn register(&mut self, info: PersonalizableInfo);

    /// Set or clear the "current variant has unsaved changes" marker shown
    /// next to the variant name.
    fn mark_modified(&mut self, modified: bool);
}

/// The two functions the variant store invokes on save/load, implemented by
/// the controller and handed to the host's storage machinery.
pub trait PersonalizableTarget {
    fn persistency_key(&self) -> &str;

    /// Produce the opaque blob to persist (`serializeForPersistence`).
    fn fetch_variant(&self) -> Result<serde_json::Value>;

    /// Validate and apply a previously persisted blob. A malformed blob is
    /// rejected wholesale: prior state stays intact and the error is
    /// surfaced to the caller for user-facing reporting.
    fn apply_variant(&mut self, blob: &serde_json::Value) -> Result<()>;
}
