#![forbid(unsafe_code)]

//! Error taxonomy for the personalization model and engine.
//!
//! Three failure classes exist, and they are handled differently:
//!
//! - [`ResolutionError`] — a column's key or label cannot be derived during
//!   initialization. Fatal to setup: the registry never produces a snapshot
//!   with gaps, callers must propagate.
//! - [`MalformedVariantError`] — a loaded variant blob fails shape
//!   validation. Reported to the caller; the store keeps its prior state
//!   intact (a malformed variant is never partially applied).
//! - Re-entrancy guard hits (commit/cancel without a draft) are *not*
//!   errors at all. They can arise from double-click races and are treated
//!   as logged no-ops by the store.

use thiserror::Error;

/// A column's stable key or display label could not be determined.
///
/// This is a configuration error in the hosting view, not a recoverable
/// runtime condition: abort initialization rather than defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The column's runtime id does not belong to the owning scope, so no
    /// stable local key can be derived from it.
    #[error("column id {id:?} is outside the owning scope (prefix {prefix:?})")]
    OutsideScope { id: String, prefix: String },

    /// The column carries no label path to hand to the label resolver.
    #[error("column {key:?} has no resolvable label path")]
    MissingLabelPath { key: String },

    /// The label resolver does not know the given path.
    #[error("no label text for path {path:?}")]
    UnknownLabelPath { path: String },
}

/// A persisted variant blob failed shape validation.
///
/// The blob contract is `{ "columnItems": [{key, visible, order}, ...] }`;
/// anything that does not parse into that shape is rejected wholesale.
#[derive(Debug, Error)]
pub enum MalformedVariantError {
    /// The blob is not a JSON object with a `columnItems` member.
    #[error("variant blob has no columnItems sequence")]
    MissingColumnItems,

    /// `columnItems` is present but its entries are not valid column
    /// states.
    #[error("variant blob columnItems are malformed: {0}")]
    InvalidColumnItems(#[source] serde_json::Error),
}

/// Engine-level error wrapper.
///
/// Serialization failures are theoretical for these plain structs but are
/// propagated rather than swallowed so the store never panics.
#[derive(Debug, Error)]
pub enum P13nError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    MalformedVariant(#[from] MalformedVariantError),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The dialog definition could not be loaded by the dialog host.
    #[error("dialog definition {definition_id:?} failed to load: {message}")]
    DialogLoad {
        definition_id: String,
        message: String,
    },
}

impl P13nError {
    #[must_use]
    pub fn dialog_load(definition_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DialogLoad {
            definition_id: definition_id.into(),
            message: message.into(),
        }
    }
}
