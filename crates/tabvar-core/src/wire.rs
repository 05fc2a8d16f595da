#![forbid(unsafe_code)]

//! Persisted variant wire format.
//!
//! The blob shape `{ "columnItems": [{key, visible, order}, ...] }` is the
//! stable contract with the variant store and MUST stay backward compatible
//! with previously saved variants: unknown JSON members are ignored on
//! load, and a blob is free to name only a subset of the current columns
//! (the store's merge treats missing keys as "not repositioned").
//!
//! Labels are deliberately absent from the wire: they are locale-dependent
//! and re-derived from the live table at load time.

use serde::{Deserialize, Serialize};

use crate::error::MalformedVariantError;
use crate::snapshot::{ColumnState, PersonalizationSnapshot};

/// The persisted form of one variant's table personalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantBlob {
    #[serde(rename = "columnItems")]
    pub column_items: Vec<ColumnState>,
}

impl VariantBlob {
    /// Capture the persisted part of a snapshot (layout only, no labels).
    #[must_use]
    pub fn from_snapshot(snapshot: &PersonalizationSnapshot) -> Self {
        Self {
            column_items: snapshot.column_items.clone(),
        }
    }

    /// Render the blob as the opaque JSON value handed to the variant
    /// store.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Validate and decode an opaque blob coming back from the variant
    /// store.
    ///
    /// Shape validation is all-or-nothing: a missing `columnItems` member
    /// or any malformed entry rejects the whole blob, so a caller never
    /// sees a partially decoded variant.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, MalformedVariantError> {
        let items = value
            .as_object()
            .and_then(|obj| obj.get("columnItems"))
            .ok_or(MalformedVariantError::MissingColumnItems)?;
        if !items.is_array() {
            return Err(MalformedVariantError::MissingColumnItems);
        }
        let column_items = serde_json::from_value(items.clone())
            .map_err(MalformedVariantError::InvalidColumnItems)?;
        Ok(Self { column_items })
    }
}
