#![forbid(unsafe_code)]

//! Column registry: derives the initial personalization snapshot from the
//! live table.
//!
//! Each column gets a stable key (its structural local id, reproducible
//! across reloads of the same view structure) and a human-readable label
//! resolved through the host's label collaborator. Both are derived once at
//! initialization; the column set is treated as fixed for the lifetime of
//! a personalization session.
//!
//! Failure here is a configuration error, never a recoverable runtime
//! condition: a column without a derivable key or label aborts setup rather
//! than producing a snapshot with gaps.

use tabvar_core::{ColumnDescriptor, ColumnState, PersonalizationSnapshot, ResolutionError};

use crate::projector::{TableColumn, TableSurface};

/// The identifier scope that owns the table's columns.
///
/// Column runtime ids are globally prefixed by their owning container
/// (e.g. `"detailView--"`); the stable personalization key is the id with
/// that prefix stripped. The scope is passed in explicitly at construction
/// time instead of being discovered by walking parent links at runtime, so
/// the registry never depends on a live object-graph traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdScope {
    prefix: String,
}

impl IdScope {
    /// Scope with the given id prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Scope that leaves ids untouched (column ids are already local).
    #[must_use]
    pub fn root() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Strip the scope prefix from a runtime id, yielding the stable local
    /// key. `None` if the id does not belong to this scope.
    #[must_use]
    pub fn local_id<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(&self.prefix)
    }

    pub(crate) fn local_key(&self, id: &str) -> Result<String, ResolutionError> {
        self.local_id(id)
            .map(str::to_owned)
            .ok_or_else(|| ResolutionError::OutsideScope {
                id: id.to_owned(),
                prefix: self.prefix.clone(),
            })
    }
}

/// Label resolution collaborator (typically an i18n bundle).
pub trait LabelResolver {
    /// Resolve a label path to display text.
    fn resolve(&self, path: &str) -> Result<String, ResolutionError>;
}

/// Build the initial snapshot from the table's current column sequence.
///
/// Columns are taken in display order: `visible = true` and
/// `order = positional index` for every column, which is the "standard"
/// variant every baseline comparison starts from.
pub fn build_initial_snapshot<T, R>(
    table: &T,
    scope: &IdScope,
    resolver: &R,
) -> Result<PersonalizationSnapshot, ResolutionError>
where
    T: TableSurface,
    R: LabelResolver,
{
    let columns = table.columns();
    let mut items = Vec::with_capacity(columns.len());
    let mut column_items = Vec::with_capacity(columns.len());

    for (index, column) in columns.iter().enumerate() {
        let key = scope.local_key(column.id())?;
        let path = column
            .label_path()
            .ok_or_else(|| ResolutionError::MissingLabelPath { key: key.clone() })?;
        let label = resolver.resolve(path)?;

        items.push(ColumnDescriptor::new(key.clone(), label));
        column_items.push(ColumnState::new(key, true, index));
    }

    Ok(PersonalizationSnapshot::new(items, column_items))
}
