#![forbid(unsafe_code)]

//! Table projector: pushes a committed snapshot back onto the live table.
//!
//! The projector only ever talks to the table through [`TableSurface`] and
//! [`TableColumn`]; rendering and column-widget lifecycle stay on the
//! host's side of that seam.

use tracing::{debug, warn};

use tabvar_core::PersonalizationSnapshot;

use crate::registry::IdScope;

/// One live column handle exposed by the hosting table.
pub trait TableColumn {
    /// The column's runtime id (scope-prefixed, volatile across views but
    /// stable within one).
    fn id(&self) -> &str;

    /// Path of the column's header text in the host's label bundle, if the
    /// column carries one.
    fn label_path(&self) -> Option<&str>;

    fn set_visible(&mut self, visible: bool);

    fn set_order(&mut self, order: usize);
}

/// The live table, reduced to what personalization needs.
pub trait TableSurface {
    type Column: TableColumn;

    /// Column handles in current display order.
    fn columns(&self) -> &[Self::Column];

    fn columns_mut(&mut self) -> &mut [Self::Column];

    /// Ask the table to re-render. The projector calls this once per
    /// [`apply`], after all columns are updated, so a full variant load
    /// costs one layout pass rather than one per column.
    fn request_render(&mut self);
}

/// Project a snapshot's layout onto the live table.
///
/// Each column state is matched to a live column by stable key. Snapshot
/// entries without a live counterpart are skipped, and live columns the
/// snapshot does not name are left untouched: variants saved against an
/// older column set must not disturb columns added since.
pub fn apply<T: TableSurface>(table: &mut T, scope: &IdScope, snapshot: &PersonalizationSnapshot) {
    for state in &snapshot.column_items {
        let column = table
            .columns_mut()
            .iter_mut()
            .find(|c| scope.local_id(c.id()) == Some(state.key.as_str()));
        match column {
            Some(column) => {
                column.set_visible(state.visible);
                column.set_order(state.order);
            }
            None => {
                warn!(key = %state.key, "snapshot names a column the table does not have; skipping");
            }
        }
    }
    table.request_render();
    debug!(
        columns = snapshot.column_items.len(),
        "applied personalization to table"
    );
}
