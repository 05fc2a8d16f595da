#![forbid(unsafe_code)]

//! Collaborator fakes shared by the integration tests.

use async_trait::async_trait;

use tabvar_core::{P13nError, PersonalizationSnapshot, ResolutionError};
use tabvar_p13n::{
    DialogHandle, DialogHost, LabelResolver, PersonalizableInfo, TableColumn, TableSurface,
    VariantManager,
};

#[derive(Debug, Clone)]
pub struct FakeColumn {
    pub id: String,
    pub label_path: Option<String>,
    pub visible: Option<bool>,
    pub order: Option<usize>,
}

impl FakeColumn {
    pub fn new(id: &str, label_path: &str) -> Self {
        Self {
            id: id.to_owned(),
            label_path: Some(label_path.to_owned()),
            visible: None,
            order: None,
        }
    }
}

impl TableColumn for FakeColumn {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_path(&self) -> Option<&str> {
        self.label_path.as_deref()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn set_order(&mut self, order: usize) {
        self.order = Some(order);
    }
}

#[derive(Debug, Default)]
pub struct FakeTable {
    pub columns: Vec<FakeColumn>,
    pub render_requests: usize,
}

impl FakeTable {
    pub fn new(columns: Vec<FakeColumn>) -> Self {
        Self {
            columns,
            render_requests: 0,
        }
    }

    /// Three-column table: A, B, C, all visible, in order.
    pub fn abc() -> Self {
        Self::new(vec![
            FakeColumn::new("colA", "table.colA"),
            FakeColumn::new("colB", "table.colB"),
            FakeColumn::new("colC", "table.colC"),
        ])
    }

    pub fn column(&self, id: &str) -> &FakeColumn {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .unwrap_or_else(|| panic!("no column {id}"))
    }

    /// Visible column ids, sorted by applied order. Columns never touched
    /// by an apply keep their construction position and count as visible.
    pub fn visible_in_order(&self) -> Vec<&str> {
        let mut shown: Vec<(usize, &str)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible.unwrap_or(true))
            .map(|(pos, c)| (c.order.unwrap_or(pos), c.id.as_str()))
            .collect();
        shown.sort();
        shown.into_iter().map(|(_, id)| id).collect()
    }
}

impl TableSurface for FakeTable {
    type Column = FakeColumn;

    fn columns(&self) -> &[FakeColumn] {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut [FakeColumn] {
        &mut self.columns
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}

/// Resolves `table.<key>` paths to a fixed uppercase label.
pub struct SuffixResolver;

impl LabelResolver for SuffixResolver {
    fn resolve(&self, path: &str) -> Result<String, ResolutionError> {
        path.strip_prefix("table.")
            .map(str::to_uppercase)
            .ok_or_else(|| ResolutionError::UnknownLabelPath {
                path: path.to_owned(),
            })
    }
}

#[derive(Debug, Default)]
pub struct FakeDialog {
    pub opens: usize,
    pub closes: usize,
    pub bound: Option<PersonalizationSnapshot>,
}

impl DialogHandle for FakeDialog {
    fn bind(&mut self, model: &PersonalizationSnapshot) {
        self.bound = Some(model.clone());
    }

    fn open(&mut self) {
        self.opens += 1;
    }

    fn close(&mut self) {
        self.closes += 1;
    }
}

#[derive(Debug, Default)]
pub struct CountingDialogHost {
    pub loads: usize,
}

#[async_trait(?Send)]
impl DialogHost for CountingDialogHost {
    type Dialog = FakeDialog;

    async fn load(&mut self, _definition_id: &str) -> Result<FakeDialog, P13nError> {
        self.loads += 1;
        Ok(FakeDialog::default())
    }
}

#[derive(Debug, Default)]
pub struct RecordingVariantManager {
    pub registered: Vec<PersonalizableInfo>,
    pub modified_signals: Vec<bool>,
}

impl VariantManager for RecordingVariantManager {
    fn register(&mut self, info: PersonalizableInfo) {
        self.registered.push(info);
    }

    fn mark_modified(&mut self, modified: bool) {
        self.modified_signals.push(modified);
    }
}
