#![forbid(unsafe_code)]

//! In-crate fakes for the collaborator seams, used by unit tests only.
//! Integration tests carry their own copies under `tests/common`.

use async_trait::async_trait;

use tabvar_core::{P13nError, PersonalizationSnapshot, ResolutionError};

use crate::dialog::{DialogHandle, DialogHost};
use crate::projector::{TableColumn, TableSurface};
use crate::registry::LabelResolver;
use crate::variant::{PersonalizableInfo, VariantManager};

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

    pub fn without_label_path(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            label_path: None,
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

    pub fn into_columns(self) -> Vec<FakeColumn> {
        self.columns
    }

    pub fn column(&self, id: &str) -> &FakeColumn {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .unwrap_or_else(|| panic!("no column {id}"))
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

pub struct MapResolver {
    entries: Vec<(String, String)>,
}

impl MapResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

impl LabelResolver for MapResolver {
    fn resolve(&self, path: &str) -> Result<String, ResolutionError> {
        self.entries
            .iter()
            .find(|(k, _)| k == path)
            .map(|(_, v)| v.clone())
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
    pub fail: bool,
}

impl CountingDialogHost {
    pub fn failing() -> Self {
        Self {
            loads: 0,
            fail: true,
        }
    }
}

#[async_trait(?Send)]
impl DialogHost for CountingDialogHost {
    type Dialog = FakeDialog;

    async fn load(&mut self, definition_id: &str) -> Result<FakeDialog, P13nError> {
        self.loads += 1;
        if self.fail {
            return Err(P13nError::dialog_load(definition_id, "fragment missing"));
        }
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
