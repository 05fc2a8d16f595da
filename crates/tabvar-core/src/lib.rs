#![forbid(unsafe_code)]

//! Value model for table column personalization.
//!
//! This crate holds the data that the personalization engine
//! (`tabvar-p13n`) moves around: per-column descriptors and layout state,
//! the [`PersonalizationSnapshot`] that bundles them, the persisted
//! [`VariantBlob`] wire shape, and the error taxonomy shared across the
//! workspace.
//!
//! # Role in tabvar
//! `tabvar-core` is deliberately collaborator-free: no table handles, no
//! dialog, no storage. Everything here is a plain value with `serde`
//! support, so snapshot identity can be defined as canonical-serialization
//! equality and tested without any widget machinery.

pub mod error;
pub mod snapshot;
pub mod wire;

pub use error::{MalformedVariantError, P13nError, ResolutionError};
pub use snapshot::{ColumnDescriptor, ColumnState, PersonalizationSnapshot};
pub use wire::VariantBlob;
