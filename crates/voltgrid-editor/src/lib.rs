//! Schema-driven widget config dialogs for the voltgrid engine.
//!
//! A thin editor over the typed config schema in `voltgrid-core`: for
//! each widget type, [`fields::fields_for`] lists the ordered form
//! fields (device and register pickers fed by the catalog collaborator,
//! a condition builder sharing the evaluator's operator set, image
//! pickers backed by the preset library), and [`EditSession`] applies
//! field edits, validates, and emits the finished config through
//! `on_change`/`on_save` hooks. Persistence stays with the host.

pub mod error;
pub mod fields;
pub mod session;

pub use error::EditorError;
pub use fields::{
    FieldDescriptor, FieldKind, axis_options, device_options, fields_for, operator_options,
    register_options, series_kind_options, severity_options,
};
pub use session::EditSession;
