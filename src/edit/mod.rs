//! Inline editing of sensor names.
//!
//! Each [`EditableField`] moves `Display -> Editing -> Committing -> Display`.
//! Every activation opens a new [`SessionToken`]; a remote result is applied
//! only while the field is still committing under that token.

pub mod board;
pub mod field;

pub use board::{commit, FieldBoard, SharedField};
pub use field::{CommitRequest, EditKey, EditableField, FieldState, FieldView, SessionToken};
