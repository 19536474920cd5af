//! List and map handling for path segments that land on a collection.
//!
//! Descending never mutates. Only the terminal segment under insert or
//! remove changes a collection, and that change happens before any typed
//! value is applied.

use config_edit_path::parse_index;
use config_edit_reflect::{List, Map, Reflect, ValueKind};

use crate::types::{Address, EditError, EditOperation, Note, Status};

/// What the terminal segment produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// Continue with a typed update of the addressed slot.
    Address(Address),
    /// The directive is complete.
    Finished(Status),
}

fn index(step: usize, segment: &str) -> Result<usize, EditError> {
    parse_index(segment).ok_or_else(|| EditError::InvalidIndex {
        step,
        segment: segment.to_string(),
    })
}

/// Whether anything is left to apply after an insertion.
fn has_value(value: &str) -> bool {
    !value.trim().is_empty()
}

// ── Lists ─────────────────────────────────────────────────────────────────

pub fn list_descend<'a>(
    list: &'a mut dyn List,
    step: usize,
    segment: &str,
) -> Result<&'a mut dyn Reflect, EditError> {
    let index = index(step, segment)?;
    let len = list.len();
    list.element_mut(index)
        .ok_or(EditError::IndexOutOfBounds { step, index, len })
}

pub fn list_terminal(
    list: &mut dyn List,
    step: usize,
    segment: &str,
    op: EditOperation,
    value: &str,
    notes: &mut Vec<Note>,
) -> Result<Terminal, EditError> {
    let index = index(step, segment)?;
    let len = list.len();
    match op {
        EditOperation::Insert => {
            let shape = list.element_shape();
            let element = shape.instantiate().ok_or_else(|| EditError::NoDefaultInstance {
                type_name: shape.name(),
            })?;
            let at = if index >= len {
                list.push_element(element)?;
                notes.push(Note::edit(format!(
                    "Adding new entry of type {} to end of the list (step {step})",
                    shape.name()
                )));
                len
            } else {
                list.insert_element(index, element)?;
                notes.push(Note::edit(format!(
                    "Inserting new entry of type {} to index {index} of the list (step {step})",
                    shape.name()
                )));
                index
            };
            if has_value(value) {
                Ok(Terminal::Address(Address::Index(at)))
            } else {
                Ok(Terminal::Finished(Status::Edited))
            }
        }
        EditOperation::Remove => {
            if list.remove_element(index).is_none() {
                return Err(EditError::IndexOutOfBounds { step, index, len });
            }
            notes.push(Note::edit(format!(
                "Removing entry at index {index} of the list (step {step})"
            )));
            Ok(Terminal::Finished(Status::Edited))
        }
        EditOperation::Overwrite | EditOperation::DefaultValue => {
            if index >= len {
                return Err(EditError::IndexOutOfBounds { step, index, len });
            }
            Ok(Terminal::Address(Address::Index(index)))
        }
    }
}

// ── Maps ──────────────────────────────────────────────────────────────────

pub fn map_descend<'a>(
    map: &'a mut dyn Map,
    step: usize,
    segment: &str,
) -> Result<&'a mut dyn Reflect, EditError> {
    map.value_mut(segment).ok_or_else(|| EditError::KeyNotFound {
        step,
        key: segment.to_string(),
    })
}

pub fn map_terminal(
    map: &mut dyn Map,
    step: usize,
    segment: &str,
    op: EditOperation,
    value: &str,
    notes: &mut Vec<Note>,
) -> Result<Terminal, EditError> {
    let key_not_found = || EditError::KeyNotFound {
        step,
        key: segment.to_string(),
    };
    match op {
        EditOperation::Insert => {
            let key_shape = map.key_shape();
            if key_shape.kind() != ValueKind::String {
                return Err(EditError::UnsupportedKeyType {
                    step,
                    key: segment.to_string(),
                    key_type: key_shape.name(),
                });
            }
            if map.contains(segment) {
                notes.push(Note::attempt(format!(
                    "Key {segment} already exists, ignoring the command to add it"
                )));
                return Ok(Terminal::Finished(Status::Unchanged));
            }
            let shape = map.value_shape();
            let entry = shape.instantiate().ok_or_else(|| EditError::NoDefaultInstance {
                type_name: shape.name(),
            })?;
            map.insert_value(segment, entry)?;
            notes.push(Note::edit(format!(
                "Adding key {segment} (step {step}) to target dictionary"
            )));
            if has_value(value) {
                Ok(Terminal::Address(Address::Key(segment.to_string())))
            } else {
                Ok(Terminal::Finished(Status::Edited))
            }
        }
        EditOperation::Remove => {
            map.remove_value(segment).ok_or_else(key_not_found)?;
            notes.push(Note::edit(format!(
                "Removing key {segment} (step {step}) from target dictionary"
            )));
            Ok(Terminal::Finished(Status::Edited))
        }
        EditOperation::Overwrite | EditOperation::DefaultValue => {
            if !map.contains(segment) {
                return Err(key_not_found());
            }
            Ok(Terminal::Address(Address::Key(segment.to_string())))
        }
    }
}
