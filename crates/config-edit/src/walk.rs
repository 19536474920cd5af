//! Stepping a field path across a configuration graph.
//!
//! Every segment but the last descends: the first always names a field of
//! the root, later ones index a list, key a map or name a field depending on
//! what the previous segment landed on. The last segment is resolved against
//! its parent, which may mutate a collection (insert/remove) and otherwise
//! yields the address of the slot to update.

use config_edit_reflect::{Reflect, ReflectMut};

use crate::mutate::{list_descend, list_terminal, map_descend, map_terminal, Terminal};
use crate::slot::{self, Slot};
use crate::types::{Address, EditError, EditOperation, Note, Status};

/// Result of a successful walk.
pub enum Walked<'a> {
    Slot(Slot<'a>),
    Finished(Status),
}

fn null_target(step: usize, segment: &str) -> EditError {
    EditError::NullTarget {
        step,
        segment: segment.to_string(),
    }
}

fn descend<'a>(
    target: &'a mut dyn Reflect,
    step: usize,
    segment: &str,
) -> Result<&'a mut dyn Reflect, EditError> {
    let type_name = target.shape().name();
    match target.reflect_mut() {
        ReflectMut::Null => Err(null_target(step, segment)),
        ReflectMut::List(list) if step > 0 => list_descend(list, step, segment),
        ReflectMut::Map(map) if step > 0 => map_descend(map, step, segment),
        ReflectMut::Record(record) => {
            record.field_mut(segment).ok_or_else(|| EditError::FieldNotFound {
                step,
                segment: segment.to_string(),
                type_name,
            })
        }
        _ => Err(EditError::FieldNotFound {
            step,
            segment: segment.to_string(),
            type_name,
        }),
    }
}

fn terminal(
    target: &mut dyn Reflect,
    step: usize,
    segment: &str,
    op: EditOperation,
    value: &str,
    notes: &mut Vec<Note>,
) -> Result<Terminal, EditError> {
    let field_not_found = |type_name: String| EditError::FieldNotFound {
        step,
        segment: segment.to_string(),
        type_name,
    };
    match target.reflect_mut() {
        ReflectMut::Null => Err(null_target(step, segment)),
        ReflectMut::List(list) if step > 0 => list_terminal(list, step, segment, op, value, notes),
        ReflectMut::Map(map) if step > 0 => map_terminal(map, step, segment, op, value, notes),
        ReflectMut::Record(record) if record.has_field(segment) => {
            Ok(Terminal::Address(Address::Field(segment.to_string())))
        }
        ReflectMut::Record(record) => Err(field_not_found(record.shape().name())),
        ReflectMut::List(list) => Err(field_not_found(list.shape().name())),
        ReflectMut::Map(map) => Err(field_not_found(map.shape().name())),
        ReflectMut::Value(leaf) => Err(field_not_found(leaf.shape().name())),
    }
}

/// Walk `segments` from `root`. `segments` must not be empty.
pub fn walk<'a>(
    root: &'a mut dyn Reflect,
    segments: &[String],
    op: EditOperation,
    value: &str,
    notes: &mut Vec<Note>,
) -> Result<Walked<'a>, EditError> {
    let Some((last, inner)) = segments.split_last() else {
        return Err(EditError::InvalidPath {
            path: String::new(),
            source: config_edit_path::ValidationError::EmptyPath,
        });
    };
    let mut target = root;
    for (step, segment) in inner.iter().enumerate() {
        target = descend(target, step, segment)?;
    }
    match terminal(&mut *target, inner.len(), last, op, value, notes)? {
        Terminal::Finished(status) => Ok(Walked::Finished(status)),
        Terminal::Address(address) => Ok(Walked::Slot(slot::resolve(target, address)?)),
    }
}
