//! The addressed slot of a walked path and its single write point.

use config_edit_reflect::{List, Map, Record, Reflect, ReflectError, ReflectMut, Shape};

use crate::types::{Address, EditError};

/// A resolved write target: exactly one addressing mode bound to its parent.
pub enum Slot<'a> {
    ListElement { list: &'a mut dyn List, index: usize },
    MapEntry { map: &'a mut dyn Map, key: String },
    Field { record: &'a mut dyn Record, name: String, shape: Shape },
}

/// Bind `address` to `parent`, checking that the parent can be addressed
/// that way.
pub fn resolve(parent: &mut dyn Reflect, address: Address) -> Result<Slot<'_>, EditError> {
    let parent_name = parent.shape().name();
    match (parent.reflect_mut(), address) {
        (ReflectMut::List(list), Address::Index(index)) if index < list.len() => {
            Ok(Slot::ListElement { list, index })
        }
        (ReflectMut::Map(map), Address::Key(key)) if map.contains(&key) => {
            Ok(Slot::MapEntry { map, key })
        }
        (ReflectMut::Record(record), Address::Field(name)) => match record.field_shape(&name) {
            Some(shape) => Ok(Slot::Field { record, name, shape }),
            None => Err(EditError::InconsistentSlot {
                parent: parent_name,
                address: Address::Field(name).to_string(),
            }),
        },
        (_, address) => Err(EditError::InconsistentSlot {
            parent: parent_name,
            address: address.to_string(),
        }),
    }
}

impl<'a> Slot<'a> {
    /// Declared type of the slot, as seen by the parent.
    pub fn declared_shape(&self) -> Shape {
        match self {
            Slot::ListElement { list, .. } => list.element_shape(),
            Slot::MapEntry { map, .. } => map.value_shape(),
            Slot::Field { shape, .. } => *shape,
        }
    }

    pub fn address(&self) -> Address {
        match self {
            Slot::ListElement { index, .. } => Address::Index(*index),
            Slot::MapEntry { key, .. } => Address::Key(key.clone()),
            Slot::Field { name, .. } => Address::Field(name.clone()),
        }
    }

    /// Current value in the slot.
    pub fn target(&self) -> Option<&dyn Reflect> {
        match self {
            Slot::ListElement { list, index } => list.element(*index),
            Slot::MapEntry { map, key } => map.value(key),
            Slot::Field { record, name, .. } => record.field(name),
        }
    }

    pub fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        match self {
            Slot::ListElement { list, index } => list.element_mut(*index),
            Slot::MapEntry { map, key } => map.value_mut(key),
            Slot::Field { record, name, .. } => record.field_mut(name),
        }
    }

    /// Replace the slot's value. The only place an edit commits a value.
    pub fn write(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        match self {
            Slot::ListElement { list, index } => list.set_element(*index, value),
            Slot::MapEntry { map, key } => map.insert_value(key, value),
            Slot::Field { record, name, .. } => match record.field_mut(name) {
                Some(field) => field.assign(value),
                None => Err(ReflectError::MissingField {
                    field: name.clone(),
                    record: record.shape().name(),
                }),
            },
        }
    }

    /// Short description of the slot for reports, e.g. `list element`.
    pub fn describe(&self) -> &'static str {
        match self {
            Slot::ListElement { .. } => "list element",
            Slot::MapEntry { .. } => "dictionary entry",
            Slot::Field { .. } => "field",
        }
    }
}
