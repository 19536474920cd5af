//! Default instances for slots without a typed updater.

use std::collections::BTreeMap;

use config_edit_reflect::{Shape, Typed};

use crate::slot::Slot;
use crate::types::{EditError, Note, Status};

/// Tag name to concrete type table.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    marker: String,
    tags: BTreeMap<String, Shape>,
}

impl TagRegistry {
    pub fn new(marker: impl Into<String>) -> Self {
        TagRegistry {
            marker: marker.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn register<T: Typed>(&mut self, tag: impl Into<String>) -> &mut Self {
        self.register_shape(tag, T::type_shape())
    }

    pub fn register_shape(&mut self, tag: impl Into<String>, shape: Shape) -> &mut Self {
        self.tags.insert(tag.into(), shape);
        self
    }

    pub fn get(&self, tag: &str) -> Option<Shape> {
        self.tags.get(tag).copied()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// The type named by a tag reference in `value`, `None` if `value` isn't
    /// a tag reference.
    pub fn resolve(&self, value: &str) -> Result<Option<Shape>, EditError> {
        let Some(tag) = value.strip_prefix(self.marker.as_str()) else {
            return Ok(None);
        };
        self.get(tag)
            .map(Some)
            .ok_or_else(|| EditError::UnknownTag { tag: value.to_string() })
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        TagRegistry::new("!")
    }
}

/// Write a fresh default instance into `slot`: of the tagged type if
/// `value` is a tag reference, else of the slot's declared type.
pub fn assign_default(
    slot: &mut Slot<'_>,
    value: &str,
    tags: &TagRegistry,
    notes: &mut Vec<Note>,
) -> Result<Status, EditError> {
    let shape = match tags.resolve(value)? {
        Some(shape) => shape,
        None => slot.declared_shape().resolved(),
    };
    let instance = shape.instantiate().ok_or_else(|| EditError::NoDefaultInstance {
        type_name: shape.name(),
    })?;
    slot.write(instance)?;
    notes.push(Note::edit(format!(
        "Assigning new default object of type {} to target {}",
        shape.name(),
        slot.describe()
    )));
    Ok(Status::Edited)
}
