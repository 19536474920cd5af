//! Read-only and mutable lookup by field path.
//!
//! Lookup follows the same segment rules as the edit walker: the first
//! segment names a field of the root, later segments index lists, key maps
//! or name fields. An empty nullable slot stops the lookup.

use config_edit_reflect::{Reflect, ReflectMut, ReflectRef};

use crate::{parse_field_path, parse_index};

fn step_ref<'a>(current: &'a dyn Reflect, step: usize, segment: &str) -> Option<&'a dyn Reflect> {
    match current.reflect_ref() {
        ReflectRef::Record(record) => record.field(segment),
        ReflectRef::List(list) if step > 0 => list.element(parse_index(segment)?),
        ReflectRef::Map(map) if step > 0 => map.value(segment),
        _ => None,
    }
}

fn step_mut<'a>(
    current: &'a mut dyn Reflect,
    step: usize,
    segment: &str,
) -> Option<&'a mut dyn Reflect> {
    match current.reflect_mut() {
        ReflectMut::Record(record) => record.field_mut(segment),
        ReflectMut::List(list) if step > 0 => list.element_mut(parse_index(segment)?),
        ReflectMut::Map(map) if step > 0 => map.value_mut(segment),
        _ => None,
    }
}

/// Look up the slot at `path`. The empty path is the root itself.
pub fn get<'a>(root: &'a dyn Reflect, path: &[String]) -> Option<&'a dyn Reflect> {
    let mut current = root;
    for (step, segment) in path.iter().enumerate() {
        current = step_ref(current, step, segment)?;
    }
    Some(current)
}

pub fn get_mut<'a>(root: &'a mut dyn Reflect, path: &[String]) -> Option<&'a mut dyn Reflect> {
    let mut current = root;
    for (step, segment) in path.iter().enumerate() {
        current = step_mut(current, step, segment)?;
    }
    Some(current)
}

/// Look up a dotted path string directly.
pub fn get_path<'a>(root: &'a dyn Reflect, path: &str) -> Option<&'a dyn Reflect> {
    get(root, &parse_field_path(path))
}

/// Look up a dotted path and downcast the present value, seeing through
/// nullable and dynamic slots.
pub fn get_as<'a, T: Reflect>(root: &'a dyn Reflect, path: &str) -> Option<&'a T> {
    get_path(root, path)?.value_ref::<T>()
}
