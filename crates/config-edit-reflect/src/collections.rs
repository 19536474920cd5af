//! `List` and `Map` implementations for the standard containers.

use std::any::Any;
use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::{List, Map, Reflect, ReflectError, ReflectMut, ReflectRef, Shape, Typed};

/// A map key type that can be addressed by a path segment.
pub trait MapKey: Typed {
    fn from_segment(segment: &str) -> Option<Self>;

    fn to_segment(&self) -> String;
}

impl MapKey for String {
    fn from_segment(segment: &str) -> Option<Self> {
        Some(segment.to_string())
    }

    fn to_segment(&self) -> String {
        self.clone()
    }
}

impl MapKey for i32 {
    fn from_segment(segment: &str) -> Option<Self> {
        segment.trim().parse().ok()
    }

    fn to_segment(&self) -> String {
        self.to_string()
    }
}

fn key_error<K: MapKey>(segment: &str) -> ReflectError {
    ReflectError::InvalidKey {
        key: segment.to_string(),
        key_type: K::type_shape().name(),
    }
}

macro_rules! impl_reflect_boilerplate {
    ($variant:ident) => {
        fn reflect_ref(&self) -> ReflectRef<'_> {
            ReflectRef::$variant(self)
        }

        fn reflect_mut(&mut self) -> ReflectMut<'_> {
            ReflectMut::$variant(self)
        }

        fn assign(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
            *self = Self::from_reflect(value)?;
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    };
}

// ── Vec ───────────────────────────────────────────────────────────────────

impl<T: Typed> Reflect for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::list::<T>()
    }

    impl_reflect_boilerplate!(List);
}

impl<T: Typed> Typed for Vec<T> {
    fn type_shape() -> Shape {
        Shape::list::<T>()
    }

    fn create_default() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: Typed> List for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element_shape(&self) -> Shape {
        T::type_shape()
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(|v| v as &mut dyn Reflect)
    }

    fn set_element(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        let len = self.as_slice().len();
        if index >= len {
            return Err(ReflectError::IndexOutOfBounds { index, len });
        }
        let value = T::from_reflect(value)?;
        self.as_mut_slice()[index] = value;
        Ok(())
    }

    fn insert_element(
        &mut self,
        index: usize,
        value: Box<dyn Reflect>,
    ) -> Result<(), ReflectError> {
        let len = self.as_slice().len();
        if index > len {
            return Err(ReflectError::IndexOutOfBounds { index, len });
        }
        Vec::insert(self, index, T::from_reflect(value)?);
        Ok(())
    }

    fn push_element(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        Vec::push(self, T::from_reflect(value)?);
        Ok(())
    }

    fn remove_element(&mut self, index: usize) -> Option<Box<dyn Reflect>> {
        if index >= self.as_slice().len() {
            return None;
        }
        Some(Box::new(Vec::remove(self, index)))
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

// ── Maps ──────────────────────────────────────────────────────────────────

impl<K: MapKey + Ord, V: Typed> Reflect for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        Self::type_shape()
    }

    impl_reflect_boilerplate!(Map);
}

impl<K: MapKey + Ord, V: Typed> Typed for BTreeMap<K, V> {
    fn type_shape() -> Shape {
        Shape::map::<Self, K, V>()
    }

    fn create_default() -> Option<Self> {
        Some(BTreeMap::new())
    }
}

impl<K: MapKey + Ord, V: Typed> Map for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn key_shape(&self) -> Shape {
        K::type_shape()
    }

    fn value_shape(&self) -> Shape {
        V::type_shape()
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).map(MapKey::to_segment).collect()
    }

    fn contains(&self, key: &str) -> bool {
        K::from_segment(key).is_some_and(|k| self.contains_key(&k))
    }

    fn value(&self, key: &str) -> Option<&dyn Reflect> {
        let k = K::from_segment(key)?;
        self.get(&k).map(|v| v as &dyn Reflect)
    }

    fn value_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        let k = K::from_segment(key)?;
        self.get_mut(&k).map(|v| v as &mut dyn Reflect)
    }

    fn insert_value(&mut self, key: &str, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        let k = K::from_segment(key).ok_or_else(|| key_error::<K>(key))?;
        let v = V::from_reflect(value)?;
        BTreeMap::insert(self, k, v);
        Ok(())
    }

    fn remove_value(&mut self, key: &str) -> Option<Box<dyn Reflect>> {
        let k = K::from_segment(key)?;
        BTreeMap::remove(self, &k).map(|v| Box::new(v) as Box<dyn Reflect>)
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

impl<K: MapKey + Hash + Eq, V: Typed> Reflect for IndexMap<K, V> {
    fn shape(&self) -> Shape {
        Self::type_shape()
    }

    impl_reflect_boilerplate!(Map);
}

impl<K: MapKey + Hash + Eq, V: Typed> Typed for IndexMap<K, V> {
    fn type_shape() -> Shape {
        Shape::map::<Self, K, V>()
    }

    fn create_default() -> Option<Self> {
        Some(IndexMap::new())
    }
}

impl<K: MapKey + Hash + Eq, V: Typed> Map for IndexMap<K, V> {
    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn key_shape(&self) -> Shape {
        K::type_shape()
    }

    fn value_shape(&self) -> Shape {
        V::type_shape()
    }

    fn keys(&self) -> Vec<String> {
        IndexMap::keys(self).map(MapKey::to_segment).collect()
    }

    fn contains(&self, key: &str) -> bool {
        K::from_segment(key).is_some_and(|k| self.contains_key(&k))
    }

    fn value(&self, key: &str) -> Option<&dyn Reflect> {
        let k = K::from_segment(key)?;
        self.get(&k).map(|v| v as &dyn Reflect)
    }

    fn value_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        let k = K::from_segment(key)?;
        self.get_mut(&k).map(|v| v as &mut dyn Reflect)
    }

    /// New keys go to the end; replacing keeps the entry's position.
    fn insert_value(&mut self, key: &str, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        let k = K::from_segment(key).ok_or_else(|| key_error::<K>(key))?;
        let v = V::from_reflect(value)?;
        IndexMap::insert(self, k, v);
        Ok(())
    }

    fn remove_value(&mut self, key: &str) -> Option<Box<dyn Reflect>> {
        let k = K::from_segment(key)?;
        self.shift_remove(&k).map(|v| Box::new(v) as Box<dyn Reflect>)
    }

    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}
