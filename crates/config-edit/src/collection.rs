//! Named collections of configuration roots.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use config_edit_reflect::{Reflect, ReflectError, Shape, Typed};
use indexmap::IndexMap;

/// How an upsert changed a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// A named, string-keyed collection of configuration roots.
pub trait ConfigCollection: Any {
    fn name(&self) -> &str;

    /// Shape of every root in the collection.
    fn root_shape(&self) -> Shape;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in sorted order.
    fn keys(&self) -> Vec<String>;

    fn contains_key(&self, key: &str) -> bool;

    fn root(&self, key: &str) -> Option<&dyn Reflect>;

    fn root_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    fn remove(&mut self, key: &str) -> bool;

    /// Insert or replace a whole root. Fails, leaving the collection
    /// untouched, if `root` isn't of the collection's root type.
    fn upsert(&mut self, key: &str, root: Box<dyn Reflect>) -> Result<Upsert, ReflectError>;

    /// Run after a batch changed the collection.
    fn finish_batch(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type Hook<T> = Box<dyn FnMut(&str, &mut T)>;

/// A sorted collection of roots of type `T`.
pub struct Collection<T: Typed> {
    name: String,
    entries: BTreeMap<String, T>,
    hooks: Vec<Hook<T>>,
}

impl<T: Typed> Collection<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            entries: BTreeMap::new(),
            hooks: Vec::new(),
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, root: T) -> Self {
        self.entries.insert(key.into(), root);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, root: T) -> Option<T> {
        self.entries.insert(key.into(), root)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Register a hook run on every entry by [`ConfigCollection::finish_batch`].
    pub fn on_after_edit(&mut self, hook: impl FnMut(&str, &mut T) + 'static) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }
}

impl<T: Typed> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl<T: Typed> ConfigCollection for Collection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn root_shape(&self) -> Shape {
        T::type_shape()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn root(&self, key: &str) -> Option<&dyn Reflect> {
        self.entries.get(key).map(|v| v as &dyn Reflect)
    }

    fn root_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        self.entries.get_mut(key).map(|v| v as &mut dyn Reflect)
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn upsert(&mut self, key: &str, root: Box<dyn Reflect>) -> Result<Upsert, ReflectError> {
        let root = T::from_reflect(root)?;
        match self.entries.insert(key.to_string(), root) {
            Some(_) => Ok(Upsert::Replaced),
            None => Ok(Upsert::Inserted),
        }
    }

    fn finish_batch(&mut self) {
        for (key, entry) in self.entries.iter_mut() {
            for hook in self.hooks.iter_mut() {
                hook(key.as_str(), entry);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registered collections, in registration order.
#[derive(Default)]
pub struct CollectionRegistry {
    collections: IndexMap<String, Box<dyn ConfigCollection>>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        CollectionRegistry::default()
    }

    /// Register a collection under its own name, returning the one it
    /// replaces.
    pub fn register<C: ConfigCollection>(
        &mut self,
        collection: C,
    ) -> Option<Box<dyn ConfigCollection>> {
        let name = collection.name().to_string();
        self.collections.insert(name, Box::new(collection))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn collection(&self, name: &str) -> Option<&dyn ConfigCollection> {
        self.collections.get(name).map(|c| &**c)
    }

    pub fn collection_mut(&mut self, name: &str) -> Option<&mut (dyn ConfigCollection + 'static)> {
        self.collections.get_mut(name).map(|c| &mut **c)
    }

    /// Typed access to a [`Collection`].
    pub fn get<T: Typed>(&self, name: &str) -> Option<&Collection<T>> {
        self.collection(name)?.as_any().downcast_ref()
    }

    pub fn get_mut<T: Typed>(&mut self, name: &str) -> Option<&mut Collection<T>> {
        self.collection_mut(name)?.as_any_mut().downcast_mut()
    }
}

impl fmt::Debug for CollectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.collections.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_upsert_reports_insert_or_replace() {
        let mut c: Collection<i32> = Collection::new("numbers");
        assert_eq!(c.upsert("a", Box::new(1i32)), Ok(Upsert::Inserted));
        assert_eq!(c.upsert("a", Box::new(2i32)), Ok(Upsert::Replaced));
        assert_eq!(c.get("a"), Some(&2));
        assert!(c.upsert("b", Box::new(true)).is_err());
        assert!(!c.contains_key("b"));
    }

    #[test]
    fn test_finish_batch_runs_hooks_on_every_entry() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut c = Collection::new("numbers").with_entry("a", 1i32).with_entry("b", 2i32);
        c.on_after_edit(move |_, v| {
            *v *= 10;
            seen.set(seen.get() + 1);
        });
        c.finish_batch();
        assert_eq!(calls.get(), 2);
        assert_eq!(c.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_registry_typed_access() {
        let mut registry = CollectionRegistry::new();
        registry.register(Collection::<i32>::new("numbers").with_entry("a", 1));
        assert!(registry.get::<i32>("numbers").is_some());
        assert!(registry.get::<bool>("numbers").is_none());
        registry.get_mut::<i32>("numbers").unwrap().insert("b", 2);
        assert_eq!(
            registry.collection("numbers").map(|c| c.keys()),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["numbers"]);
    }
}
