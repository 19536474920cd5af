//! Runtime shape capabilities for live configuration graphs.
//!
//! A configuration graph is a tree of plain Rust values: records (structs),
//! lists (`Vec<T>`), maps (`BTreeMap` / `IndexMap` keyed by strings or
//! integers), nullable slots (`Option<T>`), polymorphic slots ([`Dynamic`])
//! and typed leaves (strings, booleans, integers, floats, vectors and string
//! sets). This crate describes those values at runtime so that code which has
//! never seen a concrete record type can still walk into it and write to it.
//!
//! # Example
//!
//! ```
//! use config_edit_reflect::{reflect_record, Record, Reflect, Vector3};
//!
//! #[derive(Debug, Default)]
//! struct Turret {
//!     name: String,
//!     offset: Vector3,
//! }
//!
//! reflect_record!(Turret { name, offset });
//!
//! let mut turret = Turret::default();
//! assert_eq!(Record::field_names(&turret), &["name", "offset"]);
//!
//! let field = Record::field_mut(&mut turret, "name").unwrap();
//! field.assign(Box::new("heavy".to_string())).unwrap();
//! assert_eq!(turret.name, "heavy");
//! ```

use std::any::Any;
use std::fmt::Debug;

use thiserror::Error;

pub mod collections;
pub mod record;
pub mod shape;
pub mod value;
pub mod vector;

pub use collections::MapKey;
pub use shape::{Shape, ValueKind};
pub use value::Dynamic;
pub use vector::{Vector2, Vector3, Vector4};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReflectError {
    #[error("value of type {found} can't be stored in a slot of type {expected}")]
    TypeMismatch { expected: String, found: String },
    #[error("index {index} is out of bounds for list size {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("key {key} can't be converted to key type {key_type}")]
    InvalidKey { key: String, key_type: String },
    #[error("field {field} doesn't exist on type {record}")]
    MissingField { field: String, record: String },
}

// ── Core traits ───────────────────────────────────────────────────────────

/// A value that can live inside a configuration graph.
pub trait Reflect: Any + Debug {
    /// Declared shape of this value's static type.
    ///
    /// For `Option<T>` this is the nullable shape regardless of whether a
    /// value is present; for [`Dynamic`] it is the dynamic shape.
    fn shape(&self) -> Shape;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Overwrite this value with `value`, converting through
    /// [`Typed::from_reflect`]. On error the value is left untouched.
    fn assign(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Static side of [`Reflect`].
pub trait Typed: Reflect + Sized {
    fn type_shape() -> Shape;

    /// The default state of the type, or `None` if it can't be instantiated
    /// without more information (e.g. [`Dynamic`]).
    fn create_default() -> Option<Self>;

    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, ReflectError> {
        downcast::<Self>(value)
    }
}

/// A struct-like value with named fields.
pub trait Record: Reflect {
    fn field_names(&self) -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|n| *n == name)
    }

    /// Declared shape of the named field.
    fn field_shape(&self, name: &str) -> Option<Shape> {
        self.field(name).map(|f| f.shape())
    }
}

/// An indexed, growable sequence.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element_shape(&self) -> Shape;

    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn set_element(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), ReflectError>;

    /// Insert before `index`. Fails if `index > len`.
    fn insert_element(&mut self, index: usize, value: Box<dyn Reflect>) -> Result<(), ReflectError>;

    fn push_element(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError>;

    fn remove_element(&mut self, index: usize) -> Option<Box<dyn Reflect>>;

    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;
}

/// A keyed collection addressed by path segments.
///
/// Keys are passed as the raw segment text and converted with
/// [`MapKey::from_segment`]; a segment that doesn't convert never matches.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_shape(&self) -> Shape;

    fn value_shape(&self) -> Shape;

    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool;

    fn value(&self, key: &str) -> Option<&dyn Reflect>;

    fn value_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Insert or replace the entry at `key`.
    fn insert_value(&mut self, key: &str, value: Box<dyn Reflect>) -> Result<(), ReflectError>;

    fn remove_value(&mut self, key: &str) -> Option<Box<dyn Reflect>>;

    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;
}

// ── Views ─────────────────────────────────────────────────────────────────

/// Immutable view of a value's runtime shape.
pub enum ReflectRef<'a> {
    Record(&'a dyn Record),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Value(&'a dyn Reflect),
    /// An empty nullable slot.
    Null,
}

/// Mutable view of a value's runtime shape.
pub enum ReflectMut<'a> {
    Record(&'a mut dyn Record),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Value(&'a mut dyn Reflect),
    Null,
}

impl ReflectRef<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, ReflectRef::Null)
    }

    /// Display name of the viewed value's shape, `null` for an empty slot.
    pub fn type_name(&self) -> String {
        match self {
            ReflectRef::Record(r) => r.shape().name(),
            ReflectRef::List(l) => l.shape().name(),
            ReflectRef::Map(m) => m.shape().name(),
            ReflectRef::Value(v) => v.shape().name(),
            ReflectRef::Null => "null".to_string(),
        }
    }
}

impl ReflectMut<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, ReflectMut::Null)
    }

    pub fn type_name(&self) -> String {
        match self {
            ReflectMut::Record(r) => r.shape().name(),
            ReflectMut::List(l) => l.shape().name(),
            ReflectMut::Map(m) => m.shape().name(),
            ReflectMut::Value(v) => v.shape().name(),
            ReflectMut::Null => "null".to_string(),
        }
    }
}

// ── Helpers on trait objects ──────────────────────────────────────────────

impl dyn Reflect {
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// The value behind any nullable or dynamic wrappers, `None` if empty.
    pub fn present(&self) -> Option<&dyn Reflect> {
        match self.reflect_ref() {
            ReflectRef::Record(r) => Some(r.as_reflect()),
            ReflectRef::List(l) => Some(l.as_reflect()),
            ReflectRef::Map(m) => Some(m.as_reflect()),
            ReflectRef::Value(v) => Some(v),
            ReflectRef::Null => None,
        }
    }

    pub fn present_mut(&mut self) -> Option<&mut dyn Reflect> {
        match self.reflect_mut() {
            ReflectMut::Record(r) => Some(r.as_reflect_mut()),
            ReflectMut::List(l) => Some(l.as_reflect_mut()),
            ReflectMut::Map(m) => Some(m.as_reflect_mut()),
            ReflectMut::Value(v) => Some(v),
            ReflectMut::Null => None,
        }
    }

    /// Downcast the present value, seeing through `Option` and [`Dynamic`].
    pub fn value_ref<T: Reflect>(&self) -> Option<&T> {
        self.present()?.downcast_ref::<T>()
    }
}

/// Convert a boxed value into a concrete type, reporting both type names on
/// mismatch.
pub fn downcast<T: Typed>(value: Box<dyn Reflect>) -> Result<T, ReflectError> {
    let found = value.shape().name();
    value
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| ReflectError::TypeMismatch {
            expected: T::type_shape().name(),
            found,
        })
}
