//! Runtime type descriptors.

use std::any::TypeId;
use std::fmt;

use crate::{Reflect, Typed};

/// Coarse classification of a shape, used as the dispatch key for typed
/// value handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Float,
    Vector2,
    Vector3,
    Vector4,
    StringSet,
    Record,
    List,
    Map,
    Nullable,
    Dynamic,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Vector2 => "vector2",
            ValueKind::Vector3 => "vector3",
            ValueKind::Vector4 => "vector4",
            ValueKind::StringSet => "string set",
            ValueKind::Record => "record",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Nullable => "nullable",
            ValueKind::Dynamic => "dynamic",
        }
    }
}

/// Descriptor of a reflectable type.
///
/// Shapes are cheap to copy. Element, key and inner shapes are stored as
/// constructor functions so recursive types don't need static storage.
/// Two shapes are equal when they describe the same Rust type.
#[derive(Clone, Copy)]
pub struct Shape {
    name: &'static str,
    kind: ValueKind,
    id: fn() -> TypeId,
    element: Option<fn() -> Shape>,
    key: Option<fn() -> Shape>,
    make: fn() -> Option<Box<dyn Reflect>>,
}

fn make_default<T: Typed>() -> Option<Box<dyn Reflect>> {
    T::create_default().map(|v| Box::new(v) as Box<dyn Reflect>)
}

impl Shape {
    /// A leaf value shape.
    pub fn value<T: Typed>(name: &'static str, kind: ValueKind) -> Shape {
        Shape {
            name,
            kind,
            id: TypeId::of::<T>,
            element: None,
            key: None,
            make: make_default::<T>,
        }
    }

    pub fn record<T: Typed>(name: &'static str) -> Shape {
        Shape::value::<T>(name, ValueKind::Record)
    }

    pub fn list<T: Typed>() -> Shape {
        Shape {
            name: "List",
            kind: ValueKind::List,
            id: TypeId::of::<Vec<T>>,
            element: Some(T::type_shape),
            key: None,
            make: make_default::<Vec<T>>,
        }
    }

    /// Shape of the map type `M` with keys `K` and values `V`.
    pub fn map<M: Typed, K: Typed, V: Typed>() -> Shape {
        Shape {
            name: "Map",
            kind: ValueKind::Map,
            id: TypeId::of::<M>,
            element: Some(V::type_shape),
            key: Some(K::type_shape),
            make: make_default::<M>,
        }
    }

    pub fn nullable<T: Typed>() -> Shape {
        Shape {
            name: "Option",
            kind: ValueKind::Nullable,
            id: TypeId::of::<Option<T>>,
            element: Some(T::type_shape),
            key: None,
            make: make_default::<Option<T>>,
        }
    }

    pub fn dynamic<T: Typed>() -> Shape {
        Shape::value::<T>("Dynamic", ValueKind::Dynamic)
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn type_id(&self) -> TypeId {
        (self.id)()
    }

    /// Display name, e.g. `int`, `List<Hardpoint>`, `Map<String, Slot>`.
    pub fn name(&self) -> String {
        match (self.kind, self.element, self.key) {
            (ValueKind::Map, Some(value), Some(key)) => {
                format!("{}<{}, {}>", self.name, key().name(), value().name())
            }
            (_, Some(element), _) => format!("{}<{}>", self.name, element().name()),
            _ => self.name.to_string(),
        }
    }

    /// Element shape of a list, value shape of a map, inner shape of a
    /// nullable.
    pub fn element(&self) -> Option<Shape> {
        self.element.map(|f| f())
    }

    pub fn key(&self) -> Option<Shape> {
        self.key.map(|f| f())
    }

    pub fn is_nullable(&self) -> bool {
        self.kind == ValueKind::Nullable
    }

    /// The shape with any nullable wrappers removed.
    pub fn resolved(&self) -> Shape {
        let mut shape = *self;
        while shape.kind == ValueKind::Nullable {
            match shape.element() {
                Some(inner) => shape = inner,
                None => break,
            }
        }
        shape
    }

    /// A new instance in the type's default state.
    pub fn instantiate(&self) -> Option<Box<dyn Reflect>> {
        (self.make)()
    }

    pub fn is<T: Typed>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name())
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dynamic;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn leaf_names() {
        assert_eq!(String::type_shape().name(), "String");
        assert_eq!(bool::type_shape().name(), "bool");
        assert_eq!(i32::type_shape().name(), "int");
        assert_eq!(f32::type_shape().name(), "float");
        assert_eq!(BTreeSet::<String>::type_shape().name(), "StringSet");
    }

    #[test]
    fn container_names() {
        assert_eq!(Vec::<i32>::type_shape().name(), "List<int>");
        assert_eq!(
            BTreeMap::<String, Vec<f32>>::type_shape().name(),
            "Map<String, List<float>>"
        );
        assert_eq!(Option::<bool>::type_shape().name(), "Option<bool>");
    }

    #[test]
    fn resolved_strips_nullable() {
        let shape = Option::<Option<i32>>::type_shape();
        assert!(shape.is_nullable());
        assert_eq!(shape.resolved(), i32::type_shape());
        assert_eq!(shape.resolved().kind(), ValueKind::Int);
    }

    #[test]
    fn equality_is_type_identity() {
        assert_eq!(Vec::<i32>::type_shape(), Vec::<i32>::type_shape());
        assert_ne!(Vec::<i32>::type_shape(), Vec::<f32>::type_shape());
        assert!(Vec::<i32>::type_shape().is::<Vec<i32>>());
    }

    #[test]
    fn instantiate_default_state() {
        let value = i32::type_shape().instantiate().expect("int has a default");
        assert_eq!(value.downcast_ref::<i32>(), Some(&0));
        assert!(Dynamic::type_shape().instantiate().is_none());
    }
}
