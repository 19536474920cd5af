//! Leaf values, nullable slots and polymorphic slots.

use std::any::Any;
use std::collections::BTreeSet;

use crate::{downcast, Reflect, ReflectError, ReflectMut, ReflectRef, Shape, Typed, ValueKind};
use crate::{Vector2, Vector3, Vector4};

macro_rules! impl_reflect_value {
    ($($ty:ty => $name:literal, $kind:ident;)+) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> Shape {
                    <$ty as Typed>::type_shape()
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Value(self)
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Value(self)
                }

                fn assign(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
                    *self = <$ty as Typed>::from_reflect(value)?;
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
            }

            impl Typed for $ty {
                fn type_shape() -> Shape {
                    Shape::value::<$ty>($name, ValueKind::$kind)
                }

                fn create_default() -> Option<Self> {
                    Some(<$ty>::default())
                }
            }
        )+
    };
}

impl_reflect_value! {
    String => "String", String;
    bool => "bool", Bool;
    i32 => "int", Int;
    f32 => "float", Float;
    Vector2 => "Vector2", Vector2;
    Vector3 => "Vector3", Vector3;
    Vector4 => "Vector4", Vector4;
    BTreeSet<String> => "StringSet", StringSet;
}

// ── Nullable ──────────────────────────────────────────────────────────────

impl<T: Typed> Reflect for Option<T> {
    fn shape(&self) -> Shape {
        Shape::nullable::<T>()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => value.reflect_ref(),
            None => ReflectRef::Null,
        }
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        match self {
            Some(value) => value.reflect_mut(),
            None => ReflectMut::Null,
        }
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
}

impl<T: Typed> Typed for Option<T> {
    fn type_shape() -> Shape {
        Shape::nullable::<T>()
    }

    /// Nullable slots start out holding the inner type's default state,
    /// or nothing if the inner type has none.
    fn create_default() -> Option<Self> {
        Some(T::create_default())
    }

    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, ReflectError> {
        if value.is::<Option<T>>() {
            return downcast::<Option<T>>(value);
        }
        T::from_reflect(value).map(Some)
    }
}

// ── Dynamic ───────────────────────────────────────────────────────────────

/// A slot holding a value whose concrete type is chosen at runtime.
///
/// Views are transparent: walking into a `Dynamic` walks into the value it
/// holds. A `Dynamic` has no default state, so resetting one needs an
/// explicit concrete type.
#[derive(Debug)]
pub struct Dynamic(Box<dyn Reflect>);

impl Dynamic {
    pub fn new<T: Reflect>(value: T) -> Self {
        Dynamic(Box::new(value))
    }

    pub fn from_box(value: Box<dyn Reflect>) -> Self {
        Dynamic(value)
    }

    pub fn get(&self) -> &dyn Reflect {
        self.0.as_ref()
    }

    pub fn get_mut(&mut self) -> &mut dyn Reflect {
        self.0.as_mut()
    }

    pub fn into_inner(self) -> Box<dyn Reflect> {
        self.0
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl Reflect for Dynamic {
    fn shape(&self) -> Shape {
        Shape::dynamic::<Dynamic>()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        self.0.reflect_ref()
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        self.0.reflect_mut()
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
}

impl Typed for Dynamic {
    fn type_shape() -> Shape {
        Shape::dynamic::<Dynamic>()
    }

    fn create_default() -> Option<Self> {
        None
    }

    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, ReflectError> {
        if value.is::<Dynamic>() {
            return downcast::<Dynamic>(value);
        }
        Ok(Dynamic(value))
    }
}
