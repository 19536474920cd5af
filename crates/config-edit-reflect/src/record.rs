//! The `reflect_record!` macro.

/// Implement [`Reflect`](crate::Reflect), [`Typed`](crate::Typed) and
/// [`Record`](crate::Record) for a struct with named fields.
///
/// The struct must implement `Debug` and `Default`; every listed field must
/// implement `Typed`. Fields not listed are invisible to paths. A field may
/// be exposed under a different path name with `field as "name"`, and the
/// record's display name may be overridden with `Type as "Name"`.
///
/// ```
/// use config_edit_reflect::{reflect_record, Record, Typed};
///
/// #[derive(Debug, Default)]
/// struct Engine {
///     thrust: f32,
///     max_heat: i32,
/// }
///
/// reflect_record!(Engine as "EngineBlock" { thrust, max_heat as "maxHeat" });
///
/// let engine = Engine::default();
/// assert!(engine.has_field("maxHeat"));
/// assert!(!engine.has_field("max_heat"));
/// assert_eq!(Engine::type_shape().name(), "EngineBlock");
/// ```
#[macro_export]
macro_rules! reflect_record {
    (@name $ty:ident) => { stringify!($ty) };
    (@name $ty:ident $name:literal) => { $name };
    (@field $field:ident) => { stringify!($field) };
    (@field $field:ident $alias:literal) => { $alias };

    ($ty:ident $(as $name:literal)? { $($field:ident $(as $alias:literal)?),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn shape(&self) -> $crate::Shape {
                <$ty as $crate::Typed>::type_shape()
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Record(self)
            }

            fn reflect_mut(&mut self) -> $crate::ReflectMut<'_> {
                $crate::ReflectMut::Record(self)
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn $crate::Reflect>,
            ) -> ::std::result::Result<(), $crate::ReflectError> {
                *self = <$ty as $crate::Typed>::from_reflect(value)?;
                Ok(())
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl $crate::Typed for $ty {
            fn type_shape() -> $crate::Shape {
                $crate::Shape::record::<$ty>($crate::reflect_record!(@name $ty $($name)?))
            }

            fn create_default() -> ::std::option::Option<Self> {
                Some(<$ty as ::std::default::Default>::default())
            }
        }

        impl $crate::Record for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$($crate::reflect_record!(@field $field $($alias)?)),*]
            }

            #[allow(unused_variables)]
            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::Reflect> {
                $(
                    if name == $crate::reflect_record!(@field $field $($alias)?) {
                        return Some(&self.$field);
                    }
                )*
                None
            }

            #[allow(unused_variables)]
            fn field_mut(&mut self, name: &str) -> ::std::option::Option<&mut dyn $crate::Reflect> {
                $(
                    if name == $crate::reflect_record!(@field $field $($alias)?) {
                        return Some(&mut self.$field);
                    }
                )*
                None
            }

            fn as_reflect(&self) -> &dyn $crate::Reflect {
                self
            }

            fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
                self
            }
        }
    };
}
