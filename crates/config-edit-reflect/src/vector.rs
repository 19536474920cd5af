//! Fixed-size float vectors.

use std::fmt;

macro_rules! vector_type {
    ($name:ident, $len:literal, $($field:ident),+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            $(pub $field: f32,)+
        }

        impl $name {
            pub const LEN: usize = $len;

            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            pub fn to_array(self) -> [f32; $len] {
                [$(self.$field),+]
            }

            /// Build from a slice of exactly `LEN` components.
            pub fn from_slice(components: &[f32]) -> Option<Self> {
                let array: [f32; $len] = components.try_into().ok()?;
                let [$($field),+] = array;
                Some(Self { $($field),+ })
            }
        }

        impl From<[f32; $len]> for $name {
            fn from(array: [f32; $len]) -> Self {
                let [$($field),+] = array;
                Self { $($field),+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("(")?;
                for (i, c) in self.to_array().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
        }
    };
}

vector_type!(Vector2, 2, x, y);
vector_type!(Vector3, 3, x, y, z);
vector_type!(Vector4, 4, x, y, z, w);
