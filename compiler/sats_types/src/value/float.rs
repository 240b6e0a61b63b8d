//! Float wrappers with bitwise equality.
//!
//! Values are hashed and compared for map keys, so `NaN` must equal itself
//! and `-0.0` must differ from `0.0`. Equality and hashing go through the
//! bit pattern; ordering is IEEE 754 `totalOrder`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! float_wrapper {
    ($name:ident, $float:ty, $bits:ty) => {
        #[derive(Copy, Clone, Default)]
        #[repr(transparent)]
        pub struct $name(pub $float);

        impl $name {
            #[inline]
            pub const fn new(v: $float) -> Self {
                Self(v)
            }

            #[inline]
            pub const fn get(self) -> $float {
                self.0
            }

            #[inline]
            pub fn to_bits(self) -> $bits {
                self.0.to_bits()
            }

            #[inline]
            pub fn from_bits(bits: $bits) -> Self {
                Self(<$float>::from_bits(bits))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.to_bits() == other.to_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.to_bits().hash(state);
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl From<$float> for $name {
            #[inline]
            fn from(v: $float) -> Self {
                Self(v)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

float_wrapper!(F32, f32, u32);
float_wrapper!(F64, f64, u64);
