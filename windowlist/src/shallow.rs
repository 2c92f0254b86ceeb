//! Single-level equality used to decide whether a materialized slot needs a patch.
//!
//! Unlike `PartialEq` on a nested structure, shallow equality only compares each field with one
//! level of `==`. Application item types implement [`ShallowEq`] field-by-field; map-shaped
//! records additionally require equal key counts.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Field-by-field, single-level comparison.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_shallow_eq_via_eq {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShallowEq for $t {
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_shallow_eq_via_eq!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, str,
    String,
);

impl<T: ShallowEq + ?Sized> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        (**self).shallow_eq(*other)
    }
}

/// `None`/`None` compare equal; a present and an absent record never do.
impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Map-shaped records: equal key counts, and every entry equal at one level.
impl<K: Ord, V: PartialEq> ShallowEq for BTreeMap<K, V> {
    fn shallow_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|ov| v == ov))
    }
}

#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq, V: PartialEq> ShallowEq for std::collections::HashMap<K, V> {
    fn shallow_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k).is_some_and(|ov| v == ov))
    }
}

/// Compares two possibly-absent records.
pub fn shallow_eq_opt<T: ShallowEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.shallow_eq(b),
        (None, None) => true,
        _ => false,
    }
}
