//! Scalar field kinds
//!
//! [`ScalarValue`] ties each scalar Rust type to the typed accessor that
//! reads it, both for single values and for lists.

use crate::domain::StoreError;
use crate::store::TreeStore;

/// A field type read directly by a typed accessor
pub trait ScalarValue: Sized {
    /// Reads one value at `key`
    fn read(store: &TreeStore, key: &str, default: Option<&str>) -> Result<Self, StoreError>;

    /// Reads a list of values at `key`
    fn read_list(
        store: &TreeStore,
        key: &str,
        default: Option<&str>,
    ) -> Result<Vec<Self>, StoreError>;
}

impl ScalarValue for String {
    fn read(store: &TreeStore, key: &str, default: Option<&str>) -> Result<Self, StoreError> {
        store.get_string(key, default)
    }

    fn read_list(
        store: &TreeStore,
        key: &str,
        default: Option<&str>,
    ) -> Result<Vec<Self>, StoreError> {
        store.get_strings(key, default)
    }
}

impl ScalarValue for bool {
    fn read(store: &TreeStore, key: &str, default: Option<&str>) -> Result<Self, StoreError> {
        store.get_bool(key, default)
    }

    fn read_list(
        store: &TreeStore,
        key: &str,
        default: Option<&str>,
    ) -> Result<Vec<Self>, StoreError> {
        store.get_bools(key, default)
    }
}

macro_rules! parsed_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                fn read(
                    store: &TreeStore,
                    key: &str,
                    default: Option<&str>,
                ) -> Result<Self, StoreError> {
                    store.get_parsed(key, default)
                }

                fn read_list(
                    store: &TreeStore,
                    key: &str,
                    default: Option<&str>,
                ) -> Result<Vec<Self>, StoreError> {
                    store.get_parsed_list(key, default)
                }
            }
        )*
    };
}

parsed_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
