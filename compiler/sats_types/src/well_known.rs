//! Single-field wrapper products with reserved field names.
//!
//! Each one is a product with exactly one element whose name marks what the
//! scalar inside means. On the wire they are just the scalar.

use crate::{AlgebraicType, ProductTypeElement};

/// `(__identity__: U256)`
pub const IDENTITY_TAG: &str = "__identity__";
/// `(__connection_id__: U128)`
pub const CONNECTION_ID_TAG: &str = "__connection_id__";
/// `(__timestamp_micros_since_unix_epoch__: I64)`
pub const TIMESTAMP_TAG: &str = "__timestamp_micros_since_unix_epoch__";
/// `(__time_duration_micros__: I64)`
pub const TIME_DURATION_TAG: &str = "__time_duration_micros__";
/// `(__uuid__: U128)`
pub const UUID_TAG: &str = "__uuid__";

/// Every reserved wrapper field name.
pub const WELL_KNOWN_WRAPPER_FIELDS: [&str; 5] = [
    IDENTITY_TAG,
    CONNECTION_ID_TAG,
    TIMESTAMP_TAG,
    TIME_DURATION_TAG,
    UUID_TAG,
];

impl AlgebraicType {
    fn wrapper(field: &str, inner: AlgebraicType) -> Self {
        Self::product([ProductTypeElement::named(field, inner)])
    }

    pub fn identity() -> Self {
        Self::wrapper(IDENTITY_TAG, AlgebraicType::U256)
    }

    pub fn connection_id() -> Self {
        Self::wrapper(CONNECTION_ID_TAG, AlgebraicType::U128)
    }

    /// Microseconds since the Unix epoch.
    pub fn timestamp() -> Self {
        Self::wrapper(TIMESTAMP_TAG, AlgebraicType::I64)
    }

    /// A signed span in microseconds.
    pub fn time_duration() -> Self {
        Self::wrapper(TIME_DURATION_TAG, AlgebraicType::I64)
    }

    pub fn uuid() -> Self {
        Self::wrapper(UUID_TAG, AlgebraicType::U128)
    }

    /// The reserved field name if this is one of the well-known wrappers.
    pub fn well_known_wrapper(&self) -> Option<&'static str> {
        let AlgebraicType::Product(p) = self else {
            return None;
        };
        let [elem] = &*p.elements else {
            return None;
        };
        let name = elem.name()?;
        WELL_KNOWN_WRAPPER_FIELDS
            .into_iter()
            .find(|field| *field == name)
    }
}
