//! Codec configuration.

use sats_types::WELL_KNOWN_WRAPPER_FIELDS;
use smallvec::SmallVec;

/// Field names that mark a single-field product as a scalar wrapper for map keys.
pub type WrapperFields = SmallVec<[Box<str>; 8]>;

/// Options for codec compilation and map-key derivation.
///
/// The wire format does not depend on any of these; two codecs built with
/// different configs produce the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Pack all-fixed-width products into a single contiguous region.
    /// Defaults to `true`.
    pub fixed_layouts: bool,

    /// Wrapper field names recognized by the map-key shortcut.
    /// Defaults to the well-known wrapper fields.
    pub wrapper_fields: WrapperFields,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            fixed_layouts: true,
            wrapper_fields: WELL_KNOWN_WRAPPER_FIELDS
                .iter()
                .map(|&field| field.into())
                .collect(),
        }
    }
}

impl CodecConfig {
    #[must_use]
    pub fn with_fixed_layouts(mut self, fixed_layouts: bool) -> Self {
        self.fixed_layouts = fixed_layouts;
        self
    }

    /// Add a wrapper field name. Already-known names are ignored.
    #[must_use]
    pub fn with_wrapper_field(mut self, name: &str) -> Self {
        if !self.is_wrapper_field(name) {
            self.wrapper_fields.push(name.into());
        }
        self
    }

    #[inline]
    pub fn is_wrapper_field(&self, name: &str) -> bool {
        self.wrapper_fields.iter().any(|field| &**field == name)
    }
}
