//! Proptest generators for property-based testing.

use proptest::prelude::*;

use docvault_core::{DocumentFields, Principal, MAGNITUDE_CEILING};

/// Generate a random principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    any::<[u8; 32]>().prop_map(Principal::from_bytes)
}

/// Printable ASCII text of `min..=max` bytes.
pub fn ascii_text(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0x20u8..=0x7e, min..=max)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

/// Valid entity metadata: 1..=64 ASCII bytes.
pub fn metadata() -> impl Strategy<Value = String> {
    ascii_text(1, 64)
}

/// Valid professional notation: 1..=128 ASCII bytes.
pub fn notation() -> impl Strategy<Value = String> {
    ascii_text(1, 128)
}

/// Valid payload magnitude.
pub fn magnitude() -> impl Strategy<Value = u64> {
    1u64..MAGNITUDE_CEILING
}

/// Out-of-bounds payload magnitude.
pub fn invalid_magnitude() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), MAGNITUDE_CEILING..=u64::MAX]
}

/// Valid taxonomy label.
pub fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Valid taxonomy label set: 1..=10 labels.
pub fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(label(), 1..=10)
}

/// A label set that breaks the bounds: empty, too many, or one bad label.
pub fn invalid_labels() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        Just(Vec::new()),
        prop::collection::vec(label(), 11..=20),
        (labels(), ascii_text(33, 64)).prop_map(|(mut ls, long)| {
            ls.insert(0, long);
            ls.truncate(10);
            ls
        }),
        (labels()).prop_map(|mut ls| {
            ls[0] = String::new();
            ls
        }),
    ]
}

/// A full set of valid fields.
pub fn valid_fields() -> impl Strategy<Value = DocumentFields> {
    (metadata(), magnitude(), notation(), labels()).prop_map(
        |(entity_metadata, payload_magnitude, professional_notation, taxonomy_labels)| {
            DocumentFields {
                entity_metadata,
                payload_magnitude,
                professional_notation,
                taxonomy_labels,
            }
        },
    )
}
