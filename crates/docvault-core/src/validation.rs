//! Field validation: bounds checks and the custodian authority check.
//!
//! Every predicate is pure. Writes call [`validate_fields`] before touching
//! the store, so no record is ever persisted out of bounds.

use crate::error::{TaxonomyViolation, TextField, ValidationError};
use crate::record::{DocumentFields, DocumentRecord};
use crate::types::Principal;

/// Maximum entity metadata length in bytes.
pub const MAX_METADATA_LEN: usize = 64;

/// Maximum professional notation length in bytes.
pub const MAX_NOTATION_LEN: usize = 128;

/// Maximum length of a single taxonomy label in bytes.
pub const MAX_LABEL_LEN: usize = 32;

/// Maximum number of taxonomy labels.
pub const MAX_LABELS: usize = 10;

/// Payload magnitudes must be strictly below this value.
pub const MAGNITUDE_CEILING: u64 = 1_000_000_000;

/// True iff `s` is ASCII and `min_len <= len(s) <= max_len`.
pub fn text_in_bounds(s: &str, min_len: usize, max_len: usize) -> bool {
    s.is_ascii() && (min_len..=max_len).contains(&s.len())
}

/// True iff `0 < n < 1_000_000_000`.
pub fn magnitude_in_bounds(n: u64) -> bool {
    n > 0 && n < MAGNITUDE_CEILING
}

/// True iff the label is ASCII and `0 < len < 33`.
pub fn label_valid(label: &str) -> bool {
    text_in_bounds(label, 1, MAX_LABEL_LEN)
}

/// True iff there are 1..=10 labels and each one is valid.
pub fn taxonomy_set_valid<S: AsRef<str>>(labels: &[S]) -> bool {
    check_taxonomy(labels).is_ok()
}

/// True iff `candidate` is the record's current custodian.
pub fn is_custodian(record: &DocumentRecord, candidate: &Principal) -> bool {
    record.custodian == *candidate
}

fn check_taxonomy<S: AsRef<str>>(labels: &[S]) -> Result<(), TaxonomyViolation> {
    if labels.is_empty() || labels.len() > MAX_LABELS {
        return Err(TaxonomyViolation::Count(labels.len()));
    }
    for (index, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        if !label_valid(label) {
            return Err(TaxonomyViolation::Label {
                index,
                len: label.len(),
            });
        }
    }
    Ok(())
}

/// Validate all four mutable fields.
///
/// Checks run in a fixed order and the first failure wins:
/// metadata, magnitude, notation, taxonomy. A bad notation is reported as
/// `MetadataInvalid` with `field = ProfessionalNotation`.
pub fn validate_fields(fields: &DocumentFields) -> Result<(), ValidationError> {
    // 1. Entity metadata
    if !text_in_bounds(&fields.entity_metadata, 1, MAX_METADATA_LEN) {
        return Err(ValidationError::MetadataInvalid {
            field: TextField::EntityMetadata,
            len: fields.entity_metadata.len(),
        });
    }

    // 2. Payload magnitude
    if !magnitude_in_bounds(fields.payload_magnitude) {
        return Err(ValidationError::MagnitudeInvalid {
            value: fields.payload_magnitude,
        });
    }

    // 3. Professional notation
    if !text_in_bounds(&fields.professional_notation, 1, MAX_NOTATION_LEN) {
        return Err(ValidationError::MetadataInvalid {
            field: TextField::ProfessionalNotation,
            len: fields.professional_notation.len(),
        });
    }

    // 4. Taxonomy labels
    check_taxonomy(&fields.taxonomy_labels).map_err(ValidationError::TaxonomyInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CallContext;
    use crate::record::NewDocument;
    use crate::types::VaultKey;
    use proptest::prelude::*;

    fn valid_fields() -> DocumentFields {
        DocumentFields::new("Doc", 100, "Note", ["a"])
    }

    #[test]
    fn test_text_bounds_edges() {
        assert!(!text_in_bounds("", 1, 64));
        assert!(text_in_bounds("x", 1, 64));
        assert!(text_in_bounds(&"x".repeat(64), 1, 64));
        assert!(!text_in_bounds(&"x".repeat(65), 1, 64));
        assert!(text_in_bounds(&"x".repeat(128), 1, 128));
        assert!(!text_in_bounds(&"x".repeat(129), 1, 128));
    }

    #[test]
    fn test_text_rejects_non_ascii() {
        assert!(!text_in_bounds("café", 1, 64));
    }

    #[test]
    fn test_magnitude_edges() {
        assert!(!magnitude_in_bounds(0));
        assert!(magnitude_in_bounds(1));
        assert!(magnitude_in_bounds(999_999_999));
        assert!(!magnitude_in_bounds(1_000_000_000));
        assert!(!magnitude_in_bounds(u64::MAX));
    }

    #[test]
    fn test_label_edges() {
        assert!(!label_valid(""));
        assert!(label_valid("a"));
        assert!(label_valid(&"l".repeat(32)));
        assert!(!label_valid(&"l".repeat(33)));
    }

    #[test]
    fn test_taxonomy_set_counts() {
        let empty: Vec<String> = vec![];
        assert!(!taxonomy_set_valid(&empty));
        assert!(taxonomy_set_valid(&["a"]));
        assert!(taxonomy_set_valid(&vec!["t"; 10]));
        assert!(!taxonomy_set_valid(&vec!["t"; 11]));
        assert!(!taxonomy_set_valid(&["ok", ""]));
    }

    #[test]
    fn test_is_custodian() {
        let alice = Principal::derive("alice");
        let bob = Principal::derive("bob");
        let record = NewDocument::from_call(&CallContext::new(alice, 1), valid_fields())
            .into_record(VaultKey::FIRST);

        assert!(is_custodian(&record, &alice));
        assert!(!is_custodian(&record, &bob));
    }

    #[test]
    fn test_validate_fields_accepts_valid() {
        assert_eq!(validate_fields(&valid_fields()), Ok(()));
    }

    #[test]
    fn test_empty_metadata() {
        let mut fields = valid_fields();
        fields.entity_metadata.clear();
        assert_eq!(
            validate_fields(&fields),
            Err(ValidationError::MetadataInvalid {
                field: TextField::EntityMetadata,
                len: 0
            })
        );
    }

    #[test]
    fn test_long_notation_reports_notation_field() {
        let mut fields = valid_fields();
        fields.professional_notation = "n".repeat(129);
        assert!(matches!(
            validate_fields(&fields),
            Err(ValidationError::MetadataInvalid {
                field: TextField::ProfessionalNotation,
                len: 129
            })
        ));
    }

    #[test]
    fn test_bad_label_reports_index() {
        let mut fields = valid_fields();
        fields.taxonomy_labels = vec!["ok".into(), "x".repeat(33)];
        assert_eq!(
            validate_fields(&fields),
            Err(ValidationError::TaxonomyInvalid(TaxonomyViolation::Label {
                index: 1,
                len: 33
            }))
        );
    }

    #[test]
    fn test_check_order_metadata_before_magnitude() {
        // Every field is broken; metadata must be reported first.
        let fields = DocumentFields::new("", 0, "", Vec::<String>::new());
        assert!(matches!(
            validate_fields(&fields),
            Err(ValidationError::MetadataInvalid {
                field: TextField::EntityMetadata,
                ..
            })
        ));

        let fields = DocumentFields::new("Doc", 0, "", Vec::<String>::new());
        assert!(matches!(
            validate_fields(&fields),
            Err(ValidationError::MagnitudeInvalid { value: 0 })
        ));

        let fields = DocumentFields::new("Doc", 1, "", Vec::<String>::new());
        assert!(matches!(
            validate_fields(&fields),
            Err(ValidationError::MetadataInvalid {
                field: TextField::ProfessionalNotation,
                ..
            })
        ));

        let fields = DocumentFields::new("Doc", 1, "Note", Vec::<String>::new());
        assert!(matches!(
            validate_fields(&fields),
            Err(ValidationError::TaxonomyInvalid(TaxonomyViolation::Count(0)))
        ));
    }

    proptest! {
        #[test]
        fn test_magnitude_matches_bounds(n in any::<u64>()) {
            prop_assert_eq!(magnitude_in_bounds(n), n >= 1 && n <= 999_999_999);
        }

        #[test]
        fn test_ascii_label_matches_length_bound(label in "[ -~]{0,40}") {
            prop_assert_eq!(label_valid(&label), !label.is_empty() && label.len() <= 32);
        }
    }
}
