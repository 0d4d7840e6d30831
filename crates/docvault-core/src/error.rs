//! Error types for docvault core.

use std::fmt;

use thiserror::Error;

/// Which free-text field failed its bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    EntityMetadata,
    ProfessionalNotation,
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextField::EntityMetadata => f.write_str("entity_metadata"),
            TextField::ProfessionalNotation => f.write_str("professional_notation"),
        }
    }
}

/// How a taxonomy label set broke its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyViolation {
    /// Fewer than one or more than ten labels.
    Count(usize),
    /// The label at `index` is empty, too long, or not ASCII.
    Label { index: usize, len: usize },
}

impl fmt::Display for TaxonomyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyViolation::Count(n) => write!(f, "{} labels (expected 1..=10)", n),
            TaxonomyViolation::Label { index, len } => {
                write!(f, "label {} has length {} (expected 1..=32 ASCII bytes)", index, len)
            }
        }
    }
}

/// Field validation errors, raised before any mutation is committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} out of bounds: length {len}")]
    MetadataInvalid { field: TextField, len: usize },

    #[error("payload magnitude out of bounds: {value}")]
    MagnitudeInvalid { value: u64 },

    #[error("invalid taxonomy: {0}")]
    TaxonomyInvalid(TaxonomyViolation),
}
