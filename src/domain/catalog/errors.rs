//! Catalog loading errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::{DomainId, ItemId, SubIndexId};

/// Errors raised while loading or validating an item catalog.
///
/// Every variant is fatal: the process must not start with a catalog that
/// fails referential integrity.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Catalog defines no domains")]
    NoDomains,

    #[error("Domain '{0}' is defined more than once")]
    DuplicateDomain(DomainId),

    #[error("Domain '{0}' has no items")]
    EmptyDomain(DomainId),

    #[error("Item '{0}' is defined more than once")]
    DuplicateItem(ItemId),

    #[error("Sub-index '{0}' is defined more than once")]
    DuplicateSubIndex(SubIndexId),

    #[error("Sub-index '{0}' has no items")]
    EmptySubIndex(SubIndexId),

    #[error("Sub-index '{sub_index}' has {size} items; expected {min} to {max}")]
    SubIndexSize {
        sub_index: SubIndexId,
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("Sub-index '{sub_index}' lists item '{item}' more than once")]
    RepeatedSubIndexItem { sub_index: SubIndexId, item: ItemId },

    #[error("Item '{item}' is in both sub-index '{first}' and '{second}'")]
    OverlappingSubIndices {
        item: ItemId,
        first: SubIndexId,
        second: SubIndexId,
    },

    #[error("Item '{item}' of domain '{domain}' is not in any of the domain's sub-indices")]
    UncoveredItem { domain: DomainId, item: ItemId },

    #[error("Sub-index '{sub_index}' refers to unknown domain '{domain}'")]
    UnknownSubIndexDomain {
        sub_index: SubIndexId,
        domain: DomainId,
    },

    #[error("Sub-index '{sub_index}' refers to unknown item '{item}'")]
    UnknownSubIndexItem { sub_index: SubIndexId, item: ItemId },

    #[error(
        "Sub-index '{sub_index}' is declared in domain '{expected}' but item '{item}' belongs to '{actual}'"
    )]
    SubIndexItemOutsideDomain {
        sub_index: SubIndexId,
        item: ItemId,
        expected: DomainId,
        actual: DomainId,
    },
}
