//! Item catalog - the static definition of domains, items, and sub-indices.
//!
//! The catalog is loaded once at process start, validated for referential
//! integrity, and shared read-only (`Arc<ItemCatalog>`) by every other
//! component. It is never mutated at runtime.
//!
//! A domain either has no sub-indices (its score is the item mean) or its
//! sub-indices partition its items: every item in exactly one sub-index of
//! 3 to 4 items.

mod errors;

pub use errors::CatalogError;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainId, ItemId, SubIndexId};

/// Smallest and largest allowed sub-index.
pub const SUB_INDEX_MIN_ITEMS: usize = 3;
pub const SUB_INDEX_MAX_ITEMS: usize = 4;

const EMBEDDED_CATALOG: &str = include_str!("../../../catalog/assessment.yaml");

/// A single Likert item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub text: String,
}

/// A top-level domain and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDefinition {
    pub id: DomainId,
    pub title: String,
    pub items: Vec<ItemDefinition>,
}

impl DomainDefinition {
    /// Iterates the item ids of this domain in catalog order.
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Number of items in this domain.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Named grouping of items within one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubIndexDefinition {
    pub id: SubIndexId,
    pub title: String,
    pub domain: DomainId,
    pub items: Vec<ItemId>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    domains: Vec<DomainDefinition>,
    #[serde(default)]
    sub_indices: Vec<SubIndexDefinition>,
}

/// Validated, immutable item catalog.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    domains: Vec<DomainDefinition>,
    sub_indices: Vec<SubIndexDefinition>,
    item_domains: HashMap<ItemId, DomainId>,
}

impl ItemCatalog {
    /// Parses and validates a catalog from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        Self::build(document.domains, document.sub_indices)
    }

    /// Reads, parses, and validates a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Builds a catalog from definitions, enforcing referential integrity.
    pub fn build(
        domains: Vec<DomainDefinition>,
        sub_indices: Vec<SubIndexDefinition>,
    ) -> Result<Self, CatalogError> {
        if domains.is_empty() {
            return Err(CatalogError::NoDomains);
        }

        let mut domain_ids = HashSet::new();
        let mut item_domains = HashMap::new();
        for domain in &domains {
            if !domain_ids.insert(domain.id.clone()) {
                return Err(CatalogError::DuplicateDomain(domain.id.clone()));
            }
            if domain.items.is_empty() {
                return Err(CatalogError::EmptyDomain(domain.id.clone()));
            }
            for item in &domain.items {
                if item_domains
                    .insert(item.id.clone(), domain.id.clone())
                    .is_some()
                {
                    return Err(CatalogError::DuplicateItem(item.id.clone()));
                }
            }
        }

        let mut sub_index_ids = HashSet::new();
        let mut item_sub_index: HashMap<&ItemId, &SubIndexId> = HashMap::new();
        for sub_index in &sub_indices {
            if !sub_index_ids.insert(sub_index.id.clone()) {
                return Err(CatalogError::DuplicateSubIndex(sub_index.id.clone()));
            }
            if sub_index.items.is_empty() {
                return Err(CatalogError::EmptySubIndex(sub_index.id.clone()));
            }
            if !domain_ids.contains(&sub_index.domain) {
                return Err(CatalogError::UnknownSubIndexDomain {
                    sub_index: sub_index.id.clone(),
                    domain: sub_index.domain.clone(),
                });
            }
            for item in &sub_index.items {
                match item_domains.get(item) {
                    None => {
                        return Err(CatalogError::UnknownSubIndexItem {
                            sub_index: sub_index.id.clone(),
                            item: item.clone(),
                        })
                    }
                    Some(actual) if actual != &sub_index.domain => {
                        return Err(CatalogError::SubIndexItemOutsideDomain {
                            sub_index: sub_index.id.clone(),
                            item: item.clone(),
                            expected: sub_index.domain.clone(),
                            actual: actual.clone(),
                        })
                    }
                    Some(_) => {}
                }
                if let Some(first) = item_sub_index.insert(item, &sub_index.id) {
                    if first == &sub_index.id {
                        return Err(CatalogError::RepeatedSubIndexItem {
                            sub_index: sub_index.id.clone(),
                            item: item.clone(),
                        });
                    }
                    return Err(CatalogError::OverlappingSubIndices {
                        item: item.clone(),
                        first: first.clone(),
                        second: sub_index.id.clone(),
                    });
                }
            }
            let size = sub_index.items.len();
            if !(SUB_INDEX_MIN_ITEMS..=SUB_INDEX_MAX_ITEMS).contains(&size) {
                return Err(CatalogError::SubIndexSize {
                    sub_index: sub_index.id.clone(),
                    size,
                    min: SUB_INDEX_MIN_ITEMS,
                    max: SUB_INDEX_MAX_ITEMS,
                });
            }
        }

        for domain in &domains {
            if !sub_indices.iter().any(|s| s.domain == domain.id) {
                continue;
            }
            if let Some(item) = domain.item_ids().find(|i| !item_sub_index.contains_key(i)) {
                return Err(CatalogError::UncoveredItem {
                    domain: domain.id.clone(),
                    item: item.clone(),
                });
            }
        }

        Ok(Self {
            domains,
            sub_indices,
            item_domains,
        })
    }

    /// Domains in catalog order.
    pub fn domains(&self) -> &[DomainDefinition] {
        &self.domains
    }

    /// Looks up a domain.
    pub fn domain(&self, id: &DomainId) -> Option<&DomainDefinition> {
        self.domains.iter().find(|d| &d.id == id)
    }

    /// Returns the ids of every domain in catalog order.
    pub fn domain_ids(&self) -> Vec<DomainId> {
        self.domains.iter().map(|d| d.id.clone()).collect()
    }

    /// Number of domains; the `N` of "x of N domains done".
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Total number of items across all domains.
    pub fn item_count(&self) -> usize {
        self.item_domains.len()
    }

    /// The domain an item belongs to.
    pub fn domain_of(&self, item: &ItemId) -> Option<&DomainId> {
        self.item_domains.get(item)
    }

    /// All sub-indices in catalog order.
    pub fn sub_indices(&self) -> &[SubIndexDefinition] {
        &self.sub_indices
    }

    /// Sub-indices belonging to one domain.
    pub fn sub_indices_for<'a>(
        &'a self,
        domain: &'a DomainId,
    ) -> impl Iterator<Item = &'a SubIndexDefinition> + 'a {
        self.sub_indices.iter().filter(move |s| &s.domain == domain)
    }
}
