use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// A source (the package root or a part) owns an ordered collection of
/// typed relationships read from its `.rels` part. Lookups by type either
/// take the first match in document order or collect every match sorted by
/// relationship id.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// A single relationship from a source to a target.
///
/// Identified by an rId, either internal (pointing to another part) or
/// external (pointing to a URL outside the package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Directory of the source, used to resolve relative targets
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference as written in the .rels part.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "Cannot get target_partname for external relationship {}",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// How sibling relationships of one type are ordered by their ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelIdOrder {
    /// Plain string comparison: "rId10" sorts before "rId2".
    #[default]
    Lexicographic,
    /// Numeric comparison of a trailing number: "rId2" sorts before "rId10".
    Natural,
}

impl RelIdOrder {
    /// Compare two relationship ids under this ordering.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            RelIdOrder::Lexicographic => a.cmp(b),
            RelIdOrder::Natural => {
                let (stem_a, num_a) = split_numeric_suffix(a);
                let (stem_b, num_b) = split_numeric_suffix(b);
                stem_a
                    .cmp(stem_b)
                    .then(num_a.cmp(&num_b))
                    .then_with(|| a.cmp(b))
            },
        }
    }
}

/// Split "rId12" into ("rId", Some(12)). Ids without a trailing number, or
/// with one too large for u64, give `None`.
fn split_numeric_suffix(r_id: &str) -> (&str, Option<u64>) {
    let digits = r_id.bytes().rev().take_while(u8::is_ascii_digit).count();
    let (stem, number) = r_id.split_at(r_id.len() - digits);
    if number.is_empty() {
        return (stem, None);
    }
    (stem, atoi_simd::parse::<u64, false, false>(number.as_bytes()).ok())
}

/// Collection of relationships from a single source, in document order.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Directory of the source, used to resolve relative targets
    base_uri: String,

    /// Relationships as they appear in the .rels part
    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: SmallVec::new(),
        }
    }

    /// The directory relative targets in this collection resolve against.
    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Append a relationship to the collection.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(r_id, reltype, target_ref, self.base_uri.clone(), is_external);
        self.rels.push(rel);
        &self.rels[self.rels.len() - 1]
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get the first relationship of a type, in document order.
    ///
    /// Returns an error if no relationship of the type exists.
    pub fn first_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        self.rels
            .iter()
            .find(|rel| rel.reltype() == reltype)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(format!(
                    "No relationship of type '{}' from '{}'",
                    reltype, self.base_uri
                ))
            })
    }

    /// Get every relationship of a type, sorted by relationship id.
    ///
    /// Returns an empty vector if there is none.
    pub fn all_with_reltype(&self, reltype: &str, order: RelIdOrder) -> Vec<&Relationship> {
        let mut matching: Vec<&Relationship> = self
            .rels
            .iter()
            .filter(|rel| rel.reltype() == reltype)
            .collect();
        matching.sort_by(|a, b| order.compare(a.r_id(), b.r_id()));
        matching
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}
