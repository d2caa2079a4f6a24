//! Options controlling how pages are ordered and named during a search.
use crate::opc::rel::RelIdOrder;
use serde::{Deserialize, Serialize};

/// How page parts are matched with the names in the pages index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePairing {
    /// Match by relationship id when every index entry carries one,
    /// otherwise by position.
    #[default]
    Auto,
    /// The i-th non-background name names the i-th page part.
    Positional,
    /// Each page part is named by the index entry that references its
    /// relationship id.
    ByRelationshipId,
}

/// Which shapes a `Text` element is reported for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextScope {
    /// Every shape reports all texts of its subtree, so a text inside a
    /// group is reported once per enclosing shape.
    #[default]
    ShapeSubtree,
    /// A text is reported only for its innermost enclosing shape.
    InnermostShape,
}

/// Search configuration.
///
/// # Example
/// ```
/// use vsdx_notes::opc::RelIdOrder;
/// use vsdx_notes::visio::{PagePairing, SearchOptions};
///
/// let options = SearchOptions::default()
///     .with_pairing(PagePairing::Positional)
///     .with_rel_id_order(RelIdOrder::Natural);
/// assert_eq!(options.pairing, PagePairing::Positional);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// How page parts get their names
    pub pairing: PagePairing,

    /// Order in which sibling page parts are visited
    pub rel_id_order: RelIdOrder,

    /// How texts of nested shapes are attributed
    pub text_scope: TextScope,
}

impl SearchOptions {
    /// Set the page pairing mode.
    #[inline]
    pub fn with_pairing(mut self, pairing: PagePairing) -> Self {
        self.pairing = pairing;
        self
    }

    /// Set the page part ordering.
    #[inline]
    pub fn with_rel_id_order(mut self, rel_id_order: RelIdOrder) -> Self {
        self.rel_id_order = rel_id_order;
        self
    }

    /// Set how texts of nested shapes are attributed.
    #[inline]
    pub fn with_text_scope(mut self, text_scope: TextScope) -> Self {
        self.text_scope = text_scope;
        self
    }
}
