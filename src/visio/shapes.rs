//! Shape text extraction.
//!
//! Shapes nest: a group shape holds its sub-shapes in a `<Shapes>` child, to
//! any depth. Shapes are visited in document order, and each contributes the
//! `Text` elements of its subtree. With [`TextScope::ShapeSubtree`] a text
//! inside a group is therefore seen once per enclosing shape;
//! [`TextScope::InnermostShape`] gives each text to its innermost shape only.

use crate::visio::options::TextScope;
use crate::xml::{XmlElement, XmlNode};

/// Every `Shape` element of the subtree rooted at `root` (`root` included),
/// in document order.
pub fn shapes(root: &XmlElement) -> impl Iterator<Item = &XmlElement> {
    std::iter::once(root)
        .chain(root.descendants())
        .filter(|element| element.local_name() == "Shape")
}

/// The `Text` elements owned by `shape`: those below it that are not below
/// a nested shape.
pub fn own_texts(shape: &XmlElement) -> Vec<&XmlElement> {
    let mut texts = Vec::new();
    let mut stack = vec![shape.nodes().iter()];

    while let Some(top) = stack.last_mut() {
        match top.next() {
            Some(XmlNode::Element(element)) => match element.local_name() {
                "Shape" => {},
                "Text" => texts.push(element),
                _ => stack.push(element.nodes().iter()),
            },
            Some(XmlNode::Text(_)) => {},
            None => {
                stack.pop();
            },
        }
    }

    texts
}

/// The `Text` elements a shape contributes under `scope`.
pub fn texts_of(shape: &XmlElement, scope: TextScope) -> Vec<&XmlElement> {
    match scope {
        TextScope::ShapeSubtree => shape.descendants_by_local_name("Text").collect(),
        TextScope::InnermostShape => own_texts(shape),
    }
}

/// Trimmed text of every shape text under `root`, in shape order.
pub fn shape_texts(root: &XmlElement, scope: TextScope) -> Vec<String> {
    shapes(root)
        .flat_map(|shape| texts_of(shape, scope))
        .map(|text| text.text().trim().to_string())
        .collect()
}

/// Trimmed shape texts under `root` that start with `prefix`.
///
/// The comparison is exact and case-sensitive; `prefix` itself is not
/// trimmed.
pub fn prefix_texts(root: &XmlElement, prefix: &str, scope: TextScope) -> Vec<String> {
    shape_texts(root, scope)
        .into_iter()
        .filter(|text| text.starts_with(prefix))
        .collect()
}
