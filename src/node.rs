//! The node type and its construction pipeline.
//!
//! Construction runs normalize→validate over the tag, the flattened child
//! list, and every attribute pair, dispatching on the context kind. A
//! `Node` is immutable once built; [`Node::extend`] and
//! [`Node::with_class`] return new nodes and re-run the same pipeline on
//! the added pieces, so no partially-validated node is ever observable.

use crate::context::{Context, Kind};
use crate::error::{VellumError, VellumResult};
use crate::value::{flatten, AttrList, AttrValue, Child, ChildSpec};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// HTML void elements: never have children, rendered self-closing.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Case-sensitive camelCase attribute names (HTML/SVG) that are exempt
/// from kebab-casing.
const CAMEL_CASE_ATTRS: &[&str] = &[
    "allowReorder",
    "attributeName",
    "attributeType",
    "autoReverse",
    "baseFrequency",
    "baseProfile",
    "calcMode",
    "clipPath",
    "clipPathUnits",
    "contentScriptType",
    "contentStyleType",
    "diffuseConstant",
    "edgeMode",
    "externalResourcesRequired",
    "filterRes",
    "filterUnits",
    "glyphRef",
    "gradientTransform",
    "gradientUnits",
    "kernelMatrix",
    "kernelUnitLength",
    "keyPoints",
    "keySplines",
    "keyTimes",
    "lengthAdjust",
    "limitingConeAngle",
    "markerHeight",
    "markerUnits",
    "markerWidth",
    "maskContentUnits",
    "maskUnits",
    "numOctaves",
    "pathLength",
    "patternContentUnits",
    "patternTransform",
    "patternUnits",
    "pointsAtX",
    "pointsAtY",
    "pointsAtZ",
    "preserveAlpha",
    "preserveAspectRatio",
    "primitiveUnits",
    "refX",
    "refY",
    "repeatCount",
    "repeatDur",
    "requiredExtensions",
    "requiredFeatures",
    "specularConstant",
    "specularExponent",
    "spreadMethod",
    "startOffset",
    "stdDeviation",
    "stitchTiles",
    "surfaceScale",
    "systemLanguage",
    "tableValues",
    "targetX",
    "targetY",
    "textLength",
    "viewBox",
    "viewTarget",
    "xChannelSelector",
    "yChannelSelector",
    "zoomAndPan",
];

pub(crate) fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Media-like CSS rules keep their children nested inside the braces
/// instead of flattening them into sibling selectors.
pub(crate) fn is_media_rule(selector: &str) -> bool {
    selector.starts_with("@media")
}

/// Insertion-ordered, key-unique attribute mapping.
///
/// Duplicate keys are last-write-wins on the value while keeping the
/// first insertion's position, so render output stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttrMap(Vec<(String, AttrValue)>);

impl AttrMap {
    pub(crate) fn insert(&mut self, name: String, value: AttrValue) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A validated markup node: a DOM element or a CSS rule, depending on its
/// stored context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    context: Context,
    tag: String,
    attrs: AttrMap,
    children: Vec<Child>,
}

impl Node {
    /// Build a node under an explicit context.
    ///
    /// The tag is normalized and validated, children are flattened and
    /// validated against the tag, and every attribute pair is normalized
    /// (which may fan one input pair out into several) and validated.
    /// Construction is all-or-nothing.
    pub fn new(
        context: Context,
        tag: impl Into<String>,
        children: impl Into<ChildSpec>,
        attrs: impl Into<AttrList>,
    ) -> VellumResult<Node> {
        let tag = validate_tag(context, normalize_tag(context, tag.into()))?;
        let children = flatten(children.into());
        validate_children(context, &tag, &children)?;
        let attrs = build_attrs(context, &tag, attrs.into(), AttrMap::default())?;
        Ok(Node {
            context,
            tag,
            attrs,
            children,
        })
    }

    /// Extend this node with more attributes and children, returning a new
    /// node with the same tag and context.
    ///
    /// New attributes override same-named existing ones; new children are
    /// prepended before the existing list. The receiver is never mutated.
    pub fn extend(
        &self,
        children: impl Into<ChildSpec>,
        attrs: impl Into<AttrList>,
    ) -> VellumResult<Node> {
        let fresh = flatten(children.into());
        validate_children(self.context, &self.tag, &fresh)?;
        let attrs = build_attrs(self.context, &self.tag, attrs.into(), self.attrs.clone())?;
        let mut children = fresh;
        children.extend(self.children.iter().cloned());
        Ok(Node {
            context: self.context,
            tag: self.tag.clone(),
            attrs,
            children,
        })
    }

    /// Class shorthand for DOM nodes: append `token` to the `class`
    /// attribute, space-joined, preserving order. The token passes through
    /// the same kebab-casing rules as attribute names.
    pub fn with_class(&self, token: &str) -> VellumResult<Node> {
        let token = normalize_dom_attr_name(token);
        let value = match self.attrs.get("class") {
            None | Some(AttrValue::None) => token,
            Some(AttrValue::Text(existing)) if existing.is_empty() => token,
            Some(existing) => format!("{existing} {token}"),
        };
        self.extend((), [("class", AttrValue::Text(value))])
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// The element tag, or the selector for CSS nodes.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Assemble a node from already-validated parts. Callers must uphold
    /// the construction invariants themselves.
    pub(crate) fn from_parts(
        context: Context,
        tag: String,
        attrs: AttrMap,
        children: Vec<Child>,
    ) -> Node {
        Node {
            context,
            tag,
            attrs,
            children,
        }
    }
}

fn build_attrs(
    context: Context,
    tag: &str,
    input: AttrList,
    mut map: AttrMap,
) -> VellumResult<AttrMap> {
    for (name, value) in input.0 {
        for (name, value) in normalize_attr(context, name, value) {
            validate_attr(context, tag, &name, &value)?;
            map.insert(name, value);
        }
    }
    Ok(map)
}

fn normalize_tag(_context: Context, tag: String) -> String {
    tag
}

fn validate_tag(_context: Context, tag: String) -> VellumResult<String> {
    if tag.is_empty() {
        return Err(VellumError::EmptyTag);
    }
    Ok(tag)
}

fn validate_children(context: Context, tag: &str, children: &[Child]) -> VellumResult<()> {
    match context.kind() {
        Kind::Dom => {
            if is_void_element(tag) && !children.is_empty() {
                return Err(VellumError::VoidElementChildren {
                    tag: tag.to_string(),
                });
            }
        }
        Kind::Css => {
            for child in children {
                match child {
                    Child::Node(node) if node.context().kind() == Kind::Css => {}
                    other => {
                        return Err(VellumError::InvalidChildType {
                            selector: tag.to_string(),
                            found: other.describe(),
                        })
                    }
                }
            }
        }
    }
    Ok(())
}

/// Normalize one input attribute pair into zero-or-more output pairs.
/// Both kinds currently emit exactly one pair; the signature allows a
/// normalization to fan out.
fn normalize_attr(context: Context, name: String, value: AttrValue) -> Vec<(String, AttrValue)> {
    let name = match context.kind() {
        Kind::Dom => normalize_dom_attr_name(&name),
        Kind::Css => kebab_case(&name),
    };
    vec![(name, value)]
}

fn validate_attr(context: Context, tag: &str, name: &str, value: &AttrValue) -> VellumResult<()> {
    if value.is_nan() && !context.allows_nan_attr_values() {
        return Err(VellumError::NanAttributeValue {
            tag: tag.to_string(),
            name: name.to_string(),
        });
    }
    match context.kind() {
        Kind::Dom => {
            static ATTR_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
            let attr_name_regex = ATTR_NAME_REGEX.get_or_init(|| Regex::new(r"^\S+$").unwrap());
            if !attr_name_regex.is_match(name) {
                return Err(VellumError::InvalidAttributeName {
                    name: name.to_string(),
                });
            }
        }
        Kind::Css => {
            if value.is_none() || value.is_empty_text() {
                return Err(VellumError::NullOrEmptyCssValue {
                    selector: tag.to_string(),
                    property: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Kebab-case a DOM attribute name unless it is one of the known
/// case-sensitive camelCase names.
pub(crate) fn normalize_dom_attr_name(name: &str) -> String {
    if CAMEL_CASE_ATTRS.contains(&name) {
        name.to_string()
    } else {
        kebab_case(name)
    }
}

/// `fontSize` → `font-size`, `font_size` → `font-size`.
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_rules() {
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("font_size"), "font-size");
        assert_eq!(kebab_case("data-value"), "data-value");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn camel_case_table_is_exempt() {
        assert_eq!(normalize_dom_attr_name("viewBox"), "viewBox");
        assert_eq!(normalize_dom_attr_name("preserveAspectRatio"), "preserveAspectRatio");
        // not in the table, kebab-cased like everything else
        assert_eq!(normalize_dom_attr_name("viewbox"), "viewbox");
        assert_eq!(normalize_dom_attr_name("dataValue"), "data-value");
    }

    #[test]
    fn void_element_table() {
        assert!(is_void_element("img"));
        assert!(is_void_element("br"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn media_rule_prefix() {
        assert!(is_media_rule("@media (min-width: 700px)"));
        assert!(!is_media_rule("a"));
        assert!(!is_media_rule("p @media"));
    }

    #[test]
    fn attr_map_last_write_wins_keeps_position() {
        let mut map = AttrMap::default();
        map.insert("id".to_string(), AttrValue::from("a"));
        map.insert("class".to_string(), AttrValue::from("b"));
        map.insert("id".to_string(), AttrValue::from("c"));
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "id");
        assert_eq!(pairs[0].1, &AttrValue::from("c"));
        assert_eq!(pairs[1].0, "class");
    }

    #[test]
    fn empty_tag_rejected() {
        assert!(matches!(
            Node::new(Context::dom(), "", (), ()),
            Err(VellumError::EmptyTag)
        ));
        assert!(matches!(
            Node::new(Context::css(), "", (), ()),
            Err(VellumError::EmptyTag)
        ));
    }

    #[test]
    fn attr_name_whitespace_rejected() {
        let result = Node::new(Context::dom(), "div", (), [("bad name", "x")]);
        assert!(matches!(
            result.unwrap_err(),
            VellumError::InvalidAttributeName { .. }
        ));
    }
}
