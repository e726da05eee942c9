//! Scalar values, children, and the flattening utility.

use crate::context::Kind;
use crate::node::Node;
use crate::styled::Styled;
use serde::Serialize;
use std::fmt;

/// An attribute value.
///
/// `None` is the value-less attribute (`<script async>`): legal for DOM
/// nodes, rejected by CSS validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    None,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl AttrValue {
    pub fn is_none(&self) -> bool {
        matches!(self, AttrValue::None)
    }

    pub(crate) fn is_nan(&self) -> bool {
        matches!(self, AttrValue::Float(f) if f.is_nan())
    }

    pub(crate) fn is_empty_text(&self) -> bool {
        matches!(self, AttrValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::None => Ok(()),
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<()> for AttrValue {
    fn from(_: ()) -> Self {
        AttrValue::None
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::Float(v.into())
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

/// A single child of a node.
///
/// `Node` and `Styled` children render with their own stored context;
/// scalars render through the parent's child-escape table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Node(Node),
    Styled(Styled),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Child {
    /// Short human-readable description, used in validation error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Child::Node(n) => match n.context().kind() {
                Kind::Dom => format!("a DOM node <{}>", n.tag()),
                Kind::Css => format!("a CSS rule '{}'", n.tag()),
            },
            Child::Styled(s) => format!("a styled DOM node <{}>", s.node().tag()),
            Child::Text(s) => format!("text {s:?}"),
            Child::Int(v) => format!("number {v}"),
            Child::Float(v) => format!("number {v}"),
            Child::Bool(v) => format!("boolean {v}"),
        }
    }
}

impl From<Node> for Child {
    fn from(n: Node) -> Self {
        Child::Node(n)
    }
}

impl From<Styled> for Child {
    fn from(s: Styled) -> Self {
        Child::Styled(s)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Text(s.to_string())
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Text(s)
    }
}

impl From<i64> for Child {
    fn from(v: i64) -> Self {
        Child::Int(v)
    }
}

impl From<i32> for Child {
    fn from(v: i32) -> Self {
        Child::Int(v.into())
    }
}

impl From<f64> for Child {
    fn from(v: f64) -> Self {
        Child::Float(v)
    }
}

impl From<bool> for Child {
    fn from(v: bool) -> Self {
        Child::Bool(v)
    }
}

/// Nestable child input for construction calls.
///
/// A `ChildSpec` is either a single child or an arbitrarily nested list of
/// further specs. Construction flattens it into one ordered `Vec<Child>`;
/// a single non-list value behaves as a one-element list.
#[derive(Debug, Clone)]
pub enum ChildSpec {
    One(Child),
    Many(Vec<ChildSpec>),
}

/// Recursively flatten nested child lists, preserving order.
pub(crate) fn flatten(spec: ChildSpec) -> Vec<Child> {
    let mut out = Vec::new();
    flatten_into(spec, &mut out);
    out
}

fn flatten_into(spec: ChildSpec, out: &mut Vec<Child>) {
    match spec {
        ChildSpec::One(child) => out.push(child),
        ChildSpec::Many(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
    }
}

impl From<Child> for ChildSpec {
    fn from(c: Child) -> Self {
        ChildSpec::One(c)
    }
}

impl From<()> for ChildSpec {
    fn from(_: ()) -> Self {
        ChildSpec::Many(Vec::new())
    }
}

impl From<Node> for ChildSpec {
    fn from(n: Node) -> Self {
        ChildSpec::One(Child::Node(n))
    }
}

impl From<Styled> for ChildSpec {
    fn from(s: Styled) -> Self {
        ChildSpec::One(Child::Styled(s))
    }
}

impl From<&str> for ChildSpec {
    fn from(s: &str) -> Self {
        ChildSpec::One(Child::Text(s.to_string()))
    }
}

impl From<String> for ChildSpec {
    fn from(s: String) -> Self {
        ChildSpec::One(Child::Text(s))
    }
}

impl From<i64> for ChildSpec {
    fn from(v: i64) -> Self {
        ChildSpec::One(Child::Int(v))
    }
}

impl From<i32> for ChildSpec {
    fn from(v: i32) -> Self {
        ChildSpec::One(Child::Int(v.into()))
    }
}

impl From<f64> for ChildSpec {
    fn from(v: f64) -> Self {
        ChildSpec::One(Child::Float(v))
    }
}

impl From<bool> for ChildSpec {
    fn from(v: bool) -> Self {
        ChildSpec::One(Child::Bool(v))
    }
}

impl<T: Into<ChildSpec>> From<Vec<T>> for ChildSpec {
    fn from(items: Vec<T>) -> Self {
        ChildSpec::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ChildSpec>, const N: usize> From<[T; N]> for ChildSpec {
    fn from(items: [T; N]) -> Self {
        ChildSpec::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Ordered attribute-pair input for construction calls.
#[derive(Debug, Clone, Default)]
pub struct AttrList(pub(crate) Vec<(String, AttrValue)>);

impl From<()> for AttrList {
    fn from(_: ()) -> Self {
        AttrList(Vec::new())
    }
}

impl<K: Into<String>, V: Into<AttrValue>> From<Vec<(K, V)>> for AttrList {
    fn from(pairs: Vec<(K, V)>) -> Self {
        AttrList(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for AttrList {
    fn from(pairs: [(K, V); N]) -> Self {
        AttrList(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_nested_lists_in_order() {
        // [1, [2, [3, []], 4]]
        let spec = ChildSpec::from(vec![
            ChildSpec::from(1),
            ChildSpec::from(vec![
                ChildSpec::from(2),
                ChildSpec::from(vec![ChildSpec::from(3), ChildSpec::from(())]),
                ChildSpec::from(4),
            ]),
        ]);
        assert_eq!(
            flatten(spec),
            vec![Child::Int(1), Child::Int(2), Child::Int(3), Child::Int(4)]
        );
    }

    #[test]
    fn flatten_wraps_single_value() {
        assert_eq!(flatten(ChildSpec::from(5)), vec![Child::Int(5)]);
        assert_eq!(flatten(ChildSpec::from("x")), vec![Child::Text("x".to_string())]);
    }

    #[test]
    fn flatten_empty_list() {
        assert!(flatten(ChildSpec::from(())).is_empty());
    }

    #[test]
    fn attr_value_display() {
        assert_eq!(AttrValue::from("a").to_string(), "a");
        assert_eq!(AttrValue::from(3).to_string(), "3");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
        assert_eq!(AttrValue::from(true).to_string(), "true");
        assert_eq!(AttrValue::None.to_string(), "");
    }

    #[test]
    fn attr_list_from_pairs() {
        let attrs = AttrList::from([("href", "x"), ("rel", "noopener")]);
        assert_eq!(attrs.0.len(), 2);
        assert_eq!(attrs.0[0].0, "href");
    }
}
