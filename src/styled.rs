//! Scoped styles.
//!
//! A [`Style`] owns a set of CSS rules rewritten to carry a unique
//! attribute-selector suffix, and [`Style::apply`] stamps the matching
//! value-less marker attribute onto a DOM subtree. Rules apply only to
//! their own marked subtree, so two styles never collide on selectors.

use crate::context::Kind;
use crate::error::{VellumError, VellumResult};
use crate::node::{is_media_rule, Node};
use crate::value::{AttrValue, Child};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide scope-id source, the one piece of shared mutable state in
/// the crate. The atomic increment keeps ids unique and strictly
/// increasing under concurrent construction.
static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

fn next_scope_id() -> u64 {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// The value-less marker attribute stamped onto scoped DOM nodes.
fn marker_attr(id: u64) -> String {
    format!("v-style{id}")
}

/// The attribute-selector suffix appended to scoped rule selectors.
fn scope_suffix(id: u64) -> String {
    format!("[v-style{id}]")
}

/// A scoped stylesheet: a unique id plus the rewritten rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    id: u64,
    rules: Vec<Node>,
}

impl Style {
    /// Build a scoped style from CSS rules.
    ///
    /// Assigns the next process-wide id, then rewrites every rule:
    /// selectors of rules that carry declarations and are not media-like
    /// gain the `[v-style<id>]` suffix. Children are rewritten
    /// unconditionally, including inside media bodies.
    pub fn new(rules: Vec<Node>) -> VellumResult<Style> {
        for rule in &rules {
            if rule.context().kind() != Kind::Css {
                return Err(VellumError::InvalidChildType {
                    selector: rule.tag().to_string(),
                    found: format!("a DOM node <{}>", rule.tag()),
                });
            }
        }
        let id = next_scope_id();
        let rules = rules.iter().map(|rule| scope_rule(rule, id)).collect();
        Ok(Style { id, rules })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rules(&self) -> &[Node] {
        &self.rules
    }

    /// Wrap `node` with this style, stamping the marker attribute onto
    /// every descendant DOM node. The input is never mutated.
    pub fn apply(&self, node: &Node) -> Styled {
        Styled {
            wrapped: stamp(node, self.id),
            style: self.clone(),
        }
    }

    /// Apply this style to an already-styled node: the wrapped subtree is
    /// re-stamped with this style's id and re-wrapped under the original
    /// style. The inner subtree's own markers are preserved.
    pub fn apply_styled(&self, styled: &Styled) -> Styled {
        Styled {
            wrapped: stamp(styled.node(), self.id),
            style: styled.style().clone(),
        }
    }
}

/// A DOM node whose subtree carries a style's marker attributes.
/// Transparent at render time; it renders exactly as its wrapped node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Styled {
    wrapped: Node,
    style: Style,
}

impl Styled {
    pub fn node(&self) -> &Node {
        &self.wrapped
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

fn scope_rule(rule: &Node, id: u64) -> Node {
    let selector = if rule.attrs().is_empty() || is_media_rule(rule.tag()) {
        rule.tag().to_string()
    } else {
        format!("{}{}", rule.tag(), scope_suffix(id))
    };
    let children = rule
        .children()
        .iter()
        .map(|child| match child {
            Child::Node(nested) => Child::Node(scope_rule(nested, id)),
            other => other.clone(),
        })
        .collect();
    Node::from_parts(rule.context(), selector, rule.attrs().clone(), children)
}

/// Stamp the marker attribute onto `node` and every descendant DOM node,
/// through a defensive copy of each attribute map. Recursion stops at
/// `Styled` children (cascade barrier) and leaves non-DOM nodes and
/// scalars untouched.
fn stamp(node: &Node, id: u64) -> Node {
    if node.context().kind() != Kind::Dom {
        return node.clone();
    }
    let mut attrs = node.attrs().clone();
    attrs.insert(marker_attr(id), AttrValue::None);
    let children = node
        .children()
        .iter()
        .map(|child| match child {
            Child::Node(nested) => Child::Node(stamp(nested, id)),
            other => other.clone(),
        })
        .collect();
    Node::from_parts(node.context(), node.tag().to_string(), attrs, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn css(selector: &str, decls: &[(&str, &str)]) -> Node {
        let pairs: Vec<(String, AttrValue)> = decls
            .iter()
            .map(|(k, v)| (k.to_string(), AttrValue::from(*v)))
            .collect();
        Node::new(Context::css(), selector, (), pairs).unwrap()
    }

    #[test]
    fn rejects_dom_rules() {
        let div = Node::new(Context::dom(), "div", (), ()).unwrap();
        assert!(matches!(
            Style::new(vec![div]),
            Err(VellumError::InvalidChildType { .. })
        ));
    }

    #[test]
    fn scopes_selectors_with_declarations() {
        let style = Style::new(vec![css("p", &[("color", "red")])]).unwrap();
        let expected = format!("p[v-style{}]", style.id());
        assert_eq!(style.rules()[0].tag(), expected);
    }

    #[test]
    fn leaves_empty_and_media_selectors_alone() {
        let bare = Node::new(Context::css(), "a", (), ()).unwrap();
        let media = Node::new(
            Context::css(),
            "@media (max-width: 600px)",
            css("p", &[("color", "red")]),
            (),
        )
        .unwrap();
        let style = Style::new(vec![bare, media]).unwrap();
        assert_eq!(style.rules()[0].tag(), "a");
        assert_eq!(style.rules()[1].tag(), "@media (max-width: 600px)");
        // the rule nested inside the media body is still scoped
        if let Child::Node(inner) = &style.rules()[1].children()[0] {
            assert_eq!(inner.tag(), format!("p[v-style{}]", style.id()));
        } else {
            panic!("expected nested CSS rule");
        }
    }

    #[test]
    fn stamp_is_a_defensive_copy() {
        let original = Node::new(Context::dom(), "div", (), ()).unwrap();
        let style = Style::new(vec![]).unwrap();
        let styled = style.apply(&original);
        assert!(original.attrs().is_empty());
        assert_eq!(styled.node().attrs().len(), 1);
    }

    #[test]
    fn ids_strictly_increase() {
        let first = Style::new(vec![]).unwrap();
        let second = Style::new(vec![]).unwrap();
        assert!(second.id() > first.id());
    }
}
