//! DOM and CSS writers.
//!
//! Rendering assumes its input was validated at construction and never
//! raises validation errors; the only failures are sink failures.

use crate::context::{Context, Kind};
use crate::escape::{table_for, write_escaped, Subject};
use crate::node::{is_media_rule, is_void_element, Node};
use crate::styled::{Style, Styled};
use crate::value::Child;
use std::fmt::{self, Display, Write};

/// Render a node, style, or styled node to an owned string.
pub fn render<T: Display>(value: &T) -> String {
    value.to_string()
}

/// Render into an existing append-only sink.
pub fn render_to<W: Write, T: Display>(out: &mut W, value: &T) -> fmt::Result {
    write!(out, "{value}")
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context().kind() {
            Kind::Dom => write_dom(f, self),
            Kind::Css => write_css_rule(f, self.tag(), self),
        }
    }
}

impl Display for Styled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node().fmt(f)
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules() {
            rule.fmt(f)?;
        }
        Ok(())
    }
}

fn write_dom<W: Write>(out: &mut W, node: &Node) -> fmt::Result {
    let ctx = node.context();
    out.write_char('<')?;
    write_escaped(out, node.tag(), table_for(ctx, Subject::Tag))?;
    for (name, value) in node.attrs().iter() {
        out.write_char(' ')?;
        write_escaped(out, name, table_for(ctx, Subject::AttrName))?;
        if !value.is_none() {
            out.write_str("=\"")?;
            write_escaped(out, &value.to_string(), table_for(ctx, Subject::AttrValue))?;
            out.write_char('"')?;
        }
    }
    if is_void_element(node.tag()) {
        debug_assert!(node.children().is_empty());
        return out.write_str(" />");
    }
    out.write_char('>')?;
    for child in node.children() {
        write_child(out, ctx, child)?;
    }
    out.write_str("</")?;
    write_escaped(out, node.tag(), table_for(ctx, Subject::Tag))?;
    out.write_char('>')
}

/// Nodes render with their own stored context; scalars escape through the
/// ambient (parent) context's child table.
fn write_child<W: Write>(out: &mut W, ambient: Context, child: &Child) -> fmt::Result {
    match child {
        Child::Node(node) => write!(out, "{node}"),
        Child::Styled(styled) => write!(out, "{styled}"),
        Child::Text(s) => write_escaped(out, s, table_for(ambient, Subject::Child)),
        Child::Int(v) => write!(out, "{v}"),
        Child::Float(v) => write!(out, "{v}"),
        Child::Bool(v) => write!(out, "{v}"),
    }
}

fn write_css_rule<W: Write>(out: &mut W, selector: &str, node: &Node) -> fmt::Result {
    let ctx = node.context();
    debug_assert!(ctx.kind() == Kind::Css);
    write_escaped(out, selector, table_for(ctx, Subject::Tag))?;
    out.write_str(" {")?;
    for (name, value) in node.attrs().iter() {
        out.write_char(' ')?;
        write_escaped(out, name, table_for(ctx, Subject::AttrName))?;
        out.write_str(": ")?;
        write_escaped(out, &value.to_string(), table_for(ctx, Subject::AttrValue))?;
        out.write_char(';')?;
    }
    if is_media_rule(selector) {
        // children stay nested inside the braces
        out.write_char('\n')?;
        for child in node.children() {
            debug_assert!(is_css_child(child));
            if let Child::Node(rule) = child {
                write_css_rule(out, rule.tag(), rule)?;
            }
        }
        out.write_str("}\n")
    } else {
        // children flatten into sibling blocks with descendant selectors
        out.write_str(" }\n")?;
        for child in node.children() {
            debug_assert!(is_css_child(child));
            if let Child::Node(rule) = child {
                let descendant = format!("{} {}", selector, rule.tag());
                write_css_rule(out, &descendant, rule)?;
            }
        }
        Ok(())
    }
}

fn is_css_child(child: &Child) -> bool {
    matches!(child, Child::Node(n) if n.context().kind() == Kind::Css)
}
