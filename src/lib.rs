//! # Vellum
//!
//! Typed HTML and CSS construction, validation, and rendering.
//!
//! ## Features
//! - Context-dispatched node pipeline: normalize → validate at
//!   construction, escape at render, per output language (DOM or CSS)
//! - Void-element and CSS-nesting/media rules enforced when nodes are
//!   built, never at render time
//! - Numeric-entity escaping with per-context tables, including a raw
//!   mode for script/style bodies
//! - Scoped styles: per-style unique ids rewrite selectors and stamp DOM
//!   subtrees so rules never collide
//!
//! ## Example — a DOM fragment
//! ```ignore
//! use vellum::{element, render};
//!
//! let page = element(
//!     "div",
//!     [
//!         element("h1", "Hello", ())?.into(),
//!         element("img", (), [("src", "logo.png")])?.into(),
//!     ],
//!     [("id", "main")],
//! )?;
//!
//! assert_eq!(
//!     render(&page),
//!     r#"<div id="main"><h1>Hello</h1><img src="logo.png" /></div>"#
//! );
//! ```
//!
//! ## Example — a scoped style
//! ```ignore
//! use vellum::{element, rule, stylesheet, render};
//!
//! let sheet = stylesheet(vec![rule("p", [("color", "red")], ())?])?;
//! let styled = sheet.apply(&element("p", "scoped", ())?);
//! // `styled` renders with a v-style marker matching the sheet's
//! // rewritten `p[v-style…]` selector
//! let _ = (render(&sheet), render(&styled));
//! ```

pub mod context;
pub mod error;
pub mod node;
pub mod render;
pub mod styled;
pub mod value;

mod escape;

// --- Core types ---
pub use context::{Context, EscapeMode, Kind};
pub use error::{VellumError, VellumResult};
pub use node::{AttrMap, Node};
pub use render::{render, render_to};
pub use styled::{Style, Styled};
pub use value::{AttrList, AttrValue, Child, ChildSpec};

/// Build a DOM element under the default DOM context (children escaped,
/// NaN attribute values rejected).
pub fn element(
    tag: &str,
    children: impl Into<ChildSpec>,
    attrs: impl Into<AttrList>,
) -> VellumResult<Node> {
    Node::new(Context::dom(), tag, children, attrs)
}

/// Build a DOM element whose scalar children pass through unescaped
/// (script bodies, inline CSS text). Tags and attributes still escape.
pub fn raw_element(
    tag: &str,
    children: impl Into<ChildSpec>,
    attrs: impl Into<AttrList>,
) -> VellumResult<Node> {
    Node::new(Context::dom_unescaped(), tag, children, attrs)
}

/// Build a CSS rule: a selector, its declarations, and optional nested
/// rules (descendant rules, or the body of an `@media` block).
pub fn rule(
    selector: &str,
    declarations: impl Into<AttrList>,
    nested: impl Into<ChildSpec>,
) -> VellumResult<Node> {
    Node::new(Context::css(), selector, nested, declarations)
}

/// Build a scoped [`Style`] from CSS rules. Assigns the next process-wide
/// scope id and rewrites the rule selectors to carry it.
pub fn stylesheet(rules: Vec<Node>) -> VellumResult<Style> {
    Style::new(rules)
}
