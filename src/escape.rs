//! Per-context escape tables and the numeric-entity writer.
//!
//! Tables are keyed by (context kind, subject). CSS tables are empty:
//! CSS text passes through unescaped at this layer.

use crate::context::{Context, EscapeMode, Kind};
use std::fmt::{self, Write};

/// Which part of a node a string is being written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Subject {
    Tag,
    AttrName,
    AttrValue,
    Child,
}

/// Broad HTML set, used for tags, attribute names, and scalar children.
const HTML_BROAD: &[char] = &[
    '&', '<', '>', '"', '\'', '`', '!', '@', '$', '%', '(', ')', '=', '+', '{', '}', '[', ']',
];

/// Narrow set for quoted attribute values.
const HTML_ATTR_VALUE: &[char] = &['&', '<', '>', '"'];

const EMPTY: &[char] = &[];

pub(crate) fn table_for(ctx: Context, subject: Subject) -> &'static [char] {
    match ctx.kind() {
        Kind::Css => EMPTY,
        Kind::Dom => match subject {
            Subject::AttrValue => HTML_ATTR_VALUE,
            Subject::Child if ctx.escape_mode() == EscapeMode::NoEscape => EMPTY,
            Subject::Tag | Subject::AttrName | Subject::Child => HTML_BROAD,
        },
    }
}

/// Write `s` into `out`, replacing every character listed in `table` with
/// its numeric character reference (`"` becomes `&#34;`).
pub(crate) fn write_escaped<W: Write>(out: &mut W, s: &str, table: &[char]) -> fmt::Result {
    if table.is_empty() {
        return out.write_str(s);
    }
    for ch in s.chars() {
        if table.contains(&ch) {
            write!(out, "&#{};", ch as u32)?;
        } else {
            out.write_char(ch)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(s: &str, table: &[char]) -> String {
        let mut out = String::new();
        write_escaped(&mut out, s, table).unwrap();
        out
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(escaped("a < b & c", HTML_BROAD), "a &#60; b &#38; c");
        assert_eq!(escaped("\"hi\"", HTML_ATTR_VALUE), "&#34;hi&#34;");
    }

    #[test]
    fn empty_table_passes_through() {
        assert_eq!(escaped("<script>&</script>", EMPTY), "<script>&</script>");
    }

    #[test]
    fn attr_value_table_is_narrower() {
        // '!' is in the broad set but not the attribute-value set
        assert_eq!(escaped("Hi!", HTML_ATTR_VALUE), "Hi!");
        assert_eq!(escaped("Hi!", HTML_BROAD), "Hi&#33;");
    }

    #[test]
    fn no_escape_mode_only_affects_children() {
        let raw = Context::dom_unescaped();
        assert!(table_for(raw, Subject::Child).is_empty());
        assert!(!table_for(raw, Subject::Tag).is_empty());
        assert!(!table_for(raw, Subject::AttrValue).is_empty());
    }

    #[test]
    fn css_tables_are_empty() {
        let css = Context::css();
        assert!(table_for(css, Subject::Tag).is_empty());
        assert!(table_for(css, Subject::AttrName).is_empty());
        assert!(table_for(css, Subject::AttrValue).is_empty());
        assert!(table_for(css, Subject::Child).is_empty());
    }
}
