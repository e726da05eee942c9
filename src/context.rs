use serde::Serialize;

/// The output language a node belongs to.
///
/// This is a closed set: every pipeline stage (normalization, validation,
/// escaping, rendering) dispatches on it with an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Dom,
    Css,
}

/// Whether scalar children are escaped at render time.
///
/// `NoEscape` empties the child-escape table only; tags and attributes
/// always escape. Use it for elements whose text content is a foreign
/// language (script bodies, inline CSS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    Escape,
    NoEscape,
}

/// Immutable per-construction configuration.
///
/// A `Context` is created once per root construction call and stored in
/// every node built under it. Each node renders with its *own* stored
/// context; only non-node children fall back to the parent's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Context {
    kind: Kind,
    escape_mode: EscapeMode,
    allow_nan_attr_values: bool,
}

impl Context {
    pub const fn new(kind: Kind, escape_mode: EscapeMode, allow_nan_attr_values: bool) -> Self {
        Self {
            kind,
            escape_mode,
            allow_nan_attr_values,
        }
    }

    /// Default DOM context: children escaped, NaN attribute values rejected.
    pub const fn dom() -> Self {
        Self::new(Kind::Dom, EscapeMode::Escape, false)
    }

    /// DOM context whose scalar children pass through unescaped.
    pub const fn dom_unescaped() -> Self {
        Self::new(Kind::Dom, EscapeMode::NoEscape, false)
    }

    /// Default CSS context.
    pub const fn css() -> Self {
        Self::new(Kind::Css, EscapeMode::Escape, false)
    }

    /// Returns a copy of this context with NaN attribute values permitted
    /// or rejected.
    pub const fn allow_nan_attr_values(mut self, allow: bool) -> Self {
        self.allow_nan_attr_values = allow;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }

    pub fn allows_nan_attr_values(&self) -> bool {
        self.allow_nan_attr_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_contexts() {
        assert_eq!(Context::dom().kind(), Kind::Dom);
        assert_eq!(Context::dom().escape_mode(), EscapeMode::Escape);
        assert!(!Context::dom().allows_nan_attr_values());
        assert_eq!(Context::dom_unescaped().escape_mode(), EscapeMode::NoEscape);
        assert_eq!(Context::css().kind(), Kind::Css);
    }

    #[test]
    fn nan_flag_is_a_copy() {
        let base = Context::dom();
        let permissive = base.allow_nan_attr_values(true);
        assert!(!base.allows_nan_attr_values());
        assert!(permissive.allows_nan_attr_values());
    }
}
