use thiserror::Error;

pub type VellumResult<T> = Result<T, VellumError>;

/// Errors raised while constructing or extending nodes.
///
/// Every variant is raised synchronously at construction time; rendering
/// never fails validation because it only ever sees already-validated trees.
#[derive(Error, Debug, Clone)]
pub enum VellumError {
    #[error("Empty tag: tags and selectors must be non-empty strings")]
    EmptyTag,

    #[error("Void element <{tag}> cannot have children")]
    VoidElementChildren { tag: String },

    #[error("Invalid child for CSS rule '{selector}': {found}. CSS rules may only contain other CSS rules")]
    InvalidChildType { selector: String, found: String },

    #[error("Invalid attribute name '{name}': attribute names must not contain whitespace")]
    InvalidAttributeName { name: String },

    #[error("Attribute '{name}' on '{tag}' is NaN, which this context does not allow")]
    NanAttributeValue { tag: String, name: String },

    #[error("CSS property '{property}' in rule '{selector}' must have a non-empty value")]
    NullOrEmptyCssValue { selector: String, property: String },
}
