//! Errors produced while describing and canonicalizing types.

use thiserror::Error;

/// A type name that could not be reconstructed into a `TypeRepr`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed type `{input}` at byte {offset}: {message}")]
pub struct ParseTypeError {
    /// The full input being parsed.
    pub input: String,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// What the parser expected or rejected.
    pub message: &'static str,
}

/// Type canonicalization error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The type still contains a generic parameter or `_` placeholder.
    #[error("`{ty}` cannot be used as a key; it is not fully specified (found `{unspecified}`)")]
    NotFullySpecified { ty: String, unspecified: String },

    /// A captured type name could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseTypeError),
}
