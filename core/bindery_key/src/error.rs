//! Key construction errors.

use bindery_qualifier::QualifierType;
use bindery_types::TypeError;
use thiserror::Error;

/// Why a key could not be built or derived.
///
/// Every variant is a caller error except `Type(TypeError::Parse)`, which
/// reports a type name the canonicalizer could not reconstruct.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("{qualifier} is not retained at runtime; declare it with `Retention::Runtime`")]
    NotRetainedAtRuntime { qualifier: QualifierType },

    #[error("{qualifier} is not a binding qualifier; declare it with `binding: true`")]
    NotBindingQualifier { qualifier: QualifierType },

    /// Every member declares a default but the type builds no instance.
    #[error(
        "{qualifier} declares a default for every member but builds no default instance; \
         override `Qualifier::synthesize`"
    )]
    MissingDefaultInstance { qualifier: QualifierType },

    #[error("qualifier `{qualifier}` already has no attributes")]
    AlreadyAttributeFree { qualifier: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}
