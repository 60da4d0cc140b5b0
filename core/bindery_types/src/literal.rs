//! Canonical type literals.
//!
//! A `TypeLiteral` is a `TypeRepr` that has passed through a
//! [`TypeCanonicalizer`](crate::TypeCanonicalizer). It is cheap to clone and
//! carries a structural hash computed once, so it can sit inside hash-map keys
//! that are compared and hashed constantly.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

use crate::repr::{GenericArgs, PathType, TypeRepr};

/// A canonical, shareable type descriptor.
///
/// Equality is structural over the canonical repr. Two literals built from
/// different spellings of the same type compare equal once canonicalized.
#[derive(Clone)]
pub struct TypeLiteral {
    repr: Arc<TypeRepr>,
    hash: u64,
}

impl TypeLiteral {
    /// Wrap a repr without canonicalizing it.
    ///
    /// This is the constructor for `TypeCanonicalizer` implementations, which
    /// call it after resolving aliases and checking the repr is fully
    /// specified. Nothing is checked here: a non-canonical repr produces a
    /// literal that never equals its canonical spelling. Everyone else should
    /// go through a canonicalizer.
    pub fn from_canonical_unchecked(repr: TypeRepr) -> Self {
        let mut hasher = FxHasher::default();
        repr.hash(&mut hasher);
        TypeLiteral {
            repr: Arc::new(repr),
            hash: hasher.finish(),
        }
    }

    /// The canonical structure.
    #[inline]
    pub fn repr(&self) -> &TypeRepr {
        &self.repr
    }

    /// Structural hash of the canonical repr.
    #[inline]
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// Whether generic arguments are applied to the outermost path.
    pub fn is_parameterized(&self) -> bool {
        matches!(&*self.repr, TypeRepr::Path(path) if path.has_args())
    }

    /// The type with generic arguments of the outermost path removed.
    ///
    /// `Vec<String>` becomes `Vec`; non-path types are their own raw type.
    pub fn raw_type(&self) -> TypeLiteral {
        match &*self.repr {
            TypeRepr::Path(path) if path.has_args() => {
                TypeLiteral::from_canonical_unchecked(TypeRepr::Path(PathType {
                    path: path.path.clone(),
                    args: GenericArgs::Angle(Vec::new()),
                }))
            }
            _ => self.clone(),
        }
    }
}

impl PartialEq for TypeLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && (Arc::ptr_eq(&self.repr, &other.repr) || self.repr == other.repr)
    }
}

impl Eq for TypeLiteral {}

impl Hash for TypeLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Display for TypeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr)
    }
}

impl fmt::Debug for TypeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeLiteral({})", self.repr)
    }
}
