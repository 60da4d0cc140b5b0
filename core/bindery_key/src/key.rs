//! The key value type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::OnceLock;

use bindery_qualifier::{QualifierInstance, QualifierType};
use bindery_types::{Provider, TypeLiteral, TypeRepr};

use crate::error::KeyError;
use crate::factory::KeyFactory;
use crate::strategy::QualifierStrategy;

/// The type parameter of a key whose Rust type is not statically known.
///
/// Keys built from a `TypeRepr` are `Key<Untyped>`; typed keys become
/// untyped through [`Key::erase`].
#[derive(Debug)]
pub enum Untyped {}

/// Names a binding: a canonical type plus an optional qualifier.
///
/// Keys are frozen once built. Equality compares the canonical type and the
/// qualifier strategy; the type parameter `T` only documents what the key
/// resolves to, so `Key<T>` and `Key<U>` compare equal whenever their
/// contents do.
///
/// The constructors and derivations on `Key` itself go through
/// [`KeyFactory::standard`]. Keys built by a factory with other
/// collaborators should be derived through that same factory, or the
/// derived key is judged by the standard rules instead.
///
/// ```ignore
/// let db = Key::<Database>::get_with(Named::new("primary"))?;
/// let db_provider = db.provider_key();
/// ```
pub struct Key<T: ?Sized = Untyped> {
    ty: TypeLiteral,
    strategy: QualifierStrategy,
    /// `hash(ty) * 31 + hash(strategy)`.
    hash: u64,
    display: OnceLock<String>,
    marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized> Key<T> {
    /// Freeze an already canonical type and validated strategy.
    pub(crate) fn assemble(ty: TypeLiteral, strategy: QualifierStrategy) -> Self {
        let hash = ty
            .hash_value()
            .wrapping_mul(31)
            .wrapping_add(strategy.hash_value());
        Key {
            ty,
            strategy,
            hash,
            display: OnceLock::new(),
            marker: PhantomData,
        }
    }

    /// The canonical type.
    #[inline]
    pub fn type_literal(&self) -> &TypeLiteral {
        &self.ty
    }

    /// The canonical type without generic arguments, as the standard
    /// canonicalizer sees it. See [`KeyFactory::raw_type`].
    pub fn raw_type(&self) -> TypeLiteral {
        KeyFactory::standard().raw_type(self)
    }

    #[inline]
    pub fn strategy(&self) -> &QualifierStrategy {
        &self.strategy
    }

    pub fn qualifier_type(&self) -> Option<QualifierType> {
        self.strategy.qualifier_type()
    }

    /// The qualifier value, if the key was built from one.
    ///
    /// Keys qualified by a bare type return `None` even though
    /// [`qualifier_type`](Self::qualifier_type) is set.
    pub fn qualifier(&self) -> Option<&QualifierInstance> {
        self.strategy.qualifier()
    }

    pub fn has_qualifier_type(&self) -> bool {
        self.qualifier_type().is_some()
    }

    /// The qualifier's display form: the value when known, else the type.
    pub fn qualifier_name(&self) -> Option<String> {
        match (self.qualifier(), self.qualifier_type()) {
            (Some(instance), _) => Some(instance.to_string()),
            (None, Some(ty)) => Some(ty.to_string()),
            (None, None) => None,
        }
    }

    /// Whether the qualifier compares by attribute values.
    pub fn has_attributes(&self) -> bool {
        self.strategy.has_attributes()
    }

    /// The precomputed hash.
    #[inline]
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// Drop the static type parameter.
    pub fn erase(self) -> Key {
        Key {
            ty: self.ty,
            strategy: self.strategy,
            hash: self.hash,
            display: self.display,
            marker: PhantomData,
        }
    }

    /// Same type, qualified by the type of this key's qualifier only.
    ///
    /// The original value stays retrievable through
    /// [`qualifier`](Self::qualifier).
    pub fn without_attributes(&self) -> Result<Key<T>, KeyError> {
        let strategy = self.strategy.without_attributes()?;
        Ok(Key::assemble(self.ty.clone(), strategy))
    }

    /// Same qualifier, the Rust type `U`. Uses the standard factory.
    pub fn of_type<U: ?Sized + 'static>(&self) -> Result<Key<U>, KeyError> {
        KeyFactory::standard().of_type(self)
    }

    /// Same qualifier, a described type. Uses the standard factory.
    pub fn of_type_repr(&self, repr: TypeRepr) -> Result<Key, KeyError> {
        KeyFactory::standard().of_type_repr(self, repr)
    }

    /// Same type, qualified by `qualifier` as the standard introspector
    /// stores it.
    pub fn with_qualifier_type(&self, qualifier: QualifierType) -> Result<Key<T>, KeyError> {
        KeyFactory::standard().with_qualifier_type(self, qualifier)
    }

    /// Same type, qualified by a value. Uses the standard factory.
    pub fn with_qualifier(
        &self,
        qualifier: impl Into<QualifierInstance>,
    ) -> Result<Key<T>, KeyError> {
        KeyFactory::standard().with_qualifier(self, qualifier)
    }

    /// Same qualifier, for a `Provider<T>` named by the standard
    /// canonicalizer.
    pub fn provider_key(&self) -> Key<Provider<T>> {
        KeyFactory::standard().provider_key(self)
    }
}

impl<T: ?Sized + 'static> Key<T> {
    pub fn get() -> Result<Self, KeyError> {
        KeyFactory::standard().get()
    }

    pub fn get_with_type(qualifier: QualifierType) -> Result<Self, KeyError> {
        KeyFactory::standard().get_with_type(qualifier)
    }

    pub fn get_with(qualifier: impl Into<QualifierInstance>) -> Result<Self, KeyError> {
        KeyFactory::standard().get_with(qualifier)
    }
}

impl Key {
    pub fn from_repr(repr: TypeRepr) -> Result<Key, KeyError> {
        KeyFactory::standard().from_repr(repr)
    }

    pub fn from_repr_with_type(repr: TypeRepr, qualifier: QualifierType) -> Result<Key, KeyError> {
        KeyFactory::standard().from_repr_with_type(repr, qualifier)
    }

    pub fn from_repr_with(
        repr: TypeRepr,
        qualifier: impl Into<QualifierInstance>,
    ) -> Result<Key, KeyError> {
        KeyFactory::standard().from_repr_with(repr, qualifier)
    }

    /// Unqualified key for a literal from any canonicalizer.
    ///
    /// The literal is canonicalized again, so a literal that was wrapped
    /// without canonicalization still yields the same key as its type.
    pub fn from_literal(ty: &TypeLiteral) -> Result<Key, KeyError> {
        KeyFactory::standard().from_literal(ty)
    }
}

impl<T: ?Sized> Clone for Key<T> {
    fn clone(&self) -> Self {
        Key {
            ty: self.ty.clone(),
            strategy: self.strategy.clone(),
            hash: self.hash,
            display: self.display.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: ?Sized, U: ?Sized> PartialEq<Key<U>> for Key<T> {
    fn eq(&self, other: &Key<U>) -> bool {
        self.hash == other.hash && self.strategy == other.strategy && self.ty == other.ty
    }
}

impl<T: ?Sized> Eq for Key<T> {}

impl<T: ?Sized> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<T: ?Sized> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = self
            .display
            .get_or_init(|| format!("Key[type={}, annotation={}]", self.ty, self.strategy));
        f.write_str(display)
    }
}

impl<T: ?Sized> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
