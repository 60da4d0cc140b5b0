//! Key construction against injected collaborators.

use std::sync::OnceLock;

use bindery_qualifier::{
    QualifierInstance, QualifierIntrospector, QualifierType, StandardIntrospector,
};
use bindery_types::{
    Provider, StandardCanonicalizer, TypeCanonicalizer, TypeLiteral, TypeRepr, TypeToken,
};

use crate::error::KeyError;
use crate::key::Key;
use crate::select::{strategy_for_instance, strategy_for_type};
use crate::strategy::QualifierStrategy;

/// Builds and derives keys.
///
/// The canonicalizer decides which types are equal; the introspector decides
/// which qualifiers are valid and how they are stored. Keys built by
/// factories with different collaborators should not be mixed in one
/// registry.
#[derive(Default)]
pub struct KeyFactory<C = StandardCanonicalizer, I = StandardIntrospector> {
    canonicalizer: C,
    introspector: I,
}

impl KeyFactory {
    /// The process-wide factory with standard collaborators.
    ///
    /// `Key`'s own constructors and derivations use this factory.
    pub fn standard() -> &'static KeyFactory {
        static STANDARD: OnceLock<KeyFactory> = OnceLock::new();
        STANDARD.get_or_init(KeyFactory::default)
    }
}

impl<C: TypeCanonicalizer, I: QualifierIntrospector> KeyFactory<C, I> {
    pub fn new(canonicalizer: C, introspector: I) -> Self {
        KeyFactory {
            canonicalizer,
            introspector,
        }
    }

    pub fn canonicalizer(&self) -> &C {
        &self.canonicalizer
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    // Construction

    /// Unqualified key for the Rust type `T`.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = std::any::type_name::<T>()))]
    pub fn get<T: ?Sized + 'static>(&self) -> Result<Key<T>, KeyError> {
        self.key_for::<T>(QualifierStrategy::None)
    }

    /// Key for `T` qualified by a qualifier type.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = std::any::type_name::<T>()))]
    pub fn get_with_type<T: ?Sized + 'static>(
        &self,
        qualifier: QualifierType,
    ) -> Result<Key<T>, KeyError> {
        let strategy = strategy_for_type(&self.introspector, qualifier)?;
        self.key_for::<T>(strategy)
    }

    /// Key for `T` qualified by a qualifier value.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = std::any::type_name::<T>()))]
    pub fn get_with<T: ?Sized + 'static>(
        &self,
        qualifier: impl Into<QualifierInstance>,
    ) -> Result<Key<T>, KeyError> {
        let strategy = strategy_for_instance(&self.introspector, &qualifier.into())?;
        self.key_for::<T>(strategy)
    }

    /// Unqualified key for a described type.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %repr))]
    pub fn from_repr(&self, repr: TypeRepr) -> Result<Key, KeyError> {
        self.key_for_repr(repr, QualifierStrategy::None)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(ty = %repr))]
    pub fn from_repr_with_type(
        &self,
        repr: TypeRepr,
        qualifier: QualifierType,
    ) -> Result<Key, KeyError> {
        let strategy = strategy_for_type(&self.introspector, qualifier)?;
        self.key_for_repr(repr, strategy)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(ty = %repr))]
    pub fn from_repr_with(
        &self,
        repr: TypeRepr,
        qualifier: impl Into<QualifierInstance>,
    ) -> Result<Key, KeyError> {
        let strategy = strategy_for_instance(&self.introspector, &qualifier.into())?;
        self.key_for_repr(repr, strategy)
    }

    /// Unqualified key for an existing literal.
    ///
    /// The literal's repr is canonicalized by this factory's canonicalizer,
    /// which leaves canonical literals unchanged.
    pub fn from_literal(&self, ty: &TypeLiteral) -> Result<Key, KeyError> {
        self.key_for_repr(ty.repr().clone(), QualifierStrategy::None)
    }

    // Derivation

    /// Same qualifier, the Rust type `U`.
    pub fn of_type<T: ?Sized, U: ?Sized + 'static>(
        &self,
        key: &Key<T>,
    ) -> Result<Key<U>, KeyError> {
        self.key_for::<U>(key.strategy().clone())
    }

    /// Same qualifier, a described type.
    pub fn of_type_repr<T: ?Sized>(&self, key: &Key<T>, repr: TypeRepr) -> Result<Key, KeyError> {
        self.key_for_repr(repr, key.strategy().clone())
    }

    /// Same type, qualified by a qualifier type.
    pub fn with_qualifier_type<T: ?Sized>(
        &self,
        key: &Key<T>,
        qualifier: QualifierType,
    ) -> Result<Key<T>, KeyError> {
        let strategy = strategy_for_type(&self.introspector, qualifier)?;
        Ok(Key::assemble(key.type_literal().clone(), strategy))
    }

    /// Same type, qualified by a qualifier value.
    pub fn with_qualifier<T: ?Sized>(
        &self,
        key: &Key<T>,
        qualifier: impl Into<QualifierInstance>,
    ) -> Result<Key<T>, KeyError> {
        let strategy = strategy_for_instance(&self.introspector, &qualifier.into())?;
        Ok(Key::assemble(key.type_literal().clone(), strategy))
    }

    /// Same qualifier, for a `Provider` of the key's type.
    pub fn provider_key<T: ?Sized>(&self, key: &Key<T>) -> Key<Provider<T>> {
        let ty = self.canonicalizer.provider_type_of(key.type_literal());
        Key::assemble(ty, key.strategy().clone())
    }

    /// The key's type without generic arguments.
    pub fn raw_type<T: ?Sized>(&self, key: &Key<T>) -> TypeLiteral {
        self.canonicalizer.raw_type_of(key.type_literal())
    }

    fn key_for<T: ?Sized + 'static>(
        &self,
        strategy: QualifierStrategy,
    ) -> Result<Key<T>, KeyError> {
        let ty = self.canonicalizer.capture(TypeToken::of::<T>())?;
        Ok(Key::assemble(ty, strategy))
    }

    fn key_for_repr(&self, repr: TypeRepr, strategy: QualifierStrategy) -> Result<Key, KeyError> {
        let ty = self.canonicalizer.canonicalize(repr)?;
        Ok(Key::assemble(ty, strategy))
    }
}
