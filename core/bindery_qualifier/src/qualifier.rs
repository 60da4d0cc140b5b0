//! Qualifier types and erased qualifier values.
//!
//! Key construction handles qualifiers of any Rust type, so both the type and
//! the value are erased here:
//! - `QualifierType`: which qualifier, plus the metadata and hooks needed to
//!   validate it, synthesize defaults and canonicalize aliases
//! - `QualifierInstance`: a concrete value, compared by its attributes

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::info::QualifierInfo;

/// A value that can qualify a binding.
///
/// Equality and hashing must be attribute-based: two values with the same
/// attributes name the same binding.
///
/// Debug output is the qualifier's display form behind a leading `@`, so
/// `Named("db")` shows as `@Named("db")`.
pub trait Qualifier: Any + Clone + fmt::Debug + Eq + Hash + Send + Sync {
    /// Static metadata for this qualifier type.
    const INFO: &'static QualifierInfo;

    /// The instance with every attribute at its default value.
    ///
    /// Override when `INFO` declares a default for every member.
    fn synthesize() -> Option<Self> {
        None
    }

    /// The type this qualifier type is an alternate spelling of.
    fn canonical_type() -> QualifierType {
        QualifierType::of::<Self>()
    }

    /// This value in its canonical spelling.
    fn canonicalize(&self) -> QualifierInstance {
        QualifierInstance::new(self.clone())
    }
}

/// An erased qualifier type.
///
/// Compares and hashes by Rust type identity.
#[derive(Copy, Clone)]
pub struct QualifierType {
    id: TypeId,
    info: &'static QualifierInfo,
    synthesize: fn() -> Option<QualifierInstance>,
    canonical: fn() -> QualifierType,
}

fn synthesize_erased<Q: Qualifier>() -> Option<QualifierInstance> {
    Q::synthesize().map(QualifierInstance::new)
}

impl QualifierType {
    pub fn of<Q: Qualifier>() -> Self {
        QualifierType {
            id: TypeId::of::<Q>(),
            info: Q::INFO,
            synthesize: synthesize_erased::<Q>,
            canonical: Q::canonical_type,
        }
    }

    #[inline]
    pub fn info(self) -> &'static QualifierInfo {
        self.info
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.info.name
    }

    #[inline]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Check whether this is the qualifier type `Q`.
    #[inline]
    pub fn is<Q: Qualifier>(self) -> bool {
        self.id == TypeId::of::<Q>()
    }

    /// Build the all-defaults instance, if the type provides one.
    pub fn synthesize(self) -> Option<QualifierInstance> {
        (self.synthesize)()
    }

    /// The canonical spelling of this type.
    pub fn canonical(self) -> QualifierType {
        (self.canonical)()
    }
}

impl PartialEq for QualifierType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for QualifierType {}

impl Hash for QualifierType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for QualifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.info.name)
    }
}

impl fmt::Debug for QualifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifierType({})", self.info.name)
    }
}

/// Object-safe view of a `Qualifier` value.
trait ErasedQualifier: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn qualifier_type(&self) -> QualifierType;
    fn eq_erased(&self, other: &dyn ErasedQualifier) -> bool;
    fn hash_erased(&self, state: &mut dyn Hasher);
    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn canonicalize_erased(&self) -> QualifierInstance;
}

impl<Q: Qualifier> ErasedQualifier for Q {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn qualifier_type(&self) -> QualifierType {
        QualifierType::of::<Q>()
    }

    fn eq_erased(&self, other: &dyn ErasedQualifier) -> bool {
        other
            .as_any()
            .downcast_ref::<Q>()
            .is_some_and(|other| other == self)
    }

    fn hash_erased(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<Q>().hash(&mut state);
        self.hash(&mut state);
    }

    fn fmt_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{self:?}")
    }

    fn canonicalize_erased(&self) -> QualifierInstance {
        Qualifier::canonicalize(self)
    }
}

/// An erased qualifier value.
///
/// Equality delegates to the value's own `Eq` and requires the same Rust
/// type; hashing covers the type and the value.
#[derive(Clone)]
pub struct QualifierInstance(Arc<dyn ErasedQualifier>);

impl QualifierInstance {
    pub fn new<Q: Qualifier>(qualifier: Q) -> Self {
        QualifierInstance(Arc::new(qualifier))
    }

    /// The type of the held value.
    #[inline]
    pub fn qualifier_type(&self) -> QualifierType {
        self.0.qualifier_type()
    }

    /// Borrow the value as `Q`, if it is one.
    pub fn downcast_ref<Q: Qualifier>(&self) -> Option<&Q> {
        self.0.as_any().downcast_ref::<Q>()
    }

    #[inline]
    pub fn is<Q: Qualifier>(&self) -> bool {
        self.qualifier_type().is::<Q>()
    }

    /// The value in its canonical spelling.
    pub fn canonicalize(&self) -> QualifierInstance {
        self.0.canonicalize_erased()
    }
}

impl<Q: Qualifier> From<Q> for QualifierInstance {
    fn from(qualifier: Q) -> Self {
        QualifierInstance::new(qualifier)
    }
}

impl PartialEq for QualifierInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_erased(&*other.0)
    }
}

impl Eq for QualifierInstance {}

impl Hash for QualifierInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_erased(state);
    }
}

impl fmt::Display for QualifierInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_erased(f)
    }
}

impl fmt::Debug for QualifierInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_erased(f)
    }
}
