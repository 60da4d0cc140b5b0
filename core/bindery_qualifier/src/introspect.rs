//! Qualifier introspection.
//!
//! Key construction never inspects qualifier metadata directly; it asks a
//! `QualifierIntrospector`. Registries with their own rules for what counts
//! as a qualifier supply their own implementation.

use crate::qualifier::{QualifierInstance, QualifierType};

/// Answers the questions key construction asks about qualifiers.
pub trait QualifierIntrospector: Send + Sync {
    /// Whether the qualifier's metadata is kept for runtime lookup.
    fn is_retained_at_runtime(&self, ty: QualifierType) -> bool;

    /// Whether the type is declared as a binding qualifier.
    fn is_declared_qualifier(&self, ty: QualifierType) -> bool;

    /// Whether the type declares no attributes.
    fn is_pure_marker(&self, ty: QualifierType) -> bool;

    /// Whether the type declares attributes and all of them have defaults.
    fn all_members_have_defaults(&self, ty: QualifierType) -> bool;

    /// The instance with every attribute at its default value.
    fn synthesize_default_instance(&self, ty: QualifierType) -> Option<QualifierInstance>;

    /// Map an alternate spelling of a qualifier type to its canonical type.
    fn canonicalize_type(&self, ty: QualifierType) -> QualifierType;

    /// Map an alternate spelling of a qualifier value to its canonical value.
    fn canonicalize_instance(&self, qualifier: &QualifierInstance) -> QualifierInstance;
}

/// Reads answers from each type's `QualifierInfo` and `Qualifier` impl.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardIntrospector;

impl QualifierIntrospector for StandardIntrospector {
    fn is_retained_at_runtime(&self, ty: QualifierType) -> bool {
        ty.info().retention == crate::Retention::Runtime
    }

    fn is_declared_qualifier(&self, ty: QualifierType) -> bool {
        ty.info().binding
    }

    fn is_pure_marker(&self, ty: QualifierType) -> bool {
        ty.info().is_marker()
    }

    fn all_members_have_defaults(&self, ty: QualifierType) -> bool {
        ty.info().all_members_have_defaults()
    }

    fn synthesize_default_instance(&self, ty: QualifierType) -> Option<QualifierInstance> {
        ty.synthesize()
    }

    fn canonicalize_type(&self, ty: QualifierType) -> QualifierType {
        ty.canonical()
    }

    fn canonicalize_instance(&self, qualifier: &QualifierInstance) -> QualifierInstance {
        qualifier.canonicalize()
    }
}
