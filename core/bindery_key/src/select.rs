//! Qualifier validation and strategy selection.
//!
//! A qualifier is accepted only if it is retained at runtime and declared as
//! a binding qualifier. Accepted qualifiers are canonicalized, then stored:
//! - markers by type, even when a value was supplied
//! - types whose members all have defaults as their synthesized default value
//! - everything else as given

use bindery_qualifier::{QualifierInstance, QualifierIntrospector, QualifierType};

use crate::error::KeyError;
use crate::strategy::QualifierStrategy;

/// Select the strategy for a bare qualifier type.
pub(crate) fn strategy_for_type<I>(
    introspector: &I,
    ty: QualifierType,
) -> Result<QualifierStrategy, KeyError>
where
    I: QualifierIntrospector + ?Sized,
{
    let ty = introspector.canonicalize_type(ty);
    ensure_valid(introspector, ty)?;

    if introspector.all_members_have_defaults(ty) {
        let Some(instance) = introspector.synthesize_default_instance(ty) else {
            tracing::debug!(qualifier = ty.name(), "no default instance");
            return Err(KeyError::MissingDefaultInstance { qualifier: ty });
        };
        return strategy_for_instance(introspector, &instance);
    }

    Ok(QualifierStrategy::Type { ty, instance: None })
}

/// Select the strategy for a qualifier value.
pub(crate) fn strategy_for_instance<I>(
    introspector: &I,
    qualifier: &QualifierInstance,
) -> Result<QualifierStrategy, KeyError>
where
    I: QualifierIntrospector + ?Sized,
{
    let ty = qualifier.qualifier_type();
    ensure_valid(introspector, ty)?;

    if introspector.is_pure_marker(ty) {
        return Ok(QualifierStrategy::Type {
            ty: introspector.canonicalize_type(ty),
            instance: Some(qualifier.clone()),
        });
    }

    Ok(QualifierStrategy::Instance(
        introspector.canonicalize_instance(qualifier),
    ))
}

fn ensure_valid<I>(introspector: &I, ty: QualifierType) -> Result<(), KeyError>
where
    I: QualifierIntrospector + ?Sized,
{
    if !introspector.is_retained_at_runtime(ty) {
        tracing::debug!(qualifier = ty.name(), "qualifier not retained at runtime");
        return Err(KeyError::NotRetainedAtRuntime { qualifier: ty });
    }
    if !introspector.is_declared_qualifier(ty) {
        tracing::debug!(qualifier = ty.name(), "not a binding qualifier");
        return Err(KeyError::NotBindingQualifier { qualifier: ty });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
