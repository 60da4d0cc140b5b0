//! The qualifier half of a key.

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

use bindery_qualifier::{QualifierInstance, QualifierType};
use rustc_hash::FxBuildHasher;

use crate::error::KeyError;

/// How a key's qualifier takes part in equality, hashing and display.
///
/// | Variant    | Compares by          | Display           |
/// |------------|----------------------|-------------------|
/// | `None`     | nothing              | `[none]`          |
/// | `Type`     | qualifier type       | `@path::Type`     |
/// | `Instance` | the instance's `Eq`  | `@Type { .. }`    |
#[derive(Clone, Debug)]
pub enum QualifierStrategy {
    /// Unqualified.
    None,
    /// Qualified by type alone.
    ///
    /// `instance` keeps the value the strategy was built from, if any, so
    /// callers can still retrieve it. It never affects equality.
    Type {
        ty: QualifierType,
        instance: Option<QualifierInstance>,
    },
    /// Qualified by a value, compared by its attributes.
    Instance(QualifierInstance),
}

impl QualifierStrategy {
    /// Only `Instance` carries attributes.
    #[inline]
    pub fn has_attributes(&self) -> bool {
        matches!(self, QualifierStrategy::Instance(_))
    }

    /// The type-only strategy for this strategy's qualifier.
    ///
    /// Fails on `None` and `Type`, which have no attributes to strip.
    pub fn without_attributes(&self) -> Result<QualifierStrategy, KeyError> {
        match self {
            QualifierStrategy::Instance(instance) => Ok(QualifierStrategy::Type {
                ty: instance.qualifier_type(),
                instance: Some(instance.clone()),
            }),
            QualifierStrategy::None | QualifierStrategy::Type { .. } => {
                Err(KeyError::AlreadyAttributeFree {
                    qualifier: self.to_string(),
                })
            }
        }
    }

    pub fn qualifier_type(&self) -> Option<QualifierType> {
        match self {
            QualifierStrategy::None => None,
            QualifierStrategy::Type { ty, .. } => Some(*ty),
            QualifierStrategy::Instance(instance) => Some(instance.qualifier_type()),
        }
    }

    /// The qualifier value, when one is known.
    ///
    /// A `Type` strategy built from a bare type has no value.
    pub fn qualifier(&self) -> Option<&QualifierInstance> {
        match self {
            QualifierStrategy::None => None,
            QualifierStrategy::Type { instance, .. } => instance.as_ref(),
            QualifierStrategy::Instance(instance) => Some(instance),
        }
    }

    /// Hash consistent with `Eq`. `None` hashes to zero.
    pub fn hash_value(&self) -> u64 {
        match self {
            QualifierStrategy::None => 0,
            QualifierStrategy::Type { ty, .. } => FxBuildHasher.hash_one(ty),
            QualifierStrategy::Instance(instance) => FxBuildHasher.hash_one(instance),
        }
    }
}

impl PartialEq for QualifierStrategy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (QualifierStrategy::None, QualifierStrategy::None) => true,
            (QualifierStrategy::Type { ty: a, .. }, QualifierStrategy::Type { ty: b, .. }) => {
                a == b
            }
            (QualifierStrategy::Instance(a), QualifierStrategy::Instance(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for QualifierStrategy {}

impl Hash for QualifierStrategy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl fmt::Display for QualifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifierStrategy::None => f.write_str("[none]"),
            QualifierStrategy::Type { ty, .. } => write!(f, "{ty}"),
            QualifierStrategy::Instance(instance) => write!(f, "{instance}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_qualifier::{Named, StaticNamed};
    use pretty_assertions::assert_eq;

    bindery_qualifier::marker_qualifier! {
        struct Primary;
    }

    fn instance(name: &str) -> QualifierStrategy {
        QualifierStrategy::Instance(QualifierInstance::new(Named::new(name)))
    }

    #[test]
    fn type_strategy_ignores_carried_instance() {
        let bare = QualifierStrategy::Type {
            ty: QualifierType::of::<Named>(),
            instance: None,
        };
        let carrying = QualifierStrategy::Type {
            ty: QualifierType::of::<Named>(),
            instance: Some(QualifierInstance::new(Named::new("db"))),
        };
        assert_eq!(bare, carrying);
        assert_eq!(bare.hash_value(), carrying.hash_value());
        assert!(bare.qualifier().is_none());
        assert!(carrying.qualifier().is_some());
    }

    #[test]
    fn instance_strategy_compares_attributes() {
        assert_eq!(instance("db"), instance("db"));
        assert_ne!(instance("db"), instance("cache"));
        assert_eq!(instance("db").hash_value(), instance("db").hash_value());
    }

    #[test]
    fn variants_never_compare_equal() {
        let ty = QualifierStrategy::Type {
            ty: QualifierType::of::<Named>(),
            instance: None,
        };
        assert_ne!(ty, instance("db"));
        assert_ne!(QualifierStrategy::None, ty);
        assert_ne!(QualifierStrategy::None, instance("db"));
    }

    #[test]
    fn without_attributes_keeps_the_instance() {
        let stripped = instance("db").without_attributes();
        let (ty, instance) = match stripped {
            Ok(QualifierStrategy::Type { ty, instance }) => (ty, instance),
            other => panic!("expected a type strategy, got {other:?}"),
        };
        assert_eq!(ty, QualifierType::of::<Named>());
        assert_eq!(instance, Some(QualifierInstance::new(Named::new("db"))));
    }

    #[test]
    fn without_attributes_fails_when_attribute_free() {
        assert_eq!(
            QualifierStrategy::None.without_attributes(),
            Err(KeyError::AlreadyAttributeFree {
                qualifier: "[none]".to_owned()
            })
        );
        let marker = QualifierStrategy::Type {
            ty: QualifierType::of::<Primary>(),
            instance: Some(QualifierInstance::new(Primary)),
        };
        assert!(matches!(
            marker.without_attributes(),
            Err(KeyError::AlreadyAttributeFree { .. })
        ));
    }

    #[test]
    fn display_forms() {
        assert_eq!(QualifierStrategy::None.to_string(), "[none]");
        assert_eq!(instance("db").to_string(), "@Named(\"db\")");
        let ty = QualifierStrategy::Type {
            ty: QualifierType::of::<StaticNamed>(),
            instance: None,
        };
        assert_eq!(ty.to_string(), "@bindery_qualifier::StaticNamed");
    }

    #[test]
    fn only_instances_have_attributes() {
        assert!(instance("db").has_attributes());
        assert!(!QualifierStrategy::None.has_attributes());
        assert_eq!(QualifierStrategy::None.qualifier_type(), None);
        assert_eq!(
            instance("db").qualifier_type(),
            Some(QualifierType::of::<Named>())
        );
    }
}
