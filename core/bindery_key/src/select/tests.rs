use bindery_qualifier::{
    Member, Named, Qualifier, QualifierInfo, QualifierInstance, QualifierIntrospector,
    QualifierType, Retention, StandardIntrospector, StaticNamed,
};
use pretty_assertions::assert_eq;

use super::{strategy_for_instance, strategy_for_type};
use crate::error::KeyError;
use crate::strategy::QualifierStrategy;

bindery_qualifier::marker_qualifier! {
    struct Primary;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Port(u16);

impl Qualifier for Port {
    const INFO: &'static QualifierInfo =
        &QualifierInfo::with_members("tests::Port", &[Member::defaulted("value")]);

    fn synthesize() -> Option<Self> {
        Some(Port(8080))
    }
}

/// Declares defaults for every member but never builds one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Lazy(u8);

impl Qualifier for Lazy {
    const INFO: &'static QualifierInfo =
        &QualifierInfo::with_members("tests::Lazy", &[Member::defaulted("level")]);
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Documentation;

impl Qualifier for Documentation {
    const INFO: &'static QualifierInfo = &QualifierInfo {
        name: "tests::Documentation",
        retention: Retention::Source,
        binding: true,
        members: &[],
    };
}

/// Standard answers, except for the two validation questions.
struct Rules {
    retained: bool,
    declared: bool,
}

impl QualifierIntrospector for Rules {
    fn is_retained_at_runtime(&self, _: QualifierType) -> bool {
        self.retained
    }

    fn is_declared_qualifier(&self, _: QualifierType) -> bool {
        self.declared
    }

    fn is_pure_marker(&self, ty: QualifierType) -> bool {
        StandardIntrospector.is_pure_marker(ty)
    }

    fn all_members_have_defaults(&self, ty: QualifierType) -> bool {
        StandardIntrospector.all_members_have_defaults(ty)
    }

    fn synthesize_default_instance(&self, ty: QualifierType) -> Option<QualifierInstance> {
        StandardIntrospector.synthesize_default_instance(ty)
    }

    fn canonicalize_type(&self, ty: QualifierType) -> QualifierType {
        StandardIntrospector.canonicalize_type(ty)
    }

    fn canonicalize_instance(&self, qualifier: &QualifierInstance) -> QualifierInstance {
        StandardIntrospector.canonicalize_instance(qualifier)
    }
}

#[test]
fn plain_type_is_stored_by_type() {
    let strategy = strategy_for_type(&StandardIntrospector, QualifierType::of::<Named>());
    assert_eq!(
        strategy,
        Ok(QualifierStrategy::Type {
            ty: QualifierType::of::<Named>(),
            instance: None,
        })
    );
}

#[test]
fn marker_instance_is_stored_by_type() {
    let strategy = strategy_for_instance(&StandardIntrospector, &QualifierInstance::new(Primary));
    let (ty, instance) = match strategy {
        Ok(QualifierStrategy::Type { ty, instance }) => (ty, instance),
        other => panic!("expected a type strategy, got {other:?}"),
    };
    assert_eq!(ty, QualifierType::of::<Primary>());
    assert_eq!(instance, Some(QualifierInstance::new(Primary)));
}

#[test]
fn all_defaults_type_takes_the_instance_path() {
    let strategy = strategy_for_type(&StandardIntrospector, QualifierType::of::<Port>());
    assert_eq!(
        strategy,
        Ok(QualifierStrategy::Instance(QualifierInstance::new(Port(8080))))
    );
}

#[test]
fn all_defaults_without_synthesis_fails() {
    assert_eq!(
        strategy_for_type(&StandardIntrospector, QualifierType::of::<Lazy>()),
        Err(KeyError::MissingDefaultInstance {
            qualifier: QualifierType::of::<Lazy>()
        })
    );
    // An explicit value is still fine.
    assert!(strategy_for_instance(&StandardIntrospector, &QualifierInstance::new(Lazy(1))).is_ok());
}

#[test]
fn alternate_spellings_canonicalize() {
    assert_eq!(
        strategy_for_type(&StandardIntrospector, QualifierType::of::<StaticNamed>()),
        strategy_for_type(&StandardIntrospector, QualifierType::of::<Named>())
    );
    assert_eq!(
        strategy_for_instance(&StandardIntrospector, &QualifierInstance::new(StaticNamed("db"))),
        Ok(QualifierStrategy::Instance(QualifierInstance::new(Named::new("db"))))
    );
}

#[test]
fn source_retention_is_rejected() {
    let ty = QualifierType::of::<Documentation>();
    assert_eq!(
        strategy_for_type(&StandardIntrospector, ty),
        Err(KeyError::NotRetainedAtRuntime { qualifier: ty })
    );
    assert_eq!(
        strategy_for_instance(&StandardIntrospector, &QualifierInstance::new(Documentation)),
        Err(KeyError::NotRetainedAtRuntime { qualifier: ty })
    );
}

#[test]
fn injected_rules_decide_validity() {
    let undeclared = Rules {
        retained: true,
        declared: false,
    };
    assert_eq!(
        strategy_for_instance(&undeclared, &QualifierInstance::new(Named::new("db"))),
        Err(KeyError::NotBindingQualifier {
            qualifier: QualifierType::of::<Named>()
        })
    );

    // Retention is checked first.
    let neither = Rules {
        retained: false,
        declared: false,
    };
    assert_eq!(
        strategy_for_type(&neither, QualifierType::of::<Primary>()),
        Err(KeyError::NotRetainedAtRuntime {
            qualifier: QualifierType::of::<Primary>()
        })
    );

    let permissive = Rules {
        retained: true,
        declared: true,
    };
    assert!(strategy_for_type(&permissive, QualifierType::of::<Documentation>()).is_ok());
}

#[test]
fn error_messages_name_the_qualifier() {
    let err = KeyError::NotBindingQualifier {
        qualifier: QualifierType::of::<Named>(),
    };
    assert_eq!(
        err.to_string(),
        "@bindery_qualifier::Named is not a binding qualifier; declare it with `binding: true`"
    );
}
