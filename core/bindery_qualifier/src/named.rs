//! Built-in string-named qualifiers.

use crate::info::{Member, QualifierInfo};
use crate::qualifier::{Qualifier, QualifierInstance, QualifierType};

/// Qualifies a binding by name: `Named("primary-db")`.
///
/// This is the canonical named qualifier. [`StaticNamed`] is an alternate
/// spelling that canonicalizes to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Named(pub String);

impl Named {
    pub fn new(value: impl Into<String>) -> Self {
        Named(value.into())
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Qualifier for Named {
    const INFO: &'static QualifierInfo =
        &QualifierInfo::with_members("bindery_qualifier::Named", &[Member::required("value")]);
}

/// A `Named` qualifier usable in `const` items.
///
/// ```ignore
/// const PRIMARY: StaticNamed = StaticNamed("primary-db");
/// ```
///
/// Keys treat `StaticNamed(x)` exactly like `Named(x)`, and the bare
/// `StaticNamed` type exactly like the bare `Named` type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StaticNamed(pub &'static str);

impl Qualifier for StaticNamed {
    const INFO: &'static QualifierInfo = &QualifierInfo::with_members(
        "bindery_qualifier::StaticNamed",
        &[Member::required("value")],
    );

    fn canonical_type() -> QualifierType {
        QualifierType::of::<Named>()
    }

    fn canonicalize(&self) -> QualifierInstance {
        QualifierInstance::new(Named::new(self.0))
    }
}

/// Shorthand for `Named::new`.
pub fn named(value: impl Into<String>) -> Named {
    Named::new(value)
}
