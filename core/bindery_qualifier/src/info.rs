//! Static qualifier metadata.

/// Whether a qualifier's metadata survives for runtime lookup.
///
/// Only `Runtime` qualifiers can take part in keys. `Source` exists for
/// qualifiers that document intent at declaration sites but are never meant
/// to be matched by a registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Retention {
    Source,
    Runtime,
}

/// One declared attribute of a qualifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: &'static str,
    /// Whether the attribute has a default value.
    pub has_default: bool,
}

impl Member {
    /// An attribute callers must supply.
    pub const fn required(name: &'static str) -> Self {
        Member {
            name,
            has_default: false,
        }
    }

    /// An attribute with a default value.
    pub const fn defaulted(name: &'static str) -> Self {
        Member {
            name,
            has_default: true,
        }
    }
}

/// Everything a registry needs to know about a qualifier type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifierInfo {
    /// Display name, conventionally the full path of the type.
    pub name: &'static str,
    pub retention: Retention,
    /// Whether the type is declared as a binding qualifier.
    pub binding: bool,
    /// Declared attributes, in declaration order.
    pub members: &'static [Member],
}

impl QualifierInfo {
    /// A runtime-retained binding qualifier without attributes.
    pub const fn marker(name: &'static str) -> Self {
        QualifierInfo {
            name,
            retention: Retention::Runtime,
            binding: true,
            members: &[],
        }
    }

    /// A runtime-retained binding qualifier with the given attributes.
    pub const fn with_members(name: &'static str, members: &'static [Member]) -> Self {
        QualifierInfo {
            name,
            retention: Retention::Runtime,
            binding: true,
            members,
        }
    }

    /// A qualifier with no attributes compares by type alone.
    #[inline]
    pub const fn is_marker(&self) -> bool {
        self.members.is_empty()
    }

    /// True when the qualifier has attributes and every one has a default,
    /// so an instance can be built without caller-supplied values.
    ///
    /// Markers return `false`: they have nothing to default.
    pub fn all_members_have_defaults(&self) -> bool {
        !self.members.is_empty() && self.members.iter().all(|m| m.has_default)
    }

    /// Look up a declared attribute by name.
    pub fn member(&self, name: &str) -> Option<&'static Member> {
        let members: &'static [Member] = self.members;
        members.iter().find(|m| m.name == name)
    }
}
