//! Type tokens: a Rust type captured as data.

use std::any::{type_name, TypeId};
use std::fmt;

/// A captured Rust type: its `TypeId` and the name the compiler reports.
///
/// `TypeToken::of::<Vec<String>>()` is how generic type arguments reach a
/// canonicalizer. The name is parsed into a structural repr; the id serves
/// as a memoization key.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Capture `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeToken {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// The name reported by `std::any::type_name`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken({})", self.name)
    }
}
