//! Qualifiers for bindery keys.
//!
//! A qualifier narrows which binding of a type a key names: the database
//! `Named("primary")` rather than any database. This crate provides:
//! - `QualifierInfo`: static metadata (retention, binding flag, members)
//! - `Qualifier`: the trait qualifier values implement
//! - `QualifierType` / `QualifierInstance`: erased type and value handles
//! - `QualifierIntrospector`: the seam key construction validates through
//!
//! # Declaring Qualifiers
//!
//! Markers (no attributes) are one line with `marker_qualifier!`. Qualifiers
//! with attributes implement `Qualifier` by hand, declaring members in
//! `INFO` and, when every member has a default, overriding `synthesize`.

mod info;
mod introspect;
mod macros;
mod named;
mod qualifier;

pub use info::{Member, QualifierInfo, Retention};
pub use introspect::{QualifierIntrospector, StandardIntrospector};
pub use named::{named, Named, StaticNamed};
pub use qualifier::{Qualifier, QualifierInstance, QualifierType};
