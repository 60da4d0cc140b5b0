//! Binding keys.
//!
//! A `Key` names one binding in a dependency registry: "a value of type `T`,
//! optionally qualified". Keys are frozen values with a precomputed hash, so
//! they can be shared across threads and used as map keys directly.
//!
//! # Equality
//!
//! - Types compare after canonicalization: `Vec<String>` built from the Rust
//!   type and from a hand-written descriptor are the same type.
//! - Qualifiers compare by one of three rules, see [`QualifierStrategy`].
//!
//! # Construction
//!
//! ```ignore
//! use bindery_key::Key;
//! use bindery_qualifier::Named;
//!
//! let key = Key::<Vec<String>>::get_with(Named::new("hosts"))?;
//! assert_eq!(
//!     key.to_string(),
//!     "Key[type=alloc::vec::Vec<alloc::string::String>, annotation=@Named(\"hosts\")]"
//! );
//! ```
//!
//! `Key`'s constructors use [`KeyFactory::standard`]. Registries with their
//! own type or qualifier rules build keys through a [`KeyFactory`] of their
//! own.

mod error;
mod factory;
mod key;
mod select;
mod strategy;

pub use error::KeyError;
pub use factory::KeyFactory;
pub use key::{Key, Untyped};
pub use strategy::QualifierStrategy;
