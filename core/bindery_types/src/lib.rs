//! Type descriptors for bindery keys.
//!
//! A binding registry indexes values by type. This crate provides the type
//! half of that identity:
//! - `TypeRepr`: structural description of a Rust type
//! - `parse_type`: reconstructs a `TypeRepr` from a type name
//! - `TypeLiteral`: a canonical, cheaply comparable descriptor
//! - `TypeCanonicalizer`: the seam that turns descriptors into literals
//!
//! # Equality Across Spellings
//!
//! `TypeToken::of::<Vec<String>>()`, the hand-written `Vec<String>` and
//! `std::vec::Vec<std::string::String>` canonicalize to equal literals under
//! `StandardCanonicalizer`.

mod canon;
mod error;
mod literal;
mod parse;
mod provider;
mod repr;
mod stack;
mod token;

pub use canon::{provider_path, CanonConfig, StandardCanonicalizer, TypeCanonicalizer};
pub use error::{ParseTypeError, TypeError};
pub use literal::TypeLiteral;
pub use parse::{parse_type, MAX_TYPE_NESTING};
pub use provider::Provider;
pub use repr::{GenericArg, GenericArgs, PathType, TypeRepr};
pub use token::TypeToken;
