//! Type canonicalization.
//!
//! The same Rust type can be spelled many ways: `Vec<String>`,
//! `std::vec::Vec<std::string::String>` and the compiler's own
//! `alloc::vec::Vec<alloc::string::String>` all name one type. Keys must
//! compare equal regardless of spelling, so every type a key is built from
//! goes through a `TypeCanonicalizer` first.
//!
//! `StandardCanonicalizer` resolves path aliases to the path
//! `std::any::type_name` reports, rejects types that are not fully specified,
//! and memoizes captured Rust types per `TypeId`.

use std::any::{type_name, TypeId};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::TypeError;
use crate::literal::TypeLiteral;
use crate::parse::parse_type;
use crate::provider::Provider;
use crate::repr::{GenericArg, GenericArgs, PathType, TypeRepr};
use crate::stack::ensure_sufficient_stack;
use crate::token::TypeToken;

/// Converts type descriptors into canonical literals.
///
/// Implementations must be deterministic: structurally equal inputs (after
/// alias resolution) yield equal literals, and canonicalizing an
/// already-canonical repr returns an equal literal.
pub trait TypeCanonicalizer: Send + Sync {
    /// Canonicalize a hand-built or parsed descriptor.
    fn canonicalize(&self, repr: TypeRepr) -> Result<TypeLiteral, TypeError>;

    /// Canonicalize a captured Rust type.
    fn capture(&self, token: TypeToken) -> Result<TypeLiteral, TypeError> {
        let repr = parse_type(token.name())?;
        self.canonicalize(repr)
    }

    /// The unparameterized form of a canonical type.
    fn raw_type_of(&self, ty: &TypeLiteral) -> TypeLiteral {
        ty.raw_type()
    }

    /// The canonical type naming "a provider of `ty`".
    fn provider_type_of(&self, ty: &TypeLiteral) -> TypeLiteral {
        TypeLiteral::from_canonical_unchecked(TypeRepr::generic(
            provider_path(),
            vec![ty.repr().clone()],
        ))
    }
}

/// The path `std::any::type_name` reports for [`Provider`].
pub fn provider_path() -> &'static str {
    let name = type_name::<Provider<()>>();
    name.split('<').next().unwrap_or(name)
}

/// Prelude names and their reported paths.
const PRELUDE_ALIASES: &[(&str, &str)] = &[
    ("Box", "alloc::boxed::Box"),
    ("Option", "core::option::Option"),
    ("Result", "core::result::Result"),
    ("String", "alloc::string::String"),
    ("Vec", "alloc::vec::Vec"),
];

/// `std` re-exports whose reported path lives elsewhere.
const STD_ALIASES: &[(&str, &str)] = &[
    ("std::collections::BTreeMap", "alloc::collections::btree::map::BTreeMap"),
    ("std::collections::BTreeSet", "alloc::collections::btree::set::BTreeSet"),
    ("std::collections::HashMap", "std::collections::hash::map::HashMap"),
    ("std::collections::HashSet", "std::collections::hash::set::HashSet"),
    ("std::collections::VecDeque", "alloc::collections::vec_deque::VecDeque"),
    ("std::ops::Fn", "core::ops::function::Fn"),
    ("std::ops::FnMut", "core::ops::function::FnMut"),
    ("std::ops::FnOnce", "core::ops::function::FnOnce"),
    ("core::ops::Fn", "core::ops::function::Fn"),
    ("core::ops::FnMut", "core::ops::function::FnMut"),
    ("core::ops::FnOnce", "core::ops::function::FnOnce"),
    ("std::sync::Arc", "alloc::sync::Arc"),
    ("std::sync::Weak", "alloc::sync::Weak"),
];

/// `std` modules that re-export `core` or `alloc` modules wholesale.
const STD_MODULE_ALIASES: &[(&str, &str)] = &[
    ("std::any::", "core::any::"),
    ("std::boxed::", "alloc::boxed::"),
    ("std::cell::", "core::cell::"),
    ("std::marker::", "core::marker::"),
    ("std::option::", "core::option::"),
    ("std::rc::", "alloc::rc::"),
    ("std::result::", "core::result::"),
    ("std::string::", "alloc::string::"),
    ("std::vec::", "alloc::vec::"),
];

/// Upper bound on alias hops. Module aliases whose target extends their own
/// prefix rewrite a path forever without repeating it.
const MAX_ALIAS_HOPS: usize = 64;

/// Alias tables for [`StandardCanonicalizer`].
#[derive(Clone, Debug)]
pub struct CanonConfig {
    aliases: FxHashMap<Box<str>, Box<str>>,
    module_aliases: Vec<(Box<str>, Box<str>)>,
}

impl Default for CanonConfig {
    fn default() -> Self {
        let mut config = CanonConfig {
            aliases: FxHashMap::default(),
            module_aliases: Vec::new(),
        };
        for &(from, to) in PRELUDE_ALIASES.iter().chain(STD_ALIASES) {
            config = config.with_alias(from, to);
        }
        for &(from, to) in STD_MODULE_ALIASES {
            config = config.with_module_alias(from, to);
        }
        config.with_alias("bindery_types::Provider", provider_path())
    }
}

impl CanonConfig {
    /// Resolve the exact path `from` to `to`.
    #[must_use]
    pub fn with_alias(mut self, from: impl Into<Box<str>>, to: impl Into<Box<str>>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Rewrite every path starting with `from` to start with `to` instead.
    ///
    /// Both prefixes should end in `::`. The longest matching prefix wins.
    #[must_use]
    pub fn with_module_alias(
        mut self,
        from: impl Into<Box<str>>,
        to: impl Into<Box<str>>,
    ) -> Self {
        self.module_aliases.push((from.into(), to.into()));
        self.module_aliases
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        self
    }

    /// Drop the short prelude names (`Vec`, `String`, ...), for workspaces
    /// where those names are shadowed by local types.
    #[must_use]
    pub fn without_prelude_aliases(mut self) -> Self {
        for (from, _) in PRELUDE_ALIASES {
            self.aliases.remove(*from);
        }
        self
    }

    /// Resolve a path through the alias tables.
    ///
    /// A chain that comes back to a path it already visited resolves to the
    /// smallest path on that cycle, so every member of the cycle agrees.
    fn resolve(&self, path: &str) -> Box<str> {
        let mut current: Box<str> = path.strip_prefix("::").unwrap_or(path).into();
        let mut visited: Vec<Box<str>> = Vec::new();
        for _ in 0..MAX_ALIAS_HOPS {
            if let Some(start) = visited.iter().position(|seen| *seen == current) {
                return visited.split_off(start).into_iter().min().unwrap_or(current);
            }
            let next = match self.aliases.get(&current) {
                Some(to) => to.clone(),
                None => match self.rewrite_module(&current) {
                    Some(next) => next,
                    None => return current,
                },
            };
            visited.push(std::mem::replace(&mut current, next));
        }
        tracing::warn!(path, resolved = &*current, "alias chain exceeds hop limit");
        current
    }

    fn rewrite_module(&self, path: &str) -> Option<Box<str>> {
        self.module_aliases.iter().find_map(|(from, to)| {
            path.strip_prefix(&**from).map(|rest| format!("{to}{rest}").into_boxed_str())
        })
    }
}

/// The default canonicalizer.
pub struct StandardCanonicalizer {
    config: CanonConfig,
    /// Captured Rust types, keyed by `TypeId`.
    captured: RwLock<FxHashMap<TypeId, TypeLiteral>>,
}

impl StandardCanonicalizer {
    pub fn new() -> Self {
        Self::with_config(CanonConfig::default())
    }

    pub fn with_config(config: CanonConfig) -> Self {
        StandardCanonicalizer {
            config,
            captured: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &CanonConfig {
        &self.config
    }

    fn resolve_repr(&self, repr: TypeRepr) -> TypeRepr {
        ensure_sufficient_stack(|| match repr {
            TypeRepr::Path(path) => TypeRepr::Path(self.resolve_path(path)),
            TypeRepr::Tuple(elems) => {
                TypeRepr::Tuple(elems.into_iter().map(|e| self.resolve_repr(e)).collect())
            }
            TypeRepr::Array { elem, len } => TypeRepr::Array {
                elem: Box::new(self.resolve_repr(*elem)),
                len,
            },
            TypeRepr::Slice(elem) => TypeRepr::Slice(Box::new(self.resolve_repr(*elem))),
            TypeRepr::Ref { mutable, inner } => TypeRepr::Ref {
                mutable,
                inner: Box::new(self.resolve_repr(*inner)),
            },
            TypeRepr::Ptr { mutable, inner } => TypeRepr::Ptr {
                mutable,
                inner: Box::new(self.resolve_repr(*inner)),
            },
            TypeRepr::Fn { params, ret } => TypeRepr::Fn {
                params: params.into_iter().map(|p| self.resolve_repr(p)).collect(),
                ret: Box::new(self.resolve_repr(*ret)),
            },
            TypeRepr::Dyn(bounds) => {
                // `dyn A + B` and `dyn B + A` name the same type.
                let mut bounds: Vec<PathType> =
                    bounds.into_iter().map(|b| self.resolve_path(b)).collect();
                bounds.sort_by_cached_key(ToString::to_string);
                bounds.dedup();
                TypeRepr::Dyn(bounds)
            }
            TypeRepr::Never | TypeRepr::Param(_) | TypeRepr::Infer => repr,
        })
    }

    fn resolve_path(&self, path: PathType) -> PathType {
        let args = match path.args {
            GenericArgs::Angle(args) => GenericArgs::Angle(
                args.into_iter()
                    .map(|arg| match arg {
                        GenericArg::Type(ty) => GenericArg::Type(self.resolve_repr(ty)),
                        GenericArg::Binding { name, ty } => GenericArg::Binding {
                            name,
                            ty: self.resolve_repr(ty),
                        },
                        GenericArg::Const(_) => arg,
                    })
                    .collect(),
            ),
            GenericArgs::Parenthesized { inputs, output } => GenericArgs::Parenthesized {
                inputs: inputs.into_iter().map(|i| self.resolve_repr(i)).collect(),
                output: Box::new(self.resolve_repr(*output)),
            },
        };
        PathType {
            path: self.config.resolve(&path.path),
            args,
        }
    }
}

impl Default for StandardCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCanonicalizer for StandardCanonicalizer {
    fn canonicalize(&self, repr: TypeRepr) -> Result<TypeLiteral, TypeError> {
        if let Some(unspecified) = repr.first_unspecified() {
            return Err(TypeError::NotFullySpecified {
                ty: repr.to_string(),
                unspecified: unspecified.to_string(),
            });
        }
        Ok(TypeLiteral::from_canonical_unchecked(self.resolve_repr(repr)))
    }

    fn capture(&self, token: TypeToken) -> Result<TypeLiteral, TypeError> {
        // Fast path: already captured
        if let Some(lit) = self.captured.read().get(&token.type_id()) {
            return Ok(lit.clone());
        }

        tracing::trace!(name = token.name(), "capturing type");
        let lit = self.canonicalize(parse_type(token.name())?)?;

        // Another thread may have captured the same type meanwhile; keep
        // whichever literal landed first.
        let mut guard = self.captured.write();
        Ok(guard.entry(token.type_id()).or_insert(lit).clone())
    }
}
