//! Structural type descriptors.
//!
//! `TypeRepr` captures the full shape of a Rust type as it is spelled, before
//! any alias resolution. It is what `parse_type` produces from a runtime type
//! name and what callers build by hand for keys that have no Rust type at hand.
//!
//! # Design
//!
//! Paths are stored whole (`alloc::vec::Vec`), with generic arguments attached
//! to the final segment. Lifetimes are not represented: two types that differ
//! only in lifetimes name the same binding.

use std::fmt;

use crate::stack::ensure_sufficient_stack;

/// A type expression, preserving full structure.
///
/// - `alloc::string::String` → `Path(PathType { path: "alloc::string::String", .. })`
/// - `(i32, bool)` → `Tuple([Path(i32), Path(bool)])`
/// - `&mut [u8]` → `Ref { mutable: true, inner: Slice(Path(u8)) }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeRepr {
    /// A path type with optional generic arguments.
    Path(PathType),

    /// A tuple type: `(T, U)`, or unit `()`.
    Tuple(Vec<TypeRepr>),

    /// A fixed-size array: `[T; N]`. The length is kept as written.
    Array {
        /// Element type.
        elem: Box<TypeRepr>,
        /// Length expression.
        len: Box<str>,
    },

    /// A slice: `[T]`.
    Slice(Box<TypeRepr>),

    /// A reference: `&T` or `&mut T`.
    Ref {
        /// Whether the reference is `&mut`.
        mutable: bool,
        /// Referenced type.
        inner: Box<TypeRepr>,
    },

    /// A raw pointer: `*const T` or `*mut T`.
    Ptr {
        /// Whether the pointer is `*mut`.
        mutable: bool,
        /// Pointee type.
        inner: Box<TypeRepr>,
    },

    /// A function pointer: `fn(T, U) -> R`.
    Fn {
        /// Parameter types.
        params: Vec<TypeRepr>,
        /// Return type, unit when omitted.
        ret: Box<TypeRepr>,
    },

    /// A trait object: `dyn A + B`.
    Dyn(Vec<PathType>),

    /// The never type `!`.
    Never,

    /// An unresolved generic parameter such as `T`.
    Param(Box<str>),

    /// An inference placeholder `_`.
    Infer,
}

/// A path with the generic arguments of its final segment.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathType {
    /// Full path, segments joined by `::`.
    pub path: Box<str>,
    /// Arguments applied to the final segment.
    pub args: GenericArgs,
}

/// Generic arguments applied to a path.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenericArgs {
    /// `<A, B, Item = C>`; empty when the path takes no arguments.
    Angle(Vec<GenericArg>),
    /// `Fn(A, B) -> R` sugar.
    Parenthesized {
        inputs: Vec<TypeRepr>,
        output: Box<TypeRepr>,
    },
}

/// One angle-bracketed generic argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenericArg {
    Type(TypeRepr),
    /// A const argument, kept as written: `3`, `{ N + 1 }`.
    Const(Box<str>),
    /// An associated type binding: `Item = u8`.
    Binding { name: Box<str>, ty: TypeRepr },
}

impl PathType {
    /// A path without generic arguments.
    pub fn new(path: impl Into<Box<str>>) -> Self {
        PathType {
            path: path.into(),
            args: GenericArgs::Angle(Vec::new()),
        }
    }

    /// A path applied to type arguments.
    pub fn generic(path: impl Into<Box<str>>, args: Vec<TypeRepr>) -> Self {
        PathType {
            path: path.into(),
            args: GenericArgs::Angle(args.into_iter().map(GenericArg::Type).collect()),
        }
    }

    /// The last `::` segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path[..])
    }

    /// Whether any generic arguments are applied.
    pub fn has_args(&self) -> bool {
        match &self.args {
            GenericArgs::Angle(args) => !args.is_empty(),
            GenericArgs::Parenthesized { .. } => true,
        }
    }
}

impl TypeRepr {
    /// Create a non-generic path type.
    #[inline]
    pub fn path(path: impl Into<Box<str>>) -> Self {
        TypeRepr::Path(PathType::new(path))
    }

    /// Create a path type applied to type arguments.
    #[inline]
    pub fn generic(path: impl Into<Box<str>>, args: Vec<TypeRepr>) -> Self {
        TypeRepr::Path(PathType::generic(path, args))
    }

    /// Create a tuple type.
    #[inline]
    pub fn tuple(elems: Vec<TypeRepr>) -> Self {
        TypeRepr::Tuple(elems)
    }

    /// Create the unit type (empty tuple).
    #[inline]
    pub fn unit() -> Self {
        TypeRepr::Tuple(Vec::new())
    }

    #[inline]
    pub fn slice(elem: TypeRepr) -> Self {
        TypeRepr::Slice(Box::new(elem))
    }

    #[inline]
    pub fn array(elem: TypeRepr, len: impl Into<Box<str>>) -> Self {
        TypeRepr::Array {
            elem: Box::new(elem),
            len: len.into(),
        }
    }

    #[inline]
    pub fn reference(inner: TypeRepr, mutable: bool) -> Self {
        TypeRepr::Ref {
            mutable,
            inner: Box::new(inner),
        }
    }

    #[inline]
    pub fn pointer(inner: TypeRepr, mutable: bool) -> Self {
        TypeRepr::Ptr {
            mutable,
            inner: Box::new(inner),
        }
    }

    /// Create a function pointer type.
    #[inline]
    pub fn function(params: Vec<TypeRepr>, ret: TypeRepr) -> Self {
        TypeRepr::Fn {
            params,
            ret: Box::new(ret),
        }
    }

    /// Create a trait object over the given bounds.
    #[inline]
    pub fn dyn_trait(bounds: Vec<PathType>) -> Self {
        TypeRepr::Dyn(bounds)
    }

    /// Create an unresolved generic parameter.
    #[inline]
    pub fn param(name: impl Into<Box<str>>) -> Self {
        TypeRepr::Param(name.into())
    }

    /// Check if this is the unit type.
    #[inline]
    pub fn is_unit(&self) -> bool {
        matches!(self, TypeRepr::Tuple(elems) if elems.is_empty())
    }

    /// Returns the first unresolved parameter or placeholder, if any.
    ///
    /// A type is fully specified when this returns `None`.
    pub fn first_unspecified(&self) -> Option<&TypeRepr> {
        ensure_sufficient_stack(|| match self {
            TypeRepr::Param(_) | TypeRepr::Infer => Some(self),
            TypeRepr::Never => None,
            TypeRepr::Path(path) => path.first_unspecified(),
            TypeRepr::Tuple(elems) => elems.iter().find_map(TypeRepr::first_unspecified),
            TypeRepr::Array { elem, .. } | TypeRepr::Slice(elem) => elem.first_unspecified(),
            TypeRepr::Ref { inner, .. } | TypeRepr::Ptr { inner, .. } => inner.first_unspecified(),
            TypeRepr::Fn { params, ret } => params
                .iter()
                .find_map(TypeRepr::first_unspecified)
                .or_else(|| ret.first_unspecified()),
            TypeRepr::Dyn(bounds) => bounds.iter().find_map(PathType::first_unspecified),
        })
    }

    /// Whether the type contains no unresolved parameters or placeholders.
    #[inline]
    pub fn is_fully_specified(&self) -> bool {
        self.first_unspecified().is_none()
    }
}

impl PathType {
    fn first_unspecified(&self) -> Option<&TypeRepr> {
        match &self.args {
            GenericArgs::Angle(args) => args.iter().find_map(|arg| match arg {
                GenericArg::Type(ty) | GenericArg::Binding { ty, .. } => ty.first_unspecified(),
                GenericArg::Const(_) => None,
            }),
            GenericArgs::Parenthesized { inputs, output } => inputs
                .iter()
                .find_map(TypeRepr::first_unspecified)
                .or_else(|| output.first_unspecified()),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRepr::Path(path) => write!(f, "{path}"),
            TypeRepr::Tuple(elems) => {
                f.write_str("(")?;
                write_list(f, elems)?;
                // One-element tuples keep their trailing comma.
                if elems.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            TypeRepr::Array { elem, len } => write!(f, "[{elem}; {len}]"),
            TypeRepr::Slice(elem) => write!(f, "[{elem}]"),
            TypeRepr::Ref { mutable, inner } => {
                if *mutable {
                    write!(f, "&mut {inner}")
                } else {
                    write!(f, "&{inner}")
                }
            }
            TypeRepr::Ptr { mutable, inner } => {
                if *mutable {
                    write!(f, "*mut {inner}")
                } else {
                    write!(f, "*const {inner}")
                }
            }
            TypeRepr::Fn { params, ret } => {
                f.write_str("fn(")?;
                write_list(f, params)?;
                f.write_str(")")?;
                if !ret.is_unit() {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
            TypeRepr::Dyn(bounds) => {
                f.write_str("dyn ")?;
                for (i, bound) in bounds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{bound}")?;
                }
                Ok(())
            }
            TypeRepr::Never => f.write_str("!"),
            TypeRepr::Param(name) => f.write_str(name),
            TypeRepr::Infer => f.write_str("_"),
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        match &self.args {
            GenericArgs::Angle(args) if args.is_empty() => Ok(()),
            GenericArgs::Angle(args) => {
                f.write_str("<")?;
                write_list(f, args)?;
                f.write_str(">")
            }
            GenericArgs::Parenthesized { inputs, output } => {
                f.write_str("(")?;
                write_list(f, inputs)?;
                f.write_str(")")?;
                if !output.is_unit() {
                    write!(f, " -> {output}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for GenericArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericArg::Type(ty) => write!(f, "{ty}"),
            GenericArg::Const(value) => f.write_str(value),
            GenericArg::Binding { name, ty } => write!(f, "{name} = {ty}"),
        }
    }
}
