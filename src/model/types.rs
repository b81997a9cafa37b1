use std::fmt;

use serde::{Deserialize, Serialize};

use super::builtin;
use super::decl::{Function, Import, Variable};

/// Resolved type expression.
///
/// Linear variants wrap a `next` type, forming a chain that ends in `Name`,
/// `Map`, `Interface` or `Func`. Pointers are never nested: build them with
/// [`Type::pointer_to`], which folds a pointer-to-pointer into one `Pointer`
/// with a larger `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Name {
        name: String,
    },
    Pointer {
        count: usize,
        next: Box<Type>,
    },
    Array {
        len: ArrayLen,
        next: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        next: Box<Type>,
    },
    /// Package-qualified name; `import` is absent when the alias could not be
    /// resolved and unknown aliases are tolerated.
    Import {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        import: Option<Import>,
        next: Box<Type>,
    },
    Interface {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        methods: Vec<Function>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        embedded: Vec<Type>,
    },
    Func {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<Variable>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        results: Vec<Variable>,
    },
    /// Element type of a variadic parameter (`...T`).
    Ellipsis {
        next: Box<Type>,
    },
}

/// Length part of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayLen {
    /// `[N]T`
    Fixed(u64),
    /// `[]T`
    Slice,
    /// `[...]T`
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Receive,
    /// `chan T`
    Both,
}

impl Type {
    pub fn name(name: impl Into<String>) -> Self {
        Type::Name { name: name.into() }
    }

    /// `*inner`, merging into `inner` when it is already a pointer.
    pub fn pointer_to(inner: Type) -> Self {
        match inner {
            Type::Pointer { count, next } => Type::Pointer {
                count: count + 1,
                next,
            },
            other => Type::Pointer {
                count: 1,
                next: Box::new(other),
            },
        }
    }

    pub fn array(len: ArrayLen, next: Type) -> Self {
        Type::Array {
            len,
            next: Box::new(next),
        }
    }

    pub fn slice_of(next: Type) -> Self {
        Type::array(ArrayLen::Slice, next)
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, next: Type) -> Self {
        Type::Chan {
            dir,
            next: Box::new(next),
        }
    }

    pub fn qualified(import: Option<Import>, next: Type) -> Self {
        Type::Import {
            import,
            next: Box::new(next),
        }
    }

    pub fn ellipsis(next: Type) -> Self {
        Type::Ellipsis {
            next: Box::new(next),
        }
    }

    /// Inner type of a linear variant.
    pub fn next(&self) -> Option<&Type> {
        match self {
            Type::Pointer { next, .. }
            | Type::Array { next, .. }
            | Type::Chan { next, .. }
            | Type::Import { next, .. }
            | Type::Ellipsis { next } => Some(next),
            Type::Name { .. } | Type::Map { .. } | Type::Interface { .. } | Type::Func { .. } => {
                None
            }
        }
    }

    /// Name at the end of a linear chain; `None` for maps, interfaces and
    /// function types.
    pub fn type_name(&self) -> Option<&str> {
        let mut t = self;
        loop {
            match t {
                Type::Name { name } => return Some(name),
                other => t = other.next()?,
            }
        }
    }

    /// Bare predeclared name such as `int` or `error`.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Type::Name { name } if builtin::is_builtin_type(name))
    }

    /// Base name of a common receiver: a bare name under at most one pointer.
    pub fn receiver_name(&self) -> Option<&str> {
        match self {
            Type::Name { name } => Some(name),
            Type::Pointer { count: 1, next } => match next.as_ref() {
                Type::Name { name } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Name { name } => f.write_str(name),
            Type::Pointer { count, next } => {
                for _ in 0..*count {
                    f.write_str("*")?;
                }
                write!(f, "{next}")
            }
            Type::Array { len, next } => match len {
                ArrayLen::Fixed(n) => write!(f, "[{n}]{next}"),
                ArrayLen::Slice => write!(f, "[]{next}"),
                ArrayLen::Variadic => write!(f, "[...]{next}"),
            },
            Type::Map { key, value } => write!(f, "map[{key}]{value}"),
            Type::Chan { dir, next } => match dir {
                ChanDir::Send => write!(f, "chan<- {next}"),
                ChanDir::Receive => write!(f, "<-chan {next}"),
                ChanDir::Both => write!(f, "chan {next}"),
            },
            Type::Import { import, next } => match import {
                Some(import) => write!(f, "{}.{next}", import.alias),
                None => write!(f, "{next}"),
            },
            Type::Interface { methods, embedded } => {
                f.write_str("interface{")?;
                let mut first = true;
                for e in embedded {
                    if !first {
                        f.write_str("; ")?;
                    }
                    write!(f, "{e}")?;
                    first = false;
                }
                for m in methods {
                    if !first {
                        f.write_str("; ")?;
                    }
                    f.write_str(&m.name)?;
                    write_signature(f, &m.args, &m.results)?;
                    first = false;
                }
                f.write_str("}")
            }
            Type::Func { args, results } => {
                f.write_str("func")?;
                write_signature(f, args, results)
            }
            Type::Ellipsis { next } => write!(f, "...{next}"),
        }
    }
}

/// `(args) results` in Go spelling.
pub(crate) fn write_signature(
    f: &mut fmt::Formatter<'_>,
    args: &[Variable],
    results: &[Variable],
) -> fmt::Result {
    write_params(f, args)?;
    match results {
        [] => Ok(()),
        [single] if single.name.is_empty() => write!(f, " {single}"),
        _ => {
            f.write_str(" ")?;
            write_params(f, results)
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[Variable]) -> fmt::Result {
    f.write_str("(")?;
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{p}")?;
    }
    f.write_str(")")
}
