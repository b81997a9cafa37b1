//! Type expression resolution: syntax-tree `Type` nodes to model [`Type`]s.

use godecl_syntax::SyntaxTree;
use godecl_syntax::ast::{
    self, BasicLitKind, CommentGroupId, Expr, ExprId, Field, FieldId, InterfaceElem, ListRef,
    Results, SignatureId, TypeId,
};
use tracing::trace;

use crate::error::{Error, Result};
use crate::imports::ImportTable;
use crate::lit;
use crate::model::{ArrayLen, ChanDir, Function, Import, Type, Variable, builtin};

/// Recursive resolver over one tree.
///
/// Holds only shared references and flags, so it is `Copy`; variants such as
/// [`without_current`](Self::without_current) are cheap to derive.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    tree: &'a SyntaxTree,
    imports: &'a ImportTable,
    current: Option<&'a Import>,
    keep_docs: bool,
    allow_any_alias: bool,
}

impl<'a> TypeResolver<'a> {
    pub fn new(tree: &'a SyntaxTree, imports: &'a ImportTable) -> Self {
        Self {
            tree,
            imports,
            current: None,
            keep_docs: true,
            allow_any_alias: false,
        }
    }

    /// Tags bare, non-builtin names as members of `current`.
    pub fn current_package(mut self, current: Option<&'a Import>) -> Self {
        self.current = current;
        self
    }

    pub fn keep_docs(mut self, keep: bool) -> Self {
        self.keep_docs = keep;
        self
    }

    pub fn allow_any_alias(mut self, allow: bool) -> Self {
        self.allow_any_alias = allow;
        self
    }

    /// Same resolver with self-reference tagging turned off.
    pub fn without_current(self) -> Self {
        self.current_package(None)
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Comment lines of `group`, or nothing when docs are ignored.
    pub fn docs(&self, group: Option<CommentGroupId>) -> Vec<String> {
        if self.keep_docs {
            self.tree.comment_lines(group)
        } else {
            Vec::new()
        }
    }

    pub fn resolve(&self, id: TypeId) -> Result<Type> {
        let arena = &self.tree.arena;
        let span = arena.types.span(id);
        match arena.types[id] {
            ast::Type::Named {
                pkg,
                pkg_pos,
                name,
                name_pos: _,
                args,
            } => {
                if !args.is_empty() {
                    return Err(Error::unsupported("generic type instantiation", span));
                }
                let name = self.tree.name(name);
                match pkg {
                    Some(pkg) => {
                        let import = self.imports.lookup(
                            self.tree.name(pkg),
                            pkg_pos.unwrap_or(span),
                            self.allow_any_alias,
                        )?;
                        Ok(Type::qualified(import, Type::name(name)))
                    }
                    None => Ok(self.local_name(name)),
                }
            }
            ast::Type::Pointer { elem, .. } => Ok(Type::pointer_to(self.resolve(elem)?)),
            ast::Type::Array { len, elem, .. } => {
                let len = match len {
                    ast::ArrayLen::Ellipsis(_) => ArrayLen::Variadic,
                    ast::ArrayLen::Expr(e) => self.array_len(e),
                };
                Ok(Type::array(len, self.resolve(elem)?))
            }
            ast::Type::Slice { elem, .. } => Ok(Type::slice_of(self.resolve(elem)?)),
            ast::Type::Map { key, val, .. } => Ok(Type::map(self.resolve(key)?, self.resolve(val)?)),
            ast::Type::Chan { dir, elem, .. } => {
                let dir = match dir {
                    ast::ChanDir::Both => ChanDir::Both,
                    ast::ChanDir::Send => ChanDir::Send,
                    ast::ChanDir::Recv => ChanDir::Receive,
                };
                Ok(Type::chan(dir, self.resolve(elem)?))
            }
            ast::Type::Interface { elems, .. } => {
                let (methods, embedded) = self.resolve_interface(elems)?;
                Ok(Type::Interface { methods, embedded })
            }
            ast::Type::Func { sig, .. } => {
                let (args, results) = self.resolve_signature(sig)?;
                Ok(Type::Func { args, results })
            }
            ast::Type::Paren { typ, .. } => self.resolve(typ),
            ast::Type::Struct { .. } => Err(Error::unsupported("inline struct type", span)),
            ast::Type::Bad(_) => Err(Error::unsupported("malformed type expression", span)),
        }
    }

    fn local_name(&self, name: &str) -> Type {
        match self.current {
            Some(current) if !builtin::is_builtin_type(name) => {
                Type::qualified(Some(current.clone()), Type::name(name))
            }
            _ => Type::name(name),
        }
    }

    /// Literal lengths only; constant expressions and malformed literals
    /// degrade to an unspecified length.
    fn array_len(&self, e: ExprId) -> ArrayLen {
        let arena = &self.tree.arena;
        let mut e = e;
        while let Expr::Paren { expr, .. } = arena.exprs[e] {
            e = expr;
        }
        if let Expr::BasicLit(ast::BasicLit {
            kind: BasicLitKind::Int,
            raw,
        }) = arena.exprs[e]
        {
            if let Some(n) = lit::parse_int(self.tree.text(raw)) {
                return ArrayLen::Fixed(n);
            }
        }
        trace!(len = self.tree.text(arena.exprs.span(e)), "unreadable array length");
        ArrayLen::Slice
    }

    /// Type of one field or parameter, `...T` included.
    pub fn resolve_field_type(&self, field: &Field) -> Result<Type> {
        let ty = self.resolve(field.typ)?;
        Ok(match field.ellipsis_pos {
            Some(_) => Type::ellipsis(ty),
            None => ty,
        })
    }

    /// One variable per declared name of `field`; an unnamed field yields one
    /// unnamed variable. Names share copies of the same type and docs.
    pub fn resolve_field(&self, field: &Field) -> Result<Vec<Variable>> {
        let ty = self.resolve_field_type(field)?;
        let docs = self.docs(field.doc.or(field.comment));
        let names = self.tree.arena.list(field.names);
        if names.is_empty() {
            return Ok(vec![Variable {
                name: String::new(),
                docs,
                ty: Some(ty),
            }]);
        }
        Ok(names
            .iter()
            .map(|n| Variable {
                name: self.tree.name(n.sym).to_string(),
                docs: docs.clone(),
                ty: Some(ty.clone()),
            })
            .collect())
    }

    pub fn resolve_fields(&self, fields: ListRef<FieldId>) -> Result<Vec<Variable>> {
        let arena = &self.tree.arena;
        let mut out = Vec::new();
        for &id in arena.list(fields) {
            out.extend(self.resolve_field(&arena.fields[id])?);
        }
        Ok(out)
    }

    /// `(args, results)` of a signature.
    pub fn resolve_signature(&self, id: SignatureId) -> Result<(Vec<Variable>, Vec<Variable>)> {
        let sig = &self.tree.arena.signatures[id];
        let args = self.resolve_fields(sig.params.fields)?;
        let results = match sig.results {
            None => Vec::new(),
            Some(Results::Params(list)) => self.resolve_fields(list.fields)?,
            Some(Results::Type(t)) => vec![Variable {
                name: String::new(),
                docs: Vec::new(),
                ty: Some(self.resolve(t)?),
            }],
        };
        Ok((args, results))
    }

    pub fn resolve_function(
        &self,
        name: &str,
        doc: Option<CommentGroupId>,
        sig: SignatureId,
    ) -> Result<Function> {
        let (args, results) = self.resolve_signature(sig)?;
        Ok(Function {
            name: name.to_string(),
            docs: self.docs(doc),
            args,
            results,
        })
    }

    /// Method signatures and embedded types of an interface body.
    pub fn resolve_interface(
        &self,
        elems: ListRef<InterfaceElem>,
    ) -> Result<(Vec<Function>, Vec<Type>)> {
        let mut methods = Vec::new();
        let mut embedded = Vec::new();
        for elem in self.tree.arena.list(elems) {
            match *elem {
                InterfaceElem::Method { doc, name, sig, .. } => {
                    methods.push(self.resolve_function(self.tree.name(name), doc, sig)?);
                }
                InterfaceElem::Embedded(t) => embedded.push(self.resolve(t)?),
            }
        }
        Ok((methods, embedded))
    }

    /// Best-effort type of an initializer expression.
    ///
    /// Recognizes basic literals (Go default types), typed composite literals
    /// and their address, package selectors, function literals and
    /// conversions. Anything else is untyped.
    pub fn infer(&self, e: ExprId) -> Result<Option<Type>> {
        let arena = &self.tree.arena;
        let ty = match arena.exprs[e] {
            Expr::BasicLit(basic) => Some(Type::name(match basic.kind {
                BasicLitKind::Int => "int",
                BasicLitKind::Float => "float64",
                BasicLitKind::Imag => "complex128",
                BasicLitKind::Rune => "rune",
                BasicLitKind::String => "string",
            })),
            Expr::CompositeLit { typ: Some(t), .. } => Some(self.resolve(t)?),
            Expr::Unary {
                op: ast::UnaryOp::Addr,
                expr,
                ..
            } => match arena.exprs[expr] {
                Expr::CompositeLit { typ: Some(t), .. } => Some(Type::pointer_to(self.resolve(t)?)),
                _ => None,
            },
            Expr::Selector { expr, ident, .. } => match arena.exprs[expr] {
                Expr::Ident(pkg, pos) => {
                    let import =
                        self.imports
                            .lookup(self.tree.name(pkg), pos, self.allow_any_alias)?;
                    Some(Type::qualified(import, Type::name(self.tree.name(ident))))
                }
                _ => None,
            },
            Expr::FuncLit { sig, .. } => {
                let (args, results) = self.resolve_signature(sig)?;
                Some(Type::Func { args, results })
            }
            Expr::Call {
                callee: ast::CallCallee::Type(t),
                ..
            } => Some(self.resolve(t)?),
            Expr::Call {
                callee: ast::CallCallee::Expr(f),
                ..
            } => match arena.exprs[f] {
                Expr::Ident(name, _) if builtin::is_builtin_type(self.tree.name(name)) => {
                    Some(Type::name(self.tree.name(name)))
                }
                _ => None,
            },
            Expr::Paren { expr, .. } => self.infer(expr)?,
            _ => None,
        };
        Ok(ty)
    }
}
