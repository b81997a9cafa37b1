//! Programmatic construction of [`SyntaxTree`]s.
//!
//! Suppliers without a Go front end (tests, benches, code generators that
//! synthesize declarations) describe nodes with owned *sketches* and let
//! [`TreeBuilder`] lower them into the arena. The builder writes every
//! identifier, literal and comment into a synthetic source buffer so that
//! spans stay meaningful for diagnostics.
//!
//! ```
//! use godecl_syntax::builder::{TreeBuilder, sketch::*};
//!
//! let mut b = TreeBuilder::new("service");
//! b.imports(&[], [import("io")]);
//! b.types(&["// Reader reads."], [type_spec("Reader", qual("io", "Reader"))]);
//! let tree = b.finish();
//! assert_eq!(tree.package_name(), "service");
//! ```

use crate::ast::{
    self, AstArena, BasicLitKind, ChanDir, CommentGroupId, CommentKind, FieldList,
    GenDeclKind, Interner, Span, TopLevelDecl, TypeId, UnaryOp,
};
use crate::tree::SyntaxTree;

// =============================================================================
// Sketches
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSketch {
    Name(String),
    Qualified { pkg: String, name: String },
    Generic { name: String, args: Vec<TypeSketch> },
    Pointer(Box<TypeSketch>),
    Array { len: Box<LenSketch>, elem: Box<TypeSketch> },
    Slice(Box<TypeSketch>),
    Map(Box<TypeSketch>, Box<TypeSketch>),
    Chan(ChanDir, Box<TypeSketch>),
    Struct(Vec<FieldSketch>),
    Interface(Vec<ElemSketch>),
    Func(SigSketch),
    Paren(Box<TypeSketch>),
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LenSketch {
    Expr(ExprSketch),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElemSketch {
    Method {
        doc: Vec<String>,
        name: String,
        sig: SigSketch,
    },
    Embedded(TypeSketch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSketch {
    pub doc: Vec<String>,
    pub names: Vec<String>,
    pub variadic: bool,
    pub typ: TypeSketch,
    /// Raw tag literal, quotes included
    pub tag: Option<String>,
    pub embed: bool,
    pub comment: Vec<String>,
}

impl FieldSketch {
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn tag(mut self, raw: &str) -> Self {
        self.tag = Some(raw.to_string());
        self
    }

    pub fn doc(mut self, lines: &[&str]) -> Self {
        self.doc = owned(lines);
        self
    }

    pub fn comment(mut self, lines: &[&str]) -> Self {
        self.comment = owned(lines);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsSketch {
    None,
    Type(Box<TypeSketch>),
    Params(Vec<FieldSketch>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigSketch {
    pub params: Vec<FieldSketch>,
    pub results: ResultsSketch,
}

impl SigSketch {
    /// Single bare result: `func() T`.
    pub fn returns(mut self, typ: TypeSketch) -> Self {
        self.results = ResultsSketch::Type(Box::new(typ));
        self
    }

    /// Parenthesized result list.
    pub fn results(mut self, fields: Vec<FieldSketch>) -> Self {
        self.results = ResultsSketch::Params(fields);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprSketch {
    Ident(String),
    Lit(BasicLitKind, String),
    FuncLit(SigSketch),
    Composite(Option<TypeSketch>, Vec<ExprSketch>),
    Paren(Box<ExprSketch>),
    Selector(Box<ExprSketch>, String),
    Call(Box<ExprSketch>, Vec<ExprSketch>),
    Conversion(TypeSketch, Vec<ExprSketch>),
    Index(Box<ExprSketch>, Box<ExprSketch>),
    TypeAssert(Box<ExprSketch>, Option<TypeSketch>),
    Unary(UnaryOp, Box<ExprSketch>),
    Binary(Box<ExprSketch>, String, Box<ExprSketch>),
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSketch {
    pub doc: Vec<String>,
    /// `.`, `_`, or an alias
    pub name: Option<String>,
    /// Unquoted import path
    pub path: String,
}

impl ImportSketch {
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn doc(mut self, lines: &[&str]) -> Self {
        self.doc = owned(lines);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSketch {
    pub doc: Vec<String>,
    pub names: Vec<String>,
    pub typ: Option<TypeSketch>,
    pub values: Vec<ExprSketch>,
}

impl ValueSketch {
    pub fn typed(mut self, typ: TypeSketch) -> Self {
        self.typ = Some(typ);
        self
    }

    pub fn values(mut self, values: Vec<ExprSketch>) -> Self {
        self.values = values;
        self
    }

    pub fn doc(mut self, lines: &[&str]) -> Self {
        self.doc = owned(lines);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpecSketch {
    pub doc: Vec<String>,
    pub name: String,
    pub typ: TypeSketch,
    pub alias: bool,
    pub type_params: Vec<FieldSketch>,
}

impl TypeSpecSketch {
    pub fn alias(mut self) -> Self {
        self.alias = true;
        self
    }

    pub fn type_params(mut self, params: Vec<FieldSketch>) -> Self {
        self.type_params = params;
        self
    }

    pub fn doc(mut self, lines: &[&str]) -> Self {
        self.doc = owned(lines);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncSketch {
    pub doc: Vec<String>,
    pub recv: Option<Vec<FieldSketch>>,
    pub name: String,
    pub type_params: Vec<FieldSketch>,
    pub sig: SigSketch,
    pub body: bool,
}

impl FuncSketch {
    pub fn receiver(self, recv: FieldSketch) -> Self {
        self.receivers(vec![recv])
    }

    /// Raw receiver list; Go only accepts exactly one entry.
    pub fn receivers(mut self, recv: Vec<FieldSketch>) -> Self {
        self.recv = Some(recv);
        self
    }

    pub fn type_params(mut self, params: Vec<FieldSketch>) -> Self {
        self.type_params = params;
        self
    }

    /// Declaration without a body (implemented elsewhere).
    pub fn external(mut self) -> Self {
        self.body = false;
        self
    }

    pub fn doc(mut self, lines: &[&str]) -> Self {
        self.doc = owned(lines);
        self
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// Short constructors for sketches.
pub mod sketch {
    use super::*;

    pub fn name(n: &str) -> TypeSketch {
        TypeSketch::Name(n.to_string())
    }

    pub fn qual(pkg: &str, n: &str) -> TypeSketch {
        TypeSketch::Qualified {
            pkg: pkg.to_string(),
            name: n.to_string(),
        }
    }

    pub fn generic(n: &str, args: Vec<TypeSketch>) -> TypeSketch {
        TypeSketch::Generic {
            name: n.to_string(),
            args,
        }
    }

    pub fn ptr(t: TypeSketch) -> TypeSketch {
        TypeSketch::Pointer(Box::new(t))
    }

    /// `[n]T`
    pub fn array(n: u64, t: TypeSketch) -> TypeSketch {
        array_len(int(&n.to_string()), t)
    }

    /// `[len]T` with an arbitrary length expression.
    pub fn array_len(len: ExprSketch, t: TypeSketch) -> TypeSketch {
        TypeSketch::Array {
            len: Box::new(LenSketch::Expr(len)),
            elem: Box::new(t),
        }
    }

    /// `[...]T`
    pub fn ellipsis_array(t: TypeSketch) -> TypeSketch {
        TypeSketch::Array {
            len: Box::new(LenSketch::Ellipsis),
            elem: Box::new(t),
        }
    }

    pub fn slice(t: TypeSketch) -> TypeSketch {
        TypeSketch::Slice(Box::new(t))
    }

    pub fn map(k: TypeSketch, v: TypeSketch) -> TypeSketch {
        TypeSketch::Map(Box::new(k), Box::new(v))
    }

    pub fn chan(t: TypeSketch) -> TypeSketch {
        TypeSketch::Chan(ChanDir::Both, Box::new(t))
    }

    pub fn send_chan(t: TypeSketch) -> TypeSketch {
        TypeSketch::Chan(ChanDir::Send, Box::new(t))
    }

    pub fn recv_chan(t: TypeSketch) -> TypeSketch {
        TypeSketch::Chan(ChanDir::Recv, Box::new(t))
    }

    pub fn structure(fields: Vec<FieldSketch>) -> TypeSketch {
        TypeSketch::Struct(fields)
    }

    pub fn iface(elems: Vec<ElemSketch>) -> TypeSketch {
        TypeSketch::Interface(elems)
    }

    pub fn method(n: &str, sig: SigSketch) -> ElemSketch {
        ElemSketch::Method {
            doc: Vec::new(),
            name: n.to_string(),
            sig,
        }
    }

    pub fn documented_method(doc: &[&str], n: &str, sig: SigSketch) -> ElemSketch {
        ElemSketch::Method {
            doc: owned(doc),
            name: n.to_string(),
            sig,
        }
    }

    pub fn embedded(t: TypeSketch) -> ElemSketch {
        ElemSketch::Embedded(t)
    }

    pub fn func_type(sig: SigSketch) -> TypeSketch {
        TypeSketch::Func(sig)
    }

    pub fn paren(t: TypeSketch) -> TypeSketch {
        TypeSketch::Paren(Box::new(t))
    }

    pub fn field(names: &[&str], t: TypeSketch) -> FieldSketch {
        FieldSketch {
            doc: Vec::new(),
            names: owned(names),
            variadic: false,
            typ: t,
            tag: None,
            embed: false,
            comment: Vec::new(),
        }
    }

    /// Unnamed parameter or result.
    pub fn anon(t: TypeSketch) -> FieldSketch {
        field(&[], t)
    }

    /// Embedded struct field.
    pub fn embed(t: TypeSketch) -> FieldSketch {
        FieldSketch {
            embed: true,
            ..field(&[], t)
        }
    }

    pub fn sig(params: Vec<FieldSketch>) -> SigSketch {
        SigSketch {
            params,
            results: ResultsSketch::None,
        }
    }

    pub fn ident(n: &str) -> ExprSketch {
        ExprSketch::Ident(n.to_string())
    }

    pub fn int(raw: &str) -> ExprSketch {
        ExprSketch::Lit(BasicLitKind::Int, raw.to_string())
    }

    pub fn float(raw: &str) -> ExprSketch {
        ExprSketch::Lit(BasicLitKind::Float, raw.to_string())
    }

    pub fn imag(raw: &str) -> ExprSketch {
        ExprSketch::Lit(BasicLitKind::Imag, raw.to_string())
    }

    pub fn rune(raw: &str) -> ExprSketch {
        ExprSketch::Lit(BasicLitKind::Rune, raw.to_string())
    }

    /// String literal from its raw spelling, quotes included.
    pub fn string(raw: &str) -> ExprSketch {
        ExprSketch::Lit(BasicLitKind::String, raw.to_string())
    }

    pub fn composite(t: TypeSketch) -> ExprSketch {
        ExprSketch::Composite(Some(t), Vec::new())
    }

    pub fn func_lit(sig: SigSketch) -> ExprSketch {
        ExprSketch::FuncLit(sig)
    }

    pub fn selector(x: ExprSketch, sel: &str) -> ExprSketch {
        ExprSketch::Selector(Box::new(x), sel.to_string())
    }

    pub fn call(f: ExprSketch, args: Vec<ExprSketch>) -> ExprSketch {
        ExprSketch::Call(Box::new(f), args)
    }

    pub fn conversion(t: TypeSketch, args: Vec<ExprSketch>) -> ExprSketch {
        ExprSketch::Conversion(t, args)
    }

    pub fn index(base: ExprSketch, i: ExprSketch) -> ExprSketch {
        ExprSketch::Index(Box::new(base), Box::new(i))
    }

    pub fn assert(x: ExprSketch, t: TypeSketch) -> ExprSketch {
        ExprSketch::TypeAssert(Box::new(x), Some(t))
    }

    /// `<-x`
    pub fn recv(x: ExprSketch) -> ExprSketch {
        ExprSketch::Unary(UnaryOp::Recv, Box::new(x))
    }

    pub fn unary(op: UnaryOp, x: ExprSketch) -> ExprSketch {
        ExprSketch::Unary(op, Box::new(x))
    }

    /// `l op r`, with `op` spelled as in Go (`+`, `<<`, `&&`).
    pub fn binary(l: ExprSketch, op: &str, r: ExprSketch) -> ExprSketch {
        ExprSketch::Binary(Box::new(l), op.to_string(), Box::new(r))
    }

    pub fn import(path: &str) -> ImportSketch {
        ImportSketch {
            doc: Vec::new(),
            name: None,
            path: path.to_string(),
        }
    }

    pub fn value(names: &[&str]) -> ValueSketch {
        ValueSketch {
            doc: Vec::new(),
            names: owned(names),
            typ: None,
            values: Vec::new(),
        }
    }

    pub fn type_spec(n: &str, t: TypeSketch) -> TypeSpecSketch {
        TypeSpecSketch {
            doc: Vec::new(),
            name: n.to_string(),
            typ: t,
            alias: false,
            type_params: Vec::new(),
        }
    }

    pub fn func(n: &str, sig: SigSketch) -> FuncSketch {
        FuncSketch {
            doc: Vec::new(),
            recv: None,
            name: n.to_string(),
            type_params: Vec::new(),
            sig,
            body: true,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Lowers sketches into a [`SyntaxTree`], one top-level declaration at a time.
#[derive(Debug)]
pub struct TreeBuilder {
    arena: AstArena,
    interner: Interner,
    source: String,
    package: ast::Ident,
    package_pos: Span,
    doc: Option<CommentGroupId>,
    decls: Vec<TopLevelDecl>,
}

impl TreeBuilder {
    pub fn new(package: &str) -> Self {
        let mut b = Self {
            arena: AstArena::new(),
            interner: Interner::new(),
            source: String::new(),
            package: ast::Symbol::from_raw(0),
            package_pos: Span::default(),
            doc: None,
            decls: Vec::new(),
        };
        b.package_pos = b.text("package");
        b.package = b.ident(package).sym;
        b
    }

    /// Comment group above the package clause.
    pub fn file_doc(&mut self, lines: &[&str]) -> &mut Self {
        self.doc = self.comment_group(&owned(lines));
        self
    }

    pub fn imports(
        &mut self,
        doc: &[&str],
        specs: impl IntoIterator<Item = ImportSketch>,
    ) -> &mut Self {
        let start = self.mark();
        let kw_pos = self.text("import");
        let doc = self.comment_group(&owned(doc));
        let mut lowered = Vec::new();
        for spec in specs {
            let doc = self.comment_group(&spec.doc);
            let name = spec.name.as_deref().map(|n| {
                let pos = self.text(n);
                match n {
                    "." => ast::ImportName::Dot(pos),
                    "_" => ast::ImportName::Blank(pos),
                    _ => ast::ImportName::Name(self.interner.intern(n), pos),
                }
            });
            let raw = self.text(&format!("\"{}\"", spec.path));
            lowered.push(ast::Spec::Import(ast::ImportSpec {
                doc,
                name,
                path: ast::StringLit { raw },
            }));
        }
        self.gen_decl(start, kw_pos, GenDeclKind::Import, doc, lowered)
    }

    pub fn consts(&mut self, doc: &[&str], specs: impl IntoIterator<Item = ValueSketch>) -> &mut Self {
        self.values(GenDeclKind::Const, doc, specs)
    }

    pub fn vars(&mut self, doc: &[&str], specs: impl IntoIterator<Item = ValueSketch>) -> &mut Self {
        self.values(GenDeclKind::Var, doc, specs)
    }

    fn values(
        &mut self,
        kind: GenDeclKind,
        doc: &[&str],
        specs: impl IntoIterator<Item = ValueSketch>,
    ) -> &mut Self {
        let start = self.mark();
        let kw_pos = self.text(kind.keyword());
        let doc = self.comment_group(&owned(doc));
        let mut lowered = Vec::new();
        for spec in specs {
            let doc = self.comment_group(&spec.doc);
            let names: Vec<_> = spec.names.iter().map(|n| self.ident(n)).collect();
            let names = self.arena.alloc_list(names);
            let typ = spec.typ.as_ref().map(|t| self.ty(t));
            let values: Vec<_> = spec.values.iter().map(|v| self.expr(v)).collect();
            let values = self.arena.alloc_list(values);
            lowered.push(ast::Spec::Value(ast::ValueSpec {
                doc,
                names,
                typ,
                values,
            }));
        }
        self.gen_decl(start, kw_pos, kind, doc, lowered)
    }

    pub fn types(
        &mut self,
        doc: &[&str],
        specs: impl IntoIterator<Item = TypeSpecSketch>,
    ) -> &mut Self {
        let start = self.mark();
        let kw_pos = self.text("type");
        let doc = self.comment_group(&owned(doc));
        let mut lowered = Vec::new();
        for spec in specs {
            let doc = self.comment_group(&spec.doc);
            let name = self.ident(&spec.name);
            let type_params = self.type_params(&spec.type_params);
            let assign_pos = spec.alias.then(|| self.text("="));
            let typ = self.ty(&spec.typ);
            lowered.push(ast::Spec::Type(ast::TypeSpec {
                doc,
                name: name.sym,
                name_pos: name.pos,
                type_params,
                assign_pos,
                typ,
                alias: spec.alias,
            }));
        }
        self.gen_decl(start, kw_pos, GenDeclKind::Type, doc, lowered)
    }

    pub fn func(&mut self, f: FuncSketch) -> &mut Self {
        let start = self.mark();
        let doc = self.comment_group(&f.doc);
        let func_pos = self.text("func");
        let recv = f.recv.as_ref().map(|r| self.field_list(r));
        let name = self.ident(&f.name);
        let type_params = self.type_params(&f.type_params);
        let signature = self.signature(&f.sig);
        let body = f.body.then(|| self.text("{}"));
        let id = self.arena.funcs.alloc(
            ast::FuncDecl {
                doc,
                func_pos,
                recv,
                name: name.sym,
                name_pos: name.pos,
                type_params,
                signature,
                body,
            },
            self.span_from(start),
        );
        self.decls.push(TopLevelDecl::Func(id));
        self
    }

    /// Declaration the supplier failed to parse.
    pub fn bad_decl(&mut self) -> &mut Self {
        let span = self.text("<bad>");
        let id = self.arena.decls.alloc(ast::Decl::Bad(span), span);
        self.decls.push(TopLevelDecl::Decl(id));
        self
    }

    pub fn finish(mut self) -> SyntaxTree {
        let decls = self.arena.alloc_list(self.decls);
        SyntaxTree {
            arena: self.arena,
            interner: self.interner,
            source: self.source,
            root: ast::SourceFile {
                package_pos: self.package_pos,
                name: self.package,
                decls,
                doc: self.doc,
            },
        }
    }

    // -------------------------------------------------------------------------
    // Lowering
    // -------------------------------------------------------------------------

    pub fn ty(&mut self, t: &TypeSketch) -> TypeId {
        let start = self.mark();
        let node = match t {
            TypeSketch::Name(n) => {
                let name = self.ident(n);
                named(None, None, name, ast::ListRef::EMPTY)
            }
            TypeSketch::Qualified { pkg, name } => {
                let pkg = self.ident(pkg);
                self.text(".");
                let name = self.ident(name);
                named(Some(pkg.sym), Some(pkg.pos), name, ast::ListRef::EMPTY)
            }
            TypeSketch::Generic { name, args } => {
                let name = self.ident(name);
                let args: Vec<_> = args.iter().map(|a| self.ty(a)).collect();
                let args = self.arena.alloc_list(args);
                named(None, None, name, args)
            }
            TypeSketch::Pointer(elem) => {
                let star_pos = self.text("*");
                let elem = self.ty(elem);
                ast::Type::Pointer { star_pos, elem }
            }
            TypeSketch::Array { len, elem } => {
                let l_brack = self.text("[");
                let len = match len.as_ref() {
                    LenSketch::Expr(e) => ast::ArrayLen::Expr(self.expr(e)),
                    LenSketch::Ellipsis => ast::ArrayLen::Ellipsis(self.text("...")),
                };
                let r_brack = self.text("]");
                let elem = self.ty(elem);
                ast::Type::Array {
                    l_brack,
                    len,
                    r_brack,
                    elem,
                }
            }
            TypeSketch::Slice(elem) => {
                let l_brack = self.text("[");
                let r_brack = self.text("]");
                let elem = self.ty(elem);
                ast::Type::Slice {
                    l_brack,
                    r_brack,
                    elem,
                }
            }
            TypeSketch::Map(k, v) => {
                let map_pos = self.text("map");
                let key = self.ty(k);
                let val = self.ty(v);
                ast::Type::Map { map_pos, key, val }
            }
            TypeSketch::Chan(dir, elem) => {
                let chan_pos = self.text(match dir {
                    ChanDir::Both => "chan",
                    ChanDir::Send => "chan<-",
                    ChanDir::Recv => "<-chan",
                });
                let elem = self.ty(elem);
                ast::Type::Chan {
                    dir: *dir,
                    chan_pos,
                    elem,
                }
            }
            TypeSketch::Struct(fields) => {
                let struct_pos = self.text("struct");
                let list = self.field_list(fields);
                ast::Type::Struct {
                    struct_pos,
                    l_brace: list.l_paren,
                    fields: list.fields,
                    r_brace: list.r_paren,
                }
            }
            TypeSketch::Interface(elems) => {
                let interface_pos = self.text("interface");
                let l_brace = self.text("{");
                let lowered: Vec<_> = elems.iter().map(|e| self.interface_elem(e)).collect();
                let elems = self.arena.alloc_list(lowered);
                let r_brace = self.text("}");
                ast::Type::Interface {
                    interface_pos,
                    l_brace,
                    elems,
                    r_brace,
                }
            }
            TypeSketch::Func(sig) => {
                let func_pos = self.text("func");
                let sig = self.signature(sig);
                ast::Type::Func { func_pos, sig }
            }
            TypeSketch::Paren(inner) => {
                let l_paren = self.text("(");
                let typ = self.ty(inner);
                let r_paren = self.text(")");
                ast::Type::Paren {
                    l_paren,
                    typ,
                    r_paren,
                }
            }
            TypeSketch::Bad => ast::Type::Bad(self.text("<bad>")),
        };
        let span = self.span_from(start);
        self.arena.types.alloc(node, span)
    }

    pub fn expr(&mut self, e: &ExprSketch) -> ast::ExprId {
        let start = self.mark();
        let node = match e {
            ExprSketch::Ident(n) => {
                let name = self.ident(n);
                ast::Expr::Ident(name.sym, name.pos)
            }
            ExprSketch::Lit(kind, raw) => ast::Expr::BasicLit(ast::BasicLit {
                kind: *kind,
                raw: self.text(raw),
            }),
            ExprSketch::FuncLit(sig) => {
                let func_pos = self.text("func");
                let sig = self.signature(sig);
                let body = self.text("{}");
                ast::Expr::FuncLit {
                    func_pos,
                    sig,
                    body,
                }
            }
            ExprSketch::Composite(typ, elts) => {
                let typ = typ.as_ref().map(|t| self.ty(t));
                let l_brace = self.text("{");
                let elts: Vec<_> = elts.iter().map(|x| self.expr(x)).collect();
                let elts = self.arena.alloc_list(elts);
                let r_brace = self.text("}");
                ast::Expr::CompositeLit {
                    typ,
                    l_brace,
                    elts,
                    r_brace,
                }
            }
            ExprSketch::Paren(inner) => {
                let l_paren = self.text("(");
                let expr = self.expr(inner);
                let r_paren = self.text(")");
                ast::Expr::Paren {
                    l_paren,
                    expr,
                    r_paren,
                }
            }
            ExprSketch::Selector(x, sel) => {
                let expr = self.expr(x);
                let dot_pos = self.text(".");
                let sel = self.ident(sel);
                ast::Expr::Selector {
                    expr,
                    dot_pos,
                    ident: sel.sym,
                    ident_pos: sel.pos,
                }
            }
            ExprSketch::Call(f, args) => {
                let callee = ast::CallCallee::Expr(self.expr(f));
                self.call(callee, args)
            }
            ExprSketch::Conversion(t, args) => {
                let callee = ast::CallCallee::Type(self.ty(t));
                self.call(callee, args)
            }
            ExprSketch::Index(base, i) => {
                let base = self.expr(base);
                let l_brack = self.text("[");
                let index = self.expr(i);
                let r_brack = self.text("]");
                ast::Expr::Index {
                    base,
                    l_brack,
                    index,
                    r_brack,
                }
            }
            ExprSketch::TypeAssert(x, t) => {
                let expr = self.expr(x);
                let dot_pos = self.text(".");
                let l_paren = self.text("(");
                let typ = t.as_ref().map(|t| self.ty(t));
                let r_paren = self.text(")");
                ast::Expr::TypeAssert {
                    expr,
                    dot_pos,
                    l_paren,
                    typ,
                    r_paren,
                }
            }
            ExprSketch::Unary(op, x) => {
                let op_pos = self.text(unary_spelling(*op));
                let expr = self.expr(x);
                ast::Expr::Unary {
                    op: *op,
                    op_pos,
                    expr,
                }
            }
            ExprSketch::Binary(l, op, r) => {
                let left = self.expr(l);
                let op_pos = self.text(op);
                let right = self.expr(r);
                ast::Expr::Binary {
                    left,
                    op_pos,
                    right,
                }
            }
            ExprSketch::Bad => ast::Expr::Bad(self.text("<bad>")),
        };
        let span = self.span_from(start);
        self.arena.exprs.alloc(node, span)
    }

    pub fn signature(&mut self, sig: &SigSketch) -> ast::SignatureId {
        let start = self.mark();
        let params = self.field_list(&sig.params);
        let results = match &sig.results {
            ResultsSketch::None => None,
            ResultsSketch::Type(t) => Some(ast::Results::Type(self.ty(t))),
            ResultsSketch::Params(fields) => Some(ast::Results::Params(self.field_list(fields))),
        };
        let span = self.span_from(start);
        self.arena
            .signatures
            .alloc(ast::Signature { params, results }, span)
    }

    fn call(&mut self, callee: ast::CallCallee, args: &[ExprSketch]) -> ast::Expr {
        let l_paren = self.text("(");
        let args: Vec<_> = args.iter().map(|a| self.expr(a)).collect();
        let args = self.arena.alloc_list(args);
        let r_paren = self.text(")");
        ast::Expr::Call {
            callee,
            l_paren,
            args,
            ellipsis: None,
            r_paren,
        }
    }

    fn interface_elem(&mut self, e: &ElemSketch) -> ast::InterfaceElem {
        match e {
            ElemSketch::Method { doc, name, sig } => {
                let doc = self.comment_group(doc);
                let name = self.ident(name);
                let sig = self.signature(sig);
                ast::InterfaceElem::Method {
                    doc,
                    name: name.sym,
                    name_pos: name.pos,
                    sig,
                }
            }
            ElemSketch::Embedded(t) => ast::InterfaceElem::Embedded(self.ty(t)),
        }
    }

    fn field_list(&mut self, fields: &[FieldSketch]) -> FieldList {
        let l_paren = self.text("(");
        let ids: Vec<_> = fields.iter().map(|f| self.field(f)).collect();
        let fields = self.arena.alloc_list(ids);
        let r_paren = self.text(")");
        FieldList {
            l_paren,
            fields,
            r_paren,
        }
    }

    fn field(&mut self, f: &FieldSketch) -> ast::FieldId {
        let start = self.mark();
        let doc = self.comment_group(&f.doc);
        let names: Vec<_> = f.names.iter().map(|n| self.ident(n)).collect();
        let names = if names.is_empty() {
            ast::ListRef::EMPTY
        } else {
            self.arena.alloc_list(names)
        };
        let ellipsis_pos = f.variadic.then(|| self.text("..."));
        let typ = self.ty(&f.typ);
        let tag = f.tag.as_deref().map(|raw| ast::StringLit {
            raw: self.text(raw),
        });
        let comment = self.comment_group(&f.comment);
        let field = ast::Field {
            doc,
            names,
            ellipsis_pos,
            typ,
            tag,
            is_embed: f.embed,
            comment,
        };
        let span = self.span_from(start);
        self.arena.fields.alloc(field, span)
    }

    fn type_params(&mut self, params: &[FieldSketch]) -> Option<ast::TypeParamsId> {
        if params.is_empty() {
            return None;
        }
        let start = self.mark();
        let l_brack = self.text("[");
        let ids: Vec<_> = params.iter().map(|f| self.field(f)).collect();
        let params = self.arena.alloc_list(ids);
        let r_brack = self.text("]");
        let span = self.span_from(start);
        Some(self.arena.type_params.alloc(
            ast::TypeParams {
                l_brack,
                params,
                r_brack,
            },
            span,
        ))
    }

    fn gen_decl(
        &mut self,
        start: usize,
        kw_pos: Span,
        kind: GenDeclKind,
        doc: Option<CommentGroupId>,
        specs: Vec<ast::Spec>,
    ) -> &mut Self {
        let grouped = specs.len() != 1;
        let l_paren = grouped.then(|| Span::new(kw_pos.end as usize, kw_pos.end as usize));
        let r_paren = grouped.then(|| {
            let end = self.source.len();
            Span::new(end, end)
        });
        let specs = self.arena.alloc_list(specs);
        let decl = ast::Decl::Gen(ast::GenDecl {
            doc,
            kw_pos,
            kind,
            l_paren,
            specs,
            r_paren,
        });
        let span = self.span_from(start);
        let id = self.arena.decls.alloc(decl, span);
        self.decls.push(TopLevelDecl::Decl(id));
        self
    }

    fn comment_group(&mut self, lines: &[String]) -> Option<CommentGroupId> {
        if lines.is_empty() {
            return None;
        }
        let start = self.mark();
        let ids: Vec<_> = lines
            .iter()
            .map(|line| {
                let kind = if line.starts_with("/*") {
                    CommentKind::Block
                } else {
                    CommentKind::Line
                };
                let span = self.text(line);
                self.arena.comments.alloc(ast::Comment { kind }, span)
            })
            .collect();
        let comments = self.arena.alloc_list(ids);
        let span = self.span_from(start);
        Some(
            self.arena
                .comment_groups
                .alloc(ast::CommentGroup { comments }, span),
        )
    }

    fn ident(&mut self, name: &str) -> ast::IdentName {
        let pos = self.text(name);
        ast::IdentName {
            sym: self.interner.intern(name),
            pos,
        }
    }

    /// Appends `s` to the source buffer and returns its span.
    fn text(&mut self, s: &str) -> Span {
        let start = self.source.len();
        self.source.push_str(s);
        let span = Span::new(start, self.source.len());
        self.source.push('\n');
        span
    }

    #[inline]
    fn mark(&self) -> usize {
        self.source.len()
    }

    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.source.len())
    }
}

fn named(
    pkg: Option<ast::Ident>,
    pkg_pos: Option<Span>,
    name: ast::IdentName,
    args: ast::ListRef<TypeId>,
) -> ast::Type {
    ast::Type::Named {
        pkg,
        pkg_pos,
        name: name.sym,
        name_pos: name.pos,
        args,
    }
}

const fn unary_spelling(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Add => "+",
        UnaryOp::Sub => "-",
        UnaryOp::Not => "!",
        UnaryOp::Xor => "^",
        UnaryOp::Deref => "*",
        UnaryOp::Addr => "&",
        UnaryOp::Recv => "<-",
    }
}
