//! Top-level declaration walk: builds a [`File`] from a syntax tree.

use std::collections::{BTreeMap, HashSet};

use godecl_syntax::SyntaxTree;
use godecl_syntax::ast::{
    self, CallCallee, Expr, ExprId, GenDecl, GenDeclKind, Spec, TypeSpec, UnaryOp, ValueSpec,
};
use godecl_syntax::walk::{self, DeclVisitor};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{File, FileType, Interface, Method, Struct, StructField, TagValue, Variable};
use crate::options::Options;
use crate::resolve::TypeResolver;
use crate::tags;

/// Dispatches every top-level declaration to the matching builder.
///
/// Produces the file without imports and without method links; see
/// [`crate::Parser`] for the full pipeline.
pub struct DeclarationWalker<'a> {
    tree: &'a SyntaxTree,
    options: &'a Options,
    resolver: TypeResolver<'a>,
    file: File,
}

impl<'a> DeclarationWalker<'a> {
    pub fn new(tree: &'a SyntaxTree, resolver: TypeResolver<'a>, options: &'a Options) -> Self {
        let file = File {
            name: tree.package_name().to_string(),
            docs: resolver.docs(tree.root.doc),
            ..File::default()
        };
        Self {
            tree,
            options,
            resolver,
            file,
        }
    }

    pub fn walk(mut self) -> Result<File> {
        let tree = self.tree;
        walk::walk_decls(tree, &mut self)?;
        Ok(self.file)
    }

    /// Variables of one const/var block; names must be unique within it.
    fn values(&self, decl: &GenDecl) -> Result<Vec<Variable>> {
        let tree = self.tree;
        let arena = &tree.arena;
        let specs = arena.list(decl.specs);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        // Constant specs without type and values repeat the previous spec.
        let mut previous: Option<ValueSpec> = None;
        for spec in specs {
            let Spec::Value(spec) = spec else {
                return Err(unexpected_spec(decl));
            };
            let doc = decl.spec_doc(spec.doc);
            let source = match previous {
                Some(prev)
                    if decl.kind == GenDeclKind::Const
                        && spec.typ.is_none()
                        && spec.values.is_empty() =>
                {
                    prev
                }
                _ => *spec,
            };
            previous = Some(source);

            let names = arena.list(spec.names);
            let values = arena.list(source.values);
            check_value_count(tree, names, values)?;

            let declared = source.typ.map(|t| self.resolver.resolve(t)).transpose()?;
            let docs = self.resolver.docs(doc);
            for (i, n) in names.iter().enumerate() {
                let name = tree.name(n.sym);
                if name != "_" && !seen.insert(name) {
                    return Err(Error::structural(format!("duplicate name `{name}`"), n.pos));
                }
                let ty = match &declared {
                    Some(ty) => Some(ty.clone()),
                    None if values.len() == names.len() => self.resolver.infer(values[i])?,
                    None => None,
                };
                out.push(Variable {
                    name: name.to_string(),
                    docs: docs.clone(),
                    ty,
                });
            }
        }
        Ok(out)
    }

    fn type_spec(&mut self, spec: &TypeSpec, doc: Option<ast::CommentGroupId>) -> Result<()> {
        let tree = self.tree;
        let arena = &tree.arena;
        let name = tree.name(spec.name).to_string();
        let mut underlying = spec.typ;
        while let ast::Type::Paren { typ, .. } = arena.types[underlying] {
            underlying = typ;
        }

        match arena.types[underlying] {
            ast::Type::Interface { elems, .. } => {
                if self.options.ignore_interfaces {
                    debug!(%name, "skipping interface");
                    return Ok(());
                }
                reject_type_params(spec)?;
                let (methods, embedded) = self.resolver.resolve_interface(elems)?;
                trace!(%name, methods = methods.len(), "interface");
                self.file.interfaces.push(Interface {
                    name,
                    docs: self.resolver.docs(doc),
                    methods,
                    embedded,
                });
            }
            ast::Type::Struct { fields, .. } => {
                if self.options.ignore_structs {
                    debug!(%name, "skipping struct");
                    return Ok(());
                }
                reject_type_params(spec)?;
                let fields = self.struct_fields(fields)?;
                trace!(%name, fields = fields.len(), "struct");
                self.file.structures.push(Struct {
                    name,
                    docs: self.resolver.docs(doc),
                    fields,
                    methods: Vec::new(),
                });
            }
            _ => {
                if self.options.ignore_types {
                    debug!(%name, "skipping type");
                    return Ok(());
                }
                reject_type_params(spec)?;
                let ty = self.resolver.resolve(spec.typ)?;
                trace!(%name, %ty, "type");
                self.file.types.push(FileType {
                    name,
                    docs: self.resolver.docs(doc),
                    ty,
                    alias: spec.alias,
                    methods: Vec::new(),
                });
            }
        }
        Ok(())
    }

    fn struct_fields(&self, list: ast::ListRef<ast::FieldId>) -> Result<Vec<StructField>> {
        let tree = self.tree;
        let arena = &tree.arena;
        let mut out = Vec::new();
        for &id in arena.list(list) {
            let field = &arena.fields[id];
            let (tags, raw_tags) = match field.tag {
                Some(tag) => {
                    let raw = tree.text(tag.raw);
                    (decode_tags(raw), Some(raw.to_string()))
                }
                None => (BTreeMap::new(), None),
            };
            let vars = self.resolver.resolve_field(field)?;
            out.extend(vars.into_iter().map(|variable| StructField {
                variable,
                tags: tags.clone(),
                raw_tags: raw_tags.clone(),
            }));
        }
        Ok(out)
    }

    fn func_decl(&mut self, func: &ast::FuncDecl) -> Result<()> {
        let tree = self.tree;
        let name = tree.name(func.name);
        trace!(name, method = func.recv.is_some(), "func");

        let Some(recv) = func.recv else {
            if self.options.ignore_functions {
                debug!(name, "skipping function");
                return Ok(());
            }
            reject_func_type_params(func)?;
            let function = self.resolver.resolve_function(name, func.doc, func.signature)?;
            self.file.functions.push(function);
            return Ok(());
        };

        if self.options.ignore_methods {
            debug!(name, "skipping method");
            return Ok(());
        }
        reject_func_type_params(func)?;
        let mut receivers = self
            .resolver
            .without_current()
            .resolve_fields(recv.fields)?
            .into_iter();
        let Some(receiver) = receivers.next() else {
            return Err(Error::ReceiverNotFound {
                method: name.to_string(),
                span: func.name_pos,
            });
        };
        if receivers.len() > 0 {
            debug!(name, extra = receivers.len(), "ignoring extra receivers");
        }
        let function = self.resolver.resolve_function(name, func.doc, func.signature)?;
        self.file.methods.push(Method { function, receiver });
        Ok(())
    }
}

impl<'a> DeclVisitor<'a> for DeclarationWalker<'a> {
    type Error = Error;

    fn visit_gen_decl(&mut self, tree: &'a SyntaxTree, decl: &'a GenDecl) -> Result<()> {
        trace!(kind = decl.kind.keyword(), specs = decl.specs.len(), "declaration");
        match decl.kind {
            // Collected up front by the import table.
            GenDeclKind::Import => Ok(()),
            GenDeclKind::Const if self.options.ignore_constants => {
                debug!("skipping const declaration");
                Ok(())
            }
            GenDeclKind::Var if self.options.ignore_variables => {
                debug!("skipping var declaration");
                Ok(())
            }
            GenDeclKind::Const => {
                let consts = self.values(decl)?;
                self.file.constants.extend(consts);
                Ok(())
            }
            GenDeclKind::Var => {
                let vars = self.values(decl)?;
                self.file.vars.extend(vars);
                Ok(())
            }
            GenDeclKind::Type => walk::walk_specs(self, tree, decl),
        }
    }

    fn visit_type_spec(&mut self, _: &'a SyntaxTree, decl: &'a GenDecl, spec: &'a TypeSpec) -> Result<()> {
        self.type_spec(spec, decl.spec_doc(spec.doc))
    }

    fn visit_import(&mut self, _: &'a SyntaxTree, decl: &'a GenDecl, _: &'a ast::ImportSpec) -> Result<()> {
        Err(unexpected_spec(decl))
    }

    fn visit_value(&mut self, _: &'a SyntaxTree, decl: &'a GenDecl, _: &'a ValueSpec) -> Result<()> {
        Err(unexpected_spec(decl))
    }

    fn visit_func_decl(&mut self, _: &'a SyntaxTree, func: &'a ast::FuncDecl) -> Result<()> {
        self.func_decl(func)
    }

    fn visit_bad_decl(&mut self, _: &'a SyntaxTree, span: ast::Span) -> Result<()> {
        Err(Error::structural("unparsable declaration", span))
    }
}

/// Name/value count rule: no values, one value per name, or a single
/// multi-value expression (call, index, type assertion, receive) for
/// several names.
fn check_value_count(tree: &SyntaxTree, names: &[ast::IdentName], values: &[ExprId]) -> Result<()> {
    let ok = match values {
        [] => true,
        _ if values.len() == names.len() => true,
        [single] => names.len() > 1 && is_multi_value(tree, *single),
        _ => false,
    };
    if ok {
        return Ok(());
    }
    let span = match (names.first(), names.last()) {
        (Some(first), Some(last)) => first.pos.cover(last.pos),
        _ => ast::Span::default(),
    };
    Err(Error::structural(
        format!("{} names but {} values", names.len(), values.len()),
        span,
    ))
}

fn is_multi_value(tree: &SyntaxTree, e: ExprId) -> bool {
    match tree.arena.exprs[e] {
        Expr::Call {
            callee: CallCallee::Expr(_),
            ..
        }
        | Expr::Index { .. }
        | Expr::TypeAssert { .. }
        | Expr::Unary {
            op: UnaryOp::Recv, ..
        } => true,
        Expr::Paren { expr, .. } => is_multi_value(tree, expr),
        _ => false,
    }
}

/// Decoded tag keyed by tag key; the first of duplicated keys wins. A
/// malformed tag decodes to nothing.
fn decode_tags(raw: &str) -> BTreeMap<String, TagValue> {
    let mut out = BTreeMap::new();
    match tags::parse_literal(raw) {
        Ok(parsed) => {
            for tag in parsed.tags {
                out.entry(tag.key).or_insert(TagValue {
                    name: tag.name,
                    options: tag.options,
                });
            }
        }
        Err(err) => debug!(raw, %err, "malformed struct tag"),
    }
    out
}

fn reject_type_params(spec: &TypeSpec) -> Result<()> {
    match spec.type_params {
        Some(_) => Err(Error::unsupported("type parameters", spec.name_pos)),
        None => Ok(()),
    }
}

fn reject_func_type_params(func: &ast::FuncDecl) -> Result<()> {
    match func.type_params {
        Some(_) => Err(Error::unsupported("type parameters", func.name_pos)),
        None => Ok(()),
    }
}

fn unexpected_spec(decl: &GenDecl) -> Error {
    Error::structural(
        format!("unexpected spec in {} declaration", decl.kind.keyword()),
        decl.kw_pos,
    )
}
