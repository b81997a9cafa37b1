//! Import declarations and package qualifier resolution.

use std::collections::HashSet;

use godecl_syntax::SyntaxTree;
use godecl_syntax::ast::{GenDecl, GenDeclKind, ImportName, ImportSpec, Span, TypeSpec, ValueSpec};
use godecl_syntax::walk::{self, DeclVisitor};
use tracing::trace;

use crate::error::{Error, Result};
use crate::lit;
use crate::model::{Import, builtin};

/// Alias an import is referred to by: the explicit name if given, else the
/// last path segment. A derived alias that collides with a predeclared
/// identifier gets a `_` prefix.
pub fn alias_for(name: Option<&str>, path: &str) -> String {
    if let Some(name) = name {
        return name.to_string();
    }
    let base = path_base(path);
    if builtin::is_reserved(base) {
        format!("_{base}")
    } else {
        base.to_string()
    }
}

/// Last `/`-separated segment of an import path.
fn path_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Every import of one file, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    imports: Vec<Import>,
}

impl ImportTable {
    /// Collects all import declarations of `tree`; multiple blocks accumulate.
    ///
    /// Two imports sharing an alias are rejected, except for `_` and `.`.
    pub fn collect(tree: &SyntaxTree, keep_docs: bool) -> Result<Self> {
        let mut collector = ImportCollector {
            keep_docs,
            table: ImportTable::default(),
            seen: HashSet::new(),
        };
        walk::walk_decls(tree, &mut collector)?;
        Ok(collector.table)
    }

    pub fn from_imports(imports: Vec<Import>) -> Self {
        Self { imports }
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn into_imports(self) -> Vec<Import> {
        self.imports
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Exact alias match first, then a match on the last segment of each
    /// import path.
    pub fn resolve(&self, alias: &str) -> Option<&Import> {
        self.imports
            .iter()
            .find(|imp| imp.alias == alias)
            .or_else(|| self.imports.iter().find(|imp| path_base(&imp.package) == alias))
    }

    /// Like [`resolve`](Self::resolve), but fails with `UnresolvedImport`
    /// unless `allow_any` tolerates the miss with `None`.
    pub fn lookup(&self, alias: &str, span: Span, allow_any: bool) -> Result<Option<Import>> {
        match self.resolve(alias) {
            Some(imp) => Ok(Some(imp.clone())),
            None if allow_any => {
                trace!(alias, "tolerating unknown import alias");
                Ok(None)
            }
            None => Err(Error::UnresolvedImport {
                alias: alias.to_string(),
                span,
            }),
        }
    }
}

struct ImportCollector {
    keep_docs: bool,
    table: ImportTable,
    seen: HashSet<String>,
}

impl<'t> DeclVisitor<'t> for ImportCollector {
    type Error = Error;

    fn visit_gen_decl(&mut self, tree: &'t SyntaxTree, decl: &'t GenDecl) -> Result<()> {
        if decl.kind != GenDeclKind::Import {
            return Ok(());
        }
        walk::walk_specs(self, tree, decl)
    }

    fn visit_import(&mut self, tree: &'t SyntaxTree, decl: &'t GenDecl, spec: &'t ImportSpec) -> Result<()> {
        let raw = tree.text(spec.path.raw);
        let path = lit::unquote(raw).ok_or_else(|| {
            Error::structural(format!("malformed import path {raw}"), spec.path.raw)
        })?;

        let (name, name_pos) = match spec.name {
            None => (None, spec.path.raw),
            Some(ImportName::Dot(pos)) => (Some("."), pos),
            Some(ImportName::Blank(pos)) => (Some("_"), pos),
            Some(ImportName::Name(sym, pos)) => (Some(tree.name(sym)), pos),
        };
        let alias = alias_for(name, &path);
        if alias != "_" && alias != "." && !self.seen.insert(alias.clone()) {
            return Err(Error::structural(
                format!("import alias `{alias}` is not unique"),
                name_pos,
            ));
        }

        let docs = if self.keep_docs {
            tree.comment_lines(decl.spec_doc(spec.doc))
        } else {
            Vec::new()
        };
        trace!(%alias, %path, "import");
        self.table.imports.push(Import {
            alias,
            package: path,
            docs,
        });
        Ok(())
    }

    fn visit_value(&mut self, _: &'t SyntaxTree, decl: &'t GenDecl, _: &'t ValueSpec) -> Result<()> {
        Err(non_import_spec(decl))
    }

    fn visit_type_spec(&mut self, _: &'t SyntaxTree, decl: &'t GenDecl, _: &'t TypeSpec) -> Result<()> {
        Err(non_import_spec(decl))
    }
}

fn non_import_spec(decl: &GenDecl) -> Error {
    Error::structural("non-import spec in import declaration", decl.kw_pos)
}
