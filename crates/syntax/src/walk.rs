use crate::ast::*;
use crate::tree::SyntaxTree;

/// Fallible traversal over the top-level declarations of a syntax tree.
///
/// `walk_decls` hands every declaration to the matching hook in source
/// order and stops at the first error. A `GenDecl` is split into its specs
/// by `walk_specs` unless `visit_gen_decl` is overridden; an override that
/// still wants the specs calls `walk_specs` itself.
pub trait DeclVisitor<'t> {
    type Error;

    fn visit_gen_decl(&mut self, tree: &'t SyntaxTree, decl: &'t GenDecl) -> Result<(), Self::Error> {
        walk_specs(self, tree, decl)
    }

    fn visit_import(
        &mut self,
        _tree: &'t SyntaxTree,
        _decl: &'t GenDecl,
        _spec: &'t ImportSpec,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_value(
        &mut self,
        _tree: &'t SyntaxTree,
        _decl: &'t GenDecl,
        _spec: &'t ValueSpec,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_type_spec(
        &mut self,
        _tree: &'t SyntaxTree,
        _decl: &'t GenDecl,
        _spec: &'t TypeSpec,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_func_decl(&mut self, _tree: &'t SyntaxTree, _func: &'t FuncDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_bad_decl(&mut self, _tree: &'t SyntaxTree, _span: Span) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Visits every top-level declaration of `tree` in source order.
pub fn walk_decls<'t, V>(tree: &'t SyntaxTree, v: &mut V) -> Result<(), V::Error>
where
    V: DeclVisitor<'t> + ?Sized,
{
    let a = &tree.arena;
    for top in a.list(tree.root.decls) {
        match *top {
            TopLevelDecl::Decl(id) => match &a.decls[id] {
                Decl::Gen(decl) => v.visit_gen_decl(tree, decl)?,
                Decl::Bad(span) => v.visit_bad_decl(tree, *span)?,
            },
            TopLevelDecl::Func(id) => v.visit_func_decl(tree, &a.funcs[id])?,
        }
    }
    Ok(())
}

/// Visits the specs of `decl` by shape, whatever the declaration keyword.
pub fn walk_specs<'t, V>(v: &mut V, tree: &'t SyntaxTree, decl: &'t GenDecl) -> Result<(), V::Error>
where
    V: DeclVisitor<'t> + ?Sized,
{
    for spec in tree.arena.list(decl.specs) {
        match spec {
            Spec::Import(s) => v.visit_import(tree, decl, s)?,
            Spec::Value(s) => v.visit_value(tree, decl, s)?,
            Spec::Type(s) => v.visit_type_spec(tree, decl, s)?,
        }
    }
    Ok(())
}
