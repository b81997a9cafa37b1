use godecl_syntax::SyntaxTree;
use godecl_syntax::ast::{FuncDecl, GenDecl, GenDeclKind, ImportSpec, Span, TypeSpec, ValueSpec};
use godecl_syntax::builder::{TreeBuilder, sketch::*};
use godecl_syntax::walk::{self, DeclVisitor};

#[derive(Default)]
struct Counter {
    imports: usize,
    values: usize,
    types: Vec<String>,
    funcs: Vec<String>,
    bad: usize,
}

impl<'t> DeclVisitor<'t> for Counter {
    type Error = ();

    fn visit_import(&mut self, _: &'t SyntaxTree, _: &'t GenDecl, _: &'t ImportSpec) -> Result<(), ()> {
        self.imports += 1;
        Ok(())
    }

    fn visit_value(&mut self, _: &'t SyntaxTree, _: &'t GenDecl, _: &'t ValueSpec) -> Result<(), ()> {
        self.values += 1;
        Ok(())
    }

    fn visit_type_spec(&mut self, tree: &'t SyntaxTree, _: &'t GenDecl, spec: &'t TypeSpec) -> Result<(), ()> {
        self.types.push(tree.name(spec.name).to_string());
        Ok(())
    }

    fn visit_func_decl(&mut self, tree: &'t SyntaxTree, func: &'t FuncDecl) -> Result<(), ()> {
        self.funcs.push(tree.name(func.name).to_string());
        Ok(())
    }

    fn visit_bad_decl(&mut self, _: &'t SyntaxTree, _: Span) -> Result<(), ()> {
        self.bad += 1;
        Ok(())
    }
}

#[test]
fn visits_specs_and_funcs_in_order() {
    let mut b = TreeBuilder::new("p");
    b.imports(&[], [import("fmt"), import("io")]);
    b.vars(&[], [value(&["a", "b"]).typed(name("int")), value(&["c"]).typed(name("string"))]);
    b.types(&[], [type_spec("A", name("int")), type_spec("B", structure(vec![]))]);
    b.func(func("F", sig(vec![])));
    b.bad_decl();
    b.func(func("M", sig(vec![])).receiver(field(&["a"], name("A"))));
    let tree = b.finish();

    let mut counter = Counter::default();
    walk::walk_decls(&tree, &mut counter).unwrap();

    assert_eq!(counter.imports, 2);
    // Specs, not names.
    assert_eq!(counter.values, 2);
    assert_eq!(counter.types, ["A", "B"]);
    assert_eq!(counter.funcs, ["F", "M"]);
    assert_eq!(counter.bad, 1);
}

/// Stops at the first type spec it sees; collects import paths only.
#[derive(Default)]
struct ImportsOnly {
    paths: Vec<String>,
    funcs: usize,
}

impl<'t> DeclVisitor<'t> for ImportsOnly {
    type Error = String;

    fn visit_gen_decl(&mut self, tree: &'t SyntaxTree, decl: &'t GenDecl) -> Result<(), String> {
        match decl.kind {
            GenDeclKind::Import | GenDeclKind::Type => walk::walk_specs(self, tree, decl),
            GenDeclKind::Const | GenDeclKind::Var => Ok(()),
        }
    }

    fn visit_import(&mut self, tree: &'t SyntaxTree, _: &'t GenDecl, spec: &'t ImportSpec) -> Result<(), String> {
        self.paths.push(tree.text(spec.path.raw).to_string());
        Ok(())
    }

    fn visit_value(&mut self, _: &'t SyntaxTree, _: &'t GenDecl, _: &'t ValueSpec) -> Result<(), String> {
        Err("value spec".to_string())
    }

    fn visit_type_spec(&mut self, tree: &'t SyntaxTree, _: &'t GenDecl, spec: &'t TypeSpec) -> Result<(), String> {
        Err(format!("type {}", tree.name(spec.name)))
    }

    fn visit_func_decl(&mut self, _: &'t SyntaxTree, _: &'t FuncDecl) -> Result<(), String> {
        self.funcs += 1;
        Ok(())
    }
}

#[test]
fn overridden_gen_decl_filters_and_first_error_stops() {
    let mut b = TreeBuilder::new("p");
    b.imports(&[], [import("fmt")]);
    b.consts(&[], [value(&["N"]).values(vec![int("1")])]);
    b.func(func("Before", sig(vec![])));
    b.types(&[], [type_spec("T", name("int")), type_spec("U", name("int"))]);
    b.imports(&[], [import("os")]);
    b.func(func("After", sig(vec![])));
    let tree = b.finish();

    let mut v = ImportsOnly::default();
    let err = walk::walk_decls(&tree, &mut v).unwrap_err();
    assert_eq!(err, "type T");
    assert_eq!(v.paths, ["\"fmt\""]);
    assert_eq!(v.funcs, 1);
}
