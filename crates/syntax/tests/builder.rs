use godecl_syntax::ast::{ArrayLen, Decl, Expr, GenDeclKind, Spec, TopLevelDecl, Type};
use godecl_syntax::builder::{TreeBuilder, sketch::*};

#[test]
fn package_clause_and_file_doc() {
    let mut b = TreeBuilder::new("geometry");
    b.file_doc(&["// Package geometry.", "/* More. */"]);
    let tree = b.finish();
    assert_eq!(tree.package_name(), "geometry");
    assert_eq!(tree.text(tree.root.package_pos), "package");
    assert_eq!(
        tree.comment_lines(tree.root.doc),
        ["// Package geometry.", "/* More. */"]
    );
    assert!(tree.comment_lines(None).is_empty());
}

#[test]
fn single_spec_blocks_are_not_grouped() {
    let mut b = TreeBuilder::new("p");
    b.imports(&[], [import("io")]);
    b.imports(&[], [import("fmt"), import("os").named("system")]);
    b.vars(&[], []);
    let tree = b.finish();

    let grouped: Vec<_> = tree
        .arena
        .list(tree.root.decls)
        .iter()
        .map(|d| match d {
            TopLevelDecl::Decl(id) => match &tree.arena.decls[*id] {
                Decl::Gen(g) => (g.kind, g.l_paren.is_some(), g.r_paren.is_some()),
                Decl::Bad(_) => panic!("unexpected bad decl"),
            },
            TopLevelDecl::Func(_) => panic!("unexpected func"),
        })
        .collect();
    assert_eq!(
        grouped,
        [
            (GenDeclKind::Import, false, false),
            (GenDeclKind::Import, true, true),
            (GenDeclKind::Var, true, true),
        ]
    );
}

#[test]
fn literal_spans_point_into_source() {
    let mut b = TreeBuilder::new("p");
    b.imports(&[], [import("net/http")]);
    b.types(
        &[],
        [type_spec(
            "T",
            structure(vec![field(&["A"], name("int")).tag(r#"`json:"a"`"#)]),
        )],
    );
    let tree = b.finish();
    let decls = tree.arena.list(tree.root.decls);

    let TopLevelDecl::Decl(imports) = decls[0] else {
        panic!("expected import decl");
    };
    let Decl::Gen(g) = &tree.arena.decls[imports] else {
        panic!("expected gen decl");
    };
    assert_eq!(tree.text(g.kw_pos), "import");
    let Spec::Import(spec) = tree.arena.list(g.specs)[0] else {
        panic!("expected import spec");
    };
    assert_eq!(tree.text(spec.path.raw), "\"net/http\"");

    let TopLevelDecl::Decl(types) = decls[1] else {
        panic!("expected type decl");
    };
    let Decl::Gen(g) = &tree.arena.decls[types] else {
        panic!("expected gen decl");
    };
    let Spec::Type(spec) = tree.arena.list(g.specs)[0] else {
        panic!("expected type spec");
    };
    assert_eq!(tree.name(spec.name), "T");
    assert_eq!(tree.text(spec.name_pos), "T");
    let Type::Struct { fields, .. } = tree.arena.types[spec.typ] else {
        panic!("expected struct");
    };
    let field = &tree.arena.fields[tree.arena.list(fields)[0]];
    assert_eq!(tree.text(field.tag.unwrap().raw), r#"`json:"a"`"#);
}

#[test]
fn out_of_range_span_reads_empty() {
    let tree = TreeBuilder::new("p").finish();
    let past = godecl_syntax::ast::Span::new(tree.source.len() + 10, tree.source.len() + 12);
    assert_eq!(tree.text(past), "");
}

#[test]
fn lowering_shares_one_interner() {
    let mut b = TreeBuilder::new("p");
    let first = b.ty(&name("Reader"));
    let second = b.ty(&ptr(name("Reader")));
    let tree = b.finish();

    let Type::Named { name: a, .. } = tree.arena.types[first] else {
        panic!("expected named type");
    };
    let Type::Pointer { elem, star_pos } = tree.arena.types[second] else {
        panic!("expected pointer");
    };
    let Type::Named { name: b, .. } = tree.arena.types[elem] else {
        panic!("expected named type");
    };
    assert_eq!(a, b);
    assert_eq!(tree.name(a), "Reader");
    assert_eq!(tree.text(star_pos), "*");
}

#[test]
fn array_lengths_nest_types_and_expressions() {
    let mut b = TreeBuilder::new("p");
    // [len([2]int{})][...]string
    let nested = array_len(
        call(ident("len"), vec![composite(array(2, name("int")))]),
        ellipsis_array(name("string")),
    );
    let outer = b.ty(&nested);
    let tree = b.finish();

    let Type::Array { len, elem, .. } = tree.arena.types[outer] else {
        panic!("expected array");
    };
    let ArrayLen::Expr(call) = len else {
        panic!("expected length expression");
    };
    let Expr::Call { args, .. } = tree.arena.exprs[call] else {
        panic!("expected call");
    };
    let Expr::CompositeLit { typ: Some(inner), .. } = tree.arena.exprs[tree.arena.list(args)[0]] else {
        panic!("expected typed composite literal");
    };
    let Type::Array { len: ArrayLen::Expr(two), .. } = tree.arena.types[inner] else {
        panic!("expected fixed array");
    };
    let Expr::BasicLit(lit) = tree.arena.exprs[two] else {
        panic!("expected literal length");
    };
    assert_eq!(tree.text(lit.raw), "2");

    let Type::Array { len: ArrayLen::Ellipsis(dots), .. } = tree.arena.types[elem] else {
        panic!("expected [...] array");
    };
    assert_eq!(tree.text(dots), "...");
}
