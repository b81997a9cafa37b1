use godecl::model::File;
use godecl::syntax::SyntaxTree;
use godecl::syntax::builder::{TreeBuilder, sketch::*};
use godecl::{Options, Parser};
use rayon::prelude::*;

/// Package `pkgN` with `N + 1` structs, each with one method.
fn package(n: usize) -> SyntaxTree {
    let mut b = TreeBuilder::new(&format!("pkg{n}"));
    b.imports(&[], [import("context")]);
    for i in 0..=n {
        let s = format!("S{i}");
        b.types(
            &[],
            [type_spec(
                &s,
                structure(vec![
                    field(&["ID"], name("int64")).tag(r#"`json:"id"`"#),
                    field(&["Ctx"], qual("context", "Context")),
                ]),
            )],
        );
        b.func(
            func("Run", sig(vec![field(&["n"], name("int"))]).returns(name("error")))
                .receiver(field(&["s"], ptr(name(&s)))),
        );
    }
    b.finish()
}

fn parse(n: usize) -> File {
    Parser::new(Options::default())
        .with_package_path(format!("example.com/pkg{n}"))
        .parse(&package(n))
        .unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let sequential: Vec<File> = (0..64).map(parse).collect();
    let parallel: Vec<File> = (0..64).into_par_iter().map(parse).collect();
    assert_eq!(parallel, sequential);

    let last = &parallel[63];
    assert_eq!(last.structures.len(), 64);
    assert_eq!(last.methods.len(), 64);
    assert!(last.structures.iter().all(|s| s.methods.len() == 1));
}
