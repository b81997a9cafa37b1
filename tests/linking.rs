mod fixtures;

use godecl::model::MethodRef;
use godecl::syntax::SyntaxTree;
use godecl::syntax::builder::{TreeBuilder, TypeSketch, sketch::*};
use godecl::{Options, Parser, linker};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn method_on(b: &mut TreeBuilder, name: &str, recv: TypeSketch) {
    b.func(func(name, sig(vec![])).receiver(field(&["r"], recv)));
}

/// Struct `Foo`, type `Bar` and methods over assorted receiver shapes.
fn receivers() -> SyntaxTree {
    let mut b = TreeBuilder::new("p");
    b.imports(&[], [import("io")]);
    b.types(&[], [type_spec("Foo", structure(vec![]))]);
    b.types(&[], [type_spec("Bar", name("int"))]);
    method_on(&mut b, "Ptr", ptr(name("Foo")));
    method_on(&mut b, "Value", name("Foo"));
    method_on(&mut b, "Slice", slice(name("Foo")));
    method_on(&mut b, "Map", map(name("string"), name("Foo")));
    method_on(&mut b, "Double", ptr(ptr(name("Foo"))));
    method_on(&mut b, "OnBar", ptr(name("Bar")));
    method_on(&mut b, "Elsewhere", name("Baz"));
    method_on(&mut b, "Qualified", qual("io", "Foo"));
    b.finish()
}

#[test]
fn links_common_receivers() {
    init_tracing();
    let (file, report) = Parser::new(Options::default())
        .parse_with_report(&receivers())
        .unwrap();

    let foo: Vec<_> = file.methods_of_struct("Foo").iter().map(|m| m.name.as_str()).collect();
    assert_eq!(foo, ["Ptr", "Value"]);
    let bar: Vec<_> = file.methods_of_type("Bar").iter().map(|m| m.name.as_str()).collect();
    assert_eq!(bar, ["OnBar"]);

    assert_eq!(report.linked, 3);
    assert_eq!(
        report.uncommon,
        [MethodRef(2), MethodRef(3), MethodRef(4), MethodRef(7)]
    );
    assert_eq!(report.unmatched, [MethodRef(6)]);
}

#[test]
fn unlinked_methods_stay_in_file() {
    let file = Parser::new(Options::default()).parse(&receivers()).unwrap();
    assert_eq!(file.methods.len(), 8);
    let slice = &file.methods[2];
    assert_eq!(slice.to_string(), "func (r []Foo) Slice()");
    let linked: Vec<_> = file.structures[0].methods.iter().map(|r| r.0).collect();
    assert!(!linked.contains(&2));
    assert!(!linked.contains(&3));
}

#[test]
fn struct_wins_over_type_of_same_name() {
    let mut b = TreeBuilder::new("p");
    b.types(&[], [type_spec("T", name("int"))]);
    b.types(&[], [type_spec("T", structure(vec![]))]);
    method_on(&mut b, "M", name("T"));
    let file = Parser::new(Options::default()).parse(&b.finish()).unwrap();
    assert_eq!(file.structures[0].methods, [MethodRef(0)]);
    assert!(file.types[0].methods.is_empty());
}

#[test]
fn linking_runs_once_over_walked_file() {
    let mut file = Parser::new(Options::default())
        .parse(&fixtures::geometry())
        .unwrap();
    assert_eq!(file.structure("Point").unwrap().methods.len(), 2);
    assert_eq!(file.file_type("Meters").unwrap().methods, [MethodRef(2)]);

    // Re-linking a cleared file restores the same references.
    for s in &mut file.structures {
        s.methods.clear();
    }
    for t in &mut file.types {
        t.methods.clear();
    }
    let report = linker::link(&mut file);
    assert_eq!(report.linked, 3);
    assert_eq!(file.structure("Point").unwrap().methods, [MethodRef(0), MethodRef(1)]);
}

#[test]
fn ignored_methods_are_not_linked() {
    let opts = Options {
        ignore_methods: true,
        ..Options::default()
    };
    let (file, report) = Parser::new(opts)
        .parse_with_report(&fixtures::geometry())
        .unwrap();
    assert!(file.methods.is_empty());
    assert!(file.structure("Point").unwrap().methods.is_empty());
    assert_eq!(report, Default::default());
}

#[test]
fn methods_without_owner_in_ignored_structs() {
    let opts = Options {
        ignore_structs: true,
        ..Options::default()
    };
    let (file, report) = Parser::new(opts)
        .parse_with_report(&fixtures::geometry())
        .unwrap();
    assert_eq!(file.methods.len(), 3);
    assert_eq!(report.unmatched, [MethodRef(0), MethodRef(1)]);
    assert_eq!(report.linked, 1);
}
