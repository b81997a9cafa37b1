#![allow(dead_code)]

use godecl::syntax::SyntaxTree;
use godecl::syntax::builder::{TreeBuilder, sketch::*};

/// ```go
/// package test
///
/// // import comment
/// import (
///     "io"
///     "strings"
/// )
///
/// var (
///     x, y = 5, strings.Reader{}
///     z    strings.Reader
///     u    = x
///     m    map[string]io.Writer
/// )
///
/// // comment
/// const l = "l"
///
/// // interface docs
/// type StringService interface {
///     Get(a, b []*string, _ error) (int, int) // inline comment
///     Post()
/// }
///
/// type StringServices interface {
///     Get(a, b []*string, _ error) (i, j int, writer io.Writer)
/// }
///
/// type OMG struct {
///     i string `json:"i,j"xml:"i,k"gorm:"dasdas,f"`
///     j []int
/// }
///
/// func yy(x ...[]*[]*map[*[]interface{ Null() }]map[*int][][]****int64) {}
/// ```
pub fn service() -> SyntaxTree {
    let mut b = TreeBuilder::new("test");
    b.imports(&["// import comment"], [import("io"), import("strings")]);
    b.vars(
        &[],
        [
            value(&["x", "y"]).values(vec![int("5"), composite(qual("strings", "Reader"))]),
            value(&["z"]).typed(qual("strings", "Reader")),
            value(&["u"]).values(vec![ident("x")]),
            value(&["m"]).typed(map(name("string"), qual("io", "Writer"))),
        ],
    );
    b.consts(&["// comment"], [value(&["l"]).values(vec![string("\"l\"")])]);

    let get_args = || {
        vec![
            field(&["a", "b"], slice(ptr(name("string")))),
            field(&["_"], name("error")),
        ]
    };
    b.types(
        &["// interface docs"],
        [type_spec(
            "StringService",
            iface(vec![
                documented_method(
                    &["// inline comment"],
                    "Get",
                    sig(get_args()).results(vec![anon(name("int")), anon(name("int"))]),
                ),
                method("Post", sig(vec![])),
            ]),
        )],
    );
    b.types(
        &[],
        [type_spec(
            "StringServices",
            iface(vec![method(
                "Get",
                sig(get_args()).results(vec![
                    field(&["i", "j"], name("int")),
                    field(&["writer"], qual("io", "Writer")),
                ]),
            )]),
        )],
    );
    b.types(
        &[],
        [type_spec(
            "OMG",
            structure(vec![
                field(&["i"], name("string")).tag(r#"`json:"i,j"xml:"i,k"gorm:"dasdas,f"`"#),
                field(&["j"], slice(name("int"))),
            ]),
        )],
    );

    let null_iface = iface(vec![method("Null", sig(vec![]))]);
    let yy_param = slice(ptr(slice(ptr(map(
        ptr(slice(null_iface)),
        map(
            ptr(name("int")),
            slice(slice(ptr(ptr(ptr(ptr(name("int64"))))))),
        ),
    )))));
    b.func(func("yy", sig(vec![field(&["x"], yy_param).variadic()])));
    b.finish()
}

/// `geometry` package with a struct, a defined type and methods on both.
pub fn geometry() -> SyntaxTree {
    let mut b = TreeBuilder::new("geometry");
    b.file_doc(&["// Package geometry has shapes."]);
    b.imports(&[], [import("math")]);
    b.types(
        &["// Point is a position."],
        [type_spec(
            "Point",
            structure(vec![
                field(&["X", "Y"], name("float64")).tag(r#"`json:"x"`"#),
                field(&["Label"], name("string"))
                    .tag(r#"`json:"label,omitempty" yaml:"label"`"#)
                    .comment(&["// optional"]),
            ]),
        )],
    );
    b.types(&[], [type_spec("Meters", name("float64"))]);
    b.func(
        func("Abs", sig(vec![]).returns(name("float64")))
            .receiver(field(&["p"], name("Point")))
            .doc(&["// Abs returns the distance to the origin."]),
    );
    b.func(
        func("Scale", sig(vec![field(&["f"], name("float64"))]))
            .receiver(field(&["p"], ptr(name("Point")))),
    );
    b.func(
        func("Feet", sig(vec![]).returns(name("float64"))).receiver(field(&["m"], name("Meters"))),
    );
    b.func(func(
        "Distance",
        sig(vec![field(&["a", "b"], name("Point"))]).returns(name("float64")),
    ));
    b.func(func("Sqrt", sig(vec![field(&["x"], name("float64"))]).returns(name("float64"))).external());
    b.finish()
}
