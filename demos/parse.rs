//! Builds a small `geometry` package and prints its declarations as JSON.
//!
//! ```text
//! cargo run --example parse -- [options.toml]
//! ```

use godecl::syntax::builder::{TreeBuilder, sketch::*};
use godecl::{Options, Parser};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("{path}: {e}");
                std::process::exit(2);
            });
            Options::from_toml_str(&text).unwrap_or_else(|e| {
                eprintln!("{path}: {e}");
                std::process::exit(2);
            })
        }
        None => Options::default(),
    };

    let mut b = TreeBuilder::new("geometry");
    b.file_doc(&["// Package geometry has points."]);
    b.imports(&[], [import("encoding/json"), import("math")]);
    b.types(
        &["// Point is a position in the plane."],
        [type_spec(
            "Point",
            structure(vec![
                field(&["X", "Y"], name("float64")).tag(r#"`json:"x"`"#),
                field(&["Raw"], qual("json", "RawMessage")).tag(r#"`json:"raw,omitempty"`"#),
            ]),
        )],
    );
    b.func(
        func("Abs", sig(vec![]).returns(name("float64")))
            .receiver(field(&["p"], name("Point")))
            .doc(&["// Abs returns the distance to the origin."]),
    );
    b.func(func("Scale", sig(vec![field(&["f"], name("float64"))])).receiver(field(&["p"], ptr(name("Point")))));
    let tree = b.finish();

    let parser = Parser::new(options).with_package_path("example.com/geometry");
    match parser.parse(&tree) {
        Ok(file) => match serde_json::to_string_pretty(&file) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("encode failed: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("parse failed: {e}");
            std::process::exit(1);
        }
    }
}
