mod fixtures;

use godecl::model::{ArrayLen, File, Type, Variable};
use godecl::syntax::builder::{TreeBuilder, sketch::*};
use godecl::{Options, parse_file};
use serde_json::json;

#[test]
fn empty_file_is_just_a_name() {
    let file = parse_file(&TreeBuilder::new("p").finish(), &Options::default()).unwrap();
    assert_eq!(serde_json::to_value(&file).unwrap(), json!({ "name": "p" }));
}

#[test]
fn type_chain_shape() {
    let ty = Type::pointer_to(Type::pointer_to(Type::array(
        ArrayLen::Fixed(3),
        Type::slice_of(Type::name("int")),
    )));
    assert_eq!(
        serde_json::to_value(&ty).unwrap(),
        json!({
            "kind": "pointer",
            "count": 2,
            "next": {
                "kind": "array",
                "len": { "fixed": 3 },
                "next": {
                    "kind": "array",
                    "len": "slice",
                    "next": { "kind": "name", "name": "int" }
                }
            }
        })
    );
}

#[test]
fn absent_pieces_are_omitted() {
    let untyped = Variable {
        name: "x".into(),
        ..Variable::default()
    };
    assert_eq!(serde_json::to_value(&untyped).unwrap(), json!({ "name": "x" }));

    let mut b = TreeBuilder::new("p");
    b.types(&[], [type_spec("A", name("int")), type_spec("B", name("int")).alias()]);
    let file = parse_file(&b.finish(), &Options::default()).unwrap();
    let value = serde_json::to_value(&file).unwrap();
    assert_eq!(
        value["types"],
        json!([
            { "name": "A", "type": { "kind": "name", "name": "int" } },
            { "name": "B", "type": { "kind": "name", "name": "int" }, "alias": true }
        ])
    );

    let unresolved = Type::qualified(None, Type::name("Buffer"));
    assert_eq!(
        serde_json::to_value(&unresolved).unwrap(),
        json!({ "kind": "import", "next": { "kind": "name", "name": "Buffer" } })
    );
}

#[test]
fn struct_fields_and_method_indices() {
    let file = parse_file(&fixtures::geometry(), &Options::default()).unwrap();
    let value = serde_json::to_value(&file).unwrap();

    let point = &value["structures"][0];
    assert_eq!(point["methods"], json!([0, 1]));
    assert_eq!(point["fields"][0]["name"], "X");
    assert_eq!(point["fields"][0]["tags"], json!({ "json": { "name": "x" } }));
    assert_eq!(
        point["fields"][2]["tags"]["json"],
        json!({ "name": "label", "options": ["omitempty"] })
    );
    assert_eq!(point["fields"][2]["raw_tags"], r#"`json:"label,omitempty" yaml:"label"`"#);

    let abs = &value["methods"][0];
    assert_eq!(abs["name"], "Abs");
    assert_eq!(abs["receiver"]["name"], "p");
    assert_eq!(abs["results"][0], json!({ "type": { "kind": "name", "name": "float64" } }));

    assert_eq!(value["types"][0]["methods"], json!([2]));
}

#[test]
fn service_survives_serialization() {
    let file = parse_file(&fixtures::service(), &Options::default()).unwrap();
    let text = serde_json::to_string_pretty(&file).unwrap();
    let back: File = serde_json::from_str(&text).unwrap();
    assert_eq!(back, file);
}
