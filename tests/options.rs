mod fixtures;

use godecl::{Options, parse_file};

#[test]
fn default_collects_everything() {
    let opts = Options::default();
    assert!(!opts.ignore_comments);
    assert!(!opts.allow_any_import_alias);

    let file = parse_file(&fixtures::service(), &opts).unwrap();
    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.vars.len(), 5);
    assert_eq!(file.constants.len(), 1);
    assert_eq!(file.interfaces.len(), 2);
    assert_eq!(file.structures.len(), 1);
    assert_eq!(file.functions.len(), 1);
}

#[test]
fn each_flag_drops_its_category() {
    let tree = fixtures::geometry();
    let parse = |opts: Options| parse_file(&tree, &opts).unwrap();

    let file = parse(Options {
        ignore_structs: true,
        ..Options::default()
    });
    assert!(file.structures.is_empty());
    assert_eq!(file.types.len(), 1);

    let file = parse(Options {
        ignore_types: true,
        ..Options::default()
    });
    assert!(file.types.is_empty());
    assert_eq!(file.structures.len(), 1);

    let file = parse(Options {
        ignore_functions: true,
        ..Options::default()
    });
    assert!(file.functions.is_empty());
    assert_eq!(file.methods.len(), 3);

    let file = parse(Options {
        ignore_methods: true,
        ..Options::default()
    });
    assert!(file.methods.is_empty());
    assert_eq!(file.functions.len(), 2);

    let service = fixtures::service();
    let file = parse_file(
        &service,
        &Options {
            ignore_interfaces: true,
            ignore_variables: true,
            ignore_constants: true,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(file.interfaces.is_empty());
    assert!(file.vars.is_empty());
    assert!(file.constants.is_empty());
    assert_eq!(file.structures.len(), 1);
    // Imports are always collected.
    assert_eq!(file.imports.len(), 2);
}

#[test]
fn ignore_comments_drops_all_docs() {
    let opts = Options {
        ignore_comments: true,
        ..Options::default()
    };
    let file = parse_file(&fixtures::geometry(), &opts).unwrap();
    assert!(file.docs.is_empty());
    assert!(file.structures.iter().all(|s| s.docs.is_empty()));
    assert!(file.structures[0].fields.iter().all(|f| f.docs.is_empty()));
    assert!(file.methods.iter().all(|m| m.docs.is_empty()));

    let file = parse_file(&fixtures::service(), &opts).unwrap();
    assert!(file.constants[0].docs.is_empty());
    assert!(file.interfaces[0].methods[0].docs.is_empty());
}

#[test]
fn loads_from_toml() {
    let opts = Options::from_toml_str(
        r#"
        ignoreComments = true
        ignoreStructs = true
        ignoreInterfaces = true
        ignoreFunctions = true
        ignoreMethods = true
        ignoreTypes = true
        ignoreVariables = true
        ignoreConstants = true
        allowAnyImportAlias = true
        "#,
    )
    .unwrap();
    assert_eq!(
        opts,
        Options {
            ignore_comments: true,
            ignore_structs: true,
            ignore_interfaces: true,
            ignore_functions: true,
            ignore_methods: true,
            ignore_types: true,
            ignore_variables: true,
            ignore_constants: true,
            allow_any_import_alias: true,
        }
    );

    assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
}

#[test]
fn rejects_unknown_and_mistyped_keys() {
    assert!(Options::from_toml_str("ignoreEverything = true").is_err());
    assert!(Options::from_toml_str("ignore_structs = true").is_err());
    assert!(Options::from_toml_str("ignoreStructs = \"yes\"").is_err());
}

#[test]
fn loads_from_json() {
    let opts: Options = serde_json::from_str(r#"{"ignoreMethods": true}"#).unwrap();
    assert!(opts.ignore_methods);
    assert!(!opts.ignore_functions);
}
