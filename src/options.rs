use serde::Deserialize;

/// Declaration categories to collect and how strictly qualifiers resolve.
///
/// The default collects everything and rejects unknown import aliases.
///
/// ```
/// let opts = godecl::Options::from_toml_str("ignoreMethods = true").unwrap();
/// assert!(opts.ignore_methods);
/// assert!(!opts.ignore_structs);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Drop documentation comments everywhere
    pub ignore_comments: bool,
    pub ignore_structs: bool,
    pub ignore_interfaces: bool,
    pub ignore_functions: bool,
    pub ignore_methods: bool,
    /// Skip type declarations that are neither structs nor interfaces
    pub ignore_types: bool,
    pub ignore_variables: bool,
    pub ignore_constants: bool,
    /// Resolve unknown package qualifiers to an absent import instead of failing
    pub allow_any_import_alias: bool,
}

impl Options {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
