use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::types::{Type, write_signature};

/// Every top-level declaration of one source file.
///
/// `File` owns all entities. `Struct::methods` and `FileType::methods` hold
/// [`MethodRef`] indices into [`File::methods`]; resolve them with
/// [`File::methods_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Package name
    pub name: String,
    /// Comments above the package clause
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structures: Vec<Struct>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Function>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<FileType>,
}

impl File {
    pub fn structure(&self, name: &str) -> Option<&Struct> {
        self.structures.iter().find(|s| s.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn file_type(&self, name: &str) -> Option<&FileType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Resolves linked method references against this file.
    pub fn methods_of<'f>(&'f self, refs: &'f [MethodRef]) -> impl Iterator<Item = &'f Method> {
        refs.iter().filter_map(|r| self.methods.get(r.0))
    }

    /// Methods linked to the struct `name`.
    pub fn methods_of_struct(&self, name: &str) -> Vec<&Method> {
        self.structure(name)
            .map(|s| self.methods_of(&s.methods).collect())
            .unwrap_or_default()
    }

    /// Methods linked to the non-struct type `name`.
    pub fn methods_of_type(&self, name: &str) -> Vec<&Method> {
        self.file_type(name)
            .map(|t| self.methods_of(&t.methods).collect())
            .unwrap_or_default()
    }
}

/// Index of a method in [`File::methods`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodRef(pub usize);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Name the package is referred to by in this file
    pub alias: String,
    /// Import path
    pub package: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.alias, self.package)
    }
}

/// Named value: constant, variable, parameter, result or struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Empty for unnamed parameters and embedded fields
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    /// Absent for untyped constants/vars whose initializer gives no hint
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            ty: Some(ty),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ty, self.name.is_empty()) {
            (Some(ty), true) => write!(f, "{ty}"),
            (Some(ty), false) => write!(f, "{} {ty}", self.name),
            (None, _) => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Variable>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func {}", self.name)?;
        write_signature(f, &self.args, &self.results)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    #[serde(flatten)]
    pub function: Function,
    pub receiver: Variable,
}

impl Deref for Method {
    type Target = Function;

    fn deref(&self) -> &Function {
        &self.function
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func ({}) {}", self.receiver, self.function.name)?;
        write_signature(f, &self.function.args, &self.function.results)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Function>,
    /// Embedded interfaces, e.g. `io.Reader`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded: Vec<Type>,
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type {} interface {{", self.name)?;
        for e in &self.embedded {
            writeln!(f, "\t{e}")?;
        }
        for m in &self.methods {
            write!(f, "\t{}", m.name)?;
            write_signature(f, &m.args, &m.results)?;
            writeln!(f)?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<StructField>,
    /// Methods declared on this struct in the same file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    #[serde(flatten)]
    pub variable: Variable,
    /// Decoded tag, keyed by tag key (`json`, `xml`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, TagValue>,
    /// Tag literal as written, quotes included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_tags: Option<String>,
}

impl Deref for StructField {
    type Target = Variable;

    fn deref(&self) -> &Variable {
        &self.variable
    }
}

/// Value of one struct tag key: `json:"name,omitempty"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Type declaration that is neither a struct nor an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(rename = "type")]
    pub ty: Type,
    /// `type A = B`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alias: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodRef>,
}
