//! Declaration model extraction for Go source files.
//!
//! Takes an already-built [`SyntaxTree`] and produces a [`File`]: imports,
//! constants, variables, types, interfaces, structs (with decoded tags),
//! functions and methods, with every type expression resolved into a
//! [`Type`] chain.
//!
//! - `imports` collects import specs and resolves package qualifiers.
//! - `resolve` turns type expressions into `Type` values.
//! - `walker` dispatches top-level declarations.
//! - `linker` attaches methods to their receiver's struct or type.
//! - `tags` decodes struct tags.
//!
//! ```
//! use godecl::syntax::builder::{TreeBuilder, sketch::*};
//! use godecl::{Options, Parser};
//!
//! let mut b = TreeBuilder::new("geometry");
//! b.types(&[], [type_spec("Point", structure(vec![field(&["X", "Y"], name("float64"))]))]);
//! b.func(func("Abs", sig(vec![]).returns(name("float64"))).receiver(field(&["p"], ptr(name("Point")))));
//! let file = Parser::new(Options::default()).parse(&b.finish()).unwrap();
//!
//! assert_eq!(file.structures[0].fields.len(), 2);
//! assert_eq!(file.methods_of_struct("Point")[0].name, "Abs");
//! ```

pub mod error;
pub mod imports;
pub mod linker;
pub mod lit;
pub mod model;
pub mod options;
pub mod resolve;
pub mod tags;
pub mod walker;

pub use godecl_syntax as syntax;

pub use error::{Error, ErrorKind, Result};
pub use imports::ImportTable;
pub use linker::{LinkReport, MethodLinker};
pub use model::{File, Import, Type};
pub use options::Options;
pub use resolve::TypeResolver;
pub use walker::DeclarationWalker;

use godecl_syntax::SyntaxTree;
use tracing::{debug, debug_span};

/// Options plus the import path of the package being parsed.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: Options,
    package_path: Option<String>,
}

impl Parser {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            package_path: None,
        }
    }

    /// Bare names in type positions will resolve to `Import(path, Name)`.
    pub fn with_package_path(mut self, path: impl Into<String>) -> Self {
        self.package_path = Some(path.into());
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn parse(&self, tree: &SyntaxTree) -> Result<File> {
        self.parse_with_report(tree).map(|(file, _)| file)
    }

    /// Parses `tree` and reports which methods could not be linked.
    ///
    /// Any resolution error aborts the whole file.
    pub fn parse_with_report(&self, tree: &SyntaxTree) -> Result<(File, LinkReport)> {
        let span = debug_span!("parse", package = tree.package_name());
        let _enter = span.enter();

        let opts = &self.options;
        let imports = ImportTable::collect(tree, !opts.ignore_comments)?;
        let current = self.package_path.as_ref().map(|path| Import {
            alias: tree.package_name().to_string(),
            package: path.clone(),
            docs: Vec::new(),
        });
        let resolver = TypeResolver::new(tree, &imports)
            .current_package(current.as_ref())
            .keep_docs(!opts.ignore_comments)
            .allow_any_alias(opts.allow_any_import_alias);

        let mut file = DeclarationWalker::new(tree, resolver, opts).walk()?;
        file.imports = imports.imports().to_vec();

        let report = if opts.ignore_methods {
            LinkReport::default()
        } else {
            MethodLinker::new().link(&mut file)
        };
        debug!(
            imports = file.imports.len(),
            constants = file.constants.len(),
            vars = file.vars.len(),
            interfaces = file.interfaces.len(),
            structures = file.structures.len(),
            functions = file.functions.len(),
            methods = file.methods.len(),
            types = file.types.len(),
            linked = report.linked,
            "parsed file"
        );
        Ok((file, report))
    }
}

/// Parses `tree` with `options` and no package path.
pub fn parse_file(tree: &SyntaxTree, options: &Options) -> Result<File> {
    Parser::new(*options).parse(tree)
}
