//! Go declaration syntax tree (arena AST + builder).
//!
//! - `ast` holds the arena-allocated node types.
//! - `walk` provides the fallible `DeclVisitor` over top-level declarations.
//! - `tree` bundles a finished tree with its interner and source text.
//! - `builder` materializes trees from owned sketches.

pub mod ast;
pub mod builder;
pub mod tree;
pub mod walk;

pub use builder::TreeBuilder;
pub use tree::SyntaxTree;
