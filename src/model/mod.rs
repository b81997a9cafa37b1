//! Output model: the declarations of one file and the `Type` sum type.

pub mod builtin;
mod decl;
mod types;

pub use decl::{
    File, FileType, Function, Import, Interface, Method, MethodRef, Struct, StructField, TagValue,
    Variable,
};
pub use types::{ArrayLen, ChanDir, Type};
