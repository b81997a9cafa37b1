//! Go's predeclared identifiers.

const TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

const CONSTS: &[&str] = &["false", "iota", "nil", "true"];

/// Predeclared type name (`int`, `error`, ...).
pub fn is_builtin_type(name: &str) -> bool {
    TYPES.contains(&name)
}

/// Any predeclared identifier: types, functions and constants.
pub fn is_reserved(name: &str) -> bool {
    is_builtin_type(name) || FUNCS.contains(&name) || CONSTS.contains(&name)
}
