use std::fmt;

use godecl_syntax::ast::Span;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure that aborts parsing of a whole file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed declaration shape, e.g. a name/value count mismatch.
    #[error("{span}: malformed declaration: {message}")]
    Structural { message: String, span: Span },

    /// Package qualifier with no matching import.
    #[error("{span}: unresolved import `{alias}`")]
    UnresolvedImport { alias: String, span: Span },

    #[error("{span}: unsupported type expression: {message}")]
    UnsupportedTypeExpression { message: String, span: Span },

    /// Method whose receiver list is empty.
    #[error("{span}: receiver not found for method `{method}`")]
    ReceiverNotFound { method: String, span: Span },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Structural,
    UnresolvedImport,
    UnsupportedTypeExpression,
    ReceiverNotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Structural => "structural error",
            ErrorKind::UnresolvedImport => "unresolved import",
            ErrorKind::UnsupportedTypeExpression => "unsupported type expression",
            ErrorKind::ReceiverNotFound => "receiver not found",
        })
    }
}

impl Error {
    pub(crate) fn structural(message: impl Into<String>, span: Span) -> Self {
        Error::Structural {
            message: message.into(),
            span,
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Error::UnsupportedTypeExpression {
            message: message.into(),
            span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Structural { .. } => ErrorKind::Structural,
            Error::UnresolvedImport { .. } => ErrorKind::UnresolvedImport,
            Error::UnsupportedTypeExpression { .. } => ErrorKind::UnsupportedTypeExpression,
            Error::ReceiverNotFound { .. } => ErrorKind::ReceiverNotFound,
        }
    }

    /// Location of the offending node in the tree's source.
    pub fn span(&self) -> Span {
        match self {
            Error::Structural { span, .. }
            | Error::UnresolvedImport { span, .. }
            | Error::UnsupportedTypeExpression { span, .. }
            | Error::ReceiverNotFound { span, .. } => *span,
        }
    }
}
