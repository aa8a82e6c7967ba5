//! The errors emitted throughout all of jjc

use crate::compiler::common::token::{Token, TokenKind};
use std::fmt::Display;

/// All error-types in [jjc_compiler](crate)
#[derive(Debug, PartialEq, Clone)]
pub enum ErrorKind {
    // lexical errors
    UnterminatedComment,
    UnknownEscape(char),
    UnrecognizedToken,

    // syntactic errors
    ExpectedToken(TokenKind, TokenKind),
    ExpectedExpression(TokenKind),
    ExpectedNamedFunction,
    FunctionStatementMustBeNamed,

    // code-generation errors
    AwaitOutsideAsync,
    ArrowCannotBeAsync,
    NativeCannotBeAsync,
    UnknownOperator(TokenKind),

    // assembly errors
    DuplicatePackage(String, String, String),
    DuplicateUri(String),
    NoInput,
}
impl ErrorKind {
    pub fn message(&self) -> String {
        match self {
            ErrorKind::UnterminatedComment => "unterminated multiline comment".to_string(),
            ErrorKind::UnknownEscape(c) => format!("unrecognized string escape '\\{}'", c),
            ErrorKind::UnrecognizedToken => "unrecognized token".to_string(),

            ErrorKind::ExpectedToken(expected, found) => {
                format!("expected {}, found {}", expected, found)
            }
            ErrorKind::ExpectedExpression(found) => {
                format!("expected expression, found {}", found)
            }
            ErrorKind::ExpectedNamedFunction => {
                "the body of a class statement can only contain named functions".to_string()
            }
            ErrorKind::FunctionStatementMustBeNamed => {
                "function statements must have a name".to_string()
            }

            ErrorKind::AwaitOutsideAsync => {
                "await can only be used inside an async function".to_string()
            }
            ErrorKind::ArrowCannotBeAsync => "arrow functions can't be async".to_string(),
            ErrorKind::NativeCannotBeAsync => "native functions can't be async".to_string(),
            ErrorKind::UnknownOperator(op) => format!("no such operator: {}", op),

            ErrorKind::DuplicatePackage(pkg, first, second) => format!(
                "duplicate package: {} (from {} and {})",
                pkg, first, second
            ),
            ErrorKind::DuplicateUri(uri) => format!("duplicate uri: {}", uri),
            ErrorKind::NoInput => "no input units given".to_string(),
        }
    }
}

/// Main error used throughout [jjc_compiler](crate). Compilation aborts on
/// the first error raised; no layer catches and re-wraps errors from the
/// layer below.
#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    location: Option<ErrorLocation>,
}

#[derive(Debug, PartialEq, Clone)]
struct ErrorLocation {
    uri: String,
    line_index: usize,
    line_string: String,
    column: usize,
}

impl Error {
    pub fn new(token: &Token, kind: ErrorKind) -> Self {
        Error {
            kind,
            location: Some(ErrorLocation {
                uri: token.source.uri.clone(),
                line_index: token.line_index(),
                line_string: token.line_string().to_string(),
                column: token.column(),
            }),
        }
    }
    /// For errors without a source position (assembly-level errors).
    pub fn plain(kind: ErrorKind) -> Self {
        Error { kind, location: None }
    }
}
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())?;
        if let Some(location) = &self.location {
            write!(
                f,
                "\nin {}, line {}\n{}\n{}^",
                location.uri,
                location.line_index,
                location.line_string,
                " ".repeat(location.column - 1),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::common::token::Source;

    #[test]
    fn message_without_token() {
        let error = Error::plain(ErrorKind::DuplicateUri("a.jj".to_string()));
        assert_eq!(error.to_string(), "duplicate uri: a.jj");
    }
    #[test]
    fn message_with_token_points_at_column() {
        let source = Source::new("lib.jj", "let x = @;");
        let token = Token::new(TokenKind::Eof, source, 8);
        let error = Error::new(&token, ErrorKind::UnrecognizedToken);
        assert_eq!(
            error.to_string(),
            "unrecognized token\nin lib.jj, line 1\nlet x = @;\n        ^"
        );
    }
    #[test]
    fn message_with_token_on_later_line() {
        let source = Source::new("lib.jj", "def f() {\n  /* oops\n}");
        let token = Token::new(TokenKind::Eof, source, 12);
        let error = Error::new(&token, ErrorKind::UnterminatedComment);
        assert_eq!(
            error.to_string(),
            "unterminated multiline comment\nin lib.jj, line 2\n  /* oops\n  ^"
        );
    }
}
