pub mod compiler;

use compiler::assembler::{Assembler, SourceUnit};
use compiler::common::error::{Error, ErrorKind};
use compiler::parser::parse_module;
use compiler::runtime::wrap_html;

/// All error-kinds that can occur when invoking jjc
#[derive(Debug, PartialEq)]
pub enum JjcError {
    /// Errors raised while compiling, pointing into the offending unit
    Comp(Error),
    /// Errors from the environment, like unreadable input files
    Sys(String),
    /// Errors from malformed command-line options
    Cli(Vec<String>),
}
impl JjcError {
    pub fn print(&self) {
        match self {
            JjcError::Comp(error) => eprintln!("{}", error),
            JjcError::Sys(message) => eprintln!("jjc: {}", message),
            JjcError::Cli(messages) => {
                for message in messages {
                    eprintln!("jjc: {}", message);
                }
            }
        }
    }
}
impl From<Error> for JjcError {
    fn from(error: Error) -> Self {
        JjcError::Comp(error)
    }
}

/// Compiles the given units into one javascript program. The last
/// unit's uri is the entry module imported at program start. Units
/// whose uri ends in `.js` pass through verbatim; everything else is
/// parsed as jj source.
///
/// With `dump_ast` set, every parsed module's tree is printed to
/// stderr before translation.
pub fn compile(units: &[SourceUnit], dump_ast: bool) -> Result<String, Error> {
    let entry = units.last().ok_or_else(|| Error::plain(ErrorKind::NoInput))?;
    let mut assembler = Assembler::new()?;
    for unit in units {
        if unit.uri.ends_with(".js") {
            assembler.add_passthrough(&unit.uri, &unit.text)?;
        } else {
            let module = parse_module(&unit.uri, &unit.text)?;
            if dump_ast {
                eprintln!("{}", module);
            }
            assembler.add_module(&module)?;
        }
    }
    Ok(assembler.finish(&entry.uri))
}

/// Like [compile], but embeds the program in a minimal html page.
pub fn compile_html(units: &[SourceUnit], dump_ast: bool) -> Result<String, Error> {
    Ok(wrap_html(&compile(units, dump_ast)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(uri: &str, text: &str) -> SourceUnit {
        SourceUnit {
            uri: uri.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn no_input_err() {
        let error = compile(&[], false).unwrap_err();

        assert_eq!(error.kind, ErrorKind::NoInput);
    }
    #[test]
    fn last_unit_is_the_entry_module() {
        let program = compile(
            &[unit("lib.jj", "let x = 1;"), unit("main.jj", "let y = 2;")],
            false,
        )
        .unwrap();

        assert!(program.contains("importUri(stack, \"main.jj\");"));
    }
    #[test]
    fn html_output_wraps_the_program() {
        let html = compile_html(&[unit("main.jj", "let x = 1;")], false).unwrap();

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("importUri(stack, \"main.jj\");"));
    }
    #[test]
    fn compile_errors_carry_the_unit_uri() {
        let error = compile(&[unit("main.jj", "let x = @;")], false).unwrap_err();

        assert!(error.to_string().contains("in main.jj, line 1"));
    }
}
