mod cli_options;

use cli_options::CliOptions;
use jjc_compiler::compiler::assembler::SourceUnit;
use jjc_compiler::{compile, compile_html, JjcError};
use std::fs;

fn run() -> Result<(), JjcError> {
    let options = CliOptions::parse()?;

    let mut units = Vec::new();
    for path in &options.files {
        let text = fs::read_to_string(path).map_err(|error| {
            JjcError::Sys(format!("couldn't read '{}': {}", path.display(), error))
        })?;
        units.push(SourceUnit {
            uri: path.display().to_string(),
            text,
        });
    }

    let program = if options.html {
        compile_html(&units, options.dump_ast)
    } else {
        compile(&units, options.dump_ast)
    }
    .map_err(JjcError::Comp)?;

    match &options.output_path {
        Some(path) => fs::write(path, program).map_err(|error| {
            JjcError::Sys(format!("couldn't write '{}': {}", path.display(), error))
        })?,
        None => println!("{}", program),
    }
    Ok(())
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(error) => {
            error.print();
            match error {
                JjcError::Cli(_) => 2,
                _ => 1,
            }
        }
    };
    std::process::exit(exit_code);
}
