use jjc_compiler::JjcError;
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

const USAGE: &str = "\
usage: jjc [-o <file>] [--html] [--dump-ast]
           [-h | --help] [-v] <files>";

const HELP: &str = "usage: jjc [options] <files>
options:
    -o | --output <file>  Specifies the output-file to write to, instead of stdout
         --html           Embeds the program in a minimal html page
         --dump-ast       Displays the AST produced by the parser while also compiling as usual
    -h                    Prints usage information
    --help                Prints elaborate help information
    -v | --version        Prints version information

files:
    The source files to compile, in import order. The last file is the
    entry module. Files ending in '.js' are passed through verbatim.";

fn sys_info(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(0);
}

pub struct CliOptions {
    // input files in argument order, the last one being the entry module
    pub files: Vec<PathBuf>,

    // optional argument specifying output-file to write to
    pub output_path: Option<PathBuf>,

    // emits the program wrapped in a html page
    pub html: bool,

    // displays AST while also compiling program as usual
    pub dump_ast: bool,
}
impl CliOptions {
    fn new() -> CliOptions {
        CliOptions {
            files: Vec::new(),
            output_path: None,
            html: false,
            dump_ast: false,
        }
    }
    pub fn parse() -> Result<CliOptions, JjcError> {
        let mut cli_options = CliOptions::new();
        let mut args = std::env::args().collect::<Vec<String>>().into_iter().skip(1);

        while let Some(arg) = args.next() {
            if arg.starts_with('-') {
                match arg.as_str() {
                    "-o" | "--output" => {
                        if let Some(file) = args.next() {
                            cli_options.output_path = Some(PathBuf::from(file));
                        } else {
                            return Err(JjcError::Cli(vec![format!(
                                "expected file following '{}' option",
                                arg
                            )]));
                        }
                    }
                    "--html" => cli_options.html = true,
                    "--dump-ast" => cli_options.dump_ast = true,
                    "-h" => sys_info(USAGE),
                    "--help" => sys_info(HELP),
                    "-v" | "--version" => sys_info(VERSION),
                    _ => return Err(JjcError::Cli(vec![format!("illegal option '{}'", arg)])),
                }
            } else {
                cli_options.files.push(PathBuf::from(arg));
            }
        }

        if cli_options.files.is_empty() {
            Err(JjcError::Cli(vec!["no input files given".to_string()]))
        } else {
            Ok(cli_options)
        }
    }
}
