//! Combines per-unit generated bodies into one standalone program

use crate::compiler::codegen::{quote_js, CodeGenerator};
use crate::compiler::common::error::{Error, ErrorKind};
use crate::compiler::common::stmt::Module;
use crate::compiler::parser::parse_module;
use crate::compiler::runtime::{BUILTIN_PRELUDE, RUNTIME};
use std::collections::{HashMap, HashSet};

/// A single compiler input: the uri it is registered under and its text.
pub struct SourceUnit {
    pub uri: String,
    pub text: String,
}

/// Accumulates translated units and emits the final program. One
/// assembler owns one [CodeGenerator], so the debug-info table spans
/// all units of a compilation.
pub struct Assembler {
    generator: CodeGenerator,
    // package-name -> uri, kept to report both ends of a collision
    packages: HashMap<String, String>,
    package_stmts: String,
    uris: HashSet<String>,
    uri_stmts: String,
    prelude_code: String,
}
impl Assembler {
    pub fn new() -> Result<Self, Error> {
        let mut generator = CodeGenerator::new();
        let prelude = parse_module("<prelude>", BUILTIN_PRELUDE)?;
        let prelude_code = generator.translate_module(&prelude)?;
        Ok(Assembler {
            generator,
            packages: HashMap::new(),
            package_stmts: String::new(),
            uris: HashSet::new(),
            uri_stmts: String::new(),
            prelude_code,
        })
    }

    pub fn add_module(&mut self, module: &Module) -> Result<(), Error> {
        let uri = module.token.source.uri.clone();
        let code = self
            .generator
            .translate_module(module)?
            .replace('\n', "\n  ");
        self.add_uri(&uri, &code)?;
        for package in &module.packages {
            self.add_package(package, &uri)?;
        }
        Ok(())
    }

    /// Registers a host-script unit verbatim. Its package names are
    /// discovered by scanning for `// jj package: <dotted.name>` line
    /// comments instead of parsing.
    pub fn add_passthrough(&mut self, uri: &str, text: &str) -> Result<(), Error> {
        self.add_uri(uri, &format!("\n{}", text))?;
        for line in text.lines() {
            if let Some(name) = line.strip_prefix("// jj package: ") {
                if !name.is_empty()
                    && name
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                {
                    self.add_package(name, uri)?;
                }
            }
        }
        Ok(())
    }

    fn add_uri(&mut self, uri: &str, code: &str) -> Result<(), Error> {
        if !self.uris.insert(uri.to_string()) {
            return Err(Error::plain(ErrorKind::DuplicateUri(uri.to_string())));
        }
        self.uri_stmts.push_str(&format!(
            "\nuriTable[{}] = function(stack, exports) {{{}\n}};",
            quote_js(uri),
            code
        ));
        Ok(())
    }
    fn add_package(&mut self, package: &str, uri: &str) -> Result<(), Error> {
        if let Some(first) = self.packages.get(package) {
            return Err(Error::plain(ErrorKind::DuplicatePackage(
                package.to_string(),
                first.clone(),
                uri.to_string(),
            )));
        }
        self.packages
            .insert(package.to_string(), uri.to_string());
        self.package_stmts.push_str(&format!(
            "\npackageTable[{}] = {};",
            quote_js(package),
            quote_js(uri)
        ));
        Ok(())
    }

    pub fn finish(self, entry_uri: &str) -> String {
        let debug_info = self
            .generator
            .debug_info()
            .entries()
            .iter()
            .map(|entry| quote_js(entry))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "// Generated by the jj compiler\n\
             // jshint esversion: 6\n\
             (function() {{\n\
             \"use strict\";\
             {runtime}\n\
             const moduleCache = Object.create(null);\n\
             const debugInfo = [{debug_info}];\n\
             const packageTable = Object.create(null);{package_stmts}\n\
             const uriTable = Object.create(null);{uri_stmts}\n\
             // this is a mock stack to run the builtin prelude\n\
             const stack = [];\
             {prelude}\n\
             tryAndCatch(stack => {{\n  importUri(stack, {entry});\n}})\n\
             }})();",
            runtime = RUNTIME,
            debug_info = debug_info,
            package_stmts = self.package_stmts,
            uri_stmts = self.uri_stmts,
            prelude = self.prelude_code,
            entry = quote_js(entry_uri),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(units: &[(&str, &str)]) -> Result<String, Error> {
        let mut assembler = Assembler::new()?;
        for (uri, text) in units {
            if uri.ends_with(".js") {
                assembler.add_passthrough(uri, text)?;
            } else {
                assembler.add_module(&parse_module(uri, text)?)?;
            }
        }
        Ok(assembler.finish(units.last().map(|(uri, _)| *uri).unwrap_or("")))
    }

    #[test]
    fn program_sections_appear_in_order() {
        let program = setup(&[("main.jj", "package 'main'; print('hi');")]).unwrap();

        let runtime = program.find("function importUri(stack, uri)").unwrap();
        let debug = program.find("const debugInfo = [").unwrap();
        let packages = program.find("packageTable[\"main\"] = \"main.jj\";").unwrap();
        let uris = program.find("uriTable[\"main.jj\"] = function(stack, exports) {").unwrap();
        let prelude = program.find("const jjprint = ").unwrap();
        let entry = program.find("importUri(stack, \"main.jj\");").unwrap();

        assert!(runtime < debug);
        assert!(debug < packages);
        assert!(packages < uris);
        assert!(uris < prelude);
        assert!(prelude < entry);
    }
    #[test]
    fn module_bodies_are_reindented() {
        let program = setup(&[("main.jj", "let x = 1;")]).unwrap();

        assert!(program.contains("function(stack, exports) {\n  let jjx = "));
    }
    #[test]
    fn passthrough_packages_are_discovered_from_comments() {
        let program = setup(&[
            ("lib.js", "// jj package: native.lib\nfunction f() {}"),
            ("main.jj", "let x = 1;"),
        ])
        .unwrap();

        assert!(program.contains("packageTable[\"native.lib\"] = \"lib.js\";"));
        assert!(program.contains("\nfunction f() {}\n};"));
    }
    #[test]
    fn malformed_passthrough_comments_are_ignored() {
        let program = setup(&[
            ("lib.js", "// jj package: spaced name\n// jj package:\n"),
            ("main.jj", "let x = 1;"),
        ])
        .unwrap();

        assert!(!program.contains("packageTable[\"spaced name\"]"));
    }
    #[test]
    fn duplicate_package_err() {
        let error = setup(&[
            ("a.jj", "package 'p';"),
            ("b.jj", "package 'p';"),
        ])
        .unwrap_err();

        assert_eq!(
            error.kind,
            ErrorKind::DuplicatePackage("p".to_string(), "a.jj".to_string(), "b.jj".to_string())
        );
    }
    #[test]
    fn duplicate_uri_err() {
        let error = setup(&[("a.jj", "let x = 1;"), ("a.jj", "let y = 2;")]).unwrap_err();

        assert_eq!(error.kind, ErrorKind::DuplicateUri("a.jj".to_string()));
    }
    #[test]
    fn debug_info_spans_all_units() {
        let mut assembler = Assembler::new().unwrap();
        assembler
            .add_module(&parse_module("a.jj", "f();").unwrap())
            .unwrap();
        assembler
            .add_module(&parse_module("b.jj", "g();").unwrap())
            .unwrap();
        let program = assembler.finish("b.jj");

        assert!(program.contains("\".@a.jj@1\""));
        assert!(program.contains("\".@b.jj@1\""));
    }
}
