use crate::compiler::common::expr::{indent_fmt, Expr, Function, PrintIndent};
use crate::compiler::common::token::Token;
use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub token: Token,
}
impl Stmt {
    pub fn new(kind: StmtKind, token: Token) -> Self {
        Stmt { kind, token }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtKind {
    Class {
        name: String,
        base: Option<Expr>,
        methods: Vec<Function>,
    },
    Function(Function),
    Block(Vec<Stmt>),
    Return(Expr),
    Declaration {
        name: String,
        init: Option<Expr>,
    },
    If {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    Expression(Expr),
}

/// A fully parsed input unit: its doc string, the packages it declares
/// and its top-level statements.
#[derive(Debug, PartialEq, Clone)]
pub struct Module {
    pub token: Token,
    pub doc: Option<String>,
    pub packages: Vec<String>,
    pub stmts: Vec<Stmt>,
}

impl PrintIndent for Stmt {
    fn print_indent(&self, indent_level: usize) -> String {
        match &self.kind {
            StmtKind::Class { name, base, methods } => {
                let mut out = format!("Class: '{}'", name);
                if let Some(base) = base {
                    out.push_str(&format!("\n{}Extends:\n{}",
                        "-".repeat(indent_level + 1),
                        indent_fmt(base, indent_level + 2)
                    ));
                }
                for method in methods {
                    out.push_str(&format!("\n{}", indent_fmt(method, indent_level + 1)));
                }
                out
            }
            StmtKind::Function(func) => func.print_indent(indent_level),
            StmtKind::Block(stmts) => {
                let body = stmts
                    .iter()
                    .map(|stmt| indent_fmt(stmt, indent_level + 1))
                    .collect::<Vec<_>>()
                    .join("\n");
                if body.is_empty() {
                    "Block:".to_string()
                } else {
                    format!("Block:\n{}", body)
                }
            }
            StmtKind::Return(expr) => {
                format!("Return:\n{}", indent_fmt(expr, indent_level + 1))
            }
            StmtKind::Declaration { name, init } => match init {
                Some(init) => format!(
                    "Declaration: '{}'\n{}",
                    name,
                    indent_fmt(init, indent_level + 1)
                ),
                None => format!("Declaration: '{}'", name),
            },
            StmtKind::If { cond, then, otherwise } => {
                let mut out = format!(
                    "If:\n{}\n{}",
                    indent_fmt(cond, indent_level + 1),
                    indent_fmt(then.as_ref(), indent_level + 1)
                );
                if let Some(otherwise) = otherwise {
                    out.push_str(&format!(
                        "\n{}Else:\n{}",
                        "-".repeat(indent_level + 1),
                        indent_fmt(otherwise.as_ref(), indent_level + 2)
                    ));
                }
                out
            }
            StmtKind::Expression(expr) => {
                format!("Expr:\n{}", indent_fmt(expr, indent_level + 1))
            }
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module: '{}'", self.token.source.uri)?;
        for package in &self.packages {
            writeln!(f, "-Package: '{}'", package)?;
        }
        for stmt in &self.stmts {
            writeln!(f, "{}", indent_fmt(stmt, 1))?;
        }
        Ok(())
    }
}
