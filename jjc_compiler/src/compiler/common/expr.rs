use crate::compiler::common::stmt::Stmt;
use crate::compiler::common::token::{Token, TokenKind};
use std::fmt;

/// An expression together with the token it originated from. The token
/// supplies both error locations and the line numbers interned into the
/// emitted program's debug-info table.
#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub token: Token,
}
impl Expr {
    pub fn new(kind: ExprKind, token: Token) -> Self {
        Expr { kind, token }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprKind {
    Null,
    True,
    False,
    Number(String),
    Str(String),
    List(ExprList),
    GetVariable {
        is_native: bool,
        name: String,
    },
    SetVariable {
        is_native: bool,
        name: String,
        value: Box<Expr>,
    },
    GetAttribute {
        owner: Box<Expr>,
        is_native: bool,
        name: String,
    },
    SetAttribute {
        owner: Box<Expr>,
        is_native: bool,
        name: String,
        value: Box<Expr>,
    },
    GetItem {
        owner: Box<Expr>,
        is_native: bool,
        key: Box<Expr>,
    },
    SetItem {
        owner: Box<Expr>,
        is_native: bool,
        key: Box<Expr>,
        value: Box<Expr>,
    },
    FunctionCall {
        callee: Box<Expr>,
        is_native: bool,
        args: ExprList,
    },
    MethodCall {
        owner: Box<Expr>,
        is_native: bool,
        name: String,
        args: ExprList,
    },
    New {
        class: Box<Expr>,
        args: ExprList,
    },
    Await(Box<Expr>),
    Prefix {
        op: TokenKind,
        operand: Box<Expr>,
    },
    Binary {
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        true_expr: Box<Expr>,
        false_expr: Box<Expr>,
    },
    Postfix {
        op: TokenKind,
        operand: Box<Expr>,
    },
    CompoundAssign {
        target: Box<Expr>,
        op: TokenKind,
        value: Box<Expr>,
    },
    Function(Function),
}

/// Argument expressions of a call or the elements of a list literal,
/// with an optional trailing spread.
#[derive(Debug, PartialEq, Clone)]
pub struct ExprList {
    pub token: Token,
    pub exprs: Vec<Expr>,
    pub spread: Option<Box<Expr>>,
}

/// Declared parameters: required names, then optional names (after `/`),
/// then an optional `*rest` name.
#[derive(Debug, PartialEq, Clone)]
pub struct ParamList {
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub rest: Option<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum FunctionBody {
    /// Opaque passthrough text of a native function, spliced into the
    /// output verbatim.
    Native(String),
    /// A [Stmt::Block](crate::compiler::common::stmt::StmtKind::Block).
    Block(Box<Stmt>),
    /// Single-expression body of an arrow function.
    Expression(Box<Expr>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub token: Token,
    pub name: Option<String>,
    pub params: ParamList,
    pub is_native: bool,
    pub is_async: bool,
    pub is_arrow: bool,
    pub body: FunctionBody,
}

pub trait PrintIndent {
    fn print_indent(&self, indent_level: usize) -> String;
}
impl PrintIndent for Expr {
    fn print_indent(&self, indent_level: usize) -> String {
        match &self.kind {
            ExprKind::Null => "Null".to_string(),
            ExprKind::True => "True".to_string(),
            ExprKind::False => "False".to_string(),
            ExprKind::Number(n) => format!("Number: {}", n),
            ExprKind::Str(s) => format!("String: {:?}", s),
            ExprKind::List(list) => format!("List:{}", fmt_list(list, indent_level)),
            ExprKind::GetVariable { is_native, name } => {
                format!("GetVariable: '{}{}'", native_tag(*is_native), name)
            }
            ExprKind::SetVariable { is_native, name, value } => format!(
                "SetVariable: '{}{}'\n{}",
                native_tag(*is_native),
                name,
                indent_fmt(value.as_ref(), indent_level + 1)
            ),
            ExprKind::GetAttribute { owner, is_native, name } => format!(
                "GetAttribute: '{}{}'\n{}",
                native_tag(*is_native),
                name,
                indent_fmt(owner.as_ref(), indent_level + 1)
            ),
            ExprKind::SetAttribute { owner, is_native, name, value } => format!(
                "SetAttribute: '{}{}'\n{}\n{}",
                native_tag(*is_native),
                name,
                indent_fmt(owner.as_ref(), indent_level + 1),
                indent_fmt(value.as_ref(), indent_level + 1)
            ),
            ExprKind::GetItem { owner, key, .. } => format!(
                "GetItem:\n{}\n{}",
                indent_fmt(owner.as_ref(), indent_level + 1),
                indent_fmt(key.as_ref(), indent_level + 1)
            ),
            ExprKind::SetItem { owner, key, value, .. } => format!(
                "SetItem:\n{}\n{}\n{}",
                indent_fmt(owner.as_ref(), indent_level + 1),
                indent_fmt(key.as_ref(), indent_level + 1),
                indent_fmt(value.as_ref(), indent_level + 1)
            ),
            ExprKind::FunctionCall { callee, args, .. } => format!(
                "FunctionCall:\n{}{}",
                indent_fmt(callee.as_ref(), indent_level + 1),
                fmt_list(args, indent_level)
            ),
            ExprKind::MethodCall { owner, is_native, name, args } => format!(
                "MethodCall: '{}{}'\n{}{}",
                native_tag(*is_native),
                name,
                indent_fmt(owner.as_ref(), indent_level + 1),
                fmt_list(args, indent_level)
            ),
            ExprKind::New { class, args } => format!(
                "New:\n{}{}",
                indent_fmt(class.as_ref(), indent_level + 1),
                fmt_list(args, indent_level)
            ),
            ExprKind::Await(operand) => {
                format!("Await:\n{}", indent_fmt(operand.as_ref(), indent_level + 1))
            }
            ExprKind::Prefix { op, operand } => format!(
                "Prefix: {}\n{}",
                op,
                indent_fmt(operand.as_ref(), indent_level + 1)
            ),
            ExprKind::Binary { op, left, right } => format!(
                "Binary: {}\n{}\n{}",
                op,
                indent_fmt(left.as_ref(), indent_level + 1),
                indent_fmt(right.as_ref(), indent_level + 1)
            ),
            ExprKind::Conditional { cond, true_expr, false_expr } => format!(
                "Conditional:\n{}\n{}\n{}",
                indent_fmt(cond.as_ref(), indent_level + 1),
                indent_fmt(true_expr.as_ref(), indent_level + 1),
                indent_fmt(false_expr.as_ref(), indent_level + 1)
            ),
            ExprKind::Postfix { op, operand } => format!(
                "Postfix: {}\n{}",
                op,
                indent_fmt(operand.as_ref(), indent_level + 1)
            ),
            ExprKind::CompoundAssign { target, op, value } => format!(
                "CompoundAssign: {}\n{}\n{}",
                op,
                indent_fmt(target.as_ref(), indent_level + 1),
                indent_fmt(value.as_ref(), indent_level + 1)
            ),
            ExprKind::Function(func) => func.print_indent(indent_level),
        }
    }
}
impl PrintIndent for Function {
    fn print_indent(&self, indent_level: usize) -> String {
        let mut params = self.params.required.clone();
        params.extend(self.params.optional.iter().map(|p| format!("/{}", p)));
        if let Some(rest) = &self.params.rest {
            params.push(format!("*{}", rest));
        }
        let body = match &self.body {
            FunctionBody::Native(text) => {
                format!("{}Native: {:?}", "-".repeat(indent_level + 1), text)
            }
            FunctionBody::Block(stmt) => indent_fmt(stmt.as_ref(), indent_level + 1),
            FunctionBody::Expression(expr) => indent_fmt(expr.as_ref(), indent_level + 1),
        };
        format!(
            "Function: '{}{}{}{}'({})\n{}",
            native_tag(self.is_native),
            if self.is_async { "async " } else { "" },
            if self.is_arrow { "=> " } else { "" },
            self.name.as_deref().unwrap_or("*"),
            params.join(","),
            body
        )
    }
}

fn native_tag(is_native: bool) -> &'static str {
    if is_native {
        "#"
    } else {
        ""
    }
}
fn fmt_list(list: &ExprList, indent_level: usize) -> String {
    let mut out = list
        .exprs
        .iter()
        .map(|expr| indent_fmt(expr, indent_level + 1))
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(spread) = &list.spread {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}Spread:\n{}",
            "-".repeat(indent_level + 1),
            indent_fmt(spread.as_ref(), indent_level + 2)
        ));
    }
    if out.is_empty() {
        out
    } else {
        format!("\n{}", out)
    }
}

pub fn indent_fmt<T: PrintIndent>(object: &T, indent_level: usize) -> String {
    format!("{}{}", "-".repeat(indent_level), object.print_indent(indent_level))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", indent_fmt(self, 0))
    }
}
