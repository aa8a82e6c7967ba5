//! Lowers the AST of a single unit to javascript text

pub mod debug_info;

use crate::compiler::codegen::debug_info::DebugInfo;
use crate::compiler::common::error::{Error, ErrorKind};
use crate::compiler::common::expr::{Expr, ExprKind, ExprList, Function, FunctionBody, ParamList};
use crate::compiler::common::stmt::{Module, Stmt, StmtKind};
use crate::compiler::common::token::{Token, TokenKind};

// Ordinary names are prefixed so they can never collide with javascript
// keywords or globals; native-tagged names are emitted verbatim.
const VARIABLE_PREFIX: &str = "jj";
const ATTRIBUTE_PREFIX: &str = "aa";

struct ContextFrame {
    name: Option<String>,
    is_async: bool,
}

pub struct CodeGenerator {
    context: Vec<ContextFrame>,
    debug_info: DebugInfo,
}
impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator {
            context: Vec::new(),
            debug_info: DebugInfo::new(),
        }
    }
    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug_info
    }

    fn context_name(&self) -> String {
        let parts = self
            .context
            .iter()
            .map(|frame| frame.name.as_deref().unwrap_or("*"))
            .collect::<Vec<_>>();
        format!(".{}", parts.join("."))
    }
    fn inside_async_function(&self) -> bool {
        self.context.last().map_or(false, |frame| frame.is_async)
    }
    fn debug_index(&mut self, token: &Token) -> usize {
        let message = format!(
            "{}@{}@{}",
            self.context_name(),
            token.source.uri,
            token.line_index()
        );
        self.debug_info.intern(message)
    }

    pub fn translate_module(&mut self, module: &Module) -> Result<String, Error> {
        let mut result = String::new();
        for stmt in &module.stmts {
            result.push_str(&self.statement(stmt)?);
        }
        Ok(result)
    }

    fn statement(&mut self, stmt: &Stmt) -> Result<String, Error> {
        match &stmt.kind {
            StmtKind::Expression(expr) => Ok(format!("\n{};", self.outer(expr)?)),
            StmtKind::Class { name, base, methods } => {
                let base = match base {
                    Some(base) => self.outer(base)?,
                    None => format!("{}Object", VARIABLE_PREFIX),
                };
                let mut result = format!(
                    "\nclass {}{} extends {}{{}}",
                    VARIABLE_PREFIX, name, base
                );
                for method in methods {
                    // the parser rejects unnamed class methods
                    if let Some(method_name) = &method.name {
                        result.push_str(&format!(
                            "\n{}{}.prototype.{}{} = {};",
                            VARIABLE_PREFIX,
                            name,
                            ATTRIBUTE_PREFIX,
                            method_name,
                            self.function(method)?
                        ));
                    }
                }
                Ok(result)
            }
            StmtKind::Function(func) => {
                let name = func.name.as_deref().unwrap_or("");
                Ok(format!(
                    "\nconst {}{} = {};",
                    VARIABLE_PREFIX,
                    name,
                    self.function(func)?
                ))
            }
            StmtKind::Block(stmts) => {
                let mut result = String::new();
                for stmt in stmts {
                    result.push_str(&self.statement(stmt)?.replace('\n', "\n  "));
                }
                Ok(format!("\n{{{}\n}}", result))
            }
            StmtKind::Return(expr) => Ok(format!("\nreturn {};", self.outer(expr)?)),
            StmtKind::Declaration { name, init } => {
                let init = match init {
                    Some(init) => format!(" = {}", self.outer(init)?),
                    None => String::new(),
                };
                Ok(format!("\nlet {}{}{};", VARIABLE_PREFIX, name, init))
            }
            StmtKind::If { cond, then, otherwise } => {
                let cond = self.outer(cond)?;
                let then = self.statement(then)?;
                let otherwise = match otherwise {
                    Some(otherwise) => format!("else {}", self.statement(otherwise)?),
                    None => String::new(),
                };
                Ok(format!("\nif ({}){}{}", cond, then, otherwise))
            }
        }
    }

    // Pushes the statement's debug-info index onto the runtime stack for
    // the duration of the evaluation; this is how emitted programs
    // reconstruct stack traces without the host's call stack.
    fn outer(&mut self, expr: &Expr) -> Result<String, Error> {
        let index = self.debug_index(&expr.token);
        let inner = self.inner(expr)?;
        Ok(format!("(stack.push({}),popStack(stack,{}))", index, inner))
    }
    fn inner(&mut self, expr: &Expr) -> Result<String, Error> {
        match &expr.kind {
            ExprKind::Null => Ok("null".to_string()),
            ExprKind::True => Ok("true".to_string()),
            ExprKind::False => Ok("false".to_string()),
            ExprKind::Number(value) => Ok(value.clone()),
            ExprKind::Str(value) => Ok(quote_js(value)),
            ExprKind::List(list) => Ok(format!("[{}]", self.expr_list(list, true)?)),
            ExprKind::GetVariable { is_native, name } => Ok(variable(*is_native, name)),
            ExprKind::SetVariable { is_native, name, value } => Ok(format!(
                "{} = {}",
                variable(*is_native, name),
                self.inner(value)?
            )),
            ExprKind::GetAttribute { owner, is_native, name } => Ok(format!(
                "{}.{}",
                self.inner(owner)?,
                attribute(*is_native, name)
            )),
            ExprKind::SetAttribute { owner, is_native, name, value } => Ok(format!(
                "({}.{} = {})",
                self.inner(owner)?,
                attribute(*is_native, name),
                self.inner(value)?
            )),
            ExprKind::GetItem { owner, is_native, key } => {
                let owner = self.inner(owner)?;
                let key = self.inner(key)?;
                Ok(if *is_native {
                    format!("{}[{}]", owner, key)
                } else {
                    format!("op__getitem__(stack,{},{})", owner, key)
                })
            }
            ExprKind::SetItem { owner, is_native, key, value } => {
                let owner = self.inner(owner)?;
                let key = self.inner(key)?;
                let value = self.inner(value)?;
                Ok(if *is_native {
                    format!("({}[{}] = {})", owner, key, value)
                } else {
                    format!("op__setitem__(stack,{},{},{})", owner, key, value)
                })
            }
            ExprKind::FunctionCall { callee, is_native, args } => Ok(format!(
                "{}({})",
                self.inner(callee)?,
                self.expr_list(args, *is_native)?
            )),
            ExprKind::MethodCall { owner, is_native, name, args } => Ok(format!(
                "{}.{}({})",
                self.inner(owner)?,
                attribute(*is_native, name),
                self.expr_list(args, *is_native)?
            )),
            ExprKind::New { class, args } => Ok(format!(
                "new ({})({})",
                self.inner(class)?,
                self.expr_list(args, false)?
            )),
            ExprKind::Await(operand) => {
                if !self.inside_async_function() {
                    return Err(Error::new(&expr.token, ErrorKind::AwaitOutsideAsync));
                }
                Ok(format!("(yield {})", self.inner(operand)?))
            }
            ExprKind::Prefix { op, operand } => {
                let op = match op {
                    TokenKind::Not => "!",
                    TokenKind::Plus => "+",
                    TokenKind::Minus => "-",
                    op => {
                        return Err(Error::new(
                            &expr.token,
                            ErrorKind::UnknownOperator(op.clone()),
                        ))
                    }
                };
                Ok(format!("({}{})", op, self.inner(operand)?))
            }
            ExprKind::Conditional { cond, true_expr, false_expr } => Ok(format!(
                "({}?{}:{})",
                self.inner(cond)?,
                self.inner(true_expr)?,
                self.inner(false_expr)?
            )),
            ExprKind::Binary { op, left, right } => {
                let left = self.inner(left)?;
                let right = self.inner(right)?;
                // native-tagged and logical operators lower to host infix
                // operators, plain comparisons to the runtime's
                // polymorphic comparison functions
                if let Some(op) = match op {
                    TokenKind::Plus | TokenKind::HashPlus => Some("+"),
                    TokenKind::Minus | TokenKind::HashMinus => Some("-"),
                    TokenKind::Star | TokenKind::HashStar => Some("*"),
                    TokenKind::Slash | TokenKind::HashSlash => Some("/"),
                    TokenKind::Mod | TokenKind::HashMod => Some("%"),
                    TokenKind::Or => Some("||"),
                    TokenKind::And => Some("&&"),
                    TokenKind::Is => Some("==="),
                    TokenKind::IsNot => Some("!=="),
                    TokenKind::HashLess => Some("<"),
                    TokenKind::HashGreater => Some(">"),
                    TokenKind::HashLessEqual => Some("<="),
                    TokenKind::HashGreaterEqual => Some(">="),
                    _ => None,
                } {
                    return Ok(format!("({}{}{})", left, op, right));
                }
                let op = match op {
                    TokenKind::EqualEqual => "op__eq__",
                    TokenKind::BangEqual => "op__ne__",
                    TokenKind::Less => "op__lt__",
                    TokenKind::LessEqual => "op__le__",
                    TokenKind::Greater => "op__gt__",
                    TokenKind::GreaterEqual => "op__ge__",
                    op => {
                        return Err(Error::new(
                            &expr.token,
                            ErrorKind::UnknownOperator(op.clone()),
                        ))
                    }
                };
                Ok(format!("{}(stack,{},{})", op, left, right))
            }
            ExprKind::Postfix { op, operand } => {
                let op = match op {
                    TokenKind::PlusPlus => "++",
                    TokenKind::MinusMinus => "--",
                    op => {
                        return Err(Error::new(
                            &expr.token,
                            ErrorKind::UnknownOperator(op.clone()),
                        ))
                    }
                };
                Ok(format!("({}{})", self.inner(operand)?, op))
            }
            ExprKind::CompoundAssign { target, op, value } => {
                let op = match op {
                    TokenKind::PlusEqual => "+=",
                    TokenKind::MinusEqual => "-=",
                    TokenKind::StarEqual => "*=",
                    TokenKind::SlashEqual => "/=",
                    TokenKind::ModEqual => "%=",
                    op => {
                        return Err(Error::new(
                            &expr.token,
                            ErrorKind::UnknownOperator(op.clone()),
                        ))
                    }
                };
                Ok(format!(
                    "({} {} {})",
                    self.inner(target)?,
                    op,
                    self.inner(value)?
                ))
            }
            ExprKind::Function(func) => self.function(func),
        }
    }

    fn function(&mut self, func: &Function) -> Result<String, Error> {
        if func.is_arrow && func.is_async {
            return Err(Error::new(&func.token, ErrorKind::ArrowCannotBeAsync));
        }
        if func.is_native && func.is_async {
            return Err(Error::new(&func.token, ErrorKind::NativeCannotBeAsync));
        }
        let name = match &func.name {
            None => String::new(),
            Some(name) => variable(func.is_native, name),
        };
        let params = param_list(&func.params, func.is_native);
        self.context.push(ContextFrame {
            name: func.name.clone(),
            is_async: func.is_async,
        });
        let body = match &func.body {
            FunctionBody::Native(text) => text.clone(),
            FunctionBody::Block(stmt) => self.statement(stmt)?,
            FunctionBody::Expression(expr) => self.inner(expr)?,
        };
        self.context.pop();
        Ok(if func.is_arrow {
            format!("{}=>{}", params, body)
        } else if func.is_async {
            format!("asyncf(function* {}{}{})", name, params, body)
        } else {
            format!("function {}{}{}", name, params, body)
        })
    }

    // Non-native calls get the caller's diagnostic stack as a hidden
    // first argument.
    fn expr_list(&mut self, list: &ExprList, is_native: bool) -> Result<String, Error> {
        let mut exprs = Vec::new();
        if !is_native {
            exprs.push("stack".to_string());
        }
        for expr in &list.exprs {
            exprs.push(self.inner(expr)?);
        }
        if let Some(spread) = &list.spread {
            exprs.push(format!("...{}", self.inner(spread)?));
        }
        Ok(exprs.join(","))
    }
}
impl Default for CodeGenerator {
    fn default() -> Self {
        CodeGenerator::new()
    }
}

fn variable(is_native: bool, name: &str) -> String {
    if is_native {
        name.to_string()
    } else {
        format!("{}{}", VARIABLE_PREFIX, name)
    }
}
fn attribute(is_native: bool, name: &str) -> String {
    if is_native {
        name.to_string()
    } else {
        format!("{}{}", ATTRIBUTE_PREFIX, name)
    }
}
fn param_list(params: &ParamList, is_native: bool) -> String {
    let mut result = Vec::new();
    if !is_native {
        result.push("stack".to_string());
    }
    for param in params.required.iter().chain(&params.optional) {
        result.push(format!("{}{}", VARIABLE_PREFIX, param));
    }
    if let Some(rest) = &params.rest {
        result.push(format!("...{}{}", VARIABLE_PREFIX, rest));
    }
    format!("({})", result.join(","))
}

/// Serializes a string as a double-quoted javascript literal.
pub fn quote_js(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if (c as u32) < 0x20 => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parser::parse_module;

    fn setup(input: &str) -> String {
        let module = parse_module("<test>", input).unwrap();
        CodeGenerator::new().translate_module(&module).unwrap()
    }
    fn setup_err(input: &str) -> ErrorKind {
        let module = parse_module("<test>", input).unwrap();
        CodeGenerator::new()
            .translate_module(&module)
            .unwrap_err()
            .kind
    }

    #[test]
    fn native_operators_lower_to_host_infix() {
        let actual = setup("1 #+ 2;");
        let expected = "\n(stack.push(1),popStack(stack,(1+2)));";

        assert_eq!(actual, expected);
    }
    #[test]
    fn plain_comparison_lowers_to_runtime_call() {
        assert!(setup("1 < 2;").contains("op__lt__(stack,1,2)"));
        assert!(setup("1 == 2;").contains("op__eq__(stack,1,2)"));
        assert!(setup("1 #< 2;").contains("(1<2)"));
    }
    #[test]
    fn is_lowers_to_strict_equality() {
        assert!(setup("a is b;").contains("(jja===jjb)"));
        assert!(setup("a is not b;").contains("(jja!==jjb)"));
    }
    #[test]
    fn native_names_are_unprefixed() {
        let actual = setup("#console#log('hi');");

        assert!(actual.contains("console.log(\"hi\")"));
    }
    #[test]
    fn function_statement_lowering() {
        let actual = setup("def f(a, /b, *c) { return a; }");

        assert!(actual.contains("const jjf = function jjf(stack,jja,jjb,...jjc)"));
        assert!(actual.contains("\n  return (stack.push("));
    }
    #[test]
    fn async_function_lowers_to_generator() {
        let actual = setup("async def f() { await g(); }");

        assert!(actual.contains("asyncf(function* jjf(stack)"));
        assert!(actual.contains("(yield jjg(stack))"));
    }
    #[test]
    fn arrow_function_lowering() {
        let actual = setup("let f = (x) => x #+ 1;");

        assert!(actual.contains("(stack,jjx)=>(jjx+1)"));
    }
    #[test]
    fn class_lowers_to_subclass_and_prototype_assignments() {
        let actual = setup("class A { def m() { return 1; } }");

        assert!(actual.contains("\nclass jjA extends jjObject{}"));
        assert!(actual.contains("\njjA.prototype.aam = function jjm(stack)"));
    }
    #[test]
    fn class_base_is_translated() {
        let actual = setup("class A extends B { }");

        assert!(actual.contains("class jjA extends (stack.push("));
        assert!(actual.contains("popStack(stack,jjB))"));
    }
    #[test]
    fn attribute_and_item_lowering() {
        assert!(setup("a.b;").contains("jja.aab"));
        assert!(setup("a#b;").contains("jja.b"));
        assert!(setup("a.b = 1;").contains("(jja.aab = 1)"));
        assert!(setup("a[0];").contains("op__getitem__(stack,jja,0)"));
        assert!(setup("a#[0];").contains("jja[0]"));
        assert!(setup("a[0] = 1;").contains("op__setitem__(stack,jja,0,1)"));
    }
    #[test]
    fn postfix_and_compound_assign_lowering() {
        assert!(setup("x++;").contains("(jjx++)"));
        assert!(setup("x -= 2;").contains("(jjx -= 2)"));
    }
    #[test]
    fn new_passes_the_stack() {
        let actual = setup("new A(1);");

        assert!(actual.contains("new (jjA)(stack,1)"));
    }
    #[test]
    fn spread_argument_lowering() {
        let actual = setup("f(1, *rest);");

        assert!(actual.contains("jjf(stack,1,...jjrest)"));
    }
    #[test]
    fn statements_on_one_line_share_a_debug_entry() {
        let module = parse_module("<test>", "f(); g();").unwrap();
        let mut generator = CodeGenerator::new();
        generator.translate_module(&module).unwrap();

        assert_eq!(
            generator.debug_info().entries(),
            &["??@??@??".to_string(), ".@<test>@1".to_string()]
        );
    }
    #[test]
    fn nested_functions_build_dotted_context_names() {
        let module = parse_module("<test>", "def f() { def g() { h(); } }").unwrap();
        let mut generator = CodeGenerator::new();
        generator.translate_module(&module).unwrap();

        assert!(generator
            .debug_info()
            .entries()
            .contains(&".f.g@<test>@1".to_string()));
    }
    #[test]
    fn await_outside_async_function_err() {
        assert_eq!(setup_err("await f();"), ErrorKind::AwaitOutsideAsync);
        assert_eq!(
            setup_err("def f() { await g(); }"),
            ErrorKind::AwaitOutsideAsync
        );
    }
    #[test]
    fn native_async_function_err() {
        assert_eq!(
            setup_err("#async def f() 'body'"),
            ErrorKind::NativeCannotBeAsync
        );
    }
    #[test]
    fn quote_js_escapes() {
        assert_eq!(quote_js("a\"b"), r#""a\"b""#);
        assert_eq!(quote_js("a\\n"), r#""a\\n""#);
        assert_eq!(quote_js("a\nb\tc"), r#""a\nb\tc""#);
    }
}
