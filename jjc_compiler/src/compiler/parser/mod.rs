//! Builds the abstract syntax tree from the scanned tokens

pub mod stream;

use crate::compiler::common::error::{Error, ErrorKind};
use crate::compiler::common::expr::{Expr, ExprKind, ExprList, Function, FunctionBody, ParamList};
use crate::compiler::common::stmt::{Module, Stmt, StmtKind};
use crate::compiler::common::token::{Source, Token, TokenKind};
use crate::compiler::parser::stream::TokenStream;
use crate::compiler::scanner::Scanner;
use std::mem;
use std::rc::Rc;

/// Scans and parses a single input unit.
pub fn parse_module(uri: &str, text: &str) -> Result<Module, Error> {
    let tokens = Scanner::new(Source::new(uri, text)).scan()?;
    Parser::new(tokens).module()
}

pub struct Parser {
    tokens: TokenStream,
    // Names of the enclosing functions, stamped as a dotted path onto
    // every consumed token.
    context: Vec<String>,
}
impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: TokenStream::new(tokens),
            context: Vec::new(),
        }
    }

    fn next(&mut self) -> Token {
        let context: Rc<str> = format!(".{}", self.context.join(".")).into();
        self.tokens.advance().with_context(context)
    }
    fn at(&self, kind: &TokenKind) -> bool {
        self.at_offset(kind, 0)
    }
    fn at_offset(&self, kind: &TokenKind, offset: usize) -> bool {
        mem::discriminant(&self.tokens.peek_at(offset).kind) == mem::discriminant(kind)
    }
    fn consume(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.next())
        } else {
            None
        }
    }
    fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|kind| self.consume(kind))
    }
    fn expect(&mut self, kind: &TokenKind) -> Result<Token, Error> {
        if self.at(kind) {
            Ok(self.next())
        } else {
            let found = self.tokens.peek();
            Err(Error::new(
                found,
                ErrorKind::ExpectedToken(kind.clone(), found.kind.clone()),
            ))
        }
    }

    pub fn module(mut self) -> Result<Module, Error> {
        let token = self.tokens.peek().clone();
        let doc = if self.at(&TokenKind::STR) {
            Some(self.next().unwrap_string())
        } else {
            None
        };
        let mut packages = Vec::new();
        while self.consume(&TokenKind::Package).is_some() {
            packages.push(self.expect(&TokenKind::STR)?.unwrap_string());
            self.expect(&TokenKind::Semicolon)?;
        }
        if packages.is_empty() {
            packages.push(token.source.uri.clone());
        }
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::Eof) {
            stmts.push(self.statement()?);
        }
        Ok(Module { token, doc, packages, stmts })
    }

    fn statement(&mut self) -> Result<Stmt, Error> {
        let token = self.tokens.peek().clone();
        if self.consume(&TokenKind::Class).is_some() {
            let name = self.expect(&TokenKind::NAME)?.unwrap_string();
            let base = if self.consume(&TokenKind::Extends).is_some() {
                Some(self.expression()?)
            } else {
                None
            };
            self.expect(&TokenKind::LeftBrace)?;
            let mut methods = Vec::new();
            while self.consume(&TokenKind::RightBrace).is_none() {
                let expr = self.primary()?;
                match expr.kind {
                    ExprKind::Function(func) if func.name.is_some() => methods.push(func),
                    _ => return Err(Error::new(&expr.token, ErrorKind::ExpectedNamedFunction)),
                }
            }
            Ok(Stmt::new(StmtKind::Class { name, base, methods }, token))
        } else if self.at_function() {
            let expr = self.primary()?;
            match expr.kind {
                ExprKind::Function(func) if func.name.is_some() => {
                    Ok(Stmt::new(StmtKind::Function(func), token))
                }
                _ => Err(Error::new(
                    &expr.token,
                    ErrorKind::FunctionStatementMustBeNamed,
                )),
            }
        } else if self.at(&TokenKind::LeftBrace) {
            self.block()
        } else if self.consume(&TokenKind::Let).is_some() {
            let name = self.expect(&TokenKind::NAME)?.unwrap_string();
            let init = if self.consume(&TokenKind::Equal).is_some() {
                Some(self.expression()?)
            } else {
                None
            };
            self.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Declaration { name, init }, token))
        } else if self.consume(&TokenKind::If).is_some() {
            let cond = self.expression()?;
            let then = Box::new(self.statement()?);
            let otherwise = if self.consume(&TokenKind::Else).is_some() {
                Some(Box::new(self.statement()?))
            } else {
                None
            };
            Ok(Stmt::new(StmtKind::If { cond, then, otherwise }, token))
        } else if self.consume(&TokenKind::Return).is_some() {
            let expr = self.expression()?;
            self.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Return(expr), token))
        } else {
            let expr = self.expression()?;
            self.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::new(StmtKind::Expression(expr), token))
        }
    }
    fn block(&mut self) -> Result<Stmt, Error> {
        let token = self.expect(&TokenKind::LeftBrace)?;
        let mut stmts = Vec::new();
        while self.consume(&TokenKind::RightBrace).is_none() {
            stmts.push(self.statement()?);
        }
        Ok(Stmt::new(StmtKind::Block(stmts), token))
    }

    fn expression(&mut self) -> Result<Expr, Error> {
        self.conditional()
    }
    // Right-associative: 'a ? b : c ? d : e' groups as 'a ? b : (c ? d : e)'.
    fn conditional(&mut self) -> Result<Expr, Error> {
        let expr = self.or()?;
        if let Some(token) = self.consume(&TokenKind::Question) {
            let true_expr = self.expression()?;
            self.expect(&TokenKind::Colon)?;
            let false_expr = self.conditional()?;
            return Ok(Expr::new(
                ExprKind::Conditional {
                    cond: Box::new(expr),
                    true_expr: Box::new(true_expr),
                    false_expr: Box::new(false_expr),
                },
                token,
            ));
        }
        Ok(expr)
    }
    fn or(&mut self) -> Result<Expr, Error> {
        let mut expr = self.and()?;
        while let Some(token) = self.consume(&TokenKind::Or) {
            expr = Expr::new(
                ExprKind::Binary {
                    op: TokenKind::Or,
                    left: Box::new(expr),
                    right: Box::new(self.and()?),
                },
                token,
            );
        }
        Ok(expr)
    }
    fn and(&mut self) -> Result<Expr, Error> {
        let mut expr = self.not()?;
        while let Some(token) = self.consume(&TokenKind::And) {
            expr = Expr::new(
                ExprKind::Binary {
                    op: TokenKind::And,
                    left: Box::new(expr),
                    right: Box::new(self.not()?),
                },
                token,
            );
        }
        Ok(expr)
    }
    fn not(&mut self) -> Result<Expr, Error> {
        if let Some(token) = self.consume(&TokenKind::Not) {
            let operand = self.comparison()?;
            return Ok(Expr::new(
                ExprKind::Prefix {
                    op: TokenKind::Not,
                    operand: Box::new(operand),
                },
                token,
            ));
        }
        self.comparison()
    }
    // Comparisons don't chain: 'a < b < c' is a parse error on the second '<'.
    fn comparison(&mut self) -> Result<Expr, Error> {
        let expr = self.additive()?;
        if let Some(token) = self.matches(&[
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::Greater,
            TokenKind::HashLess,
            TokenKind::HashGreater,
            TokenKind::HashLessEqual,
            TokenKind::HashGreaterEqual,
        ]) {
            let right = self.additive()?;
            return Ok(Expr::new(
                ExprKind::Binary {
                    op: token.kind.clone(),
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                token,
            ));
        } else if let Some(token) = self.consume(&TokenKind::Is) {
            let op = if self.consume(&TokenKind::Not).is_some() {
                TokenKind::IsNot
            } else {
                TokenKind::Is
            };
            let right = self.additive()?;
            return Ok(Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                token,
            ));
        }
        Ok(expr)
    }
    fn additive(&mut self) -> Result<Expr, Error> {
        let mut expr = self.multiplicative()?;
        while let Some(token) = self.matches(&[
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::HashPlus,
            TokenKind::HashMinus,
        ]) {
            expr = Expr::new(
                ExprKind::Binary {
                    op: token.kind.clone(),
                    left: Box::new(expr),
                    right: Box::new(self.multiplicative()?),
                },
                token,
            );
        }
        Ok(expr)
    }
    fn multiplicative(&mut self) -> Result<Expr, Error> {
        let mut expr = self.prefix()?;
        while let Some(token) = self.matches(&[
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Mod,
            TokenKind::HashStar,
            TokenKind::HashSlash,
            TokenKind::HashMod,
        ]) {
            expr = Expr::new(
                ExprKind::Binary {
                    op: token.kind.clone(),
                    left: Box::new(expr),
                    right: Box::new(self.prefix()?),
                },
                token,
            );
        }
        Ok(expr)
    }
    fn prefix(&mut self) -> Result<Expr, Error> {
        if let Some(token) = self.matches(&[TokenKind::Plus, TokenKind::Minus]) {
            return Ok(Expr::new(
                ExprKind::Prefix {
                    op: token.kind.clone(),
                    operand: Box::new(self.postfix()?),
                },
                token,
            ));
        }
        self.postfix()
    }
    fn postfix(&mut self) -> Result<Expr, Error> {
        let mut expr = self.primary()?;
        loop {
            let token = self.tokens.peek().clone();
            if self.at(&TokenKind::LeftParen)
                || (self.at(&TokenKind::Hash) && self.at_offset(&TokenKind::LeftParen, 1))
            {
                let is_native = self.consume(&TokenKind::Hash).is_some();
                let args = self.expr_list(&TokenKind::LeftParen, &TokenKind::RightParen)?;
                expr = Expr::new(
                    ExprKind::FunctionCall {
                        callee: Box::new(expr),
                        is_native,
                        args,
                    },
                    token,
                );
            } else if self.at(&TokenKind::LeftBracket)
                || (self.at(&TokenKind::Hash) && self.at_offset(&TokenKind::LeftBracket, 1))
            {
                let is_native = self.consume(&TokenKind::Hash).is_some();
                self.expect(&TokenKind::LeftBracket)?;
                let key = Box::new(self.expression()?);
                self.expect(&TokenKind::RightBracket)?;
                expr = if self.consume(&TokenKind::Equal).is_some() {
                    Expr::new(
                        ExprKind::SetItem {
                            owner: Box::new(expr),
                            is_native,
                            key,
                            value: Box::new(self.expression()?),
                        },
                        token,
                    )
                } else {
                    Expr::new(
                        ExprKind::GetItem {
                            owner: Box::new(expr),
                            is_native,
                            key,
                        },
                        token,
                    )
                };
            } else if let Some(op) = self.matches(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
                expr = Expr::new(
                    ExprKind::Postfix {
                        op: op.kind.clone(),
                        operand: Box::new(expr),
                    },
                    op,
                );
            } else if let Some(op) = self.matches(&[
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
                TokenKind::ModEqual,
            ]) {
                expr = Expr::new(
                    ExprKind::CompoundAssign {
                        target: Box::new(expr),
                        op: op.kind.clone(),
                        value: Box::new(self.expression()?),
                    },
                    op,
                );
            } else if self.at(&TokenKind::Dot) || self.at(&TokenKind::Hash) {
                let is_native = self.consume(&TokenKind::Hash).is_some();
                if !is_native {
                    self.expect(&TokenKind::Dot)?;
                }
                let name = self.expect(&TokenKind::NAME)?.unwrap_string();
                expr = if self.at(&TokenKind::LeftParen) {
                    let args = self.expr_list(&TokenKind::LeftParen, &TokenKind::RightParen)?;
                    Expr::new(
                        ExprKind::MethodCall {
                            owner: Box::new(expr),
                            is_native,
                            name,
                            args,
                        },
                        token,
                    )
                } else if self.consume(&TokenKind::Equal).is_some() {
                    Expr::new(
                        ExprKind::SetAttribute {
                            owner: Box::new(expr),
                            is_native,
                            name,
                            value: Box::new(self.expression()?),
                        },
                        token,
                    )
                } else {
                    Expr::new(
                        ExprKind::GetAttribute {
                            owner: Box::new(expr),
                            is_native,
                            name,
                        },
                        token,
                    )
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }
    fn primary(&mut self) -> Result<Expr, Error> {
        if self.at_function() || self.at_arrow_function() {
            return self.function();
        }
        let token = self.tokens.peek().clone();
        if self.consume(&TokenKind::LeftParen).is_some() {
            let expr = self.expression()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(expr);
        }
        if let Some(token) = self.consume(&TokenKind::Null) {
            return Ok(Expr::new(ExprKind::Null, token));
        }
        if let Some(token) = self.consume(&TokenKind::True) {
            return Ok(Expr::new(ExprKind::True, token));
        }
        if let Some(token) = self.consume(&TokenKind::False) {
            return Ok(Expr::new(ExprKind::False, token));
        }
        if self.at(&TokenKind::NUMBER) {
            let token = self.next();
            let value = token.unwrap_string();
            return Ok(Expr::new(ExprKind::Number(value), token));
        }
        if self.at(&TokenKind::STR) {
            let token = self.next();
            let value = token.unwrap_string();
            return Ok(Expr::new(ExprKind::Str(value), token));
        }
        if self.at(&TokenKind::LeftBracket) {
            let list = self.expr_list(&TokenKind::LeftBracket, &TokenKind::RightBracket)?;
            return Ok(Expr::new(ExprKind::List(list), token));
        }
        if let Some(token) = self.consume(&TokenKind::New) {
            let class = Box::new(self.primary()?);
            let args = self.expr_list(&TokenKind::LeftParen, &TokenKind::RightParen)?;
            return Ok(Expr::new(ExprKind::New { class, args }, token));
        }
        if let Some(token) = self.consume(&TokenKind::Await) {
            return Ok(Expr::new(
                ExprKind::Await(Box::new(self.expression()?)),
                token,
            ));
        }
        if self.at(&TokenKind::NAME)
            || (self.at(&TokenKind::Hash) && self.at_offset(&TokenKind::NAME, 1))
        {
            let is_native = self.consume(&TokenKind::Hash).is_some();
            let name = self.expect(&TokenKind::NAME)?.unwrap_string();
            return Ok(if self.consume(&TokenKind::Equal).is_some() {
                Expr::new(
                    ExprKind::SetVariable {
                        is_native,
                        name,
                        value: Box::new(self.expression()?),
                    },
                    token,
                )
            } else {
                Expr::new(ExprKind::GetVariable { is_native, name }, token)
            });
        }
        Err(Error::new(
            &token,
            ErrorKind::ExpectedExpression(token.kind.clone()),
        ))
    }

    fn at_function(&self) -> bool {
        self.at(&TokenKind::Async)
            || self.at(&TokenKind::Def)
            || (self.at(&TokenKind::Hash)
                && (self.at_offset(&TokenKind::Def, 1) || self.at_offset(&TokenKind::Async, 1)))
    }
    // Speculative probe: tries to parse a parameter list followed by '=>'
    // and always restores the cursor. The token buffer itself is never
    // written, so the probe leaves no trace beyond the cursor.
    fn at_arrow_function(&mut self) -> bool {
        if self.at(&TokenKind::NAME) && self.at_offset(&TokenKind::FatArrow, 1) {
            return true;
        }
        if !self.at(&TokenKind::LeftParen) {
            return false;
        }
        let checkpoint = self.tokens.checkpoint();
        let is_arrow = self.param_list().is_ok() && self.at(&TokenKind::FatArrow);
        self.tokens.rewind(checkpoint);
        is_arrow
    }
    fn function(&mut self) -> Result<Expr, Error> {
        let token = self.tokens.peek().clone();
        let is_arrow = !self.at_function();
        let is_native = self.consume(&TokenKind::Hash).is_some();
        let is_async = !is_arrow && self.consume(&TokenKind::Async).is_some();
        if !is_arrow {
            self.expect(&TokenKind::Def)?;
        }
        let name = if !is_arrow && self.at(&TokenKind::NAME) {
            Some(self.next().unwrap_string())
        } else {
            None
        };
        let params = if is_arrow && self.at(&TokenKind::NAME) {
            ParamList {
                required: vec![self.next().unwrap_string()],
                optional: Vec::new(),
                rest: None,
            }
        } else {
            self.param_list()?
        };
        if is_arrow {
            self.expect(&TokenKind::FatArrow)?;
        }
        self.context
            .push(name.clone().unwrap_or_else(|| "*".to_string()));
        let body = if is_native {
            FunctionBody::Native(self.expect(&TokenKind::STR)?.unwrap_string())
        } else if !is_arrow || self.at(&TokenKind::LeftBrace) {
            FunctionBody::Block(Box::new(self.block()?))
        } else {
            FunctionBody::Expression(Box::new(self.expression()?))
        };
        self.context.pop();
        Ok(Expr::new(
            ExprKind::Function(Function {
                token: token.clone(),
                name,
                params,
                is_native,
                is_async,
                is_arrow,
                body,
            }),
            token,
        ))
    }
    fn param_list(&mut self) -> Result<ParamList, Error> {
        self.expect(&TokenKind::LeftParen)?;
        let mut required = Vec::new();
        let mut optional = Vec::new();
        let mut rest = None;
        while self.at(&TokenKind::NAME) {
            required.push(self.next().unwrap_string());
            if !self.at(&TokenKind::Slash)
                && !self.at(&TokenKind::Star)
                && !self.at(&TokenKind::RightParen)
            {
                self.expect(&TokenKind::Comma)?;
            }
        }
        while self.consume(&TokenKind::Slash).is_some() {
            optional.push(self.expect(&TokenKind::NAME)?.unwrap_string());
            if !self.at(&TokenKind::Star) && !self.at(&TokenKind::RightParen) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        if self.consume(&TokenKind::Star).is_some() {
            rest = Some(self.expect(&TokenKind::NAME)?.unwrap_string());
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(ParamList { required, optional, rest })
    }
    // A trailing '*expr' spread has to be the final element.
    fn expr_list(&mut self, open: &TokenKind, close: &TokenKind) -> Result<ExprList, Error> {
        let token = self.expect(open)?;
        let mut exprs = Vec::new();
        let mut spread = None;
        while self.consume(close).is_none() {
            if self.consume(&TokenKind::Star).is_some() {
                spread = Some(Box::new(self.expression()?));
                self.expect(close)?;
                break;
            }
            exprs.push(self.expression()?);
            if !self.at(close) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        Ok(ExprList { token, exprs, spread })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(input: &str) -> Module {
        parse_module("<test>", input).unwrap()
    }
    fn setup_expr(input: &str) -> Expr {
        let module = setup(input);
        match module.stmts.into_iter().next().unwrap().kind {
            StmtKind::Expression(expr) => expr,
            kind => panic!("expected expression statement, got {:?}", kind),
        }
    }
    fn setup_err(input: &str) -> ErrorKind {
        parse_module("<test>", input).unwrap_err().kind
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let actual = setup_expr("1 + 2 * 3;").to_string();
        let expected = "Binary: '+'
-Number: 1
-Binary: '*'
--Number: 2
--Number: 3";

        assert_eq!(actual, expected);
    }
    #[test]
    fn conditional_is_right_associative() {
        let actual = setup_expr("a ? b : c ? d : e;").to_string();
        let expected = "Conditional:
-GetVariable: 'a'
-GetVariable: 'b'
-Conditional:
--GetVariable: 'c'
--GetVariable: 'd'
--GetVariable: 'e'";

        assert_eq!(actual, expected);
    }
    #[test]
    fn is_not_fuses_into_single_operator() {
        let expr = setup_expr("a is not b;");

        assert!(matches!(
            expr.kind,
            ExprKind::Binary { op: TokenKind::IsNot, .. }
        ));
    }
    #[test]
    fn parenthesized_params_before_arrow_parse_as_arrow() {
        let expr = setup_expr("(x) => x + 1;");

        match expr.kind {
            ExprKind::Function(func) => {
                assert!(func.is_arrow);
                assert_eq!(func.params.required, vec!["x".to_string()]);
                assert!(matches!(func.body, FunctionBody::Expression(..)));
            }
            kind => panic!("expected arrow function, got {:?}", kind),
        }
    }
    #[test]
    fn bare_name_before_arrow_parses_as_arrow() {
        let expr = setup_expr("x => x;");

        assert!(matches!(
            expr.kind,
            ExprKind::Function(Function { is_arrow: true, .. })
        ));
    }
    #[test]
    fn parenthesized_expression_is_not_an_arrow() {
        let expr = setup_expr("(1 + 2);");

        assert!(matches!(
            expr.kind,
            ExprKind::Binary { op: TokenKind::Plus, .. }
        ));
    }
    #[test]
    fn postfix_chain_combines() {
        let actual = setup_expr("a.b(1)#c[2];").to_string();
        let expected = "GetItem:
-GetAttribute: '#c'
--MethodCall: 'b'
---GetVariable: 'a'
---Number: 1
-Number: 2";

        assert_eq!(actual, expected);
    }
    #[test]
    fn spread_is_last_list_element() {
        let expr = setup_expr("[1, 2, *rest];");

        match expr.kind {
            ExprKind::List(list) => {
                assert_eq!(list.exprs.len(), 2);
                assert!(list.spread.is_some());
            }
            kind => panic!("expected list, got {:?}", kind),
        }
    }
    #[test]
    fn param_list_sections() {
        let module = setup("def f(a, b, /c, *d) {}");

        match &module.stmts[0].kind {
            StmtKind::Function(func) => {
                assert_eq!(func.params.required, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(func.params.optional, vec!["c".to_string()]);
                assert_eq!(func.params.rest, Some("d".to_string()));
            }
            kind => panic!("expected function statement, got {:?}", kind),
        }
    }
    #[test]
    fn packages_default_to_module_uri() {
        assert_eq!(setup("let x = 1;").packages, vec!["<test>".to_string()]);
        assert_eq!(
            setup("package 'a.b'; package 'a.c';").packages,
            vec!["a.b".to_string(), "a.c".to_string()]
        );
    }
    #[test]
    fn leading_string_is_module_doc() {
        let module = setup("'module docs' let x = 1;");

        assert_eq!(module.doc, Some("module docs".to_string()));
        assert_eq!(module.stmts.len(), 1);
    }
    #[test]
    fn consumed_tokens_carry_their_function_context() {
        let module = setup("def f() { g(1); }");

        let func = match &module.stmts[0].kind {
            StmtKind::Function(func) => func,
            kind => panic!("expected function statement, got {:?}", kind),
        };
        let block = match &func.body {
            FunctionBody::Block(stmt) => stmt,
            body => panic!("expected block body, got {:?}", body),
        };
        let args = match &block.kind {
            StmtKind::Block(stmts) => match &stmts[0].kind {
                StmtKind::Expression(Expr {
                    kind: ExprKind::FunctionCall { args, .. },
                    ..
                }) => args,
                kind => panic!("expected call statement, got {:?}", kind),
            },
            kind => panic!("expected block, got {:?}", kind),
        };

        assert_eq!(args.token.context_name(), Some(".f"));
    }
    #[test]
    fn class_body_allows_only_named_functions() {
        assert_eq!(
            setup_err("class A { 5 }"),
            ErrorKind::ExpectedNamedFunction
        );
        assert_eq!(
            setup_err("class A { def() {} }"),
            ErrorKind::ExpectedNamedFunction
        );
    }
    #[test]
    fn function_statement_requires_name() {
        assert_eq!(
            setup_err("def() {}"),
            ErrorKind::FunctionStatementMustBeNamed
        );
    }
    #[test]
    fn missing_operand_err() {
        assert_eq!(
            setup_err("5 + ;"),
            ErrorKind::ExpectedExpression(TokenKind::Semicolon)
        );
    }
    #[test]
    fn missing_semicolon_err() {
        assert_eq!(
            setup_err("let x = 1"),
            ErrorKind::ExpectedToken(TokenKind::Semicolon, TokenKind::Eof)
        );
    }
    #[test]
    fn keyword_without_statement_form_err() {
        assert_eq!(
            setup_err("while true {};"),
            ErrorKind::ExpectedExpression(TokenKind::While)
        );
    }
}
