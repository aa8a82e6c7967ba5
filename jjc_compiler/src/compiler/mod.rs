//! Compiles jj source to a single javascript program in four passes:<br>
//! scanner: text -> tokens<br>
//! parser: tokens -> AST<br>
//! codegen: AST -> javascript text per unit<br>
//! assembler: per-unit text + runtime -> standalone program

pub mod assembler;
pub mod codegen;
pub mod common;
pub mod parser;
pub mod runtime;
pub mod scanner;
