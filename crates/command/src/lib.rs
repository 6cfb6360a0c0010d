//! Administrative command language for Tessera
//!
//! Turns one line of operator input such as `CREATE NAMESPACE acme.example`
//! into a typed [`Statement`], or a [`ParseError`] that names the offending
//! token and its line and character.

pub mod parser;

pub use parser::ast::{
    CreateNamespaceStatement, DropNamespaceStatement, ShowNamespacesStatement, Statement,
    StatementKind, UseStatement,
};
pub use parser::token::{Keyword, Lexeme, Position, Token};
pub use parser::{parse_statement, ParseError, ParseResult, Parser};
