/// Parser module for the command language
///
/// This module turns one line of command text into a `Statement`. It is a
/// recursive-descent parser over the lexer's tokens with a single token of
/// lookahead, and it stops at the first mismatch.
///
/// ```text
/// statement      := use_stmt | create_ns_stmt | drop_ns_stmt | show_ns_stmt
/// use_stmt       := "USE" WS namespace
/// create_ns_stmt := "CREATE" WS "NAMESPACE" WS namespace
/// drop_ns_stmt   := "DROP" WS "NAMESPACE" WS namespace
/// show_ns_stmt   := "SHOW" WS "NAMESPACES"
/// namespace      := identifier ("." identifier)*
/// ```

pub mod ast;
pub mod lexer;
pub mod token;

use self::ast::{
    CreateNamespaceStatement, DropNamespaceStatement, ShowNamespacesStatement, Statement,
    UseStatement,
};
use self::lexer::Lexer;
use self::token::{Keyword, Lexeme, Position, Token};
use tessera_common::{NameError, NamespaceName};
use thiserror::Error;
use tracing::trace;

/// Expectation reported when no statement keyword starts the input
const STATEMENT_KEYWORDS: &str = "USE, CREATE, SHOW, DROP";

/// Errors produced while parsing a statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token stream did not match the grammar
    #[error("found {found}, expected {expected} at {pos}")]
    Syntax {
        found: String,
        expected: String,
        pos: Position,
    },

    #[error("invalid namespace: {0}")]
    InvalidNamespace(#[from] NameError),
}

impl ParseError {
    fn syntax(lexeme: &Lexeme, expected: &str) -> Self {
        ParseError::Syntax {
            found: lexeme.token.literal(),
            expected: expected.to_string(),
            pos: lexeme.pos,
        }
    }

    /// Position of the offending token, if the error has one
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Syntax { pos, .. } => Some(*pos),
            ParseError::InvalidNamespace(_) => None,
        }
    }
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse exactly one statement from `input`
pub fn parse_statement(input: &str) -> ParseResult<Statement> {
    Parser::new(input).parse_statement()
}

/// Parser for converting command text into a statement
pub struct Parser<'a> {
    /// The lexer that tokenizes the input
    lexer: Lexer<'a>,
    /// A token pushed back by `unscan`
    buffered: Option<Lexeme>,
}

impl<'a> Parser<'a> {
    /// Create a new parser from an input string
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            buffered: None,
        }
    }

    /// Parse a single statement; trailing whitespace is allowed, anything
    /// else after the statement is an error
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let lexeme = self.scan_ignore_whitespace();

        let statement = match lexeme.token {
            Token::Keyword(Keyword::Use) => self.parse_use_statement()?,
            Token::Keyword(Keyword::Create) => self.parse_create_namespace_statement()?,
            Token::Keyword(Keyword::Drop) => self.parse_drop_namespace_statement()?,
            Token::Keyword(Keyword::Show) => self.parse_show_namespaces_statement()?,
            _ => return Err(ParseError::syntax(&lexeme, STATEMENT_KEYWORDS)),
        };

        self.expect_end()?;
        trace!(%statement, "Parsed statement");

        Ok(statement)
    }

    /// Parse the rest of `USE <namespace>`
    fn parse_use_statement(&mut self) -> ParseResult<Statement> {
        let namespace = self.parse_namespace()?;
        Ok(Statement::Use(UseStatement::new(namespace)))
    }

    /// Parse the rest of `CREATE NAMESPACE <namespace>`
    fn parse_create_namespace_statement(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Namespace)?;
        let namespace = self.parse_namespace()?;
        Ok(Statement::CreateNamespace(CreateNamespaceStatement::new(namespace)))
    }

    /// Parse the rest of `DROP NAMESPACE <namespace>`
    fn parse_drop_namespace_statement(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Namespace)?;
        let namespace = self.parse_namespace()?;
        Ok(Statement::DropNamespace(DropNamespaceStatement::new(namespace)))
    }

    /// Parse the rest of `SHOW NAMESPACES`
    fn parse_show_namespaces_statement(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Namespaces)?;
        Ok(Statement::ShowNamespaces(ShowNamespacesStatement::new()))
    }

    /// Parse a dotted namespace path.
    ///
    /// Whitespace before the path is skipped, whitespace inside it is not.
    fn parse_namespace(&mut self) -> ParseResult<NamespaceName> {
        let first = self.scan_ignore_whitespace();
        let mut segments = match first.token {
            Token::Identifier(segment) => vec![segment],
            _ => return Err(ParseError::syntax(&first, "namespace")),
        };

        loop {
            let separator = self.scan();
            if separator.token != Token::Dot {
                self.unscan(separator);
                break;
            }

            let segment = self.scan();
            match segment.token {
                Token::Identifier(identifier) => segments.push(identifier),
                _ => return Err(ParseError::syntax(&segment, "identifier")),
            }
        }

        Ok(NamespaceName::from_segments(segments)?)
    }

    /// Consume the given keyword or fail
    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        let lexeme = self.scan_ignore_whitespace();
        if lexeme.token == Token::Keyword(keyword) {
            Ok(())
        } else {
            Err(ParseError::syntax(&lexeme, keyword.as_str()))
        }
    }

    /// Require that nothing but whitespace remains
    fn expect_end(&mut self) -> ParseResult<()> {
        let lexeme = self.scan_ignore_whitespace();
        if lexeme.token == Token::Eof {
            Ok(())
        } else {
            Err(ParseError::syntax(&lexeme, "EOF"))
        }
    }

    /// Next token, from the pushback buffer if one is waiting
    fn scan(&mut self) -> Lexeme {
        match self.buffered.take() {
            Some(lexeme) => lexeme,
            None => self.lexer.next_token(),
        }
    }

    /// Next token that is not whitespace
    fn scan_ignore_whitespace(&mut self) -> Lexeme {
        let lexeme = self.scan();
        match lexeme.token {
            Token::Whitespace(_) => self.scan(),
            _ => lexeme,
        }
    }

    /// Push a token back; only one token is ever buffered
    fn unscan(&mut self, lexeme: Lexeme) {
        debug_assert!(self.buffered.is_none());
        self.buffered = Some(lexeme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct TestCase {
        input: &'static str,
        statement: Option<Statement>,
        error: &'static str,
    }

    fn ok(input: &'static str, statement: Statement) -> TestCase {
        TestCase {
            input,
            statement: Some(statement),
            error: "",
        }
    }

    fn err(input: &'static str, error: &'static str) -> TestCase {
        TestCase {
            input,
            statement: None,
            error,
        }
    }

    fn name(s: &str) -> NamespaceName {
        s.parse().unwrap()
    }

    fn validate(tests: Vec<TestCase>) {
        for (i, tt) in tests.into_iter().enumerate() {
            let result = parse_statement(tt.input);
            match (tt.statement, result) {
                (Some(expected), Ok(actual)) => {
                    assert_eq!(expected, actual, "{}. {:?}: statement mismatch", i, tt.input)
                }
                (None, Err(e)) => {
                    assert_eq!(tt.error, e.to_string(), "{}. {:?}: error mismatch", i, tt.input)
                }
                (expected, actual) => panic!(
                    "{}. {:?}: expected {:?} / {:?}, got {:?}",
                    i, tt.input, expected, tt.error, actual
                ),
            }
        }
    }

    #[test]
    fn test_invalid_statement() {
        validate(vec![
            err(
                "a bad statement.",
                "found a, expected USE, CREATE, SHOW, DROP at line 1, char 1",
            ),
            err("", "found EOF, expected USE, CREATE, SHOW, DROP at line 1, char 1"),
            err(
                "use acme",
                "found use, expected USE, CREATE, SHOW, DROP at line 1, char 1",
            ),
            err(
                "NAMESPACE acme",
                "found NAMESPACE, expected USE, CREATE, SHOW, DROP at line 1, char 1",
            ),
        ]);
    }

    #[test]
    fn test_use_statement() {
        validate(vec![
            ok(
                "USE acme.example",
                Statement::Use(UseStatement::new(name("acme.example"))),
            ),
            ok("USE acme", Statement::Use(UseStatement::new(name("acme")))),
            ok(
                "USE acme.example.dynamite",
                Statement::Use(UseStatement::new(name("acme.example.dynamite"))),
            ),
            err("USE ", "found EOF, expected namespace at line 1, char 6"),
            err("USE acme.example.", "found EOF, expected identifier at line 1, char 18"),
            err("USE acme.example. ", "found WS, expected identifier at line 1, char 18"),
            err("USE .example", "found ., expected namespace at line 1, char 5"),
            err("USE acme..example", "found ., expected identifier at line 1, char 10"),
            err("USE SHOW", "found SHOW, expected namespace at line 1, char 5"),
        ]);
    }

    #[test]
    fn test_create_namespace() {
        validate(vec![
            ok(
                "CREATE NAMESPACE acme",
                Statement::CreateNamespace(CreateNamespaceStatement::new(name("acme"))),
            ),
            ok(
                "CREATE NAMESPACE acme.example",
                Statement::CreateNamespace(CreateNamespaceStatement::new(name("acme.example"))),
            ),
            err("CREATE ", "found EOF, expected NAMESPACE at line 1, char 9"),
            err("CREATE NAMESPACE ", "found EOF, expected namespace at line 1, char 19"),
            err(
                "CREATE NAMESPACE acme.example.",
                "found EOF, expected identifier at line 1, char 31",
            ),
            err(
                "CREATE NAMESPACE acme.example. ",
                "found WS, expected identifier at line 1, char 31",
            ),
            err("CREATE NAMESPACE .example", "found ., expected namespace at line 1, char 18"),
            err("CREATE TABLE acme", "found TABLE, expected NAMESPACE at line 1, char 8"),
        ]);
    }

    #[test]
    fn test_drop_namespace() {
        validate(vec![
            ok(
                "DROP NAMESPACE acme",
                Statement::DropNamespace(DropNamespaceStatement::new(name("acme"))),
            ),
            err("DROP ", "found EOF, expected NAMESPACE at line 1, char 7"),
            err("DROP NAMESPACE ", "found EOF, expected namespace at line 1, char 17"),
            err(
                "DROP NAMESPACE acme.example.",
                "found EOF, expected identifier at line 1, char 29",
            ),
            err(
                "DROP NAMESPACE acme.example. ",
                "found WS, expected identifier at line 1, char 29",
            ),
            err("DROP NAMESPACE .example", "found ., expected namespace at line 1, char 16"),
        ]);
    }

    #[test]
    fn test_show_namespaces() {
        validate(vec![
            ok(
                "SHOW NAMESPACES",
                Statement::ShowNamespaces(ShowNamespacesStatement::new()),
            ),
            err("SHOW ", "found EOF, expected NAMESPACES at line 1, char 7"),
            err("SHOW NAMESPACE", "found NAMESPACE, expected NAMESPACES at line 1, char 6"),
        ]);
    }

    #[test]
    fn test_trailing_input() {
        validate(vec![
            ok("USE acme   ", Statement::Use(UseStatement::new(name("acme")))),
            ok(
                "  SHOW   NAMESPACES",
                Statement::ShowNamespaces(ShowNamespacesStatement::new()),
            ),
            err("USE acme example", "found example, expected EOF at line 1, char 10"),
            err(
                "SHOW NAMESPACES NAMESPACES",
                "found NAMESPACES, expected EOF at line 1, char 17",
            ),
        ]);
    }

    #[test]
    fn test_illegal_characters() {
        validate(vec![
            err("$USE acme", "found $, expected USE, CREATE, SHOW, DROP at line 1, char 1"),
            err("USE $", "found $, expected namespace at line 1, char 5"),
            err("USE acme.$", "found $, expected identifier at line 1, char 10"),
            err("USE acme$", "found $, expected EOF at line 1, char 9"),
            err("DROP NAMESPACE acme-example", "found -, expected EOF at line 1, char 20"),
        ]);

        let error = parse_statement("USE ac#me").unwrap_err();
        assert_eq!(error.position(), Some(Position::new(1, 7)));
    }

    #[test]
    fn test_multiline_position() {
        validate(vec![err(
            "CREATE\nNAMESPACE\n.acme",
            "found ., expected namespace at line 3, char 1",
        )]);
    }
}
