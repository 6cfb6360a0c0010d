/// Token module for the command parser
///
/// This module defines the tokens produced by the command lexer and the
/// positions attached to them.

use std::fmt;

/// Reserved words of the command language, matched case-sensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Use,
    Create,
    Namespace,
    Namespaces,
    Show,
    Drop,
}

impl Keyword {
    /// Every keyword, in lookup order
    pub const ALL: [Keyword; 6] = [
        Keyword::Use,
        Keyword::Create,
        Keyword::Namespace,
        Keyword::Namespaces,
        Keyword::Show,
        Keyword::Drop,
    ];

    /// The source text of this keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Use => "USE",
            Keyword::Create => "CREATE",
            Keyword::Namespace => "NAMESPACE",
            Keyword::Namespaces => "NAMESPACES",
            Keyword::Show => "SHOW",
            Keyword::Drop => "DROP",
        }
    }

    /// Look up a keyword by its exact source text
    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|k| k.as_str() == word)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types for the command language
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Keyword (e.g., "USE", "CREATE")
    Keyword(Keyword),
    /// Identifier, one namespace segment
    Identifier(String),
    /// Segment separator `.`
    Dot,
    /// A run of whitespace
    Whitespace(String),
    /// End of input
    Eof,
    /// A character the language does not know
    Illegal(char),
}

impl Token {
    /// How the token is named in diagnostics
    pub fn literal(&self) -> String {
        match self {
            Token::Keyword(keyword) => keyword.as_str().to_string(),
            Token::Identifier(identifier) => identifier.clone(),
            Token::Dot => ".".to_string(),
            Token::Whitespace(_) => "WS".to_string(),
            Token::Eof => "EOF".to_string(),
            Token::Illegal(c) => c.to_string(),
        }
    }
}

/// 1-based line and character of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub char: usize,
}

impl Position {
    pub fn new(line: usize, char: usize) -> Self {
        Self { line, char }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, char {}", self.line, self.char)
    }
}

/// A token together with the position of its first character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub pos: Position,
}
