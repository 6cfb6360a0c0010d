/// Lexer module for the command parser
///
/// This module implements the lexical analyzer (lexer) for the command
/// language, which converts input text into a stream of positioned tokens.
/// Whitespace is returned as a token rather than skipped.

use super::token::{Keyword, Lexeme, Position, Token};
use tessera_common::types::is_identifier_char;

#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

/// Lexer for tokenizing command input
pub struct Lexer<'a> {
    /// The full input text
    input: &'a str,
    /// Where the next read happens
    cursor: Cursor,
    /// Cursor before the last read, restored by `unread`
    previous: Cursor,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from input text
    pub fn new(input: &'a str) -> Self {
        let start = Cursor {
            offset: 0,
            line: 1,
            column: 0,
        };

        Self {
            input,
            cursor: start,
            previous: start,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Lexeme {
        let (ch, pos) = self.read();

        let token = match ch {
            None => Token::Eof,
            Some(c) if c.is_whitespace() => self.scan_whitespace(c),
            Some(c) if is_identifier_char(c) => self.scan_identifier(c),
            Some('.') => Token::Dot,
            Some(c) => Token::Illegal(c),
        };

        Lexeme { token, pos }
    }

    /// Read one character and advance the position.
    ///
    /// Reading at end of input still moves the column forward.
    fn read(&mut self) -> (Option<char>, Position) {
        self.previous = self.cursor;
        let pos = Position::new(self.cursor.line, self.cursor.column + 1);

        let ch = self.input[self.cursor.offset..].chars().next();
        match ch {
            Some('\n') => {
                self.cursor.offset += 1;
                self.cursor.line += 1;
                self.cursor.column = 0;
            }
            Some(c) => {
                self.cursor.offset += c.len_utf8();
                self.cursor.column += 1;
            }
            None => self.cursor.column += 1,
        }

        (ch, pos)
    }

    /// Step back over the last character read
    fn unread(&mut self) {
        self.cursor = self.previous;
    }

    /// Read a run of whitespace
    fn scan_whitespace(&mut self, first: char) -> Token {
        let mut whitespace = String::from(first);

        loop {
            match self.read().0 {
                None => break,
                Some(c) if c.is_whitespace() => whitespace.push(c),
                Some(_) => {
                    self.unread();
                    break;
                }
            }
        }

        Token::Whitespace(whitespace)
    }

    /// Read an identifier or keyword
    fn scan_identifier(&mut self, first: char) -> Token {
        let mut identifier = String::from(first);

        loop {
            match self.read().0 {
                None => break,
                Some(c) if is_identifier_char(c) => identifier.push(c),
                Some(_) => {
                    self.unread();
                    break;
                }
            }
        }

        match Keyword::lookup(&identifier) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(identifier),
        }
    }
}
