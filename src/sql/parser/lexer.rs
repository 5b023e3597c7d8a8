//! SQL Lexer - Tokenizes SQL input text into a stream of tokens

use std::{fmt::Display, iter::Peekable, str::CharIndices};

use crate::error::{Error, Result};

/// Represents a single lexical token in the SQL input
///
/// Keywords are not distinguished here: they are identifiers that the
/// parser compares against [`Keyword`] case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier, keyword, table name or column name (case preserved)
    Ident(String),
    /// String literal, without the surrounding quotes
    String(String),
    /// Unsigned integer literal
    Number(String),
    /// Punctuation
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Asterisk,
}

impl Token {
    /// Returns the token kind name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Ident(_) => "IDENT",
            Token::String(_) => "STRING",
            Token::Number(_) => "NUMBER",
            Token::OpenParen => "LPAREN",
            Token::CloseParen => "RPAREN",
            Token::Comma => "COMMA",
            Token::Semicolon => "SEMICOLON",
            Token::Asterisk => "STAR",
        }
    }

    /// Returns true if the token is an identifier spelling the given keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Ident(ident) if Keyword::from_str(ident) == Some(keyword))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Token::Ident(ident) => ident,
            Token::String(v) => v,
            Token::Number(n) => n,
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Asterisk => "*",
        })
    }
}

/// SQL reserved keywords
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    // DDL keywords
    Create,
    Table,
    // DML keywords
    Insert,
    Into,
    Values,
    Select,
    From,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "CREATE" => Keyword::Create,
            "TABLE" => Keyword::Table,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Tokenizes the whole input, failing on the first unexpected character
pub fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let tokens = Lexer::new(sql).collect::<Result<Vec<_>>>()?;
    tracing::trace!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}

/// SQL lexical analyzer (lexer/tokenizer)
pub struct Lexer<'a> {
    input: &'a str,
    iter: Peekable<CharIndices<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self
                .iter
                .peek()
                .map(|&(pos, c)| Err(Self::unexpected(pos, c))),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given SQL text
    pub fn new(sql_text: &'a str) -> Self {
        Self {
            input: sql_text,
            iter: sql_text.char_indices().peekable(),
        }
    }

    fn unexpected(pos: usize, c: char) -> Error {
        Error::Parse(format!(
            "[Lexer] Unexpected character at position {}: '{}'",
            pos, c
        ))
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.next_if(|&(_, c)| predicate(c)).map(|(_, c)| c)
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Peeks and consumes if the character maps to a token (for single-char tokens)
    fn next_if_token<F: Fn(char) -> Option<Token>>(&mut self, predicate: F) -> Option<Token> {
        let token = self.iter.peek().and_then(|&(_, c)| predicate(c))?;
        self.iter.next();
        Some(token)
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some(&(pos, '\'')) => self.scan_string(pos).map(Some),
            Some((_, c)) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some((_, c)) if c.is_ascii_alphabetic() || *c == '_' => Ok(self.scan_ident()),
            Some(_) => Ok(self.scan_symbol()),
            None => Ok(None),
        }
    }

    /// Scans a string literal (enclosed in single quotes, no escapes)
    ///
    /// An unterminated literal is reported at its opening quote.
    fn scan_string(&mut self, start: usize) -> Result<Token> {
        let body = &self.input[start + 1..];
        let len = body
            .find('\'')
            .ok_or_else(|| Self::unexpected(start, '\''))?;
        let value = body[..len].to_string();

        // Skip the opening quote, the body and the closing quote
        let end = start + 1 + len;
        while self.iter.next_if(|&(pos, _)| pos <= end).is_some() {}
        Ok(Token::String(value))
    }

    /// Scans an unsigned integer literal
    fn scan_number(&mut self) -> Option<Token> {
        self.next_while(|c| c.is_ascii_digit()).map(Token::Number)
    }

    /// Scans an identifier (keywords included)
    fn scan_ident(&mut self) -> Option<Token> {
        self.next_while(|c| c.is_ascii_alphanumeric() || c == '_')
            .map(Token::Ident)
    }

    /// Scans a single-character symbol token
    fn scan_symbol(&mut self) -> Option<Token> {
        self.next_if_token(|c| match c {
            '*' => Some(Token::Asterisk),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            _ => None,
        })
    }
}
