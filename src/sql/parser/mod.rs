use std::iter::Peekable;
use std::vec::IntoIter;

use crate::error::{Error, Result};
use crate::sql::parser::lexer::{Keyword, Token};
use crate::sql::schema::ColumnDef;
use crate::sql::types::{ColumnType, Value};

pub mod ast;
pub mod lexer;

/// Parses exactly one SQL statement
///
/// The whole input is tokenized before parsing starts, so lexical errors
/// take precedence over grammar errors.
pub fn parse(sql: &str) -> Result<ast::Statement> {
    let stmt = Parser::new(lexer::tokenize(sql)?).parse()?;
    tracing::debug!(?stmt, "parsed statement");
    Ok(stmt)
}

/// SQL Parser - Converts tokens into Abstract Syntax Tree (AST)
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    /// Creates a new parser over an already tokenized input
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
        }
    }

    /// Parses the tokens into a single AST statement
    pub fn parse(&mut self) -> Result<ast::Statement> {
        let stmt = self.parse_statement()?;
        // No tokens allowed after the statement
        if let Some(token) = self.peek() {
            return Err(Error::Parse(format!(
                "[Parser] Unexpected token after statement: '{}'",
                token
            )));
        }
        Ok(stmt)
    }

    /// Parses a statement based on the first token
    fn parse_statement(&mut self) -> Result<ast::Statement> {
        match self.peek() {
            Some(t) if t.is_keyword(Keyword::Create) => self.parse_create_table(),
            Some(t) if t.is_keyword(Keyword::Insert) => self.parse_insert(),
            Some(t) if t.is_keyword(Keyword::Select) => self.parse_select(),
            Some(t) => Err(Error::Parse(format!(
                "[Parser] Unknown statement starting with '{}'",
                t
            ))),
            None => Err(Error::Parse("[Parser] Unexpected end of input".into())),
        }
    }

    /// Parses CREATE TABLE statement
    fn parse_create_table(&mut self) -> Result<ast::Statement> {
        self.next_expect_keyword(Keyword::Create)?;
        self.next_expect_keyword(Keyword::Table)?;
        let name = self.next_ident()?;
        self.next_expect(Token::OpenParen)?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column()?);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;
        self.next_if_token(Token::Semicolon);
        Ok(ast::Statement::CreateTable { name, columns })
    }

    /// Parses column definition in CREATE TABLE
    fn parse_column(&mut self) -> Result<ColumnDef> {
        let name = self.next_ident()?;
        let column_type = ColumnType::from_sql(&self.next_ident()?)?;
        Ok(ColumnDef::new(name, column_type))
    }

    /// Parses INSERT statement
    fn parse_insert(&mut self) -> Result<ast::Statement> {
        self.next_expect_keyword(Keyword::Insert)?;
        self.next_expect_keyword(Keyword::Into)?;
        let table_name = self.next_ident()?;
        self.next_expect_keyword(Keyword::Values)?;
        self.next_expect(Token::OpenParen)?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;
        self.next_if_token(Token::Semicolon);
        Ok(ast::Statement::Insert { table_name, values })
    }

    /// Parses a literal in a VALUES list
    fn parse_literal(&mut self) -> Result<Value> {
        match self.next("NUMBER or STRING literal")? {
            Token::Number(n) => match n.parse() {
                Ok(i) => Ok(Value::Integer(i)),
                Err(_) => Err(Error::Parse(format!(
                    "[Parser] Integer literal out of range: '{}'",
                    n
                ))),
            },
            Token::String(s) => Ok(Value::Text(s)),
            token => Err(Error::Parse(format!(
                "[Parser] Expected NUMBER or STRING literal, got {} ('{}')",
                token.kind(),
                token
            ))),
        }
    }

    /// Parses SELECT statement
    fn parse_select(&mut self) -> Result<ast::Statement> {
        self.next_expect_keyword(Keyword::Select)?;

        let columns = if self.next_if_token(Token::Asterisk).is_some() {
            None
        } else {
            let mut cols = Vec::new();
            loop {
                cols.push(self.next_ident()?);
                if self.next_if_token(Token::Comma).is_none() {
                    break;
                }
            }
            Some(cols)
        };

        self.next_expect_keyword(Keyword::From)?;
        let table_name = self.next_ident()?;
        self.next_if_token(Token::Semicolon);
        Ok(ast::Statement::Select {
            table_name,
            columns,
        })
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Option<Token> {
        self.tokens.peek().cloned()
    }

    /// Consumes and returns the next token, `expected` names what was wanted
    fn next(&mut self, expected: &str) -> Result<Token> {
        self.tokens.next().ok_or_else(|| {
            Error::Parse(format!("[Parser] Expected {}, got end of input", expected))
        })
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next("IDENT")? {
            Token::Ident(ident) => Ok(ident),
            token => Err(Error::Parse(format!(
                "[Parser] Expected IDENT, got {} ('{}')",
                token.kind(),
                token
            ))),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next(expect.kind())?;
        if token != expect {
            return Err(Error::Parse(format!(
                "[Parser] Expected {}, got {} ('{}')",
                expect.kind(),
                token.kind(),
                token
            )));
        }
        Ok(())
    }

    /// Expects an identifier spelling the given keyword
    fn next_expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        let token = self.next(&format!("keyword {}", keyword))?;
        if !token.is_keyword(keyword) {
            return Err(Error::Parse(format!(
                "[Parser] Expected keyword {}, got '{}'",
                keyword, token
            )));
        }
        Ok(())
    }

    /// Consumes next token if it satisfies the predicate
    fn next_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> Option<Token> {
        self.tokens.next_if(|t| predicate(t))
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.next_if(|t| t == &token)
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::{
        error::{Error, Result},
        sql::{
            parser::ast::Statement,
            schema::ColumnDef,
            types::{ColumnType, Value},
        },
    };

    fn parse_err(sql: &str) -> String {
        match parse(sql) {
            Err(Error::Parse(msg)) => msg,
            other => panic!("expected parse error for {:?}, got {:?}", sql, other),
        }
    }

    fn assert_parse_err(sql: &str, expected: &str) {
        let msg = parse_err(sql);
        assert!(msg.contains(expected), "got {:?}", msg);
    }

    #[test]
    fn test_parser_create_table() -> Result<()> {
        let stmt1 = parse("CREATE TABLE Users (id INT, name text, active Bool);")?;
        assert_eq!(
            stmt1,
            Statement::CreateTable {
                name: "Users".to_string(),
                columns: vec![
                    ColumnDef::new("id", ColumnType::Int),
                    ColumnDef::new("name", ColumnType::Text),
                    ColumnDef::new("active", ColumnType::Bool),
                ],
            }
        );

        let stmt2 = parse(
            "
            create            table Users (
                id     int,
                name text     ,
                active      bool
            )
            ",
        )?;
        assert_eq!(stmt1, stmt2);
        Ok(())
    }

    #[test]
    fn test_parser_create_table_errors() {
        assert_parse_err("CREATE TABLE t ()", "Expected IDENT, got RPAREN");
        assert_parse_err(
            "CREATE TABLE t (id FLOAT)",
            "Unsupported column type: 'FLOAT'",
        );
        assert_parse_err(
            "CREATE TABLE t (id INT",
            "Expected RPAREN, got end of input",
        );
        assert_parse_err("CREATE INDEX t", "Expected keyword TABLE, got 'INDEX'");
        assert_parse_err("CREATE TABLE t (id INT,)", "Expected IDENT, got RPAREN");
        assert_parse_err("CREATE TABLE t (id)", "Expected IDENT, got RPAREN");
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let stmt = parse("insert into tbl1 values (1, 'a', 300, '');")?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table_name: "tbl1".to_string(),
                values: vec![
                    Value::Integer(1),
                    Value::Text("a".to_string()),
                    Value::Integer(300),
                    Value::Text("".to_string()),
                ],
            }
        );

        // Count is not checked against any schema while parsing
        let stmt = parse("INSERT INTO t VALUES (7)")?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table_name: "t".to_string(),
                values: vec![Value::Integer(7)],
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_insert_errors() -> Result<()> {
        assert_parse_err(
            "INSERT INTO t VALUES (x)",
            "Expected NUMBER or STRING literal, got IDENT ('x')",
        );
        assert_parse_err(
            "INSERT INTO t VALUES ()",
            "Expected NUMBER or STRING literal, got RPAREN",
        );
        assert_parse_err(
            "INSERT INTO t VALUES (1,",
            "Expected NUMBER or STRING literal, got end of input",
        );
        assert_parse_err("INSERT t VALUES (1)", "Expected keyword INTO, got 't'");
        assert_parse_err("INSERT INTO t (a) VALUES (1)", "Expected keyword VALUES");

        // Out of range for a 64-bit integer
        assert_eq!(
            parse_err("INSERT INTO t VALUES (1, 99999999999999999999)"),
            "[Parser] Integer literal out of range: '99999999999999999999'"
        );
        parse("INSERT INTO t VALUES (9223372036854775807)")?;
        Ok(())
    }

    #[test]
    fn test_parser_select() -> Result<()> {
        assert_eq!(
            parse("select * from tbl1;")?,
            Statement::Select {
                table_name: "tbl1".to_string(),
                columns: None,
            }
        );
        assert_eq!(
            parse("SELECT b, a, b FROM T")?,
            Statement::Select {
                table_name: "T".to_string(),
                columns: Some(vec!["b".to_string(), "a".to_string(), "b".to_string()]),
            }
        );
        // Keywords stay usable as names where an identifier is expected
        assert_eq!(
            parse("SELECT values FROM select")?,
            Statement::Select {
                table_name: "select".to_string(),
                columns: Some(vec!["values".to_string()]),
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_select_errors() {
        assert_parse_err("SELECT", "got end of input");
        assert_parse_err("SELECT * t", "Expected keyword FROM, got 't'");
        assert_parse_err("SELECT a, FROM t", "Expected keyword FROM, got 't'");
        assert_parse_err("SELECT *, a FROM t", "Expected keyword FROM, got ','");
        assert_parse_err("SELECT * FROM 't'", "Expected IDENT, got STRING ('t')");
    }

    #[test]
    fn test_parser_statement_errors() {
        assert_parse_err("", "Unexpected end of input");
        assert_parse_err("   ", "Unexpected end of input");
        assert_parse_err("DROP TABLE t", "Unknown statement starting with 'DROP'");
        assert_parse_err("(SELECT * FROM t)", "Unknown statement starting with '('");
        assert_parse_err(
            "SELECT * FROM t; SELECT * FROM t;",
            "Unexpected token after statement: 'SELECT'",
        );
        assert_parse_err("SELECT * FROM t;;", "Unexpected token after statement: ';'");
        // Lexical errors win over grammar errors
        assert_parse_err("DROP @", "Unexpected character at position 5: '@'");
    }
}
