use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        value::Class,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Builds the abstract syntax tree from the lexer's token stream.
///
/// The parser drives the lexer through its `current`/`next`/`expect*` API and
/// descends recursively through statements and expression precedence levels.
/// Class definitions bind their names at parse time: the parser keeps a class
/// table so that `Name(args)` resolves to an instantiation of a declared
/// class and `class B(A)` resolves its parent, both before execution starts.
pub struct Parser<'src> {
    pub(in crate::interpreter::parser) lexer:     Lexer<'src>,
    pub(in crate::interpreter::parser) classes:   HashMap<String, Rc<Class>>,
    pub(in crate::interpreter::parser) in_method: bool,
}

impl<'src> Parser<'src> {
    /// Creates a parser over a lexer positioned at the first token.
    #[must_use]
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self { lexer,
               classes: HashMap::new(),
               in_method: false, }
    }

    /// Parses a whole program into its root compound statement.
    ///
    /// # Errors
    /// Returns a [`ParseError`] on the first syntax error.
    pub fn parse_program(mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();

        let mut statements = Vec::new();
        while *self.lexer.current() != Token::Eof {
            statements.push(self.parse_statement()?);
        }

        Ok(Statement::Compound { statements, line })
    }

    /// Parses an indented suite: `Newline Indent statement+ Dedent`.
    ///
    /// The suite's statements are collected into a compound; the trailing
    /// `Dedent` is consumed.
    pub(in crate::interpreter::parser) fn parse_suite(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.expect(TokenKind::Newline)?;
        self.lexer.expect_next(TokenKind::Indent)?;
        self.lexer.next()?;

        let mut statements = Vec::new();
        while *self.lexer.current() != Token::Dedent {
            statements.push(self.parse_statement()?);
        }
        self.lexer.next()?;

        Ok(Statement::Compound { statements, line })
    }

    /// Parses an identifier and returns its name, advancing past it.
    pub(in crate::interpreter::parser) fn expect_id(&mut self) -> ParseResult<String> {
        let name = match self.lexer.current() {
            Token::Id(name) => name.clone(),
            token => {
                return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                         line:  self.lexer.line(), });
            },
        };
        self.lexer.next()?;
        Ok(name)
    }

    /// Consumes the given punctuation character.
    pub(in crate::interpreter::parser) fn expect_char(&mut self, c: u8) -> ParseResult<()> {
        self.lexer.expect_value(&Token::Char(c))?;
        self.lexer.next()?;
        Ok(())
    }

    /// Consumes the `Newline` that terminates a simple statement.
    pub(in crate::interpreter::parser) fn expect_newline(&mut self) -> ParseResult<()> {
        self.lexer.expect(TokenKind::Newline)?;
        self.lexer.next()?;
        Ok(())
    }
}
