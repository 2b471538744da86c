use std::rc::Rc;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
        value::{Class, Method},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - a class definition,
    /// - an `if`/`else` statement,
    /// - a `print` statement,
    /// - a `return` statement (inside a method body only),
    /// - an assignment or field assignment,
    /// - an expression used as a statement.
    ///
    /// The first token decides the form; the assignment-versus-expression
    /// ambiguity is resolved by bounded lookahead over the token buffer.
    pub(in crate::interpreter::parser) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.lexer.current() {
            Token::Class => self.parse_class_definition(),
            Token::If => self.parse_if_else(),
            Token::Print => self.parse_print(),
            Token::Return => self.parse_return(),
            _ => self.parse_assignment_or_expression(),
        }
    }

    /// Parses a class definition.
    ///
    /// Syntax:
    /// ```text
    ///     class Name:
    ///     class Name(Parent):
    /// ```
    /// followed by an indented block of one or more method definitions. The
    /// parent must already be declared. The finished class is recorded in the
    /// parser's class table so later `Name(args)` expressions instantiate it.
    fn parse_class_definition(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.next()?;
        let name = self.expect_id()?;

        let parent = if *self.lexer.current() == Token::Char(b'(') {
            self.lexer.next()?;
            let parent_name = self.expect_id()?;
            let Some(parent) = self.classes.get(&parent_name).cloned() else {
                return Err(ParseError::UnknownClass { name: parent_name,
                                                      line });
            };
            self.expect_char(b')')?;
            Some(parent)
        } else {
            None
        };

        self.expect_char(b':')?;
        self.lexer.expect(TokenKind::Newline)?;
        self.lexer.expect_next(TokenKind::Indent)?;
        self.lexer.next()?;

        let mut methods = Vec::new();
        while *self.lexer.current() == Token::Def {
            methods.push(self.parse_method()?);
        }
        self.lexer.expect(TokenKind::Dedent)?;
        self.lexer.next()?;

        let class = Rc::new(Class::new(name.clone(), methods, parent));
        self.classes.insert(name, Rc::clone(&class));

        Ok(Statement::ClassDefinition { class, line })
    }

    /// Parses one method definition inside a class body:
    /// `def name(params): suite`.
    fn parse_method(&mut self) -> ParseResult<Method> {
        let line = self.lexer.line();
        self.lexer.next()?;
        let name = self.expect_id()?;
        self.expect_char(b'(')?;

        let mut formal_params = Vec::new();
        if *self.lexer.current() != Token::Char(b')') {
            loop {
                formal_params.push(self.expect_id()?);
                if *self.lexer.current() == Token::Char(b',') {
                    self.lexer.next()?;
                } else {
                    break;
                }
            }
        }
        self.expect_char(b')')?;
        self.expect_char(b':')?;

        let was_in_method = std::mem::replace(&mut self.in_method, true);
        let body = self.parse_suite();
        self.in_method = was_in_method;

        Ok(Method { name,
                    formal_params,
                    body: Statement::MethodBody { body: Box::new(body?),
                                                  line } })
    }

    /// Parses `if expr: suite` with an optional `else: suite`.
    fn parse_if_else(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.next()?;
        let condition = self.parse_expression()?;
        self.expect_char(b':')?;
        let then_body = self.parse_suite()?;

        let else_body = if *self.lexer.current() == Token::Else {
            self.lexer.next()?;
            self.expect_char(b':')?;
            Some(Box::new(self.parse_suite()?))
        } else {
            None
        };

        Ok(Statement::IfElse { condition,
                               then_body: Box::new(then_body),
                               else_body,
                               line })
    }

    /// Parses `print` with zero or more comma-separated arguments.
    fn parse_print(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        self.lexer.next()?;

        let mut args = Vec::new();
        if *self.lexer.current() != Token::Newline {
            loop {
                args.push(self.parse_expression()?);
                if *self.lexer.current() == Token::Char(b',') {
                    self.lexer.next()?;
                } else {
                    break;
                }
            }
        }
        self.expect_newline()?;

        Ok(Statement::Print { args, line })
    }

    /// Parses `return expr`, which is only valid inside a method body.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();
        if !self.in_method {
            return Err(ParseError::ReturnOutsideMethod { line });
        }
        self.lexer.next()?;
        let expr = self.parse_expression()?;
        self.expect_newline()?;

        Ok(Statement::Return { expr, line })
    }

    /// Parses an assignment, a field assignment, or an expression statement.
    ///
    /// A statement starting with an identifier could be either `target =
    /// expr` or an expression such as a method call. The target shape —
    /// dotted identifiers followed by a lone `=` — is tried first; when it
    /// does not match, the cursor rewinds over the append-only token buffer
    /// and the statement parses as an expression.
    fn parse_assignment_or_expression(&mut self) -> ParseResult<Statement> {
        let line = self.lexer.line();

        if let Token::Id(_) = self.lexer.current() {
            let start = self.lexer.pos();
            if let Some(statement) = self.parse_assignment(line)? {
                return Ok(statement);
            }
            self.lexer.seek(start);
        }

        let expr = self.parse_expression()?;
        self.expect_newline()?;
        Ok(Statement::Expression { expr, line })
    }

    /// Tries to parse `target = expr`. Returns `Ok(None)` without a verdict
    /// on the consumed tokens when the lookahead shows the statement is not
    /// an assignment; the caller rewinds.
    fn parse_assignment(&mut self, line: usize) -> ParseResult<Option<Statement>> {
        let mut ids = vec![self.expect_id()?];
        while *self.lexer.current() == Token::Char(b'.') {
            self.lexer.next()?;
            match self.lexer.current() {
                Token::Id(name) => {
                    ids.push(name.clone());
                    self.lexer.next()?;
                },
                _ => return Ok(None),
            }
        }

        if *self.lexer.current() != Token::Char(b'=') {
            return Ok(None);
        }
        self.lexer.next()?;

        let value = self.parse_expression()?;
        self.expect_newline()?;

        let Some(field) = ids.pop() else {
            return Ok(None);
        };
        let statement = if ids.is_empty() {
            Statement::Assignment { var: field,
                                    value,
                                    line }
        } else {
            Statement::FieldAssignment { object: Expr::Variable { ids, line },
                                         field,
                                         value,
                                         line }
        };
        Ok(Some(statement))
    }
}
