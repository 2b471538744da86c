use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
        value::ObjectHolder,
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, logical OR, and recursively descends through
    /// the precedence hierarchy.
    ///
    /// Grammar: `expression := or_test`
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    /// Grammar: `or_test := and_test ("or" and_test)*`
    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while *self.lexer.current() == Token::Or {
            let line = self.lexer.line();
            self.lexer.next()?;
            let right = self.parse_and()?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op: BinaryOperator::Or,
                                    right: Box::new(right),
                                    line };
        }
        Ok(left)
    }

    /// Grammar: `and_test := not_test ("and" not_test)*`
    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_not()?;
        while *self.lexer.current() == Token::And {
            let line = self.lexer.line();
            self.lexer.next()?;
            let right = self.parse_not()?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op: BinaryOperator::And,
                                    right: Box::new(right),
                                    line };
        }
        Ok(left)
    }

    /// Grammar: `not_test := "not" not_test | comparison`
    fn parse_not(&mut self) -> ParseResult<Expr> {
        if *self.lexer.current() == Token::Not {
            let line = self.lexer.line();
            self.lexer.next()?;
            let expr = self.parse_not()?;
            return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                      expr: Box::new(expr),
                                      line });
        }
        self.parse_comparison()
    }

    /// Grammar: `comparison := arith [comp_op arith]`
    ///
    /// At most one comparison operator is accepted; chains like `a < b < c`
    /// are syntax errors surfacing at the statement terminator.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let left = self.parse_additive()?;

        let op = match self.lexer.current() {
            Token::Eq => BinaryOperator::Equal,
            Token::NotEq => BinaryOperator::NotEqual,
            Token::LessOrEq => BinaryOperator::LessEqual,
            Token::GreaterOrEq => BinaryOperator::GreaterEqual,
            Token::Char(b'<') => BinaryOperator::Less,
            Token::Char(b'>') => BinaryOperator::Greater,
            _ => return Ok(left),
        };

        let line = self.lexer.line();
        self.lexer.next()?;
        let right = self.parse_additive()?;
        Ok(Expr::BinaryOp { left: Box::new(left),
                            op,
                            right: Box::new(right),
                            line })
    }

    /// Grammar: `arith := term (("+" | "-") term)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char(b'+') => BinaryOperator::Add,
                Token::Char(b'-') => BinaryOperator::Sub,
                _ => return Ok(left),
            };
            let line = self.lexer.line();
            self.lexer.next()?;
            let right = self.parse_term()?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
        }
    }

    /// Grammar: `term := atom (("*" | "/") atom)*`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_atom()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char(b'*') => BinaryOperator::Mul,
                Token::Char(b'/') => BinaryOperator::Div,
                _ => return Ok(left),
            };
            let line = self.lexer.line();
            self.lexer.next()?;
            let right = self.parse_atom()?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
        }
    }

    /// Parses an atom: a literal, a parenthesized expression, or a name
    /// chain, each followed by optional call trailers.
    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let line = self.lexer.line();

        match self.lexer.current().clone() {
            Token::Number(value) => {
                self.lexer.next()?;
                Ok(Expr::Literal { value: ObjectHolder::from(value),
                                   line })
            },
            Token::String(value) => {
                self.lexer.next()?;
                Ok(Expr::Literal { value: ObjectHolder::from(value),
                                   line })
            },
            Token::True => {
                self.lexer.next()?;
                Ok(Expr::Literal { value: ObjectHolder::from(true),
                                   line })
            },
            Token::False => {
                self.lexer.next()?;
                Ok(Expr::Literal { value: ObjectHolder::from(false),
                                   line })
            },
            Token::None => {
                self.lexer.next()?;
                Ok(Expr::Literal { value: ObjectHolder::none(),
                                   line })
            },
            Token::Char(b'(') => {
                self.lexer.next()?;
                let expr = self.parse_expression()?;
                self.expect_char(b')')?;
                self.parse_trailers(expr)
            },
            Token::Id(first) => {
                self.lexer.next()?;
                self.parse_name(first, line)
            },
            token => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                       line }),
        }
    }

    /// Parses what follows a leading identifier: a dotted chain, optionally
    /// ending in a call.
    ///
    /// A chain without a call is a variable / field read. A chain ending in
    /// `(` resolves in order to: the `str()` special form, an instantiation
    /// of a declared class, or a method call on the chain's prefix. A bare
    /// call to anything that is not a declared class is an error — the
    /// language has no free functions.
    fn parse_name(&mut self, first: String, line: usize) -> ParseResult<Expr> {
        let mut prefix = Vec::new();
        let mut last = first;
        while *self.lexer.current() == Token::Char(b'.') {
            self.lexer.next()?;
            prefix.push(std::mem::replace(&mut last, self.expect_id()?));
        }

        if *self.lexer.current() != Token::Char(b'(') {
            prefix.push(last);
            return Ok(Expr::Variable { ids: prefix, line });
        }

        let mut args = self.parse_call_args()?;
        let expr = if prefix.is_empty() {
            if last == "str" {
                if let Some(argument) = args.pop()
                   && args.is_empty()
                {
                    Expr::Stringify { argument: Box::new(argument),
                                      line }
                } else {
                    return Err(ParseError::Other { message:
                                                       "str() takes exactly one argument".to_owned(),
                                                   line });
                }
            } else if let Some(class) = self.classes.get(&last) {
                Expr::NewInstance { class: Rc::clone(class),
                                    args,
                                    line }
            } else {
                return Err(ParseError::UnknownClass { name: last, line });
            }
        } else {
            Expr::MethodCall { object: Box::new(Expr::Variable { ids: prefix, line }),
                               method: last,
                               args,
                               line }
        };

        self.parse_trailers(expr)
    }

    /// Parses zero or more `.method(args)` trailers chained on a call or a
    /// parenthesized expression.
    fn parse_trailers(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        while *self.lexer.current() == Token::Char(b'.') {
            let line = self.lexer.line();
            self.lexer.next()?;
            let method = self.expect_id()?;
            let args = self.parse_call_args()?;
            expr = Expr::MethodCall { object: Box::new(expr),
                                      method,
                                      args,
                                      line };
        }
        Ok(expr)
    }

    /// Parses a parenthesized, comma-separated argument list.
    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect_char(b'(')?;

        let mut args = Vec::new();
        if *self.lexer.current() != Token::Char(b')') {
            loop {
                args.push(self.parse_expression()?);
                if *self.lexer.current() == Token::Char(b',') {
                    self.lexer.next()?;
                } else {
                    break;
                }
            }
        }
        self.expect_char(b')')?;

        Ok(args)
    }
}
