use logos::Logos;

use crate::{
    error::LexerError,
    interpreter::lexer::token::{RawToken, ScanError, Token, TokenKind},
};

/// Turns source text into the token stream consumed by the parser.
///
/// The lexer wraps the generated character-level scanner with the state a
/// regular scanner cannot carry: the current indentation level, measured in
/// units of two leading spaces, and the synthetic `Newline`/`Indent`/`Dedent`
/// tokens derived from it. Tokens are produced lazily, one logical step per
/// [`next`](Self::next) call, into an append-only buffer; the current token
/// is an index into that buffer, so earlier tokens stay inspectable.
///
/// Production rules:
/// - Indentation is only measured at the start of a logical line, and only
///   emitted when the line carries something other than a comment or a line
///   break. Blank lines and comment lines leave the indentation level alone.
/// - `Newline` is never emitted twice in a row, and never before the first
///   token of the stream.
/// - At end of input the stream is sealed with a final `Newline` (unless one
///   was just emitted), one `Dedent` per open indentation level, and `Eof`.
///   A string literal missing its closing quote seals the stream the same
///   way, without emitting a `String` token.
pub struct Lexer<'src> {
    raw:     logos::Lexer<'src, RawToken>,
    tokens:  Vec<(Token, usize)>,
    current: usize,
    indent:  usize,
    pending: Option<usize>,
    line:    usize,
    sealed:  bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source` and produces its first token.
    ///
    /// # Errors
    /// Returns a [`LexerError`] if the first token is malformed, e.g. the
    /// input starts with an unexpected character or an oversized number.
    pub fn new(source: &'src str) -> Result<Self, LexerError> {
        let leading = source.chars().take_while(|&c| c == ' ').count();

        let mut lexer = Self { raw:     RawToken::lexer(source),
                               tokens:  Vec::new(),
                               current: 0,
                               indent:  0,
                               pending: Some(leading / 2),
                               line:    1,
                               sealed:  false, };
        lexer.load()?;
        Ok(lexer)
    }

    /// Returns the current token; `Eof` once the stream is exhausted.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.current].0
    }

    /// Returns the source line of the current token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tokens[self.current].1
    }

    /// Advances to the next token and returns it; stays on `Eof` once the
    /// stream is exhausted.
    ///
    /// # Errors
    /// Returns a [`LexerError`] if producing the next token fails.
    pub fn next(&mut self) -> Result<Token, LexerError> {
        if !self.sealed && self.current + 1 >= self.tokens.len() {
            self.load()?;
        }
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
        Ok(self.tokens[self.current].0.clone())
    }

    /// Returns the current token if it has the given kind.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] describing the mismatch
    /// otherwise.
    pub fn expect(&self, kind: TokenKind) -> Result<&Token, LexerError> {
        let (token, line) = &self.tokens[self.current];
        if token.kind() == kind {
            Ok(token)
        } else {
            Err(LexerError::UnexpectedToken { expected: kind,
                                              found:    token.clone(),
                                              line:     *line, })
        }
    }

    /// Checks that the current token equals `expected`, payload included.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedValue`] describing the mismatch
    /// otherwise.
    pub fn expect_value(&self, expected: &Token) -> Result<(), LexerError> {
        let (token, line) = &self.tokens[self.current];
        if token == expected {
            Ok(())
        } else {
            Err(LexerError::UnexpectedValue { expected: expected.clone(),
                                              found:    token.clone(),
                                              line:     *line, })
        }
    }

    /// Advances and returns the new current token if it has the given kind.
    ///
    /// # Errors
    /// Returns a [`LexerError`] if advancing fails or the new token does not
    /// have the expected kind.
    pub fn expect_next(&mut self, kind: TokenKind) -> Result<Token, LexerError> {
        self.next()?;
        self.expect(kind).cloned()
    }

    /// Advances and checks that the new current token equals `expected`,
    /// payload included.
    ///
    /// # Errors
    /// Returns a [`LexerError`] if advancing fails or the new token does not
    /// match.
    pub fn expect_next_value(&mut self, expected: &Token) -> Result<(), LexerError> {
        self.next()?;
        self.expect_value(expected)
    }

    /// Returns the cursor position for a later [`seek`](Self::seek).
    ///
    /// The token buffer is append-only, so a saved position stays valid for
    /// the lifetime of the lexer. Used by the parser to resolve the
    /// assignment-versus-expression ambiguity with bounded lookahead.
    pub(crate) fn pos(&self) -> usize {
        self.current
    }

    /// Moves the cursor back to a position previously returned by
    /// [`pos`](Self::pos).
    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len());
        self.current = pos;
    }

    /// Produces tokens until at least one has been appended to the buffer,
    /// or the stream has been sealed with `Eof`.
    fn load(&mut self) -> Result<(), LexerError> {
        loop {
            let Some(scanned) = self.raw.next() else {
                self.seal();
                return Ok(());
            };

            match scanned {
                Err(ScanError::NumberOverflow) => {
                    return Err(LexerError::NumberOverflow { line: self.line });
                },
                Err(ScanError::UnexpectedCharacter) => {
                    return Err(LexerError::UnexpectedCharacter {
                        found: self.raw.slice().chars().next().unwrap_or(' '),
                        line:  self.line,
                    });
                },
                Ok(RawToken::Unterminated) => {
                    self.seal();
                    return Ok(());
                },
                Ok(RawToken::Newline(spaces)) => {
                    self.pending = Some(spaces / 2);
                    let significant = !matches!(self.tokens.last(), None | Some((Token::Newline, _)));
                    if significant {
                        self.tokens.push((Token::Newline, self.line));
                    }
                    self.line += 1;
                    if significant {
                        return Ok(());
                    }
                },
                Ok(raw) => {
                    if let Some(level) = self.pending.take() {
                        self.shift_indent(level);
                    }

                    let line = self.line;
                    if matches!(raw, RawToken::String(_)) {
                        // A string literal may span lines; its raw slice
                        // still holds the line breaks.
                        self.line += self.raw.slice().matches('\n').count();
                    }

                    let token = match raw {
                        RawToken::Number(value) => Token::Number(value),
                        RawToken::Id(value) => Token::Id(value),
                        RawToken::Char(value) => Token::Char(value),
                        RawToken::String(value) => Token::String(value),
                        RawToken::Class => Token::Class,
                        RawToken::Return => Token::Return,
                        RawToken::If => Token::If,
                        RawToken::Else => Token::Else,
                        RawToken::Def => Token::Def,
                        RawToken::Print => Token::Print,
                        RawToken::And => Token::And,
                        RawToken::Or => Token::Or,
                        RawToken::Not => Token::Not,
                        RawToken::Eq => Token::Eq,
                        RawToken::NotEq => Token::NotEq,
                        RawToken::LessOrEq => Token::LessOrEq,
                        RawToken::GreaterOrEq => Token::GreaterOrEq,
                        RawToken::None => Token::None,
                        RawToken::True => Token::True,
                        RawToken::False => Token::False,
                        RawToken::Newline(_) | RawToken::Unterminated => unreachable!(),
                    };
                    self.tokens.push((token, line));
                    return Ok(());
                },
            }
        }
    }

    /// Emits the `Indent`/`Dedent` run that closes the gap between the
    /// current indentation level and `level`.
    fn shift_indent(&mut self, level: usize) {
        while self.indent < level {
            self.indent += 1;
            self.tokens.push((Token::Indent, self.line));
        }
        while self.indent > level {
            self.indent -= 1;
            self.tokens.push((Token::Dedent, self.line));
        }
    }

    /// Seals the stream: a closing `Newline` unless one was just emitted,
    /// one `Dedent` per open indentation level, then `Eof`.
    fn seal(&mut self) {
        if !matches!(self.tokens.last(), None | Some((Token::Newline, _))) {
            self.tokens.push((Token::Newline, self.line));
        }
        while self.indent > 0 {
            self.indent -= 1;
            self.tokens.push((Token::Dedent, self.line));
        }
        self.tokens.push((Token::Eof, self.line));
        self.sealed = true;
    }
}
