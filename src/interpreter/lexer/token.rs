use logos::Logos;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language, including the
/// synthetic structure tokens (`Newline`, `Indent`, `Dedent`, `Eof`) that the
/// lexer manufactures from whitespace context.
///
/// Token equality ignores source positions: singleton tokens are equal by
/// tag, valued tokens by tag and payload. Line numbers travel next to the
/// token in the lexer's buffer, never inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    Number(i64),
    /// Identifier tokens; variable, field, class or method names.
    Id(String),
    /// Single-character punctuation, such as `.`, `:` or `+`.
    Char(u8),
    /// String literal tokens with escapes already resolved.
    String(String),
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// End of a logical line.
    Newline,
    /// Indentation increased by one level.
    Indent,
    /// Indentation decreased by one level.
    Dedent,
    /// End of the token stream.
    Eof,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
}

impl Token {
    /// Returns the kind tag of this token, ignoring any payload.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Number(_) => TokenKind::Number,
            Self::Id(_) => TokenKind::Id,
            Self::Char(_) => TokenKind::Char,
            Self::String(_) => TokenKind::String,
            Self::Class => TokenKind::Class,
            Self::Return => TokenKind::Return,
            Self::If => TokenKind::If,
            Self::Else => TokenKind::Else,
            Self::Def => TokenKind::Def,
            Self::Print => TokenKind::Print,
            Self::Newline => TokenKind::Newline,
            Self::Indent => TokenKind::Indent,
            Self::Dedent => TokenKind::Dedent,
            Self::Eof => TokenKind::Eof,
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::Not => TokenKind::Not,
            Self::Eq => TokenKind::Eq,
            Self::NotEq => TokenKind::NotEq,
            Self::LessOrEq => TokenKind::LessOrEq,
            Self::GreaterOrEq => TokenKind::GreaterOrEq,
            Self::None => TokenKind::None,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "Number{{{value}}}"),
            Self::Id(value) => write!(f, "Id{{{value}}}"),
            Self::Char(value) => write!(f, "Char{{{}}}", char::from(*value)),
            Self::String(value) => write!(f, "String{{{value}}}"),
            singleton => write!(f, "{}", singleton.kind()),
        }
    }
}

/// The kind tag of a [`Token`], without any payload.
///
/// Used by the lexer's `expect*` API to state what was expected and by error
/// messages to describe mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An integer literal.
    Number,
    /// An identifier.
    Id,
    /// Single-character punctuation.
    Char,
    /// A string literal.
    String,
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// End of a logical line.
    Newline,
    /// Indentation increase.
    Indent,
    /// Indentation decrease.
    Dedent,
    /// End of the token stream.
    Eof,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "Number",
            Self::Id => "Id",
            Self::Char => "Char",
            Self::String => "String",
            Self::Class => "Class",
            Self::Return => "Return",
            Self::If => "If",
            Self::Else => "Else",
            Self::Def => "Def",
            Self::Print => "Print",
            Self::Newline => "Newline",
            Self::Indent => "Indent",
            Self::Dedent => "Dedent",
            Self::Eof => "Eof",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Eq => "Eq",
            Self::NotEq => "NotEq",
            Self::LessOrEq => "LessOrEq",
            Self::GreaterOrEq => "GreaterOrEq",
            Self::None => "None",
            Self::True => "True",
            Self::False => "False",
        };
        write!(f, "{name}")
    }
}

/// Character-level scan failures, distinguished so the lexer can map each to
/// its contract: unexpected characters and oversized numbers are reported as
/// [`crate::error::LexerError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum ScanError {
    /// A character that does not start any token.
    #[default]
    UnexpectedCharacter,
    /// A digit run that does not fit into an `i64`.
    NumberOverflow,
}

/// The raw, character-level token produced by the generated scanner.
///
/// This enum only covers what a regular scanner can see. Indentation is
/// context: the `Newline` payload carries the count of leading spaces on the
/// following line, and the [`super::core::Lexer`] wrapper turns that count
/// into `Indent`/`Dedent` tokens on the public stream. An unterminated string
/// reaches end of input without its closing quote and is matched by the
/// quote-to-end patterns below; the wrapper seals the stream instead of
/// emitting a token for it.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = ScanError)]
#[logos(skip r"[ ]+")]
#[logos(skip r"#[^\n]*")]
pub(super) enum RawToken {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", scan_number)]
    Number(i64),
    /// `class`
    #[token("class")]
    Class,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `def`
    #[token("def")]
    Def,
    /// `print`
    #[token("print")]
    Print,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `None`
    #[token("None")]
    None,
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<=`
    #[token("<=")]
    LessOrEq,
    /// `>=`
    #[token(">=")]
    GreaterOrEq,
    /// Single-character punctuation and the lone `=`, `!`, `<`, `>`.
    #[regex(r"[.,:()+*/=!<>-]", scan_char)]
    Char(u8),
    /// Identifier tokens; names such as `x` or `Person`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Id(String),
    /// String literal tokens, single or double quoted, with escapes.
    #[regex(r#""(\\[^\n]|[^"\\])*""#, scan_string)]
    #[regex(r#"'(\\[^\n]|[^'\\])*'"#, scan_string)]
    String(String),
    /// A string literal whose closing quote is missing at end of input.
    #[regex(r#""(\\[^\n]|[^"\\])*"#)]
    #[regex(r#"'(\\[^\n]|[^'\\])*"#)]
    Unterminated,
    /// A line break together with the leading spaces of the next line; the
    /// payload is the space count.
    #[regex(r"\n[ ]*", |lex| lex.slice().len() - 1)]
    Newline(usize),
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Ok(i64)`: The parsed value.
/// - `Err(ScanError::NumberOverflow)`: If the digit run exceeds `i64`.
fn scan_number(lex: &mut logos::Lexer<RawToken>) -> Result<i64, ScanError> {
    lex.slice().parse().map_err(|_| ScanError::NumberOverflow)
}

/// Returns the single punctuation byte of the current token slice.
fn scan_char(lex: &mut logos::Lexer<RawToken>) -> u8 {
    lex.slice().as_bytes()[0]
}

/// Resolves the escape sequences of a quoted string literal.
///
/// Recognized escapes are `\n`, `\t`, `\r`, `\"`, `\'` and `\\`. An
/// unrecognized escape drops both the backslash and the escaped character.
fn scan_string(lex: &mut logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('"') => value.push('"'),
            Some('\'') => value.push('\''),
            Some('\\') => value.push('\\'),
            _ => {},
        }
    }

    value
}
