use log::debug;
use logos::Logos;

use crate::{
    codec::opcode,
    error::{DecodeError, LexError},
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `let`
    #[token("let")]
    Let,
    /// `print`
    #[token("print")]
    Print,
    /// `raise`
    #[token("raise")]
    Raise,
    /// `warn`
    #[token("warn")]
    Warn,
    /// `info`
    #[token("info")]
    Info,
    /// `while`
    #[token("while")]
    While,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `import`
    #[token("import")]
    Import,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `&&` or `and`
    #[token("&&")]
    #[token("and")]
    And,
    /// `||` or `or`
    #[token("||")]
    #[token("or")]
    Or,
    /// `!` or `not`
    #[token("!")]
    #[token("not")]
    Not,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal without its quotes. There are no escape sequences and an
    /// unterminated string runs to the end of the input.
    #[regex(r#""[^"]*"?"#, parse_string, allow_greedy = true)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// The string literal following `import`. Produced by [`tokenize`], never
    /// matched directly.
    ImportStr(String),
    /// End of the token stream. Appended by [`tokenize`].
    Eof,
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();

    let body = &slice[1..];
    body.strip_suffix('"').unwrap_or(body).to_string()
}

/// Tokenizes source text.
///
/// Produces `(Token, line)` pairs terminated by [`Token::Eof`]. Two pieces of
/// state refine the raw token stream:
///
/// - After `import`, the next string literal becomes [`Token::ImportStr`]. The
///   state is dropped at the next `;`.
/// - Directly after `in`, a fractional number literal is split at its point,
///   so the range `1.3` in `for i in 1.3` reads as `1 . 3`.
///
/// # Errors
/// Returns [`LexError::UnexpectedCharacter`] for input that starts no token.
///
/// # Example
/// ```
/// use splice::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("for i in 1.3").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::For,
///                 Token::Identifier("i".into()),
///                 Token::In,
///                 Token::Number(1.0),
///                 Token::Dot,
///                 Token::Number(3.0),
///                 Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();
    let mut expect_import = false;
    let mut after_in = false;

    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        // A string spanning lines belongs to the line it starts on.
        let line = lexer.extras.line - slice.matches('\n').count();

        let Ok(token) = token else {
            return Err(LexError::UnexpectedCharacter { character: slice.to_string(),
                                                       line });
        };

        let range_bound = std::mem::take(&mut after_in);

        match token {
            Token::Import => expect_import = true,
            Token::Semicolon => expect_import = false,
            Token::In => after_in = true,
            _ => {},
        }

        match token {
            Token::Str(text) if expect_import => {
                expect_import = false;
                tokens.push((Token::ImportStr(text), line));
            },
            Token::Number(_) if range_bound => {
                if let Some((start, end)) = slice.split_once('.') {
                    tokens.push((Token::Number(start.parse().unwrap_or(0.0)), line));
                    tokens.push((Token::Dot, line));
                    tokens.push((Token::Number(end.parse().unwrap_or(0.0)), line));
                } else {
                    tokens.push((token, line));
                }
            },
            _ => tokens.push((token, line)),
        }
    }

    tokens.push((Token::Eof, lexer.extras.line));
    debug!("lexed {} tokens over {} lines", tokens.len(), lexer.extras.line);

    Ok(tokens)
}

/// Tokenizes an opcode token stream.
///
/// The binary form carries no line information, so every token is reported on
/// line `0`. No [`Token::Eof`] is appended; the parser treats exhaustion as the
/// end of input.
///
/// # Errors
/// Returns a [`DecodeError`] if the stream is truncated or malformed.
pub fn tokenize_bytecode(bytes: &[u8]) -> Result<Vec<(Token, usize)>, DecodeError> {
    let tokens = opcode::decode_tokens(bytes)?;
    debug!("decoded {} tokens from {} bytes of bytecode", tokens.len(), bytes.len());

    Ok(tokens.into_iter().map(|token| (token, 0)).collect())
}
