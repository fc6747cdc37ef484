pub mod token;

use logos::Logos;

use crate::diagnostics::SyntaxError;
use crate::span::{LineIndex, Span};
use token::{Token, TokenKind};

/// Anything the parser can pull tokens from.
///
/// Implementations must keep returning an end-of-input token once the
/// underlying input is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Scan a whole source file. The returned tokens do not include an
/// end-of-input token; wrap them in a [`TokenStream`] to feed the parser.
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let slice = lexer.slice();
        let span = Span::new(range.start, range.end, lines.line_of(range.start));
        match result {
            Ok(TokenKind::StrConst) => {
                tokens.push(Token::new(TokenKind::StrConst, &slice[1..slice.len() - 1], span));
            }
            Ok(kind) => tokens.push(Token::new(kind, slice, span)),
            Err(()) => {
                let message = if slice.bytes().all(|b| b.is_ascii_digit()) {
                    format!("integer constant out of range (max {})", token::MAX_INT_CONST)
                } else if slice.starts_with('"') {
                    "unterminated string constant".to_string()
                } else {
                    "unexpected character".to_string()
                };
                return Err(SyntaxError::lex(message, slice, span));
            }
        }
    }

    Ok(tokens)
}

/// Owning token source over a scanned token vector.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    /// Tokens followed by an end-of-input token placed at `end_offset`.
    pub fn new(tokens: Vec<Token>, end_offset: usize, end_line: u32) -> Self {
        Self { tokens: tokens.into_iter(), eof: Token::eof(end_offset, end_line) }
    }

    /// Scan `source` and wrap the result.
    pub fn from_source(source: &str) -> Result<Self, SyntaxError> {
        let tokens = lex(source)?;
        let end_line = LineIndex::new(source).line_count() as u32;
        Ok(Self::new(tokens, source.len(), end_line))
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| self.eof.clone())
    }
}
