use crate::lexer::TokenSource;
use crate::lexer::token::{Token, TokenKind};

/// Two-token lookahead window over a [`TokenSource`].
///
/// `peek` is the next token to be consumed and `current` the last one that
/// was. `advance` is the only way a token moves from one to the other.
pub struct Cursor<S: TokenSource> {
    source: S,
    current: Option<Token>,
    peek: Token,
}

impl<S: TokenSource> Cursor<S> {
    pub fn new(mut source: S) -> Self {
        let peek = source.next_token();
        Self { source, current: None, peek }
    }

    /// Last consumed token; `None` before the first `advance`.
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn peek(&self) -> &Token {
        &self.peek
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Consume `peek`, pull its successor, and return the consumed token.
    pub fn advance(&mut self) -> Token {
        let next = self.source.next_token();
        let consumed = std::mem::replace(&mut self.peek, next);
        self.current = Some(consumed.clone());
        consumed
    }

    pub fn at_end(&self) -> bool {
        self.peek.is_eof()
    }
}
