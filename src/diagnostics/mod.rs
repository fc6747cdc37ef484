use thiserror::Error;

use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The first grammar violation (or scanning failure) met in a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("{}", expected_message(.expected))]
    UnexpectedToken { expected: Vec<TokenKind>, found: Token },

    #[error("term expected")]
    TermExpected { found: Token },

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { found: Token, limit: usize },

    #[error("{message}")]
    Lex { message: String, lexeme: String, span: Span },
}

fn expected_message(expected: &[TokenKind]) -> String {
    match expected {
        [single] => format!("expected {single}"),
        many => {
            let names: Vec<String> = many.iter().map(|k| k.to_string()).collect();
            format!("expected one of {}", names.join(", "))
        }
    }
}

impl SyntaxError {
    pub fn unexpected(expected: &[TokenKind], found: Token) -> Self {
        Self::UnexpectedToken { expected: expected.to_vec(), found }
    }

    pub fn term_expected(found: Token) -> Self {
        Self::TermExpected { found }
    }

    pub fn nesting(found: Token, limit: usize) -> Self {
        Self::NestingTooDeep { found, limit }
    }

    pub fn lex(message: impl Into<String>, lexeme: impl Into<String>, span: Span) -> Self {
        Self::Lex { message: message.into(), lexeme: lexeme.into(), span }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { found, .. }
            | Self::TermExpected { found }
            | Self::NestingTooDeep { found, .. } => found.span,
            Self::Lex { span, .. } => *span,
        }
    }

    pub fn line(&self) -> u32 {
        self.span().line
    }

    /// `" at end"` for end of input, `" at '<lexeme>'"` otherwise.
    pub fn location(&self) -> String {
        match self {
            Self::UnexpectedToken { found, .. }
            | Self::TermExpected { found }
            | Self::NestingTooDeep { found, .. } => {
                if found.is_eof() {
                    " at end".to_string()
                } else {
                    format!(" at '{}'", found.lexeme)
                }
            }
            Self::Lex { lexeme, .. } => format!(" at '{lexeme}'"),
        }
    }

    /// The one-line diagnostic: `[line <n>] Error <location>: <message>`.
    pub fn report(&self) -> String {
        format!("[line {}] Error{}: {}", self.line(), self.location(), self)
    }
}

/// Render a SyntaxError with ariadne for nice terminal output.
pub fn render_error(source: &str, err: &SyntaxError) {
    use ariadne::{Label, Report, ReportKind, Source};

    let span = err.span();
    let printed = Report::build(ReportKind::Error, (), span.start)
        .with_message(format!("syntax error on line {}", span.line))
        .with_label(Label::new(span.start..span.end).with_message(err.to_string()))
        .finish()
        .eprint(Source::from(source));
    if printed.is_err() {
        eprintln!("{}", err.report());
    }
}
