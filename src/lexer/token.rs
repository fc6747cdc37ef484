use logos::Logos;
use serde::Serialize;

use crate::span::Span;

/// Token categories of the Jack language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum TokenKind {
    // Keywords
    #[token("class")]
    Class,
    #[token("constructor")]
    Constructor,
    #[token("function")]
    Function,
    #[token("method")]
    Method,
    #[token("field")]
    Field,
    #[token("static")]
    Static,
    #[token("var")]
    Var,
    #[token("int")]
    Int,
    #[token("char")]
    Char,
    #[token("boolean")]
    Boolean,
    #[token("void")]
    Void,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("this")]
    This,
    #[token("let")]
    Let,
    #[token("do")]
    Do,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("return")]
    Return,

    // Symbols
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("~")]
    Tilde,

    // Literals; integer constants are limited to 0..=32767
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u16>().is_ok_and(|n| n <= MAX_INT_CONST))]
    IntConst,
    #[regex(r#""[^"\n]*""#)]
    StrConst,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Never produced by the scanner; appended by `TokenStream` once input runs out.
    Eof,
}

pub const MAX_INT_CONST: u16 = 32767;

/// Binary operators accepted between terms of an expression.
pub const BINARY_OPS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::Eq,
];

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Class | Constructor | Function | Method | Field | Static | Var | Int | Char
                | Boolean | Void | True | False | Null | This | Let | Do | If | Else | While
                | Return
        )
    }

    pub fn is_symbol(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            LBrace | RBrace | LParen | RParen | LBracket | RBracket | Dot | Comma | Semicolon
                | Plus | Minus | Star | Slash | Amp | Pipe | Lt | Gt | Eq | Tilde
        )
    }

    pub fn is_binary_op(self) -> bool {
        BINARY_OPS.contains(&self)
    }

    /// Element name used when the token is rendered in an XML trace.
    pub fn xml_category(self) -> &'static str {
        match self {
            TokenKind::IntConst => "integerConstant",
            TokenKind::StrConst => "stringConstant",
            TokenKind::Ident => "identifier",
            k if k.is_keyword() => "keyword",
            k if k.is_symbol() => "symbol",
            _ => "eof",
        }
    }

    /// Fixed source text of keywords and symbols.
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            Class => "class",
            Constructor => "constructor",
            Function => "function",
            Method => "method",
            Field => "field",
            Static => "static",
            Var => "var",
            Int => "int",
            Char => "char",
            Boolean => "boolean",
            Void => "void",
            True => "true",
            False => "false",
            Null => "null",
            This => "this",
            Let => "let",
            Do => "do",
            If => "if",
            Else => "else",
            While => "while",
            Return => "return",
            LBrace => "{",
            RBrace => "}",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Dot => ".",
            Comma => ",",
            Semicolon => ";",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Amp => "&",
            Pipe => "|",
            Lt => "<",
            Gt => ">",
            Eq => "=",
            Tilde => "~",
            IntConst | StrConst | Ident | Eof => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::IntConst => write!(f, "integer constant"),
            TokenKind::StrConst => write!(f, "string constant"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Eof => write!(f, "end of input"),
            other => match other.fixed_text() {
                Some(text) => write!(f, "'{text}'"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}

/// A scanned token: category, literal text and where it came from.
///
/// String constants keep their contents without the surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    pub fn eof(offset: usize, line: u32) -> Self {
        Self { kind: TokenKind::Eof, lexeme: String::new(), span: Span::point(offset, line) }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Renders the token as a Nand2Tetris XML terminal, e.g. `<symbol> &lt; </symbol>`.
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = self.kind.xml_category();
        write!(f, "<{category}> {} </{category}>", xml_escape(&self.lexeme))
    }
}

pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
