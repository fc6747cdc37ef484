#![no_main]
use arbitrary::Arbitrary;
use jack_syntax::lexer::TokenStream;
use jack_syntax::lexer::token::{Token, TokenKind};
use jack_syntax::parser::Parser;
use jack_syntax::span::Span;
use jack_syntax::trace::{flatten, is_balanced};
use libfuzzer_sys::fuzz_target;

/// Token kinds the parser branches on, without lexemes
#[derive(Arbitrary, Debug)]
enum FuzzToken {
    Class,
    Function,
    Method,
    Field,
    Var,
    Int,
    Void,
    True,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Lt,
    Eq,
    Tilde,
    IntConst,
    StrConst,
    Ident,
}

impl FuzzToken {
    fn to_token(&self, offset: usize) -> Token {
        let kind = match self {
            FuzzToken::Class => TokenKind::Class,
            FuzzToken::Function => TokenKind::Function,
            FuzzToken::Method => TokenKind::Method,
            FuzzToken::Field => TokenKind::Field,
            FuzzToken::Var => TokenKind::Var,
            FuzzToken::Int => TokenKind::Int,
            FuzzToken::Void => TokenKind::Void,
            FuzzToken::True => TokenKind::True,
            FuzzToken::This => TokenKind::This,
            FuzzToken::Let => TokenKind::Let,
            FuzzToken::Do => TokenKind::Do,
            FuzzToken::If => TokenKind::If,
            FuzzToken::Else => TokenKind::Else,
            FuzzToken::While => TokenKind::While,
            FuzzToken::Return => TokenKind::Return,
            FuzzToken::LBrace => TokenKind::LBrace,
            FuzzToken::RBrace => TokenKind::RBrace,
            FuzzToken::LParen => TokenKind::LParen,
            FuzzToken::RParen => TokenKind::RParen,
            FuzzToken::LBracket => TokenKind::LBracket,
            FuzzToken::RBracket => TokenKind::RBracket,
            FuzzToken::Dot => TokenKind::Dot,
            FuzzToken::Comma => TokenKind::Comma,
            FuzzToken::Semicolon => TokenKind::Semicolon,
            FuzzToken::Plus => TokenKind::Plus,
            FuzzToken::Minus => TokenKind::Minus,
            FuzzToken::Lt => TokenKind::Lt,
            FuzzToken::Eq => TokenKind::Eq,
            FuzzToken::Tilde => TokenKind::Tilde,
            FuzzToken::IntConst => TokenKind::IntConst,
            FuzzToken::StrConst => TokenKind::StrConst,
            FuzzToken::Ident => TokenKind::Ident,
        };
        let lexeme = match kind {
            TokenKind::IntConst => "7",
            TokenKind::StrConst => "s",
            TokenKind::Ident => "x",
            other => other.fixed_text().unwrap_or(""),
        };
        Token::new(kind, lexeme, Span::new(offset, offset + 1, 1))
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzTokens {
    tokens: Vec<FuzzToken>,
}

fuzz_target!(|input: FuzzTokens| {
    let tokens: Vec<Token> = input.tokens.iter().enumerate().map(|(i, t)| t.to_token(i)).collect();
    let end = tokens.len();

    // Feed to parser - should never panic, and any tree it builds is balanced
    if let Ok(output) = Parser::new(TokenStream::new(tokens, end, 1)).parse() {
        assert!(is_balanced(&flatten(&output.tree)));
    }
});
