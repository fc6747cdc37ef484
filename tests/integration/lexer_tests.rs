// Scanner behaviour as seen by the parser: categories, lexemes, lines,
// comments and the token listing.

use jack_syntax::config::LineEnding;
use jack_syntax::lexer::token::TokenKind;
use jack_syntax::lexer::{TokenSource, TokenStream, lex};
use jack_syntax::trace::render_tokens;

/// Assert token kinds match (ignoring lexemes and spans)
fn assert_kinds(source: &str, expected: &[TokenKind]) {
    let actual: Vec<TokenKind> = lex(source).expect("lexing should succeed").iter().map(|t| t.kind).collect();
    assert_eq!(actual, expected, "Token mismatch for source: {source}");
}

#[test]
fn all_keywords() {
    use TokenKind::*;
    assert_kinds(
        "class constructor function method field static var int char boolean void \
         true false null this let do if else while return",
        &[
            Class, Constructor, Function, Method, Field, Static, Var, Int, Char, Boolean, Void,
            True, False, Null, This, Let, Do, If, Else, While, Return,
        ],
    );
}

#[test]
fn all_symbols() {
    use TokenKind::*;
    assert_kinds(
        "{ } ( ) [ ] . , ; + - * / & | < > = ~",
        &[
            LBrace, RBrace, LParen, RParen, LBracket, RBracket, Dot, Comma, Semicolon, Plus, Minus,
            Star, Slash, Amp, Pipe, Lt, Gt, Eq, Tilde,
        ],
    );
}

#[test]
fn symbols_need_no_whitespace() {
    use TokenKind::*;
    assert_kinds("a[i]=b.c(1);", &[Ident, LBracket, Ident, RBracket, Eq, Ident, Dot, Ident, LParen, IntConst, RParen, Semicolon]);
}

#[test]
fn identifiers_with_digits_and_underscores() {
    let tokens = lex("_tmp x1 if_ whileLoop").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Ident));
    assert_eq!(tokens[2].lexeme, "if_");
}

#[test]
fn division_is_not_a_comment() {
    assert_kinds("a / b // trailing", &[TokenKind::Ident, TokenKind::Slash, TokenKind::Ident]);
}

#[test]
fn doc_comment_spanning_lines() {
    let tokens = lex("/**\n * API docs\n */\nclass Main {}").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Class);
    assert_eq!(tokens[0].line(), 4);
}

// ===== Block Comments =====

#[test]
fn comment_block_single_line() {
    assert_kinds("/* a */ x", &[TokenKind::Ident]);
}

#[test]
fn comment_block_empty() {
    assert_kinds("/**/ x", &[TokenKind::Ident]);
}

#[test]
fn comment_block_extra_stars() {
    assert_kinds("/*** stars ***/ x", &[TokenKind::Ident]);
}

#[test]
fn comment_block_with_inner_stars_and_slashes() {
    assert_kinds("/* a * b / c // d */ x", &[TokenKind::Ident]);
}

#[test]
fn comment_block_followed_by_division() {
    assert_kinds("a /* half */ / 2", &[TokenKind::Ident, TokenKind::Slash, TokenKind::IntConst]);
}

#[test]
fn comment_block_between_tokens_without_spaces() {
    assert_kinds("let/**/x=1;", &[TokenKind::Let, TokenKind::Ident, TokenKind::Eq, TokenKind::IntConst, TokenKind::Semicolon]);
}

#[test]
fn comment_block_unterminated_fails() {
    assert!(lex("x /* never closed").is_err());
}

#[test]
fn comment_block_line_numbers() {
    let tokens = lex("/* one\n two\n three */ a\n/** doc\n */ b").unwrap();
    assert_eq!(tokens[0].line(), 3);
    assert_eq!(tokens[1].line(), 5);
}

#[test]
fn commented_fixture_scans() {
    let tokens = lex(include_str!("fixtures/Square.jack")).unwrap();
    assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::Class));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::RBrace));
}

#[test]
fn string_constant_may_contain_symbols() {
    let tokens = lex("\"a < b; // not a comment\"").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme, "a < b; // not a comment");
}

#[test]
fn spans_cover_lexemes() {
    let src = "let  count = 10;";
    let tokens = lex(src).unwrap();
    for tok in &tokens {
        if tok.kind != TokenKind::StrConst {
            assert_eq!(&src[tok.span.start..tok.span.end], tok.lexeme);
        }
    }
    assert_eq!(tokens[1].span.start, 5);
}

#[test]
fn crlf_sources_count_lines() {
    let tokens = lex("class A {\r\n  field int x;\r\n}\r\n").unwrap();
    assert_eq!(tokens.last().map(|t| t.line()), Some(3));
}

#[test]
fn stream_ends_with_eof_at_last_line() {
    let mut stream = TokenStream::from_source("class\nA\n\n").unwrap();
    stream.next_token();
    stream.next_token();
    let eof = stream.next_token();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.line(), 4);
}

#[test]
fn token_listing_matches_lexemes() {
    let tokens = lex("if (x < 0) { let s = \"neg\"; }").unwrap();
    let listing = render_tokens(&tokens, LineEnding::Lf);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.first(), Some(&"<tokens>"));
    assert_eq!(lines.last(), Some(&"</tokens>"));
    assert_eq!(lines.len(), tokens.len() + 2);
    assert!(lines.contains(&"<symbol> &lt; </symbol>"));
    assert!(lines.contains(&"<stringConstant> neg </stringConstant>"));
}

#[test]
fn unknown_characters_fail() {
    for src in ["@", "$", "`", "#", "\\", "!", "%"] {
        assert!(lex(src).is_err(), "lexing should fail for: {src}");
    }
}
