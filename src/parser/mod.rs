pub mod cursor;
pub mod tree;

use tracing::trace;

use crate::diagnostics::SyntaxError;
use crate::lexer::TokenSource;
use crate::lexer::token::{BINARY_OPS, Token, TokenKind};
use cursor::Cursor;
use tree::{CallSite, Node, NonTerminal};

use TokenKind::*;

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const TYPE_KINDS: &[TokenKind] = &[Int, Char, Boolean, Ident];
const RETURN_TYPE_KINDS: &[TokenKind] = &[Void, Int, Char, Boolean, Ident];
const CLASS_VAR_KINDS: &[TokenKind] = &[Field, Static];
const SUBROUTINE_KINDS: &[TokenKind] = &[Constructor, Function, Method];
const STATEMENT_KINDS: &[TokenKind] = &[Let, If, While, Do, Return];
const KEYWORD_CONSTANTS: &[TokenKind] = &[True, False, Null, This];
const UNARY_OPS: &[TokenKind] = &[Minus, Tilde];

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub tree: Node,
    pub calls: Vec<CallSite>,
}

/// Recursive-descent parser, one method per grammar rule.
///
/// Every method returns the node for its rule; the first violation is
/// returned as an error and aborts the whole parse.
pub struct Parser<S: TokenSource> {
    cursor: Cursor<S>,
    depth: usize,
    max_depth: usize,
    calls: Vec<CallSite>,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self { cursor: Cursor::new(source), depth: 0, max_depth: DEFAULT_MAX_DEPTH, calls: Vec::new() }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn cursor(&self) -> &Cursor<S> {
        &self.cursor
    }

    /// Subroutine calls recorded so far.
    pub fn calls(&self) -> &[CallSite] {
        &self.calls
    }

    /// Parse one class. Tokens after its closing brace are left unread.
    pub fn parse(mut self) -> Result<ParseOutput, SyntaxError> {
        let tree = self.parse_class()?;
        trace!(calls = self.calls.len(), depth = tree.depth(), at_end = self.cursor.at_end(), "class parsed");
        Ok(ParseOutput { tree, calls: self.calls })
    }

    // ==================== Primitives ====================

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.cursor.peek_kind() == kind
    }

    fn peek_in(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.cursor.peek_kind())
    }

    /// Consume `peek` if its kind is one of `kinds`.
    fn expect_token(&mut self, kinds: &[TokenKind]) -> Result<Token, SyntaxError> {
        if self.peek_in(kinds) {
            Ok(self.cursor.advance())
        } else {
            Err(SyntaxError::unexpected(kinds, self.cursor.peek().clone()))
        }
    }

    fn expect(&mut self, kinds: &[TokenKind]) -> Result<Node, SyntaxError> {
        self.expect_token(kinds).map(Node::Terminal)
    }

    fn within<F>(&mut self, kind: NonTerminal, body: F) -> Result<Node, SyntaxError>
    where
        F: FnOnce(&mut Self, &mut Vec<Node>) -> Result<(), SyntaxError>,
    {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::nesting(self.cursor.peek().clone(), self.max_depth));
        }
        trace!(rule = kind.name(), line = self.cursor.peek().line(), "enter");
        self.depth += 1;
        let mut children = Vec::new();
        let result = body(self, &mut children);
        self.depth -= 1;
        result.map(|()| Node::NonTerminal { kind, children })
    }

    /// identifier (',' identifier)*
    fn parse_name_list(&mut self, out: &mut Vec<Node>) -> Result<(), SyntaxError> {
        out.push(self.expect(&[Ident])?);
        while self.peek_is(Comma) {
            out.push(self.expect(&[Comma])?);
            out.push(self.expect(&[Ident])?);
        }
        Ok(())
    }

    // ==================== Class structure ====================

    /// 'class' identifier '{' classVarDec* subroutineDec* '}'
    pub fn parse_class(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::Class, |p, out| {
            out.push(p.expect(&[Class])?);
            out.push(p.expect(&[Ident])?);
            out.push(p.expect(&[LBrace])?);
            while p.peek_in(CLASS_VAR_KINDS) {
                out.push(p.parse_class_var_dec()?);
            }
            while p.peek_in(SUBROUTINE_KINDS) {
                out.push(p.parse_subroutine_dec()?);
            }
            out.push(p.expect(&[RBrace])?);
            Ok(())
        })
    }

    /// ('field' | 'static') type identifier (',' identifier)* ';'
    pub fn parse_class_var_dec(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::ClassVarDec, |p, out| {
            out.push(p.expect(CLASS_VAR_KINDS)?);
            out.push(p.expect(TYPE_KINDS)?);
            p.parse_name_list(out)?;
            out.push(p.expect(&[Semicolon])?);
            Ok(())
        })
    }

    /// ('constructor' | 'function' | 'method') ('void' | type) identifier
    /// '(' parameterList ')' subroutineBody
    pub fn parse_subroutine_dec(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::SubroutineDec, |p, out| {
            out.push(p.expect(SUBROUTINE_KINDS)?);
            out.push(p.expect(RETURN_TYPE_KINDS)?);
            out.push(p.expect(&[Ident])?);
            out.push(p.expect(&[LParen])?);
            out.push(p.parse_parameter_list()?);
            out.push(p.expect(&[RParen])?);
            out.push(p.parse_subroutine_body()?);
            Ok(())
        })
    }

    /// ((type identifier) (',' type identifier)*)?
    pub fn parse_parameter_list(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::ParameterList, |p, out| {
            if p.peek_is(RParen) {
                return Ok(());
            }
            out.push(p.expect(TYPE_KINDS)?);
            out.push(p.expect(&[Ident])?);
            while p.peek_is(Comma) {
                out.push(p.expect(&[Comma])?);
                out.push(p.expect(TYPE_KINDS)?);
                out.push(p.expect(&[Ident])?);
            }
            Ok(())
        })
    }

    /// '{' varDec* statements '}'
    pub fn parse_subroutine_body(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::SubroutineBody, |p, out| {
            out.push(p.expect(&[LBrace])?);
            while p.peek_is(Var) {
                out.push(p.parse_var_dec()?);
            }
            out.push(p.parse_statements()?);
            out.push(p.expect(&[RBrace])?);
            Ok(())
        })
    }

    /// 'var' type identifier (',' identifier)* ';'
    pub fn parse_var_dec(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::VarDec, |p, out| {
            out.push(p.expect(&[Var])?);
            out.push(p.expect(TYPE_KINDS)?);
            p.parse_name_list(out)?;
            out.push(p.expect(&[Semicolon])?);
            Ok(())
        })
    }

    // ==================== Statements ====================

    /// statement*; stops at the first token that cannot start a statement.
    pub fn parse_statements(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::Statements, |p, out| {
            while p.peek_in(STATEMENT_KINDS) {
                out.push(p.parse_statement()?);
            }
            Ok(())
        })
    }

    pub fn parse_statement(&mut self) -> Result<Node, SyntaxError> {
        match self.cursor.peek_kind() {
            Let => self.parse_let(),
            If => self.parse_if(),
            While => self.parse_while(),
            Do => self.parse_do(),
            Return => self.parse_return(),
            _ => Err(SyntaxError::unexpected(STATEMENT_KINDS, self.cursor.peek().clone())),
        }
    }

    /// 'let' identifier ('[' expression ']')? '=' expression ';'
    pub fn parse_let(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::LetStatement, |p, out| {
            out.push(p.expect(&[Let])?);
            out.push(p.expect(&[Ident])?);
            if p.peek_is(LBracket) {
                out.push(p.expect(&[LBracket])?);
                out.push(p.parse_expression()?);
                out.push(p.expect(&[RBracket])?);
            }
            out.push(p.expect(&[Eq])?);
            out.push(p.parse_expression()?);
            out.push(p.expect(&[Semicolon])?);
            Ok(())
        })
    }

    /// 'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?
    pub fn parse_if(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::IfStatement, |p, out| {
            out.push(p.expect(&[If])?);
            out.push(p.expect(&[LParen])?);
            out.push(p.parse_expression()?);
            out.push(p.expect(&[RParen])?);
            p.parse_braced_statements(out)?;
            if p.peek_is(Else) {
                out.push(p.expect(&[Else])?);
                p.parse_braced_statements(out)?;
            }
            Ok(())
        })
    }

    /// 'while' '(' expression ')' '{' statements '}'
    pub fn parse_while(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::WhileStatement, |p, out| {
            out.push(p.expect(&[While])?);
            out.push(p.expect(&[LParen])?);
            out.push(p.parse_expression()?);
            out.push(p.expect(&[RParen])?);
            p.parse_braced_statements(out)
        })
    }

    fn parse_braced_statements(&mut self, out: &mut Vec<Node>) -> Result<(), SyntaxError> {
        out.push(self.expect(&[LBrace])?);
        out.push(self.parse_statements()?);
        out.push(self.expect(&[RBrace])?);
        Ok(())
    }

    /// 'do' identifier subroutineCall ';'
    pub fn parse_do(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::DoStatement, |p, out| {
            out.push(p.expect(&[Do])?);
            let receiver = p.expect_token(&[Ident])?;
            out.push(Node::Terminal(receiver.clone()));
            p.parse_subroutine_call(&receiver, out)?;
            out.push(p.expect(&[Semicolon])?);
            Ok(())
        })
    }

    /// 'return' expression? ';'
    pub fn parse_return(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::ReturnStatement, |p, out| {
            out.push(p.expect(&[Return])?);
            if !p.peek_is(Semicolon) {
                out.push(p.parse_expression()?);
            }
            out.push(p.expect(&[Semicolon])?);
            Ok(())
        })
    }

    // ==================== Expressions ====================

    /// term (op term)*
    pub fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::Expression, |p, out| {
            out.push(p.parse_term()?);
            while p.cursor.peek_kind().is_binary_op() {
                out.push(p.expect(BINARY_OPS)?);
                out.push(p.parse_term()?);
            }
            Ok(())
        })
    }

    /// integerConstant | stringConstant | keywordConstant | varName
    /// | varName '[' expression ']' | subroutineCall | '(' expression ')'
    /// | unaryOp term
    pub fn parse_term(&mut self) -> Result<Node, SyntaxError> {
        self.within(NonTerminal::Term, |p, out| {
            match p.cursor.peek_kind() {
                IntConst | StrConst => {
                    out.push(p.expect(&[IntConst, StrConst])?);
                }
                True | False | Null | This => {
                    out.push(p.expect(KEYWORD_CONSTANTS)?);
                }
                Ident => {
                    let name = p.expect_token(&[Ident])?;
                    out.push(Node::Terminal(name.clone()));
                    if p.peek_in(&[LParen, Dot]) {
                        p.parse_subroutine_call(&name, out)?;
                    } else if p.peek_is(LBracket) {
                        out.push(p.expect(&[LBracket])?);
                        out.push(p.parse_expression()?);
                        out.push(p.expect(&[RBracket])?);
                    }
                }
                LParen => {
                    out.push(p.expect(&[LParen])?);
                    out.push(p.parse_expression()?);
                    out.push(p.expect(&[RParen])?);
                }
                Minus | Tilde => {
                    out.push(p.expect(UNARY_OPS)?);
                    out.push(p.parse_term()?);
                }
                _ => return Err(SyntaxError::term_expected(p.cursor.peek().clone())),
            }
            Ok(())
        })
    }

    /// '(' expressionList ')' | '.' identifier '(' expressionList ')'
    ///
    /// Entered with the leading identifier (`receiver`) already consumed.
    /// The call's tokens are appended to `out`; the computed argument count
    /// is returned and recorded in [`Parser::calls`].
    pub fn parse_subroutine_call(&mut self, receiver: &Token, out: &mut Vec<Node>) -> Result<usize, SyntaxError> {
        let (name, arg_count) = match self.cursor.peek_kind() {
            LParen => {
                let count = self.parse_call_arguments(out)?;
                (receiver.lexeme.clone(), count + 1)
            }
            Dot => {
                out.push(self.expect(&[Dot])?);
                let method = self.cursor.peek().lexeme.clone();
                out.push(self.expect(&[Ident])?);
                let count = self.parse_call_arguments(out)?;
                (format!("{}.{}", receiver.lexeme, method), count)
            }
            _ => return Err(SyntaxError::unexpected(&[LParen, Dot], self.cursor.peek().clone())),
        };
        trace!(%name, arg_count, "subroutine call");
        self.calls.push(CallSite { name, line: receiver.line(), arg_count });
        Ok(arg_count)
    }

    fn parse_call_arguments(&mut self, out: &mut Vec<Node>) -> Result<usize, SyntaxError> {
        out.push(self.expect(&[LParen])?);
        let (list, count) = self.parse_expression_list()?;
        out.push(list);
        out.push(self.expect(&[RParen])?);
        Ok(count)
    }

    /// (expression (',' expression)*)?; returns the node and the number of
    /// expressions in it.
    pub fn parse_expression_list(&mut self) -> Result<(Node, usize), SyntaxError> {
        let mut count = 0;
        let node = self.within(NonTerminal::ExpressionList, |p, out| {
            if p.peek_is(RParen) {
                return Ok(());
            }
            out.push(p.parse_expression()?);
            count += 1;
            while p.peek_is(Comma) {
                out.push(p.expect(&[Comma])?);
                out.push(p.parse_expression()?);
                count += 1;
            }
            Ok(())
        })?;
        Ok((node, count))
    }
}
