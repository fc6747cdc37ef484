use serde::Serialize;

use crate::lexer::token::Token;

/// Grammar rules that show up as open/close markers in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NonTerminal {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl NonTerminal {
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Class => "class",
            NonTerminal::ClassVarDec => "classVarDec",
            NonTerminal::SubroutineDec => "subroutineDec",
            NonTerminal::ParameterList => "parameterList",
            NonTerminal::SubroutineBody => "subroutineBody",
            NonTerminal::VarDec => "varDec",
            NonTerminal::Statements => "statements",
            NonTerminal::LetStatement => "letStatement",
            NonTerminal::IfStatement => "ifStatement",
            NonTerminal::WhileStatement => "whileStatement",
            NonTerminal::DoStatement => "doStatement",
            NonTerminal::ReturnStatement => "returnStatement",
            NonTerminal::Expression => "expression",
            NonTerminal::Term => "term",
            NonTerminal::ExpressionList => "expressionList",
        }
    }
}

impl std::fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    NonTerminal { kind: NonTerminal, children: Vec<Node> },
    Terminal(Token),
}

impl Node {
    pub fn kind(&self) -> Option<NonTerminal> {
        match self {
            Node::NonTerminal { kind, .. } => Some(*kind),
            Node::Terminal(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::NonTerminal { children, .. } => children,
            Node::Terminal(_) => &[],
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Terminal(tok) => Some(tok),
            Node::NonTerminal { .. } => None,
        }
    }

    /// Every consumed token under this node, in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Terminal(tok) => out.push(tok),
            Node::NonTerminal { children, .. } => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
        }
    }

    /// Lexemes of every consumed token under this node.
    pub fn lexemes(&self) -> Vec<&str> {
        self.tokens().into_iter().map(|t| t.lexeme.as_str()).collect()
    }

    /// All nonterminal nodes of `kind` in pre-order, including `self`.
    pub fn find_all(&self, kind: NonTerminal) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_kind(kind, &mut out);
        out
    }

    fn collect_kind<'a>(&'a self, kind: NonTerminal, out: &mut Vec<&'a Node>) {
        if let Node::NonTerminal { kind: k, children } = self {
            if *k == kind {
                out.push(self);
            }
            for child in children {
                child.collect_kind(kind, out);
            }
        }
    }

    /// Nesting depth of nonterminals; a bare terminal has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Terminal(_) => 0,
            Node::NonTerminal { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }
}

/// A subroutine call seen while parsing, with its computed argument count.
///
/// Direct calls `f(a, b)` count the implicit receiver, so they report one
/// more than the number of listed arguments. Qualified calls `x.f(a, b)`
/// report exactly the listed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub name: String,
    pub line: u32,
    pub arg_count: usize,
}
