//! Flattening of a syntax tree into the open/close/terminal trace and its
//! text renderings.

use crate::config::LineEnding;
use crate::lexer::token::Token;
use crate::parser::tree::{Node, NonTerminal};

/// One item of a flattened trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceItem<'a> {
    Open(NonTerminal),
    Close(NonTerminal),
    Terminal(&'a Token),
}

impl std::fmt::Display for TraceItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceItem::Open(kind) => write!(f, "<{kind}>"),
            TraceItem::Close(kind) => write!(f, "</{kind}>"),
            TraceItem::Terminal(tok) => write!(f, "{tok}"),
        }
    }
}

/// Pre-order flattening of `node`.
pub fn flatten(node: &Node) -> Vec<TraceItem<'_>> {
    let mut items = Vec::new();
    push_items(node, &mut items);
    items
}

fn push_items<'a>(node: &'a Node, items: &mut Vec<TraceItem<'a>>) {
    match node {
        Node::Terminal(tok) => items.push(TraceItem::Terminal(tok)),
        Node::NonTerminal { kind, children } => {
            items.push(TraceItem::Open(*kind));
            for child in children {
                push_items(child, items);
            }
            items.push(TraceItem::Close(*kind));
        }
    }
}

/// True if every close marker matches the innermost open one and nothing
/// is left open at the end.
pub fn is_balanced(items: &[TraceItem<'_>]) -> bool {
    let mut stack = Vec::new();
    for item in items {
        match item {
            TraceItem::Open(kind) => stack.push(*kind),
            TraceItem::Close(kind) => {
                if stack.pop() != Some(*kind) {
                    return false;
                }
            }
            TraceItem::Terminal(_) => {}
        }
    }
    stack.is_empty()
}

/// Render the trace of `node`, one item per line.
pub fn render(node: &Node, line_ending: LineEnding) -> String {
    render_items(&flatten(node), line_ending)
}

pub fn render_items(items: &[TraceItem<'_>], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut buf = String::new();
    for item in items {
        buf.push_str(&item.to_string());
        buf.push_str(eol);
    }
    buf
}

/// Token listing wrapped in `<tokens>` … `</tokens>`.
pub fn render_tokens(tokens: &[Token], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut buf = String::from("<tokens>");
    buf.push_str(eol);
    for tok in tokens {
        buf.push_str(&tok.to_string());
        buf.push_str(eol);
    }
    buf.push_str("</tokens>");
    buf.push_str(eol);
    buf
}

pub fn to_json(node: &Node) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node)
}
