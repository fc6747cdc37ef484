// Class-level productions: class, classVarDec, subroutineDec,
// parameterList, subroutineBody, varDec.

mod common;
use common::*;

use insta::assert_snapshot;
use jack_syntax::parser::tree::NonTerminal;

#[test]
fn class_with_one_field() {
    assert_snapshot!(trace_of("class A { field int x; }").trim_end(), @r"
<class>
<keyword> class </keyword>
<identifier> A </identifier>
<symbol> { </symbol>
<classVarDec>
<keyword> field </keyword>
<keyword> int </keyword>
<identifier> x </identifier>
<symbol> ; </symbol>
</classVarDec>
<symbol> } </symbol>
</class>
");
}

#[test]
fn empty_subroutine() {
    assert_snapshot!(trace_of("class A { function void main() { } }").trim_end(), @r"
<class>
<keyword> class </keyword>
<identifier> A </identifier>
<symbol> { </symbol>
<subroutineDec>
<keyword> function </keyword>
<keyword> void </keyword>
<identifier> main </identifier>
<symbol> ( </symbol>
<parameterList>
</parameterList>
<symbol> ) </symbol>
<subroutineBody>
<symbol> { </symbol>
<statements>
</statements>
<symbol> } </symbol>
</subroutineBody>
</subroutineDec>
<symbol> } </symbol>
</class>
");
}

#[test]
fn default_line_ending_is_crlf() {
    let output = jack_syntax::parse_str("class A { }").unwrap();
    let text = jack_syntax::trace::render(&output.tree, jack_syntax::config::Config::default().line_ending);
    assert!(text.starts_with("<class>\r\n<keyword> class </keyword>\r\n"));
    assert!(text.ends_with("</class>\r\n"));
}

#[test]
fn class_var_decs_with_name_lists() {
    let out = parse_ok("class Point { field int x, y; static Point origin; field char c; }");
    let decs = out.tree.find_all(NonTerminal::ClassVarDec);
    assert_eq!(decs.len(), 3);
    assert_eq!(decs[0].lexemes(), vec!["field", "int", "x", ",", "y", ";"]);
    assert_eq!(decs[1].lexemes(), vec!["static", "Point", "origin", ";"]);
    assert_eq!(decs[2].lexemes(), vec!["field", "char", "c", ";"]);
}

#[test]
fn every_subroutine_kind() {
    let out = parse_ok(
        "class Box {
            constructor Box new(int w) { return this; }
            method boolean isEmpty() { return false; }
            function char first(Array a, boolean b) { return 0; }
        }",
    );
    let subs = out.tree.find_all(NonTerminal::SubroutineDec);
    assert_eq!(subs.len(), 3);
    assert_eq!(subs[0].lexemes()[..3], ["constructor", "Box", "new"]);
    assert_eq!(subs[1].lexemes()[..3], ["method", "boolean", "isEmpty"]);
    assert_eq!(subs[2].lexemes()[..3], ["function", "char", "first"]);
}

#[test]
fn parameter_list_shapes() {
    let trace = trace_of("class A { function void f(int a, char b, Foo c) { return; } }");
    assert_eq!(
        rule_lines(&trace, "parameterList"),
        vec![
            "<parameterList>",
            "<keyword> int </keyword>",
            "<identifier> a </identifier>",
            "<symbol> , </symbol>",
            "<keyword> char </keyword>",
            "<identifier> b </identifier>",
            "<symbol> , </symbol>",
            "<identifier> Foo </identifier>",
            "<identifier> c </identifier>",
            "</parameterList>",
        ]
    );
}

#[test]
fn var_decs_precede_statements() {
    let out = parse_ok(
        "class A { function void f() { var int i; var String s, t; let i = 1; return; } }",
    );
    let body = &out.tree.find_all(NonTerminal::SubroutineBody)[0];
    let kinds: Vec<_> = body.children().iter().filter_map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NonTerminal::VarDec, NonTerminal::VarDec, NonTerminal::Statements]);
    let var_decs = out.tree.find_all(NonTerminal::VarDec);
    assert_eq!(var_decs[1].lexemes(), vec!["var", "String", "s", ",", "t", ";"]);
}

#[test]
fn field_after_subroutine_is_rejected() {
    let err = parse_err("class A {\n function void f() { return; }\n field int x;\n}");
    assert_eq!(err.line(), 3);
    assert_eq!(err.report(), "[line 3] Error at 'field': expected '}'");
}

#[test]
fn void_field_type_is_rejected() {
    let err = parse_err("class A { field void x; }");
    assert_eq!(
        err.report(),
        "[line 1] Error at 'void': expected one of 'int', 'char', 'boolean', identifier"
    );
}

#[test]
fn var_dec_after_statement_is_rejected() {
    let err = parse_err("class A { function void f() { let x = 1; var int y; } }");
    assert_eq!(err.report(), "[line 1] Error at 'var': expected '}'");
}

#[test]
fn missing_class_name() {
    let err = parse_err("class { }");
    assert_eq!(err.report(), "[line 1] Error at '{': expected identifier");
}

#[test]
fn trace_nesting_is_balanced() {
    let out = parse_ok(include_str!("fixtures/Square.jack"));
    let items = jack_syntax::trace::flatten(&out.tree);
    assert!(jack_syntax::trace::is_balanced(&items));
    assert_eq!(out.tree.find_all(NonTerminal::SubroutineDec).len(), 9);
}
