use crate::ast::{BinaryOp, Node, NodeKind, StatementType, UnaryOp};
use crate::render::{render, RenderOptions};
use crate::util::test::*;

fn list(children: Vec<Node>) -> Node {
    let mut node = n(NodeKind::StatementList);
    for child in children {
        node.push_child(Some(child));
    }
    node
}

fn program(children: Vec<Node>) -> Node {
    n(NodeKind::Program).append(list(children))
}

fn compact(node: &Node) -> String {
    render(node, RenderOptions::compact())
}

#[test]
fn test_render_empty_program() {
    assert_eq!(compact(&program(vec![])), "");
    assert_eq!(render(&program(vec![]), RenderOptions::pretty()), "\n");
}

#[test]
fn test_render_expression_statement_gets_semicolon() {
    let root = program(vec![n(NodeKind::FunctionCall)
        .append(ident("f"))
        .append(n(NodeKind::ArgList))]);
    assert_eq!(compact(&root), "f();");
}

#[test]
fn test_render_operator_glue() {
    let plus = n(NodeKind::Operator(BinaryOp::Plus))
        .append(ident("a"))
        .append(ident("b"));
    assert_eq!(compact(&plus), "a+b");
    assert_eq!(render(&plus, RenderOptions::pretty()), "a + b");

    let tst = n(NodeKind::Operator(BinaryOp::In))
        .append(ident("k"))
        .append(ident("o"));
    assert_eq!(compact(&tst), "k in o");
    assert_eq!(render(&tst, RenderOptions::pretty()), "k in o");

    let comma = n(NodeKind::Operator(BinaryOp::Comma))
        .append(ident("a"))
        .append(ident("b"));
    assert_eq!(compact(&comma), "a,b");
    assert_eq!(render(&comma, RenderOptions::pretty()), "a, b");
}

#[test]
fn test_render_unary_spacing() {
    let t = n(NodeKind::Unary(UnaryOp::Typeof)).append(ident("x"));
    assert_eq!(compact(&t), "typeof x");
    let t_paren = n(NodeKind::Unary(UnaryOp::Typeof))
        .append(n(NodeKind::Parenthetical).append(ident("x")));
    assert_eq!(compact(&t_paren), "typeof(x)");
    let not = n(NodeKind::Unary(UnaryOp::Not)).append(ident("x"));
    assert_eq!(compact(&not), "!x");
}

#[test]
fn test_render_string_escapes() {
    let s = program(vec![str_lit("a\nb\tc")]);
    assert_eq!(compact(&s), "\"a\\nb\\tc\";");
    let ctl = program(vec![str_lit("\u{1}")]);
    assert_eq!(compact(&ctl), "\"\\x01\";");
}

// The original emitted `\'` for a backslash; that was a copy-paste defect and
// the correct two-character form is pinned here.
#[test]
fn test_string_escape_backslash() {
    let s = program(vec![str_lit("a\\b")]);
    assert_eq!(compact(&s), "\"a\\\\b\";");
}

#[test]
fn test_render_prequoted_string_verbatim() {
    let s = program(vec![n(NodeKind::StringLiteral {
        value: "'it\\'s'".to_string(),
        quoted: true,
    })]);
    assert_eq!(compact(&s), "'it\\'s';");
}

#[test]
fn test_render_if_else() {
    let call = |f: &str| {
        n(NodeKind::FunctionCall)
            .append(ident(f))
            .append(n(NodeKind::ArgList))
    };
    let root = program(vec![n(NodeKind::If)
        .append(ident("c"))
        .append(list(vec![call("a")]))
        .append_slot(Some(list(vec![call("b")])))]);
    assert_eq!(compact(&root), "if(c){a();}else b();");

    let no_else = program(vec![n(NodeKind::If)
        .append(ident("c"))
        .append(list(vec![call("a")]))
        .append_slot(None)]);
    assert_eq!(compact(&no_else), "if(c)a();");
}

#[test]
fn test_render_else_if_chain_stays_flat() {
    let call = |f: &str| {
        n(NodeKind::FunctionCall)
            .append(ident(f))
            .append(n(NodeKind::ArgList))
    };
    let inner = n(NodeKind::If)
        .append(ident("d"))
        .append(list(vec![call("b")]))
        .append_slot(None);
    let root = program(vec![n(NodeKind::If)
        .append(ident("c"))
        .append(list(vec![call("a")]))
        .append_slot(Some(inner))]);
    assert_eq!(compact(&root), "if(c){a();}else if(d)b();");
}

#[test]
fn test_render_do_while_always_braced() {
    let body = list(vec![n(NodeKind::FunctionCall)
        .append(ident("x"))
        .append(n(NodeKind::ArgList))]);
    let root = program(vec![n(NodeKind::DoWhile).append(body).append(ident("c"))]);
    assert_eq!(compact(&root), "do{x();}while(c);");
}

#[test]
fn test_render_switch_layout() {
    let call = |f: &str| {
        n(NodeKind::FunctionCall)
            .append(ident(f))
            .append(n(NodeKind::ArgList))
    };
    let clauses = list(vec![
        n(NodeKind::CaseClause)
            .append(num(1f64))
            .append(list(vec![
                call("a"),
                n(NodeKind::StatementWithExpression(StatementType::Break)).append_slot(None),
            ])),
        n(NodeKind::DefaultClause).append(list(vec![call("b")])),
    ]);
    let root = program(vec![n(NodeKind::Switch).append(ident("x")).append(clauses)]);
    assert_eq!(compact(&root), "switch(x){case 1:a();break;default:b();}");
}

#[test]
fn test_render_try_catch_finally() {
    let root = program(vec![n(NodeKind::Try)
        .append(list(vec![]))
        .append_slot(Some(ident("e")))
        .append_slot(Some(list(vec![])))
        .append_slot(None)]);
    assert_eq!(compact(&root), "try{}catch(e){}");
}

#[test]
fn test_render_statement_with_expression() {
    let ret = n(NodeKind::StatementWithExpression(StatementType::Return)).append(num(1f64));
    assert_eq!(compact(&program(vec![ret])), "return 1;");
    let bare =
        n(NodeKind::StatementWithExpression(StatementType::Return)).append_slot(None);
    assert_eq!(compact(&program(vec![bare])), "return;");
}

#[test]
fn test_render_preserve_lineno_catchup() {
    let mut s = str_lit("a");
    s.set_lineno(5);
    let mut plus = n(NodeKind::Operator(BinaryOp::Plus));
    plus.set_lineno(5);
    let plus = plus.append(s).append({
        let mut b = str_lit("b");
        b.set_lineno(5);
        b
    });
    let root = program(vec![plus]);
    let opts = RenderOptions {
        pretty: true,
        preserve_lines: true,
    };
    assert_eq!(render(&root, opts), "\n\n\n\n\"a\" + \"b\";");
}

#[test]
fn test_render_lineno_zero_never_catches_up() {
    let root = program(vec![ident("x")]);
    assert_eq!(render(&root, RenderOptions::preserve_lines()), "x;");
}

#[test]
fn test_render_purity() {
    let root = program(vec![n(NodeKind::Operator(BinaryOp::Mult))
        .append(num(2f64))
        .append(ident("a"))]);
    let first = compact(&root);
    let second = compact(&root);
    assert_eq!(first, second);
    assert_eq!(first, "2*a;");
}

#[test]
fn test_render_xml_element() {
    let name = |s: &str| {
        n(NodeKind::XMLName {
            ns: String::new(),
            name: s.to_string(),
        })
    };
    let attr = n(NodeKind::XMLAttribute)
        .append(name("id"))
        .append(n(NodeKind::XMLTextData {
            text: "x".to_string(),
            whitespace: false,
        }));
    let mut attrs = n(NodeKind::XMLAttributeList);
    attrs.push_child(Some(attr));
    let mut content = n(NodeKind::XMLContentList);
    content.push_child(Some(n(NodeKind::XMLTextData {
        text: "hi".to_string(),
        whitespace: false,
    })));
    let el = n(NodeKind::XMLElement)
        .append(name("a"))
        .append(attrs)
        .append(content)
        .append_slot(Some(name("a")));
    assert_eq!(compact(&el), "<a id=\"x\">hi</a>");

    let empty = n(NodeKind::XMLElement)
        .append(name("br"))
        .append(n(NodeKind::XMLAttributeList))
        .append(n(NodeKind::XMLContentList))
        .append_slot(None);
    assert_eq!(compact(&empty), "<br/>");
}

#[test]
fn test_render_pretty_block() {
    let call = |f: &str| {
        n(NodeKind::FunctionCall)
            .append(ident(f))
            .append(n(NodeKind::ArgList))
    };
    let root = program(vec![n(NodeKind::While)
        .append(ident("c"))
        .append(list(vec![call("a"), call("b")]))]);
    assert_eq!(
        render(&root, RenderOptions::pretty()),
        "while (c) {\n  a();\n  b();\n}\n"
    );
}
