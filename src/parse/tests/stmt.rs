use crate::ast::{AssignmentOp, NodeKind, StatementType};
use crate::parse::toplevel::parse_top_level;
use crate::parse::ParseOptions;
use crate::render::{render, RenderOptions};
use crate::util::test::*;

fn first_stmt(code: &str) -> crate::ast::Node {
    let root = parse_all(code);
    root.child(0).unwrap().child(0).unwrap().clone()
}

fn compact(code: &str) -> String {
    render(&parse_all(code), RenderOptions::compact())
}

#[test]
fn test_parse_var_declaration() {
    assert_eq!(
        first_stmt("var a = 1, b;"),
        n(NodeKind::VarDeclaration { iterator: false })
            .append(
                n(NodeKind::Assignment(AssignmentOp::Assign))
                    .append(ident("a"))
                    .append(num(1f64)),
            )
            .append(ident("b")),
    );
}

#[test]
fn test_parse_var_typehint() {
    let options = ParseOptions {
        typehint: true,
        ..ParseOptions::default()
    };
    let root = parse_all_with("var x:JX.Vector = null;", options);
    let decl = root.child(0).unwrap().child(0).unwrap();
    assert_eq!(
        *decl,
        n(NodeKind::VarDeclaration { iterator: false }).append(
            n(NodeKind::Assignment(AssignmentOp::Assign))
                .append(
                    n(NodeKind::Typehint).append(ident("x")).append(
                        n(NodeKind::StaticMemberExpression)
                            .append(ident("JX"))
                            .append(ident("Vector")),
                    ),
                )
                .append(n(NodeKind::NullLiteral)),
        ),
    );
    assert_eq!(
        render(&root, RenderOptions::compact()),
        "var x:JX.Vector=null;"
    );
}

#[test]
fn test_parse_typehint_rejected_without_flag() {
    let mut parser = p("var x:JX.Vector = null;");
    assert!(parse_top_level(&mut parser).is_err());
}

#[test]
fn test_parse_if_else_shape() {
    let stmt = first_stmt("if (c) { a(); } else b();");
    match stmt.kind() {
        NodeKind::If => {}
        other => panic!("expected if, got {:?}", other),
    };
    assert_eq!(stmt.num_children(), 3);
    assert!(stmt.child(2).is_some());
}

#[test]
fn test_parse_for_three_parts() {
    let stmt = first_stmt("for (var i = 0; i < 10; i++) g(i);");
    match stmt.kind() {
        NodeKind::ForLoop => {}
        other => panic!("expected for, got {:?}", other),
    };
    assert_eq!(stmt.num_children(), 4);
}

#[test]
fn test_parse_for_elided_parts() {
    assert_eq!(compact("for(;;)x();"), "for(;;)x();");
}

#[test]
fn test_parse_for_in_iterator_flag() {
    let stmt = first_stmt("for (var k in o) use(k);");
    match stmt.kind() {
        NodeKind::ForIn => {}
        other => panic!("expected for-in, got {:?}", other),
    };
    match stmt.child(0).unwrap().kind() {
        NodeKind::VarDeclaration { iterator } => assert!(iterator),
        other => panic!("expected var binding, got {:?}", other),
    };
    assert_eq!(compact("for(var k in o)use(k);"), "for(var k in o)use(k);");
}

#[test]
fn test_parse_for_each_in_requires_e4x() {
    let options = ParseOptions {
        e4x: true,
        ..ParseOptions::default()
    };
    let root = parse_all_with("for each (v in list) use(v);", options);
    let stmt = root.child(0).unwrap().child(0).unwrap();
    match stmt.kind() {
        NodeKind::ForEachIn => {}
        other => panic!("expected for-each-in, got {:?}", other),
    };
    assert_eq!(
        render(&root, RenderOptions::compact()),
        "for each(v in list)use(v);"
    );

    let mut parser = p("for each (v in list) use(v);");
    assert!(parse_top_level(&mut parser).is_err());
}

#[test]
fn test_parse_switch_clause_bodies() {
    let stmt = first_stmt("switch (x) { case 1: a(); b(); default: c(); }");
    let clauses = stmt.child(1).unwrap();
    assert_eq!(clauses.num_children(), 2);
    let case = clauses.child(0).unwrap();
    match case.kind() {
        NodeKind::CaseClause => {}
        other => panic!("expected case clause, got {:?}", other),
    };
    assert_eq!(case.child(1).unwrap().num_children(), 2);
    let default = clauses.child(1).unwrap();
    match default.kind() {
        NodeKind::DefaultClause => {}
        other => panic!("expected default clause, got {:?}", other),
    };
}

#[test]
fn test_parse_try_slots() {
    let stmt = first_stmt("try { a(); } finally { b(); }");
    assert_eq!(stmt.num_children(), 4);
    assert!(stmt.child(1).is_none());
    assert!(stmt.child(2).is_none());
    assert!(stmt.child(3).is_some());

    let stmt = first_stmt("try { a(); } catch (e) { b(); }");
    assert!(stmt.child(1).is_some());
    assert!(stmt.child(2).is_some());
    assert!(stmt.child(3).is_none());
}

#[test]
fn test_parse_try_requires_catch_or_finally() {
    let mut parser = p("try { a(); }");
    assert!(parse_top_level(&mut parser).is_err());
}

#[test]
fn test_parse_label_and_break() {
    let stmt = first_stmt("loop: while (c) { break loop; }");
    match stmt.kind() {
        NodeKind::Label => {}
        other => panic!("expected label, got {:?}", other),
    };
    assert_eq!(
        compact("loop:while(c){break loop;}"),
        "loop:while(c)break loop;"
    );
}

#[test]
fn test_parse_return_forms() {
    assert_eq!(
        first_stmt("return;"),
        n(NodeKind::StatementWithExpression(StatementType::Return)).append_slot(None),
    );
    assert_eq!(
        first_stmt("return 1;"),
        n(NodeKind::StatementWithExpression(StatementType::Return)).append(num(1f64)),
    );
}

#[test]
fn test_parse_asi_between_lines() {
    let root = parse_all("a()\nb()");
    assert_eq!(root.child(0).unwrap().num_children(), 2);
}

#[test]
fn test_parse_asi_restricted_return() {
    let root = parse_all("function f(){return\n1;}");
    let body = root
        .child(0)
        .unwrap()
        .child(0)
        .unwrap()
        .child(2)
        .unwrap()
        .clone();
    // `return` takes no value across a line terminator; the literal becomes
    // its own statement.
    assert_eq!(body.num_children(), 2);
    assert!(body.child(0).unwrap().child(0).is_none());
}

#[test]
fn test_parse_object_trailing_comma_is_flagged() {
    let mut parser = p("var o = {a: 1,};");
    assert!(parse_top_level(&mut parser).is_err());

    let options = ParseOptions {
        object_literal_elision: true,
        ..ParseOptions::default()
    };
    let root = parse_all_with("var o = {a: 1,};", options);
    assert_eq!(render(&root, RenderOptions::compact()), "var o={a:1};");
}

#[test]
fn test_parse_default_xml_namespace() {
    let options = ParseOptions {
        e4x: true,
        ..ParseOptions::default()
    };
    let root = parse_all_with("default xml namespace = ns;", options);
    let stmt = root.child(0).unwrap().child(0).unwrap();
    match stmt.kind() {
        NodeKind::XMLDefaultNamespace => {}
        other => panic!("expected default xml namespace, got {:?}", other),
    };
    assert_eq!(
        render(&root, RenderOptions::compact()),
        "default xml namespace = ns;"
    );
}

#[test]
fn test_parse_empty_statement() {
    assert_eq!(compact(";x();"), ";x();");
}

#[test]
fn test_parse_with_statement() {
    let stmt = first_stmt("with (o) { x = 1; }");
    match stmt.kind() {
        NodeKind::With => {}
        other => panic!("expected with, got {:?}", other),
    };
}
