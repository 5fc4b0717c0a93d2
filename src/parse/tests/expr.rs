use crate::ast::{AssignmentOp, BinaryOp, NodeKind, PostfixOp, UnaryOp};
use crate::parse::expr::parse_expr;
use crate::token::TokenType;
use crate::util::test::*;

#[test]
fn test_parse_conditional() {
    let mut parser = p("a ? b : c;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::ConditionalExpression)
            .append(ident("a"))
            .append(ident("b"))
            .append(ident("c")),
    );
}

#[test]
fn test_parse_precedence() {
    let mut parser = p("1 + 2 * 3;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::Plus)).append(num(1f64)).append(
            n(NodeKind::Operator(BinaryOp::Mult))
                .append(num(2f64))
                .append(num(3f64)),
        ),
    );
}

#[test]
fn test_parse_left_associativity() {
    let mut parser = p("a - b - c;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::Minus))
            .append(
                n(NodeKind::Operator(BinaryOp::Minus))
                    .append(ident("a"))
                    .append(ident("b")),
            )
            .append(ident("c")),
    );
}

#[test]
fn test_parse_assignment_right_associativity() {
    let mut parser = p("a = b = c;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Assignment(AssignmentOp::Assign))
            .append(ident("a"))
            .append(
                n(NodeKind::Assignment(AssignmentOp::Assign))
                    .append(ident("b"))
                    .append(ident("c")),
            ),
    );
}

#[test]
fn test_parse_member_chain() {
    let mut parser = p("a.b.c;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::StaticMemberExpression)
            .append(
                n(NodeKind::StaticMemberExpression)
                    .append(ident("a"))
                    .append(ident("b")),
            )
            .append(ident("c")),
    );
}

#[test]
fn test_parse_member_name_may_be_keyword() {
    let mut parser = p("a.delete;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::StaticMemberExpression)
            .append(ident("a"))
            .append(ident("delete")),
    );
}

#[test]
fn test_parse_computed_member() {
    let mut parser = p("a[\"x y\"];");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::DynamicMemberExpression)
            .append(ident("a"))
            .append(n(NodeKind::StringLiteral {
                value: "\"x y\"".to_string(),
                quoted: true,
            })),
    );
}

#[test]
fn test_parse_call_with_args() {
    let mut parser = p("f(a, 1);");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::FunctionCall).append(ident("f")).append(
            n(NodeKind::ArgList).append(ident("a")).append(num(1f64)),
        ),
    );
}

#[test]
fn test_parse_unary_and_postfix() {
    let mut parser = p("-a;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Unary(UnaryOp::Minus)).append(ident("a")),
    );

    let mut parser = p("a++;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Postfix(PostfixOp::Increment)).append(ident("a")),
    );

    let mut parser = p("typeof a;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Unary(UnaryOp::Typeof)).append(ident("a")),
    );
}

#[test]
fn test_parse_grouping_is_explicit() {
    let mut parser = p("(a + b) * c;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::Mult))
            .append(n(NodeKind::Parenthetical).append(
                n(NodeKind::Operator(BinaryOp::Plus))
                    .append(ident("a"))
                    .append(ident("b")),
            ))
            .append(ident("c")),
    );
}

#[test]
fn test_parse_slash_is_division_after_operand() {
    let mut parser = p("a / b;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::Div))
            .append(ident("a"))
            .append(ident("b")),
    );
}

#[test]
fn test_parse_slash_is_regex_in_operand_position() {
    let mut parser = p("/ab+c/gi;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::RegexLiteral {
            body: "ab+c".to_string(),
            flags: "gi".to_string(),
        }),
    );
}

#[test]
fn test_parse_hex_literal() {
    let mut parser = p("0xff;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        num(255f64),
    );
}

#[test]
fn test_parse_in_operator() {
    let mut parser = p("k in o;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::In))
            .append(ident("k"))
            .append(ident("o")),
    );
}

#[test]
fn test_parse_new_constructor() {
    let mut parser = p("new A.B(1);");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::FunctionConstructor)
            .append(
                n(NodeKind::StaticMemberExpression)
                    .append(ident("A"))
                    .append(ident("B")),
            )
            .append(n(NodeKind::ArgList).append(num(1f64))),
    );
}

#[test]
fn test_parse_comma_expression() {
    let mut parser = p("a, b;");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::Operator(BinaryOp::Comma))
            .append(ident("a"))
            .append(ident("b")),
    );
}

#[test]
fn test_parse_function_expression() {
    let mut parser = p("function(x) { return x; };");
    let node = parse_expr(&mut parser, TokenType::Semicolon).unwrap();
    match node.kind() {
        NodeKind::FunctionExpression => {}
        other => panic!("expected function expression, got {:?}", other),
    };
    assert!(node.child(0).is_none());
    assert_eq!(node.child(1).unwrap().num_children(), 1);
}

#[test]
fn test_parse_object_literal() {
    let mut parser = p("{a: 1, \"b\": 2};");
    let node = parse_expr(&mut parser, TokenType::Semicolon).unwrap();
    assert_eq!(
        node,
        n(NodeKind::ObjectLiteral)
            .append(
                n(NodeKind::ObjectLiteralProperty)
                    .append(ident("a"))
                    .append(num(1f64)),
            )
            .append(
                n(NodeKind::ObjectLiteralProperty)
                    .append(n(NodeKind::StringLiteral {
                        value: "\"b\"".to_string(),
                        quoted: true,
                    }))
                    .append(num(2f64)),
            ),
    );
}

#[test]
fn test_parse_array_with_holes() {
    let mut parser = p("[1,,2];");
    assert_eq!(
        parse_expr(&mut parser, TokenType::Semicolon).unwrap(),
        n(NodeKind::ArrayLiteral)
            .append(num(1f64))
            .append(n(NodeKind::EmptyExpression))
            .append(num(2f64)),
    );
}
