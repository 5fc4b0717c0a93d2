use crate::ast::{JsNumber, Node, NodeKind};
use crate::parse::parser::Parser;
use crate::parse::toplevel::parse_top_level;
use crate::parse::ParseOptions;
use crate::lex::Lexer;

pub fn n(kind: NodeKind) -> Node {
    Node::new(kind, 0)
}

pub fn ident(name: &str) -> Node {
    n(NodeKind::Identifier(name.to_string()))
}

pub fn num(value: f64) -> Node {
    n(NodeKind::NumericLiteral(JsNumber(value)))
}

pub fn boolean(value: bool) -> Node {
    n(NodeKind::BooleanLiteral(value))
}

pub fn str_lit(value: &str) -> Node {
    n(NodeKind::StringLiteral {
        value: value.to_string(),
        quoted: false,
    })
}

pub fn p(code: &str) -> Parser {
    Parser::new(
        Lexer::new(code.as_bytes().to_vec()),
        ParseOptions::default(),
    )
}

pub fn p_with(code: &str, options: ParseOptions) -> Parser {
    Parser::new(Lexer::new(code.as_bytes().to_vec()), options)
}

pub fn parse_all(code: &str) -> Node {
    parse_top_level(&mut p(code)).unwrap()
}

pub fn parse_all_with(code: &str, options: ParseOptions) -> Node {
    let mut parser = Parser::new(Lexer::new(code.as_bytes().to_vec()), options);
    parse_top_level(&mut parser).unwrap()
}
