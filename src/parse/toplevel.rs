use crate::ast::{Node, NodeKind};
use crate::error::SyntaxResult;
use crate::parse::parser::Parser;
use crate::parse::stmt::parse_stmt;
use crate::token::TokenType;

pub fn parse_top_level(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut body = Node::new(NodeKind::StatementList, 1);
    while !parser.consume_if(TokenType::EOF)?.is_match() {
        let stmt = parse_stmt(parser)?;
        body.push_child(Some(stmt));
    }
    Ok(Node::new(NodeKind::Program, 1).append(body))
}
