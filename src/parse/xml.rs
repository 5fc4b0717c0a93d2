use crate::ast::{Node, NodeKind};
use crate::error::SyntaxResult;
use crate::lex::{
    eat_xml_byte, eat_xml_byte_if, lex_xml_attr_value, lex_xml_comment, lex_xml_name, lex_xml_pi,
    lex_xml_text, peek_xml_byte, skip_xml_whitespace,
};
use crate::parse::expr::parse_expr;
use crate::parse::parser::Parser;
use crate::token::TokenType;

// XML literals don't tokenise like JavaScript, so these productions drive the
// lexer at the character level, dropping back to the token stream only for
// `{…}` embedded expressions.

/// Parses an E4X XML literal; the lexer is positioned at the opening `<`.
pub fn parse_xml_literal(parser: &mut Parser) -> SyntaxResult<Node> {
    parse_xml_element(parser)
}

fn parse_embedded_expression(parser: &mut Parser) -> SyntaxResult<Node> {
    let open = parser.require(TokenType::BraceOpen)?;
    let expr = parse_expr(parser, TokenType::BraceClose)?;
    parser.require(TokenType::BraceClose)?;
    Ok(Node::new(NodeKind::XMLEmbeddedExpression, open.lineno()).append(expr))
}

// A tag name: `name`, `ns:name`, or an embedded expression.
fn parse_xml_tag_name(parser: &mut Parser) -> SyntaxResult<Node> {
    skip_xml_whitespace(parser.lexer_raw());
    if peek_xml_byte(parser.lexer_raw())? == b'{' {
        return parse_embedded_expression(parser);
    };
    let lexer = parser.lexer_raw();
    let lineno = lexer.line();
    let first = lex_xml_name(lexer)?.as_str().to_string();
    if lexer.byte_ahead(0) == Some(b':') {
        eat_xml_byte(lexer, b':')?;
        let name = lex_xml_name(lexer)?.as_str().to_string();
        return Ok(Node::new(NodeKind::XMLName { ns: first, name }, lineno));
    };
    Ok(Node::new(
        NodeKind::XMLName {
            ns: String::new(),
            name: first,
        },
        lineno,
    ))
}

fn parse_xml_attributes(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut list = Node::new(NodeKind::XMLAttributeList, parser.lexer_raw().line());
    loop {
        skip_xml_whitespace(parser.lexer_raw());
        match peek_xml_byte(parser.lexer_raw())? {
            b'>' | b'/' => break,
            _ => {}
        };
        let name = parse_xml_tag_name(parser)?;
        skip_xml_whitespace(parser.lexer_raw());
        eat_xml_byte(parser.lexer_raw(), b'=')?;
        skip_xml_whitespace(parser.lexer_raw());
        let value = if peek_xml_byte(parser.lexer_raw())? == b'{' {
            parse_embedded_expression(parser)?
        } else {
            let lexer = parser.lexer_raw();
            let lineno = lexer.line();
            let text = lex_xml_attr_value(lexer)?.as_str().to_string();
            Node::new(
                NodeKind::XMLTextData {
                    whitespace: text.chars().all(|c| c.is_ascii_whitespace()),
                    text,
                },
                lineno,
            )
        };
        let lineno = name.lineno();
        list.push_child(Some(
            Node::new(NodeKind::XMLAttribute, lineno)
                .append(name)
                .append(value),
        ));
    }
    Ok(list)
}

// Element and list content, up to and including the `</` of the close tag.
fn parse_xml_content(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut list = Node::new(NodeKind::XMLContentList, parser.lexer_raw().line());
    loop {
        let text_lineno = parser.lexer_raw().line();
        let (text, whitespace) = lex_xml_text(parser.lexer_raw())?;
        if !text.is_empty() {
            list.push_child(Some(Node::new(
                NodeKind::XMLTextData {
                    text: text.as_str().to_string(),
                    whitespace,
                },
                text_lineno,
            )));
        };
        match peek_xml_byte(parser.lexer_raw())? {
            b'{' => {
                list.push_child(Some(parse_embedded_expression(parser)?));
            }
            b'<' => {
                match parser.lexer_raw().byte_ahead(1) {
                    Some(b'/') => {
                        let lexer = parser.lexer_raw();
                        eat_xml_byte(lexer, b'<')?;
                        eat_xml_byte(lexer, b'/')?;
                        return Ok(list);
                    }
                    Some(b'!') => {
                        let lexer = parser.lexer_raw();
                        let lineno = lexer.line();
                        for c in b"<!--" {
                            eat_xml_byte(lexer, *c)?;
                        }
                        let text = lex_xml_comment(lexer)?.as_str().to_string();
                        list.push_child(Some(Node::new(NodeKind::XMLComment(text), lineno)));
                    }
                    Some(b'?') => {
                        let lexer = parser.lexer_raw();
                        let lineno = lexer.line();
                        eat_xml_byte(lexer, b'<')?;
                        eat_xml_byte(lexer, b'?')?;
                        let data = lex_xml_pi(lexer)?.as_str().to_string();
                        list.push_child(Some(Node::new(NodeKind::XMLPI(data), lineno)));
                    }
                    _ => {
                        list.push_child(Some(parse_xml_element(parser)?));
                    }
                };
            }
            _ => unreachable!(),
        };
    }
}

fn parse_xml_element(parser: &mut Parser) -> SyntaxResult<Node> {
    // The expression parser hands over the position before the `<` token,
    // which may trail whitespace.
    skip_xml_whitespace(parser.lexer_raw());
    let lineno = parser.lexer_raw().line();
    eat_xml_byte(parser.lexer_raw(), b'<')?;

    // `<>…</>` is an XML list literal with no tag name.
    if eat_xml_byte_if(parser.lexer_raw(), b'>') {
        let content = parse_xml_content(parser)?;
        skip_xml_whitespace(parser.lexer_raw());
        eat_xml_byte(parser.lexer_raw(), b'>')?;
        return Ok(Node::new(NodeKind::XMLElement, lineno)
            .append_slot(None)
            .append(Node::new(NodeKind::XMLAttributeList, lineno))
            .append(content)
            .append_slot(None));
    };

    let open_name = parse_xml_tag_name(parser)?;
    let attributes = parse_xml_attributes(parser)?;

    if eat_xml_byte_if(parser.lexer_raw(), b'/') {
        eat_xml_byte(parser.lexer_raw(), b'>')?;
        return Ok(Node::new(NodeKind::XMLElement, lineno)
            .append(open_name)
            .append(attributes)
            .append(Node::new(NodeKind::XMLContentList, lineno))
            .append_slot(None));
    };
    eat_xml_byte(parser.lexer_raw(), b'>')?;
    let content = parse_xml_content(parser)?;
    skip_xml_whitespace(parser.lexer_raw());
    let close_name = if peek_xml_byte(parser.lexer_raw())? == b'>' {
        None
    } else {
        Some(parse_xml_tag_name(parser)?)
    };
    eat_xml_byte(parser.lexer_raw(), b'>')?;
    Ok(Node::new(NodeKind::XMLElement, lineno)
        .append(open_name)
        .append(attributes)
        .append(content)
        .append_slot(close_name))
}
