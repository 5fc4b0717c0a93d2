use crate::ast::{AssignmentOp, Node, NodeKind, StatementType};
use crate::error::{SyntaxErrorType, SyntaxResult};
use crate::parse::expr::{
    parse_expr, parse_expr_no_in, parse_expr_with_asi, parse_expr_with_min_prec,
    parse_func_params, Asi, PREC_ASSIGNMENT,
};
use crate::parse::parser::Parser;
use crate::token::TokenType;

pub fn parse_stmt(parser: &mut Parser) -> SyntaxResult<Node> {
    match parser.peek()?.typ() {
        TokenType::BraceOpen => parse_stmt_block(parser),
        TokenType::KeywordBreak => parse_stmt_break_or_continue(parser, StatementType::Break),
        TokenType::KeywordContinue => {
            parse_stmt_break_or_continue(parser, StatementType::Continue)
        }
        TokenType::KeywordDefault if parser.options().e4x => {
            parse_stmt_default_xml_namespace(parser)
        }
        TokenType::KeywordDo => parse_stmt_do_while(parser),
        TokenType::KeywordFor => parse_stmt_for(parser),
        TokenType::KeywordFunction => parse_decl_function(parser),
        TokenType::KeywordIf => parse_stmt_if(parser),
        TokenType::KeywordReturn => parse_stmt_return(parser),
        TokenType::KeywordSwitch => parse_stmt_switch(parser),
        TokenType::KeywordThrow => parse_stmt_throw(parser),
        TokenType::KeywordTry => parse_stmt_try(parser),
        TokenType::KeywordVar => parse_stmt_var(parser),
        TokenType::KeywordWhile => parse_stmt_while(parser),
        TokenType::KeywordWith => parse_stmt_with(parser),
        TokenType::Semicolon => {
            let t = parser.next()?;
            Ok(Node::new(NodeKind::EmptyExpression, t.lineno()))
        }
        TokenType::Identifier => parse_stmt_label_or_expression(parser),
        _ => parse_stmt_expression(parser),
    }
}

pub fn parse_stmt_block(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::BraceOpen)?;
    let mut list = Node::new(NodeKind::StatementList, start.lineno());
    loop {
        if parser.consume_if(TokenType::BraceClose)?.is_match() {
            return Ok(list);
        };
        let stmt = parse_stmt(parser)?;
        list.push_child(Some(stmt));
    }
}

// `;`, a line terminator before the next token, `}`, or end of input all
// terminate a statement.
fn require_statement_end(parser: &mut Parser) -> SyntaxResult<()> {
    if parser.consume_if(TokenType::Semicolon)?.is_match() {
        return Ok(());
    };
    let t = parser.peek()?;
    if t.preceded_by_line_terminator()
        || t.typ() == TokenType::BraceClose
        || t.typ() == TokenType::EOF
    {
        Ok(())
    } else {
        Err(t.error(SyntaxErrorType::ExpectedSyntax("semicolon")))
    }
}

fn parse_stmt_label_or_expression(parser: &mut Parser) -> SyntaxResult<Node> {
    let cp = parser.checkpoint();
    let t = parser.next()?;
    if parser.peek()?.typ() == TokenType::Colon {
        parser.consume_peeked();
        let name = Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno());
        let body = parse_stmt(parser)?;
        return Ok(Node::new(NodeKind::Label, t.lineno())
            .append(name)
            .append(body));
    };
    parser.restore_checkpoint(cp);
    parse_stmt_expression(parser)
}

pub fn parse_stmt_expression(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut asi = Asi::can();
    let expression = parse_expr_with_asi(parser, TokenType::Semicolon, &mut asi)?;
    if !asi.did_end_with_asi {
        parser.require(TokenType::Semicolon)?;
    };
    // A statement-position expression is stored bare; the renderer supplies
    // the trailing semicolon.
    Ok(expression)
}

fn parse_stmt_break_or_continue(
    parser: &mut Parser,
    typ: StatementType,
) -> SyntaxResult<Node> {
    let start = parser.next()?;
    let next = parser.peek()?;
    let label = if next.typ() == TokenType::Identifier && !next.preceded_by_line_terminator() {
        parser.consume_peeked();
        Some(Node::new(
            NodeKind::Identifier(next.loc().as_str().to_string()),
            next.lineno(),
        ))
    } else {
        None
    };
    require_statement_end(parser)?;
    Ok(Node::new(NodeKind::StatementWithExpression(typ), start.lineno()).append_slot(label))
}

fn parse_stmt_return(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordReturn)?;
    let next = parser.peek()?;
    let value = if next.preceded_by_line_terminator()
        || next.typ() == TokenType::BraceClose
        || next.typ() == TokenType::EOF
    {
        // Automatic Semicolon Insertion: `return` is a restricted production.
        None
    } else if parser.consume_if(TokenType::Semicolon)?.is_match() {
        None
    } else {
        let mut asi = Asi::can();
        let value = parse_expr_with_asi(parser, TokenType::Semicolon, &mut asi)?;
        if !asi.did_end_with_asi {
            parser.require(TokenType::Semicolon)?;
        };
        Some(value)
    };
    Ok(
        Node::new(
            NodeKind::StatementWithExpression(StatementType::Return),
            start.lineno(),
        )
        .append_slot(value),
    )
}

fn parse_stmt_throw(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordThrow)?;
    if parser.peek()?.preceded_by_line_terminator() {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(start.error(SyntaxErrorType::LineTerminatorAfterThrow));
    };
    let mut asi = Asi::can();
    let value = parse_expr_with_asi(parser, TokenType::Semicolon, &mut asi)?;
    if !asi.did_end_with_asi {
        parser.require(TokenType::Semicolon)?;
    };
    Ok(
        Node::new(
            NodeKind::StatementWithExpression(StatementType::Throw),
            start.lineno(),
        )
        .append(value),
    )
}

pub enum VarDeclParseMode {
    // Terminated by ASI rules; used in statement position.
    Asi,
    // Restricted to the leftmost forms allowed in a `for` header.
    Leftmost,
}

pub fn parse_decl_var(parser: &mut Parser, mode: VarDeclParseMode) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordVar)?;
    let mut decl = Node::new(NodeKind::VarDeclaration { iterator: false }, start.lineno());
    loop {
        let name_t = parser.require(TokenType::Identifier)?;
        let mut target = Node::new(
            NodeKind::Identifier(name_t.loc().as_str().to_string()),
            name_t.lineno(),
        );
        if parser.options().typehint && parser.consume_if(TokenType::Colon)?.is_match() {
            let typ = parse_typehint_type(parser)?;
            target = Node::new(NodeKind::Typehint, name_t.lineno())
                .append(target)
                .append(typ);
        };
        if parser.consume_if(TokenType::Equals)?.is_match() {
            let mut asi = match mode {
                VarDeclParseMode::Asi => Asi::can(),
                VarDeclParseMode::Leftmost => Asi::no(),
            };
            let no_in = match mode {
                VarDeclParseMode::Asi => false,
                VarDeclParseMode::Leftmost => true,
            };
            let initializer = parse_expr_with_min_prec(
                parser,
                PREC_ASSIGNMENT,
                TokenType::Comma,
                TokenType::Semicolon,
                no_in,
                &mut asi,
            )?;
            let lineno = target.lineno();
            decl.push_child(Some(
                Node::new(NodeKind::Assignment(AssignmentOp::Assign), lineno)
                    .append(target)
                    .append(initializer),
            ));
            if asi.did_end_with_asi {
                return Ok(decl);
            };
        } else {
            decl.push_child(Some(target));
        };
        if !parser.consume_if(TokenType::Comma)?.is_match() {
            break;
        };
    }
    Ok(decl)
}

// A type hint is a dotted identifier chain: `var x:JX.Vector = …`.
fn parse_typehint_type(parser: &mut Parser) -> SyntaxResult<Node> {
    let t = parser.require(TokenType::Identifier)?;
    let mut typ = Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno());
    while parser.consume_if(TokenType::Dot)?.is_match() {
        let m = parser.require(TokenType::Identifier)?;
        typ = Node::new(NodeKind::StaticMemberExpression, t.lineno())
            .append(typ)
            .append(Node::new(
                NodeKind::Identifier(m.loc().as_str().to_string()),
                m.lineno(),
            ));
    }
    Ok(typ)
}

fn parse_stmt_var(parser: &mut Parser) -> SyntaxResult<Node> {
    let decl = parse_decl_var(parser, VarDeclParseMode::Asi)?;
    require_statement_end(parser)?;
    Ok(decl)
}

fn parse_stmt_if(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordIf)?;
    parser.require(TokenType::ParenthesisOpen)?;
    let test = parse_expr(parser, TokenType::ParenthesisClose)?;
    parser.require(TokenType::ParenthesisClose)?;
    let consequent = parse_stmt(parser)?;
    let alternate = if parser.consume_if(TokenType::KeywordElse)?.is_match() {
        Some(parse_stmt(parser)?)
    } else {
        None
    };
    Ok(Node::new(NodeKind::If, start.lineno())
        .append(test)
        .append(consequent)
        .append_slot(alternate))
}

fn parse_stmt_while(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordWhile)?;
    parser.require(TokenType::ParenthesisOpen)?;
    let condition = parse_expr(parser, TokenType::ParenthesisClose)?;
    parser.require(TokenType::ParenthesisClose)?;
    let body = parse_stmt(parser)?;
    Ok(Node::new(NodeKind::While, start.lineno())
        .append(condition)
        .append(body))
}

fn parse_stmt_do_while(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordDo)?;
    let body = parse_stmt(parser)?;
    parser.require(TokenType::KeywordWhile)?;
    parser.require(TokenType::ParenthesisOpen)?;
    let condition = parse_expr(parser, TokenType::ParenthesisClose)?;
    parser.require(TokenType::ParenthesisClose)?;
    parser.consume_if(TokenType::Semicolon)?;
    Ok(Node::new(NodeKind::DoWhile, start.lineno())
        .append(body)
        .append(condition))
}

fn parse_stmt_with(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordWith)?;
    parser.require(TokenType::ParenthesisOpen)?;
    let object = parse_expr(parser, TokenType::ParenthesisClose)?;
    parser.require(TokenType::ParenthesisClose)?;
    let body = parse_stmt(parser)?;
    Ok(Node::new(NodeKind::With, start.lineno())
        .append(object)
        .append(body))
}

fn parse_stmt_try(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordTry)?;
    let block = parse_stmt_block(parser)?;
    let mut parameter = None;
    let mut catch_block = None;
    if parser.consume_if(TokenType::KeywordCatch)?.is_match() {
        parser.require(TokenType::ParenthesisOpen)?;
        let name = parser.require(TokenType::Identifier)?;
        parameter = Some(Node::new(
            NodeKind::Identifier(name.loc().as_str().to_string()),
            name.lineno(),
        ));
        parser.require(TokenType::ParenthesisClose)?;
        catch_block = Some(parse_stmt_block(parser)?);
    };
    let finally = if parser.consume_if(TokenType::KeywordFinally)?.is_match() {
        Some(parse_stmt_block(parser)?)
    } else {
        None
    };
    if catch_block.is_none() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
    };
    Ok(Node::new(NodeKind::Try, start.lineno())
        .append(block)
        .append_slot(parameter)
        .append_slot(catch_block)
        .append_slot(finally))
}

fn parse_stmt_switch(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordSwitch)?;
    parser.require(TokenType::ParenthesisOpen)?;
    let test = parse_expr(parser, TokenType::ParenthesisClose)?;
    parser.require(TokenType::ParenthesisClose)?;
    parser.require(TokenType::BraceOpen)?;
    let mut clauses = Node::new(NodeKind::StatementList, start.lineno());
    while parser.peek()?.typ() != TokenType::BraceClose {
        let clause = if parser.consume_if(TokenType::KeywordCase)?.is_match() {
            let matcher = parse_expr(parser, TokenType::Colon)?;
            parser.require(TokenType::Colon)?;
            let lineno = matcher.lineno();
            let body = parse_switch_clause_body(parser)?;
            Node::new(NodeKind::CaseClause, lineno)
                .append(matcher)
                .append(body)
        } else {
            let t = parser.require(TokenType::KeywordDefault)?;
            parser.require(TokenType::Colon)?;
            let body = parse_switch_clause_body(parser)?;
            Node::new(NodeKind::DefaultClause, t.lineno()).append(body)
        };
        clauses.push_child(Some(clause));
    }
    parser.require(TokenType::BraceClose)?;
    Ok(Node::new(NodeKind::Switch, start.lineno())
        .append(test)
        .append(clauses))
}

fn parse_switch_clause_body(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut body = Node::new(NodeKind::StatementList, 0);
    loop {
        match parser.peek()?.typ() {
            TokenType::KeywordCase | TokenType::KeywordDefault | TokenType::BraceClose => break,
            _ => {
                let stmt = parse_stmt(parser)?;
                body.push_child(Some(stmt));
            }
        };
    }
    Ok(body)
}

fn parse_stmt_for(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordFor)?;
    let mut for_each = false;
    if parser.options().e4x {
        let t = parser.peek()?;
        if t.typ() == TokenType::Identifier && t.loc().as_str() == "each" {
            parser.consume_peeked();
            for_each = true;
        };
    };
    parser.require(TokenType::ParenthesisOpen)?;

    enum Init {
        Empty,
        Declaration(Node),
        Expression(Node),
    }

    let init = match parser.peek()?.typ() {
        TokenType::Semicolon => Init::Empty,
        TokenType::KeywordVar => {
            Init::Declaration(parse_decl_var(parser, VarDeclParseMode::Leftmost)?)
        }
        _ => Init::Expression(parse_expr_no_in(parser, TokenType::Semicolon)?),
    };

    if parser.consume_if(TokenType::KeywordIn)?.is_match() {
        let binding = match init {
            Init::Empty => {
                return Err(start.error(SyntaxErrorType::ForLoopHeaderHasInvalidLhs));
            }
            Init::Declaration(mut decl) => {
                if decl.num_children() != 1 {
                    return Err(start.error(SyntaxErrorType::ForLoopHeaderHasInvalidLhs));
                };
                *decl.kind_mut() = NodeKind::VarDeclaration { iterator: true };
                decl
            }
            Init::Expression(expr) => {
                if !expr.is_valid_lval() {
                    return Err(start.error(SyntaxErrorType::ForLoopHeaderHasInvalidLhs));
                };
                expr
            }
        };
        let iterated = parse_expr(parser, TokenType::ParenthesisClose)?;
        parser.require(TokenType::ParenthesisClose)?;
        let body = parse_stmt(parser)?;
        let kind = if for_each {
            NodeKind::ForEachIn
        } else {
            NodeKind::ForIn
        };
        return Ok(Node::new(kind, start.lineno())
            .append(binding)
            .append(iterated)
            .append(body));
    };

    if for_each {
        // `for each` exists only in the in-iteration form.
        return Err(start.error(SyntaxErrorType::ForLoopHeaderHasInvalidLhs));
    };

    let init = match init {
        Init::Empty => Node::new(NodeKind::EmptyExpression, 0),
        Init::Declaration(decl) => decl,
        Init::Expression(expr) => expr,
    };
    parser.require(TokenType::Semicolon)?;
    let condition = if parser.peek()?.typ() == TokenType::Semicolon {
        Node::new(NodeKind::EmptyExpression, 0)
    } else {
        parse_expr(parser, TokenType::Semicolon)?
    };
    parser.require(TokenType::Semicolon)?;
    let update = if parser.peek()?.typ() == TokenType::ParenthesisClose {
        Node::new(NodeKind::EmptyExpression, 0)
    } else {
        parse_expr(parser, TokenType::ParenthesisClose)?
    };
    parser.require(TokenType::ParenthesisClose)?;
    let body = parse_stmt(parser)?;
    Ok(Node::new(NodeKind::ForLoop, start.lineno())
        .append(init)
        .append(condition)
        .append(update)
        .append(body))
}

pub fn parse_decl_function(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordFunction)?;
    let name_t = parser.require(TokenType::Identifier)?;
    let name = Node::new(
        NodeKind::Identifier(name_t.loc().as_str().to_string()),
        name_t.lineno(),
    );
    let params = parse_func_params(parser)?;
    let body = parse_stmt_block(parser)?;
    Ok(Node::new(NodeKind::FunctionDeclaration, start.lineno())
        .append(name)
        .append(params)
        .append(body))
}

fn parse_stmt_default_xml_namespace(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordDefault)?;
    let xml = parser.require(TokenType::Identifier)?;
    if xml.loc().as_str() != "xml" {
        return Err(xml.error(SyntaxErrorType::ExpectedSyntax("xml namespace declaration")));
    };
    let ns = parser.require(TokenType::Identifier)?;
    if ns.loc().as_str() != "namespace" {
        return Err(ns.error(SyntaxErrorType::ExpectedSyntax("xml namespace declaration")));
    };
    parser.require(TokenType::Equals)?;
    let mut asi = Asi::can();
    let value = parse_expr_with_asi(parser, TokenType::Semicolon, &mut asi)?;
    if !asi.did_end_with_asi {
        parser.require(TokenType::Semicolon)?;
    };
    Ok(Node::new(NodeKind::XMLDefaultNamespace, start.lineno()).append(value))
}
