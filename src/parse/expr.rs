use std::str::FromStr;

use crate::ast::{AssignmentOp, BinaryOp, JsNumber, Node, NodeKind, PostfixOp, UnaryOp};
use crate::error::{SyntaxError, SyntaxErrorType, SyntaxResult};
use crate::lex::LexMode;
use crate::parse::parser::Parser;
use crate::parse::stmt::parse_stmt_block;
use crate::parse::xml::parse_xml_literal;
use crate::source::SourceRange;
use crate::token::TokenType;

pub struct Asi {
    pub can_end_with_asi: bool,
    pub did_end_with_asi: bool,
}

impl Asi {
    pub fn can() -> Asi {
        Asi {
            can_end_with_asi: true,
            did_end_with_asi: false,
        }
    }

    pub fn no() -> Asi {
        Asi {
            can_end_with_asi: false,
            did_end_with_asi: false,
        }
    }
}

const PREC_COMMA: u8 = 1;
pub const PREC_ASSIGNMENT: u8 = 2;
const PREC_CONDITIONAL: u8 = 3;
const PREC_OR: u8 = 4;
const PREC_AND: u8 = 5;
const PREC_BIT_OR: u8 = 6;
const PREC_BIT_XOR: u8 = 7;
const PREC_BIT_AND: u8 = 8;
const PREC_EQUALITY: u8 = 9;
const PREC_RELATIONAL: u8 = 10;
const PREC_SHIFT: u8 = 11;
const PREC_ADDITIVE: u8 = 12;
const PREC_MULTIPLICATIVE: u8 = 13;
const PREC_UNARY: u8 = 14;
const PREC_POSTFIX: u8 = 15;
const PREC_MEMBER: u8 = 16;

enum InfixKind {
    Binary(BinaryOp),
    Assignment(AssignmentOp),
    Conditional,
    Call,
    StaticMember,
    DynamicMember,
    Descendant,
}

struct InfixOperator {
    prec: u8,
    right_assoc: bool,
    kind: InfixKind,
}

fn infix(prec: u8, right_assoc: bool, kind: InfixKind) -> Option<InfixOperator> {
    Some(InfixOperator {
        prec,
        right_assoc,
        kind,
    })
}

fn infix_operator(typ: TokenType, no_in: bool) -> Option<InfixOperator> {
    use InfixKind::*;
    match typ {
        TokenType::Comma => infix(PREC_COMMA, false, Binary(BinaryOp::Comma)),
        TokenType::Equals => infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::Assign)),
        TokenType::AsteriskEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::MultAssign))
        }
        TokenType::SlashEquals => infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::DivAssign)),
        TokenType::PercentEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::ModAssign))
        }
        TokenType::PlusEquals => infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::PlusAssign)),
        TokenType::HyphenEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::MinusAssign))
        }
        TokenType::ChevronLeftChevronLeftEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::LeftShiftAssign))
        }
        TokenType::ChevronRightChevronRightEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::RightShiftAssign))
        }
        TokenType::ChevronRightChevronRightChevronRightEquals => infix(
            PREC_ASSIGNMENT,
            true,
            Assignment(AssignmentOp::UnsignedRightShiftAssign),
        ),
        TokenType::AmpersandEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::BitAndAssign))
        }
        TokenType::CaretEquals => {
            infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::BitXorAssign))
        }
        TokenType::BarEquals => infix(PREC_ASSIGNMENT, true, Assignment(AssignmentOp::BitOrAssign)),
        TokenType::Question => infix(PREC_CONDITIONAL, true, Conditional),
        TokenType::BarBar => infix(PREC_OR, false, Binary(BinaryOp::Or)),
        TokenType::AmpersandAmpersand => infix(PREC_AND, false, Binary(BinaryOp::And)),
        TokenType::Bar => infix(PREC_BIT_OR, false, Binary(BinaryOp::BitOr)),
        TokenType::Caret => infix(PREC_BIT_XOR, false, Binary(BinaryOp::BitXor)),
        TokenType::Ampersand => infix(PREC_BIT_AND, false, Binary(BinaryOp::BitAnd)),
        TokenType::EqualsEquals => infix(PREC_EQUALITY, false, Binary(BinaryOp::Equal)),
        TokenType::ExclamationEquals => infix(PREC_EQUALITY, false, Binary(BinaryOp::NotEqual)),
        TokenType::EqualsEqualsEquals => {
            infix(PREC_EQUALITY, false, Binary(BinaryOp::StrictEqual))
        }
        TokenType::ExclamationEqualsEquals => {
            infix(PREC_EQUALITY, false, Binary(BinaryOp::StrictNotEqual))
        }
        TokenType::ChevronLeft => infix(PREC_RELATIONAL, false, Binary(BinaryOp::LessThan)),
        TokenType::ChevronLeftEquals => {
            infix(PREC_RELATIONAL, false, Binary(BinaryOp::LessThanEqual))
        }
        TokenType::ChevronRight => infix(PREC_RELATIONAL, false, Binary(BinaryOp::GreaterThan)),
        TokenType::ChevronRightEquals => {
            infix(PREC_RELATIONAL, false, Binary(BinaryOp::GreaterThanEqual))
        }
        TokenType::KeywordIn if !no_in => infix(PREC_RELATIONAL, false, Binary(BinaryOp::In)),
        TokenType::KeywordInstanceof => {
            infix(PREC_RELATIONAL, false, Binary(BinaryOp::Instanceof))
        }
        TokenType::ChevronLeftChevronLeft => infix(PREC_SHIFT, false, Binary(BinaryOp::LeftShift)),
        TokenType::ChevronRightChevronRight => {
            infix(PREC_SHIFT, false, Binary(BinaryOp::RightShift))
        }
        TokenType::ChevronRightChevronRightChevronRight => {
            infix(PREC_SHIFT, false, Binary(BinaryOp::UnsignedRightShift))
        }
        TokenType::Plus => infix(PREC_ADDITIVE, false, Binary(BinaryOp::Plus)),
        TokenType::Hyphen => infix(PREC_ADDITIVE, false, Binary(BinaryOp::Minus)),
        TokenType::Asterisk => infix(PREC_MULTIPLICATIVE, false, Binary(BinaryOp::Mult)),
        TokenType::Slash => infix(PREC_MULTIPLICATIVE, false, Binary(BinaryOp::Div)),
        TokenType::Percent => infix(PREC_MULTIPLICATIVE, false, Binary(BinaryOp::Mod)),
        TokenType::Dot => infix(PREC_MEMBER, false, StaticMember),
        TokenType::DotDot => infix(PREC_MEMBER, false, Descendant),
        TokenType::BracketOpen => infix(PREC_MEMBER, false, DynamicMember),
        TokenType::ParenthesisOpen => infix(PREC_MEMBER, false, Call),
        _ => None,
    }
}

fn unary_operator(typ: TokenType) -> Option<UnaryOp> {
    match typ {
        TokenType::Exclamation => Some(UnaryOp::Not),
        TokenType::Tilde => Some(UnaryOp::BitNot),
        TokenType::Plus => Some(UnaryOp::Plus),
        TokenType::Hyphen => Some(UnaryOp::Minus),
        TokenType::PlusPlus => Some(UnaryOp::Increment),
        TokenType::HyphenHyphen => Some(UnaryOp::Decrement),
        TokenType::KeywordTypeof => Some(UnaryOp::Typeof),
        TokenType::KeywordVoid => Some(UnaryOp::Void),
        TokenType::KeywordDelete => Some(UnaryOp::Delete),
        _ => None,
    }
}

pub fn normalise_literal_number(raw: &SourceRange, lineno: u32) -> SyntaxResult<JsNumber> {
    match raw.as_str() {
        s if s.starts_with("0x") || s.starts_with("0X") => u64::from_str_radix(&s[2..], 16)
            .map(|v| v as f64)
            .map_err(|_| ()),
        s => f64::from_str(s).map_err(|_| ()),
    }
    .map(JsNumber)
    .map_err(|_| SyntaxError::new(SyntaxErrorType::MalformedLiteralNumber, raw.start, lineno))
}

fn regex_literal(raw: &SourceRange) -> (String, String) {
    let text = raw.as_str();
    // The lexer guarantees at least `/…/`; flags trail the final slash.
    let close = text.rfind('/').unwrap_or(text.len() - 1);
    (
        text[1..close].to_string(),
        text[close + 1..].to_string(),
    )
}

pub fn parse_call_args(parser: &mut Parser) -> SyntaxResult<Node> {
    let mut args = Node::new(NodeKind::ArgList, 0);
    loop {
        if parser.peek()?.typ() == TokenType::ParenthesisClose {
            break;
        };
        let value =
            parse_expr_until_either(parser, TokenType::Comma, TokenType::ParenthesisClose)?;
        args.push_child(Some(value));
        if !parser.consume_if(TokenType::Comma)?.is_match() {
            break;
        };
    }
    Ok(args)
}

pub fn parse_expr(parser: &mut Parser, terminator: TokenType) -> SyntaxResult<Node> {
    let mut asi = Asi::no();
    parse_expr_with_min_prec(parser, 1, terminator, TokenType::_Dummy, false, &mut asi)
}

pub fn parse_expr_no_in(parser: &mut Parser, terminator: TokenType) -> SyntaxResult<Node> {
    let mut asi = Asi::no();
    parse_expr_with_min_prec(parser, 1, terminator, TokenType::KeywordIn, true, &mut asi)
}

pub fn parse_expr_with_asi(
    parser: &mut Parser,
    terminator: TokenType,
    asi: &mut Asi,
) -> SyntaxResult<Node> {
    parse_expr_with_min_prec(parser, 1, terminator, TokenType::_Dummy, false, asi)
}

pub fn parse_expr_until_either(
    parser: &mut Parser,
    terminator_a: TokenType,
    terminator_b: TokenType,
) -> SyntaxResult<Node> {
    let mut asi = Asi::no();
    parse_expr_with_min_prec(parser, 1, terminator_a, terminator_b, false, &mut asi)
}

pub fn parse_grouping(parser: &mut Parser, asi: &mut Asi) -> SyntaxResult<Node> {
    let open = parser.require(TokenType::ParenthesisOpen)?;
    let expr = parse_expr_with_min_prec(
        parser,
        1,
        TokenType::ParenthesisClose,
        TokenType::_Dummy,
        false,
        asi,
    )?;
    parser.require(TokenType::ParenthesisClose)?;
    Ok(Node::new(NodeKind::Parenthetical, open.lineno()).append(expr))
}

pub fn parse_expr_array(parser: &mut Parser) -> SyntaxResult<Node> {
    let open = parser.require(TokenType::BracketOpen)?;
    let mut arr = Node::new(NodeKind::ArrayLiteral, open.lineno());
    loop {
        if parser.consume_if(TokenType::Comma)?.is_match() {
            arr.push_child(Some(Node::new(NodeKind::EmptyExpression, 0)));
            continue;
        };
        if parser.peek()?.typ() == TokenType::BracketClose {
            break;
        };
        let value = parse_expr_until_either(parser, TokenType::Comma, TokenType::BracketClose)?;
        arr.push_child(Some(value));
        if parser.peek()?.typ() == TokenType::BracketClose {
            break;
        };
        parser.require(TokenType::Comma)?;
    }
    parser.require(TokenType::BracketClose)?;
    Ok(arr)
}

pub fn parse_expr_object(parser: &mut Parser) -> SyntaxResult<Node> {
    let open = parser.require(TokenType::BraceOpen)?;
    let mut obj = Node::new(NodeKind::ObjectLiteral, open.lineno());
    loop {
        if parser.peek()?.typ() == TokenType::BraceClose {
            break;
        };
        let t = parser.next()?;
        let key = match t.typ() {
            TokenType::Identifier => {
                Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno())
            }
            TokenType::LiteralString => Node::new(
                NodeKind::StringLiteral {
                    value: t.loc().as_str().to_string(),
                    quoted: true,
                },
                t.lineno(),
            ),
            TokenType::LiteralNumber => Node::new(
                NodeKind::NumericLiteral(normalise_literal_number(t.loc(), t.lineno())?),
                t.lineno(),
            ),
            typ if typ.is_keyword() => {
                Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno())
            }
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("object literal key"))),
        };
        parser.require(TokenType::Colon)?;
        let value = parse_expr_until_either(parser, TokenType::Comma, TokenType::BraceClose)?;
        let lineno = key.lineno();
        obj.push_child(Some(
            Node::new(NodeKind::ObjectLiteralProperty, lineno)
                .append(key)
                .append(value),
        ));
        if !parser.consume_if(TokenType::Comma)?.is_match() {
            break;
        };
        if parser.peek()?.typ() == TokenType::BraceClose && !parser.options().object_literal_elision
        {
            let t = parser.next()?;
            return Err(t.error(SyntaxErrorType::ExpectedSyntax("object literal property")));
        };
    }
    parser.require(TokenType::BraceClose)?;
    Ok(obj)
}

pub fn parse_expr_function(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordFunction)?;
    let name = parser
        .consume_if(TokenType::Identifier)?
        .match_loc_take()
        .map(|loc| Node::new(NodeKind::Identifier(loc.as_str().to_string()), start.lineno()));
    let params = parse_func_params(parser)?;
    let body = parse_stmt_block(parser)?;
    Ok(Node::new(NodeKind::FunctionExpression, start.lineno())
        .append_slot(name)
        .append(params)
        .append(body))
}

pub fn parse_func_params(parser: &mut Parser) -> SyntaxResult<Node> {
    let open = parser.require(TokenType::ParenthesisOpen)?;
    let mut params = Node::new(NodeKind::ArgList, open.lineno());
    loop {
        if parser.peek()?.typ() == TokenType::ParenthesisClose {
            break;
        };
        let name = parser.require(TokenType::Identifier)?;
        params.push_child(Some(Node::new(
            NodeKind::Identifier(name.loc().as_str().to_string()),
            name.lineno(),
        )));
        if !parser.consume_if(TokenType::Comma)?.is_match() {
            break;
        };
    }
    parser.require(TokenType::ParenthesisClose)?;
    Ok(params)
}

// `new a.b(c)`: the callee extends through member accesses but not calls;
// a following argument list belongs to the constructor.
fn parse_expr_new(parser: &mut Parser) -> SyntaxResult<Node> {
    let start = parser.require(TokenType::KeywordNew)?;
    let mut callee = parse_operand(
        parser,
        TokenType::_Dummy,
        TokenType::_Dummy,
        false,
        &mut Asi::no(),
    )?;
    loop {
        match parser.peek()?.typ() {
            TokenType::Dot => {
                parser.consume_peeked();
                let member = parse_member_name(parser)?;
                callee = Node::new(NodeKind::StaticMemberExpression, start.lineno())
                    .append(callee)
                    .append(member);
            }
            TokenType::BracketOpen => {
                parser.consume_peeked();
                let index = parse_expr(parser, TokenType::BracketClose)?;
                parser.require(TokenType::BracketClose)?;
                callee = Node::new(NodeKind::DynamicMemberExpression, start.lineno())
                    .append(callee)
                    .append(index);
            }
            _ => break,
        };
    }
    let args = if parser.peek()?.typ() == TokenType::ParenthesisOpen {
        parser.consume_peeked();
        let args = parse_call_args(parser)?;
        parser.require(TokenType::ParenthesisClose)?;
        args
    } else {
        Node::new(NodeKind::ArgList, start.lineno())
    };
    Ok(Node::new(NodeKind::FunctionConstructor, start.lineno())
        .append(callee)
        .append(args))
}

// An identifier, wildcard, or qualified form in an E4X name position.
fn parse_e4x_simple_name(parser: &mut Parser) -> SyntaxResult<Node> {
    let t = parser.next()?;
    let base = match t.typ() {
        TokenType::Asterisk => Node::new(NodeKind::WildcardIdentifier, t.lineno()),
        TokenType::Identifier => {
            Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno())
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("XML name"))),
    };
    if !parser.consume_if(TokenType::ColonColon)?.is_match() {
        return Ok(base);
    };
    let lineno = base.lineno();
    if parser.consume_if(TokenType::BracketOpen)?.is_match() {
        let index = parse_expr(parser, TokenType::BracketClose)?;
        parser.require(TokenType::BracketClose)?;
        Ok(Node::new(NodeKind::DynamicQualifiedIdentifier, lineno)
            .append(base)
            .append(index))
    } else {
        let t = parser.next()?;
        let name = match t.typ() {
            TokenType::Asterisk => Node::new(NodeKind::WildcardIdentifier, t.lineno()),
            TokenType::Identifier => {
                Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno())
            }
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("qualified name"))),
        };
        Ok(Node::new(NodeKind::StaticQualifiedIdentifier, lineno)
            .append(base)
            .append(name))
    }
}

// An E4X name, possibly an attribute form (`@name`, `@[expr]`).
pub fn parse_e4x_name(parser: &mut Parser) -> SyntaxResult<Node> {
    let at = parser.consume_if(TokenType::At)?;
    if !at.is_match() {
        return parse_e4x_simple_name(parser);
    };
    let lineno = at.lineno();
    if parser.consume_if(TokenType::BracketOpen)?.is_match() {
        let index = parse_expr(parser, TokenType::BracketClose)?;
        parser.require(TokenType::BracketClose)?;
        return Ok(Node::new(NodeKind::DynamicAttributeIdentifier, lineno).append(index));
    };
    let name = parse_e4x_simple_name(parser)?;
    Ok(Node::new(NodeKind::StaticAttributeIdentifier, lineno).append(name))
}

// The name after `.` — an identifier (keywords tolerated), or one of the E4X
// selector forms when enabled.
fn parse_member_name(parser: &mut Parser) -> SyntaxResult<Node> {
    if parser.options().e4x {
        match parser.peek()?.typ() {
            TokenType::At | TokenType::Asterisk => return parse_e4x_name(parser),
            _ => {}
        };
    };
    let t = parser.require_predicate(
        |t| t == TokenType::Identifier || t.is_keyword(),
        "member name",
    )?;
    let name = Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno());
    if parser.options().e4x && parser.peek()?.typ() == TokenType::ColonColon {
        parser.consume_peeked();
        let lineno = name.lineno();
        if parser.consume_if(TokenType::BracketOpen)?.is_match() {
            let index = parse_expr(parser, TokenType::BracketClose)?;
            parser.require(TokenType::BracketClose)?;
            return Ok(Node::new(NodeKind::DynamicQualifiedIdentifier, lineno)
                .append(name)
                .append(index));
        };
        let t = parser.next()?;
        let rhs = match t.typ() {
            TokenType::Asterisk => Node::new(NodeKind::WildcardIdentifier, t.lineno()),
            TokenType::Identifier => {
                Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno())
            }
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("qualified name"))),
        };
        return Ok(Node::new(NodeKind::StaticQualifiedIdentifier, lineno)
            .append(name)
            .append(rhs));
    };
    Ok(name)
}

fn parse_operand(
    parser: &mut Parser,
    terminator_a: TokenType,
    terminator_b: TokenType,
    no_in: bool,
    asi: &mut Asi,
) -> SyntaxResult<Node> {
    let cp = parser.checkpoint();
    let t = parser.next_with_mode(LexMode::SlashIsRegex)?;
    if let Some(operator) = unary_operator(t.typ()) {
        let operand = parse_expr_with_min_prec(
            parser,
            PREC_UNARY,
            terminator_a,
            terminator_b,
            no_in,
            asi,
        )?;
        return Ok(Node::new(NodeKind::Unary(operator), t.lineno()).append(operand));
    };
    let operand = match t.typ() {
        TokenType::BracketOpen => {
            parser.restore_checkpoint(cp);
            parse_expr_array(parser)?
        }
        TokenType::BraceOpen => {
            parser.restore_checkpoint(cp);
            parse_expr_object(parser)?
        }
        TokenType::Identifier => {
            let name = Node::new(NodeKind::Identifier(t.loc().as_str().to_string()), t.lineno());
            if parser.options().e4x && parser.peek()?.typ() == TokenType::ColonColon {
                parser.restore_checkpoint(cp);
                parse_e4x_simple_name(parser)?
            } else {
                name
            }
        }
        TokenType::KeywordFunction => {
            parser.restore_checkpoint(cp);
            parse_expr_function(parser)?
        }
        TokenType::KeywordNew => {
            parser.restore_checkpoint(cp);
            parse_expr_new(parser)?
        }
        TokenType::KeywordThis => Node::new(NodeKind::This, t.lineno()),
        TokenType::LiteralTrue | TokenType::LiteralFalse => Node::new(
            NodeKind::BooleanLiteral(t.typ() == TokenType::LiteralTrue),
            t.lineno(),
        ),
        TokenType::LiteralNull => Node::new(NodeKind::NullLiteral, t.lineno()),
        TokenType::LiteralNumber => Node::new(
            NodeKind::NumericLiteral(normalise_literal_number(t.loc(), t.lineno())?),
            t.lineno(),
        ),
        TokenType::LiteralRegex => {
            let (body, flags) = regex_literal(t.loc());
            Node::new(NodeKind::RegexLiteral { body, flags }, t.lineno())
        }
        TokenType::LiteralString => Node::new(
            NodeKind::StringLiteral {
                value: t.loc().as_str().to_string(),
                quoted: true,
            },
            t.lineno(),
        ),
        TokenType::ParenthesisOpen => {
            parser.restore_checkpoint(cp);
            parse_grouping(parser, asi)?
        }
        TokenType::At if parser.options().e4x => {
            parser.restore_checkpoint(cp);
            parse_e4x_name(parser)?
        }
        TokenType::ChevronLeft if parser.options().e4x => {
            parser.restore_checkpoint(cp);
            parse_xml_literal(parser)?
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(operand)
}

pub fn parse_expr_with_min_prec(
    parser: &mut Parser,
    min_prec: u8,
    terminator_a: TokenType,
    terminator_b: TokenType,
    no_in: bool,
    asi: &mut Asi,
) -> SyntaxResult<Node> {
    let mut left = parse_operand(parser, terminator_a, terminator_b, no_in, asi)?;

    loop {
        let cp = parser.checkpoint();
        let t = parser.next()?;

        if t.typ() == terminator_a || t.typ() == terminator_b {
            parser.restore_checkpoint(cp);
            break;
        };

        match t.typ() {
            // Automatic Semicolon Insertion: no line terminator between the
            // operand and a postfix operator.
            TokenType::PlusPlus | TokenType::HyphenHyphen
                if !t.preceded_by_line_terminator() =>
            {
                if PREC_POSTFIX < min_prec {
                    parser.restore_checkpoint(cp);
                    break;
                };
                let op = match t.typ() {
                    TokenType::PlusPlus => PostfixOp::Increment,
                    _ => PostfixOp::Decrement,
                };
                left = Node::new(NodeKind::Postfix(op), t.lineno()).append(left);
                continue;
            }
            _ => {}
        };

        match infix_operator(t.typ(), no_in) {
            None => {
                if asi.can_end_with_asi
                    && (t.preceded_by_line_terminator()
                        || t.typ() == TokenType::BraceClose
                        || t.typ() == TokenType::EOF)
                {
                    // Automatic Semicolon Insertion.
                    parser.restore_checkpoint(cp);
                    asi.did_end_with_asi = true;
                    break;
                };
                return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operator")));
            }
            Some(operator) => {
                if operator.prec < min_prec {
                    parser.restore_checkpoint(cp);
                    break;
                };

                let next_min_prec = operator.prec + !operator.right_assoc as u8;

                left = match operator.kind {
                    InfixKind::Call => {
                        let args = parse_call_args(parser)?;
                        parser.require(TokenType::ParenthesisClose)?;
                        Node::new(NodeKind::FunctionCall, t.lineno())
                            .append(left)
                            .append(args)
                    }
                    InfixKind::DynamicMember => {
                        let index = parse_expr(parser, TokenType::BracketClose)?;
                        parser.require(TokenType::BracketClose)?;
                        Node::new(NodeKind::DynamicMemberExpression, t.lineno())
                            .append(left)
                            .append(index)
                    }
                    InfixKind::StaticMember => {
                        if parser.options().e4x
                            && parser.peek()?.typ() == TokenType::ParenthesisOpen
                        {
                            // `list.(predicate)` filters rather than selects.
                            parser.consume_peeked();
                            let predicate = parse_expr(parser, TokenType::ParenthesisClose)?;
                            parser.require(TokenType::ParenthesisClose)?;
                            Node::new(NodeKind::FilteringPredicate, t.lineno())
                                .append(left)
                                .append(predicate)
                        } else {
                            let member = parse_member_name(parser)?;
                            Node::new(NodeKind::StaticMemberExpression, t.lineno())
                                .append(left)
                                .append(member)
                        }
                    }
                    InfixKind::Descendant => {
                        let name = parse_e4x_name(parser)?;
                        Node::new(NodeKind::DescendantExpression, t.lineno())
                            .append(left)
                            .append(name)
                    }
                    InfixKind::Conditional => {
                        let consequent = parse_expr(parser, TokenType::Colon)?;
                        parser.require(TokenType::Colon)?;
                        let alternate = parse_expr_with_min_prec(
                            parser,
                            next_min_prec,
                            terminator_a,
                            terminator_b,
                            no_in,
                            asi,
                        )?;
                        Node::new(NodeKind::ConditionalExpression, t.lineno())
                            .append(left)
                            .append(consequent)
                            .append(alternate)
                    }
                    InfixKind::Binary(op) => {
                        let right = parse_expr_with_min_prec(
                            parser,
                            next_min_prec,
                            terminator_a,
                            terminator_b,
                            no_in,
                            asi,
                        )?;
                        Node::new(NodeKind::Operator(op), t.lineno())
                            .append(left)
                            .append(right)
                    }
                    InfixKind::Assignment(op) => {
                        let right = parse_expr_with_min_prec(
                            parser,
                            next_min_prec,
                            terminator_a,
                            terminator_b,
                            no_in,
                            asi,
                        )?;
                        Node::new(NodeKind::Assignment(op), t.lineno())
                            .append(left)
                            .append(right)
                    }
                };
            }
        };
    }

    Ok(left)
}
