use crate::ast::{AssignmentOp, BinaryOp, Node, NodeKind, PostfixOp, StatementType, UnaryOp};

#[cfg(test)]
mod tests;

pub const RENDER_PRETTY: u8 = 1;
pub const RENDER_PRESERVE_LINES: u8 = 2;

/// Output shaping. `pretty` inserts indentation and intra-token spaces;
/// `preserve_lines` injects newline runs so each node lands on its source
/// line. The two may be combined.
#[derive(Clone, Copy, Default)]
pub struct RenderOptions {
    pub pretty: bool,
    pub preserve_lines: bool,
}

impl RenderOptions {
    pub fn compact() -> RenderOptions {
        RenderOptions::default()
    }

    /// From the wire-level bitmask: bit 0 pretty, bit 1 line-preserving.
    pub fn from_bits(bits: u8) -> RenderOptions {
        RenderOptions {
            pretty: bits & RENDER_PRETTY != 0,
            preserve_lines: bits & RENDER_PRESERVE_LINES != 0,
        }
    }

    pub fn pretty() -> RenderOptions {
        RenderOptions {
            pretty: true,
            preserve_lines: false,
        }
    }

    pub fn preserve_lines() -> RenderOptions {
        RenderOptions {
            pretty: false,
            preserve_lines: true,
        }
    }
}

struct RenderState {
    // In line-preserving mode: the 1-based line the output cursor is on.
    // Otherwise doubles as a first-statement marker (1 = nothing emitted yet).
    lineno: u32,
    pretty: bool,
    preserve_lines: bool,
}

/// Renders a tree back to JavaScript source. Pure: identical trees and
/// options produce identical output.
pub fn render(node: &Node, opts: RenderOptions) -> String {
    let mut st = RenderState {
        lineno: 1,
        pretty: opts.pretty,
        preserve_lines: opts.preserve_lines,
    };
    let mut out = String::new();
    render_node(node, &mut st, &mut out, 0);
    if st.pretty && !st.preserve_lines {
        if let NodeKind::Program = node.kind() {
            out.push('\n');
        };
    };
    out
}

fn indent_spaces(out: &mut String, indent: i32) -> () {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

// Emits enough newlines to advance the output to the node's source line.
// Returns whether any newline was emitted (callers re-indent on true).
fn lineno_catchup(node: &Node, st: &mut RenderState, out: &mut String) -> bool {
    if node.lineno() == 0 || st.lineno >= node.lineno() {
        return false;
    };
    for _ in st.lineno..node.lineno() {
        out.push('\n');
    }
    st.lineno = node.lineno();
    true
}

fn implode_children(node: &Node, st: &mut RenderState, out: &mut String, indent: i32, glue: &str) {
    let n = node.num_children();
    for (i, child) in node.children().iter().enumerate() {
        if let Some(child) = child {
            render_node(child, st, out, indent);
        };
        if i + 1 != n {
            out.push_str(glue);
        };
    }
}

// Statement position: appends the trailing `;` where the grammar wants one.
fn render_statement(node: &Node, st: &mut RenderState, out: &mut String, indent: i32) -> () {
    render_node(node, st, out, indent);
    let semicolon = node.kind().is_expression()
        || match node.kind() {
            NodeKind::StatementWithExpression(_)
            | NodeKind::VarDeclaration { .. }
            | NodeKind::DoWhile
            | NodeKind::XMLDefaultNamespace => true,
            _ => false,
        };
    if semicolon {
        out.push(';');
    };
}

fn render_indented_statement(node: &Node, st: &mut RenderState, out: &mut String, indent: i32) {
    let indent = match node.kind() {
        // Case and default labels sit one level left of their statements.
        NodeKind::CaseClause | NodeKind::DefaultClause => indent - 1,
        _ => indent,
    };
    if let NodeKind::StatementList = node.kind() {
        return render_node(node, st, out, indent);
    };
    if st.pretty || st.preserve_lines {
        let mut newline = false;
        if st.preserve_lines {
            newline = lineno_catchup(node, st, out);
        } else if st.lineno == 2 {
            out.push('\n');
            newline = true;
        } else {
            // Use the line counter to remember we're past the first statement,
            // avoiding a stray leading line break.
            st.lineno = 2;
        };
        if st.pretty && newline {
            indent_spaces(out, indent);
        };
    };
    render_statement(node, st, out, indent);
}

// Block position: wraps in braces when forced, when pretty, or when the
// content isn't exactly one statement.
fn render_block(
    node: Option<&Node>,
    must: bool,
    st: &mut RenderState,
    out: &mut String,
    indent: i32,
) -> () {
    let node = match node {
        None => {
            out.push(';');
            return;
        }
        Some(node) => node,
    };
    match node.kind() {
        NodeKind::EmptyExpression => {
            out.push(';');
        }
        NodeKind::StatementList => {
            if !must && node.num_children() == 0 {
                out.push(';');
            } else if !must && !st.pretty && node.num_children() == 1 {
                if st.preserve_lines {
                    lineno_catchup(node, st, out);
                };
                render_block(node.child(0), false, st, out, indent);
            } else {
                render_braced(node, st, out, indent);
            }
        }
        _ => {
            if !must && !st.pretty {
                if st.preserve_lines {
                    lineno_catchup(node, st, out);
                };
                render_statement(node, st, out, indent);
            } else {
                render_braced(node, st, out, indent);
            }
        }
    };
}

fn render_braced(node: &Node, st: &mut RenderState, out: &mut String, indent: i32) -> () {
    out.push_str(if st.pretty { " {" } else { "{" });
    if let NodeKind::StatementList = node.kind() {
        render_node(node, st, out, indent + 1);
    } else {
        render_indented_statement(node, st, out, indent + 1);
    };
    if st.pretty || st.preserve_lines {
        let newline = if st.preserve_lines {
            lineno_catchup(node, st, out)
        } else {
            out.push('\n');
            true
        };
        if st.pretty && newline {
            indent_spaces(out, indent);
        };
    };
    out.push('}');
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Comma => ",",
        BinaryOp::UnsignedRightShift => ">>>",
        BinaryOp::RightShift => ">>",
        BinaryOp::LeftShift => "<<",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitAnd => "&",
        BinaryOp::Plus => "+",
        BinaryOp::Minus => "-",
        BinaryOp::Div => "/",
        BinaryOp::Mult => "*",
        BinaryOp::Mod => "%",
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::StrictEqual => "===",
        BinaryOp::StrictNotEqual => "!==",
        BinaryOp::LessThanEqual => "<=",
        BinaryOp::GreaterThanEqual => ">=",
        BinaryOp::LessThan => "<",
        BinaryOp::GreaterThan => ">",
        BinaryOp::In => "in",
        BinaryOp::Instanceof => "instanceof",
    }
}

fn assignment_op_str(op: AssignmentOp) -> &'static str {
    match op {
        AssignmentOp::Assign => "=",
        AssignmentOp::MultAssign => "*=",
        AssignmentOp::DivAssign => "/=",
        AssignmentOp::ModAssign => "%=",
        AssignmentOp::PlusAssign => "+=",
        AssignmentOp::MinusAssign => "-=",
        AssignmentOp::LeftShiftAssign => "<<=",
        AssignmentOp::RightShiftAssign => ">>=",
        AssignmentOp::UnsignedRightShiftAssign => ">>>=",
        AssignmentOp::BitAndAssign => "&=",
        AssignmentOp::BitXorAssign => "^=",
        AssignmentOp::BitOrAssign => "|=",
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0f64 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{}", n)
    }
}

// Double-quoted string body. `\b \f \n \r \t \' \\` get their two-character
// forms; any other control character becomes `\xHH`.
fn escape_string_body(value: &str, out: &mut String) -> () {
    for c in value.chars() {
        match c {
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        };
    }
}

fn render_node(node: &Node, st: &mut RenderState, out: &mut String, indent: i32) -> () {
    match node.kind() {
        NodeKind::Program => {
            if let Some(list) = node.child(0) {
                render_node(list, st, out, indent);
            };
        }
        NodeKind::StatementList => {
            for child in node.children() {
                if let Some(child) = child {
                    render_indented_statement(child, st, out, indent);
                };
            }
        }
        NodeKind::ArgList => {
            out.push('(');
            implode_children(node, st, out, indent, if st.pretty { ", " } else { "," });
            out.push(')');
        }
        NodeKind::ObjectLiteral => {
            out.push('{');
            implode_children(node, st, out, indent, if st.pretty { ", " } else { "," });
            out.push('}');
        }
        NodeKind::ArrayLiteral => {
            out.push('[');
            implode_children(node, st, out, indent, if st.pretty { ", " } else { "," });
            out.push(']');
        }
        NodeKind::ObjectLiteralProperty => {
            if let Some(key) = node.child(0) {
                render_node(key, st, out, indent);
            };
            out.push_str(if st.pretty { ": " } else { ":" });
            if let Some(value) = node.child(1) {
                render_node(value, st, out, indent);
            };
        }
        NodeKind::NumericLiteral(n) => {
            out.push_str(&format_number(n.0));
        }
        NodeKind::StringLiteral { value, quoted } => {
            if *quoted {
                out.push_str(value);
            } else {
                out.push('"');
                escape_string_body(value, out);
                out.push('"');
            }
        }
        NodeKind::RegexLiteral { body, flags } => {
            out.push('/');
            out.push_str(body);
            out.push('/');
            out.push_str(flags);
        }
        NodeKind::BooleanLiteral(value) => {
            out.push_str(if *value { "true" } else { "false" });
        }
        NodeKind::NullLiteral => {
            out.push_str("null");
        }
        NodeKind::This => {
            out.push_str("this");
        }
        NodeKind::EmptyExpression => {}
        NodeKind::Identifier(name) => {
            out.push_str(name);
        }
        NodeKind::Operator(op) => {
            if let Some(lhs) = node.child(0) {
                render_node(lhs, st, out, indent);
            };
            // `in`/`instanceof` must keep their own padding in compact mode.
            let padded = !st.pretty;
            if st.pretty && *op != BinaryOp::Comma {
                out.push(' ');
            };
            match op {
                BinaryOp::In | BinaryOp::Instanceof if padded => {
                    out.push(' ');
                    out.push_str(binary_op_str(*op));
                    out.push(' ');
                }
                _ => out.push_str(binary_op_str(*op)),
            };
            if st.pretty {
                out.push(' ');
            };
            if let Some(rhs) = node.child(1) {
                render_node(rhs, st, out, indent);
            };
        }
        NodeKind::Assignment(op) => {
            if let Some(lhs) = node.child(0) {
                render_node(lhs, st, out, indent);
            };
            if st.pretty {
                out.push(' ');
            };
            out.push_str(assignment_op_str(*op));
            if st.pretty {
                out.push(' ');
            };
            if let Some(rhs) = node.child(1) {
                render_node(rhs, st, out, indent);
            };
        }
        NodeKind::ConditionalExpression => {
            if let Some(test) = node.child(0) {
                render_node(test, st, out, indent);
            };
            out.push_str(if st.pretty { " ? " } else { "?" });
            if let Some(consequent) = node.child(1) {
                render_node(consequent, st, out, indent);
            };
            out.push_str(if st.pretty { " : " } else { ":" });
            if let Some(alternate) = node.child(2) {
                render_node(alternate, st, out, indent);
            };
        }
        NodeKind::Parenthetical => {
            out.push('(');
            if let Some(inner) = node.child(0) {
                render_node(inner, st, out, indent);
            };
            out.push(')');
        }
        NodeKind::Unary(op) => {
            let (text, keyword) = match op {
                UnaryOp::Delete => ("delete", true),
                UnaryOp::Void => ("void", true),
                UnaryOp::Typeof => ("typeof", true),
                UnaryOp::Increment => ("++", false),
                UnaryOp::Decrement => ("--", false),
                UnaryOp::Plus => ("+", false),
                UnaryOp::Minus => ("-", false),
                UnaryOp::BitNot => ("~", false),
                UnaryOp::Not => ("!", false),
            };
            out.push_str(text);
            let operand = node.child(0);
            if keyword
                && !operand.map_or(false, |o| match o.kind() {
                    NodeKind::Parenthetical => true,
                    _ => false,
                })
            {
                out.push(' ');
            };
            if let Some(operand) = operand {
                render_node(operand, st, out, indent);
            };
        }
        NodeKind::Postfix(op) => {
            if let Some(operand) = node.child(0) {
                render_node(operand, st, out, indent);
            };
            out.push_str(match op {
                PostfixOp::Increment => "++",
                PostfixOp::Decrement => "--",
            });
        }
        NodeKind::FunctionCall => {
            if let Some(callee) = node.child(0) {
                render_node(callee, st, out, indent);
            };
            if let Some(args) = node.child(1) {
                render_node(args, st, out, indent);
            };
        }
        NodeKind::FunctionConstructor => {
            out.push_str("new ");
            if let Some(callee) = node.child(0) {
                render_node(callee, st, out, indent);
            };
            if let Some(args) = node.child(1) {
                render_node(args, st, out, indent);
            };
        }
        NodeKind::StaticMemberExpression => {
            if let Some(object) = node.child(0) {
                render_node(object, st, out, indent);
            };
            out.push('.');
            if let Some(member) = node.child(1) {
                render_node(member, st, out, indent);
            };
        }
        NodeKind::DynamicMemberExpression => {
            if let Some(object) = node.child(0) {
                render_node(object, st, out, indent);
            };
            out.push('[');
            if let Some(index) = node.child(1) {
                render_node(index, st, out, indent);
            };
            out.push(']');
        }
        NodeKind::FunctionDeclaration => {
            out.push_str("function ");
            if let Some(name) = node.child(0) {
                render_node(name, st, out, indent);
            };
            if let Some(params) = node.child(1) {
                render_node(params, st, out, indent);
            };
            render_block(node.child(2), true, st, out, indent);
        }
        NodeKind::FunctionExpression => {
            out.push_str("function");
            if let Some(name) = node.child(0) {
                out.push(' ');
                render_node(name, st, out, indent);
            };
            if let Some(params) = node.child(1) {
                render_node(params, st, out, indent);
            };
            render_block(node.child(2), true, st, out, indent);
        }
        NodeKind::StatementWithExpression(typ) => {
            out.push_str(match typ {
                StatementType::Return => "return",
                StatementType::Continue => "continue",
                StatementType::Break => "break",
                StatementType::Throw => "throw",
            });
            if let Some(expr) = node.child(0) {
                out.push(' ');
                render_node(expr, st, out, indent);
            };
        }
        NodeKind::VarDeclaration { .. } => {
            out.push_str("var ");
            implode_children(node, st, out, indent, if st.pretty { ", " } else { "," });
        }
        NodeKind::Typehint => {
            if let Some(name) = node.child(0) {
                render_node(name, st, out, indent);
            };
            out.push(':');
            if let Some(typ) = node.child(1) {
                render_node(typ, st, out, indent);
            };
        }
        NodeKind::If => {
            out.push_str(if st.pretty { "if (" } else { "if(" });
            if let Some(test) = node.child(0) {
                render_node(test, st, out, indent);
            };
            out.push(')');
            let then_block = node.child(1);
            let else_block = node.child(2);
            // Braces are required when an else follows, to keep the else
            // attached to this if.
            let need_braces = st.pretty
                || then_block.map_or(true, |b| b.is_leaf())
                || else_block.is_some();
            render_block(then_block, need_braces, st, out, indent);
            if let Some(else_block) = else_block {
                out.push_str(if st.pretty { " else" } else { "else" });
                if let NodeKind::If = else_block.kind() {
                    // else-if chains stay flat.
                    if st.preserve_lines {
                        lineno_catchup(else_block, st, out);
                    };
                    out.push(' ');
                    render_node(else_block, st, out, indent);
                } else {
                    let mut block = String::new();
                    render_block(Some(else_block), false, st, &mut block, indent);
                    if !block.starts_with('{') && !block.starts_with(' ') {
                        out.push(' ');
                    };
                    out.push_str(&block);
                }
            };
        }
        NodeKind::With => {
            out.push_str(if st.pretty { "with (" } else { "with(" });
            if let Some(object) = node.child(0) {
                render_node(object, st, out, indent);
            };
            out.push(')');
            render_block(node.child(1), false, st, out, indent);
        }
        NodeKind::Try => {
            out.push_str("try");
            render_block(node.child(0), true, st, out, indent);
            if let Some(param) = node.child(1) {
                out.push_str(if st.pretty { " catch (" } else { "catch(" });
                render_node(param, st, out, indent);
                out.push(')');
                render_block(node.child(2), true, st, out, indent);
            };
            if let Some(_) = node.child(3) {
                out.push_str(if st.pretty { " finally" } else { "finally" });
                render_block(node.child(3), true, st, out, indent);
            };
        }
        NodeKind::Label => {
            if let Some(name) = node.child(0) {
                render_node(name, st, out, indent);
            };
            out.push_str(if st.pretty { ": " } else { ":" });
            // The body renders in statement position so it terminates itself;
            // a blanket semicolon here would leave strays after loop bodies.
            if let Some(body) = node.child(1) {
                render_statement(body, st, out, indent);
            };
        }
        NodeKind::Switch => {
            out.push_str("switch(");
            if let Some(test) = node.child(0) {
                render_node(test, st, out, indent);
            };
            out.push(')');
            // Clause labels drop back one level, so the body renders one
            // deeper and labels come out flush.
            render_block(node.child(1), true, st, out, indent + 1);
        }
        NodeKind::CaseClause => {
            out.push_str("case ");
            if let Some(matcher) = node.child(0) {
                render_node(matcher, st, out, indent);
            };
            out.push(':');
            if let Some(body) = node.child(1) {
                render_node(body, st, out, indent + 1);
            };
        }
        NodeKind::DefaultClause => {
            out.push_str("default:");
            if let Some(body) = node.child(0) {
                render_node(body, st, out, indent + 1);
            };
        }
        NodeKind::ForLoop => {
            out.push_str(if st.pretty { "for (" } else { "for(" });
            if let Some(init) = node.child(0) {
                render_node(init, st, out, indent);
            };
            out.push_str(if st.pretty { "; " } else { ";" });
            if let Some(condition) = node.child(1) {
                render_node(condition, st, out, indent);
            };
            out.push_str(if st.pretty { "; " } else { ";" });
            if let Some(update) = node.child(2) {
                render_node(update, st, out, indent);
            };
            out.push(')');
            render_block(node.child(3), false, st, out, indent);
        }
        NodeKind::ForIn | NodeKind::ForEachIn => {
            out.push_str(match (node.kind(), st.pretty) {
                (NodeKind::ForEachIn, true) => "for each (",
                (NodeKind::ForEachIn, false) => "for each(",
                (_, true) => "for (",
                (_, false) => "for(",
            });
            if let Some(binding) = node.child(0) {
                render_node(binding, st, out, indent);
            };
            out.push_str(" in ");
            if let Some(iterated) = node.child(1) {
                render_node(iterated, st, out, indent);
            };
            out.push(')');
            render_block(node.child(2), false, st, out, indent);
        }
        NodeKind::While => {
            out.push_str(if st.pretty { "while (" } else { "while(" });
            if let Some(condition) = node.child(0) {
                render_node(condition, st, out, indent);
            };
            out.push(')');
            render_block(node.child(1), false, st, out, indent);
        }
        NodeKind::DoWhile => {
            out.push_str("do");
            // Braces are always required here; `do x;while(y)` is a hazard.
            render_block(node.child(0), true, st, out, indent);
            if let Some(condition) = node.child(1) {
                if st.preserve_lines {
                    lineno_catchup(condition, st, out);
                };
                out.push_str(if st.pretty { " while (" } else { "while(" });
                render_node(condition, st, out, indent);
                out.push(')');
            };
        }
        NodeKind::XMLDefaultNamespace => {
            out.push_str("default xml namespace = ");
            if let Some(ns) = node.child(0) {
                render_node(ns, st, out, indent);
            };
        }
        NodeKind::XMLName { ns, name } => {
            if !ns.is_empty() {
                out.push_str(ns);
                out.push(':');
            };
            out.push_str(name);
        }
        NodeKind::XMLElement => {
            out.push('<');
            match node.child(0) {
                None => {
                    // An XML list literal: `<>…</>`.
                    out.push('>');
                    if let Some(content) = node.child(2) {
                        render_node(content, st, out, indent);
                    };
                    out.push_str("</>");
                    return;
                }
                Some(name) => {
                    render_node(name, st, out, indent);
                }
            };
            if let Some(attrs) = node.child(1) {
                if attrs.num_children() > 0 {
                    out.push(' ');
                    render_node(attrs, st, out, indent);
                };
            };
            let has_content = node.child(2).map_or(false, |c| c.num_children() > 0);
            if has_content {
                out.push('>');
                if let Some(content) = node.child(2) {
                    render_node(content, st, out, indent);
                };
                out.push_str("</");
                if let Some(close) = node.child(3) {
                    render_node(close, st, out, indent);
                };
                out.push('>');
            } else {
                match node.child(3) {
                    None => out.push_str("/>"),
                    Some(close) => {
                        out.push_str("></");
                        render_node(close, st, out, indent);
                        out.push('>');
                    }
                };
            }
        }
        NodeKind::XMLComment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::XMLPI(data) => {
            out.push_str("<?");
            out.push_str(data);
            out.push_str("?>");
        }
        NodeKind::XMLContentList => {
            implode_children(node, st, out, indent, "");
        }
        NodeKind::XMLTextData { text, .. } => {
            out.push_str(text);
        }
        NodeKind::XMLEmbeddedExpression => {
            out.push('{');
            if let Some(expr) = node.child(0) {
                render_node(expr, st, out, indent);
            };
            out.push('}');
        }
        NodeKind::XMLAttributeList => {
            implode_children(node, st, out, indent, " ");
        }
        NodeKind::XMLAttribute => {
            if let Some(name) = node.child(0) {
                render_node(name, st, out, indent);
            };
            out.push('=');
            match node.child(1) {
                Some(value) => match value.kind() {
                    NodeKind::XMLTextData { .. } => {
                        // TODO Escape the value; `&amp;` round-trips as `&`.
                        out.push('"');
                        render_node(value, st, out, indent);
                        out.push('"');
                    }
                    _ => render_node(value, st, out, indent),
                },
                None => {}
            };
        }
        NodeKind::WildcardIdentifier => {
            out.push('*');
        }
        NodeKind::StaticAttributeIdentifier => {
            out.push('@');
            if let Some(name) = node.child(0) {
                render_node(name, st, out, indent);
            };
        }
        NodeKind::DynamicAttributeIdentifier => {
            out.push_str("@[");
            if let Some(index) = node.child(0) {
                render_node(index, st, out, indent);
            };
            out.push(']');
        }
        NodeKind::StaticQualifiedIdentifier => {
            if let Some(qualifier) = node.child(0) {
                render_node(qualifier, st, out, indent);
            };
            out.push_str("::");
            if let Some(name) = node.child(1) {
                render_node(name, st, out, indent);
            };
        }
        NodeKind::DynamicQualifiedIdentifier => {
            if let Some(qualifier) = node.child(0) {
                render_node(qualifier, st, out, indent);
            };
            out.push_str("::[");
            if let Some(index) = node.child(1) {
                render_node(index, st, out, indent);
            };
            out.push(']');
        }
        NodeKind::FilteringPredicate => {
            if let Some(object) = node.child(0) {
                render_node(object, st, out, indent);
            };
            out.push_str(".(");
            if let Some(predicate) = node.child(1) {
                render_node(predicate, st, out, indent);
            };
            out.push(')');
        }
        NodeKind::DescendantExpression => {
            if let Some(object) = node.child(0) {
                render_node(object, st, out, indent);
            };
            out.push_str("..");
            if let Some(name) = node.child(1) {
                render_node(name, st, out, indent);
            };
        }
    };
}
