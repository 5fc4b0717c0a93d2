use itertools::Itertools;

use crate::ast::{Node, NodeKind};

fn kind_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Program => "Program",
        NodeKind::StatementList => "StatementList",
        NodeKind::ArgList => "ArgList",
        NodeKind::ObjectLiteral => "ObjectLiteral",
        NodeKind::ArrayLiteral => "ArrayLiteral",
        NodeKind::ObjectLiteralProperty => "ObjectLiteralProperty",
        NodeKind::NumericLiteral(_) => "NumericLiteral",
        NodeKind::StringLiteral { .. } => "StringLiteral",
        NodeKind::RegexLiteral { .. } => "RegexLiteral",
        NodeKind::BooleanLiteral(_) => "BooleanLiteral",
        NodeKind::NullLiteral => "NullLiteral",
        NodeKind::This => "This",
        NodeKind::EmptyExpression => "EmptyExpression",
        NodeKind::Identifier(_) => "Identifier",
        NodeKind::Operator(_) => "Operator",
        NodeKind::Assignment(_) => "Assignment",
        NodeKind::Unary(_) => "Unary",
        NodeKind::Postfix(_) => "Postfix",
        NodeKind::ConditionalExpression => "ConditionalExpression",
        NodeKind::Parenthetical => "Parenthetical",
        NodeKind::FunctionCall => "FunctionCall",
        NodeKind::FunctionConstructor => "FunctionConstructor",
        NodeKind::StaticMemberExpression => "StaticMemberExpression",
        NodeKind::DynamicMemberExpression => "DynamicMemberExpression",
        NodeKind::FunctionDeclaration => "FunctionDeclaration",
        NodeKind::FunctionExpression => "FunctionExpression",
        NodeKind::StatementWithExpression(_) => "StatementWithExpression",
        NodeKind::VarDeclaration { .. } => "VarDeclaration",
        NodeKind::Typehint => "Typehint",
        NodeKind::If => "If",
        NodeKind::With => "With",
        NodeKind::Try => "Try",
        NodeKind::Label => "Label",
        NodeKind::Switch => "Switch",
        NodeKind::CaseClause => "CaseClause",
        NodeKind::DefaultClause => "DefaultClause",
        NodeKind::ForLoop => "ForLoop",
        NodeKind::ForIn => "ForIn",
        NodeKind::ForEachIn => "ForEachIn",
        NodeKind::While => "While",
        NodeKind::DoWhile => "DoWhile",
        NodeKind::XMLDefaultNamespace => "XMLDefaultNamespace",
        NodeKind::XMLName { .. } => "XMLName",
        NodeKind::XMLElement => "XMLElement",
        NodeKind::XMLComment(_) => "XMLComment",
        NodeKind::XMLPI(_) => "XMLPI",
        NodeKind::XMLContentList => "XMLContentList",
        NodeKind::XMLTextData { .. } => "XMLTextData",
        NodeKind::XMLEmbeddedExpression => "XMLEmbeddedExpression",
        NodeKind::XMLAttributeList => "XMLAttributeList",
        NodeKind::XMLAttribute => "XMLAttribute",
        NodeKind::WildcardIdentifier => "WildcardIdentifier",
        NodeKind::StaticAttributeIdentifier => "StaticAttributeIdentifier",
        NodeKind::DynamicAttributeIdentifier => "DynamicAttributeIdentifier",
        NodeKind::StaticQualifiedIdentifier => "StaticQualifiedIdentifier",
        NodeKind::DynamicQualifiedIdentifier => "DynamicQualifiedIdentifier",
        NodeKind::FilteringPredicate => "FilteringPredicate",
        NodeKind::DescendantExpression => "DescendantExpression",
    }
}

fn node_value(node: &Node) -> Option<String> {
    match node.kind() {
        NodeKind::StringLiteral { .. } => {
            node.kind().unquoted_string().map(|s| s.to_string())
        }
        NodeKind::Identifier(name) => Some(name.clone()),
        _ => None,
    }
}

/// Formats a tree as a nested array: `["Kind", [children…], value?, lineno?]`.
/// Function-expression bodies are pruned so installed closures don't flood
/// the printout.
pub fn dump(root: &Node) -> String {
    let mut out = String::new();
    write_tree(root, &mut out);
    out
}

fn write_tree(node: &Node, out: &mut String) -> () {
    out.push_str("[\"");
    out.push_str(kind_name(node.kind()));
    out.push_str("\", [");
    let skip_body = match node.kind() {
        NodeKind::FunctionExpression => true,
        _ => false,
    };
    let mut parts = Vec::<String>::new();
    for child in node.children().iter().flatten() {
        if skip_body {
            if let NodeKind::StatementList = child.kind() {
                break;
            };
        };
        let mut part = String::new();
        write_tree(child, &mut part);
        parts.push(part);
    }
    out.push_str(&parts.iter().join(", "));
    out.push(']');
    if let Some(value) = node_value(node) {
        out.push_str(", \"");
        out.push_str(&value);
        out.push_str("\", \"");
        out.push_str(&node.lineno().to_string());
        out.push('"');
    };
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test::parse_all;

    #[test]
    fn test_dump_shape() {
        let root = parse_all("x;");
        assert_eq!(
            dump(&root),
            "[\"Program\", [[\"StatementList\", [[\"Identifier\", [], \"x\", \"1\"]]]]]"
        );
    }

    #[test]
    fn test_dump_string_value_is_unquoted() {
        let root = parse_all("\"hi\";");
        assert_eq!(
            dump(&root),
            "[\"Program\", [[\"StatementList\", [[\"StringLiteral\", [], \"hi\", \"1\"]]]]]"
        );
    }

    #[test]
    fn test_dump_prunes_function_expression_bodies() {
        let root = parse_all("var f=function(a){b();};");
        let text = dump(&root);
        assert!(text.contains("FunctionExpression"));
        // The parameter list survives; the body's statements do not.
        assert!(text.contains("\"a\""));
        assert!(!text.contains("\"b\""));
    }

    #[test]
    fn test_dump_keeps_function_declaration_bodies() {
        let root = parse_all("function f(a){b();}");
        let text = dump(&root);
        assert!(text.contains("\"b\""));
    }
}
