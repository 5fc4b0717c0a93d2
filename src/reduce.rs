use std::collections::BTreeMap;

use crate::ast::{BinaryOp, Node, NodeKind, UnaryOp};
use crate::lex::Lexer;
use crate::parse::parser::Parser;
use crate::parse::toplevel::parse_top_level;
use crate::parse::ParseOptions;
use crate::walk::{walk, Visit, Walker};

// ECMA-262 keywords, future reserved words (browsers enforce several of
// them), and the null/boolean literals. Sorted for binary search.
pub const RESERVED_WORDS: &'static [&'static str] = &[
    "abstract",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "double",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "function",
    "goto",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "volatile",
    "while",
    "with",
];

pub fn is_reserved_word(id: &str) -> bool {
    RESERVED_WORDS.binary_search(&id).is_ok()
}

/// Whether a string could stand as an identifier in source. Escaped Unicode
/// is not recognised.
pub fn is_identifier(id: &str) -> bool {
    if id.is_empty() || is_reserved_word(id) {
        return false;
    };
    let bytes = id.as_bytes();
    let first = bytes[0];
    if !first.is_ascii_alphabetic() && first != b'$' && first != b'_' {
        return false;
    };
    bytes[1..]
        .iter()
        .all(|&c| c.is_ascii_alphanumeric() || c == b'$' || c == b'_')
}

fn bool_lit(value: bool) -> Node {
    Node::new(NodeKind::BooleanLiteral(value), 0)
}

/// The local-rewrite walker: short-circuit and literal folding, dead-branch
/// elimination, and property-access canonicalisation. Each rule fires on one
/// node after its children have been reduced, preserves l-value validity, and
/// never reorders observable side effects.
pub struct ReductionWalker;

impl ReductionWalker {
    fn reduce_operator(&self, node: &mut Node, op: BinaryOp) -> Visit {
        let lhs_true = node.child(0).map_or(false, |c| c.compare(true));
        let lhs_false = node.child(0).map_or(false, |c| c.compare(false));
        let rhs_true = node.child(1).map_or(false, |c| c.compare(true));
        let rhs_false = node.child(1).map_or(false, |c| c.compare(false));
        match op {
            BinaryOp::Or => {
                if lhs_true {
                    Visit::Revisit(node.take_child(0).unwrap())
                } else if lhs_false && rhs_true {
                    Visit::Revisit(node.take_child(1).unwrap())
                } else if lhs_false && rhs_false {
                    Visit::Revisit(bool_lit(false))
                } else {
                    Visit::Keep
                }
            }
            BinaryOp::And => {
                if lhs_false {
                    Visit::Revisit(bool_lit(false))
                } else if lhs_true && rhs_false {
                    Visit::Revisit(bool_lit(false))
                } else if lhs_true {
                    Visit::Revisit(node.take_child(1).unwrap())
                } else {
                    Visit::Keep
                }
            }
            BinaryOp::Comma => {
                // Sound only while `compare` answers affirmatively for
                // side-effect-free variants alone.
                if lhs_true || lhs_false {
                    Visit::Revisit(node.take_child(1).unwrap())
                } else {
                    Visit::Keep
                }
            }
            _ => Visit::Keep,
        }
    }

    fn reduce_not(&self, node: &mut Node) -> Visit {
        let operand_true = node.child(0).map_or(false, |c| c.compare(true));
        let operand_false = node.child(0).map_or(false, |c| c.compare(false));
        if operand_true {
            Visit::Revisit(bool_lit(false))
        } else if operand_false {
            Visit::Revisit(bool_lit(true))
        } else {
            Visit::Keep
        }
    }

    fn reduce_conditional(&self, node: &mut Node) -> Visit {
        let test_true = node.child(0).map_or(false, |c| c.compare(true));
        let test_false = node.child(0).map_or(false, |c| c.compare(false));
        if test_true {
            // Revisiting catches chains like `true ? true : true` standing in
            // statement position.
            Visit::Revisit(node.take_child(1).unwrap())
        } else if test_false {
            Visit::Revisit(node.take_child(2).unwrap())
        } else {
            Visit::Keep
        }
    }

    fn reduce_call(&self, node: &mut Node) -> Visit {
        // `bagofholding(…)` is the build-flag sentinel for a disabled
        // feature; the whole call folds to false.
        match node.child(0).map(|c| c.kind()) {
            Some(NodeKind::Identifier(name)) if name == "bagofholding" => {
                Visit::Revisit(bool_lit(false))
            }
            _ => Visit::Keep,
        }
    }

    fn reduce_if(&self, node: &mut Node) -> Visit {
        let test_true = node.child(0).map_or(false, |c| c.compare(true));
        let test_false = node.child(0).map_or(false, |c| c.compare(false));
        if test_true {
            return match node.take_child(1) {
                Some(consequent) => Visit::Replace(consequent),
                None => Visit::Remove,
            };
        };
        if test_false {
            return match node.take_child(2) {
                Some(alternate) => Visit::Replace(alternate),
                None => Visit::Remove,
            };
        };

        // Empty blocks are usually what's left after other reductions.
        if node.child(2).map_or(false, |e| e.num_children() == 0) {
            node.replace_child(2, None);
        };
        let then_empty = node.child(1).map_or(true, |b| b.num_children() == 0);
        if then_empty && node.child(2).is_none() {
            // Only the condition's side effects remain.
            return match node.take_child(0) {
                Some(test) => Visit::Replace(test),
                None => Visit::Remove,
            };
        };
        if then_empty {
            // `if (cond) {} else {…}` becomes `if (!(cond)) {…}`.
            let test = match node.take_child(0) {
                Some(test) => test,
                None => return Visit::Keep,
            };
            let lineno = test.lineno();
            let negated = Node::new(NodeKind::Unary(UnaryOp::Not), lineno)
                .append(Node::new(NodeKind::Parenthetical, lineno).append(test));
            let alternate = node.take_child(2).unwrap();
            let rewritten = Node::new(NodeKind::If, node.lineno())
                .append(negated)
                .append(alternate)
                .append_slot(None);
            return Visit::Revisit(rewritten);
        };
        Visit::Keep
    }

    fn reduce_property(&self, node: &mut Node) -> Visit {
        if node.num_children() == 0 {
            return Visit::Keep;
        };
        let key = match node.child(0) {
            Some(key) => key,
            None => return Visit::Keep,
        };
        let (name, key_lineno) = match key.kind().unquoted_string() {
            Some(name) if is_identifier(name) => (name.to_string(), key.lineno()),
            _ => return Visit::Keep,
        };
        let value = match node.take_child(1) {
            Some(value) => value,
            None => return Visit::Keep,
        };
        Visit::Replace(
            Node::new(NodeKind::ObjectLiteralProperty, node.lineno())
                .append(Node::new(NodeKind::Identifier(name), key_lineno))
                .append(value),
        )
    }

    fn reduce_dynamic_member(&self, node: &mut Node) -> Visit {
        let index = match node.child(1) {
            Some(index) => index,
            None => return Visit::Keep,
        };
        let (name, index_lineno) = match index.kind().unquoted_string() {
            Some(name) if is_identifier(name) => (name.to_string(), index.lineno()),
            _ => return Visit::Keep,
        };
        let object = match node.take_child(0) {
            Some(object) => object,
            None => return Visit::Keep,
        };
        Visit::Replace(
            Node::new(NodeKind::StaticMemberExpression, node.lineno())
                .append(object)
                .append(Node::new(NodeKind::Identifier(name), index_lineno)),
        )
    }
}

// Which rule applies to a node. Kinds with their own rule never fall through
// to the generic expression handling, mirroring how a specific visitor
// override supplants the category fallback.
enum Rule {
    Operator(BinaryOp),
    Not,
    Conditional,
    Call,
    If,
    Property,
    DynamicMember,
    Expression,
    None,
}

fn rule_for(kind: &NodeKind) -> Rule {
    match kind {
        NodeKind::Operator(op) => Rule::Operator(*op),
        NodeKind::Unary(UnaryOp::Not) => Rule::Not,
        NodeKind::Unary(_) => Rule::None,
        NodeKind::ConditionalExpression => Rule::Conditional,
        NodeKind::FunctionCall => Rule::Call,
        NodeKind::If => Rule::If,
        NodeKind::ObjectLiteralProperty => Rule::Property,
        NodeKind::DynamicMemberExpression => Rule::DynamicMember,
        kind if kind.is_expression() => Rule::Expression,
        _ => Rule::None,
    }
}

impl Walker for ReductionWalker {
    fn visit(&mut self, node: &mut Node, parent: Option<&NodeKind>) -> Visit {
        match rule_for(node.kind()) {
            Rule::Operator(op) => self.reduce_operator(node, op),
            Rule::Not => self.reduce_not(node),
            Rule::Conditional => self.reduce_conditional(node),
            Rule::Call => self.reduce_call(node),
            Rule::If => self.reduce_if(node),
            Rule::Property => self.reduce_property(node),
            Rule::DynamicMember => self.reduce_dynamic_member(node),
            Rule::Expression => {
                // A statically-boolean expression standing directly in a
                // statement list has no effect.
                if let Some(NodeKind::StatementList) = parent {
                    if node.compare(true) || node.compare(false) {
                        return Visit::Remove;
                    };
                };
                Visit::Keep
            }
            Rule::None => Visit::Keep,
        }
    }
}

/// The reduction pass: an optional needle:replacement substitution sweep,
/// then the local-rewrite walker.
pub struct CodeReduction {
    replacements: String,
}

impl CodeReduction {
    pub fn new(replacements: &str) -> CodeReduction {
        CodeReduction {
            replacements: replacements.to_string(),
        }
    }

    pub fn process(&self, root: Node) -> Node {
        let mut root = root;
        // A malformed or empty replacement list is a no-op, not an error.
        if let Some(patterns) = self.parse_patterns() {
            for (needle_src, rep_src) in patterns.iter() {
                let needle = parse_pattern_expression(needle_src);
                let rep = parse_pattern_expression(rep_src);
                if let (Some(needle), Some(rep)) = (needle, rep) {
                    root = replace_matches(root, &needle, &rep);
                };
            }
        };
        walk(&mut ReductionWalker, root).unwrap_or_else(|| Node::new(NodeKind::Program, 1))
    }

    // `orig1:new1,orig2:new2` — for example
    // `__DEV__:0,Util.isDevelopmentEnvironment():false`.
    fn parse_patterns(&self) -> Option<BTreeMap<String, String>> {
        if self.replacements.is_empty() {
            return None;
        };
        let mut patterns = BTreeMap::new();
        for pattern in self.replacements.split(',') {
            if let Some(p) = pattern.find(':') {
                patterns.insert(pattern[..p].to_string(), pattern[p + 1..].to_string());
            };
        }
        if patterns.is_empty() {
            None
        } else {
            Some(patterns)
        }
    }
}

// Parses one side of a replacement pair and extracts its first expression.
fn parse_pattern_expression(src: &str) -> Option<Node> {
    let mut parser = Parser::new(Lexer::new(src.as_bytes().to_vec()), ParseOptions::default());
    let root = parse_top_level(&mut parser).ok()?;
    find_expression(root)
}

fn find_expression(node: Node) -> Option<Node> {
    if node.kind().is_expression() {
        return Some(node);
    };
    let mut node = node;
    for slot in node.take_children() {
        if let Some(child) = slot {
            if let Some(found) = find_expression(child) {
                return Some(found);
            };
        };
    }
    None
}

// Replaces every subtree structurally equal to `needle` with a fresh clone of
// `rep`. Replacements do not chain: the clone is not itself scanned.
fn replace_matches(node: Node, needle: &Node, rep: &Node) -> Node {
    if node == *needle {
        return rep.clone();
    };
    let mut node = node;
    let children = node
        .take_children()
        .into_iter()
        .map(|slot| slot.map(|child| replace_matches(child, needle, rep)))
        .collect();
    node.set_children(children);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};
    use crate::util::test::*;

    fn reduce_source(code: &str) -> String {
        let root = parse_all(code);
        let reduced = CodeReduction::new("").process(root);
        render(&reduced, RenderOptions::compact())
    }

    fn reduce_with_patterns(code: &str, patterns: &str) -> String {
        let root = parse_all(code);
        let reduced = CodeReduction::new(patterns).process(root);
        render(&reduced, RenderOptions::compact())
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("$x"));
        assert!(is_identifier("_private1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1bad"));
        assert!(!is_identifier("bar baz"));
        assert!(!is_identifier("for"));
        assert!(!is_identifier("null"));
        assert!(!is_identifier("implements"));
    }

    #[test]
    fn test_reduce_if_constant_condition() {
        assert_eq!(reduce_source("if(1)a();else b();"), "a();");
        assert_eq!(reduce_source("if(0)a();else b();"), "b();");
        assert_eq!(reduce_source("if(true){x();}else{y();}"), "x();");
        assert_eq!(reduce_source("if(0)a();"), "");
    }

    #[test]
    fn test_reduce_if_empty_branches() {
        assert_eq!(reduce_source("if(c){}else{x();}"), "if(!(c))x();");
        assert_eq!(reduce_source("if(c){x();}else{}"), "if(c)x();");
        assert_eq!(reduce_source("if(c()){}else{}"), "c();");
    }

    #[test]
    fn test_reduce_short_circuit() {
        assert_eq!(reduce_source("x=true||y;"), "x=true;");
        assert_eq!(reduce_source("x=false||true;"), "x=true;");
        assert_eq!(reduce_source("x=false||false;"), "x=false;");
        assert_eq!(reduce_source("x=false&&y;"), "x=false;");
        assert_eq!(reduce_source("x=true&&y;"), "x=y;");
        assert_eq!(reduce_source("x=true&&false;"), "x=false;");
        assert_eq!(reduce_source("x=(1,y);"), "x=(y);");
    }

    #[test]
    fn test_reduce_not_folding() {
        assert_eq!(reduce_source("x=!true;"), "x=false;");
        assert_eq!(reduce_source("x=!0;"), "x=true;");
        assert_eq!(reduce_source("x=!y;"), "x=!y;");
    }

    #[test]
    fn test_reduce_ternary_cascade() {
        assert_eq!(reduce_source("x=1?a:b;"), "x=a;");
        assert_eq!(reduce_source("x=0?a:b;"), "x=b;");
        // The chosen branch is revisited, so constant chains fold through.
        assert_eq!(reduce_source("true?true:true;"), "");
    }

    #[test]
    fn test_reduce_sentinel_call() {
        assert_eq!(reduce_source("if(bagofholding()){a();}else{b();}"), "b();");
        assert_eq!(reduce_source("bagofholding();"), "");
    }

    #[test]
    fn test_reduce_statement_position_constants() {
        assert_eq!(reduce_source("true;x();1;"), "x();");
    }

    #[test]
    fn test_reduce_bracket_to_dot() {
        assert_eq!(reduce_source("a[\"foo\"];"), "a.foo;");
        assert_eq!(reduce_source("a[\"for\"];"), "a[\"for\"];");
        assert_eq!(reduce_source("a[\"b\"][\"c d\"];"), "a.b[\"c d\"];");
    }

    #[test]
    fn test_reduce_object_keys() {
        assert_eq!(
            reduce_source("var o={\"foo\":1,\"bar baz\":2};"),
            "var o={foo:1,\"bar baz\":2};"
        );
        assert_eq!(
            reduce_source("var o={\"foo\":1,\"1bad\":2};"),
            "var o={foo:1,\"1bad\":2};"
        );
    }

    #[test]
    fn test_reduce_preserves_lvalues() {
        let root = parse_all("a[\"foo\"]=1;");
        let reduced = CodeReduction::new("").process(root);
        let assignment = reduced.child(0).unwrap().child(0).unwrap();
        assert!(assignment.child(0).unwrap().is_valid_lval());
        assert_eq!(
            render(&reduced, RenderOptions::compact()),
            "a.foo=1;"
        );
    }

    #[test]
    fn test_reduce_idempotence() {
        let sources = [
            "if(c){}else{x();}",
            "var o={\"foo\":1};a[\"b\"];x=true&&y;",
            "if(bagofholding())a();",
        ];
        for src in sources.iter() {
            let once = CodeReduction::new("").process(parse_all(src));
            let twice = CodeReduction::new("").process(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_pattern_replacement() {
        assert_eq!(
            reduce_with_patterns("if(__DEV__){debug();}", "__DEV__:0"),
            ""
        );
        assert_eq!(
            reduce_with_patterns(
                "if(Util.isDevelopmentEnvironment()){a();}b();",
                "Util.isDevelopmentEnvironment():false"
            ),
            "b();"
        );
    }

    #[test]
    fn test_pattern_replacement_does_not_chain() {
        // `a` maps to `b` and `b` maps to `c`; one sweep per pair, and a
        // planted replacement is never rescanned by the pair that planted it.
        let out = reduce_with_patterns("a;", "a:b,b:c");
        // BTreeMap order applies `a:b` first, then `b:c` rewrites the result
        // in its own later sweep.
        assert_eq!(out, "c;");
    }

    #[test]
    fn test_empty_replacement_string_is_noop() {
        assert_eq!(reduce_with_patterns("x();", ""), "x();");
        assert_eq!(reduce_with_patterns("x();", "garbage"), "x();");
    }
}
