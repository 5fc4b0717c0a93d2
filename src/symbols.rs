use std::collections::BTreeMap;

use crate::ast::{Node, NodeKind};

/// Library symbols referenced by one file, keyed by name with the source line
/// they appear on. Ordered so output is stable.
pub struct SymbolIndex {
    /// `JX.install("Name", …)` definitions.
    pub installs: BTreeMap<String, u32>,
    /// `JX.behavior("name", …)` definitions.
    pub behaviors: BTreeMap<String, u32>,
    /// Any `JX.…` member chain.
    pub uses: BTreeMap<String, u32>,
}

pub fn find_symbols(root: &Node) -> SymbolIndex {
    let mut index = SymbolIndex {
        installs: BTreeMap::new(),
        behaviors: BTreeMap::new(),
        uses: BTreeMap::new(),
    };
    collect(root, &mut index);
    index
}

fn collect(node: &Node, index: &mut SymbolIndex) -> () {
    match node.kind() {
        NodeKind::StaticMemberExpression => {
            let symbol = static_member_symbol(node);
            if symbol.starts_with("JX.") {
                index.uses.insert(symbol, node.lineno());
            };
        }
        NodeKind::FunctionCall => {
            if let Some(callee) = node.child(0) {
                let symbol = static_member_symbol(callee);
                if symbol == "JX.install" || symbol == "JX.behavior" {
                    let name = node
                        .child(1)
                        .and_then(|args| args.child(0))
                        .and_then(|arg| arg.kind().unquoted_string());
                    if let Some(name) = name {
                        let map = if symbol == "JX.install" {
                            &mut index.installs
                        } else {
                            &mut index.behaviors
                        };
                        map.insert(name.to_string(), node.lineno());
                    };
                };
            };
        }
        _ => {}
    };
    for child in node.children().iter().flatten() {
        collect(child, index);
    }
}

// Flattens a static-member chain to its dotted form; non-identifier parts
// contribute nothing.
fn static_member_symbol(node: &Node) -> String {
    let mut symbol = String::new();
    for child in node.children().iter().flatten() {
        match child.kind() {
            NodeKind::Identifier(name) => {
                if !symbol.is_empty() {
                    symbol.push('.');
                };
                symbol.push_str(name);
            }
            NodeKind::StaticMemberExpression => {
                symbol.push_str(&static_member_symbol(child));
            }
            _ => {}
        };
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test::parse_all;

    #[test]
    fn test_find_installs_and_behaviors() {
        let root = parse_all(
            "JX.install(\"Workflow\", {});\nJX.behavior(\"dark-console\", function(){});\n",
        );
        let index = find_symbols(&root);
        assert_eq!(index.installs.get("Workflow"), Some(&1));
        assert_eq!(index.behaviors.get("dark-console"), Some(&2));
    }

    #[test]
    fn test_find_uses() {
        let root = parse_all("var v=JX.Vector.getDims(node);JX.DOM.alterClass(n,c,true);");
        let index = find_symbols(&root);
        assert!(index.uses.contains_key("JX.Vector.getDims"));
        assert!(index.uses.contains_key("JX.DOM.alterClass"));
        // Inner chains surface too.
        assert!(index.uses.contains_key("JX.Vector"));
        assert!(index.uses.contains_key("JX.DOM"));
    }

    #[test]
    fn test_install_call_is_also_a_use() {
        let root = parse_all("JX.install(\"Thing\", {});");
        let index = find_symbols(&root);
        assert!(index.uses.contains_key("JX.install"));
        assert_eq!(index.installs.get("Thing"), Some(&1));
    }

    #[test]
    fn test_non_jx_chains_ignored() {
        let root = parse_all("foo.bar.baz();JXX.install(\"x\");");
        let index = find_symbols(&root);
        assert!(index.uses.is_empty());
        assert!(index.installs.is_empty());
    }

    #[test]
    fn test_last_occurrence_wins_per_name() {
        let root = parse_all("JX.Stratcom.listen(a);\nJX.Stratcom.listen(b);");
        let index = find_symbols(&root);
        assert_eq!(index.uses.get("JX.Stratcom.listen"), Some(&2));
    }
}
