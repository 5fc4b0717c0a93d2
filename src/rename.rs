use ahash::{AHashMap, AHashSet};
use tracing::warn;

use crate::ast::{Node, NodeKind};
use crate::reduce::ReductionWalker;
use crate::walk::walk;

/// Generator of short names: `a, b, …, z, aa, ab, …`, optionally behind a
/// fixed prefix. Digits are stored least significant first and rendered in
/// reverse.
pub struct NameFactory {
    prefix: String,
    state: Vec<u8>,
}

impl NameFactory {
    pub fn new(prefix: &str) -> NameFactory {
        NameFactory {
            prefix: prefix.to_string(),
            state: Vec::new(),
        }
    }

    pub fn next(&mut self) -> String {
        let mut overflow = true;
        for digit in self.state.iter_mut() {
            if *digit == 25 {
                *digit = 0;
            } else {
                *digit += 1;
                overflow = false;
                break;
            };
        }
        if overflow {
            self.state.push(0);
        };
        let mut name = String::with_capacity(self.prefix.len() + self.state.len());
        name.push_str(&self.prefix);
        for &digit in self.state.iter().rev() {
            name.push((b'a' + digit) as char);
        }
        name
    }
}

type ScopeId = usize;

// One lexical naming scope: originals mapped to their replacements, the
// replacements already taken, and the declaration order (renaming must be
// deterministic, so iteration follows insertion).
struct Scope {
    renames: AHashMap<String, String>,
    order: Vec<String>,
    new_names: AHashSet<String>,
    parent: Option<ScopeId>,
}

struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    fn new() -> ScopeTree {
        ScopeTree { scopes: Vec::new() }
    }

    fn create_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            renames: AHashMap::new(),
            order: Vec::new(),
            new_names: AHashSet::new(),
            parent,
        });
        id
    }

    fn declare(&mut self, scope: ScopeId, name: &str) -> () {
        let s = &mut self.scopes[scope];
        if !s.renames.contains_key(name) {
            s.order.push(name.to_string());
        };
        s.renames.insert(name.to_string(), name.to_string());
    }

    fn rename_internal(&mut self, scope: ScopeId, name: &str, new_name: &str) -> () {
        let s = &mut self.scopes[scope];
        if !s.renames.contains_key(name) {
            s.order.push(name.to_string());
        };
        s.renames.insert(name.to_string(), new_name.to_string());
        s.new_names.insert(new_name.to_string());
    }

    /// Prevents a name from being renamed (it maps to itself) and marks it
    /// taken.
    fn reserve(&mut self, scope: ScopeId, name: &str) -> () {
        self.rename_internal(scope, name, name);
    }

    fn declared(&self, scope: ScopeId, name: &str) -> bool {
        let s = &self.scopes[scope];
        if s.renames.contains_key(name) {
            return true;
        };
        match s.parent {
            Some(parent) => self.declared(parent, name),
            None => false,
        }
    }

    fn new_name(&self, scope: ScopeId, name: &str) -> String {
        let s = &self.scopes[scope];
        if let Some(new_name) = s.renames.get(name) {
            return new_name.clone();
        };
        match s.parent {
            Some(parent) => self.new_name(parent, name),
            None => name.to_string(),
        }
    }

    fn in_use(&self, scope: ScopeId, name: &str) -> bool {
        let s = &self.scopes[scope];
        if s.new_names.contains(name) {
            return true;
        };
        match s.parent {
            Some(parent) => self.in_use(parent, name),
            None => false,
        }
    }
}

// The name of the variable a declarator item introduces. Items are a bare
// identifier, an assignment form, or a typehint (possibly under the
// assignment).
fn declared_item_name(item: &Node) -> Option<&str> {
    match item.kind() {
        NodeKind::Identifier(name) => Some(name),
        NodeKind::Typehint | NodeKind::Assignment(_) => {
            item.child(0).and_then(declared_item_name)
        }
        _ => None,
    }
}

// Whether any descendant is a `with` statement or a call to the literal
// identifier `eval`. Either one makes renaming inside the function unsound.
fn function_has_with_or_eval(node: &Node) -> bool {
    for child in node.children().iter().flatten() {
        match child.kind() {
            NodeKind::With => return true,
            NodeKind::FunctionCall => {
                if let Some(NodeKind::Identifier(name)) = child.child(0).map(|c| c.kind()) {
                    if name == "eval" {
                        return true;
                    };
                };
            }
            _ => {}
        };
        if function_has_with_or_eval(child) {
            return true;
        };
    }
    false
}

/// Local-variable shortening. The file-level scope only reserves names;
/// every function opens a local scope whose declarations get fresh short
/// names, never one taken by the scope itself or an enclosing scope.
pub struct VariableRenaming {
    scopes: ScopeTree,
    global: ScopeId,
}

impl VariableRenaming {
    pub fn new() -> VariableRenaming {
        let mut scopes = ScopeTree::new();
        let global = scopes.create_scope(None);
        VariableRenaming { scopes, global }
    }

    pub fn process(&mut self, root: &mut Node) -> () {
        self.build_scope(root, self.global);
        // Globals keep their names; mapping them to themselves takes the
        // names out of circulation.
        for name in self.scopes.scopes[self.global].order.clone() {
            self.scopes.reserve(self.global, &name);
        }
        self.rewrite(root, self.global);
    }

    // Collects the names a scope's body declares, without entering nested
    // function bodies. Undeclared assignment targets and for-in bindings are
    // implicit globals; they're reserved so no short name shadows them.
    fn build_scope(&mut self, node: &Node, scope: ScopeId) -> () {
        match node.kind() {
            NodeKind::FunctionExpression => return,
            NodeKind::FunctionDeclaration => {
                if let Some(NodeKind::Identifier(name)) = node.child(0).map(|c| c.kind()) {
                    let name = name.clone();
                    self.scopes.declare(scope, &name);
                };
                return;
            }
            NodeKind::VarDeclaration { .. } => {
                for item in node.children().iter().flatten() {
                    if let Some(name) = declared_item_name(item) {
                        let name = name.to_string();
                        self.scopes.declare(scope, &name);
                    };
                }
                return;
            }
            NodeKind::Try => {
                // The catch parameter is a local.
                if let Some(NodeKind::Identifier(name)) = node.child(1).map(|c| c.kind()) {
                    let name = name.clone();
                    self.scopes.declare(scope, &name);
                };
                // Declarations inside the blocks still count.
            }
            NodeKind::Assignment(_) | NodeKind::ForIn | NodeKind::ForEachIn => {
                if let Some(NodeKind::Identifier(name)) = node.child(0).map(|c| c.kind()) {
                    if !self.scopes.declared(scope, name) {
                        let is_for_in = match node.kind() {
                            NodeKind::Assignment(_) => false,
                            _ => true,
                        };
                        if scope != self.global || is_for_in {
                            warn!(
                                name = name.as_str(),
                                lineno = node.lineno(),
                                "undeclared variable treated as global; missing 'var'?"
                            );
                            let name = name.clone();
                            self.scopes.reserve(self.global, &name);
                        };
                    };
                };
                // The rest of the statement may declare or assign more.
            }
            _ => {}
        };
        for child in node.children().iter().flatten() {
            self.build_scope(child, scope);
        }
    }

    fn rename_local_vars(&mut self, scope: ScopeId) -> () {
        let mut factory = NameFactory::new("");
        for name in self.scopes.scopes[scope].order.clone() {
            // Inline handlers receive `event` by name; it stays.
            let new_name = if name != "event" {
                loop {
                    let candidate = factory.next();
                    if !self.scopes.in_use(scope, &candidate) {
                        break candidate;
                    };
                }
            } else {
                name.clone()
            };
            self.scopes.rename_internal(scope, &name, &new_name);
        }
    }

    fn rewrite(&mut self, node: &mut Node, scope: ScopeId) -> () {
        match node.kind() {
            NodeKind::ObjectLiteralProperty => {
                // The key is a property name, not a variable reference.
                if let Some(value) = node.child_mut(1) {
                    self.rewrite(value, scope);
                };
            }
            NodeKind::StaticMemberExpression => {
                // `a.b`: only the object side holds variable references.
                if let Some(object) = node.child_mut(0) {
                    self.rewrite(object, scope);
                };
            }
            NodeKind::Identifier(name) => {
                if self.scopes.declared(scope, name) {
                    let new_name = self.scopes.new_name(scope, name);
                    *node.kind_mut() = NodeKind::Identifier(new_name);
                };
            }
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
                if function_has_with_or_eval(node) {
                    // `with`/`eval` can resolve names dynamically; leave the
                    // whole subtree alone.
                    return;
                };
                let child_scope = self.scopes.create_scope(Some(scope));
                if let Some(params) = node.child(1) {
                    for param in params.children().iter().flatten() {
                        if let Some(name) = declared_item_name(param) {
                            let name = name.to_string();
                            self.scopes.declare(child_scope, &name);
                        };
                    }
                };
                if let Some(body) = node.child(2) {
                    self.build_scope_body(body, child_scope);
                };
                self.rename_local_vars(child_scope);
                // The function's own name belongs to the enclosing scope.
                if let Some(name) = node.child_mut(0) {
                    self.rewrite(name, scope);
                };
                for i in 1..node.num_children() {
                    if let Some(child) = node.child_mut(i) {
                        self.rewrite(child, child_scope);
                    };
                }
            }
            _ => {
                for i in 0..node.num_children() {
                    if let Some(child) = node.child_mut(i) {
                        self.rewrite(child, scope);
                    };
                }
            }
        };
    }

    fn build_scope_body(&mut self, body: &Node, scope: ScopeId) -> () {
        for child in body.children().iter().flatten() {
            self.build_scope(child, scope);
        }
    }
}

/// Property shortening for private-looking names (`/^_[^_]/`). Allocated
/// short names also start with a single underscore, so the convention keeps
/// the namespace closed.
///
/// Unsafe across compilation units: two files can each rename a distinct
/// private property to the same short name; run it only where private
/// properties never cross file boundaries.
pub struct PropertyRenaming {
    factory: NameFactory,
    renames: AHashMap<String, String>,
    new_names: AHashSet<String>,
}

impl PropertyRenaming {
    pub fn new() -> PropertyRenaming {
        PropertyRenaming {
            factory: NameFactory::new("_"),
            renames: AHashMap::new(),
            new_names: AHashSet::new(),
        }
    }

    fn needs_rename(name: &str) -> bool {
        let bytes = name.as_bytes();
        bytes.len() > 1 && bytes[0] == b'_' && bytes[1] != b'_'
    }

    // The same original always maps to the same short name within one file.
    fn short_name(&mut self, name: &str) -> String {
        if let Some(short) = self.renames.get(name) {
            return short.clone();
        };
        let short = loop {
            let candidate = self.factory.next();
            if !self.new_names.contains(&candidate) {
                break candidate;
            };
        };
        self.renames.insert(name.to_string(), short.clone());
        self.new_names.insert(short.clone());
        short
    }

    pub fn process(&mut self, root: Node) -> Node {
        // Canonicalise first so `a["_x"]` and `{"_x": v}` become renameable
        // dot/identifier forms.
        let mut root =
            walk(&mut ReductionWalker, root).unwrap_or_else(|| Node::new(NodeKind::Program, 1));
        self.rewrite(&mut root);
        root
    }

    fn rewrite(&mut self, node: &mut Node) -> () {
        match node.kind() {
            NodeKind::ObjectLiteralProperty => {
                let rename = match node.child(0).map(|key| key.kind()) {
                    Some(NodeKind::Identifier(name)) if PropertyRenaming::needs_rename(name) => {
                        Some(name.clone())
                    }
                    _ => None,
                };
                if let Some(name) = rename {
                    let short = self.short_name(&name);
                    *node.child_mut(0).unwrap().kind_mut() = NodeKind::Identifier(short);
                };
                if let Some(value) = node.child_mut(1) {
                    self.rewrite(value);
                };
            }
            NodeKind::StaticMemberExpression => {
                if let Some(object) = node.child_mut(0) {
                    self.rewrite(object);
                };
                let rename = match node.child(1).map(|member| member.kind()) {
                    Some(NodeKind::Identifier(name)) if PropertyRenaming::needs_rename(name) => {
                        Some(name.clone())
                    }
                    _ => None,
                };
                if let Some(name) = rename {
                    let short = self.short_name(&name);
                    *node.child_mut(1).unwrap().kind_mut() = NodeKind::Identifier(short);
                };
            }
            _ => {
                for i in 0..node.num_children() {
                    if let Some(child) = node.child_mut(i) {
                        self.rewrite(child);
                    };
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};
    use crate::util::test::*;

    fn rename_source(code: &str) -> String {
        let mut root = parse_all(code);
        let mut pass = VariableRenaming::new();
        pass.process(&mut root);
        render(&root, RenderOptions::compact())
    }

    fn rename_properties(code: &str) -> String {
        let root = parse_all(code);
        let mut pass = PropertyRenaming::new();
        let root = pass.process(root);
        render(&root, RenderOptions::compact())
    }

    #[test]
    fn test_name_factory_sequence() {
        let mut factory = NameFactory::new("");
        let mut names = Vec::new();
        for _ in 0..28 {
            names.push(factory.next());
        }
        assert_eq!(names[0], "a");
        assert_eq!(names[25], "z");
        assert_eq!(names[26], "aa");
        assert_eq!(names[27], "ab");
    }

    #[test]
    fn test_name_factory_prefix() {
        let mut factory = NameFactory::new("_");
        assert_eq!(factory.next(), "_a");
        assert_eq!(factory.next(), "_b");
    }

    #[test]
    fn test_rename_locals_and_params() {
        // Globals keep their names; `a` is taken at file level, so the first
        // local gets `b`.
        assert_eq!(
            rename_source("var a=1;function f(x){var y=x+1;return y;}"),
            "var a=1;function f(b){var c=b+1;return c;}"
        );
    }

    #[test]
    fn test_rename_without_global_collisions() {
        assert_eq!(
            rename_source("function f(first,second){return first+second;}"),
            "function f(a,b){return a+b;}"
        );
    }

    #[test]
    fn test_rename_catch_parameter() {
        assert_eq!(
            rename_source("function f(){try{g();}catch(e){h(e);}}"),
            "function f(){try{g();}catch(a){h(a);}}"
        );
    }

    #[test]
    fn test_rename_skips_with_functions() {
        // Nothing inside the function is touched; the compact renderer still
        // unwraps the single-statement with-body.
        assert_eq!(
            rename_source("function f(){with(o){x=1;}}"),
            "function f(){with(o)x=1;}"
        );
    }

    #[test]
    fn test_rename_skips_eval_functions() {
        assert_eq!(
            rename_source("function f(code){eval(code);}"),
            "function f(code){eval(code);}"
        );
    }

    #[test]
    fn test_rename_nested_scopes_avoid_shadowing_used_names() {
        // The inner function's fresh names must not collide with the outer
        // function's renamed locals.
        assert_eq!(
            rename_source(
                "function outer(first){function inner(x){return x;}return inner(first);}"
            ),
            "function outer(a){function b(c){return c;}return b(a);}"
        );
    }

    #[test]
    fn test_rename_fixed_point_no_scope_collisions() {
        let mut root = parse_all("function f(p,q){var r;function g(s){var t;return s+t;}}");
        let mut pass = VariableRenaming::new();
        pass.process(&mut root);
        // All renamed locals within one scope are distinct.
        let rendered = render(&root, RenderOptions::compact());
        assert_eq!(
            rendered,
            "function f(a,b){var c;function d(e){var g;return e+g;}}"
        );
    }

    #[test]
    fn test_rename_leaves_event_alone() {
        assert_eq!(
            rename_source("function f(event,x){return event.target+x;}"),
            "function f(event,a){return event.target+a;}"
        );
    }

    #[test]
    fn test_rename_implicit_global_reserved() {
        // `leak` is assigned without a declaration inside the function; it
        // stays a global reference and keeps its name.
        assert_eq!(
            rename_source("function f(x){leak=x;}"),
            "function f(a){leak=a;}"
        );
    }

    #[test]
    fn test_rename_ignores_property_positions() {
        assert_eq!(
            rename_source("function f(x){return {x:x.x};}"),
            "function f(a){return {x:a.x};}"
        );
    }

    #[test]
    fn test_property_rename_private_names() {
        assert_eq!(
            rename_properties("this._first=1;this._second=2;o.pub=3;"),
            "this._a=1;this._b=2;o.pub=3;"
        );
    }

    #[test]
    fn test_property_rename_is_deterministic_per_name() {
        assert_eq!(
            rename_properties("a._foo=1;b._foo=2;c._bar=3;d._foo=4;"),
            "a._a=1;b._a=2;c._b=3;d._a=4;"
        );
    }

    #[test]
    fn test_property_rename_skips_double_underscore() {
        assert_eq!(rename_properties("a.__proto=1;a._=2;"), "a.__proto=1;a._=2;");
    }

    #[test]
    fn test_property_rename_object_keys_and_bracket_access() {
        // Bracket access of a literal key is canonicalised first, then
        // renamed like any other private member.
        assert_eq!(
            rename_properties("var o={_hidden:1};o[\"_hidden\"]=2;"),
            "var o={_a:1};o._a=2;"
        );
    }
}
