//! The generalized AST (GAST): a language-neutral tree that every
//! per-language normalizer folds its tree-sitter output into.
//!
//! Detectors that don't need per-language tree-sitter node kinds can walk
//! this instead of ten different grammars.

use serde::{Deserialize, Serialize};

/// A language-neutral AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GASTNode {
    Program {
        body: Vec<GASTNode>,
    },
    Module {
        name: Option<String>,
        body: Vec<GASTNode>,
    },
    Function {
        name: String,
        params: Vec<GASTNode>,
        body: Box<GASTNode>,
        is_async: bool,
        is_generator: bool,
        return_type: Option<String>,
    },
    Lambda {
        params: Vec<GASTNode>,
        body: Box<GASTNode>,
        is_async: bool,
    },
    Class {
        name: String,
        bases: Vec<String>,
        body: Vec<GASTNode>,
        is_abstract: bool,
    },
    Interface {
        name: String,
        extends: Vec<String>,
        body: Vec<GASTNode>,
    },
    Enum {
        name: String,
        members: Vec<GASTNode>,
    },
    TypeAlias {
        name: String,
        type_expr: Box<GASTNode>,
    },
    VariableDeclaration {
        name: String,
        type_annotation: Option<String>,
        value: Option<Box<GASTNode>>,
        is_const: bool,
    },
    If {
        condition: Box<GASTNode>,
        then_branch: Box<GASTNode>,
        else_branch: Option<Box<GASTNode>>,
    },
    ForLoop {
        init: Option<Box<GASTNode>>,
        condition: Option<Box<GASTNode>>,
        update: Option<Box<GASTNode>>,
        body: Box<GASTNode>,
    },
    ForEach {
        variable: Box<GASTNode>,
        iterable: Box<GASTNode>,
        body: Box<GASTNode>,
    },
    WhileLoop {
        condition: Box<GASTNode>,
        body: Box<GASTNode>,
    },
    Switch {
        discriminant: Box<GASTNode>,
        cases: Vec<GASTNode>,
    },
    TryCatch {
        try_block: Box<GASTNode>,
        catch_param: Option<String>,
        catch_block: Option<Box<GASTNode>>,
        finally_block: Option<Box<GASTNode>>,
    },
    Throw {
        value: Box<GASTNode>,
    },
    Return {
        value: Option<Box<GASTNode>>,
    },
    Yield {
        value: Option<Box<GASTNode>>,
        is_delegate: bool,
    },
    Await {
        value: Box<GASTNode>,
    },
    Call {
        callee: Box<GASTNode>,
        arguments: Vec<GASTNode>,
    },
    MethodCall {
        receiver: Box<GASTNode>,
        method: String,
        arguments: Vec<GASTNode>,
    },
    NewExpression {
        callee: Box<GASTNode>,
        arguments: Vec<GASTNode>,
    },
    MemberAccess {
        object: Box<GASTNode>,
        property: String,
    },
    Import {
        source: String,
        specifiers: Vec<GASTNode>,
    },
    Export {
        declaration: Option<Box<GASTNode>>,
        is_default: bool,
    },
    Decorator {
        name: String,
        arguments: Vec<GASTNode>,
    },
    Block {
        statements: Vec<GASTNode>,
    },
    TemplateLiteral {
        parts: Vec<GASTNode>,
    },
    SpreadElement {
        argument: Box<GASTNode>,
    },
    ArrayLiteral {
        elements: Vec<GASTNode>,
    },
    ObjectLiteral {
        properties: Vec<GASTNode>,
    },
    Ternary {
        condition: Box<GASTNode>,
        consequent: Box<GASTNode>,
        alternate: Box<GASTNode>,
    },
    BinaryOp {
        left: Box<GASTNode>,
        op: String,
        right: Box<GASTNode>,
    },
    Identifier {
        name: String,
    },
    StringLiteral {
        value: String,
    },
    NumberLiteral {
        value: String,
    },
    BoolLiteral {
        value: bool,
    },
    NullLiteral,
    Comment {
        text: String,
        is_doc: bool,
    },
    /// Catch-all for node kinds no normalizer claims; keeps the tree total
    /// without losing the original grammar's node kind.
    Other {
        kind: String,
        children: Vec<GASTNode>,
    },
}

impl GASTNode {
    /// Depth-first count of every node in the subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Borrowed view of this node's direct children, regardless of variant.
    pub fn children(&self) -> Vec<&GASTNode> {
        match self {
            GASTNode::Program { body } | GASTNode::Module { body, .. } => body.iter().collect(),
            GASTNode::Function { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            GASTNode::Lambda { params, body, .. } => {
                params.iter().chain(std::iter::once(body.as_ref())).collect()
            }
            GASTNode::Class { body, .. } | GASTNode::Interface { body, .. } => body.iter().collect(),
            GASTNode::Enum { members, .. } => members.iter().collect(),
            GASTNode::TypeAlias { type_expr, .. } => vec![type_expr.as_ref()],
            GASTNode::VariableDeclaration { value, .. } => value.iter().map(|v| v.as_ref()).collect(),
            GASTNode::If { condition, then_branch, else_branch } => {
                let mut v = vec![condition.as_ref(), then_branch.as_ref()];
                if let Some(e) = else_branch {
                    v.push(e.as_ref());
                }
                v
            }
            GASTNode::ForLoop { init, condition, update, body } => [init, condition, update]
                .into_iter()
                .flatten()
                .map(|b| b.as_ref())
                .chain(std::iter::once(body.as_ref()))
                .collect(),
            GASTNode::ForEach { variable, iterable, body } => {
                vec![variable.as_ref(), iterable.as_ref(), body.as_ref()]
            }
            GASTNode::WhileLoop { condition, body } => vec![condition.as_ref(), body.as_ref()],
            GASTNode::Switch { discriminant, cases } => {
                std::iter::once(discriminant.as_ref()).chain(cases.iter()).collect()
            }
            GASTNode::TryCatch { try_block, catch_block, finally_block, .. } => {
                let mut v = vec![try_block.as_ref()];
                if let Some(c) = catch_block {
                    v.push(c.as_ref());
                }
                if let Some(f) = finally_block {
                    v.push(f.as_ref());
                }
                v
            }
            GASTNode::Throw { value } | GASTNode::Await { value } => vec![value.as_ref()],
            GASTNode::Return { value } | GASTNode::Yield { value, .. } => {
                value.iter().map(|v| v.as_ref()).collect()
            }
            GASTNode::Call { callee, arguments } => {
                std::iter::once(callee.as_ref()).chain(arguments.iter()).collect()
            }
            GASTNode::MethodCall { receiver, arguments, .. } => {
                std::iter::once(receiver.as_ref()).chain(arguments.iter()).collect()
            }
            GASTNode::NewExpression { callee, arguments } => {
                std::iter::once(callee.as_ref()).chain(arguments.iter()).collect()
            }
            GASTNode::MemberAccess { object, .. } => vec![object.as_ref()],
            GASTNode::Import { specifiers, .. } => specifiers.iter().collect(),
            GASTNode::Export { declaration, .. } => declaration.iter().map(|d| d.as_ref()).collect(),
            GASTNode::Decorator { arguments, .. } => arguments.iter().collect(),
            GASTNode::Block { statements } => statements.iter().collect(),
            GASTNode::TemplateLiteral { parts } => parts.iter().collect(),
            GASTNode::SpreadElement { argument } => vec![argument.as_ref()],
            GASTNode::ArrayLiteral { elements } => elements.iter().collect(),
            GASTNode::ObjectLiteral { properties } => properties.iter().collect(),
            GASTNode::Ternary { condition, consequent, alternate } => {
                vec![condition.as_ref(), consequent.as_ref(), alternate.as_ref()]
            }
            GASTNode::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            GASTNode::Other { children, .. } => children.iter().collect(),
            GASTNode::Identifier { .. }
            | GASTNode::StringLiteral { .. }
            | GASTNode::NumberLiteral { .. }
            | GASTNode::BoolLiteral { .. }
            | GASTNode::NullLiteral
            | GASTNode::Comment { .. } => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_counts_self_and_children() {
        let leaf = GASTNode::Identifier { name: "x".to_string() };
        assert_eq!(leaf.node_count(), 1);

        let block = GASTNode::Block {
            statements: vec![leaf.clone(), leaf],
        };
        assert_eq!(block.node_count(), 3);
    }

    #[test]
    fn other_preserves_unknown_kind() {
        let node = GASTNode::Other { kind: "weird_node".to_string(), children: vec![] };
        match node {
            GASTNode::Other { kind, .. } => assert_eq!(kind, "weird_node"),
            _ => panic!("expected Other"),
        }
    }
}
