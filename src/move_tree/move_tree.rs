//! Branching move history.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Children are
//! kept in discovery order, so the last child of a node is the most recently
//! explored variation. Nodes are only ever appended; nothing is re-parented or
//! removed, which keeps the structure acyclic.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::game_state::chess_rules::ROOT_NODE_NAME;
use crate::move_tree::linearize::{self, LinearMove};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MoveNode {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
    linear: Vec<LinearMove>,
}

/// Owned copy of a (sub)tree, handed to front-ends when the tree changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    #[serde(rename = "move")]
    pub name: String,
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    /// `{"move": .., "children": [..]}`, nested.
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Default for MoveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveTree {
    /// A tree holding only the root sentinel.
    pub fn new() -> Self {
        Self {
            nodes: vec![MoveNode {
                name: ROOT_NODE_NAME.to_owned(),
                parent: None,
                children: Vec::new(),
            }],
            linear: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn is_root(&self, node: NodeId) -> bool {
        self.nodes[node.0].parent.is_none()
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no move has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append `token` as the last child of `parent`.
    pub fn add(&mut self, parent: NodeId, token: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MoveNode {
            name: token.into(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    #[inline]
    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    #[inline]
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.last().copied()
    }

    pub fn find_child(&self, parent: NodeId, token: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.name(child) == token)
    }

    /// Follow parent links up to the root.
    pub fn get_root(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Number of moves between the root and `node`.
    pub fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Re-run the linearization after a change and return the updated list.
    ///
    /// Tuples already produced by earlier calls are kept; only leaves not yet
    /// listed are added before the variation sort runs. Without new leaves the
    /// previous list is returned untouched.
    pub fn linearize(&mut self) -> &[LinearMove] {
        let previous = std::mem::take(&mut self.linear);
        self.linear = linearize::linearize(self, previous);
        &self.linear
    }

    /// The list produced by the last [`MoveTree::linearize`] call.
    #[inline]
    pub fn linear_moves(&self) -> &[LinearMove] {
        &self.linear
    }

    /// Copy the subtree under `node`, renaming every move with `render`.
    /// The root sentinel keeps its name.
    pub fn snapshot(&self, node: NodeId, render: &impl Fn(&str) -> String) -> TreeSnapshot {
        let name = if self.is_root(node) {
            self.name(node).to_owned()
        } else {
            render(self.name(node))
        };
        TreeSnapshot {
            name,
            children: self
                .children(node)
                .iter()
                .map(|&child| self.snapshot(child, render))
                .collect(),
        }
    }
}
