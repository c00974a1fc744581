//! Category tree built from full paths.
//!
//! Every segment of every path becomes a node. Nodes are created on first
//! sight and reused afterwards, keyed by `(parent, name)`, so
//! `"Toys > Balls"` and `"Toys > Dolls"` share a single `Toys` root.

use serde::Serialize;
use std::collections::HashMap;

use crate::harvest::category::{segments, SEGMENT_DELIMITER};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    roots: Vec<NodeId>,
    index: HashMap<(Option<NodeId>, String), NodeId>,
}

/// Nested view of a node for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub name: String,
    pub path: String,
    pub children: Vec<TreeView>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path.as_ref());
        }
        tree
    }

    /// Inserts the segment chain of `full_path` and returns its leaf node.
    ///
    /// Blank segments are skipped. Returns `None` if nothing remains.
    pub fn insert(&mut self, full_path: &str) -> Option<NodeId> {
        let mut parent = None;
        for name in segments(full_path) {
            if name.is_empty() {
                continue;
            }
            parent = Some(self.get_or_create(parent, name));
        }
        parent
    }

    fn get_or_create(&mut self, parent: Option<NodeId>, name: String) -> NodeId {
        if let Some(&id) = self.index.get(&(parent, name.clone())) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(CategoryNode {
            name: name.clone(),
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        self.index.insert((parent, name), id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&CategoryNode> {
        self.nodes.get(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Looks up a node by its chain of names from the root.
    pub fn find(&self, full_path: &str) -> Option<NodeId> {
        let mut parent = None;
        for name in segments(full_path) {
            if name.is_empty() {
                continue;
            }
            parent = Some(*self.index.get(&(parent, name))?);
        }
        parent
    }

    /// Ancestors of `id` from the root down, `id` included.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(id).map(|_| id);
        while let Some(cur) = current {
            chain.push(cur);
            current = self.nodes[cur].parent;
        }
        chain.reverse();
        chain
    }

    /// Number of edges between `id` and its root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len().saturating_sub(1)
    }

    /// Renders the path of `id` back into `"A > B > C"` form.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        self.nodes.get(id)?;
        let names: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|n| self.nodes[n].name.as_str())
            .collect();
        Some(names.join(SEGMENT_DELIMITER))
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| self.nodes[id].children.is_empty())
            .collect()
    }

    /// Nested view of the whole tree, children sorted by name.
    pub fn to_view(&self) -> Vec<TreeView> {
        self.view_of(&self.roots)
    }

    fn view_of(&self, ids: &[NodeId]) -> Vec<TreeView> {
        let mut views: Vec<TreeView> = ids
            .iter()
            .map(|&id| TreeView {
                name: self.nodes[id].name.clone(),
                path: self.path_of(id).unwrap_or_default(),
                children: self.view_of(&self.nodes[id].children),
            })
            .collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        views
    }
}
