//! Page tree for hierarchical output
//!
//! A node table keyed by URL: each internal page appears once, under the page
//! that first linked to it, and children are stored as node indices.

use crate::state::PageState;
use serde::Serialize;
use std::collections::HashMap;

/// One page in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkNode {
    /// Canonical URL
    pub url: String,

    /// Indices of the pages first discovered here
    pub children: Vec<usize>,

    /// How the page's visit ended; absent if it was never visited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PageState>,
}

/// Node table rooted at the seed page
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkTree {
    nodes: Vec<LinkNode>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LinkTree {
    /// Creates a tree holding only the root page
    pub fn new(root: &str) -> Self {
        let mut tree = Self::default();
        tree.insert_node(root);
        tree
    }

    /// Index of the root node
    pub fn root(&self) -> usize {
        0
    }

    /// Adds `url` under `parent` and returns its index
    ///
    /// A URL that already has a node keeps it (and its original parent).
    /// An unknown parent is treated as the root.
    pub fn add_child(&mut self, parent: &str, url: &str) -> usize {
        if let Some(&id) = self.index.get(url) {
            return id;
        }
        let parent_id = self.index.get(parent).copied().unwrap_or(self.root());
        let id = self.insert_node(url);
        self.nodes[parent_id].children.push(id);
        id
    }

    /// Records how the visit of `url` ended
    pub fn set_state(&mut self, url: &str, state: PageState) {
        if let Some(&id) = self.index.get(url) {
            self.nodes[id].state = Some(state);
        }
    }

    pub fn get(&self, url: &str) -> Option<usize> {
        self.index.get(url).copied()
    }

    pub fn node(&self, id: usize) -> Option<&LinkNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert_node(&mut self, url: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(LinkNode {
            url: url.to_string(),
            children: Vec::new(),
            state: None,
        });
        self.index.insert(url.to_string(), id);
        id
    }
}
