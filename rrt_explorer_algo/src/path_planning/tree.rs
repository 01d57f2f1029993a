//! Arena-backed exploration tree
//!
//! Vertices live in a `Vec` in insertion order and point at their parent by
//! index. Only the root has no parent. A hash index over the exact
//! coordinates keeps vertices unique.

use std::collections::HashMap;

use super::geometry::Configuration;
use crate::error::{Result, RrtError};

/// A node in the RRT tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrtNode {
    /// Position of the vertex
    pub config: Configuration,
    /// Index of parent node in the tree (None for root)
    pub parent: Option<usize>,
}

/// Hash key for exact coordinate lookups. `-0.0` and `0.0` compare equal,
/// so both map to the same key.
fn coord_key(config: &Configuration) -> (u32, u32) {
    let canonical = |v: f32| if v == 0.0 { 0.0f32 } else { v };
    (canonical(config.x).to_bits(), canonical(config.y).to_bits())
}

/// The growing set of vertices and parent edges
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<RrtNode>,
    index: HashMap<(u32, u32), usize>,
}

impl Tree {
    /// Index of the root vertex
    pub const ROOT: usize = 0;

    /// Create a tree holding only `root`
    pub fn new(root: Configuration) -> Self {
        let mut index = HashMap::new();
        index.insert(coord_key(&root), Self::ROOT);
        Self {
            nodes: vec![RrtNode {
                config: root,
                parent: None,
            }],
            index,
        }
    }

    pub fn root(&self) -> Configuration {
        self.nodes[Self::ROOT].config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root is present from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[RrtNode] {
        &self.nodes
    }

    pub fn get(&self, id: usize) -> Option<&RrtNode> {
        self.nodes.get(id)
    }

    /// Look up the node id of an exact configuration
    pub fn find(&self, config: &Configuration) -> Option<usize> {
        self.index.get(&coord_key(config)).copied()
    }

    pub fn contains(&self, config: &Configuration) -> bool {
        self.find(config).is_some()
    }

    /// Add `child` under the existing node `parent`, returning the new node id
    ///
    /// Fails without modifying the tree if `child` is already a vertex or
    /// `parent` is not one.
    pub fn insert(&mut self, child: Configuration, parent: usize) -> Result<usize> {
        if parent >= self.nodes.len() {
            return Err(RrtError::UnknownParent(parent));
        }
        let key = coord_key(&child);
        if self.index.contains_key(&key) {
            return Err(RrtError::DuplicateVertex {
                x: child.x,
                y: child.y,
            });
        }
        let id = self.nodes.len();
        self.nodes.push(RrtNode {
            config: child,
            parent: Some(parent),
        });
        self.index.insert(key, id);
        Ok(id)
    }

    /// Find the vertex closest to `query`, skipping an exact match
    ///
    /// Scans in insertion order; on ties the earliest vertex wins. Returns
    /// None only when no vertex other than `query` itself exists.
    pub fn nearest(&self, query: &Configuration) -> Option<usize> {
        let mut min_dist = f32::INFINITY;
        let mut nearest_idx = None;

        for (i, node) in self.nodes.iter().enumerate() {
            if node.config == *query {
                continue;
            }
            let dist = node.config.distance_to(query);
            if nearest_idx.is_none() || dist < min_dist {
                min_dist = dist;
                nearest_idx = Some(i);
            }
        }

        nearest_idx
    }

    /// Iterate over `(child, parent)` pairs of every edge
    pub fn edges(&self) -> impl Iterator<Item = (Configuration, Configuration)> + '_ {
        self.nodes.iter().filter_map(move |node| {
            node.parent
                .map(|parent| (node.config, self.nodes[parent].config))
        })
    }

    /// Configurations from `from` up to and including the root
    ///
    /// Returns None for an unknown id. Parents always precede their children
    /// in the arena, so the walk terminates within `len()` steps.
    pub fn path_to_root(&self, from: usize) -> Option<Vec<Configuration>> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(from)?;

        loop {
            path.push(current.config);
            match current.parent {
                Some(parent_idx) => current = &self.nodes[parent_idx],
                None => break,
            }
        }

        Some(path)
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: usize) -> Option<usize> {
        self.path_to_root(id).map(|path| path.len() - 1)
    }
}
