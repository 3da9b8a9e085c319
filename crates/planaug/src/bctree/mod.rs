//! Dynamic block–cut-vertex tree (BC-tree).
//!
//! Purpose
//! - Represent the decomposition of a connected graph into biconnected
//!   blocks and cut vertices as a rooted tree, and keep it consistent while
//!   the augmentation inserts edges: a new edge between two blocks merges
//!   the whole tree path between them into one block.
//!
//! Why this design
//! - One arena of `BcNode`s addressed by `BcId`; merged nodes stay in the
//!   arena with a `merged_into` handle, so every stale id still resolves to
//!   the block that replaced it (`find`). No dangling references, no
//!   rebuild.
//! - The root is mutable: `reroot` flips parent pointers along the path to
//!   the new root only. Levels are refreshed by one BFS from the root after
//!   a structural change; the decomposition itself is never recomputed.
//!
//! Construction lives in `build` (iterative Hopcroft–Tarjan).

use std::collections::VecDeque;

use crate::graph::NodeId;

mod build;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BcId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BcKind {
    /// A maximal biconnected subgraph (or a bridge edge).
    Block,
    /// A cut vertex shared by several blocks.
    Cut,
}

#[derive(Clone, Debug)]
struct BcNode {
    kind: BcKind,
    parent: Option<BcId>,
    children: Vec<BcId>,
    level: u32,
    merged_into: Option<BcId>,
}

/// Result of an incremental edge insertion.
#[derive(Clone, Debug)]
pub struct MergeReport {
    /// The block that replaced the merged tree path.
    pub merged: BcId,
    /// Every node absorbed by the merge (blocks and interior cut vertices).
    pub absorbed: Vec<BcId>,
    /// True when the old root was absorbed; `merged` is the new root then.
    pub root_changed: bool,
}

/// Rooted BC-tree over a graph, updatable under edge insertion.
#[derive(Clone, Debug)]
pub struct BcTree {
    nodes: Vec<BcNode>,
    root: BcId,
    /// Graph node -> its C-node (cut vertices) or its unique owning B-node.
    node_owner: Vec<BcId>,
    /// Graph nodes per B-node (cut vertices included); empty for C-nodes.
    block_nodes: Vec<Vec<NodeId>>,
    /// The graph vertex of a C-node.
    cut_vertex: Vec<Option<NodeId>>,
    alive: usize,
}

impl BcTree {
    #[inline]
    pub fn num_bc_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes that have not been merged away.
    #[inline]
    pub fn num_alive(&self) -> usize {
        self.alive
    }

    #[inline]
    pub fn root(&self) -> BcId {
        self.root
    }

    #[inline]
    pub fn kind(&self, b: BcId) -> BcKind {
        self.nodes[b.0].kind
    }

    #[inline]
    pub fn is_alive(&self, b: BcId) -> bool {
        self.nodes[b.0].merged_into.is_none()
    }

    #[inline]
    pub fn parent(&self, b: BcId) -> Option<BcId> {
        self.nodes[b.0].parent
    }

    #[inline]
    pub fn children(&self, b: BcId) -> &[BcId] {
        &self.nodes[b.0].children
    }

    #[inline]
    pub fn level(&self, b: BcId) -> u32 {
        self.nodes[b.0].level
    }

    /// Resolve a possibly-merged id to the block that replaced it.
    pub fn find(&self, mut b: BcId) -> BcId {
        while let Some(m) = self.nodes[b.0].merged_into {
            b = m;
        }
        b
    }

    /// The alive BC-node owning graph node `v`: its C-node while `v` is a
    /// cut vertex, otherwise the block containing `v`.
    pub fn bc_of_node(&self, v: NodeId) -> BcId {
        self.find(self.node_owner[v.0])
    }

    /// Whether `v` is (still) a cut vertex.
    pub fn is_cut_vertex(&self, v: NodeId) -> bool {
        self.kind(self.bc_of_node(v)) == BcKind::Cut
    }

    /// Graph nodes of block `b` (cut vertices on its boundary included).
    pub fn block_nodes(&self, b: BcId) -> &[NodeId] {
        debug_assert_eq!(self.kind(b), BcKind::Block);
        &self.block_nodes[b.0]
    }

    /// The graph vertex of C-node `c`.
    pub fn cut_node(&self, c: BcId) -> NodeId {
        debug_assert_eq!(self.kind(c), BcKind::Cut);
        self.cut_vertex[c.0].expect("C-node without a vertex")
    }

    /// Current leaves of the tree excluding the root: the unresolved
    /// pendant blocks. (A C-node cannot be a leaf; a cut vertex always
    /// joins at least two blocks.)
    pub fn pendants(&self) -> Vec<BcId> {
        (0..self.nodes.len())
            .map(BcId)
            .filter(|&b| {
                self.is_alive(b)
                    && self.nodes[b.0].parent.is_some()
                    && self.nodes[b.0].children.is_empty()
            })
            .collect()
    }

    /// Re-anchor the tree at `new_root` by flipping parent pointers along
    /// the path from `new_root` to the old root, then refresh levels.
    pub fn reroot(&mut self, new_root: BcId) {
        assert!(self.is_alive(new_root));
        assert_eq!(self.kind(new_root), BcKind::Block, "root must be a block");
        if new_root == self.root {
            return;
        }
        let mut path = vec![new_root];
        let mut v = new_root;
        while let Some(p) = self.nodes[v.0].parent {
            path.push(p);
            v = p;
        }
        debug_assert_eq!(*path.last().unwrap(), self.root);
        for i in 0..path.len() - 1 {
            let child = path[i];
            let par = path[i + 1];
            self.nodes[par.0].children.retain(|&c| c != child);
        }
        for i in (1..path.len()).rev() {
            let flipped = path[i];
            let new_parent = path[i - 1];
            self.nodes[flipped.0].parent = Some(new_parent);
            self.nodes[new_parent.0].children.push(flipped);
        }
        self.nodes[new_root.0].parent = None;
        self.root = new_root;
        self.recompute_levels();
    }

    /// Block node minimizing the maximum component size when removed from
    /// the tree (centroid restricted to blocks; lowest id on ties).
    pub fn centroid_block(&self) -> BcId {
        let total = self.alive as u32;
        let order = self.bfs_order();
        let mut size = vec![0u32; self.nodes.len()];
        for &b in &order {
            size[b.0] = 1;
        }
        for &b in order.iter().rev() {
            if let Some(p) = self.nodes[b.0].parent {
                size[p.0] += size[b.0];
            }
        }
        let mut best: Option<(u32, BcId)> = None;
        for &b in &order {
            if self.nodes[b.0].kind != BcKind::Block {
                continue;
            }
            let mut max_comp = total - size[b.0];
            for &c in &self.nodes[b.0].children {
                max_comp = max_comp.max(size[c.0]);
            }
            if best.map_or(true, |(m, id)| max_comp < m || (max_comp == m && b < id)) {
                best = Some((max_comp, b));
            }
        }
        best.expect("tree has no block node").1
    }

    /// Merge the tree path between the blocks of `u` and `v` after the edge
    /// `(u, v)` was inserted into the graph. Interior cut vertices that no
    /// longer separate anything are absorbed; the ones that still carry
    /// other subtrees are re-hung under the merged block.
    pub fn insert_edge(&mut self, u: NodeId, v: NodeId) -> MergeReport {
        let bu = self.bc_of_node(u);
        let bv = self.bc_of_node(v);
        assert_ne!(bu, bv, "edge endpoints already share a block");
        let (path, top) = self.tree_path(bu, bv);
        debug_assert!(path.len() >= 2);

        let nb = BcId(self.nodes.len());
        self.nodes.push(BcNode {
            kind: BcKind::Block,
            parent: None,
            children: Vec::new(),
            level: 0,
            merged_into: None,
        });
        self.block_nodes.push(Vec::new());
        self.cut_vertex.push(None);
        self.alive += 1;

        let mut absorbed = Vec::new();
        let mut merged_nodes: Vec<NodeId> = Vec::new();
        let mut new_children: Vec<BcId> = Vec::new();
        let mut nb_parent: Option<BcId> = None;
        let mut top_was_block = false;

        for &t in &path {
            let is_top = t == top;
            match self.nodes[t.0].kind {
                BcKind::Block => {
                    absorbed.push(t);
                    merged_nodes.extend_from_slice(&self.block_nodes[t.0]);
                    let off: Vec<BcId> = self.nodes[t.0]
                        .children
                        .iter()
                        .copied()
                        .filter(|c| !path.contains(c))
                        .collect();
                    new_children.extend(off);
                    if is_top {
                        nb_parent = self.nodes[t.0].parent;
                        top_was_block = true;
                    }
                }
                BcKind::Cut => {
                    let has_off = self.nodes[t.0]
                        .children
                        .iter()
                        .any(|c| !path.contains(c));
                    if is_top {
                        // Still separates the merged block from everything
                        // above it.
                        self.nodes[t.0].children.retain(|c| !path.contains(c));
                        self.nodes[t.0].children.push(nb);
                        nb_parent = Some(t);
                    } else if has_off {
                        self.nodes[t.0].children.retain(|c| !path.contains(c));
                        new_children.push(t);
                    } else {
                        absorbed.push(t);
                        merged_nodes.push(self.cut_node(t));
                    }
                }
            }
        }

        for &t in &absorbed {
            self.nodes[t.0].merged_into = Some(nb);
            self.nodes[t.0].children.clear();
            self.alive -= 1;
        }
        for &c in &new_children {
            self.nodes[c.0].parent = Some(nb);
        }
        self.nodes[nb.0].children = new_children;
        self.nodes[nb.0].parent = nb_parent;
        merged_nodes.sort_unstable();
        merged_nodes.dedup();
        self.block_nodes[nb.0] = merged_nodes;

        let mut root_changed = false;
        if top_was_block {
            match nb_parent {
                Some(p) => {
                    let cs = &mut self.nodes[p.0].children;
                    cs.retain(|&c| c != top);
                    cs.push(nb);
                }
                None => {
                    // The old root was on the merged path.
                    self.root = nb;
                    root_changed = true;
                }
            }
        }
        self.recompute_levels();
        MergeReport {
            merged: nb,
            absorbed,
            root_changed,
        }
    }

    /// Path from `a` to `b` through their lowest common ancestor; returns
    /// the path (endpoints included) and the lca.
    fn tree_path(&self, a: BcId, b: BcId) -> (Vec<BcId>, BcId) {
        let mut pa = vec![a];
        let mut pb = vec![b];
        let mut x = a;
        let mut y = b;
        while self.nodes[x.0].level > self.nodes[y.0].level {
            x = self.nodes[x.0].parent.expect("level > 0 implies a parent");
            pa.push(x);
        }
        while self.nodes[y.0].level > self.nodes[x.0].level {
            y = self.nodes[y.0].parent.expect("level > 0 implies a parent");
            pb.push(y);
        }
        while x != y {
            x = self.nodes[x.0].parent.expect("nodes share a root");
            y = self.nodes[y.0].parent.expect("nodes share a root");
            pa.push(x);
            pb.push(y);
        }
        let lca = x;
        pb.pop(); // lca already in pa
        pa.extend(pb.into_iter().rev());
        (pa, lca)
    }

    fn bfs_order(&self) -> Vec<BcId> {
        let mut order = Vec::with_capacity(self.alive);
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(b) = queue.pop_front() {
            order.push(b);
            for &c in &self.nodes[b.0].children {
                queue.push_back(c);
            }
        }
        debug_assert_eq!(order.len(), self.alive, "tree out of sync");
        order
    }

    fn recompute_levels(&mut self) {
        let order = self.bfs_order();
        for b in order {
            let lvl = match self.nodes[b.0].parent {
                Some(p) => self.nodes[p.0].level + 1,
                None => 0,
            };
            self.nodes[b.0].level = lvl;
        }
    }
}

#[cfg(test)]
mod tests;
