//! Arena-based undirected graph with an explicit rotation system.
//!
//! Purpose
//! - Provide the mutable graph model the augmentation core runs on: nodes
//!   and edges in flat arenas, plus a cyclic order of edge ends (darts)
//!   around every node. The rotation system *is* the combinatorial
//!   embedding; `embed::Embedding` only derives and tracks its faces.
//!
//! Why this design
//! - Stable integer handles (`NodeId`, `EdgeId`, `Dart`) instead of
//!   pointer-linked structures: nodes and edges are never removed, so
//!   handles stay valid for the whole run and cross-referencing tables can
//!   be plain `Vec`s.
//! - A dart is `2 * edge + side`; `twin(d) = d ^ 1`. No per-dart storage
//!   beyond the rotation vectors.

use std::collections::VecDeque;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A directed edge end: edge `d.0 >> 1`, side `d.0 & 1`.
///
/// Side 0 leaves the edge's first endpoint, side 1 the second. A dart is
/// the adjacency reference used to pin a new edge to a position on a face
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dart(pub usize);

impl Dart {
    #[inline]
    pub fn twin(self) -> Dart {
        Dart(self.0 ^ 1)
    }
    #[inline]
    pub fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }
    #[inline]
    fn side(self) -> usize {
        self.0 & 1
    }
}

#[derive(Clone, Debug, Default)]
struct NodeRec {
    /// Outgoing darts in cyclic order.
    rotation: Vec<Dart>,
}

#[derive(Clone, Copy, Debug)]
struct EdgeRec {
    u: NodeId,
    v: NodeId,
}

/// Undirected graph with rotation system.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<NodeRec>,
    edges: Vec<EdgeRec>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    #[inline]
    pub fn num_darts(&self) -> usize {
        2 * self.edges.len()
    }

    pub fn add_node(&mut self) -> NodeId {
        self.nodes.push(NodeRec::default());
        NodeId(self.nodes.len() - 1)
    }

    /// Append a new edge; both darts go to the end of their rotations.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        assert_ne!(u, v, "self-loops are not supported");
        let e = EdgeId(self.edges.len());
        self.edges.push(EdgeRec { u, v });
        let du = Dart(2 * e.0);
        let dv = Dart(2 * e.0 + 1);
        self.nodes[u.0].rotation.push(du);
        self.nodes[v.0].rotation.push(dv);
        e
    }

    /// Insert a new edge `(src(a), src(b))` with its darts placed
    /// immediately before `a` and `b` in the respective rotations.
    ///
    /// This is the embedding-preserving insertion primitive: the new edge
    /// occupies exactly one corner at each endpoint, so the cyclic order of
    /// all existing darts is unchanged. Face bookkeeping is the caller's
    /// job (`Embedding::split_face`).
    pub fn insert_edge_darts(&mut self, a: Dart, b: Dart) -> EdgeId {
        let u = self.src(a);
        let v = self.src(b);
        assert_ne!(u, v, "self-loops are not supported");
        let e = EdgeId(self.edges.len());
        self.edges.push(EdgeRec { u, v });
        let du = Dart(2 * e.0);
        let dv = Dart(2 * e.0 + 1);
        let pa = self.rotation_index(a);
        self.nodes[u.0].rotation.insert(pa, du);
        let pb = self.rotation_index(b);
        self.nodes[v.0].rotation.insert(pb, dv);
        e
    }

    #[inline]
    pub fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        let r = self.edges[e.0];
        (r.u, r.v)
    }

    /// Source node of a dart.
    #[inline]
    pub fn src(&self, d: Dart) -> NodeId {
        let r = self.edges[d.edge().0];
        if d.side() == 0 {
            r.u
        } else {
            r.v
        }
    }

    /// Target node of a dart.
    #[inline]
    pub fn tgt(&self, d: Dart) -> NodeId {
        self.src(d.twin())
    }

    #[inline]
    pub fn rotation(&self, v: NodeId) -> &[Dart] {
        &self.nodes[v.0].rotation
    }

    #[inline]
    pub fn degree(&self, v: NodeId) -> usize {
        self.nodes[v.0].rotation.len()
    }

    /// Replace the rotation of `v`. The new order must be a permutation of
    /// the old one; callers use this to supply a specific embedding.
    pub fn set_rotation(&mut self, v: NodeId, order: Vec<Dart>) {
        let old = &self.nodes[v.0].rotation;
        assert_eq!(old.len(), order.len(), "rotation must keep all darts");
        debug_assert!(
            {
                let mut a: Vec<Dart> = old.clone();
                let mut b = order.clone();
                a.sort_unstable();
                b.sort_unstable();
                a == b
            },
            "rotation must be a permutation of the incident darts"
        );
        self.nodes[v.0].rotation = order;
    }

    /// Successor of `d` in the cyclic rotation of its source node.
    pub fn rot_next(&self, d: Dart) -> Dart {
        let rot = &self.nodes[self.src(d).0].rotation;
        let i = self.rotation_index(d);
        rot[(i + 1) % rot.len()]
    }

    fn rotation_index(&self, d: Dart) -> usize {
        let rot = &self.nodes[self.src(d).0].rotation;
        rot.iter()
            .position(|&x| x == d)
            .expect("dart not present in its source rotation")
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        let (a, b) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.nodes[a.0]
            .rotation
            .iter()
            .any(|&d| self.tgt(d) == b)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len()).map(EdgeId)
    }

    /// BFS reachability from node 0. Empty and single-node graphs count as
    /// connected.
    pub fn is_connected(&self) -> bool {
        if self.nodes.len() <= 1 {
            return true;
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[0] = true;
        queue.push_back(NodeId(0));
        let mut count = 1usize;
        while let Some(v) = queue.pop_front() {
            for &d in self.rotation(v) {
                let w = self.tgt(d);
                if !seen[w.0] {
                    seen[w.0] = true;
                    count += 1;
                    queue.push_back(w);
                }
            }
        }
        count == self.nodes.len()
    }
}

#[cfg(test)]
mod tests;
