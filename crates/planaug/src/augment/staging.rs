//! Staging copy: the working graph the engine mutates, plus the replay
//! data needed to commit the result to the caller's graph.
//!
//! The copy is index-identical to the original (same node, edge and dart
//! ids), so an insertion anchor recorded here stays valid on the original —
//! including anchors that reference darts of earlier staged insertions,
//! because commit replays the insertions in order and recreates the same
//! ids.

use crate::embed::Embedding;
use crate::graph::{Dart, EdgeId, Graph};

#[derive(Debug)]
pub(crate) struct Staging {
    pub graph: Graph,
    pub emb: Embedding,
    /// Staged edge -> original edge; identity for pre-existing edges,
    /// filled in for inserted ones at commit time.
    orig_edge: Vec<Option<EdgeId>>,
    /// Anchor darts of every staged insertion, in insertion order.
    inserted: Vec<(Dart, Dart)>,
}

impl Staging {
    pub fn new(g: &Graph, emb: &Embedding) -> Self {
        let orig_edge = g.edge_ids().map(Some).collect();
        Self {
            graph: g.clone(),
            emb: emb.clone(),
            orig_edge,
            inserted: Vec::new(),
        }
    }

    /// Insert an edge into the staged graph and embedding, splitting the
    /// common face of `a` and `b`.
    pub fn insert_edge(&mut self, a: Dart, b: Dart) -> EdgeId {
        debug_assert!(!self.graph.has_edge(self.graph.src(a), self.graph.src(b)));
        let e = self.emb.split_face(&mut self.graph, a, b);
        self.orig_edge.push(None);
        self.inserted.push((a, b));
        e
    }

    #[inline]
    pub fn num_inserted(&self) -> usize {
        self.inserted.len()
    }

    /// The original edge a staged edge corresponds to; `None` for edges
    /// inserted during the run (until commit fills them in).
    #[inline]
    pub fn original_of(&self, e: EdgeId) -> Option<EdgeId> {
        self.orig_edge[e.0]
    }

    /// Replay the staged insertions onto the caller's graph and embedding;
    /// the new edge ids are appended to `out` in insertion order.
    pub fn commit(mut self, g: &mut Graph, emb: &mut Embedding, out: &mut Vec<EdgeId>) {
        assert_eq!(
            g.num_edges() + self.inserted.len(),
            self.graph.num_edges(),
            "original graph changed during the augmentation run"
        );
        let first_staged = self.graph.num_edges() - self.inserted.len();
        for (i, &(a, b)) in self.inserted.iter().enumerate() {
            debug_assert!(self.original_of(EdgeId(first_staged + i)).is_none());
            let e = emb.split_face(g, a, b);
            debug_assert_eq!(e, EdgeId(g.num_edges() - 1));
            self.orig_edge[first_staged + i] = Some(e);
            out.push(e);
        }
    }
}
