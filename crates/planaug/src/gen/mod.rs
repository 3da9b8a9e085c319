//! Random connected planar test graphs (cactus gluing + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of connected planar graphs with
//!   many cut vertices, used to exercise the augmentation on inputs beyond
//!   the hand-built fixtures.
//!
//! Model
//! - Grow a cactus: start from a single node and glue `blocks` random
//!   blocks onto existing nodes, each block either a bridge or a cycle.
//!   Every block shares exactly one vertex with the rest of the graph and
//!   its two darts at that vertex stay adjacent in the rotation, so the
//!   construction-order rotation system is planar by construction.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, NodeId};

/// Cactus sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CactusCfg {
    /// Number of blocks glued onto the initial node.
    pub blocks: usize,
    /// Maximum cycle length; a drawn length of 2 produces a bridge.
    pub max_cycle: usize,
}

impl Default for CactusCfg {
    fn default() -> Self {
        Self {
            blocks: 8,
            max_cycle: 5,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random connected cactus.
///
/// The returned rotation system is the construction order; callers build
/// an `Embedding` on top of it directly.
pub fn draw_cactus(cfg: CactusCfg, tok: ReplayToken) -> Graph {
    let mut rng = tok.to_std_rng();
    let mut g = Graph::new();
    g.add_node();
    let max_cycle = cfg.max_cycle.max(2);
    for _ in 0..cfg.blocks {
        let anchor = NodeId(rng.gen_range(0..g.num_nodes()));
        let len = rng.gen_range(2..=max_cycle);
        let mut prev = anchor;
        for _ in 0..len - 1 {
            let v = g.add_node();
            g.add_edge(prev, v);
            prev = v;
        }
        if len > 2 {
            g.add_edge(prev, anchor);
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::augment::augment;
    use crate::bctree::{BcId, BcKind, BcTree};
    use crate::embed::Embedding;

    /// Minimum number of augmenting edges for any connected graph: half the
    /// BC-tree leaves rounded up, or one less than the largest number of
    /// components a single cut vertex separates, whichever is bigger.
    fn lower_bound(g: &Graph) -> usize {
        let t = BcTree::build(g);
        if t.num_alive() == 1 {
            return 0;
        }
        let mut leaves = 0usize;
        let mut dmax = 0usize;
        for b in (0..t.num_bc_nodes()).map(BcId) {
            if !t.is_alive(b) {
                continue;
            }
            let deg = t.children(b).len() + usize::from(t.parent(b).is_some());
            if deg == 1 {
                leaves += 1;
            }
            if t.kind(b) == BcKind::Cut {
                dmax = dmax.max(deg);
            }
        }
        ((leaves + 1) / 2).max(dmax.saturating_sub(1))
    }

    #[test]
    fn reproducible_draw() {
        let cfg = CactusCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let g1 = draw_cactus(cfg, tok);
        let g2 = draw_cactus(cfg, tok);
        assert_eq!(g1.num_nodes(), g2.num_nodes());
        assert_eq!(g1.num_edges(), g2.num_edges());
        for v in g1.node_ids() {
            assert_eq!(g1.rotation(v), g2.rotation(v));
        }
    }

    #[test]
    fn cactus_is_connected_and_planar() {
        for index in 0..32 {
            let g = draw_cactus(CactusCfg::default(), ReplayToken { seed: 3, index });
            assert!(g.is_connected());
            let emb = Embedding::new(&g);
            assert_eq!(g.num_nodes() + emb.num_faces(), g.num_edges() + 2);
        }
    }

    proptest! {
        #[test]
        fn augmented_cactus_is_biconnected(
            seed in any::<u64>(),
            index in any::<u64>(),
            blocks in 1usize..12,
            max_cycle in 2usize..6,
        ) {
            let cfg = CactusCfg { blocks, max_cycle };
            let mut g = draw_cactus(cfg, ReplayToken { seed, index });
            let mut emb = Embedding::new(&g);
            let faces_before = emb.num_faces();
            let lo = lower_bound(&g);
            // Every insertion merges at least two BC-nodes into one.
            let hi = BcTree::build(&g).num_alive().saturating_sub(1);
            let mut out = Vec::new();
            let n = augment(&mut g, &mut emb, &mut out).unwrap();
            prop_assert_eq!(out.len(), n);
            prop_assert_eq!(BcTree::build(&g).num_alive(), 1);
            // Each insertion splits exactly one face.
            prop_assert_eq!(emb.num_faces(), faces_before + n);
            prop_assert_eq!(g.num_nodes() + emb.num_faces(), g.num_edges() + 2);
            prop_assert!(n >= lo, "{} edges beat the lower bound {}", n, lo);
            prop_assert!(n <= hi, "{} edges exceed the merge budget {}", n, hi);
            // No self-loops, no parallel edges.
            let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(g.num_edges());
            for e in g.edge_ids() {
                let (u, v) = g.endpoints(e);
                prop_assert_ne!(u, v);
                pairs.push((u.0.min(v.0), u.0.max(v.0)));
            }
            pairs.sort_unstable();
            let before_dedup = pairs.len();
            pairs.dedup();
            prop_assert_eq!(pairs.len(), before_dedup);
        }

        #[test]
        fn augmentation_is_idempotent_on_cacti(
            seed in any::<u64>(),
            blocks in 1usize..10,
        ) {
            let cfg = CactusCfg { blocks, max_cycle: 4 };
            let mut g = draw_cactus(cfg, ReplayToken { seed, index: 0 });
            let mut emb = Embedding::new(&g);
            let mut out = Vec::new();
            augment(&mut g, &mut emb, &mut out).unwrap();
            let edges = g.num_edges();
            prop_assert_eq!(augment(&mut g, &mut emb, &mut out), Ok(0));
            prop_assert_eq!(g.num_edges(), edges);
        }
    }
}
