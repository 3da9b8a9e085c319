//! Embedding-preserving biconnectivity augmentation.
//!
//! Purpose
//! - Given a connected planar graph with a fixed rotation system, insert a
//!   small set of edges that makes the graph biconnected without changing
//!   the cyclic order of any existing edge end. Every inserted edge splits
//!   one existing face in two, so the input embedding survives verbatim.
//!
//! Why this design
//! - The run mutates a staging copy of the graph and embedding; the
//!   caller's graph is only touched at the very end, by replaying the
//!   staged insertions ([`staging`]). A panic mid-run leaves the input
//!   untouched.
//! - The strategy is the greedy BC-tree reduction: group unresolved leaf
//!   blocks into labels by where their chains converge ([`labels`]), then
//!   repeatedly connect a face-sharing pendant pair and merge the tree path
//!   between them ([`engine`]). Each connection reduces the leaf count, so
//!   the loop terminates with a single block.

use std::fmt;

use tracing::debug;

use crate::embed::Embedding;
use crate::graph::{EdgeId, Graph};

mod engine;
mod labels;
mod staging;

/// Errors reported by [`augment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentError {
    /// The input graph is not connected. Augmentation only bridges cut
    /// vertices, not components; connect the graph first.
    NotConnected,
}

impl fmt::Display for AugmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AugmentError::NotConnected => {
                write!(f, "input graph is not connected")
            }
        }
    }
}

impl std::error::Error for AugmentError {}

/// Insert edges into `g` until it is biconnected, preserving its embedding.
///
/// `emb` must be the face structure of `g`'s current rotation system; both
/// are updated in step. The ids of the inserted edges are appended to
/// `out` in insertion order, and the number of insertions is returned.
/// A graph that is already biconnected (or has at most one node) comes
/// back unchanged with `Ok(0)`.
pub fn augment(
    g: &mut Graph,
    emb: &mut Embedding,
    out: &mut Vec<EdgeId>,
) -> Result<usize, AugmentError> {
    if !g.is_connected() {
        return Err(AugmentError::NotConnected);
    }
    if g.num_nodes() == 0 {
        return Ok(0);
    }
    let Some(mut run) = engine::Augmenter::new(g, emb) else {
        debug!("graph already biconnected");
        return Ok(0);
    };
    run.run();
    let stage = run.into_staging();
    let inserted = stage.num_inserted();
    stage.commit(g, emb, out);
    Ok(inserted)
}
