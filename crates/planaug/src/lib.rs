//! Planar biconnectivity augmentation with a fixed combinatorial embedding.
//!
//! Given a connected planar graph whose embedding is pinned down by its
//! rotation system, [`augment`] inserts a small set of edges that makes the
//! graph biconnected without disturbing the embedding: every new edge
//! splits an existing face in two and the cyclic order of all pre-existing
//! edge ends is preserved.
//!
//! Module map
//! - [`graph`]: arena graph with rotation system (the embedding carrier).
//! - [`embed`]: faces of the rotation system and the face-split insertion.
//! - [`bctree`]: dynamic block–cut-vertex tree under edge insertion.
//! - [`augment`]: the label-based augmentation engine and its entry point.
//! - [`gen`]: random planar test graphs (cacti) with replay tokens.

pub mod augment;
pub mod bctree;
pub mod embed;
pub mod gen;
pub mod graph;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use augment::{augment, AugmentError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::augment::{augment, AugmentError};
    pub use crate::bctree::{BcId, BcKind, BcTree, MergeReport};
    pub use crate::embed::{Embedding, FaceId};
    pub use crate::gen::{draw_cactus, CactusCfg, ReplayToken};
    pub use crate::graph::{Dart, EdgeId, Graph, NodeId};
}
