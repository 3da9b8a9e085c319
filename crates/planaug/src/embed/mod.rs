//! Faces of a rotation system, and the one mutation the core needs:
//! splitting a face with a new edge.
//!
//! Purpose
//! - Derive the face structure (orbits of `next(d) = rot_next(twin(d))`)
//!   from a graph's rotation system and keep it consistent while new edges
//!   are inserted inside faces.
//!
//! Why this design
//! - Face membership is a flat `Vec<FaceId>` indexed by dart, grown by two
//!   entries per inserted edge; faces themselves only store a
//!   representative dart. Sizes and boundaries are walked on demand.
//! - `split_face(a, b)` is the embedding-preserving insertion point: the
//!   new edge lands immediately before `a` and `b` in their rotations, so
//!   exactly one face splits in two and no existing dart changes order.

use crate::graph::{Dart, EdgeId, Graph};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

#[derive(Clone, Copy, Debug)]
struct FaceRec {
    /// A dart on this face's boundary cycle.
    dart: Dart,
}

/// Combinatorial embedding: face structure over a graph's rotation system.
///
/// The embedding does not borrow the graph; every query that walks face
/// cycles takes `&Graph` explicitly. Callers must pass the same graph the
/// embedding was built from (and keep the two in sync through
/// `split_face`).
#[derive(Clone, Debug)]
pub struct Embedding {
    face_of: Vec<FaceId>,
    faces: Vec<FaceRec>,
    outer: FaceId,
}

impl Embedding {
    /// Compute all faces of `g`'s rotation system. The face with the most
    /// darts becomes the outer face (lowest id on ties).
    ///
    /// For a connected planar rotation system the Euler relation
    /// `V - E + F = 2` holds; this is debug-asserted as a cheap guard
    /// against non-planar input, which is a precondition violation.
    pub fn new(g: &Graph) -> Self {
        let nd = g.num_darts();
        let mut face_of = vec![FaceId(usize::MAX); nd];
        let mut faces = Vec::new();
        for start in (0..nd).map(Dart) {
            if face_of[start.0].0 != usize::MAX {
                continue;
            }
            let f = FaceId(faces.len());
            faces.push(FaceRec { dart: start });
            let mut d = start;
            loop {
                face_of[d.0] = f;
                d = g.rot_next(d.twin());
                if d == start {
                    break;
                }
            }
        }
        let mut sizes = vec![0usize; faces.len()];
        for &f in &face_of {
            sizes[f.0] += 1;
        }
        let outer = FaceId(
            (0..faces.len())
                .max_by_key(|&i| sizes[i])
                .unwrap_or(0),
        );
        debug_assert!(
            g.num_edges() == 0
                || !g.is_connected()
                || g.num_nodes() + faces.len() == g.num_edges() + 2,
            "rotation system violates Euler's relation; input not planar?"
        );
        Self {
            face_of,
            faces,
            outer,
        }
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn face_of(&self, d: Dart) -> FaceId {
        self.face_of[d.0]
    }

    #[inline]
    pub fn outer_face(&self) -> FaceId {
        self.outer
    }

    pub fn set_outer_face(&mut self, f: FaceId) {
        assert!(f.0 < self.faces.len());
        self.outer = f;
    }

    /// Successor of `d` along its face cycle.
    #[inline]
    pub fn face_next(&self, g: &Graph, d: Dart) -> Dart {
        g.rot_next(d.twin())
    }

    /// All darts on the boundary cycle of `f`.
    pub fn face_darts(&self, g: &Graph, f: FaceId) -> Vec<Dart> {
        let start = self.faces[f.0].dart;
        let mut out = vec![start];
        let mut d = self.face_next(g, start);
        while d != start {
            out.push(d);
            d = self.face_next(g, d);
        }
        out
    }

    pub fn face_size(&self, g: &Graph, f: FaceId) -> usize {
        self.face_darts(g, f).len()
    }

    /// Insert the edge `(src(a), src(b))` inside the common face of `a` and
    /// `b`, splitting it in two. The cycle through the new dart at `src(a)`
    /// gets a fresh face id; the cycle through the twin keeps the old id
    /// (so an outer face stays outer on the `a` side of the split).
    pub fn split_face(&mut self, g: &mut Graph, a: Dart, b: Dart) -> EdgeId {
        let f = self.face_of(a);
        assert_eq!(
            f,
            self.face_of(b),
            "split_face anchors must lie on one face"
        );
        assert_ne!(a, b, "split_face needs two distinct corners");
        let e = g.insert_edge_darts(a, b);
        let duv = Dart(2 * e.0);
        let dvu = duv.twin();
        self.face_of.push(FaceId(usize::MAX));
        self.face_of.push(FaceId(usize::MAX));
        // New cycle through duv: duv -> b -> ... (ends where a used to follow).
        let nf = FaceId(self.faces.len());
        self.faces.push(FaceRec { dart: duv });
        let mut d = duv;
        loop {
            self.face_of[d.0] = nf;
            d = self.face_next(g, d);
            if d == duv {
                break;
            }
        }
        // The other cycle keeps f; only the twin is new on it.
        self.face_of[dvu.0] = f;
        self.faces[f.0].dart = dvu;
        debug_assert_eq!(self.face_of(a), f);
        debug_assert_eq!(self.face_of(b), nf);
        e
    }
}

#[cfg(test)]
mod tests;
