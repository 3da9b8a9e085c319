//! The augmentation engine: a state machine over the pendant population.
//!
//! Purpose
//! - Drive one augmentation run: pick a balanced root, reduce degree-2
//!   chains into labels, pair pendants that share a face, commit each new
//!   edge to the staging copy and the BC-tree, and repeat until the tree
//!   collapses to a single block.
//!
//! Why this design
//! - All mutable run state (staging copy, BC-tree, label set) lives in one
//!   `Augmenter` threaded through the private steps, so a run is
//!   re-entrant and each step testable in isolation.
//! - Matching handles dominance explicitly: when one label holds a strict
//!   majority of all pendants, its members are paired against each other
//!   first. Skipping this check stalls the greedy pairing whenever one
//!   subtree outweighs the rest.

use tracing::{debug, trace};

use crate::bctree::{BcId, BcTree, MergeReport};
use crate::embed::{Embedding, FaceId};
use crate::graph::{Dart, Graph};

use super::labels::{LabelId, LabelSet, StopCause};
use super::staging::Staging;

/// A matched pendant pair and the darts the new edge attaches to.
struct Match {
    p1: BcId,
    p2: BcId,
    a: Dart,
    b: Dart,
}

/// One augmentation run; owns every piece of mutable state.
pub(crate) struct Augmenter {
    stage: Staging,
    tree: BcTree,
    labels: LabelSet,
}

impl Augmenter {
    /// Build the run context. Returns `None` when the graph is already
    /// biconnected (single BC-node), the immediate-termination case.
    pub fn new(g: &Graph, emb: &Embedding) -> Option<Self> {
        let mut tree = BcTree::build(g);
        if tree.num_alive() <= 1 {
            return None;
        }
        let root = tree.centroid_block();
        tree.reroot(root);
        debug!(
            root = root.0,
            bc_nodes = tree.num_alive(),
            "augmentation start"
        );
        let labels = LabelSet::new(tree.num_bc_nodes());
        Some(Self {
            stage: Staging::new(g, emb),
            tree,
            labels,
        })
    }

    pub fn into_staging(self) -> Staging {
        self.stage
    }

    /// Reduce / match / connect until the BC-tree is a single block.
    pub fn run(&mut self) {
        loop {
            for p in self.tree.pendants() {
                if self.labels.label_of(p).is_none() {
                    self.reduce_chain(p);
                }
            }
            if self.tree.num_alive() == 1 {
                break;
            }
            assert!(!self.labels.is_empty(), "pendants left unlabeled");
            trace!(
                labels = self.labels.num_labels(),
                pendants = self.labels.total_pendants(),
                "reduction complete"
            );
            if self.labels.total_pendants() == 1 {
                self.connect_single_label();
            } else if let Some(m) = self.find_matching() {
                self.connect_pendants(m);
            } else {
                // Pendants in pairwise disjoint faces (nested blocks); no
                // pair can be connected, so attach one pendant further up.
                self.connect_lone_pendant();
            }
        }
        debug_assert!(self.labels.is_empty(), "labels must drain with the tree");
        debug!(inserted = self.stage.num_inserted(), "augmentation done");
    }

    /// Walk upward from `pendant` until something stops the traversal.
    fn follow_path(&self, pendant: BcId) -> (StopCause, BcId) {
        let mut v = self.tree.parent(pendant).expect("pendant has a parent");
        loop {
            if self.labels.anchored_at(v).is_some() {
                return (StopCause::ExistingLabel, v);
            }
            if v == self.tree.root() {
                return (StopCause::Root, v);
            }
            if self.tree.children(v).len() > 1 {
                return (StopCause::Branch, v);
            }
            v = self.tree.parent(v).expect("non-root has a parent");
        }
    }

    /// Collapse the degree-2 chain above `pendant` into a label: join the
    /// label claiming the stop node, or seed a new one there.
    fn reduce_chain(&mut self, pendant: BcId) {
        let (cause, stop) = self.follow_path(pendant);
        match cause {
            StopCause::ExistingLabel => {
                let l = self
                    .labels
                    .anchored_at(stop)
                    .expect("stop cause out of sync");
                trace!(
                    pendant = pendant.0,
                    anchor = stop.0,
                    cause = ?self.labels.get(l).cause,
                    "pendant joins label"
                );
                self.labels.add_pendant(l, pendant);
            }
            StopCause::Root | StopCause::Branch => {
                trace!(pendant = pendant.0, anchor = stop.0, ?cause, "new label");
                self.labels
                    .new_label(stop, cause, pendant, self.tree.level(stop));
            }
        }
    }

    /// Pick the next pendant pair to connect.
    ///
    /// Priority: a dominating label pairs internally first; otherwise the
    /// deepest label is paired against the others in priority order, then
    /// against itself, then every remaining combination. `None` means no
    /// two pendants share a face at all.
    fn find_matching(&self) -> Option<Match> {
        if let Some(m) = self.find_matching_rev() {
            return Some(m);
        }
        let order = self.labels.order();
        let l1 = order[0];
        for &l2 in &order[1..] {
            if let Some(m) = self.match_cross(l1, l2) {
                return Some(m);
            }
        }
        if let Some(m) = self.match_within(l1) {
            return Some(m);
        }
        // Pairs involving the deepest label are already covered above.
        for (i, &la) in order.iter().enumerate().skip(1) {
            if let Some(m) = self.match_within(la) {
                return Some(m);
            }
            for &lb in &order[i + 1..] {
                if let Some(m) = self.match_cross(la, lb) {
                    return Some(m);
                }
            }
        }
        None
    }

    /// Reverse matching: a label holding a strict majority of all pendants
    /// pairs internally before anything else, or the rest of the tree runs
    /// out of partners for it.
    fn find_matching_rev(&self) -> Option<Match> {
        let total = self.labels.total_pendants();
        for &l in self.labels.order() {
            let count = self.labels.get(l).pendants.len();
            if count >= 2 && 2 * count > total {
                if let Some(m) = self.match_within(l) {
                    trace!(label = l.0, "reverse matching within dominating label");
                    return Some(m);
                }
            }
        }
        None
    }

    fn match_within(&self, l: LabelId) -> Option<Match> {
        let ps = &self.labels.get(l).pendants;
        for i in 0..ps.len() {
            let fa = self.attach_faces(ps[i]);
            for &p2 in &ps[i + 1..] {
                let fb = self.attach_faces(p2);
                if let Some((a, b)) = self.common_face(&fa, &fb) {
                    return Some(Match {
                        p1: ps[i],
                        p2,
                        a,
                        b,
                    });
                }
            }
        }
        None
    }

    fn match_cross(&self, l1: LabelId, l2: LabelId) -> Option<Match> {
        for &p1 in &self.labels.get(l1).pendants {
            let fa = self.attach_faces(p1);
            for &p2 in &self.labels.get(l2).pendants {
                let fb = self.attach_faces(p2);
                if let Some((a, b)) = self.common_face(&fa, &fb) {
                    return Some(Match { p1, p2, a, b });
                }
            }
        }
        None
    }

    /// One dart per face touched by the attachment nodes of block `b`.
    /// Attachment nodes are the block's non-cut nodes; a new edge must not
    /// end on the cut vertex joining the block to the rest of the tree.
    fn attach_faces(&self, b: BcId) -> Vec<(FaceId, Dart)> {
        let g = &self.stage.graph;
        let mut out: Vec<(FaceId, Dart)> = Vec::new();
        for &v in self.tree.block_nodes(b) {
            if self.tree.bc_of_node(v) != b {
                continue; // cut vertex on the block boundary
            }
            for &d in g.rotation(v) {
                let f = self.stage.emb.face_of(d);
                if !out.iter().any(|&(x, _)| x == f) {
                    out.push((f, d));
                }
            }
        }
        out
    }

    /// A dart pair on a face both sides touch; the outer face wins, then
    /// the lowest face id (deterministic).
    fn common_face(
        &self,
        fa: &[(FaceId, Dart)],
        fb: &[(FaceId, Dart)],
    ) -> Option<(Dart, Dart)> {
        let outer = self.stage.emb.outer_face();
        let mut best: Option<(FaceId, Dart, Dart)> = None;
        for &(f, da) in fa {
            if let Some(&(_, db)) = fb.iter().find(|&&(x, _)| x == f) {
                if f == outer {
                    return Some((da, db));
                }
                if best.map_or(true, |(bf, _, _)| f < bf) {
                    best = Some((f, da, db));
                }
            }
        }
        best.map(|(_, da, db)| (da, db))
    }

    /// Insert the matched edge and merge the tree path between the pair.
    fn connect_pendants(&mut self, m: Match) {
        let g = &self.stage.graph;
        let (u, v) = (g.src(m.a), g.src(m.b));
        trace!(
            p1 = m.p1.0,
            p2 = m.p2.0,
            u = u.0,
            v = v.0,
            "connect pendants"
        );
        self.labels.remove_pendant(m.p1);
        self.labels.remove_pendant(m.p2);
        self.stage.insert_edge(m.a, m.b);
        let report = self.tree.insert_edge(u, v);
        self.after_merge(report);
    }

    /// Base case for an odd pendant count: connect the last pendant to the
    /// root block, collapsing the remaining path.
    fn connect_single_label(&mut self) {
        let l = self.labels.order()[0];
        debug_assert_eq!(self.labels.get(l).pendants.len(), 1);
        let p = self.labels.get(l).pendants[0];
        let root = self.tree.root();
        let fa = self.attach_faces(p);
        let pick = self
            .common_face(&fa, &self.attach_faces(root))
            .or_else(|| self.common_face(&fa, &self.root_cut_faces(p)));
        let Some((a, b)) = pick else {
            // The pendant sits in a face the root does not touch; close the
            // gap stepwise instead.
            self.connect_lone_pendant();
            return;
        };
        trace!(pendant = p.0, "connect single pendant to root");
        self.labels.remove_pendant(p);
        let (u, v) = (self.stage.graph.src(a), self.stage.graph.src(b));
        self.stage.insert_edge(a, b);
        let report = self.tree.insert_edge(u, v);
        self.after_merge(report);
    }

    /// Last resort when no pendant pair shares a face: connect one pendant
    /// of the deepest label to any face-sharing node outside its own block.
    /// The merge shrinks the tree, and the following rounds retry the
    /// regular matching on the simpler instance.
    fn connect_lone_pendant(&mut self) {
        let l = self.labels.order()[0];
        let p = self.labels.get(l).pendants[0];
        let skip = self.tree.parent(p).map(|c| self.tree.cut_node(c));
        let outer = self.stage.emb.outer_face();
        let mut fa = self.attach_faces(p);
        fa.sort_by_key(|&(f, _)| (f != outer, f));
        for &(f, da) in &fa {
            for db in self.stage.emb.face_darts(&self.stage.graph, f) {
                let w = self.stage.graph.src(db);
                if Some(w) == skip || self.tree.bc_of_node(w) == p {
                    continue;
                }
                trace!(pendant = p.0, target = w.0, "connect pendant upward");
                self.labels.remove_pendant(p);
                let u = self.stage.graph.src(da);
                self.stage.insert_edge(da, db);
                let report = self.tree.insert_edge(u, w);
                self.after_merge(report);
                return;
            }
        }
        panic!("pendant shares no face with the rest of the graph");
    }

    /// Fallback targets when the root block has no non-cut node on a face
    /// shared with the pendant: the root's cut vertices, except the
    /// pendant's own parent (an edge there would duplicate an existing one
    /// or stay inside one block).
    fn root_cut_faces(&self, pendant: BcId) -> Vec<(FaceId, Dart)> {
        let g = &self.stage.graph;
        let root = self.tree.root();
        let skip = self
            .tree
            .parent(pendant)
            .map(|c| self.tree.cut_node(c));
        let mut out: Vec<(FaceId, Dart)> = Vec::new();
        for &v in self.tree.block_nodes(root) {
            if Some(v) == skip || self.tree.bc_of_node(v) == root {
                continue;
            }
            for &d in g.rotation(v) {
                let f = self.stage.emb.face_of(d);
                if !out.iter().any(|&(x, _)| x == f) {
                    out.push((f, d));
                }
            }
        }
        out
    }

    /// Re-validate labels after a merge: absorbed pendants leave their
    /// labels, labels anchored at absorbed nodes dissolve (their pendants
    /// are re-reduced next iteration), levels are refreshed and the
    /// priority order restored. A merge that absorbed the root already
    /// promoted the merged block.
    fn after_merge(&mut self, report: MergeReport) {
        self.labels.sync_capacity(self.tree.num_bc_nodes());
        for &dead in &report.absorbed {
            if self.labels.label_of(dead).is_some() {
                trace!(pendant = dead.0, "absorbed pendant leaves its label");
                self.labels.remove_pendant(dead);
            }
            if let Some(l) = self.labels.anchored_at(dead) {
                trace!(label = l.0, anchor = dead.0, "dissolving label, anchor absorbed");
                self.labels.dissolve(l);
            }
        }
        if report.root_changed {
            debug!(root = report.merged.0, "root migrated to merged block");
        }
        self.labels.resort(&self.tree);
    }
}
