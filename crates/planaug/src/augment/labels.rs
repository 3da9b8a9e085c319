//! Label lifecycle for the augmentation engine.
//!
//! A label groups pendants whose upward traversal stopped at the same
//! ancestor for the same reason. The label list is kept sorted by strictly
//! decreasing ancestor level so the deepest, most constrained group is
//! always matched first; processing a shallower label first can strand a
//! deeper one with no legal partner.
//!
//! This module only manages lifecycle and ordering; matching decisions
//! belong to the engine.

use crate::bctree::{BcId, BcTree};

/// Why the upward traversal from a pendant stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCause {
    /// Reached the tree root without hitting anything else.
    Root,
    /// Reached a node already claimed as another label's anchor.
    ExistingLabel,
    /// Reached an unclaimed node with two or more children.
    Branch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(pub usize);

#[derive(Clone, Debug)]
pub struct Label {
    pub anchor: BcId,
    pub cause: StopCause,
    pub pendants: Vec<BcId>,
    pub level: u32,
    /// Creation order; breaks level ties deterministically.
    seq: usize,
}

/// The set of all labels plus the cross-reference tables.
///
/// Invariant: every labeled pendant appears in exactly one label, and
/// `label_of` / `anchored_at` mirror the label contents exactly.
#[derive(Debug, Default)]
pub struct LabelSet {
    labels: Vec<Option<Label>>,
    /// Label ids sorted by decreasing level (creation order on ties).
    order: Vec<LabelId>,
    /// Pendant (BcId) -> owning label.
    label_of: Vec<Option<LabelId>>,
    /// Anchor (BcId) -> label anchored there.
    anchored_at: Vec<Option<LabelId>>,
    next_seq: usize,
}

impl LabelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: Vec::new(),
            order: Vec::new(),
            label_of: vec![None; capacity],
            anchored_at: vec![None; capacity],
            next_seq: 0,
        }
    }

    /// Grow the cross-reference tables when the BC-tree arena grows.
    pub fn sync_capacity(&mut self, capacity: usize) {
        if self.label_of.len() < capacity {
            self.label_of.resize(capacity, None);
            self.anchored_at.resize(capacity, None);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.order.len()
    }

    pub fn total_pendants(&self) -> usize {
        self.order
            .iter()
            .map(|&l| self.get(l).pendants.len())
            .sum()
    }

    #[inline]
    pub fn get(&self, l: LabelId) -> &Label {
        self.labels[l.0].as_ref().expect("label deleted")
    }

    /// Labels in matching priority order (deepest first).
    #[inline]
    pub fn order(&self) -> &[LabelId] {
        &self.order
    }

    #[inline]
    pub fn label_of(&self, pendant: BcId) -> Option<LabelId> {
        self.label_of[pendant.0]
    }

    #[inline]
    pub fn anchored_at(&self, node: BcId) -> Option<LabelId> {
        self.anchored_at[node.0]
    }

    /// Create a label for `anchor` seeded with one pendant and insert it
    /// into the sorted list.
    pub fn new_label(
        &mut self,
        anchor: BcId,
        cause: StopCause,
        pendant: BcId,
        level: u32,
    ) -> LabelId {
        debug_assert!(self.anchored_at[anchor.0].is_none(), "anchor claimed twice");
        debug_assert!(self.label_of[pendant.0].is_none(), "pendant already labeled");
        let id = LabelId(self.labels.len());
        self.labels.push(Some(Label {
            anchor,
            cause,
            pendants: vec![pendant],
            level,
            seq: self.next_seq,
        }));
        self.next_seq += 1;
        self.label_of[pendant.0] = Some(id);
        self.anchored_at[anchor.0] = Some(id);
        self.insert_sorted(id);
        id
    }

    pub fn add_pendant(&mut self, l: LabelId, pendant: BcId) {
        debug_assert!(self.label_of[pendant.0].is_none(), "pendant already labeled");
        self.labels[l.0]
            .as_mut()
            .expect("label deleted")
            .pendants
            .push(pendant);
        self.label_of[pendant.0] = Some(l);
    }

    /// Remove a pendant from its label; the label is deleted once empty.
    pub fn remove_pendant(&mut self, pendant: BcId) {
        let l = self.label_of[pendant.0]
            .take()
            .expect("pendant not in any label");
        let label = self.labels[l.0].as_mut().expect("label deleted");
        let i = label
            .pendants
            .iter()
            .position(|&p| p == pendant)
            .expect("label out of sync with label_of");
        label.pendants.remove(i);
        if label.pendants.is_empty() {
            self.delete(l);
        }
    }

    /// Drop a label entirely, unlabeling its remaining pendants (they are
    /// re-reduced by the engine afterwards).
    pub fn dissolve(&mut self, l: LabelId) {
        let pendants = self.get(l).pendants.clone();
        for p in pendants {
            self.label_of[p.0] = None;
        }
        self.delete(l);
    }

    /// Refresh levels from the tree and restore the decreasing-level order
    /// after merges or a root migration changed node depths.
    pub fn resort(&mut self, tree: &BcTree) {
        for &l in &self.order {
            let label = self.labels[l.0].as_mut().expect("label deleted");
            label.level = tree.level(label.anchor);
        }
        let labels = &self.labels;
        self.order.sort_by(|&a, &b| {
            let la = labels[a.0].as_ref().expect("label deleted");
            let lb = labels[b.0].as_ref().expect("label deleted");
            lb.level.cmp(&la.level).then(la.seq.cmp(&lb.seq))
        });
    }

    fn delete(&mut self, l: LabelId) {
        let label = self.labels[l.0].take().expect("label deleted twice");
        self.anchored_at[label.anchor.0] = None;
        self.order.retain(|&x| x != l);
    }

    fn insert_sorted(&mut self, id: LabelId) {
        let level = self.get(id).level;
        // Linear scan; the list stays short and the order deterministic.
        let pos = self
            .order
            .iter()
            .position(|&x| self.get(x).level < level)
            .unwrap_or(self.order.len());
        self.order.insert(pos, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_deepest_first_with_creation_ties() {
        let mut ls = LabelSet::new(16);
        let a = ls.new_label(BcId(1), StopCause::Branch, BcId(10), 2);
        let b = ls.new_label(BcId(2), StopCause::Branch, BcId(11), 4);
        let c = ls.new_label(BcId(3), StopCause::Root, BcId(12), 2);
        assert_eq!(ls.order(), &[b, a, c]);
        assert_eq!(ls.total_pendants(), 3);
    }

    #[test]
    fn removing_last_pendant_deletes_label() {
        let mut ls = LabelSet::new(16);
        let l = ls.new_label(BcId(1), StopCause::Branch, BcId(10), 1);
        ls.add_pendant(l, BcId(11));
        assert_eq!(ls.get(l).pendants.len(), 2);
        ls.remove_pendant(BcId(10));
        assert_eq!(ls.label_of(BcId(10)), None);
        assert_eq!(ls.get(l).pendants, vec![BcId(11)]);
        ls.remove_pendant(BcId(11));
        assert!(ls.is_empty());
        assert_eq!(ls.anchored_at(BcId(1)), None);
    }

    #[test]
    fn dissolve_unlabels_members() {
        let mut ls = LabelSet::new(16);
        let l = ls.new_label(BcId(1), StopCause::Branch, BcId(10), 1);
        ls.add_pendant(l, BcId(11));
        ls.dissolve(l);
        assert!(ls.is_empty());
        assert_eq!(ls.label_of(BcId(10)), None);
        assert_eq!(ls.label_of(BcId(11)), None);
        assert_eq!(ls.anchored_at(BcId(1)), None);
    }
}
