use super::*;
use crate::graph::{Graph, NodeId};

/// Two triangles {0,1,2} and {3,4,5} joined by the bridge (2,3).
fn barbell() -> Graph {
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..6).map(|_| g.add_node()).collect();
    g.add_edge(n[0], n[1]);
    g.add_edge(n[1], n[2]);
    g.add_edge(n[2], n[0]);
    g.add_edge(n[3], n[4]);
    g.add_edge(n[4], n[5]);
    g.add_edge(n[5], n[3]);
    g.add_edge(n[2], n[3]);
    g
}

#[test]
fn triangle_is_one_block() {
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..3).map(|_| g.add_node()).collect();
    g.add_edge(n[0], n[1]);
    g.add_edge(n[1], n[2]);
    g.add_edge(n[2], n[0]);
    let t = BcTree::build(&g);
    assert_eq!(t.num_alive(), 1);
    assert_eq!(t.kind(t.root()), BcKind::Block);
    assert!(t.pendants().is_empty());
    assert!(!t.is_cut_vertex(n[0]));
}

#[test]
fn barbell_decomposition() {
    let g = barbell();
    let t = BcTree::build(&g);
    // 3 blocks (two triangles + bridge), 2 cut vertices.
    assert_eq!(t.num_alive(), 5);
    assert!(t.is_cut_vertex(NodeId(2)));
    assert!(t.is_cut_vertex(NodeId(3)));
    assert!(!t.is_cut_vertex(NodeId(0)));
    let b0 = t.bc_of_node(NodeId(0));
    assert_eq!(t.kind(b0), BcKind::Block);
    assert_eq!(t.block_nodes(b0), &[NodeId(0), NodeId(1), NodeId(2)]);
}

#[test]
fn centroid_and_reroot() {
    let g = barbell();
    let mut t = BcTree::build(&g);
    let bridge = t.centroid_block();
    assert_eq!(
        t.block_nodes(bridge),
        &[NodeId(2), NodeId(3)],
        "bridge block balances the tree"
    );
    t.reroot(bridge);
    assert_eq!(t.root(), bridge);
    assert_eq!(t.level(bridge), 0);
    // Both triangles are now pendants at level 2.
    let pendants = t.pendants();
    assert_eq!(pendants.len(), 2);
    for p in pendants {
        assert_eq!(t.level(p), 2);
        assert_eq!(t.kind(p), BcKind::Block);
    }
}

#[test]
fn insert_edge_collapses_path() {
    let mut g = barbell();
    let mut t = BcTree::build(&g);
    t.reroot(t.centroid_block());
    g.add_edge(NodeId(0), NodeId(4));
    let report = t.insert_edge(NodeId(0), NodeId(4));
    // The whole 5-node path merges into one block.
    assert_eq!(t.num_alive(), 1);
    assert_eq!(report.absorbed.len(), 5);
    assert!(report.root_changed);
    assert_eq!(t.root(), report.merged);
    assert_eq!(t.block_nodes(report.merged).len(), 6);
    // Stale ids resolve to the merged block.
    for &a in &report.absorbed {
        assert_eq!(t.find(a), report.merged);
    }
    assert!(!t.is_cut_vertex(NodeId(2)));
}

#[test]
fn insert_edge_keeps_separating_cuts() {
    // Central cut vertex 0 with three triangle blocks.
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..7).map(|_| g.add_node()).collect();
    for k in 0..3 {
        let a = n[1 + 2 * k];
        let b = n[2 + 2 * k];
        g.add_edge(n[0], a);
        g.add_edge(a, b);
        g.add_edge(b, n[0]);
    }
    let mut t = BcTree::build(&g);
    t.reroot(t.centroid_block());
    assert_eq!(t.num_alive(), 4); // 3 blocks + 1 cut
    assert_eq!(t.pendants().len(), 2);
    let p = t.pendants();
    let (x, y) = (t.block_nodes(p[0])[1], t.block_nodes(p[1])[1]);
    assert!(!t.is_cut_vertex(x) && !t.is_cut_vertex(y));
    g.add_edge(x, y);
    let report = t.insert_edge(x, y);
    // Vertex 0 still separates the untouched triangle from the merged one.
    assert!(t.is_cut_vertex(NodeId(0)));
    assert_eq!(t.num_alive(), 3);
    assert!(!report.root_changed);
    assert_eq!(t.pendants().len(), 1);
}

#[test]
fn path_graph_blocks_are_edges() {
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..4).map(|_| g.add_node()).collect();
    g.add_edge(n[0], n[1]);
    g.add_edge(n[1], n[2]);
    g.add_edge(n[2], n[3]);
    let t = BcTree::build(&g);
    assert_eq!(t.num_alive(), 5); // 3 bridge blocks + 2 cuts
    assert!(t.is_cut_vertex(n[1]));
    assert!(t.is_cut_vertex(n[2]));
    assert!(!t.is_cut_vertex(n[0]));
}
