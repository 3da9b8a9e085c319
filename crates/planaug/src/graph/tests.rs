use super::*;

fn triangle() -> Graph {
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..3).map(|_| g.add_node()).collect();
    g.add_edge(n[0], n[1]);
    g.add_edge(n[1], n[2]);
    g.add_edge(n[2], n[0]);
    g
}

#[test]
fn darts_twin_and_endpoints() {
    let g = triangle();
    let d = Dart(0); // edge 0, side 0: 0 -> 1
    assert_eq!(d.twin(), Dart(1));
    assert_eq!(d.edge(), EdgeId(0));
    assert_eq!(g.src(d), NodeId(0));
    assert_eq!(g.tgt(d), NodeId(1));
    assert_eq!(g.src(d.twin()), NodeId(1));
    assert_eq!(g.endpoints(EdgeId(2)), (NodeId(2), NodeId(0)));
}

#[test]
fn rotation_order_follows_construction() {
    let g = triangle();
    // node 0 saw edge 0 (as side 0) then edge 2 (as side 1)
    assert_eq!(g.rotation(NodeId(0)), &[Dart(0), Dart(5)]);
    assert_eq!(g.rot_next(Dart(0)), Dart(5));
    assert_eq!(g.rot_next(Dart(5)), Dart(0)); // cyclic wrap
}

#[test]
fn insert_edge_darts_places_before_anchors() {
    let mut g = triangle();
    let n3 = g.add_node();
    g.add_edge(NodeId(1), n3);
    // attach a chord (0, 3) before dart 5 at node 0 and before dart 7 at 3
    let e = g.insert_edge_darts(Dart(5), Dart(7));
    assert_eq!(g.endpoints(e), (NodeId(0), n3));
    let du = Dart(2 * e.0);
    assert_eq!(g.rotation(NodeId(0)), &[Dart(0), du, Dart(5)]);
    assert_eq!(g.rotation(n3), &[du.twin(), Dart(7)]);
}

#[test]
fn has_edge_and_degree() {
    let g = triangle();
    assert!(g.has_edge(NodeId(0), NodeId(1)));
    assert!(g.has_edge(NodeId(1), NodeId(0)));
    assert!(!g.has_edge(NodeId(0), NodeId(0)));
    assert_eq!(g.degree(NodeId(1)), 2);
}

#[test]
fn connectivity() {
    let mut g = triangle();
    assert!(g.is_connected());
    g.add_node(); // isolated
    assert!(!g.is_connected());
}
