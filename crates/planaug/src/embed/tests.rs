use super::*;
use crate::graph::{Dart, Graph, NodeId};

fn triangle() -> Graph {
    let mut g = Graph::new();
    let n: Vec<NodeId> = (0..3).map(|_| g.add_node()).collect();
    g.add_edge(n[0], n[1]);
    g.add_edge(n[1], n[2]);
    g.add_edge(n[2], n[0]);
    g
}

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
fn triangle_has_two_faces() {
    let g = triangle();
    let emb = Embedding::new(&g);
    assert_eq!(emb.num_faces(), 2);
    // {0 -> 1, 1 -> 2, 2 -> 0} is one orbit, its twins the other
    assert_eq!(emb.face_of(Dart(0)), emb.face_of(Dart(2)));
    assert_eq!(emb.face_of(Dart(0)), emb.face_of(Dart(4)));
    assert_ne!(emb.face_of(Dart(0)), emb.face_of(Dart(1)));
    assert_eq!(emb.face_size(&g, emb.face_of(Dart(0))), 3);
}

#[test]
fn barbell_faces_and_outer() {
    let g = barbell();
    let emb = Embedding::new(&g);
    // Two triangle interiors plus the outer face.
    assert_eq!(emb.num_faces(), 3);
    let outer = emb.outer_face();
    assert_eq!(emb.face_size(&g, outer), 8);
    // The bridge borders the outer face on both sides.
    assert_eq!(emb.face_of(Dart(12)), outer);
    assert_eq!(emb.face_of(Dart(13)), outer);
}

#[test]
fn split_face_splits_exactly_one_face() {
    let mut g = barbell();
    let mut emb = Embedding::new(&g);
    let outer = emb.outer_face();
    // Darts 5 (0 -> 2) and 8 (4 -> 5) both lie on the outer face.
    assert_eq!(emb.face_of(Dart(5)), outer);
    assert_eq!(emb.face_of(Dart(8)), outer);
    let e = emb.split_face(&mut g, Dart(5), Dart(8));
    assert_eq!(g.endpoints(e), (NodeId(0), NodeId(4)));
    assert_eq!(emb.num_faces(), 4);
    // Euler still holds: 6 - 8 + 4 == 2.
    assert_eq!(g.num_nodes() + emb.num_faces(), g.num_edges() + 2);
    // Anchor `a` keeps the old face, anchor `b` moves to the new one.
    assert_eq!(emb.face_of(Dart(5)), outer);
    let nf = emb.face_of(Dart(8));
    assert_ne!(nf, outer);
    assert_eq!(emb.face_size(&g, outer) + emb.face_size(&g, nf), 10);
}

#[test]
fn outer_face_can_be_redesignated() {
    let mut g = barbell();
    let mut emb = Embedding::new(&g);
    let inner = emb.face_of(Dart(0));
    assert_ne!(inner, emb.outer_face());
    emb.set_outer_face(inner);
    assert_eq!(emb.outer_face(), inner);
    // The designation survives splits of other faces.
    emb.split_face(&mut g, Dart(5), Dart(8));
    assert_eq!(emb.outer_face(), inner);
}

#[test]
fn face_walk_is_closed() {
    let g = barbell();
    let emb = Embedding::new(&g);
    let mut total = 0;
    for f in 0..emb.num_faces() {
        let darts = emb.face_darts(&g, FaceId(f));
        total += darts.len();
        for &d in &darts {
            assert_eq!(emb.face_of(d), FaceId(f));
        }
    }
    assert_eq!(total, g.num_darts());
}
