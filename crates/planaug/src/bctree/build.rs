//! BC-tree construction: iterative Hopcroft–Tarjan biconnected components.

use std::collections::VecDeque;

use crate::graph::{EdgeId, Graph, NodeId};

use super::{BcId, BcKind, BcNode, BcTree};

impl BcTree {
    /// Decompose `g` (connected, non-empty) into blocks and cut vertices
    /// and root the resulting tree at its first block. Callers pick a
    /// better root afterwards via `reroot`.
    pub fn build(g: &Graph) -> BcTree {
        assert!(g.num_nodes() > 0, "empty graph has no BC-tree");
        debug_assert!(g.is_connected());
        let (blocks, is_cut) = biconnected_components(g);

        let n = g.num_nodes();
        let mut nodes: Vec<BcNode> = Vec::new();
        let mut block_nodes: Vec<Vec<NodeId>> = Vec::new();
        let mut cut_vertex: Vec<Option<NodeId>> = Vec::new();
        let mut node_owner = vec![BcId(usize::MAX); n];

        let mut push = |nodes: &mut Vec<BcNode>,
                        block_nodes: &mut Vec<Vec<NodeId>>,
                        cut_vertex: &mut Vec<Option<NodeId>>,
                        kind: BcKind| {
            nodes.push(BcNode {
                kind,
                parent: None,
                children: Vec::new(),
                level: 0,
                merged_into: None,
            });
            block_nodes.push(Vec::new());
            cut_vertex.push(None);
            BcId(nodes.len() - 1)
        };

        let mut cut_bc = vec![None; n];
        for v in 0..n {
            if is_cut[v] {
                let c = push(&mut nodes, &mut block_nodes, &mut cut_vertex, BcKind::Cut);
                cut_vertex[c.0] = Some(NodeId(v));
                cut_bc[v] = Some(c);
                node_owner[v] = c;
            }
        }
        let first_block = BcId(nodes.len());

        // Undirected tree adjacency, turned into a rooted tree below.
        let mut adj: Vec<Vec<BcId>> = vec![Vec::new(); nodes.len()];
        let mut stamp = vec![usize::MAX; n];
        for (i, comp) in blocks.iter().enumerate() {
            let b = push(&mut nodes, &mut block_nodes, &mut cut_vertex, BcKind::Block);
            adj.push(Vec::new());
            let mut members = Vec::new();
            for &e in comp {
                let (x, y) = g.endpoints(e);
                for v in [x, y] {
                    if stamp[v.0] != i {
                        stamp[v.0] = i;
                        members.push(v);
                    }
                }
            }
            members.sort_unstable();
            for &v in &members {
                match cut_bc[v.0] {
                    Some(c) => {
                        adj[b.0].push(c);
                        adj[c.0].push(b);
                    }
                    None => node_owner[v.0] = b,
                }
            }
            block_nodes[b.0] = members;
        }
        if blocks.is_empty() {
            // Single node, no edges: one trivial block.
            let b = push(&mut nodes, &mut block_nodes, &mut cut_vertex, BcKind::Block);
            adj.push(Vec::new());
            block_nodes[b.0] = vec![NodeId(0)];
            node_owner[0] = b;
        }

        let alive = nodes.len();
        let mut tree = BcTree {
            nodes,
            root: first_block,
            node_owner,
            block_nodes,
            cut_vertex,
            alive,
        };

        // Root at the first block via BFS over the adjacency.
        let mut seen = vec![false; tree.nodes.len()];
        let mut queue = VecDeque::new();
        seen[first_block.0] = true;
        queue.push_back(first_block);
        while let Some(b) = queue.pop_front() {
            for &c in &adj[b.0] {
                if !seen[c.0] {
                    seen[c.0] = true;
                    tree.nodes[c.0].parent = Some(b);
                    tree.nodes[b.0].children.push(c);
                    queue.push_back(c);
                }
            }
        }
        tree.recompute_levels();
        tree
    }
}

/// Biconnected components of a connected graph as edge sets, plus the cut
/// vertex marks. Iterative DFS with an explicit frame stack so deep graphs
/// cannot overflow the call stack.
fn biconnected_components(g: &Graph) -> (Vec<Vec<EdgeId>>, Vec<bool>) {
    let n = g.num_nodes();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![usize::MAX; n];
    let mut is_cut = vec![false; n];
    let mut blocks: Vec<Vec<EdgeId>> = Vec::new();
    if g.num_edges() == 0 {
        return (blocks, is_cut);
    }

    let mut estack: Vec<EdgeId> = Vec::new();
    // frame: (node, next rotation index, tree edge into the node)
    let mut stack: Vec<(NodeId, usize, Option<EdgeId>)> = Vec::new();
    let mut timer = 0usize;
    disc[0] = timer;
    low[0] = timer;
    timer += 1;
    stack.push((NodeId(0), 0, None));
    let mut root_children = 0usize;

    while let Some(frame) = stack.last_mut() {
        let (v, pe) = (frame.0, frame.2);
        if frame.1 < g.degree(v) {
            let d = g.rotation(v)[frame.1];
            frame.1 += 1;
            let e = d.edge();
            if Some(e) == pe {
                continue;
            }
            let w = g.tgt(d);
            if disc[w.0] == usize::MAX {
                estack.push(e);
                disc[w.0] = timer;
                low[w.0] = timer;
                timer += 1;
                stack.push((w, 0, Some(e)));
            } else if disc[w.0] < disc[v.0] {
                // Back edge; the reversed direction is skipped above.
                estack.push(e);
                low[v.0] = low[v.0].min(disc[w.0]);
            }
        } else {
            stack.pop();
            if let Some(up) = stack.last() {
                let u = up.0;
                low[u.0] = low[u.0].min(low[v.0]);
                if low[v.0] >= disc[u.0] {
                    // v's subtree plus u closes one block.
                    let mut comp = Vec::new();
                    loop {
                        let e = estack.pop().expect("tree edge must be on the stack");
                        comp.push(e);
                        if Some(e) == pe {
                            break;
                        }
                    }
                    blocks.push(comp);
                    if up.2.is_some() {
                        is_cut[u.0] = true;
                    } else {
                        root_children += 1;
                    }
                }
            }
        }
    }
    if root_children > 1 {
        is_cut[0] = true;
    }
    debug_assert!(estack.is_empty(), "all edges must be assigned to a block");
    (blocks, is_cut)
}
