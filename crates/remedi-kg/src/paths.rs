//! Path primitives over the undirected layer
//!
//! Two operations back the mechanism search:
//!
//! - [`shortest_path`]: plain unweighted BFS, used for regulator stitching
//!   and the last-resort reachability fallback.
//! - [`SimplePaths`]: lazy enumeration of simple paths in non-decreasing
//!   length order, used as the bounded k-shortest-simple-paths source for
//!   the general search phase.
//!
//! Both walk neighbors in the index's sorted order, so results are
//! reproducible for a fixed graph snapshot.

use crate::{GraphIndex, NodeId};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Unweighted shortest path between `source` and `target` on the
/// undirected layer. Returns `None` when no path exists; `source ==
/// target` yields the single-node path.
pub fn shortest_path(graph: &GraphIndex, source: &NodeId, target: &NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }
    if source == target {
        return Some(vec![source.clone()]);
    }

    let mut queue = VecDeque::new();
    let mut predecessor: ahash::AHashMap<NodeId, NodeId> = ahash::AHashMap::new();
    let mut seen = AHashSet::new();
    queue.push_back(source.clone());
    seen.insert(source.clone());

    while let Some(node) = queue.pop_front() {
        for neighbor in graph.neighbors(&node) {
            if !seen.insert(neighbor.clone()) {
                continue;
            }
            predecessor.insert(neighbor.clone(), node.clone());
            if neighbor == target {
                let mut path = vec![target.clone()];
                let mut cursor = target;
                while let Some(prev) = predecessor.get(cursor) {
                    path.push(prev.clone());
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(neighbor.clone());
        }
    }
    None
}

/// Lazy enumeration of simple paths from `source` to `target` in
/// non-decreasing length order, capped at `max_nodes` nodes per path.
///
/// Paths of the same length come out in the lexicographic order induced
/// by the sorted neighbor lists. Enumeration is staged by exact edge
/// count, so no path is buffered ahead of time; callers impose their own
/// draw budget on top.
pub struct SimplePaths<'g> {
    stage: Option<ExactLengthPaths<'g>>,
    graph: &'g GraphIndex,
    source: NodeId,
    target: NodeId,
    current_edges: usize,
    max_edges: usize,
}

impl<'g> SimplePaths<'g> {
    pub fn new(graph: &'g GraphIndex, source: &NodeId, target: &NodeId, max_nodes: usize) -> Self {
        let max_edges = max_nodes.saturating_sub(1);
        // No simple path with at least one edge returns to its own start;
        // a self-query enumerates nothing rather than cycles.
        if source == target {
            return Self {
                stage: None,
                graph,
                source: source.clone(),
                target: target.clone(),
                current_edges: max_edges + 1,
                max_edges,
            };
        }
        // The shortest path length lower-bounds every stage; a
        // disconnected pair produces an immediately exhausted iterator.
        let min_edges = match shortest_path(graph, source, target) {
            Some(path) => path.len().saturating_sub(1).max(1),
            None => max_edges + 1,
        };
        let mut this = Self {
            stage: None,
            graph,
            source: source.clone(),
            target: target.clone(),
            current_edges: min_edges,
            max_edges,
        };
        if min_edges <= max_edges {
            this.stage = Some(ExactLengthPaths::new(
                graph,
                this.source.clone(),
                this.target.clone(),
                min_edges,
            ));
        }
        this
    }
}

impl<'g> Iterator for SimplePaths<'g> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Vec<NodeId>> {
        loop {
            let stage = self.stage.as_mut()?;
            if let Some(path) = stage.next() {
                return Some(path);
            }
            self.current_edges += 1;
            if self.current_edges > self.max_edges {
                self.stage = None;
                return None;
            }
            self.stage = Some(ExactLengthPaths::new(
                self.graph,
                self.source.clone(),
                self.target.clone(),
                self.current_edges,
            ));
        }
    }
}

/// Iterative DFS yielding the simple paths with exactly `edges` edges.
struct ExactLengthPaths<'g> {
    graph: &'g GraphIndex,
    target: NodeId,
    edges: usize,
    /// Current prefix, starting at the source.
    prefix: Vec<NodeId>,
    on_path: AHashSet<NodeId>,
    /// Per-prefix-node cursor into its sorted neighbor list.
    cursors: Vec<usize>,
}

impl<'g> ExactLengthPaths<'g> {
    fn new(graph: &'g GraphIndex, source: NodeId, target: NodeId, edges: usize) -> Self {
        let mut on_path = AHashSet::new();
        on_path.insert(source.clone());
        Self {
            graph,
            target,
            edges,
            prefix: vec![source],
            on_path,
            cursors: vec![0],
        }
    }
}

impl<'g> Iterator for ExactLengthPaths<'g> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Vec<NodeId>> {
        if self.edges == 0 {
            return None;
        }
        loop {
            let depth = self.cursors.len();
            if depth == 0 {
                return None;
            }
            let node = self.prefix[depth - 1].clone();
            let neighbors = self.graph.neighbors(&node);
            let cursor = &mut self.cursors[depth - 1];
            if *cursor >= neighbors.len() {
                self.cursors.pop();
                let popped = self.prefix.pop();
                if let Some(popped) = popped {
                    self.on_path.remove(&popped);
                }
                continue;
            }
            let child = neighbors[*cursor].clone();
            *cursor += 1;

            if depth == self.edges {
                // Final hop: only the target completes a path.
                if child == self.target {
                    let mut path = self.prefix.clone();
                    path.push(child);
                    return Some(path);
                }
                continue;
            }
            // Interior hop: the target may not appear early, and the path
            // must stay simple.
            if child == self.target || self.on_path.contains(&child) {
                continue;
            }
            self.on_path.insert(child.clone());
            self.prefix.push(child);
            self.cursors.push(0);
        }
    }
}
