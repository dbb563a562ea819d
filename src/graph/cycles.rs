// src/graph/cycles.rs
//! Cycle detection over the component dependency graph.
//!
//! Iterative depth-first search. Each traversal owns its `visited` and
//! `on_stack` sets, so nothing is shared between calls.

use std::collections::BTreeSet;

use super::dependency::DependencyGraph;

/// A cycle found by the traversal started at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Component whose traversal discovered the cycle.
    pub root: String,
    /// Nodes of the cycle, closed: the first node is repeated at the end.
    pub path: Vec<String>,
}

impl Cycle {
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.join(" -> ")
    }
}

struct Frame<'g> {
    node: &'g str,
    neighbors: Vec<&'g str>,
    next: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g DependencyGraph, node: &'g str) -> Self {
        Self {
            node,
            neighbors: graph.neighbors(node).collect(),
            next: 0,
        }
    }
}

/// Finds cycles, reporting at most one per traversal root. Roots and
/// neighbours are visited in name order, so the reported roots are stable.
#[must_use]
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut cycles = Vec::new();

    for root in graph.nodes() {
        if visited.contains(root) {
            continue;
        }
        if let Some(path) = traverse(graph, root, &mut visited) {
            cycles.push(Cycle { root: root.to_string(), path });
        }
    }
    cycles
}

/// Runs one full traversal from `root` and returns the first cycle seen.
/// The traversal always completes so every reachable node ends up visited
/// and off the stack.
fn traverse<'g>(
    graph: &'g DependencyGraph,
    root: &'g str,
    visited: &mut BTreeSet<&'g str>,
) -> Option<Vec<String>> {
    let mut on_stack: BTreeSet<&str> = BTreeSet::new();
    let mut path: Vec<&str> = Vec::new();
    let mut stack: Vec<Frame<'g>> = Vec::new();
    let mut first_cycle: Option<Vec<String>> = None;

    visited.insert(root);
    on_stack.insert(root);
    path.push(root);
    stack.push(Frame::new(graph, root));

    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.neighbors.get(frame.next) else {
            on_stack.remove(frame.node);
            path.pop();
            stack.pop();
            continue;
        };
        frame.next += 1;

        if on_stack.contains(next) {
            if first_cycle.is_none() {
                first_cycle = Some(close_cycle(&path, next));
            }
        } else if visited.insert(next) {
            on_stack.insert(next);
            path.push(next);
            stack.push(Frame::new(graph, next));
        }
    }

    first_cycle
}

fn close_cycle(path: &[&str], back_to: &str) -> Vec<String> {
    let start = path.iter().position(|n| *n == back_to).unwrap_or(0);
    path.iter()
        .skip(start)
        .chain(std::iter::once(&back_to))
        .map(|n| (*n).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::dependency::provider_map;
    use crate::types::Component;

    /// Each edge `a -> b` becomes "a requires b.h, b provides b.h".
    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        for (a, b) in edges {
            names.insert(*a);
            names.insert(*b);
        }
        let comps: Vec<Component> = names
            .iter()
            .map(|n| Component {
                name: (*n).to_string(),
                provided: std::iter::once(format!("{n}.h")).collect(),
                required: edges
                    .iter()
                    .filter(|(a, _)| a == n)
                    .map(|(_, b)| format!("{b}.h"))
                    .collect(),
                ..Component::default()
            })
            .collect();
        DependencyGraph::build(&comps, &provider_map(&comps))
    }

    #[test]
    fn test_cycle_detection_logic() {
        let cases: Vec<(Vec<(&str, &str)>, usize, &str)> = vec![
            (vec![("a", "b"), ("b", "c")], 0, "No cycles"),
            (vec![("a", "b"), ("b", "a")], 1, "Simple cycle"),
            (vec![("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")], 0, "Diamond DAG"),
            (vec![("a", "b"), ("b", "c"), ("c", "a")], 1, "Three node cycle"),
            (vec![("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")], 2, "Disjoint cycles"),
            (vec![("a", "b"), ("b", "a"), ("b", "c"), ("c", "b")], 1, "Figure-8 from one root"),
            (
                vec![("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "a")],
                1,
                "Long cycle (5 nodes)",
            ),
            (vec![], 0, "Empty graph"),
            (vec![("a", "b")], 0, "Single edge"),
        ];

        for (edge_list, expected, desc) in cases {
            let cycles = detect_cycles(&graph(&edge_list));
            assert_eq!(cycles.len(), expected, "Failed: {desc}");
        }
    }

    #[test]
    fn three_cycle_names_first_root_with_path() {
        let cycles = detect_cycles(&graph(&[("b", "c"), ("c", "a"), ("a", "b")]));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].root, "a");
        assert_eq!(cycles[0].display_path(), "a -> b -> c -> a");
    }

    #[test]
    fn cycle_below_root_is_attributed_to_root() {
        let cycles = detect_cycles(&graph(&[("a", "b"), ("b", "c"), ("c", "b")]));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].root, "a");
        assert_eq!(cycles[0].path, vec!["b", "c", "b"]);
    }

    #[test]
    fn repeated_runs_agree() {
        let g = graph(&[("x", "y"), ("y", "z"), ("z", "x"), ("w", "x")]);
        let first = detect_cycles(&g);
        for _ in 0..10 {
            assert_eq!(detect_cycles(&g), first);
        }
    }
}
