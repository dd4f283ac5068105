//! Simple-cycle enumeration over the dependency graph (Johnson's algorithm).
//!
//! Each cycle is reported starting at its lexicographically smallest member
//! and cycles are ordered by that start, then by DFS order over name-sorted
//! neighbours. Output is therefore stable across runs regardless of the
//! order records were read in.
//!
//! The search from a start node is confined to the strongly connected
//! component it forms with the nodes ranked above it, and nodes that cannot
//! lead back to the start stay blocked until a cycle through them is found.
//! The cost is linear in the size of the graph per reported cycle, so an
//! acyclic graph costs one component check per node.

use crate::package_graph::domain::{DependencyGraph, SearchDirection};
use crate::shared::Result;
use std::collections::HashMap;

pub struct CycleFinder;

/// DFS frame: a node on the current path, the next successor to try, and
/// whether a cycle has been closed below it
struct Frame {
    node: usize,
    next: usize,
    closed_cycle: bool,
}

/// Blocking state for the circuits rooted at one start node
struct CircuitSearch<'a> {
    start: usize,
    successors: &'a [Vec<usize>],
    in_component: Vec<bool>,
    blocked: Vec<bool>,
    /// `blocked_by[w]` lists nodes to unblock once `w` is unblocked
    blocked_by: Vec<Vec<usize>>,
}

impl CycleFinder {
    /// All simple directed cycles, each as the ordered member list (the
    /// closing repeat of the first element is not included)
    pub fn simple_cycles(graph: &DependencyGraph) -> Result<Vec<Vec<String>>> {
        let names = graph.package_names();
        let rank: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();

        // Name-sorted neighbours map to ascending ranks
        let successors = names
            .iter()
            .map(|name| -> Result<Vec<usize>> {
                Ok(graph
                    .neighbors(name, SearchDirection::Down)?
                    .into_iter()
                    .filter_map(|next| rank.get(next).copied())
                    .collect())
            })
            .collect::<Result<Vec<_>>>()?;
        let mut predecessors = vec![Vec::new(); names.len()];
        for (from, targets) in successors.iter().enumerate() {
            for &to in targets {
                predecessors[to].push(from);
            }
        }

        let mut cycles = Vec::new();
        for start in 0..names.len() {
            let in_component = strong_component(start, &successors, &predecessors);
            let members = in_component.iter().filter(|member| **member).count();
            if members == 1 && !successors[start].contains(&start) {
                continue;
            }

            let search = CircuitSearch {
                start,
                successors: &successors,
                in_component,
                blocked: vec![false; names.len()],
                blocked_by: vec![Vec::new(); names.len()],
            };
            for cycle in search.run() {
                cycles.push(cycle.into_iter().map(|i| names[i].to_string()).collect());
            }
        }

        Ok(cycles)
    }

    /// Renders a cycle as `a -> b -> a`
    pub fn format_cycle(cycle: &[String]) -> String {
        match cycle.first() {
            Some(first) => format!("{} -> {}", cycle.join(" -> "), first),
            None => String::new(),
        }
    }
}

/// Membership mask of the strongly connected component of `start` within
/// the nodes ranked at or above it: reachable from `start` and reaching it
fn strong_component(
    start: usize,
    successors: &[Vec<usize>],
    predecessors: &[Vec<usize>],
) -> Vec<bool> {
    let forward = reach_from(start, successors);
    let backward = reach_from(start, predecessors);
    forward
        .into_iter()
        .zip(backward)
        .map(|(down, up)| down && up)
        .collect()
}

fn reach_from(start: usize, edges: &[Vec<usize>]) -> Vec<bool> {
    let mut seen = vec![false; edges.len()];
    seen[start] = true;
    let mut pending = vec![start];
    while let Some(node) = pending.pop() {
        for &next in &edges[node] {
            if next >= start && !seen[next] {
                seen[next] = true;
                pending.push(next);
            }
        }
    }
    seen
}

impl CircuitSearch<'_> {
    /// Every elementary circuit through `start`, in DFS order
    fn run(mut self) -> Vec<Vec<usize>> {
        let mut circuits = Vec::new();
        let mut path = vec![self.start];
        self.blocked[self.start] = true;
        let mut stack = vec![Frame {
            node: self.start,
            next: 0,
            closed_cycle: false,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if let Some(&next) = self.successors[node].get(frame.next) {
                frame.next += 1;
                if !self.in_component[next] {
                    continue;
                }
                if next == self.start {
                    circuits.push(path.clone());
                    frame.closed_cycle = true;
                } else if !self.blocked[next] {
                    self.blocked[next] = true;
                    path.push(next);
                    stack.push(Frame {
                        node: next,
                        next: 0,
                        closed_cycle: false,
                    });
                }
                continue;
            }

            let closed_cycle = frame.closed_cycle;
            stack.pop();
            path.pop();
            if closed_cycle {
                self.unblock(node);
            } else {
                for &next in &self.successors[node] {
                    if self.in_component[next] && !self.blocked_by[next].contains(&node) {
                        self.blocked_by[next].push(node);
                    }
                }
            }
            if let Some(parent) = stack.last_mut() {
                parent.closed_cycle |= closed_cycle;
            }
        }

        circuits
    }

    fn unblock(&mut self, node: usize) {
        self.blocked[node] = false;
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            for waiting in std::mem::take(&mut self.blocked_by[current]) {
                if self.blocked[waiting] {
                    self.blocked[waiting] = false;
                    pending.push(waiting);
                }
            }
        }
    }
}
